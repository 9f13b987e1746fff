use std::marker::PhantomData;

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::listing_dto::OwnerSummary;
use crate::error::{Error, Result};
use crate::models::listing::Listing;

/// Tag-like inputs (skills, fields of study, forum tags) are stored
/// trimmed and lowercased so filters and search match case-insensitively.
pub(crate) fn normalize_tags(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}

/// One page of listing rows together with the pagination envelope.
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Normalized pagination input: page >= 1, limit in 1..=100.
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    page: i64,
    limit: i64,
}

impl PageParams {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = page.unwrap_or(1).max(1);
        let limit = limit.unwrap_or(10).clamp(1, 100);
        Self { page, limit }
    }

    fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Persistence operations shared by every listing type. Type-specific
/// inserts, partial updates and filtered listings live in inherent
/// impls next to each model's payload types.
#[derive(Clone)]
pub struct ListingService<T: Listing> {
    pub(crate) pool: PgPool,
    _marker: PhantomData<T>,
}

impl<T: Listing> ListingService<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<T> {
        let sql = format!("SELECT * FROM {} WHERE id = $1", T::TABLE);
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(T::NOT_FOUND.to_string()))
    }

    /// Loads the record and rejects with 403 unless the requester created it.
    pub async fn require_owner(&self, id: Uuid, requester: Uuid) -> Result<T> {
        let record = self.get(id).await?;
        if record.created_by() != requester {
            return Err(Error::Forbidden(format!(
                "Not authorized to modify this {}",
                T::LABEL
            )));
        }
        Ok(record)
    }

    pub async fn delete_owned(&self, id: Uuid, requester: Uuid) -> Result<()> {
        self.require_owner(id, requester).await?;
        let sql = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
        sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(())
    }

    /// Marks the record verified. Idempotent; callers gate this behind
    /// the admin middleware.
    pub async fn verify(&self, id: Uuid) -> Result<T> {
        let sql = format!(
            "UPDATE {} SET is_verified = TRUE, updated_at = NOW() WHERE id = $1 RETURNING *",
            T::TABLE
        );
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound(T::NOT_FOUND.to_string()))
    }

    pub async fn list_by_owner(&self, owner: Uuid) -> Result<Vec<T>> {
        let sql = format!(
            "SELECT * FROM {} WHERE created_by = $1 ORDER BY {}",
            T::TABLE,
            T::DEFAULT_ORDER
        );
        let items = sqlx::query_as::<_, T>(&sql)
            .bind(owner)
            .fetch_all(&self.pool)
            .await?;
        Ok(items)
    }

    pub async fn search(&self, term: &str) -> Result<Vec<T>> {
        let mut qb = Self::search_statement(term);
        let items = qb.build_query_as::<T>().fetch_all(&self.pool).await?;
        Ok(items)
    }

    fn search_statement(term: &str) -> QueryBuilder<'static, Postgres> {
        let pattern = format!("%{}%", term);
        let mut qb = QueryBuilder::new(format!("SELECT * FROM {} WHERE ", T::TABLE));
        let mut clauses = qb.separated(" OR ");
        for expr in T::SEARCH_EXPRS {
            clauses.push(format!("{} ILIKE ", expr));
            clauses.push_bind_unseparated(pattern.clone());
        }
        qb.push(format!(" ORDER BY {}", T::DEFAULT_ORDER));
        qb
    }

    /// The expanded profile view shows who posted a listing, so missing
    /// owners (only possible if cascade rules are broken) surface as 500s.
    pub async fn owner_of(&self, owner_id: Uuid) -> Result<OwnerSummary> {
        sqlx::query_as::<_, OwnerSummary>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::Internal(format!("owner {} missing for {}", owner_id, T::TABLE)))
    }

    /// Runs the two-query paginated listing: a COUNT(*) and the page of
    /// rows, with `push_filters` appending the same `AND ...` clauses to
    /// both statements.
    pub(crate) async fn run_paged<F>(&self, push_filters: F, params: PageParams) -> Result<Page<T>>
    where
        F: Fn(&mut QueryBuilder<'_, Postgres>),
    {
        let mut count_qb =
            QueryBuilder::<Postgres>::new(format!("SELECT COUNT(*) FROM {} WHERE TRUE", T::TABLE));
        push_filters(&mut count_qb);
        let total: i64 = count_qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut items_qb =
            QueryBuilder::<Postgres>::new(format!("SELECT * FROM {} WHERE TRUE", T::TABLE));
        push_filters(&mut items_qb);
        items_qb.push(format!(" ORDER BY {} LIMIT ", T::DEFAULT_ORDER));
        items_qb.push_bind(params.limit);
        items_qb.push(" OFFSET ");
        items_qb.push_bind(params.offset());
        let items = items_qb.build_query_as::<T>().fetch_all(&self.pool).await?;

        let total_pages = ((total as f64) / (params.limit as f64)).ceil() as i64;

        Ok(Page {
            items,
            total,
            page: params.page,
            limit: params.limit,
            total_pages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::scholarship::Scholarship;
    use crate::models::vacancy::Vacancy;
    use sqlx::Execute;

    #[test]
    fn tags_are_trimmed_and_lowercased() {
        let tags = normalize_tags(vec!["  Rust ".into(), "SQL".into(), "   ".into()]);
        assert_eq!(tags, vec!["rust", "sql"]);
    }

    #[test]
    fn page_params_normalize_out_of_range_input() {
        let params = PageParams::new(None, None);
        assert_eq!((params.page, params.limit), (1, 10));
        assert_eq!(params.offset(), 0);

        let params = PageParams::new(Some(-3), Some(0));
        assert_eq!((params.page, params.limit), (1, 1));

        let params = PageParams::new(Some(4), Some(500));
        assert_eq!((params.page, params.limit), (4, 100));
        assert_eq!(params.offset(), 300);
    }

    #[test]
    fn search_statement_covers_every_text_field() {
        let mut qb = ListingService::<Vacancy>::search_statement("rust");
        let sql = qb.build().sql().to_string();
        assert!(sql.starts_with("SELECT * FROM vacancies WHERE "));
        assert!(sql.contains("title ILIKE $1"));
        assert!(sql.contains("OR company ILIKE $2"));
        assert!(sql.contains("OR description ILIKE $3"));
        assert!(sql.ends_with("ORDER BY created_at DESC"));
    }

    #[test]
    fn scholarship_search_flattens_fields_of_study() {
        let mut qb = ListingService::<Scholarship>::search_statement("math");
        let sql = qb.build().sql().to_string();
        assert!(sql.contains("array_to_string(fields_of_study, ' ') ILIKE $4"));
    }
}
