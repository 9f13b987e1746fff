use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};

/// Apply/register actions. Each runs in one transaction with the listing
/// row locked, so the membership row and the counter move together even
/// under concurrent requests.
#[derive(Clone)]
pub struct ParticipationService {
    pool: PgPool,
}

impl ParticipationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn apply_to_vacancy(&self, vacancy_id: Uuid, user_id: Uuid) -> Result<i32> {
        self.apply(
            "vacancies",
            "vacancy_applications",
            "vacancy_id",
            "vacancy",
            "Vacancy not found",
            vacancy_id,
            user_id,
        )
        .await
    }

    pub async fn apply_to_scholarship(&self, scholarship_id: Uuid, user_id: Uuid) -> Result<i32> {
        self.apply(
            "scholarships",
            "scholarship_applications",
            "scholarship_id",
            "scholarship",
            "Scholarship not found",
            scholarship_id,
            user_id,
        )
        .await
    }

    /// Shared apply path: the listing must exist, be active and be
    /// verified; one application per user; the stored applicant_count is
    /// incremented in the same transaction as the application row.
    #[allow(clippy::too_many_arguments)]
    async fn apply(
        &self,
        table: &str,
        join_table: &str,
        fk: &str,
        label: &str,
        not_found: &str,
        listing_id: Uuid,
        user_id: Uuid,
    ) -> Result<i32> {
        let mut tx = self.pool.begin().await?;

        let sql = format!(
            "SELECT is_active, is_verified FROM {} WHERE id = $1 FOR UPDATE",
            table
        );
        let row = sqlx::query_as::<_, (bool, bool)>(&sql)
            .bind(listing_id)
            .fetch_optional(&mut *tx)
            .await?;
        let Some((is_active, is_verified)) = row else {
            return Err(Error::NotFound(not_found.to_string()));
        };
        if !is_active {
            return Err(Error::BadRequest(format!(
                "This {} is no longer active",
                label
            )));
        }
        if !is_verified {
            return Err(Error::BadRequest(format!(
                "You cannot apply to this {} because it is not verified.",
                label
            )));
        }

        let sql = format!(
            "INSERT INTO {} (user_id, {}) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            join_table, fk
        );
        let inserted = sqlx::query(&sql)
            .bind(user_id)
            .bind(listing_id)
            .execute(&mut *tx)
            .await?;
        if inserted.rows_affected() == 0 {
            return Err(Error::BadRequest(format!(
                "You have already applied to this {}",
                label
            )));
        }

        let sql = format!(
            "UPDATE {} SET applicant_count = applicant_count + 1, updated_at = NOW() \
             WHERE id = $1 RETURNING applicant_count",
            table
        );
        let count = sqlx::query_scalar::<_, i32>(&sql)
            .bind(listing_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(count)
    }

    /// Registration is gated on verification and, when max_attendees is
    /// set, on remaining capacity. Returns the attendee count after the
    /// registration.
    pub async fn register_for_forum(&self, forum_id: Uuid, user_id: Uuid) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, (bool, Option<i32>)>(
            "SELECT is_verified, max_attendees FROM conference_forums WHERE id = $1 FOR UPDATE",
        )
        .bind(forum_id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some((is_verified, max_attendees)) = row else {
            return Err(Error::NotFound("Conference/Forum not found".to_string()));
        };
        if !is_verified {
            return Err(Error::BadRequest(
                "You cannot register for this conference/forum because it is not verified."
                    .to_string(),
            ));
        }

        let inserted = sqlx::query(
            "INSERT INTO forum_attendees (user_id, forum_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(forum_id)
        .execute(&mut *tx)
        .await?;
        if inserted.rows_affected() == 0 {
            return Err(Error::BadRequest("User already registered".to_string()));
        }

        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM forum_attendees WHERE forum_id = $1")
                .bind(forum_id)
                .fetch_one(&mut *tx)
                .await?;

        if let Some(max) = max_attendees {
            // Abandoning the transaction rolls the insert back.
            if count > max as i64 {
                return Err(Error::BadRequest("Maximum attendees reached".to_string()));
            }
        }

        tx.commit().await?;
        Ok(count)
    }

    /// Removing a non-attendee is a no-op success. Returns the attendee
    /// count after the removal.
    pub async fn unregister_from_forum(&self, forum_id: Uuid, user_id: Uuid) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let exists =
            sqlx::query_scalar::<_, Uuid>("SELECT id FROM conference_forums WHERE id = $1 FOR UPDATE")
                .bind(forum_id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Err(Error::NotFound("Conference/Forum not found".to_string()));
        }

        sqlx::query("DELETE FROM forum_attendees WHERE user_id = $1 AND forum_id = $2")
            .bind(user_id)
            .bind(forum_id)
            .execute(&mut *tx)
            .await?;

        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM forum_attendees WHERE forum_id = $1")
                .bind(forum_id)
                .fetch_one(&mut *tx)
                .await?;

        tx.commit().await?;
        Ok(count)
    }
}
