use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::vacancy_dto::{CreateVacancyPayload, UpdateVacancyPayload, VacancyListQuery};
use crate::error::Result;
use crate::models::vacancy::Vacancy;
use crate::services::listing_service::{normalize_tags, ListingService, Page, PageParams};

impl ListingService<Vacancy> {
    /// Inserts a vacancy owned by `created_by`. Verification, activity and
    /// applicant count come from column defaults, never from the client.
    pub async fn create(&self, payload: CreateVacancyPayload, created_by: Uuid) -> Result<Vacancy> {
        let salary = payload.salary.unwrap_or_default();
        let skills = normalize_tags(payload.skills.unwrap_or_default());
        let requirements = payload.requirements.unwrap_or_default();

        let vacancy = sqlx::query_as::<_, Vacancy>(
            r#"
            INSERT INTO vacancies (
                title, company, description, requirements,
                location_city, location_state, location_country, location_remote,
                salary_min, salary_max, salary_currency,
                employment_type, industry, skills, application_deadline,
                contact_email, contact_phone, contact_website, created_by
            ) VALUES (
                $1, $2, $3, $4,
                $5, $6, $7, $8,
                $9, $10, $11,
                $12, $13, $14, $15,
                $16, $17, $18, $19
            )
            RETURNING *
            "#,
        )
        .bind(payload.title)
        .bind(payload.company)
        .bind(payload.description)
        .bind(requirements)
        .bind(payload.location.city)
        .bind(payload.location.state)
        .bind(payload.location.country)
        .bind(payload.location.remote)
        .bind(salary.min)
        .bind(salary.max)
        .bind(salary.currency)
        .bind(payload.employment_type)
        .bind(payload.industry)
        .bind(skills)
        .bind(payload.application_deadline)
        .bind(payload.contact.email)
        .bind(payload.contact.phone)
        .bind(payload.contact.website)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(vacancy)
    }

    /// Partial merge: absent fields keep their stored values. Only the
    /// owner may update, and verification/count columns stay server-side.
    pub async fn update(
        &self,
        id: Uuid,
        requester: Uuid,
        payload: UpdateVacancyPayload,
    ) -> Result<Vacancy> {
        self.require_owner(id, requester).await?;

        let vacancy = sqlx::query_as::<_, Vacancy>(
            r#"
            UPDATE vacancies
            SET
                title = COALESCE($2, title),
                company = COALESCE($3, company),
                description = COALESCE($4, description),
                requirements = COALESCE($5, requirements),
                location_city = COALESCE($6, location_city),
                location_state = COALESCE($7, location_state),
                location_country = COALESCE($8, location_country),
                location_remote = COALESCE($9, location_remote),
                salary_min = COALESCE($10, salary_min),
                salary_max = COALESCE($11, salary_max),
                salary_currency = COALESCE($12, salary_currency),
                employment_type = COALESCE($13, employment_type),
                industry = COALESCE($14, industry),
                skills = COALESCE($15, skills),
                application_deadline = COALESCE($16, application_deadline),
                contact_email = COALESCE($17, contact_email),
                contact_phone = COALESCE($18, contact_phone),
                contact_website = COALESCE($19, contact_website),
                is_active = COALESCE($20, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.title)
        .bind(payload.company)
        .bind(payload.description)
        .bind(payload.requirements)
        .bind(payload.location.as_ref().map(|l| l.city.clone()))
        .bind(payload.location.as_ref().and_then(|l| l.state.clone()))
        .bind(payload.location.as_ref().map(|l| l.country.clone()))
        .bind(payload.location.as_ref().map(|l| l.remote))
        .bind(payload.salary.as_ref().and_then(|s| s.min))
        .bind(payload.salary.as_ref().and_then(|s| s.max))
        .bind(payload.salary.as_ref().map(|s| s.currency.clone()))
        .bind(payload.employment_type)
        .bind(payload.industry)
        .bind(payload.skills.map(normalize_tags))
        .bind(payload.application_deadline)
        .bind(payload.contact.as_ref().map(|c| c.email.clone()))
        .bind(payload.contact.as_ref().and_then(|c| c.phone.clone()))
        .bind(payload.contact.as_ref().and_then(|c| c.website.clone()))
        .bind(payload.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(vacancy)
    }

    pub async fn list(&self, query: VacancyListQuery) -> Result<Page<Vacancy>> {
        let params = PageParams::new(query.page, query.limit);
        self.run_paged(|qb| push_list_filters(qb, &query), params)
            .await
    }

    /// Vacancies the user has applied to, most recent application first.
    pub async fn applied_by(&self, user_id: Uuid) -> Result<Vec<Vacancy>> {
        let items = sqlx::query_as::<_, Vacancy>(
            r#"
            SELECT v.*
            FROM vacancies v
            JOIN vacancy_applications a ON a.vacancy_id = v.id
            WHERE a.user_id = $1
            ORDER BY a.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }
}

fn push_list_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &VacancyListQuery) {
    if let Some(industry) = &query.industry {
        qb.push(" AND industry = ");
        qb.push_bind(industry.clone());
    }
    if let Some(employment_type) = &query.employment_type {
        qb.push(" AND employment_type = ");
        qb.push_bind(employment_type.clone());
    }
    if let Some(remote) = query.remote {
        qb.push(" AND location_remote = ");
        qb.push_bind(remote);
    }
    if let Some(country) = &query.country {
        qb.push(" AND location_country = ");
        qb.push_bind(country.clone());
    }
    if let Some(min_salary) = query.min_salary {
        qb.push(" AND salary_min >= ");
        qb.push_bind(min_salary);
    }
}
