use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::scholarship_dto::{
    CreateScholarshipPayload, ScholarshipListQuery, UpdateScholarshipPayload,
};
use crate::error::Result;
use crate::models::scholarship::Scholarship;
use crate::services::listing_service::{normalize_tags, ListingService, Page, PageParams};

impl ListingService<Scholarship> {
    pub async fn create(
        &self,
        payload: CreateScholarshipPayload,
        created_by: Uuid,
    ) -> Result<Scholarship> {
        let fields_of_study = normalize_tags(payload.fields_of_study);
        let total_slots = payload.total_slots.unwrap_or(1);

        let scholarship = sqlx::query_as::<_, Scholarship>(
            r#"
            INSERT INTO scholarships (
                title, description,
                provider_name, provider_type, provider_website,
                amount_value, amount_currency, amount_full_ride,
                eligibility, education_level, min_gpa, fields_of_study,
                application_deadline, application_link, required_docs,
                host_country, host_institution, total_slots, created_by
            ) VALUES (
                $1, $2,
                $3, $4, $5,
                $6, $7, $8,
                $9, $10, $11, $12,
                $13, $14, $15,
                $16, $17, $18, $19
            )
            RETURNING *
            "#,
        )
        .bind(payload.title)
        .bind(payload.description)
        .bind(payload.provider.name)
        .bind(payload.provider.kind)
        .bind(payload.provider.website)
        .bind(payload.amount.value)
        .bind(payload.amount.currency)
        .bind(payload.amount.is_full_ride)
        .bind(payload.eligibility)
        .bind(payload.qualifications.education_level)
        .bind(payload.qualifications.min_gpa)
        .bind(fields_of_study)
        .bind(payload.application_process.deadline)
        .bind(payload.application_process.link)
        .bind(payload.application_process.required_docs)
        .bind(payload.host_country)
        .bind(payload.host_institution)
        .bind(total_slots)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(scholarship)
    }

    pub async fn update(
        &self,
        id: Uuid,
        requester: Uuid,
        payload: UpdateScholarshipPayload,
    ) -> Result<Scholarship> {
        self.require_owner(id, requester).await?;

        let scholarship = sqlx::query_as::<_, Scholarship>(
            r#"
            UPDATE scholarships
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                provider_name = COALESCE($4, provider_name),
                provider_type = COALESCE($5, provider_type),
                provider_website = COALESCE($6, provider_website),
                amount_value = COALESCE($7, amount_value),
                amount_currency = COALESCE($8, amount_currency),
                amount_full_ride = COALESCE($9, amount_full_ride),
                eligibility = COALESCE($10, eligibility),
                education_level = COALESCE($11, education_level),
                min_gpa = COALESCE($12, min_gpa),
                fields_of_study = COALESCE($13, fields_of_study),
                application_deadline = COALESCE($14, application_deadline),
                application_link = COALESCE($15, application_link),
                required_docs = COALESCE($16, required_docs),
                host_country = COALESCE($17, host_country),
                host_institution = COALESCE($18, host_institution),
                total_slots = COALESCE($19, total_slots),
                is_active = COALESCE($20, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.title)
        .bind(payload.description)
        .bind(payload.provider.as_ref().map(|p| p.name.clone()))
        .bind(payload.provider.as_ref().map(|p| p.kind.clone()))
        .bind(payload.provider.as_ref().and_then(|p| p.website.clone()))
        .bind(payload.amount.as_ref().and_then(|a| a.value))
        .bind(payload.amount.as_ref().map(|a| a.currency.clone()))
        .bind(payload.amount.as_ref().map(|a| a.is_full_ride))
        .bind(payload.eligibility)
        .bind(
            payload
                .qualifications
                .as_ref()
                .map(|q| q.education_level.clone()),
        )
        .bind(payload.qualifications.as_ref().and_then(|q| q.min_gpa))
        .bind(payload.fields_of_study.map(normalize_tags))
        .bind(payload.application_process.as_ref().and_then(|a| a.deadline))
        .bind(payload.application_process.as_ref().map(|a| a.link.clone()))
        .bind(
            payload
                .application_process
                .as_ref()
                .map(|a| a.required_docs.clone()),
        )
        .bind(payload.host_country)
        .bind(payload.host_institution)
        .bind(payload.total_slots)
        .bind(payload.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(scholarship)
    }

    pub async fn list(&self, query: ScholarshipListQuery) -> Result<Page<Scholarship>> {
        let params = PageParams::new(query.page, query.limit);
        self.run_paged(|qb| push_list_filters(qb, &query), params)
            .await
    }

    /// The ten most recently posted scholarships that are still active.
    pub async fn recent(&self) -> Result<Vec<Scholarship>> {
        let items = sqlx::query_as::<_, Scholarship>(
            "SELECT * FROM scholarships WHERE is_active = TRUE ORDER BY created_at DESC LIMIT 10",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}

fn push_list_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ScholarshipListQuery) {
    if let Some(country) = &query.country {
        qb.push(" AND host_country = ");
        qb.push_bind(country.clone());
    }
    if let Some(field) = &query.field {
        // fields_of_study is stored lowercased.
        qb.push(" AND ");
        qb.push_bind(field.to_lowercase());
        qb.push(" = ANY(fields_of_study)");
    }
    if let Some(provider) = &query.provider {
        qb.push(" AND provider_type = ");
        qb.push_bind(provider.clone());
    }
    if let Some(education_level) = &query.education_level {
        qb.push(" AND education_level = ");
        qb.push_bind(education_level.clone());
    }
}
