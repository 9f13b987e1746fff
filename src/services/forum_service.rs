use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::forum_dto::{
    CreateForumPayload, ForumListQuery, UpdateForumPayload, DATE_ORDER_MESSAGE,
};
use crate::dto::listing_dto::OwnerSummary;
use crate::error::{Error, Result};
use crate::models::forum::ConferenceForum;
use crate::services::listing_service::{normalize_tags, ListingService, Page, PageParams};

impl ListingService<ConferenceForum> {
    pub async fn create(
        &self,
        payload: CreateForumPayload,
        created_by: Uuid,
    ) -> Result<ConferenceForum> {
        let tags = normalize_tags(payload.tags);

        let forum = sqlx::query_as::<_, ConferenceForum>(
            r#"
            INSERT INTO conference_forums (
                title, description, location, start_date, end_date,
                organizer_name, organizer_email, organizer_website,
                tags, is_virtual, registration_link, max_attendees, created_by
            ) VALUES (
                $1, $2, $3, $4, $5,
                $6, $7, $8,
                $9, $10, $11, $12, $13
            )
            RETURNING *
            "#,
        )
        .bind(payload.title)
        .bind(payload.description)
        .bind(payload.location)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(payload.organizer.name)
        .bind(payload.organizer.email)
        .bind(payload.organizer.website)
        .bind(tags)
        .bind(payload.is_virtual)
        .bind(payload.registration_link)
        .bind(payload.max_attendees)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(forum)
    }

    /// Partial merge with the date ordering re-checked against the merged
    /// record, since either bound may arrive alone.
    pub async fn update(
        &self,
        id: Uuid,
        requester: Uuid,
        payload: UpdateForumPayload,
    ) -> Result<ConferenceForum> {
        let current = self.require_owner(id, requester).await?;

        let start = payload.start_date.unwrap_or(current.start_date);
        let end = payload.end_date.unwrap_or(current.end_date);
        if end < start {
            return Err(Error::BadRequest(DATE_ORDER_MESSAGE.to_string()));
        }

        let forum = sqlx::query_as::<_, ConferenceForum>(
            r#"
            UPDATE conference_forums
            SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                location = COALESCE($4, location),
                start_date = COALESCE($5, start_date),
                end_date = COALESCE($6, end_date),
                organizer_name = COALESCE($7, organizer_name),
                organizer_email = COALESCE($8, organizer_email),
                organizer_website = COALESCE($9, organizer_website),
                tags = COALESCE($10, tags),
                is_virtual = COALESCE($11, is_virtual),
                registration_link = COALESCE($12, registration_link),
                max_attendees = COALESCE($13, max_attendees),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.title)
        .bind(payload.description)
        .bind(payload.location)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(payload.organizer.as_ref().map(|o| o.name.clone()))
        .bind(payload.organizer.as_ref().map(|o| o.email.clone()))
        .bind(payload.organizer.as_ref().and_then(|o| o.website.clone()))
        .bind(payload.tags.map(normalize_tags))
        .bind(payload.is_virtual)
        .bind(payload.registration_link)
        .bind(payload.max_attendees)
        .fetch_one(&self.pool)
        .await?;

        Ok(forum)
    }

    pub async fn list(&self, query: ForumListQuery) -> Result<Page<ConferenceForum>> {
        let params = PageParams::new(query.page, query.limit);
        self.run_paged(|qb| push_list_filters(qb, &query), params)
            .await
    }

    /// The ten soonest forums that have not started yet.
    pub async fn upcoming(&self) -> Result<Vec<ConferenceForum>> {
        let items = sqlx::query_as::<_, ConferenceForum>(
            "SELECT * FROM conference_forums WHERE start_date >= NOW() ORDER BY start_date ASC LIMIT 10",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Registered attendees in registration order, for the detail view.
    pub async fn attendees(&self, forum_id: Uuid) -> Result<Vec<OwnerSummary>> {
        let attendees = sqlx::query_as::<_, OwnerSummary>(
            r#"
            SELECT u.id, u.name, u.email
            FROM users u
            JOIN forum_attendees fa ON fa.user_id = u.id
            WHERE fa.forum_id = $1
            ORDER BY fa.created_at ASC
            "#,
        )
        .bind(forum_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(attendees)
    }
}

fn push_list_filters(qb: &mut QueryBuilder<'_, Postgres>, query: &ForumListQuery) {
    if let Some(location) = &query.location {
        qb.push(" AND location ILIKE ");
        qb.push_bind(format!("%{}%", location));
    }
    if let Some(start_date) = query.start_date {
        qb.push(" AND start_date >= ");
        qb.push_bind(start_date);
    }
    if let Some(end_date) = query.end_date {
        qb.push(" AND end_date <= ");
        qb.push_bind(end_date);
    }
    if let Some(is_virtual) = query.is_virtual {
        qb.push(" AND is_virtual = ");
        qb.push_bind(is_virtual);
    }
}
