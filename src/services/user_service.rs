use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user_dto::{ApplicationRefs, RegisterPayload, UpdateUserPayload};
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::crypto::{hash_password, verify_password};

const EMAIL_TAKEN: &str = "Email is already in use";

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn register(&self, payload: RegisterPayload) -> Result<User> {
        let email = payload.email.trim().to_lowercase();

        let existing = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(Error::BadRequest(EMAIL_TAKEN.to_string()));
        }

        let password_hash = hash_password(&payload.password)?;

        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(payload.name.trim())
        .bind(&email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(user) => Ok(user),
            // Lost the race to a concurrent registration with the same email.
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some("users_email_key") =>
            {
                Err(Error::BadRequest(EMAIL_TAKEN.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User> {
        let email = email.trim().to_lowercase();
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(&email)
            .fetch_optional(&self.pool)
            .await?;

        let Some(user) = user else {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        };
        if !verify_password(password, &user.password_hash)? {
            return Err(Error::Unauthorized("Invalid credentials".to_string()));
        }
        Ok(user)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateUserPayload) -> Result<User> {
        if payload.is_empty() {
            return Err(Error::BadRequest("No valid updates provided".to_string()));
        }

        let email = payload.email.map(|e| e.trim().to_lowercase());
        if let Some(email) = &email {
            let taken =
                sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE email = $1 AND id <> $2")
                    .bind(email)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            if taken.is_some() {
                return Err(Error::BadRequest(EMAIL_TAKEN.to_string()));
            }
        }

        let password_hash = match payload.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Participation rows and owned listings go with the user via cascade.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("User not found".to_string()));
        }
        Ok(())
    }

    pub async fn application_refs(&self, user_id: Uuid) -> Result<ApplicationRefs> {
        let vacancies = sqlx::query_scalar::<_, Uuid>(
            "SELECT vacancy_id FROM vacancy_applications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let scholarships = sqlx::query_scalar::<_, Uuid>(
            "SELECT scholarship_id FROM scholarship_applications WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let forums = sqlx::query_scalar::<_, Uuid>(
            "SELECT forum_id FROM forum_attendees WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ApplicationRefs {
            vacancies,
            scholarships,
            forums,
        })
    }
}
