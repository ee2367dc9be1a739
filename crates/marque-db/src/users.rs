//! User repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use marque_core::{
    new_v7, CreateUserRequest, Error, Result, User, UserRepository, UserSummary,
};

/// PostgreSQL implementation of UserRepository.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, req: CreateUserRequest) -> Result<User> {
        let email = req.email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(Error::InvalidInput("A valid email is required".to_string()));
        }
        let name = req
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let id = new_v7();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO users (id, email, name, created_at_utc) VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(&email)
        .bind(&name)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let msg = e.to_string();
            if msg.contains("duplicate key") || msg.contains("unique constraint") {
                Error::InvalidInput(format!("A user with email '{}' already exists", email))
            } else {
                Error::Database(e)
            }
        })?;

        debug!(
            subsystem = "db",
            component = "users",
            op = "insert",
            user_id = %id,
            "User created"
        );

        Ok(User {
            id,
            email,
            name,
            created_at: now,
        })
    }

    async fn fetch(&self, id: Uuid) -> Result<User> {
        let row = sqlx::query("SELECT id, email, name, created_at_utc FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.map(|r| User {
            id: r.get("id"),
            email: r.get("email"),
            name: r.get("name"),
            created_at: r.get("created_at_utc"),
        })
        .ok_or(Error::UserNotFound(id))
    }

    async fn list(&self) -> Result<Vec<UserSummary>> {
        let rows = sqlx::query(
            r#"
            SELECT
                u.id,
                u.email,
                u.name,
                u.created_at_utc,
                COUNT(l.id) as link_count
            FROM users u
            LEFT JOIN links l ON l.user_id = u.id
            GROUP BY u.id, u.email, u.name, u.created_at_utc
            ORDER BY u.email
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        let users = rows
            .into_iter()
            .map(|row| UserSummary {
                id: row.get("id"),
                email: row.get("email"),
                name: row.get("name"),
                created_at: row.get("created_at_utc"),
                link_count: row.get("link_count"),
            })
            .collect();

        Ok(users)
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(exists)
    }
}
