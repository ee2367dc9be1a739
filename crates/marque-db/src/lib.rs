//! # marque-db
//!
//! PostgreSQL database layer for marque.
//!
//! This crate provides:
//! - Connection pool management
//! - Repository implementations for links and users
//! - Demo seed data
//!
//! ## Example
//!
//! ```rust,ignore
//! use marque_db::Database;
//! use marque_core::{CreateLinkRequest, LinkRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("postgres://localhost/marque").await?;
//!
//!     let link = db.links.insert(CreateLinkRequest {
//!         url: "https://www.rust-lang.org".to_string(),
//!         title: Some("Rust".to_string()),
//!         tags: vec!["rust".to_string()],
//!         user_id: some_user_id,
//!     }).await?;
//!
//!     println!("Saved link: {}", link.id);
//!     Ok(())
//! }
//! ```

pub mod links;
pub mod pool;
pub mod seed;
pub mod users;

#[cfg(all(test, feature = "integration"))]
mod tests;

// Test fixtures for integration tests
pub mod test_fixtures;

// Re-export core types
pub use marque_core::*;

// Re-export repository implementations
pub use links::PgLinkRepository;
pub use pool::{create_pool, create_pool_with_config, log_pool_metrics, PoolConfig};
pub use seed::seed_demo_data;
pub use users::PgUserRepository;

/// Escape LIKE/ILIKE wildcard characters (`%`, `_`, `\`) in user input.
pub fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::Pool<sqlx::Postgres>,
    /// Link repository for CRUD operations.
    pub links: PgLinkRepository,
    /// User repository.
    pub users: PgUserRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            links: PgLinkRepository::new(pool.clone()),
            users: PgUserRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}
