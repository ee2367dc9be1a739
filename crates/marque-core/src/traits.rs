//! Repository trait definitions.
//!
//! These traits are the seam between the HTTP layer and the PostgreSQL
//! implementations in `marque-db`, and the contract test doubles implement.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{
    CreateLinkRequest, CreateUserRequest, Link, ListLinksRequest, ListLinksResponse, UpdateLinkRequest,
    User, UserSummary,
};

// =============================================================================
// LINK REPOSITORY
// =============================================================================

/// Repository for saved links.
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Insert a new link.
    async fn insert(&self, req: CreateLinkRequest) -> Result<Link>;

    /// Fetch a link by ID.
    async fn fetch(&self, id: Uuid) -> Result<Link>;

    /// List links with filtering, sorting, and pagination.
    async fn list(&self, req: ListLinksRequest) -> Result<ListLinksResponse>;

    /// Update url, title, and/or tags of an existing link.
    async fn update(&self, req: UpdateLinkRequest) -> Result<Link>;

    /// Permanently delete a link.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Check if a link exists.
    async fn exists(&self, id: Uuid) -> Result<bool>;

    /// All distinct tags across saved links, sorted alphabetically.
    async fn distinct_tags(&self) -> Result<Vec<String>>;
}

// =============================================================================
// USER REPOSITORY
// =============================================================================

/// Repository for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user. Emails are unique (case-insensitive).
    async fn insert(&self, req: CreateUserRequest) -> Result<User>;

    /// Fetch a user by ID.
    async fn fetch(&self, id: Uuid) -> Result<User>;

    /// List all users with their link counts.
    async fn list(&self) -> Result<Vec<UserSummary>>;

    /// Check if a user exists.
    async fn exists(&self, id: Uuid) -> Result<bool>;
}
