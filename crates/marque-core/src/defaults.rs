//! Centralized default constants for marque.
//!
//! **This module is the single source of truth** for all shared default
//! values. All crates should reference these constants instead of defining
//! their own magic numbers.

// =============================================================================
// PAGINATION
// =============================================================================

/// Default page number (pages are 1-based).
pub const PAGE: u32 = 1;

/// Default page size for the links listing.
pub const PAGE_LIMIT: u32 = 20;

/// Maximum page size a client may request.
pub const PAGE_LIMIT_MAX: u32 = 100;

// =============================================================================
// TITLE FETCHING
// =============================================================================

/// Total timeout for outbound title-fetch requests (seconds).
pub const FETCH_TIMEOUT_SECS: u64 = 5;

/// User agent sent when scraping page titles.
pub const FETCH_USER_AGENT: &str = "Mozilla/5.0 (compatible; Marque/1.0)";

// =============================================================================
// TAGS
// =============================================================================

/// Maximum length of a single tag name.
pub const MAX_TAG_LEN: usize = 100;

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host for the API server.
pub const BIND_HOST: &str = "127.0.0.1";

/// Default bind port for the API server.
pub const BIND_PORT: u16 = 8080;

/// Maximum accepted request body size (bytes). Requests are small JSON
/// documents; 1 MiB leaves generous headroom.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

// =============================================================================
// SEED DATA
// =============================================================================

/// Seeded link creation dates are staggered over this many days.
pub const SEED_DATE_SPREAD_DAYS: i64 = 30;
