//! Core data models for marque.
//!
//! Wire format is camelCase (`createdAt`, `userId`, `totalPages`) to stay
//! compatible with the original JSON API; Rust fields and SQL columns are
//! snake_case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::defaults;

// =============================================================================
// USER TYPES
// =============================================================================

/// A registered user who owns saved links.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// User listing entry with an aggregate link count.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub link_count: i64,
}

/// Request to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

// =============================================================================
// LINK TYPES
// =============================================================================

/// A saved URL with optional title and free-text tags.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: Uuid,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub tags: Vec<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to save a new link.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    /// Tags default to the empty list when omitted.
    #[serde(default)]
    pub tags: Vec<String>,
    pub user_id: Uuid,
}

/// Request to update an existing link. Absent fields are left unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLinkRequest {
    pub id: Uuid,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Validate a URL for saving or scraping.
///
/// Only absolute http/https URLs with a host are accepted.
pub fn validate_url(url: &str) -> std::result::Result<(), String> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err("URL is required".to_string());
    }
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or_else(|| "URL must start with http:// or https://".to_string())?;
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    if host.is_empty() {
        return Err("URL is missing a host".to_string());
    }
    Ok(())
}

// =============================================================================
// LISTING, SORTING, PAGINATION
// =============================================================================

/// Sortable columns for the links listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, utoipa::ToSchema)]
pub enum SortKey {
    #[default]
    #[serde(rename = "createdAt")]
    CreatedAt,
    #[serde(rename = "title")]
    Title,
    #[serde(rename = "url")]
    Url,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// SQL direction keyword.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Filter, sort, and pagination parameters for listing links.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListLinksRequest {
    /// Restrict to links owned by this user.
    #[serde(default)]
    pub user_id: Option<Uuid>,
    /// Restrict to links whose tag array contains this tag.
    #[serde(default)]
    pub tag: Option<String>,
    /// Case-insensitive substring match over url and title.
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub order_by: SortKey,
    #[serde(default)]
    pub order: SortOrder,
    /// 1-based page number.
    #[serde(default)]
    pub page: Option<u32>,
    /// Page size, clamped to `defaults::PAGE_LIMIT_MAX`.
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ListLinksRequest {
    /// Effective page number (1-based; zero and absent both mean page 1).
    pub fn page(&self) -> u32 {
        match self.page {
            Some(0) | None => defaults::PAGE,
            Some(p) => p,
        }
    }

    /// Effective page size, clamped to `1..=PAGE_LIMIT_MAX`.
    pub fn limit(&self) -> u32 {
        self.limit
            .unwrap_or(defaults::PAGE_LIMIT)
            .clamp(1, defaults::PAGE_LIMIT_MAX)
    }

    /// Row offset for the effective page and limit.
    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.limit())
    }
}

/// Pagination metadata for list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// 1-based page number (request parameter).
    pub page: u32,
    /// Maximum number of items per page (request parameter).
    pub limit: u32,
    /// Total number of items matching the query (across all pages).
    pub total_count: u64,
    /// Total number of pages (`ceil(total_count / limit)`; 0 when empty).
    pub total_pages: u64,
    /// True if more items are available after this page.
    pub has_next_page: bool,
    /// True if this is not the first page.
    pub has_prev_page: bool,
}

impl PageMeta {
    /// Compute pagination metadata for a page of results.
    pub fn new(page: u32, limit: u32, total_count: u64) -> Self {
        let limit_n = u64::from(limit.max(1));
        let total_pages = total_count.div_ceil(limit_n);
        Self {
            page,
            limit,
            total_count,
            total_pages,
            has_next_page: u64::from(page) < total_pages,
            has_prev_page: page > 1,
        }
    }
}

/// Paginated links listing.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ListLinksResponse {
    pub data: Vec<Link>,
    pub pagination: PageMeta,
}

// =============================================================================
// TITLE FETCH TYPES
// =============================================================================

/// Request body for the title-scraping endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FetchTitleRequest {
    pub url: String,
}

/// Scraped page title. `null` when the page has no usable title.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct FetchTitleResponse {
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_accepts_http_and_https() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("http://example.com/path?q=1").is_ok());
    }

    #[test]
    fn test_validate_url_rejects_empty() {
        assert!(validate_url("").is_err());
        assert!(validate_url("   ").is_err());
    }

    #[test]
    fn test_validate_url_rejects_other_schemes() {
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("javascript:alert(1)").is_err());
        assert!(validate_url("example.com").is_err());
    }

    #[test]
    fn test_validate_url_rejects_missing_host() {
        assert!(validate_url("https://").is_err());
        assert!(validate_url("http:///path").is_err());
    }

    #[test]
    fn test_page_meta_exact_division() {
        let meta = PageMeta::new(1, 10, 30);
        assert_eq!(meta.total_pages, 3);
        assert!(meta.has_next_page);
        assert!(!meta.has_prev_page);
    }

    #[test]
    fn test_page_meta_remainder_rounds_up() {
        let meta = PageMeta::new(2, 10, 31);
        assert_eq!(meta.total_pages, 4);
        assert!(meta.has_next_page);
        assert!(meta.has_prev_page);
    }

    #[test]
    fn test_page_meta_last_page() {
        let meta = PageMeta::new(3, 10, 30);
        assert_eq!(meta.total_pages, 3);
        assert!(!meta.has_next_page);
        assert!(meta.has_prev_page);
    }

    #[test]
    fn test_page_meta_empty_result_set() {
        let meta = PageMeta::new(1, 10, 0);
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next_page);
        assert!(!meta.has_prev_page);
    }

    #[test]
    fn test_page_meta_single_partial_page() {
        let meta = PageMeta::new(1, 20, 7);
        assert_eq!(meta.total_pages, 1);
        assert!(!meta.has_next_page);
    }

    #[test]
    fn test_page_meta_consistent_with_count_and_limit() {
        // totalPages * limit must cover totalCount, and one page fewer must not
        for (limit, total) in [(1u32, 0u64), (5, 12), (20, 20), (7, 100)] {
            let meta = PageMeta::new(1, limit, total);
            assert!(meta.total_pages * u64::from(limit) >= total);
            if meta.total_pages > 0 {
                assert!((meta.total_pages - 1) * u64::from(limit) < total);
            }
        }
    }

    #[test]
    fn test_list_request_defaults() {
        let req = ListLinksRequest::default();
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), crate::defaults::PAGE_LIMIT);
        assert_eq!(req.offset(), 0);
        assert_eq!(req.order_by, SortKey::CreatedAt);
        assert_eq!(req.order, SortOrder::Desc);
    }

    #[test]
    fn test_list_request_limit_clamped() {
        let req = ListLinksRequest {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(req.limit(), crate::defaults::PAGE_LIMIT_MAX);

        let req = ListLinksRequest {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(req.limit(), 1);
    }

    #[test]
    fn test_list_request_page_zero_treated_as_one() {
        let req = ListLinksRequest {
            page: Some(0),
            ..Default::default()
        };
        assert_eq!(req.page(), 1);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_list_request_offset() {
        let req = ListLinksRequest {
            page: Some(3),
            limit: Some(25),
            ..Default::default()
        };
        assert_eq!(req.offset(), 50);
    }

    #[test]
    fn test_sort_key_wire_names() {
        assert_eq!(
            serde_json::from_str::<SortKey>("\"createdAt\"").unwrap(),
            SortKey::CreatedAt
        );
        assert_eq!(
            serde_json::from_str::<SortKey>("\"title\"").unwrap(),
            SortKey::Title
        );
        assert_eq!(
            serde_json::from_str::<SortKey>("\"url\"").unwrap(),
            SortKey::Url
        );
        assert!(serde_json::from_str::<SortKey>("\"bogus\"").is_err());
    }

    #[test]
    fn test_sort_order_wire_names() {
        assert_eq!(
            serde_json::from_str::<SortOrder>("\"asc\"").unwrap(),
            SortOrder::Asc
        );
        assert_eq!(
            serde_json::from_str::<SortOrder>("\"desc\"").unwrap(),
            SortOrder::Desc
        );
    }

    #[test]
    fn test_link_serializes_camel_case() {
        let link = Link {
            id: Uuid::nil(),
            url: "https://example.com".to_string(),
            title: Some("Example".to_string()),
            tags: vec!["rust".to_string()],
            user_id: Uuid::nil(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&link).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("userId").is_some());
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_create_link_request_tags_default_empty() {
        let req: CreateLinkRequest = serde_json::from_str(
            r#"{"url": "https://example.com", "userId": "00000000-0000-0000-0000-000000000000"}"#,
        )
        .unwrap();
        assert!(req.tags.is_empty());
        assert!(req.title.is_none());
    }

    #[test]
    fn test_page_meta_serializes_camel_case() {
        let json = serde_json::to_value(PageMeta::new(1, 10, 25)).unwrap();
        assert_eq!(json["totalCount"], 25);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["hasNextPage"], true);
        assert_eq!(json["hasPrevPage"], false);
    }
}
