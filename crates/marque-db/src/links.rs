//! Link repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgRow, Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use marque_core::{
    new_v7, validate_tag_name, validate_url, CreateLinkRequest, Error, Link, LinkRepository,
    ListLinksRequest, ListLinksResponse, PageMeta, Result, SortKey, SortOrder, UpdateLinkRequest,
};

use crate::escape_like;

const LINK_COLUMNS: &str = "id, url, title, tags, user_id, created_at_utc, updated_at_utc";

/// Normalize a tag list: trim whitespace, drop empties, validate, dedupe
/// while preserving first-seen order.
pub fn normalize_tags(tags: Vec<String>) -> Result<Vec<String>> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        validate_tag_name(trimmed).map_err(Error::InvalidInput)?;
        if !out.iter().any(|t| t == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    Ok(out)
}

/// Normalize an optional title: trim, empty string becomes None.
fn normalize_title(title: Option<String>) -> Option<String> {
    title.and_then(|t| {
        let trimmed = t.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// ORDER BY clause for a whitelisted sort key and direction.
///
/// Title sorts case-insensitively with untitled links last; every key gets a
/// deterministic creation-time tiebreak.
fn order_clause(key: SortKey, order: SortOrder) -> String {
    let dir = order.as_sql();
    match key {
        SortKey::CreatedAt => format!("ORDER BY created_at_utc {}, id {}", dir, dir),
        SortKey::Title => format!(
            "ORDER BY LOWER(title) {} NULLS LAST, created_at_utc DESC",
            dir
        ),
        SortKey::Url => format!("ORDER BY url {}, created_at_utc DESC", dir),
    }
}

fn row_to_link(row: &PgRow) -> Link {
    Link {
        id: row.get("id"),
        url: row.get("url"),
        title: row.get("title"),
        tags: row.get("tags"),
        user_id: row.get("user_id"),
        created_at: row.get("created_at_utc"),
        updated_at: row.get("updated_at_utc"),
    }
}

/// PostgreSQL implementation of LinkRepository.
#[derive(Clone)]
pub struct PgLinkRepository {
    pool: Pool<Postgres>,
}

impl PgLinkRepository {
    /// Create a new PgLinkRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    async fn user_exists(&self, user_id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(exists)
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn insert(&self, req: CreateLinkRequest) -> Result<Link> {
        validate_url(&req.url).map_err(Error::InvalidInput)?;
        let tags = normalize_tags(req.tags)?;
        let title = normalize_title(req.title);

        if !self.user_exists(req.user_id).await? {
            return Err(Error::UserNotFound(req.user_id));
        }

        let id = new_v7();
        let now = Utc::now();
        let url = req.url.trim().to_string();

        sqlx::query(
            "INSERT INTO links (id, url, title, tags, user_id, created_at_utc, updated_at_utc)
             VALUES ($1, $2, $3, $4, $5, $6, $6)",
        )
        .bind(id)
        .bind(&url)
        .bind(&title)
        .bind(&tags)
        .bind(req.user_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "links",
            op = "insert",
            link_id = %id,
            user_id = %req.user_id,
            "Link saved"
        );

        Ok(Link {
            id,
            url,
            title,
            tags,
            user_id: req.user_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn fetch(&self, id: Uuid) -> Result<Link> {
        let row = sqlx::query(&format!("SELECT {} FROM links WHERE id = $1", LINK_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.map(|r| row_to_link(&r)).ok_or(Error::LinkNotFound(id))
    }

    async fn list(&self, req: ListLinksRequest) -> Result<ListLinksResponse> {
        let page = req.page();
        let limit = req.limit();

        // Build WHERE conditions; binds happen below in the same fixed order.
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx = 1;

        if req.user_id.is_some() {
            conditions.push(format!("user_id = ${}", param_idx));
            param_idx += 1;
        }
        if req.tag.is_some() {
            conditions.push(format!("${} = ANY(tags)", param_idx));
            param_idx += 1;
        }
        let search_pattern = req
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));
        if search_pattern.is_some() {
            conditions.push(format!(
                "(url ILIKE ${idx} ESCAPE '\\' OR title ILIKE ${idx} ESCAPE '\\')",
                idx = param_idx
            ));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let mut tx = self.pool.begin().await.map_err(Error::Database)?;

        let count_sql = format!("SELECT COUNT(*) FROM links{}", where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(user_id) = req.user_id {
            count_query = count_query.bind(user_id);
        }
        if let Some(ref tag) = req.tag {
            count_query = count_query.bind(tag);
        }
        if let Some(ref pattern) = search_pattern {
            count_query = count_query.bind(pattern);
        }
        let total_count = count_query
            .fetch_one(&mut *tx)
            .await
            .map_err(Error::Database)? as u64;

        let select_sql = format!(
            "SELECT {} FROM links{} {} LIMIT ${} OFFSET ${}",
            LINK_COLUMNS,
            where_clause,
            order_clause(req.order_by, req.order),
            param_idx,
            param_idx + 1
        );
        let mut select_query = sqlx::query(&select_sql);
        if let Some(user_id) = req.user_id {
            select_query = select_query.bind(user_id);
        }
        if let Some(ref tag) = req.tag {
            select_query = select_query.bind(tag);
        }
        if let Some(ref pattern) = search_pattern {
            select_query = select_query.bind(pattern);
        }
        let rows = select_query
            .bind(i64::from(limit))
            .bind(req.offset() as i64)
            .fetch_all(&mut *tx)
            .await
            .map_err(Error::Database)?;

        tx.commit().await.map_err(Error::Database)?;

        let data: Vec<Link> = rows.iter().map(row_to_link).collect();

        debug!(
            subsystem = "db",
            component = "links",
            op = "list",
            result_count = data.len(),
            total_count,
            page,
            "Listed links"
        );

        Ok(ListLinksResponse {
            data,
            pagination: PageMeta::new(page, limit, total_count),
        })
    }

    async fn update(&self, req: UpdateLinkRequest) -> Result<Link> {
        if !self.exists(req.id).await? {
            return Err(Error::LinkNotFound(req.id));
        }

        if let Some(ref url) = req.url {
            validate_url(url).map_err(Error::InvalidInput)?;
        }
        let tags = req.tags.map(normalize_tags).transpose()?;
        // Some("") clears the title; None leaves it untouched.
        let title = req.title.as_ref().map(|t| {
            let trimmed = t.trim();
            if trimmed.is_empty() {
                None::<String>
            } else {
                Some(trimmed.to_string())
            }
        });

        let mut updates: Vec<String> = vec!["updated_at_utc = $1".to_string()];
        let now = Utc::now();
        // $1 = now, $2 = id, then dynamic params start at $3
        let mut param_idx = 3;

        if req.url.is_some() {
            updates.push(format!("url = ${}", param_idx));
            param_idx += 1;
        }
        if title.is_some() {
            updates.push(format!("title = ${}", param_idx));
            param_idx += 1;
        }
        if tags.is_some() {
            updates.push(format!("tags = ${}", param_idx));
        }

        let query = format!("UPDATE links SET {} WHERE id = $2", updates.join(", "));

        let mut q = sqlx::query(&query).bind(now).bind(req.id);
        if let Some(url) = req.url {
            q = q.bind(url.trim().to_string());
        }
        if let Some(title) = title {
            q = q.bind(title);
        }
        if let Some(tags) = tags {
            q = q.bind(tags);
        }

        q.execute(&self.pool).await.map_err(Error::Database)?;

        debug!(
            subsystem = "db",
            component = "links",
            op = "update",
            link_id = %req.id,
            "Link updated"
        );

        self.fetch(req.id).await
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::LinkNotFound(id));
        }

        debug!(
            subsystem = "db",
            component = "links",
            op = "delete",
            link_id = %id,
            "Link deleted"
        );
        Ok(())
    }

    async fn exists(&self, id: Uuid) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM links WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(exists)
    }

    async fn distinct_tags(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT DISTINCT unnest(tags) AS tag FROM links ORDER BY tag")
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows.into_iter().map(|row| row.get("tag")).collect())
    }
}
