//! Demo seed data.
//!
//! Wipes existing links and users, then creates a handful of users each
//! owning a spread of tagged links. Creation dates are staggered over the
//! past 30 days so sorting and pagination are meaningful out of the box.

use chrono::{Duration, Utc};
use rand::Rng;
use sqlx::{Pool, Postgres};
use tracing::info;

use marque_core::{defaults::SEED_DATE_SPREAD_DAYS, new_v7, Error, Result};

struct SeedUser {
    email: &'static str,
    name: &'static str,
    links: &'static [SeedLink],
}

struct SeedLink {
    url: &'static str,
    title: &'static str,
    tags: &'static [&'static str],
}

const SEED_USERS: &[SeedUser] = &[
    SeedUser {
        email: "alice@example.com",
        name: "Alice Johnson",
        links: &[
            SeedLink { url: "https://prisma.io", title: "Prisma - Next-generation ORM", tags: &["orm", "typescript", "database"] },
            SeedLink { url: "https://nextjs.org", title: "Next.js - React Framework", tags: &["react", "framework", "typescript"] },
            SeedLink { url: "https://react.dev", title: "React - JavaScript Library", tags: &["react", "javascript", "frontend"] },
            SeedLink { url: "https://tailwindcss.com", title: "Tailwind CSS - Utility-first CSS", tags: &["css", "frontend", "design"] },
            SeedLink { url: "https://typescriptlang.org", title: "TypeScript - JavaScript with syntax", tags: &["typescript", "javascript", "programming"] },
        ],
    },
    SeedUser {
        email: "bob@example.com",
        name: "Bob Smith",
        links: &[
            SeedLink { url: "https://postgresql.org", title: "PostgreSQL - Advanced Database", tags: &["database", "sql", "backend"] },
            SeedLink { url: "https://remix.run", title: "Remix - Full Stack Web Framework", tags: &["react", "framework", "fullstack"] },
            SeedLink { url: "https://docker.com", title: "Docker - Container Platform", tags: &["devops", "containers", "deployment"] },
            SeedLink { url: "https://kubernetes.io", title: "Kubernetes - Container Orchestration", tags: &["devops", "containers", "orchestration"] },
            SeedLink { url: "https://jestjs.io", title: "Jest - JavaScript Testing Framework", tags: &["testing", "javascript", "tdd"] },
        ],
    },
    SeedUser {
        email: "carol@example.com",
        name: "Carol Davis",
        links: &[
            SeedLink { url: "https://graphql.org", title: "GraphQL - Query Language", tags: &["api", "graphql", "backend"] },
            SeedLink { url: "https://apollo.dev", title: "Apollo GraphQL Platform", tags: &["graphql", "api", "tools"] },
            SeedLink { url: "https://redis.io", title: "Redis - In-Memory Data Store", tags: &["database", "cache", "performance"] },
            SeedLink { url: "https://elastic.co", title: "Elasticsearch - Search Engine", tags: &["search", "database", "analytics"] },
            SeedLink { url: "https://mongodb.com", title: "MongoDB - NoSQL Database", tags: &["database", "nosql", "document"] },
        ],
    },
    SeedUser {
        email: "dave@example.com",
        name: "Dave Wilson",
        links: &[
            SeedLink { url: "https://aws.amazon.com", title: "AWS - Cloud Computing Platform", tags: &["cloud", "aws", "infrastructure"] },
            SeedLink { url: "https://vercel.com", title: "Vercel - Frontend Deployment", tags: &["deployment", "frontend", "serverless"] },
            SeedLink { url: "https://netlify.com", title: "Netlify - Web Development Platform", tags: &["deployment", "frontend", "cms"] },
            SeedLink { url: "https://github.com", title: "GitHub - Code Hosting Platform", tags: &["git", "version-control", "collaboration"] },
            SeedLink { url: "https://gitlab.com", title: "GitLab - DevOps Platform", tags: &["git", "devops", "ci-cd"] },
        ],
    },
    SeedUser {
        email: "eve@example.com",
        name: "Eve Brown",
        links: &[
            SeedLink { url: "https://storybook.js.org", title: "Storybook - UI Component Library", tags: &["ui", "components", "development"] },
            SeedLink { url: "https://figma.com", title: "Figma - Design Tool", tags: &["design", "ui", "collaboration"] },
            SeedLink { url: "https://framer.com", title: "Framer - Interactive Design Tool", tags: &["design", "prototyping", "ui"] },
            SeedLink { url: "https://sass-lang.com", title: "Sass - CSS Preprocessor", tags: &["css", "preprocessor", "styling"] },
            SeedLink { url: "https://styled-components.com", title: "Styled Components - CSS-in-JS", tags: &["css", "react", "styling"] },
        ],
    },
];

/// Replace all users and links with the demo fixture set.
pub async fn seed_demo_data(pool: &Pool<Postgres>) -> Result<()> {
    let mut tx = pool.begin().await.map_err(Error::Database)?;

    sqlx::query("DELETE FROM links")
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;
    sqlx::query("DELETE FROM users")
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

    let now = Utc::now();
    let mut rng = rand::thread_rng();
    let mut link_count = 0;

    for seed_user in SEED_USERS {
        let user_id = new_v7();
        sqlx::query(
            "INSERT INTO users (id, email, name, created_at_utc) VALUES ($1, $2, $3, $4)",
        )
        .bind(user_id)
        .bind(seed_user.email)
        .bind(seed_user.name)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(Error::Database)?;

        for link in seed_user.links {
            let days_ago = rng.gen_range(0..SEED_DATE_SPREAD_DAYS);
            let created_at = now - Duration::days(days_ago);
            let tags: Vec<String> = link.tags.iter().map(|t| t.to_string()).collect();

            sqlx::query(
                "INSERT INTO links (id, url, title, tags, user_id, created_at_utc, updated_at_utc)
                 VALUES ($1, $2, $3, $4, $5, $6, $6)",
            )
            .bind(new_v7())
            .bind(link.url)
            .bind(link.title)
            .bind(&tags)
            .bind(user_id)
            .bind(created_at)
            .execute(&mut *tx)
            .await
            .map_err(Error::Database)?;
            link_count += 1;
        }
    }

    tx.commit().await.map_err(Error::Database)?;

    info!(
        subsystem = "db",
        component = "seed",
        user_count = SEED_USERS.len(),
        link_count,
        "Seeded demo data"
    );
    Ok(())
}
