//! HTTP request handlers.

pub mod fetch_title;
pub mod links;
pub mod users;
