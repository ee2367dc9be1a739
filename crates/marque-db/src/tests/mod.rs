//! Repository integration tests.
//!
//! These tests require a live PostgreSQL instance (see
//! `test_fixtures::DEFAULT_TEST_DATABASE_URL`) and run only with
//! `cargo test --features integration`.

mod users_repository_tests;
