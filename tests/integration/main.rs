//! Integration tests: router and HTTP client over an in-memory document
//! store, plus ignored tests against a live Postgres

mod api_tests;
mod common;
mod postgres_tests;
