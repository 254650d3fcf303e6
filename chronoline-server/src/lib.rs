//! Chronoline API server
//!
//! A thin REST layer over a SQLite database of historical figures. Every
//! endpoint is a read-only parameterized query:
//!
//! - `GET /api/persons` - list records, filterable by category, country and
//!   life-span overlap with a year range
//! - `GET /api/persons/:id` - one record
//! - `GET /api/categories` - distinct category labels
//! - `GET /api/countries` - distinct country names (composite `a/b` values
//!   split into individual tokens)
//! - `GET /api/stats` - dataset overview and per-category/country counts
//! - `GET /health` - liveness probe
//!
//! Records are written only by the `seed` binary; the serving path never
//! mutates the database.

pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;

pub use config::Config;
pub use db::PersonDb;
pub use error::ApiError;
pub use state::{AppState, SharedState};
