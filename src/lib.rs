//! Player profile extraction for pro-football-reference pages.
//!
//! [`extract::build_profile`] turns one player page into a
//! [`models::PlayerProfile`]; [`fetcher`] and [`pipeline`] acquire pages
//! and drive batches; [`export`] writes the results.

pub mod config;
pub mod export;
pub mod extract;
pub mod fetcher;
pub mod models;
pub mod pipeline;
pub mod utils;
