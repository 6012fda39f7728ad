//! Search Service Module
//!
//! The faceted search core over the question bank (and, optionally, user
//! accounts).
//!
//! ## Overview
//! A validated request flows through four stages: filter normalization
//! (name/id references resolved to canonical ids), predicate composition
//! (optional conjunctive filters plus the mandatory visibility rule), the
//! paginated query itself, and facet aggregation over the unfiltered
//! dataset. Multi-kind requests are merged and ranked in memory with a
//! small heuristic score.
//!
//! ## Submodules
//! - **`engine`**: orchestration, scoring, merging, pagination, snippets.
//! - **`filters`**: request validation, sort tokens, filter normalization.
//! - **`facets`**: per-dimension reference counts.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: request/response DTOs.

pub mod engine;
pub mod facets;
pub mod filters;
pub mod handlers;
pub mod types;

#[cfg(test)]
mod tests;
