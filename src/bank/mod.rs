//! Question Bank Module
//!
//! Admin-facing management of the question bank: create, update, and delete
//! single questions, plus CSV bulk import with per-row validation and
//! question-text upsert.

pub mod csv;
pub mod handlers;
pub mod service;
pub mod types;
