//! Entity Storage Module
//!
//! Implements the persistence layer behind every service: a set of
//! concurrent, id-keyed in-memory tables, one per entity.
//!
//! ## Core Concepts
//! - **Table**: a `DashMap`-backed map with auto-incrementing ids; all reads
//!   clone a snapshot so queries never hold locks across scoring or mapping.
//! - **Stores**: one typed wrapper per entity (`QuestionStore`, `UserStore`,
//!   `CompanyStore`, `CategoryStore`, `AnswerStore`) exposing exactly the
//!   query surface the services need — combined-predicate finds, per-value
//!   counts, distinct-value scans, and name lookups.
//! - **Queries**: the question store evaluates the whole conjunctive filter
//!   set in a single pass; facet counting issues one small count per
//!   distinct value.

pub mod answers;
pub mod catalog;
pub mod entities;
pub mod questions;
pub mod table;
pub mod users;
