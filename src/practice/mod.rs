//! Practice Drill Module
//!
//! Random question drawing and answer submission. Each submitted answer is
//! graded by the question's interview type (technical rubric or personality
//! relevance), recorded, and converted into points; the user's rank is
//! recomputed from the updated leaderboard.

pub mod handlers;
pub mod service;
pub mod types;
