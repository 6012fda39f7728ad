use std::sync::Arc;

use crate::error::ApiError;
use crate::store::users::UserStore;

use super::types::{PointResponse, RankingResponse, UserRanking};

pub struct RankingService {
    users: Arc<UserStore>,
}

impl RankingService {
    pub fn new(users: Arc<UserStore>) -> Self {
        Self { users }
    }

    pub fn user_points(&self, user_id: i64) -> Result<PointResponse, ApiError> {
        let user = self
            .users
            .get(user_id)
            .ok_or_else(|| ApiError::rejected("USER_NOT_FOUND", "user not found"))?;

        tracing::info!(user_id, points = user.points, "points looked up");

        Ok(PointResponse {
            points: user.points,
        })
    }

    /// The full leaderboard, points descending with user-id tie-breaks,
    /// plus the requesting user's own row when the email resolves.
    pub fn leaderboard(&self, current_email: Option<&str>) -> RankingResponse {
        let ordered = self.users.all_by_points();

        let rankings: Vec<UserRanking> = ordered
            .iter()
            .enumerate()
            .map(|(i, user)| UserRanking {
                rank: i + 1,
                name: user.display_name.clone(),
                points: user.points,
            })
            .collect();

        let current_user = current_email.and_then(|email| {
            ordered
                .iter()
                .position(|u| u.email == email)
                .map(|i| UserRanking {
                    rank: i + 1,
                    name: ordered[i].display_name.clone(),
                    points: ordered[i].points,
                })
        });

        RankingResponse {
            rankings,
            current_user,
        }
    }
}
