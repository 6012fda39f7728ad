use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PointResponse {
    pub points: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankingResponse {
    pub rankings: Vec<UserRanking>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user: Option<UserRanking>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRanking {
    pub rank: usize,
    pub name: String,
    pub points: i64,
}
