//! Authentication Module Tests
//!
//! Covers JWT issue/verify round-trips, bearer-header extraction, and the
//! access/refresh separation.

#[cfg(test)]
mod tests {
    use axum::http::{header, HeaderMap, HeaderValue};
    use chrono::Utc;

    use crate::auth::jwt::{bearer_token, require_user, JwtService, TokenKind};
    use crate::store::entities::{User, UserRole};

    fn test_user(role: UserRole) -> User {
        let now = Utc::now();
        User {
            user_id: 42,
            username: "tester".to_string(),
            display_name: "Tester".to_string(),
            email: "tester@example.com".to_string(),
            role,
            points: 0,
            oauth_provider: "google".to_string(),
            oauth_id: "oauth-42".to_string(),
            profile_image_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn service() -> JwtService {
        JwtService::new("unit-test-secret", 3600, 86400)
    }

    // ============================================================
    // TOKEN ROUND-TRIP TESTS
    // ============================================================

    #[test]
    fn test_access_token_round_trip() {
        let jwt = service();
        let token = jwt.issue_access(&test_user(UserRole::User)).unwrap();
        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "tester@example.com");
        assert_eq!(claims.token_kind, TokenKind::Access);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_not_accepted_as_access() {
        let jwt = service();
        let refresh = jwt.issue_refresh(&test_user(UserRole::User)).unwrap();
        assert!(jwt.extract_user_id(&refresh).is_err());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let jwt = service();
        let mut token = jwt.issue_access(&test_user(UserRole::User)).unwrap();
        token.push('x');
        assert!(jwt.verify(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue_access(&test_user(UserRole::User)).unwrap();
        let other = JwtService::new("different-secret", 3600, 86400);
        assert!(other.verify(&token).is_err());
    }

    #[test]
    fn test_role_survives_round_trip() {
        let jwt = service();
        let token = jwt.issue_access(&test_user(UserRole::Admin)).unwrap();
        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.role, UserRole::Admin);
    }

    // ============================================================
    // BEARER HEADER TESTS
    // ============================================================

    #[test]
    fn test_bearer_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_err());
    }

    #[test]
    fn test_non_bearer_scheme_is_unauthorized() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwdw=="),
        );
        assert!(bearer_token(&headers).is_err());
    }

    #[test]
    fn test_require_user_end_to_end() {
        let jwt = service();
        let token = jwt.issue_access(&test_user(UserRole::User)).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
        );
        assert_eq!(require_user(&headers, &jwt).unwrap(), 42);
    }
}
