//! Search Module Tests
//!
//! Validates the full search contract: request validation, filter
//! normalization, visibility, pagination, ranking, and facet shapes.
//!
//! ## Test Scopes
//! - **Validation**: unknown tokens and out-of-range values rejected with
//!   stable codes before any store access.
//! - **Filtering**: visibility invariant, name/id normalization, the
//!   miss-means-empty rule.
//! - **Ranking**: exact score values for fixed inputs, merge order,
//!   tie-breaks.
//! - **Facets**: reference counts independent of the active filter.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};

    use crate::search::engine::{make_snippet, score_question, score_user, SearchEngine};
    use crate::search::filters::SortOrder;
    use crate::search::types::{HitBody, SearchRequest};
    use crate::store::catalog::{CategoryStore, CompanyStore};
    use crate::store::entities::{Question, User, UserRole};
    use crate::store::questions::QuestionStore;
    use crate::store::users::UserStore;

    struct Fixture {
        questions: Arc<QuestionStore>,
        users: Arc<UserStore>,
        companies: Arc<CompanyStore>,
        categories: Arc<CategoryStore>,
        engine: SearchEngine,
    }

    fn fixture() -> Fixture {
        let questions = Arc::new(QuestionStore::new());
        let users = Arc::new(UserStore::new());
        let companies = Arc::new(CompanyStore::new());
        let categories = Arc::new(CategoryStore::new());
        let engine = SearchEngine::new(
            questions.clone(),
            users.clone(),
            companies.clone(),
            categories.clone(),
        );
        Fixture {
            questions,
            users,
            companies,
            categories,
            engine,
        }
    }

    fn base_time() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0).unwrap()
    }

    fn put_question(
        fx: &Fixture,
        question: &str,
        difficulty: i32,
        year: Option<i32>,
        company_id: Option<i64>,
        is_public: bool,
        created_by: i64,
        age_days: i64,
    ) -> Question {
        fx.questions.create(|id| Question {
            id,
            title: "TECHNICAL".to_string(),
            question: question.to_string(),
            content: None,
            tags: vec![],
            answer: None,
            year,
            company_id,
            category_id: None,
            difficulty,
            is_public,
            created_by,
            created_at: base_time() - Duration::days(age_days),
            updated_by: None,
            updated_at: None,
        })
    }

    fn put_user(fx: &Fixture, username: &str, role: UserRole) -> User {
        fx.users.create(|id| User {
            user_id: id,
            username: username.to_string(),
            display_name: username.to_string(),
            email: format!("{}@example.com", username),
            role,
            points: 0,
            oauth_provider: "google".to_string(),
            oauth_id: format!("oauth-{}", username),
            profile_image_url: None,
            created_at: base_time(),
            updated_at: base_time(),
        })
    }

    fn question_only(req: SearchRequest) -> SearchRequest {
        SearchRequest {
            types: vec!["question".to_string()],
            ..req
        }
    }

    // ============================================================
    // VALIDATION TESTS
    // ============================================================

    #[test]
    fn test_invalid_sort_rejected() {
        let fx = fixture();
        let req = SearchRequest {
            sort: "weird".to_string(),
            ..Default::default()
        };
        let err = fx.engine.search(&req, 1).unwrap_err();
        assert_eq!(err.code(), "INVALID_SORT");
    }

    #[test]
    fn test_invalid_type_rejected() {
        let fx = fixture();
        let req = SearchRequest {
            types: vec!["question".to_string(), "widget".to_string()],
            ..Default::default()
        };
        let err = fx.engine.search(&req, 1).unwrap_err();
        assert_eq!(err.code(), "INVALID_TYPE");
    }

    #[test]
    fn test_invalid_difficulty_rejected() {
        let fx = fixture();
        let req = SearchRequest {
            difficulty: Some("IMPOSSIBLE".to_string()),
            ..Default::default()
        };
        let err = fx.engine.search(&req, 1).unwrap_err();
        assert_eq!(err.code(), "INVALID_DIFFICULTY");
    }

    #[test]
    fn test_lowercase_difficulty_rejected() {
        // the dictionary is exact: labels do not fold case
        let fx = fixture();
        let req = SearchRequest {
            difficulty: Some("easy".to_string()),
            ..Default::default()
        };
        let err = fx.engine.search(&req, 1).unwrap_err();
        assert_eq!(err.code(), "INVALID_DIFFICULTY");
    }

    #[test]
    fn test_page_size_year_bounds() {
        let fx = fixture();

        let err = fx
            .engine
            .search(
                &SearchRequest {
                    page: 0,
                    ..Default::default()
                },
                1,
            )
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_PAGE");

        let err = fx
            .engine
            .search(
                &SearchRequest {
                    size: 101,
                    ..Default::default()
                },
                1,
            )
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_SIZE");

        let err = fx
            .engine
            .search(
                &SearchRequest {
                    year: Some(1999),
                    ..Default::default()
                },
                1,
            )
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_YEAR");
    }

    #[test]
    fn test_overlong_query_rejected() {
        let fx = fixture();
        let req = SearchRequest {
            q: "x".repeat(201),
            ..Default::default()
        };
        let err = fx.engine.search(&req, 1).unwrap_err();
        assert_eq!(err.code(), "INVALID_QUERY");
    }

    // ============================================================
    // VISIBILITY TESTS
    // ============================================================

    #[test]
    fn test_visibility_scenario_year_filter() {
        // Q1 public/EASY/2024/Acme, Q2 private owned-by-7/HARD/2023,
        // Q3 public/MEDIUM/2024/Acme. Requester 7 with year=2024 sees
        // exactly {Q1, Q3}: the year filter legitimately excludes Q2.
        let fx = fixture();
        let acme = fx.companies.create("Acme");
        let q1 = put_question(&fx, "q1", 1, Some(2024), Some(acme.id), true, 1, 3);
        let q2 = put_question(&fx, "q2", 3, Some(2023), None, false, 7, 2);
        let q3 = put_question(&fx, "q3", 2, Some(2024), Some(acme.id), true, 1, 1);

        let req = question_only(SearchRequest {
            year: Some(2024),
            ..Default::default()
        });
        let response = fx.engine.search(&req, 7).unwrap();

        assert_eq!(response.total, 2);
        let ids: Vec<i64> = response.results.iter().map(|r| r.id()).collect();
        assert!(ids.contains(&q1.id));
        assert!(ids.contains(&q3.id));
        assert!(!ids.contains(&q2.id));
    }

    #[test]
    fn test_private_questions_visible_only_to_owner() {
        let fx = fixture();
        put_question(&fx, "public", 2, None, None, true, 1, 0);
        let own = put_question(&fx, "mine", 2, None, None, false, 7, 0);

        let req = question_only(SearchRequest::default());

        let for_owner = fx.engine.search(&req, 7).unwrap();
        assert_eq!(for_owner.total, 2);

        let for_other = fx.engine.search(&req, 8).unwrap();
        assert_eq!(for_other.total, 1);
        assert!(for_other.results.iter().all(|r| r.id() != own.id));
    }

    // ============================================================
    // NULL-FILTER AND NARROWING TESTS
    // ============================================================

    #[test]
    fn test_no_filters_returns_unfiltered_count() {
        let fx = fixture();
        for i in 0..5 {
            put_question(&fx, &format!("q{}", i), 2, None, None, true, 1, i);
        }
        let req = question_only(SearchRequest::default());
        let response = fx.engine.search(&req, 1).unwrap();
        assert_eq!(response.total, fx.questions.count());
    }

    #[test]
    fn test_adding_a_filter_never_increases_total() {
        let fx = fixture();
        for i in 0..4 {
            let year = if i % 2 == 0 { Some(2024) } else { Some(2023) };
            put_question(&fx, &format!("q{}", i), 2, year, None, true, 1, i);
        }
        let base = fx
            .engine
            .search(&question_only(SearchRequest::default()), 1)
            .unwrap();
        let narrowed = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    year: Some(2024),
                    ..Default::default()
                }),
                1,
            )
            .unwrap();
        assert!(narrowed.total <= base.total);
        assert_eq!(narrowed.total, 2);
    }

    // ============================================================
    // PAGINATION TESTS
    // ============================================================

    #[test]
    fn test_pages_concatenate_without_gaps_or_duplicates() {
        let fx = fixture();
        for i in 0..7 {
            put_question(&fx, &format!("q{}", i), 2, None, None, true, 1, i);
        }

        let full = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    size: 100,
                    sort: "new".to_string(),
                    ..Default::default()
                }),
                1,
            )
            .unwrap();

        let mut collected = Vec::new();
        for page in 1..=3 {
            let response = fx
                .engine
                .search(
                    &question_only(SearchRequest {
                        page,
                        size: 3,
                        sort: "new".to_string(),
                        ..Default::default()
                    }),
                    1,
                )
                .unwrap();
            assert_eq!(response.total, 7);
            collected.extend(response.results.iter().map(|r| r.id()));
        }

        let full_ids: Vec<i64> = full.results.iter().map(|r| r.id()).collect();
        assert_eq!(collected, full_ids);
    }

    #[test]
    fn test_page_overrun_returns_empty_not_error() {
        let fx = fixture();
        put_question(&fx, "only", 2, None, None, true, 1, 0);

        let response = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    page: 9,
                    size: 10,
                    ..Default::default()
                }),
                1,
            )
            .unwrap();
        assert_eq!(response.total, 1);
        assert!(response.results.is_empty());
    }

    #[test]
    fn test_overrun_on_ranked_path_is_also_empty() {
        let fx = fixture();
        put_question(&fx, "java basics", 2, None, None, true, 1, 0);

        let response = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    q: "java".to_string(),
                    page: 5,
                    size: 10,
                    ..Default::default()
                }),
                1,
            )
            .unwrap();
        assert_eq!(response.total, 1);
        assert!(response.results.is_empty());
    }

    // ============================================================
    // SORT TESTS
    // ============================================================

    #[test]
    fn test_new_sort_breaks_timestamp_ties_by_id_desc() {
        let fx = fixture();
        let a = put_question(&fx, "a", 2, None, None, true, 1, 4);
        let b = put_question(&fx, "b", 2, None, None, true, 1, 4);

        let response = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    sort: "new".to_string(),
                    ..Default::default()
                }),
                1,
            )
            .unwrap();
        let ids: Vec<i64> = response.results.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }

    #[test]
    fn test_old_sort_is_ascending() {
        let fx = fixture();
        let newest = put_question(&fx, "newest", 2, None, None, true, 1, 0);
        let oldest = put_question(&fx, "oldest", 2, None, None, true, 1, 9);

        let response = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    sort: "old".to_string(),
                    ..Default::default()
                }),
                1,
            )
            .unwrap();
        let ids: Vec<i64> = response.results.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![oldest.id, newest.id]);
    }

    #[test]
    fn test_pop_sort_falls_back_to_id_desc() {
        let fx = fixture();
        let first = put_question(&fx, "first", 2, None, None, true, 1, 9);
        let second = put_question(&fx, "second", 2, None, None, true, 1, 0);

        let response = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    sort: "pop".to_string(),
                    ..Default::default()
                }),
                1,
            )
            .unwrap();
        let ids: Vec<i64> = response.results.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[test]
    fn test_repeated_calls_return_identical_order() {
        let fx = fixture();
        for i in 0..6 {
            put_question(&fx, &format!("q{}", i), 2, None, None, true, 1, 2);
        }
        let req = question_only(SearchRequest {
            sort: "new".to_string(),
            ..Default::default()
        });
        let first: Vec<i64> = fx
            .engine
            .search(&req, 1)
            .unwrap()
            .results
            .iter()
            .map(|r| r.id())
            .collect();
        let second: Vec<i64> = fx
            .engine
            .search(&req, 1)
            .unwrap()
            .results
            .iter()
            .map(|r| r.id())
            .collect();
        assert_eq!(first, second);
    }

    // ============================================================
    // NORMALIZATION TESTS
    // ============================================================

    #[test]
    fn test_company_name_miss_returns_empty_with_facets() {
        let fx = fixture();
        put_question(&fx, "visible", 2, None, None, true, 1, 0);

        let response = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    company_name: Some("NoSuchCompany".to_string()),
                    ..Default::default()
                }),
                1,
            )
            .unwrap();
        assert_eq!(response.total, 0);
        assert!(response.results.is_empty());
        // facets still describe the whole dataset
        assert_eq!(response.facets.types.question, 1);
        assert_eq!(response.facets.difficulty.medium, 1);
    }

    #[test]
    fn test_company_id_wins_over_name() {
        let fx = fixture();
        let acme = fx.companies.create("Acme");
        let globex = fx.companies.create("Globex");
        let at_acme = put_question(&fx, "acme q", 2, None, Some(acme.id), true, 1, 0);
        put_question(&fx, "globex q", 2, None, Some(globex.id), true, 1, 1);

        // id points at Acme even though the name says Globex
        let response = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    company_id: Some(acme.id),
                    company_name: Some("Globex".to_string()),
                    ..Default::default()
                }),
                1,
            )
            .unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.results[0].id(), at_acme.id);
        assert_eq!(response.query.company_name.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_blank_company_name_means_no_filter() {
        let fx = fixture();
        put_question(&fx, "anything", 2, None, None, true, 1, 0);

        let response = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    company_name: Some("   ".to_string()),
                    ..Default::default()
                }),
                1,
            )
            .unwrap();
        assert_eq!(response.total, 1);
    }

    #[test]
    fn test_company_name_resolves_to_id_filter() {
        let fx = fixture();
        let acme = fx.companies.create("Acme");
        let hit = put_question(&fx, "acme question", 2, None, Some(acme.id), true, 1, 0);
        put_question(&fx, "no company", 2, None, None, true, 1, 1);

        let response = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    company_name: Some("Acme".to_string()),
                    ..Default::default()
                }),
                1,
            )
            .unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.results[0].id(), hit.id);
        assert_eq!(response.query.company_id, Some(acme.id));
    }

    #[test]
    fn test_difficulty_label_filters_by_ordinal() {
        let fx = fixture();
        put_question(&fx, "easy one", 1, None, None, true, 1, 0);
        let hard = put_question(&fx, "hard one", 3, None, None, true, 1, 1);

        let response = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    difficulty: Some("HARD".to_string()),
                    ..Default::default()
                }),
                1,
            )
            .unwrap();
        assert_eq!(response.total, 1);
        assert_eq!(response.results[0].id(), hard.id);
        match &response.results[0].body {
            HitBody::Question(q) => {
                assert_eq!(q.difficulty, 3);
                assert_eq!(q.difficulty_label.as_deref(), Some("HARD"));
            }
            HitBody::User(_) => panic!("expected a question hit"),
        }
    }

    // ============================================================
    // SCORING TESTS (exact values for fixed inputs)
    // ============================================================

    #[test]
    fn test_score_base_and_match_bonus() {
        let fx = fixture();
        let q = put_question(&fx, "What is a HashMap?", 2, None, None, true, 1, 100);
        let now = base_time();

        assert_eq!(score_question(&q, "", SortOrder::Relevance, now), 1.0);
        assert_eq!(score_question(&q, "hashmap", SortOrder::Relevance, now), 11.0);
        assert_eq!(score_question(&q, "btree", SortOrder::Relevance, now), 1.0);
    }

    #[test]
    fn test_recency_bonus_only_under_new_sort() {
        let fx = fixture();
        // created 10 days before `now`: bonus is (30 - 10) * 0.1 = 2.0
        let q = put_question(&fx, "recent question", 2, None, None, true, 1, 10);
        let now = base_time();

        assert_eq!(score_question(&q, "", SortOrder::Newest, now), 3.0);
        assert_eq!(score_question(&q, "", SortOrder::Relevance, now), 1.0);

        // 100 days old: bonus clamps to zero
        let old = put_question(&fx, "old question", 2, None, None, true, 1, 100);
        assert_eq!(score_question(&old, "", SortOrder::Newest, now), 1.0);
    }

    #[test]
    fn test_admin_boost_is_exactly_five() {
        let fx = fixture();
        let user = put_user(&fx, "plain", UserRole::User);
        let admin = put_user(&fx, "boss", UserRole::Admin);
        assert_eq!(score_user(&user), 1.0);
        assert_eq!(score_user(&admin), 6.0);
    }

    // ============================================================
    // MULTI-TYPE MERGE TESTS
    // ============================================================

    #[test]
    fn test_multi_type_returns_both_kinds() {
        let fx = fixture();
        put_question(&fx, "java generics", 2, None, None, true, 1, 0);
        put_user(&fx, "javadev", UserRole::User);

        let response = fx
            .engine
            .search(
                &SearchRequest {
                    q: "java".to_string(),
                    ..Default::default()
                },
                1,
            )
            .unwrap();
        assert_eq!(response.total, 2);
        let has_question = response
            .results
            .iter()
            .any(|r| matches!(r.body, HitBody::Question(_)));
        let has_user = response
            .results
            .iter()
            .any(|r| matches!(r.body, HitBody::User(_)));
        assert!(has_question && has_user);
    }

    #[test]
    fn test_relevance_merge_orders_by_score() {
        let fx = fixture();
        // matching question scores 11.0, admin user scores 6.0
        put_question(&fx, "java streams", 2, None, None, true, 1, 0);
        put_user(&fx, "javamaster", UserRole::Admin);

        let response = fx
            .engine
            .search(
                &SearchRequest {
                    q: "java".to_string(),
                    sort: "rel".to_string(),
                    ..Default::default()
                },
                1,
            )
            .unwrap();
        assert_eq!(response.results.len(), 2);
        assert!(matches!(response.results[0].body, HitBody::Question(_)));
        assert_eq!(response.results[0].score, 11.0);
        assert_eq!(response.results[1].score, 6.0);
    }

    #[test]
    fn test_non_relevance_merge_keeps_fixed_kind_order() {
        let fx = fixture();
        put_user(&fx, "somebody", UserRole::User);
        put_question(&fx, "anything", 2, None, None, true, 1, 0);

        let response = fx
            .engine
            .search(
                &SearchRequest {
                    sort: "new".to_string(),
                    ..Default::default()
                },
                1,
            )
            .unwrap();
        // questions come first regardless of the requested type order
        assert!(matches!(response.results[0].body, HitBody::Question(_)));
        assert!(matches!(response.results[1].body, HitBody::User(_)));
    }

    // ============================================================
    // FACET TESTS
    // ============================================================

    #[test]
    fn test_difficulty_facet_fixed_buckets() {
        let fx = fixture();
        put_question(&fx, "e", 1, None, None, true, 1, 0);
        put_question(&fx, "m1", 2, None, None, true, 1, 1);
        put_question(&fx, "m2", 2, None, None, true, 1, 2);
        put_question(&fx, "h", 3, None, None, true, 1, 3);

        let response = fx
            .engine
            .search(&question_only(SearchRequest::default()), 1)
            .unwrap();
        assert_eq!(response.facets.difficulty.easy, 1);
        assert_eq!(response.facets.difficulty.medium, 2);
        assert_eq!(response.facets.difficulty.hard, 1);
    }

    #[test]
    fn test_facets_unchanged_by_active_filter() {
        let fx = fixture();
        put_question(&fx, "e", 1, None, None, true, 1, 0);
        put_question(&fx, "m1", 2, None, None, true, 1, 1);
        put_question(&fx, "m2", 2, None, None, true, 1, 2);
        put_question(&fx, "h", 3, None, None, true, 1, 3);

        let filtered = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    difficulty: Some("EASY".to_string()),
                    ..Default::default()
                }),
                1,
            )
            .unwrap();
        assert_eq!(filtered.total, 1);
        // facet counts still describe the full dataset
        assert_eq!(filtered.facets.difficulty.easy, 1);
        assert_eq!(filtered.facets.difficulty.medium, 2);
        assert_eq!(filtered.facets.difficulty.hard, 1);
    }

    #[test]
    fn test_year_and_company_facets() {
        let fx = fixture();
        let acme = fx.companies.create("Acme");
        put_question(&fx, "a", 2, Some(2024), Some(acme.id), true, 1, 0);
        put_question(&fx, "b", 2, Some(2024), Some(acme.id), true, 1, 1);
        put_question(&fx, "c", 2, Some(2023), None, true, 1, 2);

        let response = fx
            .engine
            .search(&question_only(SearchRequest::default()), 1)
            .unwrap();

        let years: Vec<(i32, u64)> = response
            .facets
            .year
            .iter()
            .map(|b| (b.value, b.count))
            .collect();
        assert_eq!(years, vec![(2024, 2), (2023, 1)]);

        assert_eq!(response.facets.company.len(), 1);
        assert_eq!(response.facets.company[0].id, acme.id);
        assert_eq!(response.facets.company[0].name, "Acme");
        assert_eq!(response.facets.company[0].count, 2);
    }

    #[test]
    fn test_category_facet_includes_zero_counts() {
        let fx = fixture();
        let used = fx.categories.create("Backend");
        let unused = fx.categories.create("Frontend");
        let q = put_question(&fx, "a", 2, None, None, true, 1, 0);
        fx.questions.update(q.id, |row| row.category_id = Some(used.id));

        let response = fx
            .engine
            .search(&question_only(SearchRequest::default()), 1)
            .unwrap();
        let buckets: Vec<(i64, u64)> = response
            .facets
            .category
            .iter()
            .map(|b| (b.id, b.count))
            .collect();
        assert!(buckets.contains(&(used.id, 1)));
        assert!(buckets.contains(&(unused.id, 0)));
    }

    #[test]
    fn test_type_facet_counts_totals() {
        let fx = fixture();
        put_question(&fx, "a", 2, None, None, true, 1, 0);
        put_question(&fx, "b", 2, None, None, false, 9, 1);
        put_user(&fx, "someone", UserRole::User);

        let response = fx
            .engine
            .search(&question_only(SearchRequest::default()), 1)
            .unwrap();
        // totals are corpus-wide, not post-filter
        assert_eq!(response.facets.types.question, 2);
        assert_eq!(response.facets.types.user, 1);
    }

    // ============================================================
    // SNIPPET TESTS
    // ============================================================

    #[test]
    fn test_snippet_highlight_wraps_matches() {
        let out = make_snippet("Explain the Java memory model", "java", true);
        assert!(out.contains("<em>Java</em>"));
    }

    #[test]
    fn test_snippet_without_highlight_has_no_tags() {
        let out = make_snippet("Explain the Java memory model", "java", false);
        assert!(!out.contains("<em>"));
        assert!(out.contains("Java"));
    }

    #[test]
    fn test_snippet_windows_long_text_around_match() {
        let padding = "x".repeat(500);
        let source = format!("{} needle {}", padding, padding);
        let out = make_snippet(&source, "needle", true);
        assert!(out.contains("<em>needle</em>"));
        assert!(out.len() < source.len());
    }

    #[test]
    fn test_highlight_flag_controls_em_tags_in_results() {
        let fx = fixture();
        put_question(&fx, "Java question", 2, None, None, true, 1, 0);

        let with = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    q: "java".to_string(),
                    highlight: true,
                    ..Default::default()
                }),
                1,
            )
            .unwrap();
        assert!(with.results[0]
            .snippet
            .as_deref()
            .unwrap()
            .contains("<em>"));

        let without = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    q: "java".to_string(),
                    highlight: false,
                    ..Default::default()
                }),
                1,
            )
            .unwrap();
        assert!(!without.results[0]
            .snippet
            .as_deref()
            .unwrap()
            .contains("<em>"));
    }

    // ============================================================
    // RESPONSE ENVELOPE TESTS
    // ============================================================

    #[test]
    fn test_envelope_echoes_request() {
        let fx = fixture();
        put_question(&fx, "q", 2, Some(2024), None, true, 1, 0);

        let response = fx
            .engine
            .search(
                &question_only(SearchRequest {
                    q: "q".to_string(),
                    page: 1,
                    size: 5,
                    year: Some(2024),
                    ..Default::default()
                }),
                1,
            )
            .unwrap();
        assert_eq!(response.query.q, "q");
        assert_eq!(response.query.year, Some(2024));
        assert_eq!(response.page, 1);
        assert_eq!(response.size, 5);
    }

    #[test]
    fn test_hit_serializes_with_type_tag() {
        let fx = fixture();
        put_question(&fx, "tagged", 2, None, None, true, 1, 0);

        let response = fx
            .engine
            .search(&question_only(SearchRequest::default()), 1)
            .unwrap();
        let json = serde_json::to_value(&response.results[0]).unwrap();
        assert_eq!(json["type"], "question");
        assert_eq!(json["question"], "tagged");
        assert!(json["score"].is_number());
    }
}
