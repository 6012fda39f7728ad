use std::sync::Arc;

use axum::routing::{get, patch, post};
use axum::{Extension, Router};

use prepdeck::auth::handlers::{handle_auth_callback, handle_auth_url};
use prepdeck::auth::jwt::JwtService;
use prepdeck::auth::oauth::GoogleOAuth;
use prepdeck::bank::csv::{CsvImporter, CsvLimits};
use prepdeck::bank::handlers::{
    handle_create_question, handle_csv_upload, handle_delete_question, handle_sample_csv,
    handle_update_question,
};
use prepdeck::bank::service::BankService;
use prepdeck::config::AppConfig;
use prepdeck::feedback::gemini::GeminiClient;
use prepdeck::feedback::handlers::handle_feedback;
use prepdeck::feedback::service::FeedbackService;
use prepdeck::practice::handlers::{handle_draw_questions, handle_submission};
use prepdeck::practice::service::PracticeService;
use prepdeck::ranking::handlers::{handle_points, handle_rankings};
use prepdeck::ranking::service::RankingService;
use prepdeck::search::engine::SearchEngine;
use prepdeck::search::handlers::handle_search;
use prepdeck::store::answers::AnswerStore;
use prepdeck::store::catalog::{CategoryStore, CompanyStore};
use prepdeck::store::questions::QuestionStore;
use prepdeck::store::users::UserStore;

const DEFAULT_CATEGORIES: [&str; 4] = ["Backend", "Frontend", "Database", "DevOps"];
const DEFAULT_COMPANIES: [&str; 3] = ["Acme", "Globex", "Initech"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!("starting server on {}", config.bind_addr);

    // 1. Stores:
    let questions = Arc::new(QuestionStore::new());
    let users = Arc::new(UserStore::new());
    let companies = Arc::new(CompanyStore::new());
    let categories = Arc::new(CategoryStore::new());
    let answers = Arc::new(AnswerStore::new());

    // bootstrap catalog data so filters and CSV imports resolve out of the box
    for name in DEFAULT_CATEGORIES {
        categories.create(name);
    }
    for name in DEFAULT_COMPANIES {
        companies.create(name);
    }
    tracing::info!(
        "seeded {} categories and {} companies",
        DEFAULT_CATEGORIES.len(),
        DEFAULT_COMPANIES.len()
    );

    // 2. Services:
    let jwt = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.access_token_ttl_secs,
        config.refresh_token_ttl_secs,
    ));
    let oauth = Arc::new(GoogleOAuth::new(&config));
    let gemini = Arc::new(GeminiClient::new(&config.gemini_api_key));

    let engine = Arc::new(SearchEngine::new(
        questions.clone(),
        users.clone(),
        companies.clone(),
        categories.clone(),
    ));
    let bank = Arc::new(BankService::new(
        questions.clone(),
        companies.clone(),
        categories.clone(),
        users.clone(),
    ));
    let importer = Arc::new(CsvImporter::new(
        questions.clone(),
        companies.clone(),
        categories.clone(),
        users.clone(),
        CsvLimits {
            max_bytes: config.csv_max_bytes,
            max_rows: config.csv_max_rows,
            upsert_key: config.csv_upsert_key.clone(),
        },
    ));
    let feedback = Arc::new(FeedbackService::new(gemini.clone()));
    let practice = Arc::new(PracticeService::new(
        questions.clone(),
        users.clone(),
        answers.clone(),
        gemini.clone(),
    ));
    let ranking = Arc::new(RankingService::new(users.clone()));

    // 3. HTTP Router:
    let app = Router::new()
        .route("/auth/google/url", get(handle_auth_url))
        .route("/auth/google/callback", get(handle_auth_callback))
        .route("/search", get(handle_search))
        .route("/question", post(handle_create_question))
        .route(
            "/question/:id",
            patch(handle_update_question).delete(handle_delete_question),
        )
        .route("/questions/csv", post(handle_csv_upload))
        .route("/questions/csv/sample", get(handle_sample_csv))
        .route("/problems", get(handle_draw_questions))
        .route("/problems/submission", post(handle_submission))
        .route("/feedback", post(handle_feedback))
        .route("/points", get(handle_points))
        .route("/rankings", get(handle_rankings))
        .layer(Extension(questions))
        .layer(Extension(users))
        .layer(Extension(companies))
        .layer(Extension(categories))
        .layer(Extension(answers))
        .layer(Extension(jwt))
        .layer(Extension(oauth))
        .layer(Extension(engine))
        .layer(Extension(bank))
        .layer(Extension(importer))
        .layer(Extension(feedback))
        .layer(Extension(practice))
        .layer(Extension(ranking));

    // 4. Serve:
    tracing::info!("listening on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
