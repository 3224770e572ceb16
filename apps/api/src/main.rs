mod analysis;
mod config;
mod db;
mod documents;
mod errors;
mod evaluation;
mod interview;
mod llm_client;
mod models;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::DocumentAnalyzer;
use crate::config::Config;
use crate::db::create_pool;
use crate::documents::PgDocumentStore;
use crate::evaluation::{ResponseEvaluator, ResumeCondenser};
use crate::interview::{InterviewPipeline, InterviewRegistry, PgSessionStore, S3RecordingStore};
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast on missing or malformed env vars
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview Coach API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // Initialize LLM client
    let llm: Arc<dyn TextGenerator> = Arc::new(LlmClient::new(
        config.anthropic_api_key.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?);
    info!(
        "LLM client initialized (model: {}, timeout: {}s)",
        llm_client::MODEL,
        config.llm_timeout_secs
    );

    let pipeline = InterviewPipeline {
        documents: Arc::new(PgDocumentStore::new(db.clone())),
        sessions: Arc::new(PgSessionStore::new(db)),
        analyzer: DocumentAnalyzer::new(llm.clone(), config.question_count),
        condenser: ResumeCondenser::new(llm.clone(), config.condensed_resume_word_cap),
        evaluator: ResponseEvaluator::new(llm),
    };
    info!(
        "Pipeline ready: {} questions per run, condensed resume cap {} words",
        config.question_count,
        pipeline.condenser.word_cap()
    );

    // Build app state
    let state = AppState {
        owner_id: config.owner_id,
        pipeline,
        recordings: Arc::new(S3RecordingStore::new(s3, config.s3_bucket.clone())),
        interviews: Arc::new(InterviewRegistry::default()),
        max_recording_bytes: config.max_recording_bytes,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "interview-coach-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
