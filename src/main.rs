//! Adoptly service entry point.
//!
//! Wires configuration, stores (PostgreSQL when a database URL is
//! configured, in-memory otherwise), the engine handlers, and the HTTP
//! routers.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use adoptly::adapters::advisory::{HttpEnricherConfig, HttpReasonEnricher};
use adoptly::adapters::http::{
    progression_router, recommendations_router, ProgressionAppState, RecommendationsAppState,
};
use adoptly::adapters::memory::{
    InMemoryAchievementStore, InMemoryActivityLog, InMemoryProfileReader,
    InMemoryRecommendationStore, InMemoryStatsStore, InMemoryToolCatalog, StaticLevelCatalog,
};
use adoptly::adapters::postgres::{
    PostgresAchievementStore, PostgresActivityLog, PostgresProfileReader,
    PostgresRecommendationStore, PostgresStatsStore, PostgresToolCatalog,
};
use adoptly::application::handlers::progression::{
    AwardPointsHandler, EvaluateAchievementsHandler, GetProgressionHandler, RecordActivityHandler,
};
use adoptly::application::handlers::recommendation::{
    GenerateRecommendationsHandler, RecordFeedbackHandler, ResetDismissalHandler,
};
use adoptly::config::{AppConfig, Environment};
use adoptly::ports::{
    AchievementStore, ActivityLog, LevelCatalog, ProfileReader, ReasonEnricher,
    RecommendationStore, StatsStore, ToolCatalog,
};

/// The engine's store ports, behind whichever adapter set is configured.
struct Stores {
    profiles: Arc<dyn ProfileReader>,
    catalog: Arc<dyn ToolCatalog>,
    recommendations: Arc<dyn RecommendationStore>,
    stats: Arc<dyn StatsStore>,
    activity: Arc<dyn ActivityLog>,
    achievements: Arc<dyn AchievementStore>,
    levels: Arc<dyn LevelCatalog>,
}

async fn build_stores(config: &AppConfig) -> Result<Stores, Box<dyn Error>> {
    match &config.database.url {
        Some(url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("using PostgreSQL stores");
            Ok(Stores {
                profiles: Arc::new(PostgresProfileReader::new(pool.clone())),
                catalog: Arc::new(PostgresToolCatalog::new(pool.clone())),
                recommendations: Arc::new(PostgresRecommendationStore::new(pool.clone())),
                stats: Arc::new(PostgresStatsStore::new(pool.clone())),
                activity: Arc::new(PostgresActivityLog::new(pool.clone())),
                achievements: Arc::new(PostgresAchievementStore::new(pool)),
                levels: Arc::new(StaticLevelCatalog::new()),
            })
        }
        None => {
            tracing::warn!("no database configured, using in-memory stores");
            Ok(Stores {
                profiles: Arc::new(InMemoryProfileReader::new()),
                catalog: Arc::new(InMemoryToolCatalog::new()),
                recommendations: Arc::new(InMemoryRecommendationStore::new()),
                stats: Arc::new(InMemoryStatsStore::new()),
                activity: Arc::new(InMemoryActivityLog::new()),
                achievements: Arc::new(InMemoryAchievementStore::new()),
                levels: Arc::new(StaticLevelCatalog::new()),
            })
        }
    }
}

fn build_enricher(config: &AppConfig) -> Result<Option<Arc<dyn ReasonEnricher>>, Box<dyn Error>> {
    if !config.advisory.enabled {
        return Ok(None);
    }
    let Some(api_key) = &config.advisory.api_key else {
        return Ok(None);
    };
    let enricher_config = HttpEnricherConfig::new(api_key.expose_secret())
        .with_model(&config.advisory.model)
        .with_base_url(&config.advisory.base_url)
        .with_timeout(Duration::from_secs(config.advisory.timeout_secs));
    Ok(Some(Arc::new(HttpReasonEnricher::new(enricher_config)?)))
}

async fn health() -> &'static str {
    "ok"
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.server.environment {
        Environment::Production => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        Environment::Development => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }

    let stores = build_stores(&config).await?;

    // Progression side.
    let evaluator = Arc::new(EvaluateAchievementsHandler::new(
        stores.stats.clone(),
        stores.achievements.clone(),
    ));
    let record_activity = Arc::new(RecordActivityHandler::new(
        stores.activity.clone(),
        stores.stats.clone(),
        evaluator.clone(),
    ));
    let award_points = Arc::new(AwardPointsHandler::new(stores.stats.clone(), evaluator));
    let overview = Arc::new(GetProgressionHandler::new(
        stores.stats.clone(),
        stores.achievements.clone(),
        stores.levels.clone(),
    ));

    // Recommendation side.
    let mut generate = GenerateRecommendationsHandler::new(
        stores.profiles.clone(),
        stores.catalog.clone(),
        stores.recommendations.clone(),
        stores.activity.clone(),
    )
    .with_default_limit(config.engine.recommendation_limit);
    if let Some(enricher) = build_enricher(&config)? {
        generate = generate.with_enricher(enricher);
    }
    let generate = Arc::new(generate);
    let feedback = Arc::new(RecordFeedbackHandler::new(
        stores.recommendations.clone(),
        record_activity.clone(),
    ));
    let reset = Arc::new(ResetDismissalHandler::new(stores.recommendations.clone()));

    let recommendations_state = RecommendationsAppState {
        generate,
        feedback,
        reset,
        store: stores.recommendations.clone(),
    };
    let progression_state = ProgressionAppState {
        record_activity,
        award_points,
        overview,
    };

    let app = Router::new()
        .route("/health", get(health))
        .nest(
            "/api/recommendations",
            recommendations_router().with_state(recommendations_state),
        )
        .nest(
            "/api/progression",
            progression_router().with_state(progression_state),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(Duration::from_secs(30))),
        );

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "adoptly engine listening");
    let listener = tokio::net::TcpListener::bind(addr.as_str()).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
