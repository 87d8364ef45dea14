use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod prompts;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

/// Auth endpoints, mounted under both /auth and /api/auth. The signup and
/// signin paths are aliases kept for older frontend builds.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/signup", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/signin", post(handlers::auth::login))
        .route("/signout", post(handlers::auth::signout))
}

pub fn app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::health::root))
        .route("/api/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        .route(
            "/api/reflections/prompt",
            get(handlers::reflections::daily_prompt),
        )
        .route("/api/chat", get(handlers::chat::list_messages))
        .route("/api/chat", post(handlers::chat::post_message))
        .nest("/auth", auth_routes())
        .nest("/api/auth", auth_routes());

    let protected_routes = Router::new()
        // Moods
        .route("/api/moods", get(handlers::moods::list_moods))
        .route("/api/moods", post(handlers::moods::create_mood))
        .route("/api/moods/:id", delete(handlers::moods::delete_mood))
        // Journal entries
        .route("/api/entries", get(handlers::entries::list_entries))
        .route("/api/entries", post(handlers::entries::create_entry))
        .route("/api/entries/:id", put(handlers::entries::update_entry))
        .route("/api/entries/:id", delete(handlers::entries::delete_entry))
        // Reflections
        .route(
            "/api/reflections",
            get(handlers::reflections::list_reflections),
        )
        .route(
            "/api/reflections",
            post(handlers::reflections::save_reflection),
        )
        .route(
            "/api/reflections/today",
            get(handlers::reflections::today_reflection),
        )
        .route(
            "/api/reflections/:id",
            delete(handlers::reflections::delete_reflection),
        )
        // Calendar
        .route("/api/calendar", get(handlers::calendar::get_calendar))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let cors = CorsLayer::new()
        .allow_origin(
            state
                .config
                .frontend_url
                .parse::<axum::http::HeaderValue>()
                .unwrap(),
        )
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::PUT,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodsphere_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    let db = db::create_pool(&config.database_url).await;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let state = AppState {
        db,
        config: config.clone(),
    };

    let app = app(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
