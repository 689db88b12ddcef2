/// Application state and router builder
///
/// # Example
///
/// ```no_run
/// use taskboard_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskboard_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error::ApiError};
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskboard_shared::auth::middleware::authenticate;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Built once in `main` and cloned into every request. Holds no mutable
/// state of its own: the pool hands out connections and the config is
/// read-only.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets JWT secret for token operations
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET    /health
/// ├── GET    /user              public
/// ├── POST   /user              public
/// ├── POST   /user/login        public
/// ├── GET    /user/:id          bearer token
/// ├── PUT    /user/:id          bearer token
/// ├── DELETE /user/:id          bearer token
/// ├── GET    /task              bearer token
/// ├── POST   /task              bearer token
/// ├── GET    /task/:id          bearer token
/// ├── PUT    /task/:id          bearer token (owner)
/// └── DELETE /task/:id          bearer token (owner)
/// ```
///
/// Middleware, outermost first: CORS, request tracing, and on protected
/// routes the bearer-token check.
pub fn build_router(state: AppState) -> Router {
    use crate::routes::{health, tasks, users};

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/user", get(users::list_users).post(users::create_user))
        .route("/user/login", post(users::login));

    let protected_routes = Router::new()
        .route(
            "/user/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route("/task", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/task/:id",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ));

    let cors = cors_layer(&state.config);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_permissive() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .api
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(3600))
}

/// Bearer-token middleware
///
/// Rejects the request with 401 before the handler runs unless the token
/// validates; otherwise stores an `AuthContext` in request extensions.
async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = authenticate(req.headers(), state.jwt_secret()).map_err(|e| {
        tracing::debug!(error = %e, path = %req.uri().path(), "Rejected request");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
