/// Configuration management for the API server
///
/// Configuration is read once at startup into a [`Config`] value that is then
/// owned by `AppState`; nothing reads the environment after that.
///
/// # Environment Variables
///
/// - `DATABASE_URL`: PostgreSQL connection string. When unset, it is built
///   from `PG_HOST` (default `db`), `PG_DB`, `PG_USER` and `PG_PW`
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `JWT_SECRET_KEY`: Secret key for token signing (required, 32+ chars)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 5000)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: `*`)
/// - `RUN_MIGRATIONS`: Apply migrations on startup (default: true)
/// - `RUST_LOG`: Log filter (default: `taskboard_api=debug,tower_http=debug`)
/// - `LOG_FORMAT`: `json` for JSON log lines (read by `main`, not stored here)
///
/// # Example
///
/// ```no_run
/// use taskboard_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// JWT configuration
    pub jwt: JwtConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins (`*` = any)
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Apply embedded migrations before serving
    pub run_migrations: bool,
}

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HS256 signing secret. Must be at least 32 bytes.
    pub secret: String,
}

/// Minimum accepted length of `JWT_SECRET_KEY`
pub const MIN_SECRET_LEN: usize = 32;

impl Config {
    /// Loads configuration from environment variables (and `.env`, if present)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Neither `DATABASE_URL` nor the `PG_*` credentials are set
    /// - `JWT_SECRET_KEY` is missing or too short
    /// - A numeric or boolean variable doesn't parse
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()?;

        let cors_origins = parse_origins(&env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string()));

        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                let host = env::var("PG_HOST").unwrap_or_else(|_| "db".to_string());
                let db = required("PG_DB")?;
                let user = required("PG_USER")?;
                let password = required("PG_PW")?;
                postgres_url(&host, &db, &user, &password)
            }
        };

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let run_migrations = env::var("RUN_MIGRATIONS")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()?;

        let jwt_secret = required("JWT_SECRET_KEY")?;
        validate_secret(&jwt_secret)?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                run_migrations,
            },
            jwt: JwtConfig { secret: jwt_secret },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }

    /// Whether CORS should allow any origin
    pub fn cors_permissive(&self) -> bool {
        self.api.cors_origins.iter().any(|o| o == "*")
    }
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).map_err(|_| anyhow::anyhow!("{} environment variable is required", name))
}

/// Builds a connection URL from discrete credentials
///
/// User, password and database name are percent-encoded, so any value that
/// works as a separate connection parameter also works here. The database
/// goes in the `dbname` query parameter, which sqlx decodes (the URL path is
/// taken literally). The host is used as given and may carry a `:port`
/// suffix.
pub fn postgres_url(host: &str, database: &str, user: &str, password: &str) -> String {
    format!(
        "postgresql://{}:{}@{}?dbname={}",
        urlencoding::encode(user),
        urlencoding::encode(password),
        host,
        urlencoding::encode(database)
    )
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

fn validate_secret(secret: &str) -> anyhow::Result<()> {
    if secret.len() < MIN_SECRET_LEN {
        anyhow::bail!(
            "JWT_SECRET_KEY must be at least {} characters long",
            MIN_SECRET_LEN
        );
    }
    Ok(())
}
