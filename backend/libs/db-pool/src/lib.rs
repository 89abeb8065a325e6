//! Database connection pool management
//!
//! Provides PostgreSQL pool creation and configuration, including the level
//! at which executed SQL statements are logged.

use log::LevelFilter;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::ConnectOptions;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};

/// Statements slower than this are logged at `warn`
const SLOW_STATEMENT_THRESHOLD: Duration = Duration::from_secs(1);

/// Database connection pool configuration
#[derive(Clone)]
pub struct DbConfig {
    /// Service name for log labeling
    pub service_name: String,
    /// PostgreSQL connection URL
    pub database_url: String,
    /// Maximum number of connections
    pub max_connections: u32,
    /// Minimum number of connections
    pub min_connections: u32,
    /// Connection verification timeout (new connection to PostgreSQL)
    pub connect_timeout_secs: u64,
    /// Connection acquisition timeout (get connection from pool)
    pub acquire_timeout_secs: u64,
    /// Connection idle timeout
    pub idle_timeout_secs: u64,
    /// Connection maximum lifetime
    pub max_lifetime_secs: u64,
    /// Level for executed statement logs (`Off` disables them)
    pub statement_log_level: LevelFilter,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("service_name", &self.service_name)
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("max_lifetime_secs", &self.max_lifetime_secs)
            .field("statement_log_level", &self.statement_log_level)
            .finish()
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            service_name: String::from("unknown"),
            database_url: String::new(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 5,
            acquire_timeout_secs: 10,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
            statement_log_level: LevelFilter::Info,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl DbConfig {
    /// Create a new DbConfig from environment variables
    pub fn from_env(service_name: &str) -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable not set".to_string())?;
        Self::from_env_with_url(service_name, database_url)
    }

    /// Like [`DbConfig::from_env`], falling back to `default_url` when
    /// `DATABASE_URL` is unset
    pub fn from_env_or(service_name: &str, default_url: &str) -> Result<Self, String> {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| default_url.to_string());
        Self::from_env_with_url(service_name, database_url)
    }

    fn from_env_with_url(service_name: &str, database_url: String) -> Result<Self, String> {
        let defaults = Self::default();
        let statement_log_level = match std::env::var("DB_LOG_STATEMENTS") {
            Ok(raw) => LevelFilter::from_str(raw.trim())
                .map_err(|_| format!("Invalid DB_LOG_STATEMENTS value '{}'", raw))?,
            Err(_) => defaults.statement_log_level,
        };

        let config = Self {
            service_name: service_name.to_string(),
            database_url,
            max_connections: env_or("DB_MAX_CONNECTIONS", defaults.max_connections),
            min_connections: env_or("DB_MIN_CONNECTIONS", defaults.min_connections),
            connect_timeout_secs: env_or("DB_CONNECT_TIMEOUT_SECS", defaults.connect_timeout_secs),
            acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", defaults.acquire_timeout_secs),
            idle_timeout_secs: env_or("DB_IDLE_TIMEOUT_SECS", defaults.idle_timeout_secs),
            max_lifetime_secs: env_or("DB_MAX_LIFETIME_SECS", defaults.max_lifetime_secs),
            statement_log_level,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject pool bounds PostgreSQL cannot honor
    pub fn validate(&self) -> Result<(), String> {
        if self.max_connections == 0 {
            return Err("max_connections must be at least 1".to_string());
        }
        if self.min_connections > self.max_connections {
            return Err(format!(
                "min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            ));
        }
        Ok(())
    }

    /// Log pool configuration details
    pub fn log_config(&self) {
        info!(
            "Database Pool Configuration: \
             max_connections={}, min_connections={}, \
             connect_timeout={}s, acquire_timeout={}s, idle_timeout={}s, max_lifetime={}s, \
             statement_log_level={}",
            self.max_connections,
            self.min_connections,
            self.connect_timeout_secs,
            self.acquire_timeout_secs,
            self.idle_timeout_secs,
            self.max_lifetime_secs,
            self.statement_log_level
        );
    }

    /// Connection options with statement logging applied
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let options = PgConnectOptions::from_str(&self.database_url)?;
        let options = if self.statement_log_level == LevelFilter::Off {
            options.disable_statement_logging()
        } else {
            options
                .log_statements(self.statement_log_level)
                .log_slow_statements(LevelFilter::Warn, SLOW_STATEMENT_THRESHOLD)
        };
        Ok(options)
    }
}

/// Create a PostgreSQL connection pool and verify it with `SELECT 1`
///
/// Invalid pool bounds are rejected as [`sqlx::Error::Configuration`]
/// before any connection is attempted.
pub async fn create_pool(config: DbConfig) -> Result<PgPool, sqlx::Error> {
    if let Err(reason) = config.validate() {
        error!(
            service = %config.service_name,
            error = %reason,
            "Invalid database pool configuration"
        );
        return Err(sqlx::Error::Configuration(reason.into()));
    }

    debug!(
        "Creating database pool: service={}, max={}, min={}, \
         acquire_timeout={}s, verify_timeout={}s, idle_timeout={}s",
        config.service_name,
        config.max_connections,
        config.min_connections,
        config.acquire_timeout_secs,
        config.connect_timeout_secs,
        config.idle_timeout_secs
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
        .connect_with(config.connect_options()?)
        .await?;

    match tokio::time::timeout(
        Duration::from_secs(config.connect_timeout_secs),
        sqlx::query("SELECT 1").execute(&pool),
    )
    .await
    {
        Ok(Ok(_)) => {
            info!(
                service = %config.service_name,
                "Database pool created and verified successfully"
            );
            Ok(pool)
        }
        Ok(Err(e)) => {
            error!(
                service = %config.service_name,
                error = %e,
                "Database connection verification failed"
            );
            Err(e)
        }
        Err(_) => {
            error!(
                service = %config.service_name,
                timeout_secs = config.connect_timeout_secs,
                "Database connection verification timeout"
            );
            Err(sqlx::Error::Io(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "Database verification timeout",
            )))
        }
    }
}
