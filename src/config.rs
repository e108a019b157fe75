use clap::{Args, Parser, ValueEnum};
use std::num::NonZeroUsize;

#[derive(Clone, Debug, Default, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Database connection URL. When unset, device tokens are kept in memory.
    #[arg(long, env = "HERALD_DATABASE_URL")]
    pub database_url: Option<String>,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,

    #[command(flatten)]
    pub gateway: GatewayConfig,

    #[command(flatten)]
    pub dispatch: DispatchConfig,

    #[command(flatten)]
    pub cleanup: CleanupConfig,

    #[command(flatten)]
    pub health: HealthConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "HERALD_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "HERALD_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the management server (health probes)
    #[arg(long, env = "HERALD_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// How long to wait for background tasks during shutdown
    #[arg(long, env = "HERALD_SHUTDOWN_TIMEOUT_SECS", default_value_t = 10)]
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "0.0.0.0".to_string(), port: 3000, mgmt_port: 9090, shutdown_timeout_secs: 10 }
    }
}

#[derive(Clone, Debug, Args)]
pub struct DatabaseConfig {
    /// Maximum number of pooled connections
    #[arg(long = "db-max-connections", env = "HERALD_DB_MAX_CONNECTIONS", default_value_t = 20)]
    pub max_connections: u32,

    /// Minimum number of idle connections kept open
    #[arg(long = "db-min-connections", env = "HERALD_DB_MIN_CONNECTIONS", default_value_t = 2)]
    pub min_connections: u32,

    /// How long to wait for a free connection
    #[arg(long = "db-acquire-timeout-secs", env = "HERALD_DB_ACQUIRE_TIMEOUT_SECS", default_value_t = 3)]
    pub acquire_timeout_secs: u64,

    /// Idle connections older than this are closed
    #[arg(long = "db-idle-timeout-secs", env = "HERALD_DB_IDLE_TIMEOUT_SECS", default_value_t = 600)]
    pub idle_timeout_secs: u64,

    /// Connections are recycled after this lifetime
    #[arg(long = "db-max-lifetime-secs", env = "HERALD_DB_MAX_LIFETIME_SECS", default_value_t = 1800)]
    pub max_lifetime_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            max_connections: 20,
            min_connections: 2,
            acquire_timeout_secs: 3,
            idle_timeout_secs: 600,
            max_lifetime_secs: 1800,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Default, Args)]
pub struct TelemetryConfig {
    /// OTLP collector endpoint. Traces and metrics are exported only when set.
    #[arg(long, env = "HERALD_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,

    /// Log output format
    #[arg(long, env = "HERALD_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Clone, Debug, Args)]
pub struct GatewayConfig {
    /// Firebase project that owns the device tokens
    #[arg(long, env = "HERALD_FCM_PROJECT_ID")]
    pub fcm_project_id: Option<String>,

    /// OAuth2 bearer token for the FCM HTTP v1 API
    ///
    /// Google access tokens expire after about an hour and are not refreshed here.
    /// Rotate the value externally and restart, or every send fails with 401 and is
    /// counted as a transient failure.
    #[arg(long, env = "HERALD_FCM_ACCESS_TOKEN", hide_env_values = true)]
    pub fcm_access_token: Option<String>,

    /// Base URL of the FCM API
    #[arg(long, env = "HERALD_FCM_ENDPOINT", default_value = "https://fcm.googleapis.com")]
    pub fcm_endpoint: String,

    /// Timeout for a single send to the gateway
    #[arg(long, env = "HERALD_FCM_SEND_TIMEOUT_MS", default_value_t = 10_000)]
    pub send_timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            fcm_project_id: None,
            fcm_access_token: None,
            fcm_endpoint: "https://fcm.googleapis.com".to_string(),
            send_timeout_ms: 10_000,
        }
    }
}

const DEFAULT_BATCH_LIMIT: NonZeroUsize = match NonZeroUsize::new(500) {
    Some(limit) => limit,
    None => unreachable!(),
};

#[derive(Clone, Debug, Args)]
pub struct DispatchConfig {
    /// Maximum number of sends in flight for one batch of a bulk dispatch
    #[arg(long = "dispatch-batch-limit", env = "HERALD_DISPATCH_BATCH_LIMIT", default_value = "500")]
    pub batch_limit: NonZeroUsize,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { batch_limit: DEFAULT_BATCH_LIMIT }
    }
}

#[derive(Clone, Debug, Args)]
pub struct CleanupConfig {
    /// How often to sweep stale device tokens (0 disables the sweep)
    #[arg(long = "cleanup-interval-secs", env = "HERALD_CLEANUP_INTERVAL_SECS", default_value_t = 3600)]
    pub interval_secs: u64,

    /// Tokens not re-registered within this many days are removed
    #[arg(long, env = "HERALD_STALE_TOKEN_DAYS", default_value_t = 270)]
    pub stale_token_days: i64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self { interval_secs: 3600, stale_token_days: 270 }
    }
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the token store readiness check
    #[arg(long, env = "HERALD_HEALTH_STORE_TIMEOUT_MS", default_value_t = 2000)]
    pub store_timeout_ms: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self { store_timeout_ms: 2000 }
    }
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}
