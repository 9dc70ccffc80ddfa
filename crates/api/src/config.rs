use imagegen_engine::BusyPolicy;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `7860`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `600`).
    ///
    /// Must cover a full generation: the submitting request blocks until
    /// the final image is rendered.
    pub request_timeout_secs: u64,
    /// Identifier of the served model (weights repository path).
    pub model_id: String,
    /// Human-readable model name reported by the status endpoints.
    pub model_name: String,
    /// What to do with a generation request while another is running.
    pub submit_policy: BusyPolicy,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                            |
    /// |------------------------|------------------------------------|
    /// | `HOST`                 | `0.0.0.0`                          |
    /// | `PORT`                 | `7860`                             |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`            |
    /// | `REQUEST_TIMEOUT_SECS` | `600`                              |
    /// | `MODEL_ID`             | `cagliostrolab/animagine-xl-3.1`   |
    /// | `MODEL_NAME`           | `Animagine XL 3.1`                 |
    /// | `SUBMIT_POLICY`        | `queue` (`queue` \| `reject`)      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "7860".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "600".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let model_id = std::env::var("MODEL_ID")
            .unwrap_or_else(|_| "cagliostrolab/animagine-xl-3.1".into());

        let model_name = std::env::var("MODEL_NAME").unwrap_or_else(|_| "Animagine XL 3.1".into());

        let submit_policy: BusyPolicy = std::env::var("SUBMIT_POLICY")
            .unwrap_or_else(|_| "queue".into())
            .parse()
            .expect("SUBMIT_POLICY must be 'queue' or 'reject'");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            model_id,
            model_name,
            submit_policy,
        }
    }
}
