use config::{Config, ConfigError, Environment, File};
use dotenv::dotenv;
use serde::Deserialize;
use std::{env, fmt, str::FromStr};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    #[serde(default)]
    pub store_project_id: Option<String>,

    #[serde(default = "default_store_dataset")]
    pub store_dataset: String,

    #[serde(default)]
    pub store_token: Option<String>,

    #[serde(default = "default_store_api_version")]
    pub store_api_version: String,

    #[serde(default = "default_rate_limit_max")]
    pub rate_limit_max_requests: u32,

    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window_secs: u64,

    #[serde(default = "default_trust_forwarded_for")]
    pub trust_forwarded_for: bool,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-Contact-API".to_string()
}
fn default_port() -> u16 {
    3001
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_store_dataset() -> String {
    "production".to_string()
}
fn default_store_api_version() -> String {
    "2025-04-17".to_string()
}
fn default_rate_limit_max() -> u32 {
    3
}
fn default_rate_limit_window() -> u64 {
    15 * 60
}
fn default_trust_forwarded_for() -> bool {
    true
}

/// Everything needed to write to the content store. Only built once both
/// the project id and the write token are present.
#[derive(Clone)]
pub struct StoreCredentials {
    pub project_id: String,
    pub dataset: String,
    pub token: String,
    pub api_version: String,
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{env_name}")).required(false))
            .add_source(Environment::with_prefix("APP").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // The original deployment configured these under their own names;
        // keep honoring them alongside the APP_-prefixed ones.
        if config.store_project_id.is_none() {
            config.store_project_id = env::var("SANITY_PROJECT_ID").ok();
        }
        if config.store_token.is_none() {
            config.store_token = env::var("SANITY_TOKEN").ok();
        }
        if let Ok(dataset) = env::var("SANITY_DATASET") {
            config.store_dataset = dataset;
        }
        if let Ok(port) = env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::Message(format!("Invalid PORT value: {port}")))?;
        }
        if let Ok(origins) = env::var("ALLOWED_ORIGINS") {
            config.cors_allowed_origins = origins.split(',').map(|s| s.trim().to_string()).collect();
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.rate_limit_max_requests == 0 {
            errors.push("RATE_LIMIT_MAX_REQUESTS must be at least 1");
        }
        if self.rate_limit_window_secs == 0 {
            errors.push("RATE_LIMIT_WINDOW_SECS must be at least 1 second");
        }
        if self.is_production() && self.store_credentials().is_none() {
            errors.push("SANITY_PROJECT_ID and SANITY_TOKEN must be set in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn store_credentials(&self) -> Option<StoreCredentials> {
        let project_id = self.store_project_id.as_deref().filter(|v| !v.trim().is_empty())?;
        let token = self.store_token.as_deref().filter(|v| !v.trim().is_empty())?;

        Some(StoreCredentials {
            project_id: project_id.to_string(),
            dataset: self.store_dataset.clone(),
            token: token.to_string(),
            api_version: self.store_api_version.clone(),
        })
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Value for the Access-Control-Allow-Origin header. The original
    /// handlers always answered with a wildcard; a deployment can narrow it
    /// to a single origin through ALLOWED_ORIGINS.
    pub fn cors_origin(&self) -> String {
        let origins = self.cors_origins();
        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            "*".to_string()
        } else {
            origins[0].clone()
        }
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() {
            "[MISSING]"
        } else {
            "[REDACTED]"
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("store_project_id", &self.store_project_id)
            .field("store_dataset", &self.store_dataset)
            .field("store_token", &self.store_token.as_deref().unwrap_or("").redact())
            .field("store_api_version", &self.store_api_version)
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .field("trust_forwarded_for", &self.trust_forwarded_for)
            .finish()
    }
}
