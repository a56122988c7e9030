use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for trainflow
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrainflowConfig {
    /// Where requests and users are kept
    pub store: StoreConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
    /// Workflow behaviour
    pub workflow: WorkflowConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// JSON data file holding users and requests
    pub data_file: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
    /// Emit JSON log lines instead of plain text
    pub json_logs: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WorkflowConfig {
    /// Send a notification after every persisted transition
    pub notify_on_transition: bool,
    /// Login code used when the CLI is not told who is acting
    pub default_user_code: Option<String>,
}

impl Default for TrainflowConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                data_file: PathBuf::from(".trainflow/data.json"),
            },
            observability: ObservabilityConfig {
                log_level: "warn".to_string(),
                json_logs: true,
            },
            workflow: WorkflowConfig {
                notify_on_transition: true,
                default_user_code: None,
            },
        }
    }
}

impl TrainflowConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (trainflow.toml, .trainflow-rc)
    /// 3. Environment variables (prefixed with TRAINFLOW_)
    pub fn load() -> Result<Self> {
        let defaults = Config::try_from(&TrainflowConfig::default())?;
        let mut builder = Config::builder().add_source(defaults);

        if Path::new("trainflow.toml").exists() {
            builder = builder.add_source(File::with_name("trainflow"));
        }

        if Path::new(".trainflow-rc").exists() {
            builder = builder.add_source(
                File::with_name(".trainflow-rc").format(config::FileFormat::Toml),
            );
        }

        builder = builder.add_source(
            Environment::with_prefix("TRAINFLOW")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<TrainflowConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        // Load .env file first
        let _ = TrainflowConfig::load_env_file();
        TrainflowConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static TrainflowConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

/// Initialize configuration (called at startup, before logging is set up)
pub fn init_config() -> Result<&'static TrainflowConfig> {
    config()
}
