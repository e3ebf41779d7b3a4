//! CLI argument definitions for the scheme assistant.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

use scheme_core::AppConfig;

/// Scheme assistant: finds government support schemes and checks eligibility
/// through a guided conversation.
#[derive(Parser, Debug)]
#[command(name = "scheme-assistant", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Address the API server binds to.
    #[arg(long = "host")]
    pub host: Option<String>,

    /// API server port.
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Use the built-in sample catalog instead of Vertex AI Search.
    #[arg(long = "mock")]
    pub mock: bool,

    /// Chat in the terminal instead of starting the HTTP server.
    #[arg(short = 'i', long = "interactive")]
    pub interactive: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > SCHEME_ASSISTANT_CONFIG env var >
    /// ~/.scheme-assistant/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("SCHEME_ASSISTANT_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the API server port.
    ///
    /// Priority: --port flag > SCHEME_ASSISTANT_PORT env var > config value.
    pub fn resolve_port(&self, config_port: u16) -> u16 {
        if let Some(p) = self.port {
            return p;
        }
        if let Ok(val) = std::env::var("SCHEME_ASSISTANT_PORT") {
            if let Ok(p) = val.parse::<u16>() {
                return p;
            }
        }
        config_port
    }

    /// Resolve the log level: --log-level flag > config value.
    pub fn resolve_log_level(&self, config_level: &str) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config_level.to_string())
    }

    /// Fold the command-line overrides into `config`.
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(ref host) = self.host {
            config.general.host = host.clone();
        }
        config.general.port = self.resolve_port(config.general.port);
        config.general.log_level = self.resolve_log_level(&config.general.log_level);
        if self.mock {
            config.search.use_mock_search = true;
        }
    }
}

/// Default config file path.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home)
            .join(".scheme-assistant")
            .join("config.toml");
    }
    PathBuf::from("config.toml")
}
