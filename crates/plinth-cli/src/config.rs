use std::path::PathBuf;

use clap::Parser;
use plinth_api::ApiConfig;

use crate::commands::Command;

/// Command line arguments for the admin console.
#[derive(Parser, Debug)]
#[command(name = "plinth")]
#[command(version, about = "Admin console for the plinth content API", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the content API, including the /api prefix
    #[arg(
        long,
        env = "PLINTH_API_URL",
        default_value = "http://localhost:8000/api",
        global = true
    )]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "PLINTH_TIMEOUT_SECS", default_value = "30", global = true)]
    pub timeout_secs: u64,

    /// Credentials file; defaults to a file under the user config directory
    #[arg(long, env = "PLINTH_CREDENTIALS_FILE", global = true)]
    pub credentials_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PLINTH_LOG_LEVEL", default_value = "warn", global = true)]
    pub log_level: String,
}

impl Args {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(format!("Invalid API URL: {}", self.api_url));
        }
        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Builds the API client configuration from the parsed arguments.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.trim_end_matches('/').to_string(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args::parse_from(["plinth", "settings", "show"])
    }

    #[test]
    fn test_default_config_is_valid() {
        let args = base_args();
        assert!(args.validate().is_ok());
        assert_eq!(args.api_url, "http://localhost:8000/api");
        assert_eq!(args.timeout_secs, 30);
    }

    #[test]
    fn test_rejects_bad_api_url() {
        let args = Args::parse_from([
            "plinth",
            "--api-url",
            "localhost:8000/api",
            "settings",
            "show",
        ]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_api_config_strips_trailing_slash() {
        let args = Args::parse_from([
            "plinth",
            "--api-url",
            "https://api.example.com/api/",
            "settings",
            "show",
        ]);
        assert_eq!(args.api_config().base_url, "https://api.example.com/api");
    }
}
