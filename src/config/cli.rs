use crate::config::client::{ClientConfig, API_URL_ENV};
use crate::utils::error::{BmiError, Result};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "bmi")]
#[command(about = "Calculate your BMI and browse the calculation history")]
pub struct CliConfig {
    /// Base URL of the BMI API (e.g. the API Gateway stage URL)
    #[arg(long, env = API_URL_ENV, global = true)]
    pub api_url: Option<String>,

    /// Path to a TOML client configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Calculate a BMI and save it
    Calc {
        /// Height in meters
        #[arg(long, default_value_t = 1.75)]
        height: f64,

        /// Weight in kilograms
        #[arg(long, default_value_t = 70.0)]
        weight: f64,
    },
    /// Show all saved calculations, newest first
    History,
}

impl CliConfig {
    /// `--api-url` (or `BMI_API_URL`) wins over the config file.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_file(path)?,
            None => match &self.api_url {
                Some(url) => ClientConfig::new(url.clone()),
                None => {
                    return Err(BmiError::InvalidConfigValueError {
                        field: "api_url".to_string(),
                        value: String::new(),
                        reason: format!("pass --api-url, set {} or use --config", API_URL_ENV),
                    })
                }
            },
        };

        if let Some(url) = &self.api_url {
            config.api.base_url = url.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_calc_defaults() {
        let cli = CliConfig::parse_from(["bmi", "--api-url", "http://localhost:9000", "calc"]);
        match cli.command {
            Command::Calc { height, weight } => {
                assert_eq!(height, 1.75);
                assert_eq!(weight, 70.0);
            }
            Command::History => panic!("expected calc"),
        }
        let config = cli.client_config().unwrap();
        assert_eq!(config.base_url(), "http://localhost:9000");
    }

    #[test]
    fn test_parse_history_with_global_flag_after_subcommand() {
        let cli = CliConfig::parse_from(["bmi", "history", "--api-url", "http://localhost:9000/"]);
        assert!(matches!(cli.command, Command::History));
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9000/"));
    }
}
