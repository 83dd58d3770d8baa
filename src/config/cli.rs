use crate::config::toml_config::AppConfig;
use crate::core::{CombineMode, FetchMode};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "horoscope-groq")]
#[command(about = "Fetch a birth chart from the astrology API and have an LLM interpret it")]
pub struct CliArgs {
    /// Path to a TOML configuration file. Without it, credentials come from the environment.
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Fetch the chart endpoints concurrently instead of one after another
    #[arg(long)]
    pub concurrent: bool,

    /// Override how the chart responses are combined
    #[arg(long, value_enum)]
    pub combine: Option<CombineMode>,

    /// Show the resolved configuration without calling any API
    #[arg(long)]
    pub dry_run: bool,

    /// Exit right after printing instead of waiting for Enter
    #[arg(long)]
    pub no_wait: bool,
}

impl CliArgs {
    /// Loads the configuration source and applies command-line overrides.
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::from_env(),
        };

        if self.concurrent {
            config.pipeline.fetch_mode = FetchMode::Concurrent;
        }
        if let Some(combine) = self.combine {
            config.pipeline.combine = combine;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from([
            "horoscope-groq",
            "--config",
            "horoscope.toml",
            "--concurrent",
            "--combine",
            "labeled",
            "--no-wait",
        ]);

        assert_eq!(args.config.as_deref(), Some("horoscope.toml"));
        assert!(args.concurrent);
        assert_eq!(args.combine, Some(CombineMode::Labeled));
        assert!(args.no_wait);
        assert!(!args.dry_run);
    }

    #[test]
    fn test_overrides_apply_on_top_of_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[pipeline]\nfetch_mode = \"sequential\"\ncombine = \"labeled\"\n")
            .unwrap();
        let path = temp_file.path().to_string_lossy().to_string();

        let args = CliArgs::parse_from([
            "horoscope-groq",
            "--config",
            path.as_str(),
            "--concurrent",
            "--combine",
            "raw",
        ]);
        let config = args.resolve_config().unwrap();

        assert_eq!(config.pipeline.fetch_mode, FetchMode::Concurrent);
        assert_eq!(config.pipeline.combine, CombineMode::Raw);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = CliArgs::parse_from(["horoscope-groq", "--config", "/nonexistent/horoscope.toml"]);
        assert!(args.resolve_config().is_err());
    }
}
