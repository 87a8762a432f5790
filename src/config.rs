//! Command-line arguments and the validated configuration built from them.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use url::Url;

use crate::app::Route;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Base URL baked in at build time through `INVENTORY_API_URL`.
pub fn build_time_api_url() -> &'static str {
    option_env!("INVENTORY_API_URL").unwrap_or(DEFAULT_API_URL)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid report service URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("report service URL must use http or https, got {0:?}")]
    UnsupportedScheme(String),
    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
    #[error("unknown start page {0:?}")]
    UnknownRoute(String),
}

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Upload WMS and physical count spreadsheets and fetch audit reports")]
pub struct Args {
    /// Base URL of the report service (defaults to the build-time value)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Seconds to wait for a report before giving up
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Save reports here instead of asking for a location
    #[arg(long)]
    pub download_dir: Option<PathBuf>,

    /// Page shown at startup
    #[arg(long, default_value = "/")]
    pub page: String,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn into_config(self) -> Result<AppConfig, ConfigError> {
        let url = self
            .api_url
            .unwrap_or_else(|| build_time_api_url().to_string());
        let client = ClientConfig::new(&url, Duration::from_secs(self.timeout_secs))?;
        let start_route =
            Route::from_path(&self.page).ok_or_else(|| ConfigError::UnknownRoute(self.page))?;
        Ok(AppConfig {
            client,
            download_dir: self.download_dir,
            start_route,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|source| ConfigError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(base_url.scheme().to_string()));
        }
        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(Self { base_url, timeout })
    }

    /// Joins an endpoint path onto the base URL, keeping any path prefix the
    /// base URL already has.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub download_dir: Option<PathBuf>,
    pub start_route: Route,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["inventory-reports"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn defaults_point_at_loopback_with_sixty_second_timeout() {
        let config = args(&[]).into_config().unwrap().client;
        if option_env!("INVENTORY_API_URL").is_none() {
            assert_eq!(config.base_url.as_str(), "http://localhost:8000/");
        }
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let config = ClientConfig::new("http://localhost:8000/", Duration::from_secs(1)).unwrap();
        assert_eq!(config.endpoint("/compare"), "http://localhost:8000/compare");

        let nested = ClientConfig::new("https://reports.example/api", Duration::from_secs(1)).unwrap();
        assert_eq!(
            nested.endpoint("/blind-template"),
            "https://reports.example/api/blind-template"
        );
    }

    #[test]
    fn rejects_bad_urls_and_zero_timeout() {
        assert!(matches!(
            ClientConfig::new("not a url", Duration::from_secs(1)),
            Err(ConfigError::InvalidUrl { .. })
        ));
        assert!(matches!(
            ClientConfig::new("ftp://host", Duration::from_secs(1)),
            Err(ConfigError::UnsupportedScheme(_))
        ));
        assert!(matches!(
            ClientConfig::new("http://host", Duration::ZERO),
            Err(ConfigError::ZeroTimeout)
        ));
    }

    #[test]
    fn args_build_config() {
        let config = args(&[
            "--api-url",
            "http://10.0.0.5:9000",
            "--timeout-secs",
            "5",
            "--page",
            "/relatorio-as-cegas",
        ])
        .into_config()
        .unwrap();
        assert_eq!(config.client.endpoint("/compare"), "http://10.0.0.5:9000/compare");
        assert_eq!(config.client.timeout, Duration::from_secs(5));
        assert_eq!(config.start_route, Route::BlindTemplate);
        assert!(config.download_dir.is_none());
    }

    #[test]
    fn unknown_start_page_is_an_error() {
        assert!(matches!(
            args(&["--page", "/history"]).into_config(),
            Err(ConfigError::UnknownRoute(page)) if page == "/history"
        ));
    }
}
