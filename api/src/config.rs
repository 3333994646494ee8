use std::net::{Ipv6Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::Context;
use utils::logging;

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct AppConfig {
	/// Name of the service, used in logs
	pub name: String,

	/// The config file to load, probed with `.yaml`, `.yml` and `.json`
	/// when it has no extension
	pub config_file: Option<String>,

	/// Logging configuration
	pub logging: LoggingConfig,

	/// API configuration
	pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct LoggingConfig {
	/// The log level to use, this is a tracing env filter
	pub level: String,

	/// What logging mode we should use
	pub mode: logging::Mode,
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ApiConfig {
	/// Bind address for the API
	pub bind_address: SocketAddr,

	/// Largest request body accepted, in bytes
	pub max_body_size: usize,
}

impl Default for AppConfig {
	fn default() -> Self {
		Self {
			name: "mentorship-api".to_string(),
			config_file: Some("config".to_string()),
			logging: LoggingConfig::default(),
			api: ApiConfig::default(),
		}
	}
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			mode: logging::Mode::Default,
		}
	}
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self {
			bind_address: SocketAddr::from((Ipv6Addr::UNSPECIFIED, 4000)),
			max_body_size: 1024 * 1024,
		}
	}
}

impl AppConfig {
	/// Loads the config from defaults, the config file and `MENTOR_`
	/// environment variables. Returns the file that was loaded, if any.
	pub fn parse() -> anyhow::Result<(Self, Option<PathBuf>)> {
		let parsed = utils::config::parse::<Self>(!cfg!(test)).context("failed to parse config")?;
		Ok((parsed.config, parsed.file))
	}
}
