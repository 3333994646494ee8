use std::str::FromStr;

use once_cell::sync::OnceCell;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

type ReloadHandle = Box<dyn Fn(&str) -> Result<(), LoggingError> + Sync + Send>;

static RELOAD_HANDLE: OnceCell<ReloadHandle> = OnceCell::new();

/// Output format of the global subscriber.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
	#[default]
	Default,
	Json,
	Pretty,
	Compact,
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
	#[error("invalid log filter: {0}")]
	InvalidFilter(#[from] tracing_subscriber::filter::ParseError),
	#[error("failed to init logger: {0}")]
	Init(#[from] tracing_subscriber::util::TryInitError),
	#[error("failed to reload logger: {0}")]
	Reload(#[from] tracing_subscriber::reload::Error),
}

macro_rules! install {
	($builder:expr) => {{
		let subscriber = $builder.with_filter_reloading();
		let handle = subscriber.reload_handle();

		subscriber.finish().try_init()?;

		Box::new(move |level: &str| {
			handle.reload(EnvFilter::from_str(level)?)?;
			Ok(())
		}) as ReloadHandle
	}};
}

/// Installs the global subscriber on the first call.
///
/// The mode is fixed by the first call. Every call, including the first,
/// applies `level` as the active env filter, so calling this again only
/// swaps the filter.
pub fn init(level: &str, mode: Mode) -> Result<(), LoggingError> {
	let reload = RELOAD_HANDLE.get_or_try_init(|| {
		let filter = EnvFilter::from_str(level)?;
		let base = tracing_subscriber::fmt()
			.with_line_number(true)
			.with_file(true)
			.with_env_filter(filter);

		Ok::<_, LoggingError>(match mode {
			Mode::Default => install!(base),
			Mode::Json => install!(base.json()),
			Mode::Pretty => install!(base.pretty()),
			Mode::Compact => install!(base.compact()),
		})
	})?;

	reload(level)
}
