use std::sync::Arc;

use anyhow::Context;
use tokio::select;
use tokio::signal::unix::{signal, SignalKind};
use tokio_util::sync::CancellationToken;
use utils::logging;

mod api;
mod clock;
mod config;
mod database;
mod global;
mod validation;


#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let (config, file) = config::AppConfig::parse()?;

	logging::init(&config.logging.level, config.logging.mode).context("failed to initialize logging")?;

	if let Some(file) = &file {
		tracing::info!(file = %file.display(), "loaded config from file");
	}

	tracing::debug!("config: {:#?}", config);

	let ctx = CancellationToken::new();
	let global = Arc::new(global::GlobalState::new(config, ctx.clone()));

	let api_future = tokio::spawn(api::run(global.clone()));

	let mut terminate = signal(SignalKind::terminate()).context("failed to listen for SIGTERM")?;

	select! {
		r = api_future => tracing::error!("api stopped unexpectedly: {:?}", r),
		_ = tokio::signal::ctrl_c() => tracing::info!("received interrupt, shutting down"),
		_ = terminate.recv() => tracing::info!("received terminate, shutting down"),
	}

	ctx.cancel();

	tracing::info!("stopped");

	Ok(())
}
