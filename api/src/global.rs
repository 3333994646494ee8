use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::clock::{Clock, SystemClock};
use crate::config::AppConfig;
use crate::database::Store;

pub struct GlobalState {
	pub config: AppConfig,
	pub ctx: CancellationToken,
	pub clock: Arc<dyn Clock>,
	pub store: Store,
}

impl GlobalState {
	pub fn new(config: AppConfig, ctx: CancellationToken) -> Self {
		Self {
			config,
			ctx,
			clock: Arc::new(SystemClock),
			store: Store::new(),
		}
	}

	pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
		self.clock = clock;
		self
	}
}
