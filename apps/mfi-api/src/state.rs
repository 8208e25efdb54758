use std::sync::Arc;

use mfi_service::MergeService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<MergeService>,
}
impl AppState {
	pub fn new(config: mfi_config::Config) -> Self {
		Self { service: Arc::new(MergeService::new(config)) }
	}
}
