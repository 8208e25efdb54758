use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{Error, MergeService, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminResponse {
	pub success: bool,
	pub message: String,
}

impl MergeService {
	pub async fn test_connection(&self) -> Result<AdminResponse> {
		self.providers.search.test_connection(&self.cfg.marqo).await.map_err(|err| {
			Error::Provider { message: format!("Connection failed: {err}") }
		})?;

		Ok(AdminResponse { success: true, message: "Connection successful.".to_string() })
	}

	pub fn flush_cache(&self) -> AdminResponse {
		let success = self.cache.flush_all();

		info!(success, "Result cache flush requested.");

		let message = if success { "Cache cleared successfully." } else { "Failed to clear cache." };

		AdminResponse { success, message: message.to_string() }
	}
}
