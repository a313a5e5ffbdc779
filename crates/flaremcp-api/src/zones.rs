// Zone endpoints
//
// Zone listing and cache purge. Purge is the nuclear "purge everything"
// variant; selective purge-by-URL is not exposed.

use serde_json::{Value, json};
use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::types::Zone;

impl Client {
    /// List all zones on the account.
    ///
    /// `GET /zones`
    pub async fn list_zones(&self) -> Result<Vec<Zone>, Error> {
        let url = self.url("zones");
        debug!("listing zones");
        self.get(url).await
    }

    /// Purge the entire cache for a zone.
    ///
    /// `POST /zones/{zone_id}/purge_cache` with `{"purge_everything": true}`
    pub async fn purge_cache(&self, zone_id: &str) -> Result<Value, Error> {
        let url = self.url(&format!("zones/{zone_id}/purge_cache"));
        debug!(zone_id, "purging cache");
        self.post(url, &json!({ "purge_everything": true })).await
    }
}
