// Hyperdrive endpoints
//
// Connection-pooling config management under
// /accounts/{account_id}/hyperdrive/configs. Origin and caching shapes
// are built by the caller (see the MCP crate's request shaper).

use serde_json::Value;
use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::types::{HyperdriveConfig, HyperdriveConfigCreate, HyperdriveConfigPatch};

impl Client {
    /// Create a Hyperdrive configuration.
    ///
    /// `POST /accounts/{account_id}/hyperdrive/configs`
    pub async fn create_hyperdrive_config(
        &self,
        account_id: &str,
        config: &HyperdriveConfigCreate,
    ) -> Result<HyperdriveConfig, Error> {
        let url = self.url(&format!("accounts/{account_id}/hyperdrive/configs"));
        debug!(account_id, name = %config.name, "creating Hyperdrive config");
        self.post(url, config).await
    }

    /// List all Hyperdrive configurations on the account.
    ///
    /// `GET /accounts/{account_id}/hyperdrive/configs`
    pub async fn list_hyperdrive_configs(
        &self,
        account_id: &str,
    ) -> Result<Vec<HyperdriveConfig>, Error> {
        let url = self.url(&format!("accounts/{account_id}/hyperdrive/configs"));
        self.get(url).await
    }

    /// Get a single Hyperdrive configuration.
    ///
    /// `GET /accounts/{account_id}/hyperdrive/configs/{hyperdrive_id}`
    pub async fn get_hyperdrive_config(
        &self,
        account_id: &str,
        hyperdrive_id: &str,
    ) -> Result<HyperdriveConfig, Error> {
        let url = self.url(&format!(
            "accounts/{account_id}/hyperdrive/configs/{hyperdrive_id}"
        ));
        self.get(url).await
    }

    /// Partially update a Hyperdrive configuration.
    ///
    /// `PATCH /accounts/{account_id}/hyperdrive/configs/{hyperdrive_id}`
    pub async fn edit_hyperdrive_config(
        &self,
        account_id: &str,
        hyperdrive_id: &str,
        patch: &HyperdriveConfigPatch,
    ) -> Result<HyperdriveConfig, Error> {
        let url = self.url(&format!(
            "accounts/{account_id}/hyperdrive/configs/{hyperdrive_id}"
        ));
        debug!(account_id, hyperdrive_id, "editing Hyperdrive config");
        self.patch(url, patch).await
    }

    /// Delete a Hyperdrive configuration.
    ///
    /// `DELETE /accounts/{account_id}/hyperdrive/configs/{hyperdrive_id}`
    pub async fn delete_hyperdrive_config(
        &self,
        account_id: &str,
        hyperdrive_id: &str,
    ) -> Result<Value, Error> {
        let url = self.url(&format!(
            "accounts/{account_id}/hyperdrive/configs/{hyperdrive_id}"
        ));
        debug!(account_id, hyperdrive_id, "deleting Hyperdrive config");
        self.delete(url).await
    }
}
