// DNS record endpoints
//
// CRUD over /zones/{zone_id}/dns_records. Edits use PATCH so omitted
// fields keep their stored values.

use serde_json::Value;
use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::types::{DnsRecord, DnsRecordWrite};

impl Client {
    /// List all DNS records in a zone.
    ///
    /// `GET /zones/{zone_id}/dns_records`
    pub async fn list_dns_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>, Error> {
        let url = self.url(&format!("zones/{zone_id}/dns_records"));
        debug!(zone_id, "listing DNS records");
        self.get(url).await
    }

    /// Create a DNS record.
    ///
    /// `POST /zones/{zone_id}/dns_records`
    pub async fn create_dns_record(
        &self,
        zone_id: &str,
        record: &DnsRecordWrite,
    ) -> Result<DnsRecord, Error> {
        let url = self.url(&format!("zones/{zone_id}/dns_records"));
        debug!(zone_id, name = ?record.name, "creating DNS record");
        self.post(url, record).await
    }

    /// Edit an existing DNS record.
    ///
    /// `PATCH /zones/{zone_id}/dns_records/{record_id}`
    pub async fn edit_dns_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &DnsRecordWrite,
    ) -> Result<DnsRecord, Error> {
        let url = self.url(&format!("zones/{zone_id}/dns_records/{record_id}"));
        debug!(zone_id, record_id, "editing DNS record");
        self.patch(url, record).await
    }

    /// Delete a DNS record.
    ///
    /// `DELETE /zones/{zone_id}/dns_records/{record_id}`
    pub async fn delete_dns_record(&self, zone_id: &str, record_id: &str) -> Result<Value, Error> {
        let url = self.url(&format!("zones/{zone_id}/dns_records/{record_id}"));
        debug!(zone_id, record_id, "deleting DNS record");
        self.delete(url).await
    }
}
