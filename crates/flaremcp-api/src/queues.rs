// Queues endpoints
//
// Queue management plus the pull-consumer flow: pull leases a batch of
// messages, ack/retry settles them by lease id.

use serde::Serialize;
use tracing::debug;

use crate::client::Client;
use crate::error::Error;
use crate::types::{AckResult, PullMessagesResult, Queue, QueueAck, QueueRetry};

impl Client {
    /// Create a queue.
    ///
    /// `POST /accounts/{account_id}/queues`
    pub async fn create_queue(&self, account_id: &str, queue_name: &str) -> Result<Queue, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            queue_name: &'a str,
        }

        let url = self.url(&format!("accounts/{account_id}/queues"));
        debug!(account_id, queue_name, "creating queue");
        self.post(url, &Body { queue_name }).await
    }

    /// Get a single queue.
    ///
    /// `GET /accounts/{account_id}/queues/{queue_id}`
    pub async fn get_queue(&self, account_id: &str, queue_id: &str) -> Result<Queue, Error> {
        let url = self.url(&format!("accounts/{account_id}/queues/{queue_id}"));
        self.get(url).await
    }

    /// List all queues on the account.
    ///
    /// `GET /accounts/{account_id}/queues`
    pub async fn list_queues(&self, account_id: &str) -> Result<Vec<Queue>, Error> {
        let url = self.url(&format!("accounts/{account_id}/queues"));
        debug!(account_id, "listing queues");
        self.get(url).await
    }

    /// Acknowledge and/or retry leased messages.
    ///
    /// `POST /accounts/{account_id}/queues/{queue_id}/messages/ack`
    ///
    /// `retries: None` omits the retry list from the body entirely.
    pub async fn ack_queue_messages(
        &self,
        account_id: &str,
        queue_id: &str,
        acks: &[QueueAck],
        retries: Option<&[QueueRetry]>,
    ) -> Result<AckResult, Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            acks: &'a [QueueAck],
            #[serde(skip_serializing_if = "Option::is_none")]
            retries: Option<&'a [QueueRetry]>,
        }

        let url = self.url(&format!("accounts/{account_id}/queues/{queue_id}/messages/ack"));
        debug!(
            account_id,
            queue_id,
            ack_count = acks.len(),
            retry_count = retries.map_or(0, <[QueueRetry]>::len),
            "acknowledging queue messages"
        );
        self.post(url, &Body { acks, retries }).await
    }

    /// Pull a batch of messages, leasing them until acked or retried.
    ///
    /// `POST /accounts/{account_id}/queues/{queue_id}/messages/pull`
    pub async fn pull_queue_messages(
        &self,
        account_id: &str,
        queue_id: &str,
        batch_size: Option<u32>,
        visibility_timeout_ms: Option<u64>,
    ) -> Result<PullMessagesResult, Error> {
        #[derive(Serialize)]
        struct Body {
            #[serde(skip_serializing_if = "Option::is_none")]
            batch_size: Option<u32>,
            #[serde(skip_serializing_if = "Option::is_none")]
            visibility_timeout_ms: Option<u64>,
        }

        let url = self.url(&format!(
            "accounts/{account_id}/queues/{queue_id}/messages/pull"
        ));
        debug!(account_id, queue_id, ?batch_size, "pulling queue messages");
        self.post(
            url,
            &Body {
                batch_size,
                visibility_timeout_ms,
            },
        )
        .await
    }
}
