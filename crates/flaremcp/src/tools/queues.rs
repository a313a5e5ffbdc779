//! Queues tools: queue management plus the pull-consumer flow.

use rmcp::{
    ErrorData as McpError, handler::server::wrapper::Parameters, model::CallToolResult, tool,
    tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;

use flaremcp_api::types::{QueueAck, QueueRetry};

use super::{json_result, upstream_error};
use crate::server::CloudflareServer;
use crate::shape::{AckParam, RetryParam};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateQueueParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "Name for the new queue")]
    pub queue_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct QueueParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "Queue ID")]
    pub queue_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListQueuesParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct AckQueueMessagesParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "Queue ID")]
    pub queue_id: String,
    #[schemars(description = "Messages to acknowledge, by lease ID")]
    pub acks: Vec<AckParam>,
    #[schemars(description = "Messages to retry, optionally delayed")]
    pub retries: Option<Vec<RetryParam>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PullQueueMessagesParams {
    #[schemars(description = "Cloudflare account ID")]
    pub account_id: String,
    #[schemars(description = "Queue ID")]
    pub queue_id: String,
    #[schemars(description = "Maximum number of messages to pull (up to 100)")]
    pub batch_size: Option<u32>,
    #[schemars(description = "How long pulled messages stay leased, in milliseconds")]
    pub visibility_timeout_ms: Option<u64>,
}

#[tool_router(router = queue_tools, vis = "pub(crate)")]
impl CloudflareServer {
    #[tool(description = "Create a queue")]
    pub async fn create_queue(
        &self,
        Parameters(p): Parameters<CreateQueueParams>,
    ) -> Result<CallToolResult, McpError> {
        let queue = self
            .client
            .create_queue(&p.account_id, &p.queue_name)
            .await
            .map_err(upstream_error)?;
        json_result(&queue)
    }

    #[tool(description = "Get details of a queue")]
    pub async fn get_queue(
        &self,
        Parameters(p): Parameters<QueueParams>,
    ) -> Result<CallToolResult, McpError> {
        let queue = self
            .client
            .get_queue(&p.account_id, &p.queue_id)
            .await
            .map_err(upstream_error)?;
        json_result(&queue)
    }

    #[tool(description = "List all queues on the account")]
    pub async fn list_queues(
        &self,
        Parameters(p): Parameters<ListQueuesParams>,
    ) -> Result<CallToolResult, McpError> {
        let queues = self
            .client
            .list_queues(&p.account_id)
            .await
            .map_err(upstream_error)?;
        json_result(&queues)
    }

    #[tool(description = "Acknowledge and/or retry pulled queue messages by lease ID")]
    pub async fn acknowledge_queue_messages(
        &self,
        Parameters(p): Parameters<AckQueueMessagesParams>,
    ) -> Result<CallToolResult, McpError> {
        let acks: Vec<QueueAck> = p.acks.into_iter().map(Into::into).collect();
        let retries: Option<Vec<QueueRetry>> = p
            .retries
            .map(|retries| retries.into_iter().map(Into::into).collect());

        let result = self
            .client
            .ack_queue_messages(&p.account_id, &p.queue_id, &acks, retries.as_deref())
            .await
            .map_err(upstream_error)?;
        json_result(&result)
    }

    #[tool(description = "Pull a batch of messages from a queue, leasing them")]
    pub async fn pull_queue_messages(
        &self,
        Parameters(p): Parameters<PullQueueMessagesParams>,
    ) -> Result<CallToolResult, McpError> {
        let messages = self
            .client
            .pull_queue_messages(
                &p.account_id,
                &p.queue_id,
                p.batch_size,
                p.visibility_timeout_ms,
            )
            .await
            .map_err(upstream_error)?;
        json_result(&messages)
    }
}
