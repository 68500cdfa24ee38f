use std::sync::Mutex;

use async_trait::async_trait;
use log::{debug, info, warn};
use rusoto_core::Region;
use rusoto_sqs::{
    DeleteMessageRequest, GetQueueUrlRequest, ReceiveMessageRequest, SendMessageRequest, Sqs,
    SqsClient,
};

use super::{QueuedMessage, RequestQueue};
use crate::error::{ConciergeError, Result};

pub const VISIBILITY_TIMEOUT_SECONDS: i64 = 30;

pub struct SqsRequestQueue {
    client: SqsClient,
    queue_name: String,
    queue_url: Mutex<Option<String>>,
}

impl SqsRequestQueue {
    /// The queue url is looked up by name on first use.
    pub fn new(region: Region, queue_name: impl Into<String>) -> Self {
        SqsRequestQueue {
            client: SqsClient::new(region),
            queue_name: queue_name.into(),
            queue_url: Mutex::new(None),
        }
    }

    async fn queue_url(&self) -> Result<String> {
        if let Some(url) = self.cached_url()? {
            return Ok(url);
        }
        let url = self
            .client
            .get_queue_url(GetQueueUrlRequest {
                queue_name: self.queue_name.clone(),
                ..GetQueueUrlRequest::default()
            })
            .await
            .map_err(ConciergeError::queue)?
            .queue_url
            .ok_or_else(|| ConciergeError::Queue(format!("no url for queue {}", self.queue_name)))?;
        debug!("Resolved queue {} to {}", self.queue_name, url);
        *self.queue_url.lock().map_err(ConciergeError::queue)? = Some(url.clone());
        Ok(url)
    }

    fn cached_url(&self) -> Result<Option<String>> {
        Ok(self.queue_url.lock().map_err(ConciergeError::queue)?.clone())
    }
}

#[async_trait]
impl RequestQueue for SqsRequestQueue {
    async fn send(&self, body: &str) -> Result<()> {
        let result = self
            .client
            .send_message(SendMessageRequest {
                message_body: body.to_owned(),
                queue_url: self.queue_url().await?,
                ..SendMessageRequest::default()
            })
            .await
            .map_err(ConciergeError::queue)?;
        info!("Queued request {:?}", result.message_id);
        Ok(())
    }

    async fn receive(&self, max_messages: i64) -> Result<Vec<QueuedMessage>> {
        let result = self
            .client
            .receive_message(ReceiveMessageRequest {
                queue_url: self.queue_url().await?,
                attribute_names: Some(vec!["All".to_owned()]),
                message_attribute_names: Some(vec!["All".to_owned()]),
                max_number_of_messages: Some(max_messages),
                visibility_timeout: Some(VISIBILITY_TIMEOUT_SECONDS),
                wait_time_seconds: Some(0),
                ..ReceiveMessageRequest::default()
            })
            .await
            .map_err(ConciergeError::queue)?;
        let messages = result
            .messages
            .unwrap_or_default()
            .into_iter()
            .filter_map(|message| match (message.body, message.receipt_handle) {
                (Some(body), Some(receipt_handle)) => Some(QueuedMessage { body, receipt_handle }),
                _ => {
                    warn!("Dropping message {:?} without body or receipt", message.message_id);
                    None
                }
            })
            .collect();
        Ok(messages)
    }

    async fn delete(&self, receipt_handle: &str) -> Result<()> {
        self.client
            .delete_message(DeleteMessageRequest {
                queue_url: self.queue_url().await?,
                receipt_handle: receipt_handle.to_owned(),
            })
            .await
            .map_err(ConciergeError::queue)
    }
}
