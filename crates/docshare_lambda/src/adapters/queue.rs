/// Synchronous acknowledgement of a publish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReceipt {
    pub message_id: Option<String>,
}

pub trait NotificationQueue {
    fn publish(&self, message_body: &str) -> Result<PublishReceipt, String>;
}

#[derive(Clone)]
pub struct SqsNotificationQueue {
    queue_url: String,
    sqs_client: aws_sdk_sqs::Client,
}

impl SqsNotificationQueue {
    pub fn new(queue_url: impl Into<String>, sqs_client: aws_sdk_sqs::Client) -> Self {
        Self {
            queue_url: queue_url.into(),
            sqs_client,
        }
    }

    pub fn queue_url(&self) -> &str {
        &self.queue_url
    }
}

impl NotificationQueue for SqsNotificationQueue {
    fn publish(&self, message_body: &str) -> Result<PublishReceipt, String> {
        let body = message_body.to_string();
        let target_queue_url = self.queue_url.clone();
        let client = self.sqs_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .send_message()
                    .queue_url(target_queue_url)
                    .message_body(body)
                    .send()
                    .await
                    .map(|output| PublishReceipt {
                        message_id: output.message_id().map(str::to_string),
                    })
                    .map_err(|error| format!("failed to enqueue notification message: {error}"))
            })
        })
    }
}
