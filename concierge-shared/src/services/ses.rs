use async_trait::async_trait;
use log::info;
use rusoto_core::Region;
use rusoto_ses::{Body, Content, Destination, Message, SendEmailRequest, Ses, SesClient};

use super::Mailer;
use crate::error::{ConciergeError, Result};

const CHARSET: &str = "UTF-8";

fn content(data: &str) -> Content {
    Content {
        charset: Some(CHARSET.to_owned()),
        data: data.to_owned(),
    }
}

pub struct SesMailer {
    client: SesClient,
    sender: String,
}

impl SesMailer {
    pub fn new(region: Region, sender: impl Into<String>) -> Self {
        SesMailer {
            client: SesClient::new(region),
            sender: sender.into(),
        }
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send_text(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        let response = self
            .client
            .send_email(SendEmailRequest {
                source: self.sender.clone(),
                destination: Destination {
                    to_addresses: Some(vec![to.to_owned()]),
                    ..Destination::default()
                },
                message: Message {
                    subject: content(subject),
                    body: Body {
                        text: Some(content(body)),
                        html: None,
                    },
                },
                ..SendEmailRequest::default()
            })
            .await
            .map_err(ConciergeError::email)?;
        info!("Sent suggestions to {} ({})", to, response.message_id);
        Ok(())
    }
}
