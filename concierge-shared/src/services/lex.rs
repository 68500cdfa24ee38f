use async_trait::async_trait;
use rusoto_core::Region;
use rusoto_lex_runtime::{LexRuntime, LexRuntimeClient, PostTextRequest};

use super::BotRuntime;
use crate::config::BotConfig;
use crate::error::{ConciergeError, Result};

pub struct LexBot {
    client: LexRuntimeClient,
    bot_name: String,
    bot_alias: String,
}

impl LexBot {
    pub fn new(region: Region, config: &BotConfig) -> Self {
        LexBot {
            client: LexRuntimeClient::new(region),
            bot_name: config.name.clone(),
            bot_alias: config.alias.clone(),
        }
    }
}

#[async_trait]
impl BotRuntime for LexBot {
    async fn post_text(&self, user_id: &str, text: &str) -> Result<Option<String>> {
        let response = self
            .client
            .post_text(PostTextRequest {
                bot_alias: self.bot_alias.clone(),
                bot_name: self.bot_name.clone(),
                input_text: text.to_owned(),
                user_id: user_id.to_owned(),
                ..PostTextRequest::default()
            })
            .await
            .map_err(ConciergeError::bot)?;
        Ok(response.message)
    }
}
