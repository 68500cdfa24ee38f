use std::collections::HashMap;
use std::error::Error;

use concierge_shared::config::BotConfig;
use concierge_shared::logging;
use concierge_shared::services::{BotRuntime, LexBot};
use lambda_runtime::{error::HandlerError, lambda, Context};
use log::{error, info, warn};
use rusoto_core::Region;
use serde::{Deserialize, Serialize};

const FALLBACK_USER_ID: &str = "guest";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct UnstructuredMessage {
    #[serde(default)]
    id: String,
    text: String,
    #[serde(default)]
    timestamp: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct Message {
    #[serde(rename = "type")]
    type_: String,
    unstructured: UnstructuredMessage,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct ChatMessages {
    messages: Vec<Message>,
}

#[derive(Deserialize, Debug)]
struct ProxyEvent {
    #[serde(default)]
    body: Option<String>,
}

#[derive(Serialize, Debug, PartialEq)]
struct ProxyResponse {
    #[serde(rename = "statusCode")]
    status_code: u16,
    headers: HashMap<String, String>,
    body: String,
}

impl ProxyResponse {
    fn new(status_code: u16, body: String) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Access-Control-Allow-Origin".to_owned(), "*".to_owned());
        ProxyResponse {
            status_code,
            headers,
            body,
        }
    }

    fn bad_request(reason: &str) -> Self {
        warn!("Rejecting chat request: {}", reason);
        ProxyResponse::new(400, serde_json::json!({ "error": reason }).to_string())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init();
    lambda!(my_outer_handler);

    Ok(())
}

fn my_outer_handler(e: ProxyEvent, c: Context) -> Result<ProxyResponse, HandlerError> {
    let config = BotConfig::from_env();
    let bot = LexBot::new(Region::default(), &config);
    futures::executor::block_on(my_handler(&bot, &config, e)).map_err(|err| {
        error!("Request {} failed: {}", c.aws_request_id, err);
        HandlerError::from(err.to_string().as_str())
    })
}

async fn my_handler(
    bot: &dyn BotRuntime,
    config: &BotConfig,
    e: ProxyEvent,
) -> concierge_shared::Result<ProxyResponse> {
    let body = match e.body {
        Some(body) => body,
        None => return Ok(ProxyResponse::bad_request("missing body")),
    };
    let input = match serde_json::from_str::<ChatMessages>(&body) {
        Ok(input) => input,
        Err(_) => return Ok(ProxyResponse::bad_request("body is not a chat message list")),
    };
    let first = match input.messages.into_iter().next() {
        Some(message) => message.unstructured,
        None => return Ok(ProxyResponse::bad_request("no messages")),
    };

    let user_id = config
        .user_id
        .clone()
        .or_else(|| Some(first.id.clone()).filter(|id| !id.is_empty()))
        .unwrap_or_else(|| FALLBACK_USER_ID.to_owned());
    info!("Relaying message from {}", user_id);
    let reply = bot.post_text(&user_id, &first.text).await?.unwrap_or_default();

    let output = ChatMessages {
        messages: vec![Message {
            type_: "unstructured".to_owned(),
            unstructured: UnstructuredMessage {
                id: "".to_owned(),
                text: reply,
                timestamp: None,
            },
        }],
    };
    Ok(ProxyResponse::new(200, serde_json::to_string(&output)?))
}
