mod intents;
mod lex;
mod validation;

use std::error::Error;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use concierge_shared::config::{self, QueueConfig, TableConfig};
use concierge_shared::services::{DynamoSuggestionCache, SqsRequestQueue};
use concierge_shared::{logging, ConciergeError};
use lambda_runtime::{error::HandlerError, lambda, Context};
use log::error;
use rusoto_core::Region;

use crate::intents::Services;
use crate::lex::{DialogResponse, LexEvent};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init();
    lambda!(my_handler_outer);

    Ok(())
}

fn my_handler_outer(e: serde_json::Value, c: Context) -> Result<DialogResponse, HandlerError> {
    futures::executor::block_on(my_handler(e)).map_err(|err| {
        error!("Request {} failed: {}", c.aws_request_id, err);
        HandlerError::from(err.to_string().as_str())
    })
}

async fn my_handler(e: serde_json::Value) -> concierge_shared::Result<DialogResponse> {
    let tables = TableConfig::from_env();
    let cache = DynamoSuggestionCache::new(Region::default(), tables.suggestions);
    let queue = SqsRequestQueue::new(Region::default(), QueueConfig::from_env().name);
    let services = Services {
        cache: &cache,
        queue: &queue,
        today: today_in(time_zone(&config::time_zone_name())?, Utc::now()),
    };
    handle(e, &services).await
}

async fn handle(e: serde_json::Value, services: &Services<'_>) -> concierge_shared::Result<DialogResponse> {
    let e: LexEvent = serde_json::from_value(e)?;
    intents::dispatch(e, services).await
}

fn time_zone(name: &str) -> concierge_shared::Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| ConciergeError::Config(format!("time zone {}: {}", name, e)))
}

fn today_in(zone: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&zone).naive_local().date()
}
