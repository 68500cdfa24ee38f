mod consumer;
mod sampler;
mod suggestions;

use std::error::Error;

use concierge_shared::config::{MailConfig, QueueConfig, SearchIndexConfig, TableConfig};
use concierge_shared::logging;
use concierge_shared::services::{
    DynamoRestaurantStore, DynamoSuggestionCache, ElasticSearchIndex, SesMailer, SqsRequestQueue,
};
use lambda_runtime::{error::HandlerError, lambda, Context};
use log::{error, info};
use rusoto_core::Region;

use crate::consumer::{PollSummary, Services};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init();
    lambda!(my_handler_outer);

    Ok(())
}

/// Triggered on a schedule; the event payload is not used.
fn my_handler_outer(_e: serde_json::Value, c: Context) -> Result<PollSummary, HandlerError> {
    futures::executor::block_on(my_handler()).map_err(|err| {
        error!("Request {} failed: {}", c.aws_request_id, err);
        HandlerError::from(err.to_string().as_str())
    })
}

async fn my_handler() -> concierge_shared::Result<PollSummary> {
    let tables = TableConfig::from_env();
    let index = ElasticSearchIndex::new(&SearchIndexConfig::from_env()?)?;
    let store = DynamoRestaurantStore::new(Region::default(), tables.restaurants);
    let cache = DynamoSuggestionCache::new(Region::default(), tables.suggestions);
    let queue = SqsRequestQueue::new(Region::default(), QueueConfig::from_env().name);
    let mailer = SesMailer::new(Region::default(), MailConfig::from_env()?.sender);
    let services = Services {
        index: &index,
        store: &store,
        cache: &cache,
        queue: &queue,
        mailer: &mailer,
    };
    let summary = consumer::poll(&services, &mut rand::thread_rng()).await?;
    info!("{:?}", summary);
    Ok(summary)
}
