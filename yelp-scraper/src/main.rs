mod ingest;

use std::error::Error;

use concierge_shared::config::{SearchIndexConfig, TableConfig, YelpConfig};
use concierge_shared::logging;
use concierge_shared::services::{DynamoRestaurantStore, ElasticSearchIndex, YelpClient};
use log::info;
use rusoto_core::Region;
use simple_error::bail;

use crate::ingest::{Ingestor, CUISINES, NEIGHBORHOODS};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init();
    let yelp = YelpClient::new(YelpConfig::from_env()?.api_key);
    let index = ElasticSearchIndex::new(&SearchIndexConfig::from_env()?)?;
    let store = DynamoRestaurantStore::new(Region::default(), TableConfig::from_env().restaurants);
    let ingestor = Ingestor {
        search: &yelp,
        index: &index,
        store: &store,
    };

    let report = ingestor.ingest_all(&CUISINES, &NEIGHBORHOODS).await;
    for (cuisine, count) in &report.counts {
        info!("{}: {}", cuisine, count);
    }
    info!(
        "Ingested {} restaurants, {} searches failed",
        report.total(),
        report.failed_pairs
    );
    if report.total() == 0 {
        bail!("no restaurants were ingested");
    }
    Ok(())
}
