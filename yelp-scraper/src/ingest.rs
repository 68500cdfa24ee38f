use std::collections::BTreeMap;

use concierge_shared::services::{BusinessQuery, BusinessSearch, RestaurantStore, SearchIndex};
use concierge_shared::{Restaurant, RestaurantDocument, Result};
use itertools::iproduct;
use log::{error, info};

pub const YELP_SEARCH_LIMIT: u32 = 50;
pub const YELP_SEARCH_OFFSET: u32 = 100;
/// Meters.
pub const YELP_SEARCH_RADIUS: u32 = 35000;

pub const CUISINES: [&str; 12] = [
    "indian",
    "italian",
    "chinese",
    "french",
    "thai",
    "vietnamese",
    "mexican",
    "burmese",
    "japanese",
    "persian",
    "turkish",
    "american",
];

pub const NEIGHBORHOODS: [&str; 16] = [
    "Lower East Side, Manhattan",
    "Upper East Side, Manhattan",
    "Upper West Side, Manhattan",
    "Washington Heights, Manhattan",
    "Central Harlem, Manhattan",
    "Chelsea, Manhattan",
    "Manhattan",
    "East Harlem, Manhattan",
    "Gramercy Park, Manhattan",
    "Greenwich, Manhattan",
    "Lower Manhattan, Manhattan",
    "Columbus Circle, Manhattan",
    "Times Square, Manhattan",
    "Hells Kitchen, Manhattan",
    "Midtown, Manhattan",
    "Union Square, Manhattan",
];

pub struct Ingestor<'a> {
    pub search: &'a dyn BusinessSearch,
    pub index: &'a dyn SearchIndex,
    pub store: &'a dyn RestaurantStore,
}

#[derive(Debug, Default, PartialEq)]
pub struct IngestReport {
    pub counts: BTreeMap<String, usize>,
    pub failed_pairs: usize,
}

impl IngestReport {
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl<'a> Ingestor<'a> {
    pub async fn ingest_pair(&self, cuisine: &str, neighborhood: &str) -> Result<usize> {
        let query = BusinessQuery {
            term: cuisine.to_owned(),
            location: neighborhood.to_owned(),
            limit: YELP_SEARCH_LIMIT,
            offset: YELP_SEARCH_OFFSET,
            radius: YELP_SEARCH_RADIUS,
        };
        let restaurants = self
            .search
            .search(&query)
            .await?
            .iter()
            .map(|business| Restaurant::from_business(business, cuisine))
            .collect::<Vec<_>>();
        for restaurant in &restaurants {
            self.index.upsert(&RestaurantDocument::from(restaurant)).await?;
        }
        self.store.put_batch(&restaurants).await?;
        Ok(restaurants.len())
    }

    /// A failing pair is logged and skipped.
    pub async fn ingest_all(&self, cuisines: &[&str], neighborhoods: &[&str]) -> IngestReport {
        let mut report = IngestReport::default();
        for (cuisine, neighborhood) in iproduct!(cuisines.iter(), neighborhoods.iter()) {
            match self.ingest_pair(cuisine, neighborhood).await {
                Ok(count) => {
                    info!("{} {} restaurants in {}", count, cuisine, neighborhood);
                    *report.counts.entry((*cuisine).to_owned()).or_insert(0) += count;
                }
                Err(e) => {
                    error!("Failed {} in {}: {}", cuisine, neighborhood, e);
                    report.failed_pairs += 1;
                }
            }
        }
        report
    }
}
