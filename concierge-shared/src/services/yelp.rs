use async_trait::async_trait;
use log::debug;

use super::{BusinessQuery, BusinessSearch};
use crate::error::Result;
use crate::restaurant::{YelpBusiness, YelpResponse};

pub const YELP_SEARCH_URL: &str = "https://api.yelp.com/v3/businesses/search";

pub struct YelpClient {
    client: reqwest::Client,
    api_key: String,
}

impl YelpClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        YelpClient {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl BusinessSearch for YelpClient {
    async fn search(&self, query: &BusinessQuery) -> Result<Vec<YelpBusiness>> {
        debug!("Querying {} for {:?}", YELP_SEARCH_URL, query);
        let yelp_response = self
            .client
            .get(YELP_SEARCH_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .query(&query.params())
            .send()
            .await?
            .error_for_status()?
            .json::<YelpResponse>()
            .await?;
        Ok(yelp_response.businesses)
    }
}
