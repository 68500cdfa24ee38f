use async_trait::async_trait;

use crate::error::Result;
use crate::restaurant::{Restaurant, RestaurantDocument, YelpBusiness};
use crate::suggestion::LastSuggestion;

pub mod dynamo;
pub mod elastic;
pub mod lex;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod ses;
pub mod sqs;
pub mod yelp;

pub use dynamo::{DynamoRestaurantStore, DynamoSuggestionCache};
pub use elastic::ElasticSearchIndex;
pub use lex::LexBot;
pub use ses::SesMailer;
pub use sqs::SqsRequestQueue;
pub use yelp::YelpClient;

/// Parameters of one business-search call.
#[derive(Debug, Clone, PartialEq)]
pub struct BusinessQuery {
    pub term: String,
    pub location: String,
    pub limit: u32,
    pub offset: u32,
    pub radius: u32,
}

impl BusinessQuery {
    pub fn params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("term", self.term.clone()),
            ("location", self.location.clone()),
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("radius", self.radius.to_string()),
        ]
    }
}

#[async_trait]
pub trait BusinessSearch: Send + Sync {
    async fn search(&self, query: &BusinessQuery) -> Result<Vec<YelpBusiness>>;
}

#[async_trait]
pub trait SearchIndex: Send + Sync {
    async fn upsert(&self, document: &RestaurantDocument) -> Result<()>;

    async fn count(&self, cuisine: &str) -> Result<u64>;

    /// Business id of the hit at `offset` among documents matching the
    /// cuisine, if there is one.
    async fn business_id_at(&self, cuisine: &str, offset: u64) -> Result<Option<String>>;
}

#[async_trait]
pub trait RestaurantStore: Send + Sync {
    async fn put_batch(&self, restaurants: &[Restaurant]) -> Result<()>;
    async fn get(&self, business_id: &str) -> Result<Option<Restaurant>>;
}

#[async_trait]
pub trait SuggestionCache: Send + Sync {
    async fn load(&self) -> Result<Option<LastSuggestion>>;

    async fn store(&self, suggestions: &str) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueuedMessage {
    pub body: String,
    pub receipt_handle: String,
}

#[async_trait]
pub trait RequestQueue: Send + Sync {
    async fn send(&self, body: &str) -> Result<()>;
    async fn receive(&self, max_messages: i64) -> Result<Vec<QueuedMessage>>;
    async fn delete(&self, receipt_handle: &str) -> Result<()>;
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_text(&self, to: &str, subject: &str, body: &str) -> Result<()>;
}

#[async_trait]
pub trait BotRuntime: Send + Sync {
    async fn post_text(&self, user_id: &str, text: &str) -> Result<Option<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_query_params_are_in_api_order() {
        let query = BusinessQuery {
            term: "thai".to_owned(),
            location: "Chelsea, Manhattan".to_owned(),
            limit: 50,
            offset: 100,
            radius: 35000,
        };
        let params = query.params();
        assert_eq!(params[0], ("term", "thai".to_owned()));
        assert_eq!(params[1], ("location", "Chelsea, Manhattan".to_owned()));
        assert_eq!(params[3], ("offset", "100".to_owned()));
        assert_eq!(params[4], ("radius", "35000".to_owned()));
    }
}
