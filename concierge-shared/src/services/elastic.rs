use async_trait::async_trait;
use elasticsearch::{
    auth::Credentials,
    http::{
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
        Url,
    },
    Elasticsearch, IndexParts, SearchParts,
};
use log::debug;
use serde_json::{json, Value};

use super::SearchIndex;
use crate::config::SearchIndexConfig;
use crate::error::{ConciergeError, Result};
use crate::restaurant::RestaurantDocument;

pub struct ElasticSearchIndex {
    client: Elasticsearch,
    index: String,
}

impl ElasticSearchIndex {
    pub fn new(config: &SearchIndexConfig) -> Result<Self> {
        let url = Url::parse(&config.url).map_err(ConciergeError::search_index)?;
        let mut builder = TransportBuilder::new(SingleNodeConnectionPool::new(url));
        if let (Some(user), Some(pass)) = (&config.user, &config.pass) {
            builder = builder.auth(Credentials::Basic(user.clone(), pass.clone()));
        }
        let transport = builder.build().map_err(ConciergeError::search_index)?;
        Ok(ElasticSearchIndex {
            client: Elasticsearch::new(transport),
            index: config.index.clone(),
        })
    }
}

pub fn cuisine_query(cuisine: &str) -> Value {
    json!({ "query": { "match": { "cuisine": cuisine } } })
}

/// Reads `hits.total`, which is an object on 7.x and a bare number before.
pub fn total_hits(body: &Value) -> u64 {
    let total = &body["hits"]["total"];
    total["value"].as_u64().or_else(|| total.as_u64()).unwrap_or(0)
}

pub fn first_business_id(body: &Value) -> Option<String> {
    body["hits"]["hits"][0]["_source"]["business_id"]
        .as_str()
        .map(str::to_owned)
}

fn ensure_success(response: &Response, action: &str) -> Result<()> {
    let status = response.status_code();
    if status.is_success() {
        Ok(())
    } else {
        Err(ConciergeError::SearchIndex(format!("{} returned {}", action, status)))
    }
}

#[async_trait]
impl SearchIndex for ElasticSearchIndex {
    async fn upsert(&self, document: &RestaurantDocument) -> Result<()> {
        let response = self
            .client
            .index(IndexParts::IndexId(&self.index, &document.business_id))
            .body(document)
            .send()
            .await?;
        ensure_success(&response, "index")
    }

    async fn count(&self, cuisine: &str) -> Result<u64> {
        let response = self
            .client
            .search(SearchParts::Index(&[self.index.as_str()]))
            .size(0)
            .body(cuisine_query(cuisine))
            .send()
            .await?;
        ensure_success(&response, "count")?;
        let body = response.json::<Value>().await?;
        let hits = total_hits(&body);
        debug!("{} documents for cuisine {}", hits, cuisine);
        Ok(hits)
    }

    async fn business_id_at(&self, cuisine: &str, offset: u64) -> Result<Option<String>> {
        let response = self
            .client
            .search(SearchParts::Index(&[self.index.as_str()]))
            .from(offset as i64)
            .size(1)
            .body(cuisine_query(cuisine))
            .send()
            .await?;
        ensure_success(&response, "search")?;
        let body = response.json::<Value>().await?;
        Ok(first_business_id(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_total_hits_in_both_shapes() {
        assert_eq!(total_hits(&json!({"hits": {"total": {"value": 42, "relation": "eq"}}})), 42);
        assert_eq!(total_hits(&json!({"hits": {"total": 7}})), 7);
        assert_eq!(total_hits(&json!({"_shards": {"total": 5}})), 0);
    }

    #[test]
    fn extracts_first_hit_business_id() {
        let body = json!({
            "hits": {
                "total": {"value": 12},
                "hits": [{"_id": "x1", "_source": {"business_id": "x1", "cuisine": "thai"}}]
            }
        });
        assert_eq!(first_business_id(&body).as_deref(), Some("x1"));
        assert_eq!(first_business_id(&json!({"hits": {"hits": []}})), None);
    }

    #[test]
    fn cuisine_query_matches_on_cuisine_field() {
        assert_eq!(cuisine_query("thai")["query"]["match"]["cuisine"], "thai");
    }

    #[test]
    fn rejects_bad_url() {
        let config = SearchIndexConfig {
            url: "not a url".to_owned(),
            user: None,
            pass: None,
            index: "restaurants".to_owned(),
        };
        assert!(matches!(
            ElasticSearchIndex::new(&config),
            Err(ConciergeError::SearchIndex(_))
        ));
    }
}
