use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{
    BotRuntime, BusinessQuery, BusinessSearch, Mailer, QueuedMessage, RequestQueue,
    RestaurantStore, SearchIndex, SuggestionCache,
};
use crate::error::{ConciergeError, Result};
use crate::restaurant::{Restaurant, RestaurantDocument, YelpBusiness};
use crate::suggestion::LastSuggestion;

#[derive(Default)]
pub struct MemoryBusinessSearch {
    results: HashMap<String, Vec<YelpBusiness>>,
    failing_locations: Vec<String>,
    queries: Mutex<Vec<BusinessQuery>>,
}

impl MemoryBusinessSearch {
    pub fn with_results(mut self, term: &str, businesses: Vec<YelpBusiness>) -> Self {
        self.results.insert(term.to_owned(), businesses);
        self
    }

    pub fn failing_for(mut self, location: &str) -> Self {
        self.failing_locations.push(location.to_owned());
        self
    }

    pub fn queries(&self) -> Vec<BusinessQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl BusinessSearch for MemoryBusinessSearch {
    async fn search(&self, query: &BusinessQuery) -> Result<Vec<YelpBusiness>> {
        self.queries.lock().unwrap().push(query.clone());
        if self.failing_locations.contains(&query.location) {
            return Err(ConciergeError::BusinessSearch(format!("500 for {}", query.location)));
        }
        Ok(self.results.get(&query.term).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct MemorySearchIndex {
    documents: Mutex<Vec<RestaurantDocument>>,
}

impl MemorySearchIndex {
    pub fn with_documents(documents: Vec<RestaurantDocument>) -> Self {
        MemorySearchIndex {
            documents: Mutex::new(documents),
        }
    }

    pub fn documents(&self) -> Vec<RestaurantDocument> {
        self.documents.lock().unwrap().clone()
    }

    fn matching(&self, cuisine: &str) -> Vec<RestaurantDocument> {
        self.documents
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.cuisine.eq_ignore_ascii_case(cuisine))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl SearchIndex for MemorySearchIndex {
    async fn upsert(&self, document: &RestaurantDocument) -> Result<()> {
        let mut documents = self.documents.lock().unwrap();
        match documents
            .iter_mut()
            .find(|d| d.business_id == document.business_id)
        {
            Some(existing) => *existing = document.clone(),
            None => documents.push(document.clone()),
        }
        Ok(())
    }

    async fn count(&self, cuisine: &str) -> Result<u64> {
        Ok(self.matching(cuisine).len() as u64)
    }

    async fn business_id_at(&self, cuisine: &str, offset: u64) -> Result<Option<String>> {
        Ok(self
            .matching(cuisine)
            .into_iter()
            .nth(offset as usize)
            .map(|d| d.business_id))
    }
}

#[derive(Default)]
pub struct MemoryRestaurantStore {
    records: Mutex<HashMap<String, Restaurant>>,
}

impl MemoryRestaurantStore {
    pub fn with_records(records: Vec<Restaurant>) -> Self {
        MemoryRestaurantStore {
            records: Mutex::new(
                records
                    .into_iter()
                    .map(|r| (r.business_id.clone(), r))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl RestaurantStore for MemoryRestaurantStore {
    async fn put_batch(&self, restaurants: &[Restaurant]) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        for restaurant in restaurants {
            records.insert(restaurant.business_id.clone(), restaurant.clone());
        }
        Ok(())
    }

    async fn get(&self, business_id: &str) -> Result<Option<Restaurant>> {
        Ok(self.records.lock().unwrap().get(business_id).cloned())
    }
}

#[derive(Default)]
pub struct MemorySuggestionCache {
    current: Mutex<Option<LastSuggestion>>,
}

impl MemorySuggestionCache {
    pub fn with_suggestion(suggestion: LastSuggestion) -> Self {
        MemorySuggestionCache {
            current: Mutex::new(Some(suggestion)),
        }
    }

    pub fn current(&self) -> Option<LastSuggestion> {
        self.current.lock().unwrap().clone()
    }
}

#[async_trait]
impl SuggestionCache for MemorySuggestionCache {
    async fn load(&self) -> Result<Option<LastSuggestion>> {
        Ok(self.current())
    }

    async fn store(&self, suggestions: &str) -> Result<()> {
        *self.current.lock().unwrap() = Some(LastSuggestion {
            suggestions: suggestions.to_owned(),
            has_suggestions: true,
        });
        Ok(())
    }
}

/// Messages stay visible until deleted; the visibility timeout is not modelled.
#[derive(Default)]
pub struct MemoryQueue {
    pending: Mutex<Vec<QueuedMessage>>,
    deleted: Mutex<Vec<String>>,
    sent: Mutex<usize>,
    unreachable: bool,
}

impl MemoryQueue {
    /// Every call fails with a queue error.
    pub fn unreachable() -> Self {
        MemoryQueue {
            unreachable: true,
            ..MemoryQueue::default()
        }
    }

    fn check_reachable(&self) -> Result<()> {
        if self.unreachable {
            return Err(ConciergeError::Queue("queue unreachable".to_owned()));
        }
        Ok(())
    }

    pub fn pending(&self) -> Vec<QueuedMessage> {
        self.pending.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl RequestQueue for MemoryQueue {
    async fn send(&self, body: &str) -> Result<()> {
        self.check_reachable()?;
        let mut sent = self.sent.lock().unwrap();
        *sent += 1;
        self.pending.lock().unwrap().push(QueuedMessage {
            body: body.to_owned(),
            receipt_handle: format!("receipt-{}", sent),
        });
        Ok(())
    }

    async fn receive(&self, max_messages: i64) -> Result<Vec<QueuedMessage>> {
        self.check_reachable()?;
        Ok(self
            .pending
            .lock()
            .unwrap()
            .iter()
            .take(max_messages.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn delete(&self, receipt_handle: &str) -> Result<()> {
        self.check_reachable()?;
        self.pending
            .lock()
            .unwrap()
            .retain(|m| m.receipt_handle != receipt_handle);
        self.deleted.lock().unwrap().push(receipt_handle.to_owned());
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<SentEmail>>,
}

impl MemoryMailer {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send_text(&self, to: &str, subject: &str, body: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_owned(),
            subject: subject.to_owned(),
            body: body.to_owned(),
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBot {
    reply: Option<String>,
    received: Mutex<Vec<(String, String)>>,
}

impl MemoryBot {
    pub fn replying(reply: &str) -> Self {
        MemoryBot {
            reply: Some(reply.to_owned()),
            received: Mutex::new(Vec::new()),
        }
    }

    /// `(user_id, text)` pairs in arrival order.
    pub fn received(&self) -> Vec<(String, String)> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl BotRuntime for MemoryBot {
    async fn post_text(&self, user_id: &str, text: &str) -> Result<Option<String>> {
        self.received
            .lock()
            .unwrap()
            .push((user_id.to_owned(), text.to_owned()));
        Ok(self.reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, cuisine: &str) -> RestaurantDocument {
        RestaurantDocument {
            business_id: id.to_owned(),
            cuisine: cuisine.to_owned(),
        }
    }

    #[tokio::test]
    async fn search_index_filters_by_cuisine_and_pages() {
        let index = MemorySearchIndex::with_documents(vec![
            doc("a", "thai"),
            doc("b", "italian"),
            doc("c", "Thai"),
        ]);
        assert_eq!(index.count("thai").await.unwrap(), 2);
        assert_eq!(index.business_id_at("thai", 1).await.unwrap().as_deref(), Some("c"));
        assert_eq!(index.business_id_at("thai", 2).await.unwrap(), None);
    }

    #[tokio::test]
    async fn upsert_replaces_by_business_id() {
        let index = MemorySearchIndex::default();
        index.upsert(&doc("a", "thai")).await.unwrap();
        index.upsert(&doc("a", "indian")).await.unwrap();
        assert_eq!(index.documents(), vec![doc("a", "indian")]);
    }

    #[tokio::test]
    async fn queue_delete_removes_pending_message() {
        let queue = MemoryQueue::default();
        queue.send("one").await.unwrap();
        queue.send("two").await.unwrap();
        let received = queue.receive(10).await.unwrap();
        assert_eq!(received.len(), 2);

        queue.delete(&received[0].receipt_handle).await.unwrap();
        assert_eq!(queue.pending().len(), 1);
        assert_eq!(queue.pending()[0].body, "two");
        assert_eq!(queue.deleted(), vec!["receipt-1".to_owned()]);
    }
}
