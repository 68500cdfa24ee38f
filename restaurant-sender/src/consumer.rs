use concierge_shared::services::{Mailer, RequestQueue, RestaurantStore, SearchIndex, SuggestionCache};
use concierge_shared::{Result, SuggestionRequest};
use log::{info, warn};
use rand::Rng;
use serde::Serialize;

use crate::sampler::sample_offsets;
use crate::suggestions::{compose_email, resolve, SuggestionSet, EMAIL_SUBJECT};

pub const MAX_MESSAGES: i64 = 10;

pub struct Services<'a> {
    pub index: &'a dyn SearchIndex,
    pub store: &'a dyn RestaurantStore,
    pub cache: &'a dyn SuggestionCache,
    pub queue: &'a dyn RequestQueue,
    pub mailer: &'a dyn Mailer,
}

#[derive(Serialize, Debug, Default, PartialEq)]
pub struct PollSummary {
    pub received: usize,
    pub processed: usize,
    pub skipped: usize,
}

/// One receive from the queue; every parsed request is answered and then
/// deleted. Unparseable messages stay on the queue. An empty list leaves the
/// cached suggestions alone.
pub async fn poll<R: Rng + ?Sized>(services: &Services<'_>, rng: &mut R) -> Result<PollSummary> {
    let messages = services.queue.receive(MAX_MESSAGES).await?;
    let mut summary = PollSummary {
        received: messages.len(),
        ..PollSummary::default()
    };
    if messages.is_empty() {
        info!("Empty Queue");
        return Ok(summary);
    }

    for message in messages {
        let request: SuggestionRequest = match serde_json::from_str(&message.body) {
            Ok(request) => request,
            Err(e) => {
                warn!("Skipping unreadable request {:?}: {}", message.body, e);
                summary.skipped += 1;
                continue;
            }
        };
        let suggestions = suggest(services, &request, rng).await?;
        let list = suggestions.list_text();
        services
            .mailer
            .send_text(&request.email, EMAIL_SUBJECT, &compose_email(&request, &list))
            .await?;
        if suggestions.restaurants.is_empty() {
            info!("Keeping previous suggestions, none found for {}", request.cuisine);
        } else {
            services.cache.store(&list).await?;
        }
        services.queue.delete(&message.receipt_handle).await?;
        summary.processed += 1;
    }
    Ok(summary)
}

pub async fn suggest<R: Rng + ?Sized>(
    services: &Services<'_>,
    request: &SuggestionRequest,
    rng: &mut R,
) -> Result<SuggestionSet> {
    let hits = services.index.count(&request.cuisine).await?;
    let mut business_ids = Vec::new();
    let mut empty_pages = 0;
    for offset in sample_offsets(hits, rng) {
        match services.index.business_id_at(&request.cuisine, offset).await? {
            Some(id) => business_ids.push(id),
            None => empty_pages += 1,
        }
    }

    let mut suggestions = resolve(services.store, &business_ids).await?;
    suggestions.unresolved += empty_pages;
    if suggestions.is_partial() {
        warn!(
            "Only {} of {} sampled {} restaurants resolved",
            suggestions.restaurants.len(),
            suggestions.restaurants.len() + suggestions.unresolved,
            request.cuisine
        );
    }
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_shared::services::memory::{
        MemoryMailer, MemoryQueue, MemoryRestaurantStore, MemorySearchIndex, MemorySuggestionCache,
    };
    use concierge_shared::{LastSuggestion, Restaurant, RestaurantDocument};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ITALIAN_REQUEST: &str = r#"{"cuisine": "italian", "numberOfPeople": "4", "date": "2025-01-01",
        "time": "13:00", "email": "a@b.com", "phone": "1234567890", "location": "new york"}"#;

    struct Fixture {
        index: MemorySearchIndex,
        store: MemoryRestaurantStore,
        cache: MemorySuggestionCache,
        queue: MemoryQueue,
        mailer: MemoryMailer,
    }

    impl Fixture {
        fn with_restaurants(count: usize, stored: usize) -> Self {
            let restaurants: Vec<Restaurant> = (0..count)
                .map(|i| Restaurant {
                    business_id: format!("it-{}", i),
                    name: format!("Trattoria {}", i),
                    address: format!("{} Mulberry St", i + 1),
                    cuisine: "italian".to_owned(),
                })
                .collect();
            Fixture {
                index: MemorySearchIndex::with_documents(
                    restaurants.iter().map(RestaurantDocument::from).collect(),
                ),
                store: MemoryRestaurantStore::with_records(restaurants.into_iter().take(stored).collect()),
                cache: MemorySuggestionCache::default(),
                queue: MemoryQueue::default(),
                mailer: MemoryMailer::default(),
            }
        }

        fn services(&self) -> Services<'_> {
            Services {
                index: &self.index,
                store: &self.store,
                cache: &self.cache,
                queue: &self.queue,
                mailer: &self.mailer,
            }
        }
    }

    #[tokio::test]
    async fn empty_queue_does_nothing() {
        let fixture = Fixture::with_restaurants(5, 5);
        let summary = poll(&fixture.services(), &mut StdRng::seed_from_u64(1)).await.unwrap();
        assert_eq!(summary, PollSummary::default());
        assert!(fixture.mailer.sent().is_empty());
        assert_eq!(fixture.cache.current(), None);
    }

    #[tokio::test]
    async fn request_is_emailed_cached_and_deleted() {
        let fixture = Fixture::with_restaurants(6, 6);
        fixture.queue.send(ITALIAN_REQUEST).await.unwrap();

        let summary = poll(&fixture.services(), &mut StdRng::seed_from_u64(3)).await.unwrap();
        assert_eq!(summary.processed, 1);

        let sent = fixture.mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "a@b.com");
        assert_eq!(sent[0].subject, EMAIL_SUBJECT);
        for expected in &["italian", "4", "2025-01-01", "13:00", "\n1. ", "\n2. ", "\n3. "] {
            assert!(sent[0].body.contains(expected), "missing {:?} in {}", expected, sent[0].body);
        }

        let cached = fixture.cache.current().unwrap();
        assert!(cached.has_suggestions);
        assert!(cached.suggestions.starts_with("\n1. Trattoria "));
        assert!(sent[0].body.contains(&cached.suggestions));

        assert!(fixture.queue.pending().is_empty());
        assert_eq!(fixture.queue.deleted(), vec!["receipt-1".to_owned()]);
    }

    #[tokio::test]
    async fn missing_records_shorten_the_list() {
        // Two hits sample offset 0 only, and nothing is in the record store.
        let fixture = Fixture::with_restaurants(2, 0);
        let request: SuggestionRequest = serde_json::from_str(ITALIAN_REQUEST).unwrap();

        let set = suggest(&fixture.services(), &request, &mut StdRng::seed_from_u64(9))
            .await
            .unwrap();
        assert!(set.restaurants.is_empty());
        assert_eq!(set.unresolved, 1);
    }

    #[tokio::test]
    async fn unknown_cuisine_keeps_previous_suggestions() {
        let previous = LastSuggestion {
            suggestions: "\n1. Trattoria 0, located at 1 Mulberry St. ".to_owned(),
            has_suggestions: true,
        };
        let mut fixture = Fixture::with_restaurants(4, 4);
        fixture.cache = MemorySuggestionCache::with_suggestion(previous.clone());
        fixture
            .queue
            .send(&ITALIAN_REQUEST.replace("italian", "thai"))
            .await
            .unwrap();
        poll(&fixture.services(), &mut StdRng::seed_from_u64(5)).await.unwrap();

        let sent = fixture.mailer.sent();
        assert_eq!(
            sent[0].body,
            "Hey there! Here are the thai restaurant suggestions for 4 people, on 2025-01-01 at 13:00: \nHope you enjoy your meal!"
        );
        assert_eq!(fixture.cache.current(), Some(previous));
        assert_eq!(fixture.queue.deleted(), vec!["receipt-1".to_owned()]);
    }

    #[tokio::test]
    async fn unreadable_messages_stay_queued() {
        let fixture = Fixture::with_restaurants(4, 4);
        fixture.queue.send("{\"cuisine\": ").await.unwrap();
        fixture.queue.send(ITALIAN_REQUEST).await.unwrap();

        let summary = poll(&fixture.services(), &mut StdRng::seed_from_u64(11)).await.unwrap();
        assert_eq!(
            summary,
            PollSummary {
                received: 2,
                processed: 1,
                skipped: 1
            }
        );
        let pending = fixture.queue.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].receipt_handle, "receipt-1");
    }
}
