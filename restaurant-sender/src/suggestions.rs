use concierge_shared::services::RestaurantStore;
use concierge_shared::{Restaurant, Result, SuggestionRequest};
use log::debug;

pub const EMAIL_SUBJECT: &str =
    "Here are your restaurant recommendations brought to you by your Dining Concierge";

/// Restaurants found for a request, plus how many sampled ids could not be
/// turned into a record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuggestionSet {
    pub restaurants: Vec<Restaurant>,
    pub unresolved: usize,
}

impl SuggestionSet {
    pub fn is_partial(&self) -> bool {
        self.unresolved > 0
    }

    /// Numbered lines, counting resolved restaurants only.
    pub fn list_text(&self) -> String {
        self.restaurants
            .iter()
            .enumerate()
            .map(|(i, r)| format!("\n{}. {}, located at {}. ", i + 1, r.name, r.address))
            .collect()
    }
}

pub async fn resolve(store: &dyn RestaurantStore, business_ids: &[String]) -> Result<SuggestionSet> {
    let mut set = SuggestionSet::default();
    for id in business_ids {
        match store.get(id).await? {
            Some(restaurant) => set.restaurants.push(restaurant),
            None => {
                debug!("No record for business {}", id);
                set.unresolved += 1;
            }
        }
    }
    Ok(set)
}

pub fn compose_email(request: &SuggestionRequest, list: &str) -> String {
    format!(
        "Hey there! Here are the {} restaurant suggestions for {} people, on {} at {}: {}\nHope you enjoy your meal!",
        request.cuisine, request.number_of_people, request.date, request.time, list
    )
}
