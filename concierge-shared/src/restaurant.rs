use dynomite::Item;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct YelpAddress {
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub display_address: Vec<String>,
}

impl YelpAddress {
    /// Single-line address as shown in suggestion emails.
    pub fn formatted(&self) -> String {
        if !self.display_address.is_empty() {
            return self.display_address.join(", ");
        }
        self.address1.clone().unwrap_or_default()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct YelpBusiness {
    pub id: String,
    pub name: String,
    pub location: YelpAddress,
}

#[derive(Deserialize, Debug, Clone)]
pub struct YelpResponse {
    #[serde(default)]
    pub businesses: Vec<YelpBusiness>,
}

#[derive(Item, Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Restaurant {
    #[dynomite(partition_key)]
    pub business_id: String,
    pub name: String,
    pub address: String,
    pub cuisine: String,
}

impl Restaurant {
    pub fn from_business(business: &YelpBusiness, cuisine: &str) -> Self {
        Restaurant {
            business_id: business.id.clone(),
            name: business.name.clone(),
            address: business.location.formatted(),
            cuisine: cuisine.to_owned(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RestaurantDocument {
    pub business_id: String,
    pub cuisine: String,
}

impl From<&Restaurant> for RestaurantDocument {
    fn from(restaurant: &Restaurant) -> Self {
        RestaurantDocument {
            business_id: restaurant.business_id.clone(),
            cuisine: restaurant.cuisine.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_BODY: &str = r#"{
        "businesses": [
            {
                "id": "WavvLdfdP6g8aZTtbBQHTw",
                "name": "Gary Danko",
                "rating": 4.5,
                "review_count": 5296,
                "location": {
                    "address1": "800 N Point St",
                    "city": "San Francisco",
                    "zip_code": "94109",
                    "display_address": ["800 N Point St", "San Francisco, CA 94109"]
                }
            },
            {
                "id": "no-display",
                "name": "Corner Spot",
                "location": {"address1": "1 Main St"}
            }
        ],
        "total": 2
    }"#;

    #[test]
    fn parses_search_response() {
        let response: YelpResponse = serde_json::from_str(SEARCH_BODY).unwrap();
        assert_eq!(response.businesses.len(), 2);
        assert_eq!(response.businesses[0].name, "Gary Danko");
        assert_eq!(response.businesses[1].location.display_address, Vec::<String>::new());
    }

    #[test]
    fn address_prefers_display_lines() {
        let response: YelpResponse = serde_json::from_str(SEARCH_BODY).unwrap();
        assert_eq!(
            response.businesses[0].location.formatted(),
            "800 N Point St, San Francisco, CA 94109"
        );
        assert_eq!(response.businesses[1].location.formatted(), "1 Main St");
    }

    #[test]
    fn restaurant_carries_requested_cuisine() {
        let response: YelpResponse = serde_json::from_str(SEARCH_BODY).unwrap();
        let restaurant = Restaurant::from_business(&response.businesses[0], "french");
        assert_eq!(restaurant.business_id, "WavvLdfdP6g8aZTtbBQHTw");
        assert_eq!(restaurant.cuisine, "french");

        let document = RestaurantDocument::from(&restaurant);
        assert_eq!(
            serde_json::to_value(&document).unwrap(),
            serde_json::json!({"business_id": "WavvLdfdP6g8aZTtbBQHTw", "cuisine": "french"})
        );
    }

    #[test]
    fn restaurant_round_trips_through_attributes() {
        use dynomite::{Attributes, FromAttributes};

        let restaurant = Restaurant {
            business_id: "abc".to_owned(),
            name: "Pasta Place".to_owned(),
            address: "2 Broadway".to_owned(),
            cuisine: "italian".to_owned(),
        };
        let attrs: Attributes = restaurant.clone().into();
        assert_eq!(attrs["business_id"].s.as_deref(), Some("abc"));
        assert_eq!(Restaurant::from_attrs(attrs).unwrap(), restaurant);
    }
}
