use std::collections::HashMap;

use async_trait::async_trait;
use dynomite::{
    dynamodb::{
        AttributeValue, BatchWriteItemInput, DynamoDb, DynamoDbClient, GetItemInput, PutRequest,
        UpdateItemInput, WriteRequest,
    },
    Attributes, FromAttributes,
};
use log::{info, warn};
use rusoto_core::Region;

use super::{RestaurantStore, SuggestionCache};
use crate::error::{ConciergeError, Result};
use crate::restaurant::Restaurant;
use crate::suggestion::{LastSuggestion, CACHE_IDENTITY};

/// DynamoDB caps a batch write at 25 items.
pub const BATCH_WRITE_LIMIT: usize = 25;

fn string_attr(value: &str) -> AttributeValue {
    AttributeValue {
        s: Some(value.to_owned()),
        ..AttributeValue::default()
    }
}

fn bool_attr(value: bool) -> AttributeValue {
    AttributeValue {
        bool: Some(value),
        ..AttributeValue::default()
    }
}

fn key(name: &str, value: &str) -> Attributes {
    let mut key = HashMap::new();
    key.insert(name.to_owned(), string_attr(value));
    key
}

pub fn batch_write_inputs(table: &str, restaurants: &[Restaurant]) -> Vec<BatchWriteItemInput> {
    restaurants
        .chunks(BATCH_WRITE_LIMIT)
        .map(|chunk| {
            let writes = chunk
                .iter()
                .map(|restaurant| WriteRequest {
                    put_request: Some(PutRequest {
                        item: restaurant.clone().into(),
                    }),
                    ..WriteRequest::default()
                })
                .collect::<Vec<_>>();
            let mut request_items = HashMap::new();
            request_items.insert(table.to_owned(), writes);
            BatchWriteItemInput {
                request_items,
                ..BatchWriteItemInput::default()
            }
        })
        .collect()
}

pub struct DynamoRestaurantStore {
    client: DynamoDbClient,
    table: String,
}

impl DynamoRestaurantStore {
    pub fn new(region: Region, table: impl Into<String>) -> Self {
        DynamoRestaurantStore {
            client: DynamoDbClient::new(region),
            table: table.into(),
        }
    }
}

#[async_trait]
impl RestaurantStore for DynamoRestaurantStore {
    async fn put_batch(&self, restaurants: &[Restaurant]) -> Result<()> {
        for input in batch_write_inputs(&self.table, restaurants) {
            let output = self
                .client
                .batch_write_item(input)
                .await
                .map_err(ConciergeError::record_store)?;
            let unprocessed = output
                .unprocessed_items
                .map(|items| items.values().map(Vec::len).sum::<usize>())
                .unwrap_or(0);
            if unprocessed > 0 {
                warn!("{} restaurant writes left unprocessed in {}", unprocessed, self.table);
            }
        }
        Ok(())
    }

    async fn get(&self, business_id: &str) -> Result<Option<Restaurant>> {
        let output = self
            .client
            .get_item(GetItemInput {
                table_name: self.table.clone(),
                key: key("business_id", business_id),
                ..GetItemInput::default()
            })
            .await
            .map_err(ConciergeError::record_store)?;
        output
            .item
            .map(Restaurant::from_attrs)
            .transpose()
            .map_err(ConciergeError::record_store)
    }
}

pub struct DynamoSuggestionCache {
    client: DynamoDbClient,
    table: String,
}

impl DynamoSuggestionCache {
    pub fn new(region: Region, table: impl Into<String>) -> Self {
        DynamoSuggestionCache {
            client: DynamoDbClient::new(region),
            table: table.into(),
        }
    }
}

pub fn last_suggestion_from(item: &Attributes) -> LastSuggestion {
    LastSuggestion {
        suggestions: item
            .get("suggestions")
            .and_then(|v| v.s.clone())
            .unwrap_or_default(),
        has_suggestions: item.get("isFirstTime").and_then(|v| v.bool).unwrap_or(false),
    }
}

pub fn cache_update_input(table: &str, suggestions: &str) -> UpdateItemInput {
    let mut values = HashMap::new();
    values.insert(":r".to_owned(), bool_attr(true));
    values.insert(":p".to_owned(), string_attr(suggestions));
    UpdateItemInput {
        table_name: table.to_owned(),
        key: key("identity", CACHE_IDENTITY),
        update_expression: Some("set isFirstTime = :r, suggestions = :p".to_owned()),
        expression_attribute_values: Some(values),
        return_values: Some("UPDATED_NEW".to_owned()),
        ..UpdateItemInput::default()
    }
}

#[async_trait]
impl SuggestionCache for DynamoSuggestionCache {
    async fn load(&self) -> Result<Option<LastSuggestion>> {
        let output = self
            .client
            .get_item(GetItemInput {
                table_name: self.table.clone(),
                key: key("identity", CACHE_IDENTITY),
                ..GetItemInput::default()
            })
            .await
            .map_err(ConciergeError::record_store)?;
        Ok(output.item.as_ref().map(last_suggestion_from))
    }

    async fn store(&self, suggestions: &str) -> Result<()> {
        self.client
            .update_item(cache_update_input(&self.table, suggestions))
            .await
            .map_err(ConciergeError::record_store)?;
        info!("Cached latest suggestions in {}", self.table);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_cache_item_attributes() {
        let mut item = key("identity", CACHE_IDENTITY);
        item.insert("suggestions".to_owned(), string_attr("\n1. Thai Villa, located at 5 E 19th St. "));
        item.insert("isFirstTime".to_owned(), bool_attr(true));
        let last = last_suggestion_from(&item);
        assert!(last.has_suggestions);
        assert!(last.suggestions.contains("Thai Villa"));
    }

    #[test]
    fn missing_cache_attributes_mean_no_suggestion() {
        let last = last_suggestion_from(&key("identity", CACHE_IDENTITY));
        assert_eq!(last, LastSuggestion::default());
    }

    #[test]
    fn restaurant_writes_are_split_into_batches_of_25() {
        let restaurants: Vec<Restaurant> = (0..60)
            .map(|i| Restaurant {
                business_id: format!("id-{}", i),
                name: format!("Noodle Bar {}", i),
                address: "1 Canal St".to_owned(),
                cuisine: "chinese".to_owned(),
            })
            .collect();
        let inputs = batch_write_inputs("yelp-restaurants", &restaurants);
        let sizes: Vec<usize> = inputs
            .iter()
            .map(|input| input.request_items["yelp-restaurants"].len())
            .collect();
        assert_eq!(sizes, vec![25, 25, 10]);

        let last = &inputs[2].request_items["yelp-restaurants"][9];
        let item = &last.put_request.as_ref().unwrap().item;
        assert_eq!(item["business_id"].s.as_deref(), Some("id-59"));
        assert_eq!(item["cuisine"].s.as_deref(), Some("chinese"));
    }

    #[test]
    fn no_restaurants_means_no_batches() {
        assert!(batch_write_inputs("yelp-restaurants", &[]).is_empty());
    }

    #[test]
    fn cache_update_marks_suggestions_present() {
        let list = "\n1. Thai Villa, located at 5 E 19th St. ";
        let input = cache_update_input("StateOfUserSuggestions", list);
        assert_eq!(input.table_name, "StateOfUserSuggestions");
        assert_eq!(input.key["identity"].s.as_deref(), Some(CACHE_IDENTITY));
        assert_eq!(
            input.update_expression.as_deref(),
            Some("set isFirstTime = :r, suggestions = :p")
        );

        // What a later read sees once the update is applied.
        let mut item = input.key.clone();
        let values = input.expression_attribute_values.unwrap();
        item.insert("isFirstTime".to_owned(), values[":r"].clone());
        item.insert("suggestions".to_owned(), values[":p"].clone());
        assert_eq!(
            last_suggestion_from(&item),
            LastSuggestion {
                suggestions: list.to_owned(),
                has_suggestions: true,
            }
        );
    }
}
