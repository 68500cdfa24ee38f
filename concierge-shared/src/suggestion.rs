use serde::{Deserialize, Serialize};

/// Key of the single cached-suggestion item.
pub const CACHE_IDENTITY: &str = "1";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub cuisine: String,
    pub number_of_people: String,
    pub date: String,
    pub time: String,
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LastSuggestion {
    pub suggestions: String,
    /// Stored as `isFirstTime`; true once any suggestion has been sent.
    pub has_suggestions: bool,
}
