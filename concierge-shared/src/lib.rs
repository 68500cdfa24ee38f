pub mod config;
pub mod error;
pub mod logging;
pub mod restaurant;
pub mod services;
pub mod suggestion;

pub use error::{ConciergeError, Result};
pub use restaurant::{Restaurant, RestaurantDocument, YelpAddress, YelpBusiness, YelpResponse};
pub use suggestion::{LastSuggestion, SuggestionRequest};
