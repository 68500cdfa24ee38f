use crate::error::{ConciergeError, Result};

pub const DEFAULT_ES_INDEX: &str = "restaurants";
pub const DEFAULT_RESTAURANT_TABLE: &str = "yelp-restaurants";
pub const DEFAULT_SUGGESTION_TABLE: &str = "StateOfUserSuggestions";
pub const DEFAULT_QUEUE_NAME: &str = "DiningSuggestionsQueue";
pub const DEFAULT_BOT_NAME: &str = "DiningBot";
pub const DEFAULT_BOT_ALIAS: &str = "DiningBot_SIT";
pub const DEFAULT_TIME_ZONE: &str = "America/New_York";

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn required<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str) -> Result<String> {
    lookup(key).ok_or_else(|| ConciergeError::Config(key.to_owned()))
}

fn or_default<F: Fn(&str) -> Option<String>>(lookup: &F, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_owned())
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchIndexConfig {
    pub url: String,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub index: String,
}

impl SearchIndexConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        Ok(Self {
            url: required(&lookup, "ES_URL")?,
            user: lookup("ES_USER"),
            pass: lookup("ES_PASS"),
            index: or_default(&lookup, "ES_INDEX", DEFAULT_ES_INDEX),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    pub restaurants: String,
    pub suggestions: String,
}

impl TableConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        Self {
            restaurants: or_default(&lookup, "RESTAURANT_TABLE", DEFAULT_RESTAURANT_TABLE),
            suggestions: or_default(&lookup, "SUGGESTION_TABLE", DEFAULT_SUGGESTION_TABLE),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueueConfig {
    pub name: String,
}

impl QueueConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        Self {
            name: or_default(&lookup, "QUEUE_NAME", DEFAULT_QUEUE_NAME),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MailConfig {
    pub sender: String,
}

impl MailConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        Ok(Self {
            sender: required(&lookup, "SENDER_EMAIL")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YelpConfig {
    pub api_key: String,
}

impl YelpConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self> {
        Ok(Self {
            api_key: required(&lookup, "YELP_API_KEY")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub name: String,
    pub alias: String,
    /// Fixed Lex user id. When unset the chat message id is used.
    pub user_id: Option<String>,
}

impl BotConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        Self {
            name: or_default(&lookup, "LEX_BOT_NAME", DEFAULT_BOT_NAME),
            alias: or_default(&lookup, "LEX_BOT_ALIAS", DEFAULT_BOT_ALIAS),
            user_id: lookup("LEX_USER_ID"),
        }
    }
}

/// IANA zone name used to decide what "today" is for date validation.
pub fn time_zone_name() -> String {
    time_zone_name_from(env_lookup)
}

pub fn time_zone_name_from<F: Fn(&str) -> Option<String>>(lookup: F) -> String {
    or_default(&lookup, "CONCIERGE_TIME_ZONE", DEFAULT_TIME_ZONE)
}
