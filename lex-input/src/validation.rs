//! Slot checks for the dining-suggestions intent.
//!
//! Slots are checked in a fixed order and the first violation wins, so the
//! bot re-asks for exactly one slot per turn. Slots Lex has not filled yet
//! are skipped.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::lex::Slots;

pub const CUISINES: [&str; 9] = [
    "indian",
    "thai",
    "turkish",
    "japanese",
    "chinese",
    "italian",
    "french",
    "vietnamese",
    "mexican",
];
pub const LOCATIONS: [&str; 2] = ["new york", "ny"];

pub const MIN_PEOPLE: i64 = 1;
pub const MAX_PEOPLE: i64 = 10;
pub const OPENING_HOUR: u32 = 10;
pub const LAST_SEATING_HOUR: u32 = 16;

const INVALID_TIME: &str = "Not a valid input for time, please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Cuisines,
    NumberOfPeople,
    Date,
    Time,
    Location,
    Email,
    Phone,
}

impl Slot {
    /// Validation order.
    pub const ALL: [Slot; 7] = [
        Slot::Cuisines,
        Slot::NumberOfPeople,
        Slot::Date,
        Slot::Time,
        Slot::Location,
        Slot::Email,
        Slot::Phone,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Slot::Cuisines => "Cuisines",
            Slot::NumberOfPeople => "NumberOfPeople",
            Slot::Date => "Date",
            Slot::Time => "Time",
            Slot::Location => "Location",
            Slot::Email => "Email",
            Slot::Phone => "Phone",
        }
    }

    pub fn value(self, slots: &Slots) -> Option<&str> {
        slots.get(self.name()).and_then(|v| v.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    Valid,
    Invalid { slot: Slot, message: String },
}

pub fn validate(slots: &Slots, today: NaiveDate) -> ValidationOutcome {
    for slot in Slot::ALL.iter().copied() {
        if let Some(value) = slot.value(slots) {
            if let Some(message) = check(slot, value, today) {
                return ValidationOutcome::Invalid { slot, message };
            }
        }
    }
    ValidationOutcome::Valid
}

/// Returns the message to show when `value` is not acceptable for `slot`.
pub fn check(slot: Slot, value: &str, today: NaiveDate) -> Option<String> {
    match slot {
        Slot::Cuisines => check_cuisine(value),
        Slot::NumberOfPeople => check_people(value),
        Slot::Date => check_date(value, today),
        Slot::Time => check_time(value),
        Slot::Location => check_location(value),
        Slot::Email => check_email(value),
        Slot::Phone => check_phone(value),
    }
}

fn check_cuisine(value: &str) -> Option<String> {
    let cuisine = value.to_lowercase();
    if CUISINES.contains(&cuisine.as_str()) {
        None
    } else {
        Some(format!(
            " {} is not in our list of cuisines, can you please try another?",
            value
        ))
    }
}

fn check_people(value: &str) -> Option<String> {
    match value.trim().parse::<i64>() {
        Ok(n) if n > MAX_PEOPLE => Some(format!(
            "You are allowed to have a maximum of {} people to make a reservation, please try again.",
            MAX_PEOPLE
        )),
        Ok(n) if n >= MIN_PEOPLE => None,
        _ => Some(format!(
            "You need to have a minimum of {} to make a reservation, please try again.",
            MIN_PEOPLE
        )),
    }
}

fn check_date(value: &str, today: NaiveDate) -> Option<String> {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Err(_) => Some("The input seems invalid, what date would you like to go dining?".to_owned()),
        Ok(date) if date < today => {
            Some("That date has already passed, what date would you like to go dining?".to_owned())
        }
        Ok(_) => None,
    }
}

/// `None` stands in for a part that is not a number.
fn time_part(part: &str) -> Option<u32> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

fn check_time(value: &str) -> Option<String> {
    if value.chars().count() != 5 {
        return Some(INVALID_TIME.to_owned());
    }
    let (hour, minute) = match value.split_once(':') {
        Some((hour, minute)) => (time_part(hour), time_part(minute)),
        None => (None, None),
    };
    match (hour, minute) {
        (Some(hour), Some(minute)) if minute < 60 => {
            if hour < OPENING_HOUR || hour > LAST_SEATING_HOUR {
                Some("Business hours are from 10am to 4pm, please specify accordingly.".to_owned())
            } else {
                None
            }
        }
        _ => Some(INVALID_TIME.to_owned()),
    }
}

fn check_location(value: &str) -> Option<String> {
    let location = value.to_lowercase();
    if LOCATIONS.contains(&location.as_str()) {
        None
    } else {
        Some("This city is currently not in our range, please try again.".to_owned())
    }
}

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
    })
}

fn check_email(value: &str) -> Option<String> {
    if email_pattern().is_match(value) {
        None
    } else {
        Some("Not a valid input for email, please try again.".to_owned())
    }
}

fn check_phone(value: &str) -> Option<String> {
    if value.chars().count() == 10 {
        None
    } else {
        Some("Not a valid input for phone, please try again.".to_owned())
    }
}
