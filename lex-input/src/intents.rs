use std::str::FromStr;

use chrono::NaiveDate;
use concierge_shared::services::{RequestQueue, SuggestionCache};
use concierge_shared::{ConciergeError, Result, SuggestionRequest};
use log::{debug, info};

use crate::lex::{DialogResponse, FulfillmentState, InvocationSource, LexEvent, Slots};
use crate::validation::{self, Slot, ValidationOutcome};

pub const GREETING: &str = "Hi, how can I help?";
pub const WELCOME_BACK: &str =
    "Welcome back! Here are some suggestions from your previous time here! \n";
pub const THANK_YOU: &str = "Happy to Help!";
pub const FULFILLED: &str = "Great! You will receive your suggestions over Email shortly.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    DiningSuggestions,
    ThankYou,
}

impl FromStr for Intent {
    type Err = ConciergeError;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "GreetingIntent" => Ok(Intent::Greeting),
            "DiningSuggestionsIntent" => Ok(Intent::DiningSuggestions),
            "ThankYouIntent" => Ok(Intent::ThankYou),
            other => Err(ConciergeError::UnknownIntent(other.to_owned())),
        }
    }
}

pub struct Services<'a> {
    pub cache: &'a dyn SuggestionCache,
    pub queue: &'a dyn RequestQueue,
    /// Local date requests are checked against.
    pub today: NaiveDate,
}

pub async fn dispatch(event: LexEvent, services: &Services<'_>) -> Result<DialogResponse> {
    let intent = event.current_intent.name.parse::<Intent>()?;
    debug!(
        "bot={:?} userId={:?} intent={:?} source={:?}",
        event.bot.as_ref().map(|b| b.name.as_str()),
        event.user_id,
        intent,
        event.invocation_source
    );
    match intent {
        Intent::Greeting => greet(services.cache).await,
        Intent::DiningSuggestions => collect_dining_request(event, services).await,
        Intent::ThankYou => Ok(DialogResponse::elicit_intent(THANK_YOU)),
    }
}

async fn greet(cache: &dyn SuggestionCache) -> Result<DialogResponse> {
    match cache.load().await? {
        Some(last) if last.has_suggestions => Ok(DialogResponse::elicit_intent(format!(
            "{}{}",
            WELCOME_BACK, last.suggestions
        ))),
        _ => Ok(DialogResponse::elicit_intent(GREETING)),
    }
}

async fn collect_dining_request(event: LexEvent, services: &Services<'_>) -> Result<DialogResponse> {
    let LexEvent {
        current_intent,
        invocation_source,
        session_attributes,
        ..
    } = event;
    let mut slots = current_intent.slots;

    if let ValidationOutcome::Invalid { slot, message } = validation::validate(&slots, services.today)
    {
        info!("Re-eliciting {}: {}", slot.name(), message.trim());
        slots.insert(slot.name().to_owned(), None);
        return Ok(DialogResponse::elicit_slot(
            session_attributes,
            &current_intent.name,
            slots,
            slot.name(),
            message,
        ));
    }

    match invocation_source {
        InvocationSource::DialogCodeHook => Ok(DialogResponse::delegate(
            session_attributes.unwrap_or_default(),
            slots,
        )),
        InvocationSource::FulfillmentCodeHook => {
            let request = suggestion_request(&slots)?;
            services.queue.send(&serde_json::to_string(&request)?).await?;
            info!("Queued {} request for {}", request.cuisine, request.email);
            Ok(DialogResponse::close(
                session_attributes,
                FulfillmentState::Fulfilled,
                FULFILLED,
            ))
        }
    }
}

fn required(slots: &Slots, slot: Slot) -> Result<String> {
    slot.value(slots)
        .map(str::to_owned)
        .ok_or_else(|| ConciergeError::MissingSlot(slot.name().to_owned()))
}

fn suggestion_request(slots: &Slots) -> Result<SuggestionRequest> {
    Ok(SuggestionRequest {
        cuisine: required(slots, Slot::Cuisines)?,
        number_of_people: required(slots, Slot::NumberOfPeople)?,
        date: required(slots, Slot::Date)?,
        time: required(slots, Slot::Time)?,
        email: required(slots, Slot::Email)?,
        phone: required(slots, Slot::Phone)?,
        location: required(slots, Slot::Location)?,
    })
}
