use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Slot name to value; Lex sends `null` for slots it has not filled yet.
pub type Slots = HashMap<String, Option<String>>;
pub type SessionAttributes = HashMap<String, String>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum InvocationSource {
    DialogCodeHook,
    FulfillmentCodeHook,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Bot {
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CurrentIntent {
    pub name: String,
    #[serde(default)]
    pub slots: Slots,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LexEvent {
    pub current_intent: CurrentIntent,
    pub invocation_source: InvocationSource,
    #[serde(default)]
    pub session_attributes: Option<SessionAttributes>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub bot: Option<Bot>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DialogActionMessage {
    #[serde(rename = "contentType")]
    pub content_type: String,
    pub content: String,
}

impl DialogActionMessage {
    pub fn plain(content: impl Into<String>) -> Self {
        DialogActionMessage {
            content_type: "PlainText".to_owned(),
            content: content.into(),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub enum FulfillmentState {
    Fulfilled,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum DialogAction {
    #[serde(rename_all = "camelCase")]
    ElicitSlot {
        intent_name: String,
        slots: Slots,
        slot_to_elicit: String,
        message: DialogActionMessage,
    },
    ElicitIntent {
        message: DialogActionMessage,
    },
    Delegate {
        slots: Slots,
    },
    #[serde(rename_all = "camelCase")]
    Close {
        fulfillment_state: FulfillmentState,
        message: DialogActionMessage,
    },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DialogResponse {
    #[serde(rename = "sessionAttributes", skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<SessionAttributes>,
    #[serde(rename = "dialogAction")]
    pub dialog_action: DialogAction,
}

impl DialogResponse {
    pub fn elicit_intent(content: impl Into<String>) -> Self {
        DialogResponse {
            session_attributes: None,
            dialog_action: DialogAction::ElicitIntent {
                message: DialogActionMessage::plain(content),
            },
        }
    }

    pub fn elicit_slot(
        session_attributes: Option<SessionAttributes>,
        intent_name: &str,
        slots: Slots,
        slot_to_elicit: &str,
        content: impl Into<String>,
    ) -> Self {
        DialogResponse {
            session_attributes,
            dialog_action: DialogAction::ElicitSlot {
                intent_name: intent_name.to_owned(),
                slots,
                slot_to_elicit: slot_to_elicit.to_owned(),
                message: DialogActionMessage::plain(content),
            },
        }
    }

    pub fn delegate(session_attributes: SessionAttributes, slots: Slots) -> Self {
        DialogResponse {
            session_attributes: Some(session_attributes),
            dialog_action: DialogAction::Delegate { slots },
        }
    }

    pub fn close(
        session_attributes: Option<SessionAttributes>,
        fulfillment_state: FulfillmentState,
        content: impl Into<String>,
    ) -> Self {
        DialogResponse {
            session_attributes,
            dialog_action: DialogAction::Close {
                fulfillment_state,
                message: DialogActionMessage::plain(content),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_code_hook_event() {
        let event: LexEvent = serde_json::from_value(json!({
            "messageVersion": "1.0",
            "invocationSource": "DialogCodeHook",
            "userId": "AdamEve",
            "sessionAttributes": null,
            "bot": {"name": "EatWithPleasure", "alias": "DiningBot_SIT", "version": "$LATEST"},
            "outputDialogMode": "Text",
            "currentIntent": {
                "name": "DiningSuggestionsIntent",
                "slots": {"Cuisines": "thai", "NumberOfPeople": null},
                "confirmationStatus": "None"
            },
            "inputTranscript": "thai food please"
        }))
        .unwrap();
        assert_eq!(event.invocation_source, InvocationSource::DialogCodeHook);
        assert_eq!(event.current_intent.slots["Cuisines"].as_deref(), Some("thai"));
        assert_eq!(event.current_intent.slots["NumberOfPeople"], None);
        assert!(event.session_attributes.is_none());
    }

    #[test]
    fn elicit_slot_serializes_in_lex_shape() {
        let mut slots = Slots::new();
        slots.insert("Phone".to_owned(), None);
        let response = DialogResponse::elicit_slot(
            Some(SessionAttributes::new()),
            "DiningSuggestionsIntent",
            slots,
            "Phone",
            "Not a valid input for phone, please try again.",
        );
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({
                "sessionAttributes": {},
                "dialogAction": {
                    "type": "ElicitSlot",
                    "intentName": "DiningSuggestionsIntent",
                    "slots": {"Phone": null},
                    "slotToElicit": "Phone",
                    "message": {
                        "contentType": "PlainText",
                        "content": "Not a valid input for phone, please try again."
                    }
                }
            })
        );
    }

    #[test]
    fn close_carries_fulfillment_state() {
        let response = DialogResponse::close(None, FulfillmentState::Fulfilled, "done");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["dialogAction"]["type"], "Close");
        assert_eq!(value["dialogAction"]["fulfillmentState"], "Fulfilled");
        assert!(value.get("sessionAttributes").is_none());
    }
}
