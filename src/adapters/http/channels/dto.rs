//! Request and response bodies for channel ingress.

use serde::{Deserialize, Serialize};

use crate::adapters::channels::interactive::{InteractiveInput, InteractiveMessage};
use crate::domain::participant::Language;
use crate::domain::registration::RegistrationState;

/// One inbound chat update.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InteractiveEventRequest {
    pub account_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    pub input: InteractiveInput,
}

/// Messages to post back to the chat, plus the flow position for logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractiveEventResponse {
    pub state: RegistrationState,
    pub language: Language,
    pub messages: Vec<InteractiveMessage>,
}
