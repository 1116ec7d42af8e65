//! Outbound message senders.

mod log;
mod webhook;

pub use log::TracingSender;
pub use webhook::WebhookSender;
