//! Channel bindings of the registration flow.
//!
//! Each binding decodes channel-native input into a [`RegistrationEvent`] and
//! encodes the engine's abstract replies into the channel's message format.
//!
//! - `interactive` - Button-driven chat (commands, callbacks, free text)
//! - `email` - Free-text replies to emails
//! - `keywords` - Shared multilingual vocabulary
//! - `qr` - Scannable credential images
//!
//! [`RegistrationEvent`]: crate::domain::registration::RegistrationEvent

pub mod email;
pub mod interactive;
pub mod keywords;
pub mod qr;

use crate::domain::localization::{render, text, TextKey};
use crate::domain::participant::Language;
use crate::domain::registration::{MenuAction, Reply, ReplyKind};
use crate::domain::scheduling::DateOffer;

/// Localized body of one reply, without channel controls.
pub fn reply_text(reply: &Reply) -> String {
    let mut body = render(reply.language, reply.text_key(), &reply.params());
    match &reply.kind {
        ReplyKind::Credentials { .. } => {
            body.push_str("\n\n");
            body.push_str(&render(reply.language, TextKey::CredentialLine, &reply.params()));
        }
        ReplyKind::Menu {
            summary: Some(summary),
        } => {
            let summary = render(
                reply.language,
                TextKey::MenuSummary,
                &reply.summary_params(summary),
            );
            body = format!("{}\n\n{}", summary, body);
        }
        _ => {}
    }
    body
}

/// `Tomorrow (Friday) - 16.10.2026 (12/290)`, or the full marker instead of
/// the count.
pub fn offer_caption(reply: &Reply, offer: &DateOffer) -> String {
    let label = reply.offer_label(offer);
    if offer.is_full() {
        format!("{} {}", label, text(reply.language, TextKey::Full))
    } else {
        format!("{} ({}/{})", label, offer.count, offer.cap)
    }
}

/// Label of a menu action in `language`.
pub fn menu_label(language: Language, action: MenuAction) -> &'static str {
    let key = match action {
        MenuAction::RemindId => TextKey::BtnRemindId,
        MenuAction::RemindCode => TextKey::BtnRemindCode,
        MenuAction::RemindDate => TextKey::BtnRemindDate,
        MenuAction::Reschedule => TextKey::BtnReschedule,
        MenuAction::HowToActivate => TextKey::BtnHowToActivate,
        MenuAction::Instruction => TextKey::BtnInstruction,
        MenuAction::ChangeLanguage => TextKey::BtnChangeLanguage,
        MenuAction::Show => TextKey::BtnBackToMenu,
    };
    text(language, key)
}
