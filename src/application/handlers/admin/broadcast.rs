//! Audience resolution and broadcast.
//!
//! Delivery is best effort: each failed send is logged and counted, never
//! propagated, and never touches participant state.

use std::sync::Arc;

use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::InternalKey;
use crate::domain::participant::{Language, Participant, ParticipantType};
use crate::ports::{
    AdminAuthorizer, AdminCredential, MessageSender, OutboundMessage, ParticipantRepository,
};

use super::{ensure_admin, AdminError};

/// Who a broadcast is for. Unset fields match everyone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudienceFilter {
    pub language: Option<Language>,
    pub participant_type: Option<ParticipantType>,
    pub meeting_date: Option<NaiveDate>,
    pub only_activated: bool,
    /// Inclusive bounds on the registration day (UTC).
    pub registered_from: Option<NaiveDate>,
    pub registered_to: Option<NaiveDate>,
}

impl AudienceFilter {
    pub fn matches(&self, p: &Participant) -> bool {
        let registered_on = p.registered_at.date();
        self.language.map_or(true, |l| p.language == l)
            && self.participant_type.map_or(true, |t| p.participant_type == t)
            && self.meeting_date.map_or(true, |d| p.meeting_date == Some(d))
            && (!self.only_activated || p.is_activated)
            && self.registered_from.map_or(true, |from| registered_on >= from)
            && self.registered_to.map_or(true, |to| registered_on <= to)
    }

    fn validate(&self) -> Result<(), AdminError> {
        match (self.registered_from, self.registered_to) {
            (Some(from), Some(to)) if from > to => Err(AdminError::Validation(format!(
                "registered_from {} is after registered_to {}",
                from, to
            ))),
            _ => Ok(()),
        }
    }
}

async fn resolve(
    participants: &dyn ParticipantRepository,
    filter: &AudienceFilter,
) -> Result<Vec<InternalKey>, AdminError> {
    filter.validate()?;
    // A date filter narrows the scan to that date's rows.
    let candidates = match filter.meeting_date {
        Some(date) => participants.list_by_date(date).await?,
        None => participants.list_all().await?,
    };
    Ok(candidates
        .into_iter()
        .filter(|p| filter.matches(p))
        .map(|p| p.internal_key)
        .collect())
}

// ════════════════════════════════════════════════════════════════════════════
// Resolve audience
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct ResolveAudienceQuery {
    pub filter: AudienceFilter,
}

pub struct ResolveAudienceHandler {
    participants: Arc<dyn ParticipantRepository>,
    authorizer: Arc<dyn AdminAuthorizer>,
}

impl ResolveAudienceHandler {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        authorizer: Arc<dyn AdminAuthorizer>,
    ) -> Self {
        Self {
            participants,
            authorizer,
        }
    }

    /// Internal keys of the matching participants, ordered by number.
    pub async fn handle(
        &self,
        credential: &AdminCredential,
        query: ResolveAudienceQuery,
    ) -> Result<Vec<InternalKey>, AdminError> {
        ensure_admin(self.authorizer.as_ref(), credential, "resolve_audience").await?;
        resolve(self.participants.as_ref(), &query.filter).await
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Broadcast
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct BroadcastCommand {
    pub audience: AudienceFilter,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BroadcastResult {
    pub audience: u32,
    pub sent: u32,
    pub failed: u32,
}

pub struct BroadcastHandler {
    participants: Arc<dyn ParticipantRepository>,
    sender: Arc<dyn MessageSender>,
    authorizer: Arc<dyn AdminAuthorizer>,
    concurrency: usize,
}

impl BroadcastHandler {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        sender: Arc<dyn MessageSender>,
        authorizer: Arc<dyn AdminAuthorizer>,
        concurrency: usize,
    ) -> Self {
        Self {
            participants,
            sender,
            authorizer,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn handle(
        &self,
        credential: &AdminCredential,
        cmd: BroadcastCommand,
    ) -> Result<BroadcastResult, AdminError> {
        ensure_admin(self.authorizer.as_ref(), credential, "broadcast").await?;
        if cmd.message.trim().is_empty() {
            return Err(AdminError::Validation("broadcast message is empty".to_string()));
        }

        let recipients = resolve(self.participants.as_ref(), &cmd.audience).await?;
        let audience = recipients.len() as u32;
        let text = cmd.message.as_str();

        let outcomes: Vec<bool> = stream::iter(recipients)
            .map(|recipient| async move {
                let message = OutboundMessage::new(recipient, text);
                match self.sender.send(&message).await {
                    Ok(()) => true,
                    Err(err) => {
                        tracing::warn!(
                            recipient = %message.recipient,
                            error = %err,
                            "broadcast delivery failed"
                        );
                        false
                    }
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let sent = outcomes.iter().filter(|ok| **ok).count() as u32;
        let result = BroadcastResult {
            audience,
            sent,
            failed: audience - sent,
        };
        tracing::info!(
            audience = result.audience,
            sent = result.sent,
            failed = result.failed,
            "broadcast finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::admin::test_support::*;
    use crate::ports::DeliveryError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementation
    // ════════════════════════════════════════════════════════════════════════════

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<OutboundMessage>>,
        fail_for: Vec<String>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl RecordingSender {
        fn failing_for(keys: &[&str]) -> Self {
            Self {
                fail_for: keys.iter().map(|k| k.to_string()).collect(),
                ..Self::default()
            }
        }

        fn recipients(&self) -> Vec<String> {
            let mut keys: Vec<String> = self
                .sent
                .lock()
                .unwrap()
                .iter()
                .map(|m| m.recipient.to_string())
                .collect();
            keys.sort();
            keys
        }
    }

    #[async_trait]
    impl MessageSender for RecordingSender {
        async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.fail_for.contains(&message.recipient.to_string()) {
                return Err(DeliveryError::Timeout);
            }
            self.sent.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    fn keys(list: &[InternalKey]) -> Vec<&str> {
        list.iter().map(InternalKey::as_str).collect()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Audience
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn empty_filter_matches_everyone() {
        let handler = ResolveAudienceHandler::new(seeded().await, authorizer());
        let audience = handler
            .handle(&admin(), ResolveAudienceQuery::default())
            .await
            .unwrap();
        assert_eq!(keys(&audience), vec!["chat:1", "chat:2", "chat:3", "email:abc"]);
    }

    #[tokio::test]
    async fn filters_combine() {
        let handler = ResolveAudienceHandler::new(seeded().await, authorizer());

        let by_language = AudienceFilter {
            language: Some(Language::Ru),
            ..AudienceFilter::default()
        };
        let audience = handler
            .handle(&admin(), ResolveAudienceQuery { filter: by_language })
            .await
            .unwrap();
        assert_eq!(keys(&audience), vec!["chat:1", "email:abc"]);

        let activated_on_date = AudienceFilter {
            meeting_date: Some(date(10, 16)),
            only_activated: true,
            ..AudienceFilter::default()
        };
        let audience = handler
            .handle(&admin(), ResolveAudienceQuery { filter: activated_on_date })
            .await
            .unwrap();
        assert_eq!(keys(&audience), vec!["chat:2"]);

        let by_type = AudienceFilter {
            participant_type: Some(ParticipantType::Individual),
            ..AudienceFilter::default()
        };
        let audience = handler
            .handle(&admin(), ResolveAudienceQuery { filter: by_type })
            .await
            .unwrap();
        assert_eq!(keys(&audience), vec!["chat:1", "chat:3"]);
    }

    #[tokio::test]
    async fn registration_window_filters_by_day() {
        let handler = ResolveAudienceHandler::new(seeded().await, authorizer());
        let today = crate::domain::foundation::Timestamp::now().date();

        let future = AudienceFilter {
            registered_from: today.succ_opt(),
            ..AudienceFilter::default()
        };
        let audience = handler
            .handle(&admin(), ResolveAudienceQuery { filter: future })
            .await
            .unwrap();
        assert!(audience.is_empty());

        let inverted = AudienceFilter {
            registered_from: Some(date(10, 20)),
            registered_to: Some(date(10, 1)),
            ..AudienceFilter::default()
        };
        assert!(matches!(
            handler
                .handle(&admin(), ResolveAudienceQuery { filter: inverted })
                .await,
            Err(AdminError::Validation(_))
        ));
    }

    #[test]
    fn filter_deserializes_with_defaults() {
        let filter: AudienceFilter =
            serde_json::from_str(r#"{"language":"he","only_activated":true}"#).unwrap();
        assert_eq!(filter.language, Some(Language::He));
        assert!(filter.only_activated);
        assert_eq!(filter.meeting_date, None);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Broadcast
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn delivers_to_every_recipient() {
        let sender = Arc::new(RecordingSender::default());
        let handler = BroadcastHandler::new(seeded().await, sender.clone(), authorizer(), 4);

        let result = handler
            .handle(
                &admin(),
                BroadcastCommand {
                    audience: AudienceFilter::default(),
                    message: "See you on Zoom".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(result, BroadcastResult { audience: 4, sent: 4, failed: 0 });
        assert_eq!(sender.recipients(), vec!["chat:1", "chat:2", "chat:3", "email:abc"]);
        assert!(sender
            .sent
            .lock()
            .unwrap()
            .iter()
            .all(|m| m.text == "See you on Zoom"));
    }

    #[tokio::test]
    async fn failed_deliveries_are_counted_not_propagated() {
        let sender = Arc::new(RecordingSender::failing_for(&["chat:3"]));
        let handler = BroadcastHandler::new(seeded().await, sender.clone(), authorizer(), 2);

        let result = handler
            .handle(
                &admin(),
                BroadcastCommand {
                    audience: AudienceFilter::default(),
                    message: "Reminder".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(result.sent, 3);
        assert_eq!(result.failed, 1);
        assert!(!sender.recipients().contains(&"chat:3".to_string()));
    }

    #[tokio::test]
    async fn concurrency_is_bounded() {
        let sender = Arc::new(RecordingSender::default());
        let handler = BroadcastHandler::new(seeded().await, sender.clone(), authorizer(), 2);

        handler
            .handle(
                &admin(),
                BroadcastCommand {
                    audience: AudienceFilter::default(),
                    message: "Reminder".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(sender.peak.load(Ordering::SeqCst) <= 2);
    }

    #[tokio::test]
    async fn empty_message_is_rejected() {
        let sender = Arc::new(RecordingSender::default());
        let handler = BroadcastHandler::new(seeded().await, sender.clone(), authorizer(), 2);

        let err = handler
            .handle(
                &admin(),
                BroadcastCommand {
                    audience: AudienceFilter::default(),
                    message: "   ".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
        assert!(sender.recipients().is_empty());
    }

    #[tokio::test]
    async fn unauthorized_broadcast_sends_nothing() {
        let sender = Arc::new(RecordingSender::default());
        let handler = BroadcastHandler::new(seeded().await, sender.clone(), authorizer(), 2);

        let err = handler
            .handle(
                &intruder(),
                BroadcastCommand {
                    audience: AudienceFilter::default(),
                    message: "spam".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::Forbidden(_)));
        assert!(sender.recipients().is_empty());
    }
}
