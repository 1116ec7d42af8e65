//! Integration tests for admin operations over registered participants.
//!
//! Participants are created through the registration engine, then inspected,
//! exported, activated and messaged through the admin handlers.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use secrecy::SecretString;

use orientation_registrar::adapters::{
    FixedClock, InMemoryParticipantRepository, InMemorySessionStore, SharedTokenAuthorizer,
};
use orientation_registrar::application::handlers::admin::{
    AdminError, AudienceFilter, BroadcastCommand, BroadcastHandler, BulkActivateCommand,
    BulkActivateHandler, ExportRosterHandler, ExportRosterQuery, GetStatisticsHandler,
    GetStatisticsQuery, ListDatesHandler, ListDatesQuery,
};
use orientation_registrar::application::{HandleTurnCommand, RegistrationEngine, RegistrationSettings};
use orientation_registrar::config::RegistrationConfig;
use orientation_registrar::domain::foundation::InternalKey;
use orientation_registrar::domain::participant::Language;
use orientation_registrar::domain::registration::{DateChoice, RegistrationEvent};
use orientation_registrar::ports::{
    AdminAuthorizer, AdminCredential, Clock, DeliveryError, MessageSender, OutboundMessage,
    ParticipantRepository,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

const TOKEN: &str = "integration-admin-token";

fn october(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, day).unwrap()
}

fn admin() -> AdminCredential {
    AdminCredential::new(TOKEN)
}

/// Records every delivery; fails for listed recipients.
#[derive(Default)]
struct RecordingSender {
    delivered: Mutex<Vec<OutboundMessage>>,
    fail_for: Vec<InternalKey>,
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(&self, message: &OutboundMessage) -> Result<(), DeliveryError> {
        if self.fail_for.contains(&message.recipient) {
            return Err(DeliveryError::Transport("connection reset".to_string()));
        }
        self.delivered.lock().unwrap().push(message.clone());
        Ok(())
    }
}

struct World {
    participants: Arc<InMemoryParticipantRepository>,
    authorizer: Arc<dyn AdminAuthorizer>,
    clock: Arc<dyn Clock>,
}

/// Registers `(account, language, date)` triples through the chat flow.
async fn world(registrations: &[(&str, Language, u32)]) -> World {
    let config = RegistrationConfig::default();
    let participants = Arc::new(InMemoryParticipantRepository::new(12000));
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::on(october(15)));
    let engine = RegistrationEngine::new(
        participants.clone(),
        Arc::new(InMemorySessionStore::new()),
        clock.clone(),
        RegistrationSettings::default(),
    );

    for (account, language, day) in registrations {
        let key = InternalKey::scoped("chat", account).unwrap();
        for event in [
            RegistrationEvent::Start,
            RegistrationEvent::Language(*language),
            RegistrationEvent::Date(DateChoice::Literal(october(*day))),
        ] {
            engine
                .handle(HandleTurnCommand::new(
                    key.clone(),
                    event,
                    config.interactive_window(),
                ))
                .await
                .unwrap();
        }
    }

    World {
        participants,
        authorizer: Arc::new(SharedTokenAuthorizer::new(SecretString::new(
            TOKEN.to_string(),
        ))),
        clock,
    }
}

async fn code_of(world: &World, account: &str) -> String {
    let key = InternalKey::scoped("chat", account).unwrap();
    world
        .participants
        .get_by_key(&key)
        .await
        .unwrap()
        .unwrap()
        .activation_code
        .as_str()
        .to_string()
}

// =============================================================================
// Statistics and dates
// =============================================================================

#[tokio::test]
async fn statistics_follow_registrations_and_activations() {
    let w = world(&[
        ("1", Language::Ru, 16),
        ("2", Language::En, 16),
        ("3", Language::He, 19),
    ])
    .await;
    let stats = GetStatisticsHandler::new(w.participants.clone(), w.authorizer.clone());

    let before = stats.handle(&admin(), GetStatisticsQuery).await.unwrap();
    assert_eq!(before.total, 3);
    assert_eq!(before.activated, 0);
    assert_eq!(before.by_language.get(&Language::He), Some(&1));

    let activate =
        BulkActivateHandler::new(w.participants.clone(), w.authorizer.clone(), w.clock.clone());
    let code = code_of(&w, "2").await;
    activate
        .handle(&admin(), BulkActivateCommand { codes: vec![code] })
        .await
        .unwrap();

    let after = stats.handle(&admin(), GetStatisticsQuery).await.unwrap();
    assert_eq!(after.activated, 1);
    assert_eq!(after.not_activated, 2);
}

#[tokio::test]
async fn date_summaries_are_sorted_and_counted() {
    let w = world(&[
        ("1", Language::Ru, 19),
        ("2", Language::En, 16),
        ("3", Language::Ru, 19),
    ])
    .await;
    let handler = ListDatesHandler::new(w.participants.clone(), w.authorizer.clone());

    let dates = handler.handle(&admin(), ListDatesQuery).await.unwrap();

    let pairs: Vec<(NaiveDate, u32)> = dates.iter().map(|d| (d.date, d.total)).collect();
    assert_eq!(pairs, vec![(october(16), 1), (october(19), 2)]);
    assert_eq!(dates[1].by_language.get(&Language::Ru), Some(&2));
}

// =============================================================================
// Activation
// =============================================================================

#[tokio::test]
async fn bulk_activation_reports_each_failure() {
    let w = world(&[("1", Language::En, 16), ("2", Language::En, 16)]).await;
    let handler =
        BulkActivateHandler::new(w.participants.clone(), w.authorizer.clone(), w.clock.clone());
    let real = code_of(&w, "1").await;

    let issued: Vec<String> = vec![code_of(&w, "1").await, code_of(&w, "2").await];
    let unknown = (100000..=999999)
        .map(|n: u32| n.to_string())
        .find(|c| !issued.contains(c))
        .unwrap();

    let result = handler
        .handle(
            &admin(),
            BulkActivateCommand::from_raw(&format!("{}\n{}, abc123", real, unknown)),
        )
        .await
        .unwrap();

    assert_eq!(result.succeeded, 1);
    assert_eq!(result.failed, 2);
    assert_eq!(result.rejected, vec![unknown, "abc123".to_string()]);

    let key = InternalKey::scoped("chat", "1").unwrap();
    let activated = w.participants.get_by_key(&key).await.unwrap().unwrap();
    assert!(activated.is_activated);
    assert!(activated.activated_at.is_some());
}

#[tokio::test]
async fn wrong_token_is_rejected_before_any_change() {
    let w = world(&[("1", Language::En, 16)]).await;
    let handler =
        BulkActivateHandler::new(w.participants.clone(), w.authorizer.clone(), w.clock.clone());
    let code = code_of(&w, "1").await;

    let err = handler
        .handle(
            &AdminCredential::new("guess"),
            BulkActivateCommand { codes: vec![code] },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AdminError::Forbidden(_)));
    let key = InternalKey::scoped("chat", "1").unwrap();
    let untouched = w.participants.get_by_key(&key).await.unwrap().unwrap();
    assert!(!untouched.is_activated);
}

// =============================================================================
// Export
// =============================================================================

#[tokio::test]
async fn date_export_contains_only_that_dates_rows() {
    let w = world(&[
        ("1", Language::En, 16),
        ("2", Language::Ru, 19),
        ("3", Language::He, 16),
    ])
    .await;
    let handler =
        ExportRosterHandler::new(w.participants.clone(), w.authorizer.clone(), w.clock.clone());

    let export = handler
        .handle(
            &admin(),
            ExportRosterQuery {
                date: Some(october(16)),
            },
        )
        .await
        .unwrap();

    assert_eq!(export.rows, 2);
    assert_eq!(export.filename, "participants_2026-10-16.csv");
    assert!(export.content.starts_with(b"\xEF\xBB\xBF"));

    let text = String::from_utf8(export.content[3..].to_vec()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("number,internal_key"));
    assert!(lines[1].starts_with("12001,chat:1"));
    assert!(lines[2].starts_with("12003,chat:3"));
}

#[tokio::test]
async fn full_export_lists_everyone() {
    let w = world(&[("1", Language::En, 16), ("2", Language::Ru, 19)]).await;
    let handler =
        ExportRosterHandler::new(w.participants.clone(), w.authorizer.clone(), w.clock.clone());

    let export = handler
        .handle(&admin(), ExportRosterQuery::default())
        .await
        .unwrap();

    assert_eq!(export.rows, 2);
    assert!(export.filename.starts_with("participants_all_"));
    assert!(export.filename.ends_with(".csv"));
}

// =============================================================================
// Broadcast
// =============================================================================

#[tokio::test]
async fn broadcast_reaches_the_filtered_audience_and_counts_failures() {
    let w = world(&[
        ("1", Language::En, 16),
        ("2", Language::Ru, 16),
        ("3", Language::En, 19),
    ])
    .await;
    let unreachable = InternalKey::scoped("chat", "2").unwrap();
    let sender = Arc::new(RecordingSender {
        fail_for: vec![unreachable],
        ..Default::default()
    });
    let handler = BroadcastHandler::new(
        w.participants.clone(),
        sender.clone(),
        w.authorizer.clone(),
        4,
    );

    let result = handler
        .handle(
            &admin(),
            BroadcastCommand {
                audience: AudienceFilter {
                    meeting_date: Some(october(16)),
                    ..Default::default()
                },
                message: "The Zoom link is in your inbox.".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(result.audience, 2);
    assert_eq!(result.sent, 1);
    assert_eq!(result.failed, 1);

    let delivered = sender.delivered.lock().unwrap();
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].recipient.as_str(), "chat:1");
    assert_eq!(delivered[0].text, "The Zoom link is in your inbox.");
}
