//! RegistrationEngine - drives one conversational turn.
//!
//! A turn loads the identity's session context and participant row, applies
//! one decoded event, commits any storage change and only then saves the new
//! context. The engine never talks to a channel; it returns abstract replies
//! that channel encoders render.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::config::RegistrationConfig;
use crate::domain::foundation::{InternalKey, StateMachine};
use crate::domain::participant::{
    Language, NewParticipant, Participant, ParticipantError, ParticipantType,
};
use crate::domain::registration::{
    Credential, DateChoice, MenuAction, MenuSummary, RegistrationContext, RegistrationEvent,
    RegistrationState, Reply, ReplyKind,
};
use crate::domain::scheduling::{CapacityPolicy, DateOffer, OfferWindow, SeatRequest};
use crate::ports::{Clock, ParticipantRepository, SessionStore};

use super::RegistrationError;

/// Flow settings shared by every channel.
#[derive(Debug, Clone)]
pub struct RegistrationSettings {
    pub capacity: CapacityPolicy,
    pub ask_participant_type: bool,
    pub credential_prefix: String,
    pub default_language: Language,
}

impl From<&RegistrationConfig> for RegistrationSettings {
    fn from(config: &RegistrationConfig) -> Self {
        Self {
            capacity: config.capacity(),
            ask_participant_type: config.ask_participant_type,
            credential_prefix: config.credential_prefix.clone(),
            default_language: config.default_language,
        }
    }
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self::from(&RegistrationConfig::default())
    }
}

/// One decoded input from a channel identity.
#[derive(Debug, Clone)]
pub struct HandleTurnCommand {
    pub internal_key: InternalKey,
    pub display_name: Option<String>,
    pub handle: Option<String>,
    pub event: RegistrationEvent,
    /// Offer window of the channel the input arrived on.
    pub window: OfferWindow,
}

impl HandleTurnCommand {
    pub fn new(internal_key: InternalKey, event: RegistrationEvent, window: OfferWindow) -> Self {
        Self {
            internal_key,
            display_name: None,
            handle: None,
            event,
            window,
        }
    }

    pub fn with_profile(mut self, display_name: Option<String>, handle: Option<String>) -> Self {
        self.display_name = display_name;
        self.handle = handle;
        self
    }
}

/// What a turn produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// State after the turn.
    pub state: RegistrationState,
    pub language: Language,
    pub replies: Vec<Reply>,
}

/// Mutable working set of a single turn.
struct Turn {
    context: RegistrationContext,
    participant: Option<Participant>,
    today: NaiveDate,
    window: OfferWindow,
    replies: Vec<Reply>,
}

impl Turn {
    fn say(&mut self, kind: ReplyKind) {
        self.replies.push(Reply::new(self.context.language, kind));
    }

    fn advance(&mut self, target: RegistrationState) -> Result<(), RegistrationError> {
        if self.context.state != target {
            self.context.state = self.context.state.transition_to(target)?;
        }
        Ok(())
    }
}

pub struct RegistrationEngine {
    participants: Arc<dyn ParticipantRepository>,
    sessions: Arc<dyn SessionStore>,
    clock: Arc<dyn Clock>,
    settings: RegistrationSettings,
}

impl RegistrationEngine {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        sessions: Arc<dyn SessionStore>,
        clock: Arc<dyn Clock>,
        settings: RegistrationSettings,
    ) -> Self {
        Self {
            participants,
            sessions,
            clock,
            settings,
        }
    }

    pub fn settings(&self) -> &RegistrationSettings {
        &self.settings
    }

    /// Current session context, or the one a first turn would start from.
    pub async fn context_for(
        &self,
        key: &InternalKey,
    ) -> Result<RegistrationContext, RegistrationError> {
        if let Some(context) = self.sessions.load(key).await? {
            return Ok(context);
        }
        let participant = self.participants.get_by_key(key).await?;
        Ok(self.initial_context(key, participant.as_ref()))
    }

    /// Runs a turn and converts retryable failures into a "try again" reply.
    ///
    /// Only unrecoverable failures (an exhausted code space) are returned as
    /// errors.
    pub async fn handle(&self, cmd: HandleTurnCommand) -> Result<TurnOutcome, RegistrationError> {
        let key = cmd.internal_key.clone();
        match self.process(cmd).await {
            Ok(outcome) => Ok(outcome),
            Err(RegistrationError::CodeSpaceExhausted { attempts }) => {
                tracing::error!(
                    internal_key = %key,
                    attempts,
                    "activation code space exhausted, registration aborted"
                );
                Err(RegistrationError::CodeSpaceExhausted { attempts })
            }
            Err(err) => {
                tracing::error!(internal_key = %key, error = %err, "registration turn failed");
                let context = self.sessions.load(&key).await.ok().flatten();
                let state = context
                    .as_ref()
                    .map(|c| c.state)
                    .unwrap_or_default();
                let language = context
                    .map(|c| c.language)
                    .unwrap_or(self.settings.default_language);
                Ok(TurnOutcome {
                    state,
                    language,
                    replies: vec![Reply::new(language, ReplyKind::TryAgainLater)],
                })
            }
        }
    }

    /// Runs a turn, returning every failure as an error.
    pub async fn process(&self, cmd: HandleTurnCommand) -> Result<TurnOutcome, RegistrationError> {
        let participant = self.participants.get_by_key(&cmd.internal_key).await?;
        let context = match self.sessions.load(&cmd.internal_key).await? {
            Some(context) => context,
            None => self.initial_context(&cmd.internal_key, participant.as_ref()),
        };
        let previous = context.state;

        let mut turn = Turn {
            context,
            participant,
            today: self.clock.today(),
            window: cmd.window,
            replies: Vec::new(),
        };

        match cmd.event.clone() {
            RegistrationEvent::Start => self.on_start(&mut turn)?,
            RegistrationEvent::Help => {
                let state = turn.context.state;
                turn.say(ReplyKind::Help { state });
            }
            RegistrationEvent::Language(language) => self.on_language(&mut turn, language).await?,
            RegistrationEvent::ParticipantType(kind) => self.on_type(&mut turn, kind).await?,
            RegistrationEvent::Date(choice) => self.on_date(&mut turn, choice, &cmd).await?,
            RegistrationEvent::Menu(action) => self.on_menu(&mut turn, action).await?,
            RegistrationEvent::Unrecognized(raw) => {
                tracing::debug!(
                    internal_key = %cmd.internal_key,
                    state = %turn.context.state,
                    chars = raw.chars().count(),
                    "unrecognized input"
                );
                turn.say(ReplyKind::Unrecognized);
                self.prompt_current_step(&mut turn).await?;
            }
        }

        turn.context.touch();
        if let Err(err) = self.sessions.save(&turn.context).await {
            // The storage change (if any) is already committed; keep its replies.
            tracing::error!(
                internal_key = %cmd.internal_key,
                error = %err.message,
                "failed to save session context"
            );
        }

        tracing::info!(
            internal_key = %cmd.internal_key,
            from = %previous,
            state = %turn.context.state,
            replies = turn.replies.len(),
            "registration turn"
        );

        Ok(TurnOutcome {
            state: turn.context.state,
            language: turn.context.language,
            replies: turn.replies,
        })
    }

    fn initial_context(
        &self,
        key: &InternalKey,
        participant: Option<&Participant>,
    ) -> RegistrationContext {
        match participant {
            Some(p) => RegistrationContext::resumed(key.clone(), p.language),
            None => RegistrationContext::new(key.clone(), self.settings.default_language),
        }
    }

    fn on_start(&self, turn: &mut Turn) -> Result<(), RegistrationError> {
        match turn.participant.clone() {
            Some(participant) => {
                turn.advance(RegistrationState::Menu)?;
                turn.say(menu_reply(&participant));
            }
            None => {
                turn.context.reset();
                turn.say(ReplyKind::ChooseLanguage);
            }
        }
        Ok(())
    }

    async fn on_language(
        &self,
        turn: &mut Turn,
        language: Language,
    ) -> Result<(), RegistrationError> {
        if let Some(participant) = turn.participant.clone() {
            // A registered row changes language only through the menu's
            // change-language step.
            if turn.context.state != RegistrationState::ChoosingLanguage {
                turn.say(ReplyKind::Unrecognized);
                return self.prompt_current_step(turn).await;
            }
            let updated = self
                .participants
                .update_language(&participant.internal_key, language)
                .await?;
            turn.context.language = updated.language;
            turn.advance(RegistrationState::Menu)?;
            turn.say(ReplyKind::LanguageChanged);
            turn.say(menu_reply(&updated));
            turn.participant = Some(updated);
            return Ok(());
        }

        turn.context.language = language;
        turn.context.pending_language = Some(language);

        match turn.context.state {
            RegistrationState::ChoosingType => turn.say(ReplyKind::ChooseType),
            RegistrationState::ChoosingDate => self.offer_dates(turn).await?,
            RegistrationState::ChoosingLanguage | RegistrationState::Menu => {
                if turn.context.state == RegistrationState::Menu {
                    // Stale session pointing at a menu without a row.
                    turn.context.state = RegistrationState::ChoosingLanguage;
                }
                if self.settings.ask_participant_type {
                    turn.advance(RegistrationState::ChoosingType)?;
                    turn.say(ReplyKind::ChooseType);
                } else {
                    turn.advance(RegistrationState::ChoosingDate)?;
                    turn.say(ReplyKind::Greeting {
                        participant_type: None,
                    });
                    self.offer_dates(turn).await?;
                }
            }
        }
        Ok(())
    }

    async fn on_type(
        &self,
        turn: &mut Turn,
        kind: ParticipantType,
    ) -> Result<(), RegistrationError> {
        if turn.context.state != RegistrationState::ChoosingType {
            turn.say(ReplyKind::Unrecognized);
            return self.prompt_current_step(turn).await;
        }
        if let Some(participant) = turn.participant.clone() {
            turn.advance(RegistrationState::Menu)?;
            turn.say(menu_reply(&participant));
            return Ok(());
        }

        turn.context.pending_type = Some(kind);
        turn.advance(RegistrationState::ChoosingDate)?;
        turn.say(ReplyKind::Greeting {
            participant_type: Some(kind),
        });
        self.offer_dates(turn).await
    }

    async fn on_date(
        &self,
        turn: &mut Turn,
        choice: DateChoice,
        cmd: &HandleTurnCommand,
    ) -> Result<(), RegistrationError> {
        if turn.context.state != RegistrationState::ChoosingDate {
            turn.say(ReplyKind::Unrecognized);
            return self.prompt_current_step(turn).await;
        }

        let Some(date) = resolve_choice(&turn.window, turn.today, choice) else {
            turn.say(ReplyKind::DateNotOffered);
            return self.offer_dates(turn).await;
        };
        let seat = SeatRequest::new(date, self.settings.capacity);

        let committed = match turn.participant.clone() {
            Some(existing) => self.reschedule(turn, &existing, seat).await?,
            None => self.register(turn, seat, cmd).await?,
        };

        if !committed {
            tracing::warn!(
                internal_key = %turn.context.internal_key,
                %date,
                cap = self.settings.capacity.cap(),
                "date full at commit"
            );
            turn.say(ReplyKind::DateFull { date });
            self.offer_dates(turn).await?;
        }
        Ok(())
    }

    /// Creates the participant row. Returns false when the date is full.
    async fn register(
        &self,
        turn: &mut Turn,
        seat: SeatRequest,
        cmd: &HandleTurnCommand,
    ) -> Result<bool, RegistrationError> {
        let language = turn.context.pending_language.unwrap_or(turn.context.language);
        let new = NewParticipant::new(cmd.internal_key.clone(), language)
            .with_profile(cmd.display_name.clone(), cmd.handle.clone())
            .with_type(turn.context.pending_type.unwrap_or_default());

        match self.participants.create(new, Some(seat)).await {
            Ok(participant) => {
                tracing::info!(
                    internal_key = %participant.internal_key,
                    number = participant.number.value(),
                    date = %seat.date,
                    "participant registered"
                );
                turn.context.language = participant.language;
                turn.advance(RegistrationState::Menu)?;
                turn.say(ReplyKind::MeetingConfirmed { date: seat.date });
                turn.say(ReplyKind::Credentials {
                    credential: Credential::new(
                        &self.settings.credential_prefix,
                        participant.number,
                        participant.activation_code.clone(),
                    ),
                });
                turn.say(menu_reply(&participant));
                turn.participant = Some(participant);
                Ok(true)
            }
            Err(ParticipantError::CapacityExceeded { .. }) => Ok(false),
            Err(ParticipantError::AlreadyRegistered(key)) => {
                // Another turn for the same identity won the race.
                let existing = self
                    .participants
                    .get_by_key(&key)
                    .await?
                    .ok_or_else(|| ParticipantError::not_found(key))?;
                turn.participant = Some(existing.clone());
                self.reschedule(turn, &existing, seat).await
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Moves an existing participant. Returns false when the date is full.
    async fn reschedule(
        &self,
        turn: &mut Turn,
        existing: &Participant,
        seat: SeatRequest,
    ) -> Result<bool, RegistrationError> {
        match self
            .participants
            .update_meeting_date(&existing.internal_key, seat)
            .await
        {
            Ok(participant) => {
                tracing::info!(
                    internal_key = %participant.internal_key,
                    from = ?existing.meeting_date,
                    to = %seat.date,
                    "meeting date changed"
                );
                turn.advance(RegistrationState::Menu)?;
                turn.say(ReplyKind::MeetingConfirmed { date: seat.date });
                turn.say(menu_reply(&participant));
                turn.participant = Some(participant);
                Ok(true)
            }
            Err(ParticipantError::CapacityExceeded { .. }) => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn on_menu(&self, turn: &mut Turn, action: MenuAction) -> Result<(), RegistrationError> {
        let Some(participant) = turn.participant.clone() else {
            return match turn.context.state {
                RegistrationState::ChoosingType | RegistrationState::ChoosingDate => {
                    turn.say(ReplyKind::Unrecognized);
                    self.prompt_current_step(turn).await
                }
                RegistrationState::ChoosingLanguage | RegistrationState::Menu => {
                    turn.context.reset();
                    turn.say(ReplyKind::NotRegistered);
                    turn.say(ReplyKind::ChooseLanguage);
                    Ok(())
                }
            };
        };

        match action {
            MenuAction::RemindId => turn.say(ReplyKind::RemindId {
                number: participant.number,
            }),
            MenuAction::RemindCode => turn.say(ReplyKind::RemindCode {
                code: participant.activation_code.clone(),
            }),
            MenuAction::RemindDate => turn.say(ReplyKind::RemindDate {
                date: participant.meeting_date,
            }),
            MenuAction::HowToActivate => turn.say(ReplyKind::HowToActivate),
            MenuAction::Instruction => turn.say(ReplyKind::Instruction),
            MenuAction::Reschedule => {
                turn.advance(RegistrationState::ChoosingDate)?;
                self.offer_dates(turn).await?;
            }
            MenuAction::ChangeLanguage => {
                turn.advance(RegistrationState::ChoosingLanguage)?;
                turn.say(ReplyKind::ChooseLanguage);
            }
            MenuAction::Show => {
                turn.advance(RegistrationState::Menu)?;
                turn.say(menu_reply(&participant));
            }
        }
        Ok(())
    }

    async fn prompt_current_step(&self, turn: &mut Turn) -> Result<(), RegistrationError> {
        match turn.context.state {
            RegistrationState::ChoosingLanguage => turn.say(ReplyKind::ChooseLanguage),
            RegistrationState::ChoosingType => turn.say(ReplyKind::ChooseType),
            RegistrationState::ChoosingDate => self.offer_dates(turn).await?,
            RegistrationState::Menu => match turn.participant.clone() {
                Some(participant) => turn.say(menu_reply(&participant)),
                None => {
                    turn.context.reset();
                    turn.say(ReplyKind::ChooseLanguage);
                }
            },
        }
        Ok(())
    }

    /// Recomputes the window and live occupancy of every offered date.
    async fn offer_dates(&self, turn: &mut Turn) -> Result<(), RegistrationError> {
        let offers = self.current_offers(&turn.window, turn.today).await?;
        turn.say(ReplyKind::ChooseDate { offers });
        Ok(())
    }

    /// Offered dates with their current counts.
    pub async fn current_offers(
        &self,
        window: &OfferWindow,
        today: NaiveDate,
    ) -> Result<Vec<DateOffer>, RegistrationError> {
        let mut offers = Vec::new();
        for (index, date) in window.dates(today).into_iter().enumerate() {
            let count = self.participants.count_by_date(date).await?;
            offers.push(DateOffer::new(
                (index + 1) as u8,
                date,
                today,
                count,
                self.settings.capacity,
            ));
        }
        Ok(offers)
    }
}

fn menu_reply(participant: &Participant) -> ReplyKind {
    ReplyKind::Menu {
        summary: Some(MenuSummary::from(participant)),
    }
}

fn resolve_choice(window: &OfferWindow, today: NaiveDate, choice: DateChoice) -> Option<NaiveDate> {
    match choice {
        DateChoice::Ordinal(ordinal) => window.date_at(today, ordinal),
        DateChoice::Literal(date) => window.ordinal_of(today, date).map(|_| date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::{InMemoryParticipantRepository, InMemorySessionStore};
    use crate::domain::foundation::{DomainError, Timestamp};
    use crate::domain::participant::ActivationCode;
    use crate::domain::scheduling::WeekendDays;
    use crate::ports::ActivationOutcome;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // Thursday; offers are Fri 16, Mon 19, Tue 20 with a Sat/Sun weekend.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn window() -> OfferWindow {
        OfferWindow::new(3, false, WeekendDays::SatSun)
    }

    fn key(n: u32) -> InternalKey {
        InternalKey::new(format!("chat:{}", n)).unwrap()
    }

    struct Fixture {
        engine: RegistrationEngine,
        participants: InMemoryParticipantRepository,
        sessions: InMemorySessionStore,
    }

    fn fixture(settings: RegistrationSettings) -> Fixture {
        let participants = InMemoryParticipantRepository::new(12000);
        let sessions = InMemorySessionStore::new();
        let engine = RegistrationEngine::new(
            Arc::new(participants.clone()),
            Arc::new(sessions.clone()),
            Arc::new(FixedClock::on(today())),
            settings,
        );
        Fixture {
            engine,
            participants,
            sessions,
        }
    }

    fn settings_with_cap(cap: u32) -> RegistrationSettings {
        RegistrationSettings {
            capacity: CapacityPolicy::new(cap),
            ..Default::default()
        }
    }

    async fn turn(engine: &RegistrationEngine, n: u32, event: RegistrationEvent) -> TurnOutcome {
        engine
            .handle(HandleTurnCommand::new(key(n), event, window()))
            .await
            .unwrap()
    }

    fn kinds(outcome: &TurnOutcome) -> Vec<&ReplyKind> {
        outcome.replies.iter().map(|r| &r.kind).collect()
    }

    async fn register(engine: &RegistrationEngine, n: u32, ordinal: u8) -> TurnOutcome {
        turn(engine, n, RegistrationEvent::Start).await;
        turn(engine, n, RegistrationEvent::Language(Language::En)).await;
        turn(engine, n, RegistrationEvent::Date(DateChoice::Ordinal(ordinal))).await
    }

    #[tokio::test]
    async fn start_for_new_identity_asks_language_and_creates_nothing() {
        let f = fixture(RegistrationSettings::default());

        let outcome = turn(&f.engine, 1, RegistrationEvent::Start).await;

        assert_eq!(outcome.state, RegistrationState::ChoosingLanguage);
        assert_eq!(kinds(&outcome), vec![&ReplyKind::ChooseLanguage]);
        assert!(f.participants.is_empty().await);
        let saved = f.sessions.load(&key(1)).await.unwrap().unwrap();
        assert_eq!(saved.state, RegistrationState::ChoosingLanguage);
    }

    #[tokio::test]
    async fn language_choice_defers_creation_and_offers_dates() {
        let f = fixture(RegistrationSettings::default());
        turn(&f.engine, 1, RegistrationEvent::Start).await;

        let outcome = turn(&f.engine, 1, RegistrationEvent::Language(Language::He)).await;

        assert_eq!(outcome.state, RegistrationState::ChoosingDate);
        assert_eq!(outcome.language, Language::He);
        assert!(matches!(outcome.replies[0].kind, ReplyKind::Greeting { .. }));
        match &outcome.replies[1].kind {
            ReplyKind::ChooseDate { offers } => {
                let dates: Vec<NaiveDate> = offers.iter().map(|o| o.date).collect();
                assert_eq!(dates, vec![date(16), date(19), date(20)]);
                assert!(offers.iter().all(|o| o.count == 0 && o.cap == 290));
            }
            other => panic!("expected date offers, got {:?}", other),
        }
        assert!(f.participants.is_empty().await);
    }

    #[tokio::test]
    async fn date_choice_creates_row_and_issues_credentials() {
        let f = fixture(RegistrationSettings::default());

        let outcome = register(&f.engine, 1, 2).await;

        assert_eq!(outcome.state, RegistrationState::Menu);
        assert_eq!(
            outcome.replies[0].kind,
            ReplyKind::MeetingConfirmed { date: date(19) }
        );
        let participant = f.participants.get_by_key(&key(1)).await.unwrap().unwrap();
        match &outcome.replies[1].kind {
            ReplyKind::Credentials { credential } => {
                assert_eq!(credential.number.value(), 12001);
                assert_eq!(credential.code, participant.activation_code);
                assert_eq!(
                    credential.payload,
                    format!("SUMMIT_12001_{}", participant.activation_code)
                );
            }
            other => panic!("expected credentials, got {:?}", other),
        }
        assert!(matches!(outcome.replies[2].kind, ReplyKind::Menu { summary: Some(_) }));
        assert_eq!(participant.language, Language::En);
        assert_eq!(participant.meeting_date, Some(date(19)));
    }

    #[tokio::test]
    async fn literal_date_outside_window_is_not_offered() {
        let f = fixture(RegistrationSettings::default());
        turn(&f.engine, 1, RegistrationEvent::Start).await;
        turn(&f.engine, 1, RegistrationEvent::Language(Language::Ru)).await;

        let outcome = turn(
            &f.engine,
            1,
            RegistrationEvent::Date(DateChoice::Literal(date(17))),
        )
        .await;

        assert_eq!(outcome.state, RegistrationState::ChoosingDate);
        assert_eq!(outcome.replies[0].kind, ReplyKind::DateNotOffered);
        assert!(matches!(outcome.replies[1].kind, ReplyKind::ChooseDate { .. }));
        assert!(f.participants.is_empty().await);
    }

    #[tokio::test]
    async fn full_date_is_rejected_and_offers_are_refreshed() {
        let f = fixture(settings_with_cap(1));
        register(&f.engine, 1, 1).await;

        let outcome = register(&f.engine, 2, 1).await;

        assert_eq!(outcome.state, RegistrationState::ChoosingDate);
        assert_eq!(outcome.replies[0].kind, ReplyKind::DateFull { date: date(16) });
        match &outcome.replies[1].kind {
            ReplyKind::ChooseDate { offers } => assert!(offers[0].is_full()),
            other => panic!("expected date offers, got {:?}", other),
        }
        assert!(f.participants.get_by_key(&key(2)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn cap_scenario_frees_seat_on_reschedule() {
        let f = fixture(settings_with_cap(2));
        register(&f.engine, 1, 1).await;
        register(&f.engine, 2, 1).await;
        let rejected = register(&f.engine, 3, 1).await;
        assert_eq!(rejected.state, RegistrationState::ChoosingDate);
        assert_eq!(f.participants.count_by_date(date(16)).await.unwrap(), 2);

        turn(&f.engine, 2, RegistrationEvent::Menu(MenuAction::Reschedule)).await;
        let moved = turn(&f.engine, 2, RegistrationEvent::Date(DateChoice::Ordinal(2))).await;
        assert_eq!(moved.state, RegistrationState::Menu);

        let retried = turn(&f.engine, 3, RegistrationEvent::Date(DateChoice::Ordinal(1))).await;
        assert_eq!(retried.state, RegistrationState::Menu);
        assert_eq!(f.participants.count_by_date(date(16)).await.unwrap(), 2);
        assert_eq!(f.participants.count_by_date(date(19)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn reschedule_keeps_identifiers() {
        let f = fixture(RegistrationSettings::default());
        register(&f.engine, 1, 1).await;
        let before = f.participants.get_by_key(&key(1)).await.unwrap().unwrap();

        turn(&f.engine, 1, RegistrationEvent::Menu(MenuAction::Reschedule)).await;
        let outcome = turn(&f.engine, 1, RegistrationEvent::Date(DateChoice::Ordinal(3))).await;

        let after = f.participants.get_by_key(&key(1)).await.unwrap().unwrap();
        assert_eq!(after.number, before.number);
        assert_eq!(after.activation_code, before.activation_code);
        assert_eq!(after.meeting_date, Some(date(20)));
        // Credentials are shown only on first registration.
        assert!(!outcome
            .replies
            .iter()
            .any(|r| matches!(r.kind, ReplyKind::Credentials { .. })));
    }

    #[tokio::test]
    async fn start_for_registered_identity_goes_to_menu() {
        let f = fixture(RegistrationSettings::default());
        register(&f.engine, 1, 1).await;

        let outcome = turn(&f.engine, 1, RegistrationEvent::Start).await;

        assert_eq!(outcome.state, RegistrationState::Menu);
        assert!(matches!(outcome.replies[0].kind, ReplyKind::Menu { summary: Some(_) }));
    }

    #[tokio::test]
    async fn change_language_updates_row_in_place() {
        let f = fixture(RegistrationSettings::default());
        register(&f.engine, 1, 1).await;
        let before = f.participants.get_by_key(&key(1)).await.unwrap().unwrap();

        let asked = turn(&f.engine, 1, RegistrationEvent::Menu(MenuAction::ChangeLanguage)).await;
        assert_eq!(asked.state, RegistrationState::ChoosingLanguage);

        let outcome = turn(&f.engine, 1, RegistrationEvent::Language(Language::He)).await;

        assert_eq!(outcome.state, RegistrationState::Menu);
        assert_eq!(outcome.replies[0].kind, ReplyKind::LanguageChanged);
        assert_eq!(outcome.replies[0].language, Language::He);
        let after = f.participants.get_by_key(&key(1)).await.unwrap().unwrap();
        assert_eq!(after.language, Language::He);
        assert_eq!(
            Participant {
                language: before.language,
                ..after
            },
            before
        );
        assert_eq!(f.participants.len().await, 1);
    }

    #[tokio::test]
    async fn menu_reminders_answer_from_the_row() {
        let f = fixture(RegistrationSettings::default());
        register(&f.engine, 1, 1).await;
        let p = f.participants.get_by_key(&key(1)).await.unwrap().unwrap();

        let id = turn(&f.engine, 1, RegistrationEvent::Menu(MenuAction::RemindId)).await;
        let code = turn(&f.engine, 1, RegistrationEvent::Menu(MenuAction::RemindCode)).await;
        let when = turn(&f.engine, 1, RegistrationEvent::Menu(MenuAction::RemindDate)).await;

        assert_eq!(kinds(&id), vec![&ReplyKind::RemindId { number: p.number }]);
        assert_eq!(
            kinds(&code),
            vec![&ReplyKind::RemindCode {
                code: p.activation_code.clone()
            }]
        );
        assert_eq!(
            kinds(&when),
            vec![&ReplyKind::RemindDate {
                date: Some(date(16))
            }]
        );
        assert_eq!(when.state, RegistrationState::Menu);
    }

    #[tokio::test]
    async fn menu_action_without_row_asks_to_register() {
        let f = fixture(RegistrationSettings::default());

        let outcome = turn(&f.engine, 1, RegistrationEvent::Menu(MenuAction::RemindCode)).await;

        assert_eq!(outcome.state, RegistrationState::ChoosingLanguage);
        assert_eq!(
            kinds(&outcome),
            vec![&ReplyKind::NotRegistered, &ReplyKind::ChooseLanguage]
        );
    }

    #[tokio::test]
    async fn menu_action_mid_registration_keeps_pending_choices() {
        let f = fixture(RegistrationSettings::default());
        turn(&f.engine, 1, RegistrationEvent::Start).await;
        turn(&f.engine, 1, RegistrationEvent::Language(Language::He)).await;

        let outcome = turn(&f.engine, 1, RegistrationEvent::Menu(MenuAction::RemindDate)).await;

        assert_eq!(outcome.state, RegistrationState::ChoosingDate);
        assert_eq!(outcome.language, Language::He);
        assert_eq!(outcome.replies[0].kind, ReplyKind::Unrecognized);
        assert!(matches!(outcome.replies[1].kind, ReplyKind::ChooseDate { .. }));
        let saved = f.sessions.load(&key(1)).await.unwrap().unwrap();
        assert_eq!(saved.pending_language, Some(Language::He));
    }

    #[tokio::test]
    async fn language_outside_language_step_leaves_row_alone() {
        let f = fixture(RegistrationSettings::default());
        register(&f.engine, 1, 1).await;

        let outcome = turn(&f.engine, 1, RegistrationEvent::Language(Language::He)).await;

        assert_eq!(outcome.state, RegistrationState::Menu);
        assert_eq!(outcome.language, Language::En);
        assert_eq!(outcome.replies[0].kind, ReplyKind::Unrecognized);
        assert!(matches!(outcome.replies[1].kind, ReplyKind::Menu { summary: Some(_) }));
        let stored = f.participants.get_by_key(&key(1)).await.unwrap().unwrap();
        assert_eq!(stored.language, Language::En);
    }

    #[tokio::test]
    async fn unrecognized_input_reprompts_current_step() {
        let f = fixture(RegistrationSettings::default());
        turn(&f.engine, 1, RegistrationEvent::Start).await;

        let outcome = turn(
            &f.engine,
            1,
            RegistrationEvent::Unrecognized("banana".to_string()),
        )
        .await;

        assert_eq!(outcome.state, RegistrationState::ChoosingLanguage);
        assert_eq!(
            kinds(&outcome),
            vec![&ReplyKind::Unrecognized, &ReplyKind::ChooseLanguage]
        );
    }

    #[tokio::test]
    async fn unrecognized_input_in_menu_redisplays_menu() {
        let f = fixture(RegistrationSettings::default());
        register(&f.engine, 1, 1).await;

        let first = turn(&f.engine, 1, RegistrationEvent::Unrecognized("?".into())).await;
        let second = turn(&f.engine, 1, RegistrationEvent::Unrecognized("?".into())).await;

        assert_eq!(first, second);
        assert_eq!(first.state, RegistrationState::Menu);
    }

    #[tokio::test]
    async fn help_keeps_state() {
        let f = fixture(RegistrationSettings::default());
        turn(&f.engine, 1, RegistrationEvent::Start).await;
        turn(&f.engine, 1, RegistrationEvent::Language(Language::En)).await;

        let outcome = turn(&f.engine, 1, RegistrationEvent::Help).await;

        assert_eq!(outcome.state, RegistrationState::ChoosingDate);
        assert_eq!(
            kinds(&outcome),
            vec![&ReplyKind::Help {
                state: RegistrationState::ChoosingDate
            }]
        );
    }

    #[tokio::test]
    async fn type_step_is_asked_when_enabled() {
        let f = fixture(RegistrationSettings {
            ask_participant_type: true,
            ..Default::default()
        });
        turn(&f.engine, 1, RegistrationEvent::Start).await;

        let asked = turn(&f.engine, 1, RegistrationEvent::Language(Language::Ru)).await;
        assert_eq!(asked.state, RegistrationState::ChoosingType);
        assert_eq!(kinds(&asked), vec![&ReplyKind::ChooseType]);

        let typed = turn(
            &f.engine,
            1,
            RegistrationEvent::ParticipantType(ParticipantType::Organization),
        )
        .await;
        assert_eq!(typed.state, RegistrationState::ChoosingDate);
        assert_eq!(
            typed.replies[0].kind,
            ReplyKind::Greeting {
                participant_type: Some(ParticipantType::Organization)
            }
        );

        turn(&f.engine, 1, RegistrationEvent::Date(DateChoice::Ordinal(1))).await;
        let p = f.participants.get_by_key(&key(1)).await.unwrap().unwrap();
        assert_eq!(p.participant_type, ParticipantType::Organization);
        assert_eq!(p.language, Language::Ru);
    }

    #[tokio::test]
    async fn date_before_language_is_unrecognized() {
        let f = fixture(RegistrationSettings::default());
        turn(&f.engine, 1, RegistrationEvent::Start).await;

        let outcome = turn(&f.engine, 1, RegistrationEvent::Date(DateChoice::Ordinal(1))).await;

        assert_eq!(outcome.state, RegistrationState::ChoosingLanguage);
        assert_eq!(outcome.replies[0].kind, ReplyKind::Unrecognized);
        assert!(f.participants.is_empty().await);
    }

    #[tokio::test]
    async fn missing_session_resumes_registered_identity_in_menu() {
        let f = fixture(RegistrationSettings::default());
        register(&f.engine, 1, 1).await;
        // A fresh session store, as after a restart with in-memory sessions.
        let engine = RegistrationEngine::new(
            Arc::new(f.participants.clone()),
            Arc::new(InMemorySessionStore::new()),
            Arc::new(FixedClock::on(today())),
            RegistrationSettings::default(),
        );

        let outcome = turn(&engine, 1, RegistrationEvent::Menu(MenuAction::RemindId)).await;

        assert_eq!(outcome.state, RegistrationState::Menu);
        assert_eq!(outcome.language, Language::En);
        assert!(matches!(outcome.replies[0].kind, ReplyKind::RemindId { .. }));
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure handling
    // ════════════════════════════════════════════════════════════════════════════

    struct FailingRepository {
        fail_create: Option<ParticipantError>,
        creates: Mutex<u32>,
    }

    impl FailingRepository {
        fn failing_with(err: ParticipantError) -> Self {
            Self {
                fail_create: Some(err),
                creates: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl ParticipantRepository for FailingRepository {
        async fn get_by_key(&self, _: &InternalKey) -> Result<Option<Participant>, ParticipantError> {
            Ok(None)
        }

        async fn create(
            &self,
            _: NewParticipant,
            _: Option<SeatRequest>,
        ) -> Result<Participant, ParticipantError> {
            *self.creates.lock().unwrap() += 1;
            Err(self
                .fail_create
                .clone()
                .unwrap_or_else(|| ParticipantError::storage("down")))
        }

        async fn update_language(
            &self,
            key: &InternalKey,
            _: Language,
        ) -> Result<Participant, ParticipantError> {
            Err(ParticipantError::not_found(key.clone()))
        }

        async fn update_meeting_date(
            &self,
            key: &InternalKey,
            _: SeatRequest,
        ) -> Result<Participant, ParticipantError> {
            Err(ParticipantError::not_found(key.clone()))
        }

        async fn count_by_date(&self, _: NaiveDate) -> Result<u32, ParticipantError> {
            Ok(0)
        }

        async fn activate_by_code(
            &self,
            _: &ActivationCode,
            _: Timestamp,
        ) -> Result<ActivationOutcome, ParticipantError> {
            Ok(ActivationOutcome::UnknownCode)
        }

        async fn list_all(&self) -> Result<Vec<Participant>, ParticipantError> {
            Ok(Vec::new())
        }

        async fn list_by_date(&self, _: NaiveDate) -> Result<Vec<Participant>, ParticipantError> {
            Ok(Vec::new())
        }
    }

    /// Stores contexts but refuses to save any context that reached the menu.
    #[derive(Default)]
    struct MenuSaveFails {
        inner: InMemorySessionStore,
    }

    #[async_trait]
    impl SessionStore for MenuSaveFails {
        async fn load(&self, key: &InternalKey) -> Result<Option<RegistrationContext>, DomainError> {
            self.inner.load(key).await
        }

        async fn save(&self, context: &RegistrationContext) -> Result<(), DomainError> {
            if context.state == RegistrationState::Menu {
                return Err(DomainError::database("session table locked"));
            }
            self.inner.save(context).await
        }
    }

    fn engine_with(
        participants: Arc<dyn ParticipantRepository>,
        sessions: Arc<dyn SessionStore>,
    ) -> RegistrationEngine {
        RegistrationEngine::new(
            participants,
            sessions,
            Arc::new(FixedClock::on(today())),
            RegistrationSettings::default(),
        )
    }

    #[tokio::test]
    async fn storage_failure_answers_try_again_and_keeps_prior_state() {
        let sessions = InMemorySessionStore::new();
        let engine = engine_with(
            Arc::new(FailingRepository::failing_with(ParticipantError::storage(
                "connection refused",
            ))),
            Arc::new(sessions.clone()),
        );
        turn(&engine, 1, RegistrationEvent::Start).await;
        turn(&engine, 1, RegistrationEvent::Language(Language::En)).await;

        let outcome = turn(&engine, 1, RegistrationEvent::Date(DateChoice::Ordinal(1))).await;

        assert_eq!(kinds(&outcome), vec![&ReplyKind::TryAgainLater]);
        assert_eq!(outcome.language, Language::En);
        assert_eq!(outcome.state, RegistrationState::ChoosingDate);
        let saved = sessions.load(&key(1)).await.unwrap().unwrap();
        assert_eq!(saved.state, RegistrationState::ChoosingDate);
    }

    #[tokio::test]
    async fn code_space_exhaustion_escapes_as_error() {
        let engine = engine_with(
            Arc::new(FailingRepository::failing_with(
                ParticipantError::code_space_exhausted(1000),
            )),
            Arc::new(InMemorySessionStore::new()),
        );
        turn(&engine, 1, RegistrationEvent::Language(Language::En)).await;

        let result = engine
            .handle(HandleTurnCommand::new(
                key(1),
                RegistrationEvent::Date(DateChoice::Ordinal(1)),
                window(),
            ))
            .await;

        assert_eq!(
            result,
            Err(RegistrationError::CodeSpaceExhausted { attempts: 1000 })
        );
    }

    #[tokio::test]
    async fn session_save_failure_keeps_committed_registration() {
        let participants = InMemoryParticipantRepository::new(12000);
        let engine = engine_with(
            Arc::new(participants.clone()),
            Arc::new(MenuSaveFails::default()),
        );

        let outcome = register(&engine, 1, 1).await;

        assert_eq!(outcome.state, RegistrationState::Menu);
        assert!(outcome
            .replies
            .iter()
            .any(|r| matches!(r.kind, ReplyKind::Credentials { .. })));
        assert!(participants.get_by_key(&key(1)).await.unwrap().is_some());
    }
}
