//! In-memory implementation of ParticipantRepository.
//!
//! Every mutation runs under one write lock, which serializes number
//! reservation, code issuance, the capacity check and the write. Reads share
//! a read lock and never block each other.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{InternalKey, ParticipantNumber, Timestamp};
use crate::domain::participant::{
    draw_unique_code, ActivationCode, CodeGenerator, Language, NewParticipant, Participant,
    ParticipantError, RandomCodeGenerator,
};
use crate::domain::scheduling::SeatRequest;
use crate::ports::{ActivationOutcome, ParticipantRepository};

#[derive(Debug, Default)]
struct Registry {
    by_key: HashMap<InternalKey, Participant>,
    code_owners: HashMap<ActivationCode, InternalKey>,
    /// Highest number ever issued, kept even if rows disappear.
    high_water: i64,
}

impl Registry {
    fn count_on(&self, date: NaiveDate) -> u32 {
        self.by_key
            .values()
            .filter(|p| p.meeting_date == Some(date))
            .count() as u32
    }

    fn next_number(&mut self, base: i64) -> ParticipantNumber {
        let max_existing = self
            .by_key
            .values()
            .map(|p| p.number.value())
            .max()
            .unwrap_or(base);
        let next = self.high_water.max(max_existing).max(base) + 1;
        self.high_water = next;
        ParticipantNumber::new(next)
    }

    fn sorted(mut participants: Vec<Participant>) -> Vec<Participant> {
        participants.sort_by_key(|p| p.number);
        participants
    }
}

/// Process-local participant store.
#[derive(Clone)]
pub struct InMemoryParticipantRepository {
    registry: Arc<RwLock<Registry>>,
    codes: Arc<dyn CodeGenerator>,
    number_base: i64,
}

impl InMemoryParticipantRepository {
    pub fn new(number_base: i64) -> Self {
        Self::with_code_generator(number_base, Arc::new(RandomCodeGenerator))
    }

    pub fn with_code_generator(number_base: i64, codes: Arc<dyn CodeGenerator>) -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry::default())),
            codes,
            number_base,
        }
    }

    /// Number of stored participants.
    pub async fn len(&self) -> usize {
        self.registry.read().await.by_key.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ParticipantRepository for InMemoryParticipantRepository {
    async fn get_by_key(&self, key: &InternalKey) -> Result<Option<Participant>, ParticipantError> {
        Ok(self.registry.read().await.by_key.get(key).cloned())
    }

    async fn create(
        &self,
        new: NewParticipant,
        seat: Option<SeatRequest>,
    ) -> Result<Participant, ParticipantError> {
        let mut registry = self.registry.write().await;

        if registry.by_key.contains_key(&new.internal_key) {
            return Err(ParticipantError::already_registered(new.internal_key));
        }
        if let Some(seat) = seat {
            if !seat.capacity.has_capacity(registry.count_on(seat.date)) {
                return Err(ParticipantError::capacity_exceeded(
                    seat.date,
                    seat.capacity.cap(),
                ));
            }
        }

        let code = draw_unique_code(self.codes.as_ref(), |c| {
            registry.code_owners.contains_key(c)
        })?;
        let number = registry.next_number(self.number_base);

        let participant = Participant::issue(
            new,
            number,
            code.clone(),
            seat.map(|s| s.date),
            Timestamp::now(),
        );
        registry
            .code_owners
            .insert(code, participant.internal_key.clone());
        registry
            .by_key
            .insert(participant.internal_key.clone(), participant.clone());

        Ok(participant)
    }

    async fn update_language(
        &self,
        key: &InternalKey,
        language: Language,
    ) -> Result<Participant, ParticipantError> {
        let mut registry = self.registry.write().await;
        let participant = registry
            .by_key
            .get_mut(key)
            .ok_or_else(|| ParticipantError::not_found(key.clone()))?;
        participant.change_language(language);
        Ok(participant.clone())
    }

    async fn update_meeting_date(
        &self,
        key: &InternalKey,
        seat: SeatRequest,
    ) -> Result<Participant, ParticipantError> {
        let mut registry = self.registry.write().await;
        let current = registry
            .by_key
            .get(key)
            .ok_or_else(|| ParticipantError::not_found(key.clone()))?;

        if current.meeting_date == Some(seat.date) {
            return Ok(current.clone());
        }
        if !seat.capacity.has_capacity(registry.count_on(seat.date)) {
            return Err(ParticipantError::capacity_exceeded(
                seat.date,
                seat.capacity.cap(),
            ));
        }

        let participant = registry
            .by_key
            .get_mut(key)
            .ok_or_else(|| ParticipantError::not_found(key.clone()))?;
        participant.reschedule(seat.date);
        Ok(participant.clone())
    }

    async fn count_by_date(&self, date: NaiveDate) -> Result<u32, ParticipantError> {
        Ok(self.registry.read().await.count_on(date))
    }

    async fn activate_by_code(
        &self,
        code: &ActivationCode,
        at: Timestamp,
    ) -> Result<ActivationOutcome, ParticipantError> {
        let mut registry = self.registry.write().await;
        let Some(key) = registry.code_owners.get(code).cloned() else {
            return Ok(ActivationOutcome::UnknownCode);
        };
        let Some(participant) = registry.by_key.get_mut(&key) else {
            return Ok(ActivationOutcome::UnknownCode);
        };

        if participant.activate(at) {
            Ok(ActivationOutcome::Activated(participant.clone()))
        } else {
            Ok(ActivationOutcome::AlreadyActivated(participant.clone()))
        }
    }

    async fn list_all(&self) -> Result<Vec<Participant>, ParticipantError> {
        let registry = self.registry.read().await;
        Ok(Registry::sorted(registry.by_key.values().cloned().collect()))
    }

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Participant>, ParticipantError> {
        let registry = self.registry.read().await;
        Ok(Registry::sorted(
            registry
                .by_key
                .values()
                .filter(|p| p.meeting_date == Some(date))
                .cloned()
                .collect(),
        ))
    }
}
