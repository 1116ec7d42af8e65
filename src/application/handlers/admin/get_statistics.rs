//! GetStatisticsHandler - Query handler for registration statistics.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::participant::{Language, Participant, ParticipantType};
use crate::ports::{AdminAuthorizer, AdminCredential, ParticipantRepository};

use super::{ensure_admin, AdminError};

#[derive(Debug, Clone, Default)]
pub struct GetStatisticsQuery;

/// Participants holding one meeting date. `date` is `None` for participants
/// without a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateCount {
    pub date: Option<NaiveDate>,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationStatistics {
    pub total: u32,
    pub activated: u32,
    pub not_activated: u32,
    pub by_language: BTreeMap<Language, u32>,
    /// Sorted by date, undated bucket first.
    pub by_meeting_date: Vec<DateCount>,
    pub by_participant_type: BTreeMap<ParticipantType, u32>,
}

impl RegistrationStatistics {
    pub fn from_participants(participants: &[Participant]) -> Self {
        let mut stats = Self::default();
        let mut by_date: BTreeMap<Option<NaiveDate>, u32> = BTreeMap::new();

        for p in participants {
            stats.total += 1;
            if p.is_activated {
                stats.activated += 1;
            }
            *stats.by_language.entry(p.language).or_default() += 1;
            *stats.by_participant_type.entry(p.participant_type).or_default() += 1;
            *by_date.entry(p.meeting_date).or_default() += 1;
        }
        stats.not_activated = stats.total - stats.activated;
        stats.by_meeting_date = by_date
            .into_iter()
            .map(|(date, count)| DateCount { date, count })
            .collect();
        stats
    }
}

pub struct GetStatisticsHandler {
    participants: Arc<dyn ParticipantRepository>,
    authorizer: Arc<dyn AdminAuthorizer>,
}

impl GetStatisticsHandler {
    pub fn new(
        participants: Arc<dyn ParticipantRepository>,
        authorizer: Arc<dyn AdminAuthorizer>,
    ) -> Self {
        Self {
            participants,
            authorizer,
        }
    }

    pub async fn handle(
        &self,
        credential: &AdminCredential,
        _query: GetStatisticsQuery,
    ) -> Result<RegistrationStatistics, AdminError> {
        ensure_admin(self.authorizer.as_ref(), credential, "get_statistics").await?;
        let participants = self.participants.list_all().await?;
        Ok(RegistrationStatistics::from_participants(&participants))
    }
}
