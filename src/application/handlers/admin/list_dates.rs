//! ListDatesHandler - Per-date registration summary.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::participant::{Language, Participant};
use crate::ports::{AdminAuthorizer, AdminCredential, ParticipantRepository};

use super::{ensure_admin, AdminError};

#[derive(Debug, Clone, Default)]
pub struct ListDatesQuery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateSummary {
    pub date: NaiveDate,
    pub total: u32,
    pub activated: u32,
    pub by_language: BTreeMap<Language, u32>,
}

impl DateSummary {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total: 0,
            activated: 0,
            by_language: BTreeMap::new(),
        }
    }
}

/// Summaries for every date that holds at least one participant, in date order.
pub fn summarize_dates(participants: &[Participant]) -> Vec<DateSummary> {
    let mut by_date: BTreeMap<NaiveDate, DateSummary> = BTreeMap::new();
    for p in participants {
        let Some(date) = p.meeting_date else { continue };
        let summary = by_date
            .entry(date)
            .or_insert_with(|| DateSummary::empty(date));
        summary.total += 1;
        if p.is_activated {
            summary.activated += 1;
        }
        *summary.by_language.entry(p.language).or_default() += 1;
    }
    by_date.into_values().collect()
}

pub struct ListDatesHandler {
    participants: Arc<dyn ParticipantRepository>,
    authorizer: Arc<dyn AdminAuthorizer>,
}

impl ListDatesHandler {
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
        _query: ListDatesQuery,
    ) -> Result<Vec<DateSummary>, AdminError> {
        ensure_admin(self.authorizer.as_ref(), credential, "list_dates").await?;
        let participants = self.participants.list_all().await?;
        Ok(summarize_dates(&participants))
    }
}
