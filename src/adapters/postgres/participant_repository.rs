//! PostgreSQL implementation of ParticipantRepository.
//!
//! Mutations take transaction-scoped advisory locks:
//! - one constant key serializes number reservation across creates
//! - one key per meeting date serializes the capacity check and the write
//!
//! Creates take the numbering lock before the date lock. Reschedules take only
//! the date lock, so the two paths cannot deadlock.

use async_trait::async_trait;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::sync::Arc;

use crate::domain::foundation::{InternalKey, ParticipantNumber, Timestamp};
use crate::domain::participant::{
    ActivationCode, CodeGenerator, Language, NewParticipant, Participant, ParticipantError,
    ParticipantType, RandomCodeGenerator, MAX_CODE_ATTEMPTS,
};
use crate::domain::scheduling::SeatRequest;
use crate::ports::{ActivationOutcome, ParticipantRepository};

const NUMBERING_LOCK: i64 = 0x5245_4749_0000_0001;
const DATE_LOCK_BASE: i64 = 0x5245_4749_0001_0000;
const NUMBER_COUNTER: &str = "participant_number";

const SELECT_COLUMNS: &str = r#"
    internal_key, display_name, handle, participant_type, number,
    activation_code, language, meeting_date, registered_at,
    is_activated, activated_at
"#;

/// PostgreSQL implementation of ParticipantRepository.
#[derive(Clone)]
pub struct PostgresParticipantRepository {
    pool: PgPool,
    codes: Arc<dyn CodeGenerator>,
    number_base: i64,
}

impl PostgresParticipantRepository {
    pub fn new(pool: PgPool, number_base: i64) -> Self {
        Self::with_code_generator(pool, number_base, Arc::new(RandomCodeGenerator))
    }

    pub fn with_code_generator(
        pool: PgPool,
        number_base: i64,
        codes: Arc<dyn CodeGenerator>,
    ) -> Self {
        Self {
            pool,
            codes,
            number_base,
        }
    }

    async fn begin(&self) -> Result<Transaction<'_, Postgres>, ParticipantError> {
        self.pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to start transaction", e))
    }

    async fn fetch_for_update(
        tx: &mut Transaction<'_, Postgres>,
        key: &InternalKey,
    ) -> Result<Participant, ParticipantError> {
        let query = format!(
            "SELECT {} FROM participants WHERE internal_key = $1 FOR UPDATE",
            SELECT_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(key.as_str())
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| db_error("Failed to fetch participant", e))?;

        match row {
            Some(row) => ParticipantRow::from_row(&row)?.try_into(),
            None => Err(ParticipantError::not_found(key.clone())),
        }
    }
}

#[async_trait]
impl ParticipantRepository for PostgresParticipantRepository {
    async fn get_by_key(&self, key: &InternalKey) -> Result<Option<Participant>, ParticipantError> {
        let query = format!(
            "SELECT {} FROM participants WHERE internal_key = $1",
            SELECT_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to fetch participant", e))?;

        row.map(|row| ParticipantRow::from_row(&row)?.try_into())
            .transpose()
    }

    async fn create(
        &self,
        new: NewParticipant,
        seat: Option<SeatRequest>,
    ) -> Result<Participant, ParticipantError> {
        let mut tx = self.begin().await?;

        advisory_lock(&mut tx, NUMBERING_LOCK).await?;
        if let Some(seat) = seat {
            advisory_lock(&mut tx, date_lock_key(seat.date)).await?;
        }

        let exists: Option<(i32,)> =
            sqlx::query_as("SELECT 1 FROM participants WHERE internal_key = $1")
                .bind(new.internal_key.as_str())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to check participant existence", e))?;
        if exists.is_some() {
            return Err(ParticipantError::already_registered(new.internal_key));
        }

        if let Some(seat) = seat {
            let count = count_on(&mut tx, seat.date).await?;
            if !seat.capacity.has_capacity(count) {
                return Err(ParticipantError::capacity_exceeded(
                    seat.date,
                    seat.capacity.cap(),
                ));
            }
        }

        let (next,): (i64,) = sqlx::query_as(
            r#"
            SELECT GREATEST(
                COALESCE((SELECT high_water FROM registry_counters WHERE name = $1), 0),
                COALESCE((SELECT MAX(number) FROM participants), 0),
                $2
            ) + 1
            "#,
        )
        .bind(NUMBER_COUNTER)
        .bind(self.number_base)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to reserve participant number", e))?;

        let insert = format!(
            r#"
            INSERT INTO participants (
                internal_key, display_name, handle, participant_type, number,
                activation_code, language, meeting_date, registered_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT DO NOTHING
            RETURNING {}
            "#,
            SELECT_COLUMNS
        );
        let registered_at = Timestamp::now();
        let mut inserted = None;
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = self.codes.generate();
            let row = sqlx::query(&insert)
                .bind(new.internal_key.as_str())
                .bind(new.display_name.as_deref())
                .bind(new.handle.as_deref())
                .bind(new.participant_type.as_str())
                .bind(next)
                .bind(code.as_str())
                .bind(new.language.code())
                .bind(seat.map(|s| s.date))
                .bind(registered_at.as_datetime())
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| db_error("Failed to insert participant", e))?;
            if let Some(row) = row {
                inserted = Some(row);
                break;
            }
            tracing::debug!(number = next, "activation code collided, redrawing");
        }
        let Some(row) = inserted else {
            return Err(ParticipantError::code_space_exhausted(MAX_CODE_ATTEMPTS));
        };
        let participant: Participant = ParticipantRow::from_row(&row)?.try_into()?;

        sqlx::query(
            r#"
            INSERT INTO registry_counters (name, high_water) VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE
            SET high_water = GREATEST(registry_counters.high_water, EXCLUDED.high_water)
            "#,
        )
        .bind(NUMBER_COUNTER)
        .bind(next)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to advance number counter", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        Ok(participant)
    }

    async fn update_language(
        &self,
        key: &InternalKey,
        language: Language,
    ) -> Result<Participant, ParticipantError> {
        let query = format!(
            "UPDATE participants SET language = $2 WHERE internal_key = $1 RETURNING {}",
            SELECT_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(key.as_str())
            .bind(language.code())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to update language", e))?;

        match row {
            Some(row) => ParticipantRow::from_row(&row)?.try_into(),
            None => Err(ParticipantError::not_found(key.clone())),
        }
    }

    async fn update_meeting_date(
        &self,
        key: &InternalKey,
        seat: SeatRequest,
    ) -> Result<Participant, ParticipantError> {
        let mut tx = self.begin().await?;
        advisory_lock(&mut tx, date_lock_key(seat.date)).await?;

        let mut participant = Self::fetch_for_update(&mut tx, key).await?;
        if participant.meeting_date == Some(seat.date) {
            return Ok(participant);
        }

        let count = count_on(&mut tx, seat.date).await?;
        if !seat.capacity.has_capacity(count) {
            return Err(ParticipantError::capacity_exceeded(
                seat.date,
                seat.capacity.cap(),
            ));
        }

        sqlx::query("UPDATE participants SET meeting_date = $2 WHERE internal_key = $1")
            .bind(key.as_str())
            .bind(seat.date)
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to update meeting date", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        participant.reschedule(seat.date);
        Ok(participant)
    }

    async fn count_by_date(&self, date: NaiveDate) -> Result<u32, ParticipantError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM participants WHERE meeting_date = $1")
                .bind(date)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to count participants", e))?;
        Ok(count as u32)
    }

    async fn activate_by_code(
        &self,
        code: &ActivationCode,
        at: Timestamp,
    ) -> Result<ActivationOutcome, ParticipantError> {
        let mut tx = self.begin().await?;

        let query = format!(
            "SELECT {} FROM participants WHERE activation_code = $1 FOR UPDATE",
            SELECT_COLUMNS
        );
        let row = sqlx::query(&query)
            .bind(code.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to fetch participant by code", e))?;
        let Some(row) = row else {
            return Ok(ActivationOutcome::UnknownCode);
        };
        let mut participant: Participant = ParticipantRow::from_row(&row)?.try_into()?;

        if !participant.activate(at) {
            return Ok(ActivationOutcome::AlreadyActivated(participant));
        }

        sqlx::query(
            r#"
            UPDATE participants SET is_activated = TRUE, activated_at = $2
            WHERE internal_key = $1 AND is_activated = FALSE
            "#,
        )
        .bind(participant.internal_key.as_str())
        .bind(at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to activate participant", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        Ok(ActivationOutcome::Activated(participant))
    }

    async fn list_all(&self) -> Result<Vec<Participant>, ParticipantError> {
        let query = format!("SELECT {} FROM participants ORDER BY number", SELECT_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list participants", e))?;
        rows_to_participants(rows)
    }

    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Participant>, ParticipantError> {
        let query = format!(
            "SELECT {} FROM participants WHERE meeting_date = $1 ORDER BY number",
            SELECT_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list participants by date", e))?;
        rows_to_participants(rows)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

fn db_error(context: &str, e: sqlx::Error) -> ParticipantError {
    ParticipantError::storage(format!("{}: {}", context, e))
}

fn date_lock_key(date: NaiveDate) -> i64 {
    DATE_LOCK_BASE + i64::from(date.num_days_from_ce())
}

async fn advisory_lock(
    tx: &mut Transaction<'_, Postgres>,
    key: i64,
) -> Result<(), ParticipantError> {
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(key)
        .execute(&mut **tx)
        .await
        .map_err(|e| db_error("Failed to acquire advisory lock", e))?;
    Ok(())
}

async fn count_on(
    tx: &mut Transaction<'_, Postgres>,
    date: NaiveDate,
) -> Result<u32, ParticipantError> {
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM participants WHERE meeting_date = $1")
            .bind(date)
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| db_error("Failed to count participants", e))?;
    Ok(count as u32)
}

fn rows_to_participants(rows: Vec<PgRow>) -> Result<Vec<Participant>, ParticipantError> {
    rows.iter()
        .map(|row| ParticipantRow::from_row(row)?.try_into())
        .collect()
}

/// Raw column values before domain validation.
#[derive(Debug, Clone)]
struct ParticipantRow {
    internal_key: String,
    display_name: Option<String>,
    handle: Option<String>,
    participant_type: String,
    number: i64,
    activation_code: String,
    language: String,
    meeting_date: Option<NaiveDate>,
    registered_at: DateTime<Utc>,
    is_activated: bool,
    activated_at: Option<DateTime<Utc>>,
}

impl ParticipantRow {
    fn from_row(row: &PgRow) -> Result<Self, ParticipantError> {
        fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, ParticipantError>
        where
            T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
        {
            row.try_get(column)
                .map_err(|e| db_error(&format!("Failed to get {}", column), e))
        }

        Ok(Self {
            internal_key: get(row, "internal_key")?,
            display_name: get(row, "display_name")?,
            handle: get(row, "handle")?,
            participant_type: get(row, "participant_type")?,
            number: get(row, "number")?,
            activation_code: get(row, "activation_code")?,
            language: get(row, "language")?,
            meeting_date: get(row, "meeting_date")?,
            registered_at: get(row, "registered_at")?,
            is_activated: get(row, "is_activated")?,
            activated_at: get(row, "activated_at")?,
        })
    }
}

impl TryFrom<ParticipantRow> for Participant {
    type Error = ParticipantError;

    fn try_from(row: ParticipantRow) -> Result<Self, Self::Error> {
        let corrupt = |field: &str, e: &dyn std::fmt::Display| {
            ParticipantError::storage(format!(
                "Invalid {} stored for {}: {}",
                field, row.internal_key, e
            ))
        };

        let internal_key =
            InternalKey::new(row.internal_key.clone()).map_err(|e| corrupt("internal_key", &e))?;
        let participant_type: ParticipantType = row
            .participant_type
            .parse()
            .map_err(|e| corrupt("participant_type", &e))?;
        let language: Language = row.language.parse().map_err(|e| corrupt("language", &e))?;
        let activation_code = ActivationCode::parse(&row.activation_code)
            .map_err(|e| corrupt("activation_code", &e))?;

        Ok(Participant {
            internal_key,
            display_name: row.display_name,
            handle: row.handle,
            participant_type,
            number: ParticipantNumber::new(row.number),
            activation_code,
            language,
            meeting_date: row.meeting_date,
            registered_at: Timestamp::from_datetime(row.registered_at),
            is_activated: row.is_activated,
            activated_at: row.activated_at.map(Timestamp::from_datetime),
        })
    }
}
