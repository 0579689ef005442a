use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::calculator::{calculate_hours, parse_duration_hours};
use crate::error::ValidationError;
use crate::model::phase::{EventType, Phase, Status};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One logged occurrence of lab activity. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: Uuid,
    pub date: NaiveDate,
    pub program: String,
    pub semester: String,
    pub scenario: String,
    pub staff: String,
    pub phase: Phase,
    pub event_type: Option<EventType>,
    pub room: String,
    pub num_learners: String,
    pub technology: String,
    pub status: Status,
    /// Entered duration in hours. Only RUN events carry one.
    pub duration: f64,
    /// Hours credited to the event, fixed at creation.
    pub hours: f64,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Calendar month key, `YYYY-MM`.
    pub fn month(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// Contents of the input form before they are accepted as an [`Event`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub date: String,
    pub program: String,
    pub semester: String,
    pub scenario: String,
    pub staff: String,
    pub phase: Option<Phase>,
    pub event_type: Option<EventType>,
    pub room: String,
    pub num_learners: String,
    pub technology: String,
    pub status: Status,
    pub duration: String,
}

impl EventDraft {
    /// Selects a phase. The type is phase-specific, so it is cleared.
    pub fn set_phase(&mut self, phase: Option<Phase>) {
        self.phase = phase;
        self.event_type = None;
    }

    pub fn clear(&mut self) {
        *self = EventDraft::default();
    }

    /// Checks the draft and builds the event, computing its hours once.
    pub fn build_event(&self) -> Result<Event, ValidationError> {
        let scenario = self.scenario.trim();
        let date_str = self.date.trim();
        let phase = match self.phase {
            Some(phase) if !scenario.is_empty() && !date_str.is_empty() => phase,
            _ => return Err(ValidationError::MissingRequired),
        };

        let event_type = if phase.requires_type() {
            match self.event_type {
                None => return Err(ValidationError::MissingType(phase)),
                Some(ty) if ty.phase() != phase => {
                    return Err(ValidationError::TypeMismatch { phase, event_type: ty });
                }
                Some(ty) => Some(ty),
            }
        } else {
            None
        };

        if phase.requires_duration() && self.duration.trim().is_empty() {
            return Err(ValidationError::MissingDuration);
        }

        let date = NaiveDate::parse_from_str(date_str, DATE_FORMAT)
            .map_err(|_| ValidationError::InvalidDate(date_str.to_string()))?;

        let duration = if phase.requires_duration() {
            parse_duration_hours(&self.duration)
        } else {
            0.0
        };

        Ok(Event {
            id: Uuid::now_v7(),
            date,
            program: self.program.trim().to_string(),
            semester: self.semester.trim().to_string(),
            scenario: scenario.to_string(),
            staff: self.staff.trim().to_string(),
            phase,
            event_type,
            room: self.room.trim().to_string(),
            num_learners: self.num_learners.trim().to_string(),
            technology: self.technology.trim().to_string(),
            status: self.status,
            duration,
            hours: calculate_hours(phase, event_type, &self.duration),
            created_at: Utc::now(),
        })
    }
}
