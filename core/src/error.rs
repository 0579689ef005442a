//! Rejections raised by the validation gate in front of the event store.
//! They are reported back to whoever filled in the form; nothing is stored.

use thiserror::Error;

use crate::model::phase::{EventType, Phase};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in Scenario, Phase, and Date")]
    MissingRequired,

    #[error("Please select Type for {0} phase")]
    MissingType(Phase),

    #[error("Please enter Duration for RUN phase")]
    MissingDuration,

    #[error("Type {event_type} does not apply to {phase} phase")]
    TypeMismatch { phase: Phase, event_type: EventType },

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}
