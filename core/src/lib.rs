pub mod calculator;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;
pub mod usecase;

pub use calculator::{calculate_hours, parse_duration_hours, round_hours, HOURS_TABLE};
pub use error::ValidationError;
pub use model::event::{Event, EventDraft};
pub use model::phase::{EventType, Phase, PhaseColor, Status};
pub use repository::{EventRepository, InMemoryEventRepository};
pub use service::dto::{MonthHours, PhaseHours, ScenarioHours, Summary};
pub use service::event_service::EventService;
