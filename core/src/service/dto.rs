use crate::model::phase::{Phase, PhaseColor};

#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioHours {
    pub scenario: String,
    pub hours: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseHours {
    pub phase: Phase,
    pub hours: f64,
    pub color: PhaseColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthHours {
    pub month: String, // YYYY-MM
    pub hours: f64,
}

/// Everything the table, dashboard and report views read.
///
/// Group sums are rounded to 2 decimals; `total_hours` and
/// `average_hours` keep full precision.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub total_hours: f64,
    pub event_count: usize,
    pub average_hours: f64,
    pub by_scenario: Vec<ScenarioHours>,
    pub by_phase: Vec<PhaseHours>,
    pub by_month: Vec<MonthHours>,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.event_count == 0
    }
}
