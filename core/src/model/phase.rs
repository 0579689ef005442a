use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Error};

/// Stage of a simulation-lab event lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Planning,
    Setup,
    Run,
    Reset,
    Teardown,
}

/// Display color of a phase, used by charts and breakdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseColor {
    pub hex: &'static str,
    pub rgb: (u8, u8, u8),
}

pub const PLANNING_COLOR: PhaseColor = PhaseColor { hex: "#3b82f6", rgb: (0x3b, 0x82, 0xf6) };
pub const SETUP_COLOR: PhaseColor = PhaseColor { hex: "#10b981", rgb: (0x10, 0xb9, 0x81) };
pub const RUN_COLOR: PhaseColor = PhaseColor { hex: "#f59e0b", rgb: (0xf5, 0x9e, 0x0b) };
pub const RESET_COLOR: PhaseColor = PhaseColor { hex: "#8b5cf6", rgb: (0x8b, 0x5c, 0xf6) };
pub const TEARDOWN_COLOR: PhaseColor = PhaseColor { hex: "#ef4444", rgb: (0xef, 0x44, 0x44) };

impl Phase {
    pub const ALL: [Phase; 5] = [
        Phase::Planning,
        Phase::Setup,
        Phase::Run,
        Phase::Reset,
        Phase::Teardown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Planning => "PLANNING",
            Phase::Setup => "SETUP",
            Phase::Run => "RUN",
            Phase::Reset => "RESET",
            Phase::Teardown => "TEARDOWN",
        }
    }

    /// Types selectable for this phase. Empty when the phase has no type.
    pub fn types(&self) -> &'static [EventType] {
        match self {
            Phase::Planning => &[EventType::New, EventType::Existing],
            Phase::Setup => &[EventType::First, EventType::Proceeding],
            _ => &[],
        }
    }

    pub fn requires_type(&self) -> bool {
        !self.types().is_empty()
    }

    pub fn requires_duration(&self) -> bool {
        matches!(self, Phase::Run)
    }

    pub fn color(&self) -> PhaseColor {
        match self {
            Phase::Planning => PLANNING_COLOR,
            Phase::Setup => SETUP_COLOR,
            Phase::Run => RUN_COLOR,
            Phase::Reset => RESET_COLOR,
            Phase::Teardown => TEARDOWN_COLOR,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "planning" => Ok(Phase::Planning),
            "setup" => Ok(Phase::Setup),
            "run" => Ok(Phase::Run),
            "reset" => Ok(Phase::Reset),
            "teardown" => Ok(Phase::Teardown),
            _ => Err(anyhow!("Unknown phase: '{}'", s)),
        }
    }
}

/// Sub-classification of PLANNING (NEW/EXISTING) and SETUP (FIRST/PROCEEDING).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    New,
    Existing,
    First,
    Proceeding,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::New => "NEW",
            EventType::Existing => "EXISTING",
            EventType::First => "FIRST",
            EventType::Proceeding => "PROCEEDING",
        }
    }

    /// Phase this type belongs to.
    pub fn phase(&self) -> Phase {
        match self {
            EventType::New | EventType::Existing => Phase::Planning,
            EventType::First | EventType::Proceeding => Phase::Setup,
        }
    }

    /// Label used by the input form, e.g. "NEW Scenario" or "FIRST Run".
    pub fn form_label(&self) -> &'static str {
        match self {
            EventType::New => "NEW Scenario",
            EventType::Existing => "EXISTING Scenario",
            EventType::First => "FIRST Run",
            EventType::Proceeding => "PROCEEDING Run",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "new" => Ok(EventType::New),
            "existing" => Ok(EventType::Existing),
            "first" => Ok(EventType::First),
            "proceeding" => Ok(EventType::Proceeding),
            _ => Err(anyhow!("Unknown type: '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Planned,
    InProgress,
    Complete,
}

impl Default for Status {
    fn default() -> Self {
        Status::Planned
    }
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Planned, Status::InProgress, Status::Complete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Planned => "Planned",
            Status::InProgress => "In Progress",
            Status::Complete => "Complete",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "planned" => Ok(Status::Planned),
            "in progress" | "in-progress" | "inprogress" => Ok(Status::InProgress),
            "complete" => Ok(Status::Complete),
            _ => Err(anyhow!("Unknown status: '{}'", s)),
        }
    }
}
