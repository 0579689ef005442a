use crate::model::phase::{EventType, Phase};

pub const RESET_HOURS: f64 = 0.5;
pub const TEARDOWN_HOURS: f64 = 2.0;

/// Fixed hours for the phases whose cost depends on the type.
pub const HOURS_TABLE: [(Phase, EventType, f64); 4] = [
    (Phase::Planning, EventType::New, 4.5),
    (Phase::Planning, EventType::Existing, 3.0),
    (Phase::Setup, EventType::First, 2.0),
    (Phase::Setup, EventType::Proceeding, 0.0),
];

/// Hours credited to an event.
///
/// RUN uses the entered duration, RESET and TEARDOWN are fixed and ignore
/// any duration, everything else comes from [`HOURS_TABLE`]. Combinations
/// missing from the table are worth 0.
pub fn calculate_hours(phase: Phase, event_type: Option<EventType>, duration: &str) -> f64 {
    match phase {
        Phase::Run => parse_duration_hours(duration),
        Phase::Reset => RESET_HOURS,
        Phase::Teardown => TEARDOWN_HOURS,
        Phase::Planning | Phase::Setup => event_type
            .and_then(|ty| lookup(phase, ty))
            .unwrap_or(0.0),
    }
}

fn lookup(phase: Phase, event_type: EventType) -> Option<f64> {
    HOURS_TABLE
        .iter()
        .find(|(p, t, _)| *p == phase && *t == event_type)
        .map(|(_, _, hours)| *hours)
}

/// Lenient decimal parse of a duration in hours.
///
/// Blank, unparsable, negative and non-finite input all yield 0.
pub fn parse_duration_hours(input: &str) -> f64 {
    let input = input.trim();
    if input.is_empty() {
        return 0.0;
    }
    match input.parse::<f64>() {
        Ok(hours) if hours.is_finite() && hours >= 0.0 => hours,
        _ => {
            log::debug!("Duration '{}' is not a usable number, counting 0 hours", input);
            0.0
        }
    }
}

/// Rounds an hour sum to 2 decimals for display.
pub fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Phase::Run, None, "3", 3.0)]
    #[case(Phase::Run, None, "1.5", 1.5)]
    #[case(Phase::Run, None, "", 0.0)]
    #[case(Phase::Run, None, "abc", 0.0)]
    #[case(Phase::Run, None, "1.5h", 0.0)]
    #[case(Phase::Run, Some(EventType::New), " 2 ", 2.0)]
    #[case(Phase::Reset, None, "100", 0.5)]
    #[case(Phase::Teardown, None, "7", 2.0)]
    #[case(Phase::Teardown, Some(EventType::First), "", 2.0)]
    #[case(Phase::Planning, Some(EventType::New), "", 4.5)]
    #[case(Phase::Planning, Some(EventType::Existing), "9", 3.0)]
    #[case(Phase::Setup, Some(EventType::First), "", 2.0)]
    #[case(Phase::Setup, Some(EventType::Proceeding), "", 0.0)]
    #[case(Phase::Planning, None, "", 0.0)]
    #[case(Phase::Planning, Some(EventType::First), "", 0.0)]
    #[case(Phase::Setup, Some(EventType::Existing), "4", 0.0)]
    fn test_calculate_hours(
        #[case] phase: Phase,
        #[case] event_type: Option<EventType>,
        #[case] duration: &str,
        #[case] expected: f64,
    ) {
        assert_eq!(calculate_hours(phase, event_type, duration), expected);
    }

    #[test]
    fn test_result_is_always_finite_and_non_negative() {
        let durations = ["-3", "NaN", "inf", "-inf", "1e400", "", "0", "2.25"];
        let types = [
            None,
            Some(EventType::New),
            Some(EventType::Existing),
            Some(EventType::First),
            Some(EventType::Proceeding),
        ];
        for phase in Phase::ALL {
            for ty in types {
                for d in durations {
                    let hours = calculate_hours(phase, ty, d);
                    assert!(hours.is_finite() && hours >= 0.0, "{phase} {ty:?} {d} -> {hours}");
                }
            }
        }
    }

    #[test]
    fn test_round_hours() {
        assert_eq!(round_hours(8.0 / 3.0), 2.67);
        assert_eq!(round_hours(0.1 + 0.2), 0.3);
        assert_eq!(round_hours(0.0), 0.0);
    }
}
