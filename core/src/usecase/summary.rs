use std::collections::BTreeMap;

use anyhow::Result;

use crate::calculator::round_hours;
use crate::model::event::Event;
use crate::model::phase::Phase;
use crate::repository::EventRepository;
use crate::service::dto::{MonthHours, PhaseHours, ScenarioHours, Summary};

pub struct SummaryUseCase<'a, R: EventRepository> {
    repo: &'a R,
}

impl<'a, R: EventRepository> SummaryUseCase<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    pub fn get_summary(&self) -> Result<Summary> {
        let events = self.repo.list()?;
        Ok(summarize(&events))
    }
}

pub fn summarize(events: &[Event]) -> Summary {
    Summary {
        total_hours: total_hours(events),
        event_count: events.len(),
        average_hours: average_hours(events),
        by_scenario: hours_by_scenario(events),
        by_phase: hours_by_phase(events),
        by_month: hours_by_month(events),
    }
}

pub fn total_hours(events: &[Event]) -> f64 {
    events.iter().map(|e| e.hours).sum()
}

/// 0 for an empty list.
pub fn average_hours(events: &[Event]) -> f64 {
    if events.is_empty() {
        return 0.0;
    }
    total_hours(events) / events.len() as f64
}

/// Scenario totals in order of first appearance.
pub fn hours_by_scenario(events: &[Event]) -> Vec<ScenarioHours> {
    let mut groups: Vec<ScenarioHours> = Vec::new();
    for event in events {
        match groups.iter_mut().find(|g| g.scenario == event.scenario) {
            Some(group) => group.hours += event.hours,
            None => groups.push(ScenarioHours {
                scenario: event.scenario.clone(),
                hours: event.hours,
            }),
        }
    }
    for group in &mut groups {
        group.hours = round_hours(group.hours);
    }
    groups
}

/// Phase totals in order of first appearance, with the phase color.
pub fn hours_by_phase(events: &[Event]) -> Vec<PhaseHours> {
    let mut groups: Vec<(Phase, f64)> = Vec::new();
    for event in events {
        match groups.iter_mut().find(|(phase, _)| *phase == event.phase) {
            Some((_, hours)) => *hours += event.hours,
            None => groups.push((event.phase, event.hours)),
        }
    }
    groups
        .into_iter()
        .map(|(phase, hours)| PhaseHours {
            phase,
            hours: round_hours(hours),
            color: phase.color(),
        })
        .collect()
}

/// Month totals, oldest month first.
pub fn hours_by_month(events: &[Event]) -> Vec<MonthHours> {
    let mut months: BTreeMap<String, f64> = BTreeMap::new();
    for event in events {
        *months.entry(event.month()).or_default() += event.hours;
    }
    months
        .into_iter()
        .map(|(month, hours)| MonthHours {
            month,
            hours: round_hours(hours),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::event::EventDraft;
    use crate::model::phase::EventType;
    use crate::repository::InMemoryEventRepository;

    fn run(scenario: &str, date: &str, hours: &str) -> Event {
        EventDraft {
            scenario: scenario.to_string(),
            phase: Some(Phase::Run),
            date: date.to_string(),
            duration: hours.to_string(),
            ..EventDraft::default()
        }
        .build_event()
        .unwrap()
    }

    fn typed(scenario: &str, phase: Phase, event_type: Option<EventType>) -> Event {
        EventDraft {
            scenario: scenario.to_string(),
            phase: Some(phase),
            event_type,
            date: "2024-01-10".to_string(),
            ..EventDraft::default()
        }
        .build_event()
        .unwrap()
    }

    #[test]
    fn test_totals_and_average() {
        let events = vec![
            typed("Cookie", Phase::Planning, Some(EventType::New)),
            typed("Cookie", Phase::Planning, Some(EventType::Existing)),
            typed("Stroke", Phase::Reset, None),
        ];
        assert_eq!(total_hours(&events), 8.0);
        assert!((average_hours(&events) - 8.0 / 3.0).abs() < 1e-9);
        assert_eq!(round_hours(average_hours(&events)), 2.67);
    }

    #[test]
    fn test_empty_list() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_hours, 0.0);
        assert_eq!(summary.average_hours, 0.0);
        assert!(summary.average_hours.is_finite());
        assert!(summary.by_scenario.is_empty());
        assert!(summary.by_phase.is_empty());
        assert!(summary.by_month.is_empty());
        assert!(summary.is_empty());
    }

    #[test]
    fn test_monthly_totals_are_grouped_and_sorted() {
        let events = vec![
            run("Cookie", "2024-01-15", "2"),
            run("Cookie", "2024-01-20", "3"),
        ];
        assert_eq!(
            hours_by_month(&events),
            vec![MonthHours { month: "2024-01".to_string(), hours: 5.0 }]
        );

        let events = vec![
            run("Cookie", "2024-02-01", "1"),
            run("Cookie", "2024-01-31", "1.5"),
            run("Cookie", "2023-12-31", "0.25"),
        ];
        let months: Vec<String> = hours_by_month(&events).into_iter().map(|m| m.month).collect();
        assert_eq!(months, vec!["2023-12", "2024-01", "2024-02"]);
    }

    #[test]
    fn test_scenario_totals_keep_first_seen_order() {
        let events = vec![
            run("Stroke", "2024-01-15", "1"),
            run("Cookie", "2024-01-15", "2"),
            run("Stroke", "2024-01-15", "0.5"),
        ];
        assert_eq!(
            hours_by_scenario(&events),
            vec![
                ScenarioHours { scenario: "Stroke".to_string(), hours: 1.5 },
                ScenarioHours { scenario: "Cookie".to_string(), hours: 2.0 },
            ]
        );
    }

    #[test]
    fn test_phase_totals_carry_colors() {
        let events = vec![
            typed("Cookie", Phase::Teardown, None),
            typed("Cookie", Phase::Setup, Some(EventType::First)),
            typed("Stroke", Phase::Teardown, None),
        ];
        let phases = hours_by_phase(&events);
        assert_eq!(phases.len(), 2);
        assert_eq!(phases[0].phase, Phase::Teardown);
        assert_eq!(phases[0].hours, 4.0);
        assert_eq!(phases[0].color.hex, "#ef4444");
        assert_eq!(phases[1].phase, Phase::Setup);
        assert_eq!(phases[1].hours, 2.0);
        assert_eq!(phases[1].color.hex, "#10b981");
    }

    #[test]
    fn test_group_sums_are_rounded_but_totals_are_not() {
        let events = vec![
            run("Cookie", "2024-01-15", "0.333"),
            run("Cookie", "2024-01-16", "0.333"),
        ];
        let summary = summarize(&events);
        assert_eq!(summary.by_scenario[0].hours, 0.67);
        assert_eq!(summary.by_month[0].hours, 0.67);
        assert_eq!(summary.total_hours, 0.666);
    }

    #[test]
    fn test_use_case_reads_repository() {
        let mut repo = InMemoryEventRepository::new();
        repo.create(run("Cookie", "2024-01-15", "2")).unwrap();
        repo.create(typed("Cookie", Phase::Reset, None)).unwrap();

        let summary = SummaryUseCase::new(&repo).get_summary().unwrap();
        assert_eq!(summary.event_count, 2);
        assert_eq!(summary.total_hours, 2.5);
        assert_eq!(summary.by_phase[0].phase, Phase::Reset);
    }
}
