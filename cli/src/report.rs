use simlab_core::calculator::{RESET_HOURS, TEARDOWN_HOURS};
use simlab_core::{Phase, Summary, HOURS_TABLE};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Hours")]
    hours: String,
}

#[derive(Tabled)]
struct PhaseRow {
    #[tabled(rename = "Phase")]
    phase: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Color")]
    color: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Hours")]
    hours: String,
}

#[derive(Tabled)]
struct RateRow {
    #[tabled(rename = "Phase")]
    phase: String,
    #[tabled(rename = "Type")]
    event_type: String,
    #[tabled(rename = "Hours")]
    hours: String,
}

fn styled<T: Tabled>(rows: Vec<T>) -> Table {
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .modify(Rows::first(), Color::FG_CYAN); // Header color
    table
}

/// Renders the session summary the way the Report tab lays it out.
pub fn render_summary(summary: &Summary) -> String {
    if summary.is_empty() {
        return "No events recorded in this session.".to_string();
    }

    let mut out = String::new();
    out.push_str("Simulation Lab Hours Report\n");
    out.push_str(&format!(
        "Total Hours: {:.1}   Total Events: {}   Avg per Event: {:.1}\n\n",
        summary.total_hours, summary.event_count, summary.average_hours
    ));

    let scenarios: Vec<ScenarioRow> = summary.by_scenario.iter().map(|s| ScenarioRow {
        scenario: s.scenario.clone(),
        hours: format!("{:.1}", s.hours),
    }).collect();
    out.push_str(&format!("Scenario Summary\n{}\n\n", styled(scenarios)));

    let phases: Vec<PhaseRow> = summary.by_phase.iter().map(|p| PhaseRow {
        phase: p.phase.to_string(),
        hours: format!("{:.1}", p.hours),
        color: p.color.hex.to_string(),
    }).collect();
    out.push_str(&format!("Hours by Phase\n{}\n\n", styled(phases)));

    let months: Vec<MonthRow> = summary.by_month.iter().map(|m| MonthRow {
        month: m.month.clone(),
        hours: format!("{:.2}", m.hours),
    }).collect();
    out.push_str(&format!("Hours by Month\n{}", styled(months)));

    out
}

/// Renders the fixed hours rules, lookup table included.
pub fn render_rates() -> String {
    let mut rows: Vec<RateRow> = HOURS_TABLE.iter().map(|(phase, ty, hours)| RateRow {
        phase: phase.to_string(),
        event_type: ty.to_string(),
        hours: hours.to_string(),
    }).collect();

    rows.push(RateRow {
        phase: Phase::Run.to_string(),
        event_type: "-".to_string(),
        hours: "duration".to_string(),
    });
    rows.push(RateRow {
        phase: Phase::Reset.to_string(),
        event_type: "-".to_string(),
        hours: RESET_HOURS.to_string(),
    });
    rows.push(RateRow {
        phase: Phase::Teardown.to_string(),
        event_type: "-".to_string(),
        hours: TEARDOWN_HOURS.to_string(),
    });

    styled(rows).to_string()
}
