//! View-data for the dashboard and the clinician form.
//!
//! These structs carry no markup; `ui` turns them into HTML and the JSON
//! endpoints serialize them as-is.

use crate::errors::AppError;
use crate::journey::{
    BadgeKind, CriterionStatus, PhaseBadge, active_phase, derive_criterion_status, derive_phase_badge,
    order_for_display,
};
use crate::models::{Client, Journey, MetricSubmission, Phase, PhaseStatus, ProgrammingSlot};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub client: ClientHeader,
    pub objective: TerminalObjective,
    pub phases: Vec<PhaseCard>,
    pub footer: Footer,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClientHeader {
    pub name: String,
    pub pathology: String,
    pub sport: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TerminalObjective {
    pub goal: String,
    pub pathology: String,
    pub sport: String,
    pub research_source: String,
    pub research_doi: String,
    pub doi_url: String,
    pub protocol_id: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PhaseCard {
    pub index: usize,
    pub element_id: String,
    pub name: String,
    pub status: PhaseStatus,
    pub badge: PhaseBadge,
    pub description: String,
    pub typical_duration: String,
    pub criteria: Vec<CriterionRow>,
    /// Only present for the active phase.
    pub programming: Option<Vec<ProgrammingSlot>>,
    pub expanded: bool,
    /// Class of the connector drawn above the card.
    pub connector: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CriterionRow {
    pub label: String,
    pub status: CriterionStatus,
    pub display_value: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Footer {
    pub started: String,
    pub next_session: String,
}

pub fn render_terminal_objective(client: &Client) -> TerminalObjective {
    TerminalObjective {
        goal: client.terminal_goal.clone(),
        pathology: client.pathology.clone(),
        sport: client.sport.clone(),
        research_source: client.research_source.clone(),
        research_doi: client.research_doi.clone(),
        doi_url: format!("https://doi.org/{}", client.research_doi),
        protocol_id: client.protocol_id().to_string(),
    }
}

pub fn render_phase_card(phase: &Phase, original_index: usize, expanded: bool) -> PhaseCard {
    let criteria = phase
        .criteria
        .iter()
        .map(|criterion| {
            let state = derive_criterion_status(phase.status, criterion);
            CriterionRow {
                label: criterion.label.clone(),
                status: state.status,
                display_value: state.display_value,
            }
        })
        .collect();

    let programming = (phase.status == PhaseStatus::Active).then(|| phase.programming.clone());

    let connector = match phase.status {
        PhaseStatus::Completed => "completed",
        PhaseStatus::Locked => "locked",
        PhaseStatus::Active => "",
    };

    PhaseCard {
        index: original_index,
        element_id: format!("phase-{original_index}"),
        name: phase.name.clone(),
        status: phase.status,
        badge: derive_phase_badge(phase),
        description: phase.description.clone(),
        typical_duration: phase.typical_duration.clone(),
        criteria,
        programming,
        expanded,
        connector,
    }
}

pub fn render_footer(client: &Client) -> Footer {
    Footer {
        started: format_date(client.start_date.as_deref()),
        next_session: format_date(client.next_session.as_deref()),
    }
}

pub fn render_dashboard(journey: &Journey, expansion: &ExpansionState) -> DashboardView {
    let client = &journey.client;
    let phases = order_for_display(&journey.phases)
        .into_iter()
        .map(|(index, phase)| render_phase_card(phase, index, expansion.is_expanded(index)))
        .collect();

    DashboardView {
        client: ClientHeader {
            name: client.name.clone(),
            pathology: client.pathology.clone(),
            sport: client.sport.clone(),
        },
        objective: render_terminal_objective(client),
        phases,
        footer: render_footer(client),
    }
}

/// `Feb 14, 2026` style; `TBD` when absent, verbatim when unparseable.
pub fn format_date(value: Option<&str>) -> String {
    let Some(raw) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return "TBD".to_string();
    };

    match parse_date(raw) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => raw.to_string(),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.date_naive());
    }
    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
    ] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(stamp.date());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Which cards are open.
///
/// Clicking an active card does nothing, even though the active card may be
/// opened up front with `expand_active`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: BTreeSet<usize>,
    active: BTreeSet<usize>,
}

impl ExpansionState {
    pub fn initial(journey: &Journey, expand_active: bool) -> Self {
        let active: BTreeSet<usize> = journey
            .phases
            .iter()
            .enumerate()
            .filter(|(_, phase)| phase.status == PhaseStatus::Active)
            .map(|(index, _)| index)
            .collect();
        let expanded = if expand_active { active.clone() } else { BTreeSet::new() };
        Self { expanded, active }
    }

    pub fn toggle(&mut self, index: usize) {
        if self.active.contains(&index) {
            return;
        }
        if !self.expanded.remove(&index) {
            self.expanded.insert(index);
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FormSpec {
    pub client_name: String,
    pub pathology: String,
    pub phase_name: String,
    pub phase_index: usize,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FormField {
    pub metric_name: String,
    pub input_id: String,
    pub help_id: String,
    pub display_label: String,
    pub placeholder: String,
    pub unit: String,
    pub help_text: String,
}

/// Prefix of metric input names in the posted form.
pub const METRIC_FIELD_PREFIX: &str = "metric-";

pub fn render_criterion_form(journey: &Journey) -> Result<FormSpec, AppError> {
    let (phase_index, phase) = active_phase(journey).ok_or_else(AppError::no_active_phase)?;

    let fields = phase
        .criteria
        .iter()
        .map(|criterion| {
            let label = criterion.metric_label();
            FormField {
                input_id: format!("{METRIC_FIELD_PREFIX}{}", label.metric_name),
                help_id: format!("help-{}", label.metric_name),
                display_label: label.metric_name.replace('_', " "),
                placeholder: label.target.clone(),
                help_text: format!("Target: {} {} {}", label.operator, label.target, label.unit)
                    .trim_end()
                    .to_string(),
                unit: label.unit,
                metric_name: label.metric_name,
            }
        })
        .collect();

    Ok(FormSpec {
        client_name: journey.client.name.clone(),
        pathology: journey.client.pathology.clone(),
        phase_name: phase.name.clone(),
        phase_index,
        fields,
    })
}

/// Blank entries are skipped, not counted as failures. Values stay opaque
/// strings; the server decides whether they are numbers.
pub fn collect_submissions(client_id: &str, form_values: &[(String, String)]) -> Vec<MetricSubmission> {
    form_values
        .iter()
        .filter_map(|(metric_name, raw)| {
            let value = raw.trim();
            (!value.is_empty()).then(|| MetricSubmission {
                client_id: client_id.to_string(),
                metric_name: metric_name.clone(),
                value: value.to_string(),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct SubmissionReport {
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl SubmissionReport {
    pub fn record(&mut self, ok: bool) {
        if ok {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn status_message(&self) -> Option<StatusMessage> {
        if self.succeeded > 0 {
            let mut text = format!("Successfully recorded {} metrics.", self.succeeded);
            if self.failed > 0 {
                text.push_str(&format!(" {} failed.", self.failed));
            }
            Some(StatusMessage {
                kind: StatusKind::Success,
                text,
            })
        } else if self.failed > 0 {
            Some(StatusMessage {
                kind: StatusKind::Error,
                text: "Failed to record metrics. Check server logs for details.".to_string(),
            })
        } else {
            None
        }
    }
}

impl BadgeKind {
    pub fn css_class(self) -> &'static str {
        match self {
            BadgeKind::Completed => "completed-badge",
            BadgeKind::Active => "active-badge",
            BadgeKind::Locked => "locked-badge",
        }
    }
}
