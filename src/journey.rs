//! Progress derivation over a fetched journey.
//!
//! Everything here is pure: the same payload always yields the same status,
//! badge, and ordering. Nothing is cached or written back.

use crate::models::{Criterion, CriterionLabel, Journey, Phase, PhaseStatus};
use serde::Serialize;

/// Shown in place of any value that is missing or must not be revealed.
pub const REDACTED: &str = "--";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CriterionStatus {
    Met,
    Pending,
    Locked,
}

impl CriterionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CriterionStatus::Met => "met",
            CriterionStatus::Pending => "pending",
            CriterionStatus::Locked => "locked",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CriterionState {
    pub status: CriterionStatus,
    pub display_value: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BadgeKind {
    Completed,
    Active,
    Locked,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PhaseBadge {
    pub kind: BadgeKind,
    pub text: String,
}

/// Locked phases never expose `current`, whatever the server sent.
pub fn derive_criterion_status(phase_status: PhaseStatus, criterion: &Criterion) -> CriterionState {
    if phase_status == PhaseStatus::Locked {
        return CriterionState {
            status: CriterionStatus::Locked,
            display_value: REDACTED.to_string(),
        };
    }

    let display_value = criterion
        .current
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(REDACTED)
        .to_string();

    let status = if criterion.met {
        CriterionStatus::Met
    } else {
        CriterionStatus::Pending
    };

    CriterionState {
        status,
        display_value,
    }
}

pub fn criteria_counts(phase: &Phase) -> (usize, usize) {
    let met = phase.criteria.iter().filter(|criterion| criterion.met).count();
    (met, phase.criteria.len())
}

pub fn derive_phase_badge(phase: &Phase) -> PhaseBadge {
    match phase.status {
        PhaseStatus::Completed => PhaseBadge {
            kind: BadgeKind::Completed,
            text: "Complete".to_string(),
        },
        PhaseStatus::Active => {
            let (met, total) = criteria_counts(phase);
            PhaseBadge {
                kind: BadgeKind::Active,
                text: format!("{met}/{total}"),
            }
        }
        PhaseStatus::Locked => PhaseBadge {
            kind: BadgeKind::Locked,
            text: "Locked".to_string(),
        },
    }
}

/// Splits `"<metric_name> <operator> <target> [unit...]"`.
///
/// Missing tokens come back as empty strings; a label is never rejected.
pub fn parse_criterion_label(label: &str) -> CriterionLabel {
    let mut tokens = label.split_whitespace();
    let metric_name = tokens.next().unwrap_or_default().to_string();
    let operator = tokens.next().unwrap_or_default().to_string();
    let target = tokens.next().unwrap_or_default().to_string();
    let unit = tokens.collect::<Vec<_>>().join(" ");

    CriterionLabel {
        metric_name,
        operator,
        target,
        unit,
    }
}

impl Criterion {
    /// Structured metric fields, falling back to parsing the legacy label.
    pub fn metric_label(&self) -> CriterionLabel {
        match &self.metric {
            Some(metric) if !metric.metric_name.is_empty() => metric.clone(),
            _ => parse_criterion_label(&self.label),
        }
    }
}

/// Latest phase first, each paired with its index in treatment order.
pub fn order_for_display(phases: &[Phase]) -> Vec<(usize, &Phase)> {
    phases.iter().enumerate().rev().collect()
}

pub fn active_phase(journey: &Journey) -> Option<(usize, &Phase)> {
    journey
        .phases
        .iter()
        .enumerate()
        .find(|(_, phase)| phase.status == PhaseStatus::Active)
}
