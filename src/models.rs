use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_PROTOCOL_ID: &str = "PAT_ACL_R_01";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pathology: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sport: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub terminal_goal: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub research_source: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub research_doi: String,
    #[serde(default)]
    pub protocol_id: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub next_session: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_phase_index: Option<i64>,
}

impl Client {
    pub fn protocol_id(&self) -> &str {
        match self.protocol_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id,
            _ => DEFAULT_PROTOCOL_ID,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Journey {
    pub client: Client,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phases: Vec<Phase>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PhaseStatus {
    Completed,
    Active,
    #[default]
    #[serde(other)]
    Locked,
}

impl PhaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseStatus::Completed => "completed",
            PhaseStatus::Active => "active",
            PhaseStatus::Locked => "locked",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: PhaseStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub typical_duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub criteria: Vec<Criterion>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub programming: Vec<ProgrammingSlot>,
}

/// One exit condition of a phase.
///
/// Legacy payloads only carry `label`; newer ones may also send the
/// structured `metric` record, which takes precedence.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Criterion {
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub met: bool,
    #[serde(default)]
    pub current: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric: Option<CriterionLabel>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CriterionLabel {
    #[serde(default)]
    pub metric_name: String,
    #[serde(default)]
    pub operator: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProgrammingSlot {
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub slot_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exercise: String,
    #[serde(default)]
    pub hd: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub rationale: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub detail: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetricSubmission {
    pub client_id: String,
    pub metric_name: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProtocolDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
