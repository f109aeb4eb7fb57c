//! CTQ entity type - Critical-to-quality characteristic definitions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Draft, Entity, Record, Reference};
use crate::core::error::TraceResult;
use crate::core::identity::{EntityId, EntityKind};
use crate::core::validate::{conformance, validate_ctq, Conformance};

/// A characteristic a process step is measured against
///
/// Any subset of the limits and target may be omitted: one-sided specs
/// (e.g. "scratch length at most 3 mm") carry only one limit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ctq {
    /// Unique identifier (CTQ-xxx)
    pub id: EntityId,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_limit: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_limit: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<f64>,

    /// Unit every measurement against this CTQ must be recorded in
    pub measurement_unit: String,

    /// Owning step definition (STEP-xxx)
    pub step: EntityId,

    pub created: DateTime<Utc>,
}

impl Ctq {
    /// Derived pass/fail of a value against this CTQ's limits
    pub fn conformance(&self, value: f64) -> Conformance {
        conformance(value, self)
    }

    /// Format the limits as "lower..upper", leaving open ends blank
    pub fn range_display(&self) -> String {
        let fmt = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        format!("{}..{}", fmt(self.lower_limit), fmt(self.upper_limit))
    }
}

impl Entity for Ctq {
    const KIND: EntityKind = EntityKind::Ctq;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn label(&self) -> String {
        format!("{} [{}] {}", self.name, self.range_display(), self.measurement_unit)
    }

    fn references(&self) -> Vec<Reference> {
        vec![Reference::new("step", EntityKind::ProcessStep, &self.step)]
    }

    fn check(&self) -> TraceResult<()> {
        validate_ctq(self.lower_limit, self.upper_limit, self.target)
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Ctq(ctq) => Some(ctq),
            _ => None,
        }
    }
}

/// Fields for creating a [`Ctq`]
#[derive(Debug, Clone, PartialEq)]
pub struct NewCtq {
    pub name: String,
    pub description: Option<String>,
    pub lower_limit: Option<f64>,
    pub upper_limit: Option<f64>,
    pub target: Option<f64>,
    pub measurement_unit: String,
    pub step: EntityId,
}

impl NewCtq {
    pub fn new(name: impl Into<String>, measurement_unit: impl Into<String>, step: &EntityId) -> Self {
        Self {
            name: name.into(),
            description: None,
            lower_limit: None,
            upper_limit: None,
            target: None,
            measurement_unit: measurement_unit.into(),
            step: step.clone(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_lower(mut self, lower: f64) -> Self {
        self.lower_limit = Some(lower);
        self
    }

    pub fn with_upper(mut self, upper: f64) -> Self {
        self.upper_limit = Some(upper);
        self
    }

    pub fn with_target(mut self, target: f64) -> Self {
        self.target = Some(target);
        self
    }

    /// Set lower limit, upper limit and target at once
    pub fn with_limits(self, lower: f64, upper: f64, target: f64) -> Self {
        self.with_lower(lower).with_upper(upper).with_target(target)
    }
}

impl Draft for NewCtq {
    type Entity = Ctq;

    fn build(self, id: EntityId, created: DateTime<Utc>) -> Ctq {
        Ctq {
            id,
            name: self.name,
            description: self.description,
            lower_limit: self.lower_limit,
            upper_limit: self.upper_limit,
            target: self.target,
            measurement_unit: self.measurement_unit,
            step: self.step,
            created,
        }
    }
}
