//! MEAS entity type - Values recorded during executions

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Draft, Entity, Record, Reference};
use crate::core::error::{TraceError, TraceResult};
use crate::core::identity::{EntityId, EntityKind};

/// A value recorded against a CTQ during an execution
///
/// Out-of-spec values are valid records; they represent a failed
/// inspection, not an input error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    /// Unique identifier (MEAS-xxx)
    pub id: EntityId,

    pub value: f64,

    /// Unit the value was recorded in; must match the CTQ's unit
    pub unit_label: String,

    /// Execution that produced the value (EXEC-xxx)
    pub execution: EntityId,

    /// Characteristic measured (CTQ-xxx)
    pub ctq: EntityId,

    /// Component lot the measured part came from (LOT-xxx)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_lot: Option<EntityId>,

    pub created: DateTime<Utc>,
}

impl Entity for Measurement {
    const KIND: EntityKind = EntityKind::Measurement;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn label(&self) -> String {
        format!("{} {}", self.value, self.unit_label)
    }

    fn references(&self) -> Vec<Reference> {
        let mut refs = vec![
            Reference::new("execution", EntityKind::Execution, &self.execution),
            Reference::new("ctq", EntityKind::Ctq, &self.ctq),
        ];
        if let Some(ref lot) = self.component_lot {
            refs.push(Reference::new("component_lot", EntityKind::ComponentLot, lot));
        }
        refs
    }

    fn check(&self) -> TraceResult<()> {
        if !self.value.is_finite() {
            return Err(TraceError::InvalidValue {
                field: "value",
                value: self.value,
            });
        }
        Ok(())
    }

    fn from_record(record: Record) -> Option<Self> {
        match record {
            Record::Measurement(m) => Some(m),
            _ => None,
        }
    }
}

/// Fields for creating a [`Measurement`]
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeasurement {
    pub value: f64,
    pub unit_label: String,
    pub execution: EntityId,
    pub ctq: EntityId,
    pub component_lot: Option<EntityId>,
}

impl NewMeasurement {
    pub fn new(value: f64, unit_label: impl Into<String>, execution: &EntityId, ctq: &EntityId) -> Self {
        Self {
            value,
            unit_label: unit_label.into(),
            execution: execution.clone(),
            ctq: ctq.clone(),
            component_lot: None,
        }
    }

    pub fn with_lot(mut self, lot: &EntityId) -> Self {
        self.component_lot = Some(lot.clone());
        self
    }
}

impl Draft for NewMeasurement {
    type Entity = Measurement;

    fn build(self, id: EntityId, created: DateTime<Utc>) -> Measurement {
        Measurement {
            id,
            value: self.value,
            unit_label: self.unit_label,
            execution: self.execution,
            ctq: self.ctq,
            component_lot: self.component_lot,
            created,
        }
    }
}
