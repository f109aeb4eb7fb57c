//! Conformance reporting
//!
//! Pass/fail is never stored. This module joins each measurement with its
//! execution, step and CTQ and derives the verdict on the fly.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::backend::Backend;
use crate::core::error::TraceResult;
use crate::core::identity::EntityId;
use crate::core::store::EntityStore;
use crate::core::validate::Conformance;
use crate::entities::{Ctq, Execution, Measurement, ProcessStep};

/// One measurement with the context needed to judge it
#[derive(Debug, Clone, Serialize)]
pub struct ConformanceRow {
    pub execution: EntityId,
    pub operator: String,
    pub step: String,
    pub ctq: String,
    pub value: f64,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_limit: Option<f64>,
    pub verdict: Conformance,
}

/// Build conformance rows for every measurement, grouped by execution
pub fn report<B: Backend>(store: &EntityStore<B>) -> TraceResult<Vec<ConformanceRow>> {
    let steps: HashMap<EntityId, ProcessStep> = store
        .list::<ProcessStep>()?
        .into_iter()
        .map(|s| (s.id.clone(), s))
        .collect();
    let ctqs: HashMap<EntityId, Ctq> = store
        .list::<Ctq>()?
        .into_iter()
        .map(|c| (c.id.clone(), c))
        .collect();
    let measurements: Vec<Measurement> = store.list()?;

    let mut rows = Vec::with_capacity(measurements.len());
    for exec in store.list::<Execution>()? {
        let step_name = steps
            .get(&exec.step)
            .map(|s| s.name.clone())
            .unwrap_or_default();

        for m in measurements.iter().filter(|m| m.execution == exec.id) {
            // A CTQ cleared out from under its measurements has nothing to judge against
            let Some(ctq) = ctqs.get(&m.ctq) else {
                continue;
            };
            rows.push(ConformanceRow {
                execution: exec.id.clone(),
                operator: exec.operator.clone(),
                step: step_name.clone(),
                ctq: ctq.name.clone(),
                value: m.value,
                unit: m.unit_label.clone(),
                lower_limit: ctq.lower_limit,
                upper_limit: ctq.upper_limit,
                verdict: ctq.conformance(m.value),
            });
        }
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed;
    use crate::entities::{NewCtq, NewExecution, NewKit, NewMeasurement, NewProcessStep, NewUnit};

    #[test]
    fn test_seeded_dataset_all_pass() {
        let store = EntityStore::in_memory();
        seed::reset(&store).unwrap();
        let rows = report(&store).unwrap();
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.verdict.is_pass()));
        assert_eq!(rows[0].operator, "Samira I.");
        assert_eq!(rows[0].step, "Torque Application");
    }

    #[test]
    fn test_out_of_spec_value_reported_as_fail() {
        let store = EntityStore::in_memory();
        let unit = store.insert(NewUnit::new("Unit", "U-1")).unwrap();
        let kit = store.insert(NewKit::new("Kit", "K-1", &unit.id)).unwrap();
        let (step, ctqs) = store
            .insert_step_with_ctqs(NewProcessStep::new("Inspect", 1), |s| {
                vec![NewCtq::new("Scratch Length", "mm", s).with_upper(3.0)]
            })
            .unwrap();
        store
            .insert_execution_with_measurements(
                NewExecution::new("Lina T.", &step.id, &unit.id, &kit.id),
                |e| vec![NewMeasurement::new(4.2, "mm", e, &ctqs[0].id)],
            )
            .unwrap();

        let rows = report(&store).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].verdict, Conformance::AboveUpper);
        assert_eq!(rows[0].lower_limit, None);
    }
}
