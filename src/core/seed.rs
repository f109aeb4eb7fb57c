//! Seed/reset orchestration
//!
//! `reset` clears every kind (children before parents) and rebuilds the
//! demo dataset: two units with one kit each, a fixture, a fastener lot,
//! the torque and inspection step definitions with their CTQs, a pilot
//! episode, and three executions with their measurements.
//!
//! The first failure is returned as-is. Nothing is rolled back beyond what
//! the clear already removed; calling `reset` again starts from scratch.

use serde::Serialize;
use tracing::{info, instrument};

use crate::core::backend::Backend;
use crate::core::error::TraceResult;
use crate::core::identity::{EntityId, EntityKind};
use crate::core::store::{EntityStore, KindCounts};
use crate::entities::{
    NewComponentLot, NewCtq, NewEpisode, NewExecution, NewFixture, NewKit, NewMeasurement,
    NewProcessStep, NewUnit,
};

/// Summary of a completed reset
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    /// Serial numbers of the seeded units
    pub units: Vec<String>,
    /// Codes of the seeded kits
    pub kits: Vec<String>,
    /// The torque execution performed on Unit Alpha
    pub torque_execution: EntityId,
    /// Records removed by the clear, per kind
    pub cleared: KindCounts,
    /// Records present after seeding, per kind
    pub counts: KindCounts,
}

/// Delete every record, children before parents
#[instrument(skip(store))]
pub fn clear<B: Backend>(store: &EntityStore<B>) -> TraceResult<KindCounts> {
    let mut cleared = KindCounts::new();
    for kind in EntityKind::deletion_order() {
        cleared.insert(*kind, store.delete_all(*kind)?);
    }
    Ok(cleared)
}

/// Clear the store and insert the demo dataset
#[instrument(skip(store))]
pub fn reset<B: Backend>(store: &EntityStore<B>) -> TraceResult<SeedReport> {
    let cleared = clear(store)?;

    let unit_alpha = store.insert(
        NewUnit::new("Unit Alpha", "U-1001").with_description("First production-ready assembly"),
    )?;
    let unit_beta = store.insert(
        NewUnit::new("Unit Beta", "U-1002").with_description("Alternate build for validation"),
    )?;

    let kit_main = store.insert(NewKit::new("Main Build Kit", "KIT-001", &unit_alpha.id))?;
    let kit_service = store.insert(NewKit::new("Service Kit", "KIT-002", &unit_beta.id))?;

    let fixture = store.insert(
        NewFixture::new("Assembly Station A", &kit_main.id)
            .with_description("Primary bench for torque application"),
    )?;

    let lot = store.insert(
        NewComponentLot::new("LOT-AX45", 250, &kit_main.id)
            .with_description("Fastener lot for torque validation"),
    )?;

    let (torque_step, torque_ctqs) = store.insert_step_with_ctqs(
        NewProcessStep::new("Torque Application", 1)
            .with_description("Apply torque to primary fasteners"),
        |step| {
            vec![
                NewCtq::new("Torque", "N-m", step)
                    .with_description("Applied torque in N-m")
                    .with_limits(2.3, 2.7, 2.5),
                NewCtq::new("Angle", "degrees", step)
                    .with_description("Angle of turn for final tightening")
                    .with_limits(8.0, 12.0, 10.0),
            ]
        },
    )?;
    let (torque, angle) = (&torque_ctqs[0], &torque_ctqs[1]);

    let (inspection_step, inspection_ctqs) = store.insert_step_with_ctqs(
        NewProcessStep::new("Visual Inspection", 2)
            .with_description("Inspect build for cosmetic defects"),
        |step| {
            vec![NewCtq::new("Scratch Length", "mm", step)
                .with_description("Maximum allowed scratch length")
                .with_upper(3.0)]
        },
    )?;
    let scratch = &inspection_ctqs[0];

    let episode = store.insert(
        NewEpisode::new("Alpha Pilot Run", &unit_alpha.id, &kit_main.id)
            .with_description("Pilot build for firmware v1.2"),
    )?;

    let (torque_execution, _) = store.insert_execution_with_measurements(
        NewExecution::new("Samira I.", &torque_step.id, &unit_alpha.id, &kit_main.id)
            .with_notes("Used calibrated wrench")
            .with_fixture(&fixture.id)
            .with_episode(&episode.id),
        |exec| {
            vec![
                NewMeasurement::new(2.55, "N-m", exec, &torque.id).with_lot(&lot.id),
                NewMeasurement::new(9.8, "degrees", exec, &angle.id),
            ]
        },
    )?;

    store.insert_execution_with_measurements(
        NewExecution::new("Lina T.", &inspection_step.id, &unit_alpha.id, &kit_main.id)
            .with_notes("Minor scuff noted on housing")
            .with_episode(&episode.id),
        |exec| vec![NewMeasurement::new(1.5, "mm", exec, &scratch.id)],
    )?;

    store.insert_execution_with_measurements(
        NewExecution::new("Kai M.", &torque_step.id, &unit_beta.id, &kit_service.id),
        |exec| {
            vec![
                NewMeasurement::new(2.35, "N-m", exec, &torque.id),
                NewMeasurement::new(11.2, "degrees", exec, &angle.id),
            ]
        },
    )?;

    let counts = store.counts()?;
    info!(
        torque_execution = %torque_execution.id,
        records = counts.values().sum::<usize>(),
        "seed data created"
    );

    Ok(SeedReport {
        units: vec![unit_alpha.serial_number, unit_beta.serial_number],
        kits: vec![kit_main.code, kit_service.code],
        torque_execution: torque_execution.id,
        cleared,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::SqliteBackend;
    use crate::core::validate::validate_measurement;
    use crate::entities::{Ctq, Execution, Measurement};

    fn expected_counts() -> KindCounts {
        [
            (EntityKind::Unit, 2),
            (EntityKind::Kit, 2),
            (EntityKind::Fixture, 1),
            (EntityKind::ComponentLot, 1),
            (EntityKind::Episode, 1),
            (EntityKind::ProcessStep, 2),
            (EntityKind::Ctq, 3),
            (EntityKind::Execution, 3),
            (EntityKind::Measurement, 5),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_reset_is_idempotent() {
        let store = EntityStore::in_memory();
        let first = reset(&store).unwrap();
        assert_eq!(first.counts, expected_counts());
        assert!(first.cleared.values().all(|n| *n == 0));

        let second = reset(&store).unwrap();
        assert_eq!(second.counts, expected_counts());
        assert_eq!(second.cleared, expected_counts());
        assert_ne!(first.torque_execution, second.torque_execution);
    }

    #[test]
    fn test_reset_report_summary() {
        let store = EntityStore::in_memory();
        let report = reset(&store).unwrap();
        assert_eq!(report.units, vec!["U-1001", "U-1002"]);
        assert_eq!(report.kits, vec!["KIT-001", "KIT-002"]);
        let exec: Execution = store.get(&report.torque_execution).unwrap();
        assert_eq!(exec.operator, "Samira I.");
        assert!(exec.fixture.is_some());
        assert!(exec.episode.is_some());
    }

    #[test]
    fn test_samira_torque_measurement_passes() {
        let store = EntityStore::in_memory();
        let report = reset(&store).unwrap();

        let measurements: Vec<Measurement> = store.list().unwrap();
        let torque = measurements
            .iter()
            .find(|m| m.execution == report.torque_execution && m.unit_label == "N-m")
            .unwrap();
        assert_eq!(torque.value, 2.55);
        assert!(torque.component_lot.is_some());

        let ctq: Ctq = store.get(&torque.ctq).unwrap();
        assert_eq!(ctq.name, "Torque");
        assert_eq!(
            (ctq.lower_limit, ctq.upper_limit, ctq.target),
            (Some(2.3), Some(2.7), Some(2.5))
        );
        assert!(ctq.conformance(torque.value).is_pass());
    }

    #[test]
    fn test_near_boundary_measurements_validate() {
        let store = EntityStore::in_memory();
        reset(&store).unwrap();

        let kai = store
            .list::<Execution>()
            .unwrap()
            .into_iter()
            .find(|e| e.operator == "Kai M.")
            .unwrap();
        assert!(kai.fixture.is_none());
        assert!(kai.episode.is_none());

        let values: Vec<(f64, Ctq)> = store
            .list::<Measurement>()
            .unwrap()
            .into_iter()
            .filter(|m| m.execution == kai.id)
            .map(|m| (m.value, store.get::<Ctq>(&m.ctq).unwrap()))
            .collect();
        assert_eq!(values.len(), 2);
        for (value, ctq) in &values {
            validate_measurement(*value, &ctq.measurement_unit, ctq).unwrap();
            assert!(ctq.conformance(*value).is_pass());
        }
        let angle = values.iter().find(|(_, c)| c.name == "Angle").unwrap();
        assert_eq!(angle.0, 11.2);
        assert_eq!(angle.1.upper_limit, Some(12.0));
    }

    #[test]
    fn test_reset_on_sqlite_backend() {
        let store = EntityStore::new(SqliteBackend::open_in_memory().unwrap());
        reset(&store).unwrap();
        let report = reset(&store).unwrap();
        assert_eq!(report.counts, expected_counts());
    }

    #[test]
    fn test_clear_empties_every_kind() {
        let store = EntityStore::in_memory();
        reset(&store).unwrap();
        clear(&store).unwrap();
        assert!(store.counts().unwrap().values().all(|n| *n == 0));
    }
}
