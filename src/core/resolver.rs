//! Relationship resolution for "connect to existing record by id" links
//!
//! Every dependent record is resolved before it is stored. A reference is
//! satisfied by a record already in the backend or by one staged earlier
//! in the same batch (a step and its CTQs, an execution and its
//! measurements).

use crate::core::backend::Backend;
use crate::core::entity::{Reference, Record};
use crate::core::error::{TraceError, TraceResult};
use crate::core::identity::{EntityId, EntityKind};

pub struct Resolver<'a, B: Backend + ?Sized> {
    backend: &'a B,
    staged: &'a [Record],
}

impl<'a, B: Backend + ?Sized> Resolver<'a, B> {
    pub fn new(backend: &'a B, staged: &'a [Record]) -> Self {
        Self { backend, staged }
    }

    /// Confirm that `id` names an existing record of `kind`
    pub fn resolve(&self, kind: EntityKind, id: &EntityId) -> TraceResult<()> {
        self.fetch(&Reference::new(kind.field_name(), kind, id)).map(|_| ())
    }

    /// Resolve a reference, returning the parent record
    pub fn fetch(&self, reference: &Reference) -> TraceResult<Record> {
        let dangling = || TraceError::DanglingReference {
            field: reference.field,
            expected: reference.expected,
            id: reference.id.clone(),
        };

        if reference.id.kind() != reference.expected {
            return Err(dangling());
        }
        if let Some(staged) = self.staged.iter().find(|r| r.id() == &reference.id) {
            return Ok(staged.clone());
        }
        self.backend
            .get(reference.expected, &reference.id)?
            .ok_or_else(dangling)
    }

    /// Resolve every reference held by `record`, in declaration order
    pub fn resolve_all(&self, record: &Record) -> TraceResult<Vec<Record>> {
        record.references().iter().map(|r| self.fetch(r)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::backend::MemoryBackend;
    use crate::core::entity::Draft;
    use crate::entities::{NewKit, NewUnit};
    use chrono::Utc;

    fn seeded() -> (MemoryBackend, Record) {
        let mut backend = MemoryBackend::new();
        let unit: Record = NewUnit::new("Unit Alpha", "U-1001")
            .build(EntityId::new(EntityKind::Unit), Utc::now())
            .into();
        backend.insert(&[unit.clone()]).unwrap();
        (backend, unit)
    }

    #[test]
    fn test_resolve_existing() {
        let (backend, unit) = seeded();
        let resolver = Resolver::new(&backend, &[]);
        assert!(resolver.resolve(EntityKind::Unit, unit.id()).is_ok());
    }

    #[test]
    fn test_resolve_missing_is_dangling() {
        let (backend, _) = seeded();
        let resolver = Resolver::new(&backend, &[]);
        let err = resolver
            .resolve(EntityKind::Unit, &EntityId::new(EntityKind::Unit))
            .unwrap_err();
        assert!(matches!(err, TraceError::DanglingReference { field: "unit", .. }));
    }

    #[test]
    fn test_resolve_wrong_kind_is_dangling() {
        let (backend, unit) = seeded();
        let resolver = Resolver::new(&backend, &[]);
        let err = resolver.resolve(EntityKind::Kit, unit.id()).unwrap_err();
        assert!(matches!(err, TraceError::DanglingReference { expected: EntityKind::Kit, .. }));
    }

    #[test]
    fn test_resolve_against_staged_records() {
        let backend = MemoryBackend::new();
        let unit: Record = NewUnit::new("Unit Beta", "U-1002")
            .build(EntityId::new(EntityKind::Unit), Utc::now())
            .into();
        let kit: Record = NewKit::new("Service Kit", "KIT-002", unit.id())
            .build(EntityId::new(EntityKind::Kit), Utc::now())
            .into();
        let staged = [unit.clone()];
        let resolver = Resolver::new(&backend, &staged);
        assert_eq!(resolver.resolve_all(&kit).unwrap(), vec![unit]);
    }
}
