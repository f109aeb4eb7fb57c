//! The entity store - owns the entity model and guards its invariants
//!
//! Every creation goes through the same pipeline before the backend sees
//! it: structural checks, natural-key uniqueness, reference resolution and
//! measurement/CTQ unit agreement. A batch is staged in full and only then
//! handed to the backend, so a failure anywhere leaves no trace.
//!
//! Mutations take the write half of one `RwLock` per store; lookups share
//! the read half.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::debug;

use crate::core::backend::{Backend, MemoryBackend};
use crate::core::entity::{Draft, Entity, NewRecord, Record};
use crate::core::error::{TraceError, TraceResult};
use crate::core::identity::{EntityId, EntityKind};
use crate::core::resolver::Resolver;
use crate::core::validate::validate_measurement;
use crate::entities::{
    Ctq, Execution, Measurement, NewCtq, NewExecution, NewMeasurement, NewProcessStep,
    ProcessStep,
};

/// Record counts per kind, in creation order of kinds
pub type KindCounts = BTreeMap<EntityKind, usize>;

pub struct EntityStore<B: Backend = MemoryBackend> {
    backend: RwLock<B>,
}

impl EntityStore<MemoryBackend> {
    /// Create a store over a fresh in-memory backend
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl Default for EntityStore<MemoryBackend> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<B: Backend> EntityStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: RwLock::new(backend),
        }
    }

    fn read(&self) -> TraceResult<RwLockReadGuard<'_, B>> {
        self.backend.read().map_err(|_| TraceError::LockPoisoned)
    }

    fn write(&self) -> TraceResult<RwLockWriteGuard<'_, B>> {
        self.backend.write().map_err(|_| TraceError::LockPoisoned)
    }

    /// Create a record from untyped fields
    pub fn create(&self, fields: impl Into<NewRecord>) -> TraceResult<Record> {
        let fields = fields.into();
        let kind = fields.kind();
        let record = fields.build(EntityId::new(kind), Utc::now());
        self.commit(vec![record.clone()])?;
        Ok(record)
    }

    /// Create a typed entity
    pub fn insert<D: Draft>(&self, draft: D) -> TraceResult<D::Entity> {
        let entity = draft.build(EntityId::new(D::Entity::KIND), Utc::now());
        self.commit(vec![entity.clone().into()])?;
        Ok(entity)
    }

    /// Create a parent and its children atomically
    ///
    /// `children` receives the parent's generated id so the child drafts can
    /// connect to it. Either every record is created or none is.
    pub fn insert_with_children<P, C, F>(
        &self,
        parent: P,
        children: F,
    ) -> TraceResult<(P::Entity, Vec<C::Entity>)>
    where
        P: Draft,
        C: Draft,
        F: FnOnce(&EntityId) -> Vec<C>,
    {
        let now = Utc::now();
        let parent = parent.build(EntityId::new(P::Entity::KIND), now);
        let children: Vec<C::Entity> = children(parent.id())
            .into_iter()
            .map(|c| c.build(EntityId::new(C::Entity::KIND), now))
            .collect();

        let mut batch: Vec<Record> = Vec::with_capacity(children.len() + 1);
        batch.push(parent.clone().into());
        batch.extend(children.iter().cloned().map(Into::into));
        self.commit(batch)?;

        Ok((parent, children))
    }

    /// Create a step definition together with its CTQs
    pub fn insert_step_with_ctqs<F>(
        &self,
        step: NewProcessStep,
        ctqs: F,
    ) -> TraceResult<(ProcessStep, Vec<Ctq>)>
    where
        F: FnOnce(&EntityId) -> Vec<NewCtq>,
    {
        self.insert_with_children(step, ctqs)
    }

    /// Create an execution together with its measurements
    pub fn insert_execution_with_measurements<F>(
        &self,
        execution: NewExecution,
        measurements: F,
    ) -> TraceResult<(Execution, Vec<Measurement>)>
    where
        F: FnOnce(&EntityId) -> Vec<NewMeasurement>,
    {
        self.insert_with_children(execution, measurements)
    }

    /// Validate a batch against the store and persist it
    fn commit(&self, batch: Vec<Record>) -> TraceResult<()> {
        let mut backend = self.write()?;
        let mut staged: Vec<Record> = Vec::with_capacity(batch.len());

        for record in batch {
            stage(&*backend, &staged, &record)?;
            staged.push(record);
        }

        backend.insert(&staged)?;
        for record in &staged {
            debug!(kind = %record.kind(), id = %record.id(), "created record");
        }
        Ok(())
    }

    /// Look up a record by kind and id
    pub fn get_record(&self, kind: EntityKind, id: &EntityId) -> TraceResult<Record> {
        self.read()?
            .get(kind, id)?
            .ok_or_else(|| TraceError::NotFound {
                kind,
                id: id.clone(),
            })
    }

    /// Look up a record by id alone, using the kind encoded in its prefix
    pub fn find(&self, id: &EntityId) -> TraceResult<Record> {
        self.get_record(id.kind(), id)
    }

    /// Look up a typed entity
    pub fn get<T: Entity>(&self, id: &EntityId) -> TraceResult<T> {
        self.get_record(T::KIND, id)?
            .into_entity()
            .ok_or_else(|| TraceError::NotFound {
                kind: T::KIND,
                id: id.clone(),
            })
    }

    pub fn list_records(&self, kind: EntityKind) -> TraceResult<Vec<Record>> {
        self.read()?.list(kind)
    }

    /// All entities of one type in creation order
    pub fn list<T: Entity>(&self) -> TraceResult<Vec<T>> {
        Ok(self
            .list_records(T::KIND)?
            .into_iter()
            .filter_map(Record::into_entity)
            .collect())
    }

    pub fn count(&self, kind: EntityKind) -> TraceResult<usize> {
        self.read()?.count(kind)
    }

    /// Snapshot of record counts for every kind
    pub fn counts(&self) -> TraceResult<KindCounts> {
        let backend = self.read()?;
        EntityKind::all()
            .iter()
            .map(|kind| Ok((*kind, backend.count(*kind)?)))
            .collect()
    }

    /// Remove every record of a kind
    ///
    /// Records of other kinds that point at the removed ones are left
    /// dangling; callers clear children before parents.
    pub fn delete_all(&self, kind: EntityKind) -> TraceResult<usize> {
        let removed = self.write()?.delete_all(kind)?;
        debug!(kind = %kind, removed, "deleted all records");
        Ok(removed)
    }
}

/// Run every pre-insert check for one record of a batch
fn stage<B: Backend + ?Sized>(backend: &B, staged: &[Record], record: &Record) -> TraceResult<()> {
    record.check()?;

    if let Some((field, value)) = record.natural_key() {
        let kind = record.kind();
        let in_batch = staged
            .iter()
            .any(|r| r.kind() == kind && r.natural_key().is_some_and(|(_, v)| v == value));
        if in_batch || backend.find_by_key(kind, &value)?.is_some() {
            return Err(TraceError::DuplicateKey { kind, field, value });
        }
    }

    let parents = Resolver::new(backend, staged).resolve_all(record)?;

    if let Record::Measurement(m) = record {
        let ctq = parents
            .into_iter()
            .find_map(Record::into_entity::<Ctq>)
            .ok_or_else(|| TraceError::DanglingReference {
                field: "ctq",
                expected: EntityKind::Ctq,
                id: m.ctq.clone(),
            })?;
        validate_measurement(m.value, &m.unit_label, &ctq)?;
    }

    Ok(())
}
