//! Core module - records, storage, validation and seeding

pub mod backend;
pub mod config;
pub mod conformance;
pub mod entity;
pub mod error;
pub mod identity;
pub mod resolver;
pub mod seed;
pub mod store;
pub mod validate;

pub use backend::{Backend, MemoryBackend, SqliteBackend};
pub use config::Config;
pub use entity::{Draft, Entity, NewRecord, Record, Reference};
pub use error::{TraceError, TraceResult};
pub use identity::{EntityId, EntityKind, IdParseError};
pub use resolver::Resolver;
pub use store::{EntityStore, KindCounts};
pub use validate::{validate_ctq, validate_measurement, Conformance};
