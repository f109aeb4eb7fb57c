//! Traceline: manufacturing traceability data core
//!
//! Units, kits, fixtures, component lots, process steps with their CTQs,
//! executions and measurements, held in an entity store that checks keys,
//! links and measurement units before anything is written.

pub mod cli;
pub mod core;
pub mod entities;
