//! Entity type definitions
//!
//! **Build structure:**
//! - [`Unit`] - Serialized assembly under build
//! - [`Kit`] - Parts and tooling assigned to a unit
//! - [`Fixture`] - Bench or station staged with a kit
//! - [`ComponentLot`] - Lot of components allocated to a kit
//! - [`Episode`] - Build run grouping executions
//!
//! **Process & quality:**
//! - [`ProcessStep`] - Ordered step definition
//! - [`Ctq`] - Critical-to-quality characteristic of a step
//! - [`Execution`] - One performance of a step
//! - [`Measurement`] - Value recorded against a CTQ

pub mod ctq;
pub mod episode;
pub mod execution;
pub mod fixture;
pub mod kit;
pub mod lot;
pub mod measurement;
pub mod process;
pub mod unit;

pub use ctq::{Ctq, NewCtq};
pub use episode::{Episode, NewEpisode};
pub use execution::{Execution, NewExecution};
pub use fixture::{Fixture, NewFixture};
pub use kit::{Kit, NewKit};
pub use lot::{ComponentLot, NewComponentLot};
pub use measurement::{Measurement, NewMeasurement};
pub use process::{NewProcessStep, ProcessStep};
pub use unit::{NewUnit, Unit};
