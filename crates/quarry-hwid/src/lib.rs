//! Host CPU identification for the Quarry build system.
//!
//! Answers the questions the build orchestrator asks about the machine it
//! runs on: which microarchitecture is this, which instruction-set
//! extensions does it support, and which compiler optimization flag should
//! builds target?
//!
//! ## Modules
//!
//! - [`cpuinfo`] — Raw system-info parsing and feature-flag queries
//! - [`microarch`] — Microarchitecture symbols and the classification table
//! - [`optimize`] — Microarchitecture → compiler-flag mapping
//! - [`baseline`] — Oldest-supported-baseline policy by platform version
//!
//! Classification never fails: silicon absent from the decision table
//! yields a synthesized unknown symbol carrying the raw identifiers, and a
//! missing or malformed field degrades to a neutral default. The only
//! fatal path in the crate is failing to read the raw text source.

pub mod baseline;
pub mod cpuinfo;
pub mod error;
pub mod microarch;
pub mod optimize;

// Re-exports for convenience.
pub use baseline::oldest_supported;
pub use cpuinfo::{ArchKind, CpuInfo, Feature};
pub use error::{HwIdError, Result};
pub use microarch::Microarch;
pub use optimize::OptimizationFlags;
