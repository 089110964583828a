//! Lazaret Scanner Library
//!
//! The scanning engine: a pure disposition policy, an executor that applies
//! disposition actions with per-action failure isolation, an audit recorder,
//! and the coordinator that runs the whole pipeline for one triggering event.

pub mod audit;
pub mod coordinator;
pub mod executor;
pub mod policy;

pub use audit::AuditRecorder;
pub use coordinator::ScanCoordinator;
pub use executor::{ActionOutcome, DispositionExecutor};
pub use policy::decide;
