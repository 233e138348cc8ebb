//! # Application Module
//!
//! The proof orchestrator and the service exposing it through the
//! inbound port.

pub mod proof;
pub mod service;

pub use proof::Proof;
pub use service::ProofVerifierService;
