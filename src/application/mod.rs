//! # Application Layer
//!
//! Orchestration between the model, the action registry, and the profile
//! store. The interface layer calls the `Engine`; everything else here is
//! plumbing the engine composes.

pub mod engine;
pub mod executor;
pub mod parsing;
pub mod planner;
