//! # Infrastructure Layer
//!
//! Handles interactions with external systems: the LLM HTTP APIs, the local
//! filesystem/process environment, and the persisted profile file.
//! Implements the traits defined in the Domain layer.

pub mod actions;
pub mod llm;
pub mod memory;
