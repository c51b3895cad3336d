//! # Strings Module
//!
//! Centralizes user-facing strings and prompt templates.
//! Ensures consistency in messaging and easier updates.

pub mod messages;
pub mod prompts;
