//! # Interface Layer
//!
//! Outward-facing surfaces. Currently just the HTTP API.

pub mod http;
