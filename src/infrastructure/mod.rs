//! Infrastructure layer module
//!
//! This module contains the technical building blocks behind the services:
//! - Configuration management (figment)
//! - Logging infrastructure (tracing)
//! - Retry policy for external calls
//! - Vector subsystem: chunker, flat index, persisted store

pub mod config;
pub mod logging;
pub mod retry;
pub mod vector;
