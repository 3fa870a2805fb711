//! Posture analysis daemon.
//!
//! Fronts the assessment → prompt → completion → validation pipeline with a
//! small HTTP API for the browser questionnaire.

pub mod analyzer;
pub mod config;
pub mod routes;
pub mod server;
