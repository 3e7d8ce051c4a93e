//! Amparo - Therapeutic Conversation Pipeline
//!
//! This crate implements the conversation core of the Amparo wellness
//! platform: a structured intake interview that builds a user profile,
//! followed by an ongoing chat session gated by usage quotas and
//! content-safety triage before delegating response generation to a
//! remote inference endpoint.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
