//! Support Desk - Bilingual Customer Support Backend
//!
//! This crate implements the conversation orchestration core for a
//! customer-support service: per-conversation lifecycle state machine,
//! rule-based intent classification, deterministic and generative response
//! routing, and a bounded, PII-redacted context window for the generative
//! path.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
