//! Functional core for zoochat.
//!
//! Pure domain types, validation rules, guardrail evaluation and prompt
//! assembly, plus the trait boundaries (storage, chat responders) that the
//! server crate implements. Nothing in this crate performs I/O.

pub mod assistant;
pub mod auth;
pub mod conversation;
pub mod serde;
pub mod storage;
pub mod user;
pub mod validation;
