//! Shared helpers for the integration harnesses.

pub mod fixtures;
