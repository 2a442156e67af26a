//! Shared model and derivation logic of the RFP console.
//!
//! Everything in this crate is target-independent: it compiles natively for
//! tests and to wasm for the frontend.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod store;
