//! Request-rate load monitoring.
//!
//! Request handlers increment a shared [`RequestCounter`]; a [`LoadSampler`]
//! reads and resets it on a fixed schedule and classifies the observed rate
//! against an [`AlertPolicy`]. The two sides never call each other directly,
//! they only share the counter.

pub mod counter;
pub mod policy;
pub mod sampler;

pub use counter::{RequestCounter, WindowSample};
pub use policy::{AlertPolicy, AlertState, CRITICAL_LOAD_THRESHOLD};
pub use sampler::{LoadSample, LoadSampler, LoadSamplerHandle, SAMPLE_INTERVAL};
