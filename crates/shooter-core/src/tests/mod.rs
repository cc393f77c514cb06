//! Crate-level tests that drive the whole simulation.
//!
//! - **Determinism tests**: same seed and input give identical runs
//! - **Integration tests**: end-to-end gameplay through `Simulation::step`
//! - **Property tests**: invariants checked over generated inputs
//!
//! # Test Structure
//!
//! - `determinism.rs`: replay and seed behavior
//! - `integration.rs`: firing, bouncing, hits and resets across stages
//! - `properties.rs`: `proptest` invariants
//! - `helpers.rs`: setup utilities shared by the above

mod determinism;
mod helpers;
