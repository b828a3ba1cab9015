//! Integration tests for the projection engine
//!
//! Tests are organized by topic:
//! - `reference_values` - Hand-checked figures for the reference scenarios
//! - `invariants` - Properties that hold for every scenario and horizon
//! - `dampening` - Staged growth caps on high-growth trajectories
//! - `serialization` - JSON shape of projection output

mod invariants;
