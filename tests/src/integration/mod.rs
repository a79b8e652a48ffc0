//! Cross-subsystem flows, driven through `harness::PlasmaNode`.

pub mod aggregator_flow;
pub mod dispute_flow;
