//! Integration test modules.

mod engine_flow_test;
mod persistence_test;
