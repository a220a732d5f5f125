//! Property-based tests for the enhancement engine

mod controller_proptest;
