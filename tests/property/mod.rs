//! Property-based tests

pub mod pagination_proptest;
