//! HTTP API integration tests

pub mod message_test;
pub mod pairwise_test;
pub mod users_test;
