//! Helpers shared by the storage connectors

pub mod retry;

pub use retry::{RetryPolicy, retry_with_policy};
