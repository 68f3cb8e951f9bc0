// src/fetch/mod.rs

pub mod client;
pub mod retry;

pub use client::{build_client, ProxySettings};
pub use retry::{get_text_with_retry, RetryPolicy};
