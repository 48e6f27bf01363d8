// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod log_tail;
pub mod normalize;
pub mod retry;
pub mod strategy_store;
pub mod upstream;

pub use normalize::{normalize, NormalizeError};
pub use retry::RetryPolicy;
pub use strategy_store::{StoreError, StrategyStore};
pub use upstream::{FetchError, RawProfile, UpstreamClient};
