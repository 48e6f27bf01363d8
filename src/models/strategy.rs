// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strategy configuration files managed by the control panel.

use serde::{Deserialize, Serialize};

/// Exchange written into newly created strategies.
pub const DEFAULT_MARKET: &str = "binance";
/// Trading pair written into newly created strategies.
pub const DEFAULT_SYMBOL: &str = "BTC/USDT";

/// Contents of a strategy file created through `/add_strategy`.
///
/// Imported files may contain anything; only freshly created ones are
/// guaranteed to have this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Strategy kind (e.g. "pure_market_making")
    pub strategy: String,
    pub market: String,
    pub symbols: Vec<String>,
}

impl StrategyConfig {
    /// New strategy with the default market and symbol.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            strategy: kind.into(),
            market: DEFAULT_MARKET.to_string(),
            symbols: vec![DEFAULT_SYMBOL.to_string()],
        }
    }
}
