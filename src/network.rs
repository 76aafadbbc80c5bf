//! Provider URL constants and dashboard defaults.

use std::time::Duration;

/// Default market-data REST base URL (CoinGecko v3).
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Interval between market list refreshes.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Per-request timeout for the provider client.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Quote currency for prices and market caps.
pub const DEFAULT_CURRENCY: &str = "usd";

/// Number of ranked assets requested per poll.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page the provider accepts.
pub const MAX_PAGE_SIZE: u32 = 250;
