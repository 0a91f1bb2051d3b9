//! Marketplace constants: endpoints, headers and chain identifiers

/// Default marketplace origin
pub const DEFAULT_BASE_URL: &str = "https://x402-api.onrender.com";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Identifying `User-Agent` sent with every request
pub const USER_AGENT: &str = concat!("x402-bazaar-rs/", env!("CARGO_PKG_VERSION"));

/// Token used for marketplace payments
pub const PAYMENT_TOKEN: &str = "USDC";

/// Chain identifiers
pub mod networks {
    /// Base mainnet, the chain marketplace payments settle on
    pub const BASE_MAINNET: &str = "base";

    /// Chain advertised in the payment-proof header
    pub const PAYMENT_CHAIN: &str = BASE_MAINNET;
}

/// Headers attached when retrying with a payment proof
pub mod headers {
    /// Transaction hash of the payment
    pub const PAYMENT_TX_HASH: &str = "X-Payment-TxHash";
    /// Chain the transaction was sent on
    pub const PAYMENT_CHAIN: &str = "X-Payment-Chain";
}

/// Marketplace endpoint paths
pub mod endpoints {
    /// Marketplace landing / info document
    pub const ROOT: &str = "/";
    /// Free service catalog
    pub const SERVICES: &str = "/api/services";
    /// Public usage statistics
    pub const PUBLIC_STATS: &str = "/api/public-stats";

    pub const WEATHER: &str = "/api/weather";
    pub const SEARCH: &str = "/api/search";
    pub const CRYPTO: &str = "/api/crypto";
    pub const IMAGE: &str = "/api/image";
    pub const SCRAPE: &str = "/api/scrape";
}

/// Keys of the 402 response body
pub mod payment_keys {
    pub const AMOUNT: &str = "amount";
    /// Older servers report the amount under this key
    pub const AMOUNT_LEGACY: &str = "required_payment";
    pub const ADDRESS: &str = "address";
    pub const CHAIN: &str = "chain";
    pub const TOKEN: &str = "token";
}
