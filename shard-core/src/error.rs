use thiserror::Error;

/// Possible validation failures for an incoming order.
///
/// Both variants are precondition violations (§7): the order is discarded at
/// the boundary, no trade is produced, and the rejection is not retried.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderValidationError {
    /// `price == 0`. Zero is reserved for a future market-order extension and
    /// is never a valid limit price today.
    #[error("order has zero price")]
    ZeroPrice,
    /// `quantity == 0`. There is nothing to rest or match.
    #[error("order has zero quantity")]
    ZeroQuantity,
}

/// Errors returned by [`crate::config::EngineConfig::validate`] and
/// [`crate::config::ShardConfig::validate`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("num_shards must be positive")]
    ZeroShards,
    #[error("ring_capacity must be at least 2, got {0}")]
    RingCapacityTooSmall(usize),
}
