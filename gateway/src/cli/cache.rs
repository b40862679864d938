use clap::Args;

/// TTL classes for the entity cache.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct CacheCliArgs {
    /// TTL for rarely-changing descriptive data, in seconds.
    #[arg(env = "GATEWAY_CACHE_TTL_LONG_SECS", long, default_value = "1800")]
    pub ttl_long_secs: u64,

    /// TTL for data that moves with on-chain activity, in seconds.
    #[arg(env = "GATEWAY_CACHE_TTL_SHORT_SECS", long, default_value = "60")]
    pub ttl_short_secs: u64,
}
