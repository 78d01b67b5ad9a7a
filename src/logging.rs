//! Tracing-subscriber initialization, gated behind the `verbose` feature
//! so the core stays usable as a plain library with no ambient logging
//! setup forced on callers.

#[cfg(feature = "verbose")]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("AION_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(not(feature = "verbose"))]
pub fn init_tracing() {}
