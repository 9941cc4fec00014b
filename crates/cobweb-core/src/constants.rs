/// Cobweb system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default minimum category utility a structural edit must exceed.
/// At 0.0 the driver only rejects edits that do not help at all.
pub const DEFAULT_MIN_CU: f64 = 0.0;
