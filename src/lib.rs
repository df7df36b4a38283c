/// Loading settings for the map and logging (defaults, file, environment).
pub mod config;
/// Application-level error type wrapping map, config and IO errors.
pub mod error;
/// Tracing subscriber setup (console and file sinks, env filter).
pub mod logging;
/// Open-addressed hash table with quadratic probing and tombstones.
pub mod table;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Settings.
pub use config::{MapConfig, Settings};
/// Application errors.
pub use error::{AppError, AppResult};
/// Logging.
pub use logging::{init_logging, LogFormat, LoggingConfig, LoggingHandle};
/// Error taxonomy shared with the `probemap-error` crate.
pub use probemap_error::{ErrorExt, LogLevel, MapError, MapResult, StatusCode};
/// The map and its building blocks.
pub use table::{
    home_slot, CapacityPolicy, OpenAddressedMap, QuadraticProbe, Slot, TableStats,
    ValidationError, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR,
};
