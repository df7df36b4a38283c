pub mod config;
mod filters;
mod formatter;
pub mod handle;
pub mod sinks;

pub use config::{LogFormat, LoggingConfig};
pub use handle::LoggingHandle;
use tracing_subscriber::{layer::SubscriberExt, registry::Registry, util::SubscriberInitExt, Layer};

use crate::error::{AppError, AppResult};

/// Инициализация глобального subscriber по конфигурации.
///
/// Порядок: переменные окружения поверх конфига, валидация, консольный
/// layer, опциональный файловый layer, `EnvFilter`.
pub fn init_logging(mut config: LoggingConfig) -> AppResult<LoggingHandle> {
    config.apply_env_overrides();
    config.validate()?;
    config.ensure_log_dir()?;

    let env_filter = filters::build_filter_from_config(&config);
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    // Console layer
    layers.push(sinks::console::layer_with_config(&config));

    // File layer
    let file_guard = match &config.log_dir {
        Some(dir) => {
            let (file_layer, guard) = sinks::file::layer_with_config(&config, dir);
            layers.push(file_layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .map_err(|e| AppError::InvalidLogging(e.to_string()))?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.level,
        format = ?config.format,
        file_enabled = file_guard.is_some(),
        "Logging system initialized"
    );

    Ok(LoggingHandle::new(file_guard))
}
