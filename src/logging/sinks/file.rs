use std::path::Path;

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling::daily};
use tracing_subscriber::{layer::Layer as LayerTrait, registry::LookupSpan};

use crate::logging::{
    config::{LogFormat, LoggingConfig},
    formatter,
};

/// Файловый layer с ежедневной ротацией.
///
/// Запись неблокирующая; `WorkerGuard` нужно держать до завершения
/// программы, иначе хвост буфера потеряется.
pub fn layer_with_config<S>(
    config: &LoggingConfig,
    dir: &Path,
) -> (Box<dyn LayerTrait<S> + Send + Sync>, WorkerGuard)
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let file_appender = daily(dir, &config.filename);
    let (non_blocking_writer, guard) = non_blocking(file_appender);

    // Pretty в файле неудобен для разбора - оставляем compact.
    let format = match config.format {
        LogFormat::Json => LogFormat::Json,
        _ => LogFormat::Compact,
    };

    let layer = formatter::build_formatter_with_writer(config, format, false, non_blocking_writer);

    (layer, guard)
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::{prelude::*, registry::Registry};

    use super::*;

    /// Тест проверяет, что события попадают в файл после сброса guard.
    #[test]
    fn test_file_layer_writes_events() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = LoggingConfig {
            filename: "test.log".to_string(),
            ..Default::default()
        };

        let (layer, guard) = layer_with_config::<Registry>(&cfg, tmp.path());
        let subscriber = Registry::default().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("written to file sink");
        });
        drop(guard);

        let contents: String = std::fs::read_dir(tmp.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("test.log"))
            .map(|e| std::fs::read_to_string(e.path()).unwrap_or_default())
            .collect();

        assert!(contents.contains("written to file sink"));
    }
}
