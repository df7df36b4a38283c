use std::io::{self, Stdout};

use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::Layer as LayerTrait,
    registry::LookupSpan,
};

use crate::logging::config::{LogFormat, LoggingConfig};

/// Консольный formatter по конфигурации.
///
/// Возвращаем boxed trait-объект, чтобы стереть конкретный тип формата
/// (json/pretty/compact).
pub fn build_formatter_from_config<S>(config: &LoggingConfig) -> Box<dyn LayerTrait<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    let writer: fn() -> Stdout = io::stdout;
    build_formatter_with_writer(config, config.format, config.with_ansi, writer)
}

/// То же, но с произвольным writer (файл, буфер в тестах).
pub fn build_formatter_with_writer<S, W>(
    config: &LoggingConfig,
    format: LogFormat,
    with_ansi: bool,
    writer: W,
) -> Box<dyn LayerTrait<S> + Send + Sync>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    match format {
        LogFormat::Json => Box::new(
            fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(config.with_target),
        ),
        LogFormat::Pretty => Box::new(
            fmt::layer()
                .pretty()
                .with_writer(writer)
                .with_ansi(with_ansi)
                .with_target(config.with_target),
        ),
        LogFormat::Compact => Box::new(
            fmt::layer()
                .compact()
                .with_writer(writer)
                .with_ansi(with_ansi)
                .with_target(config.with_target),
        ),
    }
}
