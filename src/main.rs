//! Демонстрационный драйвер probemap.
//!
//! Вставляет несколько ключей, печатает результаты поиска, удаляет ключ и
//! показывает, что повторный поиск завершается `KeyNotFound`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use probemap::{
    init_logging, CapacityPolicy, ErrorExt, LogLevel, MapError, OpenAddressedMap, Settings,
};
use tracing::{debug, error, info, trace, warn};

const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT"),
    ", built ",
    env!("BUILD_TIME"),
    ")"
);

/// Аргументы командной строки.
#[derive(Parser, Debug)]
#[command(name = "probemap")]
#[command(version = VERSION)]
#[command(about = "Open-addressed integer hash map demo", long_about = None)]
struct Cli {
    /// Файл конфигурации (toml/yaml/json)
    #[arg(short, long, env = "PROBEMAP_CONFIG")]
    config: Option<PathBuf>,
    /// Начальная ёмкость таблицы
    #[arg(long)]
    capacity: Option<usize>,
    /// Порог load factor, интервал (0, 1)
    #[arg(long)]
    load_factor: Option<f64>,
    /// Политика выбора ёмкости
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
    /// Дополнительные пары `key=value` для вставки после демонстрации
    #[arg(short, long = "insert", value_parser = parse_pair)]
    inserts: Vec<(i64, i64)>,
    /// Напечатать статистику таблицы в конце
    #[arg(long)]
    stats: bool,
    /// Напечатать раскладку ячеек в конце
    #[arg(long)]
    dump: bool,
    /// Подробный вывод (debug)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Только warn/error
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    Prime,
    Exact,
}

impl From<PolicyArg> for CapacityPolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Prime => CapacityPolicy::Prime,
            PolicyArg::Exact => CapacityPolicy::Exact,
        }
    }
}

fn parse_pair(s: &str) -> Result<(i64, i64), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let key = k
        .trim()
        .parse()
        .map_err(|e| format!("invalid key '{k}': {e}"))?;
    let value = v
        .trim()
        .parse()
        .map_err(|e| format!("invalid value '{v}': {e}"))?;
    Ok((key, value))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load_from(cli.config.as_deref()).context("loading settings")?;
    if let Some(capacity) = cli.capacity {
        settings.map.initial_capacity = capacity;
    }
    if let Some(load_factor) = cli.load_factor {
        settings.map.load_factor = load_factor;
    }
    if let Some(policy) = cli.policy {
        settings.map.policy = policy.into();
    }
    if cli.verbose {
        settings.logging.level = "debug".to_string();
    } else if cli.quiet {
        settings.logging.level = "warn".to_string();
    }

    let logging = init_logging(settings.logging.clone()).context("initializing logging")?;
    settings.map.validate().context("invalid map settings")?;

    let mut map = OpenAddressedMap::with_config(&settings.map)?;
    debug!(
        capacity = map.capacity(),
        load_factor = map.load_factor(),
        policy = %map.capacity_policy(),
        "Map created"
    );

    run_demo(&mut map).inspect_err(log_map_error)?;

    for (key, value) in cli.inserts {
        map.insert(key, value).inspect_err(log_map_error)?;
        println!("Inserted {key} => {value}");
    }

    if cli.stats {
        print!("{}", map.stats().format_report());
    }
    if cli.dump {
        println!("{}", map.dump_layout());
    }

    logging.shutdown();
    Ok(())
}

fn run_demo(map: &mut OpenAddressedMap) -> Result<(), MapError> {
    for (key, value) in [(1, 10), (2, 20), (3, 30), (4, 40)] {
        map.insert(key, value)?;
    }

    println!("Value for key 1: {}", map.search(1)?);
    println!("Value for key 2: {}", map.search(2)?);

    map.remove(2)?;
    match map.search(2) {
        Ok(value) => println!("Value for key 2: {value}"),
        Err(e) if e.is_recoverable() => {
            log_map_error(&e);
            println!("{}", e.client_message());
        }
        Err(e) => return Err(e),
    }

    Ok(())
}

/// Логирует ошибку таблицы на уровне, который задаёт её статус-код.
fn log_map_error(err: &MapError) {
    let code = err.status_code();
    let details = err.log_message();

    match code.log_level() {
        LogLevel::Trace => trace!(%code, error = %details, "Map operation failed"),
        LogLevel::Debug => debug!(%code, error = %details, "Map operation failed"),
        LogLevel::Info => info!(%code, error = %details, "Map operation failed"),
        LogLevel::Warn => warn!(%code, error = %details, "Map operation failed"),
        LogLevel::Error => error!(%code, error = %details, "Map operation failed"),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use tracing::Level;

    use super::*;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Buffer {
        fn write(
            &mut self,
            buf: &[u8],
        ) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logged_at(
        max_level: Level,
        err: &MapError,
    ) -> String {
        let buffer = Buffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(max_level)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        tracing::subscriber::with_default(subscriber, || log_map_error(err));

        let out = buffer.0.lock().unwrap();
        String::from_utf8_lossy(&out).into_owned()
    }

    /// Тест проверяет, что уровень события берётся из статус-кода ошибки.
    #[test]
    fn test_log_map_error_uses_status_level() {
        let missing = MapError::KeyNotFound { key: 2 };
        assert!(logged_at(Level::INFO, &missing).is_empty());

        let out = logged_at(Level::DEBUG, &missing);
        assert!(out.contains("DEBUG"), "got: {out}");
        assert!(out.contains("Map operation failed"), "got: {out}");
        assert!(out.contains("NotFound"), "got: {out}");

        let full = MapError::TableFull { capacity: 8 };
        let out = logged_at(Level::ERROR, &full);
        assert!(out.contains("ERROR"), "got: {out}");
        assert!(out.contains("CapacityExhausted"), "got: {out}");
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("5=50"), Ok((5, 50)));
        assert_eq!(parse_pair(" -3 = 7 "), Ok((-3, 7)));
        assert!(parse_pair("5").is_err());
        assert!(parse_pair("x=1").is_err());
    }
}
