use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::{
    config::MapConfig,
    logging::LoggingConfig,
    table::{DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR},
};

/// Имя необязательного файла конфигурации в рабочем каталоге
/// (`probemap.toml`, `probemap.yaml`, ...).
pub const CONFIG_BASENAME: &str = "probemap";

/// Префикс переменных окружения: `PROBEMAP__MAP__LOAD_FACTOR=0.5`.
pub const ENV_PREFIX: &str = "PROBEMAP";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Загружает настройки: значения по умолчанию, затем необязательный
    /// `probemap.*` в рабочем каталоге, затем переменные окружения.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// То же, что [`Settings::load`], но с явным файлом конфигурации,
    /// который обязан существовать.
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            // Добавляем значения по умолчанию
            .set_default("map.initial_capacity", DEFAULT_CAPACITY as u64)?
            .set_default("map.load_factor", DEFAULT_LOAD_FACTOR)?
            .set_default("map.policy", "prime")?
            .add_source(File::with_name(CONFIG_BASENAME).required(false));

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let cfg = builder
            // Переменные окружения с префиксом PROBEMAP и разделителем "__"
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Десериализуем конфигурацию в нашу структуру
        cfg.try_deserialize()
    }
}
