use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Переменная окружения, перекрывающая уровень логирования из конфигурации.
pub const LOG_LEVEL_ENV: &str = "PROBEMAP_LOG_LEVEL";

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Формат вывода событий.
#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Конфигурация логирования.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Уровень для модулей probemap (trace/debug/info/warn/error)
    #[serde(default = "default_level")]
    pub level: String,
    /// Формат консольного вывода
    #[serde(default)]
    pub format: LogFormat,
    /// ANSI-цвета в консоли
    #[serde(default = "default_true")]
    pub with_ansi: bool,
    /// Показывать target события
    #[serde(default = "default_true")]
    pub with_target: bool,
    /// Каталог для файлового лога; `None` - только консоль
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// Имя файла (ротация по дням добавляет суффикс даты)
    #[serde(default = "default_filename")]
    pub filename: String,
}

impl LoggingConfig {
    /// Применяет `PROBEMAP_LOG_LEVEL`, если переменная задана.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var(LOG_LEVEL_ENV) {
            if !level.trim().is_empty() {
                self.level = level.trim().to_ascii_lowercase();
            }
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if !LEVELS.contains(&self.level.as_str()) {
            return Err(AppError::InvalidLogging(format!(
                "unknown log level '{}', expected one of {}",
                self.level,
                LEVELS.join("/")
            )));
        }
        if self.filename.trim().is_empty() {
            return Err(AppError::InvalidLogging(
                "log filename must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Директива для `EnvFilter`: уровень для наших модулей, `warn` для
    /// остальных.
    pub fn build_filter_directive(&self) -> String {
        format!("warn,probemap={}", self.level)
    }

    /// Создаёт каталог для файлового лога, если он задан.
    pub fn ensure_log_dir(&self) -> AppResult<()> {
        if let Some(dir) = &self.log_dir {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            with_ansi: true,
            with_target: true,
            log_dir: None,
            filename: default_filename(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_filename() -> String {
    "probemap.log".to_string()
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = LoggingConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.build_filter_directive(), "warn,probemap=info");
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let cfg = LoggingConfig {
            level: "loud".to_string(),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(AppError::InvalidLogging(_))));
    }

    /// Тест проверяет перекрытие уровня переменной окружения.
    #[test]
    #[serial]
    fn test_env_override() {
        std::env::set_var(LOG_LEVEL_ENV, "DEBUG");
        let mut cfg = LoggingConfig::default();
        cfg.apply_env_overrides();
        std::env::remove_var(LOG_LEVEL_ENV);

        assert_eq!(cfg.level, "debug");
    }

    #[test]
    fn test_deserialize_partial() {
        let cfg: LoggingConfig = serde_json::from_str(r#"{"format":"json"}"#).unwrap();
        assert_eq!(cfg.format, LogFormat::Json);
        assert_eq!(cfg.level, "info");
        assert!(cfg.with_ansi);
        assert!(cfg.log_dir.is_none());
    }

    #[test]
    fn test_ensure_log_dir_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("logs");
        let cfg = LoggingConfig {
            log_dir: Some(dir.clone()),
            ..Default::default()
        };
        cfg.ensure_log_dir().unwrap();
        assert!(dir.is_dir());
    }
}
