use std::any::Any;

use thiserror::Error;

use crate::{ErrorExt, StatusCode};

/// Ошибки операций над хеш-таблицей с открытой адресацией.
///
/// Любая из них оставляет таблицу в том состоянии, в котором она была до
/// начала неудавшейся операции.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Ключ отсутствует (search/remove).
    #[error("Key not found: {key}")]
    KeyNotFound { key: i64 },

    /// Рост таблицы упёрся в переполнение ёмкости.
    #[error("Hash table is full (capacity {capacity})")]
    TableFull { capacity: usize },

    /// Недопустимая ёмкость или порог load factor при создании.
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
}

impl MapError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// `true` для ошибок, после которых вызывающий код может продолжать
    /// работу с таблицей без каких-либо сомнений в её целостности.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::KeyNotFound { .. })
    }
}

impl ErrorExt for MapError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::KeyNotFound { .. } => StatusCode::NotFound,
            Self::TableFull { .. } => StatusCode::CapacityExhausted,
            Self::InvalidConfiguration { .. } => StatusCode::InvalidArgs,
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
