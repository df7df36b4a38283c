use std::io;

use probemap_error::{ErrorExt, MapError, StatusCode};
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Ошибки прикладного уровня: загрузка настроек, логирование, операции
/// над таблицей в демонстрационном драйвере.
#[derive(Error, Debug)]
pub enum AppError {
    // ==== System / External ====
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // ==== Map ====
    #[error("Map error: {0}")]
    Map(#[from] MapError),

    // ==== Logging ====
    #[error("Logging setup failed: {0}")]
    InvalidLogging(String),
}

impl AppError {
    /// Статус-код: для ошибок таблицы - код самой `MapError`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Map(e) => e.status_code(),
            Self::Config(_) | Self::InvalidLogging(_) => StatusCode::InvalidArgs,
            Self::Io(_) => StatusCode::Internal,
        }
    }
}
