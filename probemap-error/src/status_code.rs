use std::fmt;

use num_enum::TryFromPrimitive;
#[cfg(feature = "serde_repr")]
use serde_repr::{Deserialize_repr, Serialize_repr};
#[cfg(feature = "strum")]
use strum_macros::{AsRefStr, EnumIter};

/// Коды статуса для категоризации ошибок.
///
/// # Диапазоны:
/// - 0xxx: Успех
/// - 1xxx: Общие ошибки (в т.ч. некорректная конфигурация)
/// - 2xxx: Ошибки данных
/// - 5xxx: Хранилище (исчерпание таблицы)
///
/// # Реализация:
/// - `num_enum::TryFromPrimitive` даёт нативную реализацию `TryFrom<u32>`.
/// - опционально: `strum` для `AsRefStr`/`EnumIter` (feature = "strum").
/// - опционально: `serde_repr` для сериализации в виде числового значения
///   (feature = "serde_repr").
#[cfg_attr(feature = "strum", derive(AsRefStr, EnumIter))]
#[cfg_attr(feature = "serde_repr", derive(Serialize_repr, Deserialize_repr))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u32)]
#[non_exhaustive]
pub enum StatusCode {
    // === 0xxx: Успех ===
    Success = 0,

    // === 1xxx: Общие ошибки ===
    Unknown = 1000,
    Internal = 1003,
    InvalidArgs = 1004,

    // === 2xxx: Ошибки данных ===
    NotFound = 2000,

    // === 5xxx: Хранилище ===
    CapacityExhausted = 5008,
}

/// Уровень, на котором вызывающий код логирует ошибку с данным кодом.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl StatusCode {
    /// Числовое представление кода статуса.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Пытается получить вариант `StatusCode` из `u32`.
    ///
    /// Возвращает `None`, если значение не соответствует ни одному варианту.
    pub fn from_u32(v: u32) -> Option<Self> {
        Self::try_from(v).ok()
    }

    /// Вернёт `true`, если переданный `code` означает успешный результат.
    pub fn is_success(code: u32) -> bool {
        Self::Success as u32 == code
    }

    /// Является ли код ошибкой со стороны вызывающего кода: отсутствующий
    /// ключ или неверные аргументы.
    pub fn is_client_error(&self) -> bool {
        let c = self.code();
        if (2000..=4999).contains(&c) {
            return true;
        }
        matches!(self, Self::InvalidArgs)
    }

    /// Является ли код внутренней ошибкой (диапазоны `1xxx` и `5xxx`).
    ///
    /// `InvalidArgs` формально лежит в `1xxx`, но относится к клиентским.
    pub fn is_server_error(&self) -> bool {
        let c = self.code();
        matches!(c, 1000..=1999 | 5000..=7999) && !matches!(self, Self::InvalidArgs)
    }

    /// Рекомендуемый уровень логирования для данного кода.
    pub fn log_level(&self) -> LogLevel {
        match self {
            Self::Success => LogLevel::Trace,
            Self::NotFound => LogLevel::Debug,
            Self::InvalidArgs => LogLevel::Info,
            Self::Internal | Self::CapacityExhausted => LogLevel::Error,
            Self::Unknown => LogLevel::Warn,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для StatusCode
////////////////////////////////////////////////////////////////////////////////

impl From<StatusCode> for u32 {
    fn from(c: StatusCode) -> Self {
        c.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        // С feature "strum" используем имя из AsRefStr, иначе Debug-имя.
        #[cfg(feature = "strum")]
        {
            write!(f, "{} ({})", self.as_ref(), self.code())
        }
        #[cfg(not(feature = "strum"))]
        {
            write!(f, "{:?} ({})", self, self.code())
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
