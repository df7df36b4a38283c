use probemap_error::{ensure, MapError, MapResult};
use serde::{Deserialize, Serialize};

use crate::table::{CapacityPolicy, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};

/// Параметры создания [`OpenAddressedMap`](crate::table::OpenAddressedMap).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Запрошенная начальная ёмкость (до применения политики)
    #[serde(default = "default_capacity")]
    pub initial_capacity: usize,
    /// Порог load factor, интервал (0, 1)
    #[serde(default = "default_load_factor")]
    pub load_factor: f64,
    /// Политика выбора ёмкости
    #[serde(default)]
    pub policy: CapacityPolicy,
}

impl MapConfig {
    /// Проверяет параметры так же, как это делает конструктор таблицы.
    pub fn validate(&self) -> MapResult<()> {
        ensure!(
            self.initial_capacity > 0,
            MapError::invalid_config("map.initial_capacity must be at least 1")
        );
        ensure!(
            self.load_factor.is_finite() && self.load_factor > 0.0 && self.load_factor < 1.0,
            MapError::invalid_config(format!(
                "map.load_factor must be in (0, 1), got {}",
                self.load_factor
            ))
        );
        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
            policy: CapacityPolicy::default(),
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_load_factor() -> f64 {
    DEFAULT_LOAD_FACTOR
}
