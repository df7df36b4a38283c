use thiserror::Error;

/// Макрос для валидации условий с возвратом ошибки.
#[macro_export]
macro_rules! validate {
    ($cond:expr, $err:expr) => {
        if !$cond {
            return Err($err);
        }
    };
}

/// Нарушения инвариантов таблицы, найденные `validate_invariants`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Таблица без ячеек
    #[error("Table has zero capacity")]
    ZeroCapacity,
    /// Счётчик живых записей не совпадает с реальным числом занятых ячеек
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// Счётчик tombstone не совпадает с реальным
    #[error("Tombstone count mismatch: expected {expected}, got {actual}")]
    TombstoneMismatch { expected: usize, actual: usize },
    /// Один ключ занимает несколько ячеек
    #[error("Duplicate key {key} in slots {first} and {second}")]
    DuplicateKey {
        key: i64,
        first: usize,
        second: usize,
    },
    /// Ключ не находится пробированием от домашней ячейки
    #[error("Key {key} in slot {slot} is unreachable from home slot {home}")]
    UnreachableKey { key: i64, slot: usize, home: usize },
    /// Превышен порог load factor
    #[error("Load factor exceeded: {len}/{capacity} > {threshold}")]
    LoadFactorExceeded {
        len: usize,
        capacity: usize,
        threshold: f64,
    },
}

/// Снимок состояния таблицы.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStats {
    /// Количество ячеек
    pub capacity: usize,
    /// Живые записи
    pub len: usize,
    /// Удалённые, но ещё не вычищенные ячейки
    pub tombstones: usize,
    /// Ни разу не использованные ячейки
    pub empty: usize,
    /// `len / capacity`
    pub current_load: f64,
    /// Настроенный порог load factor
    pub load_factor: f64,
    /// Сколько раз таблица перестраивалась с ростом
    pub resizes: u64,
    /// Самая длинная последовательность проб до живого ключа
    /// (1 - ключ лежит в домашней ячейке)
    pub max_probe_len: usize,
}

impl TableStats {
    /// Форматирует статистику для вывода.
    pub fn format_report(&self) -> String {
        let mut report = String::new();
        report.push_str("Hash table statistics:\n");
        report.push_str(&format!("  Capacity: {}\n", self.capacity));
        report.push_str(&format!("  Live entries: {}\n", self.len));
        report.push_str(&format!("  Tombstones: {}\n", self.tombstones));
        report.push_str(&format!("  Empty slots: {}\n", self.empty));
        report.push_str(&format!(
            "  Load: {:.3} (threshold {:.3})\n",
            self.current_load, self.load_factor
        ));
        report.push_str(&format!("  Resizes: {}\n", self.resizes));
        report.push_str(&format!("  Longest probe: {}\n", self.max_probe_len));
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::UnreachableKey {
            key: 3,
            slot: 5,
            home: 3,
        };
        assert!(err.to_string().contains("unreachable"));

        let err = ValidationError::LengthMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Length mismatch: expected 2, got 3");
    }

    #[test]
    fn test_stats_report_contains_fields() {
        let stats = TableStats {
            capacity: 17,
            len: 5,
            tombstones: 1,
            empty: 11,
            current_load: 5.0 / 17.0,
            load_factor: 0.7,
            resizes: 2,
            max_probe_len: 3,
        };
        let report = stats.format_report();
        assert!(report.contains("Capacity: 17"));
        assert!(report.contains("Tombstones: 1"));
        assert!(report.contains("Longest probe: 3"));
    }
}
