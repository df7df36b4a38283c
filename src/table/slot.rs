use std::fmt;

/// Одна ячейка таблицы.
///
/// `Empty` и `Tombstone` различаются принципиально: поиск может
/// остановиться на `Empty`, но обязан продолжить пробирование после
/// `Tombstone`, так как дальше по последовательности может лежать ключ,
/// вставленный до удаления.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Ячейка ни разу не использовалась.
    #[default]
    Empty,
    /// Ранее занятая, логически удалённая ячейка.
    Tombstone,
    /// Живая пара ключ-значение.
    Occupied { key: i64, value: i64 },
}

impl Slot {
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    #[inline]
    pub fn is_tombstone(&self) -> bool {
        matches!(self, Slot::Tombstone)
    }

    /// Возвращает `true`, если ячейка занята именно ключом `key`.
    #[inline]
    pub fn holds(
        &self,
        key: i64,
    ) -> bool {
        matches!(self, Slot::Occupied { key: k, .. } if *k == key)
    }

    /// Живая пара `(key, value)`, если ячейка занята.
    #[inline]
    pub fn entry(&self) -> Option<(i64, i64)> {
        match *self {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        }
    }
}

/// `-` для пустой ячейки, `†` для tombstone, `key:value` для занятой.
impl fmt::Display for Slot {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Slot::Empty => f.write_str("-"),
            Slot::Tombstone => f.write_str("†"),
            Slot::Occupied { key, value } => write!(f, "{key}:{value}"),
        }
    }
}
