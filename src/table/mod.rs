//! Хеш-таблица с открытой адресацией для целочисленных ключей.
//!
//! # Модули
//!
//! - `slot`: состояние одной ячейки (Empty / Tombstone / Occupied).
//! - `probe`: хеш-функция и квадратичная последовательность проб.
//! - `capacity`: политика выбора ёмкости (простые числа или точное удвоение).
//! - `map_base`: сама таблица `OpenAddressedMap`.
//! - `safety`: валидация инвариантов и статистика.

pub mod capacity;
pub mod map_base;
pub mod probe;
pub mod safety;
pub mod slot;

// Publicly re-export all types and functions from the submodules to
// simplify access from external code.
pub use capacity::*;
pub use map_base::*;
pub use probe::*;
pub use safety::*;
pub use slot::*;
