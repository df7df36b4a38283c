use std::collections::HashMap;

use probemap_error::{ensure, MapError, MapResult};
use tracing::{debug, trace, warn};

use super::{CapacityPolicy, QuadraticProbe, Slot, TableStats, ValidationError};
use crate::config::MapConfig;

/// Ёмкость по умолчанию (до применения политики).
pub const DEFAULT_CAPACITY: usize = 16;

/// Порог load factor по умолчанию.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.7;

/// Хеш-таблица `i64 -> i64` с открытой адресацией.
///
/// Все записи лежат в одном непрерывном векторе ячеек. Коллизии
/// разрешаются квадратичным пробированием, удаление оставляет tombstone,
/// рост происходит до вставки, если после неё `len / capacity` превысил
/// бы порог.
///
/// **ИНВАРИАНТЫ:**
///
/// - `capacity() > 0`;
/// - на каждый ключ не более одной занятой ячейки;
/// - после каждой успешной вставки `len / capacity <= load_factor`;
/// - любой живой ключ достижим пробированием от `home_slot(key)` без
///   прохода через `Empty`.
///
/// Любая ошибка оставляет таблицу ровно в том состоянии, в котором она была
/// до вызова.
#[derive(Debug, Clone)]
pub struct OpenAddressedMap {
    slots: Vec<Slot>,
    len: usize,
    tombstones: usize,
    load_factor: f64,
    policy: CapacityPolicy,
    resizes: u64,
}

/// Куда пробирование привело вставку.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Ключ уже был, значение перезаписано.
    Updated,
    /// Новая запись; `reused_tombstone` - заняла ли она tombstone.
    Inserted { reused_tombstone: bool },
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl OpenAddressedMap {
    /// Создаёт таблицу с порогом по умолчанию и политикой `Prime`.
    ///
    /// `capacity == 0` отклоняется с `InvalidConfiguration`.
    pub fn new(capacity: usize) -> MapResult<Self> {
        Self::with_policy(capacity, DEFAULT_LOAD_FACTOR, CapacityPolicy::default())
    }

    /// Создаёт таблицу с заданным порогом load factor из интервала (0, 1).
    pub fn with_load_factor(
        capacity: usize,
        load_factor: f64,
    ) -> MapResult<Self> {
        Self::with_policy(capacity, load_factor, CapacityPolicy::default())
    }

    /// Полный конструктор: ёмкость, порог и политика роста.
    pub fn with_policy(
        capacity: usize,
        load_factor: f64,
        policy: CapacityPolicy,
    ) -> MapResult<Self> {
        ensure!(
            capacity > 0,
            MapError::invalid_config("capacity must be at least 1")
        );
        ensure!(
            load_factor.is_finite() && load_factor > 0.0 && load_factor < 1.0,
            MapError::invalid_config(format!(
                "load factor must be in (0, 1), got {load_factor}"
            ))
        );

        let actual = policy.initial(capacity).ok_or_else(|| {
            MapError::invalid_config(format!("capacity {capacity} is too large"))
        })?;

        Ok(Self::from_parts(actual, load_factor, policy))
    }

    /// Создаёт таблицу по конфигурации (см. [`MapConfig`]).
    pub fn with_config(config: &MapConfig) -> MapResult<Self> {
        Self::with_policy(config.initial_capacity, config.load_factor, config.policy)
    }

    fn from_parts(
        capacity: usize,
        load_factor: f64,
        policy: CapacityPolicy,
    ) -> Self {
        Self {
            slots: vec![Slot::Empty; capacity],
            len: 0,
            tombstones: 0,
            load_factor,
            policy,
            resizes: 0,
        }
    }

    /// Вставляет пару `(key, value)`.
    ///
    /// Возвращает `true`, если создана новая запись, и `false`, если
    /// перезаписано значение существующего ключа. Если пробам не хватило
    /// ячеек, таблица растёт и вставка повторяется.
    pub fn insert(
        &mut self,
        key: i64,
        value: i64,
    ) -> MapResult<bool> {
        if !self.exceeds_threshold(self.len + 1, self.capacity()) {
            if let Some(placement) = Self::place(&mut self.slots, key, value) {
                self.account(placement);
                return Ok(placement != Placement::Updated);
            }

            debug!(
                key,
                capacity = self.capacity(),
                live_entries = self.len,
                "Probe sequence exhausted, growing hash table"
            );
        }

        self.grow_and_insert(key, value)
    }

    /// Возвращает значение по ключу или `KeyNotFound`.
    pub fn search(
        &self,
        key: i64,
    ) -> MapResult<i64> {
        match Self::locate(&self.slots, key).map(|idx| self.slots[idx]) {
            Some(Slot::Occupied { value, .. }) => Ok(value),
            _ => Err(MapError::KeyNotFound { key }),
        }
    }

    /// Возвращает `Some(value)` для указанного ключа или `None`.
    pub fn get(
        &self,
        key: i64,
    ) -> Option<i64> {
        self.search(key).ok()
    }

    pub fn contains_key(
        &self,
        key: i64,
    ) -> bool {
        Self::locate(&self.slots, key).is_some()
    }

    /// Удаляет ключ, оставляя на его месте tombstone. Возвращает удалённое
    /// значение или `KeyNotFound`. Ёмкость не уменьшается.
    pub fn remove(
        &mut self,
        key: i64,
    ) -> MapResult<i64> {
        let idx = Self::locate(&self.slots, key).ok_or(MapError::KeyNotFound { key })?;
        let Slot::Occupied { value, .. } = self.slots[idx] else {
            return Err(MapError::KeyNotFound { key });
        };

        self.slots[idx] = Slot::Tombstone;
        self.len -= 1;
        self.tombstones += 1;

        Ok(value)
    }

    /// Сбрасывает все ячейки в `Empty`, сохраняя ёмкость.
    pub fn clear(&mut self) {
        self.slots.fill(Slot::Empty);
        self.len = 0;
        self.tombstones = 0;
        trace!(capacity = self.capacity(), "Hash table cleared");
    }

    /// Перестраивает таблицу в следующую по политике ёмкость.
    ///
    /// Все живые записи перехешируются, tombstone отбрасываются. Если при
    /// очередной ёмкости записи не раскладываются, рост продолжается.
    /// Обычно вызывается автоматически из `insert`.
    pub fn resize(&mut self) -> MapResult<()> {
        let mut capacity = self.capacity();

        loop {
            capacity = self.next_capacity(capacity)?;
            if let Some(grown) = self.rebuilt(capacity) {
                self.commit(grown);
                return Ok(());
            }
        }
    }

    /// Количество живых записей.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Возвращает `true`, если живых записей нет.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Текущее количество ячеек.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Настроенный порог load factor.
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Фактическая заполненность `len / capacity`.
    pub fn current_load(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    pub fn capacity_policy(&self) -> CapacityPolicy {
        self.policy
    }

    /// Собирает статистику по ячейкам и длинам проб.
    pub fn stats(&self) -> TableStats {
        let capacity = self.capacity();
        let max_probe_len = self
            .slots
            .iter()
            .filter_map(Slot::entry)
            .map(|(key, _)| {
                let mut probe = QuadraticProbe::new(key, capacity);
                match probe.find(|&idx| self.slots[idx].holds(key)) {
                    Some(_) => probe.step(),
                    None => capacity,
                }
            })
            .max()
            .unwrap_or(0);

        TableStats {
            capacity,
            len: self.len,
            tombstones: self.tombstones,
            empty: self.slots.iter().filter(|s| s.is_empty()).count(),
            current_load: self.current_load(),
            load_factor: self.load_factor,
            resizes: self.resizes,
            max_probe_len,
        }
    }

    /// Раскладка ячеек в одну строку: `-` пустая ячейка, `†` tombstone,
    /// `key:value` занятая.
    pub fn dump_layout(&self) -> String {
        self.slots
            .iter()
            .map(Slot::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Полная проверка инвариантов таблицы. O(capacity) по памяти и
    /// O(len * capacity) в худшем случае по времени.
    pub fn validate_invariants(&self) -> Result<(), ValidationError> {
        let capacity = self.capacity();

        crate::validate!(capacity > 0, ValidationError::ZeroCapacity);

        let mut seen: HashMap<i64, usize> = HashMap::with_capacity(self.len);
        let mut tombstones = 0;

        for (idx, slot) in self.slots.iter().enumerate() {
            match *slot {
                Slot::Occupied { key, .. } => {
                    if let Some(&first) = seen.get(&key) {
                        return Err(ValidationError::DuplicateKey {
                            key,
                            first,
                            second: idx,
                        });
                    }
                    seen.insert(key, idx);
                }
                Slot::Tombstone => tombstones += 1,
                Slot::Empty => {}
            }
        }

        crate::validate!(
            seen.len() == self.len,
            ValidationError::LengthMismatch {
                expected: self.len,
                actual: seen.len(),
            }
        );
        crate::validate!(
            tombstones == self.tombstones,
            ValidationError::TombstoneMismatch {
                expected: self.tombstones,
                actual: tombstones,
            }
        );

        for (&key, &slot) in &seen {
            crate::validate!(
                Self::locate(&self.slots, key) == Some(slot),
                ValidationError::UnreachableKey {
                    key,
                    slot,
                    home: super::home_slot(key, capacity),
                }
            );
        }

        crate::validate!(
            !self.exceeds_threshold(self.len, capacity),
            ValidationError::LoadFactorExceeded {
                len: self.len,
                capacity,
                threshold: self.load_factor,
            }
        );

        Ok(())
    }

    /// Рост с последующей вставкой.
    ///
    /// Ёмкость увеличивается по политике, пока порог не соблюдён и пока
    /// все записи вместе с новым ключом не разложатся. Новая таблица
    /// заменяет текущую только после успешного размещения ключа, так что
    /// `TableFull` (переполнение ёмкости) оставляет таблицу нетронутой.
    fn grow_and_insert(
        &mut self,
        key: i64,
        value: i64,
    ) -> MapResult<bool> {
        let mut capacity = self.capacity();

        loop {
            capacity = self.next_capacity(capacity)?;
            if self.exceeds_threshold(self.len + 1, capacity) {
                continue;
            }

            let Some(mut grown) = self.rebuilt(capacity) else {
                continue;
            };
            if let Some(placement) = Self::place(&mut grown, key, value) {
                self.commit(grown);
                self.account(placement);
                return Ok(placement != Placement::Updated);
            }
        }
    }

    /// Новая таблица ёмкостью `capacity` со всеми живыми записями.
    /// `None`, если какая-то запись не нашла ячейку.
    fn rebuilt(
        &self,
        capacity: usize,
    ) -> Option<Vec<Slot>> {
        let mut slots = vec![Slot::Empty; capacity];

        for (key, value) in self.slots.iter().filter_map(Slot::entry) {
            Self::place(&mut slots, key, value)?;
        }

        Some(slots)
    }

    /// Заменяет ячейки перестроенной таблицей. Tombstone в ней уже нет.
    fn commit(
        &mut self,
        slots: Vec<Slot>,
    ) {
        let old_capacity = self.capacity();
        let dropped_tombstones = self.tombstones;

        self.slots = slots;
        self.tombstones = 0;
        self.resizes += 1;

        debug!(
            old_capacity,
            new_capacity = self.capacity(),
            live_entries = self.len,
            dropped_tombstones,
            policy = %self.policy,
            "Hash table resized"
        );
    }

    fn account(
        &mut self,
        placement: Placement,
    ) {
        if let Placement::Inserted { reused_tombstone } = placement {
            self.len += 1;
            if reused_tombstone {
                self.tombstones -= 1;
            }
        }
    }

    fn next_capacity(
        &self,
        current: usize,
    ) -> MapResult<usize> {
        match self.policy.grow(current) {
            Some(capacity) => Ok(capacity),
            None => Err(self.table_full(current)),
        }
    }

    #[inline]
    fn exceeds_threshold(
        &self,
        len: usize,
        capacity: usize,
    ) -> bool {
        len as f64 / capacity as f64 > self.load_factor
    }

    fn table_full(
        &self,
        capacity: usize,
    ) -> MapError {
        warn!(
            capacity,
            live_entries = self.len,
            tombstones = self.tombstones,
            policy = %self.policy,
            "Hash table capacity exhausted"
        );
        MapError::TableFull { capacity }
    }

    /// Пробирование для поиска: индекс занятой ячейки с ключом `key`.
    ///
    /// Tombstone пропускаются, `Empty` означает промах.
    fn locate(
        slots: &[Slot],
        key: i64,
    ) -> Option<usize> {
        for idx in QuadraticProbe::new(key, slots.len()) {
            match slots[idx] {
                Slot::Empty => return None,
                slot if slot.holds(key) => return Some(idx),
                _ => {}
            }
        }

        None
    }

    /// Пробирование для вставки.
    ///
    /// Перезаписывает значение, если ключ найден; иначе занимает первую
    /// встреченную `Empty`/`Tombstone` ячейку. Поиск ключа продолжается
    /// после первого tombstone до `Empty`, чтобы не создать дубликат.
    /// `None` - последовательность исчерпана без свободной ячейки.
    fn place(
        slots: &mut [Slot],
        key: i64,
        value: i64,
    ) -> Option<Placement> {
        let mut first_vacant: Option<usize> = None;

        for idx in QuadraticProbe::new(key, slots.len()) {
            match slots[idx] {
                Slot::Occupied { key: k, .. } if k == key => {
                    slots[idx] = Slot::Occupied { key, value };
                    return Some(Placement::Updated);
                }
                Slot::Occupied { .. } => {}
                Slot::Tombstone => {
                    first_vacant.get_or_insert(idx);
                }
                Slot::Empty => {
                    first_vacant.get_or_insert(idx);
                    break;
                }
            }
        }

        let idx = first_vacant?;
        let reused_tombstone = slots[idx].is_tombstone();
        slots[idx] = Slot::Occupied { key, value };

        Some(Placement::Inserted { reused_tombstone })
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для OpenAddressedMap
////////////////////////////////////////////////////////////////////////////////

impl Default for OpenAddressedMap {
    fn default() -> Self {
        let policy = CapacityPolicy::default();
        let capacity = policy
            .initial(DEFAULT_CAPACITY)
            .unwrap_or(DEFAULT_CAPACITY);

        Self::from_parts(capacity, DEFAULT_LOAD_FACTOR, policy)
    }
}

/// Таблицы равны, если содержат одинаковые пары ключ-значение, независимо
/// от ёмкости и расположения записей.
impl PartialEq for OpenAddressedMap {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.len == other.len
            && self
                .slots
                .iter()
                .filter_map(Slot::entry)
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
