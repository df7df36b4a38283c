/// Домашняя ячейка ключа: `key mod capacity`, приведённый в
/// `[0, capacity)`.
///
/// Отрицательные ключи нормализуются через `rem_euclid`, поэтому индекс
/// никогда не бывает отрицательным.
#[inline]
pub fn home_slot(
    key: i64,
    capacity: usize,
) -> usize {
    debug_assert!(capacity > 0, "capacity must be positive");
    (key as i128).rem_euclid(capacity as i128) as usize
}

/// Квадратичная последовательность проб.
///
/// `i`-я проба посещает `(home + i*i) mod capacity`. Смещение считается
/// инкрементально (`(i+1)^2 - i^2 = 2i + 1`), так что `i*i` не
/// переполняется даже на больших таблицах. Последовательность ровно
/// `capacity` шагов: после этого таблица считается исчерпанной.
#[derive(Debug, Clone)]
pub struct QuadraticProbe {
    index: usize,
    step: usize,
    capacity: usize,
}

impl QuadraticProbe {
    pub fn new(
        key: i64,
        capacity: usize,
    ) -> Self {
        Self {
            index: home_slot(key, capacity),
            step: 0,
            capacity,
        }
    }

    /// Количество уже выданных проб.
    #[inline]
    pub fn step(&self) -> usize {
        self.step
    }
}

impl Iterator for QuadraticProbe {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.step >= self.capacity {
            return None;
        }

        let current = self.index;
        let delta = (2 * self.step + 1) % self.capacity;

        self.index = (self.index + delta) % self.capacity;
        self.step += 1;

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.capacity - self.step;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for QuadraticProbe {}
