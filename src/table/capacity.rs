use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Политика выбора ёмкости таблицы при создании и при росте.
///
/// Квадратичное пробирование `(h + i*i) mod n` при произвольном `n` может
/// зациклиться на малой части таблицы (для степени двойки - примерно на
/// шестой части). При простом `n` последовательность гарантированно
/// посещает `(n + 1) / 2` различных ячеек, поэтому по умолчанию ёмкость
/// округляется до простого числа.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityPolicy {
    /// Ёмкость округляется вверх до простого числа; рост - до
    /// ближайшего простого не меньше удвоенной ёмкости.
    #[default]
    Prime,
    /// Ёмкость используется как есть; рост - точное удвоение.
    Exact,
}

impl CapacityPolicy {
    /// Фактическая ёмкость для запрошенной `requested` (> 0).
    ///
    /// `None`, если подходящее значение не помещается в `usize`.
    pub fn initial(
        self,
        requested: usize,
    ) -> Option<usize> {
        match self {
            CapacityPolicy::Exact => Some(requested),
            CapacityPolicy::Prime => next_prime(requested),
        }
    }

    /// Следующая ёмкость после `current`. Всегда строго больше `current`.
    pub fn grow(
        self,
        current: usize,
    ) -> Option<usize> {
        let doubled = current.max(1).checked_mul(2)?;

        match self {
            CapacityPolicy::Exact => Some(doubled),
            CapacityPolicy::Prime => next_prime(doubled),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CapacityPolicy::Prime => "prime",
            CapacityPolicy::Exact => "exact",
        }
    }
}

impl fmt::Display for CapacityPolicy {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CapacityPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prime" => Ok(CapacityPolicy::Prime),
            "exact" => Ok(CapacityPolicy::Exact),
            other => Err(format!("unknown capacity policy '{other}'")),
        }
    }
}

/// Проверка на простоту перебором делителей вида 6k ± 1.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut d = 5usize;
    while d <= n / d {
        if n % d == 0 || n % (d + 2) == 0 {
            return false;
        }
        d += 6;
    }

    true
}

/// Наименьшее простое число `>= n`.
///
/// `None` при переполнении `usize`.
pub fn next_prime(n: usize) -> Option<usize> {
    let mut candidate = n.max(2);

    while !is_prime(candidate) {
        candidate = candidate.checked_add(1)?;
    }

    Some(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime_small_values() {
        let primes: Vec<usize> = (0..40).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37]);
    }

    #[test]
    fn test_is_prime_squares_of_primes() {
        assert!(!is_prime(25));
        assert!(!is_prime(49));
        assert!(!is_prime(121));
        assert!(!is_prime(10_403)); // 101 * 103
        assert!(is_prime(10_007));
    }

    #[test]
    fn test_next_prime() {
        assert_eq!(next_prime(0), Some(2));
        assert_eq!(next_prime(1), Some(2));
        assert_eq!(next_prime(4), Some(5));
        assert_eq!(next_prime(16), Some(17));
        assert_eq!(next_prime(17), Some(17));
        assert_eq!(next_prime(90), Some(97));
    }

    /// Тест проверяет точную политику: ёмкость как есть, рост удвоением.
    #[test]
    fn test_exact_policy() {
        let p = CapacityPolicy::Exact;
        assert_eq!(p.initial(4), Some(4));
        assert_eq!(p.grow(4), Some(8));
        assert_eq!(p.grow(8), Some(16));
        assert_eq!(p.grow(usize::MAX), None);
    }

    /// Тест проверяет, что простая политика выдаёт простые числа, строго
    /// больше текущей ёмкости.
    #[test]
    fn test_prime_policy_grows_to_primes() {
        let p = CapacityPolicy::Prime;
        assert_eq!(p.initial(4), Some(5));
        assert_eq!(p.initial(16), Some(17));

        let mut cap = p.initial(1).unwrap();
        for _ in 0..10 {
            let next = p.grow(cap).unwrap();
            assert!(next >= cap * 2);
            assert!(is_prime(next));
            cap = next;
        }
    }

    #[test]
    fn test_policy_parse_and_display() {
        assert_eq!("prime".parse::<CapacityPolicy>(), Ok(CapacityPolicy::Prime));
        assert_eq!(" Exact ".parse::<CapacityPolicy>(), Ok(CapacityPolicy::Exact));
        assert!("linear".parse::<CapacityPolicy>().is_err());
        assert_eq!(CapacityPolicy::Exact.to_string(), "exact");
        assert_eq!(CapacityPolicy::default(), CapacityPolicy::Prime);
    }

    #[test]
    fn test_policy_serde_lowercase() {
        let json = serde_json::to_string(&CapacityPolicy::Exact).unwrap();
        assert_eq!(json, "\"exact\"");
        let back: CapacityPolicy = serde_json::from_str("\"prime\"").unwrap();
        assert_eq!(back, CapacityPolicy::Prime);
    }
}
