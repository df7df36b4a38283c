/// Немедленно возвращает ошибку (аналогично `anyhow::bail!`).
///
/// Ошибка приводится к типу ошибки функции через `From`, поэтому макрос
/// одинаково работает и с `MapResult`, и с обёртками прикладного уровня.
///
/// Пример:
///
/// ```ignore
/// use probemap_error::{bail, MapError, MapResult};
///
/// fn check_capacity(capacity: usize) -> MapResult<()> {
///     if capacity == 0 {
///         bail!(MapError::invalid_config("capacity must be positive"));
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! bail {
    ($err:expr) => {
        return Err(::core::convert::From::from($err))
    };
}

/// Проверяет условие и вызывает `bail!`, если условие ложно.
///
/// Пример:
///
/// ```ignore
/// use probemap_error::{ensure, MapError, MapResult};
///
/// fn check_load_factor(lf: f64) -> MapResult<()> {
///     ensure!(lf > 0.0 && lf < 1.0, MapError::invalid_config("load factor out of range"));
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            $crate::bail!($err);
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{MapError, MapResult};

    fn positive(v: i64) -> MapResult<i64> {
        crate::ensure!(v > 0, MapError::invalid_config("value must be positive"));
        Ok(v)
    }

    fn always_missing(key: i64) -> MapResult<()> {
        crate::bail!(MapError::KeyNotFound { key });
    }

    #[test]
    fn test_ensure_passes_and_fails() {
        assert_eq!(positive(3), Ok(3));
        assert_eq!(
            positive(0),
            Err(MapError::invalid_config("value must be positive"))
        );
    }

    #[test]
    fn test_bail_returns_error() {
        assert_eq!(always_missing(5), Err(MapError::KeyNotFound { key: 5 }));
    }
}
