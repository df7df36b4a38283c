use std::{any::Any, error::Error};

use crate::StatusCode;

/// Расширение для ошибок библиотеки (object-safe).
///
/// Предоставляет вспомогательные методы для работы с ошибками:
/// - извлечение статус-кода,
/// - безопасное сообщение для вызывающего кода,
/// - детализированное сообщение для логов.
pub trait ErrorExt: Error + Send + Sync + 'static {
    /// Статус ошибки.
    ///
    /// По умолчанию возвращает [`StatusCode::Internal`].
    fn status_code(&self) -> StatusCode {
        StatusCode::Internal
    }

    /// Возвращает ошибку как [`Any`](std::any::Any),
    /// чтобы можно было выполнить downcast к конкретному типу.
    fn as_any(&self) -> &dyn Any;

    /// Безопасное сообщение для пользователя.
    ///
    /// Для внутренних ошибок возвращает строку `"Internal error"`, не
    /// раскрывая деталей реализации.
    fn client_message(&self) -> String {
        match self.status_code() {
            StatusCode::Unknown | StatusCode::Internal => "Internal error".to_string(),
            _ => self.to_string(),
        }
    }

    /// Детализированное сообщение для логов.
    fn log_message(&self) -> String {
        format!("{self:?}")
    }

    /// Имя типа ошибки (для логирования).
    fn type_name(&self) -> String {
        std::any::type_name::<Self>()
            .split("::")
            .last()
            .unwrap_or("Unknown")
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::{any::Any, error::Error, fmt};

    use super::*;

    // Ошибка без переопределения status_code (default = Internal).
    #[derive(Debug)]
    struct DefaultError(pub &'static str);

    impl fmt::Display for DefaultError {
        fn fmt(
            &self,
            f: &mut fmt::Formatter<'_>,
        ) -> fmt::Result {
            write!(f, "DefaultError: {}", self.0)
        }
    }

    impl Error for DefaultError {}

    impl ErrorExt for DefaultError {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    /// Тест проверяет, что по умолчанию статус ошибки - `Internal`.
    #[test]
    fn test_default_status_code_is_internal() {
        let e = DefaultError("oops");
        assert_eq!(e.status_code(), StatusCode::Internal);
    }

    /// Тест проверяет, что `client_message` скрывает детали внутренних
    /// ошибок.
    #[test]
    fn test_client_message_internal() {
        let e = DefaultError("sensitive");
        assert_eq!(e.client_message(), "Internal error");
        assert!(e.log_message().contains("sensitive"));
    }

    #[test]
    fn test_type_name_is_short() {
        let e = DefaultError("x");
        assert_eq!(e.type_name(), "DefaultError");
    }

    #[test]
    fn test_as_any_downcast() {
        let e = DefaultError("x");
        let any = e.as_any();
        assert!(any.downcast_ref::<DefaultError>().is_some());
    }
}
