use tracing_appender::non_blocking::WorkerGuard;

/// Handle для управления lifecycle логирования.
///
/// Держит guard файлового sink: пока handle жив, фоновый поток пишет
/// буферизованные события на диск; drop сбрасывает остаток.
pub struct LoggingHandle {
    file_guard: Option<WorkerGuard>,
}

impl LoggingHandle {
    pub fn new(file_guard: Option<WorkerGuard>) -> Self {
        Self { file_guard }
    }

    /// Включён ли файловый sink.
    pub fn has_file_sink(&self) -> bool {
        self.file_guard.is_some()
    }

    /// Явное завершение: сбрасывает файловый буфер.
    pub fn shutdown(mut self) {
        tracing::debug!(
            file_sink = self.has_file_sink(),
            "Logging shutdown requested"
        );
        drop(self.file_guard.take());
    }
}

impl std::fmt::Debug for LoggingHandle {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("LoggingHandle")
            .field("file_sink", &self.has_file_sink())
            .finish()
    }
}
