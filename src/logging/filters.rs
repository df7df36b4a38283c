use tracing_subscriber::EnvFilter;

use crate::logging::config::LoggingConfig;

pub fn build_filter_from_config(config: &LoggingConfig) -> EnvFilter {
    let directive = config.build_filter_directive();

    // Если RUST_LOG задан - используем его, иначе директиву из конфига.
    match EnvFilter::try_from_default_env() {
        Ok(env_filter) => env_filter,
        Err(_) => match EnvFilter::try_new(&directive) {
            Ok(filter) => filter,
            Err(e) => {
                eprintln!(
                    "Invalid log filter directive from config ('{directive}'): {e}; falling back to 'info'"
                );
                EnvFilter::new("info")
            }
        },
    }
}
