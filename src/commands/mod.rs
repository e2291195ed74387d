pub mod check;
pub mod grade;
pub mod run;

use study_quiz::config::QuizConfig;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the configured filter.
pub fn env_filter(config: &QuizConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
}

pub fn init_stderr_logging(config: &QuizConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .init();
}
