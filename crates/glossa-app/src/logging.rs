use glossa_config::log::LogConfig;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the configured filter. Logs go to stderr so stdout
/// only carries the response.
pub fn init(config: &LogConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);

    if config.json {
        builder.json().init();
    } else {
        builder
            .with_ansi(atty::is(atty::Stream::Stderr))
            .init();
    }
}
