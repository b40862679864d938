use tracing::Level;
use tracing_error::ErrorLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Initialize the tracing subscriber and install the color_eyre panic
/// handler. Filtering comes from `RUST_LOG`, defaulting to `gateway=info`.
pub fn init_logging() {
    color_eyre::install().expect("Unable to install color_eyre");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(Level::INFO.into())
            .parse("gateway=info")
            .expect("Invalid filter directive")
    });

    let fmt_layer = fmt::layer().with_target(true).with_thread_ids(false);

    let subscriber = Registry::default().with(env_filter).with(fmt_layer).with(ErrorLayer::default());
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set global default subscriber");
}
