use tracing::Subscriber;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter};

/// Installs the global logger for a TartWM binary.
///
/// The filter is read from `RUST_LOG`; when unset, lifecycle messages
/// are still wanted, so `info` is the fallback.
pub fn setup_logging() {
    let subscriber = get_subscriber();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Couldn't setup global subscriber (logger)");
}

fn get_subscriber() -> impl Subscriber {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
}
