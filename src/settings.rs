use ctor::ctor;
use tracing::Level;

#[ctor]
fn set_debug_level() {
    // If RTS_CORE_LOG is unset or falsy, stay silent. Otherwise install a fmt subscriber.
    if std::env::var("RTS_CORE_LOG").map_or(true, |v| v == "0" || v == "false" || v.is_empty()) {
        // Disable logging
    } else {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .init();
    }
}
