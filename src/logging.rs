/// Installs a `tracing` subscriber that prints gateway diagnostics.
///
/// Only the first call has an effect. Hosts that install their own subscriber
/// should not call this.
#[uniffi::export]
pub fn init_logging() {
    if let Err(e) = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(false)
        .try_init()
    {
        tracing::debug!("logging already initialised: {e}");
    }
}
