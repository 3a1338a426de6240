//! Background service worker entry point.

fn main() {
    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    if let Err(error) = pipkit_extension::background::run() {
        tracing::error!(%error, "Background worker failed to start");
    }
}
