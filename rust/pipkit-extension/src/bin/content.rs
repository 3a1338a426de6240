//! Content script entry point.
//!
//! Injected into YouTube and Netflix pages by the manifest. On other
//! origins the engine declines to start and the script stays inert.

fn main() {
    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    if let Err(error) = pipkit_extension::content::run() {
        tracing::error!(%error, "Content script failed to start");
    }
}
