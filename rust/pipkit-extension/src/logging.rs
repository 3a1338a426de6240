//! `tracing` output for extension contexts.
//!
//! Events are formatted by `tracing-subscriber`'s fmt layer and written to
//! the devtools console of whichever context emitted them (the host page's
//! console for the content script, the service worker's for the
//! background context), at the matching console level.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = debug)]
    fn console_debug(line: &str);

    #[wasm_bindgen(js_namespace = console, js_name = info)]
    fn console_info(line: &str);

    #[wasm_bindgen(js_namespace = console, js_name = warn)]
    fn console_warn(line: &str);

    #[wasm_bindgen(js_namespace = console, js_name = error)]
    fn console_error(line: &str);
}

/// Writer factory handing out one [`ConsoleLine`] per event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

/// Buffers one formatted event and flushes it to the console on drop.
pub struct ConsoleLine {
    level: Level,
    buffer: Vec<u8>,
}

impl io::Write for ConsoleLine {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buffer);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        match self.level {
            Level::ERROR => console_error(line),
            Level::WARN => console_warn(line),
            Level::INFO => console_info(line),
            _ => console_debug(line),
        }
    }
}

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> ConsoleLine {
        ConsoleLine {
            level: Level::INFO,
            buffer: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> ConsoleLine {
        ConsoleLine {
            level: *meta.level(),
            buffer: Vec::new(),
        }
    }
}

/// Install the panic hook and the console subscriber. Safe to call more
/// than once.
pub fn init() {
    console_error_panic_hook::set_once();

    let level = if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    // Wall-clock time is unavailable on wasm32-unknown-unknown
    let console = tracing_subscriber::fmt::layer()
        .without_time()
        .with_ansi(false)
        .with_writer(Console);

    let _ = tracing_subscriber::registry()
        .with(level)
        .with(console)
        .try_init();
}
