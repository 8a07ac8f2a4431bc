//! Console logging.
//!
//! Filtered through `RUST_LOG`, e.g. `RUST_LOG=sheetpick=debug` to watch
//! view transitions and file loads. Defaults to `warn`, which still shows
//! every file that failed to open.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install the global subscriber. Call once, before the app starts.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
