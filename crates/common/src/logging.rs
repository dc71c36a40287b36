//! Logging setup shared by Floe binaries and tests.

use std::io::IsTerminal;
use std::sync::Once;

use tracing_subscriber::{filter::LevelFilter, EnvFilter};

static FLOE_LOG_ENV_VAR: &str = "FLOE_LOG";

/// Initializes a stderr tracing subscriber. `FLOE_LOG` overrides `default_filter`.
pub fn init(default_filter: &str) {
    // Tests call this repeatedly.
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let directives = std::env::var(FLOE_LOG_ENV_VAR).unwrap_or_else(|_| default_filter.to_string());
        let env_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .parse_lossy(&directives);

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .init();

        tracing::debug!("log filter: {}", directives);
    });
}
