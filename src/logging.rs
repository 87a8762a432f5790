use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

fn default_directive(verbose: u8) -> Directive {
    let directive = match verbose {
        0 => "inventory_reports=info",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    directive
        .parse()
        .unwrap_or_else(|_| LevelFilter::INFO.into())
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `-v`.
pub fn init(verbose: u8) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::builder()
        .with_default_directive(default_directive(verbose))
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
}

/// Subscriber for tests; silently keeps whichever one was installed first.
pub fn init_for_tests() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
