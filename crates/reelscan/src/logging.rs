//! Diagnostics setup.
//!
//! Logs go to stderr so stdout only ever carries rendered or serialized
//! output.

use tracing_subscriber::EnvFilter;

/// Picks the log filter directive.
///
/// Verbosity flags win, then `RUST_LOG`, then the configured level.
pub fn filter_directive(verbose: u8, quiet: bool, env: Option<&str>, configured: &str) -> String {
    if quiet {
        return "error".to_string();
    }
    match verbose {
        0 => {}
        1 => return "info".to_string(),
        2 => return "debug".to_string(),
        _ => return "trace".to_string(),
    }
    match env {
        Some(env) if !env.trim().is_empty() => env.to_string(),
        _ => configured.to_string(),
    }
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
