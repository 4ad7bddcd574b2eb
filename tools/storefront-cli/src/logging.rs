//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

const CRATES: [&str; 3] = ["storefront_commerce", "storefront_store", "storefront"];

/// Install the process-wide subscriber.
///
/// Logs go to stderr so command output on stdout stays clean. `RUST_LOG`
/// wins when set; otherwise only warnings are shown, or debug output for our
/// own crates with `verbose`. Safe to call multiple times.
pub fn init(verbose: bool, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

fn default_filter(verbose: bool) -> EnvFilter {
    if !verbose {
        return EnvFilter::new("warn");
    }
    let directives: Vec<String> = CRATES.iter().map(|c| format!("{c}=debug")).collect();
    EnvFilter::new(format!("warn,{}", directives.join(",")))
}
