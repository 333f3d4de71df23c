use tracing_subscriber::EnvFilter;

/// Initialize logging on stderr; stdout is reserved for arrival notices.
pub fn init(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level_directive(verbose)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Map the repeatable `-v` flag to a filter directive.
pub fn level_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}
