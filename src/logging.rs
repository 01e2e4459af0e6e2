use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "SCRIPTSPLICE_LOG";

pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "scriptsplice=warn",
        1 => "scriptsplice=info",
        2 => "scriptsplice=debug",
        _ => "scriptsplice=trace",
    }
}

/// Logs go to stderr so `--print` output stays clean.
pub fn init(verbose: u8, no_color: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| default_directive(verbose).into());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .try_init();
}
