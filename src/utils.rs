use log;
use stderrlog::{self, ColorChoice, Timestamp};

/// Log to stderr. Warnings only, unless `verbose`.
pub fn init_log(verbose: bool) -> Result<(), String> {
    stderrlog::new()
        .color(ColorChoice::Auto)
        .timestamp(Timestamp::Second)
        .show_module_names(true)
        .verbosity(if verbose { log::Level::Debug } else { log::Level::Warn })
        .init()
        .map_err(|err| format!("Cannot set up logging: {}", err))
}
