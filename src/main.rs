use std::process;

use savant_get;
use savant_get::config::Config;
use savant_get::utils;

fn main() {
    let result = Config::get().and_then(|cfg| {
        utils::init_log(cfg.verbose)?;
        savant_get::run(cfg)
    });
    if let Err(msg) = result {
        eprintln!("[FATAL] {}", msg);
        process::exit(1);
    }
}
