use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;

/// Environment variable naming the directory the CSV files go to.
pub const DATA_DIR_VAR: &str = "BASEBALL_SAVANT_DATA_DIR";

pub struct Config {
    pub first_game_date: Option<NaiveDate>,
    pub last_game_date: Option<NaiveDate>,
    pub data_dir: PathBuf,
    pub verbose: bool,
}

impl Config {
    pub fn get() -> Result<Config, String> {
        Cli::parse().to_config()
    }
}

#[derive(Debug, Parser)]
#[command(name = "savant-get")]
#[command(version)]
#[command(about = "Go get all that data from Baseball Savant", long_about = None)]
struct Cli {
    /// Get data from this date (Default: the day after the last file downloaded)
    #[arg(value_name = "YYYY-MM-DD")]
    first_game_date: Option<String>,
    /// Get data through this date (Default: yesterday)
    #[arg(value_name = "YYYY-MM-DD")]
    last_game_date: Option<String>,
    /// Display verbose logging
    #[arg(short, long)]
    verbose: bool,
}

pub fn parse_date(datestr: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(datestr, "%F").map_err(|_| format!("Invalid date: {}", datestr))
}

/// Unset or empty means the current directory.
fn data_dir(var: Option<String>) -> PathBuf {
    match var {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from("."),
    }
}

impl Cli {
    fn to_config(self) -> Result<Config, String> {
        Ok(Config {
            first_game_date: self.first_game_date.as_deref().map(parse_date).transpose()?,
            last_game_date: self.last_game_date.as_deref().map(parse_date).transpose()?,
            data_dir: data_dir(env::var(DATA_DIR_VAR).ok()),
            verbose: self.verbose,
        })
    }
}
