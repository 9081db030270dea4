pub mod config;
pub mod files;
pub mod rows;
pub mod savant;
pub mod seasons;
pub mod span;
pub mod utils;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{self, NaiveDate};
use log;
use reqwest::blocking::Client;

use crate::{config::Config, savant::CsvResponse, span::DateSpan};

pub fn run(cfg: Config) -> Result<(), String> {
    log::debug!("cfg.first_game_date={:?}", cfg.first_game_date);
    log::debug!("cfg.last_game_date={:?}", cfg.last_game_date);
    log::debug!("cfg.data_dir={:?}", cfg.data_dir);

    fs::create_dir_all(&cfg.data_dir)
        .map_err(|err| format!("Cannot create {}: {}", cfg.data_dir.display(), err))?;

    let today = chrono::offset::Local::now().date_naive();
    let span = resolve_date_range(&cfg, today)?;

    let client = Client::builder()
        .build()
        .map_err(|err| format!("Cannot build HTTP client: {}", err))?;
    get_data_between_dates(|chunk| savant::fetch(&client, chunk), span, &cfg.data_dir)?;
    Ok(())
}

/// Dates to download. Without an explicit first date, pick up the day after
/// the last file in the data directory (or the first known season) through
/// yesterday; a last date given alone is ignored.
pub fn resolve_date_range(cfg: &Config, today: NaiveDate) -> Result<DateSpan, String> {
    let yesterday = today
        .pred_opt()
        .ok_or_else(|| format!("No date before {}", today))?;

    let first = match cfg.first_game_date {
        Some(first) => {
            log::debug!("Starting on the day passed as the first argument: {}", first);
            first
        }
        None => match files::last_game_date_downloaded(&cfg.data_dir)? {
            Some(last_downloaded) => {
                let first = last_downloaded
                    .succ_opt()
                    .ok_or_else(|| format!("No date after {}", last_downloaded))?;
                log::debug!("Starting on the day after the last day downloaded: {}", first);
                first
            }
            None => {
                let first = seasons::first_day();
                log::debug!("Starting on the first day of the first season: {}", first);
                first
            }
        },
    };

    let last = match (cfg.first_game_date, cfg.last_game_date) {
        (Some(_), Some(last)) => {
            log::debug!("Ending on the day passed as the second argument: {}", last);
            last
        }
        (None, Some(last)) => {
            log::debug!("Ignoring last date {} given without a first date", last);
            yesterday
        }
        _ => yesterday,
    };
    log::debug!("Getting {}", DateSpan::new(first, last));

    Ok(DateSpan::new(first, last))
}

/// Download `span` one in-season week at a time, finishing each week before
/// requesting the next. Stops at the first error.
pub fn get_data_between_dates<F, R>(
    mut fetch: F,
    span: DateSpan,
    dir: &Path,
) -> Result<Vec<PathBuf>, String>
where
    F: FnMut(&DateSpan) -> Result<CsvResponse<R>, String>,
    R: Read,
{
    let mut written = Vec::new();
    for chunk in span::weekly_spans_in_season(span) {
        log::info!("requesting {}", chunk);
        written.extend(save_response(fetch(&chunk)?, dir)?);
    }
    Ok(written)
}

/// Decode one response and write its rows, one file per game date.
pub fn save_response<R: Read>(response: CsvResponse<R>, dir: &Path) -> Result<Vec<PathBuf>, String> {
    if !(200..300).contains(&response.status) {
        return Err(format!("Unexpected response status: {}", response.status));
    }
    files::write_rows(rows::rows(response)?, dir)
}
