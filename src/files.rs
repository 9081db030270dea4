use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use glob;
use itertools::{self, Itertools};
use log;

use crate::rows::{Row, GAME_DATE};

const FILE_PREFIX: &str = "baseball-savant-";
const FILE_SUFFIX: &str = ".csv";

/// `baseball-savant-YYYY-MM-DD.csv`. Sorting these names sorts by date.
pub fn file_name(game_date: NaiveDate) -> String {
    format!("{}{}{}", FILE_PREFIX, game_date.format("%F"), FILE_SUFFIX)
}

/// Inverse of [`file_name`]. Anything else is `None`.
pub fn date_from_file_name(name: &str) -> Option<NaiveDate> {
    let datestr = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    let date = NaiveDate::parse_from_str(datestr, "%F").ok()?;
    // Reject unpadded dates; they would break the ordering of names.
    if date.format("%F").to_string() == datestr {
        Some(date)
    } else {
        None
    }
}

/// Latest game date with a file in `dir`, or `None` if nothing has been
/// downloaded there yet.
pub fn last_game_date_downloaded(dir: &Path) -> Result<Option<NaiveDate>, String> {
    let pattern = Path::new(&glob::Pattern::escape(&dir.to_string_lossy()))
        .join(format!("{}*{}", FILE_PREFIX, FILE_SUFFIX));
    let paths = glob::glob(&pattern.to_string_lossy())
        .map_err(|err| format!("Bad data directory {}: {}", dir.display(), err))?;

    let mut last = None;
    for path in paths {
        let path = path.map_err(|err| format!("Cannot list {}: {}", dir.display(), err))?;
        let date = path
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(date_from_file_name);
        match date {
            Some(date) => last = last.max(Some(date)),
            None => log::debug!("ignoring {}", path.display()),
        }
    }
    Ok(last)
}

/// Write each game date's rows to its own file in `dir`, returning the
/// files written in order.
///
/// Rows are grouped by runs of equal game dates, not sorted: the search
/// returns pitches ordered by date. If a date shows up again after another
/// one, its later rows are appended to the file started earlier in this
/// call rather than replacing it. Files left by earlier runs are replaced.
pub fn write_rows<I>(rows: I, dir: &Path) -> Result<Vec<PathBuf>, String>
where
    I: Iterator<Item = Result<Row, String>>,
{
    itertools::process_results(rows, |rows| write_groups(rows, dir))?
}

fn write_groups<I>(rows: I, dir: &Path) -> Result<Vec<PathBuf>, String>
where
    I: Iterator<Item = Row>,
{
    let mut written = Vec::new();
    let mut seen = HashSet::new();

    let groups = rows.group_by(|row| row.get(GAME_DATE).cloned().flatten());
    for (game_date, group) in &groups {
        let datestr = game_date.ok_or_else(|| "Row without a game date".to_string())?;
        let date = NaiveDate::parse_from_str(&datestr, "%F")
            .map_err(|_| format!("Invalid game date: {}", datestr))?;
        let path = dir.join(file_name(date));

        let append = !seen.insert(date);
        if append {
            log::warn!("rows for {} are not contiguous, appending to {}", date, path.display());
        }
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .append(append)
            .truncate(!append)
            .open(&path)
            .map_err(|err| format!("Cannot open {}: {}", path.display(), err))?;

        let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
        for row in group {
            writer
                .write_record(row.iter().map(|field| field.as_deref().unwrap_or("")))
                .map_err(|err| format!("Cannot write {}: {}", path.display(), err))?;
        }
        writer
            .flush()
            .map_err(|err| format!("Cannot write {}: {}", path.display(), err))?;

        // One line per file, however many runs it took.
        if !append {
            println!("{}", path.display());
            written.push(path);
        }
    }
    Ok(written)
}
