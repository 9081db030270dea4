use chrono::Datelike;
use log;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use crate::span::DateSpan;

pub const SEARCH_URL: &str = "https://baseballsavant.mlb.com/statcast_search/csv";

/// Charset assumed when the server does not declare one.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Query parameters the search endpoint expects on every request. Blank
/// means "no filter".
const FIXED_PARAMS: [(&str, &str); 33] = [
    ("all", "true"),
    ("batter_stands", ""),
    ("group_by", "name"),
    ("hfAB", ""),
    ("hfBBL", ""),
    ("hfBBT", ""),
    ("hfC", ""),
    ("hfFlag", ""),
    ("hfGT", "R|PO|S|"),
    ("hfInn", ""),
    ("hfNewZones", ""),
    ("hfOuts", ""),
    ("hfPR", ""),
    ("hfPT", ""),
    ("hfRO", ""),
    ("hfSA", ""),
    ("hfSit", ""),
    ("hfZ", ""),
    ("home_road", ""),
    ("metric_1", ""),
    ("min_abs", "0"),
    ("min_pitches", "0"),
    ("min_results", "0"),
    ("opponent", ""),
    ("pitcher_throws", ""),
    ("player_event_sort", "h_launch_speed"),
    ("player_type", "batter"),
    ("position", ""),
    ("sort_col", "pitches"),
    ("sort_order", "desc"),
    ("stadium", ""),
    ("team", ""),
    ("type", "details"),
];

/// One pitch-by-pitch search covering a single chunk of game dates.
pub struct SavantSearch {
    params: Vec<(&'static str, String)>,
}

impl SavantSearch {
    /// The service compares game dates exclusively, so the bounds sent are
    /// the day before `span.first` and the day after `span.last`. The span
    /// must lie inside one season; its first date picks the season.
    pub fn for_span(span: &DateSpan) -> Result<SavantSearch, String> {
        let gt = span
            .first
            .pred_opt()
            .ok_or_else(|| format!("No date before {}", span.first))?;
        let lt = span
            .last
            .succ_opt()
            .ok_or_else(|| format!("No date after {}", span.last))?;

        let mut params: Vec<(&'static str, String)> = FIXED_PARAMS
            .iter()
            .map(|(k, v)| (*k, v.to_string()))
            .collect();
        params.push(("game_date_gt", gt.format("%F").to_string()));
        params.push(("game_date_lt", lt.format("%F").to_string()));
        params.push(("hfSea", format!("{}|", span.first.year())));
        params.sort_by_key(|(k, _)| *k);

        Ok(SavantSearch { params })
    }

    #[cfg(test)]
    fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn build_url(&self) -> Result<Url, String> {
        Url::parse_with_params(SEARCH_URL, self.params.iter().map(|(k, v)| (*k, v.as_str())))
            .map_err(|err| format!("Error in SavantSearch.build_url: {}", err))
    }

    pub fn send(&self, client: &Client) -> Result<CsvResponse<Response>, String> {
        let url = self.build_url()?;
        log::debug!(target: "SavantSearch.send", "url={}", url);
        let response = client
            .get(url)
            .send()
            .map_err(|err| format!("Request to Baseball Savant failed: {}", err))?;
        log::debug!(target: "SavantSearch.send", "status={}", response.status());
        let response = response
            .error_for_status()
            .map_err(|err| format!("Baseball Savant refused the request: {}", err))?;

        let encoding = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset)
            .unwrap_or_else(|| DEFAULT_ENCODING.to_string());

        Ok(CsvResponse {
            status: response.status().as_u16(),
            encoding,
            body: response,
        })
    }
}

/// A response whose body has not been read yet.
pub struct CsvResponse<R> {
    pub status: u16,
    pub encoding: String,
    pub body: R,
}

/// Request the pitches thrown during `span`.
pub fn fetch(client: &Client, span: &DateSpan) -> Result<CsvResponse<Response>, String> {
    SavantSearch::for_span(span)?.send(client)
}

/// Charset declared in a Content-Type value, e.g. `text/csv; charset=UTF-8`.
fn charset(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            let value = value.trim().trim_matches('"');
            if value.is_empty() {
                None
            } else {
                Some(value.to_ascii_lowercase())
            }
        } else {
            None
        }
    })
}
