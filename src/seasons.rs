use chrono::NaiveDate;

use crate::span::DateSpan;

/// One regular season (spring training through the postseason), as far as
/// Baseball Savant has pitch data for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Season {
    pub year: i32,
    pub span: DateSpan,
}

const fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => d,
        None => panic!("invalid season date"),
    }
}

const fn season(year: i32, start: (u32, u32), end: (u32, u32)) -> Season {
    Season {
        year,
        span: DateSpan {
            first: date(year, start.0, start.1),
            last: date(year, end.0, end.1),
        },
    }
}

/// Known seasons, oldest first. Never overlapping.
pub const SEASONS: [Season; 5] = [
    season(2015, (3, 3), (11, 1)),
    season(2016, (3, 1), (11, 2)),
    season(2017, (2, 24), (11, 1)),
    season(2018, (2, 23), (10, 28)),
    season(2019, (2, 21), (9, 29)),
];

/// Opening day of the oldest known season.
pub fn first_day() -> NaiveDate {
    SEASONS[0].span.first
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seasons_are_ordered_and_disjoint() {
        for pair in SEASONS.windows(2) {
            assert!(pair[0].span.last < pair[1].span.first);
            assert!(pair[0].year < pair[1].year);
        }
        for s in SEASONS.iter() {
            assert!(!s.span.is_empty());
            assert_eq!(s.span.first.format("%Y").to_string(), s.year.to_string());
        }
    }

    #[test]
    fn first_day_is_2015_opener() {
        assert_eq!(first_day().to_string(), "2015-03-03");
    }
}
