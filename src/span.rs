use std::fmt;

use chrono::{Days, NaiveDate};

use crate::seasons::SEASONS;

/// Number of days requested from Baseball Savant at once. Larger requests
/// tend to get truncated by the service.
pub const WEEK: u32 = 7;

/// Inclusive range of game dates. A span whose `first` comes after its
/// `last` contains no dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateSpan {
    pub first: NaiveDate,
    pub last: NaiveDate,
}

impl DateSpan {
    pub fn new(first: NaiveDate, last: NaiveDate) -> DateSpan {
        DateSpan { first, last }
    }

    pub fn is_empty(&self) -> bool {
        self.first > self.last
    }

    /// Number of dates in the span, both ends included.
    pub fn days(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.last - self.first).num_days() + 1
        }
    }

    #[cfg(test)]
    fn contains(&self, other: &DateSpan) -> bool {
        other.is_empty() || (self.first <= other.first && other.last <= self.last)
    }

    /// Overlap of the two spans, or `None` when they share no date.
    pub fn intersection(&self, other: &DateSpan) -> Option<DateSpan> {
        let span = DateSpan {
            first: self.first.max(other.first),
            last: self.last.min(other.last),
        };
        if span.is_empty() {
            None
        } else {
            Some(span)
        }
    }

    /// Cut the span into consecutive pieces of at most `days` days. The last
    /// piece is clipped to the end of the span. `days == 0` counts as 1.
    pub fn subdivide(&self, days: u32) -> Subdivide {
        Subdivide {
            next: Some(self.first),
            last: self.last,
            days: days.max(1),
        }
    }
}

impl fmt::Display for DateSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.first, self.last)
    }
}

/// Iterator returned by [`DateSpan::subdivide`]. Cloning it restarts from
/// wherever the clone was taken.
#[derive(Debug, Clone)]
pub struct Subdivide {
    next: Option<NaiveDate>,
    last: NaiveDate,
    days: u32,
}

impl Iterator for Subdivide {
    type Item = DateSpan;

    fn next(&mut self) -> Option<DateSpan> {
        let first = self.next.filter(|d| *d <= self.last)?;
        let last = first
            .checked_add_days(Days::new(u64::from(self.days - 1)))
            .map_or(self.last, |d| d.min(self.last));
        self.next = if last < self.last { last.succ_opt() } else { None };
        Some(DateSpan { first, last })
    }
}

/// Week-long (or shorter) spans covering the in-season part of `requested`,
/// in calendar order. A piece never straddles two seasons.
pub fn weekly_spans_in_season(requested: DateSpan) -> impl Iterator<Item = DateSpan> + Clone {
    SEASONS
        .iter()
        .filter_map(move |season| requested.intersection(&season.span))
        .flat_map(|in_season| in_season.subdivide(WEEK))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%F").unwrap()
    }

    fn span(first: &str, last: &str) -> DateSpan {
        DateSpan::new(d(first), d(last))
    }

    fn check_subdivision(s: DateSpan, n: u32) {
        let pieces: Vec<DateSpan> = s.subdivide(n).collect();
        assert!(!pieces.is_empty());
        assert_eq!(pieces.first().unwrap().first, s.first);
        assert_eq!(pieces.last().unwrap().last, s.last);
        for p in &pieces {
            assert!(!p.is_empty());
            assert!(p.days() <= i64::from(n));
            assert!(s.contains(p));
        }
        for pair in pieces.windows(2) {
            assert_eq!(pair[0].last.succ_opt().unwrap(), pair[1].first);
            assert_eq!(pair[0].days(), i64::from(n));
        }
        assert_eq!(pieces.iter().map(|p| p.days()).sum::<i64>(), s.days());
    }

    #[test]
    fn subdivide_reconstructs_span() {
        let start = d("2019-02-25");
        for len in 0..40u64 {
            let s = DateSpan::new(start, start + Days::new(len));
            for n in 1..=10 {
                check_subdivision(s, n);
            }
        }
    }

    #[test]
    fn subdivide_clips_last_piece() {
        let pieces: Vec<DateSpan> = span("2019-04-01", "2019-04-10").subdivide(7).collect();
        assert_eq!(
            pieces,
            vec![span("2019-04-01", "2019-04-07"), span("2019-04-08", "2019-04-10")]
        );
    }

    #[test]
    fn subdivide_single_day() {
        let s = span("2019-04-01", "2019-04-01");
        assert_eq!(s.subdivide(7).collect::<Vec<_>>(), vec![s]);
    }

    #[test]
    fn subdivide_empty_span() {
        assert_eq!(span("2019-04-02", "2019-04-01").subdivide(7).count(), 0);
    }

    #[test]
    fn subdivide_zero_days_counts_as_one() {
        assert_eq!(span("2019-04-01", "2019-04-03").subdivide(0).count(), 3);
    }

    #[test]
    fn subdivide_at_end_of_calendar() {
        let s = DateSpan::new(NaiveDate::MAX - Days::new(3), NaiveDate::MAX);
        let pieces: Vec<DateSpan> = s.subdivide(7).collect();
        assert_eq!(pieces, vec![s]);
    }

    #[test]
    fn subdivide_is_restartable() {
        let mut it = span("2019-04-01", "2019-04-30").subdivide(7);
        it.next();
        let rest = it.clone();
        assert_eq!(it.collect::<Vec<_>>(), rest.collect::<Vec<_>>());
    }

    #[test]
    fn intersection_is_commutative() {
        let spans = [
            span("2019-01-01", "2019-03-01"),
            span("2019-02-15", "2019-04-01"),
            span("2019-03-01", "2019-03-01"),
            span("2019-05-01", "2019-06-01"),
            span("2018-01-01", "2020-01-01"),
        ];
        for a in &spans {
            for b in &spans {
                let ab = a.intersection(b);
                assert_eq!(ab, b.intersection(a));
                if let Some(i) = ab {
                    assert!(a.contains(&i));
                    assert!(b.contains(&i));
                }
            }
        }
    }

    #[test]
    fn intersection_touching_and_disjoint() {
        let a = span("2019-01-01", "2019-03-01");
        assert_eq!(
            a.intersection(&span("2019-03-01", "2019-04-01")),
            Some(span("2019-03-01", "2019-03-01"))
        );
        assert_eq!(a.intersection(&span("2019-03-02", "2019-04-01")), None);
    }

    #[test]
    fn weekly_spans_stay_within_one_season() {
        let requested = span("2015-10-25", "2016-03-10");
        let spans: Vec<DateSpan> = weekly_spans_in_season(requested).collect();
        assert_eq!(
            spans,
            vec![
                span("2015-10-25", "2015-10-31"),
                span("2015-11-01", "2015-11-01"),
                span("2016-03-01", "2016-03-07"),
                span("2016-03-08", "2016-03-10"),
            ]
        );
    }

    #[test]
    fn weekly_spans_are_idempotent() {
        let requested = span("2014-06-01", "2020-06-01");
        let first: Vec<DateSpan> = weekly_spans_in_season(requested).collect();
        let second: Vec<DateSpan> = weekly_spans_in_season(requested).collect();
        assert_eq!(first, second);
        assert_eq!(
            first.iter().map(|s| s.days()).sum::<i64>(),
            SEASONS.iter().map(|s| s.span.days()).sum::<i64>()
        );
    }

    #[test]
    fn weekly_spans_outside_seasons() {
        assert_eq!(weekly_spans_in_season(span("2015-12-01", "2016-02-01")).count(), 0);
        assert_eq!(weekly_spans_in_season(span("2021-04-01", "2021-05-01")).count(), 0);
        assert_eq!(weekly_spans_in_season(span("2019-05-01", "2019-04-01")).count(), 0);
    }
}
