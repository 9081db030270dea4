use std::env;
use std::error::Error;

use chrono::NaiveDate;

use savant_get::config::parse_date;
use savant_get::span::{self, DateSpan};

fn get_span() -> Result<DateSpan, Box<dyn Error>> {
    let args: Vec<_> = env::args().collect();
    if args.len() < 2 {
        return Err("usage: dump-spans YYYY-MM-DD [YYYY-MM-DD]".into());
    }
    let first = parse_date(&args[1])?;
    let last = if args.len() >= 3 {
        parse_date(&args[2])?
    } else {
        yesterday()?
    };
    Ok(DateSpan::new(first, last))
}

fn yesterday() -> Result<NaiveDate, Box<dyn Error>> {
    let today = chrono::offset::Local::now().date_naive();
    Ok(today.pred_opt().ok_or("no yesterday")?)
}

fn main() -> Result<(), Box<dyn Error>> {
    for chunk in span::weekly_spans_in_season(get_span()?) {
        println!("{}", chunk);
    }
    Ok(())
}
