use std::io::Read;

use encoding_rs::Encoding;
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};

use crate::savant::CsvResponse;

/// One pitch as returned by the search, column for column. `None` where the
/// service wrote `null`.
pub type Row = Vec<Option<String>>;

/// Column holding the game date.
pub const GAME_DATE: usize = 1;

const NULL: &str = "null";

/// Rows of a search response, header excluded. The body is dropped along
/// with the iterator, whether or not it was read to the end.
pub struct Rows<R> {
    records: csv::StringRecordsIntoIter<DecodeReaderBytes<R, Vec<u8>>>,
}

impl<R: Read> Iterator for Rows<R> {
    type Item = Result<Row, String>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(
            record
                .map(|record| {
                    record
                        .iter()
                        .map(|field| if field == NULL { None } else { Some(field.to_string()) })
                        .collect()
                })
                .map_err(|err| format!("Malformed CSV from Baseball Savant: {}", err)),
        )
    }
}

/// Decode the body from its declared charset. UTF-8 bodies are read as is,
/// so invalid bytes surface as row errors instead of replacement characters.
pub fn rows<R: Read>(response: CsvResponse<R>) -> Result<Rows<R>, String> {
    let encoding = Encoding::for_label(response.encoding.trim().as_bytes())
        .ok_or_else(|| format!("Unknown response encoding: {}", response.encoding))?;
    let body = DecodeReaderBytesBuilder::new()
        .encoding(Some(encoding))
        .utf8_passthru(true)
        .build(response.body);
    // Records are not checked against the header's field count.
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body);
    Ok(Rows {
        records: reader.into_records(),
    })
}
