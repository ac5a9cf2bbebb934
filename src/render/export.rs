//! CSV dump of the full ranking
//!
//! Columns are `name,score,rank`. Output starts with a UTF-8 byte order mark
//! so spreadsheet tools pick the right encoding for non-ASCII names.

use serde::Serialize;

use crate::league::ranking::RankedRecord;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    name: &'a str,
    score: f64,
    rank: u32,
}

pub fn ledger_csv(ranked: &[RankedRecord]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(UTF8_BOM.to_vec());
    writer.write_record(["name", "score", "rank"])?;
    for record in ranked {
        writer.serialize(ExportRow {
            name: &record.name,
            score: record.score,
            rank: record.rank,
        })?;
    }
    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}
