//! TSV readers and writers around the in-memory tables.
use crate::error::Result;
use crate::models::{FollowEdge, RatingRecord, SessionEvent, EDGE_COLUMNS, EVENT_COLUMNS};
use crate::services::latest_session::LatestSessionIndex;
use crate::services::remapper::IdMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

pub const TRAIN_FILE: &str = "train.tsv";
pub const VALID_FILE: &str = "valid.tsv";
pub const TEST_FILE: &str = "test.tsv";
pub const ADJ_FILE: &str = "adj.tsv";
pub const USER_MAP_FILE: &str = "user_id_map.tsv";
pub const ITEM_MAP_FILE: &str = "item_id_map.tsv";
pub const LATEST_SESSIONS_FILE: &str = "latest_sessions.txt";
pub const STATS_FILE: &str = "stats.json";

fn tsv_reader<R: Read>(reader: R, has_headers: bool) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn read_tsv<T: DeserializeOwned, R: Read>(reader: R, has_headers: bool) -> Result<Vec<T>> {
    let records = tsv_reader(reader, has_headers)
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()?;
    Ok(records)
}

pub fn read_ratings<R: Read>(reader: R, has_headers: bool) -> Result<Vec<RatingRecord>> {
    read_tsv(reader, has_headers)
}

pub fn read_social<R: Read>(reader: R, has_headers: bool) -> Result<Vec<FollowEdge>> {
    read_tsv(reader, has_headers)
}

pub fn read_ratings_file(path: &Path, has_headers: bool) -> Result<Vec<RatingRecord>> {
    read_ratings(File::open(path)?, has_headers)
}

pub fn read_social_file(path: &Path, has_headers: bool) -> Result<Vec<FollowEdge>> {
    read_social(File::open(path)?, has_headers)
}

/// Writes `header` followed by one row per record. The header is written even
/// when there are no records.
fn write_tsv<T: Serialize, W: Write>(writer: W, header: &[&str], records: &[T]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(header)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_events<U, I, W>(writer: W, events: &[SessionEvent<U, I>]) -> Result<()>
where
    U: Serialize,
    I: Serialize,
    W: Write,
{
    write_tsv(writer, &EVENT_COLUMNS, events)
}

pub fn write_edges<U: Serialize, W: Write>(writer: W, edges: &[FollowEdge<U>]) -> Result<()> {
    write_tsv(writer, &EDGE_COLUMNS, edges)
}

pub fn write_id_map<W: Write>(writer: W, map: &IdMap) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    for (original, dense) in map.iter() {
        writeln!(writer, "{}\t{}", original, dense)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_latest_sessions<W: Write>(writer: W, index: &LatestSessionIndex) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    for line in index.lines() {
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize, W: Write>(writer: W, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

pub fn create(dir: &Path, name: &str) -> Result<File> {
    Ok(File::create(dir.join(name))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DenseEvent;

    #[test]
    fn test_read_ratings_with_header() {
        let data = "UserId\tItemId\tRating\tTimestamp\nu1\tm1\t5\t1300000000\nu2\tm2\t3\t1.3e9\n";
        let records = read_ratings(data.as_bytes(), true).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].user_id, "u1");
        assert_eq!(records[0].rating, 5);
        assert_eq!(records[1].timestamp, 1.3e9);
    }

    #[test]
    fn test_read_social_without_header() {
        let data = "a\tb\nb\tc\n";
        let edges = read_social(data.as_bytes(), false).unwrap();
        assert_eq!(edges, vec![FollowEdge::new("a".to_string(), "b".to_string()), FollowEdge::new("b".to_string(), "c".to_string())]);
    }

    #[test]
    fn test_malformed_rating_is_an_error() {
        let data = "UserId\tItemId\tRating\tTimestamp\nu1\tm1\tfive\t1300000000\n";
        assert!(read_ratings(data.as_bytes(), true).is_err());
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let mut out = Vec::new();
        let events: Vec<DenseEvent> = Vec::new();
        write_events(&mut out, &events).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "UserId\tItemId\tRating\tTimestamp\tTimeId\tSessionId\n");
    }

    #[test]
    fn test_write_events_rows() {
        let mut out = Vec::new();
        let events: Vec<DenseEvent> = vec![SessionEvent::new(3, 1, 5, 1_300_000_000, 2)];
        write_events(&mut out, &events).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().nth(1), Some("3\t1\t5\t1300000000\t2\t3_2"));
    }

    #[test]
    fn test_write_id_map() {
        let map = IdMap::from_first_occurrence("user", 0, ["x", "y"]);
        let mut out = Vec::new();
        write_id_map(&mut out, &map).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "x\t0\ny\t1\n");
    }
}
