use imtable_types::{Record, RecordKey, Weight, parse_character};
use tracing::{debug, info, warn};

use crate::{LineError, RecordStore, TableError, TableFile};

pub const BEGIN_MARKER: &str = "BEGIN_TABLE";
pub const END_MARKER: &str = "END_TABLE";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Section {
    Head,
    Table,
    Tail,
}

pub(crate) fn parse_table(bytes: &[u8]) -> Result<TableFile, TableError> {
    let mut head = Vec::new();
    let mut store = RecordStore::new();
    let mut tail = Vec::new();
    let mut section = Section::Head;

    for (lineno, raw_line) in bytes.split_inclusive(|b| *b == b'\n').enumerate() {
        let line = std::str::from_utf8(raw_line).map_err(|_| TableError::Utf8 { line: lineno + 1 })?;
        match section {
            Section::Head => {
                if line.starts_with(BEGIN_MARKER) {
                    info!("Header read.");
                    head.push(format!("{BEGIN_MARKER}\n"));
                    section = Section::Table;
                } else {
                    head.push(line.to_string());
                }
            }
            Section::Table => {
                if line.starts_with(END_MARKER) {
                    info!("Table read.");
                    tail.push(line.to_string());
                    section = Section::Tail;
                    continue;
                }
                let (key, record) =
                    parse_record_line(line).map_err(|reason| TableError::Malformed {
                        line: lineno + 1,
                        reason,
                        text: line.trim_end_matches(['\r', '\n']).to_string(),
                    })?;
                store.upsert(key, record);
            }
            Section::Tail => tail.push(line.to_string()),
        }
    }

    match section {
        Section::Head => warn!("no {BEGIN_MARKER} line found, table is empty"),
        Section::Table => warn!("no {END_MARKER} line found, table runs to end of file"),
        Section::Tail => {}
    }
    debug!(
        "parsed {} rows ({} duplicates merged)",
        store.len(),
        store.duplicate_count()
    );

    Ok(TableFile { head, store, tail })
}

/// Parse one body row: `input<TAB>char<TAB>weight[<TAB>comment]`.
///
/// Surrounding whitespace (including the line terminator) is ignored.
pub fn parse_record_line(line: &str) -> Result<(RecordKey, Record), LineError> {
    let fields: Vec<&str> = line.trim().split('\t').collect();
    let (input, character, weight, comment) = match fields.as_slice() {
        [input, character, weight] => (*input, *character, *weight, ""),
        [input, character, weight, comment] => (*input, *character, *weight, *comment),
        other => return Err(LineError::FieldCount(other.len())),
    };
    if input.is_empty() {
        return Err(LineError::EmptyInputKey);
    }
    let character =
        parse_character(character).ok_or_else(|| LineError::Character(character.to_string()))?;
    let weight: Weight = weight
        .trim()
        .parse()
        .map_err(|_| LineError::Weight(weight.to_string()))?;
    Ok((RecordKey::new(input, character), Record::new(weight, comment)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_and_four_field_rows() {
        let (key, record) = parse_record_line("ab\t字\t500\n").unwrap();
        assert_eq!(key, RecordKey::new("ab", '字'));
        assert_eq!(record, Record::new(500, ""));

        let (key, record) = parse_record_line("x\t中\t-3\tnote here\r\n").unwrap();
        assert_eq!(key.input, "x");
        assert_eq!(record.weight, -3);
        assert_eq!(record.comment, "note here");
    }

    #[test]
    fn rejects_malformed_rows() {
        assert_eq!(parse_record_line("\n"), Err(LineError::FieldCount(1)));
        assert_eq!(parse_record_line("a\t中"), Err(LineError::FieldCount(2)));
        assert_eq!(
            parse_record_line("a\t中\t1\tc\textra"),
            Err(LineError::FieldCount(5))
        );
        assert_eq!(
            parse_record_line("a\t中文\t1"),
            Err(LineError::Character("中文".into()))
        );
        assert_eq!(
            parse_record_line("a\t中\t1.5"),
            Err(LineError::Weight("1.5".into()))
        );
        assert_eq!(parse_record_line(" \t中\t1").unwrap_err(), LineError::FieldCount(2));
    }

    #[test]
    fn splits_regions_and_canonicalizes_marker() {
        let input = "# header\r\nBEGIN_TABLE extra\nq\t节\t1000\nq\t节\t800\nEND_TABLE\n# trailer";
        let table = parse_table(input.as_bytes()).unwrap();
        assert_eq!(table.head, vec!["# header\r\n", "BEGIN_TABLE\n"]);
        assert_eq!(table.tail, vec!["END_TABLE\n", "# trailer"]);
        assert_eq!(table.store.len(), 1);
        assert_eq!(table.store.weight("q", '节'), Some(1000));
        assert_eq!(table.store.duplicate_count(), 1);
    }

    #[test]
    fn missing_begin_marker_keeps_everything_in_head() {
        let input = "a\t中\t1000\nEND_TABLE\n";
        let table = parse_table(input.as_bytes()).unwrap();
        assert_eq!(table.head.len(), 2);
        assert!(table.store.is_empty());
        assert!(table.tail.is_empty());
    }

    #[test]
    fn missing_end_marker_runs_to_eof() {
        let input = "BEGIN_TABLE\na\t中\t1000\n";
        let table = parse_table(input.as_bytes()).unwrap();
        assert_eq!(table.store.len(), 1);
        assert!(table.tail.is_empty());
    }

    #[test]
    fn reports_line_numbers() {
        let input = "h\nBEGIN_TABLE\na\t中\t1000\nbroken\nEND_TABLE\n";
        match parse_table(input.as_bytes()) {
            Err(TableError::Malformed { line, reason, text }) => {
                assert_eq!(line, 4);
                assert_eq!(reason, LineError::FieldCount(1));
                assert_eq!(text, "broken");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let bad = b"BEGIN_TABLE\na\t\xff\t1\n";
        assert!(matches!(
            parse_table(bad),
            Err(TableError::Utf8 { line: 2 })
        ));
    }
}
