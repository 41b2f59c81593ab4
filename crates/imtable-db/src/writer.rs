use std::cmp::Ordering;
use std::io::{self, BufWriter, Write};

use imtable_types::{Record, RecordKey};

use crate::{RecordStore, TableFile};

/// Output order: input key ascending, weight descending, code point ascending.
pub fn table_order(a: (&RecordKey, &Record), b: (&RecordKey, &Record)) -> Ordering {
    a.0.input
        .cmp(&b.0.input)
        .then_with(|| b.1.weight.cmp(&a.1.weight))
        .then_with(|| a.0.character.cmp(&b.0.character))
}

/// All rows of `store` in [`table_order`].
pub fn sorted_records(store: &RecordStore) -> Vec<(&RecordKey, &Record)> {
    let mut rows: Vec<_> = store.iter().collect();
    rows.sort_by(|a, b| table_order(*a, *b));
    rows
}

/// Render one body row without its line terminator.
pub fn format_record(key: &RecordKey, record: &Record) -> String {
    if record.comment.is_empty() {
        format!("{}\t{}\t{}", key.input, key.character, record.weight)
    } else {
        format!(
            "{}\t{}\t{}\t{}",
            key.input, key.character, record.weight, record.comment
        )
    }
}

/// Serialize header, sorted body and trailer to `out`.
pub fn write_table<W: Write>(table: &TableFile, out: W) -> io::Result<()> {
    let mut out = BufWriter::new(out);
    for line in table.head() {
        out.write_all(line.as_bytes())?;
    }
    for (key, record) in sorted_records(table.store()) {
        writeln!(out, "{}", format_record(key, record))?;
    }
    for line in table.tail() {
        out.write_all(line.as_bytes())?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(input: &str) -> String {
        let table = TableFile::parse(input.as_bytes()).unwrap();
        let mut out = Vec::new();
        write_table(&table, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn sorts_by_input_then_weight_desc_then_code_point() {
        let out = render(
            "BEGIN_TABLE\nb\t乙\t5\na\t丙\t10\na\t乙\t10\na\t甲\t20\nEND_TABLE\n",
        );
        assert_eq!(
            out,
            "BEGIN_TABLE\na\t甲\t20\na\t丙\t10\na\t乙\t10\nb\t乙\t5\nEND_TABLE\n"
        );
    }

    #[test]
    fn writes_comment_only_when_present() {
        let out = render("BEGIN_TABLE\na\t一\t1\tnote\nb\t二\t2\t\nEND_TABLE\n");
        assert!(out.contains("a\t一\t1\tnote\n"));
        assert!(out.contains("b\t二\t2\n"));
    }

    #[test]
    fn sorted_output_is_stable_under_resorting() {
        let table = TableFile::parse(
            "BEGIN_TABLE\nz\t口\t1\naa\t日\t3\naa\t月\t3\na\t木\t-1\nEND_TABLE\n".as_bytes(),
        )
        .unwrap();
        let rows = sorted_records(table.store());
        let mut resorted = rows.clone();
        resorted.sort_by(|a, b| table_order(*a, *b));
        assert_eq!(rows, resorted);
        assert!(
            rows.windows(2)
                .all(|w| table_order(w[0], w[1]) == Ordering::Less)
        );
    }
}
