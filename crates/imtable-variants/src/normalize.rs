use std::collections::HashSet;

use imtable_db::RecordStore;
use imtable_types::{Weight, is_alpha_spelling, is_x_prefixed};
use tracing::{debug, info};

/// Weight given to short canonical spellings of a character that also has an
/// `x`-prefixed spelling.
pub const DEMOTED_WEIGHT: Weight = 900;

/// Counts gathered by [`normalize`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NormalizeReport {
    /// Rows whose input key starts with `x`.
    pub sources: usize,
    /// Distinct characters having at least one `x`-prefixed row.
    pub characters: usize,
    /// Rows whose weight was set to [`DEMOTED_WEIGHT`].
    pub demoted: usize,
}

/// Set every one- or two-letter [`ALPHA`](imtable_types::ALPHA) spelling of a
/// character to [`DEMOTED_WEIGHT`] when the same character also has an
/// `x`-prefixed spelling.
///
/// Only existing rows are touched. Running it again yields the same store.
pub fn normalize(store: &mut RecordStore) -> NormalizeReport {
    let mut sources = 0usize;
    let mut characters = HashSet::new();
    for (key, _) in store.iter() {
        if is_x_prefixed(&key.input) {
            sources += 1;
            characters.insert(key.character);
        }
    }

    let mut demoted = 0usize;
    for (key, record) in store.iter_mut() {
        if characters.contains(&key.character) && is_alpha_spelling(&key.input) {
            debug!(
                "{}\t{}\t{} -> {}",
                key.input, key.character, record.weight, DEMOTED_WEIGHT
            );
            record.weight = DEMOTED_WEIGHT;
            demoted += 1;
        }
    }

    info!(
        "{sources} x-prefixed rows cover {} characters, {demoted} rows set to {DEMOTED_WEIGHT}",
        characters.len()
    );
    NormalizeReport {
        sources,
        characters: characters.len(),
        demoted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imtable_types::{Record, RecordKey};

    fn store(rows: &[(&str, char, Weight)]) -> RecordStore {
        let mut store = RecordStore::new();
        for (input, character, weight) in rows {
            store.upsert(RecordKey::new(*input, *character), Record::new(*weight, ""));
        }
        store
    }

    #[test]
    fn demotes_short_spellings_of_x_characters() {
        let mut s = store(&[("a", '中', 1000), ("x", '中', 1000), ("yz", '中', 10)]);
        let report = normalize(&mut s);
        assert_eq!(s.weight("a", '中'), Some(900));
        assert_eq!(s.weight("yz", '中'), Some(900));
        assert_eq!(s.weight("x", '中'), Some(1000));
        assert_eq!(
            report,
            NormalizeReport {
                sources: 1,
                characters: 1,
                demoted: 2
            }
        );
    }

    #[test]
    fn leaves_non_targets_alone() {
        let mut s = store(&[
            ("ab", '字', 500),
            ("xab", '月', 1000),
            ("abc", '月', 700),
            ("ax", '月', 600),
            ("A", '月', 400),
            ("xb", '月', 300),
        ]);
        let report = normalize(&mut s);
        assert_eq!(s.weight("ab", '字'), Some(500));
        assert_eq!(s.weight("abc", '月'), Some(700));
        assert_eq!(s.weight("ax", '月'), Some(600));
        assert_eq!(s.weight("A", '月'), Some(400));
        assert_eq!(s.weight("xb", '月'), Some(300));
        assert_eq!(report.demoted, 0);
        assert_eq!(report.sources, 2);
        assert_eq!(s.len(), 6);
    }

    #[test]
    fn is_idempotent() {
        let mut s = store(&[
            ("a", '中', 1000),
            ("xa", '中', 1000),
            ("xb", '中', 1),
            ("b", '日', 2),
        ]);
        normalize(&mut s);
        let once: Vec<_> = s.iter().map(|(k, r)| (k.clone(), r.clone())).collect();
        normalize(&mut s);
        let twice: Vec<_> = s.iter().map(|(k, r)| (k.clone(), r.clone())).collect();
        assert_eq!(once, twice);
        assert_eq!(s.weight("a", '中'), Some(900));
        assert_eq!(s.weight("b", '日'), Some(2));
    }
}
