//! Weight normalization for `x`-prefixed alternate spellings.
//!
//! In Quick5 style tables an input key starting with `x` is an alternate
//! spelling of a character. [`normalize`] makes sure the short canonical
//! spellings of such a character end up at [`DEMOTED_WEIGHT`], so an
//! alternate spelling is never ranked above them.
//!
//! [`Diagnostics`] is an observational pass over the same table: it logs CJK
//! compatibility ideographs with their canonical decomposition and, when a
//! [`VariantClassifier`] is plugged in, checks simplified-only characters
//! against a [`UsageLookup`]. It never changes weights.
//!
//! # Example
//! ```no_run
//! use imtable_db::TableFile;
//! use imtable_variants::{Diagnostics, normalize};
//!
//! # fn main() -> Result<(), imtable_db::TableError> {
//! let mut table = TableFile::load("quick5.txt")?;
//! Diagnostics::new().run(table.store());
//! let report = normalize(table.store_mut());
//! println!("{} rows demoted", report.demoted);
//! # Ok(()) }
//! ```

pub mod classify;
pub mod diagnostics;
pub mod lookup;
pub mod normalize;
pub mod unihan;

pub use classify::{VariantCategory, VariantClassifier};
pub use diagnostics::{Diagnostics, DiagnosticsReport};
pub use lookup::{LookupError, MoeDictLookup, UsageLookup, moe_search_url, page_reports_usage};
pub use normalize::{DEMOTED_WEIGHT, NormalizeReport, normalize};
