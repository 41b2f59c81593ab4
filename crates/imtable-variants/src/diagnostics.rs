use std::fmt;

use imtable_db::RecordStore;
use imtable_types::{Record, RecordKey};
use tracing::{info, warn};

use crate::classify::{VariantCategory, VariantClassifier};
use crate::lookup::UsageLookup;
use crate::unihan::{canonical_decomposition, compatibility_ideograph_name};

/// Optional collaborators for the observational pass over a table.
///
/// Built once at startup; whatever is absent stays disabled for the run.
#[derive(Default)]
pub struct Diagnostics {
    classifier: Option<Box<dyn VariantClassifier>>,
    lookup: Option<Box<dyn UsageLookup>>,
}

/// Counts gathered by [`Diagnostics::run`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DiagnosticsReport {
    pub compatibility_ideographs: usize,
    /// Characters classified simplified-only that the lookup found in use in
    /// Taiwan.
    pub variant_problems: usize,
    pub lookup_failures: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classifier(mut self, classifier: impl VariantClassifier + 'static) -> Self {
        self.classifier = Some(Box::new(classifier));
        self
    }

    pub fn with_lookup(mut self, lookup: impl UsageLookup + 'static) -> Self {
        self.lookup = Some(Box::new(lookup));
        self
    }

    pub fn classification_enabled(&self) -> bool {
        self.classifier.is_some()
    }

    /// Log findings for every row of `store` in first-seen order.
    ///
    /// Never mutates the store and never fails; lookup errors are logged and
    /// counted.
    pub fn run(&self, store: &RecordStore) -> DiagnosticsReport {
        let mut report = DiagnosticsReport::default();
        for (key, record) in store.iter() {
            if log_compatibility_ideograph(key, record) {
                report.compatibility_ideographs += 1;
            }
            if let Some(classifier) = &self.classifier {
                self.check_variant(&**classifier, key, &mut report);
            }
        }
        if self.classification_enabled() {
            info!(
                "number_of_problems_with_chinese_variants={}",
                report.variant_problems
            );
        }
        report
    }

    fn check_variant(
        &self,
        classifier: &dyn VariantClassifier,
        key: &RecordKey,
        report: &mut DiagnosticsReport,
    ) {
        let category = classifier.classify(key.character);
        if category != VariantCategory::Simplified {
            return;
        }
        let Some(lookup) = &self.lookup else {
            return;
        };
        match lookup.used_in_taiwan(key.character) {
            Ok(true) => {
                report.variant_problems += 1;
                info!(
                    "Classified as {category} only: {}\t{}\tused_in_taiwan=true",
                    key.input, key.character
                );
            }
            Ok(false) => {}
            Err(err) => {
                report.lookup_failures += 1;
                warn!("usage lookup for {} failed: {err}", key.character);
            }
        }
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("classifier", &self.classifier.is_some())
            .field("lookup", &self.lookup.is_some())
            .finish()
    }
}

fn log_compatibility_ideograph(key: &RecordKey, record: &Record) -> bool {
    let Some(name) = compatibility_ideograph_name(key.character) else {
        return false;
    };
    let decomposed = canonical_decomposition(key.character);
    let hex = decomposed
        .map(|d| format!("{:04X}", d as u32))
        .unwrap_or_default();
    let decomposed = decomposed.map(String::from).unwrap_or_default();
    info!(
        "{}\t{}\t{} {} {} {}",
        key.input, key.character, record.weight, name, hex, decomposed
    );
    true
}
