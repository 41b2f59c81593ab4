use std::fmt;

/// Simplified/traditional classification of a character.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum VariantCategory {
    /// Only used in traditional Chinese.
    Traditional,
    /// Only used in simplified Chinese.
    Simplified,
    /// Used unchanged in both.
    Both,
    /// Cannot be assigned to one side.
    Mixed,
}

impl fmt::Display for VariantCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            VariantCategory::Traditional => "traditional",
            VariantCategory::Simplified => "simplified",
            VariantCategory::Both => "both",
            VariantCategory::Mixed => "mixed",
        })
    }
}

/// Source of simplified/traditional classifications.
pub trait VariantClassifier {
    fn classify(&self, character: char) -> VariantCategory;
}

impl<F> VariantClassifier for F
where
    F: Fn(char) -> VariantCategory,
{
    fn classify(&self, character: char) -> VariantCategory {
        self(character)
    }
}
