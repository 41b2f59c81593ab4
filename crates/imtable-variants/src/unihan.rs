//! Just enough Unicode character data to spot CJK compatibility ideographs.

use unicode_normalization::char::decompose_canonical;

pub const COMPATIBILITY_IDEOGRAPH: &str = "CJK COMPATIBILITY IDEOGRAPH";

/// Assigned code points named `CJK COMPATIBILITY IDEOGRAPH-XXXX`.
const COMPATIBILITY_RANGES: [(u32, u32); 3] = [
    (0xF900, 0xFA6D),
    (0xFA70, 0xFAD9),
    (0x2F800, 0x2FA1D),
];

/// The Unicode name of `c` if it is a compatibility ideograph.
pub fn compatibility_ideograph_name(c: char) -> Option<String> {
    let cp = c as u32;
    COMPATIBILITY_RANGES
        .iter()
        .any(|(lo, hi)| (*lo..=*hi).contains(&cp))
        .then(|| format!("{COMPATIBILITY_IDEOGRAPH}-{cp:04X}"))
}

/// Singleton canonical decomposition of `c`, if it has one.
///
/// A dozen code points in the compatibility block (U+FA0E and friends) are
/// unified ideographs and decompose to themselves.
pub fn canonical_decomposition(c: char) -> Option<char> {
    let mut parts = Vec::with_capacity(1);
    decompose_canonical(c, |d| parts.push(d));
    match parts.as_slice() {
        [d] if *d != c => Some(*d),
        _ => None,
    }
}
