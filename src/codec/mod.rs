// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Compact line-range encoding used by URL parameters and `data-hllines` attributes.
//!
//! Grammar: tokens separated by `.`; a token is either a single decimal line number `N` or an
//! inclusive range `N-M`. Decoding is fail-soft per token: malformed tokens contribute nothing
//! and never abort the rest of the string.

use std::collections::BTreeSet;

/// Ranges wider than this are skipped during decoding. No real listing comes close; the cap keeps
/// a corrupted URL parameter from materializing millions of line numbers.
const MAX_RANGE_SPAN: u32 = 4096;

/// Decodes an encoded range string into the set of line numbers it names.
///
/// `None` (the parameter/attribute was absent) decodes to the empty set, as does a string whose
/// tokens are all malformed. A range token is empty when `N > M`.
pub fn decode(encoded: Option<&str>) -> BTreeSet<u32> {
    let mut lines = BTreeSet::new();
    let Some(encoded) = encoded else {
        return lines;
    };

    for token in encoded.split('.') {
        match token.split_once('-') {
            None => {
                if let Ok(line) = token.parse::<u32>() {
                    lines.insert(line);
                }
            }
            Some((start, end)) => {
                let (Ok(start), Ok(end)) = (start.parse::<u32>(), end.parse::<u32>()) else {
                    continue;
                };
                if end.saturating_sub(start) > MAX_RANGE_SPAN {
                    continue;
                }
                for line in start..=end {
                    lines.insert(line);
                }
            }
        }
    }

    lines
}

/// Encodes a set of line numbers canonically: ascending order, maximal runs collapsed to `N-M`,
/// singletons as `N`. The empty set has no encoding (`None`), matching an absent parameter.
pub fn encode(lines: &BTreeSet<u32>) -> Option<String> {
    let mut iter = lines.iter().copied();
    let first = iter.next()?;

    let mut out = String::new();
    let (mut start, mut prev) = (first, first);
    for line in iter {
        if line == prev + 1 {
            prev = line;
            continue;
        }
        push_run(&mut out, start, prev);
        start = line;
        prev = line;
    }
    push_run(&mut out, start, prev);

    Some(out)
}

fn push_run(out: &mut String, start: u32, end: u32) {
    let mut digits = itoa::Buffer::new();
    if !out.is_empty() {
        out.push('.');
    }
    out.push_str(digits.format(start));
    if end > start {
        out.push('-');
        out.push_str(digits.format(end));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use rstest::rstest;

    use super::{decode, encode};

    fn set(lines: &[u32]) -> BTreeSet<u32> {
        lines.iter().copied().collect()
    }

    #[rstest]
    #[case("5", &[5])]
    #[case("1-3", &[1, 2, 3])]
    #[case("1-3.7.9-10", &[1, 2, 3, 7, 9, 10])]
    #[case("7.7.7", &[7])]
    #[case("3-1", &[])]
    #[case("", &[])]
    #[case("x-3", &[])]
    #[case("x-3.5", &[5])]
    #[case("1-3.x.9", &[1, 2, 3, 9])]
    #[case("3x", &[])]
    #[case("1-2-3.4", &[4])]
    fn decode_cases(#[case] encoded: &str, #[case] expected: &[u32]) {
        assert_eq!(decode(Some(encoded)), set(expected));
    }

    #[test]
    fn decode_absent_is_empty() {
        assert!(decode(None).is_empty());
    }

    #[test]
    fn decode_skips_implausibly_wide_ranges() {
        let lines = decode(Some("1-4294967295.8"));
        assert_eq!(lines, set(&[8]));
    }

    #[rstest]
    #[case(&[5], "5")]
    #[case(&[1, 2, 3], "1-3")]
    #[case(&[1, 2, 3, 7, 9, 10], "1-3.7.9-10")]
    #[case(&[2, 4, 6], "2.4.6")]
    fn encode_cases(#[case] lines: &[u32], #[case] expected: &str) {
        assert_eq!(encode(&set(lines)).as_deref(), Some(expected));
    }

    #[test]
    fn encode_empty_is_absent() {
        assert_eq!(encode(&BTreeSet::new()), None);
    }

    #[test]
    fn decode_inverts_encode() {
        for lines in [set(&[1]), set(&[1, 2, 3, 10]), set(&[4, 5, 9, 11, 12, 13]), set(&[0])] {
            let encoded = encode(&lines).expect("non-empty encoding");
            assert_eq!(decode(Some(&encoded)), lines, "through {encoded}");
        }
    }

    #[test]
    fn encode_is_canonical_through_decode() {
        for encoded in ["5", "1-3", "1-3.7.9-10", "0-2.9"] {
            let lines = decode(Some(encoded));
            assert_eq!(encode(&lines).as_deref(), Some(encoded));
        }
    }
}
