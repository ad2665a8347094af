// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Rewriting text from match descriptors and counting what was masked

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::warn;

use super::detector::{MatchDescriptor, RuleOutcome, Scan, ScanReport};

/// Output of a redaction: the rewritten text and occurrences per rule key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionResult {
    pub clean: String,
    pub stats: BTreeMap<String, usize>,
}

impl RedactionResult {
    pub fn total(&self) -> usize {
        self.stats.values().sum()
    }
}

/// Splice each match's replacement into the original text
///
/// # Arguments
/// * `text` - Original text the matches were found in
/// * `matches` - Non-overlapping descriptors with offsets into `text`
///
/// # Returns
/// The rewritten text, borrowed unchanged when there is nothing to replace.
/// Descriptors that fall outside `text`, split a character, or overlap an
/// earlier descriptor are ignored.
pub fn rewrite<'a>(text: &'a str, matches: &[MatchDescriptor]) -> Cow<'a, str> {
    if matches.is_empty() {
        // Zero-copy when no masking needed
        return Cow::Borrowed(text);
    }

    let mut ordered: Vec<&MatchDescriptor> = matches.iter().collect();
    ordered.sort_by_key(|m| m.start);

    let mut result = String::with_capacity(text.len());
    let mut cursor = 0;
    for m in ordered {
        let end = m.end();
        let in_bounds = end <= text.len()
            && text.is_char_boundary(m.start)
            && text.is_char_boundary(end);
        if !in_bounds || m.start < cursor {
            warn!(start = m.start, len = m.len, "Ignoring invalid match descriptor");
            continue;
        }

        result.push_str(&text[cursor..m.start]);
        result.push_str(&m.replacement);
        cursor = end;
    }
    result.push_str(&text[cursor..]);

    Cow::Owned(result)
}

/// Count replacements per statistics key. Rules without matches get no entry.
///
/// Counts come from the report rather than the descriptors: a placeholder
/// swallowed by a later match still counts for the rule that wrote it.
pub fn tally(report: &ScanReport) -> BTreeMap<String, usize> {
    let mut stats = BTreeMap::new();
    for rule in &report.rules {
        if let RuleOutcome::Applied { count } = rule.outcome {
            *stats.entry(rule.key.clone()).or_insert(0) += count;
        }
    }
    stats
}

/// Turn a finished scan into the caller-facing result
pub fn redact_scan(text: &str, scan: &Scan) -> RedactionResult {
    RedactionResult {
        clean: rewrite(text, &scan.matches).into_owned(),
        stats: tally(&scan.report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrubber::detector::{RuleReport, RuleSource};

    fn descriptor(start: usize, value: &str, replacement: &str, source: RuleSource) -> MatchDescriptor {
        MatchDescriptor {
            start,
            len: value.len(),
            value: value.to_string(),
            source,
            replacement: replacement.to_string(),
        }
    }

    fn builtin(id: &str) -> RuleSource {
        RuleSource::Builtin { id: id.to_string() }
    }

    #[test]
    fn test_rewrite_empty() {
        let text = "Nothing sensitive here";
        let result = rewrite(text, &[]);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, text);
    }

    #[test]
    fn test_rewrite_out_of_order_input() {
        let text = "a@b.com and c@d.com";
        let matches = vec![
            descriptor(12, "c@d.com", "<EMAIL>", builtin("Email")),
            descriptor(0, "a@b.com", "<EMAIL>", builtin("Email")),
        ];
        assert_eq!(rewrite(text, &matches), "<EMAIL> and <EMAIL>");
    }

    #[test]
    fn test_rewrite_skips_bad_descriptors() {
        let text = "héllo world";
        let matches = vec![
            // splits the two-byte 'é'
            descriptor(2, "l", "<X>", builtin("X")),
            descriptor(7, "world", "<W>", builtin("W")),
            // overlaps the previous one
            descriptor(8, "or", "<O>", builtin("O")),
            descriptor(40, "zz", "<Z>", builtin("Z")),
        ];
        assert_eq!(rewrite(text, &matches), "héllo <W>");
    }

    #[test]
    fn test_tally() {
        let report = ScanReport {
            rules: vec![
                RuleReport {
                    key: "custom_A".to_string(),
                    outcome: RuleOutcome::Applied { count: 2 },
                },
                RuleReport {
                    key: "custom_B".to_string(),
                    outcome: RuleOutcome::NoMatch,
                },
                RuleReport {
                    key: "Email".to_string(),
                    outcome: RuleOutcome::Applied { count: 1 },
                },
                // two raw entries may share a label
                RuleReport {
                    key: "custom_A".to_string(),
                    outcome: RuleOutcome::Applied { count: 1 },
                },
            ],
        };
        let stats = tally(&report);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats["custom_A"], 3);
        assert_eq!(stats["Email"], 1);
    }

    #[test]
    fn test_result_total() {
        let mut stats = BTreeMap::new();
        stats.insert("Email".to_string(), 2);
        stats.insert("custom_K".to_string(), 1);
        let result = RedactionResult {
            clean: String::new(),
            stats,
        };
        assert_eq!(result.total(), 3);
    }
}
