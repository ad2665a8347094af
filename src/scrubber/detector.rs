// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Core matching logic: custom literals first, then built-in rules, each
// rule seeing the output of the rules before it

use regex::{Captures, Regex, RegexBuilder};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

use super::config::{CustomMatchMode, ScrubConfig};
use super::custom::CustomEntry;
use super::error::{ManifestError, QuotaError};
use super::masking::{self, RedactionResult};
use super::patterns::Registry;
use super::quota::{ActionKind, UsageTracker};

/// Where a match came from
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RuleSource {
    Custom { label: String },
    Builtin { id: String },
}

impl RuleSource {
    /// Key used in the statistics map
    pub fn stats_key(&self) -> String {
        match self {
            RuleSource::Custom { label } => format!("custom_{}", label),
            RuleSource::Builtin { id } => id.clone(),
        }
    }
}

/// A single match, with offsets in bytes into the original text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchDescriptor {
    pub start: usize,
    pub len: usize,
    pub value: String,
    pub source: RuleSource,
    pub replacement: String,
}

impl MatchDescriptor {
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Why a rule was left out of a scan
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("custom rule has no value")]
    MissingValue,

    #[error("custom rule has no label")]
    MissingLabel,

    #[error("pattern could not be built: {0}")]
    Pattern(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Applied { count: usize },
    NoMatch,
    Skipped(SkipReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleReport {
    pub key: String,
    pub outcome: RuleOutcome,
}

/// Per-rule outcomes of one scan, in the order the rules were considered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub rules: Vec<RuleReport>,
}

impl ScanReport {
    fn push(&mut self, key: String, outcome: RuleOutcome) {
        self.rules.push(RuleReport { key, outcome });
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&str, &SkipReason)> {
        self.rules.iter().filter_map(|report| match &report.outcome {
            RuleOutcome::Skipped(reason) => Some((report.key.as_str(), reason)),
            _ => None,
        })
    }

    pub fn outcome(&self, key: &str) -> Option<&RuleOutcome> {
        self.rules
            .iter()
            .find(|report| report.key == key)
            .map(|report| &report.outcome)
    }
}

/// Result of a scan: non-overlapping matches sorted by start, plus the report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scan {
    pub matches: Vec<MatchDescriptor>,
    pub report: ScanReport,
}

/// A stretch of the current buffer and the part of the original text it stands for
#[derive(Debug, Clone, Copy)]
struct Span {
    /// Offset in the current buffer
    at: usize,
    len: usize,
    orig_start: usize,
    orig_end: usize,
    /// Index into `Buffer::matches` when the span is a placeholder
    claimed: Option<usize>,
}

impl Span {
    fn end(&self) -> usize {
        self.at + self.len
    }

    /// `pos` falls strictly inside this placeholder
    fn splits(&self, pos: usize) -> bool {
        self.claimed.is_some() && self.at < pos && pos < self.end()
    }

    /// The span lies within a match covering `start..end` of the buffer
    fn within(&self, start: usize, end: usize) -> bool {
        if self.len == 0 {
            start < self.at && self.at < end
        } else {
            start <= self.at && self.end() <= end
        }
    }
}

/// The text being rewritten. Each rule searches the whole current buffer,
/// placeholders included, and spans map every part of it back to the
/// original text. A match may not start or end inside a placeholder; one
/// that covers a placeholder entirely takes over its descriptor.
struct Buffer<'t> {
    original: &'t str,
    current: String,
    spans: Vec<Span>,
    /// Descriptors in claim order; `None` once a later match covered it
    matches: Vec<Option<MatchDescriptor>>,
}

impl<'t> Buffer<'t> {
    fn new(text: &'t str) -> Self {
        let spans = if text.is_empty() {
            Vec::new()
        } else {
            vec![Span {
                at: 0,
                len: text.len(),
                orig_start: 0,
                orig_end: text.len(),
                claimed: None,
            }]
        };

        Self {
            original: text,
            current: text.to_string(),
            spans,
            matches: Vec::new(),
        }
    }

    /// No rule has claimed any text yet
    fn is_pristine(&self) -> bool {
        self.matches.is_empty()
    }

    /// Replace every match of `regex` in the current buffer. Returns the number of replacements.
    fn substitute<F>(&mut self, regex: &Regex, source: &RuleSource, render: F) -> usize
    where
        F: Fn(&Captures<'_>) -> String,
    {
        let found = self.find(regex, &render);
        if found.is_empty() {
            return 0;
        }

        let count = found.len();
        let mut current = String::with_capacity(self.current.len());
        let mut spans = Vec::with_capacity(self.spans.len() + 2 * count);
        let mut cursor = 0;

        for (start, end, replacement) in found {
            self.carry(cursor, start, &mut current, &mut spans);

            for span in &self.spans {
                if let Some(idx) = span.claimed.filter(|_| span.within(start, end)) {
                    self.matches[idx] = None;
                }
            }

            let orig_start = self.original_start(start);
            let orig_end = self.original_end(end).max(orig_start);
            spans.push(Span {
                at: current.len(),
                len: replacement.len(),
                orig_start,
                orig_end,
                claimed: Some(self.matches.len()),
            });
            current.push_str(&replacement);

            self.matches.push(Some(MatchDescriptor {
                start: orig_start,
                len: orig_end - orig_start,
                value: self
                    .original
                    .get(orig_start..orig_end)
                    .unwrap_or_default()
                    .to_string(),
                source: source.clone(),
                replacement,
            }));
            cursor = end;
        }

        self.carry(cursor, self.current.len(), &mut current, &mut spans);
        self.current = current;
        self.spans = spans;
        count
    }

    /// Matches as `(start, end, replacement)` in buffer offsets. Empty
    /// matches and matches with an edge inside a placeholder are passed over.
    fn find<F>(&self, regex: &Regex, render: &F) -> Vec<(usize, usize, String)>
    where
        F: Fn(&Captures<'_>) -> String,
    {
        let haystack = self.current.as_str();
        let mut found = Vec::new();
        let mut pos = 0;

        while pos <= haystack.len() {
            let Some(caps) = regex.captures_at(haystack, pos) else {
                break;
            };
            let Some(mat) = caps.get(0) else { break };

            // Zero-width matches would insert placeholders between characters
            if mat.is_empty() {
                pos = next_char(haystack, mat.end());
                continue;
            }
            if let Some(span) = self.spans.iter().find(|span| span.splits(mat.start())) {
                pos = span.end();
                continue;
            }
            if self.spans.iter().any(|span| span.splits(mat.end())) {
                pos = next_char(haystack, mat.start());
                continue;
            }

            found.push((mat.start(), mat.end(), render(&caps)));
            pos = mat.end();
        }

        found
    }

    /// Copy `from..to` of the current buffer, with its spans, unchanged
    fn carry(&self, from: usize, to: usize, current: &mut String, spans: &mut Vec<Span>) {
        for span in &self.spans {
            if span.len == 0 {
                if from <= span.at && span.at <= to {
                    spans.push(Span {
                        at: current.len() + (span.at - from),
                        ..*span
                    });
                }
                continue;
            }

            let lo = span.at.max(from);
            let hi = span.end().min(to);
            if lo >= hi {
                continue;
            }

            // Cuts never fall inside a placeholder, so only text spans get clipped
            let orig_start = span.orig_start + (lo - span.at);
            let orig_end = match span.claimed {
                Some(_) => span.orig_end,
                None => orig_start + (hi - lo),
            };
            spans.push(Span {
                at: current.len() + (lo - from),
                len: hi - lo,
                orig_start,
                orig_end,
                claimed: span.claimed,
            });
        }

        current.push_str(&self.current[from..to]);
    }

    fn original_start(&self, pos: usize) -> usize {
        self.spans
            .iter()
            .find(|span| span.len > 0 && span.at <= pos && pos < span.end())
            .map_or(self.original.len(), |span| match span.claimed {
                Some(_) => span.orig_start,
                None => span.orig_start + (pos - span.at),
            })
    }

    fn original_end(&self, pos: usize) -> usize {
        self.spans
            .iter()
            .find(|span| span.len > 0 && span.at < pos && pos <= span.end())
            .map_or(self.original.len(), |span| match span.claimed {
                Some(_) => span.orig_end,
                None => span.orig_start + (pos - span.at),
            })
    }

    fn into_matches(self) -> Vec<MatchDescriptor> {
        let mut matches: Vec<_> = self.matches.into_iter().flatten().collect();
        matches.sort_by_key(|m| m.start);
        matches
    }
}

fn next_char(text: &str, pos: usize) -> usize {
    pos + text[pos..].chars().next().map_or(1, char::len_utf8)
}

/// Build the case-insensitive matcher for a custom literal
fn custom_regex(value: &str, mode: CustomMatchMode) -> Result<Regex, regex::Error> {
    let escaped = regex::escape(value);
    let pattern = match mode {
        CustomMatchMode::Substring => escaped,
        CustomMatchMode::WholeWord => format!(r"\b{}\b", escaped),
    };

    RegexBuilder::new(&pattern).case_insensitive(true).build()
}

fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

/// Scan `text` with the custom entries and the registry's rules.
///
/// Custom literals are applied longest first, then built-in rules in
/// registry order. Each rule runs against the buffer as rewritten by
/// the rules before it.
pub fn scan(text: &str, custom: &[CustomEntry], registry: &Registry, config: &ScrubConfig) -> Scan {
    let mut buffer = Buffer::new(text);
    let mut report = ScanReport::default();

    // Custom rules: drop incomplete entries, then longest literal first.
    // Lengths count UTF-16 units, as hosts measure strings. The sort is
    // stable so equal lengths keep their input order.
    let mut literals: Vec<(&str, &str)> = Vec::with_capacity(custom.len());
    for (idx, entry) in custom.iter().enumerate() {
        match (present(&entry.value), present(&entry.label)) {
            (Some(value), Some(label)) => literals.push((value, label)),
            (None, label) => {
                let key = label.map_or_else(
                    || format!("custom[{}]", idx),
                    |label| format!("custom_{}", label),
                );
                report.push(key, RuleOutcome::Skipped(SkipReason::MissingValue));
            }
            (Some(_), None) => {
                report.push(
                    format!("custom[{}]", idx),
                    RuleOutcome::Skipped(SkipReason::MissingLabel),
                );
            }
        }
    }
    literals.sort_by_key(|(value, _)| std::cmp::Reverse(value.encode_utf16().count()));

    for (value, label) in literals {
        let source = RuleSource::Custom {
            label: label.to_string(),
        };
        let key = source.stats_key();

        let regex = match custom_regex(value, config.custom_match_mode) {
            Ok(regex) => regex,
            Err(e) => {
                report.push(key, RuleOutcome::Skipped(SkipReason::Pattern(e.to_string())));
                continue;
            }
        };

        let placeholder = format!("<{}>", label);
        let count = buffer.substitute(&regex, &source, |_| placeholder.clone());
        report.push(key, outcome_for(count));
    }

    // Built-in rules. While nothing has been replaced the buffer is the
    // original text, so the RegexSet result says exactly which rules can hit.
    let candidates = registry.candidates(text);
    for (idx, rule) in registry.rules().iter().enumerate() {
        if config.is_disabled(&rule.id) {
            continue;
        }

        if buffer.is_pristine() && !candidates[idx] {
            report.push(rule.id.clone(), RuleOutcome::NoMatch);
            continue;
        }

        let source = RuleSource::Builtin {
            id: rule.id.clone(),
        };
        let count = if rule.is_template() {
            buffer.substitute(&rule.regex, &source, |caps| {
                let mut out = String::new();
                caps.expand(&rule.replacement, &mut out);
                out
            })
        } else {
            buffer.substitute(&rule.regex, &source, |_| rule.replacement.clone())
        };
        report.push(rule.id.clone(), outcome_for(count));
    }

    for (key, reason) in report.skipped() {
        warn!(rule = %key, reason = %reason, "Skipping rule");
    }

    let matches = buffer.into_matches();
    if config.log_detections {
        debug!(
            matches = matches.len(),
            rules = report.rules.len(),
            "Scan complete"
        );
    }

    Scan { matches, report }
}

fn outcome_for(count: usize) -> RuleOutcome {
    if count == 0 {
        RuleOutcome::NoMatch
    } else {
        RuleOutcome::Applied { count }
    }
}

/// Scrubbing engine: a shared registry plus per-instance configuration.
///
/// Stateless across calls; one instance can serve concurrent scans.
#[derive(Debug, Clone)]
pub struct Scrubber {
    registry: Arc<Registry>,
    config: ScrubConfig,
}

impl Scrubber {
    /// Scrubber over the built-in manifest
    pub fn new(config: ScrubConfig) -> Result<Self, ManifestError> {
        let registry = Registry::builtin()?;
        Ok(Self::with_registry(registry, config))
    }

    pub fn with_registry(registry: Arc<Registry>, config: ScrubConfig) -> Self {
        for id in &config.disabled_rules {
            if registry.get(id).is_none() {
                warn!(rule = %id, "Disabled rule is not in the registry");
            }
        }
        Self { registry, config }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &ScrubConfig {
        &self.config
    }

    pub fn scan(&self, text: &str, custom: &[CustomEntry]) -> Scan {
        scan(text, custom, &self.registry, &self.config)
    }

    /// Mask every match and count occurrences per rule
    pub fn redact(&self, text: &str, custom: &[CustomEntry]) -> RedactionResult {
        let scan = self.scan(text, custom);
        masking::redact_scan(text, &scan)
    }

    /// Redact under a quota: refuse when the plan has no scrubs left, and
    /// count the scrub only when something was masked.
    pub fn redact_metered<T: UsageTracker + ?Sized>(
        &self,
        text: &str,
        custom: &[CustomEntry],
        tracker: &mut T,
    ) -> Result<RedactionResult, QuotaError> {
        if !tracker.can_perform_action(ActionKind::Scrub) {
            return Err(QuotaError::ActionDenied {
                action: ActionKind::Scrub,
            });
        }

        let result = self.redact(text, custom);
        if !result.stats.is_empty() {
            tracker.record_scrub()?;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(json: &str) -> Registry {
        Registry::from_json(json).unwrap()
    }

    fn empty_registry() -> Registry {
        registry("[]")
    }

    #[test]
    fn test_custom_longest_first() {
        let custom = vec![CustomEntry::new("ab", "A"), CustomEntry::new("abc", "B")];
        let scan = scan("xabcx", &custom, &empty_registry(), &ScrubConfig::default());

        assert_eq!(scan.matches.len(), 1);
        assert_eq!(scan.matches[0].value, "abc");
        assert_eq!(scan.matches[0].replacement, "<B>");
        assert_eq!(scan.report.outcome("custom_A"), Some(&RuleOutcome::NoMatch));
    }

    #[test]
    fn test_offsets_refer_to_original_text() {
        let custom = vec![CustomEntry::new("foo", "F"), CustomEntry::new("barbaz", "B")];
        let text = "foo barbaz foo";
        let scan = scan(text, &custom, &empty_registry(), &ScrubConfig::default());

        let spans: Vec<_> = scan.matches.iter().map(|m| (m.start, m.end())).collect();
        assert_eq!(spans, vec![(0, 3), (4, 10), (11, 14)]);
        for m in &scan.matches {
            assert_eq!(&text[m.start..m.end()], m.value);
        }
    }

    #[test]
    fn test_placeholder_is_opaque() {
        // A rule that would match the label text inside "<EMAIL>"
        let registry = registry(
            r#"[
                {"id": "Email", "pattern": "[a-z]+@[a-z]+\\.com", "replacement": "<EMAIL>"},
                {"id": "Shout", "pattern": "EMAIL", "replacement": "<SHOUT>"}
            ]"#,
        );
        let scan = scan("mail a@b.com", &[], &registry, &ScrubConfig::default());

        assert_eq!(scan.matches.len(), 1);
        assert_eq!(scan.report.outcome("Shout"), Some(&RuleOutcome::NoMatch));
    }

    #[test]
    fn test_no_match_across_placeholder() {
        let registry = registry(r#"[{"id": "Pair", "pattern": "x y", "replacement": "<PAIR>"}]"#);
        let custom = vec![CustomEntry::new(" ", "SP")];
        let scan = scan("x y", &custom, &registry, &ScrubConfig::default());

        assert_eq!(scan.matches.len(), 1);
        assert_eq!(scan.matches[0].replacement, "<SP>");
    }

    #[test]
    fn test_match_covering_placeholder_takes_it_over() {
        let registry = registry(
            r#"[{"id": "Block", "pattern": "BEGIN[\\s\\S]*?END", "replacement": "<BLOCK>"}]"#,
        );
        let custom = vec![CustomEntry::new("inner", "I")];
        let text = "pre BEGIN a inner b END post";
        let scan = scan(text, &custom, &registry, &ScrubConfig::default());

        assert_eq!(scan.matches.len(), 1);
        assert_eq!(scan.matches[0].value, "BEGIN a inner b END");
        assert_eq!(scan.matches[0].start, 4);
        assert_eq!(scan.matches[0].replacement, "<BLOCK>");

        // The literal was still replaced before the block rule ran
        assert_eq!(
            scan.report.outcome("custom_I"),
            Some(&RuleOutcome::Applied { count: 1 })
        );
        assert_eq!(
            scan.report.outcome("Block"),
            Some(&RuleOutcome::Applied { count: 1 })
        );
    }

    #[test]
    fn test_match_may_not_end_inside_placeholder() {
        let registry = registry(r#"[{"id": "Tail", "pattern": "a<X", "replacement": "<T>"}]"#);
        let custom = vec![CustomEntry::new("b", "X")];
        let scan = scan("ab", &custom, &registry, &ScrubConfig::default());

        assert_eq!(scan.matches.len(), 1);
        assert_eq!(scan.report.outcome("Tail"), Some(&RuleOutcome::NoMatch));
    }

    #[test]
    fn test_anchors_see_whole_buffer() {
        let registry = registry(r#"[{"id": "Lead", "pattern": "^code", "replacement": "<LEAD>"}]"#);
        let custom = vec![CustomEntry::new("x ", "X")];
        let config = ScrubConfig::default();

        // "<X>code": the placeholder edge is not the start of the text
        let mid = scan("x code", &custom, &registry, &config);
        assert_eq!(mid.matches.len(), 1);
        assert_eq!(mid.report.outcome("Lead"), Some(&RuleOutcome::NoMatch));

        let custom = vec![CustomEntry::new("x", "X")];
        let lead = scan("code x", &custom, &registry, &config);
        let spans: Vec<_> = lead.matches.iter().map(|m| (m.start, m.end())).collect();
        assert_eq!(spans, vec![(0, 4), (5, 6)]);
    }

    #[test]
    fn test_unbuildable_literal_is_skipped() {
        // Case folding makes every character a class, pushing the
        // compiled pattern past the regex size limit
        let huge = "\u{1C5}".repeat(3_000_000);
        let custom = vec![CustomEntry::new(huge, "BIG"), CustomEntry::new("tok", "T")];
        let registry = Registry::builtin().unwrap();
        let scan = scan("tok a@b.com", &custom, &registry, &ScrubConfig::default());

        assert!(matches!(
            scan.report.outcome("custom_BIG"),
            Some(RuleOutcome::Skipped(SkipReason::Pattern(_)))
        ));
        assert_eq!(
            scan.report.outcome("custom_T"),
            Some(&RuleOutcome::Applied { count: 1 })
        );
        assert_eq!(
            scan.report.outcome("Email"),
            Some(&RuleOutcome::Applied { count: 1 })
        );
        assert_eq!(scan.matches.len(), 2);
    }

    #[test]
    fn test_literal_length_counts_utf16_units() {
        // "\u{1F600}\u{1F600}" is 2 chars but 4 UTF-16 units, "x\u{1F600}" is 2 chars and 3 units
        let custom = vec![
            CustomEntry::new("x\u{1F600}", "B"),
            CustomEntry::new("\u{1F600}\u{1F600}", "A"),
        ];
        let text = "x\u{1F600}\u{1F600}";
        let scan = scan(text, &custom, &empty_registry(), &ScrubConfig::default());

        assert_eq!(scan.matches.len(), 1);
        assert_eq!(scan.matches[0].replacement, "<A>");
        assert_eq!(scan.matches[0].start, 1);
    }

    #[test]
    fn test_registry_order_decides_overlap() {
        let registry = registry(
            r#"[
                {"id": "Card", "pattern": "\\d{16}", "replacement": "<CARD>"},
                {"id": "Hex", "pattern": "[0-9a-f]{16,}", "replacement": "<HEX>"}
            ]"#,
        );
        let scan = scan("n=4111111111111111", &[], &registry, &ScrubConfig::default());

        assert_eq!(scan.matches.len(), 1);
        assert_eq!(
            scan.matches[0].source,
            RuleSource::Builtin {
                id: "Card".to_string()
            }
        );
    }

    #[test]
    fn test_incomplete_entries_are_skipped() {
        let custom = vec![
            CustomEntry {
                value: Some("secret".to_string()),
                label: None,
            },
            CustomEntry {
                value: None,
                label: Some("L".to_string()),
            },
            CustomEntry {
                value: Some(String::new()),
                label: Some("E".to_string()),
            },
            CustomEntry::new("token", "T"),
        ];
        let scan = scan("secret token", &custom, &empty_registry(), &ScrubConfig::default());

        assert_eq!(scan.matches.len(), 1);
        assert_eq!(scan.matches[0].value, "token");

        let skipped: Vec<_> = scan.report.skipped().collect();
        assert_eq!(skipped.len(), 3);
        assert_eq!(skipped[0], ("custom[0]", &SkipReason::MissingLabel));
        assert_eq!(skipped[1], ("custom_L", &SkipReason::MissingValue));
    }

    #[test]
    fn test_whole_word_mode() {
        let custom = vec![CustomEntry::new("cat", "C")];
        let config = ScrubConfig {
            custom_match_mode: CustomMatchMode::WholeWord,
            ..Default::default()
        };

        let scan_ww = scan("cat concatenate", &custom, &empty_registry(), &config);
        assert_eq!(scan_ww.matches.len(), 1);

        let scan_sub = scan(
            "cat concatenate",
            &custom,
            &empty_registry(),
            &ScrubConfig::default(),
        );
        assert_eq!(scan_sub.matches.len(), 2);
    }

    #[test]
    fn test_disabled_rule() {
        let registry = Registry::builtin().unwrap();
        let config = ScrubConfig {
            disabled_rules: vec!["Email".to_string()],
            ..Default::default()
        };
        let scan = scan("a@b.com", &[], &registry, &config);

        assert!(scan.matches.is_empty());
        assert_eq!(scan.report.outcome("Email"), None);
    }

    #[test]
    fn test_template_replacement() {
        let registry = registry(
            r#"[{"id": "Kv", "pattern": "(?P<key>password)=\\S+", "replacement": "$key=<SECRET>"}]"#,
        );
        let scan = scan("password=hunter2", &[], &registry, &ScrubConfig::default());

        assert_eq!(scan.matches[0].replacement, "password=<SECRET>");
    }

    #[test]
    fn test_zero_width_matches_ignored() {
        let registry = registry(r#"[{"id": "Empty", "pattern": "x*", "replacement": "<X>"}]"#);
        let scan = scan("abc", &[], &registry, &ScrubConfig::default());

        assert!(scan.matches.is_empty());
        assert_eq!(scan.report.outcome("Empty"), Some(&RuleOutcome::NoMatch));
    }

    #[test]
    fn test_empty_text() {
        let registry = Registry::builtin().unwrap();
        let custom = vec![CustomEntry::new("a", "A")];
        let scan = scan("", &custom, &registry, &ScrubConfig::default());
        assert!(scan.matches.is_empty());
    }

    #[test]
    fn test_stats_key() {
        let custom = RuleSource::Custom {
            label: "Name".to_string(),
        };
        let builtin = RuleSource::Builtin {
            id: "Email".to_string(),
        };
        assert_eq!(custom.stats_key(), "custom_Name");
        assert_eq!(builtin.stats_key(), "Email");
    }
}
