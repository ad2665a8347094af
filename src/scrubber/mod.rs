// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Scrubber - detection and masking of sensitive substrings
//
// - Custom literals applied longest first, then built-in rules in manifest order
// - Every rule sees the text left untouched by earlier rules; placeholders are opaque
// - Per-rule failures are reported and skipped, never raised

#[cfg(feature = "python")]
pub mod bindings;
pub mod config;
pub mod custom;
pub mod detector;
pub mod error;
pub mod masking;
pub mod patterns;
pub mod quota;

#[cfg(feature = "python")]
pub use bindings::ScrubberRust;
pub use config::{CustomMatchMode, ScrubConfig};
pub use custom::{CustomEntry, CustomRule, CustomRuleSet};
pub use detector::{MatchDescriptor, RuleOutcome, RuleSource, Scan, Scrubber, SkipReason};
pub use error::{CustomRuleError, ManifestError, QuotaError};
pub use masking::RedactionResult;
pub use patterns::Registry;
pub use quota::{ActionKind, PlanTier, UsageRecord, UsageTracker};

/// Redact `text` with the built-in rules and default configuration.
///
/// Fails only if the built-in manifest cannot be loaded, which is a
/// startup problem rather than a property of `text`.
pub fn redact(text: &str, custom: &[CustomEntry]) -> Result<RedactionResult, ManifestError> {
    let scrubber = Scrubber::new(ScrubConfig::default())?;
    Ok(scrubber.redact(text, custom))
}
