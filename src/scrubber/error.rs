// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Error types for the scrubbing engine

use thiserror::Error;

use super::quota::ActionKind;

/// Fatal errors raised while loading a rule manifest.
///
/// A registry that fails to load cannot serve any scan, so these are
/// surfaced once at startup instead of per call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    #[error("Failed to parse rule manifest: {0}")]
    Parse(String),

    #[error("Rule manifest entry {index} has an empty id")]
    EmptyId { index: usize },

    #[error("Duplicate rule id '{id}' in manifest")]
    DuplicateId { id: String },

    #[error("Rule '{id}' has an empty replacement")]
    EmptyReplacement { id: String },

    #[error("Failed to compile pattern for rule '{id}': {reason}")]
    InvalidPattern { id: String, reason: String },
}

impl From<serde_json::Error> for ManifestError {
    fn from(err: serde_json::Error) -> Self {
        ManifestError::Parse(err.to_string())
    }
}

/// Validation errors raised by the custom rule store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomRuleError {
    #[error("Custom rule value must not be empty")]
    EmptyValue,

    #[error("Custom rule value exceeds {max} characters")]
    ValueTooLong { max: usize },

    #[error("Invalid label '{label}': only letters, digits, '-' and '_' are allowed")]
    InvalidLabel { label: String },

    #[error("Custom rule label exceeds {max} characters")]
    LabelTooLong { max: usize },

    #[error("A custom rule with value '{value}' already exists")]
    DuplicateValue { value: String },

    #[error("A custom rule with label '{label}' already exists")]
    DuplicateLabel { label: String },

    #[error("Custom rule '{id}' not found")]
    NotFound { id: String },

    #[error("Custom rule limit of {limit} reached for the current plan")]
    LimitReached { limit: u32 },
}

/// Quota errors raised by the usage tracker
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuotaError {
    #[error("Monthly scrub limit of {limit} reached")]
    ScrubLimitReached { limit: u32 },

    #[error("Plan does not allow {action:?} at this time")]
    ActionDenied { action: ActionKind },
}
