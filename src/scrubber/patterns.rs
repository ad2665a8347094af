// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Built-in rule registry loaded from a JSON manifest
// Uses RegexSet to skip rules that cannot match untouched text

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use super::error::ManifestError;

/// Manifest shipped with the crate, in application order
static BUILTIN_MANIFEST: &str = include_str!("../../rules/builtin.json");

static BUILTIN: Lazy<Result<Arc<Registry>, ManifestError>> =
    Lazy::new(|| Registry::from_json(BUILTIN_MANIFEST).map(Arc::new));

/// One record of a rule manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub id: String,
    pub pattern: String,
    pub replacement: String,
}

/// Compiled built-in rule
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: String,
    pub regex: Regex,
    /// Substitution template; `$name` / `${1}` expand capture groups
    pub replacement: String,
}

impl Rule {
    /// Whether the replacement references capture groups
    pub fn is_template(&self) -> bool {
        self.replacement.contains('$')
    }
}

/// Ordered, immutable set of built-in rules
#[derive(Debug)]
pub struct Registry {
    rules: Vec<Rule>,
    regex_set: RegexSet,
}

impl Registry {
    /// Registry compiled from the manifest embedded in the crate.
    ///
    /// The manifest is parsed once per process. If it is malformed every
    /// call returns the same error.
    pub fn builtin() -> Result<Arc<Registry>, ManifestError> {
        match &*BUILTIN {
            Ok(registry) => Ok(Arc::clone(registry)),
            Err(e) => Err(e.clone()),
        }
    }

    /// Parse and compile a JSON manifest (an array of `{id, pattern, replacement}`)
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let entries: Vec<ManifestEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn from_entries(entries: Vec<ManifestEntry>) -> Result<Self, ManifestError> {
        let mut seen = HashSet::new();
        let mut rules = Vec::with_capacity(entries.len());

        for (index, entry) in entries.into_iter().enumerate() {
            let id = entry.id.trim().to_string();
            if id.is_empty() {
                return Err(ManifestError::EmptyId { index });
            }
            if !seen.insert(id.clone()) {
                return Err(ManifestError::DuplicateId { id });
            }
            if entry.replacement.is_empty() {
                return Err(ManifestError::EmptyReplacement { id });
            }

            let regex = Regex::new(&entry.pattern).map_err(|e| ManifestError::InvalidPattern {
                id: id.clone(),
                reason: e.to_string(),
            })?;

            rules.push(Rule {
                id,
                regex,
                replacement: entry.replacement,
            });
        }

        let regex_set = if rules.is_empty() {
            RegexSet::empty()
        } else {
            RegexSet::new(rules.iter().map(|rule| rule.regex.as_str())).map_err(|e| {
                ManifestError::InvalidPattern {
                    id: "<set>".to_string(),
                    reason: e.to_string(),
                }
            })?
        };

        info!(rules = rules.len(), "Loaded rule registry");

        Ok(Self { rules, regex_set })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// One flag per rule, in registry order: whether the rule matches anywhere in `text`
    pub fn candidates(&self, text: &str) -> Vec<bool> {
        let matches = self.regex_set.matches(text);
        (0..self.rules.len()).map(|idx| matches.matched(idx)).collect()
    }
}
