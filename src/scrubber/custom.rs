// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// User-defined literal rules and the validating store around them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::CustomRuleError;
use super::quota::UsageRecord;

pub const MAX_LABEL_LEN: usize = 32;
pub const MAX_VALUE_LEN: usize = 256;

/// Labels become part of the placeholder text, so they are restricted to `[A-Za-z0-9_-]+`
pub fn is_valid_label(label: &str) -> bool {
    !label.is_empty()
        && label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// The `{value, label}` pair handed to the matcher for one scan.
///
/// Both fields are optional so that loosely-typed host data can be passed
/// through unchanged; entries missing either one are skipped by the scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomEntry {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

impl CustomEntry {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            label: Some(label.into()),
        }
    }
}

/// A persisted user rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRule {
    pub id: Uuid,
    pub value: String,
    pub label: String,
    pub created_at: DateTime<Utc>,
}

impl CustomRule {
    pub fn entry(&self) -> CustomEntry {
        CustomEntry::new(self.value.clone(), self.label.clone())
    }
}

/// A user's rule set with uniqueness and format checks applied on every mutation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomRuleSet {
    rules: Vec<CustomRule>,
}

impl CustomRuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[CustomRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&CustomRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Snapshot in insertion order, ready to pass to a scan
    pub fn entries(&self) -> Vec<CustomEntry> {
        self.rules.iter().map(CustomRule::entry).collect()
    }

    /// Add a rule. `limit` is the plan's cap on stored rules (`None` = unlimited).
    pub fn add(
        &mut self,
        value: &str,
        label: &str,
        limit: Option<u32>,
    ) -> Result<&CustomRule, CustomRuleError> {
        if let Some(limit) = limit {
            if self.rules.len() >= limit as usize {
                return Err(CustomRuleError::LimitReached { limit });
            }
        }

        let (value, label) = self.validate(value, label, None)?;
        self.rules.push(CustomRule {
            id: Uuid::new_v4(),
            value,
            label,
            created_at: Utc::now(),
        });

        let idx = self.rules.len() - 1;
        Ok(&self.rules[idx])
    }

    /// Replace the value and label of an existing rule
    pub fn update(
        &mut self,
        id: Uuid,
        value: &str,
        label: &str,
    ) -> Result<&CustomRule, CustomRuleError> {
        let idx = self
            .position(id)
            .ok_or_else(|| CustomRuleError::NotFound { id: id.to_string() })?;

        let (value, label) = self.validate(value, label, Some(id))?;
        let rule = &mut self.rules[idx];
        rule.value = value;
        rule.label = label;

        Ok(&self.rules[idx])
    }

    pub fn delete(&mut self, id: Uuid) -> Result<CustomRule, CustomRuleError> {
        let idx = self
            .position(id)
            .ok_or_else(|| CustomRuleError::NotFound { id: id.to_string() })?;
        Ok(self.rules.remove(idx))
    }

    /// Add a rule under the account's plan cap and keep its usage counter in step
    pub fn add_for_account(
        &mut self,
        value: &str,
        label: &str,
        usage: &mut UsageRecord,
    ) -> Result<&CustomRule, CustomRuleError> {
        let limit = usage.plan.limits().custom_rules;
        let len_before = self.rules.len();
        let result = self.add(value, label, limit);
        usage.custom_rule_count = (len_before + usize::from(result.is_ok())) as u32;
        result
    }

    /// Delete a rule and keep the account's usage counter in step
    pub fn delete_for_account(
        &mut self,
        id: Uuid,
        usage: &mut UsageRecord,
    ) -> Result<CustomRule, CustomRuleError> {
        let removed = self.delete(id)?;
        usage.custom_rule_count = self.rules.len() as u32;
        Ok(removed)
    }

    fn position(&self, id: Uuid) -> Option<usize> {
        self.rules.iter().position(|rule| rule.id == id)
    }

    fn validate(
        &self,
        value: &str,
        label: &str,
        ignore: Option<Uuid>,
    ) -> Result<(String, String), CustomRuleError> {
        let value = value.trim();
        let label = label.trim();

        if value.is_empty() {
            return Err(CustomRuleError::EmptyValue);
        }
        if value.chars().count() > MAX_VALUE_LEN {
            return Err(CustomRuleError::ValueTooLong { max: MAX_VALUE_LEN });
        }
        if !is_valid_label(label) {
            return Err(CustomRuleError::InvalidLabel {
                label: label.to_string(),
            });
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(CustomRuleError::LabelTooLong { max: MAX_LABEL_LEN });
        }

        let others = self
            .rules
            .iter()
            .filter(|rule| Some(rule.id) != ignore);
        for rule in others {
            if rule.value.to_lowercase() == value.to_lowercase() {
                return Err(CustomRuleError::DuplicateValue {
                    value: value.to_string(),
                });
            }
            if rule.label.eq_ignore_ascii_case(label) {
                return Err(CustomRuleError::DuplicateLabel {
                    label: label.to_string(),
                });
            }
        }

        Ok((value.to_string(), label.to_string()))
    }
}
