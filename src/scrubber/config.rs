// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Configuration types for the scrubbing engine

#[cfg(feature = "python")]
use pyo3::prelude::*;
#[cfg(feature = "python")]
use pyo3::types::PyDict;
use serde::{Deserialize, Serialize};

/// How custom rule literals are located in the text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomMatchMode {
    /// Match anywhere, including inside JSON fragments and URLs
    #[default]
    Substring,
    /// Match only where the literal is delimited by word boundaries
    WholeWord,
}

impl CustomMatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomMatchMode::Substring => "substring",
            CustomMatchMode::WholeWord => "whole_word",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "substring" => Some(CustomMatchMode::Substring),
            "whole_word" => Some(CustomMatchMode::WholeWord),
            _ => None,
        }
    }
}

/// Configuration for a scrubber instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrubConfig {
    pub custom_match_mode: CustomMatchMode,

    /// Built-in rule ids excluded from every scan
    pub disabled_rules: Vec<String>,

    pub log_detections: bool,
}

impl Default for ScrubConfig {
    fn default() -> Self {
        Self {
            custom_match_mode: CustomMatchMode::Substring,
            disabled_rules: Vec::new(),
            log_detections: true,
        }
    }
}

impl ScrubConfig {
    /// Parse configuration from a JSON document. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_disabled(&self, rule_id: &str) -> bool {
        self.disabled_rules.iter().any(|id| id == rule_id)
    }
}

#[cfg(feature = "python")]
impl ScrubConfig {
    /// Extract configuration from Python dict
    pub fn from_py_dict(dict: &Bound<'_, PyDict>) -> PyResult<Self> {
        let mut config = Self::default();

        if let Some(value) = dict.get_item("custom_match_mode")? {
            let mode: String = value.extract()?;
            config.custom_match_mode = CustomMatchMode::parse(&mode).ok_or_else(|| {
                pyo3::exceptions::PyValueError::new_err(format!(
                    "Unknown custom_match_mode '{}'",
                    mode
                ))
            })?;
        }

        if let Some(value) = dict.get_item("disabled_rules")? {
            config.disabled_rules = value.extract()?;
        }

        if let Some(value) = dict.get_item("log_detections")? {
            config.log_detections = value.extract()?;
        }

        Ok(config)
    }
}
