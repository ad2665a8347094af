// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// PyO3 bindings around the scrubbing engine

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::config::ScrubConfig;
use super::custom::CustomEntry;
use super::detector::{RuleSource, Scrubber};
use super::patterns::Registry;

/// Scrubber exposed to Python
///
/// # Example (Python)
/// ```python
/// from scrubber_rust import ScrubberRust
///
/// scrubber = ScrubberRust({"custom_match_mode": "substring"})
///
/// clean, stats = scrubber.redact(
///     "mail a@b.com about Project Falcon",
///     [{"value": "project falcon", "label": "CODENAME"}],
/// )
/// print(clean)  # "mail <EMAIL> about <CODENAME>"
/// print(stats)  # {"Email": 1, "custom_CODENAME": 1}
/// ```
#[pyclass]
pub struct ScrubberRust {
    inner: Scrubber,
}

#[pymethods]
impl ScrubberRust {
    /// Create a new scrubber
    ///
    /// # Arguments
    /// * `config` - Optional dict with `custom_match_mode`, `disabled_rules`, `log_detections`
    /// * `manifest` - Optional JSON rule manifest replacing the built-in rules
    #[new]
    #[pyo3(signature = (config=None, manifest=None))]
    pub fn new(config: Option<&Bound<'_, PyDict>>, manifest: Option<&str>) -> PyResult<Self> {
        let config = match config {
            Some(dict) => ScrubConfig::from_py_dict(dict).map_err(|e| {
                PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("Invalid config: {}", e))
            })?,
            None => ScrubConfig::default(),
        };

        let registry = match manifest {
            Some(json) => Registry::from_json(json).map(Arc::new),
            None => Registry::builtin(),
        }
        .map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Rule manifest failed to load: {}",
                e
            ))
        })?;

        Ok(Self {
            inner: Scrubber::with_registry(registry, config),
        })
    }

    /// Mask sensitive substrings
    ///
    /// # Arguments
    /// * `text` - Text to scrub
    /// * `custom_rules` - List of `{"value": str, "label": str}` dicts; incomplete entries are ignored
    ///
    /// # Returns
    /// Tuple of (clean text, {rule key: count})
    #[pyo3(signature = (text, custom_rules=None))]
    pub fn redact(
        &self,
        text: &str,
        custom_rules: Option<&Bound<'_, PyList>>,
    ) -> PyResult<(String, BTreeMap<String, usize>)> {
        let custom = custom_rules.map(py_entries).transpose()?.unwrap_or_default();
        let result = self.inner.redact(text, &custom);
        Ok((result.clean, result.stats))
    }

    /// List matches without rewriting
    ///
    /// # Returns
    /// List of dicts with `start`, `end`, `value`, `replacement`, `rule`, `custom`.
    /// Offsets are UTF-8 byte offsets into `text`.
    #[pyo3(signature = (text, custom_rules=None))]
    pub fn scan(
        &self,
        py: Python<'_>,
        text: &str,
        custom_rules: Option<&Bound<'_, PyList>>,
    ) -> PyResult<Py<PyAny>> {
        let custom = custom_rules.map(py_entries).transpose()?.unwrap_or_default();
        let scan = self.inner.scan(text, &custom);

        let py_list = PyList::empty(py);
        for m in &scan.matches {
            let item = PyDict::new(py);
            item.set_item("start", m.start)?;
            item.set_item("end", m.end())?;
            item.set_item("value", &m.value)?;
            item.set_item("replacement", &m.replacement)?;
            item.set_item("rule", m.source.stats_key())?;
            item.set_item("custom", matches!(m.source, RuleSource::Custom { .. }))?;
            py_list.append(item)?;
        }

        Ok(py_list.into_any().unbind())
    }

    /// Built-in rule ids in application order
    pub fn rule_ids(&self) -> Vec<String> {
        self.inner
            .registry()
            .rules()
            .iter()
            .map(|rule| rule.id.clone())
            .collect()
    }
}

/// Convert a Python list of dicts to custom entries. Non-dict items and
/// non-string fields count as missing.
fn py_entries(list: &Bound<'_, PyList>) -> PyResult<Vec<CustomEntry>> {
    let mut entries = Vec::with_capacity(list.len());

    for item in list.iter() {
        let Ok(dict) = item.downcast::<PyDict>() else {
            entries.push(CustomEntry::default());
            continue;
        };

        let value = match dict.get_item("value")? {
            Some(v) => v.extract::<String>().ok(),
            None => None,
        };
        let label = match dict.get_item("label")? {
            Some(v) => v.extract::<String>().ok(),
            None => None,
        };
        entries.push(CustomEntry { value, label });
    }

    Ok(entries)
}
