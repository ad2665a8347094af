// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Sensitive-text scrubbing engine
// Optional PyO3 bindings for hosts that load it as an extension module

// Allow non-local definitions for PyO3 macros (known issue with PyO3 0.20.x)
#![cfg_attr(feature = "python", allow(non_local_definitions))]

#[cfg(feature = "python")]
use pyo3::prelude::*;

pub mod scrubber;

pub use scrubber::{redact, CustomEntry, RedactionResult, ScrubConfig, Scrubber};

/// Python module: scrubber_rust
///
/// Masks API keys, emails, card numbers and user-defined values in text.
///
/// # Examples
///
/// ```python
/// from scrubber_rust import ScrubberRust
///
/// scrubber = ScrubberRust()
/// clean, stats = scrubber.redact("contact me at a@b.com today", [])
/// print(clean)  # "contact me at <EMAIL> today"
/// print(stats)  # {"Email": 1}
/// ```
#[cfg(feature = "python")]
#[pymodule]
fn scrubber_rust(m: &Bound<'_, pyo3::types::PyModule>) -> PyResult<()> {
    m.add_class::<scrubber::ScrubberRust>()?;

    // Module metadata
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add(
        "__doc__",
        "Detection and masking of sensitive substrings in free text",
    )?;

    Ok(())
}
