// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

use alloc::string::String;

/// Why a container could not become a live dropdown.
///
/// Each variant carries the class name that was looked up.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum BuildError {
    /// No descendant carries the trigger class.
    #[error("dropdown container has no trigger (`.{0}`)")]
    MissingTrigger(String),
    /// No descendant carries the menu-wrapper class.
    #[error("dropdown container has no menu wrapper (`.{0}`)")]
    MissingMenuWrapper(String),
    /// No descendant carries the menu class.
    #[error("dropdown container has no menu (`.{0}`)")]
    MissingMenu(String),
}
