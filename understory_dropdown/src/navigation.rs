// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Active-item navigation: arrow/Home/End stepping with wraparound, and type-ahead search.
//!
//! Both functions are pure; the [`Dropdown`](crate::dropdown::Dropdown) applies the
//! result and synchronizes tabindex and focus.
//!
//! ```
//! use understory_dropdown::navigation::{NavCommand, next_index, search_by_char};
//!
//! assert_eq!(next_index(Some(2), NavCommand::Next, 3), Some(0));
//! assert_eq!(next_index(None, NavCommand::Prev, 3), Some(2));
//!
//! let labels = ["Apple", "Banana", "Cherry", "Beet"];
//! assert_eq!(search_by_char(&labels, Some(1), 'b'), Some(3));
//! ```

use crate::types::Key;

/// A navigation command.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NavCommand {
    /// Next item, wrapping to the first.
    Next,
    /// Previous item, wrapping to the last.
    Prev,
    /// First item.
    First,
    /// Last item.
    Last,
}

impl NavCommand {
    /// The command a key maps to while the menu is open.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowDown => Some(Self::Next),
            Key::ArrowUp => Some(Self::Prev),
            Key::Home => Some(Self::First),
            Key::End => Some(Self::Last),
            _ => None,
        }
    }
}

/// Compute the next active index for `cmd` over `len` items.
///
/// Returns `None` only when `len == 0`. A `current` index that is out of range
/// is treated as if nothing were active.
pub fn next_index(current: Option<usize>, cmd: NavCommand, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    let current = current.filter(|&i| i < len);
    Some(match (cmd, current) {
        (NavCommand::Next, None) => 0,
        (NavCommand::Next, Some(i)) => {
            if i < last {
                i + 1
            } else {
                0
            }
        }
        (NavCommand::Prev, None) => last,
        (NavCommand::Prev, Some(i)) => i.checked_sub(1).unwrap_or(last),
        (NavCommand::First, _) => 0,
        (NavCommand::Last, _) => last,
    })
}

/// True if `label`, trimmed and case-folded, starts with the case-folded `ch`.
pub fn label_starts_with(label: &str, ch: char) -> bool {
    let mut folded = label.trim().chars().flat_map(char::to_lowercase);
    ch.to_lowercase().all(|c| folded.next() == Some(c))
}

/// Find the next item whose label starts with `ch`.
///
/// The scan begins just after `current` (or at the first item), wraps around,
/// and stops after visiting every item once. `None` means no label matched and
/// the active item should stay as it is.
pub fn search_by_char<S: AsRef<str>>(labels: &[S], current: Option<usize>, ch: char) -> Option<usize> {
    search_by_char_with(labels.len(), current, ch, |i| &labels[i])
}

/// [`search_by_char`] over `len` labels fetched on demand.
///
/// `label` is called in scan order and never again after the first match.
pub fn search_by_char_with<L: AsRef<str>>(
    len: usize,
    current: Option<usize>,
    ch: char,
    mut label: impl FnMut(usize) -> L,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let start = match current {
        Some(i) if i < len => (i + 1) % len,
        _ => 0,
    };
    (0..len)
        .map(|step| (start + step) % len)
        .find(|&i| label_starts_with(label(i).as_ref(), ch))
}
