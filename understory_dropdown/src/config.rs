// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural selectors and tuning knobs.

use alloc::string::String;
use core::time::Duration;

/// Class names used to find a dropdown's parts, plus placement and timing settings.
///
/// The defaults match the stock markup:
///
/// ```text
/// .dropdown
///   .dropdown__button
///   .dropdown__menu-container
///     .dropdown__menu
///       .dropdown__menu-item ...
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DropdownConfig {
    /// Class of the container element.
    pub container_class: String,
    /// Class of the trigger button.
    pub trigger_class: String,
    /// Class of the positioned wrapper around the menu.
    pub menu_wrapper_class: String,
    /// Class of the menu list (carries `aria-hidden`).
    pub menu_class: String,
    /// Class of each menu item.
    pub item_class: String,
    /// Modifier class set on the wrapper while it opens upward.
    pub above_class: String,
    /// Gap kept between a height-capped menu and the viewport edge, in px.
    pub scroll_margin: f64,
    /// Delay before a keyboard-opened menu focuses its seeded item.
    ///
    /// Must outlast the zero-delay reposition so the item is laid out when focused.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub seed_delay: Duration,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            container_class: "dropdown".into(),
            trigger_class: "dropdown__button".into(),
            menu_wrapper_class: "dropdown__menu-container".into(),
            menu_class: "dropdown__menu".into(),
            item_class: "dropdown__menu-item".into(),
            above_class: "dropdown__menu-container--above".into(),
            scroll_margin: 10.0,
            seed_delay: Duration::from_millis(10),
        }
    }
}

#[cfg(feature = "serde")]
mod millis {
    use core::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Delays are a handful of milliseconds."
        )]
        s.serialize_u64(d.as_millis() as u64)
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_stock_markup() {
        let c = DropdownConfig::default();
        assert_eq!(c.container_class, "dropdown");
        assert_eq!(c.above_class, "dropdown__menu-container--above");
        assert_eq!(c.scroll_margin, 10.0);
        assert_eq!(c.seed_delay, Duration::from_millis(10));
    }
}
