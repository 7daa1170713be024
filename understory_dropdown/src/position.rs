// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport-aware menu placement.
//!
//! ## Overview
//!
//! [`place`] is a pure decision over the trigger box, the menu's natural height, and the
//! viewport height. [`reposition`] measures those through a [`Surface`], applies the
//! decision as inline styles and a modifier class, and returns it.
//!
//! ## Rules
//!
//! 1. Below, when the space under the trigger fits the whole menu.
//! 2. Otherwise above, when the space over the trigger fits it.
//! 3. Otherwise on the roomier side (ties go above), with the height capped to that
//!    space minus a margin and vertical scrolling enabled.
//!
//! ```
//! use kurbo::Rect;
//! use understory_dropdown::position::{Placement, Side, place};
//!
//! let trigger = Rect::new(0.0, 660.0, 120.0, 700.0);
//! assert_eq!(
//!     place(trigger, 80.0, 750.0, 10.0),
//!     Placement { side: Side::Above, max_height: None },
//! );
//! ```

use alloc::format;

use kurbo::Rect;

use crate::host::Surface;
use crate::types::StyleProp;

/// Which side of the trigger the menu opens on.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Side {
    /// Under the trigger (`top: 100%`).
    Below,
    /// Over the trigger (`bottom: 100%`).
    Above,
}

/// A placement decision.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Placement {
    /// Side to open on.
    pub side: Side,
    /// Height cap in px; `Some` also means the menu scrolls vertically.
    pub max_height: Option<f64>,
}

impl Placement {
    /// True if the menu must scroll to show every item.
    pub fn is_scrollable(&self) -> bool {
        self.max_height.is_some()
    }
}

/// Decide where a menu of `menu_height` opens relative to `trigger`.
///
/// `trigger` is in viewport coordinates. A cap never goes below zero.
pub fn place(trigger: Rect, menu_height: f64, viewport_height: f64, margin: f64) -> Placement {
    let space_below = viewport_height - trigger.y1;
    let space_above = trigger.y0;

    if space_below >= menu_height {
        Placement {
            side: Side::Below,
            max_height: None,
        }
    } else if space_above >= menu_height {
        Placement {
            side: Side::Above,
            max_height: None,
        }
    } else if space_below > space_above {
        Placement {
            side: Side::Below,
            max_height: Some((space_below - margin).max(0.0)),
        }
    } else {
        Placement {
            side: Side::Above,
            max_height: Some((space_above - margin).max(0.0)),
        }
    }
}

/// Measure, decide, and apply a placement for `wrapper` relative to `trigger`.
///
/// Prior inline overrides are cleared before measuring so the wrapper's natural
/// height is used; the measurement forces layout on the host side.
pub fn reposition<E: Copy>(
    host: &mut impl Surface<E>,
    trigger: E,
    wrapper: E,
    above_class: &str,
    margin: f64,
) -> Placement {
    for prop in [
        StyleProp::Top,
        StyleProp::Bottom,
        StyleProp::Transform,
        StyleProp::MaxHeight,
        StyleProp::OverflowY,
    ] {
        host.set_style(wrapper, prop, None);
    }

    let menu = host.measure(wrapper);
    let anchor = host.measure(trigger);
    let viewport_height = host.viewport_height();
    let placement = place(anchor, menu.height(), viewport_height, margin);

    match placement.side {
        Side::Below => host.set_style(wrapper, StyleProp::Top, Some("100%")),
        Side::Above => host.set_style(wrapper, StyleProp::Bottom, Some("100%")),
    }
    host.set_class(wrapper, above_class, placement.side == Side::Above);
    if let Some(cap) = placement.max_height {
        host.set_style(wrapper, StyleProp::MaxHeight, Some(&format!("{cap}px")));
        host.set_style(wrapper, StyleProp::OverflowY, Some("auto"));
    }

    log::debug!(
        "placed menu {:?} (menu {:.0}px, trigger {:.0}..{:.0}, viewport {:.0}px, cap {:?})",
        placement.side,
        menu.height(),
        anchor.y0,
        anchor.y1,
        viewport_height,
        placement.max_height
    );
    placement
}
