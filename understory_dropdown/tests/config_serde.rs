// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `DropdownConfig` as loaded from JSON. Needs the `serde` feature.

use std::time::Duration;

use understory_dropdown::DropdownConfig;

#[test]
fn partial_json_falls_back_to_defaults() {
    let c: DropdownConfig =
        serde_json::from_str(r#"{ "container_class": "menu", "seed_delay": 25 }"#).unwrap();
    assert_eq!(c.container_class, "menu");
    assert_eq!(c.seed_delay, Duration::from_millis(25));
    assert_eq!(c.trigger_class, "dropdown__button");
    assert_eq!(c.scroll_margin, 10.0);
}

#[test]
fn round_trips_delay_in_millis() {
    let c = DropdownConfig {
        seed_delay: Duration::from_millis(40),
        ..DropdownConfig::default()
    };
    let json = serde_json::to_value(&c).unwrap();
    assert_eq!(json["seed_delay"], 40);
    let back: DropdownConfig = serde_json::from_value(json).unwrap();
    assert_eq!(back, c);
}
