// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Insists on exactly one board. The binary picks its `Board` type from
//! whichever `target-board-*` feature is on, so none, or two, would either
//! fail there with a confusing name-resolution error or build the wrong pin
//! map.

const BOARDS: &str = "target-board-scuznet, target-board-scuznet-lite";

fn main() {
    let mut target_board: Option<String> = None;

    for (name, _) in std::env::vars() {
        let prefix = "CARGO_FEATURE_TARGET_BOARD_";
        if let Some(suffix) = name.strip_prefix(prefix) {
            if let Some(previous) = &target_board {
                panic!(
                    "phycheck is built for one board at a time, but both {} and {} \
                     are enabled; use --no-default-features to drop the default",
                    show_feature(previous),
                    show_feature(suffix)
                );
            }

            target_board = Some(suffix.to_string());
        }
    }

    if target_board.is_none() {
        panic!("no board selected; enable one of: {BOARDS}");
    }
}

fn show_feature(envvar: &str) -> String {
    let mut name = "target-board-".to_string();
    name.push_str(&envvar.to_ascii_lowercase().replace('_', "-"));
    name
}
