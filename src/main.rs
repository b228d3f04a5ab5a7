// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The main stationbeam binary.

use clap::Parser;

use stationbeam::Stationbeam;

fn main() {
    // Stick the whole main function in a function so that errors can be
    // displayed rather than debug-printed.
    if let Err(e) = Stationbeam::parse().run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
