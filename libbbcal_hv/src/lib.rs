//! # bbcal_hv
//!
//! bbcal_hv is a toolkit for the high-voltage set files of the BigBite
//! calorimeter, written in Rust. The HV distribution crates are tuned
//! between calibration runs, and every tune is captured as a plain-text
//! `.set` file under `hv_set/`. This workspace reads those files, pulls out
//! the shower channel set points, and overlays them across runs as a scatter
//! plot so a drifting or mistyped channel is visible at a glance. It also
//! covers the two bookkeeping chores that go with retuning: shifting every
//! set point by a fixed offset, and merging separately tuned shower and
//! preshower files into the single file the HV control software loads.
//!
//! ## Installation
//!
//! To build and install the GUI use `cargo install --path ./bbcal_hv` from
//! the top level bbcal_hv repository.
//!
//! To build and install the CLI use `cargo install --path ./bbcal_hv_cli`
//! from the top level bbcal_hv repository.
//!
//! These binaries will be installed to your cargo install location
//! (typically something like `~/.cargo/bin/`), so you can simply invoke
//! them from the command line.
//!
//! ## Set file format
//!
//! One slot card per line, whitespace separated:
//!
//! ```text
//! crate-id slot-token command channel-count value value ...
//! ```
//!
//! - `crate-id` is the mainframe's host:port identifier; the detector is fed
//!   by `rpi17:2001` and `rpi18:2001`.
//! - `slot-token` is a prefix character followed by the slot number, e.g.
//!   `S2`.
//! - The command and channel-count tokens are skipped by every reader; the
//!   writers emit `DV` and `12`.
//! - The remaining tokens are the channel set points in channel order.
//!
//! Lines beginning with `#` are comments. The whole-file reader
//! ([`channel_map::HvChannelMap`]) skips them; the shower extractor
//! ([`extract::extract_shower_hv`]) predates the comment convention and
//! fails fast on anything it cannot tokenize, as it does on every other
//! malformed line. These are trusted, hand-maintained files and a silently
//! skipped line would hide a damaged setting.
//!
//! ## Configuration
//!
//! The overlay plot is driven by a YAML configuration, editable in the GUI
//! (File->Open / File->Save) and shared with the CLI:
//!
//! ```yml
//! hv_set_path: hv_set
//! title: BBCal Shower HV overlay
//! x_label: Channel index
//! y_label: HV set point (V)
//! series:
//! - file: hv_calibrated_run_11845_15mV_11_18_2021.set
//!   label: run 11845
//!   color: Blue
//! - file: run_11900_hv.set
//!   label: run 11900
//!   color: Red
//! ```
//!
//! Each series is one set file, read from `hv_set_path`, extracted and
//! drawn in the listed order. One series reproduces the single-run plot;
//! several give the overlay with a legend.
//!
//! ## Output
//!
//! The GUI opens an interactive plot window. The CLI renders the same
//! overlay to a PNG, and its `shift`/`combine` subcommands write new `.set`
//! files next to their inputs. Both frontends log through spdlog; the GUI
//! writes `bbcal_hv.log` beside the binary and reports errors in a dialog.
pub mod channel_map;
pub mod combine;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod hardware_id;
pub mod process;
pub mod series;
pub mod set_line;
pub mod shift;
