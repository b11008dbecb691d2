//! Fixed geometry of the BBCal HV distribution hardware.

/// Number of HV mainframes feeding the calorimeter.
pub const NUM_CRATES: usize = 2;
/// Module slots per mainframe.
pub const NUM_SLOTS: u8 = 16;
/// HV channels on one slot card.
pub const CHANNELS_PER_SLOT: usize = 12;
/// Command token written in the third column of a set file row.
pub const SET_COMMAND: &str = "DV";
