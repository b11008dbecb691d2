use std::path::PathBuf;
use thiserror::Error;

use super::constants::*;

#[derive(Debug, Clone, Error)]
pub enum HardwareError {
    #[error("Found invalid HV crate id: {0}")]
    UnknownCrate(String),
}

#[derive(Debug, Error)]
pub enum SetLineError {
    #[error("Set file line {0:?} is missing its crate or slot token")]
    IncompleteLine(String),
    #[error("Failed to parse slot token {token:?} as a slot number: {source}")]
    BadSlotToken {
        token: String,
        source: std::num::ParseIntError,
    },
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Extractor failed to parse a set file line: {0}")]
    BadLine(#[from] SetLineError),
    #[error("Failed to parse channel value {token:?} as a number: {source}")]
    BadChannelValue {
        token: String,
        source: std::num::ParseFloatError,
    },
}

#[derive(Debug, Error)]
pub enum ChannelMapError {
    #[error("HvChannelMap failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("HvChannelMap failed to parse a set file line: {0}")]
    BadLine(#[from] SetLineError),
    #[error("HvChannelMap failed due to hardware error: {0}")]
    BadCrate(#[from] HardwareError),
    #[error("HvChannelMap found slot {0}; a mainframe has slots 0 to {max}", max = NUM_SLOTS - 1)]
    SlotOutOfRange(u8),
    #[error("HvChannelMap found {found} channel values in slot {slot}; a slot card has {max}", max = CHANNELS_PER_SLOT)]
    TooManyChannels { slot: u8, found: usize },
    #[error("HvChannelMap failed to parse channel value {token:?}: {source}")]
    BadChannelValue {
        token: String,
        source: std::num::ParseFloatError,
    },
}

#[derive(Debug, Error)]
pub enum CombineError {
    #[error("Combiner failed due to HvChannelMap error: {0}")]
    MapError(#[from] ChannelMapError),
    #[error("Combiner failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ShiftError {
    #[error("Shifter could not find HV file {0:?}")]
    BadFilePath(PathBuf),
    #[error("Shifter failed due to HvChannelMap error: {0}")]
    MapError(#[from] ChannelMapError),
    #[error("Shifter failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Processor failed due to Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Processor failed due to extraction error: {0}")]
    ExtractError(#[from] ExtractError),
    #[error("Processor failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
}
