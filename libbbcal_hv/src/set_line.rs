use std::str::FromStr;

use super::constants::SET_COMMAND;
use super::error::SetLineError;
use super::hardware_id::HvCrate;

/// Index of the first channel-value token in a set file row. Tokens 0 and 1
/// are the crate id and slot token; the two tokens after the slot are
/// metadata that every reader skips.
const FIRST_CHANNEL_TOKEN: usize = 4;

/// One parsed record of an HV set file.
///
/// The crate id is kept as the raw token: the extractor silently ignores
/// records from crates it does not know, while the channel map treats them
/// as an error. Channel values stay in text form until a caller converts
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct SetLine {
    pub crate_id: String,
    pub slot: u8,
    pub channels: Vec<String>,
}

impl FromStr for SetLine {
    type Err = SetLineError;
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err(SetLineError::IncompleteLine(line.to_string()));
        }

        // The slot token is a prefix character followed by the slot number,
        // e.g. "s2" or "S13". The slot is parsed before any crate filtering
        // so that a mangled token fails no matter which crate the line names.
        let slot_token = tokens[1];
        let slot = slot_token
            .get(1..)
            .unwrap_or("")
            .parse::<u8>()
            .map_err(|e| SetLineError::BadSlotToken {
                token: slot_token.to_string(),
                source: e,
            })?;

        let channels = tokens
            .get(FIRST_CHANNEL_TOKEN..)
            .unwrap_or(&[])
            .iter()
            .map(|t| t.to_string())
            .collect();

        Ok(SetLine {
            crate_id: tokens[0].to_string(),
            slot,
            channels,
        })
    }
}

/// Format one slot row in the on-disk record layout.
pub fn format_row(crate_id: HvCrate, slot: u8, values: &[f64]) -> String {
    let mut row = format!("{} S{} {} {}", crate_id.id(), slot, SET_COMMAND, values.len());
    for value in values {
        row.push(' ');
        row.push_str(&value.to_string());
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let line = "rpi17:2001 s2 DV 12 -903.5 -887 -910.25";
        let record = SetLine::from_str(line).unwrap();
        assert_eq!(record.crate_id, "rpi17:2001");
        assert_eq!(record.slot, 2);
        assert_eq!(record.channels, vec!["-903.5", "-887", "-910.25"]);
    }

    #[test]
    fn test_parse_line_without_channels() {
        let record = SetLine::from_str("rpi18:2001 S13 DV 0").unwrap();
        assert_eq!(record.slot, 13);
        assert!(record.channels.is_empty());
    }

    #[test]
    fn test_incomplete_line() {
        assert!(matches!(
            SetLine::from_str("rpi17:2001"),
            Err(SetLineError::IncompleteLine(_))
        ));
        assert!(matches!(
            SetLine::from_str(""),
            Err(SetLineError::IncompleteLine(_))
        ));
    }

    #[test]
    fn test_bad_slot_token() {
        assert!(matches!(
            SetLine::from_str("rpi17:2001 slot2 DV 12 -900"),
            Err(SetLineError::BadSlotToken { .. })
        ));
        // A single-character slot token has no digits to parse.
        assert!(matches!(
            SetLine::from_str("rpi17:2001 s DV 12 -900"),
            Err(SetLineError::BadSlotToken { .. })
        ));
    }

    #[test]
    fn test_format_row_round_trips() {
        let row = format_row(HvCrate::Rpi18, 7, &[-1450.0, -1432.5]);
        assert_eq!(row, "rpi18:2001 S7 DV 2 -1450 -1432.5");
        let record = SetLine::from_str(&row).unwrap();
        assert_eq!(record.crate_id, "rpi18:2001");
        assert_eq!(record.slot, 7);
        assert_eq!(record.channels, vec!["-1450", "-1432.5"]);
    }
}
