//! The shower channel extractor.
//!
//! Walks the lines of one HV set file and accumulates the channel values
//! belonging to the shower PMTs, in line order. The shower occupies different
//! channel ranges depending on the crate and slot:
//!
//! - rpi17: slot 2 carries shower channels from channel 3 onward, slots 3-8
//!   are entirely shower, every other slot contributes its first 3 channels.
//! - rpi18: slots 5-12 are entirely shower, slot 13 contributes its first 9
//!   channels, the rest of the crate contributes nothing.
//!
//! Values come back as text tokens; [`parse_hv_values`] converts them. Any
//! malformed line aborts the whole extraction, there is no recovery. The
//! input files are hand maintained and a silent skip would hide a damaged
//! setting.

use std::str::FromStr;

use super::error::ExtractError;
use super::hardware_id::HvCrate;
use super::set_line::SetLine;

/// Extract the shower HV channel tokens from the lines of one set file.
///
/// Tokens come back in line order. The accumulated sequence index is the
/// channel axis of the overlay plot.
pub fn extract_shower_hv<'a, I>(lines: I) -> Result<Vec<String>, ExtractError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut shower: Vec<String> = Vec::new();
    for line in lines {
        let record = SetLine::from_str(line)?;
        let chan = record.channels.as_slice();
        match HvCrate::from_str(&record.crate_id) {
            Ok(HvCrate::Rpi17) => {
                if record.slot == 2 {
                    // A slot 2 row restarts the accumulation with its tail
                    // instead of appending. Slot 2 is the first shower row in
                    // a well-formed file, so nothing is lost there.
                    shower = chan.get(3..).unwrap_or(&[]).to_vec();
                } else if record.slot > 2 && record.slot < 9 {
                    shower.extend_from_slice(chan);
                } else {
                    shower.extend_from_slice(chan.get(..3).unwrap_or(chan));
                }
            }
            Ok(HvCrate::Rpi18) => {
                if record.slot > 4 && record.slot < 13 {
                    shower.extend_from_slice(chan);
                } else if record.slot == 13 {
                    shower.extend_from_slice(chan.get(..9).unwrap_or(chan));
                }
            }
            // Rows addressed to other hardware contribute nothing, but they
            // still had to tokenize to get here.
            Err(_) => (),
        }
    }
    Ok(shower)
}

/// Convert extracted channel tokens to numbers with a strict float parse.
pub fn parse_hv_values(tokens: &[String]) -> Result<Vec<f64>, ExtractError> {
    tokens
        .iter()
        .map(|token| {
            token
                .parse::<f64>()
                .map_err(|e| ExtractError::BadChannelValue {
                    token: token.clone(),
                    source: e,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(lines: &[&str]) -> Vec<String> {
        extract_shower_hv(lines.iter().copied()).unwrap()
    }

    #[test]
    fn test_rpi17_slot2_resets_accumulation() {
        // The slot 5 row accumulates first, then the slot 2 row discards it
        // and keeps only its own tail from channel 3 onward.
        let result = extract(&[
            "rpi17:2001 s5 DV 12 x1 y1",
            "rpi17:2001 s2 DV 12 a b c d e",
        ]);
        assert_eq!(result, vec!["d", "e"]);
    }

    #[test]
    fn test_rpi17_inner_slots_append_everything() {
        let result = extract(&["rpi17:2001 s5 DV 12 a b c d"]);
        assert_eq!(result, vec!["a", "b", "c", "d"]);
        let result = extract(&["rpi17:2001 s3 DV 12 a", "rpi17:2001 s8 DV 12 b c"]);
        assert_eq!(result, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rpi17_outer_slots_append_first_three() {
        let result = extract(&["rpi17:2001 s10 DV 12 a b c d e"]);
        assert_eq!(result, vec!["a", "b", "c"]);
        let result = extract(&["rpi17:2001 s0 DV 12 a b"]);
        assert_eq!(result, vec!["a", "b"]);
    }

    #[test]
    fn test_rpi18_selection() {
        let result = extract(&["rpi18:2001 s7 DV 12 a b c"]);
        assert_eq!(result, vec!["a", "b", "c"]);
        let result = extract(&[
            "rpi18:2001 s13 DV 12 a b c d e f g h i j k l",
        ]);
        assert_eq!(result, vec!["a", "b", "c", "d", "e", "f", "g", "h", "i"]);
        assert!(extract(&["rpi18:2001 s4 DV 12 a b"]).is_empty());
        assert!(extract(&["rpi18:2001 s14 DV 12 a b"]).is_empty());
    }

    #[test]
    fn test_unknown_crate_contributes_nothing() {
        assert!(extract(&["rpi99:9999 s5 DV 12 a b c"]).is_empty());
        // A bad slot token still fails, even on an unknown crate.
        assert!(extract_shower_hv(["rpi99:9999 sXY DV 12 a"]).is_err());
    }

    #[test]
    fn test_malformed_lines_abort() {
        assert!(extract_shower_hv(["rpi17:2001"]).is_err());
        assert!(extract_shower_hv([""]).is_err());
        assert!(extract_shower_hv(["rpi17:2001 sQ DV 12 1.0"]).is_err());
    }

    #[test]
    fn test_end_to_end_extraction() {
        let lines = [
            "rpi17:2001 s2 x x a b c d e",
            "rpi17:2001 s5 x x f g",
            "rpi99:9999 s1 x x z",
        ];
        let tokens = extract_shower_hv(lines).unwrap();
        assert_eq!(tokens, vec!["d", "e", "f", "g"]);
    }

    #[test]
    fn test_numeric_conversion() {
        let tokens = vec![
            String::from("-903.5"),
            String::from("-887"),
            String::from("0"),
        ];
        let values = parse_hv_values(&tokens).unwrap();
        assert_eq!(values, vec![-903.5, -887.0, 0.0]);

        let bad = vec![String::from("-903.5"), String::from("12..0")];
        match parse_hv_values(&bad) {
            Err(ExtractError::BadChannelValue { token, .. }) => assert_eq!(token, "12..0"),
            _ => panic!(),
        }
    }
}
