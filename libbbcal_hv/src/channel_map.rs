// The set file is row oriented (one slot per line) but combining and
// shifting want random access by address, so the whole file is flattened
// into a uuid-keyed map:
// [crate, slot, channel] -> value
// Channels that never appear in the file read back as 0.0, which is also
// what the writer emits for them.
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use fxhash::FxHashMap;

use super::constants::{CHANNELS_PER_SLOT, NUM_SLOTS};
use super::error::ChannelMapError;
use super::hardware_id::{generate_uuid, slot_in_service, HvCrate};
use super::set_line::{format_row, SetLine};

/// HvChannelMap holds the HV set point of every (crate, slot, channel) address
/// found in one set file.
///
/// Unlike the shower extractor, this reader covers the whole file: every known
/// crate, every slot, shower and preshower channels alike. Lines whose first
/// token starts with `#` are comments and are skipped; an unknown crate id is
/// an error here because there is no sane slot to file it under.
#[derive(Debug, Clone, Default)]
pub struct HvChannelMap {
    map: FxHashMap<u64, f64>,
}

impl HvChannelMap {
    /// Read a set file into a new HvChannelMap
    pub fn from_file(path: &Path) -> Result<Self, ChannelMapError> {
        let mut contents = String::new();
        let mut file = File::open(path)?;
        file.read_to_string(&mut contents)?;
        Self::from_lines(contents.lines())
    }

    /// Parse set file lines into a new HvChannelMap
    pub fn from_lines<'a, I>(lines: I) -> Result<Self, ChannelMapError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut hv = HvChannelMap::default();
        for line in lines {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let record = SetLine::from_str(line)?;
            let crate_id = HvCrate::from_str(&record.crate_id)?;
            if record.slot >= NUM_SLOTS {
                return Err(ChannelMapError::SlotOutOfRange(record.slot));
            }
            if record.channels.len() > CHANNELS_PER_SLOT {
                return Err(ChannelMapError::TooManyChannels {
                    slot: record.slot,
                    found: record.channels.len(),
                });
            }

            for (channel, token) in record.channels.iter().enumerate() {
                let value =
                    token
                        .parse::<f64>()
                        .map_err(|e| ChannelMapError::BadChannelValue {
                            token: token.clone(),
                            source: e,
                        })?;
                hv.map.insert(generate_uuid(crate_id, record.slot, channel), value);
            }
        }
        Ok(hv)
    }

    /// Set point at an address. Channels absent from the source file read
    /// back as 0.0.
    pub fn get(&self, crate_id: HvCrate, slot: u8, channel: usize) -> f64 {
        self.map
            .get(&generate_uuid(crate_id, slot, channel))
            .copied()
            .unwrap_or(0.0)
    }

    pub fn set(&mut self, crate_id: HvCrate, slot: u8, channel: usize, value: f64) {
        self.map.insert(generate_uuid(crate_id, slot, channel), value);
    }

    /// Render the in-service slots back into the on-disk record layout, one
    /// full slot card (12 values) per row.
    pub fn to_set_string(&self) -> String {
        let mut out = String::new();
        for crate_id in HvCrate::all() {
            for slot in 0..NUM_SLOTS {
                if !slot_in_service(crate_id, slot) {
                    continue;
                }
                let values: Vec<f64> = (0..CHANNELS_PER_SLOT)
                    .map(|channel| self.get(crate_id, slot, channel))
                    .collect();
                out.push_str(&format_row(crate_id, slot, &values));
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_comments() {
        let lines = [
            "# calibrated 15mV above nominal",
            "",
            "rpi17:2001 S2 DV 12 -903.5 -887 -910.25",
            "rpi18:2001 S13 DV 12 -1450 -1432.5",
        ];
        let map = HvChannelMap::from_lines(lines).unwrap();
        assert_eq!(map.get(HvCrate::Rpi17, 2, 0), -903.5);
        assert_eq!(map.get(HvCrate::Rpi17, 2, 2), -910.25);
        assert_eq!(map.get(HvCrate::Rpi18, 13, 1), -1432.5);
        // Unpopulated address
        assert_eq!(map.get(HvCrate::Rpi18, 13, 11), 0.0);
    }

    #[test]
    fn test_unknown_crate_is_an_error() {
        let result = HvChannelMap::from_lines(["rpi99:9999 S2 DV 12 -903.5"]);
        assert!(matches!(result, Err(ChannelMapError::BadCrate(_))));
    }

    #[test]
    fn test_slot_bounds() {
        let result = HvChannelMap::from_lines(["rpi17:2001 S16 DV 12 -903.5"]);
        assert!(matches!(result, Err(ChannelMapError::SlotOutOfRange(16))));
    }

    #[test]
    fn test_channel_overflow() {
        let line = format!("rpi17:2001 S2 DV 13 {}", vec!["-900"; 13].join(" "));
        let result = HvChannelMap::from_lines([line.as_str()]);
        assert!(matches!(
            result,
            Err(ChannelMapError::TooManyChannels { slot: 2, found: 13 })
        ));
    }

    #[test]
    fn test_bad_value() {
        let result = HvChannelMap::from_lines(["rpi17:2001 S2 DV 12 -903.5 volts"]);
        match result {
            Err(ChannelMapError::BadChannelValue { token, .. }) => assert_eq!(token, "volts"),
            _ => panic!(),
        }
    }

    #[test]
    fn test_writer_round_trips() {
        let mut map = HvChannelMap::default();
        map.set(HvCrate::Rpi17, 3, 0, -1100.5);
        map.set(HvCrate::Rpi18, 13, 9, -250.0);
        let rendered = map.to_set_string();
        // 10 in-service slots on rpi17 plus 11 on rpi18
        assert_eq!(rendered.lines().count(), 21);
        let reread = HvChannelMap::from_lines(rendered.lines()).unwrap();
        assert_eq!(reread.get(HvCrate::Rpi17, 3, 0), -1100.5);
        assert_eq!(reread.get(HvCrate::Rpi18, 13, 9), -250.0);
        assert_eq!(reread.get(HvCrate::Rpi17, 9, 11), 0.0);
    }
}
