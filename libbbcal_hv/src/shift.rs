//! Moving every HV set point by a fixed offset, for raising or lowering the
//! whole detector gain between calibration runs.

use std::path::{Path, PathBuf};

use super::channel_map::HvChannelMap;
use super::constants::{CHANNELS_PER_SLOT, NUM_SLOTS};
use super::error::ShiftError;
use super::hardware_id::{slot_in_service, HvCrate};

/// Channels that keep their set point when the rest of the detector moves.
/// The tail of rpi17 slot 9 powers reference hardware that is never retuned.
fn is_shift_exempt(crate_id: HvCrate, slot: u8, channel: usize) -> bool {
    crate_id == HvCrate::Rpi17 && slot == 9 && channel > 2
}

/// Subtract `shift_mv` from every non-exempt in-service channel.
pub fn shift_map(map: &HvChannelMap, shift_mv: f64) -> HvChannelMap {
    let mut shifted = HvChannelMap::default();
    for crate_id in HvCrate::all() {
        for slot in 0..NUM_SLOTS {
            if !slot_in_service(crate_id, slot) {
                continue;
            }
            for channel in 0..CHANNELS_PER_SLOT {
                let value = map.get(crate_id, slot, channel);
                let value = if is_shift_exempt(crate_id, slot, channel) {
                    value
                } else {
                    value - shift_mv
                };
                shifted.set(crate_id, slot, channel, value);
            }
        }
    }
    shifted
}

/// Output file name for a shifted set, with the offset direction spelled out.
fn shifted_file_name(run_number: i32, shift_mv: f64) -> String {
    if shift_mv > 0.0 {
        format!("run_{}_hv_plus{:.1}mV.set", run_number, shift_mv)
    } else {
        format!("run_{}_hv_minus{:.1}mV.set", run_number, shift_mv.abs())
    }
}

/// Read `run_<n>_hv.set` from the hv_set directory, shift it, and write the
/// result next to it.
///
/// Returns the path of the written file.
pub fn shift_run(hv_set_dir: &Path, run_number: i32, shift_mv: f64) -> Result<PathBuf, ShiftError> {
    let input = hv_set_dir.join(format!("run_{}_hv.set", run_number));
    if !input.exists() {
        return Err(ShiftError::BadFilePath(input));
    }
    spdlog::info!("Read HV file {}", input.display());

    let map = HvChannelMap::from_file(&input)?;
    let shifted = shift_map(&map, shift_mv);
    let out_path = hv_set_dir.join(shifted_file_name(run_number, shift_mv));
    std::fs::write(&out_path, shifted.to_set_string())?;
    spdlog::info!("Updated HV written to {}", out_path.display());
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_applies_everywhere_but_exemptions() {
        let mut map = HvChannelMap::default();
        map.set(HvCrate::Rpi17, 5, 0, -1000.0);
        map.set(HvCrate::Rpi17, 9, 2, -800.0);
        map.set(HvCrate::Rpi17, 9, 3, -800.0);
        map.set(HvCrate::Rpi18, 13, 11, -400.0);

        let shifted = shift_map(&map, 15.0);
        assert_eq!(shifted.get(HvCrate::Rpi17, 5, 0), -1015.0);
        assert_eq!(shifted.get(HvCrate::Rpi17, 9, 2), -815.0);
        // Exempt channel holds its value
        assert_eq!(shifted.get(HvCrate::Rpi17, 9, 3), -800.0);
        assert_eq!(shifted.get(HvCrate::Rpi18, 13, 11), -415.0);
    }

    #[test]
    fn test_negative_shift_raises_values() {
        let mut map = HvChannelMap::default();
        map.set(HvCrate::Rpi18, 7, 1, -1000.0);
        let shifted = shift_map(&map, -25.0);
        assert_eq!(shifted.get(HvCrate::Rpi18, 7, 1), -975.0);
    }

    #[test]
    fn test_output_naming() {
        assert_eq!(
            shifted_file_name(11845, 15.0),
            "run_11845_hv_plus15.0mV.set"
        );
        assert_eq!(
            shifted_file_name(11845, -7.25),
            "run_11845_hv_minus7.2mV.set"
        );
        assert_eq!(shifted_file_name(300, 0.0), "run_300_hv_minus0.0mV.set");
    }
}
