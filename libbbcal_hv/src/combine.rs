//! Merging separately tuned shower and preshower set files into the single
//! crate-wide file the HV control software loads.

use std::path::{Path, PathBuf};

use time::OffsetDateTime;

use super::channel_map::HvChannelMap;
use super::constants::{CHANNELS_PER_SLOT, NUM_SLOTS};
use super::error::CombineError;
use super::hardware_id::{is_preshower_channel, slot_in_service, HvCrate};

/// Merge a shower map and a preshower map into one crate-wide map.
///
/// Preshower cards own the channels the shower extractor skips; every other
/// in-service channel keeps its shower value.
pub fn combine_maps(shower: &HvChannelMap, preshower: &HvChannelMap) -> HvChannelMap {
    let mut combined = HvChannelMap::default();
    for crate_id in HvCrate::all() {
        for slot in 0..NUM_SLOTS {
            if !slot_in_service(crate_id, slot) {
                continue;
            }
            for channel in 0..CHANNELS_PER_SLOT {
                let source = if is_preshower_channel(crate_id, slot, channel) {
                    preshower
                } else {
                    shower
                };
                combined.set(crate_id, slot, channel, source.get(crate_id, slot, channel));
            }
        }
    }
    combined
}

/// Date suffix appended to combined file names, m_d_yyyy.
fn date_suffix() -> String {
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    format!("{}_{}_{}", u8::from(now.month()), now.day(), now.year())
}

/// Read a shower and a preshower set file from the hv_set directory, merge
/// them, and write `<output_name>_<date>.set` next to them.
///
/// Returns the path of the written file.
pub fn combine_files(
    hv_set_dir: &Path,
    shower_file: &str,
    preshower_file: &str,
    output_name: &str,
) -> Result<PathBuf, CombineError> {
    let shower = HvChannelMap::from_file(&hv_set_dir.join(shower_file))?;
    spdlog::info!("Read shower HV file {}", shower_file);
    let preshower = HvChannelMap::from_file(&hv_set_dir.join(preshower_file))?;
    spdlog::info!("Read preshower HV file {}", preshower_file);

    let combined = combine_maps(&shower, &preshower);
    let out_path = hv_set_dir.join(format!("{}_{}.set", output_name, date_suffix()));
    std::fs::write(&out_path, combined.to_set_string())?;
    spdlog::info!("Combined HV written to {}", out_path.display());
    Ok(out_path)
}
