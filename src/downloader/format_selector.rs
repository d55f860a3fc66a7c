// FormatSelector - reduces the engine's raw format list for `/formats`
//
// Keeps muxed formats (video and audio in one file), one per resolution,
// highest resolution first.

use std::cmp::Reverse;
use std::collections::HashSet;

use super::models::{EngineFormat, FormatEntry};

/// Most entries returned to the caller
pub const MAX_FORMATS: usize = 10;

const UNKNOWN: &str = "unknown";

pub struct FormatSelector;

impl FormatSelector {
    /// Filter, deduplicate (first seen wins), sort and cap the format list
    pub fn select(formats: &[EngineFormat]) -> Vec<FormatEntry> {
        let mut seen_resolutions = HashSet::new();

        let mut entries: Vec<FormatEntry> = formats
            .iter()
            .filter(|f| f.has_video() && f.has_audio())
            .filter_map(|f| {
                let resolution = f.resolution.clone().unwrap_or_else(|| UNKNOWN.to_string());
                if !seen_resolutions.insert(resolution.clone()) {
                    return None;
                }

                Some(FormatEntry {
                    format_id: f.format_id.clone(),
                    ext: f.ext.clone(),
                    resolution,
                    filesize: f.filesize,
                    quality: f.format_note.clone().unwrap_or_else(|| UNKNOWN.to_string()),
                })
            })
            .collect();

        // stable, so equal heights keep engine order
        entries.sort_by_key(|entry| Reverse(Self::height(&entry.resolution)));
        entries.truncate(MAX_FORMATS);
        entries
    }

    /// Height from a "<width>x<height>" string; 0 when there is none
    pub fn height(resolution: &str) -> u32 {
        resolution
            .split_once('x')
            .and_then(|(_, height)| height.trim().parse().ok())
            .unwrap_or(0)
    }
}
