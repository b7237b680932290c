//! # Persistence Module
//!
//! The textual save format and the file helpers around it.
//!
//! A save file holds, in order and separated by single blank lines: the
//! player header and inventory, the room blocks (each closed by `---`), and
//! the exit records `<from> <direction> <to>` that index into the rooms.

pub mod decoder;
pub mod encoder;

pub use decoder::*;
pub use encoder::*;

use crate::game::{Dungeon, Player, RoomId};
use crate::CrawlResult;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Writes a save file for everything reachable from `start`.
///
/// The document goes to a temporary sibling first and is renamed into place,
/// so a failed save never leaves a partial file at `path`.
pub fn save_map(path: impl AsRef<Path>, dungeon: &Dungeon, start: RoomId, player: &Player) -> CrawlResult<()> {
    let path = path.as_ref();
    let text = encode(dungeon, start, player)?;
    let temp_path = temp_sibling(path);

    let written = fs::write(&temp_path, &text).and_then(|_| fs::rename(&temp_path, path));
    if let Err(e) = written {
        warn!("Failed to save {}: {}", path.display(), e);
        let _ = fs::remove_file(&temp_path);
        return Err(e.into());
    }

    info!("Saved {} bytes to {}", text.len(), path.display());
    Ok(())
}

/// Reads and decodes a save file.
pub fn load_map(path: impl AsRef<Path>) -> CrawlResult<SaveGame> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    match decode(&text) {
        Ok(save) => {
            info!(
                "Loaded {} rooms from {}",
                save.dungeon.len(),
                path.display()
            );
            Ok(save)
        }
        Err(e) => {
            warn!("Rejected save {}: {}", path.display(), e);
            Err(e)
        }
    }
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "save".to_string());
    path.with_file_name(format!(".{}.tmp", name))
}
