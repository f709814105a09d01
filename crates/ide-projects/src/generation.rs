use std::ffi::OsString;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

const OPTIONS_DIR: &str = "options";
const RECENT_PROJECTS_FILE: &str = "recentProjects.xml";

/// Picks the configuration directory of the newest installed generation.
///
/// Candidates are the directories directly under `config_root` whose path
/// starts with `prefix` (e.g. `JetBrains/CLion` matches
/// `JetBrains/CLion2024.1`). The lexicographically greatest name wins. This is
/// a plain string comparison, so `CLion-10.0` sorts before `CLion-2.1`.
pub fn select_generation(config_root: &Path, prefix: &str) -> Option<PathBuf> {
    let prefix = Path::new(prefix);
    let stem = prefix.file_name()?.to_string_lossy().to_string();
    let parent = match prefix.parent() {
        Some(parent) => config_root.join(parent),
        None => config_root.to_path_buf(),
    };

    if !parent.is_dir() {
        debug!("no configuration directory at {}", parent.display());
        return None;
    }

    let walker = WalkDir::new(&parent)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .into_iter();

    let mut candidates: Vec<(OsString, PathBuf)> = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue,
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        if !entry.file_name().to_string_lossy().starts_with(&stem) {
            continue;
        }

        candidates.push((entry.file_name().to_os_string(), entry.into_path()));
    }

    candidates.sort_by(|(left, _), (right, _)| left.cmp(right));
    candidates.pop().map(|(_, path)| path)
}

pub fn history_file(generation_dir: &Path) -> PathBuf {
    generation_dir.join(OPTIONS_DIR).join(RECENT_PROJECTS_FILE)
}
