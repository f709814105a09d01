use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use roxmltree::{Document, Node};

/// Token the IDE writes in place of the user's home directory.
pub const HOME_PLACEHOLDER: &str = "$USER_HOME$";
pub const RECENT_PROJECTS_COMPONENT: &str = "RecentProjectsManager";
pub const OPEN_TIMESTAMP_OPTION: &str = "projectOpenTimestamp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRecord {
    pub name: String,
    pub path: PathBuf,
    /// Milliseconds since the Unix epoch.
    pub last_opened: i64,
}

impl ProjectRecord {
    pub fn new(path: PathBuf, last_opened: i64) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Self {
            name,
            path,
            last_opened,
        }
    }
}

/// Reads a `recentProjects.xml` file. A missing, unreadable or malformed file
/// yields no records.
pub fn load_recent_projects(path: &Path, home: &Path) -> Vec<ProjectRecord> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) => {
            debug!("skipping history {}: {error}", path.display());
            return Vec::new();
        }
    };

    parse_recent_projects(&content, home)
}

pub fn parse_recent_projects(xml: &str, home: &Path) -> Vec<ProjectRecord> {
    let document = match Document::parse(xml) {
        Ok(document) => document,
        Err(error) => {
            debug!("ignoring malformed project history: {error}");
            return Vec::new();
        }
    };

    let home = home.to_string_lossy();

    document
        .descendants()
        .filter(|node| node.has_tag_name("entry"))
        .filter(|node| node.ancestors().skip(1).any(is_recent_projects_component))
        .filter_map(|entry| {
            let key = entry.attribute("key")?;
            let path = key.replace(HOME_PLACEHOLDER, &home);
            if path.is_empty() {
                return None;
            }

            let last_opened = open_timestamp(entry)?;
            Some(ProjectRecord::new(PathBuf::from(path), last_opened))
        })
        .collect()
}

fn is_recent_projects_component(node: Node<'_, '_>) -> bool {
    node.has_tag_name("component") && node.attribute("name") == Some(RECENT_PROJECTS_COMPONENT)
}

// Older IDE builds did not record open timestamps; such entries are skipped.
fn open_timestamp(entry: Node<'_, '_>) -> Option<i64> {
    let option = entry.descendants().find(|node| {
        node.has_tag_name("option") && node.attribute("name") == Some(OPEN_TIMESTAMP_OPTION)
    })?;

    let raw = option.attribute("value")?.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            debug!("ignoring non-numeric open timestamp {raw:?}");
            None
        }
    }
}
