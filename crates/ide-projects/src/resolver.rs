use std::path::{Path, PathBuf};

use log::debug;

use crate::registry::AppDescriptor;

/// An IDE family with a launcher binary present on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedApp {
    pub descriptor: &'static AppDescriptor,
    pub binary: PathBuf,
}

impl ResolvedApp {
    pub fn name(&self) -> &'static str {
        self.descriptor.name
    }
}

/// Returns the first candidate name, in registry order, that exists as a
/// regular file under `binaries_dir`.
pub fn resolve_binary(descriptor: &AppDescriptor, binaries_dir: &Path) -> Option<PathBuf> {
    descriptor
        .binaries
        .iter()
        .map(|name| binaries_dir.join(name))
        .find(|candidate| candidate.is_file())
}

pub fn resolve_installed(
    apps: &'static [AppDescriptor],
    binaries_dir: &Path,
) -> Vec<ResolvedApp> {
    apps.iter()
        .filter_map(|descriptor| match resolve_binary(descriptor, binaries_dir) {
            Some(binary) => {
                debug!("{}: using launcher {}", descriptor.name, binary.display());
                Some(ResolvedApp { descriptor, binary })
            }
            None => {
                debug!("{}: not installed", descriptor.name);
                None
            }
        })
        .collect()
}
