use std::path::PathBuf;

use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::RuntimeConfig;
use crate::generation::{history_file, select_generation};
use crate::history::{ProjectRecord, load_recent_projects};
use crate::registry::{APPLICATIONS, AppDescriptor};
use crate::resolver::{ResolvedApp, resolve_installed};

const QUERY_REGEX_SIZE_LIMIT: usize = 1 << 20;

/// A project paired with the IDE that reopens it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedProject {
    pub app: ResolvedApp,
    pub project: ProjectRecord,
}

/// Case-insensitive regex search over project names.
///
/// An empty query matches everything. Any other query, whitespace included,
/// is used as the pattern as given. A query that does not compile as a
/// regex, or compiles too large, matches nothing.
#[derive(Debug, Clone)]
pub enum QueryMatcher {
    Any,
    Pattern(Regex),
    Never,
}

impl QueryMatcher {
    pub fn new(query: &str) -> Self {
        if query.is_empty() {
            return Self::Any;
        }

        match RegexBuilder::new(query)
            .case_insensitive(true)
            .size_limit(QUERY_REGEX_SIZE_LIMIT)
            .dfa_size_limit(QUERY_REGEX_SIZE_LIMIT)
            .build()
        {
            Ok(regex) => Self::Pattern(regex),
            Err(error) => {
                debug!("query {query:?} is not a usable pattern: {error}");
                Self::Never
            }
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Pattern(regex) => regex.is_match(name),
            Self::Never => false,
        }
    }
}

/// Query engine over every installed IDE family.
///
/// Installed launchers are resolved once per configuration. Project history
/// is re-read on every search.
#[derive(Debug, Clone)]
pub struct ProjectFinder {
    apps: Vec<ResolvedApp>,
    config_root: PathBuf,
    home: PathBuf,
    item_limit: usize,
}

impl ProjectFinder {
    pub fn new(config: &RuntimeConfig) -> Self {
        Self::with_registry(APPLICATIONS, config)
    }

    pub fn with_registry(registry: &'static [AppDescriptor], config: &RuntimeConfig) -> Self {
        Self {
            apps: resolve_installed(registry, &config.binaries_dir),
            config_root: config.config_root(),
            home: config.home.clone(),
            item_limit: config.item_limit,
        }
    }

    /// Replaces the resolved state with one built from `config`. The new
    /// finder is fully built before it replaces the old one.
    pub fn reconfigure(&mut self, config: &RuntimeConfig) {
        *self = Self::new(config);
    }

    pub fn installed(&self) -> &[ResolvedApp] {
        &self.apps
    }

    pub fn item_limit(&self) -> usize {
        self.item_limit
    }

    pub fn generation_for(&self, app: &ResolvedApp) -> Option<PathBuf> {
        select_generation(&self.config_root, app.descriptor.config_dir_prefix)
    }

    /// Every recorded project of `app`, stale entries included.
    pub fn history_for(&self, app: &ResolvedApp) -> Vec<ProjectRecord> {
        let Some(generation) = self.generation_for(app) else {
            debug!("{}: no configuration generation", app.name());
            return Vec::new();
        };

        load_recent_projects(&history_file(&generation), &self.home)
    }

    pub fn search(&self, query: &str) -> Vec<RankedProject> {
        let matcher = QueryMatcher::new(query);

        let mut candidates = Vec::new();
        for app in &self.apps {
            for project in self.history_for(app) {
                if !project.path.exists() || !matcher.matches(&project.name) {
                    continue;
                }

                candidates.push(RankedProject {
                    app: app.clone(),
                    project,
                });
            }
        }

        rank_projects(candidates, self.item_limit)
    }
}

/// Merges candidates from every IDE, newest first, keeping at most `limit`.
/// The sort is stable, so equal timestamps keep their input order.
pub fn rank_projects<I>(candidates: I, limit: usize) -> Vec<RankedProject>
where
    I: IntoIterator<Item = RankedProject>,
{
    let mut ranked: Vec<RankedProject> = candidates.into_iter().collect();
    ranked.sort_by(|left, right| right.project.last_opened.cmp(&left.project.last_opened));
    ranked.truncate(limit);
    ranked
}
