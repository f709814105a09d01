//! Recently opened IDE project modules.
//!
//! - `registry`: static catalog of supported IDE families.
//! - `config`: environment parsing, home expansion, platform config roots.
//! - `resolver`: locate an installed launcher binary per family.
//! - `generation`: pick the newest configuration directory per family.
//! - `history`: parse `recentProjects.xml` into project records.
//! - `engine`: scan, filter, merge and rank projects across families.
//! - `launch`: shell command that reopens a project.
//! - `feedback`: Alfred item assembly.
//! - `output_contract`: CLI output modes and JSON envelopes.

pub mod config;
pub mod engine;
pub mod feedback;
pub mod generation;
pub mod history;
pub mod launch;
pub mod output_contract;
pub mod registry;
pub mod resolver;

pub use alfred_core::{Feedback, Item};
pub use config::{
    ConfigError, DEFAULT_BINARIES_DIR, DEFAULT_ITEM_LIMIT, Platform, RuntimeConfig,
    expand_home_tokens,
};
pub use engine::{ProjectFinder, QueryMatcher, RankedProject, rank_projects};
pub use feedback::{
    build_feedback, build_script_filter_feedback, is_no_projects_feedback, no_projects_feedback,
};
pub use generation::{history_file, select_generation};
pub use history::{ProjectRecord, load_recent_projects, parse_recent_projects};
pub use launch::LaunchCommand;
pub use output_contract::{
    OutputMode, build_error_envelope, build_success_envelope, error_details,
    select_output_mode,
};
pub use registry::{APPLICATIONS, AppDescriptor, find_application};
pub use resolver::{ResolvedApp, resolve_binary, resolve_installed};
