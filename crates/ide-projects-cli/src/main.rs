use chrono::{DateTime, Local};
use clap::{Parser, Subcommand, ValueEnum};
use env_logger::{Env, Target};
use ide_projects::{
    ConfigError, OutputMode, ProjectFinder, RankedProject,
    RuntimeConfig, build_error_envelope, build_feedback, build_success_envelope, error_details,
    find_application, select_output_mode,
};
use log::debug;

const LOG_ENV: &str = "IDE_PROJECTS_LOG";

#[derive(Debug, Parser)]
#[command(author, version, about = "Recently opened IDE projects for Alfred")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render Alfred script-filter JSON of recent projects.
    ScriptFilter {
        /// Case-insensitive regex matched against project names.
        #[arg(long, short, default_value = "", allow_hyphen_values = true)]
        query: String,
        /// Explicit output mode (`human`, `json`, `alfred-json`).
        #[arg(long, value_enum)]
        output: Option<OutputModeArg>,
        /// Shorthand for `--output json`.
        #[arg(long)]
        json: bool,
    },
    /// Show installed IDEs with their launcher and active configuration.
    ListApps {
        /// Only show this IDE (e.g. `CLion`).
        #[arg(long)]
        app: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputModeArg {
    Human,
    Json,
    AlfredJson,
}

impl From<OutputModeArg> for OutputMode {
    fn from(value: OutputModeArg) -> Self {
        match value {
            OutputModeArg::Human => OutputMode::Human,
            OutputModeArg::Json => OutputMode::Json,
            OutputModeArg::AlfredJson => OutputMode::AlfredJson,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ErrorKind {
    User,
    Runtime,
}

#[derive(Debug)]
struct AppError {
    kind: ErrorKind,
    code: &'static str,
    message: String,
}

impl AppError {
    fn user(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::User,
            code,
            message: message.into(),
        }
    }

    fn runtime(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Runtime,
            code,
            message: message.into(),
        }
    }

    fn from_config(error: ConfigError) -> Self {
        Self::user(ERROR_CODE_USER_INVALID_CONFIG, error.to_string())
    }

    fn exit_code(&self) -> i32 {
        match self.kind {
            ErrorKind::User => 2,
            ErrorKind::Runtime => 1,
        }
    }
}

const ERROR_CODE_USER_INVALID_CONFIG: &str = "user.invalid_config";
const ERROR_CODE_USER_OUTPUT_MODE_CONFLICT: &str = "user.output_mode_conflict";
const ERROR_CODE_USER_UNKNOWN_APP: &str = "user.unknown_app";
const ERROR_CODE_RUNTIME_SERIALIZE: &str = "runtime.serialize_failed";

const SCRIPT_FILTER_COMMAND: &str = "ide.script-filter";

impl Cli {
    fn command_name(&self) -> &'static str {
        match &self.command {
            Commands::ScriptFilter { .. } => SCRIPT_FILTER_COMMAND,
            Commands::ListApps { .. } => "ide.list-apps",
        }
    }

    fn output_mode_hint(&self) -> OutputMode {
        match &self.command {
            Commands::ScriptFilter { output, json, .. } => {
                if *json {
                    OutputMode::Json
                } else if let Some(mode) = output {
                    (*mode).into()
                } else {
                    OutputMode::AlfredJson
                }
            }
            Commands::ListApps { .. } => OutputMode::Human,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, "warn"))
        .target(Target::Stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command_name();
    let output_mode = cli.output_mode_hint();

    match run(cli) {
        Ok(stdout) => {
            println!("{stdout}");
        }
        Err(err) => {
            emit_error(command, output_mode, &err);
            std::process::exit(err.exit_code());
        }
    }
}

fn run(cli: Cli) -> Result<String, AppError> {
    run_with(cli, RuntimeConfig::from_env)
}

fn run_with<LoadConfig>(cli: Cli, load_config: LoadConfig) -> Result<String, AppError>
where
    LoadConfig: Fn() -> Result<RuntimeConfig, ConfigError>,
{
    let config = load_config().map_err(AppError::from_config)?;
    debug!(
        "binaries dir {}, item limit {}",
        config.binaries_dir.display(),
        config.item_limit
    );
    let finder = ProjectFinder::new(&config);

    match cli.command {
        Commands::ScriptFilter {
            query,
            output,
            json,
        } => {
            let output_mode =
                select_output_mode(output.map(Into::into), json, OutputMode::AlfredJson).map_err(
                    |error| AppError::user(ERROR_CODE_USER_OUTPUT_MODE_CONFLICT, error.to_string()),
                )?;
            let results = finder.search(&query);

            match output_mode {
                OutputMode::AlfredJson => build_feedback(&results).to_json().map_err(serialize_error),
                OutputMode::Json => {
                    let payload = serde_json::to_value(build_feedback(&results))
                        .map_err(serialize_error)?;
                    Ok(build_success_envelope(SCRIPT_FILTER_COMMAND, payload))
                }
                OutputMode::Human => Ok(render_results_human(&results)),
            }
        }
        Commands::ListApps { app } => render_apps_human(&finder, app.as_deref()),
    }
}

fn serialize_error(error: serde_json::Error) -> AppError {
    AppError::runtime(
        ERROR_CODE_RUNTIME_SERIALIZE,
        format!("failed to serialize Alfred feedback: {error}"),
    )
}

fn render_results_human(results: &[RankedProject]) -> String {
    if results.is_empty() {
        return "No projects matched".to_string();
    }

    results
        .iter()
        .map(|result| {
            format!(
                "{} | {} | {} | {}",
                result.project.name,
                result.project.path.display(),
                result.app.name(),
                format_opened(result.project.last_opened),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_opened(epoch_millis: i64) -> String {
    DateTime::from_timestamp_millis(epoch_millis)
        .map(|value| {
            value
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "N/A".to_string())
}

fn render_apps_human(finder: &ProjectFinder, only: Option<&str>) -> Result<String, AppError> {
    let wanted = match only {
        Some(name) => Some(find_application(name).ok_or_else(|| {
            AppError::user(
                ERROR_CODE_USER_UNKNOWN_APP,
                format!("unknown IDE: {}", name.trim()),
            )
        })?),
        None => None,
    };

    let lines: Vec<String> = finder
        .installed()
        .iter()
        .filter(|app| wanted.is_none_or(|descriptor| descriptor.name == app.name()))
        .map(|app| {
            let generation = finder
                .generation_for(app)
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "-".to_string());
            format!("{} | {} | {generation}", app.name(), app.binary.display())
        })
        .collect();

    if lines.is_empty() {
        return Ok(match wanted {
            Some(descriptor) => format!("{} is not installed", descriptor.name),
            None => "No IDEs installed".to_string(),
        });
    }

    Ok(lines.join("\n"))
}

fn emit_error(command: &str, output_mode: OutputMode, error: &AppError) {
    match output_mode {
        OutputMode::Json => {
            let details = error_details(error_kind_label(error.kind), error.exit_code());
            println!(
                "{}",
                build_error_envelope(command, error.code, &error.message, Some(details))
            );
        }
        OutputMode::AlfredJson => {
            let payload = serde_json::json!({
                "items": [{
                    "title": format!("Error [{}]", error.code),
                    "subtitle": error.message,
                    "valid": false,
                }]
            });
            println!("{payload}");
        }
        OutputMode::Human => {
            eprintln!("error[{}]: {}", error.code, error.message);
        }
    }
}

fn error_kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::User => "user",
        ErrorKind::Runtime => "runtime",
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::{Path, PathBuf};

    use ide_projects::{Feedback, Platform};
    use tempfile::tempdir;

    use super::*;

    fn config_for(home: &Path, item_limit: usize) -> RuntimeConfig {
        RuntimeConfig {
            home: home.to_path_buf(),
            binaries_dir: home.join("bin"),
            item_limit,
            platform: Platform::Linux,
        }
    }

    fn seed_clion(home: &Path, projects: &[(&str, i64)]) -> PathBuf {
        let bin = home.join("bin");
        fs::create_dir_all(&bin).expect("create bin dir");
        fs::write(bin.join("clion"), "").expect("write launcher");

        let generation = home.join(".config/JetBrains/CLion2024.1");
        fs::create_dir_all(generation.join("options")).expect("create options dir");

        let mut entries = String::new();
        for (name, timestamp) in projects {
            fs::create_dir_all(home.join("work").join(name)).expect("create project dir");
            entries.push_str(&format!(
                r#"<entry key="$USER_HOME$/work/{name}"><value><RecentProjectMetaInfo><option name="projectOpenTimestamp" value="{timestamp}" /></RecentProjectMetaInfo></value></entry>"#
            ));
        }
        fs::write(
            generation.join("options/recentProjects.xml"),
            format!(
                r#"<application><component name="RecentProjectsManager"><option name="additionalInfo"><map>{entries}</map></option></component></application>"#
            ),
        )
        .expect("write history");

        generation
    }

    fn feedback_titles(feedback: &Feedback) -> Vec<&str> {
        feedback.items.iter().map(|item| item.title.as_str()).collect()
    }

    #[test]
    fn script_filter_outputs_alfred_items_by_default() {
        let temp = tempdir().expect("create temp dir");
        seed_clion(temp.path(), &[("alpha", 1), ("beta", 2)]);
        let config = config_for(temp.path(), 10);

        let cli = Cli::parse_from(["ide-projects-cli", "script-filter", "--query", ""]);
        let output = run_with(cli, || Ok(config.clone())).expect("script-filter should succeed");

        let feedback: Feedback = serde_json::from_str(&output).expect("output must be feedback");
        assert_eq!(feedback_titles(&feedback), vec!["beta", "alpha"]);
        assert_eq!(feedback.items[0].variable("ide_app"), Some("CLion"));
    }

    #[test]
    fn script_filter_json_mode_wraps_feedback_in_envelope() {
        let temp = tempdir().expect("create temp dir");
        seed_clion(temp.path(), &[("alpha", 1)]);
        let config = config_for(temp.path(), 10);

        let cli = Cli::parse_from(["ide-projects-cli", "script-filter", "--json"]);
        let output = run_with(cli, || Ok(config.clone())).expect("script-filter should succeed");

        let json: serde_json::Value = serde_json::from_str(&output).expect("output must be json");
        assert_eq!(json["schema_version"], "v1");
        assert_eq!(json["command"], "ide.script-filter");
        assert_eq!(json["ok"], true);
        assert_eq!(json["result"]["items"][0]["title"], "alpha");
    }

    #[test]
    fn script_filter_human_mode_lists_one_line_per_project() {
        let temp = tempdir().expect("create temp dir");
        seed_clion(temp.path(), &[("alpha", 1_700_000_000_000), ("beta", 1)]);
        let config = config_for(temp.path(), 1);

        let cli = Cli::parse_from([
            "ide-projects-cli",
            "script-filter",
            "--output",
            "human",
        ]);
        let output = run_with(cli, || Ok(config.clone())).expect("script-filter should succeed");

        assert_eq!(output.lines().count(), 1, "item limit should apply");
        assert!(output.starts_with("alpha | "));
        assert!(output.contains(" | CLion | "));
    }

    #[test]
    fn script_filter_without_matches_renders_placeholder_item() {
        let temp = tempdir().expect("create temp dir");
        seed_clion(temp.path(), &[("alpha", 1)]);
        let config = config_for(temp.path(), 10);

        let cli = Cli::parse_from(["ide-projects-cli", "script-filter", "-q", "zzz"]);
        let output = run_with(cli, || Ok(config.clone())).expect("script-filter should succeed");

        let feedback: Feedback = serde_json::from_str(&output).expect("output must be feedback");
        assert!(ide_projects::is_no_projects_feedback(&feedback));
    }

    #[test]
    fn script_filter_accepts_queries_starting_with_a_dash() {
        let temp = tempdir().expect("create temp dir");
        seed_clion(temp.path(), &[("-api", 2), ("api", 1)]);
        let config = config_for(temp.path(), 10);

        let cli = Cli::parse_from(["ide-projects-cli", "script-filter", "--query", "-api"]);
        let output = run_with(cli, || Ok(config.clone())).expect("script-filter should succeed");

        let feedback: Feedback = serde_json::from_str(&output).expect("output must be feedback");
        assert_eq!(feedback_titles(&feedback), vec!["-api"]);
    }

    #[test]
    fn script_filter_rejects_conflicting_json_flags() {
        let temp = tempdir().expect("create temp dir");
        let config = config_for(temp.path(), 10);

        let cli = Cli::parse_from([
            "ide-projects-cli",
            "script-filter",
            "--json",
            "--output",
            "human",
        ]);
        let err = run_with(cli, || Ok(config.clone())).expect_err("must fail");

        assert_eq!(err.kind, ErrorKind::User);
        assert_eq!(err.code, ERROR_CODE_USER_OUTPUT_MODE_CONFLICT);
    }

    #[test]
    fn config_errors_surface_as_user_errors() {
        let cli = Cli::parse_from(["ide-projects-cli", "script-filter"]);
        let err = run_with(cli, || {
            Err(ConfigError::InvalidItemLimit("many".to_string()))
        })
        .expect_err("invalid config should fail");

        assert_eq!(err.kind, ErrorKind::User);
        assert_eq!(err.code, ERROR_CODE_USER_INVALID_CONFIG);
        assert_eq!(err.exit_code(), 2);
        assert!(err.message.contains("many"));
    }

    #[test]
    fn list_apps_shows_binary_and_generation() {
        let temp = tempdir().expect("create temp dir");
        let generation = seed_clion(temp.path(), &[]);
        let config = config_for(temp.path(), 10);

        let cli = Cli::parse_from(["ide-projects-cli", "list-apps"]);
        let output = run_with(cli, || Ok(config.clone())).expect("list-apps should succeed");

        assert_eq!(
            output,
            format!(
                "CLion | {} | {}",
                temp.path().join("bin/clion").display(),
                generation.display()
            )
        );
    }

    #[test]
    fn list_apps_filters_by_name_and_rejects_unknown() {
        let temp = tempdir().expect("create temp dir");
        seed_clion(temp.path(), &[]);
        let config = config_for(temp.path(), 10);

        let cli = Cli::parse_from(["ide-projects-cli", "list-apps", "--app", "goland"]);
        let output = run_with(cli, || Ok(config.clone())).expect("list-apps should succeed");
        assert_eq!(output, "GoLand is not installed");

        let cli = Cli::parse_from(["ide-projects-cli", "list-apps", "--app", "notepad"]);
        let err = run_with(cli, || Ok(config.clone())).expect_err("unknown app should fail");
        assert_eq!(err.code, ERROR_CODE_USER_UNKNOWN_APP);
    }

    #[test]
    fn opened_timestamp_formatting_handles_out_of_range_values() {
        assert_eq!(format_opened(i64::MAX), "N/A");
        assert_eq!(format_opened(0).len(), "1970-01-01 00:00".len());
    }
}
