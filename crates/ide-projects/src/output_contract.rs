use std::fmt;

use serde_json::{Map, Value, json};

pub const ENVELOPE_SCHEMA_VERSION: &str = "v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    AlfredJson,
}

impl OutputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Json => "json",
            Self::AlfredJson => "alfred-json",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputModeSelectionError {
    pub explicit: OutputMode,
}

impl fmt::Display for OutputModeSelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "conflicting output mode flags: --json requires --output json (got {})",
            self.explicit.as_str()
        )
    }
}

impl std::error::Error for OutputModeSelectionError {}

pub fn select_output_mode(
    explicit: Option<OutputMode>,
    json_flag: bool,
    default_mode: OutputMode,
) -> Result<OutputMode, OutputModeSelectionError> {
    match (explicit, json_flag) {
        (Some(mode), true) if mode != OutputMode::Json => {
            Err(OutputModeSelectionError { explicit: mode })
        }
        (Some(mode), _) => Ok(mode),
        (None, true) => Ok(OutputMode::Json),
        (None, false) => Ok(default_mode),
    }
}

pub fn build_success_envelope(command: &str, payload: Value) -> String {
    let mut envelope = base_envelope(command, true);
    envelope.insert("result".to_string(), payload);
    Value::Object(envelope).to_string()
}

pub fn build_error_envelope(
    command: &str,
    code: &str,
    message: &str,
    details: Option<Value>,
) -> String {
    let mut error = Map::new();
    error.insert("code".to_string(), json!(code));
    error.insert("message".to_string(), json!(message));
    if let Some(details) = details {
        error.insert("details".to_string(), details);
    }

    let mut envelope = base_envelope(command, false);
    envelope.insert("error".to_string(), Value::Object(error));
    Value::Object(envelope).to_string()
}

pub fn error_details(kind: &str, exit_code: i32) -> Value {
    json!({ "kind": kind, "exit_code": exit_code })
}

fn base_envelope(command: &str, ok: bool) -> Map<String, Value> {
    let mut envelope = Map::new();
    envelope.insert("schema_version".to_string(), json!(ENVELOPE_SCHEMA_VERSION));
    envelope.insert("command".to_string(), json!(command));
    envelope.insert("ok".to_string(), json!(ok));
    envelope
}
