use std::sync::Arc;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RcfgError {
    #[error("I/O Error: {0}")]
    Io(#[from] Arc<std::io::Error>),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("RBE project is not specified")]
    ProjectNotSpecified,

    #[error("Tool Not Found: '{0}' is not on PATH: {1}")]
    ToolNotFound(String, String),

    #[error("Failed to execute command: {0}")]
    CommandExecError(String),

    #[error("Command `{command}` failed ({status}){}", stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        status: String,
        stderr: Option<String>,
    },

    #[error("Parsing Error in {0}: {1}")]
    ParseError(&'static str, String),
}

fn stderr_suffix(stderr: &Option<String>) -> String {
    match stderr {
        Some(s) if !s.is_empty() => format!(": {s}"),
        _ => String::new(),
    }
}

impl From<std::io::Error> for RcfgError {
    fn from(err: std::io::Error) -> Self {
        RcfgError::Io(Arc::new(err))
    }
}

pub type Result<T> = std::result::Result<T, RcfgError>;
