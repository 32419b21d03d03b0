//! CQL3 error types

use crate::ErrorCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A diagnostic message ready to be reported to a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional context or help
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a new error diagnostic
    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            help: None,
        }
    }

    /// Set help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {} - {}", self.code, self.message)?;
        if let Some(help) = &self.help {
            write!(f, " ({})", help)?;
        }
        Ok(())
    }
}

/// Error raised while constructing a CQL3 type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Cql3Error {
    /// A type name is lexically malformed
    #[error("{code}: {message}")]
    Syntax {
        code: ErrorCode,
        message: String,
        /// The offending type name
        input: String,
    },

    /// A type name does not resolve to any loadable type
    #[error("{code}: {message}")]
    Configuration {
        code: ErrorCode,
        message: String,
        context: Option<String>,
    },

    /// A collection was given an illegal component type
    #[error("{code}: {message}")]
    InvalidType { code: ErrorCode, message: String },

    /// A request referenced something that does not exist
    #[error("{code}: {message}")]
    InvalidRequest { code: ErrorCode, message: String },
}

impl Cql3Error {
    /// Create a syntax error
    pub fn syntax(code: ErrorCode, message: impl Into<String>, input: impl Into<String>) -> Self {
        Self::Syntax {
            code,
            message: message.into(),
            input: input.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Configuration {
            code,
            message: message.into(),
            context: None,
        }
    }

    /// Create an invalid type error
    pub fn invalid_type(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::InvalidType {
            code,
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            code,
            message: message.into(),
        }
    }

    /// Attach context to a configuration error; other kinds are returned unchanged
    pub fn with_context(self, context: impl Into<String>) -> Self {
        match self {
            Self::Configuration { code, message, .. } => Self::Configuration {
                code,
                message,
                context: Some(context.into()),
            },
            other => other,
        }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Syntax { code, .. }
            | Self::Configuration { code, .. }
            | Self::InvalidType { code, .. }
            | Self::InvalidRequest { code, .. } => *code,
        }
    }

    /// Get the message without the code prefix
    pub fn message(&self) -> &str {
        match self {
            Self::Syntax { message, .. }
            | Self::Configuration { message, .. }
            | Self::InvalidType { message, .. }
            | Self::InvalidRequest { message, .. } => message,
        }
    }

    /// Convert to a diagnostic
    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code(), self.message());
        match self {
            Self::Syntax { input, .. } => diag.with_help(format!("while parsing '{}'", input)),
            Self::Configuration {
                context: Some(ctx), ..
            } => diag.with_help(ctx.clone()),
            _ => match self.code().info().help {
                Some(help) => diag.with_help(help),
                None => diag,
            },
        }
    }
}
