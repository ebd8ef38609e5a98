// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for cache probing.

use std::num::ParseIntError;

/// Errors raised while running an introspection command.
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    /// The argument vector was empty.
    #[error("no command given")]
    EmptyCommand,

    /// The command could not be started.
    #[error("failed to spawn '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    /// Reading stdout or waiting for the child failed.
    #[error("i/o error while running '{command}': {source}")]
    Io {
        command: String,
        source: std::io::Error,
    },

    /// The command exited unsuccessfully. `code` is `None` when the child
    /// was terminated by a signal.
    #[error("'{command}' indicated failure via exit code {}", display_code(.code))]
    ExitStatus { command: String, code: Option<i32> },
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "<signal>".to_string(), |c| c.to_string())
}

/// Errors that can occur when probing the cache hierarchy.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    /// The OS was recognised but probing it is not implemented.
    #[error("querying cache on {platform} is not implemented")]
    UnsupportedPlatform { platform: &'static str },

    /// The OS name matched none of the known platforms.
    #[error("can't identify OS: reported as '{os_name}'")]
    UnrecognizedPlatform { os_name: String },

    /// A required introspection command failed.
    #[error("process error: {0}")]
    Process(#[from] ProcessError),

    /// A field's digit run could not be parsed.
    #[error("invalid number '{digits}' after '{label}': {source}")]
    InvalidNumber {
        label: String,
        digits: String,
        #[source]
        source: ParseIntError,
    },

    /// A field pattern failed to compile.
    #[error("invalid field pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A value the field depends on was not present in the query output.
    #[error("'{label}' not found in query output")]
    MissingField { label: &'static str },

    /// A divisor parsed as zero.
    #[error("division by zero: '{label}' is 0")]
    DivisionByZero { label: &'static str },

    /// Unit normalisation overflowed.
    #[error("{value} x {multiplier} overflows a byte count")]
    Overflow { value: u64, multiplier: u64 },

    /// One or more field parsers failed and no field produced a value.
    #[error("{primary}{}", suppressed_note(.suppressed))]
    AggregatedParse {
        primary: Box<ProbeError>,
        suppressed: Vec<ProbeError>,
    },

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

fn suppressed_note(suppressed: &[ProbeError]) -> String {
    if suppressed.is_empty() {
        String::new()
    } else {
        format!(" (+{} suppressed)", suppressed.len())
    }
}

impl ProbeError {
    /// Iterates over every underlying cause of an aggregated error, primary
    /// first. Any other error yields just itself.
    pub fn causes(&self) -> Box<dyn Iterator<Item = &ProbeError> + '_> {
        match self {
            ProbeError::AggregatedParse {
                primary,
                suppressed,
            } => Box::new(std::iter::once(primary.as_ref()).chain(suppressed.iter())),
            other => Box::new(std::iter::once(other)),
        }
    }
}
