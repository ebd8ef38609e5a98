// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Running introspection commands.
//!
//! The probe only needs "run this argv, give me stdout as text". That seam
//! is the [`ProcessRunner`] trait, so tests can feed canned `getconf` /
//! `wmic` output without touching the host.

use crate::ProcessError;
use std::io::{BufRead, BufReader};
use std::process::{Command, Stdio};

/// Executes a command synchronously and captures its standard output.
pub trait ProcessRunner {
    /// Runs `argv[0]` with the remaining arguments and returns its stdout,
    /// one `\n`-terminated line per output line.
    ///
    /// Unless `ignore_exit_code` is set, an unsuccessful exit status is an
    /// error.
    fn run(&self, argv: &[&str], ignore_exit_code: bool) -> Result<String, ProcessError>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, argv: &[&str], ignore_exit_code: bool) -> Result<String, ProcessError> {
        (**self).run(argv, ignore_exit_code)
    }
}

/// [`ProcessRunner`] backed by [`std::process::Command`].
///
/// Blocks until the child exits; there is no timeout.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, argv: &[&str], ignore_exit_code: bool) -> Result<String, ProcessError> {
        let (program, args) = argv.split_first().ok_or(ProcessError::EmptyCommand)?;
        let command = argv.join(" ");

        tracing::debug!("running '{command}'");
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ProcessError::Spawn {
                command: command.clone(),
                source,
            })?;

        let mut output = String::new();
        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).lines() {
                let line = line.map_err(|source| ProcessError::Io {
                    command: command.clone(),
                    source,
                })?;
                output.push_str(&line);
                output.push('\n');
            }
        }

        let status = child.wait().map_err(|source| ProcessError::Io {
            command: command.clone(),
            source,
        })?;
        if !ignore_exit_code && !status.success() {
            return Err(ProcessError::ExitStatus {
                command,
                code: status.code(),
            });
        }
        Ok(output)
    }
}
