/*
 * This file is part of AVR Flasher.
 *
 * Copyright (C) 2025 AVR Flasher contributors
 *
 * AVR Flasher is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * AVR Flasher is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with AVR Flasher. If not, see <https://www.gnu.org/licenses/>.
 */

//! Subprocess execution with line-by-line output streaming.

use std::io::{BufRead, BufReader, Read};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::error::{FlasherError, Result};

/// Updates sent from the subprocess monitor to the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    Output(String),
    Finished,
    Failed { code: Option<i32>, message: String },
}

/// Starts an external command and hands back a stream of its events.
#[cfg_attr(test, mockall::automock)]
pub trait Launcher {
    fn launch(&self, argv: &[String]) -> Result<Receiver<RunEvent>>;
}

/// Runs argv[0] directly with argv[1..] as its arguments (no shell).
#[derive(Debug, Default, Clone, Copy)]
pub struct AvrdudeLauncher;

impl Launcher for AvrdudeLauncher {
    fn launch(&self, argv: &[String]) -> Result<Receiver<RunEvent>> {
        let (program, args) = argv.split_first().ok_or(FlasherError::EmptyCommand)?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FlasherError::Spawn { program: program.clone(), source })?;

        let (tx, rx) = mpsc::channel::<RunEvent>();

        let mut readers = Vec::with_capacity(2);
        if let Some(stderr) = child.stderr.take() {
            readers.push(forward_lines(stderr, tx.clone()));
        }
        if let Some(stdout) = child.stdout.take() {
            readers.push(forward_lines(stdout, tx.clone()));
        }

        thread::spawn(move || {
            // drain both pipes before reporting the exit status
            for r in readers {
                let _ = r.join();
            }
            let event = match child.wait() {
                Ok(status) if status.success() => RunEvent::Finished,
                Ok(status) => match status.code() {
                    Some(code) => RunEvent::Failed {
                        code: Some(code),
                        message: format!("Operation failed with error code: {}", code),
                    },
                    None => RunEvent::Failed {
                        code: None,
                        message: "Operation terminated by a signal".to_string(),
                    },
                },
                Err(e) => RunEvent::Failed { code: None, message: e.to_string() },
            };
            let _ = tx.send(event);
        });

        Ok(rx)
    }
}

fn forward_lines<R: Read + Send + 'static>(stream: R, tx: Sender<RunEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let reader = BufReader::new(stream);
        for line in reader.split(b'\n') {
            let Ok(bytes) = line else { break };
            let text = String::from_utf8_lossy(&bytes);
            let text = text.trim_end();
            if text.is_empty() {
                continue;
            }
            if tx.send(RunEvent::Output(text.to_string())).is_err() {
                break;
            }
        }
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Duration;

    fn collect(rx: Receiver<RunEvent>) -> Vec<RunEvent> {
        let mut events = Vec::new();
        while let Ok(ev) = rx.recv_timeout(Duration::from_secs(10)) {
            let done = !matches!(ev, RunEvent::Output(_));
            events.push(ev);
            if done {
                break;
            }
        }
        events
    }

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[test]
    fn test_streams_stderr_and_stdout_then_finishes() {
        let rx = AvrdudeLauncher.launch(&sh("echo 'Reading | ####' >&2; echo lfuse 0xff")).unwrap();
        let events = collect(rx);
        assert_eq!(events.last(), Some(&RunEvent::Finished));
        assert!(events.contains(&RunEvent::Output("Reading | ####".to_string())));
        assert!(events.contains(&RunEvent::Output("lfuse 0xff".to_string())));
    }

    #[test]
    fn test_nonzero_exit_carries_code() {
        let rx = AvrdudeLauncher.launch(&sh("echo 'no programmer' >&2; exit 3")).unwrap();
        let events = collect(rx);
        assert_eq!(events.first(), Some(&RunEvent::Output("no programmer".to_string())));
        match events.last() {
            Some(RunEvent::Failed { code, message }) => {
                assert_eq!(*code, Some(3));
                assert!(message.contains('3'));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let rx = AvrdudeLauncher.launch(&sh("printf 'a\\n\\n\\nb\\n' >&2")).unwrap();
        let events = collect(rx);
        assert_eq!(
            events,
            vec![
                RunEvent::Output("a".to_string()),
                RunEvent::Output("b".to_string()),
                RunEvent::Finished,
            ]
        );
    }

    #[test]
    fn test_arguments_are_not_shell_interpreted() {
        let argv = vec!["echo".to_string(), "a;b $HOME".to_string()];
        let events = collect(AvrdudeLauncher.launch(&argv).unwrap());
        assert_eq!(events[0], RunEvent::Output("a;b $HOME".to_string()));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let argv = vec!["/nonexistent/avrdude-binary".to_string()];
        let err = AvrdudeLauncher.launch(&argv).unwrap_err();
        assert!(matches!(err, FlasherError::Spawn { .. }));
    }

    #[test]
    fn test_empty_command() {
        assert!(matches!(AvrdudeLauncher.launch(&[]).unwrap_err(), FlasherError::EmptyCommand));
    }
}
