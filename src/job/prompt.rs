// baka-rs: Baka Admin's Kludge Assistant - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interactive answers for the job runner.
//!
//! ```text
//! before a step:   [y]es / [s]kip / [a]bort      (n = abort, c = yes)
//! after a failure: [c]ontinue / [r]etry / [a]bort (n = abort, y = continue)
//! anything else, or EOF: abort
//! ```

use futures_util::future::BoxFuture;
use std::collections::VecDeque;
use std::io::Write as _;
use std::sync::{Mutex, PoisonError};

use crate::error::Result;

/// Answer to the question asked before a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAnswer {
    Run,
    Skip,
    Abort,
}

/// Answer to the question asked after a failed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureAnswer {
    Continue,
    Retry,
    Abort,
}

fn first_letter(input: &str) -> Option<char> {
    input.trim().chars().next().map(|c| c.to_ascii_lowercase())
}

impl StepAnswer {
    /// `None` for an unrecognised answer.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match first_letter(input)? {
            'y' | 'c' => Some(Self::Run),
            's' => Some(Self::Skip),
            'a' | 'n' => Some(Self::Abort),
            _ => None,
        }
    }
}

impl FailureAnswer {
    /// `None` for an unrecognised answer.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match first_letter(input)? {
            'c' | 'y' => Some(Self::Continue),
            'r' => Some(Self::Retry),
            'a' | 'n' => Some(Self::Abort),
            _ => None,
        }
    }
}

/// Source of interactive answers.
pub trait Prompter: Send + Sync {
    /// Show `question` and return the answer line, or `None` at end of input.
    fn ask<'a>(&'a self, question: &'a str) -> BoxFuture<'a, Result<Option<String>>>;
}

/// Reads answers from the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn ask<'a>(&'a self, question: &'a str) -> BoxFuture<'a, Result<Option<String>>> {
        let question = question.to_string();
        Box::pin(async move {
            let line = tokio::task::spawn_blocking(move || -> std::io::Result<Option<String>> {
                let mut stdout = std::io::stdout().lock();
                write!(stdout, "{question} ")?;
                stdout.flush()?;
                let mut line = String::new();
                let read = std::io::stdin().read_line(&mut line)?;
                Ok((read > 0).then_some(line))
            })
            .await??;
            Ok(line)
        })
    }
}

/// Pre-recorded answers, for tests and non-interactive callers.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: Mutex<VecDeque<String>>,
    questions: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(Into::into).collect()),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far.
    #[must_use]
    pub fn questions(&self) -> Vec<String> {
        self.questions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask<'a>(&'a self, question: &'a str) -> BoxFuture<'a, Result<Option<String>>> {
        Box::pin(async move {
            self.questions
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(question.to_string());
            Ok(self
                .answers
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front())
        })
    }
}
