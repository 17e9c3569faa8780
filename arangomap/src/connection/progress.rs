// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Progress observation for long-running server calls
//!
//! Reporters only observe. Nothing they do can change the outcome of the
//! call being reported.

use std::sync::atomic::{AtomicUsize, Ordering};

pub trait ProgressReporter: Send + Sync {
    /// A labelled unit of work is about to be sent
    fn start(&self, label: &str);

    /// One unit of work finished
    fn item(&self);
}

/// Default reporter, logs at debug level
#[derive(Debug, Default)]
pub struct LogReporter {
    completed: AtomicUsize,
}

impl LogReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items reported since creation
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }
}

impl ProgressReporter for LogReporter {
    fn start(&self, label: &str) {
        log::debug!("Starting: {}", label);
    }

    fn item(&self) {
        let done = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        log::debug!("Completed item #{}", done);
    }
}
