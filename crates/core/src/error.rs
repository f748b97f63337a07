// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for dispatcher operations

use crate::active::ActiveError;
use crate::config::ConfigError;
use thiserror::Error;

/// Errors surfaced through dispatcher calls and their pending results
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Worker(#[from] ActiveError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The unit of work was discarded without running, either because the
    /// worker terminated abnormally or because it arrived after teardown
    #[error("unit of work was dropped before it ran")]
    Dropped,
}
