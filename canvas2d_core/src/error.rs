// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: error types
//! Mirrors: DOMException names raised by the Canvas 2D API

use thiserror::Error;

use crate::color::ColorError;

/// Errors raised by canvas and gradient operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CanvasError {
    /// A numeric argument was outside its permitted range.
    #[error("IndexSizeError: {0}")]
    IndexSize(&'static str),
    /// A string argument could not be parsed.
    #[error("SyntaxError: {0}")]
    Syntax(#[from] ColorError),
    /// An argument that must be finite was NaN or infinite.
    #[error("TypeError: {0} is not a finite number")]
    NotFinite(&'static str),
    /// `getContext` was called with an id other than `"2d"`.
    #[error("unsupported context id {0:?}")]
    UnsupportedContext(String),
    /// PNG encoding of the surface failed.
    #[error("failed to encode surface: {0}")]
    Encode(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = CanvasError> = std::result::Result<T, E>;
