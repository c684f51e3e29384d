// Copyright © SoftOboros Technology, Inc.
// SPDX-License-Identifier: MIT
//! Module: case loaders
//! Mirrors: generated conformance case descriptions

pub mod json;
