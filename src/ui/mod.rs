// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! UI components for the vidquiz application.

pub mod form;
pub mod review;
pub mod timeline;
pub mod transport;
