// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Admission decision core
//!
//! Proposition state machines, checklists and business rules of the doctorate,
//! general education and continuing education admission workflows, with the
//! command handlers and message bus that drive them.
//!
//! # Architecture
//!
//! - **Layer:** Core System

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use domain::*;
