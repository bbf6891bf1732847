// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Continuing education admission context.

pub mod checklist;
pub mod ports;
pub mod proposition;
pub mod statuts;
pub mod validators;
