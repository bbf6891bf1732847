// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! General education admission context (bachelors and masters).

pub mod checklist;
pub mod ports;
pub mod proposition;
pub mod statuts;
pub mod validators;
