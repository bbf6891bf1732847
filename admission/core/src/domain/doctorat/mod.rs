// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Doctorate admission context: proposition, supervision group, checklist.

pub mod checklist;
pub mod groupe_de_supervision;
pub mod ports;
pub mod proposition;
pub mod statuts;
pub mod validators;
