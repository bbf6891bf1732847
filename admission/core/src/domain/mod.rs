// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Domain layer: aggregates, checklists, business rules and ports of the
//! three admission contexts.
//!
//! # Architecture
//!
//! - **Layer:** Domain Layer

pub mod admission_config;
pub mod doctorat;
pub mod events;
pub mod formation_continue;
pub mod formation_generale;
pub mod shared;
