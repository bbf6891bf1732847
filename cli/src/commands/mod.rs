// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Command implementations for the admission CLI

pub mod catalog;
pub mod config;
pub mod titres_acces;

pub use self::catalog::CatalogCommand;
pub use self::config::ConfigCommand;
pub use self::titres_acces::TitresAccesArgs;
