// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Shared kernel of the admission contexts.

pub mod checklist;
pub mod decision;
pub mod exceptions;
pub mod identite;
pub mod onglets_communs;
pub mod profil;
pub mod repository;
pub mod titres_acces;
pub mod validation;
pub mod vocabulaire;
