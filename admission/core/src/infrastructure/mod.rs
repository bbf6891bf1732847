// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

pub mod db;
pub mod event_bus;
pub mod fixtures;
pub mod historique;
pub mod notification;
pub mod repositories;
pub mod translators;

pub use historique::{EntreeHistorique, InMemoryHistorique};
pub use notification::{InMemoryNotification, NotificationEnvoyee};
