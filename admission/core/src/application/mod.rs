// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Application layer: commands, queries and the handlers that run them
//! against the domain through the message bus.

pub mod container;
pub mod doctorat;
pub mod formation_continue;
pub mod formation_generale;
pub mod message_bus;
pub mod repository_factory;
pub mod services;
pub mod titres_acces;

pub use container::AdmissionContainer;
pub use message_bus::{Command, MessageBus};
