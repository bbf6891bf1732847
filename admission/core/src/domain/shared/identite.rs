// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Identity value objects shared by every admission context.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropositionIdentity(pub Uuid);

impl PropositionIdentity {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for PropositionIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PropositionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupeDeSupervisionIdentity(pub Uuid);

impl GroupeDeSupervisionIdentity {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for GroupeDeSupervisionIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GroupeDeSupervisionIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
