// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Side-effect ports of the continuing education context.

use crate::domain::formation_continue::proposition::PropositionContinue;
use crate::domain::formation_continue::validators::ActionDecision;
use crate::domain::shared::decision::EmailMessage;
use crate::domain::shared::exceptions::AdmissionError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Message written by the manager to go with a decision. An empty message is
/// historised but not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageDecision {
    pub objet: String,
    pub corps: String,
}

impl MessageDecision {
    pub fn est_vide(&self) -> bool {
        self.objet.trim().is_empty() && self.corps.trim().is_empty()
    }
}

#[async_trait]
pub trait INotificationContinue: Send + Sync {
    async fn notifier_soumission(
        &self,
        proposition: &PropositionContinue,
    ) -> Result<EmailMessage, AdmissionError>;

    async fn notifier_decision(
        &self,
        proposition: &PropositionContinue,
        message: &MessageDecision,
    ) -> Result<EmailMessage, AdmissionError>;
}

#[async_trait]
pub trait IHistoriqueContinue: Send + Sync {
    async fn historiser_soumission(
        &self,
        proposition: &PropositionContinue,
    ) -> Result<(), AdmissionError>;

    /// One entry per manager decision, with the message sent to the candidate.
    async fn historiser_decision(
        &self,
        proposition: &PropositionContinue,
        action: ActionDecision,
        gestionnaire: &str,
        message: &MessageDecision,
    ) -> Result<(), AdmissionError>;
}
