// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::shared::identite::PropositionIdentity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Admission context a proposition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contexte {
    Doctorat,
    FormationGenerale,
    FormationContinue,
}

/// Proposition lifecycle events, published after a successful save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PropositionEvent {
    PropositionInitiee {
        proposition_id: PropositionIdentity,
        contexte: Contexte,
        matricule_candidat: String,
        initiee_le: DateTime<Utc>,
    },
    StatutModifie {
        proposition_id: PropositionIdentity,
        contexte: Contexte,
        commande: String,
        ancien_statut: String,
        nouveau_statut: String,
        auteur: String,
        modifie_le: DateTime<Utc>,
    },
    ChecklistModifiee {
        proposition_id: PropositionIdentity,
        contexte: Contexte,
        onglet: String,
        configuration: String,
        auteur: String,
        modifie_le: DateTime<Utc>,
    },
    PropositionModifiee {
        proposition_id: PropositionIdentity,
        contexte: Contexte,
        commande: String,
        auteur: String,
        modifie_le: DateTime<Utc>,
    },
}

impl PropositionEvent {
    pub fn proposition_id(&self) -> &PropositionIdentity {
        match self {
            Self::PropositionInitiee { proposition_id, .. }
            | Self::StatutModifie { proposition_id, .. }
            | Self::ChecklistModifiee { proposition_id, .. }
            | Self::PropositionModifiee { proposition_id, .. } => proposition_id,
        }
    }
}

/// Doctorate supervision group events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SupervisionEvent {
    MembreAjoute {
        proposition_id: PropositionIdentity,
        matricule: String,
        role: String,
    },
    MembreRetire {
        proposition_id: PropositionIdentity,
        matricule: String,
        role: String,
    },
    SignaturesDemandees {
        proposition_id: PropositionIdentity,
        invites: Vec<String>,
        demandees_le: DateTime<Utc>,
    },
    PropositionApprouvee {
        proposition_id: PropositionIdentity,
        matricule: String,
    },
    PropositionRefusee {
        proposition_id: PropositionIdentity,
        matricule: String,
    },
}

impl SupervisionEvent {
    pub fn proposition_id(&self) -> &PropositionIdentity {
        match self {
            Self::MembreAjoute { proposition_id, .. }
            | Self::MembreRetire { proposition_id, .. }
            | Self::SignaturesDemandees { proposition_id, .. }
            | Self::PropositionApprouvee { proposition_id, .. }
            | Self::PropositionRefusee { proposition_id, .. } => proposition_id,
        }
    }
}
