// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Continuing Education Commands
//!
//! Manager decisions carry the message sent to the candidate; an empty
//! message is only historised.

use crate::application::message_bus::Command;
use crate::domain::formation_continue::ports::MessageDecision;
use crate::domain::formation_continue::proposition::FormationContinue;
use crate::domain::formation_continue::validators::Motif;
use crate::domain::shared::identite::PropositionIdentity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitierPropositionCommand {
    pub matricule_candidat: String,
    pub formation: FormationContinue,
    #[serde(default)]
    pub motivations: String,
    #[serde(default)]
    pub moyens_decouverte_formation: Vec<String>,
    pub marque_d_interet: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoumettrePropositionCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule_auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupprimerPropositionCommand {
    pub uuid_proposition: PropositionIdentity,
    pub matricule_auteur: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrendreEnChargeCommand {
    pub uuid_proposition: PropositionIdentity,
    pub gestionnaire: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MettreEnAttenteCommand {
    pub uuid_proposition: PropositionIdentity,
    pub gestionnaire: String,
    #[serde(default)]
    pub motif: Motif,
    #[serde(default)]
    pub message: MessageDecision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprouverParFacCommand {
    pub uuid_proposition: PropositionIdentity,
    pub gestionnaire: String,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub message: MessageDecision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MettreAValiderCommand {
    pub uuid_proposition: PropositionIdentity,
    pub gestionnaire: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefuserPropositionCommand {
    pub uuid_proposition: PropositionIdentity,
    pub gestionnaire: String,
    #[serde(default)]
    pub motif: Motif,
    #[serde(default)]
    pub message: MessageDecision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnulerPropositionCommand {
    pub uuid_proposition: PropositionIdentity,
    pub gestionnaire: String,
    #[serde(default)]
    pub motif: Motif,
    #[serde(default)]
    pub message: MessageDecision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValiderPropositionCommand {
    pub uuid_proposition: PropositionIdentity,
    pub gestionnaire: String,
    #[serde(default)]
    pub message: MessageDecision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloturerPropositionCommand {
    pub uuid_proposition: PropositionIdentity,
    pub gestionnaire: String,
}

macro_rules! commande {
    ($($nom:ident),+ $(,)?) => {
        $(impl Command for $nom {
            type Output = PropositionIdentity;
        })+
    };
}

commande! {
    InitierPropositionCommand,
    SoumettrePropositionCommand,
    SupprimerPropositionCommand,
    PrendreEnChargeCommand,
    MettreEnAttenteCommand,
    ApprouverParFacCommand,
    MettreAValiderCommand,
    RefuserPropositionCommand,
    AnnulerPropositionCommand,
    ValiderPropositionCommand,
    CloturerPropositionCommand,
}
