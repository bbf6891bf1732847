// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Continuing education commands, queries and handlers.

pub mod commands;
pub mod handlers;
pub mod queries;

use crate::application::message_bus::MessageBusBuilder;
use crate::application::services::ServicesCommuns;
use crate::domain::formation_continue::ports::{IHistoriqueContinue, INotificationContinue};
use crate::domain::formation_continue::proposition::PropositionContinue;
use crate::domain::shared::repository::PropositionRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct ServicesContinue {
    pub commun: ServicesCommuns,
    pub propositions: Arc<dyn PropositionRepository<PropositionContinue>>,
    pub notification: Arc<dyn INotificationContinue>,
    pub historique: Arc<dyn IHistoriqueContinue>,
}

pub fn enregistrer_handlers(
    builder: MessageBusBuilder,
    s: Arc<ServicesContinue>,
) -> MessageBusBuilder {
    use handlers::*;

    builder
        .register(Arc::clone(&s), initier_proposition)
        .register(Arc::clone(&s), soumettre_proposition)
        .register(Arc::clone(&s), supprimer_proposition)
        .register(Arc::clone(&s), prendre_en_charge)
        .register(Arc::clone(&s), mettre_en_attente)
        .register(Arc::clone(&s), approuver_par_fac)
        .register(Arc::clone(&s), mettre_a_valider)
        .register(Arc::clone(&s), refuser_proposition)
        .register(Arc::clone(&s), annuler_proposition)
        .register(Arc::clone(&s), valider_proposition)
        .register(Arc::clone(&s), cloturer_proposition)
        .register(s, queries::get_proposition)
}
