// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! General education (bachelor and master) commands, queries and handlers.

pub mod commands;
pub mod handlers;
pub mod queries;

use crate::application::message_bus::MessageBusBuilder;
use crate::application::services::ServicesCommuns;
use crate::domain::formation_generale::ports::{IHistoriqueGenerale, INotificationGenerale};
use crate::domain::formation_generale::proposition::PropositionGenerale;
use crate::domain::shared::repository::PropositionRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct ServicesGenerale {
    pub commun: ServicesCommuns,
    pub propositions: Arc<dyn PropositionRepository<PropositionGenerale>>,
    pub notification: Arc<dyn INotificationGenerale>,
    pub historique: Arc<dyn IHistoriqueGenerale>,
}

pub fn enregistrer_handlers(
    builder: MessageBusBuilder,
    s: Arc<ServicesGenerale>,
) -> MessageBusBuilder {
    use handlers::*;
    use queries::*;

    builder
        .register(Arc::clone(&s), initier_proposition)
        .register(Arc::clone(&s), completer_curriculum)
        .register(Arc::clone(&s), soumettre_proposition)
        .register(Arc::clone(&s), supprimer_proposition)
        .register(Arc::clone(&s), payer_frais_dossier)
        .register(Arc::clone(&s), completer_documents_par_candidat)
        .register(Arc::clone(&s), specifier_paiement_necessaire_par_gestionnaire)
        .register(Arc::clone(&s), specifier_paiement_plus_necessaire)
        .register(Arc::clone(&s), reclamer_documents_par_fac)
        .register(Arc::clone(&s), reclamer_documents_par_sic)
        .register(Arc::clone(&s), annuler_reclamation_documents_par_fac)
        .register(Arc::clone(&s), annuler_reclamation_documents_par_sic)
        .register(Arc::clone(&s), modifier_statut_checklist)
        .register(Arc::clone(&s), modifier_statut_checklist_parcours_anterieur)
        .register(Arc::clone(&s), modifier_statut_checklist_experience)
        .register(Arc::clone(&s), modifier_authentification_experience)
        .register(Arc::clone(&s), specifier_condition_acces)
        .register(Arc::clone(&s), envoyer_proposition_a_fac)
        .register(Arc::clone(&s), envoyer_proposition_au_sic)
        .register(Arc::clone(&s), refuser_proposition_par_faculte)
        .register(Arc::clone(&s), approuver_proposition_par_faculte)
        .register(Arc::clone(&s), approuver_reorientation_externe_par_faculte)
        .register(Arc::clone(&s), approuver_admission_par_sic)
        .register(Arc::clone(&s), refuser_admission_par_sic)
        .register(Arc::clone(&s), get_proposition)
        .register(Arc::clone(&s), lister_propositions_candidat)
        .register(s, recuperer_titres_acces)
}
