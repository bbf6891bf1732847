// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Doctorate Application Services
//!
//! Commands, queries and handlers of the doctorate context, and the ports
//! they run against.
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Registration:** [`enregistrer_handlers`], called once by the container

pub mod commands;
pub mod handlers;
pub mod queries;

use crate::application::message_bus::MessageBusBuilder;
use crate::application::services::ServicesCommuns;
use crate::domain::doctorat::groupe_de_supervision::GroupeDeSupervisionRepository;
use crate::domain::doctorat::ports::{IHistoriqueDoctorat, INotificationDoctorat};
use crate::domain::doctorat::proposition::PropositionDoctorat;
use crate::domain::shared::repository::PropositionRepository;
use std::sync::Arc;

/// Ports of the doctorate handlers.
#[derive(Clone)]
pub struct ServicesDoctorat {
    pub commun: ServicesCommuns,
    pub propositions: Arc<dyn PropositionRepository<PropositionDoctorat>>,
    pub groupes: Arc<dyn GroupeDeSupervisionRepository>,
    pub notification: Arc<dyn INotificationDoctorat>,
    pub historique: Arc<dyn IHistoriqueDoctorat>,
}

pub fn enregistrer_handlers(
    builder: MessageBusBuilder,
    s: Arc<ServicesDoctorat>,
) -> MessageBusBuilder {
    use handlers::*;
    use queries::*;

    builder
        // Candidate
        .register(Arc::clone(&s), initier_proposition)
        .register(Arc::clone(&s), completer_proposition)
        .register(Arc::clone(&s), modifier_type_admission)
        .register(Arc::clone(&s), completer_comptabilite)
        .register(Arc::clone(&s), soumettre_proposition)
        .register(Arc::clone(&s), supprimer_proposition)
        .register(Arc::clone(&s), completer_documents_par_candidat)
        // Supervision group
        .register(Arc::clone(&s), identifier_promoteur)
        .register(Arc::clone(&s), identifier_membre_ca)
        .register(Arc::clone(&s), supprimer_promoteur)
        .register(Arc::clone(&s), supprimer_membre_ca)
        .register(Arc::clone(&s), designer_promoteur_reference)
        .register(Arc::clone(&s), definir_cotutelle)
        .register(Arc::clone(&s), demander_signatures)
        .register(Arc::clone(&s), approuver_proposition)
        .register(Arc::clone(&s), refuser_proposition)
        // Documents
        .register(Arc::clone(&s), reclamer_documents_par_cdd)
        .register(Arc::clone(&s), reclamer_documents_par_sic)
        .register(Arc::clone(&s), annuler_reclamation_documents_par_cdd)
        .register(Arc::clone(&s), annuler_reclamation_documents_par_sic)
        // Checklist
        .register(Arc::clone(&s), modifier_statut_checklist)
        .register(Arc::clone(&s), modifier_statut_checklist_parcours_anterieur)
        .register(Arc::clone(&s), modifier_statut_checklist_experience)
        .register(Arc::clone(&s), modifier_authentification_experience)
        .register(Arc::clone(&s), specifier_condition_acces)
        .register(Arc::clone(&s), specifier_financabilite_regle)
        .register(Arc::clone(&s), specifier_financabilite_non_concernee)
        .register(Arc::clone(&s), specifier_derogation_financabilite)
        // CDD
        .register(Arc::clone(&s), envoyer_proposition_a_cdd)
        .register(Arc::clone(&s), envoyer_proposition_au_sic)
        .register(Arc::clone(&s), refuser_proposition_par_cdd)
        .register(Arc::clone(&s), approuver_proposition_par_cdd)
        .register(Arc::clone(&s), cloturer_proposition_par_cdd)
        // SIC
        .register(Arc::clone(&s), specifier_besoin_de_derogation)
        .register(Arc::clone(&s), specifier_motifs_refus_par_sic)
        .register(Arc::clone(&s), refuser_admission_par_sic)
        .register(Arc::clone(&s), specifier_informations_acceptation_par_sic)
        .register(Arc::clone(&s), approuver_admission_par_sic)
        .register(Arc::clone(&s), approuver_inscription_par_sic)
        // Queries
        .register(Arc::clone(&s), get_proposition)
        .register(Arc::clone(&s), get_groupe_de_supervision)
        .register(Arc::clone(&s), lister_propositions_candidat)
        .register(s, recuperer_titres_acces)
}
