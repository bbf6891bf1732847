// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Admission Container
//!
//! Wires repositories, translators, side-effect adapters and the three
//! context handler sets into one [`MessageBus`].
//!
//! ```text
//! AdmissionConfigManifest ──► StorageBackend ──► repository_factory ──┐
//!                                                                     ├─► Services* ──► MessageBus
//! fixtures ──► translators, InMemoryHistorique, InMemoryNotification ─┘
//! ```
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Lifetime:** one per process; tests build one per case and may [`reset`](AdmissionContainer::reset) it

use crate::application::message_bus::MessageBus;
use crate::application::repository_factory::{
    create_groupe_repository, create_proposition_repository, create_titres_repository,
};
use crate::application::services::ServicesCommuns;
use crate::application::titres_acces::{specifier_titre_acces_selectionne, ServicesTitresAcces};
use crate::application::{doctorat, formation_continue, formation_generale};
use crate::domain::admission_config::AdmissionConfigManifest;
use crate::domain::doctorat::groupe_de_supervision::GroupeDeSupervisionRepository;
use crate::domain::doctorat::proposition::PropositionDoctorat;
use crate::domain::formation_continue::proposition::PropositionContinue;
use crate::domain::formation_generale::proposition::PropositionGenerale;
use crate::domain::shared::repository::{
    PropositionRepository, StorageBackend, TitreAccesSelectionnableRepository,
};
use crate::infrastructure::db::Database;
use crate::infrastructure::event_bus::EventBus;
use crate::infrastructure::repositories::{
    InMemoryGroupeDeSupervisionRepository, InMemoryPropositionRepository,
    InMemoryTitreAccesSelectionnableRepository,
};
use crate::infrastructure::translators::{
    FixedAcademicYearTranslator, InMemoryCurriculumTranslator, InMemoryPersonneConnueTranslator,
    InMemoryProfilCandidatTranslator, InMemoryTitresAcces,
};
use crate::infrastructure::{InMemoryHistorique, InMemoryNotification};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;

struct Depots {
    doctorat: Arc<dyn PropositionRepository<PropositionDoctorat>>,
    generale: Arc<dyn PropositionRepository<PropositionGenerale>>,
    continue_: Arc<dyn PropositionRepository<PropositionContinue>>,
    groupes: Arc<dyn GroupeDeSupervisionRepository>,
    titres: Arc<dyn TitreAccesSelectionnableRepository>,
}

/// Concrete in-memory repositories, kept to restore them between test cases.
#[derive(Clone)]
struct DepotsEnMemoire {
    doctorat: InMemoryPropositionRepository<PropositionDoctorat>,
    generale: InMemoryPropositionRepository<PropositionGenerale>,
    continue_: InMemoryPropositionRepository<PropositionContinue>,
    groupes: InMemoryGroupeDeSupervisionRepository,
    titres: InMemoryTitreAccesSelectionnableRepository,
}

impl DepotsEnMemoire {
    fn new() -> Self {
        Self {
            doctorat: InMemoryPropositionRepository::new(),
            generale: InMemoryPropositionRepository::new(),
            continue_: InMemoryPropositionRepository::new(),
            groupes: InMemoryGroupeDeSupervisionRepository::new(),
            titres: InMemoryTitreAccesSelectionnableRepository::new(),
        }
    }

    fn depots(&self) -> Depots {
        Depots {
            doctorat: Arc::new(self.doctorat.clone()),
            generale: Arc::new(self.generale.clone()),
            continue_: Arc::new(self.continue_.clone()),
            groupes: Arc::new(self.groupes.clone()),
            titres: Arc::new(self.titres.clone()),
        }
    }

    async fn reset(&self) {
        self.doctorat.reset().await;
        self.generale.reset().await;
        self.continue_.reset().await;
        self.groupes.reset().await;
        self.titres.reset().await;
    }
}

pub struct AdmissionContainer {
    pub bus: MessageBus,
    pub event_bus: Arc<EventBus>,
    /// History entries written by every context.
    pub historique: InMemoryHistorique,
    /// Messages sent by every context.
    pub notification: InMemoryNotification,
    en_memoire: Option<DepotsEnMemoire>,
    database: Option<Database>,
}

impl AdmissionContainer {
    /// Container over in-memory repositories and the fixture translators,
    /// with the default limits.
    pub fn in_memory() -> Self {
        Self::in_memory_with(&AdmissionConfigManifest::default())
    }

    pub fn in_memory_with(manifest: &AdmissionConfigManifest) -> Self {
        let en_memoire = DepotsEnMemoire::new();
        let depots = en_memoire.depots();
        let mut container = Self::assembler(manifest, depots);
        container.en_memoire = Some(en_memoire);
        container
    }

    /// Container for the backend named in `manifest`. The PostgreSQL backend
    /// opens the pool and creates the schema before any handler runs.
    pub async fn from_config(manifest: &AdmissionConfigManifest) -> anyhow::Result<Self> {
        let backend = manifest.storage_backend();
        match &backend {
            StorageBackend::InMemory => Ok(Self::in_memory_with(manifest)),
            StorageBackend::PostgreSQL(config) => {
                let database = Database::new(config).await?;
                database.ensure_schema().await?;
                let depots = Self::depots_pour(&backend, Some(database.get_pool()))?;
                let mut container = Self::assembler(manifest, depots);
                container.database = Some(database);
                Ok(container)
            }
        }
    }

    fn depots_pour(backend: &StorageBackend, pool: Option<&PgPool>) -> anyhow::Result<Depots> {
        Ok(Depots {
            doctorat: create_proposition_repository(backend, pool)?,
            generale: create_proposition_repository(backend, pool)?,
            continue_: create_proposition_repository(backend, pool)?,
            groupes: create_groupe_repository(backend, pool)?,
            titres: create_titres_repository(backend, pool)?,
        })
    }

    fn assembler(manifest: &AdmissionConfigManifest, depots: Depots) -> Self {
        let event_bus = Arc::new(EventBus::new(manifest.spec.event_bus.capacity));
        let historique = InMemoryHistorique::new();
        let notification = InMemoryNotification::new();

        let commun = ServicesCommuns {
            titres_selectionnables: depots.titres,
            profils: Arc::new(InMemoryProfilCandidatTranslator::default()),
            curriculum: Arc::new(InMemoryCurriculumTranslator::default()),
            annee_academique: Arc::new(FixedAcademicYearTranslator::default()),
            personnes: Arc::new(InMemoryPersonneConnueTranslator::default()),
            titres_acces: Arc::new(InMemoryTitresAcces::default()),
            event_bus: Arc::clone(&event_bus),
            maximum_propositions: manifest.spec.propositions.max_en_cours,
        };

        let services_titres = Arc::new(ServicesTitresAcces {
            commun: commun.clone(),
            doctorat: Arc::clone(&depots.doctorat),
            generale: Arc::clone(&depots.generale),
        });
        let services_doctorat = Arc::new(doctorat::ServicesDoctorat {
            commun: commun.clone(),
            propositions: depots.doctorat,
            groupes: depots.groupes,
            notification: Arc::new(notification.clone()),
            historique: Arc::new(historique.clone()),
        });
        let services_generale = Arc::new(formation_generale::ServicesGenerale {
            commun: commun.clone(),
            propositions: depots.generale,
            notification: Arc::new(notification.clone()),
            historique: Arc::new(historique.clone()),
        });
        let services_continue = Arc::new(formation_continue::ServicesContinue {
            commun,
            propositions: depots.continue_,
            notification: Arc::new(notification.clone()),
            historique: Arc::new(historique.clone()),
        });

        let builder = MessageBus::builder().register(
            services_titres,
            specifier_titre_acces_selectionne,
        );
        let builder = doctorat::enregistrer_handlers(builder, services_doctorat);
        let builder = formation_generale::enregistrer_handlers(builder, services_generale);
        let bus = formation_continue::enregistrer_handlers(builder, services_continue).build();

        info!(handlers = bus.handler_count(), "Admission container ready");
        Self {
            bus,
            event_bus,
            historique,
            notification,
            en_memoire: None,
            database: None,
        }
    }

    /// Whether repositories live in this process.
    pub fn is_in_memory(&self) -> bool {
        self.en_memoire.is_some()
    }

    pub fn database(&self) -> Option<&Database> {
        self.database.as_ref()
    }

    /// Restores the in-memory repositories and empties the recorded history
    /// and notifications. PostgreSQL data is left untouched.
    pub async fn reset(&self) {
        if let Some(en_memoire) = &self.en_memoire {
            en_memoire.reset().await;
        }
        self.historique.reset().await;
        self.notification.reset().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::doctorat::commands::InitierPropositionCommand;
    use crate::application::formation_continue::commands::SoumettrePropositionCommand;
    use crate::application::titres_acces::SpecifierTitreAccesSelectionneCommand;

    #[test]
    fn test_every_context_is_registered() {
        let container = AdmissionContainer::in_memory();
        assert!(container.is_in_memory());
        assert!(container.bus.is_registered::<InitierPropositionCommand>());
        assert!(container.bus.is_registered::<SoumettrePropositionCommand>());
        assert!(container.bus.is_registered::<SpecifierTitreAccesSelectionneCommand>());
    }

    #[tokio::test]
    async fn test_from_config_defaults_to_memory() {
        let container = AdmissionContainer::from_config(&AdmissionConfigManifest::default())
            .await
            .unwrap();
        assert!(container.is_in_memory());
        assert!(container.database().is_none());
    }
}
