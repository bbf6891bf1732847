// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Message Bus
//!
//! Routes each command or query to the one handler registered for its type.
//! The routing table is built once by [`MessageBusBuilder`] from the
//! [`AdmissionContainer`](crate::application::container::AdmissionContainer)
//! and is immutable afterwards.
//!
//! ```text
//! caller ──invoke(cmd)──► MessageBus ──TypeId──► handler(Arc<State>, cmd) ──► Result<Output>
//!                              │
//!                              └── admission_commands_total{command, outcome}
//! ```
//!
//! # Architecture
//!
//! - **Layer:** Application Layer
//! - **Unknown command:** [`AdmissionError::HandlerNotRegistered`]

use crate::domain::shared::exceptions::AdmissionError;
use futures::future::BoxFuture;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Message with exactly one handler on the bus.
pub trait Command: Send + 'static {
    type Output: Send + 'static;
}

type Reponse = Result<Box<dyn Any + Send>, AdmissionError>;
type HandlerEfface = Arc<dyn Fn(Box<dyn Any + Send>) -> BoxFuture<'static, Reponse> + Send + Sync>;

/// Type name relative to the application layer, used as metric label:
/// `"doctorat::commands::InitierPropositionCommand"`. The context prefix keeps
/// same-named commands of different contexts apart.
fn nom_court<C>() -> &'static str {
    let complet = type_name::<C>();
    complet
        .split_once("application::")
        .map(|(_, relatif)| relatif)
        .unwrap_or(complet)
}

#[derive(Default)]
pub struct MessageBusBuilder {
    handlers: HashMap<TypeId, HandlerEfface>,
}

impl MessageBusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the handler of `C`, replacing any previous one. The handler
    /// receives its own clone of `state` on every call.
    pub fn register<C, S, F, Fut>(mut self, state: Arc<S>, handler: F) -> Self
    where
        C: Command,
        S: Send + Sync + 'static,
        F: Fn(Arc<S>, C) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<C::Output, AdmissionError>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        let efface: HandlerEfface = Arc::new(move |message: Box<dyn Any + Send>| {
            let state = Arc::clone(&state);
            let handler = Arc::clone(&handler);
            Box::pin(async move {
                let command = message
                    .downcast::<C>()
                    .map_err(|_| AdmissionError::HandlerNotRegistered(type_name::<C>()))?;
                let sortie = handler(state, *command).await?;
                Ok(Box::new(sortie) as Box<dyn Any + Send>)
            })
        });
        if self.handlers.insert(TypeId::of::<C>(), efface).is_some() {
            warn!(command = nom_court::<C>(), "Handler registered twice, keeping the last one");
        }
        self
    }

    pub fn build(self) -> MessageBus {
        debug!(handlers = self.handlers.len(), "Message bus built");
        MessageBus {
            handlers: Arc::new(self.handlers),
        }
    }
}

/// Frozen routing table; cheap to clone.
#[derive(Clone)]
pub struct MessageBus {
    handlers: Arc<HashMap<TypeId, HandlerEfface>>,
}

impl MessageBus {
    pub fn builder() -> MessageBusBuilder {
        MessageBusBuilder::new()
    }

    pub fn is_registered<C: Command>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<C>())
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Runs the handler of `C` and returns its output unchanged.
    pub async fn invoke<C: Command>(&self, command: C) -> Result<C::Output, AdmissionError> {
        let nom = nom_court::<C>();
        let Some(handler) = self.handlers.get(&TypeId::of::<C>()).cloned() else {
            error!(command = nom, "No handler registered");
            metrics::counter!(
                "admission_commands_total",
                "command" => nom,
                "outcome" => "unregistered"
            )
            .increment(1);
            return Err(AdmissionError::HandlerNotRegistered(type_name::<C>()));
        };

        let resultat = handler(Box::new(command)).await;
        let outcome = match &resultat {
            Ok(_) => "ok",
            Err(AdmissionError::Business(exceptions)) => {
                warn!(command = nom, codes = ?exceptions.status_codes(), "Command rejected");
                "rejected"
            }
            Err(
                erreur @ (AdmissionError::PropositionNonTrouvee(_)
                | AdmissionError::GroupeDeSupervisionNonTrouve(_)),
            ) => {
                warn!(command = nom, error = %erreur, "Command target not found");
                "not_found"
            }
            Err(erreur) => {
                error!(command = nom, error = %erreur, "Command failed");
                "error"
            }
        };
        metrics::counter!(
            "admission_commands_total",
            "command" => nom,
            "outcome" => outcome
        )
        .increment(1);

        resultat?
            .downcast::<C::Output>()
            .map(|sortie| *sortie)
            .map_err(|_| AdmissionError::HandlerNotRegistered(type_name::<C>()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::exceptions::BusinessException;

    struct Additionner(u32);
    impl Command for Additionner {
        type Output = u32;
    }

    struct Refuser;
    impl Command for Refuser {
        type Output = ();
    }

    struct Orphelin;
    impl Command for Orphelin {
        type Output = ();
    }

    async fn additionner(base: Arc<u32>, commande: Additionner) -> Result<u32, AdmissionError> {
        Ok(*base + commande.0)
    }

    async fn refuser(_: Arc<u32>, _: Refuser) -> Result<(), AdmissionError> {
        Err(BusinessException::PropositionNonBrouillon.into())
    }

    fn bus() -> MessageBus {
        let base = Arc::new(40);
        MessageBus::builder()
            .register(Arc::clone(&base), additionner)
            .register(base, refuser)
            .build()
    }

    #[tokio::test]
    async fn test_invoke_routes_by_command_type() {
        assert_eq!(bus().invoke(Additionner(2)).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_business_errors_are_returned_unchanged() {
        let erreur = bus().invoke(Refuser).await.unwrap_err();
        assert_eq!(erreur.exceptions(), &[BusinessException::PropositionNonBrouillon]);
    }

    #[tokio::test]
    async fn test_unknown_command_is_a_programming_error() {
        let bus = bus();
        assert!(!bus.is_registered::<Orphelin>());
        assert!(matches!(
            bus.invoke(Orphelin).await,
            Err(AdmissionError::HandlerNotRegistered(_))
        ));
        assert_eq!(bus.handler_count(), 2);
    }
}
