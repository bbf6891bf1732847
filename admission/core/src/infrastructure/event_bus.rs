// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Event Bus Implementation - Pub/Sub for Domain Events
//
// In-memory event streaming over tokio broadcast channels. Handlers publish
// after a successful save; events are lost on restart.

use crate::domain::events::{PropositionEvent, SupervisionEvent};
use crate::domain::shared::identite::PropositionIdentity;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Unified domain event type for the event bus
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    Proposition(PropositionEvent),
    Supervision(SupervisionEvent),
    /// A history or notification port failed after the command was saved.
    SideEffectFailed {
        proposition_id: PropositionIdentity,
        port: String,
        message: String,
    },
}

impl DomainEvent {
    pub fn proposition_id(&self) -> &PropositionIdentity {
        match self {
            Self::Proposition(event) => event.proposition_id(),
            Self::Supervision(event) => event.proposition_id(),
            Self::SideEffectFailed { proposition_id, .. } => proposition_id,
        }
    }
}

/// Event bus for publishing and subscribing to domain events
#[derive(Clone)]
pub struct EventBus {
    sender: Arc<broadcast::Sender<DomainEvent>>,
}

impl EventBus {
    /// Capacity is the number of events buffered before the oldest are dropped.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn with_default_capacity() -> Self {
        Self::new(1000)
    }

    pub fn publish_proposition_event(&self, event: PropositionEvent) {
        self.publish(DomainEvent::Proposition(event));
    }

    pub fn publish_supervision_event(&self, event: SupervisionEvent) {
        self.publish(DomainEvent::Supervision(event));
    }

    pub fn publish_side_effect_failure(
        &self,
        proposition_id: PropositionIdentity,
        port: &str,
        message: String,
    ) {
        self.publish(DomainEvent::SideEffectFailed {
            proposition_id,
            port: port.to_string(),
            message,
        });
    }

    fn publish(&self, event: DomainEvent) {
        debug!("Publishing event: {:?}", event);

        let receiver_count = self.sender.send(event).unwrap_or(0);
        if receiver_count == 0 {
            debug!("No subscribers listening to event");
        }
    }

    /// Subscribe to all domain events
    pub fn subscribe(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.sender.subscribe(),
        }
    }

    /// Subscribe to the events of one proposition only
    pub fn subscribe_proposition(
        &self,
        proposition_id: PropositionIdentity,
    ) -> PropositionEventReceiver {
        PropositionEventReceiver {
            receiver: self.sender.subscribe(),
            proposition_id,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

fn map_recv_error(e: broadcast::error::RecvError) -> EventBusError {
    match e {
        broadcast::error::RecvError::Closed => EventBusError::Closed,
        broadcast::error::RecvError::Lagged(n) => {
            warn!("Event receiver lagged by {} events", n);
            EventBusError::Lagged(n)
        }
    }
}

/// Receiver for all domain events
pub struct EventReceiver {
    receiver: broadcast::Receiver<DomainEvent>,
}

impl EventReceiver {
    pub async fn recv(&mut self) -> Result<DomainEvent, EventBusError> {
        self.receiver.recv().await.map_err(map_recv_error)
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&mut self) -> Result<DomainEvent, EventBusError> {
        self.receiver.try_recv().map_err(|e| match e {
            broadcast::error::TryRecvError::Empty => EventBusError::Empty,
            broadcast::error::TryRecvError::Closed => EventBusError::Closed,
            broadcast::error::TryRecvError::Lagged(n) => {
                warn!("Event receiver lagged by {} events", n);
                EventBusError::Lagged(n)
            }
        })
    }
}

/// Receiver filtered on one proposition
pub struct PropositionEventReceiver {
    receiver: broadcast::Receiver<DomainEvent>,
    proposition_id: PropositionIdentity,
}

impl PropositionEventReceiver {
    /// Next event of the proposition, skipping the others
    pub async fn recv(&mut self) -> Result<DomainEvent, EventBusError> {
        loop {
            let event = self.receiver.recv().await.map_err(map_recv_error)?;
            if event.proposition_id() == &self.proposition_id {
                return Ok(event);
            }
        }
    }
}

/// Errors that can occur when receiving events
#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    #[error("Event bus is closed")]
    Closed,

    #[error("No events available")]
    Empty,

    #[error("Receiver lagged by {0} events (events were dropped)")]
    Lagged(u64),
}

impl Default for EventBus {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::Contexte;
    use chrono::Utc;

    fn initiee(proposition_id: PropositionIdentity) -> PropositionEvent {
        PropositionEvent::PropositionInitiee {
            proposition_id,
            contexte: Contexte::Doctorat,
            matricule_candidat: "0001".to_string(),
            initiee_le: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_event_bus_publish_subscribe() {
        let event_bus = EventBus::new(10);
        let mut receiver = event_bus.subscribe();
        let proposition_id = PropositionIdentity::new();

        event_bus.publish_proposition_event(initiee(proposition_id));

        match receiver.recv().await.unwrap() {
            DomainEvent::Proposition(PropositionEvent::PropositionInitiee {
                proposition_id: id,
                ..
            }) => {
                assert_eq!(id, proposition_id);
            }
            _ => panic!("Wrong event type received"),
        }
    }

    #[tokio::test]
    async fn test_proposition_event_filtering() {
        let event_bus = EventBus::new(10);
        let proposition_id = PropositionIdentity::new();
        let mut receiver = event_bus.subscribe_proposition(proposition_id);

        event_bus.publish_proposition_event(initiee(PropositionIdentity::new()));
        event_bus.publish_side_effect_failure(proposition_id, "historique", "down".to_string());

        match receiver.recv().await.unwrap() {
            DomainEvent::SideEffectFailed { port, .. } => assert_eq!(port, "historique"),
            other => panic!("Wrong event received: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_multiple_subscribers() {
        let event_bus = EventBus::new(10);
        let mut receiver1 = event_bus.subscribe();
        let mut receiver2 = event_bus.subscribe();
        assert_eq!(event_bus.subscriber_count(), 2);

        event_bus.publish_proposition_event(initiee(PropositionIdentity::new()));

        let _ = receiver1.recv().await.unwrap();
        let _ = receiver2.recv().await.unwrap();
        assert!(matches!(receiver1.try_recv(), Err(EventBusError::Empty)));
    }
}
