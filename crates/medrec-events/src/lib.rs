//! Channel-backed implementations of
//! [`EventPublisher`](medrec_core::events::EventPublisher).
//!
//! [`ChannelPublisher`] hands events to an in-process relay task over an
//! unbounded channel. The relay side is where a broker producer would
//! attach; the publishing side never blocks and never surfaces delivery
//! failures, matching the fire-and-forget contract.

use medrec_core::events::{EventPublisher, PatientCreated};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

// ─── Channel publisher ───────────────────────────────────────────────────────

/// Publishes lifecycle events onto an unbounded in-process channel.
///
/// Cheap to clone. `publish` is a non-blocking send; if the relay has shut
/// down the event is logged at warn and dropped — the triggering operation
/// is never failed or rolled back.
#[derive(Clone)]
pub struct ChannelPublisher {
  tx: UnboundedSender<PatientCreated>,
}

impl ChannelPublisher {
  /// Create a publisher plus the receiver half the relay task drains.
  pub fn channel() -> (Self, UnboundedReceiver<PatientCreated>) {
    let (tx, rx) = unbounded_channel();
    (Self { tx }, rx)
  }
}

impl EventPublisher for ChannelPublisher {
  fn publish(&self, event: PatientCreated) {
    tracing::debug!(patient_id = %event.id, "dispatching patient-created event");
    if let Err(e) = self.tx.send(event) {
      // Relay gone. Fire-and-forget: drop the event, log, move on.
      tracing::warn!(patient_id = %e.0.id, "event relay closed; event dropped");
    }
  }
}

// ─── Noop publisher ──────────────────────────────────────────────────────────

/// Discards every event. Useful for wiring tests and tooling that has no
/// downstream consumers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

impl EventPublisher for NoopPublisher {
  fn publish(&self, _event: PatientCreated) {}
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDate;
  use uuid::Uuid;

  fn event() -> PatientCreated {
    PatientCreated {
      id:            Uuid::new_v4(),
      name:          "Ana".into(),
      email:         "ana@x.com".into(),
      address:       "1 Main St".into(),
      date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
    }
  }

  #[tokio::test]
  async fn published_events_reach_the_receiver_in_order() {
    let (publisher, mut rx) = ChannelPublisher::channel();

    let first = event();
    let second = event();
    publisher.publish(first.clone());
    publisher.publish(second.clone());

    assert_eq!(rx.recv().await.unwrap(), first);
    assert_eq!(rx.recv().await.unwrap(), second);
  }

  #[tokio::test]
  async fn publish_after_receiver_dropped_does_not_panic() {
    let (publisher, rx) = ChannelPublisher::channel();
    drop(rx);
    publisher.publish(event());
  }
}
