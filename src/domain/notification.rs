use std::collections::HashMap;

/// The caller-supplied payload, shared by every envelope of one dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub data: HashMap<String, String>,
}

/// One outbound message bound to exactly one device token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub token: String,
    pub title: String,
    pub body: String,
    pub data: HashMap<String, String>,
}

impl Envelope {
    #[must_use]
    pub fn for_token(token: impl Into<String>, request: &NotificationRequest) -> Self {
        Self {
            token: token.into(),
            title: request.title.clone(),
            body: request.body.clone(),
            data: request.data.clone(),
        }
    }
}

/// Classified result of a single send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    Delivered,
    TransientFailure(String),
    PermanentInvalidToken,
}

impl DeliveryOutcome {
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Only a permanently invalid token may remove stored state.
    #[must_use]
    pub const fn should_prune(&self) -> bool {
        matches!(self, Self::PermanentInvalidToken)
    }
}

/// Aggregate counts for one dispatch call. `delivered + failed == attempted`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
    pub pruned: usize,
}

impl DispatchOutcome {
    pub const fn record(&mut self, outcome: &DeliveryOutcome) {
        self.attempted += 1;
        if outcome.is_delivered() {
            self.delivered += 1;
        } else {
            self.failed += 1;
        }
    }

    pub const fn merge(&mut self, other: Self) {
        self.attempted += other.attempted;
        self.delivered += other.delivered;
        self.failed += other.failed;
        self.pruned += other.pruned;
    }
}
