use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

/// Handle returned by [`MessageChannel::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receiving end of a channel subscription
///
/// Closed once the channel unsubscribes it or is dropped.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    receiver: mpsc::UnboundedReceiver<String>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub async fn recv(&mut self) -> Option<String> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<String> {
        self.receiver.try_recv().ok()
    }
}

#[derive(Debug, Default)]
struct ChannelState {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, mpsc::UnboundedSender<String>)>,
}

/// Fire-and-forget string channel between two rendering contexts
///
/// Cloning shares the same subscriber set. Posting never blocks; each
/// subscriber sees messages in posting order.
#[derive(Debug, Clone, Default)]
pub struct MessageChannel {
    state: Arc<Mutex<ChannelState>>,
}

impl MessageChannel {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ChannelState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut state = self.lock();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        state.subscribers.push((id, sender));
        Subscription { id, receiver }
    }

    /// Drop a subscriber; returns whether it was registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut state = self.lock();
        let before = state.subscribers.len();
        state.subscribers.retain(|(existing, _)| *existing != id);
        before != state.subscribers.len()
    }

    /// Deliver to every live subscriber; returns the delivery count
    pub fn post(&self, message: impl Into<String>) -> usize {
        let message = message.into();
        let mut state = self.lock();
        state
            .subscribers
            .retain(|(_, sender)| sender.send(message.clone()).is_ok());
        state.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }
}
