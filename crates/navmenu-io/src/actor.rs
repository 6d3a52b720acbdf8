use super::*;

/// A message that can be sent to the section loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoaderMessage {
    Load(SectionId),
    /// The engine evicted the section; a later `Load` fetches it again.
    Release(SectionId),
    Shutdown,
}

/// Actor owning the fetches. Runs on the loader thread's runtime.
pub struct SectionLoaderActor {
    request_receiver: mpsc::UnboundedReceiver<LoaderMessage>,
    events: mpsc::Sender<SectionEvent>,
    store: Arc<SectionStore>,
    in_flight: HashSet<SectionId>,
    delivered: HashSet<SectionId>,
}

impl SectionLoaderActor {
    pub(crate) fn new(
        request_receiver: mpsc::UnboundedReceiver<LoaderMessage>,
        events: mpsc::Sender<SectionEvent>,
        store: SectionStore,
    ) -> Self {
        Self {
            request_receiver,
            events,
            store: Arc::new(store),
            in_flight: HashSet::new(),
            delivered: HashSet::new(),
        }
    }

    /// Runs the actor's event loop until shutdown, until every handle is dropped, or
    /// until nobody listens for events anymore.
    pub async fn run(mut self) {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel::<SectionEvent>();
        loop {
            tokio::select! {
                message = self.request_receiver.recv() => {
                    match message {
                        Some(LoaderMessage::Load(id)) => self.load(id, &done_tx),
                        Some(LoaderMessage::Release(id)) => self.release(id),
                        Some(LoaderMessage::Shutdown) | None => break,
                    }
                },
                Some(event) = done_rx.recv() => {
                    if !self.complete(event).await {
                        break;
                    }
                },
            }
        }
        tracing::debug!(in_flight = self.in_flight.len(), "section loader stopped");
    }

    fn load(&mut self, id: SectionId, done: &mpsc::UnboundedSender<SectionEvent>) {
        if self.in_flight.contains(&id) || self.delivered.contains(&id) {
            tracing::debug!(section = %id, "duplicate load dropped");
            return;
        }
        self.in_flight.insert(id);
        tracing::debug!(section = %id, "fetching section");

        let store = self.store.clone();
        let done = done.clone();
        tokio::spawn(async move {
            let event = match store.fetch(id).await {
                Ok(root) => SectionEvent::Loaded { id, root },
                Err(e) => {
                    tracing::warn!(section = %id, error = %e, "section fetch failed");
                    SectionEvent::Failed {
                        id,
                        message: e.to_string(),
                    }
                }
            };
            let _ = done.send(event);
        });
    }

    fn release(&mut self, id: SectionId) {
        if self.delivered.remove(&id) {
            tracing::trace!(section = %id, "section released");
        }
    }

    /// Records the outcome and forwards it. Returns `false` once the event receiver
    /// is gone.
    async fn complete(&mut self, event: SectionEvent) -> bool {
        let id = event.id();
        self.in_flight.remove(&id);
        if matches!(event, SectionEvent::Loaded { .. }) {
            self.delivered.insert(id);
        }
        if self.events.send(event).await.is_err() {
            tracing::debug!(section = %id, "event receiver dropped");
            return false;
        }
        true
    }
}
