use navmenu_engine::SectionLoader;
use tokio::sync::mpsc::error::TryRecvError;

use super::*;

/// A handle to the section loader actor. Cheap to clone; all clones feed the same
/// actor.
#[derive(Clone, Debug)]
pub struct SectionLoaderHandle {
    pub(crate) request_sender: mpsc::UnboundedSender<LoaderMessage>,
}

impl SectionLoaderHandle {
    /// Create a builder to configure the loader before starting it.
    pub fn builder() -> SectionLoaderBuilder {
        SectionLoaderBuilder::default()
    }

    pub fn try_request(&self, id: SectionId) -> Result<(), LoaderError> {
        self.send(LoaderMessage::Load(id))
    }

    pub fn try_release(&self, id: SectionId) -> Result<(), LoaderError> {
        self.send(LoaderMessage::Release(id))
    }

    /// Sends a shutdown signal. Fetches still running are abandoned.
    pub fn shutdown(&self) {
        let _ = self.request_sender.send(LoaderMessage::Shutdown);
    }

    pub fn is_closed(&self) -> bool {
        self.request_sender.is_closed()
    }

    fn send(&self, message: LoaderMessage) -> Result<(), LoaderError> {
        self.request_sender
            .send(message)
            .map_err(|_| RecvError::SendError)
            .map_err(LoaderError::from)
    }
}

impl SectionLoader for SectionLoaderHandle {
    fn request(&mut self, id: SectionId) -> navmenu_error::Result<()> {
        self.try_request(id).map_err(|e| {
            tracing::error!(section = %id, error = %e, "section request not delivered");
            e.into()
        })
    }

    fn release(&mut self, id: SectionId) {
        if let Err(e) = self.try_release(id) {
            tracing::debug!(section = %id, error = %e, "section release not delivered");
        }
    }
}

/// Receiving end for fetch outcomes.
#[derive(Debug)]
pub struct SectionEvents {
    pub(crate) receiver: mpsc::Receiver<SectionEvent>,
}

impl SectionEvents {
    /// Next completed fetch if one is waiting. Never blocks.
    pub fn try_next(&mut self) -> Result<Option<SectionEvent>, LoaderError> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(RecvError::RecvError.into()),
        }
    }

    /// Waits for the next completed fetch. `None` once the loader has stopped.
    pub async fn recv(&mut self) -> Option<SectionEvent> {
        self.receiver.recv().await
    }

    /// Blocking variant of [`recv`](Self::recv) for loops that are not async.
    /// Panics when called from inside a Tokio runtime.
    pub fn blocking_recv(&mut self) -> Option<SectionEvent> {
        self.receiver.blocking_recv()
    }
}
