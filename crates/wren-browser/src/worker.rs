//! Background document loading.
//!
//! A load blocks for as long as its fetch does, so a presentation thread
//! hands it to a worker and picks the result up later. Each load gets its
//! own thread and delivers exactly one result.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread::{self, JoinHandle};

use wren_common::HttpClient;

use crate::{LoadError, LoadedDocument, load_document};

/// Load `address` on a new thread and pass the result to `callback`.
///
/// The callback runs exactly once, on the worker thread.
pub fn spawn_load<F>(address: impl Into<String>, client: HttpClient, callback: F) -> JoinHandle<()>
where
    F: FnOnce(Result<LoadedDocument, LoadError>) + Send + 'static,
{
    let address = address.into();
    thread::spawn(move || {
        log::debug!("background load of {address}");
        callback(load_document(&address, &client));
    })
}

/// Start loading `address` in the background.
pub fn load_in_background(address: impl Into<String>, client: HttpClient) -> PendingLoad {
    let (sender, receiver) = mpsc::channel();
    let _worker = spawn_load(address, client, move |result| {
        // The receiver may already be gone; the result is simply dropped.
        let _ = sender.send(result);
    });
    PendingLoad { receiver }
}

/// A load running on a worker thread.
///
/// The result can be taken once. After that, [`PendingLoad::try_take`]
/// reports [`LoadError::WorkerDisconnected`].
#[derive(Debug)]
#[must_use = "the load result is lost if the pending load is dropped"]
pub struct PendingLoad {
    receiver: Receiver<Result<LoadedDocument, LoadError>>,
}

impl PendingLoad {
    /// Take the result if the load has finished, without blocking.
    ///
    /// Returns `None` while the load is still running.
    #[must_use]
    pub fn try_take(&self) -> Option<Result<LoadedDocument, LoadError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(LoadError::WorkerDisconnected)),
        }
    }

    /// Block until the load finishes.
    ///
    /// # Errors
    ///
    /// The load's own error, or [`LoadError::WorkerDisconnected`] if the
    /// worker exited without sending one.
    pub fn wait(self) -> Result<LoadedDocument, LoadError> {
        self.receiver
            .recv()
            .unwrap_or(Err(LoadError::WorkerDisconnected))
    }
}
