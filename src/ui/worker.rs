//! Background scan worker
//!
//! Scans run on one worker thread so the event loop keeps drawing. When
//! several requests queue up while a scan is running, only the newest one is
//! scanned next; the navigator would discard the others anyway.

use super::error::{Result, UiError};
use crate::explore::{ScanRequest, ScanRequestId};
use crate::scan::{DirectoryNode, DirectoryScanner, ScanError};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use tracing::debug;

/// A finished scan
pub type ScanResult = (ScanRequestId, std::result::Result<DirectoryNode, ScanError>);

pub struct ScanWorker {
    requests: Option<Sender<ScanRequest>>,
    results: Receiver<ScanResult>,
    handle: Option<JoinHandle<()>>,
}

impl ScanWorker {
    /// Start the worker thread
    #[must_use]
    pub fn spawn(scanner: Arc<dyn DirectoryScanner>) -> Self {
        let (request_tx, request_rx) = mpsc::channel::<ScanRequest>();
        let (result_tx, result_rx) = mpsc::channel::<ScanResult>();

        let handle = thread::spawn(move || {
            while let Ok(mut request) = request_rx.recv() {
                while let Ok(newer) = request_rx.try_recv() {
                    debug!(skipped = %request.id, "superseded before scanning");
                    request = newer;
                }

                let result = scanner.scan(request.target.path.as_deref(), request.target.depth);
                if result_tx.send((request.id, result)).is_err() {
                    break;
                }
            }
        });

        Self {
            requests: Some(request_tx),
            results: result_rx,
            handle: Some(handle),
        }
    }

    /// Queue a scan
    ///
    /// # Errors
    ///
    /// Returns `UiError::WorkerStopped` if the worker thread has exited.
    pub fn submit(&self, request: ScanRequest) -> Result<()> {
        self.requests
            .as_ref()
            .ok_or(UiError::WorkerStopped)?
            .send(request)
            .map_err(|_| UiError::WorkerStopped)
    }

    /// Next finished scan, if any, without blocking
    ///
    /// # Errors
    ///
    /// Returns `UiError::WorkerStopped` if the worker thread has exited.
    pub fn try_next(&self) -> Result<Option<ScanResult>> {
        match self.results.try_recv() {
            Ok(result) => Ok(Some(result)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(UiError::WorkerStopped),
        }
    }

    /// Block until the next scan finishes
    #[cfg(test)]
    fn next_blocking(&self) -> Option<ScanResult> {
        self.results.recv_timeout(std::time::Duration::from_secs(5)).ok()
    }
}

impl Drop for ScanWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
