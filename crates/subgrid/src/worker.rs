//! Worker-thread dispatch for the mesh pipeline.
//!
//! Large-grid triangulation must not block interactive frame delivery, so
//! the pipeline runs on a dedicated thread behind a request/response
//! channel pair. The channel moves the underlying buffers in both
//! directions (zero-copy handoff); the core pipeline itself stays pure and
//! knows nothing about this boundary.

use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use subgrid_core::{LogSink, Result, SubgridError};
use subgrid_mesh::{make_full_mesh, MeshBundle, MeshRequest};

/// Handle to a dedicated mesh-building thread.
///
/// Requests are processed strictly in submission order, one at a time;
/// there is no cancellation. Dropping the handle shuts the thread down and
/// joins it.
pub struct MeshWorker {
    requests: Option<Sender<MeshRequest>>,
    responses: Receiver<Option<MeshBundle>>,
    handle: Option<JoinHandle<()>>,
}

impl MeshWorker {
    /// Spawns the worker thread.
    pub fn spawn() -> Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<MeshRequest>();
        let (response_tx, response_rx) = mpsc::channel();

        let handle = std::thread::Builder::new()
            .name("subgrid-mesh".into())
            .spawn(move || {
                let mut sink = LogSink;
                while let Ok(request) = request_rx.recv() {
                    // A send failure means the handle is gone; stop quietly.
                    if response_tx.send(make_full_mesh(request, &mut sink)).is_err() {
                        break;
                    }
                }
            })?;

        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            handle: Some(handle),
        })
    }

    /// Submits a mesh build without waiting for the result.
    ///
    /// # Errors
    /// Returns [`SubgridError::WorkerDisconnected`] if the worker thread has
    /// exited.
    pub fn submit(&self, request: MeshRequest) -> Result<()> {
        self.requests
            .as_ref()
            .ok_or(SubgridError::WorkerDisconnected)?
            .send(request)
            .map_err(|_| SubgridError::WorkerDisconnected)
    }

    /// Receives the next finished build, blocking until one is available.
    ///
    /// Responses arrive in submission order. `Ok(None)` means the pipeline
    /// could not produce a mesh for that request (see
    /// [`make_full_mesh`]).
    pub fn recv(&self) -> Result<Option<MeshBundle>> {
        self.responses
            .recv()
            .map_err(|_| SubgridError::WorkerDisconnected)
    }

    /// Submits one request and blocks for its result.
    pub fn build(&self, request: MeshRequest) -> Result<Option<MeshBundle>> {
        self.submit(request)?;
        self.recv()
    }
}

impl Drop for MeshWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the worker loop.
        drop(self.requests.take());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
