//! Background worker thread: owns the drilldown controller.
//!
//! Communication with the TUI main thread is via `mpsc` channels. Commands
//! are handled one at a time, so at most one load/render is in flight and
//! renders can never interleave.

use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, info};

use geodrill_core::{
    BoundaryLoader, DrilldownController, FailedScene, MapScene, MapView, RenderOutcome,
};

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    /// Render the root region.
    Start,
    /// A feature was selected on the map.
    Click { feature: String },
    Back,
    /// Render the current region again.
    Reload,
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug, Clone)]
pub enum WorkerResponse {
    Loading(bool),
    Drawn(Box<MapScene>),
    Failed(Box<FailedScene>),
    /// The clicked feature has no child region.
    NoDrilldown { feature: String },
}

/// `MapView` that forwards every draw call to the UI thread.
pub struct ChannelView {
    tx: Sender<WorkerResponse>,
}

impl ChannelView {
    pub fn new(tx: Sender<WorkerResponse>) -> Self {
        Self { tx }
    }

    fn send(&self, resp: WorkerResponse) {
        // The UI may already be gone during shutdown.
        let _ = self.tx.send(resp);
    }
}

impl MapView for ChannelView {
    fn set_loading(&mut self, loading: bool) {
        self.send(WorkerResponse::Loading(loading));
    }

    fn draw_map(&mut self, scene: MapScene) {
        self.send(WorkerResponse::Drawn(Box::new(scene)));
    }

    fn draw_failure(&mut self, scene: FailedScene) {
        self.send(WorkerResponse::Failed(Box::new(scene)));
    }
}

/// Spawn the background worker thread.
pub fn spawn_worker<L>(
    controller: DrilldownController<L, ChannelView>,
    rx: Receiver<WorkerCommand>,
) -> io::Result<JoinHandle<()>>
where
    L: BoundaryLoader + Send + 'static,
{
    thread::Builder::new()
        .name("geodrill-worker".into())
        .spawn(move || worker_loop(controller, rx))
}

fn worker_loop<L: BoundaryLoader>(
    mut controller: DrilldownController<L, ChannelView>,
    rx: Receiver<WorkerCommand>,
) {
    loop {
        match rx.recv() {
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
            Ok(cmd) => handle_command(&mut controller, cmd),
        }
    }
    info!("worker stopped");
}

/// Every navigation command gets an answer that clears the UI's busy flag:
/// the `Loading(false)` that ends a render, `NoDrilldown` for a rejected
/// click, or a bare `Loading(false)` when nothing was drawn.
fn handle_command<L: BoundaryLoader>(
    controller: &mut DrilldownController<L, ChannelView>,
    cmd: WorkerCommand,
) {
    debug!(?cmd, current = %controller.current(), "worker command");
    let outcome = match cmd {
        WorkerCommand::Start => Some(controller.start()),
        WorkerCommand::Click { feature } => match controller.on_feature_clicked(&feature) {
            Some(outcome) => Some(outcome),
            None => {
                controller
                    .view()
                    .send(WorkerResponse::NoDrilldown { feature });
                return;
            }
        },
        WorkerCommand::Back => controller.go_back(),
        WorkerCommand::Reload => Some(controller.reload()),
        WorkerCommand::Shutdown => return, // handled in loop
    };
    if matches!(outcome, None | Some(RenderOutcome::Skipped)) {
        controller.view().send(WorkerResponse::Loading(false));
    }
}
