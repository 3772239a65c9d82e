//! Application state: single-owner, main-thread only.
//!
//! The drilldown controller lives on the worker thread; this side only keeps
//! what is on screen and forwards user intent as `WorkerCommand`s.

use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};

use chrono::NaiveDateTime;

use geodrill_core::{FailedScene, MapScene, RegionKey};

use crate::viewport::Viewport;
use crate::worker::{WorkerCommand, WorkerResponse};

const ERROR_HISTORY_CAP: usize = 50;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// An error record for the error history overlay.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Error category for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Worker,
    Other,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NET",
            ErrorCategory::Data => "DATA",
            ErrorCategory::Worker => "WRK",
            ErrorCategory::Other => "ERR",
        }
    }

    pub fn from_load_category(category: &str) -> Self {
        match category {
            "network" => ErrorCategory::Network,
            "data" => ErrorCategory::Data,
            _ => ErrorCategory::Other,
        }
    }
}

/// What the map area currently shows.
#[derive(Debug, Clone)]
pub enum Screen {
    /// Nothing drawn yet.
    Empty,
    Map(Box<MapScene>),
    Failed(Box<FailedScene>),
}

/// One selectable row in the region list.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionRow {
    pub name: String,
    pub value: Option<f64>,
    /// Child region this feature drills into.
    pub drills_into: Option<RegionKey>,
}

/// Rows for a scene: features with data first (highest value first), then
/// the rest alphabetically. Duplicate names collapse into one row.
pub fn region_rows(scene: &MapScene) -> Vec<RegionRow> {
    let mut names: Vec<&str> = scene.boundary.names().collect();
    names.sort_unstable();
    names.dedup();

    let mut rows: Vec<RegionRow> = names
        .into_iter()
        .map(|name| RegionRow {
            name: name.to_string(),
            value: scene.value_of(name),
            drills_into: scene.drills_into(name),
        })
        .collect();

    rows.sort_by(|a, b| match (a.value, b.value) {
        (Some(x), Some(y)) => y.total_cmp(&x).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    });
    rows
}

/// Map panel state.
#[derive(Debug)]
pub struct MapPanelState {
    pub screen: Screen,
    pub rows: Vec<RegionRow>,
    pub cursor: usize,
    pub viewport: Viewport,
}

impl MapPanelState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Empty,
            rows: Vec::new(),
            cursor: 0,
            viewport: Viewport::default(),
        }
    }

    pub fn selected(&self) -> Option<&RegionRow> {
        self.rows.get(self.cursor)
    }

    pub fn select_next(&mut self) {
        if self.cursor + 1 < self.rows.len() {
            self.cursor += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn scene(&self) -> Option<&MapScene> {
        match &self.screen {
            Screen::Map(scene) => Some(scene),
            _ => None,
        }
    }
}

impl Default for MapPanelState {
    fn default() -> Self {
        Self::new()
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    ErrorHistory,
}

/// Top-level application state.
pub struct AppState {
    pub running: bool,
    pub loading: bool,
    /// Navigation path of the last render, for the breadcrumb.
    pub path: Vec<RegionKey>,
    pub map: MapPanelState,

    // Worker communication
    pub worker_tx: Sender<WorkerCommand>,
    pub worker_rx: Receiver<WorkerResponse>,

    // Cross-cutting
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    pub overlay: Overlay,
}

impl AppState {
    pub fn new(
        worker_tx: Sender<WorkerCommand>,
        worker_rx: Receiver<WorkerResponse>,
        root: RegionKey,
    ) -> Self {
        Self {
            running: true,
            loading: false,
            path: vec![root],
            map: MapPanelState::new(),
            worker_tx,
            worker_rx,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            overlay: Overlay::None,
        }
    }

    /// Back is disabled at the root and while a load is in flight.
    pub fn back_enabled(&self) -> bool {
        self.path.len() > 1 && !self.loading
    }

    pub fn breadcrumb(&self) -> String {
        self.path
            .iter()
            .map(|k| k.label())
            .collect::<Vec<_>>()
            .join(" / ")
    }

    /// Send a command to the worker, recording a failure if it has gone away.
    pub fn send(&mut self, cmd: WorkerCommand) -> bool {
        if self.worker_tx.send(cmd).is_err() {
            self.push_error(
                ErrorCategory::Worker,
                "map worker stopped".into(),
                "command channel closed".into(),
            );
            return false;
        }
        true
    }

    /// Send a navigation command and mark the UI busy until the worker
    /// answers with `Loading(false)` or `NoDrilldown`.
    fn send_navigation(&mut self, cmd: WorkerCommand) {
        if self.send(cmd) {
            self.loading = true;
        }
    }

    /// "Click" the selected feature.
    pub fn request_drill(&mut self) {
        if self.loading {
            return;
        }
        let Some(feature) = self.map.selected().map(|r| r.name.clone()) else {
            return;
        };
        self.send_navigation(WorkerCommand::Click { feature });
    }

    pub fn request_back(&mut self) {
        if !self.back_enabled() {
            return;
        }
        self.send_navigation(WorkerCommand::Back);
    }

    pub fn request_reload(&mut self) {
        if self.loading {
            return;
        }
        self.send_navigation(WorkerCommand::Reload);
    }

    /// Apply one worker response to the screen state.
    pub fn apply(&mut self, resp: WorkerResponse) {
        match resp {
            WorkerResponse::Loading(loading) => {
                self.loading = loading;
            }
            WorkerResponse::Drawn(scene) => {
                self.path = scene.path.clone();
                self.map.rows = region_rows(&scene);
                self.map.cursor = 0;
                self.map.viewport = Viewport::fit(scene.boundary.bounds);
                let with_data = self.map.rows.iter().filter(|r| r.value.is_some()).count();
                self.set_status(format!(
                    "{}: {} shapes, {with_data} with data",
                    scene.title,
                    scene.boundary.feature_count(),
                ));
                self.map.screen = Screen::Map(scene);
            }
            WorkerResponse::Failed(failure) => {
                self.path = failure.path.clone();
                self.map.rows.clear();
                self.map.cursor = 0;
                self.push_error(
                    ErrorCategory::from_load_category(failure.error.category()),
                    failure.error.to_string(),
                    failure.title.clone(),
                );
                self.map.screen = Screen::Failed(failure);
            }
            WorkerResponse::NoDrilldown { feature } => {
                self.loading = false;
                self.set_warning(format!("{feature}: no drill-down"));
            }
        }
    }

    /// Push an error to the history, capping at 50.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        if self.error_history.len() > ERROR_HISTORY_CAP {
            self.error_history.pop_back();
        }
        self.status_message = Some((message, StatusLevel::Error));
    }

    /// Set an info status message.
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    /// Set a warning status message.
    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
