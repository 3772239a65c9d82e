//! Shared test doubles: a scripted boundary source and a recording view.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use geodrill_core::data::{BoundarySource, LoadError};
use geodrill_core::{FailedScene, MapScene, MapView, RegionKey};

/// Serves canned responses per URL and records every fetch.
#[derive(Default)]
pub struct ScriptedSource {
    responses: HashMap<String, Result<String, LoadError>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ok(mut self, url: &str, body: impl Into<String>) -> Self {
        self.responses.insert(url.to_string(), Ok(body.into()));
        self
    }

    pub fn status(mut self, url: &str, status: u16) -> Self {
        self.responses.insert(
            url.to_string(),
            Err(LoadError::Status {
                url: url.to_string(),
                status,
            }),
        );
        self
    }

    pub fn network(mut self, url: &str) -> Self {
        self.responses.insert(
            url.to_string(),
            Err(LoadError::Network {
                url: url.to_string(),
                message: "connection refused".into(),
            }),
        );
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl BoundarySource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn fetch(&self, url: &str) -> Result<String, LoadError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.responses.get(url).cloned().unwrap_or_else(|| {
            Err(LoadError::Status {
                url: url.to_string(),
                status: 404,
            })
        })
    }
}

/// One call made on the view.
#[derive(Debug, Clone)]
pub enum ViewEvent {
    Loading(bool),
    Drawn(MapScene),
    Failed(FailedScene),
}

#[derive(Default)]
pub struct RecordingView {
    pub events: Vec<ViewEvent>,
}

impl RecordingView {
    pub fn drawn_regions(&self) -> Vec<RegionKey> {
        self.events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Drawn(scene) => Some(scene.region),
                ViewEvent::Failed(scene) => Some(scene.region),
                ViewEvent::Loading(_) => None,
            })
            .collect()
    }

    pub fn last_failure(&self) -> Option<&FailedScene> {
        self.events.iter().rev().find_map(|e| match e {
            ViewEvent::Failed(scene) => Some(scene),
            _ => None,
        })
    }

    pub fn last_scene(&self) -> Option<&MapScene> {
        self.events.iter().rev().find_map(|e| match e {
            ViewEvent::Drawn(scene) => Some(scene),
            _ => None,
        })
    }
}

impl MapView for RecordingView {
    fn set_loading(&mut self, loading: bool) {
        self.events.push(ViewEvent::Loading(loading));
    }

    fn draw_map(&mut self, scene: MapScene) {
        self.events.push(ViewEvent::Drawn(scene));
    }

    fn draw_failure(&mut self, scene: FailedScene) {
        self.events.push(ViewEvent::Failed(scene));
    }
}

/// A feature collection with one small square per name.
pub fn feature_collection(property: &str, names: &[&str]) -> String {
    let features: Vec<String> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let x = i as f64 * 2.0;
            format!(
                r#"{{"type":"Feature","properties":{{"{property}":"{name}"}},"geometry":{{"type":"Polygon","coordinates":[[[{x},0.0],[{x1},0.0],[{x1},1.0],[{x},1.0],[{x},0.0]]]}}}}"#,
                x1 = x + 1.0,
            )
        })
        .collect();
    format!(r#"{{"type":"FeatureCollection","features":[{}]}}"#, features.join(","))
}
