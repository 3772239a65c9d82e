//! Test helpers for creating scenes and wired-up app state.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

use geodrill_core::data::{Bounds, BoundaryData, BoundaryFeature, LoadError};
use geodrill_core::region::builtin;
use geodrill_core::{ChartOptions, ColorScale, FailedScene, MapScene, RegionKey};

use crate::app::AppState;
use crate::worker::{WorkerCommand, WorkerResponse};

/// Feature names used for each region's fake boundary.
pub fn feature_names(region: RegionKey) -> &'static [&'static str] {
    match region {
        RegionKey::World => &["India", "Canada", "Brazil", "United States of America"],
        RegionKey::India => &["Gujarat", "Delhi", "Kerala"],
        RegionKey::Gujarat => &["Ahmadabad", "Surat", "Dahod"],
    }
}

/// Unit squares laid out left to right.
pub fn boundary(names: &[&str]) -> BoundaryData {
    let features: Vec<BoundaryFeature> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let x = i as f64 * 2.0;
            BoundaryFeature {
                name: Some(name.to_string()),
                rings: vec![vec![(x, 0.0), (x + 1.0, 0.0), (x + 1.0, 1.0), (x, 1.0), (x, 0.0)]],
            }
        })
        .collect();
    let bounds = Bounds::of_rings(features.iter().flat_map(|f| f.rings.iter()));
    BoundaryData { features, bounds }
}

pub fn scene(region: RegionKey, path: &[RegionKey]) -> MapScene {
    let config = builtin(region);
    let scale = ColorScale::from_values(&config.numbers());
    MapScene {
        region,
        path: path.to_vec(),
        title: config.title.clone(),
        values: config.values.clone(),
        scale,
        options: ChartOptions::for_region(&config, &scale),
        boundary: Arc::new(boundary(feature_names(region))),
    }
}

pub fn failed_scene(region: RegionKey, path: &[RegionKey]) -> FailedScene {
    let config = builtin(region);
    FailedScene {
        region,
        path: path.to_vec(),
        title: config.failed_title(),
        options: ChartOptions::failed(&config),
        error: LoadError::Status {
            url: config.sources[0].clone(),
            status: 503,
        },
    }
}

/// App state plus the worker-side channel ends.
pub fn app_with_channels() -> (AppState, Receiver<WorkerCommand>, Sender<WorkerResponse>) {
    let (cmd_tx, cmd_rx) = mpsc::channel();
    let (resp_tx, resp_rx) = mpsc::channel();
    let app = AppState::new(cmd_tx, resp_rx, RegionKey::World);
    (app, cmd_rx, resp_tx)
}
