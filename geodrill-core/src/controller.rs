//! Drilldown controller: navigation stack plus the load/render cycle.
//!
//! The controller owns the navigation stack and the single active click
//! binding. Every transition (drill in, go back) mutates the stack and
//! renders the new top as one operation; nothing is deferred.
//!
//! The map widget is a collaborator behind [`MapView`]. Per render it sees:
//!
//! ```text
//! set_loading(true) -> draw_map(scene) | draw_failure(scene) -> set_loading(false)
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::data::{BoundaryData, BoundaryLoader, LoadError};
use crate::navigation::NavigationStack;
use crate::options::ChartOptions;
use crate::region::{Catalog, RegionConfig, RegionKey, RegionValue};
use crate::scale::ColorScale;

/// Everything a view needs to draw a loaded region.
#[derive(Debug, Clone)]
pub struct MapScene {
    pub region: RegionKey,
    pub path: Vec<RegionKey>,
    pub title: String,
    pub values: Vec<RegionValue>,
    pub scale: ColorScale,
    pub options: ChartOptions,
    /// The registered boundary dataset.
    pub boundary: Arc<BoundaryData>,
}

impl MapScene {
    pub fn value_of(&self, feature_name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|v| v.name == feature_name)
            .map(|v| v.value)
    }

    /// Whether clicking this feature would drill further.
    pub fn drills_into(&self, feature_name: &str) -> Option<RegionKey> {
        self.region.resolve_child(feature_name)
    }
}

/// Degraded render after every candidate source failed.
#[derive(Debug, Clone)]
pub struct FailedScene {
    pub region: RegionKey,
    pub path: Vec<RegionKey>,
    /// Title annotated with the failure.
    pub title: String,
    pub options: ChartOptions,
    pub error: LoadError,
}

/// The rendering widget.
pub trait MapView {
    fn set_loading(&mut self, loading: bool);
    fn draw_map(&mut self, scene: MapScene);
    fn draw_failure(&mut self, scene: FailedScene);
}

/// What a render attempt did.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// Key not in the catalog; nothing happened.
    Skipped,
    Drawn,
    Failed(LoadError),
}

pub struct DrilldownController<L, V> {
    catalog: Catalog,
    loader: L,
    view: V,
    stack: NavigationStack,
    /// Region whose click resolution is active, if a map is on screen.
    click_binding: Option<RegionKey>,
}

impl<L: BoundaryLoader, V: MapView> DrilldownController<L, V> {
    pub fn new(catalog: Catalog, loader: L, view: V) -> Self {
        let stack = NavigationStack::new(catalog.root());
        Self {
            catalog,
            loader,
            view,
            stack,
            click_binding: None,
        }
    }

    pub fn stack(&self) -> &NavigationStack {
        &self.stack
    }

    pub fn current(&self) -> RegionKey {
        self.stack.current()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn can_go_back(&self) -> bool {
        !self.stack.is_at_root()
    }

    pub fn click_binding(&self) -> Option<RegionKey> {
        self.click_binding
    }

    /// Render the root region (mount).
    pub fn start(&mut self) -> RenderOutcome {
        self.render(self.stack.current())
    }

    /// Load and draw a region.
    ///
    /// Only the top of the stack is drawn, so the click binding always
    /// matches the scene path. Other keys, and keys missing from the
    /// catalog, are skipped.
    pub fn render(&mut self, key: RegionKey) -> RenderOutcome {
        if key != self.stack.current() {
            debug!(region = %key, current = %self.stack.current(), "render skipped: not the current region");
            return RenderOutcome::Skipped;
        }
        let Some(region) = self.catalog.get(key).cloned() else {
            debug!(region = %key, "render skipped: region not in catalog");
            return RenderOutcome::Skipped;
        };

        self.view.set_loading(true);
        let outcome = match self.loader.load(&region) {
            Ok(boundary) => {
                let scene = self.scene(&region, boundary);
                self.click_binding = Some(key);
                self.view.draw_map(scene);
                RenderOutcome::Drawn
            }
            Err(error) => {
                let scene = FailedScene {
                    region: key,
                    path: self.stack.keys().to_vec(),
                    title: region.failed_title(),
                    options: ChartOptions::failed(&region),
                    error: error.clone(),
                };
                self.click_binding = None;
                self.view.draw_failure(scene);
                RenderOutcome::Failed(error)
            }
        };
        self.view.set_loading(false);
        outcome
    }

    /// Drill into the child a clicked feature resolves to.
    ///
    /// Returns `None` (no state change, no render) when there is no bound
    /// map or the feature does not lead to a region in the catalog.
    pub fn on_feature_clicked(&mut self, feature_name: &str) -> Option<RenderOutcome> {
        let bound = self.click_binding?;
        let next = bound
            .resolve_child(feature_name)
            .filter(|k| self.catalog.contains(*k))?;
        if !self.stack.push(next) {
            return None;
        }
        info!(from = %bound, to = %next, feature = feature_name, "drill down");
        Some(self.render(next))
    }

    /// Pop back to the parent region. No-op at the root.
    pub fn go_back(&mut self) -> Option<RenderOutcome> {
        let from = self.stack.current();
        let to = self.stack.pop()?;
        info!(from = %from, to = %to, "navigate back");
        Some(self.render(to))
    }

    /// Render the current region again (e.g. after a failed load).
    pub fn reload(&mut self) -> RenderOutcome {
        self.render(self.stack.current())
    }

    fn scene(&self, region: &RegionConfig, boundary: BoundaryData) -> MapScene {
        let scale = ColorScale::from_values(&region.numbers());
        MapScene {
            region: region.key,
            path: self.stack.keys().to_vec(),
            title: region.title.clone(),
            values: region.values.clone(),
            scale,
            options: ChartOptions::for_region(region, &scale),
            boundary: Arc::new(boundary),
        }
    }
}
