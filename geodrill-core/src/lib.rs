//! geodrill core: choropleth drilldown without the widget.
//!
//! This crate contains everything except the screen:
//! - Region catalog (world → india → gujarat) and click resolution
//! - Navigation stack
//! - Boundary loading through a fallback chain of mirrors (HTTP source,
//!   GeoJSON and ECharts-encoded GeoJSON parsing)
//! - Color scale and declarative chart options
//! - The drilldown controller driving a `MapView`
//! - Configuration and logging setup

pub mod config;
pub mod controller;
pub mod data;
pub mod logging;
pub mod navigation;
pub mod options;
pub mod region;
pub mod scale;

pub use config::{AppConfig, ConfigError};
pub use controller::{DrilldownController, FailedScene, MapScene, MapView, RenderOutcome};
pub use data::{BoundaryData, BoundaryLoader, BoundarySource, FallbackLoader, HttpSource, LoadError};
pub use navigation::NavigationStack;
pub use options::ChartOptions;
pub use region::{Catalog, RegionConfig, RegionKey, RegionValue};
pub use scale::{ColorScale, Rgb};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: everything the TUI worker sends across threads is
    /// Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<MapScene>();
        require_sync::<MapScene>();
        require_send::<FailedScene>();
        require_sync::<FailedScene>();
        require_send::<LoadError>();
        require_sync::<LoadError>();
        require_send::<Catalog>();
        require_sync::<Catalog>();
        require_send::<FallbackLoader<HttpSource>>();
    }
}
