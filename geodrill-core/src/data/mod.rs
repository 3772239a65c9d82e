//! Boundary data: sources, fallback loading, and parsing.

pub mod boundary;
pub mod echarts;
pub mod fallback;
pub mod http;
pub mod provider;

pub use boundary::{BoundaryData, BoundaryFeature, Bounds, Ring};
pub use fallback::FallbackLoader;
pub use http::HttpSource;
pub use provider::{BoundaryLoader, BoundarySource, LoadError};
