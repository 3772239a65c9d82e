//! Full frames rendered against ratatui's `TestBackend`.

use std::sync::mpsc::{self, Receiver};

use ratatui::backend::TestBackend;
use ratatui::Terminal;

use geodrill_core::data::{BoundaryData, LoadError};
use geodrill_core::{BoundaryLoader, Catalog, DrilldownController, RegionConfig, RegionKey};
use geodrill_tui::app::{AppState, Overlay};
use geodrill_tui::ui;
use geodrill_tui::worker::{ChannelView, WorkerCommand};

/// One square per feature, names taken from the region's own value table.
struct Squares {
    fail: Option<RegionKey>,
}

impl BoundaryLoader for Squares {
    fn load(&self, region: &RegionConfig) -> Result<BoundaryData, LoadError> {
        if self.fail == Some(region.key) {
            return Err(LoadError::Status {
                url: region.sources[0].clone(),
                status: 404,
            });
        }
        let features: Vec<String> = region
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let x = i as f64 * 2.0;
                format!(
                    r#"{{"type":"Feature","properties":{{"{prop}":"{name}"}},"geometry":{{"type":"Polygon","coordinates":[[[{x},0],[{x1},0],[{x1},1],[{x},1],[{x},0]]]}}}}"#,
                    prop = region.name_property,
                    name = v.name,
                    x1 = x + 1.0,
                )
            })
            .collect();
        let doc = format!(
            r#"{{"type":"FeatureCollection","features":[{}]}}"#,
            features.join(",")
        );
        BoundaryData::parse(&doc, &region.name_property).map_err(|message| LoadError::Parse {
            url: "memory".into(),
            message,
        })
    }
}

struct Harness {
    app: AppState,
    controller: DrilldownController<Squares, ChannelView>,
    _cmd_rx: Receiver<WorkerCommand>,
}

impl Harness {
    fn new(fail: Option<RegionKey>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();
        let controller =
            DrilldownController::new(Catalog::builtin(), Squares { fail }, ChannelView::new(resp_tx));
        let app = AppState::new(cmd_tx, resp_rx, RegionKey::World);
        Self {
            app,
            controller,
            _cmd_rx: cmd_rx,
        }
    }

    /// Deliver everything the controller sent to the UI side.
    fn pump(&mut self) {
        while let Ok(resp) = self.app.worker_rx.try_recv() {
            self.app.apply(resp);
        }
    }

    fn screen(&self) -> String {
        let backend = TestBackend::new(120, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui::draw(f, &self.app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[test]
fn world_map_renders_title_breadcrumb_and_rows() {
    let mut h = Harness::new(None);
    h.controller.start();
    h.pump();

    let screen = h.screen();
    assert!(screen.contains("World Leads"), "{screen}");
    assert!(screen.contains("World"));
    assert!(screen.contains("Regions (4)"));
    assert!(screen.contains("United States of America"));
    assert!(screen.contains("> India"));
    assert!(!h.app.back_enabled());
}

#[test]
fn drilled_map_shows_full_breadcrumb() {
    let mut h = Harness::new(None);
    h.controller.start();
    h.controller.on_feature_clicked("India");
    h.controller.on_feature_clicked("Gujarat");
    h.pump();

    let screen = h.screen();
    assert!(screen.contains("World / India / Gujarat"), "{screen}");
    assert!(screen.contains("Gujarat Leads (Districts)"));
    assert!(screen.contains("Dahod"));
    assert!(h.app.back_enabled());
}

#[test]
fn failed_region_renders_degraded_title() {
    let mut h = Harness::new(Some(RegionKey::India));
    h.controller.start();
    h.controller.on_feature_clicked("India");
    h.pump();

    let screen = h.screen();
    assert!(
        screen.contains("India Leads (States/UTs) (failed to load map)"),
        "{screen}"
    );
    assert!(screen.contains("HTTP 404"));
    assert_eq!(h.app.error_history.len(), 1);
    // Back still leads out of the failed region.
    assert!(h.app.back_enabled());
}

#[test]
fn overlays_draw_on_top() {
    let mut h = Harness::new(None);
    h.controller.start();
    h.pump();

    h.app.overlay = Overlay::Help;
    assert!(h.screen().contains("drill into selection"));

    h.app.overlay = Overlay::ErrorHistory;
    assert!(h.screen().contains("No errors recorded."));
}
