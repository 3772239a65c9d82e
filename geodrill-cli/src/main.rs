//! geodrill CLI: inspect regions and boundary sources without the TUI.
//!
//! Commands:
//! - `regions`: list the region catalog and how regions link together
//! - `fetch`: load one region's boundary data through the fallback chain
//! - `options`: print the chart options JSON for a region
//! - `walk`: replay feature clicks from the root, headless

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use geodrill_core::options::format_value;
use geodrill_core::{
    logging, AppConfig, BoundaryLoader, Catalog, ChartOptions, ColorScale, DrilldownController,
    FailedScene, FallbackLoader, HttpSource, MapScene, MapView, RegionKey,
};

#[derive(Parser)]
#[command(name = "geodrill-cli", about = "geodrill CLI: region catalog and boundary fetching")]
struct Cli {
    /// Config file (defaults to the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured regions, their sources and drill-down links.
    Regions,
    /// Fetch and parse one region's boundary data.
    Fetch {
        /// Region key: world, india or gujarat.
        region: RegionKey,

        /// Also list every feature with its value.
        #[arg(long, default_value_t = false)]
        features: bool,
    },
    /// Print the chart options for a region as JSON.
    Options {
        region: RegionKey,

        /// Print the degraded options used when loading fails.
        #[arg(long, default_value_t = false)]
        failed: bool,
    },
    /// Start at the root and click the given features in order.
    Walk {
        /// Feature names, e.g. `India Gujarat`.
        features: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init_stderr(&config.log.level);
    let catalog = config.catalog()?;

    match cli.command {
        Commands::Regions => {
            run_regions(&catalog);
            Ok(())
        }
        Commands::Fetch { region, features } => run_fetch(&config, &catalog, region, features),
        Commands::Options { region, failed } => run_options(&catalog, region, failed),
        Commands::Walk { features } => run_walk(&config, catalog, &features),
    }
}

fn run_regions(catalog: &Catalog) {
    println!("{:<8} {:<28} {:<10} {:>6}", "Key", "Title", "Name prop", "Values");
    println!("{}", "-".repeat(56));
    for region in catalog.regions() {
        let marker = if region.key == catalog.root() { "*" } else { "" };
        println!(
            "{:<8} {:<28} {:<10} {:>6}",
            format!("{}{marker}", region.key),
            region.title,
            region.name_property,
            region.values.len()
        );
        for (i, url) in region.sources.iter().enumerate() {
            println!("    source {}: {url}", i + 1);
        }
        for value in &region.values {
            if let Some(child) = region.resolve_click(&value.name) {
                println!("    click '{}' -> {child}", value.name);
            }
        }
        if region.key.is_leaf() {
            println!("    leaf: clicks do not drill further");
        }
    }
    println!();
    println!("* root region");
}

fn loader(config: &AppConfig) -> Result<FallbackLoader<HttpSource>> {
    Ok(FallbackLoader::new(HttpSource::new(&config.http)?))
}

fn run_fetch(config: &AppConfig, catalog: &Catalog, key: RegionKey, list: bool) -> Result<()> {
    let Some(region) = catalog.get(key) else {
        bail!("region '{key}' is not configured");
    };
    let boundary = loader(config)?.load(region)?;

    let with_data = boundary
        .names()
        .filter(|name| region.value_of(name).is_some())
        .count();
    println!("{}", region.title);
    println!("Features:   {}", boundary.feature_count());
    println!("With data:  {with_data}/{}", region.values.len());
    if let Some(b) = boundary.bounds {
        println!(
            "Bounds:     lon {:.2}..{:.2}, lat {:.2}..{:.2}",
            b.min_x, b.max_x, b.min_y, b.max_y
        );
    }

    // Values whose name no feature carries never show on the map.
    let missing: Vec<&str> = region
        .values
        .iter()
        .map(|v| v.name.as_str())
        .filter(|name| boundary.find(name).is_none())
        .collect();
    if !missing.is_empty() {
        println!("Unmatched:  {}", missing.join(", "));
    }

    if list {
        println!();
        let mut names: Vec<&str> = boundary.names().collect();
        names.sort_unstable();
        names.dedup();
        for name in names {
            let value = region
                .value_of(name)
                .map(format_value)
                .unwrap_or_else(|| "-".into());
            println!("  {name:<32} {value:>8}");
        }
    }
    Ok(())
}

fn run_options(catalog: &Catalog, key: RegionKey, failed: bool) -> Result<()> {
    let Some(region) = catalog.get(key) else {
        bail!("region '{key}' is not configured");
    };
    let options = if failed {
        ChartOptions::failed(region)
    } else {
        ChartOptions::for_region(region, &ColorScale::from_values(&region.numbers()))
    };
    println!("{}", serde_json::to_string_pretty(&options)?);
    Ok(())
}

fn run_walk(config: &AppConfig, catalog: Catalog, features: &[String]) -> Result<()> {
    let mut controller = DrilldownController::new(catalog, loader(config)?, PrintView::default());
    controller.start();
    for feature in features {
        if controller.on_feature_clicked(feature).is_none() {
            println!("click '{feature}': no drill-down from {}", controller.current());
        }
    }
    println!();
    println!("Path: {}", controller.stack().breadcrumb());
    if controller.view().failures > 0 {
        bail!("{} render(s) failed", controller.view().failures);
    }
    Ok(())
}

/// `MapView` that prints each render as a line of text.
#[derive(Default)]
struct PrintView {
    failures: usize,
}

impl PrintView {
    fn map_line(scene: &MapScene) -> String {
        format!(
            "[{}] {}: {} shapes, {} values, scale {}..{}",
            scene.path.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(" > "),
            scene.title,
            scene.boundary.feature_count(),
            scene.values.len(),
            format_value(scene.scale.min),
            format_value(scene.scale.max),
        )
    }

    fn failure_line(scene: &FailedScene) -> String {
        format!(
            "[{}] {}: {}",
            scene.path.iter().map(|k| k.as_str()).collect::<Vec<_>>().join(" > "),
            scene.title,
            scene.error
        )
    }
}

impl MapView for PrintView {
    fn set_loading(&mut self, _loading: bool) {}

    fn draw_map(&mut self, scene: MapScene) {
        println!("{}", Self::map_line(&scene));
    }

    fn draw_failure(&mut self, scene: FailedScene) {
        self.failures += 1;
        println!("{}", Self::failure_line(&scene));
    }
}
