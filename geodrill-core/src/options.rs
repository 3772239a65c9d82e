//! Declarative chart options in the ECharts option shape.
//!
//! These are what a map widget receives for a region: title, tooltip,
//! visual map bounds and colors, and one map series with the region values.
//! Serialized field names are camelCase so the JSON can be handed to an
//! ECharts `setOption` call unchanged.

use serde::Serialize;

use crate::region::{RegionConfig, RegionValue};
use crate::scale::{ColorScale, EMPHASIS_COLOR, HIGH_COLOR, LOW_COLOR, NO_DATA_COLOR};

/// Tooltip template: `{b}` is the feature name, `{c}` its value.
pub const TOOLTIP_TEMPLATE: &str = "{b}: {c}";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub title: TitleOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<TooltipOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual_map: Option<VisualMap>,
    pub series: Vec<MapSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleOptions {
    pub text: String,
    pub left: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipOptions {
    pub trigger: &'static str,
    pub formatter: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualMap {
    pub min: f64,
    pub max: f64,
    pub text: [&'static str; 2],
    pub calculable: bool,
    pub in_range: ColorRange,
    pub out_of_range: ColorRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorRange {
    pub color: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSeries {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Identifier the boundary dataset was registered under.
    pub map: String,
    pub roam: bool,
    pub name_property: String,
    pub emphasis_color: String,
    pub data: Vec<RegionValue>,
}

impl ChartOptions {
    /// Full options for a successfully loaded region.
    pub fn for_region(region: &RegionConfig, scale: &ColorScale) -> Self {
        Self {
            title: TitleOptions {
                text: region.title.clone(),
                left: "center",
            },
            tooltip: Some(TooltipOptions {
                trigger: "item",
                formatter: TOOLTIP_TEMPLATE,
            }),
            visual_map: Some(VisualMap {
                min: scale.min,
                max: scale.max,
                text: ["High", "Low"],
                calculable: true,
                in_range: ColorRange {
                    color: vec![LOW_COLOR.to_hex(), HIGH_COLOR.to_hex()],
                },
                out_of_range: ColorRange {
                    color: vec![NO_DATA_COLOR.to_hex()],
                },
            }),
            series: vec![MapSeries {
                name: region.title.clone(),
                kind: "map",
                map: region.key.as_str().to_string(),
                roam: true,
                name_property: region.name_property.clone(),
                emphasis_color: EMPHASIS_COLOR.to_hex(),
                data: region.values.clone(),
            }],
        }
    }

    /// Title-only options for a region whose boundary data failed to load.
    pub fn failed(region: &RegionConfig) -> Self {
        Self {
            title: TitleOptions {
                text: region.failed_title(),
                left: "center",
            },
            tooltip: None,
            visual_map: None,
            series: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title.text
    }
}

/// Tooltip text for a feature. Missing values show as `0`.
pub fn tooltip_text(name: &str, value: Option<f64>) -> String {
    let value = value.unwrap_or(0.0);
    TOOLTIP_TEMPLATE
        .replace("{b}", name)
        .replace("{c}", &format_value(value))
}

/// Integers print without a fractional part.
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::{builtin, RegionKey};

    #[test]
    fn options_serialize_in_echarts_shape() {
        let region = builtin(RegionKey::India);
        let scale = ColorScale::from_values(&region.numbers());
        let options = ChartOptions::for_region(&region, &scale);
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json["title"]["text"], "India Leads (States/UTs)");
        assert_eq!(json["visualMap"]["min"], 0.0);
        assert_eq!(json["visualMap"]["max"], 50.0);
        assert_eq!(json["visualMap"]["outOfRange"]["color"][0], "#e6e6e6");
        assert_eq!(json["series"][0]["type"], "map");
        assert_eq!(json["series"][0]["map"], "india");
        assert_eq!(json["series"][0]["nameProperty"], "ST_NM");
        assert_eq!(json["series"][0]["data"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn failed_options_annotate_title() {
        let region = builtin(RegionKey::World);
        let options = ChartOptions::failed(&region);
        assert_eq!(options.title(), "World Leads (failed to load map)");
        let json = serde_json::to_value(&options).unwrap();
        assert!(json.get("visualMap").is_none());
    }

    #[test]
    fn tooltip_defaults_missing_value_to_zero() {
        assert_eq!(tooltip_text("Surat", Some(8.0)), "Surat: 8");
        assert_eq!(tooltip_text("Kutch", None), "Kutch: 0");
        assert_eq!(tooltip_text("X", Some(2.5)), "X: 2.5");
    }
}
