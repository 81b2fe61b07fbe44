//! Selection → view resolution.
//!
//! [`resolve`] turns the current selector state into a declarative description of
//! what the dashboard should show: a choropleth layer with its styling, whether
//! the year selector is visible, and the info panel document. Nothing here draws;
//! the terminal UI and the JSON dump both consume [`ViewResult`].

pub mod color;
pub mod error;

use serde::Serialize;

use crate::worldcup::{self, WinCount, WorldCupRecord, DEFAULT_YEAR, TOURNAMENTS};
use color::{ColorScale, Rgb, BLACK, BLUE, COASTLINE, GREENS, LAND, RED, SKY_BLUE};
pub use error::{ResolveError, Result};

pub const WINNER: &str = "Winner";
pub const RUNNER_UP: &str = "Runner-up";
pub const WINS_LABEL: &str = "Number of Wins";
pub const RESULT_LABEL: &str = "result";

/// Which map the dashboard shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapType {
    /// Total titles per country
    Aggregate,
    /// Finalists of one tournament
    ByYear,
}

impl MapType {
    /// Label shown in the mode selector
    pub fn label(self) -> &'static str {
        match self {
            MapType::Aggregate => "Countries that have won a World Cup",
            MapType::ByYear => "The winner and the runner-up by year",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            MapType::Aggregate => MapType::ByYear,
            MapType::ByYear => MapType::Aggregate,
        }
    }
}

/// Current selector state. `selected_year` only matters for [`MapType::ByYear`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub map_type: MapType,
    pub selected_year: u16,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            map_type: MapType::Aggregate,
            selected_year: DEFAULT_YEAR,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Projection {
    #[serde(rename = "natural earth")]
    NaturalEarth,
}

/// Geographic styling applied to every map regardless of mode
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoStyle {
    pub show_countries: bool,
    pub country_color: Rgb,
    pub show_coastlines: bool,
    pub coastline_color: Rgb,
    pub show_ocean: bool,
    pub ocean_color: Rgb,
    pub land_color: Rgb,
}

impl Default for GeoStyle {
    fn default() -> Self {
        Self {
            show_countries: true,
            country_color: BLACK,
            show_coastlines: true,
            coastline_color: COASTLINE,
            show_ocean: true,
            ocean_color: SKY_BLUE,
            land_color: LAND,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueEntry {
    pub location: String,
    pub value: f64,
    pub hover: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryEntry {
    pub location: String,
    pub category: &'static str,
    pub hover: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryColor {
    pub category: &'static str,
    pub color: Rgb,
}

/// Data layer of the choropleth
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapLayer {
    /// Locations shaded by a numeric value along a sequential scale
    Continuous {
        color_label: &'static str,
        scale: ColorScale,
        entries: Vec<ValueEntry>,
    },
    /// Locations colored by a category through a fixed color map
    Categorical {
        category_label: &'static str,
        color_map: Vec<CategoryColor>,
        entries: Vec<CategoryEntry>,
    },
}

/// A location with the color it should be filled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill<'a> {
    pub location: &'a str,
    pub color: Rgb,
}

impl MapLayer {
    pub fn len(&self) -> usize {
        match self {
            MapLayer::Continuous { entries, .. } => entries.len(),
            MapLayer::Categorical { entries, .. } => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn locations(&self) -> Vec<&str> {
        match self {
            MapLayer::Continuous { entries, .. } => {
                entries.iter().map(|e| e.location.as_str()).collect()
            }
            MapLayer::Categorical { entries, .. } => {
                entries.iter().map(|e| e.location.as_str()).collect()
            }
        }
    }

    /// Lowest and highest value of a continuous layer
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let MapLayer::Continuous { entries, .. } = self else {
            return None;
        };
        entries.iter().fold(None, |acc, e| match acc {
            None => Some((e.value, e.value)),
            Some((lo, hi)) => Some((lo.min(e.value), hi.max(e.value))),
        })
    }

    /// Resolve each entry to its fill color.
    ///
    /// Continuous values are normalised over the layer's own range; a layer whose
    /// entries all share one value is drawn at the dark end of the scale.
    /// Categories missing from the color map are not filled.
    pub fn fills(&self) -> Vec<Fill<'_>> {
        match self {
            MapLayer::Continuous { scale, entries, .. } => {
                let Some((lo, hi)) = self.value_range() else {
                    return Vec::new();
                };
                entries
                    .iter()
                    .map(|e| {
                        let t = if hi > lo { (e.value - lo) / (hi - lo) } else { 1.0 };
                        Fill {
                            location: &e.location,
                            color: scale.sample(t),
                        }
                    })
                    .collect()
            }
            MapLayer::Categorical {
                color_map, entries, ..
            } => entries
                .iter()
                .filter_map(|e| {
                    color_map
                        .iter()
                        .find(|c| c.category == e.category)
                        .map(|c| Fill {
                            location: &e.location,
                            color: c.color,
                        })
                })
                .collect(),
        }
    }

    /// Hover text of the entry for `location`
    pub fn hover_for(&self, location: &str) -> Option<&str> {
        match self {
            MapLayer::Continuous { entries, .. } => entries
                .iter()
                .find(|e| e.location == location)
                .map(|e| e.hover.as_str()),
            MapLayer::Categorical { entries, .. } => entries
                .iter()
                .find(|e| e.location == location)
                .map(|e| e.hover.as_str()),
        }
    }
}

/// Everything needed to draw one map
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapFigure {
    pub title: String,
    pub projection: Projection,
    pub location_mode: &'static str,
    pub layer: MapLayer,
    pub geo: GeoStyle,
}

impl MapFigure {
    fn new(title: String, layer: MapLayer) -> Self {
        Self {
            title,
            projection: Projection::NaturalEarth,
            location_mode: "country names",
            layer,
            geo: GeoStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
}

/// Info panel building block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Heading { level: u8, text: String },
    Paragraph { text: String, style: TextStyle },
    List { items: Vec<String> },
}

/// Info panel content as a flat document tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    /// Text of every heading, paragraph and list item, in order
    pub fn text_lines(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .flat_map(|node| match node {
                Node::Heading { text, .. } | Node::Paragraph { text, .. } => vec![text.as_str()],
                Node::List { items } => items.iter().map(String::as_str).collect(),
            })
            .collect()
    }
}

/// Output of one resolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewResult {
    pub map: MapFigure,
    pub year_control_visible: bool,
    pub info: Document,
}

/// Build the view for `selection`.
///
/// `records` is the tournament table and `win_counts` its aggregation, in display
/// order. Fails only when a by-year selection names a year missing from `records`.
pub fn resolve(
    selection: Selection,
    records: &[WorldCupRecord],
    win_counts: &[WinCount],
) -> Result<ViewResult> {
    match selection.map_type {
        MapType::Aggregate => Ok(resolve_aggregate(win_counts)),
        MapType::ByYear => resolve_year(selection.selected_year, records),
    }
}

/// [`resolve`] against the built-in table
pub fn resolve_current(selection: Selection) -> Result<ViewResult> {
    resolve(selection, TOURNAMENTS.records(), TOURNAMENTS.win_counts())
}

fn resolve_aggregate(win_counts: &[WinCount]) -> ViewResult {
    let entries = win_counts
        .iter()
        .map(|c| ValueEntry {
            location: c.country.to_string(),
            value: c.wins as f64,
            hover: format!("{} ({}={})", c.country, WINS_LABEL, c.wins),
        })
        .collect();

    let layer = MapLayer::Continuous {
        color_label: WINS_LABEL,
        scale: GREENS,
        entries,
    };

    let info = Document {
        nodes: vec![
            Node::Heading {
                level: 3,
                text: "Country and the number of times it has won a World Cup".to_string(),
            },
            Node::List {
                items: win_counts
                    .iter()
                    .map(|c| format!("{}: {}", c.country, c.wins))
                    .collect(),
            },
        ],
    };

    ViewResult {
        map: MapFigure::new("Wins by Country".to_string(), layer),
        year_control_visible: false,
        info,
    }
}

fn resolve_year(year: u16, records: &[WorldCupRecord]) -> Result<ViewResult> {
    let record = worldcup::find(records, year).ok_or(ResolveError::YearNotFound { year })?;

    let entry = |location: &str, category: &'static str| CategoryEntry {
        location: location.to_string(),
        category,
        hover: format!("{} ({}={})", location, RESULT_LABEL, category),
    };

    let layer = MapLayer::Categorical {
        category_label: RESULT_LABEL,
        color_map: vec![
            CategoryColor {
                category: WINNER,
                color: BLUE,
            },
            CategoryColor {
                category: RUNNER_UP,
                color: RED,
            },
        ],
        entries: vec![
            entry(record.winner, WINNER),
            entry(record.runner_up, RUNNER_UP),
        ],
    };

    let info = Document {
        nodes: vec![
            Node::Heading {
                level: 3,
                text: format!("{} World Cup Final", year),
            },
            Node::Paragraph {
                text: format!("{}: {}", WINNER, record.winner),
                style: TextStyle {
                    color: Some(BLUE),
                    bold: true,
                },
            },
            Node::Paragraph {
                text: format!("{}: {}", RUNNER_UP, record.runner_up),
                style: TextStyle {
                    color: Some(RED),
                    bold: false,
                },
            },
        ],
    };

    Ok(ViewResult {
        map: MapFigure::new(format!("{} Winner and Runner-up", year), layer),
        year_control_visible: true,
        info,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worldcup::RECORDS;
    use pretty_assertions::assert_eq;

    fn by_year(year: u16) -> Selection {
        Selection {
            map_type: MapType::ByYear,
            selected_year: year,
        }
    }

    fn finalists(view: &ViewResult) -> Vec<(&str, &str)> {
        match &view.map.layer {
            MapLayer::Categorical { entries, .. } => entries
                .iter()
                .map(|e| (e.location.as_str(), e.category))
                .collect(),
            other => panic!("expected categorical layer, got {:?}", other),
        }
    }

    #[test]
    fn test_aggregate_info_lines() {
        let view = resolve_current(Selection::default()).unwrap();
        let lines = view.info.text_lines();
        assert!(lines.contains(&"Brazil: 5"));
        assert!(lines.contains(&"Germany: 4"));
        assert_eq!(
            lines[0],
            "Country and the number of times it has won a World Cup"
        );
        assert_eq!(lines[1], "Brazil: 5");
        assert!(!view.year_control_visible);
        assert_eq!(view.map.title, "Wins by Country");
    }

    #[test]
    fn test_aggregate_layer_sums_to_record_count() {
        let view = resolve_current(Selection::default()).unwrap();
        let MapLayer::Continuous {
            entries,
            color_label,
            scale,
        } = &view.map.layer
        else {
            panic!("expected continuous layer");
        };
        let total: f64 = entries.iter().map(|e| e.value).sum();
        assert_eq!(total, RECORDS.len() as f64);
        assert_eq!(*color_label, WINS_LABEL);
        assert_eq!(scale.name, "Greens");
        assert_eq!(view.map.layer.value_range(), Some((1.0, 5.0)));
    }

    #[test]
    fn test_aggregate_ignores_year() {
        let a = resolve_current(Selection {
            map_type: MapType::Aggregate,
            selected_year: 1935,
        })
        .unwrap();
        let b = resolve_current(Selection::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_year_resolves_to_its_record() {
        for record in RECORDS.iter() {
            let view = resolve_current(by_year(record.year)).unwrap();
            assert_eq!(
                finalists(&view),
                vec![(record.winner, WINNER), (record.runner_up, RUNNER_UP)]
            );
            assert_eq!(view.map.layer.len(), 2);
            assert!(view.year_control_visible);
        }
    }

    #[test]
    fn test_year_2022() {
        let view = resolve_current(by_year(2022)).unwrap();
        assert_eq!(
            finalists(&view),
            vec![("Argentina", WINNER), ("France", RUNNER_UP)]
        );
        assert_eq!(view.map.title, "2022 Winner and Runner-up");
        assert_eq!(
            view.info.nodes,
            vec![
                Node::Heading {
                    level: 3,
                    text: "2022 World Cup Final".to_string()
                },
                Node::Paragraph {
                    text: "Winner: Argentina".to_string(),
                    style: TextStyle {
                        color: Some(BLUE),
                        bold: true
                    },
                },
                Node::Paragraph {
                    text: "Runner-up: France".to_string(),
                    style: TextStyle {
                        color: Some(RED),
                        bold: false
                    },
                },
            ]
        );
    }

    #[test]
    fn test_year_1930() {
        let view = resolve_current(by_year(1930)).unwrap();
        assert_eq!(
            finalists(&view),
            vec![("Uruguay", WINNER), ("Argentina", RUNNER_UP)]
        );
    }

    #[test]
    fn test_unknown_year_fails() {
        let err = resolve_current(by_year(1935)).unwrap_err();
        assert_eq!(err, ResolveError::YearNotFound { year: 1935 });
        assert_eq!(err.to_string(), "no World Cup final recorded for 1935");
    }

    #[test]
    fn test_toggle_flips_year_control() {
        let mut selection = Selection::default();
        let mut visible = Vec::new();
        for _ in 0..3 {
            visible.push(resolve_current(selection).unwrap().year_control_visible);
            selection.map_type = selection.map_type.toggled();
        }
        assert_eq!(visible, vec![false, true, false]);
    }

    #[test]
    fn test_categorical_fills() {
        let view = resolve_current(by_year(1966)).unwrap();
        assert_eq!(
            view.map.layer.fills(),
            vec![
                Fill {
                    location: "England",
                    color: BLUE
                },
                Fill {
                    location: "Germany",
                    color: RED
                },
            ]
        );
    }

    #[test]
    fn test_continuous_fills_scale_by_wins() {
        let view = resolve_current(Selection::default()).unwrap();
        let fills = view.map.layer.fills();
        let color_of = |name: &str| fills.iter().find(|f| f.location == name).unwrap().color;
        assert_eq!(color_of("Brazil"), GREENS.sample(1.0));
        assert_eq!(color_of("Spain"), GREENS.sample(0.0));
        assert_eq!(color_of("Argentina"), GREENS.sample(0.5));
    }

    #[test]
    fn test_single_value_layer_uses_dark_end() {
        let layer = MapLayer::Continuous {
            color_label: WINS_LABEL,
            scale: GREENS,
            entries: vec![ValueEntry {
                location: "Uruguay".to_string(),
                value: 2.0,
                hover: String::new(),
            }],
        };
        assert_eq!(layer.fills()[0].color, GREENS.sample(1.0));
    }

    #[test]
    fn test_hover_text() {
        let view = resolve_current(Selection::default()).unwrap();
        assert_eq!(
            view.map.layer.hover_for("Brazil"),
            Some("Brazil (Number of Wins=5)")
        );
        assert_eq!(view.map.layer.hover_for("Croatia"), None);

        let view = resolve_current(by_year(2018)).unwrap();
        assert_eq!(
            view.map.layer.hover_for("Croatia"),
            Some("Croatia (result=Runner-up)")
        );
    }

    #[test]
    fn test_serialized_shape() {
        let view = resolve_current(by_year(2022)).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["year_control_visible"], true);
        assert_eq!(json["map"]["projection"], "natural earth");
        assert_eq!(json["map"]["location_mode"], "country names");
        assert_eq!(json["map"]["layer"]["kind"], "categorical");
        assert_eq!(json["map"]["layer"]["color_map"][0]["color"], "#0000ff");
        assert_eq!(json["map"]["geo"]["ocean_color"], "#87ceeb");
        assert_eq!(json["info"]["nodes"][1]["style"]["bold"], true);
        assert!(json["info"]["nodes"][2]["style"].get("bold").is_none());
    }
}
