use crate::braille::BrailleCanvas;
use crate::data::location_names;
use crate::map::geometry::{draw_line, fill_polygon, point_in_rings};
use crate::map::projection::Viewport;
use crate::map::spatial::{BBox, FeatureGrid};
use crate::view::color::Rgb;
use crate::view::MapFigure;

/// A geographic line (sequence of lon/lat coordinates)
pub type LineString = Vec<(f64, f64)>;

/// Exterior ring followed by any holes
pub type Polygon = Vec<LineString>;

/// Grid cell size for the hover index, in degrees
const COUNTRY_GRID_CELL: f64 = 10.0;

/// A named country outline
#[derive(Clone, Debug)]
pub struct Country {
    pub name: String,
    pub polygons: Vec<Polygon>,
    pub bbox: BBox,
}

impl Country {
    pub fn new(name: impl Into<String>, polygons: Vec<Polygon>) -> Self {
        let bbox = polygons.iter().flatten().flatten().fold(
            (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
            |(min_lon, min_lat, max_lon, max_lat), &(lon, lat)| {
                (min_lon.min(lon), min_lat.min(lat), max_lon.max(lon), max_lat.max(lat))
            },
        );
        Self {
            name: name.into(),
            polygons,
            bbox,
        }
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        let (min_lon, min_lat, max_lon, max_lat) = self.bbox;
        if lon < min_lon || lon > max_lon || lat < min_lat || lat > max_lat {
            return false;
        }
        self.polygons.iter().any(|rings| point_in_rings(lon, lat, rings))
    }
}

/// How a layer is painted onto the terminal
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    /// Cell background where a cell is mostly covered
    Fill,
    /// Braille glyphs in the foreground
    Line,
}

pub struct Layer {
    pub kind: LayerKind,
    pub color: Rgb,
    pub canvas: BrailleCanvas,
}

/// Rendered map, back to front
pub struct MapLayers {
    pub layers: Vec<Layer>,
}

impl MapLayers {
    /// Fill color at a character cell, topmost fill wins
    pub fn fill_at(&self, cx: usize, cy: usize) -> Option<Rgb> {
        self.layers
            .iter()
            .rev()
            .filter(|l| l.kind == LayerKind::Fill)
            .find(|l| l.canvas.dot_count(cx, cy) >= 4)
            .map(|l| l.color)
    }
}

/// Map renderer holding coastlines and country outlines
pub struct MapRenderer {
    coastlines: Vec<LineString>,
    countries: Vec<Country>,
    country_grid: FeatureGrid,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self {
            coastlines: Vec::new(),
            countries: Vec::new(),
            country_grid: FeatureGrid::new(COUNTRY_GRID_CELL),
        }
    }

    /// Add coastline data
    pub fn add_coastline(&mut self, line: LineString) {
        self.coastlines.push(line);
    }

    /// Add country outlines and reindex them for hover lookups
    pub fn add_countries(&mut self, countries: impl IntoIterator<Item = Country>) {
        self.countries.extend(countries);
        self.country_grid =
            FeatureGrid::build(self.countries.iter().map(|c| c.bbox), COUNTRY_GRID_CELL);
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn has_countries(&self) -> bool {
        !self.countries.is_empty()
    }

    /// Country containing the point, if any
    pub fn country_at(&self, lon: f64, lat: f64) -> Option<&Country> {
        self.country_grid
            .query_point(lon, lat)
            .iter()
            .filter_map(|&idx| self.countries.get(idx))
            .find(|c| c.contains(lon, lat))
    }

    /// Countries drawn for a layer location, following historical aliases
    pub fn countries_for<'a>(&'a self, location: &'a str) -> impl Iterator<Item = &'a Country> + 'a {
        let names = location_names(location);
        self.countries
            .iter()
            .filter(move |c| names.iter().any(|n| c.name.eq_ignore_ascii_case(n)))
    }

    /// Render `figure` into layers for a `cols` x `rows` character area
    pub fn render(&self, cols: usize, rows: usize, viewport: &Viewport, figure: &MapFigure) -> MapLayers {
        let geo = &figure.geo;
        let mut layers = Vec::new();

        if geo.show_ocean {
            let mut canvas = BrailleCanvas::new(cols, rows);
            fill_polygon(&mut canvas, &[viewport.outline()]);
            layers.push(Layer {
                kind: LayerKind::Fill,
                color: geo.ocean_color,
                canvas,
            });
        }

        if self.has_countries() {
            let mut canvas = BrailleCanvas::new(cols, rows);
            for country in &self.countries {
                fill_country(&mut canvas, country, viewport);
            }
            layers.push(Layer {
                kind: LayerKind::Fill,
                color: geo.land_color,
                canvas,
            });
        }

        // One canvas per distinct color, in entry order
        let mut fills: Vec<Layer> = Vec::new();
        for fill in figure.layer.fills() {
            let idx = match fills.iter().position(|l| l.color == fill.color) {
                Some(idx) => idx,
                None => {
                    fills.push(Layer {
                        kind: LayerKind::Fill,
                        color: fill.color,
                        canvas: BrailleCanvas::new(cols, rows),
                    });
                    fills.len() - 1
                }
            };
            for country in self.countries_for(fill.location) {
                fill_country(&mut fills[idx].canvas, country, viewport);
            }
        }
        layers.extend(fills);

        if geo.show_coastlines && !self.coastlines.is_empty() {
            let mut canvas = BrailleCanvas::new(cols, rows);
            for line in &self.coastlines {
                draw_linestring(&mut canvas, line, viewport, false);
            }
            layers.push(Layer {
                kind: LayerKind::Line,
                color: geo.coastline_color,
                canvas,
            });
        }

        if geo.show_countries && self.has_countries() {
            let mut canvas = BrailleCanvas::new(cols, rows);
            for country in &self.countries {
                for rings in &country.polygons {
                    for ring in rings {
                        draw_linestring(&mut canvas, ring, viewport, true);
                    }
                }
            }
            layers.push(Layer {
                kind: LayerKind::Line,
                color: geo.country_color,
                canvas,
            });
        }

        MapLayers { layers }
    }
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill every polygon of a country.
/// Polygons split by the seam opposite the viewport center are skipped rather than smeared.
fn fill_country(canvas: &mut BrailleCanvas, country: &Country, viewport: &Viewport) {
    for rings in &country.polygons {
        let wraps = rings.iter().any(|ring| {
            ring.iter()
                .zip(ring.iter().cycle().skip(1))
                .any(|(a, b)| viewport.crosses_seam(a.0, b.0))
        });
        if wraps {
            continue;
        }

        let projected: Vec<Vec<(i32, i32)>> = rings
            .iter()
            .map(|ring| ring.iter().map(|&(lon, lat)| viewport.project(lon, lat)).collect())
            .collect();

        // Cull on the exterior's pixel bbox so a polygon covering the whole canvas still fills
        let Some(exterior) = projected.first() else {
            continue;
        };
        let Some((min, max)) = pixel_bounds(exterior) else {
            continue;
        };
        if viewport.line_might_be_visible(min, max) {
            fill_polygon(canvas, &projected);
        }
    }
}

fn pixel_bounds(points: &[(i32, i32)]) -> Option<((i32, i32), (i32, i32))> {
    points.iter().fold(None, |acc, &(x, y)| match acc {
        None => Some(((x, y), (x, y))),
        Some(((min_x, min_y), (max_x, max_y))) => {
            Some(((min_x.min(x), min_y.min(y)), (max_x.max(x), max_y.max(y))))
        }
    })
}

/// Draw a linestring with viewport culling
fn draw_linestring(canvas: &mut BrailleCanvas, line: &LineString, viewport: &Viewport, closed: bool) {
    if line.len() < 2 {
        return;
    }

    let projected: Vec<(i32, i32)> = line
        .iter()
        .map(|&(lon, lat)| viewport.project(lon, lat))
        .collect();

    let mut segment = |i: usize, j: usize| {
        if viewport.crosses_seam(line[i].0, line[j].0) {
            return;
        }
        let ((x0, y0), (x1, y1)) = (projected[i], projected[j]);
        if viewport.line_might_be_visible((x0, y0), (x1, y1)) {
            draw_line(canvas, x0, y0, x1, y1);
        }
    };

    let last = line.len() - 1;
    for i in 0..last {
        segment(i, i + 1);
    }
    if closed && line[last] != line[0] {
        segment(last, 0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::color::{BLUE, RED};
    use crate::data::generate_simple_world;
    use crate::view::{resolve_current, MapType, Selection};

    fn square(name: &str, lon: f64, lat: f64, size: f64) -> Country {
        Country::new(
            name,
            vec![vec![vec![
                (lon, lat),
                (lon + size, lat),
                (lon + size, lat + size),
                (lon, lat + size),
                (lon, lat),
            ]]],
        )
    }

    fn renderer() -> MapRenderer {
        let mut r = MapRenderer::new();
        r.add_countries([
            square("Argentina", -70.0, -40.0, 15.0),
            square("France", 0.0, 43.0, 6.0),
            square("Brazil", -60.0, -20.0, 20.0),
        ]);
        r
    }

    #[test]
    fn test_country_bbox_and_contains() {
        let c = square("Brazil", -60.0, -20.0, 20.0);
        assert_eq!(c.bbox, (-60.0, -20.0, -40.0, 0.0));
        assert!(c.contains(-50.0, -10.0));
        assert!(!c.contains(-30.0, -10.0));
    }

    #[test]
    fn test_country_at() {
        let r = renderer();
        assert_eq!(r.country_at(3.0, 46.0).map(|c| c.name.as_str()), Some("France"));
        assert_eq!(r.country_at(-62.0, -35.0).map(|c| c.name.as_str()), Some("Argentina"));
        assert!(r.country_at(100.0, 0.0).is_none());
    }

    #[test]
    fn test_countries_for_aliases() {
        let mut r = MapRenderer::new();
        r.add_countries([
            square("United Kingdom", -5.0, 50.0, 5.0),
            square("Czechia", 12.0, 48.5, 6.0),
            square("Slovakia", 17.0, 47.7, 5.0),
        ]);
        let names = |loc| r.countries_for(loc).map(|c| c.name.clone()).collect::<Vec<_>>();
        assert_eq!(names("England"), vec!["United Kingdom"]);
        assert_eq!(names("Czechoslovakia"), vec!["Czechia", "Slovakia"]);
        assert!(names("Brazil").is_empty());
    }

    #[test]
    fn test_render_by_year_paints_finalists() {
        let r = renderer();
        let view = resolve_current(Selection {
            map_type: MapType::ByYear,
            selected_year: 2022,
        })
        .unwrap();
        let viewport = Viewport::world(160, 80);
        let layers = r.render(80, 20, &viewport, &view.map);

        let (ax, ay) = viewport.project(-62.5, -32.5);
        assert_eq!(layers.fill_at(ax as usize / 2, ay as usize / 4), Some(BLUE));

        // Brazil is land but not part of this layer
        let (bx, by) = viewport.project(-50.0, -10.0);
        assert_eq!(layers.fill_at(bx as usize / 2, by as usize / 4), Some(view.map.geo.land_color));

        // Mid-Pacific is ocean
        let (ox, oy) = viewport.project(-150.0, 0.0);
        assert_eq!(layers.fill_at(ox as usize / 2, oy as usize / 4), Some(view.map.geo.ocean_color));

        assert!(layers.layers.iter().any(|l| l.color == RED));
    }

    #[test]
    fn test_render_respects_geo_flags() {
        let r = renderer();
        let mut figure = resolve_current(Selection::default()).unwrap().map;
        figure.geo.show_ocean = false;
        figure.geo.show_countries = false;
        let layers = r.render(40, 10, &Viewport::world(80, 40), &figure);
        assert!(layers.layers.iter().all(|l| l.kind == LayerKind::Fill));
        assert!(layers.layers.iter().all(|l| l.color != figure.geo.ocean_color));
    }

    fn final_2002() -> MapFigure {
        resolve_current(Selection {
            map_type: MapType::ByYear,
            selected_year: 2002,
        })
        .unwrap()
        .map
    }

    #[test]
    fn test_zoomed_fill_keeps_country_color() {
        let mut r = MapRenderer::new();
        generate_simple_world(&mut r);
        let figure = final_2002();

        // Central Brazil at the center cell, up to the deepest zoom
        for zoom in [1.0, 4.0, 10.0, 20.0, 35.0, Viewport::MAX_ZOOM] {
            let viewport = Viewport::new(-50.0, -12.0, zoom, 160, 80);
            let layers = r.render(80, 20, &viewport, &figure);
            assert_eq!(layers.fill_at(40, 10), Some(BLUE), "zoom {}", zoom);
            if zoom >= 20.0 {
                // No border on screen, the polygon covers the whole canvas
                assert_eq!(layers.fill_at(0, 0), Some(BLUE), "zoom {}", zoom);
                assert_eq!(layers.fill_at(79, 19), Some(BLUE), "zoom {}", zoom);
            }
        }
    }

    #[test]
    fn test_panned_fill_follows_viewport() {
        let mut r = MapRenderer::new();
        generate_simple_world(&mut r);
        let figure = final_2002();

        let mut viewport = Viewport::new(-50.0, -12.0, 30.0, 160, 80);
        viewport.pan(-80, 0);
        assert!(viewport.center_lon < -53.0);
        let layers = r.render(80, 20, &viewport, &figure);
        assert_eq!(layers.fill_at(40, 10), Some(BLUE));

        // Move the view onto Germany, the runner-up
        viewport.center_lon = 10.5;
        viewport.center_lat = 51.0;
        let layers = r.render(80, 20, &viewport, &figure);
        assert_eq!(layers.fill_at(40, 10), Some(RED));

        // And over the open Atlantic
        viewport.center_lon = -30.0;
        viewport.center_lat = 0.0;
        let layers = r.render(80, 20, &viewport, &figure);
        assert_eq!(layers.fill_at(40, 10), Some(figure.geo.ocean_color));
    }

    #[test]
    fn test_zoomed_border_spanning_canvas_is_drawn() {
        let r = renderer();
        let figure = resolve_current(Selection::default()).unwrap().map;
        // Brazil's square has its east edge along 40°W, much longer than the canvas
        let viewport = Viewport::new(-40.0, -10.0, 20.0, 160, 80);
        let layers = r.render(80, 20, &viewport, &figure);
        let borders = layers
            .layers
            .iter()
            .find(|l| l.kind == LayerKind::Line && l.color == figure.geo.country_color)
            .unwrap();
        assert!(borders.canvas.dot_count(40, 10) > 0);
        assert!(borders.canvas.dot_count(40, 0) > 0);
        assert!(borders.canvas.dot_count(40, 19) > 0);
    }

    #[test]
    fn test_fill_skips_wrapping_polygon() {
        let mut canvas = BrailleCanvas::new(40, 10);
        let viewport = Viewport::world(80, 40);
        let fiji = Country::new(
            "Fiji",
            vec![vec![vec![(178.0, -18.0), (-179.0, -18.0), (-179.0, -16.0), (178.0, -16.0)]]],
        );
        fill_country(&mut canvas, &fiji, &viewport);
        assert_eq!(canvas.covered_cells(1).count(), 0);
    }
}
