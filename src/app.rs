use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::data::location_names;
use crate::map::{MapRenderer, Viewport};
use crate::ui;
use crate::view::{resolve_current, MapType, ResolveError, Selection, ViewResult};
use crate::worldcup::TOURNAMENTS;

/// Application state
pub struct App {
    pub viewport: Viewport,
    pub map_renderer: MapRenderer,
    pub selection: Selection,
    /// Latest resolution; an error is shown until the selection changes again
    pub view: Result<ViewResult, ResolveError>,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Name of the country under the mouse cursor
    pub hovered: Option<String>,
    /// Whole terminal area
    screen: Rect,
}

impl App {
    pub fn new(screen: Rect, map_renderer: MapRenderer, selection: Selection) -> Self {
        let view = resolve_current(selection);
        let mut app = Self {
            viewport: Viewport::world(0, 0),
            map_renderer,
            selection,
            view,
            should_quit: false,
            last_mouse: None,
            hovered: None,
            screen,
        };
        app.sync_viewport_size();
        app
    }

    /// Character area the map is drawn into
    pub fn map_area(&self) -> Rect {
        ui::map_inner(self.screen, self.year_control_visible())
    }

    /// Braille gives 2x4 resolution per character
    fn sync_viewport_size(&mut self) {
        let area = self.map_area();
        self.viewport.width = area.width as usize * 2;
        self.viewport.height = area.height as usize * 4;
    }

    /// Update viewport size when terminal resizes
    pub fn resize(&mut self, width: u16, height: u16) {
        self.screen = Rect::new(0, 0, width, height);
        self.sync_viewport_size();
    }

    /// Whether the year selector is shown
    pub fn year_control_visible(&self) -> bool {
        match &self.view {
            Ok(view) => view.year_control_visible,
            // Only a by-year selection can fail, keep its selector reachable
            Err(_) => true,
        }
    }

    /// Re-resolve the view after a selection change
    fn refresh(&mut self) {
        self.view = resolve_current(self.selection);
        match &self.view {
            Ok(_) => info!(
                mode = ?self.selection.map_type,
                year = self.selection.selected_year,
                "selection changed"
            ),
            Err(e) => warn!(error = %e, "view resolution failed"),
        }
        self.sync_viewport_size();
    }

    pub fn set_map_type(&mut self, map_type: MapType) {
        self.selection.map_type = map_type;
        self.refresh();
    }

    /// Switch between the aggregate and by-year maps
    pub fn toggle_map_type(&mut self) {
        self.set_map_type(self.selection.map_type.toggled());
    }

    pub fn select_year(&mut self, year: u16) {
        self.selection.selected_year = year;
        self.refresh();
    }

    /// Step to the next tournament year, wrapping around. Ignored while the
    /// year selector is hidden.
    pub fn next_year(&mut self) {
        self.step_year(1);
    }

    /// Step to the previous tournament year, wrapping around
    pub fn prev_year(&mut self) {
        self.step_year(-1);
    }

    fn step_year(&mut self, delta: isize) {
        if !self.year_control_visible() {
            return;
        }
        let years: Vec<u16> = TOURNAMENTS.years().collect();
        if years.is_empty() {
            return;
        }
        let len = years.len() as isize;
        let next = match years.iter().position(|&y| y == self.selection.selected_year) {
            Some(idx) => (idx as isize + delta).rem_euclid(len),
            // Unknown year: land on the nearest end in the direction of travel
            None if delta > 0 => 0,
            None => len - 1,
        };
        self.select_year(years[next as usize]);
    }

    /// Pan the map
    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    /// Zoom in
    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    /// Zoom out
    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Terminal cell to braille pixel coordinates inside the map
    fn to_map_pixel(&self, col: u16, row: u16) -> Option<(i32, i32)> {
        let area = self.map_area();
        let inside = col >= area.x
            && col < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        inside.then(|| (((col - area.x) as i32) * 2, ((row - area.y) as i32) * 4))
    }

    /// Zoom in towards a screen position (terminal column/row)
    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        match self.to_map_pixel(col, row) {
            Some((px, py)) => self.viewport.zoom_in_at(px, py),
            None => self.viewport.zoom_in(),
        }
    }

    /// Zoom out from a screen position (terminal column/row)
    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        match self.to_map_pixel(col, row) {
            Some((px, py)) => self.viewport.zoom_out_at(px, py),
            None => self.viewport.zoom_out(),
        }
    }

    /// Return to the whole-world view
    pub fn reset_view(&mut self) {
        self.viewport = Viewport::world(0, 0);
        self.sync_viewport_size();
    }

    /// Handle mouse drag
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = last_x as i32 - x as i32;
            let dy = last_y as i32 - y as i32;
            // Scale based on zoom: less sensitive when zoomed out
            let scale = if self.viewport.zoom < 2.0 {
                2
            } else if self.viewport.zoom < 4.0 {
                3
            } else {
                4
            };
            self.pan(dx * scale, dy * scale);
        }
        self.last_mouse = Some((x, y));
    }

    /// Reset drag state when mouse button released
    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    /// Track the country under the mouse cursor
    pub fn hover(&mut self, col: u16, row: u16) {
        let hovered = self
            .to_map_pixel(col, row)
            .and_then(|(px, py)| self.viewport.unproject(px, py))
            .and_then(|(lon, lat)| self.map_renderer.country_at(lon, lat))
            .map(|c| c.name.clone());
        if hovered != self.hovered {
            debug!(country = ?hovered, "hover");
            self.hovered = hovered;
        }
    }

    /// Hover text for the country under the cursor: the layer entry's text when
    /// the country is part of the current map, else just its name
    pub fn hover_text(&self) -> Option<String> {
        let hovered = self.hovered.as_deref()?;
        let layer = match &self.view {
            Ok(view) => &view.map.layer,
            Err(_) => return Some(hovered.to_string()),
        };
        let entry = layer.locations().into_iter().find(|location| {
            location_names(location)
                .iter()
                .any(|name| name.eq_ignore_ascii_case(hovered))
        });
        Some(
            entry
                .and_then(|location| layer.hover_for(location))
                .unwrap_or(hovered)
                .to_string(),
        )
    }

    /// Request quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Get current zoom level as a string
    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    /// Get current center coordinates as a string
    pub fn center_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }
}
