use crate::app::App;
use crate::braille::BrailleCanvas;
use crate::map::{LayerKind, MapLayers};
use crate::view::color::Rgb;
use crate::view::{Document, MapLayer, MapType, Node, ViewResult};
use crate::worldcup::TOURNAMENTS;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

pub const TITLE: &str = "FIFA Soccer World Cup winners and runner-ups";

/// Share of the body width given to the map; the info panel gets the rest
const MAP_PERCENT: u16 = 70;

/// Screen regions
pub struct Areas {
    pub title: Rect,
    pub selectors: Rect,
    pub map: Rect,
    pub info: Rect,
    pub status: Rect,
}

/// Split the terminal; the selector block grows a row when the year selector is shown
pub fn layout(area: Rect, year_visible: bool) -> Areas {
    let selector_rows = if year_visible { 2 } else { 1 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Title
            Constraint::Length(selector_rows), // Selectors
            Constraint::Min(3),                // Map + info
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(MAP_PERCENT),
            Constraint::Percentage(100 - MAP_PERCENT),
        ])
        .split(rows[2]);

    Areas {
        title: rows[0],
        selectors: rows[1],
        map: body[0],
        info: body[1],
        status: rows[3],
    }
}

/// Character area inside the map border
pub fn map_inner(area: Rect, year_visible: bool) -> Rect {
    Block::default()
        .borders(Borders::ALL)
        .inner(layout(area, year_visible).map)
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let areas = layout(frame.area(), app.year_control_visible());

    render_title(frame, areas.title);
    render_selectors(frame, app, areas.selectors);
    match &app.view {
        Ok(view) => {
            render_map(frame, app, view, areas.map);
            render_info(frame, view, areas.info);
        }
        Err(e) => render_error(frame, &e.to_string(), areas.map, areas.info),
    }
    render_status_bar(frame, app, areas.status);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Span::styled(
        TITLE,
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(title, area);
}

fn render_selectors(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(Color::DarkGray);
    let value_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(vec![
        Span::styled(" Map  ", Style::default().fg(Color::Cyan)),
        Span::styled("◀ ", key_style),
        Span::styled(app.selection.map_type.label(), value_style),
        Span::styled(" ▶", key_style),
        Span::styled("  (m)", key_style),
    ])];

    if app.year_control_visible() {
        let years: Vec<u16> = TOURNAMENTS.years().collect();
        let position = years
            .iter()
            .position(|&y| y == app.selection.selected_year)
            .map_or_else(|| "?".to_string(), |idx| (idx + 1).to_string());
        lines.push(Line::from(vec![
            Span::styled(" Year ", Style::default().fg(Color::Cyan)),
            Span::styled("◀ ", key_style),
            Span::styled(app.selection.selected_year.to_string(), value_style),
            Span::styled(" ▶", key_style),
            Span::styled(format!("  ({}/{})  ([ / ])", position, years.len()), key_style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_map(frame: &mut Frame, app: &App, view: &ViewResult, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", view.map.title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Viewport size always matches the area we draw into
    let mut viewport = app.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let layers = app
        .map_renderer
        .render(inner.width as usize, inner.height as usize, &viewport, &view.map);
    frame.render_widget(MapWidget { layers }, inner);
}

/// Braille map: fills as cell backgrounds, lines as glyphs on top
struct MapWidget {
    layers: MapLayers,
}

impl MapWidget {
    /// Render a braille canvas layer with a specific color
    fn render_line(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (row_idx, row_str) in canvas.rows().enumerate() {
            if row_idx >= area.height as usize {
                break;
            }
            let y = area.y + row_idx as u16;

            for (col_idx, ch) in row_str.chars().enumerate() {
                if col_idx >= area.width as usize {
                    break;
                }
                // Skip empty braille characters (U+2800)
                if ch == '\u{2800}' {
                    continue;
                }
                let x = area.x + col_idx as u16;
                buf[(x, y)].set_char(ch).set_fg(color);
            }
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Topmost fill that covers at least half of a cell sets its background
        for cy in 0..area.height {
            for cx in 0..area.width {
                if let Some(rgb) = self.layers.fill_at(cx as usize, cy as usize) {
                    buf[(area.x + cx, area.y + cy)].set_bg(to_color(rgb));
                }
            }
        }

        for layer in &self.layers.layers {
            if layer.kind == LayerKind::Line {
                Self::render_line(&layer.canvas, to_color(layer.color), area, buf);
            }
        }
    }
}

fn render_info(frame: &mut Frame, view: &ViewResult, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner_width = block.inner(area).width as usize;

    let mut lines = document_lines(&view.info);
    lines.push(Line::default());
    lines.extend(legend_lines(&view.map.layer, inner_width));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

/// Lay out the info document as styled lines
fn document_lines(doc: &Document) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    for node in &doc.nodes {
        match node {
            Node::Heading { text, .. } => {
                lines.push(Line::from(Span::styled(
                    text.as_str(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                )));
                lines.push(Line::default());
            }
            Node::Paragraph { text, style } => {
                let mut s = Style::default();
                if let Some(color) = style.color {
                    s = s.fg(to_color(color));
                }
                if style.bold {
                    s = s.add_modifier(Modifier::BOLD);
                }
                lines.push(Line::from(Span::styled(text.as_str(), s)));
            }
            Node::List { items } => {
                lines.extend(items.iter().map(|item| Line::from(format!(" • {}", item))));
            }
        }
    }
    lines
}

/// Colorbar for continuous layers, swatches for categorical ones
fn legend_lines(layer: &MapLayer, width: usize) -> Vec<Line<'static>> {
    let label_style = Style::default().fg(Color::Cyan);
    match layer {
        MapLayer::Continuous {
            color_label, scale, ..
        } => {
            let Some((lo, hi)) = layer.value_range() else {
                return Vec::new();
            };
            let bar_width = width.saturating_sub(2).max(2);
            let bar: Vec<Span> = (0..bar_width)
                .map(|i| {
                    let t = i as f64 / (bar_width - 1) as f64;
                    Span::styled(" ", Style::default().bg(to_color(scale.sample(t))))
                })
                .collect();

            let lo_label = format!("{}", lo);
            let hi_label = format!("{}", hi);
            let gap = bar_width.saturating_sub(lo_label.len() + hi_label.len());
            vec![
                Line::from(Span::styled(color_label.to_string(), label_style)),
                Line::from(bar),
                Line::from(format!("{}{}{}", lo_label, " ".repeat(gap), hi_label)),
            ]
        }
        MapLayer::Categorical {
            category_label,
            color_map,
            ..
        } => {
            let mut lines = vec![Line::from(Span::styled(category_label.to_string(), label_style))];
            lines.extend(color_map.iter().map(|c| {
                Line::from(vec![
                    Span::styled("██", Style::default().fg(to_color(c.color))),
                    Span::raw(format!(" {}", c.category)),
                ])
            }));
            lines
        }
    }
}

fn render_error(frame: &mut Frame, message: &str, map_area: Rect, info_area: Rect) {
    let error_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);

    let map = Paragraph::new(Line::from(Span::styled("No map for this selection", error_style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(map, map_area);

    let info = Paragraph::new(vec![
        Line::from(Span::styled("Error", error_style)),
        Line::default(),
        Line::from(Span::styled(message.to_string(), Style::default().fg(Color::Red))),
    ])
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    );
    frame.render_widget(info, info_area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(" Zoom: ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
    ];

    if let Some(hover) = app.hover_text() {
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(hover, Style::default().fg(Color::White)));
    }

    let help = match app.selection.map_type {
        MapType::Aggregate => " | m:mode hjkl:pan +/-:zoom r:reset q:quit",
        MapType::ByYear => " | m:mode [/]:year hjkl:pan +/-:zoom r:reset q:quit",
    };
    spans.push(Span::styled(help, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
