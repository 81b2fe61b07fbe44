use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::layout::Rect;
use ratatui::DefaultTerminal;
use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use worldcup_map::app::App;
use worldcup_map::config::Cli;
use worldcup_map::map::MapRenderer;
use worldcup_map::view::resolve_current;
use worldcup_map::{data, ui};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    if cli.dump {
        return dump(&cli);
    }

    let renderer = load_map(&cli);

    // Initialize terminal
    let mut terminal = ratatui::init();

    guarded(
        || Ok(execute!(std::io::stdout(), EnableMouseCapture)?),
        || run(&mut terminal, &cli, renderer),
        || {
            // Disable mouse capture and restore terminal
            let _ = execute!(std::io::stdout(), DisableMouseCapture);
            ratatui::restore();
        },
    )
}

/// Run `body` after `enter` succeeds; `leave` runs in every case
fn guarded<T>(
    enter: impl FnOnce() -> Result<()>,
    body: impl FnOnce() -> Result<T>,
    leave: impl FnOnce(),
) -> Result<T> {
    let result = enter().and_then(|()| body());
    leave();
    result
}

/// The terminal owns stdout, so the dashboard only logs to a file
fn init_logging(cli: &Cli) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("worldcup_map=info"));

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else if cli.dump {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

/// Print the resolved view as JSON
fn dump(cli: &Cli) -> Result<()> {
    let selection = cli.selection();
    info!(mode = ?selection.map_type, year = selection.selected_year, "resolving view");
    let view = resolve_current(selection)?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

/// Natural Earth outlines when available, the built-in world otherwise
fn load_map(cli: &Cli) -> MapRenderer {
    let mut renderer = MapRenderer::new();
    if cli.data_dir.exists() {
        if let Err(e) = data::load_all_geojson(&mut renderer, &cli.data_dir) {
            warn!(error = %e, dir = %cli.data_dir.display(), "failed to load map data");
        }
    }

    if !renderer.has_countries() {
        info!("no country outlines found, using built-in world");
        renderer = MapRenderer::new();
        data::generate_simple_world(&mut renderer);
    }
    renderer
}

/// Handle mouse events for panning, zooming and hover
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved => app.hover(mouse.column, mouse.row),
        // Scroll wheel for zooming towards mouse position
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        // Horizontal scroll for panning (trackpad two-finger swipe)
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        // Click and drag to pan
        MouseEventKind::Down(MouseButton::Left) => {
            app.last_mouse = Some((mouse.column, mouse.row));
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            app.handle_drag(mouse.column, mouse.row);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.end_drag();
        }
        _ => {}
    }
}

fn run(terminal: &mut DefaultTerminal, cli: &Cli, renderer: MapRenderer) -> Result<()> {
    terminal.clear()?;
    let size = terminal.size()?;
    let mut app = App::new(
        Rect::new(0, 0, size.width, size.height),
        renderer,
        cli.selection(),
    );

    // Main loop
    loop {
        // Draw
        terminal.draw(|frame| ui::render(frame, &app))?;

        // Handle events with ~60fps target
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    // Only handle key press events (not release)
                    if key.kind == KeyEventKind::Press {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                            // Selectors
                            KeyCode::Char('m') | KeyCode::Tab => app.toggle_map_type(),
                            KeyCode::Char(']') | KeyCode::Char('.') | KeyCode::Char('n') => {
                                app.next_year();
                            }
                            KeyCode::Char('[') | KeyCode::Char(',') | KeyCode::Char('p') => {
                                app.prev_year();
                            }

                            // Pan with hjkl or arrow keys
                            KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
                            KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
                            KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
                            KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

                            // Zoom
                            KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                            KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

                            // Reset view
                            KeyCode::Char('r') | KeyCode::Char('0') => app.reset_view(),

                            _ => {}
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse(&mut app, mouse);
                }
                Event::Resize(width, height) => {
                    app.resize(width, height);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    info!("quitting");
    Ok(())
}
