use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::execute;
use natural_events_map::app::App;
use natural_events_map::config::Config;
use natural_events_map::{
    aggregate, classify, data, feed, logging, ui, ClassifiedEvents, Thresholds,
};
use ratatui::DefaultTerminal;
use std::time::Duration;
use tracing::info;

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init_logging(&config.log_level, config.log_file.as_deref())?;

    let thresholds = Thresholds::default();
    let events = feed::load_events(&config.feed_source(), config.timeout())
        .context("cannot load events")?;
    let classified = classify(events, thresholds.max_categories)?;
    info!(
        categories = classified.len(),
        events = classified.event_count(),
        "events classified"
    );

    if config.print {
        let selected = vec![true; classified.len()];
        let points = aggregate(&classified, &selected, config.merge, &thresholds);
        println!("{}", simd_json::serde::to_string_pretty(&points)?);
        return Ok(());
    }

    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, &config, classified, thresholds);

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    result
}

/// Handle mouse events for panning and zooming
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.zoom_in_at(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => app.zoom_out_at(mouse.column, mouse.row),
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        MouseEventKind::Down(MouseButton::Left) => {
            app.last_mouse = Some((mouse.column, mouse.row));
        }
        MouseEventKind::Drag(MouseButton::Left) => app.handle_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.end_drag(),
        _ => {}
    }
}

fn run(
    terminal: &mut DefaultTerminal,
    config: &Config,
    classified: ClassifiedEvents,
    thresholds: Thresholds,
) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(
        size.width as usize,
        size.height as usize,
        classified,
        thresholds,
        config.merge,
    );

    data::load_basemap(&mut app.map_renderer, &config.data_dir);
    if !app.map_renderer.has_data() {
        data::generate_simple_world(&mut app.map_renderer);
    }

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                    KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
                    KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
                    KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
                    KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

                    KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(),
                    KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(),

                    KeyCode::Char(c @ '1'..='8') => app.toggle_category(c as usize - '1' as usize),
                    KeyCode::Char('m') | KeyCode::Char('M') => app.toggle_merge(),
                    KeyCode::Char('b') | KeyCode::Char('B') => app.map_renderer.toggle_borders(),
                    KeyCode::Char('r') | KeyCode::Char('0') => app.reset_view(),

                    _ => {}
                },
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(width, height) => app.resize(width as usize, height as usize),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
