use crate::app::App;
use crate::braille::BrailleCanvas;
use crate::map::MapLayers;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};

/// One color per category slot, in category order
pub const CATEGORY_COLORS: [Color; 8] = [
    Color::Red,
    Color::Blue,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::LightRed,
    Color::LightYellow,
    Color::Cyan,
];

fn category_color(index: usize) -> Color {
    CATEGORY_COLORS[index % CATEGORY_COLORS.len()]
}

/// Render the UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Map
            Constraint::Length(1), // Legend
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_map(frame, app, chunks[0]);
    render_legend(frame, app, chunks[1]);
    render_status_bar(frame, app, chunks[2]);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Natural Events ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut viewport = app.viewport.clone();
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let layers = app
        .map_renderer
        .render(inner.width as usize, inner.height as usize, &viewport, app.points());

    let colors = app
        .legend()
        .iter()
        .enumerate()
        .filter(|(_, (_, on, _))| *on)
        .map(|(i, _)| category_color(i))
        .collect();

    frame.render_widget(MapWidget { layers, colors }, inner);
}

/// Braille map with one colored layer per selected category
struct MapWidget {
    layers: MapLayers,
    /// Colors for `layers.events`, same order
    colors: Vec<Color>,
}

fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
    for (col, row, ch) in canvas.glyphs() {
        if col >= area.width as usize || row >= area.height as usize {
            continue;
        }
        let (x, y) = (area.x + col as u16, area.y + row as u16);
        buf[(x, y)].set_char(ch).set_fg(color);
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Back to front: coastlines, borders, then event categories
        render_layer(&self.layers.coastlines, Color::DarkGray, area, buf);
        render_layer(&self.layers.borders, Color::Gray, area, buf);

        for ((_, canvas), color) in self.layers.events.iter().zip(&self.colors) {
            render_layer(canvas, *color, area, buf);
        }
    }
}

fn render_legend(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (i, (name, on, count)) in app.legend().into_iter().enumerate() {
        let style = if on {
            Style::default().fg(category_color(i)).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{}:● {name} ({count})  ", i + 1), style));
    }
    if spans.len() == 1 {
        spans.push(Span::styled("no events", Style::default().fg(Color::DarkGray)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let dim = Style::default().fg(Color::DarkGray);
    let toggle = |on: bool| Style::default().fg(if on { Color::Green } else { Color::DarkGray });

    let status = Line::from(vec![
        Span::styled(" Zoom: ", dim),
        Span::styled(app.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" (", dim),
        Span::styled(app.lod_level(), Style::default().fg(Color::Magenta)),
        Span::styled(") ", dim),
        Span::styled(
            if app.merge_enabled() { "[M]erge " } else { "[m]erge " },
            toggle(app.merge_enabled()),
        ),
        Span::styled(
            if app.map_renderer.show_borders { "[B]order " } else { "[b]order " },
            toggle(app.map_renderer.show_borders),
        ),
        Span::styled("| ", dim),
        Span::styled(app.center_coords(), Style::default().fg(Color::Cyan)),
        Span::styled(" | 1-8:category hjkl:pan +/-:zoom r:reset q:quit", dim),
    ]);

    frame.render_widget(Paragraph::new(status), area);
}
