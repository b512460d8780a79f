use crate::aggregate::{aggregate, CategoryPoints};
use crate::classify::ClassifiedEvents;
use crate::config::Thresholds;
use crate::map::{Lod, MapRenderer, Viewport};
use tracing::debug;

/// Application state
pub struct App {
    pub viewport: Viewport,
    pub map_renderer: MapRenderer,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    classified: ClassifiedEvents,
    thresholds: Thresholds,
    /// One flag per category, aligned with classification order
    selected: Vec<bool>,
    merge: bool,
    /// Point sets for the current selection, rebuilt on every toggle
    points: CategoryPoints,
}

/// Braille pixels for a terminal size, minus the map border and the two
/// bottom lines (legend and status bar)
fn pixel_size(width: usize, height: usize) -> (usize, usize) {
    (width.saturating_sub(2) * 2, height.saturating_sub(4) * 4)
}

/// Braille pixel for a terminal cell, accounting for the 1-cell border
fn cell_to_pixel(col: u16, row: u16) -> (i32, i32) {
    (col.saturating_sub(1) as i32 * 2, row.saturating_sub(1) as i32 * 4)
}

impl App {
    pub fn new(
        width: usize,
        height: usize,
        classified: ClassifiedEvents,
        thresholds: Thresholds,
        merge: bool,
    ) -> Self {
        let (pixel_width, pixel_height) = pixel_size(width, height);
        let selected = vec![true; classified.len()];
        let mut app = Self {
            viewport: Viewport::world(pixel_width, pixel_height),
            map_renderer: MapRenderer::new(),
            should_quit: false,
            last_mouse: None,
            classified,
            thresholds,
            selected,
            merge,
            points: CategoryPoints::new(),
        };
        app.refresh_points();
        app
    }

    fn refresh_points(&mut self) {
        self.points = aggregate(&self.classified, &self.selected, self.merge, &self.thresholds);
        debug!(
            categories = self.points.len(),
            points = self.points.values().map(|p| p.len()).sum::<usize>(),
            merge = self.merge,
            "refreshed point sets"
        );
    }

    pub fn points(&self) -> &CategoryPoints {
        &self.points
    }

    /// Categories in display order with their selection state and point count
    pub fn legend(&self) -> Vec<(&str, bool, usize)> {
        self.classified
            .categories()
            .zip(&self.selected)
            .map(|(name, &on)| (name, on, self.points.get(name).map_or(0, |p| p.len())))
            .collect()
    }

    /// Toggle the category at `index` (0-based); ignored past the last category
    pub fn toggle_category(&mut self, index: usize) {
        if let Some(flag) = self.selected.get_mut(index) {
            *flag = !*flag;
            self.refresh_points();
        }
    }

    pub fn toggle_merge(&mut self) {
        self.merge = !self.merge;
        self.refresh_points();
    }

    pub fn merge_enabled(&self) -> bool {
        self.merge
    }

    /// Return to the whole-world view
    pub fn reset_view(&mut self) {
        self.viewport = Viewport::world(self.viewport.width, self.viewport.height);
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        let (pixel_width, pixel_height) = pixel_size(width, height);
        self.viewport.width = pixel_width;
        self.viewport.height = pixel_height;
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Zoom in towards a terminal cell
    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        let (px, py) = cell_to_pixel(col, row);
        self.viewport.zoom_at(px, py, 1.5);
    }

    /// Zoom out from a terminal cell
    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        let (px, py) = cell_to_pixel(col, row);
        self.viewport.zoom_at(px, py, 1.0 / 1.5);
    }

    /// Pan by the distance dragged since the last mouse event
    pub fn handle_drag(&mut self, x: u16, y: u16) {
        if let Some((last_x, last_y)) = self.last_mouse {
            let dx = last_x as i32 - x as i32;
            let dy = last_y as i32 - y as i32;
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

    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    pub fn center_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }

    pub fn lod_level(&self) -> &'static str {
        Lod::from_zoom(self.viewport.zoom).label()
    }
}
