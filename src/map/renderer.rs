use crate::aggregate::CategoryPoints;
use crate::braille::BrailleCanvas;
use crate::map::geometry::{draw_circle, draw_line, marker_radius};
use crate::map::projection::Viewport;

/// A geographic line (sequence of lon/lat coordinates)
pub type LineString = Vec<(f64, f64)>;

/// Level of detail for basemap data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lod {
    Low,    // 110m - world view
    Medium, // 50m - continental
    High,   // 10m - regional
}

impl Lod {
    /// Select LOD based on zoom level
    pub fn from_zoom(zoom: f64) -> Self {
        if zoom < 2.0 {
            Lod::Low
        } else if zoom < 8.0 {
            Lod::Medium
        } else {
            Lod::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lod::Low => "110m",
            Lod::Medium => "50m",
            Lod::High => "10m",
        }
    }
}

/// Rendered canvases, drawn back to front by the UI
pub struct MapLayers {
    pub coastlines: BrailleCanvas,
    pub borders: BrailleCanvas,
    /// One canvas per category, in category order
    pub events: Vec<(String, BrailleCanvas)>,
}

/// Basemap store plus event point rendering
pub struct MapRenderer {
    coastlines: [Vec<LineString>; 3],
    borders: [Vec<LineString>; 3],
    pub show_borders: bool,
}

fn lod_index(lod: Lod) -> usize {
    match lod {
        Lod::Low => 0,
        Lod::Medium => 1,
        Lod::High => 2,
    }
}

/// Best available data: the requested LOD, else coarser, else finer
fn pick_lod(layers: &[Vec<LineString>; 3], lod: Lod) -> &[LineString] {
    let wanted = lod_index(lod);
    (0..=wanted)
        .rev()
        .chain(wanted + 1..layers.len())
        .map(|i| &layers[i])
        .find(|lines| !lines.is_empty())
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

impl MapRenderer {
    pub fn new() -> Self {
        Self {
            coastlines: Default::default(),
            borders: Default::default(),
            show_borders: true,
        }
    }

    pub fn add_coastline(&mut self, line: LineString, lod: Lod) {
        self.coastlines[lod_index(lod)].push(line);
    }

    pub fn add_border(&mut self, line: LineString, lod: Lod) {
        self.borders[lod_index(lod)].push(line);
    }

    pub fn has_data(&self) -> bool {
        self.coastlines.iter().any(|lines| !lines.is_empty())
    }

    pub fn toggle_borders(&mut self) {
        self.show_borders = !self.show_borders;
    }

    /// Render basemap and event layers onto canvases of `width` x `height` characters
    pub fn render(
        &self,
        width: usize,
        height: usize,
        viewport: &Viewport,
        points: &CategoryPoints,
    ) -> MapLayers {
        let lod = Lod::from_zoom(viewport.zoom);

        let mut coastlines = BrailleCanvas::new(width, height);
        for line in pick_lod(&self.coastlines, lod) {
            draw_linestring(&mut coastlines, line, viewport);
        }

        let mut borders = BrailleCanvas::new(width, height);
        if self.show_borders {
            for line in pick_lod(&self.borders, lod) {
                draw_linestring(&mut borders, line, viewport);
            }
        }

        let events = points
            .iter()
            .map(|(category, set)| {
                let mut canvas = BrailleCanvas::new(width, height);
                for (lon, lat, size) in set.iter() {
                    let (px, py) = viewport.project(lon, lat);
                    if viewport.is_visible(px, py) {
                        draw_circle(&mut canvas, px, py, marker_radius(size));
                    }
                }
                (category.clone(), canvas)
            })
            .collect();

        MapLayers {
            coastlines,
            borders,
            events,
        }
    }
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw a linestring with viewport culling
fn draw_linestring(canvas: &mut BrailleCanvas, line: &LineString, viewport: &Viewport) {
    let mut prev: Option<(i32, i32)> = None;

    for &(lon, lat) in line {
        let p = viewport.project(lon, lat);
        if let Some(q) = prev {
            // Skip segments that wrap around the antimeridian
            let jump = ((p.0 - q.0).abs() + (p.1 - q.1).abs()) as usize;
            if jump < viewport.width && viewport.segment_might_be_visible(q, p) {
                draw_line(canvas, q.0, q.1, p.0, p.1);
            }
        }
        prev = Some(p);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::PointSet;

    #[test]
    fn test_lod_fallback() {
        let mut renderer = MapRenderer::new();
        assert!(!renderer.has_data());
        renderer.add_coastline(vec![(0.0, 0.0), (10.0, 0.0)], Lod::Low);
        assert!(renderer.has_data());
        assert_eq!(pick_lod(&renderer.coastlines, Lod::High).len(), 1);
        assert!(pick_lod(&renderer.borders, Lod::High).is_empty());
    }

    #[test]
    fn test_event_layers_follow_category_order() {
        let renderer = MapRenderer::new();
        let viewport = Viewport::world(80, 40);
        let mut points = CategoryPoints::new();
        points.insert("wildfires".to_string(), [(0.0, 0.0, 250.0)].into_iter().collect());
        points.insert("volcanoes".to_string(), PointSet::new());

        let layers = renderer.render(40, 10, &viewport, &points);
        let names: Vec<_> = layers.events.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["wildfires", "volcanoes"]);
        assert!(!layers.events[0].1.is_blank());
        assert!(layers.events[1].1.is_blank());
        assert!(layers.coastlines.is_blank());
    }

    #[test]
    fn test_hidden_borders_not_drawn() {
        let mut renderer = MapRenderer::new();
        renderer.add_border(vec![(-20.0, 10.0), (20.0, 10.0)], Lod::Medium);
        let viewport = Viewport::world(80, 40);
        assert!(!renderer.render(40, 10, &viewport, &CategoryPoints::new()).borders.is_blank());

        renderer.toggle_borders();
        assert!(renderer.render(40, 10, &viewport, &CategoryPoints::new()).borders.is_blank());
    }
}
