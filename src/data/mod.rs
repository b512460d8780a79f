use crate::map::{LineString, Lod, MapRenderer};
use anyhow::{Context, Result};
use geojson::{GeoJson, Geometry, Value};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

#[derive(Clone, Copy)]
enum Layer {
    Coastline,
    Border,
}

/// Natural Earth files looked up in the data directory
const BASEMAP_FILES: [(&str, Layer, Lod); 5] = [
    ("ne_110m_coastline.json", Layer::Coastline, Lod::Low),
    ("ne_50m_coastline.json", Layer::Coastline, Lod::Medium),
    ("ne_10m_coastline.json", Layer::Coastline, Lod::High),
    ("ne_50m_borders.json", Layer::Border, Lod::Medium),
    ("ne_10m_borders.json", Layer::Border, Lod::High),
];

/// Load every basemap file present in `data_dir`. Files are parsed in
/// parallel; unreadable ones are logged and skipped.
pub fn load_basemap(renderer: &mut MapRenderer, data_dir: &Path) {
    let loaded: Vec<(Layer, Lod, Vec<LineString>)> = BASEMAP_FILES
        .par_iter()
        .filter_map(|&(filename, layer, lod)| {
            let path = data_dir.join(filename);
            if !path.exists() {
                return None;
            }
            match read_lines(&path) {
                Ok(lines) => Some((layer, lod, lines)),
                Err(e) => {
                    warn!(file = filename, error = %e, "failed to load basemap file");
                    None
                }
            }
        })
        .collect();

    for (layer, lod, lines) in loaded {
        info!(count = lines.len(), lod = lod.label(), "loaded basemap lines");
        for line in lines {
            match layer {
                Layer::Coastline => renderer.add_coastline(line, lod),
                Layer::Border => renderer.add_border(line, lod),
            }
        }
    }
}

/// Read a GeoJSON file and extract its lines
fn read_lines(path: &Path) -> Result<Vec<LineString>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let geojson: GeoJson = content.parse()?;
    Ok(geojson_lines(&geojson))
}

/// Extract line features (polygons contribute their exterior ring)
pub fn geojson_lines(geojson: &GeoJson) -> Vec<LineString> {
    let mut lines = Vec::new();
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for geometry in fc.features.iter().filter_map(|f| f.geometry.as_ref()) {
                geometry_lines(geometry, &mut lines);
            }
        }
        GeoJson::Feature(f) => {
            if let Some(ref geometry) = f.geometry {
                geometry_lines(geometry, &mut lines);
            }
        }
        GeoJson::Geometry(geometry) => geometry_lines(geometry, &mut lines),
    }
    lines
}

fn to_line(coords: &[Vec<f64>]) -> LineString {
    coords.iter().map(|c| (c[0], c[1])).collect()
}

fn geometry_lines(geometry: &Geometry, lines: &mut Vec<LineString>) {
    match &geometry.value {
        Value::LineString(coords) => lines.push(to_line(coords)),
        Value::MultiLineString(parts) => lines.extend(parts.iter().map(|c| to_line(c))),
        Value::Polygon(rings) => lines.extend(rings.first().map(|r| to_line(r))),
        Value::MultiPolygon(polygons) => {
            lines.extend(polygons.iter().filter_map(|rings| rings.first()).map(|r| to_line(r)))
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                geometry_lines(g, lines);
            }
        }
        _ => {}
    }
}

/// Coarse continent outlines for when no basemap data is available
pub fn generate_simple_world(renderer: &mut MapRenderer) {
    const OUTLINES: [&[(f64, f64)]; 6] = [
        // North America
        &[
            (-166.0, 68.0), (-164.0, 60.0), (-150.0, 59.0), (-135.0, 57.0),
            (-124.0, 47.0), (-120.0, 34.0), (-106.0, 23.0), (-96.0, 19.0),
            (-88.0, 16.0), (-82.0, 9.0), (-97.0, 27.0), (-89.0, 30.0),
            (-81.0, 25.0), (-76.0, 36.0), (-70.0, 42.0), (-60.0, 46.0),
            (-56.0, 52.0), (-64.0, 59.0), (-78.0, 62.0), (-94.0, 59.0),
            (-96.0, 68.0), (-125.0, 70.0), (-156.0, 71.0), (-166.0, 68.0),
        ],
        // South America
        &[
            (-79.0, 8.0), (-72.0, 12.0), (-61.0, 10.0), (-50.0, 1.0),
            (-35.0, -6.0), (-39.0, -14.0), (-42.0, -23.0), (-53.0, -34.0),
            (-63.0, -41.0), (-66.0, -55.0), (-74.0, -50.0), (-73.0, -37.0),
            (-70.0, -18.0), (-81.0, -5.0), (-79.0, 8.0),
        ],
        // Europe
        &[
            (-9.0, 37.0), (-9.0, 43.0), (-1.0, 46.0), (-4.0, 48.0),
            (2.0, 51.0), (8.0, 54.0), (10.0, 58.0), (5.0, 61.0),
            (15.0, 69.0), (28.0, 71.0), (40.0, 67.0), (40.0, 46.0),
            (28.0, 41.0), (23.0, 37.0), (19.0, 42.0), (12.0, 44.0),
            (16.0, 38.0), (9.0, 44.0), (3.0, 43.0), (-5.0, 36.0), (-9.0, 37.0),
        ],
        // Africa
        &[
            (-17.0, 21.0), (-6.0, 35.0), (10.0, 37.0), (20.0, 31.0),
            (32.0, 31.0), (43.0, 12.0), (51.0, 11.0), (40.0, -3.0),
            (40.0, -15.0), (33.0, -26.0), (20.0, -35.0), (12.0, -17.0),
            (9.0, 4.0), (-8.0, 4.0), (-17.0, 14.0), (-17.0, 21.0),
        ],
        // Asia
        &[
            (40.0, 67.0), (70.0, 73.0), (110.0, 76.0), (140.0, 72.0),
            (180.0, 68.0), (160.0, 60.0), (142.0, 53.0), (135.0, 43.0),
            (121.0, 31.0), (108.0, 21.0), (104.0, 1.0), (98.0, 16.0),
            (80.0, 7.0), (72.0, 21.0), (57.0, 25.0), (48.0, 30.0),
            (35.0, 36.0), (40.0, 46.0), (40.0, 67.0),
        ],
        // Australia
        &[
            (114.0, -22.0), (122.0, -17.0), (131.0, -11.0), (137.0, -12.0),
            (142.0, -11.0), (146.0, -19.0), (153.0, -27.0), (150.0, -37.0),
            (141.0, -38.0), (131.0, -31.0), (115.0, -34.0), (114.0, -22.0),
        ],
    ];

    for outline in OUTLINES {
        renderer.add_coastline(outline.to_vec(), Lod::Low);
    }
}
