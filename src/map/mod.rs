mod geometry;
mod projection;
mod renderer;

pub use geometry::marker_radius;
pub use projection::Viewport;
pub use renderer::{LineString, Lod, MapLayers, MapRenderer};
