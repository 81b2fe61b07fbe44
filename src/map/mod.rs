mod geometry;
mod projection;
mod renderer;
mod spatial;

pub use projection::Viewport;
pub use renderer::{Country, Layer, LayerKind, LineString, MapLayers, MapRenderer, Polygon};
