mod fallback;

use std::fs;
use std::path::Path;

use anyhow::{bail, Result};
use geojson::{Feature, GeoJson, Geometry, Value};
use rayon::prelude::*;
use tracing::{info, warn};

use crate::map::{Country, LineString, MapRenderer, Polygon};

pub use fallback::generate_simple_world;

/// Country outline files, most detailed first; the first one that loads wins
const COUNTRY_FILES: [&str; 2] = [
    "ne_50m_admin_0_countries.json",
    "ne_110m_admin_0_countries.json",
];

const COASTLINE_FILES: [&str; 2] = ["ne_50m_coastline.json", "ne_110m_coastline.json"];

/// Feature properties that may hold a country's name
const NAME_PROPERTIES: [&str; 4] = ["ADMIN", "NAME", "name", "admin"];

/// Historical or sub-national names and the present-day countries that draw them
const LOCATION_ALIASES: &[(&str, &[&str])] = &[
    ("England", &["United Kingdom"]),
    ("Czechoslovakia", &["Czechia", "Czech Republic", "Slovakia"]),
    ("West Germany", &["Germany"]),
];

/// Country names a layer location may be drawn as, the location itself first
pub fn location_names(location: &str) -> Vec<&str> {
    let mut names = vec![location];
    if let Some((_, aliases)) = LOCATION_ALIASES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(location))
    {
        names.extend(aliases.iter().copied());
    }
    names
}

/// Load Natural Earth country outlines and coastlines found in `data_dir`
pub fn load_all_geojson(renderer: &mut MapRenderer, data_dir: &Path) -> Result<()> {
    for filename in COUNTRY_FILES {
        let path = data_dir.join(filename);
        if !path.exists() {
            continue;
        }
        match load_countries(&path) {
            Ok(countries) => {
                info!(file = filename, countries = countries.len(), "loaded country outlines");
                renderer.add_countries(countries);
                break;
            }
            Err(e) => warn!(file = filename, error = %e, "failed to load country outlines"),
        }
    }

    for filename in COASTLINE_FILES {
        let path = data_dir.join(filename);
        if !path.exists() {
            continue;
        }
        match load_coastlines(renderer, &path) {
            Ok(()) => {
                info!(file = filename, "loaded coastlines");
                break;
            }
            Err(e) => warn!(file = filename, error = %e, "failed to load coastlines"),
        }
    }

    Ok(())
}

fn read_geojson(path: &Path) -> Result<GeoJson> {
    let mut bytes = fs::read(path)?;
    let value: serde_json::Value = simd_json::serde::from_slice(&mut bytes)?;
    Ok(GeoJson::from_json_value(value)?)
}

/// Load country outlines from a FeatureCollection
fn load_countries(path: &Path) -> Result<Vec<Country>> {
    let GeoJson::FeatureCollection(fc) = read_geojson(path)? else {
        bail!("expected a FeatureCollection");
    };
    Ok(fc.features.par_iter().filter_map(country_from_feature).collect())
}

/// Load coastline GeoJSON data
fn load_coastlines(renderer: &mut MapRenderer, path: &Path) -> Result<()> {
    let geojson = read_geojson(path)?;
    process_geojson_lines(&geojson, |line| renderer.add_coastline(line));
    Ok(())
}

/// Build a country from a (Multi)Polygon feature with a name property
fn country_from_feature(feature: &Feature) -> Option<Country> {
    let props = feature.properties.as_ref()?;
    let name = NAME_PROPERTIES
        .iter()
        .find_map(|key| props.get(*key).and_then(|v| v.as_str()))?;

    let polygons: Vec<Polygon> = match &feature.geometry.as_ref()?.value {
        Value::Polygon(rings) => vec![to_polygon(rings)],
        Value::MultiPolygon(polygons) => polygons.iter().map(|rings| to_polygon(rings)).collect(),
        _ => return None,
    };

    Some(Country::new(name, polygons))
}

fn to_polygon(rings: &[Vec<Vec<f64>>]) -> Polygon {
    rings.iter().map(|ring| to_line(ring)).collect()
}

fn to_line(coords: &[Vec<f64>]) -> LineString {
    coords
        .iter()
        .filter(|c| c.len() >= 2)
        .map(|c| (c[0], c[1]))
        .collect()
}

/// Process GeoJSON and extract line features
fn process_geojson_lines<F>(geojson: &GeoJson, mut add_line: F)
where
    F: FnMut(LineString),
{
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(ref geometry) = feature.geometry {
                    process_geometry_lines(geometry, &mut add_line);
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(ref geometry) = f.geometry {
                process_geometry_lines(geometry, &mut add_line);
            }
        }
        GeoJson::Geometry(geometry) => {
            process_geometry_lines(geometry, &mut add_line);
        }
    }
}

fn process_geometry_lines<F>(geometry: &Geometry, add_line: &mut F)
where
    F: FnMut(LineString),
{
    match &geometry.value {
        Value::LineString(coords) => add_line(to_line(coords)),
        Value::MultiLineString(lines) => {
            for coords in lines {
                add_line(to_line(coords));
            }
        }
        Value::Polygon(rings) => {
            if let Some(exterior) = rings.first() {
                add_line(to_line(exterior));
            }
        }
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                if let Some(exterior) = rings.first() {
                    add_line(to_line(exterior));
                }
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                process_geometry_lines(g, add_line);
            }
        }
        _ => {}
    }
}
