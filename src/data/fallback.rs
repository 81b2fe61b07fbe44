//! Coarse built-in world used when no Natural Earth files are available.
//!
//! Every country that appears in the tournament table gets a rough outline so
//! both map modes stay meaningful; continents only get coastlines.

use crate::map::{Country, MapRenderer};

type Outline = &'static [(f64, f64)];

const COUNTRY_OUTLINES: &[(&str, Outline)] = &[
    (
        "Uruguay",
        &[
            (-58.4, -33.9), (-58.4, -30.2), (-56.0, -30.1), (-53.4, -32.5),
            (-53.4, -33.7), (-54.9, -34.9), (-57.8, -34.5),
        ],
    ),
    (
        "Argentina",
        &[
            (-65.7, -22.0), (-62.8, -22.0), (-57.6, -25.4), (-53.7, -26.1),
            (-57.6, -30.2), (-58.4, -33.9), (-57.5, -38.2), (-62.3, -38.8),
            (-65.0, -42.0), (-67.5, -46.4), (-69.0, -51.6), (-68.6, -52.3),
            (-72.3, -51.5), (-71.9, -44.0), (-71.4, -37.0), (-70.0, -33.0),
            (-68.4, -24.5), (-66.8, -22.0),
        ],
    ),
    (
        "Brazil",
        &[
            (-73.9, -7.3), (-70.0, -4.2), (-69.6, 1.0), (-64.0, 1.5),
            (-60.0, 5.2), (-51.6, 4.2), (-50.0, 0.0), (-44.3, -2.5),
            (-35.2, -5.5), (-39.0, -13.5), (-40.9, -22.0), (-48.5, -26.0),
            (-53.4, -33.7), (-57.6, -30.2), (-53.7, -26.1), (-57.6, -25.4),
            (-58.1, -20.2), (-60.2, -16.3), (-65.3, -10.8), (-70.6, -11.0),
        ],
    ),
    (
        "Italy",
        &[
            (7.0, 45.9), (12.0, 47.0), (13.7, 46.5), (12.3, 44.6),
            (14.0, 42.5), (16.1, 41.4), (18.5, 40.1), (16.5, 39.0),
            (15.7, 38.0), (16.0, 39.5), (15.4, 40.0), (12.5, 41.8),
            (10.5, 42.9), (8.7, 44.4), (7.5, 43.8),
        ],
    ),
    (
        "Germany",
        &[
            (6.0, 51.0), (6.1, 50.1), (8.1, 48.9), (7.6, 47.6),
            (10.5, 47.5), (13.0, 47.5), (13.8, 48.8), (12.1, 50.3),
            (15.0, 51.1), (14.6, 52.6), (14.2, 53.9), (11.0, 54.0),
            (9.9, 54.8), (8.6, 54.9), (7.1, 53.7), (7.0, 52.2),
        ],
    ),
    (
        "England",
        &[
            (-5.7, 50.0), (-3.0, 50.7), (1.4, 51.2), (1.7, 52.7),
            (0.2, 53.5), (-1.6, 55.6), (-2.6, 55.8), (-3.1, 54.9),
            (-3.6, 54.5), (-2.9, 53.3), (-4.7, 52.8), (-3.1, 51.4),
            (-4.5, 51.1),
        ],
    ),
    (
        "France",
        &[
            (-1.8, 43.4), (3.1, 42.4), (4.6, 43.4), (7.5, 43.8),
            (7.0, 45.9), (6.8, 47.3), (8.1, 48.9), (6.1, 50.1),
            (4.2, 49.9), (2.5, 51.1), (1.4, 50.1), (-1.4, 48.6),
            (-4.7, 48.4), (-2.2, 47.1), (-1.2, 46.0),
        ],
    ),
    (
        "Spain",
        &[
            (-9.0, 43.0), (-8.9, 41.8), (-6.2, 41.6), (-7.0, 38.9),
            (-7.4, 37.2), (-6.0, 36.1), (-4.4, 36.7), (-2.0, 36.7),
            (-0.7, 37.6), (0.2, 38.7), (-0.3, 39.4), (0.8, 40.7),
            (3.2, 41.9), (1.4, 42.6), (-1.8, 43.4), (-4.0, 43.4),
            (-7.8, 43.7),
        ],
    ),
    (
        "Netherlands",
        &[
            (3.4, 51.4), (5.9, 51.0), (6.2, 51.9), (7.1, 52.2),
            (7.2, 53.3), (6.9, 53.5), (5.1, 53.4), (4.7, 52.9),
            (4.1, 52.0),
        ],
    ),
    (
        "Hungary",
        &[
            (16.1, 46.8), (16.6, 46.5), (18.8, 45.8), (20.3, 46.1),
            (22.7, 47.9), (22.1, 48.4), (20.5, 48.5), (18.8, 48.1),
            (17.2, 48.0),
        ],
    ),
    (
        "Czechoslovakia",
        &[
            (12.1, 50.3), (14.3, 51.0), (16.9, 50.5), (18.9, 49.5),
            (22.6, 49.1), (22.1, 48.4), (20.5, 48.5), (18.8, 48.1),
            (17.2, 48.0), (15.0, 48.8), (13.8, 48.8),
        ],
    ),
    (
        "Sweden",
        &[
            (11.1, 59.0), (12.6, 56.2), (14.3, 55.4), (16.5, 56.3),
            (16.7, 57.9), (18.9, 59.8), (17.3, 61.3), (17.8, 62.8),
            (21.4, 64.4), (24.1, 65.8), (23.5, 68.0), (20.6, 69.1),
            (18.0, 68.5), (14.5, 65.3), (12.2, 63.0), (12.4, 61.5),
        ],
    ),
    (
        "Croatia",
        &[
            (13.6, 45.1), (15.2, 45.4), (15.7, 46.2), (16.6, 46.5),
            (18.8, 45.9), (19.4, 45.2), (16.0, 45.2), (15.8, 44.6),
            (17.6, 43.0), (18.5, 42.5), (16.0, 43.5), (14.9, 44.7),
            (14.5, 45.3),
        ],
    ),
];

/// Simplified continent coastlines
const CONTINENT_COASTLINES: &[Outline] = &[
    // North America
    &[
        (-168.0, 65.0), (-166.0, 60.0), (-141.0, 60.0), (-130.0, 55.0),
        (-125.0, 48.0), (-124.0, 40.0), (-117.0, 32.0), (-110.0, 25.0),
        (-97.0, 25.0), (-97.0, 28.0), (-82.0, 24.0), (-80.0, 25.0),
        (-81.0, 31.0), (-75.0, 35.0), (-70.0, 41.0), (-67.0, 45.0),
        (-65.0, 47.0), (-55.0, 47.0), (-52.0, 47.0), (-55.0, 52.0),
        (-58.0, 55.0), (-64.0, 60.0), (-73.0, 62.0), (-80.0, 63.0),
        (-95.0, 62.0), (-110.0, 68.0), (-130.0, 70.0), (-145.0, 70.0),
        (-168.0, 65.0),
    ],
    // South America
    &[
        (-80.0, 10.0), (-75.0, 5.0), (-70.0, 5.0), (-60.0, 5.0),
        (-50.0, 0.0), (-35.0, -5.0), (-35.0, -10.0), (-38.0, -15.0),
        (-40.0, -22.0), (-48.0, -25.0), (-55.0, -34.0), (-58.0, -38.0),
        (-65.0, -42.0), (-68.0, -50.0), (-75.0, -52.0), (-75.0, -45.0),
        (-72.0, -40.0), (-72.0, -30.0), (-70.0, -20.0), (-70.0, -15.0),
        (-80.0, -5.0), (-80.0, 0.0), (-80.0, 10.0),
    ],
    // Europe
    &[
        (-10.0, 36.0), (-5.0, 36.0), (0.0, 38.0), (5.0, 43.0),
        (10.0, 44.0), (15.0, 45.0), (20.0, 40.0), (25.0, 37.0),
        (30.0, 40.0), (35.0, 42.0), (40.0, 43.0), (40.0, 55.0),
        (30.0, 60.0), (25.0, 65.0), (20.0, 70.0), (10.0, 71.0),
        (5.0, 62.0), (5.0, 58.0), (-5.0, 58.0), (-10.0, 52.0),
        (-5.0, 48.0), (-5.0, 43.0), (-10.0, 36.0),
    ],
    // Africa
    &[
        (-17.0, 15.0), (-17.0, 20.0), (-15.0, 28.0), (-5.0, 35.0),
        (10.0, 37.0), (20.0, 33.0), (25.0, 32.0), (35.0, 30.0),
        (35.0, 20.0), (42.0, 12.0), (50.0, 12.0), (45.0, 5.0),
        (35.0, -5.0), (35.0, -20.0), (35.0, -25.0), (30.0, -30.0),
        (20.0, -35.0), (18.0, -35.0), (15.0, -30.0), (10.0, -15.0),
        (10.0, 0.0), (5.0, 5.0), (-5.0, 5.0), (-10.0, 10.0),
        (-17.0, 15.0),
    ],
    // Asia
    &[
        (35.0, 42.0), (40.0, 43.0), (50.0, 40.0), (55.0, 37.0),
        (60.0, 25.0), (65.0, 25.0), (70.0, 20.0), (75.0, 15.0),
        (80.0, 8.0), (80.0, 15.0), (88.0, 22.0), (92.0, 22.0),
        (95.0, 16.0), (100.0, 14.0), (105.0, 10.0), (110.0, 20.0),
        (115.0, 22.0), (120.0, 22.0), (122.0, 25.0), (125.0, 30.0),
        (130.0, 35.0), (135.0, 35.0), (140.0, 40.0), (145.0, 45.0),
        (145.0, 50.0), (140.0, 55.0), (135.0, 55.0), (130.0, 52.0),
        (130.0, 43.0), (120.0, 40.0), (110.0, 45.0), (90.0, 50.0),
        (70.0, 55.0), (60.0, 55.0), (50.0, 50.0), (40.0, 43.0),
    ],
    // Australia
    &[
        (115.0, -20.0), (120.0, -18.0), (130.0, -12.0), (140.0, -12.0),
        (145.0, -15.0), (150.0, -25.0), (153.0, -30.0), (150.0, -35.0),
        (145.0, -38.0), (140.0, -38.0), (135.0, -35.0), (130.0, -32.0),
        (125.0, -32.0), (115.0, -35.0), (115.0, -25.0), (115.0, -20.0),
    ],
];

/// Install the built-in outlines into `renderer`
pub fn generate_simple_world(renderer: &mut MapRenderer) {
    for outline in CONTINENT_COASTLINES {
        renderer.add_coastline(outline.to_vec());
    }

    renderer.add_countries(
        COUNTRY_OUTLINES
            .iter()
            .map(|(name, outline)| Country::new(*name, vec![vec![outline.to_vec()]])),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worldcup::RECORDS;

    #[test]
    fn test_every_finalist_has_an_outline() {
        let mut renderer = MapRenderer::new();
        generate_simple_world(&mut renderer);
        for record in RECORDS.iter() {
            for country in [record.winner, record.runner_up] {
                assert!(
                    renderer.countries_for(country).next().is_some(),
                    "no outline for {}",
                    country
                );
            }
        }
    }

    #[test]
    fn test_outlines_contain_capitals() {
        let mut renderer = MapRenderer::new();
        generate_simple_world(&mut renderer);
        let at = |lon, lat| renderer.country_at(lon, lat).map(|c| c.name.as_str());
        assert_eq!(at(-47.9, -15.8), Some("Brazil"));
        assert_eq!(at(-64.2, -31.4), Some("Argentina"));
        assert_eq!(at(2.35, 48.85), Some("France"));
        assert_eq!(at(12.5, 41.9), Some("Italy"));
        assert_eq!(at(13.4, 52.5), Some("Germany"));
        assert_eq!(at(-3.7, 40.4), Some("Spain"));
    }
}
