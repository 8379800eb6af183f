//! Race context: surface and distance-category parsing.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::breeding::profiles::{DistanceCategory, Surface};

/// Races at or under this many furlongs are sprints.
pub const SPRINT_MAX_FURLONGS: f64 = 7.0;
/// Races at or over this many furlongs are routes.
pub const ROUTE_MIN_FURLONGS: f64 = 9.0;

const FURLONGS_PER_MILE: f64 = 8.0;
const YARDS_PER_FURLONG: f64 = 220.0;
const METERS_PER_FURLONG: f64 = 201.168;
/// An "m" quantity at or above this is read as meters rather than miles.
const METRIC_THRESHOLD: f64 = 100.0;

static DISTANCE_RE: OnceLock<Regex> = OnceLock::new();

fn distance_re() -> &'static Regex {
    DISTANCE_RE.get_or_init(|| {
        Regex::new(
            r"^(?:abt\.?|about)?\s*(?P<qty>\d+(?:\.\d+)?(?:[\s-]+\d+/\d+)?|\d+/\d+)\s*(?P<unit>furlongs?|f|meters?|metres?|miles?|mi|m)(?:\s*(?P<yards>\d+)\s*(?:yards?|yds?|y))?$",
        )
        .expect("distance pattern is valid")
    })
}

/// Race header fields the engine needs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceSnapshot {
    #[serde(default)]
    pub surface: String,
    #[serde(default, alias = "distance_descriptor")]
    pub distance: String,
}

impl RaceSnapshot {
    pub fn new(surface: &str, distance: &str) -> Self {
        Self {
            surface: surface.to_string(),
            distance: distance.to_string(),
        }
    }
}

/// Parsed race conditions shared by every runner in a race.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RaceConditions {
    pub surface: Surface,
    pub distance_category: DistanceCategory,
    /// `None` when the descriptor could not be parsed.
    pub furlongs: Option<f64>,
}

impl RaceConditions {
    pub fn from_race(race: &RaceSnapshot) -> Self {
        let furlongs = parse_furlongs(&race.distance);
        Self {
            surface: parse_surface(&race.surface),
            distance_category: furlongs
                .map(categorize_furlongs)
                .unwrap_or(DistanceCategory::Versatile),
            furlongs,
        }
    }

    /// Context for one runner in these conditions.
    pub fn for_runner(&self, is_debut: bool) -> ScoreContext {
        ScoreContext {
            surface: self.surface,
            distance_category: self.distance_category,
            is_debut,
        }
    }
}

/// Everything the scorers need to know about the race and the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreContext {
    pub surface: Surface,
    pub distance_category: DistanceCategory,
    pub is_debut: bool,
}

impl ScoreContext {
    pub fn new(race: &RaceSnapshot, is_debut: bool) -> Self {
        RaceConditions::from_race(race).for_runner(is_debut)
    }
}

/// Map a race surface string to a [`Surface`]. Unrecognized text is
/// `Unknown`.
pub fn parse_surface(raw: &str) -> Surface {
    let text = raw.trim().to_lowercase();
    match text.as_str() {
        "dirt" | "d" | "ダ" | "ダート" => Surface::Dirt,
        "turf" | "t" | "grass" | "inner turf" | "outer turf" | "芝" => Surface::Turf,
        "synthetic" | "aw" | "all weather" | "all-weather" | "tapeta" | "polytrack"
        | "cushion track" => Surface::Synthetic,
        "versatile" => Surface::Versatile,
        _ => Surface::Unknown,
    }
}

/// Parse a distance descriptor into furlongs.
///
/// Accepts furlongs ("6f", "6 1/2f", "6.5f", "7 furlongs"), miles ("1m",
/// "1 1/8m", "1 1/16 miles"), miles and yards ("1m70y") and metric
/// distances ("1200m", "1600 meters").
pub fn parse_furlongs(raw: &str) -> Option<f64> {
    let text = raw
        .trim()
        .to_lowercase()
        .replace('½', " 1/2")
        .replace('¼', " 1/4")
        .replace('¾', " 3/4");
    let caps = distance_re().captures(text.trim())?;

    let qty = parse_quantity(&caps["qty"])?;
    let yards = match caps.name("yards") {
        Some(m) => m.as_str().parse::<f64>().ok()?,
        None => 0.0,
    };

    let furlongs = match &caps["unit"] {
        "f" | "furlong" | "furlongs" => qty,
        "meter" | "meters" | "metre" | "metres" => qty / METERS_PER_FURLONG,
        "m" if qty >= METRIC_THRESHOLD => qty / METERS_PER_FURLONG,
        _ => qty * FURLONGS_PER_MILE,
    } + yards / YARDS_PER_FURLONG;

    if furlongs > 0.0 {
        Some(furlongs)
    } else {
        None
    }
}

/// Whole number, decimal, bare fraction or mixed number ("1 1/8", "1-1/8").
fn parse_quantity(text: &str) -> Option<f64> {
    text.split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('/') {
            Some((num, den)) => {
                let num: f64 = num.parse().ok()?;
                let den: f64 = den.parse().ok()?;
                if den == 0.0 {
                    None
                } else {
                    Some(num / den)
                }
            }
            None => part.parse::<f64>().ok(),
        })
        .sum()
}

/// Sprint at 7f or less, route at 9f or more, versatile in between.
pub fn categorize_furlongs(furlongs: f64) -> DistanceCategory {
    if furlongs <= SPRINT_MAX_FURLONGS {
        DistanceCategory::Sprint
    } else if furlongs >= ROUTE_MIN_FURLONGS {
        DistanceCategory::Route
    } else {
        DistanceCategory::Versatile
    }
}

/// Distance category for a descriptor; unparseable text is versatile.
pub fn distance_category(raw: &str) -> DistanceCategory {
    parse_furlongs(raw)
        .map(categorize_furlongs)
        .unwrap_or(DistanceCategory::Versatile)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.map(|a| (a - b).abs() < 1e-6).unwrap_or(false)
    }

    #[test]
    fn test_parse_furlongs() {
        assert!(approx(parse_furlongs("6f"), 6.0));
        assert!(approx(parse_furlongs("6 1/2f"), 6.5));
        assert!(approx(parse_furlongs("6½f"), 6.5));
        assert!(approx(parse_furlongs("5.5 F"), 5.5));
        assert!(approx(parse_furlongs("7 furlongs"), 7.0));
        assert!(approx(parse_furlongs("abt 7 1/2f"), 7.5));
    }

    #[test]
    fn test_parse_miles() {
        assert!(approx(parse_furlongs("1m"), 8.0));
        assert!(approx(parse_furlongs("1 1/8m"), 9.0));
        assert!(approx(parse_furlongs("1-1/16 miles"), 8.5));
        assert!(approx(parse_furlongs("1 mile"), 8.0));
        assert!(approx(parse_furlongs("1m70y"), 8.0 + 70.0 / 220.0));
    }

    #[test]
    fn test_parse_meters() {
        let f = parse_furlongs("1200m").unwrap();
        assert!((f - 5.965).abs() < 0.01);
        assert_eq!(distance_category("2400 meters"), DistanceCategory::Route);
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_furlongs(""), None);
        assert_eq!(parse_furlongs("long way"), None);
        assert_eq!(parse_furlongs("6/0f"), None);
        assert_eq!(distance_category("???"), DistanceCategory::Versatile);
    }

    #[test]
    fn test_category_boundaries() {
        assert_eq!(categorize_furlongs(7.0), DistanceCategory::Sprint);
        assert_eq!(categorize_furlongs(7.5), DistanceCategory::Versatile);
        assert_eq!(categorize_furlongs(8.0), DistanceCategory::Versatile);
        assert_eq!(categorize_furlongs(8.5), DistanceCategory::Versatile);
        assert_eq!(categorize_furlongs(9.0), DistanceCategory::Route);
        assert_eq!(distance_category("6f"), DistanceCategory::Sprint);
        assert_eq!(distance_category("1m"), DistanceCategory::Versatile);
        assert_eq!(distance_category("1 1/8m"), DistanceCategory::Route);
    }

    #[test]
    fn test_parse_surface() {
        assert_eq!(parse_surface("Dirt"), Surface::Dirt);
        assert_eq!(parse_surface(" TURF "), Surface::Turf);
        assert_eq!(parse_surface("inner turf"), Surface::Turf);
        assert_eq!(parse_surface("芝"), Surface::Turf);
        assert_eq!(parse_surface("Tapeta"), Surface::Synthetic);
        assert_eq!(parse_surface("AW"), Surface::Synthetic);
        assert_eq!(parse_surface("slop"), Surface::Unknown);
    }

    #[test]
    fn test_race_conditions() {
        let race = RaceSnapshot::new("dirt", "not a distance");
        let conditions = RaceConditions::from_race(&race);
        assert_eq!(conditions.furlongs, None);
        assert_eq!(conditions.distance_category, DistanceCategory::Versatile);

        let ctx = conditions.for_runner(true);
        assert_eq!(ctx.surface, Surface::Dirt);
        assert!(ctx.is_debut);
    }
}
