//! Country centroid table and name aliases used by the trade tables

use crate::arc::Point;
use std::collections::HashMap;
use std::sync::LazyLock;

/// (name, latitude, longitude) of each country centroid.
const CENTROIDS: &[(&str, f64, f64)] = &[
    ("Australia", -25.2744, 133.7751),
    ("China", 35.8617, 104.1954),
    ("Japan", 36.2048, 138.2529),
    ("South Korea", 35.9078, 127.7669),
    ("United States", 37.0902, -95.7129),
    ("India", 20.5937, 78.9629),
    ("Thailand", 15.8700, 100.9925),
    ("Taiwan", 23.6978, 120.9605),
    ("New Zealand", -40.9006, 174.8860),
    ("Malaysia", 4.2105, 101.9758),
    ("Singapore", 1.3521, 103.8198),
    ("United Kingdom", 55.3781, -3.4360),
    ("Germany", 51.1657, 10.4515),
    ("Vietnam", 14.0583, 108.2772),
    ("Indonesia", -0.7893, 113.9213),
    ("Hong Kong", 22.3193, 114.1694),
    ("Canada", 56.1304, -106.3468),
    ("France", 46.2276, 2.2137),
    ("Italy", 41.8719, 12.5674),
    ("Netherlands", 52.1326, 5.2913),
    ("Belgium", 50.5039, 4.4699),
    ("Spain", 40.4637, -3.7492),
    ("Switzerland", 46.8182, 8.2275),
    ("Brazil", -14.2350, -51.9253),
    ("Mexico", 23.6345, -102.5528),
    ("Saudi Arabia", 23.8859, 45.0792),
    ("United Arab Emirates", 23.4241, 53.8478),
    ("Philippines", 12.8797, 121.7740),
    ("Papua New Guinea", -6.3150, 143.9555),
    ("Fiji", -17.7134, 178.0650),
    ("Bangladesh", 23.6850, 90.3563),
    ("Pakistan", 30.3753, 69.3451),
    ("Chile", -35.6751, -71.5430),
    ("Peru", -9.1900, -75.0152),
    ("South Africa", -30.5595, 22.9375),
    ("Israel", 31.0461, 34.8516),
    ("Poland", 51.9194, 19.1451),
    ("Turkey", 38.9637, 35.2433),
    ("Russia", 61.5240, 105.3188),
    ("Argentina", -38.4161, -63.6167),
    ("Colombia", 4.5709, -74.2973),
    ("Egypt", 26.8206, 30.8025),
    ("Kenya", -0.0236, 37.9062),
    ("Nigeria", 9.0820, 8.6753),
    ("Oman", 21.4735, 55.9754),
    ("Qatar", 25.3548, 51.1839),
    ("Bahrain", 26.0667, 50.5577),
    ("Kuwait", 29.3117, 47.4818),
];

/// Statistical-table spellings mapped to the names used in `CENTROIDS`.
const ALIASES: &[(&str, &str)] = &[
    ("Korea, Republic of (South)", "South Korea"),
    ("United States of America", "United States"),
    ("Hong Kong (SAR of China)", "Hong Kong"),
    ("Viet Nam", "Vietnam"),
    ("China (excludes SARs and Taiwan)", "China"),
    ("United Kingdom (c)", "United Kingdom"),
];

static COORDS: LazyLock<HashMap<&'static str, Point>> = LazyLock::new(|| {
    CENTROIDS
        .iter()
        .map(|&(name, lat, lon)| (name, Point::new(lon, lat)))
        .collect()
});

static ALIAS_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ALIASES.iter().copied().collect());

/// Centroid of a (normalized) country name.
pub fn coordinates(country: &str) -> Option<Point> {
    COORDS.get(country).copied()
}

/// Trim and map a table spelling to its canonical name.
pub fn normalize_country_name(raw: &str) -> String {
    let name = raw.trim();
    ALIAS_MAP.get(name).copied().unwrap_or(name).to_string()
}
