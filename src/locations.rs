//! Location resolver: airport codes embedded in component names.
//!
//! Cloudflare names its data-center components like
//! `"Amsterdam, Netherlands - (AMS)"`. The code in parentheses is the only
//! structured hint that a component is a point of presence, so everything
//! that needs to tell locations from services goes through
//! [`extract_airport_code`].

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

static AIRPORT_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-Z]{3})\)$").expect("airport code pattern is valid"));

static DISPLAY_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" - \([A-Z]{3}\)$").expect("display suffix pattern is valid"));

static COORDINATES_BY_CODE: LazyLock<HashMap<&'static str, Coordinates>> = LazyLock::new(|| {
    DATACENTER_COORDINATES
        .iter()
        .map(|&(code, longitude, latitude)| (code, Coordinates { longitude, latitude }))
        .collect()
});

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

/// Three uppercase letters in parentheses at the very end of the name.
pub fn extract_airport_code(name: &str) -> Option<&str> {
    AIRPORT_CODE
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn is_location_name(name: &str) -> bool {
    extract_airport_code(name).is_some()
}

/// Name without the trailing ` - (XXX)` suffix.
pub fn location_display_name(name: &str) -> &str {
    match DISPLAY_SUFFIX.find(name) {
        Some(m) => &name[..m.start()],
        None => name,
    }
}

pub fn coordinates(code: &str) -> Option<Coordinates> {
    COORDINATES_BY_CODE.get(code).copied()
}

pub fn component_coordinates(name: &str) -> Option<Coordinates> {
    extract_airport_code(name).and_then(coordinates)
}

// (code, longitude, latitude)
const DATACENTER_COORDINATES: &[(&str, f64, f64)] = &[
    ("ATL", -84.4281, 33.6367),
    ("BOS", -71.0096, 42.3656),
    ("BUF", -78.7322, 42.9405),
    ("CLT", -80.9431, 35.2140),
    ("ORD", -87.9048, 41.9742),
    ("CMH", -82.8919, 39.9981),
    ("DFW", -97.0381, 32.8998),
    ("DEN", -104.6737, 39.8561),
    ("DTW", -83.3534, 42.2124),
    ("HNL", -157.9224, 21.3245),
    ("IAH", -95.3414, 29.9844),
    ("JAX", -81.6879, 30.4941),
    ("MCI", -94.7139, 39.2976),
    ("LAS", -115.1523, 36.0840),
    ("LAX", -118.4085, 33.9416),
    ("MFE", -98.2386, 26.1758),
    ("MEM", -89.9767, 35.0424),
    ("MIA", -80.2906, 25.7959),
    ("MSP", -93.2218, 44.8820),
    ("BNA", -86.6782, 36.1263),
    ("EWR", -74.1687, 40.6895),
    ("ORF", -76.2012, 36.8946),
    ("OMA", -95.8941, 41.3032),
    ("PHL", -75.2411, 39.8729),
    ("PHX", -112.0118, 33.4373),
    ("PIT", -80.2329, 40.4915),
    ("PDX", -122.5975, 45.5898),
    ("RIC", -77.3197, 37.5052),
    ("SMF", -121.5908, 38.6954),
    ("SLC", -111.9791, 40.7884),
    ("SAN", -117.1896, 32.7336),
    ("SFO", -122.3789, 37.6213),
    ("SJC", -121.9290, 37.3626),
    ("SEA", -122.3088, 47.4502),
    ("STL", -90.3700, 38.7487),
    ("TPA", -82.5332, 27.9755),
    ("YYZ", -79.6306, 43.6777),
    ("YVR", -123.1815, 49.1947),
    ("YUL", -73.7408, 45.4706),
    ("YYC", -114.0203, 51.1215),
    ("IAD", -77.4558, 38.9531),
    ("AMS", 4.7683, 52.3105),
    ("ATH", 23.9445, 37.9364),
    ("BCN", 2.0785, 41.2971),
    ("BEG", 20.3091, 44.8184),
    ("TXL", 13.2877, 52.5597),
    ("BRU", 4.4844, 50.9010),
    ("OTP", 26.0850, 44.5711),
    ("BUD", 19.2556, 47.4298),
    ("CPH", 12.6561, 55.6180),
    ("DUB", -6.2499, 53.4264),
    ("DUS", 6.7668, 51.2895),
    ("EDI", -3.3725, 55.9508),
    ("FRA", 8.5706, 50.0379),
    ("GVA", 6.1092, 46.2370),
    ("GOT", 12.2858, 57.6628),
    ("HAM", 9.9917, 53.6304),
    ("HEL", 24.9633, 60.3172),
    ("KBP", 30.8947, 50.3450),
    ("LIS", -9.1354, 38.7756),
    ("LHR", -0.4543, 51.4700),
    ("MAD", -3.5673, 40.4936),
    ("MAN", -2.2750, 53.3537),
    ("MRS", 5.2142, 43.4393),
    ("MXP", 8.7127, 45.6306),
    ("MUC", 11.7861, 48.3537),
    ("OSL", 11.0841, 60.1976),
    ("CDG", 2.5479, 49.0097),
    ("PRG", 14.2632, 50.1008),
    ("KEF", -22.6056, 63.9850),
    ("RIX", 23.9711, 56.9236),
    ("FCO", 12.2389, 41.8003),
    ("SOF", 23.4114, 42.6967),
    ("ARN", 17.9237, 59.6519),
    ("TLL", 24.8328, 59.4133),
    ("VIE", 16.5697, 48.1103),
    ("VNO", 25.2858, 54.6341),
    ("WAW", 20.9679, 52.1672),
    ("ZAG", 16.0688, 45.7429),
    ("ZRH", 8.5617, 47.4582),
    ("BLR", 77.7063, 12.9499),
    ("BKK", 100.7501, 13.6900),
    ("PEK", 116.5975, 40.0799),
    ("CEB", 123.9794, 10.3075),
    ("MAA", 80.1693, 12.9941),
    ("CGK", 106.6558, -6.1256),
    ("HKG", 113.9185, 22.3080),
    ("HYD", 78.4296, 17.2403),
    ("KUL", 101.7098, 2.7456),
    ("CCU", 88.4467, 22.6520),
    ("MNL", 121.0198, 14.5086),
    ("BOM", 72.8679, 19.0896),
    ("DEL", 77.1025, 28.5562),
    ("KIX", 135.2441, 34.4347),
    ("ICN", 126.4512, 37.4602),
    ("PVG", 121.8083, 31.1443),
    ("SIN", 103.9915, 1.3644),
    ("TPE", 121.2332, 25.0797),
    ("NRT", 140.3929, 35.7720),
    ("SGN", 106.6522, 10.8185),
    ("AKL", 174.7850, -37.0082),
    ("BNE", -153.1175, -27.3842),
    ("MEL", 144.8410, -37.6690),
    ("PER", 115.9672, -31.9385),
    ("SYD", 151.1772, -33.9399),
    ("AMM", 35.9932, 31.7226),
    ("BAH", 50.6336, 26.2708),
    ("CAI", 31.4056, 30.1219),
    ("CPT", 18.6017, -33.9715),
    ("CMN", -7.5898, 33.3675),
    ("DOH", 51.5651, 25.2731),
    ("DXB", 55.3644, 25.2532),
    ("JNB", 28.2460, -26.1367),
    ("KWI", 47.9689, 29.2266),
    ("LOS", 3.3212, 6.5774),
    ("MBA", 39.5942, -4.0348),
    ("MCT", 58.2841, 23.5933),
    ("RUH", 46.6989, 24.9576),
    ("TLV", 34.8854, 32.0055),
    ("EZE", -58.5358, -34.8222),
    ("CWB", -49.1725, -25.5285),
    ("FOR", -38.5326, -3.7763),
    ("GRU", -46.4730, -23.4356),
    ("GIG", -43.2506, -22.8099),
    ("LIM", -77.1143, -12.0219),
    ("MDE", -75.4280, 6.1644),
    ("BOG", -74.1469, 4.7016),
    ("SCL", -70.7858, -33.3930),
    ("POA", -51.1753, -29.9944),
    ("SJO", -84.2097, 9.9939),
    ("PTY", -79.3835, 9.0714),
    ("SDQ", -69.6688, 18.4296),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_trailing_code() {
        assert_eq!(extract_airport_code("Amsterdam, Netherlands - (AMS)"), Some("AMS"));
        assert_eq!(extract_airport_code("(SIN)"), Some("SIN"));
    }

    #[test]
    fn test_rejects_non_location_names() {
        assert_eq!(extract_airport_code("CDN/Cache"), None);
        assert_eq!(extract_airport_code("Workers (KV)"), None);
        assert_eq!(extract_airport_code("Lowercase - (ams)"), None);
        assert_eq!(extract_airport_code("Trailing space - (AMS) "), None);
        assert_eq!(extract_airport_code("Four letters - (AMSX)"), None);
        assert_eq!(extract_airport_code("Not at end (AMS) region"), None);
    }

    #[test]
    fn test_display_name_strips_suffix() {
        assert_eq!(location_display_name("Amsterdam, Netherlands - (AMS)"), "Amsterdam, Netherlands");
        assert_eq!(location_display_name("Singapore (SIN)"), "Singapore (SIN)");
        assert_eq!(location_display_name("API"), "API");
    }

    #[test]
    fn test_coordinate_lookup() {
        let ams = coordinates("AMS").unwrap();
        assert_eq!(ams.longitude, 4.7683);
        assert_eq!(ams.latitude, 52.3105);

        assert!(coordinates("XXX").is_none());
        assert_eq!(
            component_coordinates("Sydney, Australia - (SYD)"),
            Some(Coordinates { longitude: 151.1772, latitude: -33.9399 })
        );
        assert!(component_coordinates("Dashboard").is_none());
    }

    #[test]
    fn test_table_has_no_duplicate_codes() {
        assert_eq!(COORDINATES_BY_CODE.len(), DATACENTER_COORDINATES.len());
    }
}
