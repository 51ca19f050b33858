//! # Country Registry
//!
//! Static table of European participants: ISO alpha-3 code, display name,
//! and the centroid the map frontend places its markers on. Codes outside
//! the table still flow through the pipeline; they just keep their code as
//! the display name.

use crate::dataset::types::IndicatorRecord;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

pub static EUROPEAN_COUNTRIES: &[Country] = &[
    Country { code: "ALB", name: "Albania", lat: 41.153332, lng: 20.168331 },
    Country { code: "AUT", name: "Austria", lat: 47.516231, lng: 14.550072 },
    Country { code: "BEL", name: "Belgium", lat: 50.503887, lng: 4.469936 },
    Country { code: "BGR", name: "Bulgaria", lat: 42.733883, lng: 25.48583 },
    Country { code: "HRV", name: "Croatia", lat: 45.1, lng: 15.2 },
    Country { code: "CYP", name: "Cyprus", lat: 35.126413, lng: 33.429859 },
    Country { code: "CZE", name: "Czech Republic", lat: 49.817492, lng: 15.472962 },
    Country { code: "DNK", name: "Denmark", lat: 56.26392, lng: 9.501785 },
    Country { code: "EST", name: "Estonia", lat: 58.595272, lng: 25.013607 },
    Country { code: "FIN", name: "Finland", lat: 61.92411, lng: 25.748151 },
    Country { code: "FRA", name: "France", lat: 46.227638, lng: 2.213749 },
    Country { code: "DEU", name: "Germany", lat: 51.165691, lng: 10.451526 },
    Country { code: "GRC", name: "Greece", lat: 39.074208, lng: 21.824312 },
    Country { code: "HUN", name: "Hungary", lat: 47.162494, lng: 19.503304 },
    Country { code: "ISL", name: "Iceland", lat: 64.963051, lng: -19.020835 },
    Country { code: "IRL", name: "Ireland", lat: 53.41291, lng: -8.24389 },
    Country { code: "ITA", name: "Italy", lat: 41.87194, lng: 12.56738 },
    Country { code: "LVA", name: "Latvia", lat: 56.879635, lng: 24.603189 },
    Country { code: "LTU", name: "Lithuania", lat: 55.169438, lng: 23.881275 },
    Country { code: "LUX", name: "Luxembourg", lat: 49.815273, lng: 6.129583 },
    Country { code: "MLT", name: "Malta", lat: 35.937496, lng: 14.375416 },
    Country { code: "NLD", name: "Netherlands", lat: 52.132633, lng: 5.291266 },
    Country { code: "NOR", name: "Norway", lat: 60.472024, lng: 8.468946 },
    Country { code: "POL", name: "Poland", lat: 51.919438, lng: 19.145136 },
    Country { code: "PRT", name: "Portugal", lat: 39.399872, lng: -8.224454 },
    Country { code: "ROU", name: "Romania", lat: 45.943161, lng: 24.96676 },
    Country { code: "SVK", name: "Slovakia", lat: 48.669026, lng: 19.699024 },
    Country { code: "SVN", name: "Slovenia", lat: 46.151241, lng: 14.995463 },
    Country { code: "ESP", name: "Spain", lat: 40.463667, lng: -3.74922 },
    Country { code: "SWE", name: "Sweden", lat: 60.128161, lng: 18.643501 },
    Country { code: "CHE", name: "Switzerland", lat: 46.818188, lng: 8.227512 },
    Country { code: "GBR", name: "United Kingdom", lat: 55.378051, lng: -3.435973 },
];

/// The wider European membership used to filter the dataset before charting.
/// Superset of `EUROPEAN_COUNTRIES`; codes only here fall back to their code
/// as the display name.
static EUROPEAN_CODES: &[&str] = &[
    "ALB", "AUT", "BEL", "BGR", "BIH", "BLR", "CHE", "CYP", "CZE",
    "DEU", "DNK", "ESP", "EST", "FIN", "FRA", "GBR", "GRC", "HRV",
    "HUN", "IRL", "ISL", "ITA", "LTU", "LUX", "LVA", "MDA", "MKD",
    "MLT", "MNE", "NLD", "NOR", "POL", "PRT", "ROU", "RUS", "SRB",
    "SVK", "SVN", "SWE", "UKR",
];

pub fn find(code: &str) -> Option<&'static Country> {
    EUROPEAN_COUNTRIES.iter().find(|c| c.code == code)
}

pub fn display_name(code: &str) -> Option<&'static str> {
    find(code).map(|c| c.name)
}

pub fn is_european(code: &str) -> bool {
    EUROPEAN_CODES.contains(&code)
}

pub fn european_only(rows: &[IndicatorRecord]) -> Vec<IndicatorRecord> {
    rows.iter()
        .filter(|r| is_european(&r.cnt))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn known_codes_resolve_to_names() {
        assert_eq!(display_name("DNK"), Some("Denmark"));
        assert_eq!(display_name("FIN"), Some("Finland"));
        assert_eq!(display_name("XXX"), None);
    }

    #[test]
    fn filter_membership_is_wider_than_the_name_table() {
        // Serbia is filtered in but has no display-name entry.
        assert!(is_european("SRB"));
        assert!(display_name("SRB").is_none());
        assert!(!is_european("JPN"));
    }

    #[test]
    fn european_only_drops_non_members() {
        let mk = |cnt: &str| IndicatorRecord {
            cnt: cnt.into(),
            country_name: cnt.into(),
            values: BTreeMap::new(),
        };
        let rows = vec![mk("DNK"), mk("JPN"), mk("SWE")];
        let kept = european_only(&rows);
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| r.cnt != "JPN"));
    }
}
