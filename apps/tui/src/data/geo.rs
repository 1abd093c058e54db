use crate::data::models::Record;
use crate::domain::Continent;
use std::collections::HashMap;

/// One country polygon set from the world base layer, keyed by the small
/// numeric feature ID used by the upstream atlas.
#[derive(Debug, Clone)]
pub struct BaseFeature {
    pub id: u32,
    pub name: String,
    pub rings: Vec<Vec<(f64, f64)>>,
}

/// Dataset fields joined onto a feature for the currently selected year.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedData {
    pub country: String,
    pub continent: Continent,
    pub life_expectancy: f64,
    pub energy_consumption: Option<f64>,
}

/// A base feature plus the join result. Rebuilt from scratch on every year
/// change, never mutated in place.
#[derive(Debug, Clone)]
pub struct CountryFeature {
    pub id: u32,
    pub name: String,
    pub iso_a3: &'static str,
    pub rings: Vec<Vec<(f64, f64)>>,
    pub joined: Option<JoinedData>,
}

/// Joins base geometry against one year's filtered rows by ISO3 code.
/// Features with no matching row keep `joined = None` and stay on the map.
pub fn join_features(base: &[BaseFeature], rows: &[Record]) -> Vec<CountryFeature> {
    let by_code: HashMap<&str, &Record> =
        rows.iter().map(|record| (record.code.as_str(), record)).collect();

    base.iter()
        .map(|feature| {
            let iso_a3 = iso3_for_id(feature.id).unwrap_or("");
            let joined = by_code.get(iso_a3).map(|record| JoinedData {
                country: record.country.clone(),
                continent: record.continent,
                life_expectancy: record.life_expectancy,
                energy_consumption: record.energy_consumption,
            });

            CountryFeature {
                id: feature.id,
                name: feature.name.clone(),
                iso_a3,
                rings: feature.rings.clone(),
                joined,
            }
        })
        .collect()
}

/// Fixed lookup from the atlas's numeric country IDs to ISO3 codes. This is
/// maintained as static data, not derived at runtime.
pub fn iso3_for_id(id: u32) -> Option<&'static str> {
    ISO3_BY_ID
        .binary_search_by_key(&id, |entry| entry.0)
        .ok()
        .map(|index| ISO3_BY_ID[index].1)
}

static ISO3_BY_ID: &[(u32, &str)] = &[
    (4, "AFG"),
    (8, "ALB"),
    (10, "ATA"),
    (12, "DZA"),
    (16, "ASM"),
    (20, "AND"),
    (24, "AGO"),
    (28, "ATG"),
    (32, "ARG"),
    (36, "AUS"),
    (40, "AUT"),
    (44, "BHS"),
    (48, "BHR"),
    (50, "BGD"),
    (52, "BRB"),
    (56, "BEL"),
    (60, "BMU"),
    (64, "BTN"),
    (68, "BOL"),
    (70, "BIH"),
    (72, "BWA"),
    (76, "BRA"),
    (84, "BLZ"),
    (86, "BRN"),
    (100, "BGR"),
    (104, "MMR"),
    (108, "BDI"),
    (112, "KHM"),
    (116, "CMR"),
    (124, "CAN"),
    (132, "CPV"),
    (140, "CAF"),
    (144, "LKA"),
    (148, "TCD"),
    (152, "CHL"),
    (156, "CHN"),
    (158, "TWN"),
    (162, "COL"),
    (166, "COM"),
    (170, "COG"),
    (174, "CRI"),
    (180, "CUB"),
    (191, "HRV"),
    (196, "CYP"),
    (203, "CZE"),
    (208, "DNK"),
    (212, "DMA"),
    (214, "DOM"),
    (218, "ECU"),
    (222, "SLV"),
    (226, "GNQ"),
    (231, "ETH"),
    (232, "ERI"),
    (233, "EST"),
    (238, "FLK"),
    (242, "FJI"),
    (246, "FIN"),
    (250, "FRA"),
    (254, "GUF"),
    (258, "PYF"),
    (260, "ATF"),
    (266, "GAB"),
    (268, "GMB"),
    (270, "GEO"),
    (276, "DEU"),
    (288, "GHA"),
    (292, "GIB"),
    (300, "GRC"),
    (304, "GRL"),
    (308, "GRD"),
    (312, "GLP"),
    (316, "GUM"),
    (320, "GTM"),
    (324, "GIN"),
    (328, "GUY"),
    (332, "HTI"),
    (334, "HND"),
    (344, "HKG"),
    (348, "HUN"),
    (352, "ISL"),
    (356, "IND"),
    (360, "IDN"),
    (364, "IRN"),
    (368, "IRQ"),
    (372, "IRL"),
    (376, "ISR"),
    (380, "ITA"),
    (384, "CIV"),
    (388, "JAM"),
    (392, "JPN"),
    (398, "JOR"),
    (400, "KAZ"),
    (404, "KEN"),
    (408, "KPR"),
    (410, "KOR"),
    (414, "KWT"),
    (417, "KGZ"),
    (418, "LAO"),
    (422, "LBN"),
    (426, "LSO"),
    (428, "LVA"),
    (430, "LBR"),
    (434, "LBY"),
    (438, "LIE"),
    (440, "LTU"),
    (442, "LUX"),
    (446, "MAC"),
    (450, "MDG"),
    (454, "MWI"),
    (458, "MYS"),
    (462, "MDV"),
    (466, "MLI"),
    (470, "MLT"),
    (474, "MTQ"),
    (478, "MRT"),
    (480, "MUS"),
    (484, "MEX"),
    (492, "MCO"),
    (496, "MNG"),
    (498, "MDA"),
    (499, "MNE"),
    (504, "MAR"),
    (508, "MOZ"),
    (512, "OMN"),
    (516, "NAM"),
    (520, "NRU"),
    (524, "NPL"),
    (528, "NLD"),
    (548, "VUT"),
    (554, "NZL"),
    (558, "NIC"),
    (562, "NER"),
    (566, "NGA"),
    (578, "NOR"),
    (584, "MHL"),
    (585, "PLW"),
    (586, "PAK"),
    (591, "PAN"),
    (598, "PNG"),
    (600, "PRY"),
    (604, "PER"),
    (608, "PHL"),
    (616, "POL"),
    (620, "PRT"),
    (624, "GNB"),
    (626, "TLS"),
    (630, "PRI"),
    (634, "QAT"),
    (638, "RWA"),
    (642, "ROU"),
    (643, "RUS"),
    (646, "RWA"),
    (652, "STP"),
    (654, "SHN"),
    (659, "KNA"),
    (660, "LCA"),
    (662, "VCT"),
    (666, "SPM"),
    (670, "VCT"),
    (674, "SMR"),
    (678, "STP"),
    (682, "SAU"),
    (686, "SEN"),
    (688, "SRB"),
    (690, "SYC"),
    (694, "SLE"),
    (702, "SGP"),
    (703, "SVK"),
    (705, "SVN"),
    (706, "SOM"),
    (710, "ZAF"),
    (716, "ZWE"),
    (724, "ESP"),
    (728, "SSD"),
    (729, "SDN"),
    (740, "SUR"),
    (752, "SWE"),
    (756, "CHE"),
    (760, "SYR"),
    (762, "TWN"),
    (764, "THA"),
    (768, "TGO"),
    (772, "TON"),
    (776, "TTO"),
    (784, "ARE"),
    (788, "TUN"),
    (792, "TUR"),
    (795, "TKM"),
    (798, "TUV"),
    (800, "UGA"),
    (804, "UKR"),
    (826, "GBR"),
    (840, "USA"),
    (860, "URY"),
    (862, "UZB"),
    (887, "YEM"),
    (894, "ZMB"),
];
