use crate::data::geo::BaseFeature;
use crate::data::models::{Dataset, Record};
use crate::domain::Continent;
use geojson::{GeoJson, Value};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse dataset CSV: {0}")]
    Csv(#[from] csv::Error),
    // geojson's reader surfaces serde_json errors directly.
    #[error("failed to parse world GeoJSON: {0}")]
    Geo(#[from] serde_json::Error),
    #[error("dataset contained no usable rows")]
    EmptyDataset,
    #[error("world file contained no country features")]
    EmptyWorld,
}

/// Raw CSV row. Numeric columns come in as strings so that blank cells and
/// stray values can be filtered instead of failing the whole file.
#[derive(Debug, Deserialize)]
struct RawRow {
    country: String,
    code: String,
    #[serde(default)]
    continent: String,
    #[serde(default)]
    year: String,
    #[serde(default)]
    life_expectancy: String,
    #[serde(default)]
    energy_consumption: String,
}

/// Everything the dashboard needs from disk, loaded in one pass.
#[derive(Debug)]
pub struct DataBundle {
    pub dataset: Dataset,
    pub world: Vec<BaseFeature>,
}

pub fn load_bundle(data_path: &Path, world_path: &Path) -> Result<DataBundle, LoadError> {
    let data_file = File::open(data_path).map_err(|source| LoadError::Open {
        path: data_path.display().to_string(),
        source,
    })?;
    let dataset = read_dataset(BufReader::new(data_file))?;

    let world_file = File::open(world_path).map_err(|source| LoadError::Open {
        path: world_path.display().to_string(),
        source,
    })?;
    let world = read_world(BufReader::new(world_file))?;

    Ok(DataBundle { dataset, world })
}

/// Parses the dataset and applies the retention invariants: rows with a
/// missing, NaN or non-positive life expectancy or an unparsable year are
/// discarded; blank energy is retained as `None`.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<RawRow>() {
        let raw = row?;
        if let Some(record) = retain_row(raw) {
            records.push(record);
        }
    }

    Dataset::from_records(records).ok_or(LoadError::EmptyDataset)
}

fn retain_row(raw: RawRow) -> Option<Record> {
    let year = raw.year.parse::<i32>().ok()?;
    let life = raw.life_expectancy.parse::<f64>().ok()?;
    if !life.is_finite() || life <= 0.0 {
        return None;
    }

    let energy = raw
        .energy_consumption
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite());

    Some(Record {
        country: raw.country,
        code: raw.code,
        continent: Continent::parse(&raw.continent),
        year,
        life_expectancy: life,
        energy_consumption: energy,
    })
}

/// Reads the world base layer: one feature per country, keyed by the small
/// numeric ID used by the ID-to-ISO3 lookup table. Only exterior rings are
/// kept; holes are invisible at terminal resolution.
pub fn read_world<R: Read>(reader: R) -> Result<Vec<BaseFeature>, LoadError> {
    let geojson = GeoJson::from_reader(reader)?;

    let features = match geojson {
        GeoJson::FeatureCollection(collection) => collection.features,
        GeoJson::Feature(feature) => vec![feature],
        GeoJson::Geometry(_) => Vec::new(),
    };

    let mut world = Vec::new();
    for feature in features {
        let Some(id) = feature_id(&feature) else {
            continue;
        };
        let name = feature
            .properties
            .as_ref()
            .and_then(|props| props.get("name"))
            .and_then(|value| value.as_str())
            .unwrap_or_default()
            .to_string();
        let Some(geometry) = feature.geometry else {
            continue;
        };

        let rings = match geometry.value {
            Value::Polygon(polygon) => exterior_ring(&polygon).into_iter().collect(),
            Value::MultiPolygon(polygons) => polygons
                .iter()
                .filter_map(|polygon| exterior_ring(polygon))
                .collect(),
            _ => continue,
        };

        world.push(BaseFeature { id, name, rings });
    }

    if world.is_empty() {
        return Err(LoadError::EmptyWorld);
    }
    Ok(world)
}

fn feature_id(feature: &geojson::Feature) -> Option<u32> {
    match feature.id.as_ref()? {
        geojson::feature::Id::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        geojson::feature::Id::String(text) => text.parse().ok(),
    }
}

fn exterior_ring(polygon: &[Vec<Vec<f64>>]) -> Option<Vec<(f64, f64)>> {
    let ring = polygon.first()?;
    let points = ring
        .iter()
        .filter_map(|position| match position.as_slice() {
            [lon, lat, ..] => Some((*lon, *lat)),
            _ => None,
        })
        .collect::<Vec<_>>();
    (points.len() >= 3).then_some(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
country,code,continent,year,life_expectancy,energy_consumption
Norway,NOR,Europe,2020,83.2,120.5
Chad,TCD,Africa,2020,54.2,
Nowhere,NWH,,2020,70.0,5.0
BadLife,BAD,Asia,2020,,9.9
ZeroLife,ZRO,Asia,2020,0,9.9
BadYear,BDY,Asia,not-a-year,70.1,9.9
";

    #[test]
    fn retention_invariants_apply_at_load() {
        let dataset = read_dataset(SAMPLE_CSV.as_bytes()).unwrap();
        let countries: Vec<&str> = dataset
            .records
            .iter()
            .map(|record| record.country.as_str())
            .collect();

        // Missing/zero life expectancy and bad years are dropped.
        assert_eq!(countries, vec!["Norway", "Chad", "Nowhere"]);

        let chad = &dataset.records[1];
        assert_eq!(chad.energy_consumption, None);

        let nowhere = &dataset.records[2];
        assert_eq!(nowhere.continent, Continent::Unknown);
    }

    #[test]
    fn empty_file_is_a_load_error() {
        let result = read_dataset("country,code,continent,year,life_expectancy,energy_consumption\n".as_bytes());
        assert!(matches!(result, Err(LoadError::EmptyDataset)));
    }

    #[test]
    fn malformed_world_json_is_a_geo_error() {
        let result = read_world("not geojson at all".as_bytes());
        assert!(matches!(result, Err(LoadError::Geo(_))));
    }

    #[test]
    fn world_features_keep_exterior_rings() {
        let world_json = r#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": 578,
                    "properties": {"name": "Norway"},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[5.0, 58.0], [10.0, 58.0], [10.0, 63.0], [5.0, 58.0]]]
                    }
                },
                {
                    "type": "Feature",
                    "id": 36,
                    "properties": {"name": "Australia"},
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [
                            [[[113.0, -25.0], [153.0, -25.0], [133.0, -12.0], [113.0, -25.0]]],
                            [[[144.0, -40.0], [148.0, -40.0], [146.0, -43.0], [144.0, -40.0]]]
                        ]
                    }
                }
            ]
        }"#;

        let world = read_world(world_json.as_bytes()).unwrap();
        assert_eq!(world.len(), 2);
        assert_eq!(world[0].id, 578);
        assert_eq!(world[0].name, "Norway");
        assert_eq!(world[0].rings.len(), 1);
        assert_eq!(world[1].rings.len(), 2);
    }
}
