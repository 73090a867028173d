//! Dataset records and the county join key

use std::collections::HashMap;
use std::fmt;

use geo_types::Geometry;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Number, Value};

/// County identifier (FIPS code) used to join geometries with records
///
/// Accepts a JSON number or string. Integral numbers are kept without a
/// fractional part, strings verbatim, so `1001` and `"01001"` stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(from = "RawCountyId")]
pub struct CountyId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCountyId {
    Number(Number),
    Text(String),
}

impl From<RawCountyId> for CountyId {
    fn from(raw: RawCountyId) -> Self {
        match raw {
            RawCountyId::Number(n) => CountyId::from(&n),
            RawCountyId::Text(s) => CountyId(s),
        }
    }
}

impl From<&Number> for CountyId {
    fn from(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            return CountyId(i.to_string());
        }
        if let Some(u) = n.as_u64() {
            return CountyId(u.to_string());
        }
        match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => CountyId(format!("{}", f as i64)),
            Some(f) => CountyId(f.to_string()),
            None => CountyId(n.to_string()),
        }
    }
}

impl CountyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for CountyId {
    fn from(code: u32) -> Self {
        Self(code.to_string())
    }
}

impl From<&str> for CountyId {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl fmt::Display for CountyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CountyId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Education statistics for one county
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct EducationRecord {
    pub fips: CountyId,
    pub state: String,
    pub area_name: String,
    /// Percentage of adults holding a bachelor's degree or higher
    #[serde(rename = "bachelorsOrHigher")]
    pub bachelors_or_higher: f64,
}

impl EducationRecord {
    pub fn new(
        fips: impl Into<CountyId>,
        area_name: impl Into<String>,
        state: impl Into<String>,
        bachelors_or_higher: f64,
    ) -> Self {
        Self {
            fips: fips.into(),
            state: state.into(),
            area_name: area_name.into(),
            bachelors_or_higher,
        }
    }
}

/// One county feature extracted from the topology
#[derive(Debug, Clone, PartialEq)]
pub struct CountyGeometry {
    pub id: Option<CountyId>,
    pub properties: Option<Map<String, Value>>,
    /// Planar geometry; `None` for null-typed topology objects
    pub geometry: Option<Geometry<f64>>,
}

impl CountyGeometry {
    pub fn new(id: impl Into<CountyId>, geometry: Geometry<f64>) -> Self {
        Self {
            id: Some(id.into()),
            properties: None,
            geometry: Some(geometry),
        }
    }
}

/// Lookup from county id to its education record
///
/// The first record wins when the same FIPS code appears more than once.
#[derive(Debug, Default)]
pub struct CountyIndex<'a> {
    records: HashMap<&'a CountyId, &'a EducationRecord>,
    duplicates: usize,
}

impl<'a> CountyIndex<'a> {
    pub fn build(records: &'a [EducationRecord]) -> Self {
        let mut index = Self {
            records: HashMap::with_capacity(records.len()),
            duplicates: 0,
        };
        for record in records {
            if index.records.contains_key(&record.fips) {
                index.duplicates += 1;
                continue;
            }
            index.records.insert(&record.fips, record);
        }
        if index.duplicates > 0 {
            tracing::warn!(
                duplicates = index.duplicates,
                "duplicate FIPS codes in education records, keeping first occurrence"
            );
        }
        index
    }

    pub fn get(&self, id: Option<&CountyId>) -> Option<&'a EducationRecord> {
        id.and_then(|id| self.records.get(id).copied())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records skipped because their FIPS code was already indexed
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_county_id_from_number_and_string() {
        let ids: Vec<CountyId> = serde_json::from_str(r#"[1001, "01001", 1001.0]"#).unwrap();
        assert_eq!(ids[0].as_str(), "1001");
        assert_eq!(ids[1].as_str(), "01001");
        assert_eq!(ids[2].as_str(), "1001");
        assert_ne!(ids[0], ids[1]);
        assert_eq!(ids[0], ids[2]);
    }

    #[test]
    fn test_education_record_field_names() {
        let json = r#"{"fips": 1001, "state": "AL", "area_name": "Autauga County", "bachelorsOrHigher": 21.9}"#;
        let record: EducationRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.fips, CountyId::from(1001u32));
        assert_eq!(record.area_name, "Autauga County");
        assert_eq!(record.bachelors_or_higher, 21.9);
    }

    #[test]
    fn test_index_keeps_first_duplicate() {
        let records = vec![
            EducationRecord::new("01001", "First", "AL", 10.0),
            EducationRecord::new("01001", "Second", "AL", 90.0),
            EducationRecord::new("01003", "Other", "AL", 30.0),
        ];
        let index = CountyIndex::build(&records);
        assert_eq!(index.len(), 2);
        assert_eq!(index.duplicates(), 1);
        let hit = index.get(Some(&CountyId::from("01001"))).unwrap();
        assert_eq!(hit.area_name, "First");
    }

    #[test]
    fn test_index_miss() {
        let records = vec![EducationRecord::new("01001", "A", "AL", 10.0)];
        let index = CountyIndex::build(&records);
        assert!(index.get(Some(&CountyId::from("99999"))).is_none());
        assert!(index.get(None).is_none());
    }
}
