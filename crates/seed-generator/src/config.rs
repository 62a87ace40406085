//! Field configuration controlling how records are generated.
//!
//! A [`FieldConfig`] can be built in code, taken from [`Default`] (the values
//! the materials service has always been seeded with), or loaded from YAML:
//!
//! ```yaml
//! categories:
//!   - cb491d0c-97e9-4d88-a68e-61896e064278
//!   - a012d300-55d7-4762-a5ce-15b8bcfdc85e
//! genders: [male, female, unknown]
//! scientific_names: [Homo sapiens, Mus musculus]
//! date_range:
//!   min: 2010-01-01
//!   max: 2017-01-01T00:00:00Z
//! labels:
//!   supplier_name: Supplier Name
//! ```

use crate::error::ConfigurationError;
use crate::generators::timestamp::parse_timestamp;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// Category ids the seeding scripts have used for `material_type`.
pub const DEFAULT_CATEGORIES: [&str; 2] = [
    "cb491d0c-97e9-4d88-a68e-61896e064278",
    "a012d300-55d7-4762-a5ce-15b8bcfdc85e",
];

/// Three-value gender set.
pub const DEFAULT_GENDERS: [&str; 3] = ["male", "female", "unknown"];

/// Six-value gender set allowed by the materials API schema.
pub const EXTENDED_GENDERS: [&str; 6] = [
    "male",
    "female",
    "unknown",
    "not applicable",
    "mixed",
    "hermaphrodite",
];

/// Enumerated sets and ranges used to synthesise records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Candidate values for `category_ref`. Must not be empty.
    pub categories: Vec<String>,

    /// Candidate values for `gender`. Must not be empty.
    pub genders: Vec<String>,

    /// Candidate values for `scientific_name`. Empty means the field is omitted.
    #[serde(default)]
    pub scientific_names: Vec<String>,

    /// Interval for `date_of_receipt`.
    #[serde(default)]
    pub date_range: DateRange,

    /// Label prefixes for the string fields.
    #[serde(default)]
    pub labels: FieldLabels,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            genders: DEFAULT_GENDERS.iter().map(|s| s.to_string()).collect(),
            scientific_names: Vec::new(),
            date_range: DateRange::default(),
            labels: FieldLabels::default(),
        }
    }
}

impl FieldConfig {
    /// Load a field config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigurationError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a field config from a YAML string. The result is validated.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigurationError> {
        let config: FieldConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Use the six-value gender set.
    pub fn with_extended_genders(mut self) -> Self {
        self.genders = EXTENDED_GENDERS.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Check every choice set and the date range.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.categories.is_empty() {
            return Err(ConfigurationError::EmptyChoiceSet("categories"));
        }
        if self.genders.is_empty() {
            return Err(ConfigurationError::EmptyChoiceSet("genders"));
        }
        self.date_range.validate()
    }
}

/// Half-open timestamp interval `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub min: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub max: DateTime<Utc>,
}

impl DateRange {
    pub fn new(min: DateTime<Utc>, max: DateTime<Utc>) -> Self {
        Self { min, max }
    }

    /// Width of the interval in whole milliseconds.
    pub fn span_millis(&self) -> i64 {
        (self.max - self.min).num_milliseconds()
    }

    /// The interval must hold at least one millisecond tick.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.span_millis() < 1 {
            return Err(ConfigurationError::InvalidDateRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn contains(&self, value: &DateTime<Utc>) -> bool {
        *value >= self.min && *value < self.max
    }
}

impl Default for DateRange {
    /// 2010-01-01 to 2017-01-01, UTC.
    fn default() -> Self {
        let epoch = DateTime::<Utc>::default();
        Self {
            min: epoch + Duration::seconds(1_262_304_000),
            max: epoch + Duration::seconds(1_483_228_800),
        }
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

/// Label prefixes for the `"<label> <index>"` string fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLabels {
    pub supplier_name: String,
    pub donor_id: String,
    pub common_name: String,
    pub phenotype: String,
    /// Key of the generation marker inside `meta`.
    pub meta_key: String,
    /// Prefix of the generation marker value.
    pub meta_marker: String,
}

impl Default for FieldLabels {
    fn default() -> Self {
        Self {
            supplier_name: "Supplier Name".to_string(),
            donor_id: "Donor ID".to_string(),
            common_name: "Common Name".to_string(),
            phenotype: "Phenotype".to_string(),
            meta_key: "anything".to_string(),
            meta_marker: "i like".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_config_is_valid() {
        let config = FieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.genders, vec!["male", "female", "unknown"]);
        assert!(config.scientific_names.is_empty());
    }

    #[test]
    fn test_extended_genders() {
        let config = FieldConfig::default().with_extended_genders();
        assert_eq!(config.genders.len(), 6);
        assert!(config.genders.contains(&"hermaphrodite".to_string()));
    }

    #[test]
    fn test_empty_categories_rejected() {
        let config = FieldConfig {
            categories: Vec::new(),
            ..FieldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::EmptyChoiceSet("categories"))
        ));
    }

    #[test]
    fn test_empty_genders_rejected() {
        let config = FieldConfig {
            genders: Vec::new(),
            ..FieldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::EmptyChoiceSet("genders"))
        ));
    }

    #[test]
    fn test_inverted_and_empty_date_ranges_rejected() {
        let min = Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap();
        let max = Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap();

        let inverted = DateRange::new(min, max);
        assert!(matches!(
            inverted.validate(),
            Err(ConfigurationError::InvalidDateRange { .. })
        ));

        let empty = DateRange::new(min, min);
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
categories: [a, b, c]
genders: [male, female]
scientific_names: [Homo sapiens, Mus musculus]
date_range:
  min: 2020-01-01
  max: "2021-06-30T12:00:00Z"
labels:
  common_name: Scientific Name
"#;
        let config = FieldConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.categories, vec!["a", "b", "c"]);
        assert_eq!(config.scientific_names.len(), 2);
        assert_eq!(
            config.date_range.min,
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            config.date_range.max,
            Utc.with_ymd_and_hms(2021, 6, 30, 12, 0, 0).unwrap()
        );
        // Unspecified labels keep their defaults
        assert_eq!(config.labels.common_name, "Scientific Name");
        assert_eq!(config.labels.supplier_name, "Supplier Name");
    }

    #[test]
    fn test_from_yaml_defaults_date_range() {
        let config = FieldConfig::from_yaml("categories: [x]\ngenders: [unknown]\n").unwrap();
        assert_eq!(config.date_range, DateRange::default());
        assert_eq!(
            config.date_range.min,
            Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            config.date_range.max,
            Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_from_yaml_rejects_empty_set() {
        let result = FieldConfig::from_yaml("categories: []\ngenders: [male]\n");
        assert!(matches!(
            result,
            Err(ConfigurationError::EmptyChoiceSet("categories"))
        ));
    }

    #[test]
    fn test_from_yaml_rejects_bad_timestamp() {
        let yaml = r#"
categories: [a]
genders: [male]
date_range:
  min: not-a-date
  max: 2021-01-01
"#;
        assert!(matches!(
            FieldConfig::from_yaml(yaml),
            Err(ConfigurationError::Yaml(_))
        ));
    }

    #[test]
    fn test_date_range_contains_is_half_open() {
        let range = DateRange::default();
        assert!(range.contains(&range.min));
        assert!(!range.contains(&range.max));
    }
}
