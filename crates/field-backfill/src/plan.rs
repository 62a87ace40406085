//! Backfill plans and rules.

use crate::error::BackfillError;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// "Documents whose `filter_field` matches `pattern` get `target_field = value`."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackfillRule {
    /// Label used in logs and reports.
    pub name: String,
    pub filter_field: String,
    /// Regular expression applied to `filter_field`.
    ///
    /// Limited to the `regex` crate's syntax, so look-around and
    /// backreferences are rejected even though the MongoDB server would run them.
    pub pattern: String,
    #[serde(default = "default_case_insensitive")]
    pub case_insensitive: bool,
    pub target_field: String,
    pub value: String,
}

fn default_case_insensitive() -> bool {
    true
}

impl BackfillRule {
    /// Compile `pattern` with the rule's case sensitivity.
    pub fn matcher(&self) -> Result<Regex, BackfillError> {
        RegexBuilder::new(&self.pattern)
            .case_insensitive(self.case_insensitive)
            .build()
            .map_err(|source| BackfillError::InvalidPattern {
                pattern: self.pattern.clone(),
                source,
            })
    }

    /// Regex options string in MongoDB syntax.
    pub fn regex_options(&self) -> &'static str {
        if self.case_insensitive {
            "i"
        } else {
            ""
        }
    }
}

/// Ordered list of rules applied by one backfill run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackfillPlan {
    pub rules: Vec<BackfillRule>,
}

impl BackfillPlan {
    /// The taxon id backfill: mice get `10090`, humans get `9606`.
    pub fn taxon_id() -> Self {
        Self {
            rules: vec![
                BackfillRule {
                    name: "Mus musculus".to_string(),
                    filter_field: "scientific_name".to_string(),
                    pattern: "^Mus musculus$".to_string(),
                    case_insensitive: true,
                    target_field: "taxon_id".to_string(),
                    value: "10090".to_string(),
                },
                BackfillRule {
                    name: "Homo sapiens".to_string(),
                    filter_field: "scientific_name".to_string(),
                    pattern: "^homo sapiens$".to_string(),
                    case_insensitive: true,
                    target_field: "taxon_id".to_string(),
                    value: "9606".to_string(),
                },
            ],
        }
    }

    /// Load a plan from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BackfillError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a plan from a YAML string. The result is validated.
    pub fn from_yaml(yaml: &str) -> Result<Self, BackfillError> {
        let plan: BackfillPlan = serde_yaml::from_str(yaml)?;
        plan.validate()?;
        Ok(plan)
    }

    /// Check the plan has rules, every pattern compiles and no field is blank.
    pub fn validate(&self) -> Result<(), BackfillError> {
        if self.rules.is_empty() {
            return Err(BackfillError::InvalidPlan("plan has no rules".to_string()));
        }
        for rule in &self.rules {
            if rule.filter_field.is_empty() || rule.target_field.is_empty() {
                return Err(BackfillError::InvalidPlan(format!(
                    "rule '{}' needs both filter_field and target_field",
                    rule.name
                )));
            }
            rule.matcher()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxon_plan() {
        let plan = BackfillPlan::taxon_id();
        assert!(plan.validate().is_ok());
        assert_eq!(plan.rules.len(), 2);

        let mice = plan.rules[0].matcher().unwrap();
        assert!(mice.is_match("Mus musculus"));
        assert!(mice.is_match("MUS MUSCULUS"));
        assert!(!mice.is_match("Mus musculus domesticus"));

        let humans = plan.rules[1].matcher().unwrap();
        assert!(humans.is_match("Homo sapiens"));
        assert!(!humans.is_match("Homo sapiens sapiens"));
    }

    #[test]
    fn test_case_sensitive_rule() {
        let mut rule = BackfillPlan::taxon_id().rules[0].clone();
        rule.case_insensitive = false;

        assert!(!rule.matcher().unwrap().is_match("mus musculus"));
        assert_eq!(rule.regex_options(), "");
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r#"
rules:
  - name: rats
    filter_field: scientific_name
    pattern: "^Rattus norvegicus$"
    target_field: taxon_id
    value: "10116"
"#;
        let plan = BackfillPlan::from_yaml(yaml).unwrap();

        assert_eq!(plan.rules.len(), 1);
        assert!(plan.rules[0].case_insensitive);
        assert_eq!(plan.rules[0].value, "10116");
    }

    #[test]
    fn test_empty_plan_rejected() {
        assert!(matches!(
            BackfillPlan::from_yaml("rules: []"),
            Err(BackfillError::InvalidPlan(_))
        ));
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let mut plan = BackfillPlan::taxon_id();
        plan.rules[1].pattern = "^(homo".to_string();

        assert!(matches!(
            plan.validate(),
            Err(BackfillError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_blank_field_rejected() {
        let mut plan = BackfillPlan::taxon_id();
        plan.rules[0].target_field.clear();

        assert!(matches!(
            plan.validate(),
            Err(BackfillError::InvalidPlan(_))
        ));
    }
}
