//! FILENAME: core/pivot-fields/src/validate.rs
//! Configuration validation.
//!
//! Checks a proposed initial configuration against the field universe and the
//! allowed zones/aggregations. Every check runs over every record and all
//! violations are accumulated; nothing short-circuits. An empty result means
//! the configuration is accepted.

use rustc_hash::FxHashSet;

use crate::definition::{FieldConfigInput, SortDirection, Zone};
use crate::error::ConfigError;

/// Validates `config` against the universe `fields`.
///
/// Checks, in this order per record:
/// 1. universe duplicates (once, before the records)
/// 2. the record's id exists in `fields`
/// 3. the record's id was not already seen in `config` (first one wins)
/// 4. the zone parses and is in `allowed_zones`
/// 5. a `values` record has an aggregation from `allowed_aggregations`
/// 6. a present sort is "asc" or "desc"
pub fn validate_config<F, A>(
    fields: &[F],
    config: &[FieldConfigInput],
    allowed_zones: &[Zone],
    allowed_aggregations: &[A],
) -> Vec<ConfigError>
where
    F: AsRef<str>,
    A: AsRef<str>,
{
    let mut errors = Vec::new();

    let duplicates = duplicate_ids(fields);
    if !duplicates.is_empty() {
        errors.push(ConfigError::DuplicateFields(duplicates));
    }

    let universe: FxHashSet<&str> = fields.iter().map(|f| f.as_ref()).collect();
    let aggregations: Vec<&str> = allowed_aggregations.iter().map(|a| a.as_ref()).collect();
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    for item in config {
        if !universe.contains(item.id.as_str()) {
            errors.push(ConfigError::UnknownField { id: item.id.clone() });
        }

        if !seen.insert(item.id.as_str()) {
            errors.push(ConfigError::DuplicateConfigField { id: item.id.clone() });
        }

        let zone_ok = Zone::from_id(&item.zone)
            .map(|zone| allowed_zones.contains(&zone))
            .unwrap_or(false);
        if !zone_ok {
            errors.push(ConfigError::InvalidZone {
                id: item.id.clone(),
                zone: item.zone.clone(),
            });
        }

        if item.zone == Zone::Values.as_str() {
            let has_valid_aggregation = item
                .aggregation
                .as_deref()
                .map(|agg| aggregations.contains(&agg))
                .unwrap_or(false);
            if !has_valid_aggregation {
                errors.push(ConfigError::InvalidAggregation {
                    id: item.id.clone(),
                    allowed: aggregations.iter().map(|a| a.to_string()).collect(),
                });
            }
        }

        if let Some(ref sort) = item.sort {
            if SortDirection::from_id(sort).is_none() {
                errors.push(ConfigError::InvalidSort {
                    id: item.id.clone(),
                    sort: sort.clone(),
                });
            }
        }
    }

    errors
}

/// Distinct ids that occur more than once, in order of first repetition.
fn duplicate_ids<F: AsRef<str>>(fields: &[F]) -> Vec<String> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut reported: FxHashSet<&str> = FxHashSet::default();
    let mut duplicates = Vec::new();

    for field in fields {
        let id = field.as_ref();
        if !seen.insert(id) && reported.insert(id) {
            duplicates.push(id.to_string());
        }
    }

    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: [&str; 5] = ["country", "city", "sales", "date", "category"];
    const AGGS: [&str; 2] = ["sum", "avg"];

    fn check(config: &[FieldConfigInput]) -> Vec<ConfigError> {
        validate_config(&FIELDS, config, &Zone::ALL, &AGGS)
    }

    #[test]
    fn test_valid_config_has_no_errors() {
        let config = vec![
            FieldConfigInput::new("country", "rows").with_sort("asc"),
            FieldConfigInput::new("sales", "values").with_aggregation("sum"),
            FieldConfigInput::new("date", "filters"),
        ];
        assert!(check(&config).is_empty());
    }

    #[test]
    fn test_empty_config_is_valid() {
        assert!(check(&[]).is_empty());
    }

    #[test]
    fn test_universe_duplicates_reported_once() {
        let errors = validate_config(&["x", "x", "y", "x"], &[], &Zone::ALL, &AGGS);
        assert_eq!(errors, vec![ConfigError::DuplicateFields(vec!["x".to_string()])]);
        assert_eq!(errors[0].to_string(), "Field duplicates: 'x'");
    }

    #[test]
    fn test_unknown_field() {
        let errors = check(&[FieldConfigInput::new("revenue", "rows")]);
        assert_eq!(
            errors,
            vec![ConfigError::UnknownField { id: "revenue".to_string() }]
        );
    }

    #[test]
    fn test_duplicate_config_entry_reported_per_repeat() {
        let config = vec![
            FieldConfigInput::new("city", "rows"),
            FieldConfigInput::new("city", "columns"),
            FieldConfigInput::new("city", "filters"),
        ];
        let errors = check(&config);
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| *e == ConfigError::DuplicateConfigField { id: "city".to_string() }));
    }

    #[test]
    fn test_zone_outside_allowed_set() {
        let config = vec![FieldConfigInput::new("city", "filters")];
        let errors = validate_config(&FIELDS, &config, &[Zone::Available, Zone::Rows], &AGGS);
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0].to_string(),
            "Field \"city\" has invalid zone \"filters\"."
        );
    }

    #[test]
    fn test_unparseable_zone() {
        let errors = check(&[FieldConfigInput::new("city", "Rows")]);
        assert!(matches!(errors[0], ConfigError::InvalidZone { .. }));
    }

    #[test]
    fn test_values_requires_allowed_aggregation() {
        let missing = check(&[FieldConfigInput::new("sales", "values")]);
        assert_eq!(missing.len(), 1);
        assert_eq!(
            missing[0].to_string(),
            "Field \"sales\" in \"values\" must have valid aggregation (sum, avg)."
        );

        let unknown = check(&[FieldConfigInput::new("sales", "values").with_aggregation("median")]);
        assert_eq!(unknown.len(), 1);
    }

    #[test]
    fn test_no_aggregations_means_values_always_invalid() {
        let config = vec![FieldConfigInput::new("sales", "values").with_aggregation("sum")];
        let errors = validate_config(&FIELDS, &config, &Zone::ALL, &[] as &[&str]);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field_id(), Some("sales"));
    }

    #[test]
    fn test_aggregation_outside_values_is_ignored() {
        let config = vec![FieldConfigInput::new("sales", "rows").with_aggregation("median")];
        assert!(check(&config).is_empty());
    }

    #[test]
    fn test_invalid_sort() {
        let errors = check(&[FieldConfigInput::new("city", "rows").with_sort("up")]);
        assert_eq!(
            errors,
            vec![ConfigError::InvalidSort {
                id: "city".to_string(),
                sort: "up".to_string()
            }]
        );
    }

    #[test]
    fn test_errors_accumulate_across_checks() {
        let config = vec![
            FieldConfigInput::new("ghost", "nowhere").with_sort("sideways"),
            FieldConfigInput::new("sales", "values"),
        ];
        let errors = validate_config(&["sales", "sales"], &config, &Zone::ALL, &AGGS);
        // duplicates + unknown + zone + sort + aggregation
        assert_eq!(errors.len(), 5);
    }
}
