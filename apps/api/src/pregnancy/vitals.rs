use serde::{Deserialize, Serialize};

/// Vitals submitted by the mother. Every measurement is optional; a record
/// with only symptoms or notes is valid.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricInput {
    pub weight_kg: Option<f64>,
    pub systolic: Option<i32>,
    pub diastolic: Option<i32>,
    pub heart_rate: Option<i32>,
    pub temperature_c: Option<f64>,
    pub symptoms: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

const SYSTOLIC_RANGE: (i32, i32) = (50, 250);
const DIASTOLIC_RANGE: (i32, i32) = (30, 150);
const HEART_RATE_RANGE: (i32, i32) = (30, 220);
const TEMPERATURE_RANGE: (f64, f64) = (30.0, 45.0);
const WEIGHT_RANGE: (f64, f64) = (30.0, 300.0);

/// Checks each supplied measurement against its physiologically plausible
/// range. Returns one error per out-of-range field; empty means valid.
pub fn validate_metrics(input: &MetricInput) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(v) = input.systolic {
        check_int("systolic", v, SYSTOLIC_RANGE, &mut errors);
    }
    if let Some(v) = input.diastolic {
        check_int("diastolic", v, DIASTOLIC_RANGE, &mut errors);
    }
    if let Some(v) = input.heart_rate {
        check_int("heart_rate", v, HEART_RATE_RANGE, &mut errors);
    }
    if let Some(v) = input.temperature_c {
        check_float("temperature_c", v, TEMPERATURE_RANGE, &mut errors);
    }
    if let Some(v) = input.weight_kg {
        check_float("weight_kg", v, WEIGHT_RANGE, &mut errors);
    }
    if let (Some(sys), Some(dia)) = (input.systolic, input.diastolic) {
        if dia >= sys {
            errors.push(FieldError {
                field: "diastolic",
                message: "diastolic must be lower than systolic".to_string(),
            });
        }
    }

    errors
}

fn check_int(field: &'static str, value: i32, range: (i32, i32), errors: &mut Vec<FieldError>) {
    if value < range.0 || value > range.1 {
        errors.push(FieldError {
            field,
            message: format!("must be between {} and {}", range.0, range.1),
        });
    }
}

fn check_float(field: &'static str, value: f64, range: (f64, f64), errors: &mut Vec<FieldError>) {
    if !value.is_finite() || value < range.0 || value > range.1 {
        errors.push(FieldError {
            field,
            message: format!("must be between {} and {}", range.0, range.1),
        });
    }
}

/// Joins field errors into the single-line form the error envelope carries.
pub fn describe_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_valid() {
        assert!(validate_metrics(&MetricInput::default()).is_empty());
    }

    #[test]
    fn test_normal_vitals_pass() {
        let input = MetricInput {
            weight_kg: Some(68.5),
            systolic: Some(118),
            diastolic: Some(76),
            heart_rate: Some(82),
            temperature_c: Some(36.8),
            symptoms: Some("mild nausea".to_string()),
            notes: None,
        };
        assert!(validate_metrics(&input).is_empty());
    }

    #[test]
    fn test_systolic_out_of_range() {
        let input = MetricInput {
            systolic: Some(300),
            ..Default::default()
        };
        let errors = validate_metrics(&input);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "systolic");
    }

    #[test]
    fn test_systolic_at_bounds_accepted() {
        for v in [50, 250] {
            let input = MetricInput {
                systolic: Some(v),
                ..Default::default()
            };
            assert!(validate_metrics(&input).is_empty(), "rejected systolic {v}");
        }
    }

    #[test]
    fn test_diastolic_above_systolic_rejected() {
        let input = MetricInput {
            systolic: Some(90),
            diastolic: Some(110),
            ..Default::default()
        };
        let errors = validate_metrics(&input);
        assert!(errors.iter().any(|e| e.field == "diastolic"));
    }

    #[test]
    fn test_temperature_out_of_range() {
        let input = MetricInput {
            temperature_c: Some(50.0),
            ..Default::default()
        };
        assert_eq!(validate_metrics(&input).len(), 1);
    }

    #[test]
    fn test_nan_temperature_rejected() {
        let input = MetricInput {
            temperature_c: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(validate_metrics(&input).len(), 1);
    }

    #[test]
    fn test_multiple_errors_collected() {
        let input = MetricInput {
            weight_kg: Some(500.0),
            heart_rate: Some(10),
            ..Default::default()
        };
        let errors = validate_metrics(&input);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_describe_errors_joins_fields() {
        let input = MetricInput {
            heart_rate: Some(500),
            ..Default::default()
        };
        let msg = describe_errors(&validate_metrics(&input));
        assert!(msg.contains("heart_rate"), "was: {msg}");
        assert!(msg.contains("between 30 and 220"), "was: {msg}");
    }
}
