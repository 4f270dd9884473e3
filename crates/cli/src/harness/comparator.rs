use reroute_core::model::UrlMismatch;
use serde_json::Value;

/// Compare an expected URL descriptor against the actual decision,
/// returning one mismatch per differing path.
pub fn compare_url(expected: &Value, actual: &Value) -> Vec<UrlMismatch> {
    let mut mismatches = Vec::new();
    collect_mismatches("url", expected, actual, &mut mismatches);
    mismatches
}

fn collect_mismatches(path: &str, expected: &Value, actual: &Value, out: &mut Vec<UrlMismatch>) {
    match (expected, actual) {
        (Value::Object(expected_entries), Value::Object(actual_entries)) => {
            for (key, expected_value) in expected_entries {
                let child_path = format!("{path}.{key}");
                match actual_entries.get(key) {
                    Some(actual_value) => {
                        collect_mismatches(&child_path, expected_value, actual_value, out)
                    }
                    None => out.push(UrlMismatch {
                        path: child_path,
                        expected: Some(expected_value.clone()),
                        actual: None,
                    }),
                }
            }

            // Keys present in actual that the expectation never named
            for (key, actual_value) in actual_entries {
                if !expected_entries.contains_key(key) {
                    out.push(UrlMismatch {
                        path: format!("{path}.{key}"),
                        expected: None,
                        actual: Some(actual_value.clone()),
                    });
                }
            }
        }
        (Value::Array(expected_items), Value::Array(actual_items))
            if expected_items.len() == actual_items.len() =>
        {
            for (index, (expected_value, actual_value)) in
                expected_items.iter().zip(actual_items).enumerate()
            {
                collect_mismatches(
                    &format!("{path}[{index}]"),
                    expected_value,
                    actual_value,
                    out,
                );
            }
        }
        _ => {
            if !values_equal(expected, actual) {
                out.push(UrlMismatch {
                    path: path.to_string(),
                    expected: Some(expected.clone()),
                    actual: Some(actual.clone()),
                });
            }
        }
    }
}

/// Compare two JSON values for equality (with float tolerance)
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(n1), Value::Number(n2)) => {
            if let (Some(f1), Some(f2)) = (n1.as_f64(), n2.as_f64()) {
                (f1 - f2).abs() < 1e-10
            } else {
                n1 == n2
            }
        }
        _ => a == b,
    }
}
