use serde_json::Value;

/// Compact popularity label: "0" for absent or zero, one decimal with an
/// `M`/`K` suffix from a thousand upwards, otherwise the number itself.
pub fn format_heat(score: Option<f64>) -> String {
    let score = match score {
        Some(s) if s != 0.0 && !s.is_nan() => s,
        _ => return "0".to_string(),
    };

    if score >= 1_000_000.0 {
        format!("{:.1}M", score / 1_000_000.0)
    } else if score >= 1_000.0 {
        format!("{:.1}K", score / 1_000.0)
    } else if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{}", score)
    }
}

/// Reads a heat score out of upstream JSON, which sends it either as a
/// number or as a numeric string.
pub fn heat_score(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Label for a raw `heatScore` value. Text that is not a number (a badge
/// like `"hot"`) is shown as sent.
pub fn heat_label(value: &Value) -> String {
    match (heat_score(value), value) {
        (Some(score), _) => format_heat(Some(score)),
        (None, Value::String(s)) if !s.is_empty() => s.clone(),
        _ => format_heat(None),
    }
}

/// Walks a JSON tree and gives every object that has a `heatScore` a
/// `heatScoreLabel` next to it.
pub fn annotate_heat(value: &mut Value) {
    match value {
        Value::Array(items) => items.iter_mut().for_each(annotate_heat),
        Value::Object(map) => {
            if let Some(score) = map.get("heatScore") {
                let label = heat_label(score);
                map.insert("heatScoreLabel".to_string(), Value::String(label));
            }
            for (key, child) in map.iter_mut() {
                if key != "heatScoreLabel" {
                    annotate_heat(child);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_heat() {
        assert_eq!(format_heat(Some(0.0)), "0");
        assert_eq!(format_heat(None), "0");
        assert_eq!(format_heat(Some(999.0)), "999");
        assert_eq!(format_heat(Some(1500.0)), "1.5K");
        assert_eq!(format_heat(Some(1000.0)), "1.0K");
        assert_eq!(format_heat(Some(2_300_000.0)), "2.3M");
        assert_eq!(format_heat(Some(12.5)), "12.5");
    }

    #[test]
    fn test_heat_score_from_json() {
        assert_eq!(heat_score(&json!(1500)), Some(1500.0));
        assert_eq!(heat_score(&json!("2300000")), Some(2_300_000.0));
        assert_eq!(heat_score(&json!(null)), None);
        assert_eq!(heat_score(&json!("hot")), None);
    }

    #[test]
    fn test_heat_label() {
        assert_eq!(heat_label(&json!(1500)), "1.5K");
        assert_eq!(heat_label(&json!("2300000")), "2.3M");
        assert_eq!(heat_label(&json!("hot")), "hot");
        assert_eq!(heat_label(&json!("")), "0");
        assert_eq!(heat_label(&json!(null)), "0");
        assert_eq!(heat_label(&json!(0)), "0");
    }

    #[test]
    fn test_annotate_heat() {
        let mut data = json!([
            { "shortPlayName": "A", "heatScore": 1500 },
            { "groupName": "B", "contentInfos": [ { "heatScore": "2300000" }, { "heatScore": null } ] },
            { "shortPlayName": "C" },
            { "shortPlayName": "D", "heatScore": "hot" }
        ]);
        annotate_heat(&mut data);
        assert_eq!(data[0]["heatScoreLabel"], "1.5K");
        assert_eq!(data[1]["contentInfos"][0]["heatScoreLabel"], "2.3M");
        assert_eq!(data[1]["contentInfos"][1]["heatScoreLabel"], "0");
        assert!(data[2].get("heatScoreLabel").is_none());
        assert!(data[1].get("heatScoreLabel").is_none());
        assert_eq!(data[3]["heatScoreLabel"], "hot");
    }
}
