use std::path::Path;

use household_finance_core::ModelAssumptions;

use super::file;

/// Model assumptions from `--assumptions`, or the defaults when no file is
/// given. Files ending in `.yaml`/`.yml` are read as YAML, anything else as
/// JSON. Missing fields keep their default value.
pub fn load(path: Option<&str>) -> Result<ModelAssumptions, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(ModelAssumptions::default());
    };

    let (canonical, contents) = file::read_text(path)?;
    let model: ModelAssumptions = if is_yaml(&canonical) {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    model.validate()?;

    tracing::info!(
        path = %canonical.display(),
        depreciation_rate = %model.depreciation_rate,
        cgt_rate = %model.cgt_rate,
        "loaded model assumptions"
    );
    Ok(model)
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_no_file_gives_defaults() {
        let model = load(None).unwrap();
        assert_eq!(model.cgt_rate, dec!(0.30));
        assert_eq!(model.gst_divisor, dec!(1.1));
    }

    #[test]
    fn test_yaml_partial_override() {
        let model: ModelAssumptions = serde_yaml::from_str("cgt_rate: \"0.45\"\n").unwrap();
        assert_eq!(model.cgt_rate, dec!(0.45));
        assert_eq!(model.depreciation_rate, dec!(0.15));
    }

    #[test]
    fn test_extension_detection() {
        assert!(is_yaml(Path::new("model.yaml")));
        assert!(is_yaml(Path::new("/tmp/model.yml")));
        assert!(!is_yaml(Path::new("model.json")));
        assert!(!is_yaml(Path::new("model")));
    }
}
