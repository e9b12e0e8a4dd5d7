//! Telemetry window loading

use analytics_lib::{parse_samples, FuelType, TelemetrySample};
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Read and validate a telemetry window from a JSON array or JSON-lines file
pub fn load_window(path: &Path) -> Result<Vec<TelemetrySample>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read telemetry file {}", path.display()))?;

    let window = parse_samples(&content)
        .with_context(|| format!("Failed to parse telemetry file {}", path.display()))?;

    for (index, sample) in window.iter().enumerate() {
        sample
            .validate()
            .with_context(|| format!("Sample {} ({}) is invalid", index, sample.timestamp))?;
    }

    Ok(window)
}

/// Fuel to analyze as: the override, else the latest sample's fuel
pub fn resolve_fuel(window: &[TelemetrySample], fuel: Option<FuelType>) -> Result<FuelType> {
    match (fuel, window.last()) {
        (Some(fuel), _) => Ok(fuel),
        (None, Some(latest)) => Ok(latest.fuel_type),
        (None, None) => bail!("Telemetry file is empty; pass --fuel to analyze an empty window"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{"timestamp":"08:00","steamPressure":65.0,"steamFlow":45.0,"stackTemp":165.0,"o2Level":3.5,"efficiency":85.0,"fuelFlow":5000.0,"fuelType":"Oil"}"#;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_json_array() {
        let file = write_temp(&format!("[{SAMPLE}, {SAMPLE}]"));
        let window = load_window(file.path()).unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(resolve_fuel(&window, None).unwrap(), FuelType::Oil);
        assert_eq!(resolve_fuel(&window, Some(FuelType::Gas)).unwrap(), FuelType::Gas);
    }

    #[test]
    fn test_load_json_lines() {
        let file = write_temp(&format!("{SAMPLE}\n{SAMPLE}\n{SAMPLE}\n"));
        assert_eq!(load_window(file.path()).unwrap().len(), 3);
    }

    #[test]
    fn test_missing_file() {
        assert!(load_window(Path::new("/nonexistent/window.json")).is_err());
    }

    #[test]
    fn test_empty_window_needs_fuel() {
        assert!(resolve_fuel(&[], None).is_err());
        assert_eq!(resolve_fuel(&[], Some(FuelType::Coal)).unwrap(), FuelType::Coal);
    }
}
