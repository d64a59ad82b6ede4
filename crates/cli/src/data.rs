//! Series loading and result writing

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use forecast_server::ForecastResponse;

pub type CliResult<T> = std::result::Result<T, String>;

/// Load time series data from a CSV file
///
/// `column` is a header name or a zero-based index; the first column is used
/// when omitted. Cells that do not parse as numbers are skipped.
pub fn load_csv_data(path: &Path, column: Option<&str>) -> CliResult<Vec<f64>> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let mut reader = csv::Reader::from_reader(BufReader::new(file));

    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read headers: {}", e))?
        .clone();

    let col_idx = match column {
        None => 0,
        Some(col) => match col.parse::<usize>() {
            Ok(idx) => idx,
            Err(_) => headers
                .iter()
                .position(|h| h == col)
                .ok_or_else(|| format!("Column '{}' not found", col))?,
        },
    };

    let mut data = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| format!("Failed to read record: {}", e))?;
        if let Some(Ok(num)) = record.get(col_idx).map(|v| v.trim().parse::<f64>()) {
            data.push(num);
        }
    }

    if data.is_empty() {
        return Err("No numeric data found in the specified column".to_string());
    }

    Ok(data)
}

/// Load time series data from a JSON file
///
/// Accepts a bare array of numbers, a request body (`{"series": [...]}`), or
/// an array of objects keyed by `column`.
pub fn load_json_data(path: &Path, column: Option<&str>) -> CliResult<Vec<f64>> {
    let file = File::open(path).map_err(|e| format!("Failed to open file: {}", e))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| format!("Failed to parse JSON: {}", e))?;

    if let Some(arr) = json.as_array() {
        if !arr.is_empty() && arr.iter().all(|v| v.is_number()) {
            return Ok(arr.iter().filter_map(|v| v.as_f64()).collect());
        }

        let keys: Vec<&str> = match column {
            Some(col) => vec![col],
            None => vec!["value", "y"],
        };
        for key in keys {
            let data: Vec<f64> = arr
                .iter()
                .filter_map(|obj| obj.get(key).and_then(|v| v.as_f64()))
                .collect();
            if !data.is_empty() {
                return Ok(data);
            }
        }
    }

    if let Some(obj) = json.as_object() {
        for key in ["series", "data", "values"] {
            if let Some(arr) = obj.get(key).and_then(|v| v.as_array()) {
                let data: Vec<f64> = arr.iter().filter_map(|v| v.as_f64()).collect();
                if !data.is_empty() {
                    return Ok(data);
                }
            }
        }
    }

    Err("Could not extract numeric data from JSON".to_string())
}

/// Load data from file (auto-detect format)
pub fn load_data(path: &Path, column: Option<&str>) -> CliResult<Vec<f64>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => load_csv_data(path, column),
        "json" => load_json_data(path, column),
        _ => load_json_data(path, column).or_else(|_| load_csv_data(path, column)),
    }
}

/// Render the forecast in the same shape the HTTP endpoint returns
pub fn forecast_json(forecast: &[f64]) -> CliResult<String> {
    let body = ForecastResponse {
        forecast: forecast.to_vec(),
    };
    serde_json::to_string_pretty(&body).map_err(|e| format!("Failed to encode JSON: {}", e))
}

/// Write forecast results to file or stdout
pub fn write_forecast_results(forecast: &[f64], output: Option<&Path>) -> CliResult<()> {
    let json = forecast_json(forecast)?;

    match output {
        Some(path) => {
            std::fs::write(path, json).map_err(|e| format!("Failed to write output: {}", e))?;
            eprintln!("Forecast written to {:?}", path);
        }
        None => println!("{}", json),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_csv_first_column_by_default() {
        let file = temp_file(".csv", "value,other\n1.0,9\n2.5,9\nn/a,9\n4,9\n");
        let data = load_data(file.path(), None).unwrap();
        assert_eq!(data, vec![1.0, 2.5, 4.0]);
    }

    #[test]
    fn test_csv_column_by_name_and_index() {
        let file = temp_file(".csv", "date,price\n2024-01-01,10\n2024-01-02,11\n");
        assert_eq!(load_data(file.path(), Some("price")).unwrap(), vec![10.0, 11.0]);
        assert_eq!(load_data(file.path(), Some("1")).unwrap(), vec![10.0, 11.0]);
    }

    #[test]
    fn test_csv_unknown_column() {
        let file = temp_file(".csv", "a\n1\n");
        let err = load_data(file.path(), Some("b")).unwrap_err();
        assert_eq!(err, "Column 'b' not found");
    }

    #[test]
    fn test_json_shapes() {
        let bare = temp_file(".json", "[1, 2, 3]");
        assert_eq!(load_data(bare.path(), None).unwrap(), vec![1.0, 2.0, 3.0]);

        let body = temp_file(".json", r#"{"series": [4, 5], "steps": 2}"#);
        assert_eq!(load_data(body.path(), None).unwrap(), vec![4.0, 5.0]);

        let rows = temp_file(".json", r#"[{"t": 1, "v": 7}, {"t": 2, "v": 8}]"#);
        assert_eq!(load_data(rows.path(), Some("v")).unwrap(), vec![7.0, 8.0]);
    }

    #[test]
    fn test_json_without_numbers() {
        let file = temp_file(".json", r#"{"name": "x"}"#);
        assert!(load_data(file.path(), None).is_err());
    }

    #[test]
    fn test_write_to_file() {
        let out = NamedTempFile::new().unwrap();
        write_forecast_results(&[1.5, 2.0], Some(out.path())).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.path()).unwrap()).unwrap();
        assert_eq!(written, serde_json::json!({"forecast": [1.5, 2.0]}));
    }
}
