use contracts::usecases::u510_upload_staging::UploadFormat;
use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CsvReadError {
    #[error("invalid delimiter {0:?}: must be a single ASCII character")]
    Delimiter(char),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Parses CSV text into one JSON object per record, keyed by header.
///
/// Without an explicit delimiter, `;` is used when the header line has more
/// semicolons than commas (spreadsheets exported with a pt-BR locale).
/// Cells under amount/quantity columns become JSON numbers; everything else
/// is kept verbatim as a string.
pub fn parse_csv(text: &str, delimiter: Option<char>) -> Result<Vec<Map<String, Value>>, CsvReadError> {
    // Strip UTF-8 BOM if present
    let text = text.trim_start_matches('\u{FEFF}');
    let delimiter = delimiter.unwrap_or_else(|| sniff_delimiter(text));
    let delimiter_byte = u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or(CsvReadError::Delimiter(delimiter))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(delimiter_byte)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    tracing::debug!("Upload CSV headers: {:?}", headers.iter().collect::<Vec<_>>());
    let numeric: Vec<bool> = headers.iter().map(UploadFormat::is_numeric_column).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("Skipping malformed CSV record: {}", e);
                continue;
            }
        };
        if record.iter().all(|v| v.trim().is_empty()) {
            continue;
        }

        let row: Map<String, Value> = headers
            .iter()
            .enumerate()
            .map(|(i, header)| {
                let raw = record.get(i).unwrap_or_default();
                (header.to_string(), cell(raw, numeric[i]))
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

fn sniff_delimiter(text: &str) -> char {
    let header = text.lines().next().unwrap_or_default();
    let semicolons = header.matches(';').count();
    let commas = header.matches(',').count();
    if semicolons > commas {
        ';'
    } else {
        ','
    }
}

fn cell(raw: &str, numeric: bool) -> Value {
    let trimmed = raw.trim();
    if !numeric || trimmed.is_empty() {
        return Value::String(trimmed.to_string());
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::Number(n.into());
    }
    match trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semicolon_file_with_bom() {
        let text = "\u{FEFF}Data;Categoria;Produto;Faturamento\n2026-03-01;Bebidas;Água;12.5\n;;;\n";
        let rows = parse_csv(text, None).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Data"], "2026-03-01");
        assert_eq!(rows[0]["Faturamento"], 12.5);
        assert_eq!(rows[0]["Produto"], "Água");
    }

    #[test]
    fn test_explicit_delimiter_and_short_records() {
        let text = "Produto|Preco|Estoque\nArroz|5,99\n";
        let rows = parse_csv(text, Some('|')).unwrap();
        assert_eq!(rows[0]["Preco"], "5,99");
        assert_eq!(rows[0]["Estoque"], "");
    }

    #[test]
    fn test_code_columns_stay_text() {
        let text = "Codigo,Produto,Estoque,Preco\n0789123,12,40,5.5\n";
        let rows = parse_csv(text, None).unwrap();
        assert_eq!(rows[0]["Codigo"], "0789123");
        assert_eq!(rows[0]["Produto"], "12");
        assert_eq!(rows[0]["Estoque"], serde_json::json!(40));
        assert!(rows[0]["Estoque"].is_i64());
        assert_eq!(rows[0]["Preco"], 5.5);
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        let text = "Produto\tPreco\nA\t1\n";
        assert!(matches!(
            parse_csv(text, Some('ĉ')),
            Err(CsvReadError::Delimiter('ĉ'))
        ));
        assert!(matches!(
            parse_csv(text, Some('§')),
            Err(CsvReadError::Delimiter('§'))
        ));
        assert_eq!(parse_csv(text, Some('\t')).unwrap()[0]["Preco"], serde_json::json!(1));
    }
}
