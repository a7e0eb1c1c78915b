//! CSV export of the full history.
//!
//! One row per date, most recent first, with one column per meal slot. The
//! output carries a UTF-8 BOM so spreadsheet applications detect the
//! encoding.

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};

use crate::models::{MealEntry, MealType};
use crate::report::{group_by_date, DateOrder, ExportError};

/// Localized column headers: date plus the five meal slots in canonical
/// order.
pub const CSV_HEADERS: [&str; 6] = [
    "Fecha",
    "Desayuno",
    "Almuerzo",
    "Merienda",
    "Cena",
    "Extras",
];

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// File name for a CSV export triggered on `today`.
pub fn csv_file_name(today: NaiveDate) -> String {
    format!("NutriLog_Export_{}.csv", today)
}

/// Renders the entry list as a CSV document.
///
/// Returns `Ok(None)` for an empty list: exporting nothing is a no-op, not
/// an error. Data cells are always quoted with inner quotes doubled; the
/// header line is written verbatim.
pub fn render_csv(entries: &[MealEntry]) -> Result<Option<Vec<u8>>, ExportError> {
    if entries.is_empty() {
        return Ok(None);
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    for group in group_by_date(entries, DateOrder::Descending) {
        let mut record = Vec::with_capacity(CSV_HEADERS.len());
        record.push(group.date.to_string());
        for meal_type in MealType::ALL {
            record.push(
                group
                    .get(meal_type)
                    .map(|e| e.content.clone())
                    .unwrap_or_default(),
            );
        }
        writer
            .write_record(&record)
            .map_err(|e| ExportError::Csv(e.to_string()))?;
    }

    let rows = writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.to_string()))?;

    let mut out = UTF8_BOM.to_vec();
    out.extend_from_slice(CSV_HEADERS.join(",").as_bytes());
    out.push(b'\n');
    out.extend_from_slice(&rows);
    Ok(Some(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(d: &str, meal_type: MealType, content: &str) -> MealEntry {
        MealEntry::new(date(d), meal_type, content)
    }

    fn render_to_string(entries: &[MealEntry]) -> String {
        let bytes = render_csv(entries).unwrap().unwrap();
        assert_eq!(&bytes[..3], UTF8_BOM);
        String::from_utf8(bytes[3..].to_vec()).unwrap()
    }

    #[test]
    fn test_empty_input_is_noop() {
        assert!(render_csv(&[]).unwrap().is_none());
    }

    #[test]
    fn test_header_and_descending_rows() {
        let entries = vec![
            entry("2024-01-01", MealType::Breakfast, "Avena"),
            entry("2024-01-02", MealType::Lunch, "Ensalada"),
        ];

        let text = render_to_string(&entries);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Fecha,Desayuno,Almuerzo,Merienda,Cena,Extras");
        assert_eq!(lines[1], "\"2024-01-02\",\"\",\"Ensalada\",\"\",\"\",\"\"");
        assert_eq!(lines[2], "\"2024-01-01\",\"Avena\",\"\",\"\",\"\",\"\"");
    }

    #[test]
    fn test_inner_quotes_are_doubled() {
        let entries = vec![entry(
            "2024-01-01",
            MealType::Dinner,
            "Pollo \"al horno\" con papas",
        )];

        let text = render_to_string(&entries);
        assert!(text.contains("\"Pollo \"\"al horno\"\" con papas\""));
    }

    #[test]
    fn test_full_day_row() {
        let entries = vec![
            entry("2024-01-01", MealType::Extras, "Manzana"),
            entry("2024-01-01", MealType::Breakfast, "Avena"),
            entry("2024-01-01", MealType::Snack, "Tostada"),
            entry("2024-01-01", MealType::Lunch, "Ensalada"),
            entry("2024-01-01", MealType::Dinner, "Sopa"),
        ];

        let text = render_to_string(&entries);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[1],
            "\"2024-01-01\",\"Avena\",\"Ensalada\",\"Tostada\",\"Sopa\",\"Manzana\""
        );
    }

    #[test]
    fn test_csv_file_name() {
        assert_eq!(
            csv_file_name(date("2024-03-08")),
            "NutriLog_Export_2024-03-08.csv"
        );
    }
}
