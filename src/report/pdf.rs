//! Printable report composition and pagination.
//!
//! The report is composed as an HTML document (one section per day in
//! chronological order), rasterized to a single continuous image, sliced
//! into page-height bands and assembled into a PDF. Composition, ordering
//! and pagination live here; the HTML-to-raster and raster-to-PDF
//! capabilities are supplied by the embedding application through
//! [`PdfBackend`].

use chrono::{Datelike, NaiveDate};

use crate::models::{EntryImage, MealEntry, MealType};
use crate::report::{group_by_date, DateOrder, ExportError};

/// Page geometry of the rasterized report, in pixels (A4 at 96 dpi).
pub const PAGE_WIDTH_PX: u32 = 794;
pub const PAGE_HEIGHT_PX: u32 = 1123;

/// Display width of an embedded photo inside a meal block.
pub const IMAGE_DISPLAY_WIDTH_PX: u32 = 200;

const WEEKDAYS: [&str; 7] = [
    "lunes",
    "martes",
    "miércoles",
    "jueves",
    "viernes",
    "sábado",
    "domingo",
];

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// One meal of a day section: slot, text and optional photo.
#[derive(Debug, Clone)]
pub struct MealBlock {
    pub meal_type: MealType,
    pub content: String,
    pub image: Option<EntryImage>,
}

/// One day of the report, blocks in canonical meal order.
#[derive(Debug, Clone)]
pub struct DaySection {
    pub date: NaiveDate,
    pub heading: String,
    pub blocks: Vec<MealBlock>,
}

/// The composed report: day sections in ascending calendar order.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub sections: Vec<DaySection>,
}

/// Localized heading for a day section, e.g. "Lunes, 5 de enero de 2024".
pub fn spanish_heading(date: NaiveDate) -> String {
    let weekday = WEEKDAYS[date.weekday().num_days_from_monday() as usize];
    let month = MONTHS[date.month0() as usize];
    let mut heading = weekday.to_string();
    if let Some(first) = heading.get(..1) {
        let capitalized = first.to_uppercase();
        heading.replace_range(..1, &capitalized);
    }
    format!("{}, {} de {} de {}", heading, date.day(), month, date.year())
}

/// Composes the report for the inclusive `[from, to]` range.
///
/// Days without entries in range are excluded entirely; absent meal slots
/// produce no block. Returns `None` when nothing falls inside the range.
pub fn compose_report(
    entries: &[MealEntry],
    from: NaiveDate,
    to: NaiveDate,
) -> Option<ReportDocument> {
    let filtered: Vec<MealEntry> = entries
        .iter()
        .filter(|e| e.date >= from && e.date <= to)
        .cloned()
        .collect();
    if filtered.is_empty() {
        return None;
    }

    let sections = group_by_date(&filtered, DateOrder::Ascending)
        .into_iter()
        .map(|group| DaySection {
            date: group.date,
            heading: spanish_heading(group.date),
            blocks: group
                .present()
                .map(|entry| MealBlock {
                    meal_type: entry.meal_type,
                    content: entry.content.clone(),
                    image: entry.image.clone(),
                })
                .collect(),
        })
        .collect();

    Some(ReportDocument { from, to, sections })
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the composed report as the HTML document fed to the rasterizer.
pub fn render_html(document: &ReportDocument) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>NutriLog</title>\n<style>\n");
    html.push_str("body { font-family: sans-serif; margin: 24px; }\n");
    html.push_str("section { margin-bottom: 32px; }\n");
    html.push_str("h2 { border-bottom: 1px solid #ccc; padding-bottom: 4px; }\n");
    html.push_str(".meal { margin: 12px 0; }\n");
    html.push_str("</style>\n</head>\n<body>\n");

    for section in &document.sections {
        html.push_str("<section class=\"day\">\n");
        html.push_str(&format!("<h2>{}</h2>\n", escape_html(&section.heading)));
        for block in &section.blocks {
            html.push_str("<div class=\"meal\">\n");
            html.push_str(&format!(
                "<h3>{} {}</h3>\n",
                block.meal_type.icon(),
                block.meal_type.label()
            ));
            html.push_str(&format!("<p>{}</p>\n", escape_html(&block.content)));
            if let Some(image) = &block.image {
                html.push_str(&format!(
                    "<img src=\"{}\" width=\"{}\" alt=\"\">\n",
                    image.to_data_url(),
                    IMAGE_DISPLAY_WIDTH_PX
                ));
            }
            html.push_str("</div>\n");
        }
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// A horizontal band of the continuous raster, one per output page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBand {
    pub top: u32,
    pub height: u32,
}

/// Splits a total content height into page-height bands.
///
/// Bands of `min(page_height, remaining)` are emitted while remaining
/// height exceeds zero; slicing stops once the covered height reaches the
/// total, so a content height that is an exact multiple of the page height
/// yields no trailing empty page.
pub fn page_bands(total_height: u32, page_height: u32) -> Vec<PageBand> {
    let mut bands = Vec::new();
    if page_height == 0 {
        return bands;
    }

    let mut top = 0;
    while top < total_height {
        let height = page_height.min(total_height - top);
        bands.push(PageBand { top, height });
        top += height;
    }
    bands
}

/// A continuous RGBA8 raster of the rendered report, rows top-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ExportError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(ExportError::InvalidRaster {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// One page-sized slice of the raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Slices the raster into page images along the given bands.
///
/// The bands must come from [`page_bands`] over this raster's height.
pub fn slice_pages(raster: &Raster, bands: &[PageBand]) -> Vec<PageImage> {
    let row_bytes = raster.width as usize * 4;
    bands
        .iter()
        .map(|band| {
            let start = band.top as usize * row_bytes;
            let end = start + band.height as usize * row_bytes;
            PageImage {
                width: raster.width,
                height: band.height,
                pixels: raster.pixels[start..end].to_vec(),
            }
        })
        .collect()
}

/// External rendering capabilities: HTML to raster, raster pages to PDF.
///
/// In the original application these were the browser's canvas capture and
/// PDF writer; an embedding application supplies its own.
pub trait PdfBackend {
    fn rasterize(&self, html: &str, page_width: u32) -> Result<Raster, ExportError>;
    fn assemble(&self, pages: &[PageImage]) -> Result<Vec<u8>, ExportError>;
}

/// A named export ready to be written out.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// File name for a PDF export of the given range.
pub fn pdf_file_name(from: NaiveDate, to: NaiveDate) -> String {
    format!("NutriLog_Informe_{}_{}.pdf", from, to)
}

/// File name for the printable HTML document of the given range.
pub fn report_file_name(from: NaiveDate, to: NaiveDate) -> String {
    format!("NutriLog_Informe_{}_{}.html", from, to)
}

/// Runs the full export pipeline for the inclusive `[from, to]` range.
///
/// Returns `Ok(None)` when no entry falls inside the range (a no-op, not an
/// error).
pub fn export_pdf(
    entries: &[MealEntry],
    from: NaiveDate,
    to: NaiveDate,
    backend: &dyn PdfBackend,
) -> Result<Option<ExportFile>, ExportError> {
    let document = match compose_report(entries, from, to) {
        Some(document) => document,
        None => return Ok(None),
    };

    let html = render_html(&document);
    let raster = backend.rasterize(&html, PAGE_WIDTH_PX)?;
    let bands = page_bands(raster.height, PAGE_HEIGHT_PX);
    let pages = slice_pages(&raster, &bands);
    let bytes = backend.assemble(&pages)?;

    Ok(Some(ExportFile {
        name: pdf_file_name(from, to),
        bytes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(d: &str, meal_type: MealType, content: &str) -> MealEntry {
        MealEntry::new(date(d), meal_type, content)
    }

    /// Produces a raster `height` rows tall where every pixel of row `i`
    /// has the value `i % 256`, and records the pages it is asked to
    /// assemble.
    struct FakeBackend {
        height: u32,
        pages_seen: RefCell<Vec<(u32, u32)>>,
    }

    impl FakeBackend {
        fn new(height: u32) -> Self {
            Self {
                height,
                pages_seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl PdfBackend for FakeBackend {
        fn rasterize(&self, _html: &str, page_width: u32) -> Result<Raster, ExportError> {
            let row = vec![0u8; page_width as usize * 4];
            let mut pixels = Vec::new();
            for i in 0..self.height {
                let mut r = row.clone();
                r.fill((i % 256) as u8);
                pixels.extend_from_slice(&r);
            }
            Raster::new(page_width, self.height, pixels)
        }

        fn assemble(&self, pages: &[PageImage]) -> Result<Vec<u8>, ExportError> {
            let mut seen = self.pages_seen.borrow_mut();
            for page in pages {
                seen.push((page.width, page.height));
            }
            Ok(b"%PDF-fake".to_vec())
        }
    }

    #[test]
    fn test_spanish_heading() {
        // 2024-01-05 is a Friday
        assert_eq!(
            spanish_heading(date("2024-01-05")),
            "Viernes, 5 de enero de 2024"
        );
        // 2024-03-02 is a Saturday
        assert_eq!(
            spanish_heading(date("2024-03-02")),
            "Sábado, 2 de marzo de 2024"
        );
    }

    #[test]
    fn test_compose_filters_by_inclusive_range() {
        let entries = vec![
            entry("2024-01-01", MealType::Breakfast, "Avena"),
            entry("2024-01-05", MealType::Lunch, "Ensalada"),
            entry("2024-01-10", MealType::Dinner, "Sopa"),
        ];

        let document =
            compose_report(&entries, date("2024-01-02"), date("2024-01-08")).unwrap();
        assert_eq!(document.sections.len(), 1);
        assert_eq!(document.sections[0].date, date("2024-01-05"));
    }

    #[test]
    fn test_compose_sections_ascending() {
        let entries = vec![
            entry("2024-01-10", MealType::Dinner, "Sopa"),
            entry("2024-01-01", MealType::Breakfast, "Avena"),
        ];

        let document =
            compose_report(&entries, date("2024-01-01"), date("2024-01-31")).unwrap();
        let dates: Vec<NaiveDate> = document.sections.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![date("2024-01-01"), date("2024-01-10")]);
    }

    #[test]
    fn test_compose_omits_absent_slots() {
        let entries = vec![
            entry("2024-01-01", MealType::Extras, "Manzana"),
            entry("2024-01-01", MealType::Breakfast, "Avena"),
        ];

        let document =
            compose_report(&entries, date("2024-01-01"), date("2024-01-01")).unwrap();
        let blocks: Vec<MealType> = document.sections[0]
            .blocks
            .iter()
            .map(|b| b.meal_type)
            .collect();
        assert_eq!(blocks, vec![MealType::Breakfast, MealType::Extras]);
    }

    #[test]
    fn test_compose_empty_range_is_none() {
        let entries = vec![entry("2024-01-01", MealType::Breakfast, "Avena")];
        assert!(compose_report(&entries, date("2024-02-01"), date("2024-02-28")).is_none());
    }

    #[test]
    fn test_render_html_escapes_content() {
        let entries = vec![entry("2024-01-01", MealType::Lunch, "Pan <& \"queso\">")];
        let document =
            compose_report(&entries, date("2024-01-01"), date("2024-01-01")).unwrap();

        let html = render_html(&document);
        assert!(html.contains("Pan &lt;&amp; &quot;queso&quot;&gt;"));
        assert!(html.contains("🍲 Almuerzo"));
        assert!(html.contains("Lunes, 1 de enero de 2024"));
    }

    #[test]
    fn test_render_html_inlines_images() {
        let entries = vec![entry("2024-01-01", MealType::Dinner, "Sopa")
            .with_image(EntryImage::new("image/jpeg", vec![1, 2, 3]))];
        let document =
            compose_report(&entries, date("2024-01-01"), date("2024-01-01")).unwrap();

        let html = render_html(&document);
        assert!(html.contains("src=\"data:image/jpeg;base64,"));
        assert!(html.contains(&format!("width=\"{}\"", IMAGE_DISPLAY_WIDTH_PX)));
    }

    #[test]
    fn test_page_bands_with_remainder() {
        let bands = page_bands(2500, 1000);
        assert_eq!(
            bands,
            vec![
                PageBand { top: 0, height: 1000 },
                PageBand { top: 1000, height: 1000 },
                PageBand { top: 2000, height: 500 },
            ]
        );
    }

    #[test]
    fn test_page_bands_exact_multiple_has_no_empty_page() {
        let bands = page_bands(2000, 1000);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[1], PageBand { top: 1000, height: 1000 });
    }

    #[test]
    fn test_page_bands_zero_height() {
        assert!(page_bands(0, 1000).is_empty());
        assert!(page_bands(1000, 0).is_empty());
    }

    #[test]
    fn test_raster_rejects_wrong_buffer_size() {
        assert!(matches!(
            Raster::new(2, 2, vec![0; 15]),
            Err(ExportError::InvalidRaster { expected: 16, actual: 15 })
        ));
    }

    #[test]
    fn test_slice_pages_reassembles_to_original() {
        let width = 3u32;
        let height = 7u32;
        let pixels: Vec<u8> = (0..width * height * 4).map(|i| (i % 256) as u8).collect();
        let raster = Raster::new(width, height, pixels.clone()).unwrap();

        let bands = page_bands(height, 3);
        let pages = slice_pages(&raster, &bands);

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[2].height, 1);
        let reassembled: Vec<u8> = pages.into_iter().flat_map(|p| p.pixels).collect();
        assert_eq!(reassembled, pixels);
    }

    #[test]
    fn test_export_pdf_empty_range_produces_no_file() {
        let backend = FakeBackend::new(100);
        let entries = vec![entry("2024-01-01", MealType::Breakfast, "Avena")];

        let result =
            export_pdf(&entries, date("2024-02-01"), date("2024-02-28"), &backend).unwrap();
        assert!(result.is_none());
        assert!(backend.pages_seen.borrow().is_empty());
    }

    #[test]
    fn test_export_pdf_paginates_raster() {
        // 2.5 pages worth of raster
        let backend = FakeBackend::new(PAGE_HEIGHT_PX * 2 + PAGE_HEIGHT_PX / 2);
        let entries = vec![entry("2024-01-01", MealType::Breakfast, "Avena")];

        let file = export_pdf(&entries, date("2024-01-01"), date("2024-01-01"), &backend)
            .unwrap()
            .unwrap();

        assert_eq!(file.name, "NutriLog_Informe_2024-01-01_2024-01-01.pdf");
        assert_eq!(file.bytes, b"%PDF-fake");

        let pages = backend.pages_seen.borrow();
        assert_eq!(
            *pages,
            vec![
                (PAGE_WIDTH_PX, PAGE_HEIGHT_PX),
                (PAGE_WIDTH_PX, PAGE_HEIGHT_PX),
                (PAGE_WIDTH_PX, PAGE_HEIGHT_PX / 2),
            ]
        );
    }

    #[test]
    fn test_export_pdf_backend_failure_surfaces() {
        struct FailingBackend;
        impl PdfBackend for FailingBackend {
            fn rasterize(&self, _html: &str, _page_width: u32) -> Result<Raster, ExportError> {
                Err(ExportError::Backend("canvas capture failed".to_string()))
            }
            fn assemble(&self, _pages: &[PageImage]) -> Result<Vec<u8>, ExportError> {
                unreachable!()
            }
        }

        let entries = vec![entry("2024-01-01", MealType::Breakfast, "Avena")];
        let result = export_pdf(
            &entries,
            date("2024-01-01"),
            date("2024-01-01"),
            &FailingBackend,
        );
        assert!(matches!(result, Err(ExportError::Backend(_))));
    }
}
