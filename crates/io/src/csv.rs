// CSV product import

use std::io::Read;
use std::path::Path;

use prodsent_stats::config::InputConfig;
use prodsent_stats::Product;

pub use prodsent_stats::SkippedRow;

use crate::error::LoadError;
use crate::markup::strip_markup;

/// Reader settings for a product file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputOptions {
    pub delimiter: u8,
    pub has_headers: bool,
    pub strip_markup: bool,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            strip_markup: true,
        }
    }
}

impl From<&InputConfig> for InputOptions {
    fn from(config: &InputConfig) -> Self {
        Self {
            delimiter: config.delimiter_byte(),
            has_headers: config.has_headers,
            strip_markup: config.strip_markup,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub products: Vec<Product>,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    fn skip(&mut self, line: u64, reason: String) {
        log::warn!("skipping row {line}: {reason}");
        self.skipped.push(SkippedRow { line, reason });
    }
}

pub fn load_products(path: &Path, options: &InputOptions) -> Result<LoadReport, LoadError> {
    log::info!("loading products from '{}'", path.display());
    let content = read_file_as_utf8(path)?;
    let report = load_products_from_str(&content, options)?;
    log::info!(
        "loaded {} products ({} rows skipped)",
        report.products.len(),
        report.skipped.len()
    );
    Ok(report)
}

/// Parse products from CSV text. Rows without exactly two fields are
/// reported in `LoadReport::skipped`, never fatal.
///
/// Blank lines are not rows: the reader drops them before field counting,
/// so they appear neither as products nor in `skipped`.
pub fn load_products_from_str(
    content: &str,
    options: &InputOptions,
) -> Result<LoadReport, LoadError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .from_reader(content.as_bytes());

    if options.has_headers {
        reader.headers().map_err(|e| LoadError::Csv(e.to_string()))?;
    }

    let mut report = LoadReport::default();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                report.skip(line, e.to_string());
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() != 2 {
            report.skip(line, format!("expected 2 columns, got {}", record.len()));
            continue;
        }

        let name = &record[0];
        let description = if options.strip_markup {
            strip_markup(&record[1]).into_owned()
        } else {
            record[1].to_string()
        };
        log::debug!("row {line}: '{name}'");
        report.products.push(Product::new(name, description));
    }

    Ok(report)
}

/// Read file and convert to UTF-8 if needed (handles Windows-1252, Latin-1, etc.)
pub fn read_file_as_utf8(path: &Path) -> Result<String, LoadError> {
    let mut file = std::fs::File::open(path).map_err(|e| LoadError::from_io(path, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| LoadError::from_io(path, e))?;

    // Try UTF-8 first; on failure, recover the buffer from the error
    match String::from_utf8(bytes) {
        Ok(s) => Ok(s),
        Err(e) => {
            let bytes = e.into_bytes();
            // Fall back to Windows-1252 (common for Excel-exported CSVs)
            log::debug!("'{}' is not UTF-8, decoding as Windows-1252", path.display());
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            Ok(decoded.into_owned())
        }
    }
}
