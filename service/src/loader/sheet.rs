//! CSV reader turning KPI sheet exports into [`KpiRecord`]s

use super::columns::ColumnMapping;
use super::source::SheetSource;
use csv::{ReaderBuilder, StringRecord, Trim};
use rimo_core::utils::clean_cell;
use rimo_core::{KpiField, KpiRecord, Result, RimoError};
use tracing::{debug, info, warn};

/// Options for reading a KPI sheet
#[derive(Debug, Clone)]
pub struct SheetOptions {
    /// Data rows right below the header that are skipped
    ///
    /// The curated sheet uses them for column explanations.
    pub skip_rows: usize,

    /// Field delimiter (default: ',')
    pub delimiter: u8,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            skip_rows: 2,
            delimiter: b',',
        }
    }
}

/// Reader for KPI sheets in CSV form
#[derive(Debug, Clone, Default)]
pub struct SheetReader {
    options: SheetOptions,
}

impl SheetReader {
    /// Create a reader with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom options
    #[must_use]
    pub fn with_options(options: SheetOptions) -> Self {
        Self { options }
    }

    /// Set the number of explanation rows to skip
    #[must_use]
    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.options.skip_rows = skip_rows;
        self
    }

    /// Fetch and parse a sheet
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be fetched or is not a KPI sheet.
    pub async fn load(&self, source: &dyn SheetSource) -> Result<Vec<KpiRecord>> {
        let location = source.describe();
        let content = source.fetch().await?;
        let records = self.parse_str(&content, &location)?;
        info!("Read {} KPI records from {}", records.len(), location);
        Ok(records)
    }

    /// Parse CSV text
    ///
    /// `location` is only used in diagnostics.
    ///
    /// # Errors
    ///
    /// Returns `RimoError::ParseError` if the CSV is malformed or has no
    /// `Indicator` column.
    pub fn parse_str(&self, content: &str, location: &str) -> Result<Vec<KpiRecord>> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| RimoError::parse_at(format!("Failed to read header row: {e}"), location))?
            .clone();
        let headers: Vec<&str> = headers.iter().collect();
        let mapping = ColumnMapping::from_headers(&headers);

        if !mapping.is_kpi_sheet() {
            return Err(RimoError::parse_at(
                format!("no '{}' column in header row", KpiField::Indicator.header()),
                location,
            ));
        }
        for (idx, header) in &mapping.unknown {
            debug!("Ignoring column {} '{}'", idx + 1, header);
        }
        for field in mapping.missing() {
            debug!("Column '{}' not present", field);
        }

        let mut records = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            // Header is sheet row 1
            let row = idx + 2;
            let record = result.map_err(|e| {
                RimoError::parse_at(format!("Malformed CSV record: {e}"), format!("{location}:{row}"))
            })?;

            if idx < self.options.skip_rows {
                debug!("Skipping explanation row {}", row);
                continue;
            }

            match Self::parse_record(&record, &mapping, row) {
                Some(kpi) => records.push(kpi),
                None if record.iter().all(|cell| cell.trim().is_empty()) => {}
                None => warn!("Row {} has no indicator name, skipping", row),
            }
        }

        Ok(records)
    }

    fn parse_record(record: &StringRecord, mapping: &ColumnMapping, row: usize) -> Option<KpiRecord> {
        let cell = |field: KpiField| {
            mapping
                .column(field)
                .and_then(|idx| record.get(idx))
                .unwrap_or("")
        };

        let indicator = clean_cell(cell(KpiField::Indicator))?;
        let mut kpi = KpiRecord::new(row, indicator);
        for (field, _) in mapping.iter() {
            if field != KpiField::Indicator {
                kpi.set_field(field, cell(field));
            }
        }
        Some(kpi)
    }
}
