//! Column header mapping for KPI sheets

use rimo_core::KpiField;
use std::collections::HashMap;

/// Column positions of the known KPI fields
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    fields: HashMap<KpiField, usize>,
    /// Headers that did not match any known field, with their index
    pub unknown: Vec<(usize, String)>,
}

impl ColumnMapping {
    /// Create a new column mapping by analyzing the header row
    ///
    /// When a field appears twice the first column wins.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let mut mapping = Self::default();

        for (idx, header) in headers.iter().enumerate() {
            let header = header.as_ref();
            match KpiField::from_header(header) {
                Some(field) => {
                    mapping.fields.entry(field).or_insert(idx);
                }
                None if header.trim().is_empty() => {}
                None => mapping.unknown.push((idx, header.trim().to_string())),
            }
        }

        mapping
    }

    /// Column index of `field`
    #[must_use]
    pub fn column(&self, field: KpiField) -> Option<usize> {
        self.fields.get(&field).copied()
    }

    /// Known fields with their column index, in sheet order
    pub fn iter(&self) -> impl Iterator<Item = (KpiField, usize)> + '_ {
        KpiField::ALL
            .into_iter()
            .filter_map(|field| self.column(field).map(|idx| (field, idx)))
    }

    /// Known fields missing from the header row
    #[must_use]
    pub fn missing(&self) -> Vec<KpiField> {
        KpiField::ALL
            .into_iter()
            .filter(|field| self.column(*field).is_none())
            .collect()
    }

    /// Check if the header row looks like a KPI sheet
    #[must_use]
    pub fn is_kpi_sheet(&self) -> bool {
        self.column(KpiField::Indicator).is_some()
    }
}
