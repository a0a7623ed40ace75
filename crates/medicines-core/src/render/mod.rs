//! List rendering with data-quality annotations.
//!
//! Pipeline: raw entries → shape check → name/price validation →
//! duplicate detection → rows + quality summary.

mod markup;

pub use markup::*;

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::models::{Medicine, NameValidation, PriceValidation};
use crate::validation::{validate_name, validate_price};

/// One rendered list row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MedicineRow {
    pub name: NameValidation,
    pub price: PriceValidation,
    /// Whether the name, price or duplicate check flagged anything
    pub has_issues: bool,
    /// Hover text listing every issue
    pub tooltip: String,
    /// Server-side name used by the edit/delete actions; `None` when the
    /// record has no string name to address it by
    pub key: Option<String>,
}

impl MedicineRow {
    fn new(name: NameValidation, price: PriceValidation, key: Option<String>) -> Self {
        let has_issues = name.has_issue || price.has_issue;
        let tooltip = if has_issues {
            let mut issues = Vec::new();
            if let Some(issue) = name.issue.as_deref().filter(|_| name.has_issue) {
                issues.push(format!("Name: {}", issue));
            }
            if let Some(issue) = price.issue.as_deref().filter(|_| price.has_issue) {
                issues.push(format!("Price: {}", issue));
            }
            format!("Data Quality Issues:\n{}", issues.join("\n"))
        } else {
            "Data quality: Good".to_string()
        };

        Self {
            name,
            price,
            has_issues,
            tooltip,
            key,
        }
    }

    /// Row-level CSS class.
    pub fn quality_class(&self) -> &'static str {
        if self.has_issues {
            "data-issues"
        } else {
            "data-clean"
        }
    }
}

/// Aggregate data-quality figures for one render pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct QualitySummary {
    /// Rendered records
    pub total: usize,
    /// Records with no issue on either field and no duplicate flag
    pub valid: usize,
    /// Entries skipped because they were not objects
    pub skipped: usize,
    /// Distinct names (case-insensitive) that appeared more than once
    pub duplicate_names: usize,
    /// round(100 × valid / total), 0 when nothing was rendered
    pub percentage: u32,
}

/// Output of [`render_medicines`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum RenderedList {
    /// The server returned no entries
    Empty,
    Rows {
        rows: Vec<MedicineRow>,
        summary: QualitySummary,
    },
}

impl RenderedList {
    pub fn rows(&self) -> &[MedicineRow] {
        match self {
            RenderedList::Empty => &[],
            RenderedList::Rows { rows, .. } => rows,
        }
    }

    pub fn summary(&self) -> Option<&QualitySummary> {
        match self {
            RenderedList::Empty => None,
            RenderedList::Rows { summary, .. } => Some(summary),
        }
    }
}

/// State of the list container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ListView {
    /// A list fetch is in flight
    #[default]
    Loading,
    Loaded(RenderedList),
    /// The last fetch failed; `retry` offers the user a retry action
    Failed { message: String, retry: bool },
}

/// Share of valid records, rounded half up to a whole percent.
pub fn quality_percentage(valid: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((valid as f64 / total as f64) * 100.0).round() as u32
}

/// Render raw list entries into rows and a quality summary.
///
/// Every record whose name (trimmed, case-insensitive) occurs more than once
/// is flagged as a duplicate, including the first occurrence.
///
/// Entries that are not JSON objects are skipped with a warning and counted
/// in `skipped` only; they are neither valid nor part of `total`.
pub fn render_medicines(entries: &[Value]) -> RenderedList {
    if entries.is_empty() {
        return RenderedList::Empty;
    }

    let mut summary = QualitySummary::default();
    let mut records = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let Some(record) = entry.as_object() else {
            warn!(index, entry = %entry, "medicine entry is not a valid object; skipping");
            summary.skipped += 1;
            continue;
        };
        let raw_name = record.get("name").unwrap_or(&Value::Null);
        records.push((record, raw_name, validate_name(raw_name)));
    }

    let mut name_counts: HashMap<String, usize> = HashMap::new();
    for (_, _, name) in records.iter().filter(|(_, _, n)| !n.is_placeholder()) {
        *name_counts.entry(Medicine::match_key(&name.value)).or_default() += 1;
    }

    let mut rows = Vec::with_capacity(records.len());
    let mut duplicate_names: HashSet<String> = HashSet::new();

    for (record, raw_name, mut name) in records {
        summary.total += 1;

        if !name.is_placeholder() {
            let key = Medicine::match_key(&name.value);
            if name_counts.get(&key).copied().unwrap_or(0) > 1 {
                name.flag_duplicate();
                duplicate_names.insert(key);
            }
        }

        let price = validate_price(record.get("price").unwrap_or(&Value::Null));

        if !name.has_issue && !price.has_issue {
            summary.valid += 1;
        }

        let key = raw_name.as_str().map(str::to_string);
        rows.push(MedicineRow::new(name, price, key));
    }

    summary.duplicate_names = duplicate_names.len();
    summary.percentage = quality_percentage(summary.valid, summary.total);

    RenderedList::Rows { rows, summary }
}
