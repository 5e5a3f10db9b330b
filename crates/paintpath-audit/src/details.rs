//! Audit result shape: score, summary line and the flagged-resource table.
//!
//! Rendering is someone else's job; everything here is plain serde data.

use serde::Serialize;

use crate::selector::ResultEntry;

/// Savings below this keep an "average" score.
pub const WASTED_MS_FOR_AVERAGE: f64 = 300.0;
/// Savings below this keep a "poor" score; anything above scores zero.
pub const WASTED_MS_FOR_POOR: f64 = 750.0;

pub fn score_for_wasted_ms(wasted_ms: f64) -> f64 {
    if wasted_ms <= 0.0 {
        1.0
    } else if wasted_ms < WASTED_MS_FOR_AVERAGE {
        0.9
    } else if wasted_ms < WASTED_MS_FOR_POOR {
        0.65
    } else {
        0.0
    }
}

/// One-line summary, e.g. `2 resources delayed first paint by 340ms`.
/// Empty when nothing was flagged.
pub fn display_value(item_count: usize, wasted_ms: f64) -> String {
    let ms = wasted_ms.round() as u64;
    match item_count {
        0 => String::new(),
        1 => format!("1 resource delayed first paint by {ms}ms"),
        n => format!("{n} resources delayed first paint by {ms}ms"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    Url,
    Bytes,
    Ms,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableHeading {
    pub key: &'static str,
    pub item_type: ItemType,
    pub text: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_unit: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub granularity: Option<f64>,
}

/// Columns of the flagged-resource table.
pub fn table_headings() -> Vec<TableHeading> {
    vec![
        TableHeading {
            key: "url",
            item_type: ItemType::Url,
            text: "URL",
            display_unit: None,
            granularity: None,
        },
        TableHeading {
            key: "totalBytes",
            item_type: ItemType::Bytes,
            text: "Size (KB)",
            display_unit: Some("kb"),
            granularity: Some(0.01),
        },
        TableHeading {
            key: "wastedMs",
            item_type: ItemType::Ms,
            text: "Download Time (ms)",
            display_unit: None,
            granularity: Some(1.0),
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub wasted_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableDetails {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub headings: Vec<TableHeading>,
    pub items: Vec<ResultEntry>,
    pub summary: TableSummary,
}

impl TableDetails {
    pub fn new(items: Vec<ResultEntry>, wasted_ms: f64) -> Self {
        Self {
            kind: "table",
            headings: table_headings(),
            items,
            summary: TableSummary { wasted_ms },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub display_value: String,
    pub score: f64,
    /// Aggregate savings in milliseconds
    pub raw_value: f64,
    pub details: TableDetails,
}

impl AuditResult {
    pub fn new(results: Vec<ResultEntry>, wasted_ms: f64) -> Self {
        Self {
            display_value: display_value(results.len(), wasted_ms),
            score: score_for_wasted_ms(wasted_ms),
            raw_value: wasted_ms,
            details: TableDetails::new(results, wasted_ms),
        }
    }
}
