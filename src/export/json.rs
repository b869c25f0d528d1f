//! JSON exporter for table definitions

use serde::Serialize;
use uuid::Uuid;

use crate::export::{ExportError, ExportResult};
use crate::models::TableDefinition;

/// Exporter for JSON table definitions.
pub struct JSONExporter;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TableDocument<'a> {
    id: Uuid,
    #[serde(flatten)]
    table: &'a TableDefinition,
}

#[derive(Serialize)]
struct TablesDocument<'a> {
    tables: Vec<TableDocument<'a>>,
}

impl JSONExporter {
    /// Export tables as a pretty-printed `{"tables": [...]}` document.
    ///
    /// Each table carries its deterministic id.
    pub fn export(&self, tables: &[TableDefinition]) -> Result<ExportResult, ExportError> {
        let document = TablesDocument {
            tables: tables
                .iter()
                .map(|table| TableDocument {
                    id: table.table_id(),
                    table,
                })
                .collect(),
        };
        Ok(ExportResult {
            content: serde_json::to_string_pretty(&document)?,
            format: "json".to_string(),
        })
    }
}
