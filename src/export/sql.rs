//! SQL exporter for generating CREATE TABLE statements from table definitions.
//!
//! # Security
//!
//! All identifiers (table names, column names) are properly quoted and
//! escaped. Internal quote characters are escaped by doubling them according
//! to SQL standards.

use std::collections::HashSet;

use crate::export::{ExportError, ExportResult};
use crate::models::{ColumnType, DeleteRule, RowIdentity, TableDefinition};
use crate::validation::{TableValidator, creation_order};

/// Exporter for SQL CREATE TABLE format.
pub struct SQLExporter;

impl SQLExporter {
    /// Export a table to a SQL CREATE TABLE statement.
    ///
    /// # Arguments
    ///
    /// * `table` - The table to export
    /// * `dialect` - Optional SQL dialect ("postgres", "mysql", "sqlserver", "sqlite", etc.)
    ///
    /// A synthetic row identity is rendered as an explicit integer primary
    /// key, first in the column list.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stored_schema::export::sql::SQLExporter;
    /// use stored_schema::models::{ColumnDefinition, ColumnType, RowIdentity, TableDefinition};
    ///
    /// let mut table = TableDefinition::entity(
    ///     "users",
    ///     RowIdentity::Synthetic { column: "rowid".to_string() },
    /// );
    /// table.add_column(ColumnDefinition::new("name", ColumnType::Text));
    ///
    /// let sql = SQLExporter::export_table(&table, Some("postgres"));
    /// assert!(sql.starts_with("CREATE TABLE \"users\" (\n  \"rowid\" BIGINT NOT NULL PRIMARY KEY,"));
    /// ```
    pub fn export_table(table: &TableDefinition, dialect: Option<&str>) -> String {
        let dialect = dialect.unwrap_or("standard");
        let mut sql = format!(
            "CREATE TABLE {} (\n",
            Self::quote_identifier(&table.name, dialect)
        );

        let mut definitions = Vec::new();

        if let RowIdentity::Synthetic { column } = &table.row_identity {
            definitions.push(format!(
                "  {} {} NOT NULL PRIMARY KEY",
                Self::quote_identifier(column, dialect),
                Self::type_name(ColumnType::BigInt, dialect)
            ));
        }

        let keyed = Self::key_columns(table);
        for column in &table.columns {
            let type_name = if keyed.contains(column.name.as_str()) {
                Self::key_type_name(column.column_type, dialect)
            } else {
                Self::type_name(column.column_type, dialect)
            };
            let mut col_def = format!(
                "  {} {}",
                Self::quote_identifier(&column.name, dialect),
                type_name
            );

            if !column.nullable {
                col_def.push_str(" NOT NULL");
            }

            if column.primary_key {
                col_def.push_str(" PRIMARY KEY");
            }

            definitions.push(col_def);
        }

        for unique in &table.unique_constraints {
            definitions.push(format!(
                "  UNIQUE ({})",
                Self::quote_list(&unique.columns, dialect)
            ));
        }

        for fk in &table.foreign_keys {
            definitions.push(format!(
                "  FOREIGN KEY ({}) REFERENCES {} ({}) ON DELETE {}",
                Self::quote_identifier(&fk.column, dialect),
                Self::quote_identifier(&fk.references_table, dialect),
                Self::quote_identifier(&fk.references_column, dialect),
                Self::delete_action(fk.on_delete, dialect)
            ));
        }

        sql.push_str(&definitions.join(",\n"));
        sql.push_str("\n);\n");
        sql
    }

    /// Export tables to SQL CREATE TABLE statements, in the given order.
    ///
    /// Fails when two tables share a name, compared case-insensitively.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stored_schema::export::sql::SQLExporter;
    ///
    /// let exporter = SQLExporter;
    /// let result = exporter.export(&[], Some("sqlite")).unwrap();
    /// assert_eq!(result.format, "sql");
    /// ```
    pub fn export(
        &self,
        tables: &[TableDefinition],
        dialect: Option<&str>,
    ) -> Result<ExportResult, ExportError> {
        Self::check_names(tables)?;
        Ok(Self::render(tables.iter(), dialect))
    }

    /// Export tables so that referenced tables are created first.
    ///
    /// Fails when the tables reference each other in a cycle.
    pub fn export_in_creation_order(
        &self,
        tables: &[TableDefinition],
        dialect: Option<&str>,
    ) -> Result<ExportResult, ExportError> {
        Self::check_names(tables)?;
        let ordered =
            creation_order(tables).map_err(|e| ExportError::ValidationError(e.to_string()))?;
        Ok(Self::render(ordered.into_iter(), dialect))
    }

    /// Reject table lists in which two tables share a name
    fn check_names(tables: &[TableDefinition]) -> Result<(), ExportError> {
        match TableValidator::new().detect_naming_conflicts(tables).first() {
            Some(conflict) => Err(ExportError::ValidationError(format!(
                "Table name {} is used by {} and {}",
                conflict.name, conflict.existing, conflict.incoming
            ))),
            None => Ok(()),
        }
    }

    fn render<'a>(
        tables: impl Iterator<Item = &'a TableDefinition>,
        dialect: Option<&str>,
    ) -> ExportResult {
        let mut sql = String::new();
        for table in tables {
            sql.push_str(&Self::export_table(table, dialect));
            sql.push('\n');
        }
        ExportResult {
            content: sql,
            format: "sql".to_string(),
        }
    }

    /// Native type name of a column type.
    fn type_name(column_type: ColumnType, dialect: &str) -> &'static str {
        match dialect {
            "sqlite" => match column_type {
                ColumnType::Boolean
                | ColumnType::SmallInt
                | ColumnType::Integer
                | ColumnType::BigInt => "INTEGER",
                ColumnType::Real | ColumnType::Double => "REAL",
                ColumnType::Text | ColumnType::Uuid => "TEXT",
                ColumnType::Blob => "BLOB",
                ColumnType::Timestamp => "TIMESTAMP",
            },
            "postgres" | "postgresql" => match column_type {
                ColumnType::Boolean => "BOOLEAN",
                ColumnType::SmallInt => "SMALLINT",
                ColumnType::Integer => "INTEGER",
                ColumnType::BigInt => "BIGINT",
                ColumnType::Real => "REAL",
                ColumnType::Double => "DOUBLE PRECISION",
                ColumnType::Text => "TEXT",
                ColumnType::Blob => "BYTEA",
                ColumnType::Timestamp => "TIMESTAMP",
                ColumnType::Uuid => "UUID",
            },
            "mysql" => match column_type {
                ColumnType::Boolean => "BOOLEAN",
                ColumnType::SmallInt => "SMALLINT",
                ColumnType::Integer => "INT",
                ColumnType::BigInt => "BIGINT",
                ColumnType::Real => "FLOAT",
                ColumnType::Double => "DOUBLE",
                ColumnType::Text => "TEXT",
                ColumnType::Blob => "LONGBLOB",
                ColumnType::Timestamp => "DATETIME(6)",
                ColumnType::Uuid => "CHAR(36)",
            },
            "sqlserver" | "mssql" => match column_type {
                ColumnType::Boolean => "BIT",
                ColumnType::SmallInt => "SMALLINT",
                ColumnType::Integer => "INT",
                ColumnType::BigInt => "BIGINT",
                ColumnType::Real => "REAL",
                ColumnType::Double => "FLOAT",
                ColumnType::Text => "NVARCHAR(MAX)",
                ColumnType::Blob => "VARBINARY(MAX)",
                ColumnType::Timestamp => "DATETIME2",
                ColumnType::Uuid => "UNIQUEIDENTIFIER",
            },
            _ => match column_type {
                ColumnType::Boolean => "BOOLEAN",
                ColumnType::SmallInt => "SMALLINT",
                ColumnType::Integer => "INTEGER",
                ColumnType::BigInt => "BIGINT",
                ColumnType::Real => "REAL",
                ColumnType::Double => "DOUBLE PRECISION",
                ColumnType::Text => "TEXT",
                ColumnType::Blob => "BLOB",
                ColumnType::Timestamp => "TIMESTAMP",
                ColumnType::Uuid => "CHAR(36)",
            },
        }
    }

    /// Native type name of a column that is part of an index key.
    ///
    /// MySQL and SQL Server cannot index unbounded text or binary columns.
    fn key_type_name(column_type: ColumnType, dialect: &str) -> &'static str {
        match (dialect, column_type) {
            ("mysql", ColumnType::Text) => "VARCHAR(255)",
            ("mysql", ColumnType::Blob) => "VARBINARY(255)",
            ("sqlserver" | "mssql", ColumnType::Text) => "NVARCHAR(450)",
            ("sqlserver" | "mssql", ColumnType::Blob) => "VARBINARY(900)",
            _ => Self::type_name(column_type, dialect),
        }
    }

    /// Columns used by the primary key, a unique constraint or a foreign key
    fn key_columns(table: &TableDefinition) -> HashSet<&str> {
        let primary = table
            .columns
            .iter()
            .filter(|column| column.primary_key)
            .map(|column| column.name.as_str());
        let unique = table
            .unique_constraints
            .iter()
            .flat_map(|constraint| constraint.columns.iter().map(String::as_str));
        let foreign = table.foreign_keys.iter().map(|fk| fk.column.as_str());
        primary.chain(unique).chain(foreign).collect()
    }

    fn delete_action(rule: DeleteRule, dialect: &str) -> &'static str {
        match (rule, dialect) {
            (DeleteRule::Cascade, _) => "CASCADE",
            (DeleteRule::SetNull, _) => "SET NULL",
            // SQL Server has no RESTRICT
            (DeleteRule::Deny, "sqlserver" | "mssql") => "NO ACTION",
            (DeleteRule::Deny, _) => "RESTRICT",
        }
    }

    fn quote_list(identifiers: &[String], dialect: &str) -> String {
        identifiers
            .iter()
            .map(|identifier| Self::quote_identifier(identifier, dialect))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Quote and escape identifier based on SQL dialect.
    ///
    /// # Dialects
    ///
    /// - **PostgreSQL**: Uses double quotes (`"identifier"`)
    /// - **MySQL**: Uses backticks (`` `identifier` ``)
    /// - **SQL Server**: Uses brackets (`[identifier]`)
    /// - **SQLite** and **Standard SQL**: Use double quotes
    fn quote_identifier(identifier: &str, dialect: &str) -> String {
        match dialect {
            "mysql" => {
                // MySQL uses backticks; escape internal backticks by doubling
                format!("`{}`", identifier.replace('`', "``"))
            }
            "sqlserver" | "mssql" => {
                // SQL Server uses brackets; escape ] by doubling
                format!("[{}]", identifier.replace(']', "]]"))
            }
            _ => format!("\"{}\"", identifier.replace('"', "\"\"")),
        }
    }
}
