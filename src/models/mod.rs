//! Models
//!
//! Two families of value types:
//! - Type descriptions produced by classification (how a declared type is stored)
//! - Engine-agnostic table definitions produced by the relational compiler

pub mod column;
pub mod description;
pub mod enums;
pub mod relationship;
pub mod table;

pub use column::ColumnDefinition;
pub use description::{CompositeDescription, Field, MultiValueDescription, TypeDescription};
pub use enums::*;
pub use relationship::ForeignKey;
pub use table::{RowIdentity, TableDefinition, UniqueConstraint, join_table_name};
