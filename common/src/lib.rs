//! Tool Library Common Library
//!
//! CLIが使う型とユーティリティ。入出力は持たない。
//!
//! シートCSV → パース → 正規化 → 索引構築 → 検索 → HTML生成

pub mod types;
pub mod error;
pub mod parser;
pub mod normalizer;
pub mod fuzzy;
pub mod index;
pub mod query;
pub mod render;

pub use types::{InventoryRecord, LastChecked, Provenance, RawRow, NOT_AVAILABLE};
pub use error::{Error, Result};
pub use parser::{parse_sheet, ParseIssue, ParsedSheet};
pub use normalizer::{capitalize, coerce_date, normalize_inventory, SheetSchema, MATERIAL_SCHEMA, TOOL_SCHEMA};
pub use index::Inventory;
pub use query::{run_query, search_term, SearchHit, SearchOptions};
pub use render::{render_results, render_rows, DisplayRow, HEADER_LABELS};
