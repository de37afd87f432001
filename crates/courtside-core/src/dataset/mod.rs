// Dataset layer: CSV frame, numeric normalization, typed schema, loading.

pub mod frame;
pub mod loader;
pub mod normalize;
pub mod schema;

pub use frame::{Column, Frame};
pub use loader::{DataSource, Dataset, DatasetError};
pub use normalize::TypeConversionError;
pub use schema::{Decade, PlayerRecord, PlayerTable, Position, SchemaError};
