//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod catalog;
pub mod error;
pub mod facts;
pub mod identifiers;
pub mod key_action;
pub mod page;
pub mod sort;

// Re-export for convenience
pub use catalog::{ReadingLog, ReadingLogEntry, Work};
pub use error::{AppError, AuthError, CatalogError, ExportError};
pub use facts::{AuthorFact, RatingFact, SubjectFact, UNKNOWN};
pub use identifiers::{InvalidWorkId, WorkId};
pub use key_action::KeyAction;
pub use page::{InvalidPageSize, PageSize, PageSpec};
pub use sort::{SortDirection, SortField, SortSpec};
