//! The external side of an integration: system descriptor and field list

pub mod fields;
pub mod import;
pub mod system;

pub use fields::ExternalFields;
pub use import::{import_fields, import_into, ImportError, ImportFormat, ImportReport};
pub use system::{AuthKind, ExternalAuth, ExternalSystem};
