//! HR-side schema: typed descriptors, the static catalog and value rules

pub mod catalog;
pub mod types;
pub mod validation;

pub use types::{
    EndpointDescriptor, FieldDescriptor, FieldType, FilterDescriptor, FilterType, HttpMethod,
    Pagination,
};
