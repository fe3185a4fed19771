//! Saved configurations and where they live

pub mod saved;
pub mod store;

pub use saved::{demo_configurations, SavedConfiguration};
pub use store::{
    export_configuration, import_configuration, write_json_atomic, ConfigStore, FileStore,
    MemoryStore,
};
