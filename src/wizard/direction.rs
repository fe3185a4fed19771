//! Integration direction and the source/target orientation it implies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which system is the data source for an integration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationDirection {
    #[default]
    ZenhrToExternal,
    ExternalToZenhr,
    Bidirectional,
}

/// One side of an integration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Hr,
    External,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Hr => "ZenHR",
            Side::External => "External System",
        }
    }
}

impl IntegrationDirection {
    pub const ALL: [IntegrationDirection; 3] = [
        IntegrationDirection::ZenhrToExternal,
        IntegrationDirection::ExternalToZenhr,
        IntegrationDirection::Bidirectional,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IntegrationDirection::ZenhrToExternal => "zenhr_to_external",
            IntegrationDirection::ExternalToZenhr => "external_to_zenhr",
            IntegrationDirection::Bidirectional => "bidirectional",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            IntegrationDirection::ZenhrToExternal => "ZenHR to External System",
            IntegrationDirection::ExternalToZenhr => "External System to ZenHR",
            IntegrationDirection::Bidirectional => "Bidirectional",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            IntegrationDirection::ZenhrToExternal => {
                "Export data from ZenHR into another system"
            }
            IntegrationDirection::ExternalToZenhr => {
                "Import data from another system into ZenHR"
            }
            IntegrationDirection::Bidirectional => "Keep data in sync between both systems",
        }
    }

    /// Side whose fields appear as mapping sources
    pub fn source(&self) -> Side {
        match self {
            IntegrationDirection::ExternalToZenhr => Side::External,
            _ => Side::Hr,
        }
    }

    /// Side whose fields appear as mapping targets
    pub fn target(&self) -> Side {
        match self.source() {
            Side::Hr => Side::External,
            Side::External => Side::Hr,
        }
    }

    /// Whether the displayed source column is the external system
    pub fn is_reversed(&self) -> bool {
        self.source() == Side::External
    }
}

impl fmt::Display for IntegrationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntegrationDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "zenhr_to_external" | "export" => Ok(IntegrationDirection::ZenhrToExternal),
            "external_to_zenhr" | "import" => Ok(IntegrationDirection::ExternalToZenhr),
            "bidirectional" | "sync" => Ok(IntegrationDirection::Bidirectional),
            other => Err(format!("unknown direction '{}'", other)),
        }
    }
}
