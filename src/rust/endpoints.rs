use std::fmt;

use clap::ValueEnum;

/// Classifier endpoints hosted by the Aurora SDG project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum BuiltinEndpoint {
    /// Multi-label model, one model for all goals. Fast.
    #[default]
    #[value(name = "fast")]
    AuroraSdgMulti,
    /// One model per goal. Slower but more precise.
    #[value(name = "slow")]
    AuroraSdg,
}

/// Static description of a classifier endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointInfo {
    pub name: &'static str,
    pub url: &'static str,
    pub description: &'static str,
}

impl BuiltinEndpoint {
    pub fn get_endpoint_info(&self) -> EndpointInfo {
        match self {
            BuiltinEndpoint::AuroraSdgMulti => EndpointInfo {
                name: "aurora-sdg-multi",
                url: "https://aurora-sdg.labs.vu.nl/classifier/classify/aurora-sdg-multi",
                description: "Fast Model (aurora-sdg-multi)",
            },
            BuiltinEndpoint::AuroraSdg => EndpointInfo {
                name: "aurora-sdg",
                url: "https://aurora-sdg.labs.vu.nl/classifier/classify/aurora-sdg",
                description: "Slow Model (aurora-sdg)",
            },
        }
    }

    pub fn url(&self) -> &'static str {
        self.get_endpoint_info().url
    }
}

impl fmt::Display for BuiltinEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get_endpoint_info().description)
    }
}
