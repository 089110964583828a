use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Pipeline topology, fixed at process start.
///
/// SingleBucket vets objects in place in the landing bucket. DualBucket
/// additionally promotes clean objects into a separate ingest bucket that the
/// retrieval corpus reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeploymentMode {
    SingleBucket,
    DualBucket,
}

impl DeploymentMode {
    /// The exact string used in configuration and audit records.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentMode::SingleBucket => "SingleBucket",
            DeploymentMode::DualBucket => "DualBucket",
        }
    }
}

impl Display for DeploymentMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeploymentMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "singlebucket" => Ok(DeploymentMode::SingleBucket),
            "dualbucket" => Ok(DeploymentMode::DualBucket),
            _ => Err(anyhow::anyhow!("Invalid deployment mode: {}", s)),
        }
    }
}
