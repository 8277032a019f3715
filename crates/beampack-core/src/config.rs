//! beampack.toml configuration parser.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PackError, PackResult};

/// Beams per compute node used by the MeerTRAP cluster.
pub const DEFAULT_BUNCH: usize = 6;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeampackConfig {
    pub packing: PackingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackingConfig {
    /// Beams per node.
    pub bunch: usize,
    /// Multicast group id given to node 0.
    pub multicast_base: u32,
    /// Only pack the first `max_beams` catalog records.
    pub max_beams: Option<usize>,
    pub strategy: Strategy,
    /// Strip width for [`Strategy::Strips`], in catalog coordinate units.
    pub strip_width: Option<f64>,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            bunch: DEFAULT_BUNCH,
            multicast_base: 0,
            max_beams: None,
            strategy: Strategy::default(),
            strip_width: None,
        }
    }
}

impl PackingConfig {
    /// Check every field and return the bunch size.
    pub fn validate(&self) -> PackResult<NonZeroUsize> {
        let bunch = NonZeroUsize::new(self.bunch)
            .ok_or_else(|| PackError::Config("bunch must be at least 1".to_string()))?;

        if self.max_beams == Some(0) {
            return Err(PackError::Config(
                "max_beams must be at least 1 when set".to_string(),
            ));
        }

        if let Some(width) = self.strip_width {
            if !width.is_finite() || width <= 0.0 {
                return Err(PackError::Config(format!(
                    "strip_width must be a positive number, got {width}"
                )));
            }
        }

        Ok(bunch)
    }
}

/// How the partitioner orders beams before cutting them into groups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Hilbert space-filling curve index.
    #[default]
    Hilbert,
    /// Z-order (bit-interleaved) index.
    Morton,
    /// Boustrophedon walk over fixed-width strips.
    Strips,
    /// Greedy nearest-neighbour packing around successive seed beams.
    Greedy,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Hilbert,
        Strategy::Morton,
        Strategy::Strips,
        Strategy::Greedy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Hilbert => "hilbert",
            Strategy::Morton => "morton",
            Strategy::Strips => "strips",
            Strategy::Greedy => "greedy",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                PackError::Config(format!(
                    "unknown strategy `{s}` (expected hilbert, morton, strips or greedy)"
                ))
            })
    }
}

impl BeampackConfig {
    pub fn from_file(path: &Path) -> PackResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| PackError::NotFound {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> PackResult<Self> {
        toml::from_str(content).map_err(|e| PackError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> PackResult<String> {
        toml::to_string_pretty(self).map_err(|e| PackError::Config(e.to_string()))
    }

    /// Scaffold a beampack.toml with every default spelled out.
    pub fn scaffold() -> Self {
        Self::default()
    }
}
