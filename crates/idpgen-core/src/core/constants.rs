use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Immutable bond-geometry parameters shared by every chain build.
///
/// Bond lengths are in Angstroms, bend angles in radians. The defaults are
/// statistical averages over high-resolution crystal structures; a subset (or
/// all) of the fields may be overridden from a TOML table, with unspecified
/// fields falling back to the defaults.
///
/// One value is constructed at startup and passed by shared reference into the
/// geometry kernel and the chain builder; it is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BondGeometryConstants {
    /// N-CA bond length within a residue.
    pub bond_n_ca: f64,
    /// CA-C bond length within a residue.
    pub bond_ca_c: f64,
    /// C-N bond length across the peptide bond to the next residue.
    pub bond_c_n: f64,
    /// C-O carbonyl bond length.
    pub bond_c_o: f64,
    /// N-CA-C bend angle.
    pub angle_n_ca_c: f64,
    /// CA-C-N bend angle (to the next residue's N).
    pub angle_ca_c_n: f64,
    /// C-N-CA bend angle (from the previous residue's C).
    pub angle_c_n_ca: f64,
    /// CA-C-O carbonyl bend angle.
    pub angle_ca_c_o: f64,
    /// N-C-O carbonyl bend angle (next residue's N).
    pub angle_n_c_o: f64,
}

impl Default for BondGeometryConstants {
    fn default() -> Self {
        Self {
            bond_n_ca: 1.458,
            bond_ca_c: 1.525,
            bond_c_n: 1.329,
            bond_c_o: 1.231,
            angle_n_ca_c: 111.2f64.to_radians(),
            angle_ca_c_n: 116.2f64.to_radians(),
            angle_c_n_ca: 121.7f64.to_radians(),
            angle_ca_c_o: 120.8f64.to_radians(),
            angle_n_c_o: 123.0f64.to_radians(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConstantsLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl BondGeometryConstants {
    /// Loads constants from a TOML file, applying defaults for absent fields.
    pub fn load(path: &Path) -> Result<Self, ConstantsLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConstantsLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConstantsLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}
