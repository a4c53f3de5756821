//! Definition file schema.
//!
//! All quantities in a definition file are dimensional (SI units). The
//! `scales` section gives the reference scales used to nondimensionalize
//! them.

use std::collections::BTreeMap;

use gb_core::units::{k, kg_per_m3, m, pa, s};
use gb_core::{GbResult, Normalizer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BcFile {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub scales: ScalesDef,
    pub mesh: MeshDef,
    #[serde(default)]
    pub boundary_conditions: Vec<BoundaryConditionDef>,
}

impl BcFile {
    pub fn boundary_condition(&self, id: &str) -> Option<&BoundaryConditionDef> {
        self.boundary_conditions.iter().find(|bc| bc.id == id)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScalesDef {
    #[serde(default = "unit")]
    pub length_m: f64,
    #[serde(default = "unit")]
    pub time_s: f64,
    #[serde(default = "unit")]
    pub pressure_pa: f64,
    #[serde(default = "unit")]
    pub density_kg_m3: f64,
    #[serde(default = "unit")]
    pub temperature_k: f64,
}

fn unit() -> f64 {
    1.0
}

impl Default for ScalesDef {
    fn default() -> Self {
        Self {
            length_m: 1.0,
            time_s: 1.0,
            pressure_pa: 1.0,
            density_kg_m3: 1.0,
            temperature_k: 1.0,
        }
    }
}

impl ScalesDef {
    /// # Errors
    ///
    /// Returns error if a scale is not finite and positive.
    pub fn to_normalizer(&self) -> GbResult<Normalizer> {
        Normalizer::new(
            m(self.length_m),
            pa(self.pressure_pa),
            s(self.time_s),
            kg_per_m3(self.density_kg_m3),
            k(self.temperature_k),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshDef {
    pub space_dim: usize,
    #[serde(default)]
    pub vertices: Vec<VertexDef>,
}

/// Mesh vertex with coordinates in meters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VertexDef {
    pub id: u32,
    pub coords: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundaryConditionDef {
    pub id: String,
    /// Name of the constrained field, e.g. `displacement`.
    pub field: String,
    /// Scale of the field's values, e.g. the length scale for displacement.
    #[serde(default = "unit")]
    pub value_scale: f64,
    /// Constrained components: 0 = x, 1 = y, 2 = z.
    pub dofs: Vec<usize>,
    /// Vertex IDs the condition applies to.
    pub points: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_initial: Option<SpatialDbDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_rate: Option<SpatialDbDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_change: Option<SpatialDbDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_history: Option<TimeHistoryDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SpatialDbDef {
    /// Same values everywhere.
    Uniform {
        label: String,
        values: BTreeMap<String, f64>,
    },
    /// Values at scattered locations; queries use the nearest location.
    Simple {
        label: String,
        names: Vec<String>,
        locations: Vec<LocationDef>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_distance_m: Option<f64>,
    },
}

impl SpatialDbDef {
    pub fn label(&self) -> &str {
        match self {
            Self::Uniform { label, .. } | Self::Simple { label, .. } => label,
        }
    }

    /// Whether the database provides a value called `name`.
    pub fn provides(&self, name: &str) -> bool {
        match self {
            Self::Uniform { values, .. } => values.contains_key(name),
            Self::Simple { names, .. } => names.iter().any(|n| n == name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocationDef {
    pub coords: Vec<f64>,
    pub values: Vec<f64>,
}

/// Piecewise linear amplitude curve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeHistoryDef {
    pub label: String,
    /// Seconds per time unit used in `points`.
    #[serde(default = "unit")]
    pub time_unit_s: f64,
    /// `[time, amplitude]` pairs with strictly increasing times.
    pub points: Vec<[f64; 2]>,
}
