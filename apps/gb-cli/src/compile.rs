//! Build runtime boundary conditions from a definition file.

use gb_bc::{BoundaryMesh, PointMesh, Physics, TimeDependentPoints};
use gb_core::units::s;
use gb_core::{Normalizer, PointId};
use gb_project::{BcFile, BoundaryConditionDef, SpatialDbDef, TimeHistoryDef};
use gb_spatialdb::{CoordSys, PiecewiseLinearHistory, SimpleDb, SpatialDb, TimeHistory, UniformDb};
use tracing::info;

use crate::error::{CliError, CliResult};

/// A boundary condition ready for evaluation.
pub struct CompiledBc<'f> {
    pub def: &'f BoundaryConditionDef,
    pub normalizer: Normalizer,
    pub bc: TimeDependentPoints,
}

/// Mesh with coordinates nondimensionalized by the length scale.
pub fn build_mesh(file: &BcFile, normalizer: &Normalizer) -> CliResult<PointMesh> {
    let mut mesh = PointMesh::new(CoordSys::cartesian(file.mesh.space_dim));
    for vertex in &file.mesh.vertices {
        let mut coords = vertex.coords.clone();
        normalizer.nondimensionalize(&mut coords, normalizer.length_scale());
        mesh.add_point(PointId::from_index(vertex.id), &coords)?;
    }
    Ok(mesh)
}

/// Configure and set up the boundary condition `bc_id`.
pub fn compile<'f>(file: &'f BcFile, bc_id: &str) -> CliResult<CompiledBc<'f>> {
    let def = file
        .boundary_condition(bc_id)
        .ok_or_else(|| CliError::UnknownBc {
            id: bc_id.to_string(),
        })?;
    let normalizer = file.scales.to_normalizer()?;
    let mesh = build_mesh(file, &normalizer)?;

    let mut bc = TimeDependentPoints::new(&def.id, Physics::new(normalizer));
    bc.set_points(def.points.iter().copied().map(PointId::from_index).collect());
    bc.set_bc_dof(&def.dofs)?;
    bc.set_db_initial(def.db_initial.as_ref().map(|db| build_db(db, &mesh)).transpose()?);
    bc.set_db_rate(def.db_rate.as_ref().map(|db| build_db(db, &mesh)).transpose()?);
    bc.set_db_change(def.db_change.as_ref().map(|db| build_db(db, &mesh)).transpose()?);
    bc.set_db_time_history(def.time_history.as_ref().map(build_history).transpose()?);

    bc.verify_configuration(&mesh)?;
    bc.setup_parameters(&mesh, def.value_scale, &def.field)?;
    info!(bc = %def.id, points = def.points.len(), "compiled boundary condition");

    Ok(CompiledBc {
        def,
        normalizer,
        bc,
    })
}

fn build_db(def: &SpatialDbDef, mesh: &PointMesh) -> CliResult<Box<dyn SpatialDb>> {
    match def {
        SpatialDbDef::Uniform { label, values } => {
            let db = values
                .iter()
                .fold(UniformDb::new(label.clone()), |db, (name, &v)| {
                    db.with_value(name.clone(), v)
                });
            Ok(Box::new(db))
        }
        SpatialDbDef::Simple {
            label,
            names,
            locations,
            max_distance_m,
        } => {
            let mut db = SimpleDb::new(label.clone(), mesh.space_dim(), names.iter().cloned());
            if let Some(d) = *max_distance_m {
                db = db.with_max_distance(d);
            }
            for loc in locations {
                db.add_location(&loc.coords, &loc.values)?;
            }
            Ok(Box::new(db))
        }
    }
}

fn build_history(def: &TimeHistoryDef) -> CliResult<Box<dyn TimeHistory>> {
    let points = def.points.iter().map(|&[t, a]| (t, a)).collect();
    let history = PiecewiseLinearHistory::with_time_unit(def.label.clone(), points, s(def.time_unit_s))?;
    Ok(Box::new(history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gb_project::{LocationDef, MeshDef, ScalesDef, VertexDef};
    use std::collections::BTreeMap;

    fn file() -> BcFile {
        BcFile {
            version: 1,
            name: "cli".to_string(),
            scales: ScalesDef {
                length_m: 1000.0,
                time_s: 10.0,
                ..ScalesDef::default()
            },
            mesh: MeshDef {
                space_dim: 2,
                vertices: vec![
                    VertexDef {
                        id: 0,
                        coords: vec![0.0, 0.0],
                    },
                    VertexDef {
                        id: 1,
                        coords: vec![2000.0, 0.0],
                    },
                ],
            },
            boundary_conditions: vec![BoundaryConditionDef {
                id: "edge".to_string(),
                field: "displacement".to_string(),
                value_scale: 1000.0,
                dofs: vec![0],
                points: vec![1, 0],
                db_initial: Some(SpatialDbDef::Simple {
                    label: "initial".to_string(),
                    names: vec!["displacement-x".to_string()],
                    locations: vec![
                        LocationDef {
                            coords: vec![0.0, 0.0],
                            values: vec![500.0],
                        },
                        LocationDef {
                            coords: vec![2000.0, 0.0],
                            values: vec![1500.0],
                        },
                    ],
                    max_distance_m: Some(10.0),
                }),
                db_rate: Some(SpatialDbDef::Uniform {
                    label: "rate".to_string(),
                    values: BTreeMap::from([
                        ("displacement-rate-x".to_string(), 100.0),
                        ("rate-start-time".to_string(), 0.0),
                    ]),
                }),
                db_change: None,
                time_history: None,
            }],
        }
    }

    #[test]
    fn mesh_is_nondimensional() {
        let f = file();
        let n = f.scales.to_normalizer().unwrap();
        let mesh = build_mesh(&f, &n).unwrap();
        assert_eq!(mesh.coordinates(PointId::from_index(1)), Some(&[2.0, 0.0][..]));
    }

    #[test]
    fn compiled_values_in_physical_units() {
        let f = file();
        let mut compiled = compile(&f, "edge").unwrap();
        // 20 s = 2 time units; rate 100 m/s
        let values = compiled.bc.calculate_value(2.0).unwrap().dimensionalized();
        assert_eq!(values, vec![1500.0 + 2000.0, 500.0 + 2000.0]);
    }

    #[test]
    fn unknown_bc_reported() {
        let f = file();
        assert!(matches!(
            compile(&f, "nope"),
            Err(CliError::UnknownBc { .. })
        ));
    }
}
