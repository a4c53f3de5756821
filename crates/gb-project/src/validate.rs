//! Definition file validation.

use std::collections::HashSet;

use crate::schema::{BcFile, BoundaryConditionDef, MeshDef, ScalesDef, SpatialDbDef, TimeHistoryDef};

const AXES: [&str; 3] = ["x", "y", "z"];

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Spatial database '{db}' does not provide '{name}' needed by {context}")]
    MissingValue {
        db: String,
        name: String,
        context: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_definition(file: &BcFile) -> Result<(), ValidationError> {
    if file.version == 0 || file.version > crate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: file.version,
        });
    }

    validate_scales(&file.scales)?;
    let vertex_ids = validate_mesh(&file.mesh)?;

    let mut bc_ids = HashSet::new();
    for bc in &file.boundary_conditions {
        if !bc_ids.insert(&bc.id) {
            return Err(ValidationError::DuplicateId {
                id: bc.id.clone(),
                context: "boundary_conditions".to_string(),
            });
        }
        validate_bc(bc, file.mesh.space_dim, &vertex_ids)?;
    }

    Ok(())
}

fn validate_scales(scales: &ScalesDef) -> Result<(), ValidationError> {
    let named = [
        ("scales.length_m", scales.length_m),
        ("scales.time_s", scales.time_s),
        ("scales.pressure_pa", scales.pressure_pa),
        ("scales.density_kg_m3", scales.density_kg_m3),
        ("scales.temperature_k", scales.temperature_k),
    ];
    for (field, value) in named {
        if !(value.is_finite() && value > 0.0) {
            return Err(invalid(field, value, "must be finite and positive"));
        }
    }
    Ok(())
}

fn validate_mesh(mesh: &MeshDef) -> Result<HashSet<u32>, ValidationError> {
    if !(1..=3).contains(&mesh.space_dim) {
        return Err(invalid("mesh.space_dim", mesh.space_dim, "must be 1, 2 or 3"));
    }
    let mut ids = HashSet::new();
    for vertex in &mesh.vertices {
        if !ids.insert(vertex.id) {
            return Err(ValidationError::DuplicateId {
                id: vertex.id.to_string(),
                context: "mesh.vertices".to_string(),
            });
        }
        check_coords(
            &format!("mesh.vertices[{}].coords", vertex.id),
            &vertex.coords,
            mesh.space_dim,
        )?;
    }
    Ok(ids)
}

fn check_coords(field: &str, coords: &[f64], space_dim: usize) -> Result<(), ValidationError> {
    if coords.len() != space_dim {
        return Err(invalid(
            field,
            format!("{coords:?}"),
            "coordinate count must match mesh.space_dim",
        ));
    }
    if coords.iter().any(|c| !c.is_finite()) {
        return Err(invalid(field, format!("{coords:?}"), "must be finite"));
    }
    Ok(())
}

fn validate_bc(
    bc: &BoundaryConditionDef,
    space_dim: usize,
    vertex_ids: &HashSet<u32>,
) -> Result<(), ValidationError> {
    let ctx = |what: &str| format!("boundary_conditions[{}].{what}", bc.id);

    if bc.field.trim().is_empty() {
        return Err(invalid(ctx("field"), &bc.field, "must not be empty"));
    }
    if !(bc.value_scale.is_finite() && bc.value_scale > 0.0) {
        return Err(invalid(
            ctx("value_scale"),
            bc.value_scale,
            "must be finite and positive",
        ));
    }
    if bc.dofs.is_empty() {
        return Err(invalid(ctx("dofs"), "[]", "at least one DOF must be constrained"));
    }
    if let Some(&dof) = bc.dofs.iter().find(|&&d| d >= space_dim) {
        return Err(invalid(ctx("dofs"), dof, "DOF does not exist in mesh dimension"));
    }

    let mut points = HashSet::new();
    for &point in &bc.points {
        if !vertex_ids.contains(&point) {
            return Err(ValidationError::MissingReference {
                id: point.to_string(),
                context: ctx("points"),
            });
        }
        if !points.insert(point) {
            return Err(ValidationError::DuplicateId {
                id: point.to_string(),
                context: ctx("points"),
            });
        }
    }

    let value_names: Vec<String> = bc
        .dofs
        .iter()
        .map(|&d| format!("{}-{}", bc.field, AXES[d]))
        .collect();
    let rate_names: Vec<String> = bc
        .dofs
        .iter()
        .map(|&d| format!("{}-rate-{}", bc.field, AXES[d]))
        .collect();

    if let Some(db) = &bc.db_initial {
        validate_db(db, &value_names, space_dim, &ctx("db_initial"))?;
    }
    if let Some(db) = &bc.db_rate {
        let mut names = rate_names;
        names.push("rate-start-time".to_string());
        validate_db(db, &names, space_dim, &ctx("db_rate"))?;
    }
    if let Some(db) = &bc.db_change {
        let mut names = value_names;
        names.push("change-start-time".to_string());
        validate_db(db, &names, space_dim, &ctx("db_change"))?;
    }
    if let Some(th) = &bc.time_history {
        validate_history(th, &ctx("time_history"))?;
    }
    Ok(())
}

fn validate_db(
    db: &SpatialDbDef,
    required: &[String],
    space_dim: usize,
    context: &str,
) -> Result<(), ValidationError> {
    if let Some(name) = required.iter().find(|n| !db.provides(n)) {
        return Err(ValidationError::MissingValue {
            db: db.label().to_string(),
            name: name.clone(),
            context: context.to_string(),
        });
    }
    match db {
        SpatialDbDef::Uniform { values, .. } => {
            if let Some((name, v)) = values.iter().find(|(_, v)| !v.is_finite()) {
                return Err(invalid(format!("{context}.values.{name}"), v, "must be finite"));
            }
        }
        SpatialDbDef::Simple {
            names,
            locations,
            max_distance_m,
            ..
        } => {
            if locations.is_empty() {
                return Err(invalid(
                    format!("{context}.locations"),
                    "[]",
                    "at least one location is required",
                ));
            }
            for (i, loc) in locations.iter().enumerate() {
                check_coords(&format!("{context}.locations[{i}].coords"), &loc.coords, space_dim)?;
                if loc.values.len() != names.len() {
                    return Err(invalid(
                        format!("{context}.locations[{i}].values"),
                        format!("{:?}", loc.values),
                        "value count must match names",
                    ));
                }
            }
            if let Some(d) = max_distance_m.filter(|d| !(d.is_finite() && *d > 0.0)) {
                return Err(invalid(
                    format!("{context}.max_distance_m"),
                    d,
                    "must be finite and positive",
                ));
            }
        }
    }
    Ok(())
}

fn validate_history(th: &TimeHistoryDef, context: &str) -> Result<(), ValidationError> {
    if th.points.is_empty() {
        return Err(invalid(
            format!("{context}.points"),
            "[]",
            "at least one point is required",
        ));
    }
    if !(th.time_unit_s.is_finite() && th.time_unit_s > 0.0) {
        return Err(invalid(
            format!("{context}.time_unit_s"),
            th.time_unit_s,
            "must be finite and positive",
        ));
    }
    if th.points.windows(2).any(|w| w[1][0] <= w[0][0]) {
        return Err(invalid(
            format!("{context}.points"),
            format!("{:?}", th.points),
            "times must be strictly increasing",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{LocationDef, VertexDef};
    use std::collections::BTreeMap;

    fn file() -> BcFile {
        BcFile {
            version: 1,
            name: "test".to_string(),
            scales: ScalesDef::default(),
            mesh: MeshDef {
                space_dim: 2,
                vertices: vec![
                    VertexDef {
                        id: 0,
                        coords: vec![0.0, 0.0],
                    },
                    VertexDef {
                        id: 1,
                        coords: vec![1.0, 0.0],
                    },
                ],
            },
            boundary_conditions: vec![BoundaryConditionDef {
                id: "left".to_string(),
                field: "displacement".to_string(),
                value_scale: 1.0,
                dofs: vec![0],
                points: vec![0, 1],
                db_initial: Some(SpatialDbDef::Uniform {
                    label: "initial".to_string(),
                    values: BTreeMap::from([("displacement-x".to_string(), 1.0)]),
                }),
                db_rate: None,
                db_change: None,
                time_history: None,
            }],
        }
    }

    #[test]
    fn valid_file_passes() {
        validate_definition(&file()).unwrap();
    }

    #[test]
    fn version_checked() {
        let mut f = file();
        f.version = 2;
        assert!(matches!(
            validate_definition(&f),
            Err(ValidationError::UnsupportedVersion { version: 2 })
        ));
    }

    #[test]
    fn unknown_point_rejected() {
        let mut f = file();
        f.boundary_conditions[0].points.push(7);
        assert!(matches!(
            validate_definition(&f),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn dof_outside_dimension_rejected() {
        let mut f = file();
        f.boundary_conditions[0].dofs = vec![2];
        assert!(matches!(
            validate_definition(&f),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn database_must_provide_component_names() {
        let mut f = file();
        f.boundary_conditions[0].dofs = vec![0, 1];
        let err = validate_definition(&f).unwrap_err();
        assert!(err.to_string().contains("displacement-y"));
    }

    #[test]
    fn rate_database_needs_start_time() {
        let mut f = file();
        f.boundary_conditions[0].db_rate = Some(SpatialDbDef::Simple {
            label: "rates".to_string(),
            names: vec!["displacement-rate-x".to_string()],
            locations: vec![LocationDef {
                coords: vec![0.0, 0.0],
                values: vec![1.0],
            }],
            max_distance_m: None,
        });
        let err = validate_definition(&f).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MissingValue { ref name, .. } if name == "rate-start-time"
        ));
    }

    #[test]
    fn history_times_must_increase() {
        let mut f = file();
        f.boundary_conditions[0].time_history = Some(TimeHistoryDef {
            label: "th".to_string(),
            time_unit_s: 1.0,
            points: vec![[0.0, 0.0], [0.0, 1.0]],
        });
        assert!(validate_definition(&f).is_err());
    }

    #[test]
    fn duplicate_bc_ids_rejected() {
        let mut f = file();
        let bc = f.boundary_conditions[0].clone();
        f.boundary_conditions.push(bc);
        assert!(matches!(
            validate_definition(&f),
            Err(ValidationError::DuplicateId { .. })
        ));
    }
}
