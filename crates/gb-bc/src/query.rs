//! Reading boundary parameters from spatial databases.

use gb_core::{Normalizer, PointId, Real};
use gb_spatialdb::{CoordSys, SpatialDb};
use tracing::{debug, info, warn};

use crate::error::{BcError, BcResult};
use crate::field::{FieldRole, ParameterField, ParameterStore, PointLayout, TimedField};
use crate::mesh::BoundaryMesh;
use crate::points::TimeDependentPoints;

const RATE_START_TIME: &str = "rate-start-time";
const CHANGE_START_TIME: &str = "change-start-time";

/// Everything a database query needs besides the database itself.
struct QueryContext<'a> {
    /// Dimensional coordinates, `space_dim` values per boundary point.
    coords: Vec<Real>,
    cs: &'a CoordSys,
    normalizer: Normalizer,
    field_name: &'a str,
    num_dof: usize,
    num_points: usize,
}

impl<'a> QueryContext<'a> {
    fn new(
        points: &[PointId],
        mesh: &'a dyn BoundaryMesh,
        normalizer: Normalizer,
        field_name: &'a str,
        num_dof: usize,
    ) -> BcResult<Self> {
        let cs = mesh.coordsys();
        let mut coords = Vec::with_capacity(points.len() * cs.space_dim());
        for &point in points {
            let xyz = mesh
                .coordinates(point)
                .ok_or(BcError::MissingPoint { point })?;
            coords.extend_from_slice(xyz);
        }
        normalizer.dimensionalize(&mut coords, normalizer.length_scale());
        Ok(Self {
            coords,
            cs,
            normalizer,
            field_name,
            num_dof,
            num_points: points.len(),
        })
    }

    fn field(&self, role: FieldRole, num_dof: usize, scale: Real) -> ParameterField {
        ParameterField::new(role, role.label(self.field_name), num_dof, self.num_points, scale)
    }

    /// Query an amount and its start time from the same database.
    fn query_timed(
        &self,
        db: &mut dyn SpatialDb,
        amount_role: FieldRole,
        amount_names: &[String],
        amount_scale: Real,
        time_role: FieldRole,
        time_name: &str,
    ) -> BcResult<TimedField> {
        let mut amount = self.field(amount_role, self.num_dof, amount_scale);
        let mut start_time = self.field(time_role, 1, self.normalizer.time_scale());
        let time_names = [time_name.to_string()];
        with_open_db(db, |db| {
            self.query_db(db, amount_names, &mut amount)?;
            self.query_db(db, &time_names, &mut start_time)
        })?;
        Ok(TimedField::new(amount, start_time))
    }

    /// Select `names` in `db` and fill `field` at every boundary point.
    ///
    /// Values are nondimensionalized with the field's scale.
    fn query_db(
        &self,
        db: &mut dyn SpatialDb,
        names: &[String],
        field: &mut ParameterField,
    ) -> BcResult<()> {
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        db.query_vals(&names)?;

        let role = field.role();
        let scale = field.scale();
        for (i, xyz) in self.coords.chunks_exact(self.cs.space_dim()).enumerate() {
            let values = field.point_mut(i);
            db.query(values, xyz, self.cs)
                .map_err(|source| BcError::SetupQuery {
                    role,
                    coords: xyz.to_vec(),
                    db_label: db.label().to_string(),
                    source,
                })?;
            self.normalizer.nondimensionalize(values, scale);
        }
        debug!(
            db = db.label(),
            field = field.label(),
            points = self.num_points,
            "queried spatial database"
        );
        Ok(())
    }
}

impl TimeDependentPoints {
    /// Query the configured databases and rebuild the parameter store.
    ///
    /// `value_scale` converts the boundary values to physical units; rates
    /// use `value_scale / time_scale`. Value names are
    /// `"<field_name>-<axis>"` and `"<field_name>-rate-<axis>"` for the
    /// constrained axes, in selection order. Rate and change databases also
    /// provide `"rate-start-time"` and `"change-start-time"`.
    ///
    /// Each database is opened, queried and closed in turn (initial, rate,
    /// change). A time history is opened afterwards and stays open.
    ///
    /// # Errors
    ///
    /// Returns [`BcError::SetupQuery`] if a point query fails, naming the
    /// field, location and database. The previous store is discarded
    /// and no new one is installed.
    ///
    /// Returns [`BcError::Database`] if a database cannot be opened or
    /// lacks a requested name. With no constrained DOFs, any configured
    /// initial, rate or change database fails this way with
    /// [`DbError::NoQueryValues`](gb_spatialdb::DbError::NoQueryValues).
    pub fn setup_parameters(
        &mut self,
        mesh: &dyn BoundaryMesh,
        value_scale: Real,
        field_name: &str,
    ) -> BcResult<()> {
        self.parameters = None;

        let normalizer = *self.physics.normalizer();
        let rate_scale = value_scale / normalizer.time_scale();
        let num_dof = self.bc_dof.len();

        let layout = PointLayout::new(self.points.clone())?;
        let ctx = QueryContext::new(&self.points, mesh, normalizer, field_name, num_dof)?;
        let value_names = self.bc_dof.component_names(&format!("{field_name}-"));
        let rate_names = self.bc_dof.component_names(&format!("{field_name}-rate-"));

        let mut store = ParameterStore::new(layout, num_dof, value_scale);

        if let Some(db) = self.db_initial.as_deref_mut() {
            let mut initial = ctx.field(FieldRole::Initial, num_dof, value_scale);
            with_open_db(db, |db| ctx.query_db(db, &value_names, &mut initial))?;
            store.set_initial(initial);
        }

        if let Some(db) = self.db_rate.as_deref_mut() {
            let rate = ctx.query_timed(
                db,
                FieldRole::Rate,
                &rate_names,
                rate_scale,
                FieldRole::RateTime,
                RATE_START_TIME,
            )?;
            store.set_rate(rate);
        }

        if let Some(db) = self.db_change.as_deref_mut() {
            let change = ctx.query_timed(
                db,
                FieldRole::Change,
                &value_names,
                value_scale,
                FieldRole::ChangeTime,
                CHANGE_START_TIME,
            )?;
            store.set_change(change);

            if let Some(th) = self.db_time_history.as_deref_mut() {
                th.open()?;
                debug!(bc = %self.label, db = th.label(), "opened time history");
            }
        } else if self.db_time_history.is_some() {
            warn!(
                bc = %self.label,
                "time history is set without a change database and will be ignored"
            );
        }

        info!(
            bc = %self.label,
            field = field_name,
            points = self.points.len(),
            dofs = num_dof,
            initial = store.initial().is_some(),
            rate = store.rate().is_some(),
            change = store.change().is_some(),
            "boundary parameters set up"
        );
        self.parameters = Some(store);
        Ok(())
    }
}

/// Run `f` on an open database, closing it afterwards even if `f` fails.
fn with_open_db<T>(
    db: &mut dyn SpatialDb,
    f: impl FnOnce(&mut dyn SpatialDb) -> BcResult<T>,
) -> BcResult<T> {
    db.open()?;
    debug!(db = db.label(), "opened spatial database");
    let result = f(&mut *db);
    match (result, db.close()) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(close)) => Err(close.into()),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close)) => {
            warn!(db = db.label(), error = %close, "closing spatial database failed");
            Err(err)
        }
    }
}
