//! Per-point parameter storage.
//!
//! Every parameter field stores a fixed number of scalars per boundary
//! point in one contiguous buffer. The [`PointLayout`] maps a point ID to
//! its position in the boundary point sequence, so the slice for point `i`
//! is `values[i * num_dof..(i + 1) * num_dof]` in every field.

use core::fmt;
use std::collections::HashMap;

use gb_core::{PointId, Real};

use crate::error::{BcError, BcResult};

/// Role of a parameter field in the boundary condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Value,
    Initial,
    Rate,
    RateTime,
    Change,
    ChangeTime,
}

impl FieldRole {
    /// Field name, as used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Initial => "initial",
            Self::Rate => "rate",
            Self::RateTime => "rate time",
            Self::Change => "change",
            Self::ChangeTime => "change time",
        }
    }

    /// Output label for the field of a boundary condition on `field_name`.
    pub fn label(self, field_name: &str) -> String {
        match self {
            Self::Value => "value".to_string(),
            Self::Initial => format!("initial_{field_name}"),
            Self::Rate => format!("rate_{field_name}"),
            Self::RateTime => format!("rate_time_{field_name}"),
            Self::Change => format!("change_{field_name}"),
            Self::ChangeTime => format!("change_time_{field_name}"),
        }
    }

    /// Time fields hold one scalar per point.
    pub fn is_time(self) -> bool {
        matches!(self, Self::RateTime | Self::ChangeTime)
    }
}

impl fmt::Display for FieldRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How the components of a field are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorFieldKind {
    Scalar,
    Other,
}

/// Ordered boundary points with O(1) lookup of a point's position.
#[derive(Debug, Clone, Default)]
pub struct PointLayout {
    points: Vec<PointId>,
    index: HashMap<PointId, usize>,
}

impl PointLayout {
    /// # Errors
    ///
    /// Returns error if a point appears more than once.
    pub fn new(points: Vec<PointId>) -> BcResult<Self> {
        let mut index = HashMap::with_capacity(points.len());
        for (i, &p) in points.iter().enumerate() {
            if index.insert(p, i).is_some() {
                return Err(BcError::InvalidArg {
                    what: format!("boundary point {p} is listed more than once"),
                });
            }
        }
        Ok(Self { points, index })
    }

    pub fn points(&self) -> &[PointId] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Position of `point` in the boundary point sequence.
    pub fn index_of(&self, point: PointId) -> Option<usize> {
        self.index.get(&point).copied()
    }
}

/// Nondimensional per-point values of one parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterField {
    role: FieldRole,
    label: String,
    kind: VectorFieldKind,
    scale: Real,
    num_dof: usize,
    num_points: usize,
    values: Vec<Real>,
}

impl ParameterField {
    /// Zero-initialized field with `num_dof` values per point.
    pub fn new(
        role: FieldRole,
        label: impl Into<String>,
        num_dof: usize,
        num_points: usize,
        scale: Real,
    ) -> Self {
        let kind = if role.is_time() {
            VectorFieldKind::Scalar
        } else {
            VectorFieldKind::Other
        };
        Self {
            role,
            label: label.into(),
            kind,
            scale,
            num_dof,
            num_points,
            values: vec![0.0; num_dof * num_points],
        }
    }

    pub fn role(&self) -> FieldRole {
        self.role
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> VectorFieldKind {
        self.kind
    }

    /// Scale that converts stored values to physical units.
    pub fn scale(&self) -> Real {
        self.scale
    }

    pub fn num_dof(&self) -> usize {
        self.num_dof
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }

    /// Values of the point at position `i`.
    pub fn point(&self, i: usize) -> &[Real] {
        &self.values[i * self.num_dof..(i + 1) * self.num_dof]
    }

    pub fn point_mut(&mut self, i: usize) -> &mut [Real] {
        &mut self.values[i * self.num_dof..(i + 1) * self.num_dof]
    }

    pub fn values(&self) -> &[Real] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [Real] {
        &mut self.values
    }

    pub fn zero(&mut self) {
        self.values.fill(0.0);
    }

    /// Values in physical units.
    pub fn dimensionalized(&self) -> Vec<Real> {
        self.values.iter().map(|v| v * self.scale).collect()
    }
}

/// A contribution that starts at a per-point time: the amount (`rate` or
/// `change`) and its start time.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedField {
    amount: ParameterField,
    start_time: ParameterField,
}

impl TimedField {
    /// # Panics
    ///
    /// Panics if the start-time field does not hold exactly one value per
    /// point of `amount`.
    pub fn new(amount: ParameterField, start_time: ParameterField) -> Self {
        assert_eq!(start_time.num_dof(), 1, "start time must have 1 DOF per point");
        assert_eq!(
            start_time.num_points(),
            amount.num_points(),
            "start time and amount must cover the same points"
        );
        Self { amount, start_time }
    }

    pub fn amount(&self) -> &ParameterField {
        &self.amount
    }

    pub fn start_time(&self) -> &ParameterField {
        &self.start_time
    }

    /// Start time of the point at position `i`.
    pub fn start(&self, i: usize) -> Real {
        self.start_time.values()[i]
    }
}

/// Read-only inputs to an evaluation, borrowed alongside the mutable
/// `value` field.
#[derive(Clone, Copy)]
pub(crate) struct Contributions<'a> {
    pub initial: Option<&'a ParameterField>,
    pub rate: Option<&'a TimedField>,
    pub change: Option<&'a TimedField>,
}

/// All parameter fields of one boundary condition.
#[derive(Debug, Clone)]
pub struct ParameterStore {
    layout: PointLayout,
    value: ParameterField,
    initial: Option<ParameterField>,
    rate: Option<TimedField>,
    change: Option<TimedField>,
}

impl ParameterStore {
    /// Store with only the (zeroed) `value` field allocated.
    pub fn new(layout: PointLayout, num_dof: usize, value_scale: Real) -> Self {
        let value = ParameterField::new(
            FieldRole::Value,
            FieldRole::Value.label(""),
            num_dof,
            layout.len(),
            value_scale,
        );
        Self {
            layout,
            value,
            initial: None,
            rate: None,
            change: None,
        }
    }

    pub fn layout(&self) -> &PointLayout {
        &self.layout
    }

    pub fn num_dof(&self) -> usize {
        self.value.num_dof()
    }

    pub fn value(&self) -> &ParameterField {
        &self.value
    }

    pub fn initial(&self) -> Option<&ParameterField> {
        self.initial.as_ref()
    }

    pub fn rate(&self) -> Option<&TimedField> {
        self.rate.as_ref()
    }

    pub fn change(&self) -> Option<&TimedField> {
        self.change.as_ref()
    }

    /// Field by role, if allocated.
    pub fn get(&self, role: FieldRole) -> Option<&ParameterField> {
        match role {
            FieldRole::Value => Some(&self.value),
            FieldRole::Initial => self.initial.as_ref(),
            FieldRole::Rate => self.rate.as_ref().map(TimedField::amount),
            FieldRole::RateTime => self.rate.as_ref().map(TimedField::start_time),
            FieldRole::Change => self.change.as_ref().map(TimedField::amount),
            FieldRole::ChangeTime => self.change.as_ref().map(TimedField::start_time),
        }
    }

    /// Values of field `role` at `point`.
    pub fn point_values(&self, role: FieldRole, point: PointId) -> Option<&[Real]> {
        let i = self.layout.index_of(point)?;
        self.get(role).map(|f| f.point(i))
    }

    pub(crate) fn set_initial(&mut self, initial: ParameterField) {
        self.check_matches_value(&initial);
        self.initial = Some(initial);
    }

    pub(crate) fn set_rate(&mut self, rate: TimedField) {
        self.check_matches_value(rate.amount());
        self.rate = Some(rate);
    }

    pub(crate) fn set_change(&mut self, change: TimedField) {
        self.check_matches_value(change.amount());
        self.change = Some(change);
    }

    pub(crate) fn split_value_mut(&mut self) -> (&mut ParameterField, Contributions<'_>) {
        (
            &mut self.value,
            Contributions {
                initial: self.initial.as_ref(),
                rate: self.rate.as_ref(),
                change: self.change.as_ref(),
            },
        )
    }

    fn check_matches_value(&self, field: &ParameterField) {
        assert_eq!(
            field.num_dof(),
            self.value.num_dof(),
            "'{}' must have the same DOF count as 'value'",
            field.role()
        );
        assert_eq!(
            field.num_points(),
            self.value.num_points(),
            "'{}' must cover the same points as 'value'",
            field.role()
        );
    }
}
