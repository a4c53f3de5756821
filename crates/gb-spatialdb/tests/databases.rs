//! Integration tests for gb-spatialdb through the trait objects used by
//! boundary conditions.

use gb_spatialdb::{
    CoordSys, DbError, PiecewiseLinearHistory, SimpleDb, SpatialDb, TimeHistory, UniformDb,
};
use proptest::prelude::*;

#[test]
fn databases_behind_trait_objects() {
    let mut dbs: Vec<Box<dyn SpatialDb>> = vec![
        Box::new(UniformDb::new("uniform").with_value("displacement-x", 4.0)),
        Box::new({
            let mut db = SimpleDb::new("simple", 2, ["displacement-x"]);
            db.add_location(&[0.0, 0.0], &[4.0]).unwrap();
            db
        }),
    ];

    let cs = CoordSys::cartesian(2);
    for db in dbs.iter_mut() {
        db.open().unwrap();
        db.query_vals(&["displacement-x"]).unwrap();
        let mut v = [0.0];
        db.query(&mut v, &[1.0, 1.0], &cs).unwrap();
        assert_eq!(v, [4.0], "database {}", db.label());
        db.close().unwrap();

        let err = db.query(&mut v, &[1.0, 1.0], &cs).unwrap_err();
        assert!(matches!(err, DbError::NotOpen { .. }));
    }
}

#[test]
fn start_time_queried_separately_from_values() {
    // Rate databases provide both the rate components and the start time.
    let mut db = UniformDb::new("rate")
        .with_value("displacement-rate-x", 0.1)
        .with_value("rate-start-time", 3.0);
    db.open().unwrap();
    let cs = CoordSys::cartesian(1);

    db.query_vals(&["displacement-rate-x"]).unwrap();
    let mut v = [0.0];
    db.query(&mut v, &[0.0], &cs).unwrap();
    assert_eq!(v, [0.1]);

    db.query_vals(&["rate-start-time"]).unwrap();
    db.query(&mut v, &[0.0], &cs).unwrap();
    assert_eq!(v, [3.0]);
}

#[test]
fn history_behind_trait_object() {
    let mut th: Box<dyn TimeHistory> = Box::new(
        PiecewiseLinearHistory::new("step", vec![(0.0, 0.0), (3.0, 0.8), (10.0, 0.8)]).unwrap(),
    );
    th.open().unwrap();
    assert_eq!(th.query(3.0).unwrap(), 0.8);
    assert_eq!(th.label(), "step");
}

proptest! {
    #[test]
    fn interpolated_amplitude_is_bounded(
        amps in prop::collection::vec(-10.0_f64..10.0, 2..8),
        frac in 0.0_f64..1.0,
    ) {
        let points: Vec<(f64, f64)> = amps
            .iter()
            .enumerate()
            .map(|(i, &a)| (i as f64, a))
            .collect();
        let mut th = PiecewiseLinearHistory::new("prop", points).unwrap();
        th.open().unwrap();

        let t_end = (amps.len() - 1) as f64;
        let t = frac * t_end;
        let a = th.query(t).unwrap();

        let i = (t.floor() as usize).min(amps.len() - 2);
        let lo = amps[i].min(amps[i + 1]);
        let hi = amps[i].max(amps[i + 1]);
        prop_assert!(a >= lo - 1e-9 && a <= hi + 1e-9);
    }
}
