//! Searched functions composed from ephemeris observations.
//!
//! Each type pairs an ephemeris query with a rough period and implements
//! [`ScalarFunction`]. Batch evaluation goes through
//! [`Ephemeris::observe_many`] so a backend sees one request per body per grid.

use almanac_time::TimePoint;

use crate::angle::{angular_distance_deg, hour_separation, normalize_to_pm180};
use crate::ephemeris::{Body, Ephemeris, Observation};
use crate::error::SearchError;
use crate::function::ScalarFunction;

/// Which coordinate a separation is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coordinate {
    /// Right ascension, converted to degrees (1h = 15°).
    RightAscension,
    /// Ecliptic longitude in degrees.
    EclipticLongitude,
}

impl Coordinate {
    /// The coordinate of `obs` in degrees.
    pub fn degrees(self, obs: &Observation) -> f64 {
        match self {
            Self::RightAscension => obs.right_ascension_hours * 15.0,
            Self::EclipticLongitude => obs.ecliptic_longitude_deg,
        }
    }
}

/// `normalize_to_pm180(c(body1) - c(body2) - target)` in degrees.
///
/// Zero when the separation equals `target`. Jumps by 360° where the
/// separation is `target + 180°`; the root finder rejects that jump.
pub struct SeparationFunction<'a, E: ?Sized> {
    pub ephemeris: &'a E,
    pub body1: Body,
    pub body2: Body,
    pub target_deg: f64,
    pub coordinate: Coordinate,
    pub rough_period_days: f64,
}

impl<E: Ephemeris + ?Sized> SeparationFunction<'_, E> {
    fn value(&self, o1: &Observation, o2: &Observation) -> f64 {
        normalize_to_pm180(
            self.coordinate.degrees(o1) - self.coordinate.degrees(o2) - self.target_deg,
        )
    }
}

impl<E: Ephemeris + ?Sized> ScalarFunction for SeparationFunction<'_, E> {
    fn rough_period(&self) -> f64 {
        self.rough_period_days
    }

    fn evaluate(&self, t: TimePoint) -> Result<f64, SearchError> {
        let o1 = self.ephemeris.observe(self.body1, t)?;
        let o2 = self.ephemeris.observe(self.body2, t)?;
        Ok(self.value(&o1, &o2))
    }

    fn evaluate_many(&self, times: &[TimePoint]) -> Result<Vec<f64>, SearchError> {
        let o1 = self.ephemeris.observe_many(self.body1, times)?;
        let o2 = self.ephemeris.observe_many(self.body2, times)?;
        Ok(o1.iter().zip(&o2).map(|(a, b)| self.value(a, b)).collect())
    }
}

/// A single observed quantity of one body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Ecliptic longitude in degrees, wrapping at 360°.
    EclipticLongitude,
    /// Distance in km.
    Distance,
}

/// One quantity of one body as a function of time.
pub struct BodyFunction<'a, E: ?Sized> {
    pub ephemeris: &'a E,
    pub body: Body,
    pub quantity: Quantity,
    pub rough_period_days: f64,
}

impl<E: Ephemeris + ?Sized> BodyFunction<'_, E> {
    fn value(&self, obs: &Observation) -> f64 {
        match self.quantity {
            Quantity::EclipticLongitude => obs.ecliptic_longitude_deg,
            Quantity::Distance => obs.distance_km,
        }
    }
}

impl<E: Ephemeris + ?Sized> ScalarFunction for BodyFunction<'_, E> {
    fn rough_period(&self) -> f64 {
        self.rough_period_days
    }

    fn evaluate(&self, t: TimePoint) -> Result<f64, SearchError> {
        let obs = self.ephemeris.observe(self.body, t)?;
        Ok(self.value(&obs))
    }

    fn evaluate_many(&self, times: &[TimePoint]) -> Result<Vec<f64>, SearchError> {
        let obs = self.ephemeris.observe_many(self.body, times)?;
        Ok(obs.iter().map(|o| self.value(o)).collect())
    }
}

/// Great-circle distance between two bodies, in degrees.
pub struct AngularDistanceFunction<'a, E: ?Sized> {
    pub ephemeris: &'a E,
    pub body1: Body,
    pub body2: Body,
    pub rough_period_days: f64,
}

fn great_circle(o1: &Observation, o2: &Observation) -> f64 {
    angular_distance_deg(
        o1.right_ascension_hours,
        o1.declination_deg,
        o2.right_ascension_hours,
        o2.declination_deg,
    )
}

impl<E: Ephemeris + ?Sized> ScalarFunction for AngularDistanceFunction<'_, E> {
    fn rough_period(&self) -> f64 {
        self.rough_period_days
    }

    fn evaluate(&self, t: TimePoint) -> Result<f64, SearchError> {
        let o1 = self.ephemeris.observe(self.body1, t)?;
        let o2 = self.ephemeris.observe(self.body2, t)?;
        Ok(great_circle(&o1, &o2))
    }

    fn evaluate_many(&self, times: &[TimePoint]) -> Result<Vec<f64>, SearchError> {
        let o1 = self.ephemeris.observe_many(self.body1, times)?;
        let o2 = self.ephemeris.observe_many(self.body2, times)?;
        Ok(o1.iter().zip(&o2).map(|(a, b)| great_circle(a, b)).collect())
    }
}

/// Right-ascension separation of two bodies in hours, folded into [0, 12].
pub struct HourSeparationFunction<'a, E: ?Sized> {
    pub ephemeris: &'a E,
    pub body1: Body,
    pub body2: Body,
    pub rough_period_days: f64,
}

impl<E: Ephemeris + ?Sized> ScalarFunction for HourSeparationFunction<'_, E> {
    fn rough_period(&self) -> f64 {
        self.rough_period_days
    }

    fn evaluate(&self, t: TimePoint) -> Result<f64, SearchError> {
        let o1 = self.ephemeris.observe(self.body1, t)?;
        let o2 = self.ephemeris.observe(self.body2, t)?;
        Ok(hour_separation(o1.right_ascension_hours, o2.right_ascension_hours))
    }

    fn evaluate_many(&self, times: &[TimePoint]) -> Result<Vec<f64>, SearchError> {
        let o1 = self.ephemeris.observe_many(self.body1, times)?;
        let o2 = self.ephemeris.observe_many(self.body2, times)?;
        Ok(o1
            .iter()
            .zip(&o2)
            .map(|(a, b)| hour_separation(a.right_ascension_hours, b.right_ascension_hours))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::ephemeris::EphemerisError;

    /// Body RA advances 1h/day, everything else fixed. Counts batch calls.
    struct Linear {
        batches: Cell<u32>,
    }

    impl Ephemeris for Linear {
        fn observe(&self, body: Body, t: TimePoint) -> Result<Observation, EphemerisError> {
            let ra = match body {
                Body::Star(s) => s.ra_hours,
                _ => t.jd().rem_euclid(24.0),
            };
            Ok(Observation {
                right_ascension_hours: ra,
                declination_deg: 0.0,
                distance_km: 1.0e6 + t.jd(),
                ecliptic_longitude_deg: ra * 15.0,
                ecliptic_latitude_deg: 0.0,
            })
        }

        fn observe_many(
            &self,
            body: Body,
            times: &[TimePoint],
        ) -> Result<Vec<Observation>, EphemerisError> {
            self.batches.set(self.batches.get() + 1);
            times.iter().map(|&t| self.observe(body, t)).collect()
        }
    }

    const STAR: Body = Body::Star(crate::ephemeris::FixedStar {
        name: "Test",
        ra_hours: 6.0,
        dec_deg: 0.0,
    });

    #[test]
    fn separation_in_ra_degrees() {
        let eph = Linear { batches: Cell::new(0) };
        let f = SeparationFunction {
            ephemeris: &eph,
            body1: Body::Moon,
            body2: STAR,
            target_deg: 0.0,
            coordinate: Coordinate::RightAscension,
            rough_period_days: 24.0,
        };
        // RA 8h vs 6h → 30°
        let y = f.evaluate(TimePoint::from_jd(8.0)).expect("ok");
        assert!((y - 30.0).abs() < 1e-9);
        // RA 20h vs 6h → 210° → -150°
        let y = f.evaluate(TimePoint::from_jd(20.0)).expect("ok");
        assert!((y + 150.0).abs() < 1e-9);
    }

    #[test]
    fn batch_uses_one_request_per_body() {
        let eph = Linear { batches: Cell::new(0) };
        let f = AngularDistanceFunction {
            ephemeris: &eph,
            body1: Body::Moon,
            body2: STAR,
            rough_period_days: 24.0,
        };
        let times: Vec<TimePoint> = (0..10).map(|i| TimePoint::from_jd(i as f64)).collect();
        let ys = f.evaluate_many(&times).expect("ok");
        assert_eq!(ys.len(), 10);
        assert_eq!(eph.batches.get(), 2);
        // RA 0h vs 6h on the equator → 90°
        assert!((ys[0] - 90.0).abs() < 1e-9);
    }

    #[test]
    fn body_quantities() {
        let eph = Linear { batches: Cell::new(0) };
        let dist = BodyFunction {
            ephemeris: &eph,
            body: Body::Mars,
            quantity: Quantity::Distance,
            rough_period_days: 10.0,
        };
        assert_eq!(dist.evaluate(TimePoint::from_jd(5.0)).expect("ok"), 1.0e6 + 5.0);
        let lon = BodyFunction {
            quantity: Quantity::EclipticLongitude,
            ..dist
        };
        assert_eq!(lon.evaluate(TimePoint::from_jd(2.0)).expect("ok"), 30.0);
    }

    #[test]
    fn hour_separation_folds() {
        let eph = Linear { batches: Cell::new(0) };
        let f = HourSeparationFunction {
            ephemeris: &eph,
            body1: Body::Moon,
            body2: STAR,
            rough_period_days: 24.0,
        };
        assert!((f.evaluate(TimePoint::from_jd(23.0)).expect("ok") - 7.0).abs() < 1e-9);
    }
}
