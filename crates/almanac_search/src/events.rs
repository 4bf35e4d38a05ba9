//! Event searches over an [`Ephemeris`].
//!
//! Each search builds a searched function from ephemeris observations, hands
//! it to one of the finders, and classifies what comes back:
//!
//! - conjunctions, oppositions, aspects: roots of the wrapped separation
//! - stations: extrema of ecliptic longitude
//! - apsides: extrema of distance
//! - elongations: extrema of angular distance from the Sun
//! - Ptolemaic aspects: sign changes of the RA separation rate
//! - moon phases, solar terms: the 90° or 15° sector a longitude is in

use almanac_time::TimePoint;

use crate::angle::{angular_distance_deg, normalize_to_360, normalize_to_pm180};
use crate::critical::find_critical_points;
use crate::discrete::find_discrete;
use crate::ephemeris::{Body, Ephemeris};
use crate::error::SearchError;
use crate::events_types::{
    ApsisConfig, ApsisEvent, ApsisType, ConjunctionConfig, ConjunctionEvent, ElongationConfig,
    ElongationEvent, ElongationSide, ElongationType, ExtremumKind, MoonPhase, MoonPhaseConfig,
    MoonPhaseEvent, PtolemaicAspect, PtolemaicConfig, PtolemaicEvent, SOLAR_TERM_COUNT,
    SolarTermConfig, SolarTermEvent, StationType, StationaryConfig, StationaryEvent,
    classify_extremum,
};
use crate::function::{Derivative, DiscreteFunction, ScalarFunction};
use crate::observables::{
    AngularDistanceFunction, BodyFunction, Coordinate, HourSeparationFunction, Quantity,
    SeparationFunction,
};
use crate::root::find_roots;

/// Find every instant in `[start, end]` at which `body1` and `body2` reach
/// the configured separation.
pub fn search_conjunctions<E>(
    eph: &E,
    body1: Body,
    body2: Body,
    start: TimePoint,
    end: TimePoint,
    config: &ConjunctionConfig,
) -> Result<Vec<ConjunctionEvent>, SearchError>
where
    E: Ephemeris + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    if body1 == body2 {
        return Err(SearchError::InvalidConfig("body1 and body2 must differ"));
    }

    let f = SeparationFunction {
        ephemeris: eph,
        body1,
        body2,
        target_deg: config.target_separation_deg,
        coordinate: config.coordinate,
        rough_period_days: config.rough_period_days,
    };

    let roots = find_roots(start, end, &f, &config.root)?;
    let mut events = Vec::with_capacity(roots.len());
    for root in roots {
        let o1 = eph.observe(body1, root.time)?;
        let o2 = eph.observe(body2, root.time)?;
        events.push(ConjunctionEvent {
            time: root.time,
            body1,
            body2,
            target_separation_deg: config.target_separation_deg,
            residual_deg: root.value,
            angular_distance_deg: angular_distance_deg(
                o1.right_ascension_hours,
                o1.declination_deg,
                o2.right_ascension_hours,
                o2.declination_deg,
            ),
        });
    }
    Ok(events)
}

fn validate_stationary_body(body: Body) -> Result<(), SearchError> {
    match body {
        Body::Sun | Body::Moon => Err(SearchError::InvalidConfig(
            "Sun and Moon have no stationary points",
        )),
        Body::Star(_) => Err(SearchError::InvalidConfig("fixed stars have no stationary points")),
        _ => Ok(()),
    }
}

/// Find stations of a planet in `[start, end]`.
pub fn search_stationary<E>(
    eph: &E,
    body: Body,
    start: TimePoint,
    end: TimePoint,
    config: &StationaryConfig,
) -> Result<Vec<StationaryEvent>, SearchError>
where
    E: Ephemeris + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    validate_stationary_body(body)?;

    let f = BodyFunction {
        ephemeris: eph,
        body,
        quantity: Quantity::EclipticLongitude,
        rough_period_days: config.rough_period_days,
    };

    let extrema = find_critical_points(start, end, &f, &config.critical)?;
    Ok(extrema
        .iter()
        .map(|e| StationaryEvent {
            time: e.center(),
            body,
            longitude_deg: normalize_to_360(e.value()),
            station_type: match classify_extremum(e) {
                ExtremumKind::Maximum => StationType::StationRetrograde,
                ExtremumKind::Minimum => StationType::StationDirect,
            },
        })
        .collect())
}

/// Find perigees and apogees of `body` in `[start, end]`.
pub fn search_apsides<E>(
    eph: &E,
    body: Body,
    start: TimePoint,
    end: TimePoint,
    config: &ApsisConfig,
) -> Result<Vec<ApsisEvent>, SearchError>
where
    E: Ephemeris + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    if body.is_star() {
        return Err(SearchError::InvalidConfig("fixed stars have no apsides"));
    }

    let f = BodyFunction {
        ephemeris: eph,
        body,
        quantity: Quantity::Distance,
        rough_period_days: config.rough_period_days,
    };

    let extrema = find_critical_points(start, end, &f, &config.critical)?;
    Ok(extrema
        .iter()
        .map(|e| ApsisEvent {
            time: e.center(),
            body,
            distance_km: e.value(),
            apsis_type: match classify_extremum(e) {
                ExtremumKind::Minimum => ApsisType::Perigee,
                ExtremumKind::Maximum => ApsisType::Apogee,
            },
        })
        .collect())
}

/// Find greatest and least elongations of `body` from the Sun.
pub fn search_elongations<E>(
    eph: &E,
    body: Body,
    start: TimePoint,
    end: TimePoint,
    config: &ElongationConfig,
) -> Result<Vec<ElongationEvent>, SearchError>
where
    E: Ephemeris + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    if body == Body::Sun || body.is_star() {
        return Err(SearchError::InvalidConfig(
            "elongation needs a solar-system body other than the Sun",
        ));
    }

    let f = AngularDistanceFunction {
        ephemeris: eph,
        body1: body,
        body2: Body::Sun,
        rough_period_days: config.rough_period_days,
    };

    let extrema = find_critical_points(start, end, &f, &config.critical)?;
    let mut events = Vec::with_capacity(extrema.len());
    for e in &extrema {
        let obs = eph.observe(body, e.center())?;
        let sun = eph.observe(Body::Sun, e.center())?;
        let side = if normalize_to_pm180(obs.ecliptic_longitude_deg - sun.ecliptic_longitude_deg)
            > 0.0
        {
            ElongationSide::East
        } else {
            ElongationSide::West
        };
        events.push(ElongationEvent {
            time: e.center(),
            body,
            elongation_deg: e.value(),
            elongation_type: match classify_extremum(e) {
                ExtremumKind::Maximum => ElongationType::Greatest,
                ExtremumKind::Minimum => ElongationType::Least,
            },
            side,
        });
    }
    Ok(events)
}

/// State 1 while `f` is positive, 0 otherwise.
struct Positive<F>(F);

impl<F: ScalarFunction> DiscreteFunction for Positive<F> {
    fn rough_period(&self) -> f64 {
        self.0.rough_period()
    }

    fn evaluate(&self, t: TimePoint) -> Result<i64, SearchError> {
        Ok(i64::from(self.0.evaluate(t)? > 0.0))
    }

    fn evaluate_many(&self, times: &[TimePoint]) -> Result<Vec<i64>, SearchError> {
        Ok(self
            .0
            .evaluate_many(times)?
            .into_iter()
            .map(|v| i64::from(v > 0.0))
            .collect())
    }
}

/// Find conjunctions and oppositions of `other` to `base` in right ascension.
///
/// The events are the turning points of the RA separation folded into
/// [0, 12] hours, so a pair that never reaches 0h or 12h still produces its
/// closest and farthest approaches.
pub fn search_ptolemaic_aspects<E>(
    eph: &E,
    base: Body,
    other: Body,
    start: TimePoint,
    end: TimePoint,
    config: &PtolemaicConfig,
) -> Result<Vec<PtolemaicEvent>, SearchError>
where
    E: Ephemeris + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;
    if base == other {
        return Err(SearchError::InvalidConfig("base and other must differ"));
    }

    let separation = HourSeparationFunction {
        ephemeris: eph,
        body1: base,
        body2: other,
        rough_period_days: config.rough_period_days,
    };
    let increasing = Positive(Derivative::new(separation, config.derivative_step_days)?);

    let changes = find_discrete(start, end, &increasing, &config.discrete)?;
    Ok(changes
        .iter()
        .map(|c| PtolemaicEvent {
            time: c.time,
            base,
            other,
            aspect: if c.current == 1 {
                PtolemaicAspect::Conjunction
            } else {
                PtolemaicAspect::Opposition
            },
        })
        .collect())
}

/// Index of the `width_deg` sector of [0, 360) that `angle` falls in.
struct Sector<F> {
    angle: F,
    width_deg: f64,
    count: i64,
}

impl<F> Sector<F> {
    fn index(&self, deg: f64) -> i64 {
        ((normalize_to_360(deg) / self.width_deg).floor() as i64).rem_euclid(self.count)
    }
}

impl<F: ScalarFunction> DiscreteFunction for Sector<F> {
    fn rough_period(&self) -> f64 {
        self.angle.rough_period()
    }

    fn evaluate(&self, t: TimePoint) -> Result<i64, SearchError> {
        Ok(self.index(self.angle.evaluate(t)?))
    }

    fn evaluate_many(&self, times: &[TimePoint]) -> Result<Vec<i64>, SearchError> {
        Ok(self
            .angle
            .evaluate_many(times)?
            .into_iter()
            .map(|deg| self.index(deg))
            .collect())
    }
}

/// Find new moons, first quarters, full moons and last quarters in
/// `[start, end]`.
///
/// A phase begins when the Moon-minus-Sun ecliptic longitude enters its
/// quadrant.
pub fn search_moon_phases<E>(
    eph: &E,
    start: TimePoint,
    end: TimePoint,
    config: &MoonPhaseConfig,
) -> Result<Vec<MoonPhaseEvent>, SearchError>
where
    E: Ephemeris + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;

    let quadrant = Sector {
        angle: SeparationFunction {
            ephemeris: eph,
            body1: Body::Moon,
            body2: Body::Sun,
            target_deg: 0.0,
            coordinate: Coordinate::EclipticLongitude,
            rough_period_days: config.rough_period_days,
        },
        width_deg: 90.0,
        count: 4,
    };

    let changes = find_discrete(start, end, &quadrant, &config.discrete)?;
    Ok(changes
        .iter()
        .map(|c| MoonPhaseEvent {
            time: c.time,
            phase: MoonPhase::from_quadrant(c.current),
        })
        .collect())
}

/// Find the instants in `[start, end]` at which the Sun's ecliptic longitude
/// crosses a multiple of 15°.
pub fn search_solar_terms<E>(
    eph: &E,
    start: TimePoint,
    end: TimePoint,
    config: &SolarTermConfig,
) -> Result<Vec<SolarTermEvent>, SearchError>
where
    E: Ephemeris + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;

    let term = Sector {
        angle: BodyFunction {
            ephemeris: eph,
            body: Body::Sun,
            quantity: Quantity::EclipticLongitude,
            rough_period_days: config.rough_period_days,
        },
        width_deg: 15.0,
        count: i64::from(SOLAR_TERM_COUNT),
    };

    let changes = find_discrete(start, end, &term, &config.discrete)?;
    let mut events = Vec::with_capacity(changes.len());
    for c in changes {
        let term_index = u8::try_from(c.current)
            .map_err(|_| SearchError::Evaluation(format!("solar term {} out of range", c.current)))?;
        events.push(SolarTermEvent {
            time: c.time,
            term_index,
            longitude_deg: f64::from(term_index) * 15.0,
        });
    }
    Ok(events)
}
