//! Event searches against an analytic mock ephemeris.
//!
//! The mock puts every body on circular or sinusoidal motion in a frame where
//! the ecliptic and the equator coincide, so event times have closed forms.

use std::cell::Cell;
use std::f64::consts::PI;

use almanac_search::{
    ApsisConfig, ApsisType, Body, ConjunctionConfig, Coordinate, ElongationConfig,
    ElongationSide, ElongationType, Ephemeris, EphemerisError, MoonPhase, MoonPhaseConfig,
    Observation, PtolemaicAspect, PtolemaicConfig, REGULUS, SearchError, SolarTermConfig,
    StationType, StationaryConfig, search_apsides, search_conjunctions, search_elongations,
    search_moon_phases, search_ptolemaic_aspects, search_solar_terms, search_stationary,
};
use almanac_time::TimePoint;

const SIDEREAL_MONTH: f64 = 27.32;
const ANOMALISTIC_MONTH: f64 = 27.55;
const YEAR: f64 = 365.25;
const MERCURY_SYNODIC: f64 = 116.0;

fn synodic_month() -> f64 {
    1.0 / (1.0 / SIDEREAL_MONTH - 1.0 / YEAR)
}

#[derive(Default)]
struct MockEphemeris {
    batches: Cell<usize>,
}

impl MockEphemeris {
    fn sun_longitude(d: f64) -> f64 {
        360.0 * d / YEAR
    }
}

impl Ephemeris for MockEphemeris {
    fn observe(&self, body: Body, t: TimePoint) -> Result<Observation, EphemerisError> {
        let d = t.jd();
        let (lon, dec, dist) = match body {
            Body::Sun => (Self::sun_longitude(d), 0.0, 1.496e8),
            Body::Moon => (
                360.0 * d / SIDEREAL_MONTH,
                0.0,
                384_400.0 + 20_000.0 * (2.0 * PI * d / ANOMALISTIC_MONTH).cos(),
            ),
            Body::Mercury => {
                let phase = 2.0 * PI * d / MERCURY_SYNODIC;
                (
                    Self::sun_longitude(d) + 20.0 * phase.sin(),
                    2.0 * phase.cos(),
                    1.0e8,
                )
            }
            Body::Mars => (100.0 + 0.5 * d + 10.0 * (2.0 * PI * d / 100.0).sin(), 0.0, 2.0e8),
            Body::Star(star) => (star.ra_hours * 15.0, star.dec_deg, 1.0e15),
            other => return Err(EphemerisError::UnsupportedBody(other.name())),
        };
        let lon = lon.rem_euclid(360.0);
        Ok(Observation {
            right_ascension_hours: lon / 15.0,
            declination_deg: dec,
            distance_km: dist,
            ecliptic_longitude_deg: lon,
            ecliptic_latitude_deg: dec,
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

fn t(jd: f64) -> TimePoint {
    TimePoint::from_jd(jd)
}

#[test]
fn new_moons_in_right_ascension() {
    let eph = MockEphemeris::default();
    let config = ConjunctionConfig::conjunction(29.5);
    let events = search_conjunctions(&eph, Body::Moon, Body::Sun, t(1.0), t(70.0), &config)
        .expect("search should succeed");

    // The separation wraps at each full moon; those brackets are rejected.
    assert_eq!(events.len(), 2, "events: {events:?}");
    for (k, e) in events.iter().enumerate() {
        let expected = (k + 1) as f64 * synodic_month();
        assert!((e.time.jd() - expected).abs() < 1e-5, "{} vs {expected}", e.time.jd());
        assert!(e.residual_deg.abs() < 1e-3);
        assert!(e.angular_distance_deg < 1e-3);
        assert_eq!(e.body1, Body::Moon);
    }
    // One batch per body for the grid.
    assert_eq!(eph.batches.get(), 2);
}

#[test]
fn full_moons_in_ecliptic_longitude() {
    let eph = MockEphemeris::default();
    let config = ConjunctionConfig::opposition(29.5);
    let events = search_conjunctions(&eph, Body::Moon, Body::Sun, t(1.0), t(70.0), &config)
        .expect("search should succeed");

    assert_eq!(events.len(), 2, "events: {events:?}");
    for (k, e) in events.iter().enumerate() {
        let expected = (k as f64 + 0.5) * synodic_month();
        assert!((e.time.jd() - expected).abs() < 1e-5);
        assert!((e.angular_distance_deg - 180.0).abs() < 1e-3);
    }
}

#[test]
fn moon_passes_a_fixed_star_once_a_month() {
    let eph = MockEphemeris::default();
    let config = ConjunctionConfig::conjunction(27.0).with_coordinate(Coordinate::EclipticLongitude);
    let events = search_conjunctions(
        &eph,
        Body::Moon,
        Body::Star(REGULUS),
        t(0.0),
        t(3.0 * SIDEREAL_MONTH),
        &config,
    )
    .expect("search should succeed");

    assert_eq!(events.len(), 3, "events: {events:?}");
    let first = REGULUS.ra_hours * 15.0 / 360.0 * SIDEREAL_MONTH;
    for (k, e) in events.iter().enumerate() {
        let expected = first + k as f64 * SIDEREAL_MONTH;
        assert!((e.time.jd() - expected).abs() < 1e-5);
        // Regulus sits ~12° off the mock's equator.
        assert!((e.angular_distance_deg - REGULUS.dec_deg).abs() < 1e-3);
    }
}

#[test]
fn mars_retrograde_loop() {
    let eph = MockEphemeris::default();
    let events = search_stationary(
        &eph,
        Body::Mars,
        t(0.0),
        t(100.0),
        &StationaryConfig::inner_planet(),
    )
    .expect("search should succeed");

    // dλ/dt = 0.5 + 0.2π cos(2πt/100) vanishes twice per 100 days.
    let theta = (-0.5 / (0.2 * PI)).acos();
    let retro = theta * 100.0 / (2.0 * PI);
    let direct = 100.0 - retro;

    assert_eq!(events.len(), 2, "events: {events:?}");
    assert_eq!(events[0].station_type, StationType::StationRetrograde);
    assert!((events[0].time.jd() - retro).abs() < 1e-3);
    assert_eq!(events[1].station_type, StationType::StationDirect);
    assert!((events[1].time.jd() - direct).abs() < 1e-3);
    for e in &events {
        assert_eq!(e.body, Body::Mars);
        assert!((0.0..360.0).contains(&e.longitude_deg));
    }
    assert!(events[0].longitude_deg > events[1].longitude_deg);
}

#[test]
fn lunar_perigee_and_apogee() {
    let eph = MockEphemeris::default();
    let events = search_apsides(&eph, Body::Moon, t(1.0), t(40.0), &ApsisConfig::moon())
        .expect("search should succeed");

    assert_eq!(events.len(), 2, "events: {events:?}");
    assert_eq!(events[0].apsis_type, ApsisType::Perigee);
    assert!((events[0].time.jd() - ANOMALISTIC_MONTH / 2.0).abs() < 1e-3);
    assert!((events[0].distance_km - 364_400.0).abs() < 1.0);
    assert_eq!(events[1].apsis_type, ApsisType::Apogee);
    assert!((events[1].time.jd() - ANOMALISTIC_MONTH).abs() < 1e-3);
    assert!((events[1].distance_km - 404_400.0).abs() < 1.0);
    // Distance only: one batch for the grid.
    assert_eq!(eph.batches.get(), 1);
}

#[test]
fn mercury_elongations() {
    let eph = MockEphemeris::default();
    let events = search_elongations(
        &eph,
        Body::Mercury,
        t(1.0),
        t(115.0),
        &ElongationConfig::default(),
    )
    .expect("search should succeed");

    assert_eq!(events.len(), 3, "events: {events:?}");

    assert_eq!(events[0].elongation_type, ElongationType::Greatest);
    assert_eq!(events[0].side, ElongationSide::East);
    assert!((events[0].time.jd() - 29.0).abs() < 1e-3);
    assert!((events[0].elongation_deg - 20.0).abs() < 1e-6);

    // Passes 2° from the Sun at inferior conjunction.
    assert_eq!(events[1].elongation_type, ElongationType::Least);
    assert!((events[1].time.jd() - 58.0).abs() < 1e-3);
    assert!((events[1].elongation_deg - 2.0).abs() < 1e-6);

    assert_eq!(events[2].elongation_type, ElongationType::Greatest);
    assert_eq!(events[2].side, ElongationSide::West);
    assert!((events[2].time.jd() - 87.0).abs() < 1e-3);
}

#[test]
fn moon_sun_ptolemaic_aspects() {
    let eph = MockEphemeris::default();
    let events = search_ptolemaic_aspects(
        &eph,
        Body::Moon,
        Body::Sun,
        t(1.0),
        t(50.0),
        &PtolemaicConfig::moon(),
    )
    .expect("search should succeed");

    let p = synodic_month();
    let expected = [
        (PtolemaicAspect::Opposition, 0.5 * p),
        (PtolemaicAspect::Conjunction, p),
        (PtolemaicAspect::Opposition, 1.5 * p),
    ];
    assert_eq!(events.len(), expected.len(), "events: {events:?}");
    for (e, (aspect, jd)) in events.iter().zip(expected) {
        assert_eq!(e.aspect, aspect);
        assert!((e.time.jd() - jd).abs() < 1e-4, "{} vs {jd}", e.time.jd());
    }
}

#[test]
fn two_months_of_moon_phases() {
    let eph = MockEphemeris::default();
    let events = search_moon_phases(&eph, t(1.0), t(60.0), &MoonPhaseConfig::default())
        .expect("search should succeed");

    // Elongation is 360°·d / synodic month, so quarter k falls at k·P/4.
    let quarter = synodic_month() / 4.0;
    assert_eq!(events.len(), 8, "events: {events:?}");
    for (k, e) in events.iter().enumerate() {
        let n = k + 1;
        assert_eq!(e.phase, MoonPhase::ALL[n % 4]);
        let expected = n as f64 * quarter;
        assert!((e.time.jd() - expected).abs() < 1e-5, "{} vs {expected}", e.time.jd());
    }
    assert_eq!(events[3].phase, MoonPhase::NewMoon);
    // One batch per body for the grid.
    assert_eq!(eph.batches.get(), 2);
}

#[test]
fn solar_terms_every_fifteen_degrees() {
    let eph = MockEphemeris::default();
    let events = search_solar_terms(&eph, t(1.0), t(100.0), &SolarTermConfig::default())
        .expect("search should succeed");

    assert_eq!(events.len(), 6, "events: {events:?}");
    for (k, e) in events.iter().enumerate() {
        let index = k as u8 + 1;
        assert_eq!(e.term_index, index);
        assert_eq!(e.longitude_deg, f64::from(index) * 15.0);
        let expected = YEAR * f64::from(index) / 24.0;
        assert!((e.time.jd() - expected).abs() < 1e-5, "{} vs {expected}", e.time.jd());
    }
    assert_eq!(eph.batches.get(), 1);
}

#[test]
fn solar_terms_wrap_at_the_equinox() {
    let eph = MockEphemeris::default();
    let events = search_solar_terms(&eph, t(350.0), t(380.0), &SolarTermConfig::default())
        .expect("search should succeed");

    assert_eq!(events.len(), 2, "events: {events:?}");
    assert_eq!(events[0].term_index, 23);
    assert!((events[0].time.jd() - YEAR * 23.0 / 24.0).abs() < 1e-5);
    assert_eq!(events[1].term_index, 0);
    assert_eq!(events[1].longitude_deg, 0.0);
    assert!((events[1].time.jd() - YEAR).abs() < 1e-5);
}

#[test]
fn unsupported_body_surfaces_as_ephemeris_error() {
    let eph = MockEphemeris::default();
    let err = search_apsides(&eph, Body::Neptune, t(0.0), t(100.0), &ApsisConfig::planet())
        .unwrap_err();
    assert_eq!(
        err,
        SearchError::Ephemeris(EphemerisError::UnsupportedBody("Neptune"))
    );
}
