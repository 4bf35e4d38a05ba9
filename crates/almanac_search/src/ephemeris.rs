//! Interface to the ephemeris collaborator.
//!
//! The finders never call an ephemeris; the event layer composes
//! [`Ephemeris::observe`] results into searched functions. Implementations
//! (kernel readers, analytic theories, test mocks) live outside this crate.

use std::error::Error;
use std::fmt::{Display, Formatter};

use almanac_time::TimePoint;

/// A star at a fixed catalogue position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStar {
    pub name: &'static str,
    /// Right ascension in hours.
    pub ra_hours: f64,
    /// Declination in degrees.
    pub dec_deg: f64,
}

impl FixedStar {
    /// Build from sexagesimal `(h, m, s)` and `(d, m, s)`.
    ///
    /// The declination sign is taken from `dec.0`; use a negative degree
    /// count for southern stars.
    pub fn from_sexagesimal(
        name: &'static str,
        ra: (f64, f64, f64),
        dec: (f64, f64, f64),
    ) -> Self {
        let sign = if dec.0 < 0.0 { -1.0 } else { 1.0 };
        Self {
            name,
            ra_hours: ra.0 + ra.1 / 60.0 + ra.2 / 3600.0,
            dec_deg: sign * (dec.0.abs() + dec.1 / 60.0 + dec.2 / 3600.0),
        }
    }
}

/// Regulus (α Leo), J2000.
pub const REGULUS: FixedStar = FixedStar {
    name: "Regulus",
    ra_hours: 10.0 + 8.0 / 60.0 + 21.98 / 3600.0,
    dec_deg: 11.0 + 58.0 / 60.0 + 3.0 / 3600.0,
};

/// Aldebaran (α Tau), J2000.
pub const ALDEBARAN: FixedStar = FixedStar {
    name: "Aldebaran",
    ra_hours: 4.0 + 35.0 / 60.0 + 55.33 / 3600.0,
    dec_deg: 16.0 + 30.0 / 60.0 + 29.6 / 3600.0,
};

/// Spica (α Vir), J2000.
pub const SPICA: FixedStar = FixedStar {
    name: "Spica",
    ra_hours: 13.0 + 25.0 / 60.0 + 11.53 / 3600.0,
    dec_deg: -(11.0 + 9.0 / 60.0 + 41.5 / 3600.0),
};

/// Bodies the almanac observes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    Star(FixedStar),
}

impl Body {
    /// Sun, Moon, and the planets.
    pub const SOLAR_SYSTEM: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
            Self::Pluto => "Pluto",
            Self::Star(star) => star.name,
        }
    }

    pub fn is_star(&self) -> bool {
        matches!(self, Self::Star(_))
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Apparent position of a body seen from the observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Right ascension in hours, [0, 24).
    pub right_ascension_hours: f64,
    /// Declination in degrees.
    pub declination_deg: f64,
    /// Distance in km.
    pub distance_km: f64,
    /// Ecliptic longitude in degrees, [0, 360).
    pub ecliptic_longitude_deg: f64,
    /// Ecliptic latitude in degrees.
    pub ecliptic_latitude_deg: f64,
}

/// Errors raised by an ephemeris implementation.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum EphemerisError {
    /// Epoch outside the ephemeris coverage.
    OutOfRange { jd: f64 },
    /// The ephemeris has no data for this body.
    UnsupportedBody(&'static str),
    /// Backend-specific failure.
    Backend(String),
}

impl Display for EphemerisError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { jd } => write!(f, "epoch out of range: JD {jd}"),
            Self::UnsupportedBody(name) => write!(f, "unsupported body: {name}"),
            Self::Backend(msg) => write!(f, "backend error: {msg}"),
        }
    }
}

impl Error for EphemerisError {}

/// Source of apparent positions.
pub trait Ephemeris {
    fn observe(&self, body: Body, t: TimePoint) -> Result<Observation, EphemerisError>;

    /// Observe at many instants. Backends that batch should override this.
    fn observe_many(
        &self,
        body: Body,
        times: &[TimePoint],
    ) -> Result<Vec<Observation>, EphemerisError> {
        times.iter().map(|&t| self.observe(body, t)).collect()
    }
}
