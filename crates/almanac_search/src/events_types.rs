//! Configs and results for the ephemeris-backed event searches.

use almanac_time::TimePoint;

use crate::ephemeris::Body;
use crate::finder_types::{CriticalConfig, DiscreteConfig, FoundExtremum, RootConfig};
use crate::observables::Coordinate;

/// Configuration for [`search_conjunctions`](crate::events::search_conjunctions).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConjunctionConfig {
    /// Separation `c(body1) - c(body2)` to search for, in degrees [0, 360).
    pub target_separation_deg: f64,
    /// Coordinate the separation is measured in.
    pub coordinate: Coordinate,
    /// Shortest time over which the separation sweeps a full circle, in days.
    pub rough_period_days: f64,
    pub root: RootConfig,
}

impl ConjunctionConfig {
    /// Equal right ascension.
    pub fn conjunction(rough_period_days: f64) -> Self {
        Self {
            target_separation_deg: 0.0,
            coordinate: Coordinate::RightAscension,
            rough_period_days,
            root: RootConfig::default(),
        }
    }

    /// Ecliptic longitudes 180° apart.
    pub fn opposition(rough_period_days: f64) -> Self {
        Self::aspect(180.0, rough_period_days)
    }

    /// Arbitrary ecliptic longitude separation.
    pub fn aspect(target_deg: f64, rough_period_days: f64) -> Self {
        Self {
            target_separation_deg: target_deg,
            coordinate: Coordinate::EclipticLongitude,
            rough_period_days,
            root: RootConfig::default(),
        }
    }

    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        self.coordinate = coordinate;
        self
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.target_separation_deg.is_finite()
            || !(0.0..360.0).contains(&self.target_separation_deg)
        {
            return Err("target_separation_deg must be in [0, 360)");
        }
        if !self.rough_period_days.is_finite() || self.rough_period_days <= 0.0 {
            return Err("rough_period_days must be positive");
        }
        self.root.validate()
    }
}

/// Two bodies at the target separation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConjunctionEvent {
    pub time: TimePoint,
    pub body1: Body,
    pub body2: Body,
    pub target_separation_deg: f64,
    /// Separation minus target at `time`, in degrees. Zero within tolerance.
    pub residual_deg: f64,
    /// Great-circle distance between the bodies at `time`.
    pub angular_distance_deg: f64,
}

/// Whether a refined extremum is a minimum or a maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtremumKind {
    Minimum,
    Maximum,
}

/// Classify by the sign of the bracket's second difference.
///
/// The center value is compared with the mean of its neighbours, so a
/// bracket that still leans to one side is classified by its curvature.
pub fn classify_extremum(extremum: &FoundExtremum) -> ExtremumKind {
    let [y_a, y_x, y_b] = extremum.values;
    if y_x >= 0.5 * (y_a + y_b) {
        ExtremumKind::Maximum
    } else {
        ExtremumKind::Minimum
    }
}

/// Station type: retrograde or direct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StationType {
    /// Longitude reaches a maximum and starts decreasing.
    StationRetrograde,
    /// Longitude reaches a minimum and starts increasing.
    StationDirect,
}

/// A planet standing still in ecliptic longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationaryEvent {
    pub time: TimePoint,
    pub body: Body,
    /// Ecliptic longitude at station in degrees [0, 360).
    pub longitude_deg: f64,
    pub station_type: StationType,
}

/// Configuration for [`search_stationary`](crate::events::search_stationary).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StationaryConfig {
    /// Rough period handed to the discretizer, in days. The grid spacing is
    /// this divided by `critical.samples_per_period`.
    pub rough_period_days: f64,
    pub critical: CriticalConfig,
}

impl StationaryConfig {
    /// Mercury, Venus, Mars: 1-day grid.
    pub fn inner_planet() -> Self {
        Self {
            rough_period_days: 12.0,
            critical: CriticalConfig::with_flatness(1e-3),
        }
    }

    /// Jupiter through Pluto: 2-day grid.
    pub fn outer_planet() -> Self {
        Self {
            rough_period_days: 24.0,
            critical: CriticalConfig::with_flatness(1e-3),
        }
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.rough_period_days.is_finite() || self.rough_period_days <= 0.0 {
            return Err("rough_period_days must be positive");
        }
        self.critical.validate()
    }
}

/// Apsis type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApsisType {
    Perigee,
    Apogee,
}

/// Closest or farthest approach to the observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApsisEvent {
    pub time: TimePoint,
    pub body: Body,
    pub distance_km: f64,
    pub apsis_type: ApsisType,
}

/// Configuration for [`search_apsides`](crate::events::search_apsides).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApsisConfig {
    pub rough_period_days: f64,
    /// Flatness tolerance is in km/day.
    pub critical: CriticalConfig,
}

/// Flatness tolerance for distance searches, km/day.
pub const APSIS_FLATNESS_KM_PER_DAY: f64 = 10.0;

impl ApsisConfig {
    /// The Moon: ~1.2-day grid, resolving evection-perturbed apsides.
    pub fn moon() -> Self {
        Self::with_rough_period(14.0)
    }

    /// Planets and the Sun: 5-day grid.
    pub fn planet() -> Self {
        Self::with_rough_period(60.0)
    }

    pub fn with_rough_period(rough_period_days: f64) -> Self {
        Self {
            rough_period_days,
            critical: CriticalConfig::with_flatness(APSIS_FLATNESS_KM_PER_DAY),
        }
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.rough_period_days.is_finite() || self.rough_period_days <= 0.0 {
            return Err("rough_period_days must be positive");
        }
        self.critical.validate()
    }
}

/// Extreme of a body's angular distance from the Sun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElongationType {
    Greatest,
    Least,
}

/// Side of the Sun the body is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElongationSide {
    /// East of the Sun: evening sky.
    East,
    /// West of the Sun: morning sky.
    West,
}

/// A local extreme of elongation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElongationEvent {
    pub time: TimePoint,
    pub body: Body,
    /// Great-circle distance from the Sun in degrees.
    pub elongation_deg: f64,
    pub elongation_type: ElongationType,
    pub side: ElongationSide,
}

/// Configuration for [`search_elongations`](crate::events::search_elongations).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElongationConfig {
    pub rough_period_days: f64,
    pub critical: CriticalConfig,
}

impl Default for ElongationConfig {
    fn default() -> Self {
        Self {
            rough_period_days: 12.0,
            critical: CriticalConfig::with_flatness(1e-3),
        }
    }
}

impl ElongationConfig {
    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.rough_period_days.is_finite() || self.rough_period_days <= 0.0 {
            return Err("rough_period_days must be positive");
        }
        self.critical.validate()
    }
}

/// Ptolemaic aspect reached by two bodies in right ascension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PtolemaicAspect {
    /// Smallest RA separation: the separation starts increasing.
    Conjunction,
    /// Largest RA separation: the separation starts decreasing.
    Opposition,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtolemaicEvent {
    pub time: TimePoint,
    pub base: Body,
    pub other: Body,
    pub aspect: PtolemaicAspect,
}

/// Configuration for [`search_ptolemaic_aspects`](crate::events::search_ptolemaic_aspects).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtolemaicConfig {
    pub rough_period_days: f64,
    /// Central-difference step for the separation rate, in days (default 0.01).
    pub derivative_step_days: f64,
    pub discrete: DiscreteConfig,
}

impl PtolemaicConfig {
    /// Aspects of the Moon to a slower body: synodic month split in 12.
    pub fn moon() -> Self {
        Self {
            rough_period_days: 29.0,
            derivative_step_days: 0.01,
            discrete: DiscreteConfig::default(),
        }
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.rough_period_days.is_finite() || self.rough_period_days <= 0.0 {
            return Err("rough_period_days must be positive");
        }
        if !self.derivative_step_days.is_finite() || self.derivative_step_days <= 0.0 {
            return Err("derivative_step_days must be positive");
        }
        self.discrete.validate()
    }
}

/// Principal lunar phase, by Moon-minus-Sun ecliptic longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    /// 0°
    NewMoon,
    /// 90°
    FirstQuarter,
    /// 180°
    FullMoon,
    /// 270°
    LastQuarter,
}

impl MoonPhase {
    pub const ALL: [MoonPhase; 4] = [
        Self::NewMoon,
        Self::FirstQuarter,
        Self::FullMoon,
        Self::LastQuarter,
    ];

    /// Phase starting at quadrant `index` of the elongation, taken mod 4.
    pub fn from_quadrant(index: i64) -> Self {
        // rem_euclid(4) is always in 0..4
        Self::ALL[index.rem_euclid(4) as usize]
    }

    /// Moon-minus-Sun longitude at which the phase begins.
    pub fn elongation_deg(self) -> f64 {
        match self {
            Self::NewMoon => 0.0,
            Self::FirstQuarter => 90.0,
            Self::FullMoon => 180.0,
            Self::LastQuarter => 270.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPhaseEvent {
    pub time: TimePoint,
    pub phase: MoonPhase,
}

/// Configuration for [`search_moon_phases`](crate::events::search_moon_phases).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonPhaseConfig {
    /// Quarter of a synodic month (default 7.4 days).
    pub rough_period_days: f64,
    pub discrete: DiscreteConfig,
}

impl Default for MoonPhaseConfig {
    fn default() -> Self {
        Self {
            rough_period_days: 7.4,
            discrete: DiscreteConfig::default(),
        }
    }
}

impl MoonPhaseConfig {
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.rough_period_days.is_finite() || self.rough_period_days <= 0.0 {
            return Err("rough_period_days must be positive");
        }
        self.discrete.validate()
    }
}

/// Number of solar terms in a tropical year.
pub const SOLAR_TERM_COUNT: u8 = 24;

/// The Sun entering a 15° sector of ecliptic longitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarTermEvent {
    pub time: TimePoint,
    /// Sector entered, 0..24; term 0 starts at the March equinox.
    pub term_index: u8,
    /// `term_index * 15`
    pub longitude_deg: f64,
}

/// Configuration for [`search_solar_terms`](crate::events::search_solar_terms).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarTermConfig {
    /// Default 15 days, about one term.
    pub rough_period_days: f64,
    pub discrete: DiscreteConfig,
}

impl Default for SolarTermConfig {
    fn default() -> Self {
        Self {
            rough_period_days: 15.0,
            discrete: DiscreteConfig::default(),
        }
    }
}

impl SolarTermConfig {
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if !self.rough_period_days.is_finite() || self.rough_period_days <= 0.0 {
            return Err("rough_period_days must be positive");
        }
        self.discrete.validate()
    }
}
