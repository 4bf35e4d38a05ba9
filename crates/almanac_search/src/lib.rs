//! Event search engine: roots, extrema, and state changes of functions of
//! time, plus the almanac events built on them.
//!
//! This crate provides:
//! - A discretizer shared by three finders (roots, critical points, state changes)
//! - The [`ScalarFunction`] capability and closure adapters for searched functions
//! - An [`Ephemeris`] interface and event searches over it: conjunctions,
//!   oppositions, aspects, stations, apsides, elongations, Ptolemaic aspects,
//!   moon phases, solar terms

pub mod angle;
pub mod critical;
pub mod discrete;
pub mod discretize;
pub mod ephemeris;
pub mod error;
pub mod events;
pub mod events_types;
pub mod finder_types;
pub mod function;
pub mod observables;
pub mod root;

pub use angle::{angular_distance_deg, hour_separation, normalize_to_360, normalize_to_pm180};
pub use critical::find_critical_points;
pub use discrete::find_discrete;
pub use discretize::{DEFAULT_SAMPLES_PER_PERIOD, Samples, discretize, sample_times};
pub use ephemeris::{ALDEBARAN, Body, Ephemeris, EphemerisError, FixedStar, Observation, REGULUS, SPICA};
pub use error::SearchError;
pub use events::{
    search_apsides, search_conjunctions, search_elongations, search_moon_phases,
    search_ptolemaic_aspects, search_solar_terms, search_stationary,
};
pub use events_types::{
    APSIS_FLATNESS_KM_PER_DAY, ApsisConfig, ApsisEvent, ApsisType, ConjunctionConfig,
    ConjunctionEvent, ElongationConfig, ElongationEvent, ElongationSide, ElongationType,
    ExtremumKind, MoonPhase, MoonPhaseConfig, MoonPhaseEvent, PtolemaicAspect, PtolemaicConfig,
    PtolemaicEvent, SOLAR_TERM_COUNT, SolarTermConfig, SolarTermEvent, StationType,
    StationaryConfig, StationaryEvent, classify_extremum,
};
pub use finder_types::{
    CriticalConfig, DiscreteConfig, FoundExtremum, FoundRoot, RootConfig, StateChange,
};
pub use function::{
    Derivative, DiscreteFunction, ScalarFunction, StateFunction, TimeFunction, time_function,
};
pub use observables::Coordinate;
pub use root::find_roots;
