//! Angle helpers shared by the event finders.

/// Normalize an angle to [0, 360).
pub fn normalize_to_360(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if d >= 360.0 { 0.0 } else { d }
}

/// Normalize an angle to (-180, +180].
pub fn normalize_to_pm180(deg: f64) -> f64 {
    let d = normalize_to_360(deg);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Separation of two right ascensions in hours, in [0, 12].
///
/// `min(|d|, 24 - |d|)` with `d` reduced mod 24, so 23h59m and 0h01m are
/// two minutes apart.
pub fn hour_separation(ra1_hours: f64, ra2_hours: f64) -> f64 {
    let d = (ra1_hours - ra2_hours).rem_euclid(24.0);
    d.min(24.0 - d)
}

/// Great-circle distance in degrees between two equatorial positions.
pub fn angular_distance_deg(
    ra1_hours: f64,
    dec1_deg: f64,
    ra2_hours: f64,
    dec2_deg: f64,
) -> f64 {
    let ra1 = (ra1_hours * 15.0).to_radians();
    let ra2 = (ra2_hours * 15.0).to_radians();
    let dec1 = dec1_deg.to_radians();
    let dec2 = dec2_deg.to_radians();

    let cos_d = dec1.sin() * dec2.sin() + dec1.cos() * dec2.cos() * (ra1 - ra2).cos();
    cos_d.clamp(-1.0, 1.0).acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separation_across_ra_wrap() {
        // 23h and 1h of right ascension, in degrees: 30° behind, not 330° ahead.
        assert_eq!(normalize_to_pm180(23.0 * 15.0 - 1.0 * 15.0), -30.0);
        assert_eq!(normalize_to_pm180(1.0 * 15.0 - 23.0 * 15.0), 30.0);
    }

    #[test]
    fn separation_from_target() {
        // Moon at 10°, Sun at 100°: exactly at last quarter (270°).
        assert_eq!(normalize_to_pm180(10.0 - 100.0 - 270.0), 0.0);
        // One degree short of opposition.
        assert_eq!(normalize_to_pm180(279.0 - 100.0 - 180.0), -1.0);
    }

    #[test]
    fn half_turn_is_positive() {
        assert_eq!(normalize_to_pm180(180.0), 180.0);
        assert_eq!(normalize_to_pm180(-180.0), 180.0);
        assert_eq!(normalize_to_pm180(540.0), 180.0);
        assert!(normalize_to_pm180(180.5) < -179.0);
        assert!(normalize_to_pm180(-1e-20).abs() < 1e-12);
    }

    #[test]
    fn normalize_360() {
        assert_eq!(normalize_to_360(370.0), 10.0);
        assert_eq!(normalize_to_360(-10.0), 350.0);
        assert_eq!(normalize_to_360(0.0), 0.0);
        let tiny = normalize_to_360(-1e-20);
        assert!((0.0..360.0).contains(&tiny));
    }

    #[test]
    fn hour_separation_across_midnight() {
        assert!((hour_separation(23.9, 0.1) - 0.2).abs() < 1e-12);
        assert!((hour_separation(0.1, 23.9) - 0.2).abs() < 1e-12);
        assert!((hour_separation(6.0, 18.0) - 12.0).abs() < 1e-12);
        assert_eq!(hour_separation(5.0, 5.0), 0.0);
    }

    #[test]
    fn distance_along_equator() {
        // 1h of RA on the equator is 15°
        assert!((angular_distance_deg(1.0, 0.0, 2.0, 0.0) - 15.0).abs() < 1e-9);
    }

    #[test]
    fn distance_to_pole() {
        assert!((angular_distance_deg(7.0, 90.0, 3.0, 0.0) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn distance_identical_points_is_zero() {
        let d = angular_distance_deg(10.139, 11.967, 10.139, 11.967);
        assert!(d.abs() < 1e-6, "d = {d}");
    }

    #[test]
    fn distance_across_ra_wrap() {
        let d = angular_distance_deg(23.9, 0.0, 0.1, 0.0);
        assert!((d - 3.0).abs() < 1e-9);
    }
}
