//! Great-circle course between two coordinates.

use flyover_env::GeoPoint;

/// Initial great-circle bearing from `from` to `to`, in degrees.
///
/// Raw `atan2` output in (-180, 180]. Coincident points yield 0.
pub fn initial_bearing(from: GeoPoint, to: GeoPoint) -> f64 {
    let phi1 = from.lat.to_radians();
    let phi2 = to.lat.to_radians();
    let delta_lambda = (to.lon - from.lon).to_radians();

    let y = delta_lambda.sin() * phi2.cos();
    let x = phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * delta_lambda.cos();

    y.atan2(x).to_degrees()
}

/// Compass bearing from `from` to `to`, normalized into [0, 360).
pub fn bearing(from: GeoPoint, to: GeoPoint) -> f64 {
    normalize_heading(initial_bearing(from, to))
}

/// Wraps any heading in degrees into [0, 360).
pub fn normalize_heading(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pt(lat: f64, lon: f64) -> GeoPoint {
        GeoPoint::new(lat, lon).unwrap()
    }

    #[test]
    fn test_cardinal_directions() {
        let origin = pt(0.0, 0.0);
        assert_abs_diff_eq!(bearing(origin, pt(0.0, 90.0)), 90.0, epsilon = 1e-6);
        assert_abs_diff_eq!(bearing(origin, pt(10.0, 0.0)), 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(bearing(origin, pt(-10.0, 0.0)), 180.0, epsilon = 1e-6);
        assert_abs_diff_eq!(bearing(origin, pt(0.0, -90.0)), 270.0, epsilon = 1e-6);
    }

    #[test]
    fn test_raw_bearing_keeps_sign() {
        let origin = pt(0.0, 0.0);
        assert_abs_diff_eq!(initial_bearing(origin, pt(0.0, -90.0)), -90.0, epsilon = 1e-6);
    }

    #[test]
    fn test_closed_form_mid_latitude() {
        // San Francisco -> New York
        let sf = pt(37.7749, -122.4194);
        let ny = pt(40.7128, -74.0060);

        let phi1 = sf.lat.to_radians();
        let phi2 = ny.lat.to_radians();
        let dl = (ny.lon - sf.lon).to_radians();
        let expected = (dl.sin() * phi2.cos())
            .atan2(phi1.cos() * phi2.sin() - phi1.sin() * phi2.cos() * dl.cos())
            .to_degrees();

        assert_abs_diff_eq!(bearing(sf, ny), expected, epsilon = 1e-6);
        // Roughly east-north-east
        assert!(bearing(sf, ny) > 60.0 && bearing(sf, ny) < 75.0);
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        let p = pt(51.5, -0.12);
        assert_eq!(bearing(p, p), 0.0);

        let to_pole = bearing(pt(0.0, 0.0), pt(90.0, 0.0));
        assert!(to_pole.is_finite());
        let from_pole = bearing(pt(90.0, 0.0), pt(0.0, 45.0));
        assert!(from_pole.is_finite());
    }

    #[test]
    fn test_normalize_heading() {
        assert_eq!(normalize_heading(0.0), 0.0);
        assert_eq!(normalize_heading(-90.0), 270.0);
        assert_eq!(normalize_heading(720.0), 0.0);
        assert_eq!(normalize_heading(-1e-20), 0.0);
        assert_abs_diff_eq!(normalize_heading(-450.0), 270.0, epsilon = 1e-12);
    }
}
