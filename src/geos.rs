// src/geos.rs

/// Mean spherical earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Geographic rectangle bounding a circular search area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Computes the bounding rectangle for a circle of `radius_m` meters around a
/// center point, treating the earth as a sphere.
///
/// The longitude delta is widened by 1/cos(latitude) so the box still covers
/// the full circle away from the equator. At a pole cos(lat) is zero and the
/// longitude bounds degrade to the full [-180, 180] range instead.
pub fn bounding_box(center_lat: f64, center_lon: f64, radius_m: f64) -> BoundingBox {
    let angular_radius = radius_m / EARTH_RADIUS_M;
    let lat_delta = angular_radius.to_degrees();

    let min_lat = center_lat - lat_delta;
    let max_lat = center_lat + lat_delta;

    let cos_lat = center_lat.to_radians().cos();
    let (mut min_lon, mut max_lon) = if cos_lat == 0.0 {
        (-180.0, 180.0)
    } else {
        let lon_delta = lat_delta / cos_lat;
        (center_lon - lon_delta, center_lon + lon_delta)
    };

    // Single-step wrap only; holds as long as the delta stays under 360.
    if min_lon < -180.0 {
        min_lon += 360.0;
    }
    if max_lon > 180.0 {
        max_lon -= 360.0;
    }

    BoundingBox {
        min_lat,
        max_lat,
        min_lon,
        max_lon,
    }
}
