// unit: meter
pub const EARTH_RADIUS: f64 = 6_371_000.0;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl Point {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Point {
            latitude,
            longitude,
        }
    }

    // NOTE: nothing in the pipeline rejects out of range points, this is
    // only here so callers can decide for themselves.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to `other` in meters, on a sphere with radius
    /// `EARTH_RADIUS`.
    pub fn haversine_distance(&self, other: &Point) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        // rounding can push `a` just past 1 for near antipodal points
        let a = a.clamp(0.0, 1.0);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS * c
    }
}

pub fn haversine_distance(a: &Point, b: &Point) -> f64 {
    a.haversine_distance(b)
}

// `geo_types` uses x for longitude and y for latitude.
impl From<geo_types::Point<f64>> for Point {
    fn from(point: geo_types::Point<f64>) -> Self {
        Point {
            latitude: point.y(),
            longitude: point.x(),
        }
    }
}

impl From<Point> for geo_types::Point<f64> {
    fn from(point: Point) -> Self {
        geo_types::Point::new(point.longitude, point.latitude)
    }
}

/// A single location fix as reported by the platform. Only `point` takes
/// part in arrival detection, the rest is metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct RawData {
    pub point: Point,
    pub timestamp_ms: Option<i64>,
    pub accuracy: Option<f32>,
    pub altitude: Option<f32>,
    pub speed: Option<f32>,
}

impl RawData {
    pub fn from_point(point: Point) -> Self {
        RawData {
            point,
            timestamp_ms: None,
            accuracy: None,
            altitude: None,
            speed: None,
        }
    }
}
