use crate::gps_processor::Point;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DisplayUpdate {
    CurrentLocation(Point),
    MarkedLocation(Point),
    Distance(f64),
}

pub trait DisplaySink {
    fn show(&mut self, update: DisplayUpdate);
}

impl<F> DisplaySink for F
where
    F: FnMut(DisplayUpdate),
{
    fn show(&mut self, update: DisplayUpdate) {
        self(update)
    }
}

pub fn format_distance(distance_m: f64) -> String {
    format!("Distance: {distance_m:.2} meters")
}

pub fn format_coordinate(point: &Point) -> String {
    format!(
        "Latitude: {},\n Longitude: {}",
        point.latitude, point.longitude
    )
}

/// Renders updates as text into the log, for headless runs.
pub struct LogDisplaySink;

impl DisplaySink for LogDisplaySink {
    fn show(&mut self, update: DisplayUpdate) {
        match update {
            DisplayUpdate::CurrentLocation(point) => {
                debug!("current location: {}", format_coordinate(&point))
            }
            DisplayUpdate::MarkedLocation(point) => {
                info!("marked location: {}", format_coordinate(&point))
            }
            DisplayUpdate::Distance(distance_m) => debug!("{}", format_distance(distance_m)),
        }
    }
}
