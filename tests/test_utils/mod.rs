#![allow(dead_code)]

use mark_location_core::config::Config;
use mark_location_core::display::DisplayUpdate;
use mark_location_core::gps_processor::{Point, RawData, EARTH_RADIUS};
use mark_location_core::notification::Notification;
use mark_location_core::session::MarkSession;
use std::sync::{Arc, Mutex};

pub const WALK_GPX: &str = "./tests/data/walk_away_and_back.gpx";

pub const BASE: Point = Point {
    latitude: 31.2304,
    longitude: 121.4737,
};

pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// A point `meters` due north of `origin`.
pub fn north_of(origin: &Point, meters: f64) -> Point {
    Point {
        latitude: origin.latitude + (meters / EARTH_RADIUS).to_degrees(),
        longitude: origin.longitude,
    }
}

pub fn fix(point: Point, timestamp_ms: i64) -> RawData {
    RawData {
        point,
        timestamp_ms: Some(timestamp_ms),
        accuracy: Some(5.0),
        altitude: None,
        speed: None,
    }
}

#[derive(Clone, Default)]
pub struct Recorder {
    pub notifications: Arc<Mutex<Vec<Notification>>>,
    pub display: Arc<Mutex<Vec<DisplayUpdate>>>,
}

impl Recorder {
    pub fn session(&self, config: &Config) -> MarkSession {
        let notifications = self.notifications.clone();
        let display = self.display.clone();
        MarkSession::new(
            config,
            Box::new(move |n: &Notification| -> anyhow::Result<()> {
                notifications.lock().unwrap().push(n.clone());
                Ok(())
            }),
            Box::new(move |update: DisplayUpdate| display.lock().unwrap().push(update)),
        )
        .unwrap()
    }

    pub fn num_of_notifications(&self) -> usize {
        self.notifications.lock().unwrap().len()
    }

    pub fn distances(&self) -> Vec<f64> {
        self.display
            .lock()
            .unwrap()
            .iter()
            .filter_map(|update| match update {
                DisplayUpdate::Distance(d) => Some(*d),
                _ => None,
            })
            .collect()
    }
}
