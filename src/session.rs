use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread::{self, JoinHandle},
};

use anyhow::Result;

use crate::arrival_detector::{ArrivalDetector, ArrivalState};
use crate::config::Config;
use crate::display::{DisplaySink, DisplayUpdate};
use crate::gps_processor::{Point, RawData};
use crate::location_event::{AuthorizationStatus, LocationEvent};
use crate::notification::{Notification, NotificationSink};

#[derive(Clone, Debug, PartialEq)]
pub enum SessionInput {
    Location(LocationEvent),
    // the "mark" button
    MarkCurrentLocation,
}

impl From<LocationEvent> for SessionInput {
    fn from(event: LocationEvent) -> Self {
        SessionInput::Location(event)
    }
}

/// State for one run of the app: the marked location, what we last heard
/// from the location service and the arrival detector. Everything is
/// touched from a single thread, one input at a time.
pub struct MarkSession {
    marked: Option<Point>,
    current: Option<Point>,
    authorization: AuthorizationStatus,
    detector: ArrivalDetector,
    last_distance: Option<f64>,
    notification_sink: Box<dyn NotificationSink + Send>,
    display_sink: Box<dyn DisplaySink + Send>,
}

impl MarkSession {
    pub fn new(
        config: &Config,
        notification_sink: Box<dyn NotificationSink + Send>,
        display_sink: Box<dyn DisplaySink + Send>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(MarkSession {
            marked: None,
            current: None,
            authorization: AuthorizationStatus::NotDetermined,
            detector: ArrivalDetector::new(config.arrival)?,
            last_distance: None,
            notification_sink,
            display_sink,
        })
    }

    pub fn marked_location(&self) -> Option<Point> {
        self.marked
    }

    pub fn current_location(&self) -> Option<Point> {
        self.current
    }

    pub fn authorization(&self) -> AuthorizationStatus {
        self.authorization
    }

    pub fn arrival_state(&self) -> ArrivalState {
        self.detector.state()
    }

    pub fn last_distance(&self) -> Option<f64> {
        self.last_distance
    }

    pub fn mark_location(&mut self, point: Point) {
        if self.marked.is_some() {
            info!("replacing the previously marked location");
        }
        self.marked = Some(point);
        self.detector.reset();
        self.last_distance = None;
        self.display_sink.show(DisplayUpdate::MarkedLocation(point));
    }

    pub fn mark_current_location(&mut self) -> Result<Point> {
        let point = self
            .current
            .ok_or_else(|| anyhow!("cannot mark location: no location available"))?;
        self.mark_location(point);
        Ok(point)
    }

    pub fn handle(&mut self, input: SessionInput) -> Result<()> {
        match input {
            SessionInput::Location(event) => self.handle_event(event),
            SessionInput::MarkCurrentLocation => {
                self.mark_current_location()?;
            }
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: LocationEvent) {
        match event {
            LocationEvent::LocationUpdated(mut raw_data_list) => {
                if self.authorization.is_denied() {
                    debug!(
                        "dropping {} location update(s), authorization is {}",
                        raw_data_list.len(),
                        self.authorization
                    );
                    return;
                }
                sort_by_timestamp(&mut raw_data_list);
                for raw_data in &raw_data_list {
                    self.on_location_update(raw_data);
                }
            }
            LocationEvent::AuthorizationChanged(status) => {
                info!("authorization changed: {} -> {}", self.authorization, status);
                self.authorization = status;
                if status.is_denied() {
                    warn!("location access is {}, no location available", status);
                    self.current = None;
                }
            }
            LocationEvent::LocationFailed(reason) => {
                warn!("location request failed: {}", reason);
                self.current = None;
            }
        }
    }

    fn on_location_update(&mut self, raw_data: &RawData) {
        let current = raw_data.point;
        self.current = Some(current);
        self.display_sink.show(DisplayUpdate::CurrentLocation(current));

        let Some(marked) = self.marked else {
            return;
        };
        let update = self.detector.on_location(&marked, &current);
        self.last_distance = Some(update.distance_m);
        if update.arrived {
            let notification = Notification::arrival();
            match self.notification_sink.deliver(&notification) {
                Ok(()) => info!("notification `{}` sent", notification.identifier),
                Err(e) => error!(
                    "failed to send notification `{}`: {:?}",
                    notification.identifier, e
                ),
            }
        }
        self.display_sink.show(DisplayUpdate::Distance(update.distance_m));
    }

    pub fn run(&mut self, inputs: Receiver<SessionInput>) {
        info!("session started");
        while let Ok(input) = inputs.recv() {
            if let Err(e) = self.handle(input) {
                warn!("{:?}", e);
            }
        }
        info!("input channel closed, session stopped");
    }
}

// Puts the timestamped fixes in order among themselves. Fixes without a
// timestamp stay in the slot they arrived in.
fn sort_by_timestamp(raw_data_list: &mut [RawData]) {
    let slots: Vec<usize> = raw_data_list
        .iter()
        .enumerate()
        .filter(|(_, raw_data)| raw_data.timestamp_ms.is_some())
        .map(|(i, _)| i)
        .collect();
    let mut timestamped: Vec<RawData> = slots.iter().map(|i| raw_data_list[*i].clone()).collect();
    timestamped.sort_by_key(|raw_data| raw_data.timestamp_ms);
    for (slot, raw_data) in slots.into_iter().zip(timestamped) {
        raw_data_list[slot] = raw_data;
    }
}

// The session is handed back once every sender is dropped.
pub fn spawn(mut session: MarkSession) -> (Sender<SessionInput>, JoinHandle<MarkSession>) {
    let (tx, rx) = mpsc::channel();
    let handle = thread::spawn(move || {
        session.run(rx);
        session
    });
    (tx, handle)
}
