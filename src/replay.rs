use std::{fs::File, io::BufReader, path::Path, sync::mpsc::Sender};

use anyhow::Result;
use chrono::{DateTime, Utc};
use gpx::read;

use crate::gps_processor::RawData;
use crate::location_event::{AuthorizationStatus, LocationEvent};
use crate::session::SessionInput;

/// A client of some location service. It pushes what it observes into the
/// session's input channel and returns when it has nothing more to say.
pub trait LocationSource {
    fn start(&mut self, inputs: &Sender<SessionInput>) -> Result<()>;
}

pub fn load_gpx<P: AsRef<Path>>(file_path: P) -> Result<Vec<RawData>> {
    let gpx_data = read(BufReader::new(File::open(file_path)?))?;
    let mut raw_data_list = Vec::new();
    for track in &gpx_data.tracks {
        for segment in &track.segments {
            for point in &segment.points {
                let timestamp = match &point.time {
                    Some(time) => Some(DateTime::<Utc>::from(DateTime::parse_from_rfc3339(
                        &time.format()?,
                    )?)),
                    None => None,
                };
                raw_data_list.push(RawData {
                    point: point.point().into(),
                    timestamp_ms: timestamp.map(|x| x.timestamp_millis()),
                    accuracy: point.hdop.map(|hdop| hdop as f32),
                    altitude: point.elevation.map(|value| value as f32),
                    speed: point.speed.map(|value| value as f32),
                });
            }
        }
    }
    Ok(raw_data_list)
}

/// Plays back a recorded track as if it came from the device, one fix per
/// update. Handy for demos and end to end tests.
pub struct GpxReplay {
    raw_data_list: Vec<RawData>,
    // press "mark" after this many fixes
    mark_after: Option<usize>,
}

impl GpxReplay {
    pub fn new(raw_data_list: Vec<RawData>) -> Self {
        GpxReplay {
            raw_data_list,
            mark_after: None,
        }
    }

    pub fn open<P: AsRef<Path>>(file_path: P) -> Result<Self> {
        Ok(Self::new(load_gpx(file_path)?))
    }

    pub fn mark_after(mut self, num_of_fixes: usize) -> Self {
        self.mark_after = Some(num_of_fixes);
        self
    }

    pub fn len(&self) -> usize {
        self.raw_data_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw_data_list.is_empty()
    }
}

impl LocationSource for GpxReplay {
    fn start(&mut self, inputs: &Sender<SessionInput>) -> Result<()> {
        let send = |input: SessionInput| {
            inputs
                .send(input)
                .map_err(|_| anyhow!("session is no longer receiving location events"))
        };
        info!("replaying {} fixes", self.raw_data_list.len());
        send(LocationEvent::AuthorizationChanged(AuthorizationStatus::AuthorizedWhenInUse).into())?;
        for (i, raw_data) in self.raw_data_list.iter().enumerate() {
            if self.mark_after == Some(i) {
                send(SessionInput::MarkCurrentLocation)?;
            }
            send(LocationEvent::LocationUpdated(vec![raw_data.clone()]).into())?;
        }
        if self.mark_after == Some(self.raw_data_list.len()) {
            send(SessionInput::MarkCurrentLocation)?;
        }
        Ok(())
    }
}
