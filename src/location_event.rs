use strum_macros::{Display, EnumString};

use crate::gps_processor::RawData;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum AuthorizationStatus {
    NotDetermined,
    Restricted,
    Denied,
    AuthorizedWhenInUse,
    AuthorizedAlways,
}

impl AuthorizationStatus {
    pub fn is_authorized(&self) -> bool {
        matches!(
            self,
            AuthorizationStatus::AuthorizedWhenInUse | AuthorizationStatus::AuthorizedAlways
        )
    }

    pub fn is_denied(&self) -> bool {
        matches!(
            self,
            AuthorizationStatus::Restricted | AuthorizationStatus::Denied
        )
    }
}

/// Everything the platform location service can tell us.
#[derive(Clone, Debug, PartialEq)]
pub enum LocationEvent {
    // same shape as the platform callback: possibly more than one fix.
    LocationUpdated(Vec<RawData>),
    AuthorizationChanged(AuthorizationStatus),
    LocationFailed(String),
}
