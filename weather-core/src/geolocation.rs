//! Device position capability.
//!
//! The controller asks [`Geolocator::is_available`] first and only then
//! requests a position, so hosts without any positioning support plug in
//! [`NoGeolocation`].

use async_trait::async_trait;
use thiserror::Error;

use crate::model::Coordinates;

/// Why a position request produced no coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DenialReason {
    #[error("permission to read the position was denied")]
    PermissionDenied,
    #[error("position is unavailable")]
    PositionUnavailable,
    #[error("position request timed out")]
    Timeout,
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    fn is_available(&self) -> bool;

    async fn current_position(&self) -> Result<Coordinates, DenialReason>;
}

/// A host with no positioning capability at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGeolocation;

#[async_trait]
impl Geolocator for NoGeolocation {
    fn is_available(&self) -> bool {
        false
    }

    async fn current_position(&self) -> Result<Coordinates, DenialReason> {
        Err(DenialReason::PositionUnavailable)
    }
}

/// A position known up front, from config or the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

#[async_trait]
impl Geolocator for FixedPosition {
    fn is_available(&self) -> bool {
        true
    }

    async fn current_position(&self) -> Result<Coordinates, DenialReason> {
        Ok(self.0)
    }
}

/// Pick the geolocation source: a fixed position when one is known.
pub fn geolocator_for(position: Option<Coordinates>) -> Box<dyn Geolocator> {
    match position {
        Some(coords) => Box::new(FixedPosition(coords)),
        None => Box::new(NoGeolocation),
    }
}
