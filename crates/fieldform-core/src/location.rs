//! Geolocation capture
//!
//! Coordinates are normally typed by hand; on explicit request a
//! [`LocationProvider`] can fill them in. Every failure here is non-fatal
//! and retryable, and never blocks manual entry.

use async_trait::async_trait;
use thiserror::Error;

use crate::draft::FormDraft;

/// Device-provided position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Error)]
pub enum LocationError {
    #[error("geolocation is not supported on this device")]
    Unsupported,
    #[error("location permission denied")]
    PermissionDenied,
    #[error("unable to retrieve your location")]
    Unavailable,
    #[error("timed out waiting for a position")]
    TimedOut,
}

impl LocationError {
    /// Everything except a missing capability is worth retrying.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, LocationError::Unsupported)
    }
}

/// Source of the current device position.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(&self) -> Result<Position, LocationError>;
}

/// Format a position the way the coordinates field expects it.
pub fn format_coordinates(position: Position) -> String {
    format!("{},{}", position.latitude, position.longitude)
}

/// Resolve the current position and write it into the draft's coordinates
/// field. The draft is untouched on failure.
pub async fn capture_coordinates(
    draft: &mut FormDraft,
    provider: &dyn LocationProvider,
) -> Result<(), LocationError> {
    let position = provider.current_position().await?;
    draft.coordinates = format_coordinates(position);
    tracing::info!(coordinates = %draft.coordinates, "location captured");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::coordinates_valid;

    struct Fixed(Position);

    #[async_trait]
    impl LocationProvider for Fixed {
        async fn current_position(&self) -> Result<Position, LocationError> {
            Ok(self.0)
        }
    }

    struct Denied;

    #[async_trait]
    impl LocationProvider for Denied {
        async fn current_position(&self) -> Result<Position, LocationError> {
            Err(LocationError::PermissionDenied)
        }
    }

    #[tokio::test]
    async fn capture_writes_a_valid_coordinate_pair() {
        let mut draft = FormDraft::default();
        let provider = Fixed(Position {
            latitude: -3.456,
            longitude: 89.012,
        });
        capture_coordinates(&mut draft, &provider).await.unwrap();
        assert_eq!(draft.coordinates, "-3.456,89.012");
        assert!(coordinates_valid(&draft.coordinates));
    }

    #[tokio::test]
    async fn denial_is_retryable_and_leaves_draft_untouched() {
        let mut draft = FormDraft {
            coordinates: "1.0,2.0".into(),
            ..Default::default()
        };
        let err = capture_coordinates(&mut draft, &Denied).await.unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(draft.coordinates, "1.0,2.0");
    }
}
