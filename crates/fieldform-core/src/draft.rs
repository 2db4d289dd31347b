//! Form draft and submission records

use serde::{Deserialize, Serialize};

/// Wire-level field names, shared by validation errors and multipart encoding.
pub mod fields {
    pub const SALESMAN_NAME: &str = "salesmanName";
    pub const CUSTOMER_NAME: &str = "customerName";
    pub const CUSTOMER_ADDRESS: &str = "customerAddress";
    pub const CUSTOMER_HOME_NO: &str = "customerHomeNo";
    pub const VILLAGE: &str = "village";
    pub const COORDINATES: &str = "coordinates";
    pub const BUILDING_TYPE: &str = "buildingType";
    pub const OPERATORS: &str = "operators";
    pub const REMARKS: &str = "remarks";
    pub const BUILDING_PHOTOS: &str = "buildingPhotos";
}

/// In-memory, not-yet-submitted form record.
///
/// Created empty when an intake session starts, mutated field by field, and
/// discarded after a successful submission. It is never persisted between
/// sessions; on a failed submission the draft is left untouched so the user
/// can retry without re-entering data.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormDraft {
    pub salesman_name: String,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_home_no: String,
    pub village: String,
    /// Free-text `"<lat>,<lon>"` pair, manual or captured from a device.
    pub coordinates: String,
    pub building_type: String,
    pub operators: Vec<String>,
    pub remarks: String,
    #[serde(skip)]
    pub building_photos: Vec<PhotoAttachment>,
}

/// A file attached to the draft, kept in memory until submission.
#[derive(Debug, Clone)]
pub struct PhotoAttachment {
    /// Original file name, preserved through the multipart encoding.
    pub filename: String,
    /// MIME type, e.g. `image/jpeg`.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl PhotoAttachment {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Outcome of `POST /submit-form`.
///
/// `success: false` with a message is a normal, recoverable outcome; the
/// submission identifier is only present on success and is used purely for
/// display and navigation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A stored submission as returned by the admin endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub timestamp: String,
    pub salesman_name: String,
    pub customer_name: String,
    pub customer_address: String,
    #[serde(default)]
    pub village: String,
    pub coordinates: String,
    pub building_type: String,
    #[serde(default)]
    pub operators: Vec<String>,
    /// Object names or URLs of the stored photos.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_photos: Option<Vec<String>>,
}
