//! Fieldform Core
//!
//! Client-side logic for the field sales intake system: the searchable
//! selection state machine, pure draft validation, multipart submission
//! encoding, and the geolocation capture seam. Everything here is
//! transport-agnostic; the HTTP collaborator lives in `fieldform-sdk`.

pub mod draft;
pub mod encode;
pub mod location;
pub mod select;
pub mod validate;

pub use draft::{FormDraft, PhotoAttachment, Submission, SubmissionResult};
pub use encode::FormPart;
pub use location::{capture_coordinates, LocationError, LocationProvider, Position};
pub use select::{SearchError, SearchableSelect, Searcher, DEFAULT_DEBOUNCE};
pub use validate::{validate, FieldErrors, ValidDraft, MAX_TOTAL_PHOTO_BYTES};
