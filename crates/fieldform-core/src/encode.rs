//! Multipart submission encoding
//!
//! A validated draft is flattened into an ordered list of named parts. The
//! transport layer maps each [`FormPart`] 1:1 onto a multipart body part, so
//! the wire layout is fixed here: scalar fields one text part each,
//! `operators` one part per element in input order, and each photo its own
//! `buildingPhotos` part with the original filename and content type.

use crate::draft::fields;
use crate::validate::ValidDraft;

/// One named part of the submission payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart {
    Text {
        name: &'static str,
        value: String,
    },
    File {
        name: &'static str,
        filename: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn name(&self) -> &'static str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

impl ValidDraft {
    /// Flatten the draft into transport parts, in schema order.
    pub fn into_parts(self) -> Vec<FormPart> {
        let draft = self.into_inner();
        let mut parts = vec![
            text(fields::SALESMAN_NAME, draft.salesman_name),
            text(fields::CUSTOMER_NAME, draft.customer_name),
            text(fields::CUSTOMER_ADDRESS, draft.customer_address),
            text(fields::CUSTOMER_HOME_NO, draft.customer_home_no),
            text(fields::VILLAGE, draft.village),
            text(fields::COORDINATES, draft.coordinates),
            text(fields::BUILDING_TYPE, draft.building_type),
            text(fields::REMARKS, draft.remarks),
        ];

        for operator in draft.operators {
            parts.push(text(fields::OPERATORS, operator));
        }

        for photo in draft.building_photos {
            parts.push(FormPart::File {
                name: fields::BUILDING_PHOTOS,
                filename: photo.filename,
                content_type: photo.content_type,
                bytes: photo.bytes,
            });
        }

        parts
    }
}

fn text(name: &'static str, value: String) -> FormPart {
    FormPart::Text { name, value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{FormDraft, PhotoAttachment};
    use crate::validate::validate;

    fn draft_with(operators: &[&str], photos: usize) -> ValidDraft {
        let draft = FormDraft {
            salesman_name: "John Doe".into(),
            customer_name: "Jane".into(),
            customer_address: "12 Main St".into(),
            customer_home_no: "12A".into(),
            village: "Springfield".into(),
            coordinates: "3.456,89.012".into(),
            building_type: "Residential".into(),
            operators: operators.iter().map(|s| s.to_string()).collect(),
            remarks: "corner lot".into(),
            building_photos: (0..photos)
                .map(|i| {
                    PhotoAttachment::new(format!("photo{i}.jpg"), "image/jpeg", vec![i as u8; 8])
                })
                .collect(),
        };
        validate(&draft).expect("draft should validate")
    }

    #[test]
    fn operators_and_photos_produce_one_part_each() {
        let parts = draft_with(&["CGS", "FS"], 3).into_parts();

        let operators: Vec<_> = parts
            .iter()
            .filter_map(|p| match p {
                FormPart::Text { name, value } if *name == fields::OPERATORS => Some(value.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(operators, vec!["CGS", "FS"]);

        let photos: Vec<_> = parts
            .iter()
            .filter(|p| p.name() == fields::BUILDING_PHOTOS)
            .collect();
        assert_eq!(photos.len(), 3);
    }

    #[test]
    fn scalar_fields_keep_their_wire_names() {
        let parts = draft_with(&["CGS"], 0).into_parts();
        let names: Vec<_> = parts.iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec![
                fields::SALESMAN_NAME,
                fields::CUSTOMER_NAME,
                fields::CUSTOMER_ADDRESS,
                fields::CUSTOMER_HOME_NO,
                fields::VILLAGE,
                fields::COORDINATES,
                fields::BUILDING_TYPE,
                fields::REMARKS,
                fields::OPERATORS,
            ]
        );
    }

    #[test]
    fn photo_parts_preserve_filename_and_content_type() {
        let parts = draft_with(&["CGS"], 1).into_parts();
        let photo = parts
            .iter()
            .find(|p| p.name() == fields::BUILDING_PHOTOS)
            .unwrap();
        match photo {
            FormPart::File {
                filename,
                content_type,
                ..
            } => {
                assert_eq!(filename, "photo0.jpg");
                assert_eq!(content_type, "image/jpeg");
            }
            _ => panic!("expected a file part"),
        }
    }
}
