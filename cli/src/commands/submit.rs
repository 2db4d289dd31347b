//! Submit command

use std::fs;
use std::path::Path;

use colored::Colorize;

use fieldform_core::draft::{FormDraft, PhotoAttachment};
use fieldform_core::validate::validate;
use fieldform_sdk::ApiClient;

use crate::SubmitArgs;

pub async fn handle(args: SubmitArgs, client: &ApiClient) -> Result<(), String> {
    let draft = build_draft(args)?;

    let valid = match validate(&draft) {
        Ok(valid) => valid,
        Err(errors) => {
            eprintln!("{}", "The draft has validation errors:".red().bold());
            for (field, message) in errors.iter() {
                eprintln!("  {}: {}", field.red(), message);
            }
            return Err(format!("{} field(s) failed validation", errors.len()));
        }
    };

    let result = client
        .submit_draft(&valid)
        .await
        .map_err(|e| format!("{} (draft not consumed, retry when ready)", e))?;

    if result.success {
        println!("{}", "Form submitted successfully".green().bold());
        if let Some(id) = result.submission_id {
            println!("Submission id: {}", id);
        }
        Ok(())
    } else {
        let message = result
            .message
            .unwrap_or_else(|| "Failed to submit form".to_string());
        Err(format!("{} (draft not consumed, retry when ready)", message))
    }
}

fn build_draft(args: SubmitArgs) -> Result<FormDraft, String> {
    let mut draft = match &args.from_json {
        Some(path) => {
            let content = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            serde_json::from_str(&content)
                .map_err(|e| format!("invalid draft JSON in {}: {}", path.display(), e))?
        }
        None => FormDraft::default(),
    };

    if let Some(v) = args.salesman {
        draft.salesman_name = v;
    }
    if let Some(v) = args.customer {
        draft.customer_name = v;
    }
    if let Some(v) = args.address {
        draft.customer_address = v;
    }
    if let Some(v) = args.home_no {
        draft.customer_home_no = v;
    }
    if let Some(v) = args.village {
        draft.village = v;
    }
    if let Some(v) = args.coordinates {
        draft.coordinates = v;
    }
    if let Some(v) = args.building_type {
        draft.building_type = v;
    }
    if !args.operators.is_empty() {
        draft.operators = args.operators;
    }
    if let Some(v) = args.remarks {
        draft.remarks = v;
    }

    for path in &args.photos {
        draft.building_photos.push(load_photo(path)?);
    }

    Ok(draft)
}

fn load_photo(path: &Path) -> Result<PhotoAttachment, String> {
    let content_type = content_type_for(path)?;
    let bytes = fs::read(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("photo")
        .to_string();
    Ok(PhotoAttachment::new(filename, content_type, bytes))
}

fn content_type_for(path: &Path) -> Result<&'static str, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => Ok("image/jpeg"),
        Some("png") => Ok("image/png"),
        Some("gif") => Ok("image/gif"),
        Some("webp") => Ok("image/webp"),
        _ => Err(format!(
            "unsupported photo type: {} (expected jpg, png, gif or webp)",
            path.display()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_follows_the_extension() {
        assert_eq!(content_type_for(Path::new("a.JPG")).unwrap(), "image/jpeg");
        assert_eq!(content_type_for(Path::new("b.webp")).unwrap(), "image/webp");
        assert!(content_type_for(Path::new("notes.pdf")).is_err());
        assert!(content_type_for(Path::new("noext")).is_err());
    }
}
