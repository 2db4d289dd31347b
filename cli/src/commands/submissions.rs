//! Submissions commands (admin)

use serde::Serialize;
use tabled::Tabled;

use fieldform_core::draft::Submission;
use fieldform_sdk::ApiClient;

use crate::output::OutputFormat;
use crate::session::FileKeyStore;
use crate::SubmissionCommands;

use super::admin_session;

#[derive(Debug, Serialize, Tabled)]
struct SubmissionRow {
    id: String,
    timestamp: String,
    salesman: String,
    customer: String,
    village: String,
    building_type: String,
    photos: usize,
}

impl From<&Submission> for SubmissionRow {
    fn from(s: &Submission) -> Self {
        Self {
            id: s.id.clone(),
            timestamp: s.timestamp.clone(),
            salesman: s.salesman_name.clone(),
            customer: s.customer_name.clone(),
            village: s.village.clone(),
            building_type: s.building_type.clone(),
            photos: s.building_photos.as_ref().map_or(0, |p| p.len()),
        }
    }
}

pub async fn handle(
    action: SubmissionCommands,
    client: &ApiClient,
    store: &FileKeyStore,
    api_key: Option<&str>,
    format: OutputFormat,
) -> Result<(), String> {
    let session = admin_session(api_key, store)?;
    match action {
        SubmissionCommands::List => {
            let submissions = client
                .submissions(&session)
                .await
                .map_err(map_admin_error)?;
            let rows: Vec<SubmissionRow> = submissions.iter().map(SubmissionRow::from).collect();
            format.print_rows(&rows);
        }
        SubmissionCommands::Get { id } => {
            let submission = client
                .submission(&id, &session)
                .await
                .map_err(map_admin_error)?;
            format.print(&submission);
        }
    }
    Ok(())
}

fn map_admin_error(e: fieldform_sdk::Error) -> String {
    if e.is_unauthorized() {
        "invalid or expired API key. Run `fieldform login <key>` again".into()
    } else {
        e.to_string()
    }
}
