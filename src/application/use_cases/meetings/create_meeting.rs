use uuid::Uuid;

use crate::application::access::{self, Actor};
use crate::application::ports::document_repository::DocumentRepository;
use crate::application::ports::permission_port::PermissionPort;
use crate::application::use_cases::documents::error::DocumentUseCaseError;
use crate::domain::meetings::meeting::{MeetingFields, MeetingMetadata};

pub struct CreateMeeting<'a, R, P>
where
    R: DocumentRepository + ?Sized,
    P: PermissionPort + ?Sized,
{
    pub repo: &'a R,
    pub permissions: &'a P,
}

impl<'a, R, P> CreateMeeting<'a, R, P>
where
    R: DocumentRepository + ?Sized,
    P: PermissionPort + ?Sized,
{
    pub async fn execute(
        &self,
        actor: &Actor,
        project_id: Uuid,
        fields: MeetingFields,
    ) -> Result<MeetingMetadata, DocumentUseCaseError> {
        access::require_edit(self.permissions, actor, project_id).await?;
        let mut meetings = self
            .repo
            .list_meetings(project_id)
            .await
            .map_err(DocumentUseCaseError::Storage)?;
        let meeting = MeetingMetadata::new(project_id, fields);
        meetings.push(meeting.clone());
        self.repo
            .save_meetings(project_id, &meetings)
            .await
            .map_err(DocumentUseCaseError::Storage)?;
        tracing::info!(%project_id, meeting_id = %meeting.id, "meeting_created");
        Ok(meeting)
    }
}
