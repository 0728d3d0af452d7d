pub mod create_meeting;
pub mod list_meetings;
