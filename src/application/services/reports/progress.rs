use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::meetings::meeting::MeetingMetadata;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum ReportPhase {
    Idle,
    DialogOpen,
    Generating,
    Done,
    Failed { reason: String },
}

/// What the report dialog shows. Progress and step are pushed by the
/// external report job; nothing here computes them.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportProgressState {
    pub phase: ReportPhase,
    pub dialog_meeting: Option<MeetingMetadata>,
    pub is_generating: bool,
    pub progress: u8,
    pub current_step: String,
}

impl Default for ReportProgressState {
    fn default() -> Self {
        Self {
            phase: ReportPhase::Idle,
            dialog_meeting: None,
            is_generating: false,
            progress: 0,
            current_step: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ReportAction {
    OpenDialog(MeetingMetadata),
    SetGenerating(bool),
    SetProgress(u32),
    SetCurrentStep(String),
    Fail(String),
    CloseDialog,
}

impl ReportProgressState {
    pub fn is_dialog_open(&self) -> bool {
        self.dialog_meeting.is_some()
    }
}

pub fn reduce(state: ReportProgressState, action: ReportAction) -> ReportProgressState {
    match action {
        ReportAction::OpenDialog(meeting) => ReportProgressState {
            phase: ReportPhase::DialogOpen,
            dialog_meeting: Some(meeting),
            is_generating: false,
            progress: 0,
            current_step: String::new(),
        },
        ReportAction::SetGenerating(true) => {
            if !state.is_dialog_open() {
                return state;
            }
            ReportProgressState {
                phase: ReportPhase::Generating,
                is_generating: true,
                ..state
            }
        }
        ReportAction::SetGenerating(false) => {
            if !state.is_generating {
                return state;
            }
            ReportProgressState {
                phase: ReportPhase::Done,
                is_generating: false,
                ..state
            }
        }
        ReportAction::Fail(reason) => {
            if !state.is_generating {
                return state;
            }
            ReportProgressState {
                phase: ReportPhase::Failed { reason },
                is_generating: false,
                ..state
            }
        }
        ReportAction::SetProgress(n) => ReportProgressState {
            progress: n.min(100) as u8,
            ..state
        },
        ReportAction::SetCurrentStep(label) => ReportProgressState {
            current_step: label,
            ..state
        },
        // closing mid-generation would tear down what the job reports into
        ReportAction::CloseDialog if state.is_generating => state,
        ReportAction::CloseDialog => ReportProgressState::default(),
    }
}
