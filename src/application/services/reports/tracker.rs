use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::application::access::Actor;
use crate::application::services::reports::progress::{
    ReportAction, ReportProgressState, reduce,
};

/// Report dialog state, one slot per actor. Created by the composition root
/// and handed to whoever drives the report job.
#[derive(Default)]
pub struct ReportTracker {
    sessions: Mutex<HashMap<Actor, ReportProgressState>>,
}

impl ReportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn dispatch(&self, actor: &Actor, action: ReportAction) -> ReportProgressState {
        let mut sessions = self.sessions.lock().await;
        let current = sessions.get(actor).cloned().unwrap_or_default();
        let action_name = action_name(&action);
        let before = current.phase.clone();
        let next = reduce(current.clone(), action);
        if next == current {
            tracing::debug!(?actor, action = action_name, phase = ?before, "report_action_ignored");
        } else if next.phase != before {
            tracing::info!(?actor, action = action_name, from = ?before, to = ?next.phase, "report_phase_changed");
        }
        // Idle slots carry nothing worth keeping.
        if next == ReportProgressState::default() {
            sessions.remove(actor);
        } else {
            sessions.insert(actor.clone(), next.clone());
        }
        next
    }

    pub async fn snapshot(&self, actor: &Actor) -> ReportProgressState {
        self.sessions
            .lock()
            .await
            .get(actor)
            .cloned()
            .unwrap_or_default()
    }
}

fn action_name(action: &ReportAction) -> &'static str {
    match action {
        ReportAction::OpenDialog(_) => "open_dialog",
        ReportAction::SetGenerating(_) => "set_generating",
        ReportAction::SetProgress(_) => "set_progress",
        ReportAction::SetCurrentStep(_) => "set_current_step",
        ReportAction::Fail(_) => "fail",
        ReportAction::CloseDialog => "close_dialog",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::reports::progress::ReportPhase;
    use crate::domain::meetings::meeting::{MeetingFields, MeetingMetadata};
    use uuid::Uuid;

    fn user(name: &str) -> Actor {
        Actor::User(name.to_string())
    }

    fn meeting() -> MeetingMetadata {
        MeetingMetadata::new(Uuid::new_v4(), MeetingFields::default())
    }

    #[tokio::test]
    async fn dispatch_persists_state_between_calls() {
        let tracker = ReportTracker::new();
        let ana = user("ana");
        tracker.dispatch(&ana, ReportAction::OpenDialog(meeting())).await;
        tracker.dispatch(&ana, ReportAction::SetGenerating(true)).await;
        tracker.dispatch(&ana, ReportAction::SetProgress(30)).await;

        let closed = tracker.dispatch(&ana, ReportAction::CloseDialog).await;
        assert_eq!(closed.phase, ReportPhase::Generating);
        assert_eq!(tracker.snapshot(&ana).await.progress, 30);
    }

    #[tokio::test]
    async fn each_actor_keeps_its_own_dialog() {
        let tracker = ReportTracker::new();
        let ana = user("ana");
        let bruno = user("bruno");

        tracker.dispatch(&ana, ReportAction::OpenDialog(meeting())).await;
        tracker.dispatch(&ana, ReportAction::SetGenerating(true)).await;
        tracker.dispatch(&ana, ReportAction::SetProgress(60)).await;

        assert_eq!(tracker.snapshot(&bruno).await, ReportProgressState::default());

        tracker.dispatch(&bruno, ReportAction::OpenDialog(meeting())).await;
        let bruno_closed = tracker.dispatch(&bruno, ReportAction::CloseDialog).await;
        assert_eq!(bruno_closed.phase, ReportPhase::Idle);

        let ana_state = tracker.snapshot(&ana).await;
        assert_eq!(ana_state.phase, ReportPhase::Generating);
        assert_eq!(ana_state.progress, 60);
    }

    #[tokio::test]
    async fn closed_dialogs_do_not_linger() {
        let tracker = ReportTracker::new();
        let ana = user("ana");
        tracker.dispatch(&ana, ReportAction::OpenDialog(meeting())).await;
        tracker.dispatch(&ana, ReportAction::CloseDialog).await;
        assert!(tracker.sessions.lock().await.is_empty());
    }
}
