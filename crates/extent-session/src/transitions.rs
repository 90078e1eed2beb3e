//! Which actions each phase accepts
//!
//! Actions outside this table are dropped by the reducer with a warning.

use crate::action::Action;
use crate::state::Phase;

/// Check if `phase` accepts `action`
#[must_use]
pub fn accepts(phase: Phase, action: &Action) -> bool {
    match phase {
        Phase::Idle => matches!(
            action,
            Action::StartCreate { .. }
                | Action::StartEdit { .. }
                | Action::SaveSucceeded
                | Action::SaveFailed { .. }
        ),
        Phase::Creating => matches!(
            action,
            Action::StoreDraftComponent(_)
                | Action::AddDrawnFeatures(_)
                | Action::UpdateDrawnFeatures(_)
                | Action::DeleteDrawnFeatures(_)
                | Action::SelectSignal(_)
                | Action::SetDrawState(_)
                | Action::SetSelection(_)
                | Action::SaveCreate
                | Action::CancelCreate
                | Action::SaveSucceeded
                | Action::SaveFailed { .. }
        ),
        Phase::Editing { .. } => matches!(
            action,
            Action::StoreDraftComponent(_)
                | Action::AddDrawnLine(_)
                | Action::AddDrawnPoint(_)
                | Action::UpdateDrawnLine(_)
                | Action::UpdateDrawnPoint(_)
                | Action::DeleteDrawnLine(_)
                | Action::DeleteDrawnPoint(_)
                | Action::SelectSignal(_)
                | Action::SetDrawState(_)
                | Action::SetSelection(_)
                | Action::SaveEdit
                | Action::CancelEdit
                | Action::SaveSucceeded
                | Action::SaveFailed { .. }
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftComponent;
    use extent_router::FeatureTable;

    #[test]
    fn idle_accepts_only_starts_and_save_results() {
        let draft = DraftComponent::new(FeatureTable::DrawnLines);
        assert!(accepts(Phase::Idle, &Action::StartCreate { draft }));
        assert!(accepts(Phase::Idle, &Action::SaveSucceeded));
        assert!(!accepts(Phase::Idle, &Action::AddDrawnFeatures(vec![])));
        assert!(!accepts(Phase::Idle, &Action::SaveCreate));
    }

    #[test]
    fn flows_do_not_mix() {
        let editing = Phase::Editing {
            project_component_id: 7,
        };
        assert!(accepts(Phase::Creating, &Action::AddDrawnFeatures(vec![])));
        assert!(!accepts(Phase::Creating, &Action::AddDrawnLine(vec![])));
        assert!(accepts(editing, &Action::AddDrawnPoint(vec![])));
        assert!(!accepts(editing, &Action::AddDrawnFeatures(vec![])));
        assert!(!accepts(editing, &Action::SaveCreate));
    }

    #[test]
    fn active_phases_reject_restart() {
        let draft = DraftComponent::new(FeatureTable::DrawnLines);
        assert!(!accepts(Phase::Creating, &Action::StartCreate { draft }));
    }
}
