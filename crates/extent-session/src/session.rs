//! Mutable session handle

use crate::action::{Action, Command};
use crate::reducer::reduce;
use crate::state::{Phase, SessionState};
use extent_feature::Feature;

/// Owns a [`SessionState`] and applies actions to it
///
/// Thin wrapper over [`reduce`] for callers that hold the session in one
/// place instead of threading state through.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    dispatched: u64,
}

impl Session {
    /// Create idle session
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action, returning the commands it produced
    pub fn dispatch(&mut self, action: Action) -> Vec<Command> {
        let name = action.name();
        let transition = reduce(std::mem::take(&mut self.state), action);
        self.state = transition.state;
        self.dispatched += 1;
        tracing::debug!(
            action = name,
            phase = ?self.state.phase,
            features = self.state.features().len(),
            commands = transition.commands.len(),
            "dispatched"
        );
        transition.commands
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current phase
    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Draft features
    #[inline]
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        self.state.features()
    }

    /// Number of actions dispatched so far
    #[inline]
    #[must_use]
    pub fn dispatched(&self) -> u64 {
        self.dispatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::DraftComponent;
    use extent_feature::{assign_draw_provenance, DrawMode, Geometry};
    use extent_router::FeatureTable;

    #[test]
    fn dispatch_threads_state() {
        let mut session = Session::new();
        let commands = session.dispatch(Action::StartCreate {
            draft: DraftComponent::new(FeatureTable::DrawnPoints),
        });
        assert_eq!(commands, vec![Command::SyncDrawTool(vec![])]);
        assert_eq!(session.phase(), Phase::Creating);

        let raw = Feature::new(Geometry::Point(vec![-97.7, 30.2]));
        let drawn = assign_draw_provenance(&raw, DrawMode::Points);
        session.dispatch(Action::AddDrawnFeatures(vec![drawn]));
        assert_eq!(session.features().len(), 1);
        assert_eq!(session.dispatched(), 2);
    }

    #[test]
    fn rejected_action_keeps_state() {
        let mut session = Session::new();
        let commands = session.dispatch(Action::SaveCreate);
        assert!(commands.is_empty());
        assert_eq!(session.state(), &SessionState::default());
    }
}
