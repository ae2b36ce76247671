//! Protected-view gating

use crate::session::{NavTarget, SessionState};

/// What a protected view should do for a given session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Identity is still being resolved; show a neutral loading state
    Pending,
    Redirect(NavTarget),
    Render,
}

impl GuardDecision {
    pub fn decide(state: &SessionState) -> Self {
        match state {
            SessionState::Initializing => Self::Pending,
            SessionState::Anonymous => Self::Redirect(NavTarget::Login),
            SessionState::Authenticated(_) => Self::Render,
        }
    }
}

impl From<&SessionState> for GuardDecision {
    fn from(state: &SessionState) -> Self {
        Self::decide(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionUser;

    #[test]
    fn test_initializing_waits_instead_of_redirecting() {
        assert_eq!(
            GuardDecision::decide(&SessionState::Initializing),
            GuardDecision::Pending
        );
    }

    #[test]
    fn test_anonymous_goes_to_login() {
        assert_eq!(
            GuardDecision::decide(&SessionState::Anonymous),
            GuardDecision::Redirect(NavTarget::Login)
        );
    }

    #[test]
    fn test_authenticated_renders() {
        let user = SessionUser {
            id: 3,
            username: "olena".into(),
            email: "olena@example.com".into(),
            profile: Default::default(),
        };
        assert_eq!(
            GuardDecision::from(&SessionState::Authenticated(user)),
            GuardDecision::Render
        );
    }
}
