//! Start-up gating: the sign-in button is only rendered once both external
//! SDKs (Sheets API client, Google Identity Services) finished loading.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitState {
    pub api_client_ready: bool,
    pub identity_ready: bool,
}

impl InitState {
    pub fn both_ready(&self) -> bool {
        self.api_client_ready && self.identity_ready
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    ApiClient,
    Identity,
}

/// Decide whether marking `dep` ready should render the sign-in affordance.
///
/// True only on the edge into "both ready": repeated readiness notifications
/// for an already-ready dependency never trigger a second render.
pub fn mark_ready(state: &mut InitState, dep: Dependency) -> bool {
    let was_ready = state.both_ready();
    match dep {
        Dependency::ApiClient => state.api_client_ready = true,
        Dependency::Identity => state.identity_ready = true,
    }
    !was_ready && state.both_ready()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_only_on_transition_into_both_ready() {
        let mut st = InitState::default();
        assert!(!mark_ready(&mut st, Dependency::ApiClient));
        assert!(!st.both_ready());
        assert!(mark_ready(&mut st, Dependency::Identity));
        // Late duplicate callbacks are ignored.
        assert!(!mark_ready(&mut st, Dependency::Identity));
        assert!(!mark_ready(&mut st, Dependency::ApiClient));
    }

    #[test]
    fn order_does_not_matter() {
        let mut st = InitState::default();
        assert!(!mark_ready(&mut st, Dependency::Identity));
        assert!(mark_ready(&mut st, Dependency::ApiClient));
    }
}
