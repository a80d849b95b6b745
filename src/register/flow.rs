//! RegistrationFlow — runs the session reducer and performs its effects.
//!
//! The account-creation call runs on its own task so the caller keeps
//! handling input while it is outstanding. Its outcome comes back over a
//! channel and must be fed in with `resolve` (or `settle`).

use std::sync::Arc;

use tokio::sync::mpsc;

use super::session::{Effect, Event, FormRules, Navigation, RegistrationSession};
use super::stage::Stage;
use super::submitter::{AccountApi, SubmissionOutcome};

/// Receives the post-registration navigation.
pub trait Navigator: Send + Sync {
    fn navigate(&self, navigation: Navigation);
}

/// Owns one registration session and the collaborators its effects need.
pub struct RegistrationFlow {
    session: RegistrationSession,
    rules: FormRules,
    api: Arc<dyn AccountApi>,
    navigator: Arc<dyn Navigator>,
    outcome_tx: mpsc::UnboundedSender<SubmissionOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SubmissionOutcome>,
}

impl RegistrationFlow {
    pub fn new(rules: FormRules, api: Arc<dyn AccountApi>, navigator: Arc<dyn Navigator>) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            session: RegistrationSession::new(),
            rules,
            api,
            navigator,
            outcome_tx,
            outcome_rx,
        }
    }

    pub fn session(&self) -> &RegistrationSession {
        &self.session
    }

    pub fn stage(&self) -> Stage {
        self.session.stage
    }

    pub fn error(&self) -> Option<&str> {
        self.session.error.as_deref()
    }

    /// Apply an event and start every effect it produces.
    ///
    /// Must be called from within a tokio runtime: account creation is
    /// spawned, not awaited.
    pub fn dispatch(&mut self, event: Event) {
        for effect in self.session.handle(event, &self.rules) {
            match effect {
                Effect::CreateAccount(account) => {
                    let api = Arc::clone(&self.api);
                    let tx = self.outcome_tx.clone();
                    let session = self.session.id;
                    tokio::spawn(async move {
                        let outcome =
                            SubmissionOutcome::from_result(api.create_account(&account).await);
                        tracing::debug!(%session, ?outcome, "Account creation finished");
                        // The receiver lives as long as the flow.
                        let _ = tx.send(outcome);
                    });
                }
                Effect::Navigate(navigation) => {
                    tracing::info!(
                        session = %self.session.id,
                        route = %navigation.route,
                        just_registered = navigation.just_registered,
                        "Navigating"
                    );
                    self.navigator.navigate(navigation);
                }
            }
        }
    }

    /// Dispatch whatever the "get started" control means in the current stage.
    pub fn press_get_started(&mut self) {
        let event = Event::get_started_for(self.session.stage);
        self.dispatch(event);
    }

    /// Wait for the next finished account-creation call.
    ///
    /// Pends forever when nothing is in flight, so it is safe to use as a
    /// `select!` branch.
    pub async fn next_outcome(&mut self) -> SubmissionOutcome {
        match self.outcome_rx.recv().await {
            Some(outcome) => outcome,
            // The flow holds a sender, so the channel never closes.
            None => std::future::pending().await,
        }
    }

    /// Feed a finished call back into the session.
    pub fn resolve(&mut self, outcome: SubmissionOutcome) {
        self.dispatch(Event::SubmissionResolved(outcome));
    }

    /// Wait until no account-creation call is outstanding.
    pub async fn settle(&mut self) {
        while self.session.stage == Stage::Submitting {
            let outcome = self.next_outcome().await;
            self.resolve(outcome);
        }
    }
}
