//! Async driver for the reservation form: owns the draft and runs single-flight submits.

use std::sync::Arc;

use shared::error::FieldError;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

use crate::{
    form::{
        Completion, Engagement, Field, OptionField, ReservationDraft, ReservationForm,
        SubmissionLifecycle, SubmitBlocked, TextField,
    },
    intake::{IntakeError, IntakeTransport},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    LifecycleChanged(SubmissionLifecycle),
    DraftReset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Succeeded,
    Failed,
    Invalid(Vec<(Field, FieldError)>),
    AlreadySubmitting,
}

pub struct ReservationController {
    form: Mutex<ReservationForm>,
    intake: Arc<dyn IntakeTransport>,
    events: broadcast::Sender<FormEvent>,
}

impl ReservationController {
    pub fn new(intake: Arc<dyn IntakeTransport>) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            form: Mutex::new(ReservationForm::new()),
            intake,
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<FormEvent> {
        self.events.subscribe()
    }

    pub async fn draft(&self) -> ReservationDraft {
        self.form.lock().await.draft().clone()
    }

    pub async fn lifecycle(&self) -> SubmissionLifecycle {
        self.form.lock().await.lifecycle()
    }

    pub async fn engagement(&self, field: impl Into<Field>) -> Engagement {
        self.form.lock().await.engagement(field)
    }

    pub async fn set_field(&self, field: TextField, value: impl Into<String>) {
        self.form.lock().await.set_field(field, value);
    }

    pub async fn toggle_option(&self, field: OptionField, option: &str, checked: bool) {
        self.form.lock().await.toggle_option(field, option, checked);
    }

    pub async fn mark_touched(&self, field: impl Into<Field>) {
        self.form.lock().await.mark_touched(field);
    }

    pub async fn is_field_invalid(&self, field: impl Into<Field>) -> bool {
        self.form.lock().await.is_field_invalid(field)
    }

    pub async fn field_error(&self, field: impl Into<Field>) -> Option<FieldError> {
        self.form.lock().await.field_error(field)
    }

    /// Validates everything and, if the draft passes, delivers it to the intake
    /// endpoint. The lifecycle enters `Submitting` before the first await point.
    ///
    /// Delivery runs on its own task, so dropping this future does not strand the
    /// lifecycle in `Submitting`; the outcome is still applied when delivery resolves.
    pub async fn submit(self: &Arc<Self>) -> SubmitOutcome {
        let payload = {
            let mut form = self.form.lock().await;
            match form.begin_submit() {
                Ok(payload) => payload,
                Err(SubmitBlocked::InFlight) => {
                    warn!("reservation submit ignored: previous submission still in flight");
                    return SubmitOutcome::AlreadySubmitting;
                }
                Err(SubmitBlocked::Invalid(errors)) => {
                    debug!(invalid_fields = errors.len(), "reservation draft failed validation");
                    return SubmitOutcome::Invalid(errors);
                }
            }
        };
        let _ = self
            .events
            .send(FormEvent::LifecycleChanged(SubmissionLifecycle::Submitting));
        info!(
            vehicle_types = payload.type_vehicule.len(),
            budget = %payload.budget,
            "submitting reservation"
        );

        let controller = Arc::clone(self);
        let delivery = tokio::spawn(async move {
            let result = controller.intake.deliver(&payload).await;
            controller.finish_submit(result).await
        });

        match delivery.await {
            Ok(outcome) => outcome,
            Err(join_error) => {
                error!(%join_error, "reservation delivery task did not complete");
                self.finish_submit(Err(IntakeError::Interrupted)).await
            }
        }
    }

    async fn finish_submit(&self, result: Result<(), IntakeError>) -> SubmitOutcome {
        let mut form = self.form.lock().await;
        match result {
            Ok(()) => {
                let completion = form.complete_submit(true);
                drop(form);
                if completion == Completion::NotInFlight {
                    return SubmitOutcome::Failed;
                }
                info!("reservation acknowledged by intake endpoint");
                if completion == (Completion::Delivered { draft_reset: true }) {
                    let _ = self.events.send(FormEvent::DraftReset);
                } else {
                    info!("draft edited during delivery; keeping the edits");
                }
                let _ = self
                    .events
                    .send(FormEvent::LifecycleChanged(SubmissionLifecycle::Succeeded));
                SubmitOutcome::Succeeded
            }
            Err(error) => {
                let completion = form.complete_submit(false);
                drop(form);
                if completion == Completion::NotInFlight {
                    return SubmitOutcome::Failed;
                }
                warn!(%error, "reservation submission failed");
                let _ = self
                    .events
                    .send(FormEvent::LifecycleChanged(SubmissionLifecycle::Failed));
                SubmitOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
