use std::sync::Arc;

use anyhow::Result;
use tracing::info;

pub mod config;
pub mod controller;
pub mod form;
pub mod intake;
pub mod page;
pub mod reveal;

pub use config::{load_settings, prepare_intake_url, Settings};
pub use controller::{FormEvent, ReservationController, SubmitOutcome};
pub use form::{
    Engagement, Field, OptionField, ReservationDraft, ReservationForm, SubmissionLifecycle,
    TextField,
};
pub use intake::{HttpIntake, IntakeError, IntakeTransport, MissingIntake};
pub use page::NavMenu;
pub use reveal::{
    LayoutQuery, RevealSubscription, RevealTracker, SectionVisibility, ViewportSample,
};

/// Reservation controller posting to the intake endpoint named by `settings`.
pub fn controller_from_settings(settings: &Settings) -> Result<Arc<ReservationController>> {
    let endpoint = prepare_intake_url(&settings.site_origin, &settings.intake_url)?;
    info!(%endpoint, "reservation intake configured");
    Ok(ReservationController::new(Arc::new(HttpIntake::new(
        endpoint,
    ))))
}

/// Reveal tracker with every page section registered at the configured offset.
pub fn tracker_from_settings(settings: &Settings) -> RevealTracker {
    RevealTracker::for_page(settings.reveal_offset_px)
}

/// Model years offered by the form, from this year down to the configured earliest.
pub fn model_years_from_settings(settings: &Settings) -> Vec<i32> {
    page::model_years_until_now(settings.earliest_model_year)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
