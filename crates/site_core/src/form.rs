//! Reservation draft, per-field validation and submission lifecycle transitions.

use std::collections::BTreeSet;

use shared::{domain::BudgetBracket, error::FieldError, protocol::ReservationPayload};

pub const NAME_MIN_LEN: usize = 2;
pub const PHONE_MIN_LEN: usize = 8;
pub const PHONE_MAX_LEN: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Phone,
    VehicleTypes,
    FuelTypes,
    Transmission,
    DesiredModel,
    Budget,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::FirstName,
        Field::LastName,
        Field::Phone,
        Field::VehicleTypes,
        Field::FuelTypes,
        Field::Transmission,
        Field::DesiredModel,
        Field::Budget,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Single-valued fields edited through text inputs and selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    FirstName,
    LastName,
    Phone,
    DesiredModel,
    Budget,
}

impl From<TextField> for Field {
    fn from(value: TextField) -> Self {
        match value {
            TextField::FirstName => Field::FirstName,
            TextField::LastName => Field::LastName,
            TextField::Phone => Field::Phone,
            TextField::DesiredModel => Field::DesiredModel,
            TextField::Budget => Field::Budget,
        }
    }
}

/// Checkbox groups holding a set of selected options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionField {
    VehicleTypes,
    FuelTypes,
    Transmission,
}

impl From<OptionField> for Field {
    fn from(value: OptionField) -> Self {
        match value {
            OptionField::VehicleTypes => Field::VehicleTypes,
            OptionField::FuelTypes => Field::FuelTypes,
            OptionField::Transmission => Field::Transmission,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Engagement {
    pub touched: bool,
    pub dirty: bool,
}

impl Engagement {
    pub fn is_engaged(&self) -> bool {
        self.touched || self.dirty
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReservationDraft {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub vehicle_types: BTreeSet<String>,
    pub fuel_types: BTreeSet<String>,
    pub transmission: BTreeSet<String>,
    pub desired_model: String,
    pub budget: String,
}

impl ReservationDraft {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::FirstName => &self.first_name,
            TextField::LastName => &self.last_name,
            TextField::Phone => &self.phone,
            TextField::DesiredModel => &self.desired_model,
            TextField::Budget => &self.budget,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::FirstName => &mut self.first_name,
            TextField::LastName => &mut self.last_name,
            TextField::Phone => &mut self.phone,
            TextField::DesiredModel => &mut self.desired_model,
            TextField::Budget => &mut self.budget,
        }
    }

    pub fn options(&self, field: OptionField) -> &BTreeSet<String> {
        match field {
            OptionField::VehicleTypes => &self.vehicle_types,
            OptionField::FuelTypes => &self.fuel_types,
            OptionField::Transmission => &self.transmission,
        }
    }

    fn options_mut(&mut self, field: OptionField) -> &mut BTreeSet<String> {
        match field {
            OptionField::VehicleTypes => &mut self.vehicle_types,
            OptionField::FuelTypes => &mut self.fuel_types,
            OptionField::Transmission => &mut self.transmission,
        }
    }

    pub fn to_payload(&self) -> ReservationPayload {
        ReservationPayload {
            prenom: self.first_name.clone(),
            nom: self.last_name.clone(),
            telephone: self.phone.clone(),
            modele_souhaite: self.desired_model.clone(),
            budget: self.budget.clone(),
            type_vehicule: self.vehicle_types.iter().cloned().collect(),
            type_carburant: self.fuel_types.iter().cloned().collect(),
            transmission: self.transmission.iter().cloned().collect(),
        }
    }
}

pub fn validate_name(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if value.chars().count() < NAME_MIN_LEN {
        return Err(FieldError::TooShort { min: NAME_MIN_LEN });
    }
    Ok(())
}

/// Optional leading `+`, then digits and spaces with at least one digit; the whole
/// value is 8 to 15 characters.
pub fn validate_phone(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    let body = value.strip_prefix('+').unwrap_or(value);
    let len = value.chars().count();
    let well_formed = body.chars().any(|c| c.is_ascii_digit())
        && body.chars().all(|c| c.is_ascii_digit() || c == ' ')
        && (PHONE_MIN_LEN..=PHONE_MAX_LEN).contains(&len);
    if well_formed {
        Ok(())
    } else {
        Err(FieldError::InvalidPhone)
    }
}

pub fn validate_budget(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    value
        .parse::<BudgetBracket>()
        .map(|_| ())
        .map_err(|_| FieldError::UnknownBudget)
}

pub fn validate_field(draft: &ReservationDraft, field: Field) -> Result<(), FieldError> {
    match field {
        Field::FirstName => validate_name(&draft.first_name),
        Field::LastName => validate_name(&draft.last_name),
        Field::Phone => validate_phone(&draft.phone),
        Field::VehicleTypes if draft.vehicle_types.is_empty() => Err(FieldError::Required),
        Field::Budget => validate_budget(&draft.budget),
        Field::VehicleTypes | Field::FuelTypes | Field::Transmission | Field::DesiredModel => {
            Ok(())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionLifecycle {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitBlocked {
    InFlight,
    Invalid(Vec<(Field, FieldError)>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    NotInFlight,
    Delivered { draft_reset: bool },
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReservationForm {
    draft: ReservationDraft,
    engagement: [Engagement; Field::ALL.len()],
    lifecycle: SubmissionLifecycle,
    sent: Option<ReservationDraft>,
}

impl ReservationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &ReservationDraft {
        &self.draft
    }

    pub fn lifecycle(&self) -> SubmissionLifecycle {
        self.lifecycle
    }

    pub fn engagement(&self, field: impl Into<Field>) -> Engagement {
        self.engagement[field.into().index()]
    }

    pub fn set_field(&mut self, field: TextField, value: impl Into<String>) {
        *self.draft.text_mut(field) = value.into();
        self.engagement[Field::from(field).index()].dirty = true;
    }

    /// Adds or removes `option`. Checkbox interaction counts as engagement immediately.
    pub fn toggle_option(&mut self, field: OptionField, option: &str, checked: bool) {
        let options = self.draft.options_mut(field);
        let changed = if checked {
            options.insert(option.to_string())
        } else {
            options.remove(option)
        };
        let engagement = &mut self.engagement[Field::from(field).index()];
        engagement.touched = true;
        engagement.dirty |= changed;
    }

    pub fn mark_touched(&mut self, field: impl Into<Field>) {
        self.engagement[field.into().index()].touched = true;
    }

    fn touch_all(&mut self) {
        for engagement in &mut self.engagement {
            engagement.touched = true;
        }
    }

    /// Constraint failure, reported only once the user engaged with the field.
    pub fn field_error(&self, field: impl Into<Field>) -> Option<FieldError> {
        let field = field.into();
        if !self.engagement[field.index()].is_engaged() {
            return None;
        }
        validate_field(&self.draft, field).err()
    }

    pub fn is_field_invalid(&self, field: impl Into<Field>) -> bool {
        self.field_error(field).is_some()
    }

    pub fn errors(&self) -> Vec<(Field, FieldError)> {
        Field::ALL
            .iter()
            .filter_map(|field| {
                validate_field(&self.draft, *field)
                    .err()
                    .map(|error| (*field, error))
            })
            .collect()
    }

    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Runs the validate-all pass and, when the draft is valid, enters `Submitting`
    /// and returns the wire payload to deliver.
    pub fn begin_submit(&mut self) -> Result<ReservationPayload, SubmitBlocked> {
        if self.lifecycle == SubmissionLifecycle::Submitting {
            return Err(SubmitBlocked::InFlight);
        }
        self.touch_all();
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(SubmitBlocked::Invalid(errors));
        }
        self.lifecycle = SubmissionLifecycle::Submitting;
        self.sent = Some(self.draft.clone());
        Ok(self.draft.to_payload())
    }

    /// Applies the intake outcome. A delivered draft is cleared unless it was edited
    /// while in flight, so nothing typed meanwhile is lost; a failed one is kept for retry.
    pub fn complete_submit(&mut self, delivered: bool) -> Completion {
        if self.lifecycle != SubmissionLifecycle::Submitting {
            return Completion::NotInFlight;
        }
        let sent = self.sent.take();
        if !delivered {
            self.lifecycle = SubmissionLifecycle::Failed;
            return Completion::Failed;
        }
        self.lifecycle = SubmissionLifecycle::Succeeded;
        let draft_reset = sent.as_ref() == Some(&self.draft);
        if draft_reset {
            self.reset_draft();
        }
        Completion::Delivered { draft_reset }
    }

    pub fn reset_draft(&mut self) {
        self.draft = ReservationDraft::default();
        self.engagement = Default::default();
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
