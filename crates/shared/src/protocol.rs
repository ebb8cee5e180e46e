use serde::{Deserialize, Serialize};

/// JSON body posted to the lead-intake endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPayload {
    pub prenom: String,
    pub nom: String,
    pub telephone: String,
    pub modele_souhaite: String,
    pub budget: String,
    pub type_vehicule: Vec<String>,
    pub type_carburant: Vec<String>,
    pub transmission: Vec<String>,
}
