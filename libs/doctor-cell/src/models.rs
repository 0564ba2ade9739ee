use serde::{Deserialize, Serialize};

/// Roster entry. Email is the identity key; the roster is maintained by
/// administrators only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateDoctorRequest {
    pub name: String,
    pub email: String,
    pub specialty: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}
