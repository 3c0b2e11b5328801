use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PetGender {
    #[default]
    #[display("BOY")]
    Boy,
    #[display("GIRL")]
    Girl,
}

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum PetSize {
    #[default]
    #[display("SMALL")]
    Small,
    #[display("MEDIUM")]
    Medium,
    #[display("LARGE")]
    Large,
    #[display("XLARGE")]
    #[serde(alias = "XLarge")]
    XLarge,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: i64,
    #[serde(rename = "userId")]
    pub user_app_id: i64,
    pub name: String,
    pub breed: String,
    pub age: String,
    pub gender: PetGender,
    pub size: PetSize,
    pub medical_condition: String,
    pub behavioral_concern: String,
    pub treat: String,
    pub rabies_expiry: Option<NaiveDate>,
    pub profile_image: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pet reference expanded inside appointment responses
#[derive(Debug, Default, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PetSummary {
    pub id: i64,
    pub name: String,
    pub breed: String,
    pub profile_image: String,
    pub size: PetSize,
}

impl From<&Pet> for PetSummary {
    fn from(pet: &Pet) -> Self {
        PetSummary {
            id: pet.id,
            name: pet.name.to_string(),
            breed: pet.breed.to_string(),
            profile_image: pet.profile_image.to_string(),
            size: pet.size,
        }
    }
}
