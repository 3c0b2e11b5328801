use crate::{
    models::{
        self,
        pet::{PetGender, PetSize},
    },
    utils,
};
use chrono::{NaiveDate, Utc};

/// Pet fields collected from a multipart request.
/// `None` means the field was not sent.
#[derive(Debug, Default, Clone)]
pub struct PetForm {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<String>,
    pub gender: Option<PetGender>,
    pub size: Option<PetSize>,
    pub medical_condition: Option<String>,
    pub behavioral_concern: Option<String>,
    pub treat: Option<String>,
    pub rabies_expiry: Option<NaiveDate>,
    pub profile_image: Option<models::Pic>,
}

impl PetForm {
    /// Applies a text field by its multipart name, unknown names are ignored
    pub fn set_text_field(&mut self, field_name: &str, value: &str) {
        let value = utils::clean_text(value);

        match field_name {
            "name" => self.name = Some(value),
            "breed" => self.breed = Some(value),
            "age" => self.age = Some(value),
            "gender" => self.gender = parse_upper(&value),
            "size" => self.size = parse_upper(&value),
            "medicalCondition" => self.medical_condition = Some(value),
            "behavioralConcern" => self.behavioral_concern = Some(value),
            "treat" => self.treat = Some(value),
            "rabiesExpiry" => self.rabies_expiry = parse_date(&value),
            _ => {}
        }
    }

    pub fn has_required_fields(&self) -> bool {
        let is_filled = |value: &Option<String>| value.as_ref().is_some_and(|v| !v.is_empty());

        is_filled(&self.name) && is_filled(&self.breed) && self.size.is_some()
    }

    /// New pet owned by `user_id`, without picture
    pub fn into_pet(self, user_id: i64) -> models::pet::Pet {
        let now = Utc::now();
        let pet = models::pet::Pet {
            user_app_id: user_id,
            created_at: now,
            updated_at: now,
            ..Default::default()
        };

        self.apply_to(pet)
    }

    /// Overwrites the fields of `pet` that were sent
    pub fn apply_to(self, mut pet: models::pet::Pet) -> models::pet::Pet {
        if let Some(name) = self.name.filter(|v| !v.is_empty()) {
            pet.name = name;
        }
        if let Some(breed) = self.breed.filter(|v| !v.is_empty()) {
            pet.breed = breed;
        }
        if let Some(age) = self.age {
            pet.age = age;
        }
        if let Some(gender) = self.gender {
            pet.gender = gender;
        }
        if let Some(size) = self.size {
            pet.size = size;
        }
        if let Some(medical_condition) = self.medical_condition {
            pet.medical_condition = medical_condition;
        }
        if let Some(behavioral_concern) = self.behavioral_concern {
            pet.behavioral_concern = behavioral_concern;
        }
        if let Some(treat) = self.treat {
            pet.treat = treat;
        }
        if self.rabies_expiry.is_some() {
            pet.rabies_expiry = self.rabies_expiry;
        }

        pet
    }
}

/// Enum values arrive as plain text, e.g. `BOY` or `XLarge`
fn parse_upper<T: serde::de::DeserializeOwned>(value: &str) -> Option<T> {
    serde_json::from_value(serde_json::Value::String(value.to_uppercase())).ok()
}

/// Accepts `YYYY-MM-DD` or a full ISO timestamp
fn parse_date(value: &str) -> Option<NaiveDate> {
    value
        .get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
}
