use serde::Deserialize;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Fields left out keep their current value
#[derive(Deserialize, Debug, Default, Clone)]
pub struct UpdateProfileForm {
    pub username: Option<String>,
    pub email: Option<String>,
}
