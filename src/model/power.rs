use crate::error::AppError;
use crate::patch::Patch;
use crate::service::validation::{RequestValidator, DESCRIPTION, NAME};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Power {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewPower {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl NewPower {
    /// Returns `(name, description)`.
    pub fn validate(self) -> Result<(String, String), AppError> {
        let name = RequestValidator::required_text("name", self.name, &NAME)?;
        let description =
            RequestValidator::required_text("description", self.description, &DESCRIPTION)?;
        Ok((name, description))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PowerPatch {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub description: Patch<String>,
}

impl PowerPatch {
    /// Returns `(name, description)`; `None` keeps the stored value.
    pub fn validate(self) -> Result<(Option<String>, Option<String>), AppError> {
        let name = self
            .name
            .into_required("name")?
            .map(|v| RequestValidator::text("name", v, &NAME))
            .transpose()?;
        let description = self
            .description
            .into_required("description")?
            .map(|v| RequestValidator::text("description", v, &DESCRIPTION))
            .transpose()?;
        Ok((name, description))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct PowerFilter {
    pub name: Option<String>,
}
