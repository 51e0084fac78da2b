use crate::error::AppError;
use crate::patch::Patch;
use crate::service::validation::{RequestValidator, NAME};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Hero {
    pub id: i64,
    pub name: String,
    pub super_name: String,
}

/// POST /heroes body.
#[derive(Debug, Default, Deserialize)]
pub struct NewHero {
    pub name: Option<String>,
    pub super_name: Option<String>,
}

impl NewHero {
    /// Returns `(name, super_name)`.
    pub fn validate(self) -> Result<(String, String), AppError> {
        let name = RequestValidator::required_text("name", self.name, &NAME)?;
        let super_name = RequestValidator::required_text("super_name", self.super_name, &NAME)?;
        Ok((name, super_name))
    }
}

/// PUT /heroes/:id body.
#[derive(Debug, Default, Deserialize)]
pub struct HeroPatch {
    #[serde(default)]
    pub name: Patch<String>,
    #[serde(default)]
    pub super_name: Patch<String>,
}

impl HeroPatch {
    /// Returns `(name, super_name)`; `None` keeps the stored value.
    pub fn validate(self) -> Result<(Option<String>, Option<String>), AppError> {
        let name = self
            .name
            .into_required("name")?
            .map(|v| RequestValidator::text("name", v, &NAME))
            .transpose()?;
        let super_name = self
            .super_name
            .into_required("super_name")?
            .map(|v| RequestValidator::text("super_name", v, &NAME))
            .transpose()?;
        Ok((name, super_name))
    }
}

/// Exact-match filters for GET /heroes.
#[derive(Debug, Default, Deserialize)]
pub struct HeroFilter {
    pub name: Option<String>,
    pub super_name: Option<String>,
}
