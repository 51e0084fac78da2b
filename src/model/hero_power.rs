use crate::error::AppError;
use crate::patch::Patch;
use crate::service::validation::RequestValidator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strength {
    Strong,
    Weak,
    Average,
}

impl Strength {
    pub const ALL: [Strength; 3] = [Strength::Strong, Strength::Weak, Strength::Average];

    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Weak => "Weak",
            Strength::Average => "Average",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("strength must be one of: Strong, Weak, Average (got '{0}')")]
pub struct UnknownStrength(pub String);

impl FromStr for Strength {
    type Err = UnknownStrength;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strength::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownStrength(s.to_string()))
    }
}

impl TryFrom<String> for Strength {
    type Error = UnknownStrength;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UnknownStrength> for AppError {
    fn from(e: UnknownStrength) -> Self {
        AppError::Validation(e.to_string())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct HeroPower {
    pub id: i64,
    #[sqlx(try_from = "String")]
    pub strength: Strength,
    pub hero_id: i64,
    pub power_id: i64,
}

/// POST /hero_powers body. `strength` stays a string so an unknown value is a
/// validation error rather than a JSON decode failure.
#[derive(Debug, Default, Deserialize)]
pub struct NewHeroPower {
    pub strength: Option<String>,
    pub hero_id: Option<i64>,
    pub power_id: Option<i64>,
}

impl NewHeroPower {
    /// Returns `(strength, hero_id, power_id)`. Dangling ids are rejected by the foreign keys.
    pub fn validate(self) -> Result<(Strength, i64, i64), AppError> {
        let strength: Strength = RequestValidator::required("strength", self.strength)?.parse()?;
        let hero_id = RequestValidator::required("hero_id", self.hero_id)?;
        let power_id = RequestValidator::required("power_id", self.power_id)?;
        Ok((strength, hero_id, power_id))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HeroPowerPatch {
    #[serde(default)]
    pub strength: Patch<String>,
    #[serde(default)]
    pub hero_id: Patch<i64>,
    #[serde(default)]
    pub power_id: Patch<i64>,
}

impl HeroPowerPatch {
    /// Returns `(strength, hero_id, power_id)`; `None` keeps the stored value.
    pub fn validate(self) -> Result<(Option<Strength>, Option<i64>, Option<i64>), AppError> {
        let strength = match self.strength.into_required("strength")? {
            Some(s) => Some(s.parse::<Strength>()?),
            None => None,
        };
        let hero_id = self.hero_id.into_required("hero_id")?;
        let power_id = self.power_id.into_required("power_id")?;
        Ok((strength, hero_id, power_id))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct HeroPowerFilter {
    pub hero_id: Option<i64>,
    pub power_id: Option<i64>,
    pub strength: Option<Strength>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strength_parses_exact_names() {
        for s in Strength::ALL {
            assert_eq!(s.as_str().parse::<Strength>().unwrap(), s);
        }
        assert!("strong".parse::<Strength>().is_err());
        assert!("Mighty".parse::<Strength>().is_err());
    }

    #[test]
    fn serializes_strength_as_string() {
        let hp = HeroPower {
            id: 1,
            strength: Strength::Average,
            hero_id: 2,
            power_id: 3,
        };
        let value = serde_json::to_value(&hp).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 1, "strength": "Average", "hero_id": 2, "power_id": 3})
        );
        assert_eq!(serde_json::from_value::<HeroPower>(value).unwrap(), hp);
    }

    #[test]
    fn create_validation() {
        let body: NewHeroPower =
            serde_json::from_str(r#"{"strength": "Strong", "hero_id": 1, "power_id": 2}"#).unwrap();
        assert_eq!(body.validate().unwrap(), (Strength::Strong, 1, 2));

        let body: NewHeroPower =
            serde_json::from_str(r#"{"strength": "Mighty", "hero_id": 1, "power_id": 2}"#).unwrap();
        assert!(matches!(body.validate().unwrap_err(), AppError::Validation(_)));

        let body: NewHeroPower = serde_json::from_str(r#"{"strength": "Weak", "hero_id": 1}"#).unwrap();
        assert!(matches!(body.validate().unwrap_err(), AppError::Validation(m) if m == "power_id is required"));
    }

    #[test]
    fn patch_updates_only_given_fields() {
        let patch: HeroPowerPatch = serde_json::from_str(r#"{"strength": "Strong"}"#).unwrap();
        assert_eq!(patch.validate().unwrap(), (Some(Strength::Strong), None, None));

        let patch: HeroPowerPatch = serde_json::from_str(r#"{"hero_id": null}"#).unwrap();
        assert!(matches!(patch.validate().unwrap_err(), AppError::Validation(_)));
    }
}
