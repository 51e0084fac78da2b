//! Entities, request payloads and list filters.

mod hero;
mod hero_power;
mod power;

pub use hero::{Hero, HeroFilter, HeroPatch, NewHero};
pub use hero_power::{HeroPower, HeroPowerFilter, HeroPowerPatch, NewHeroPower, Strength, UnknownStrength};
pub use power::{NewPower, Power, PowerFilter, PowerPatch};
