//! Thrown explosive properties.

use game_props::{PropKey, PropertyHandle, PropertyRegistry};

use crate::entity::EntityClass;

/// Whether the grenade is thrown from the off hand instead of replacing the
/// held weapon.
pub const OFFHAND_WEAPON: PropKey<bool> = PropKey::new("OffhandWeapon");

pub struct Grenade;

impl EntityClass for Grenade {
    const LABEL: &'static str = "grenade";

    fn class_properties() -> PropertyRegistry {
        PropertyRegistry::new().with(OFFHAND_WEAPON.name(), PropertyHandle::scalar(true))
    }
}
