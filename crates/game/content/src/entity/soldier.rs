//! Infantry soldier properties.

use game_props::{
    PropKey, PropertyHandle, PropertyRegistry, PropertySection, PropertySource, TextureRef,
    TypeTag, parse_int,
};
use strum::IntoEnumIterator;
use tracing::{debug, warn};

use crate::class::ClassLibrary;
use crate::entity::EntityClass;

// ============================================================================
// Property Keys
// ============================================================================

pub const MAP_TEXTURE: PropKey<Option<TextureRef>> = PropKey::new("MapTexture");
pub const MAP_SCALE: PropKey<f32> = PropKey::new("MapScale");
pub const MAP_VIEW_MIN: PropKey<f32> = PropKey::new("MapViewMin");
pub const MAP_VIEW_MAX: PropKey<f32> = PropKey::new("MapViewMax");
pub const MAP_SPEED_MIN: PropKey<f32> = PropKey::new("MapSpeedMin");
pub const MAP_SPEED_MAX: PropKey<f32> = PropKey::new("MapSpeedMax");

pub const HEALTH_TYPE: PropKey<String> = PropKey::new("HealthType");
pub const MAX_HEALTH: PropKey<f32> = PropKey::new("MaxHealth");

pub const ANIMATION_NAME: PropKey<String> = PropKey::new("AnimationName");
pub const SKELETON_NAME: PropKey<String> = PropKey::new("SkeletonName");

pub const MAX_SPEED: PropKey<f32> = PropKey::new("MaxSpeed");
pub const MAX_STRAFE_SPEED: PropKey<f32> = PropKey::new("MaxStrafeSpeed");
pub const MAX_TURN_SPEED: PropKey<f32> = PropKey::new("MaxTurnSpeed");
pub const JUMP_HEIGHT: PropKey<f32> = PropKey::new("JumpHeight");
pub const JUMP_FORWARD_SPEED_FACTOR: PropKey<f32> = PropKey::new("JumpForwardSpeedFactor");
pub const JUMP_STRAFE_SPEED_FACTOR: PropKey<f32> = PropKey::new("JumpStrafeSpeedFactor");
pub const ROLL_SPEED_FACTOR: PropKey<f32> = PropKey::new("RollSpeedFactor");
pub const ACCELERATION: PropKey<f32> = PropKey::new("Acceleration");
pub const SPRINT_ACCELERATE_TIME: PropKey<f32> = PropKey::new("SprintAccelerateTime");

pub const ENERGY_BAR: PropKey<f32> = PropKey::new("EnergyBar");
pub const ENERGY_RESTORE: PropKey<f32> = PropKey::new("EnergyRestore");
pub const ENERGY_RESTORE_IDLE: PropKey<f32> = PropKey::new("EnergyRestoreIdle");
pub const ENERGY_DRAIN_SPRINT: PropKey<f32> = PropKey::new("EnergyDrainSprint");
pub const ENERGY_MIN_SPRINT: PropKey<f32> = PropKey::new("EnergyMinSprint");
pub const ENERGY_COST_JUMP: PropKey<f32> = PropKey::new("EnergyCostJump");
pub const ENERGY_COST_ROLL: PropKey<f32> = PropKey::new("EnergyCostRoll");

pub const AIM_VALUE: PropKey<f32> = PropKey::new("AimValue");
pub const AIM_FACTOR_POSTURE_SPECIAL: PropKey<f32> = PropKey::new("AimFactorPostureSpecial");
pub const AIM_FACTOR_POSTURE_STAND: PropKey<f32> = PropKey::new("AimFactorPostureStand");
pub const AIM_FACTOR_POSTURE_CROUCH: PropKey<f32> = PropKey::new("AimFactorPostureCrouch");
pub const AIM_FACTOR_POSTURE_PRONE: PropKey<f32> = PropKey::new("AimFactorPostureProne");
pub const AIM_FACTOR_STRAFE: PropKey<f32> = PropKey::new("AimFactorStrafe");
pub const AIM_FACTOR_MOVE: PropKey<f32> = PropKey::new("AimFactorMove");

pub const AI_SIZE_TYPE: PropKey<String> = PropKey::new("AISizeType");

/// `(state, thrust, strafe, turn)` rows, one per control state.
pub const CONTROL_SPEED: &str = "ControlSpeed";

/// Header of each weapon group.
pub const WEAPON_SECTION: &str = "WeaponSection";
pub const WEAPON_NAME: PropKey<String> = PropKey::new("WeaponName");
pub const WEAPON_AMMO: PropKey<i32> = PropKey::new("WeaponAmmo");
pub const WEAPON_CHANNEL: PropKey<i32> = PropKey::new("WeaponChannel");

/// Weapon classes with a non-zero value here are award weapons.
pub const MEDALS_TYPE_TO_UNLOCK: &str = "MedalsTypeToUnlock";

/// Instance-only: current health.
pub const CUR_HEALTH: PropKey<f32> = PropKey::new("CurHealth");

/// Number of weapon channels (primary, secondary).
pub const WEAPON_CHANNELS: usize = 2;

// ============================================================================
// Class
// ============================================================================

/// Infantry unit.
pub struct Soldier;

impl EntityClass for Soldier {
    const LABEL: &'static str = "soldier";

    fn class_properties() -> PropertyRegistry {
        let mut registry = PropertyRegistry::new();

        registry.register(MAP_TEXTURE.name(), PropertyHandle::scalar::<Option<TextureRef>>(None));
        for key in [MAP_SCALE, MAP_VIEW_MIN, MAP_VIEW_MAX, MAP_SPEED_MIN, MAP_SPEED_MAX] {
            registry.register(key.name(), PropertyHandle::scalar(1.0_f32));
        }

        registry
            .register(HEALTH_TYPE.name(), PropertyHandle::scalar(String::from("person")))
            .register(MAX_HEALTH.name(), PropertyHandle::scalar(100.0_f32))
            .register(ANIMATION_NAME.name(), PropertyHandle::scalar(String::from("human")))
            .register(SKELETON_NAME.name(), PropertyHandle::scalar(String::from("human")));

        for key in [
            MAX_SPEED,
            MAX_STRAFE_SPEED,
            MAX_TURN_SPEED,
            JUMP_HEIGHT,
            JUMP_FORWARD_SPEED_FACTOR,
            JUMP_STRAFE_SPEED_FACTOR,
            ROLL_SPEED_FACTOR,
            ACCELERATION,
            SPRINT_ACCELERATE_TIME,
        ] {
            registry.register(key.name(), PropertyHandle::scalar(1.0_f32));
        }

        registry.register(
            CONTROL_SPEED,
            PropertyHandle::multi([
                TypeTag::String,
                TypeTag::Float,
                TypeTag::Float,
                TypeTag::Float,
            ]),
        );

        for (key, default) in [
            (ENERGY_BAR, 1.0_f32),
            (ENERGY_RESTORE, 1.0),
            (ENERGY_RESTORE_IDLE, 1.0),
            (ENERGY_DRAIN_SPRINT, 1.0),
            (ENERGY_MIN_SPRINT, 1.0),
            (ENERGY_COST_JUMP, 0.0),
            (ENERGY_COST_ROLL, 1.0),
            (AIM_VALUE, 1.0),
            (AIM_FACTOR_POSTURE_SPECIAL, 1.0),
            (AIM_FACTOR_POSTURE_STAND, 1.0),
            (AIM_FACTOR_POSTURE_CROUCH, 1.0),
            (AIM_FACTOR_POSTURE_PRONE, 1.0),
            (AIM_FACTOR_STRAFE, 0.0),
            (AIM_FACTOR_MOVE, 1.0),
        ] {
            registry.register(key.name(), PropertyHandle::scalar(default));
        }

        let weapon = PropertyRegistry::new()
            .with(WEAPON_NAME.name(), PropertyHandle::scalar(String::new()))
            .with(WEAPON_AMMO.name(), PropertyHandle::scalar(0))
            .with(WEAPON_CHANNEL.name(), PropertyHandle::scalar(0));
        registry
            .register(WEAPON_SECTION, PropertySection::new(WEAPON_SECTION, weapon))
            .register(AI_SIZE_TYPE.name(), PropertyHandle::scalar(String::from("SOLDIER")));

        registry
    }

    /// `CurHealth` starts at the instance's own `MaxHealth`.
    fn instance_properties(properties: &mut PropertyRegistry) {
        let max = properties.get(MAX_HEALTH);
        properties.register(CUR_HEALTH.name(), PropertyHandle::scalar(max));
    }
}

// ============================================================================
// Control Speeds
// ============================================================================

/// Movement states with their own speed factors.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ControlState {
    Stand,
    Crouch,
    Prone,
    Sprint,
    Jet,
    Jump,
    Roll,
    Tumble,
}

/// Speed factors of one control state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlSpeed {
    pub thrust: f32,
    pub strafe: f32,
    pub turn: f32,
}

/// Speed factors declared for `state`, first matching row wins.
pub fn control_speed(properties: &PropertyRegistry, state: ControlState) -> Option<ControlSpeed> {
    let rows = properties.multi(CONTROL_SPEED)?;
    let found = (0..rows.len()).find_map(|row| {
        let name = rows.get::<String>(row, 0)?;
        if name.is_empty() || !name.eq_ignore_ascii_case(state.as_ref()) {
            return None;
        }
        Some(ControlSpeed {
            thrust: rows.get(row, 1)?,
            strafe: rows.get(row, 2)?,
            turn: rows.get(row, 3)?,
        })
    });

    if found.is_none() {
        warn!(target: "content::soldier", %state, "cannot find control state");
    }
    found
}

/// Speed factors for every control state, in declaration order of the enum.
pub fn control_speeds(properties: &PropertyRegistry) -> Vec<(ControlState, Option<ControlSpeed>)> {
    ControlState::iter()
        .map(|state| (state, control_speed(properties, state)))
        .collect()
}

// ============================================================================
// Weapons
// ============================================================================

/// One weapon a soldier spawns with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeaponSlot {
    pub class: String,
    pub ammo: i32,
    pub channel: usize,
}

/// Weapons grouped by channel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Loadout {
    channels: [Vec<WeaponSlot>; WEAPON_CHANNELS],
}

impl Loadout {
    pub fn channel(&self, channel: usize) -> &[WeaponSlot] {
        self.channels.get(channel).map_or(&[][..], Vec::as_slice)
    }

    pub fn primary(&self) -> &[WeaponSlot] {
        self.channel(0)
    }

    pub fn secondary(&self) -> &[WeaponSlot] {
        self.channel(1)
    }

    pub fn len(&self) -> usize {
        self.channels.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds the loadout from the weapon sections.
///
/// Sections naming an unknown class, sections on an invalid channel, and
/// award weapons are skipped.
pub fn weapon_loadout(properties: &PropertyRegistry, classes: &ClassLibrary) -> Loadout {
    let mut loadout = Loadout::default();
    let Some(section) = properties.section(WEAPON_SECTION) else {
        return loadout;
    };

    for entry in section.entries() {
        let name = entry.get(WEAPON_NAME);
        if name.is_empty() {
            continue;
        }

        let raw_channel = entry.get(WEAPON_CHANNEL);
        let channel = match usize::try_from(raw_channel) {
            Ok(channel) if channel < WEAPON_CHANNELS => channel,
            _ => {
                warn!(
                    target: "content::soldier",
                    weapon = %name,
                    channel = raw_channel,
                    "invalid weapon channel"
                );
                continue;
            }
        };

        let Some(chain) = classes.chain(&name) else {
            warn!(target: "content::soldier", weapon = %name, "cannot find weapon class");
            continue;
        };
        let medal = chain
            .get_raw(MEDALS_TYPE_TO_UNLOCK)
            .and_then(|raw| parse_int(raw).ok())
            .unwrap_or(0);
        if medal != 0 {
            debug!(target: "content::soldier", weapon = %name, medal, "skipping award weapon");
            continue;
        }

        loadout.channels[channel].push(WeaponSlot {
            class: name,
            ammo: entry.get(WEAPON_AMMO),
            channel,
        });
    }

    loadout
}

// ============================================================================
// Health
// ============================================================================

/// Health view over an instance registry.
pub struct Vitals<'a> {
    properties: &'a mut PropertyRegistry,
}

impl<'a> Vitals<'a> {
    pub fn new(properties: &'a mut PropertyRegistry) -> Self {
        Self { properties }
    }

    pub fn health(&self) -> f32 {
        self.properties.get(CUR_HEALTH)
    }

    pub fn max_health(&self) -> f32 {
        self.properties.get(MAX_HEALTH)
    }

    pub fn is_dead(&self) -> bool {
        self.health() <= 0.0
    }

    /// Adds `amount` (negative for damage) and returns the new health,
    /// clamped to `0..=MaxHealth`.
    pub fn add_health(&mut self, amount: f32) -> f32 {
        let health = (self.health() + amount).max(0.0).min(self.max_health());
        match self.properties.scalar_mut(CUR_HEALTH) {
            Some(current) => current.set(health),
            None => warn!(
                target: "content::soldier",
                "registry has no CurHealth, spawn it as a soldier instance"
            ),
        }
        health
    }

    /// Observes health changes; the callback receives the previous and the
    /// new health.
    pub fn on_health_change(&mut self, callback: impl FnMut(f32, &f32) + 'static) {
        if let Some(current) = self.properties.scalar_mut(CUR_HEALTH) {
            current.on_change(callback);
        }
    }
}
