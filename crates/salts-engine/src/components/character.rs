//! Health, invulnerability and equipment of a character.

/// Life points every character starts with.
pub const DEFAULT_LIFE_POINTS: i32 = 100;
/// Updates a character ignores contact damage after being hit
/// (about 2 seconds at 30 FPS).
pub const INVULNERABILITY_TICKS: u32 = 60;
/// Damage a monster deals by touching the player.
pub const CONTACT_DAMAGE: i32 = 20;
/// Damage a thrown vial deals to a monster.
pub const VIAL_DAMAGE: i32 = 100;
/// Horizontal speed of a knockback, away from the attacker.
pub const KNOCKBACK_SPEED: f32 = 6.0;
/// Vials in a fresh weapon.
pub const WEAPON_AMMO: u32 = 20;

/// A throwing weapon with a limited number of vials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weapon {
    ammo: u32,
}

impl Weapon {
    pub fn new(ammo: u32) -> Self {
        Self { ammo }
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn has_ammo(&self) -> bool {
        self.ammo > 0
    }

    /// Take one vial out of the weapon. False when empty.
    pub fn load(&mut self) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        true
    }
}

impl Default for Weapon {
    fn default() -> Self {
        Self::new(WEAPON_AMMO)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterState {
    pub life_points: i32,
    /// Remaining updates of the invulnerability window.
    pub invulnerable: u32,
    /// Set when standing in a stairs zone; gates up/down movement.
    /// No level geometry sets it yet.
    pub on_stairs: bool,
    pub weapon: Option<Weapon>,
}

impl CharacterState {
    pub fn new() -> Self {
        Self {
            life_points: DEFAULT_LIFE_POINTS,
            invulnerable: 0,
            on_stairs: false,
            weapon: None,
        }
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.life_points > 0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0
    }

    /// Unconditional damage (projectiles).
    pub fn take_damage(&mut self, amount: i32) {
        self.life_points -= amount;
    }

    /// Contact damage, ignored inside the invulnerability window.
    /// Returns whether the hit landed.
    pub fn take_contact_hit(&mut self, amount: i32) -> bool {
        if self.is_invulnerable() {
            return false;
        }
        self.life_points -= amount;
        self.invulnerable = INVULNERABILITY_TICKS;
        true
    }

    /// Count the invulnerability window down by one update.
    pub fn tick_invulnerability(&mut self) {
        self.invulnerable = self.invulnerable.saturating_sub(1);
    }
}

impl Default for CharacterState {
    fn default() -> Self {
        Self::new()
    }
}
