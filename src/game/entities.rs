//! # Entity Model
//!
//! The closed set of things that can occupy a room or an inventory.
//!
//! Every occupant is a [`ConcreteEntity`]. Shared behaviour is exposed through
//! the [`Entity`] trait (names and descriptions) and the [`Mob`] trait
//! (damage, health and liveness for creatures and the player).

use crate::config::{FIELD_DELIMITER, PLAYER_NAME};
use crate::{CrawlError, CrawlResult};

/// Descriptive behaviour shared by all entities.
pub trait Entity {
    /// Name used to look the entity up in a room or inventory.
    fn short_name(&self) -> &str;

    /// Text shown when the entity is examined.
    fn long_description(&self) -> &str;
}

/// Anything with liveness that can fight.
///
/// `damage` doubles as the starting health pool: health begins at `damage`
/// and the mob dies once cumulative damage taken reaches it.
pub trait Mob {
    /// Damage dealt per exchange.
    fn damage(&self) -> u32;

    /// Remaining health.
    fn health(&self) -> u32;

    /// Whether the mob is still alive.
    fn is_alive(&self) -> bool;

    /// Applies `amount` points of damage.
    fn take_damage(&mut self, amount: u32);
}

/// Resolves one combat exchange between two mobs.
///
/// Both sides hit each other simultaneously, so either or both may die.
/// Nothing happens unless both are alive. Returns whether blows were exchanged.
///
/// # Examples
///
/// ```
/// use crawl::{exchange_blows, Creature, Mob, Player};
///
/// let mut player = Player::new("Adventurer", 5).unwrap();
/// let mut rat = Creature::new("rat", "a scruffy rat", 2).unwrap();
/// assert!(exchange_blows(&mut player, &mut rat));
/// assert!(!rat.is_alive());
/// assert!(player.is_alive());
/// ```
pub fn exchange_blows<A: Mob + ?Sized, B: Mob + ?Sized>(a: &mut A, b: &mut B) -> bool {
    if !a.is_alive() || !b.is_alive() {
        return false;
    }
    let (a_hits, b_hits) = (a.damage(), b.damage());
    a.take_damage(b_hits);
    b.take_damage(a_hits);
    true
}

/// An inert item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    short_name: String,
    long_description: String,
}

impl Item {
    /// Creates a new item.
    pub fn new(short_name: impl Into<String>, long_description: impl Into<String>) -> CrawlResult<Self> {
        let short_name = short_name.into();
        let long_description = long_description.into();
        validate_short_name(&short_name)?;
        validate_long_description(&long_description)?;
        Ok(Self {
            short_name,
            long_description,
        })
    }
}

impl Entity for Item {
    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn long_description(&self) -> &str {
        &self.long_description
    }
}

/// An item with a monetary value.
#[derive(Debug, Clone, PartialEq)]
pub struct Valuable {
    short_name: String,
    long_description: String,
    value: f64,
}

impl Valuable {
    /// Creates a new valuable.
    ///
    /// The value must be finite and non-negative.
    pub fn new(
        short_name: impl Into<String>,
        long_description: impl Into<String>,
        value: f64,
    ) -> CrawlResult<Self> {
        let short_name = short_name.into();
        let long_description = long_description.into();
        validate_short_name(&short_name)?;
        validate_long_description(&long_description)?;
        if !value.is_finite() || value < 0.0 {
            return Err(CrawlError::InvalidAttribute(format!(
                "value of '{}' must be a non-negative number, got {}",
                short_name, value
            )));
        }
        Ok(Self {
            short_name,
            long_description,
            value,
        })
    }

    /// Monetary value of this valuable.
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Entity for Valuable {
    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn long_description(&self) -> &str {
        &self.long_description
    }
}

/// A hostile creature.
#[derive(Debug, Clone, PartialEq)]
pub struct Creature {
    short_name: String,
    long_description: String,
    damage: u32,
    health: u32,
    alive: bool,
}

impl Creature {
    /// Creates a new, living creature.
    pub fn new(
        short_name: impl Into<String>,
        long_description: impl Into<String>,
        damage: u32,
    ) -> CrawlResult<Self> {
        Self::with_liveness(short_name, long_description, damage, true)
    }

    /// Creates a creature that may already be dead, as read back from a save.
    pub fn with_liveness(
        short_name: impl Into<String>,
        long_description: impl Into<String>,
        damage: u32,
        alive: bool,
    ) -> CrawlResult<Self> {
        let short_name = short_name.into();
        let long_description = long_description.into();
        validate_short_name(&short_name)?;
        validate_long_description(&long_description)?;
        validate_damage(&short_name, damage)?;
        Ok(Self {
            short_name,
            long_description,
            damage,
            health: if alive { damage } else { 0 },
            alive,
        })
    }
}

impl Entity for Creature {
    fn short_name(&self) -> &str {
        &self.short_name
    }

    fn long_description(&self) -> &str {
        &self.long_description
    }
}

impl Mob for Creature {
    fn damage(&self) -> u32 {
        self.damage
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.alive = false;
        }
    }
}

/// The player character.
///
/// The player is owned by the game session, not by any room; rooms only hold
/// a [`ConcreteEntity::Player`] marker where the player currently stands.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    long_description: String,
    damage: u32,
    health: u32,
    alive: bool,
    inventory: Vec<ConcreteEntity>,
}

impl Player {
    /// Creates a new player with an empty inventory.
    pub fn new(long_description: impl Into<String>, damage: u32) -> CrawlResult<Self> {
        let long_description = long_description.into();
        validate_long_description(&long_description)?;
        validate_damage(PLAYER_NAME, damage)?;
        Ok(Self {
            long_description,
            damage,
            health: damage,
            alive: true,
            inventory: Vec::new(),
        })
    }

    /// Entities carried by the player, in pickup order.
    pub fn inventory(&self) -> &[ConcreteEntity] {
        &self.inventory
    }

    /// Adds an entity to the end of the inventory.
    pub fn add(&mut self, entity: ConcreteEntity) {
        self.inventory.push(entity);
    }

    /// Finds the first carried entity with the given short name.
    pub fn find(&self, name: &str) -> Option<&ConcreteEntity> {
        find_named(&self.inventory, name, Lookup::Any).map(|index| &self.inventory[index])
    }

    /// Removes and returns the first carried entity with the given short name.
    pub fn drop(&mut self, name: &str) -> Option<ConcreteEntity> {
        find_named(&self.inventory, name, Lookup::Any).map(|index| self.inventory.remove(index))
    }

    /// Total loot value of everything carried.
    pub fn worth(&self) -> f64 {
        self.inventory.iter().filter_map(ConcreteEntity::loot_value).sum()
    }
}

impl Entity for Player {
    fn short_name(&self) -> &str {
        PLAYER_NAME
    }

    fn long_description(&self) -> &str {
        &self.long_description
    }
}

impl Mob for Player {
    fn damage(&self) -> u32 {
        self.damage
    }

    fn health(&self) -> u32 {
        self.health
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
        if self.health == 0 {
            self.alive = false;
        }
    }
}

/// Anything that can sit in a room or an inventory.
#[derive(Debug, Clone, PartialEq)]
pub enum ConcreteEntity {
    Item(Item),
    Valuable(Valuable),
    Creature(Creature),
    /// Where the session's player stands. Carries no data of its own.
    Player,
}

impl ConcreteEntity {
    /// Loot value, defined for valuables only.
    pub fn loot_value(&self) -> Option<f64> {
        match self {
            ConcreteEntity::Valuable(valuable) => Some(valuable.value()),
            _ => None,
        }
    }

    /// Liveness of a creature.
    ///
    /// The player marker yields None: the player's liveness lives on
    /// [`Player`] itself.
    pub fn is_alive(&self) -> Option<bool> {
        match self {
            ConcreteEntity::Creature(creature) => Some(creature.is_alive()),
            _ => None,
        }
    }

    /// Whether a room may release this entity.
    ///
    /// Living creatures refuse to leave; everything else may.
    pub fn may_leave(&self) -> bool {
        self.is_alive() != Some(true)
    }

    pub fn is_player(&self) -> bool {
        matches!(self, ConcreteEntity::Player)
    }

    pub fn as_creature(&self) -> Option<&Creature> {
        match self {
            ConcreteEntity::Creature(creature) => Some(creature),
            _ => None,
        }
    }

    pub fn as_creature_mut(&mut self) -> Option<&mut Creature> {
        match self {
            ConcreteEntity::Creature(creature) => Some(creature),
            _ => None,
        }
    }
}

impl Entity for ConcreteEntity {
    fn short_name(&self) -> &str {
        match self {
            ConcreteEntity::Item(item) => item.short_name(),
            ConcreteEntity::Valuable(valuable) => valuable.short_name(),
            ConcreteEntity::Creature(creature) => creature.short_name(),
            ConcreteEntity::Player => PLAYER_NAME,
        }
    }

    /// Long description. Empty for the player marker; ask the session's
    /// [`Player`] instead.
    fn long_description(&self) -> &str {
        match self {
            ConcreteEntity::Item(item) => item.long_description(),
            ConcreteEntity::Valuable(valuable) => valuable.long_description(),
            ConcreteEntity::Creature(creature) => creature.long_description(),
            ConcreteEntity::Player => "",
        }
    }
}

impl From<Item> for ConcreteEntity {
    fn from(item: Item) -> Self {
        ConcreteEntity::Item(item)
    }
}

impl From<Valuable> for ConcreteEntity {
    fn from(valuable: Valuable) -> Self {
        ConcreteEntity::Valuable(valuable)
    }
}

impl From<Creature> for ConcreteEntity {
    fn from(creature: Creature) -> Self {
        ConcreteEntity::Creature(creature)
    }
}

/// Which entities a name lookup considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Every entity
    Any,
    /// Everything but the player marker
    SkipPlayer,
    /// Creatures only
    CreaturesOnly,
}

/// Index of the first entity named `name` that passes `lookup`.
pub fn find_named(entities: &[ConcreteEntity], name: &str, lookup: Lookup) -> Option<usize> {
    entities.iter().position(|entity| {
        let eligible = match lookup {
            Lookup::Any => true,
            Lookup::SkipPlayer => !entity.is_player(),
            Lookup::CreaturesOnly => entity.as_creature().is_some(),
        };
        eligible && entity.short_name() == name
    })
}

fn validate_short_name(name: &str) -> CrawlResult<()> {
    if name.is_empty() || name.contains(FIELD_DELIMITER) || name.contains(['\n', '\r']) {
        return Err(CrawlError::InvalidAttribute(format!(
            "short name '{}' must be non-empty and contain no '{}' or line break",
            name.escape_debug(),
            FIELD_DELIMITER
        )));
    }
    Ok(())
}

fn validate_long_description(description: &str) -> CrawlResult<()> {
    if description.contains(['\n', '\r']) {
        return Err(CrawlError::InvalidAttribute(format!(
            "description '{}' must fit on one line",
            description.escape_debug()
        )));
    }
    Ok(())
}

fn validate_damage(name: &str, damage: u32) -> CrawlResult<()> {
    if damage == 0 {
        return Err(CrawlError::InvalidAttribute(format!(
            "damage of '{}' must be positive",
            name
        )));
    }
    Ok(())
}
