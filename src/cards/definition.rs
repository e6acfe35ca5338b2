//! Card templates - immutable card data.
//!
//! `CardTemplate` holds the properties every copy of a card shares: name,
//! base stats, category and optional equip/ritual rules. Per-duel values
//! (current stats, orientation) live in `CardInstance`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Unique identifier for a card template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Card category.
///
/// Monster races occupy monster slots; Magic, Trap, Equip and Ritual cards
/// occupy the combined magic/trap zone. Tags the catalog does not recognize
/// are kept verbatim as `Unrecognized` so placement can reject them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CardCategory {
    Dragon,
    Spellcaster,
    Zombie,
    Warrior,
    BeastWarrior,
    Beast,
    WingedBeast,
    Fiend,
    Fairy,
    Insect,
    Dinosaur,
    Reptile,
    Fish,
    SeaSerpent,
    Machine,
    Thunder,
    Aqua,
    Pyro,
    Rock,
    Plant,
    Magic,
    Trap,
    Equip,
    Ritual,
    Unrecognized(String),
}

impl CardCategory {
    /// Every monster race.
    pub const MONSTER_RACES: [CardCategory; 20] = [
        CardCategory::Dragon,
        CardCategory::Spellcaster,
        CardCategory::Zombie,
        CardCategory::Warrior,
        CardCategory::BeastWarrior,
        CardCategory::Beast,
        CardCategory::WingedBeast,
        CardCategory::Fiend,
        CardCategory::Fairy,
        CardCategory::Insect,
        CardCategory::Dinosaur,
        CardCategory::Reptile,
        CardCategory::Fish,
        CardCategory::SeaSerpent,
        CardCategory::Machine,
        CardCategory::Thunder,
        CardCategory::Aqua,
        CardCategory::Pyro,
        CardCategory::Rock,
        CardCategory::Plant,
    ];

    /// Categories that live in the combined magic/trap zone.
    pub const NON_MONSTER: [CardCategory; 4] = [
        CardCategory::Magic,
        CardCategory::Trap,
        CardCategory::Equip,
        CardCategory::Ritual,
    ];

    /// Catalog tag for this category.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            CardCategory::Dragon => "Dragon",
            CardCategory::Spellcaster => "Spellcaster",
            CardCategory::Zombie => "Zombie",
            CardCategory::Warrior => "Warrior",
            CardCategory::BeastWarrior => "Beast-Warrior",
            CardCategory::Beast => "Beast",
            CardCategory::WingedBeast => "Winged Beast",
            CardCategory::Fiend => "Fiend",
            CardCategory::Fairy => "Fairy",
            CardCategory::Insect => "Insect",
            CardCategory::Dinosaur => "Dinosaur",
            CardCategory::Reptile => "Reptile",
            CardCategory::Fish => "Fish",
            CardCategory::SeaSerpent => "Sea Serpent",
            CardCategory::Machine => "Machine",
            CardCategory::Thunder => "Thunder",
            CardCategory::Aqua => "Aqua",
            CardCategory::Pyro => "Pyro",
            CardCategory::Rock => "Rock",
            CardCategory::Plant => "Plant",
            CardCategory::Magic => "Magic",
            CardCategory::Trap => "Trap",
            CardCategory::Equip => "Equip",
            CardCategory::Ritual => "Ritual",
            CardCategory::Unrecognized(tag) => tag,
        }
    }

    /// Is this one of the monster races?
    #[must_use]
    pub fn is_monster(&self) -> bool {
        Self::MONSTER_RACES.contains(self)
    }

    /// Is this Magic, Trap, Equip or Ritual?
    #[must_use]
    pub fn is_magic_trap(&self) -> bool {
        Self::NON_MONSTER.contains(self)
    }
}

impl From<String> for CardCategory {
    fn from(tag: String) -> Self {
        Self::MONSTER_RACES
            .iter()
            .chain(Self::NON_MONSTER.iter())
            .find(|c| c.name() == tag)
            .cloned()
            .unwrap_or(CardCategory::Unrecognized(tag))
    }
}

impl From<CardCategory> for String {
    fn from(category: CardCategory) -> Self {
        category.name().to_string()
    }
}

impl std::fmt::Display for CardCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Card rarity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    #[default]
    Normal,
    Rare,
    SuperRare,
    UltraRare,
    SecretRare,
    UltimateRare,
    GhostRare,
}

/// Guardian stars printed on monster cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuardianStar {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// Which monsters an equip card can be attached to, and its bonus.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipRule {
    pub valid_target_ids: SmallVec<[CardId; 8]>,

    /// Added to both attack and defense of the equipped monster.
    pub bonus: i64,
}

/// Materials consumed by a ritual card and the monster it summons.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RitualRule {
    pub material_ids: SmallVec<[CardId; 3]>,
    pub result_id: CardId,
}

/// Immutable card definition.
///
/// ## Example
///
/// ```
/// use duel_engine::cards::{CardCategory, CardId, CardTemplate};
///
/// let dragon = CardTemplate::new(CardId::new(4), "Baby Dragon", CardCategory::Dragon)
///     .with_stats(1200, 700)
///     .with_level(3);
///
/// assert!(dragon.category.is_monster());
/// assert_eq!(dragon.base_attack, 1200);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTemplate {
    pub id: CardId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub base_attack: i64,
    #[serde(default)]
    pub base_defense: i64,
    #[serde(default)]
    pub level: u8,
    pub category: CardCategory,
    #[serde(default)]
    pub guardian_stars: Option<[GuardianStar; 2]>,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub is_fusion: bool,
    #[serde(default)]
    pub is_fusion_material: bool,
    #[serde(default)]
    pub equip_rule: Option<EquipRule>,
    #[serde(default)]
    pub ritual_rule: Option<RitualRule>,
}

impl CardTemplate {
    /// Create a template with zero stats and no rules.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, category: CardCategory) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            base_attack: 0,
            base_defense: 0,
            level: 0,
            category,
            guardian_stars: None,
            rarity: Rarity::default(),
            is_fusion: false,
            is_fusion_material: false,
            equip_rule: None,
            ritual_rule: None,
        }
    }

    #[must_use]
    pub fn with_stats(mut self, attack: i64, defense: i64) -> Self {
        self.base_attack = attack;
        self.base_defense = defense;
        self
    }

    #[must_use]
    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_guardian_stars(mut self, first: GuardianStar, second: GuardianStar) -> Self {
        self.guardian_stars = Some([first, second]);
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_equip_rule(mut self, targets: &[CardId], bonus: i64) -> Self {
        self.equip_rule = Some(EquipRule {
            valid_target_ids: SmallVec::from_slice(targets),
            bonus,
        });
        self
    }

    #[must_use]
    pub fn with_ritual_rule(mut self, materials: &[CardId], result: CardId) -> Self {
        self.ritual_rule = Some(RitualRule {
            material_ids: SmallVec::from_slice(materials),
            result_id: result,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id() {
        let id = CardId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(format!("{}", id), "Card(42)");
    }

    #[test]
    fn test_category_classification() {
        for race in CardCategory::MONSTER_RACES {
            assert!(race.is_monster(), "{race} should be a monster race");
            assert!(!race.is_magic_trap());
        }
        for category in CardCategory::NON_MONSTER {
            assert!(category.is_magic_trap());
            assert!(!category.is_monster());
        }

        let bogus = CardCategory::Unrecognized("Not a valid type".into());
        assert!(!bogus.is_monster());
        assert!(!bogus.is_magic_trap());
    }

    #[test]
    fn test_category_tags_round_trip() {
        assert_eq!(CardCategory::from("Beast-Warrior".to_string()), CardCategory::BeastWarrior);
        assert_eq!(CardCategory::from("Sea Serpent".to_string()), CardCategory::SeaSerpent);
        assert_eq!(
            CardCategory::from("Field".to_string()),
            CardCategory::Unrecognized("Field".into())
        );
        assert_eq!(String::from(CardCategory::WingedBeast), "Winged Beast");
    }

    #[test]
    fn test_template_from_record() {
        let json = r#"{
            "id": 1001,
            "name": "Test Card",
            "description": "A test card",
            "baseAttack": 800,
            "baseDefense": 400,
            "level": 4,
            "category": "Warrior",
            "guardianStars": ["Mars", "Jupiter"],
            "rarity": "SUPER_RARE"
        }"#;

        let template: CardTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.id, CardId::new(1001));
        assert_eq!(template.category, CardCategory::Warrior);
        assert_eq!(template.guardian_stars, Some([GuardianStar::Mars, GuardianStar::Jupiter]));
        assert_eq!(template.rarity, Rarity::SuperRare);
        assert!(template.equip_rule.is_none());
    }

    #[test]
    fn test_equip_record() {
        let json = r#"{
            "id": 2002,
            "name": "Fake Malevolent Nuzzler",
            "category": "Equip",
            "equipRule": { "validTargetIds": [33, 34], "bonus": 700 }
        }"#;

        let template: CardTemplate = serde_json::from_str(json).unwrap();
        let rule = template.equip_rule.unwrap();
        assert_eq!(rule.bonus, 700);
        assert_eq!(rule.valid_target_ids.as_slice(), &[CardId::new(33), CardId::new(34)]);
        assert_eq!(template.base_attack, 0);
        assert_eq!(template.rarity, Rarity::Normal);
    }

    #[test]
    fn test_ritual_builder() {
        let ritual = CardTemplate::new(CardId::new(677), "Hamburger Recipe", CardCategory::Ritual)
            .with_ritual_rule(&[CardId::new(1), CardId::new(2), CardId::new(3)], CardId::new(9));

        let rule = ritual.ritual_rule.unwrap();
        assert_eq!(rule.material_ids.len(), 3);
        assert_eq!(rule.result_id, CardId::new(9));
    }
}
