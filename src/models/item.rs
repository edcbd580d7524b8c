use std::fmt;

/// What happens when a usable item is `use`d. Open-ended: tags we don't
/// recognize are carried as `Other` and narrate a generic no-effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemEffect {
    /// Access credential; unlocks a gated room whose required token matches
    /// the item name. Not consumed on use.
    Key,
    /// Informational; describes the exits of the current room.
    Map,
    /// Consumable; removed from the inventory and raises the carry ceiling.
    Food,
    Other(String),
}

impl ItemEffect {
    pub fn parse(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "key" => ItemEffect::Key,
            "map" => ItemEffect::Map,
            "food" => ItemEffect::Food,
            other => ItemEffect::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ItemEffect::Key => "key",
            ItemEffect::Map => "map",
            ItemEffect::Food => "food",
            ItemEffect::Other(s) => s.as_str(),
        }
    }
}

/// A collectible. Immutable after construction; owned by exactly one
/// container (a room or a player inventory) at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub weight: f64,
    pub effect: Option<ItemEffect>,
}

impl Item {
    pub fn new(name: &str, description: &str, weight: f64) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            weight,
            effect: None,
        }
    }

    pub fn with_effect(name: &str, description: &str, weight: f64, effect: ItemEffect) -> Self {
        Self {
            effect: Some(effect),
            ..Self::new(name, description, weight)
        }
    }

    /// Lowercased identity key used by item tables.
    pub fn key(&self) -> String {
        self.name.to_ascii_lowercase()
    }

    pub fn usable(&self) -> bool {
        self.effect.is_some()
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {}kg", self.name, self.description, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_parse_is_case_insensitive() {
        assert_eq!(ItemEffect::parse("KEY"), ItemEffect::Key);
        assert_eq!(ItemEffect::parse("Food"), ItemEffect::Food);
        assert_eq!(ItemEffect::parse("gizmo"), ItemEffect::Other("gizmo".into()));
    }

    #[test]
    fn plain_items_are_not_usable() {
        let bottle = Item::new("bottle", "an empty bottle", 0.3);
        assert!(!bottle.usable());
        let key = Item::with_effect("key", "a rusty old key", 0.1, ItemEffect::Key);
        assert!(key.usable());
    }

    #[test]
    fn display_includes_weight() {
        let coin = Item::new("coin", "a golden coin", 0.05);
        assert_eq!(coin.to_string(), "coin (a golden coin) - 0.05kg");
    }
}
