use crate::models::item::Item;
use crate::models::types::Direction;
use std::collections::HashMap;

/// Behavior variant of a room. Kept as a flat sum so gating and transporter
/// logic stay local instead of spread over a type hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomKind {
    Plain,
    /// Entry is barred until unlocked with the matching credential token.
    /// Leaving a gated room is never restricted.
    Gated { required_key: String, unlocked: bool },
    /// Travel through this room ignores the requested direction and lands
    /// in a uniformly random room of the graph instead.
    Transporter,
}

/// A node in the navigable graph. The description doubles as the room's
/// identity key within its world.
#[derive(Debug, Clone)]
pub struct Room {
    description: String,
    pub kind: RoomKind,
    exits: HashMap<Direction, String>,
    items: HashMap<String, Item>,
}

impl Room {
    pub fn new(description: &str) -> Self {
        Self::with_kind(description, RoomKind::Plain)
    }

    pub fn with_kind(description: &str, kind: RoomKind) -> Self {
        Self {
            description: description.to_string(),
            kind,
            exits: HashMap::new(),
            items: HashMap::new(),
        }
    }

    pub fn gated(description: &str, required_key: &str) -> Self {
        Self::with_kind(
            description,
            RoomKind::Gated {
                required_key: required_key.to_string(),
                unlocked: false,
            },
        )
    }

    pub fn transporter(description: &str) -> Self {
        Self::with_kind(description, RoomKind::Transporter)
    }

    /// Identity key of this room within its world.
    pub fn key(&self) -> &str {
        &self.description
    }

    pub fn set_exit(&mut self, dir: Direction, to: &str) {
        self.exits.insert(dir, to.to_string());
    }

    /// Raw exit lookup; existence only, no gating or transporter behavior.
    pub fn exit_key(&self, dir: &Direction) -> Option<&str> {
        self.exits.get(dir).map(String::as_str)
    }

    pub fn has_exit(&self, dir: &Direction) -> bool {
        self.exits.contains_key(dir)
    }

    pub fn exits(&self) -> impl Iterator<Item = (&Direction, &str)> {
        self.exits.iter().map(|(d, k)| (d, k.as_str()))
    }

    pub fn add_item(&mut self, item: Item) {
        self.items.insert(item.key(), item);
    }

    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.get(&name.to_ascii_lowercase())
    }

    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        self.items.remove(&name.to_ascii_lowercase())
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn total_weight(&self) -> f64 {
        self.items.values().map(|i| i.weight).sum()
    }

    /// True while a gated room still refuses entry.
    pub fn entry_barred(&self) -> bool {
        matches!(self.kind, RoomKind::Gated { unlocked: false, .. })
    }

    /// Attempts to unlock a gated room. Case-insensitive credential match,
    /// idempotent once unlocked. Non-gated rooms always refuse.
    pub fn unlock(&mut self, credential: &str) -> bool {
        match &mut self.kind {
            RoomKind::Gated {
                required_key,
                unlocked,
            } => {
                if *unlocked {
                    return true;
                }
                if required_key.eq_ignore_ascii_case(credential) {
                    *unlocked = true;
                    true
                } else {
                    false
                }
            }
            _ => false,
        }
    }

    fn exit_line(&self) -> String {
        let mut tokens: Vec<&str> = self.exits.keys().map(Direction::as_str).collect();
        tokens.sort_unstable();
        let mut line = String::from("Exits:");
        for t in tokens {
            line.push(' ');
            line.push_str(t);
        }
        line
    }

    fn item_lines(&self) -> String {
        let mut items: Vec<&Item> = self.items.values().collect();
        items.sort_unstable_by(|a, b| a.name.cmp(&b.name));
        let mut out = String::new();
        for item in items {
            out.push_str(&format!("\n  {item}"));
        }
        out
    }

    /// Full narration for `look`: ambient text, exits, items present.
    pub fn long_description(&self) -> String {
        let mut out = format!("You are {}.\n{}", self.description, self.exit_line());
        if let RoomKind::Gated {
            required_key,
            unlocked: false,
        } = &self.kind
        {
            out.push_str(&format!(
                "\nThe way in is barred; it takes a {required_key} to open."
            ));
        }
        if !self.items.is_empty() {
            out.push_str("\nYou can see:");
            out.push_str(&self.item_lines());
        }
        out
    }
}
