//! Command parser for the two-word adventure grammar.
//!
//! Examples:
//!   "go north"          -> Verb::Go, arg="north"
//!   "n"                 -> Verb::Go, arg="north"   (direction shortcut)
//!   "take cookie"       -> Verb::Take, arg="cookie"
//!   "login bob hunter2" -> Verb::Login, args=["bob", "hunter2"]
//!   "frobnicate"        -> Verb::Unknown, raw verb kept for the narrator
//!
//! Only the verb is case-folded; arguments keep the case they were typed
//! with (passwords pass through here too).

use crate::models::types::Direction;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Go,
    Back,
    Look,
    Take,
    Drop,
    Items,
    Use,
    Eat,
    Status,
    Save,
    Load,
    Help,
    Quit,
    Who,
    Login,
    Logout,
    Register,
    /// Unrecognized; the raw verb is kept so the narrator can echo it.
    Unknown,
}

impl Verb {
    pub fn as_str(&self) -> &str {
        match self {
            Verb::Go => "go",
            Verb::Back => "back",
            Verb::Look => "look",
            Verb::Take => "take",
            Verb::Drop => "drop",
            Verb::Items => "items",
            Verb::Use => "use",
            Verb::Eat => "eat",
            Verb::Status => "status",
            Verb::Save => "save",
            Verb::Load => "load",
            Verb::Help => "help",
            Verb::Quit => "quit",
            Verb::Who => "who",
            Verb::Login => "login",
            Verb::Logout => "logout",
            Verb::Register => "register",
            Verb::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Intent {
    pub verb: Verb,
    /// Input with whitespace collapsed, case preserved.
    pub original: String,
    /// Tokens after the verb, case preserved.
    pub args: Vec<String>,
    /// If the verb wasn't recognized, the word the player actually typed.
    pub raw_verb: Option<String>,
}

impl Intent {
    /// First argument, the "second word" of the classic grammar.
    pub fn arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

pub fn parse_command(input: &str) -> Intent {
    let normalized = normalize(input);
    let mut tokens = normalized.split_whitespace().map(str::to_string);

    let Some(first) = tokens.next() else {
        return Intent {
            verb: Verb::Unknown,
            original: normalized,
            args: vec![],
            raw_verb: None,
        };
    };
    let args: Vec<String> = tokens.collect();

    // Bare directions move: "n", "north".
    if args.is_empty()
        && let Some(dir) = Direction::parse_shortcut(&first)
    {
        return Intent {
            verb: Verb::Go,
            original: normalized,
            args: vec![dir.as_str().to_string()],
            raw_verb: None,
        };
    }

    match verb_map().get(first.to_ascii_lowercase().as_str()) {
        Some(verb) => Intent {
            verb: *verb,
            original: normalized,
            args,
            raw_verb: None,
        },
        None => Intent {
            verb: Verb::Unknown,
            original: normalized,
            args,
            raw_verb: Some(first),
        },
    }
}

fn normalize(s: &str) -> String {
    // trim and collapse internal whitespace; case is left alone
    let mut out = String::with_capacity(s.len());
    let mut last_space = false;
    for ch in s.trim().chars() {
        if ch.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(ch);
            last_space = false;
        }
    }
    out
}

fn verb_map() -> HashMap<&'static str, Verb> {
    use Verb::*;
    let mut m = HashMap::new();
    for k in ["go", "walk", "move"] {
        m.insert(k, Go);
    }
    m.insert("back", Back);
    for k in ["look", "l"] {
        m.insert(k, Look);
    }
    for k in ["take", "get", "grab"] {
        m.insert(k, Take);
    }
    m.insert("drop", Drop);
    for k in ["items", "inventory", "inv", "i"] {
        m.insert(k, Items);
    }
    m.insert("use", Use);
    m.insert("eat", Eat);
    m.insert("status", Status);
    m.insert("save", Save);
    m.insert("load", Load);
    m.insert("help", Help);
    m.insert("?", Help);
    for k in ["quit", "exit"] {
        m.insert(k, Quit);
    }
    m.insert("who", Who);
    m.insert("login", Login);
    m.insert("logout", Logout);
    m.insert("register", Register);
    m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_go_with_direction() {
        let i = parse_command("go north");
        assert_eq!(i.verb, Verb::Go);
        assert_eq!(i.arg(), Some("north"));
    }

    #[test]
    fn t_direction_shortcut() {
        let i = parse_command("n");
        assert_eq!(i.verb, Verb::Go);
        assert_eq!(i.arg(), Some("north"));
    }

    #[test]
    fn t_direction_shortcut_uppercase() {
        let i = parse_command("N");
        assert_eq!(i.verb, Verb::Go);
        assert_eq!(i.arg(), Some("north"));
    }

    #[test]
    fn t_take_synonyms() {
        assert_eq!(parse_command("get cookie").verb, Verb::Take);
        assert_eq!(parse_command("grab key").verb, Verb::Take);
        assert_eq!(parse_command("take map").arg(), Some("map"));
    }

    #[test]
    fn t_verb_is_case_insensitive() {
        let i = parse_command("TAKE Cookie");
        assert_eq!(i.verb, Verb::Take);
        // Arguments keep their case; item lookups fold case themselves.
        assert_eq!(i.arg(), Some("Cookie"));
    }

    #[test]
    fn t_password_case_survives() {
        let i = parse_command("login Bob HuNtEr2");
        assert_eq!(i.verb, Verb::Login);
        assert_eq!(i.args, vec!["Bob", "HuNtEr2"]);
    }

    #[test]
    fn t_inventory_alias() {
        assert_eq!(parse_command("i").verb, Verb::Items);
        assert_eq!(parse_command("inv").verb, Verb::Items);
    }

    #[test]
    fn t_quit_alias() {
        assert_eq!(parse_command("exit").verb, Verb::Quit);
    }

    #[test]
    fn t_whitespace_collapsed() {
        let i = parse_command("   take    cookie  ");
        assert_eq!(i.verb, Verb::Take);
        assert_eq!(i.arg(), Some("cookie"));
        assert_eq!(i.original, "take cookie");
    }

    #[test]
    fn t_unknown_verb_kept_raw() {
        let i = parse_command("frobnicate lever");
        assert_eq!(i.verb, Verb::Unknown);
        assert_eq!(i.raw_verb.as_deref(), Some("frobnicate"));
        assert_eq!(i.arg(), Some("lever"));
    }

    #[test]
    fn t_blank_input() {
        let i = parse_command("   ");
        assert_eq!(i.verb, Verb::Unknown);
        assert!(i.raw_verb.is_none());
        assert!(i.args.is_empty());
    }

    #[test]
    fn t_missing_argument_is_fine_here() {
        // Argument validation is the verb handler's job, not the parser's.
        let i = parse_command("go");
        assert_eq!(i.verb, Verb::Go);
        assert_eq!(i.arg(), None);
    }
}
