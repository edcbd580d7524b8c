use crate::commands::{CAPACITY_BONUS_KG, CommandOutput};
use crate::models::item::ItemEffect;
use crate::models::room::RoomKind;
use crate::state::session::GameSession;
use crate::{failure, success};

pub fn use_item(sess: &mut GameSession, arg: Option<&str>) -> CommandOutput {
    let Some(name) = arg else {
        return failure!("Use what?");
    };
    let Some(item) = sess.player.item(name) else {
        return failure!(format!("You don't have a {name}!"));
    };
    let Some(effect) = item.effect.clone() else {
        return failure!(format!("The {name} cannot be used."));
    };
    let item_name = item.name.clone();

    match effect {
        ItemEffect::Key => use_key(sess, &item_name),
        ItemEffect::Map => use_map(sess),
        ItemEffect::Food => use_food(sess, &item_name),
        ItemEffect::Other(_) => success!(format!(
            "You use the {item_name}, but nothing seems to happen."
        )),
    }
}

/// Credential use: unlock the room we stand in, or any adjacent gated room
/// the credential fits. The key itself is never consumed.
fn use_key(sess: &mut GameSession, key_name: &str) -> CommandOutput {
    let current_key = sess.player.current_room().to_string();
    let Some(current) = sess.world.room(&current_key) else {
        return failure!("You are nowhere; there is nothing to unlock.");
    };

    if let RoomKind::Gated {
        required_key,
        unlocked,
    } = &current.kind
    {
        if *unlocked {
            return success!("This room is already unlocked.");
        }
        let required = required_key.clone();
        let opened = sess
            .world
            .room_mut(&current_key)
            .is_some_and(|r| r.unlock(key_name));
        return if opened {
            let description = sess
                .world
                .room(&current_key)
                .map(|r| r.long_description())
                .unwrap_or_default();
            success!(format!(
                "You use the {key_name} to unlock the room!\n{description}"
            ))
        } else {
            failure!(format!(
                "This key does not fit here. It takes a {required} to open this room."
            ))
        };
    }

    let exits: Vec<(String, String)> = current
        .exits()
        .map(|(d, k)| (d.to_string(), k.to_string()))
        .collect();
    for (dir, target) in exits {
        let barred = sess.world.room(&target).is_some_and(|r| r.entry_barred());
        if !barred {
            continue;
        }
        let opened = sess
            .world
            .room_mut(&target)
            .is_some_and(|r| r.unlock(key_name));
        if opened {
            return success!(format!(
                "You use the {key_name} to unlock the room to the {dir}!"
            ));
        }
    }

    failure!("There is nothing here this key can unlock.")
}

/// Informational use: describe where the exits lead. No mutation.
fn use_map(sess: &mut GameSession) -> CommandOutput {
    let Some(room) = sess.world.room(sess.player.current_room()) else {
        return failure!("You are nowhere; the map shows nothing.");
    };
    let mut lines: Vec<String> = room
        .exits()
        .map(|(dir, target)| format!("  {dir}: {target}"))
        .collect();
    if lines.is_empty() {
        return success!("The map shows no paths out of here.");
    }
    lines.sort_unstable();
    success!(format!(
        "The map shows where the paths lead:\n{}",
        lines.join("\n")
    ))
}

/// Generic consumable: gone after use, raises the carry ceiling.
fn use_food(sess: &mut GameSession, name: &str) -> CommandOutput {
    sess.player.drop_item(name);
    sess.player.raise_max_weight(CAPACITY_BONUS_KG);
    success!(format!(
        "You eat the {name}. Your carrying capacity is now {:.2}kg.",
        sess.player.max_weight()
    ))
}
