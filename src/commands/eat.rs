use crate::commands::{CAPACITY_BONUS_KG, CommandOutput};
use crate::state::session::GameSession;
use crate::{failure, success};

pub fn eat(sess: &mut GameSession, arg: Option<&str>) -> CommandOutput {
    if arg != Some("cookie") {
        return failure!("Eat what? (Try 'eat cookie')");
    }
    if !sess.player.has_item("cookie") {
        return failure!(
            "You don't have a magic cookie!\nLook for one in the rooms; it might be hidden somewhere..."
        );
    }

    sess.player.drop_item("cookie");
    sess.player.raise_max_weight(CAPACITY_BONUS_KG);
    sess.player.set_cookie_eaten(true);
    success!(format!(
        "You eat the magic cookie!\nYour maximum carrying capacity increased by {CAPACITY_BONUS_KG}kg!\nNew maximum weight: {:.2}kg",
        sess.player.max_weight()
    ))
}
