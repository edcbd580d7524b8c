pub const BANNER: &str = r#"
                      _ _            _
  _ __ ___  _   _  __| | | __ _ _ __| | __
 | '_ ` _ \| | | |/ _` | |/ _` | '__| |/ /
 | | | | | | |_| | (_| | | (_| | |  |   <
 |_| |_| |_|\__,_|\__,_|_|\__,_|_|  |_|\_\

"#;

pub const ENTRY: &str = r#"Welcome to the campus!
An incredibly boring adventure is about to begin.
Type 'help' if you need help, 'look' to look around.

"#;
