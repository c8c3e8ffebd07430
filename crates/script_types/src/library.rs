// Standard command library
//
// The built-in commands every project starts with. Projects and plugins can
// register more on top of these.

use serde_json::json;

use crate::command::{CommandDef, FieldDef};
use crate::node::END_COMMAND;
use crate::registry::CommandRegistry;

/// Build a registry containing the standard command set
pub fn standard_library() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register(CommandDef::new(END_COMMAND, "End"));

    registry.register(
        CommandDef::new("IF", "If Variable")
            .with_description("Branches on a variable comparison")
            .with_fields(vec![
                FieldDef::variable("variable"),
                FieldDef::select("comparator").with_default(json!("==")),
                FieldDef::number("value").with_default(json!(0)),
                FieldDef::branch("true"),
                FieldDef::branch("false"),
            ]),
    );

    registry.register(
        CommandDef::new("LOOP", "Loop Forever")
            .with_description("Repeats its body until the script is stopped")
            .with_fields(vec![FieldDef::branch("true")]),
    );

    registry.register(
        CommandDef::new("TEXT", "Display Text").with_fields(vec![
            FieldDef::text("text").with_default(json!("")),
        ]),
    );

    registry.register(
        CommandDef::new("SWITCH_SCENE", "Switch Scene").with_fields(vec![
            FieldDef::scene("sceneId"),
            FieldDef::number("x").with_default(json!(0)),
            FieldDef::number("y").with_default(json!(0)),
        ]),
    );

    registry.register(
        CommandDef::new("PLAY_MUSIC", "Play Music").with_fields(vec![
            FieldDef::music("musicId"),
            FieldDef::checkbox("loop").with_default(json!(true)),
        ]),
    );

    registry.register(
        CommandDef::new("ACTOR_MOVE_TO", "Move Actor").with_fields(vec![
            FieldDef::actor("actorId"),
            FieldDef::number("x").with_default(json!(0)),
            FieldDef::number("y").with_default(json!(0)),
        ]),
    );

    registry.register(
        CommandDef::new("SET_VALUE", "Set Variable").with_fields(vec![
            FieldDef::variable("variable"),
            FieldDef::number("value").with_default(json!(0)),
        ]),
    );

    registry.register(
        CommandDef::new("COMMENT", "Comment").with_fields(vec![
            FieldDef::text("text").with_default(json!("")),
        ]),
    );

    registry.register(
        CommandDef::new("CALL_SCRIPT", "Call Custom Script")
            .with_description("Runs a named sub-script in place")
            .with_fields(vec![FieldDef::select("scriptId")]),
    );

    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandSchema;

    #[test]
    fn test_library_contents() {
        let registry = standard_library();
        assert!(registry.contains(END_COMMAND));
        assert!(registry.contains("IF"));
        assert!(registry.contains("LOOP"));
        assert!(registry.contains("CALL_SCRIPT"));
    }

    #[test]
    fn test_conditional_branches() {
        let registry = standard_library();
        let def = registry.get("IF").unwrap();
        let branches: Vec<_> = def.branch_fields().map(|f| f.key.as_str()).collect();
        assert_eq!(branches, vec!["true", "false"]);
    }

    #[test]
    fn test_terminator_has_no_fields() {
        let registry = standard_library();
        assert!(registry.fields(END_COMMAND).unwrap().is_empty());
    }
}
