//! Walk through a typical editing session against the script engine.
//!
//! Run with: cargo run -p script_engine --example editor_session

use indexmap::IndexMap;
use script_engine::{compose_node, EditContext, Script};
use script_types::{standard_library, ClipboardPayload};
use serde_json::json;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter("debug")
        .init();

    let registry = standard_library();
    let ctx = EditContext {
        scene_ids: vec!["town".to_string(), "castle".to_string()],
        actor_ids: vec!["guard".to_string()],
        music_ids: vec!["theme".to_string()],
        sprite_sheet_ids: vec!["hero".to_string()],
        ..EditContext::default()
    };

    println!("=== Build a script ===");
    let mut script = Script::empty();

    for command in ["TEXT", "IF", "SWITCH_SCENE"] {
        let node = compose_node(&registry, command, IndexMap::new(), IndexMap::new(), &ctx);
        script = script.insert_before(script.end_id().unwrap(), node);
    }
    print_script(&script);

    println!("\n=== Edit inside the conditional ===");
    let cond_id = script.root_ids()[1];
    let true_end = script.get(cond_id).unwrap().branches["true"][0];
    let greeting = compose_node(
        &registry,
        "TEXT",
        [("text".to_string(), json!("Welcome back!"))].into_iter().collect(),
        IndexMap::new(),
        &ctx,
    );
    script = script.insert_before(true_end, greeting);
    script = script.patch_args(cond_id, &[("value".to_string(), json!(3))].into_iter().collect());
    print_script(&script);

    println!("\n=== Copy, paste, relocate ===");
    let payload = script.copy_node(cond_id).expect("conditional is copyable");
    let text = payload.encode().expect("payload encodes");
    let read_back = ClipboardPayload::parse(&text).expect("payload parses");

    script = script.paste_after(cond_id, &read_back);
    let first = script.root_ids()[0];
    let last_paste = script.root_ids()[2];
    script = script.relocate(last_paste, first);

    // a relocate into the moved node's own branch is refused
    let inner = script.get(last_paste).unwrap().branches["true"][0];
    script = script.relocate(last_paste, inner);

    print_script(&script);
    script.validate().expect("invariants hold");
    println!("\nAll invariants hold across {} nodes.", script.len());
}

fn print_script(script: &Script) {
    let json = serde_json::to_string_pretty(&script.to_nodes()).expect("script serializes");
    println!("{json}");
}
