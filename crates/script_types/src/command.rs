// Command Schema - Field descriptors for script commands
//
// Every command a node can carry is described by an ordered list of fields.
// Branch fields own a nested child sequence; value fields carry an argument
// with a default-value policy applied when a node is first created.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ─────────────────────────────────────────────────────────────────────────────
// Field Kinds
// ─────────────────────────────────────────────────────────────────────────────

/// What kind of input a field is edited with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text input
    Text,
    /// Numeric input
    Number,
    /// Boolean checkbox
    Checkbox,
    /// Fixed option list
    Select,
    /// Scene reference
    Scene,
    /// Actor reference
    Actor,
    /// Music track reference
    Music,
    /// Sprite sheet reference
    Sprite,
    /// Variable reference
    Variable,
    /// Nested child script owned by the node
    Branch,
}

impl FieldKind {
    /// Check whether this field owns a nested branch
    pub fn is_branch(self) -> bool {
        matches!(self, FieldKind::Branch)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Default Value Policy
// ─────────────────────────────────────────────────────────────────────────────

/// How a field's argument is seeded when a node is created.
///
/// The `Last*` policies are context-dependent: the engine never looks the
/// values up itself, the caller supplies them at insert time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum DefaultValue {
    /// No default, the argument starts absent
    #[default]
    None,
    /// Fixed literal default
    Literal { value: Value },
    /// Most recently defined scene
    LastScene,
    /// Most recently defined actor, falling back to the player
    LastActor,
    /// Most recently defined music track
    LastMusic,
    /// Most recently defined sprite sheet
    LastSprite,
    /// First variable of the current editing scope
    LastVariable,
}

// ─────────────────────────────────────────────────────────────────────────────
// Field Definitions
// ─────────────────────────────────────────────────────────────────────────────

/// Definition of one field of a command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Argument key (or branch key for branch fields)
    pub key: String,
    /// Field kind
    pub kind: FieldKind,
    /// Default-value policy applied at node creation
    #[serde(default)]
    pub default: DefaultValue,
    /// Human-readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FieldDef {
    /// Create a field with no default
    pub fn new(key: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            key: key.into(),
            kind,
            default: DefaultValue::None,
            label: None,
        }
    }

    /// Create a text field
    pub fn text(key: &str) -> Self {
        Self::new(key, FieldKind::Text)
    }

    /// Create a number field
    pub fn number(key: &str) -> Self {
        Self::new(key, FieldKind::Number)
    }

    /// Create a checkbox field
    pub fn checkbox(key: &str) -> Self {
        Self::new(key, FieldKind::Checkbox)
    }

    /// Create a select field
    pub fn select(key: &str) -> Self {
        Self::new(key, FieldKind::Select)
    }

    /// Create a scene reference defaulting to the last defined scene
    pub fn scene(key: &str) -> Self {
        Self::new(key, FieldKind::Scene).with_policy(DefaultValue::LastScene)
    }

    /// Create an actor reference defaulting to the last defined actor
    pub fn actor(key: &str) -> Self {
        Self::new(key, FieldKind::Actor).with_policy(DefaultValue::LastActor)
    }

    /// Create a music reference defaulting to the last defined track
    pub fn music(key: &str) -> Self {
        Self::new(key, FieldKind::Music).with_policy(DefaultValue::LastMusic)
    }

    /// Create a sprite sheet reference defaulting to the last defined sheet
    pub fn sprite(key: &str) -> Self {
        Self::new(key, FieldKind::Sprite).with_policy(DefaultValue::LastSprite)
    }

    /// Create a variable reference defaulting to the scope's first variable
    pub fn variable(key: &str) -> Self {
        Self::new(key, FieldKind::Variable).with_policy(DefaultValue::LastVariable)
    }

    /// Create a branch field
    pub fn branch(key: &str) -> Self {
        Self::new(key, FieldKind::Branch)
    }

    /// Set a literal default value
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = DefaultValue::Literal { value };
        self
    }

    /// Set the default-value policy
    pub fn with_policy(mut self, default: DefaultValue) -> Self {
        self.default = default;
        self
    }

    /// Set the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Check whether this field owns a nested branch
    pub fn is_branch(&self) -> bool {
        self.kind.is_branch()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Command Definitions
// ─────────────────────────────────────────────────────────────────────────────

/// Definition of a command (registered in the CommandRegistry)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandDef {
    /// Command name (e.g. "IF" or "SWITCH_SCENE")
    pub id: String,
    /// Human-readable display name
    pub name: String,
    /// Ordered field definitions
    #[serde(default)]
    pub fields: Vec<FieldDef>,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CommandDef {
    /// Create a command with no fields
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            fields: Vec::new(),
            description: None,
        }
    }

    /// Set the field list
    pub fn with_fields(mut self, fields: Vec<FieldDef>) -> Self {
        self.fields = fields;
        self
    }

    /// Add a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Get all branch fields
    pub fn branch_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.is_branch())
    }

    /// Get all value (non-branch) fields
    pub fn value_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| !f.is_branch())
    }

    /// Get a field by key
    pub fn get_field(&self, key: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.key == key)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Schema Adapter
// ─────────────────────────────────────────────────────────────────────────────

/// Read-only view of the command registry.
///
/// The engine consults this only when constructing a brand-new node; patch,
/// remove, relocate and find never touch the schema.
pub trait CommandSchema {
    /// Ordered field descriptors for a command, or `None` if unknown
    fn fields(&self, command: &str) -> Option<&[FieldDef]>;
}
