//! Alfred script-filter payload types.
//!
//! Only the fields the IDE project workflow emits are modelled. Every optional
//! field is omitted from the JSON when unset so Alfred falls back to its own
//! defaults.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Feedback {
    pub items: Vec<Item>,
}

impl Feedback {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autocomplete: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ItemIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mods: Option<BTreeMap<String, ItemModifier>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<BTreeMap<String, String>>,
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            uid: None,
            title: title.into(),
            subtitle: None,
            arg: None,
            valid: None,
            autocomplete: None,
            icon: None,
            mods: None,
            variables: None,
        }
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    pub fn with_valid(mut self, valid: bool) -> Self {
        self.valid = Some(valid);
        self
    }

    pub fn with_autocomplete(mut self, autocomplete: impl Into<String>) -> Self {
        self.autocomplete = Some(autocomplete.into());
        self
    }

    pub fn with_icon(mut self, icon: ItemIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_mod(mut self, key: impl Into<String>, modifier: ItemModifier) -> Self {
        self.mods
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), modifier);
        self
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn variable(&self, key: &str) -> Option<&str> {
        self.variables
            .as_ref()
            .and_then(|vars| vars.get(key))
            .map(String::as_str)
    }
}

/// Alternate action shown while a modifier key is held.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ItemModifier {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
}

impl ItemModifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_arg(mut self, arg: impl Into<String>) -> Self {
        self.arg = Some(arg.into());
        self
    }

    pub fn with_valid(mut self, valid: bool) -> Self {
        self.valid = Some(valid);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemIcon {
    pub path: String,
}

impl ItemIcon {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_serializes_items_array() {
        let payload = Feedback::new(vec![Item::new("alpha").with_subtitle("/work/alpha")]);
        let json = payload.to_json().expect("serialize feedback");
        assert_eq!(json, r#"{"items":[{"title":"alpha","subtitle":"/work/alpha"}]}"#);
    }

    #[test]
    fn unset_optional_fields_are_omitted() {
        let json = serde_json::to_string(&Item::new("alpha")).expect("serialize item");

        assert_eq!(json, r#"{"title":"alpha"}"#);
    }

    #[test]
    fn icon_serializes_as_a_bare_path() {
        let item = Item::new("alpha").with_icon(ItemIcon::new("icons/clion.png"));
        let value = serde_json::to_value(&item).expect("serialize item");

        assert_eq!(value["icon"], serde_json::json!({ "path": "icons/clion.png" }));
        assert!(value.get("type").is_none());
    }

    #[test]
    fn modifiers_and_variables_are_keyed_maps() {
        let item = Item::new("alpha")
            .with_uid("CLion:/work/alpha")
            .with_mod(
                "cmd",
                ItemModifier::new()
                    .with_subtitle("Reveal")
                    .with_arg("/work/alpha")
                    .with_valid(true),
            )
            .with_variable("project_path", "/work/alpha");
        let value = serde_json::to_value(&item).expect("serialize item");

        assert_eq!(value["uid"], "CLion:/work/alpha");
        assert_eq!(value["mods"]["cmd"]["arg"], "/work/alpha");
        assert_eq!(value["variables"]["project_path"], "/work/alpha");
        assert_eq!(item.variable("project_path"), Some("/work/alpha"));
        assert_eq!(item.variable("missing"), None);
    }
}
