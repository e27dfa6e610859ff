//! Transform options.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use crate::component::DEFINE_COMPONENT;

/// How the props accessor is declared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropsStyle {
    /// `type Props = {...}` plus `defineProps<Props>()`
    #[default]
    Typed,
    /// `defineProps({...})` with the original runtime object
    Runtime,
}

/// Options shared by all passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformOptions {
    /// Props declaration style (default: typed)
    #[serde(default)]
    pub props_style: PropsStyle,

    /// Wrap the typed accessor in `withDefaults` when defaults exist (default: false)
    #[serde(default)]
    pub with_defaults: bool,

    /// Import bindings removed once no longer referenced (default: `["defineComponent"]`)
    #[serde(default = "default_cleanup_bindings")]
    pub cleanup_bindings: Vec<CompactString>,

    /// Mark the rewritten block as `<script setup>` (default: true)
    #[serde(default = "default_true")]
    pub add_setup_attribute: bool,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            props_style: PropsStyle::default(),
            with_defaults: false,
            cleanup_bindings: default_cleanup_bindings(),
            add_setup_attribute: true,
        }
    }
}

fn default_cleanup_bindings() -> Vec<CompactString> {
    vec![CompactString::new(DEFINE_COMPONENT)]
}

fn default_true() -> bool {
    true
}
