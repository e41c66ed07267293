//! Global shortcut bindings.
//!
//! Shortcuts from the configuration are normalized once, registered with the
//! host when the widget starts, and resolved back to an effect when the host
//! reports an activation.

use std::collections::BTreeMap;

use crate::modules::session::EffectKind;

/// Normalizes a shortcut string to canonical modifier names.
///
/// Accepts common aliases:
/// - `Ctrl` -> `Control`
/// - `Cmd`, `Super`, `Meta` -> `Command`
/// - `Alt`, `Opt` -> `Option`
/// - `CmdOrCtrl` -> `CommandOrControl`
/// - `` ` `` -> `Backquote`
///
/// Modifier aliases are matched case-insensitively and surrounding whitespace
/// is dropped. Key names pass through unchanged.
#[must_use]
pub fn normalize_shortcut(shortcut: &str) -> String {
    let mut result = String::with_capacity(shortcut.len() + 8);

    for part in shortcut.split('+').map(str::trim).filter(|part| !part.is_empty()) {
        if !result.is_empty() {
            result.push('+');
        }
        result.push_str(canonical_part(part));
    }

    result
}

fn canonical_part(part: &str) -> &str {
    const ALIASES: &[(&[&str], &str)] = &[
        (&["ctrl", "control"], "Control"),
        (&["cmd", "command", "super", "meta"], "Command"),
        (&["alt", "opt", "option"], "Option"),
        (&["shift"], "Shift"),
        (&["cmdorctrl", "commandorcontrol"], "CommandOrControl"),
        (&["`"], "Backquote"),
    ];

    ALIASES
        .iter()
        .find(|(aliases, _)| aliases.iter().any(|alias| alias.eq_ignore_ascii_case(part)))
        .map_or(part, |(_, canonical)| *canonical)
}

/// Shortcut to effect table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotkeyBindings {
    bindings: BTreeMap<String, EffectKind>,
}

impl HotkeyBindings {
    /// Builds the table from configured `(shortcut, effect)` pairs.
    ///
    /// Empty shortcuts are skipped. When two spellings normalize to the same
    /// shortcut, the later one in iteration order wins.
    pub fn new<'a>(entries: impl IntoIterator<Item = (&'a String, &'a EffectKind)>) -> Self {
        let mut bindings = BTreeMap::new();
        for (shortcut, effect) in entries {
            let combo = normalize_shortcut(shortcut);
            if combo.is_empty() {
                tracing::warn!(shortcut = %shortcut, "ignoring empty shortcut");
                continue;
            }
            if let Some(previous) = bindings.insert(combo.clone(), *effect) {
                tracing::warn!(combo = %combo, ?previous, effect = ?effect, "duplicate shortcut");
            }
        }
        Self { bindings }
    }

    /// Effect bound to a shortcut, in any accepted spelling.
    #[must_use]
    pub fn resolve(&self, shortcut: &str) -> Option<EffectKind> {
        self.bindings.get(&normalize_shortcut(shortcut)).copied()
    }

    /// Normalized shortcuts, sorted.
    pub fn combos(&self) -> impl Iterator<Item = &str> { self.bindings.keys().map(String::as_str) }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize { self.bindings.len() }

    /// Whether no shortcut is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.bindings.is_empty() }
}
