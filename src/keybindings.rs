//! Keybinding registry with config-file overrides.
//!
//! Every table-view command is an [`Action`] with a default key. The
//! `[keybindings]` table in the config file rebinds actions by name, e.g.
//! `quit = "Ctrl+q"` or `refresh = "F5"`. Invalid overrides are logged and
//! ignored rather than failing startup.

use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Actions
// ============================================================================

/// Commands available in the table view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    Help,
    Refresh,
    Add,
    Edit,
    Delete,
    NavUp,
    NavDown,
    TopRow,
    BottomRow,
    PrevPage,
    NextPage,
    PrevColumn,
    NextColumn,
    ToggleSort,
    EditFilter,
    ClearFilter,
    CycleTheme,
}

impl Action {
    pub const ALL: [Action; 18] = [
        Action::Quit,
        Action::Help,
        Action::Refresh,
        Action::Add,
        Action::Edit,
        Action::Delete,
        Action::NavUp,
        Action::NavDown,
        Action::TopRow,
        Action::BottomRow,
        Action::PrevPage,
        Action::NextPage,
        Action::PrevColumn,
        Action::NextColumn,
        Action::ToggleSort,
        Action::EditFilter,
        Action::ClearFilter,
        Action::CycleTheme,
    ];

    /// Config-file name of this action.
    pub fn name(self) -> &'static str {
        match self {
            Action::Quit => "quit",
            Action::Help => "help",
            Action::Refresh => "refresh",
            Action::Add => "add",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::NavUp => "nav_up",
            Action::NavDown => "nav_down",
            Action::TopRow => "top_row",
            Action::BottomRow => "bottom_row",
            Action::PrevPage => "prev_page",
            Action::NextPage => "next_page",
            Action::PrevColumn => "prev_column",
            Action::NextColumn => "next_column",
            Action::ToggleSort => "toggle_sort",
            Action::EditFilter => "edit_filter",
            Action::ClearFilter => "clear_filter",
            Action::CycleTheme => "cycle_theme",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Action::ALL.into_iter().find(|a| a.name() == name)
    }

    /// Short description for the help overlay.
    pub fn description(self) -> &'static str {
        match self {
            Action::Quit => "Quit",
            Action::Help => "Toggle this help",
            Action::Refresh => "Refresh from server",
            Action::Add => "Add article",
            Action::Edit => "Edit selected article",
            Action::Delete => "Delete selected article",
            Action::NavUp => "Previous row",
            Action::NavDown => "Next row",
            Action::TopRow => "First row of page",
            Action::BottomRow => "Last row of page",
            Action::PrevPage => "Previous page",
            Action::NextPage => "Next page",
            Action::PrevColumn => "Previous column",
            Action::NextColumn => "Next column",
            Action::ToggleSort => "Sort active column (asc/desc/off)",
            Action::EditFilter => "Filter active column",
            Action::ClearFilter => "Clear active column's filter",
            Action::CycleTheme => "Cycle theme",
        }
    }
}

// ============================================================================
// Key Combos
// ============================================================================

/// A key code plus its modifiers, normalized for lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }.normalized()
    }

    fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Character keys already carry their case, so SHIFT on a `Char` code is
    /// redundant and breaks lookups; strip it.
    fn normalized(mut self) -> Self {
        if matches!(self.code, KeyCode::Char(_)) {
            self.modifiers.remove(KeyModifiers::SHIFT);
        }
        self
    }

    /// Human-readable form for the help overlay.
    pub fn display(self) -> String {
        let mut parts = Vec::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let key = match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("F{}", n),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "Shift+Tab".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            other => format!("{:?}", other),
        };
        parts.push(key);
        parts.join("+")
    }
}

/// Parse a key string from the config file: a single character, an "F5"
/// style function key, a named key, or any of those prefixed with "Ctrl+" /
/// "Alt+".
fn parse_key(s: &str) -> Option<KeyCombo> {
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = s.trim();

    loop {
        let lower = rest.to_ascii_lowercase();
        if let Some(tail) = lower
            .strip_prefix("ctrl+")
            .map(|t| &rest[rest.len() - t.len()..])
        {
            modifiers.insert(KeyModifiers::CONTROL);
            rest = tail;
        } else if let Some(tail) = lower
            .strip_prefix("alt+")
            .map(|t| &rest[rest.len() - t.len()..])
        {
            modifiers.insert(KeyModifiers::ALT);
            rest = tail;
        } else if let Some(tail) = lower
            .strip_prefix("shift+")
            .map(|t| &rest[rest.len() - t.len()..])
        {
            modifiers.insert(KeyModifiers::SHIFT);
            rest = tail;
        } else {
            break;
        }
    }

    let code = match rest.to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some('f') | Some('F'), Some(_)) if rest.len() <= 3 => {
                    rest[1..].parse::<u8>().ok().map(KeyCode::F)?
                }
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };

    Some(KeyCombo::new(code, modifiers))
}

// ============================================================================
// Registry
// ============================================================================

/// Maps key combos to actions, with the primary combo per action retained
/// for help display.
pub struct KeybindingRegistry {
    bindings: HashMap<KeyCombo, Action>,
    primary: HashMap<Action, KeyCombo>,
}

impl KeybindingRegistry {
    /// The built-in defaults, vim-flavored.
    pub fn defaults() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
            primary: HashMap::new(),
        };

        let defaults: [(Action, KeyCombo); 18] = [
            (Action::Quit, KeyCombo::plain(KeyCode::Char('q'))),
            (Action::Help, KeyCombo::plain(KeyCode::Char('?'))),
            (Action::Refresh, KeyCombo::plain(KeyCode::Char('r'))),
            (Action::Add, KeyCombo::plain(KeyCode::Char('a'))),
            (Action::Edit, KeyCombo::plain(KeyCode::Char('e'))),
            (Action::Delete, KeyCombo::plain(KeyCode::Char('d'))),
            (Action::NavUp, KeyCombo::plain(KeyCode::Char('k'))),
            (Action::NavDown, KeyCombo::plain(KeyCode::Char('j'))),
            (Action::TopRow, KeyCombo::plain(KeyCode::Char('g'))),
            (Action::BottomRow, KeyCombo::plain(KeyCode::Char('G'))),
            (Action::PrevPage, KeyCombo::plain(KeyCode::Char('h'))),
            (Action::NextPage, KeyCombo::plain(KeyCode::Char('l'))),
            (Action::PrevColumn, KeyCombo::plain(KeyCode::BackTab)),
            (Action::NextColumn, KeyCombo::plain(KeyCode::Tab)),
            (Action::ToggleSort, KeyCombo::plain(KeyCode::Char('s'))),
            (Action::EditFilter, KeyCombo::plain(KeyCode::Char('f'))),
            (Action::ClearFilter, KeyCombo::plain(KeyCode::Char('F'))),
            (Action::CycleTheme, KeyCombo::plain(KeyCode::Char('t'))),
        ];
        for (action, combo) in defaults {
            registry.bindings.insert(combo, action);
            registry.primary.insert(action, combo);
        }

        // Arrow-key aliases alongside the vim keys.
        let aliases = [
            (Action::NavUp, KeyCombo::plain(KeyCode::Up)),
            (Action::NavDown, KeyCombo::plain(KeyCode::Down)),
            (Action::PrevPage, KeyCombo::plain(KeyCode::Left)),
            (Action::NextPage, KeyCombo::plain(KeyCode::Right)),
        ];
        for (action, combo) in aliases {
            registry.bindings.insert(combo, action);
        }

        registry
    }

    /// Defaults plus config-file overrides. Unknown action names and
    /// unparseable key strings are logged and skipped.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut registry = Self::defaults();
        for (action_name, key_str) in overrides {
            match (Action::from_name(action_name), parse_key(key_str)) {
                (Some(action), Some(combo)) => registry.rebind(action, combo),
                (None, _) => {
                    tracing::warn!(action = %action_name, "Unknown action in keybinding override, ignoring");
                }
                (_, None) => {
                    tracing::warn!(action = %action_name, key = %key_str, "Unparseable key in keybinding override, ignoring");
                }
            }
        }
        registry
    }

    fn rebind(&mut self, action: Action, combo: KeyCombo) {
        // Any existing binding on the target key is displaced.
        if let Some(prev) = self.bindings.insert(combo, action) {
            if prev != action && self.primary.get(&prev) == Some(&combo) {
                self.primary.remove(&prev);
            }
        }
        // The action's old primary key stops responding.
        if let Some(old) = self.primary.insert(action, combo) {
            if old != combo && self.bindings.get(&old) == Some(&action) {
                self.bindings.remove(&old);
            }
        }
    }

    /// Look up the action bound to a key press.
    pub fn action_for_key(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        self.bindings.get(&KeyCombo::new(code, modifiers)).copied()
    }

    /// The primary key for an action, for help display.
    pub fn key_for_action(&self, action: Action) -> Option<KeyCombo> {
        self.primary.get(&action).copied()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::defaults()
    }
}
