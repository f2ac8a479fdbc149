//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    JumpToTop,
    JumpToBottom,
    PageUp,
    PageDown,

    // Tree operations
    Expand,
    Collapse,
    /// Open a file or toggle a folder.
    Activate,

    // Host actions
    /// Show the selected item in the system file browser.
    Reveal,
    /// Render the gallery page for the selection and open it.
    OpenGallery,

    // Other actions
    Refresh,
    ToggleHelp,
    Cancel,

    // Application
    Quit,
    ForceQuit,

    // No action
    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,
            (KeyCode::Esc, _) => KeyAction::Cancel,

            // Navigation - vim style
            (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::MoveDown,
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::MoveUp,
            (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::Collapse,
            (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::Expand,
            (KeyCode::Char('o'), KeyModifiers::NONE) => KeyAction::Expand,

            // Navigation - arrow keys
            (KeyCode::Down, _) => KeyAction::MoveDown,
            (KeyCode::Up, _) => KeyAction::MoveUp,
            (KeyCode::Left, _) => KeyAction::Collapse,
            (KeyCode::Right, _) => KeyAction::Expand,

            // Jump
            (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::JumpToTop,
            (KeyCode::Char('G'), KeyModifiers::SHIFT) => KeyAction::JumpToBottom,
            (KeyCode::Home, _) => KeyAction::JumpToTop,
            (KeyCode::End, _) => KeyAction::JumpToBottom,

            // Page navigation
            (KeyCode::PageUp, _) => KeyAction::PageUp,
            (KeyCode::PageDown, _) => KeyAction::PageDown,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => KeyAction::PageUp,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => KeyAction::PageDown,

            (KeyCode::Enter, _) => KeyAction::Activate,
            (KeyCode::Char('r'), KeyModifiers::NONE) => KeyAction::Reveal,
            (KeyCode::Char('p'), KeyModifiers::NONE) => KeyAction::OpenGallery,

            // Refresh (Shift-R since r is reveal)
            (KeyCode::Char('R'), KeyModifiers::SHIFT) => KeyAction::Refresh,
            (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::ToggleHelp,

            _ => KeyAction::None,
        }
    }
}

/// A section of key bindings for the help display.
pub struct HelpSection {
    pub title: &'static str,
    pub bindings: Vec<KeyBinding>,
}

/// Key binding for display in help.
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Get all key bindings organized by section for help display.
pub fn get_help_sections() -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: "Navigation",
            bindings: vec![
                KeyBinding { keys: "j/k ↑/↓", description: "Move up/down" },
                KeyBinding { keys: "l/o →", description: "Expand folder" },
                KeyBinding { keys: "h ←", description: "Collapse / go to parent" },
                KeyBinding { keys: "g/G", description: "Jump to top/bottom" },
                KeyBinding { keys: "Ctrl-u/d", description: "Page up/down" },
            ],
        },
        HelpSection {
            title: "Images",
            bindings: vec![
                KeyBinding { keys: "Enter", description: "Open file / toggle folder" },
                KeyBinding { keys: "r", description: "Reveal in file browser" },
                KeyBinding { keys: "p", description: "Open gallery page" },
                KeyBinding { keys: "R", description: "Refresh tree" },
            ],
        },
        HelpSection {
            title: "Application",
            bindings: vec![
                KeyBinding { keys: "?", description: "Show this help" },
                KeyBinding { keys: "Esc", description: "Close help / clear notice" },
                KeyBinding { keys: "q", description: "Quit" },
            ],
        },
    ]
}
