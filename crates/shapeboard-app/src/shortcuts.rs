//! Keyboard shortcut registry and documentation.

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(key: &'static str, ctrl: bool, description: &'static str) -> Self {
        Self {
            key,
            ctrl,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+S").
    pub fn format(&self) -> String {
        if self.ctrl {
            format!("Ctrl+{}", self.key)
        } else {
            self.key.to_string()
        }
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("S", false, "Toggle square placement"),
            Shortcut::new("C", false, "Toggle circle placement"),
            Shortcut::new("T", false, "Toggle triangle placement"),
            Shortcut::new("V", false, "Select tool"),
            Shortcut::new("E", false, "Erase tool"),
            Shortcut::new("Escape", false, "Clear shape selection"),
            Shortcut::new("S", true, "Export painting..."),
            Shortcut::new("O", true, "Import painting..."),
        ]
    }

    /// Log all shortcuts at startup.
    pub fn log_all() {
        for shortcut in Self::all() {
            log::info!("  {:10} {}", shortcut.format(), shortcut.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Shortcut::new("S", true, "").format(), "Ctrl+S");
        assert_eq!(Shortcut::new("Escape", false, "").format(), "Escape");
    }
}
