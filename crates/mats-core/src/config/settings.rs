use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};

/// INI section holding the materials window settings.
pub const SETTINGS_SECTION: &str = "Materials";

const KEY_SHOW_MENUBUTTON: &str = "show_menubutton";
const KEY_MANAGE_GOLD: &str = "manage_gold";

/// Persisted settings of the materials window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialsSettings {
    /// Show a shortcut button for the window in the main menu.
    pub show_menubutton: bool,
    /// Withdraw or deposit gold automatically instead of cancelling the queue.
    pub manage_gold: bool,
}

impl Default for MaterialsSettings {
    fn default() -> Self {
        Self {
            show_menubutton: true,
            manage_gold: false,
        }
    }
}

impl MaterialsSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from an INI file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Load settings, or the defaults when `path` does not exist yet.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse settings from INI content.
    ///
    /// Only the `[Materials]` section is read; missing keys keep their defaults
    /// and unknown keys are ignored.
    pub fn parse(content: &str) -> Result<Self> {
        let mut settings = Self::default();
        let mut in_section = false;

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(name) = section_name(line) {
                in_section = name == SETTINGS_SECTION;
                continue;
            }

            if !in_section {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::SettingsParse {
                    line: index + 1,
                    message: format!("expected key = value, got {:?}", line),
                });
            };

            let key = key.trim();
            let target = match key {
                KEY_SHOW_MENUBUTTON => &mut settings.show_menubutton,
                KEY_MANAGE_GOLD => &mut settings.manage_gold,
                _ => {
                    debug!("Ignoring unknown setting {}", key);
                    continue;
                }
            };
            *target = parse_bool(value.trim()).ok_or_else(|| Error::SettingsParse {
                line: index + 1,
                message: format!("invalid boolean for {}: {:?}", key, value.trim()),
            })?;
        }

        Ok(settings)
    }

    /// Save settings, keeping every other section and unknown key of an existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let existing = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(e.into()),
        };
        fs::write(path, self.merge_into(&existing))?;
        Ok(())
    }

    /// Render the settings into `existing` INI content.
    ///
    /// The `[Materials]` section is rewritten in place (or appended when absent).
    pub fn merge_into(&self, existing: &str) -> String {
        let mut output = String::new();
        let mut in_section = false;
        let mut written = false;

        for raw in existing.lines() {
            let line = raw.trim();
            if let Some(name) = section_name(line) {
                in_section = name == SETTINGS_SECTION;
                output.push_str(raw);
                output.push('\n');
                if in_section && !written {
                    self.write_keys(&mut output);
                    written = true;
                }
                continue;
            }

            if in_section
                && let Some((key, _)) = line.split_once('=')
                && matches!(key.trim(), KEY_SHOW_MENUBUTTON | KEY_MANAGE_GOLD)
            {
                continue;
            }

            output.push_str(raw);
            output.push('\n');
        }

        if !written {
            if !output.is_empty() && !output.ends_with("\n\n") {
                output.push('\n');
            }
            output.push_str(&format!("[{}]\n", SETTINGS_SECTION));
            self.write_keys(&mut output);
        }

        output
    }

    fn write_keys(&self, output: &mut String) {
        output.push_str(&format!("{} = {}\n", KEY_SHOW_MENUBUTTON, self.show_menubutton));
        output.push_str(&format!("{} = {}\n", KEY_MANAGE_GOLD, self.manage_gold));
    }
}

fn section_name(line: &str) -> Option<&str> {
    line.strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .map(str::trim)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
