//! Marker styles.
//!
//! A [`Theme`] maps style names to `console::Style` values. The text backend
//! looks up two names:
//!
//! - [`MARKER_STYLE`] (`item-marker`): applied to every marker.
//! - [`STRONG_STYLE`] (`item-strong`): applied to markers of strong layouts.
//!
//! Themes are built programmatically or loaded from YAML. Each entry is a
//! mapping of attributes, a shorthand string, or an alias to another entry:
//!
//! ```yaml
//! item-marker:
//!   fg: cyan
//! item-strong: "bold bright_magenta"
//! accent: item-strong
//! ```
//!
//! Colors are named (`red`, `bright_blue`, `gray`), palette indices (`208`)
//! or hex (`"#ff6b35"`, `"#fff"`).

use std::collections::HashMap;
use std::path::Path;

use console::{Color, Style};

use crate::error::ConfigError;

/// Style applied to every marker.
pub const MARKER_STYLE: &str = "item-marker";

/// Style applied to markers of strong layouts.
pub const STRONG_STYLE: &str = "item-strong";

const MAX_ALIAS_DEPTH: usize = 16;

/// A style value that is either concrete or an alias to another name.
#[derive(Debug, Clone)]
pub enum StyleValue {
    Concrete(Style),
    Alias(String),
}

impl From<Style> for StyleValue {
    fn from(style: Style) -> Self {
        StyleValue::Concrete(style)
    }
}

impl From<&str> for StyleValue {
    fn from(name: &str) -> Self {
        StyleValue::Alias(name.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(name: String) -> Self {
        StyleValue::Alias(name)
    }
}

/// Named collection of marker styles.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
    aliases: HashMap<String, String>,
}

impl Theme {
    /// Creates an empty theme; markers render unstyled.
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock theme: strong markers in bold.
    pub fn standard() -> Self {
        Self::new()
            .add(MARKER_STYLE, Style::new())
            .add(STRONG_STYLE, Style::new().bold())
    }

    /// Adds a concrete style or an alias, returning the theme for chaining.
    ///
    /// ```rust
    /// use listkit::Theme;
    /// use console::Style;
    ///
    /// let theme = Theme::new()
    ///     .add("accent", Style::new().cyan().bold())
    ///     .add("item-strong", "accent");
    /// assert!(theme.get("item-strong").is_some());
    /// ```
    pub fn add<V: Into<StyleValue>>(mut self, name: &str, value: V) -> Self {
        match value.into() {
            StyleValue::Concrete(style) => {
                self.aliases.remove(name);
                self.styles.insert(name.to_string(), style);
            }
            StyleValue::Alias(target) => {
                self.styles.remove(name);
                self.aliases.insert(name.to_string(), target);
            }
        }
        self
    }

    /// Resolves a style by name, following aliases.
    ///
    /// Returns `None` for unknown names, dangling aliases and alias cycles.
    pub fn get(&self, name: &str) -> Option<&Style> {
        let mut current = name;
        for _ in 0..MAX_ALIAS_DEPTH {
            if let Some(style) = self.styles.get(current) {
                return Some(style);
            }
            current = self.aliases.get(current)?.as_str();
        }
        None
    }

    /// Styles from `other` replace same-named entries in `self`.
    pub fn merge(mut self, other: Theme) -> Self {
        for name in other.styles.keys() {
            self.aliases.remove(name);
        }
        for name in other.aliases.keys() {
            self.styles.remove(name);
        }
        self.styles.extend(other.styles);
        self.aliases.extend(other.aliases);
        self
    }

    pub fn len(&self) -> usize {
        self.styles.len() + self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty() && self.aliases.is_empty()
    }

    /// Parses a theme from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Self::parse(yaml, None)
    }

    /// Loads a theme file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read(path, e))?;
        Self::parse(&content, Some(path))
    }

    fn parse(yaml: &str, path: Option<&Path>) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::new());
        }
        let entries: HashMap<String, serde_yaml::Value> =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::parse(path, e))?;

        let mut theme = Theme::new();
        for (name, value) in entries {
            let style_value = parse_entry(&name, &value).map_err(|message| {
                ConfigError::InvalidStyle {
                    style: name.clone(),
                    message,
                }
            })?;
            theme = theme.add(&name, style_value);
        }
        Ok(theme)
    }
}

fn parse_entry(name: &str, value: &serde_yaml::Value) -> Result<StyleValue, String> {
    match value {
        serde_yaml::Value::String(s) => parse_shorthand(name, s),
        serde_yaml::Value::Mapping(map) => {
            let mut style = Style::new();
            for (key, attr) in map {
                let key = key
                    .as_str()
                    .ok_or_else(|| format!("attribute names must be strings: {:?}", key))?;
                style = apply_attribute(style, key, attr)?;
            }
            Ok(StyleValue::Concrete(style))
        }
        other => Err(format!("expected a mapping or string, got {:?}", other)),
    }
}

/// `"bold cyan"` is a shorthand; a single unknown word is an alias.
fn parse_shorthand(name: &str, s: &str) -> Result<StyleValue, String> {
    let words: Vec<&str> = s.split_whitespace().collect();
    let mut style = Style::new();
    for word in &words {
        style = match *word {
            "bold" => style.bold(),
            "dim" => style.dim(),
            "italic" => style.italic(),
            "underline" => style.underlined(),
            color => match parse_color(color) {
                Ok(c) => style.fg(c),
                Err(_) if words.len() == 1 && *word != name => {
                    return Ok(StyleValue::Alias(word.to_string()))
                }
                Err(e) => return Err(e),
            },
        };
    }
    Ok(StyleValue::Concrete(style))
}

fn apply_attribute(style: Style, key: &str, value: &serde_yaml::Value) -> Result<Style, String> {
    match key {
        "fg" => return Ok(style.fg(parse_color_value(value)?)),
        "bg" => return Ok(style.bg(parse_color_value(value)?)),
        "bold" | "dim" | "italic" | "underline" => {}
        other => return Err(format!("unknown attribute '{}'", other)),
    }

    let enabled = value
        .as_bool()
        .ok_or_else(|| format!("'{}' expects true or false", key))?;
    if !enabled {
        return Ok(style);
    }
    Ok(match key {
        "bold" => style.bold(),
        "dim" => style.dim(),
        "italic" => style.italic(),
        _ => style.underlined(),
    })
}

fn parse_color_value(value: &serde_yaml::Value) -> Result<Color, String> {
    match value {
        serde_yaml::Value::String(s) => parse_color(s),
        serde_yaml::Value::Number(n) => n
            .as_u64()
            .filter(|i| *i <= 255)
            .map(|i| Color::Color256(i as u8))
            .ok_or_else(|| format!("palette index out of range (0-255): {}", n)),
        other => Err(format!("invalid color value: {:?}", other)),
    }
}

fn parse_color(s: &str) -> Result<Color, String> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex(hex).map(|rgb| Color::Color256(rgb_to_ansi256(rgb)));
    }
    if let Ok(index) = s.parse::<u8>() {
        return Ok(Color::Color256(index));
    }

    let lower = s.to_lowercase();
    if let Some(base) = lower.strip_prefix("bright_") {
        let index = match base {
            "black" => 8,
            "red" => 9,
            "green" => 10,
            "yellow" => 11,
            "blue" => 12,
            "magenta" => 13,
            "cyan" => 14,
            "white" => 15,
            _ => return Err(format!("unknown bright color: {}", s)),
        };
        return Ok(Color::Color256(index));
    }

    Ok(match lower.as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" | "gray" | "grey" => Color::White,
        _ => return Err(format!("unknown color: {}", s)),
    })
}

fn parse_hex(hex: &str) -> Result<(u8, u8, u8), String> {
    let invalid = || format!("invalid hex color: #{}", hex);
    if !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
    match hex.len() {
        3 => Ok((
            channel(&hex[0..1])? * 17,
            channel(&hex[1..2])? * 17,
            channel(&hex[2..3])? * 17,
        )),
        6 => Ok((channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        _ => Err(invalid()),
    }
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}
