use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

const QUALIFIER: &str = "net.meadow";
const ORGANIZATION: &str = "Meadow";
const APPLICATION: &str = "meadow";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub font_size: i32,
    pub window: WindowGeometry,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            font_size: 14,
            window: WindowGeometry::default(),
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowGeometry {
    pub width: i32,
    pub height: i32,
}

impl Default for WindowGeometry {
    fn default() -> Self {
        WindowGeometry {
            width: 1000,
            height: 800,
        }
    }
}

/// Widget colors as "#rrggbb" strings in the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: String,
    pub text: String,
    pub highlight: String,
    pub caret: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: "#1e1e1e".to_string(),
            text: "#ffffff".to_string(),
            highlight: "#264f78".to_string(),
            caret: "#ffffff".to_string(),
        }
    }
}

impl Theme {
    pub fn background_rgba(&self) -> u32 {
        parse_hex_color(&self.background).unwrap_or(0x1e1e1eff)
    }

    pub fn text_rgba(&self) -> u32 {
        parse_hex_color(&self.text).unwrap_or(0xffffffff)
    }

    pub fn highlight_rgba(&self) -> u32 {
        parse_hex_color(&self.highlight).unwrap_or(0x264f78ff)
    }

    pub fn caret_rgba(&self) -> u32 {
        parse_hex_color(&self.caret).unwrap_or(0xffffffff)
    }
}

/// Parse "#rrggbb" into 0xRRGGBBAA with full alpha.
pub fn parse_hex_color(s: &str) -> Option<u32> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let rgb = u32::from_str_radix(hex, 16).ok()?;
    Some((rgb << 8) | 0xff)
}

pub fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

pub fn load_config(path: &Path) -> Option<Config> {
    let contents = fs::read_to_string(path).ok()?;
    match toml::from_str::<Config>(&contents) {
        Ok(config) => Some(config),
        Err(err) => {
            eprintln!("Failed to parse config file {}: {err}", path.display());
            None
        }
    }
}

pub fn save_config(path: &Path, config: &Config) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let toml = toml::to_string_pretty(config).map_err(|err| {
        io::Error::new(ErrorKind::Other, format!("toml serialization error: {err}"))
    })?;

    fs::write(path, toml)
}
