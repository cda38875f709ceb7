//! Configuration system
//!
//! Surface and interaction settings, loadable from TOML or RON files.

pub use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec2;
use crate::ui::input::Key;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Space a widget surface is drawn in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetSpace {
    /// Drawn on a quad placed in the 3D world; eligible for ray interaction
    World,
    /// Drawn directly on the screen; uses regular 2D cursor hit-testing
    Screen,
}

/// Which component axis a surface treats as its facing direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationConvention {
    /// Facing along the component forward axis
    Standard,
    /// Older surfaces authored facing along the component up axis
    Legacy,
}

/// Per-surface settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Drawing space
    pub space: WidgetSpace,
    /// Widget draw size in local units (width, height)
    pub draw_size: [f32; 2],
    /// Normalized pivot of the widget quad
    pub pivot: [f32; 2],
    /// Maximum distance from the trace start at which the surface accepts hits
    pub max_interaction_distance: f32,
    /// Facing axis convention
    pub rotation: RotationConvention,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            space: WidgetSpace::World,
            draw_size: [500.0, 500.0],
            pivot: [0.5, 0.5],
            max_interaction_distance: 500.0,
            rotation: RotationConvention::Standard,
        }
    }
}

impl SurfaceConfig {
    /// Draw size as a vector
    pub fn draw_size(&self) -> Vec2 {
        Vec2::new(self.draw_size[0], self.draw_size[1])
    }

    /// Pivot as a vector
    pub fn pivot(&self) -> Vec2 {
        Vec2::new(self.pivot[0], self.pivot[1])
    }

    /// Whether the legacy rotation convention is in effect
    pub fn uses_legacy_rotation(&self) -> bool {
        self.rotation == RotationConvention::Legacy
    }
}

impl Config for SurfaceConfig {}

/// Pointer emulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Cursor radius used when resolving the widget path of a custom hit
    pub cursor_radius: f32,
    /// Key dispatched by the activate emulation calls
    pub activate_key: Key,
    /// User index stamped on synthesized events
    pub user_index: u32,
    /// Pointer index stamped on synthesized pointer events
    pub pointer_index: u32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            cursor_radius: 1.0,
            activate_key: Key::Enter,
            user_index: 0,
            pointer_index: 0,
        }
    }
}

impl Config for InteractionConfig {}

/// Aggregate configuration for one VR widget surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VrWidgetConfig {
    /// Surface settings
    pub surface: SurfaceConfig,
    /// Interaction settings
    pub interaction: InteractionConfig,
}

impl Config for VrWidgetConfig {}
