use std::path::Path;

use serde::Deserialize;

use crate::{
    error::Error,
    function_mesh::{DEFAULT_NUM_CELLS, GraphDomain},
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "LearnOpenGL".to_string(),
            width: 800,
            height: 600,
        }
    }
}

impl WindowConfig {
    pub fn aspect_ratio(&self) -> f32 {
        crate::transform::aspect_ratio(self.width, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GrapherConfig {
    pub num_cells: usize,
    pub domain: GraphDomain,
}

impl Default for GrapherConfig {
    fn default() -> Self {
        GrapherConfig {
            num_cells: DEFAULT_NUM_CELLS,
            domain: GraphDomain::default(),
        }
    }
}

/// Settings shared by the viewer programs.
///
/// Every field has a default, so a config file only needs the fields it
/// changes:
///
/// ```toml
/// wireframe = false
///
/// [window]
/// width = 1024
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Draw the edges of the meshes on top of the shaded faces.
    pub wireframe: bool,
    /// Keep rotating the model and the camera every frame.
    pub constant_rotation: bool,
    pub window: WindowConfig,
    pub grapher: GrapherConfig,
    pub clear_color: [f32; 4],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            wireframe: true,
            constant_rotation: false,
            window: WindowConfig::default(),
            grapher: GrapherConfig::default(),
            clear_color: [0.2, 0.3, 0.3, 1.0],
        }
    }
}

impl ViewerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let config: ViewerConfig =
            toml::from_str(text).map_err(|e| Error::ConfigParse(e.to_string()))?;
        if config.grapher.num_cells == 0 {
            return Err(Error::InvalidCellCount(0));
        }
        config.grapher.domain.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the config at `path` if there is one, else use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
