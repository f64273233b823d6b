use std::path::Path;

use cotask_core::{BlockConfig, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub blocks: Vec<BlockConfig>,
    pub trials_per_block: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            blocks: Vec::new(),
            trials_per_block: 64,
        }
    }
}

impl SessionConfig {
    pub fn new(blocks: Vec<BlockConfig>, trials_per_block: usize) -> Self {
        Self {
            blocks,
            trials_per_block,
        }
    }

    /// Loads and validates every block in a JSON file.
    pub fn load(path: impl AsRef<Path>, trials_per_block: usize) -> Result<Self> {
        let config = Self::new(BlockConfig::load_all(path)?, trials_per_block);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.blocks.iter().try_for_each(BlockConfig::validate)
    }
}
