pub mod init;
pub mod sets;
pub mod train;
pub mod validate;

use std::sync::Arc;

use anyhow::{Context, Result};

use lernwort_core::traits::WordRepository;
use lernwort_repository::{create_repository, LernwortConfig};

/// Resolve the source name and build the matching repository.
pub fn open_repository(
    config: &LernwortConfig,
    source: Option<String>,
) -> Result<Arc<dyn WordRepository>> {
    let source_name = source.unwrap_or_else(|| config.default_source.clone());
    let source_config = config.sources.get(&source_name).with_context(|| {
        format!(
            "source '{}' not found in config. Available: {:?}",
            source_name,
            config.sources.keys().collect::<Vec<_>>()
        )
    })?;
    Ok(Arc::from(create_repository(&source_name, source_config)?))
}
