//! Application state shared by every handler.

use std::sync::Arc;

use tivro_core::Config;
use tivro_processing::UploadValidator;
use tivro_storage::{id_generator_for, IdGenerator, ObjectStorage};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn ObjectStorage>,
    pub validator: UploadValidator,
    /// Source of the random component of object paths.
    pub id_generator: Arc<dyn IdGenerator>,
}

impl AppState {
    /// State with the standard allow-lists, the configured size limit and the
    /// configured id strategy.
    pub fn new(config: Config, storage: Arc<dyn ObjectStorage>) -> Self {
        let validator = UploadValidator::with_max_size(config.max_upload_bytes());
        let id_generator = id_generator_for(config.id_strategy());
        Self {
            config,
            storage,
            validator,
            id_generator,
        }
    }

    /// Replace the id generator (deterministic ids in tests).
    pub fn with_id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    pub fn bucket(&self) -> &str {
        self.config.storage_bucket()
    }
}
