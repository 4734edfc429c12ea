//! Application state wiring the pipeline to its concrete adapters.
//!
//! `SupportAgent` is generic over its stores; AppState pins it to the
//! file-backed infra implementations. Used by both CLI commands and HTTP
//! handlers.

use std::path::PathBuf;
use std::sync::Arc;

use helpline_core::agent::{PipelineConfig, SupportAgent};
use helpline_core::llm::box_provider::BoxTextGenerator;
use helpline_core::retrieval::SimilarityRetriever;
use helpline_infra::config::load_config;
use helpline_infra::filesystem::{LocalFileSystem, resolve_data_dir};
use helpline_infra::llm::create_generator;
use helpline_infra::storage::{FileFeatureRequestLog, FileLeadStore, load_corpus};
use helpline_types::config::HelplineConfig;
use helpline_types::error::StoreError;

pub type ConcreteSupportAgent = SupportAgent<FileLeadStore, FileFeatureRequestLog>;

#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<ConcreteSupportAgent>,
    pub retriever: Arc<SimilarityRetriever>,
    pub config: Arc<HelplineConfig>,
    pub data_dir: PathBuf,
    pub kb_dir: PathBuf,
}

impl AppState {
    /// Resolve the data dir, load config, connect the generation backend and
    /// index the knowledge corpus.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;
        let generator = create_generator(&config.generation)?;
        Self::from_parts(data_dir, config, generator).await
    }

    /// Wire state from already-resolved parts.
    pub async fn from_parts(
        data_dir: PathBuf,
        config: HelplineConfig,
        generator: BoxTextGenerator,
    ) -> anyhow::Result<Self> {
        let kb_dir = LocalFileSystem::kb_dir(&data_dir, &config.retrieval.kb_dir);
        let documents = load_corpus(&kb_dir).await?;
        let retriever = Arc::new(SimilarityRetriever::with_documents(
            documents,
            config.retrieval.min_score,
        ));

        let agent = SupportAgent::new(
            generator,
            Arc::clone(&retriever),
            FileLeadStore::new(LocalFileSystem::new(), data_dir.clone()),
            FileFeatureRequestLog::new(LocalFileSystem::new(), data_dir.clone()),
            PipelineConfig::from_config(&config),
        );

        Ok(Self {
            agent: Arc::new(agent),
            retriever,
            config: Arc::new(config),
            data_dir,
            kb_dir,
        })
    }

    /// Re-read the knowledge directory and swap in a fresh index.
    pub async fn rebuild_knowledge(&self) -> Result<usize, StoreError> {
        let documents = load_corpus(&self.kb_dir).await?;
        Ok(self.retriever.rebuild(documents))
    }
}
