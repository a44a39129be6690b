// src/pipeline.rs
use std::sync::Arc;

use crate::{
    catalogue::Catalogue,
    classify::classify_all,
    config::options::SourceOptions,
    core::net::{ self, Fetch },
    error::{ FetchError, Result },
    model::ReconciledFeature,
    progress::Progress,
    reconcile::reconcile,
    specs::{ ListItemExtractor, RecordExtractor },
};

/// Extract, classify and reconcile already fetched markup. Pure and
/// deterministic: the same markup always gives the same output.
pub fn process_markup(
    extractor: &dyn RecordExtractor,
    catalogue: &Catalogue,
    markup: &str,
) -> Vec<ReconciledFeature> {
    let records = classify_all(extractor.extract(markup));
    reconcile(catalogue, &records)
}

/// One fetch-parse-reconcile pass per `run`. Holds no state between runs.
#[derive(Clone)]
pub struct Pipeline {
    url: String,
    fetcher: Arc<dyn Fetch>,
    extractor: Arc<dyn RecordExtractor>,
    catalogue: Arc<Catalogue>,
}

impl Pipeline {
    pub fn new(url: impl Into<String>, fetcher: Arc<dyn Fetch>, catalogue: Arc<Catalogue>) -> Self {
        Self {
            url: url.into(),
            fetcher,
            extractor: Arc::new(ListItemExtractor::default()),
            catalogue,
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn RecordExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    /// Build fetcher, extractor and catalogue from options. Catalogue and
    /// selector problems surface here, before any network traffic.
    pub fn from_options(source: &SourceOptions) -> Result<Self> {
        let catalogue = match &source.catalogue {
            Some(path) => Arc::new(Catalogue::load(path)?),
            None => Catalogue::builtin(),
        };
        let extractor = Arc::new(ListItemExtractor::new(&source.selector)?);
        let fetcher = net::from_options(source)?;
        Ok(Pipeline::new(source.url.clone(), fetcher, catalogue).with_extractor(extractor))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn catalogue(&self) -> &Arc<Catalogue> {
        &self.catalogue
    }

    pub fn process(&self, markup: &str) -> Vec<ReconciledFeature> {
        process_markup(self.extractor.as_ref(), &self.catalogue, markup)
    }

    pub async fn run(
        &self,
        mut progress: Option<&mut dyn Progress>,
    ) -> std::result::Result<Vec<ReconciledFeature>, FetchError> {
        if let Some(p) = progress.as_deref_mut() {
            p.begin(&self.url);
        }

        // → The only suspension point ←
        let fetched = self.fetcher.fetch(&self.url).await;

        let markup = match fetched {
            Ok(m) => m,
            Err(e) => {
                loge!("Pipeline: fetch failed: {e}");
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&format!("Fetch failed: {e}"));
                    p.finish();
                }
                return Err(e);
            }
        };

        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Fetched {} bytes, parsing…", markup.len()));
        }
        let features = self.process(&markup);
        let open = features.iter().filter(|f| f.is_open).count();
        logf!("Pipeline: {open}/{} features open", features.len());

        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("{open}/{} features open", features.len()));
            p.finish();
        }
        Ok(features)
    }
}
