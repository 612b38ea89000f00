//! The generation driver: selection, closure, rendering, file output.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use scriptbind_codegen::{DeclarationRenderer, NativeBindingRenderer};
use scriptbind_core::{GeneratorConfig, Selection, TypeGraph};
use scriptbind_registry::{RuleClassifier, SupportClassifier, UsageRegistry};

/// Fatal generation errors.
///
/// Everything before file output is soft-failing by design; writing the
/// artifacts is the one operation with no meaningful partial recovery.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Writing an output file failed.
    #[error("failed to write {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The two emitted text artifacts of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifacts {
    /// Native-side registration source unit.
    pub registration: String,
    /// Scripting-side declaration stub.
    pub declarations: String,
}

impl GeneratedArtifacts {
    /// Write both artifacts to the given paths. I/O errors are fatal and
    /// propagate to the caller.
    pub fn write_to(&self, native_path: &Path, decl_path: &Path) -> Result<(), GenerateError> {
        std::fs::write(native_path, &self.registration).map_err(|source| GenerateError::Io {
            path: native_path.to_path_buf(),
            source,
        })?;
        std::fs::write(decl_path, &self.declarations).map_err(|source| GenerateError::Io {
            path: decl_path.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}

/// Drives one generation run over a compiled type graph.
///
/// By default classification is the config's exclusion rules via
/// [`RuleClassifier`]; richer host predicates plug in through
/// [`with_classifier`](Self::with_classifier).
pub struct Generator<'g> {
    graph: &'g TypeGraph,
    config: &'g GeneratorConfig,
    classifier: Option<&'g dyn SupportClassifier>,
}

impl<'g> Generator<'g> {
    pub fn new(graph: &'g TypeGraph, config: &'g GeneratorConfig) -> Self {
        Self {
            graph,
            config,
            classifier: None,
        }
    }

    /// Replace the default rule-based support classifier.
    pub fn with_classifier(mut self, classifier: &'g dyn SupportClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Resolve the binding surface and render both artifacts.
    pub fn run(&self) -> GeneratedArtifacts {
        let rule_classifier;
        let classifier: &dyn SupportClassifier = match self.classifier {
            Some(classifier) => classifier,
            None => {
                rule_classifier = RuleClassifier::new(&self.config.exclusions);
                &rule_classifier
            }
        };

        let mut registry = UsageRegistry::new(self.graph, classifier, &self.config.exclusions);
        match &self.config.selection {
            Selection::All => registry.add_all(),
            Selection::Explicit(signatures) => {
                for signature in signatures {
                    registry.add_selector(signature);
                }
                registry.expand_closure();
            }
        }
        debug!(
            classes = registry.len(),
            headers = registry.deduced_headers().len(),
            "binding surface resolved"
        );

        let registration = NativeBindingRenderer::new(self.graph, self.config).render(&registry);
        let declarations = DeclarationRenderer::new(self.graph, self.config).render(&registry);
        GeneratedArtifacts {
            registration,
            declarations,
        }
    }

    /// Run and write both artifacts in one step.
    pub fn run_to_files(
        &self,
        native_path: &Path,
        decl_path: &Path,
    ) -> Result<GeneratedArtifacts, GenerateError> {
        let artifacts = self.run();
        artifacts.write_to(native_path, decl_path)?;
        Ok(artifacts)
    }
}
