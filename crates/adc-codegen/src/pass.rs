//! Generation pass orchestration
//!
//! Runs one full round: discovery → collision detection → synthesis →
//! emission. The pass is fail-closed: duplicate provider names or clashing
//! wrapper names abort before a single artifact is written, and any write
//! failure fails the pass as a whole even when other artifacts already
//! landed. An empty snapshot is an idempotent no-op round.

use std::path::PathBuf;

use tracing::{debug, info};

use adc_domain::{Error, Result, SourceArtifact};

use crate::collision;
use crate::discovery::DeclarationDiscovery;
use crate::emit::ArtifactEmitter;
use crate::registry;
use crate::wrapper;

/// Report of one completed generation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Number of accepted provider declarations
    pub providers: usize,
    /// Paths of every artifact written, in emission order
    pub written: Vec<PathBuf>,
}

impl PassSummary {
    /// Whether the round found nothing to generate
    pub fn is_noop(&self) -> bool {
        self.providers == 0
    }
}

/// One-shot generation pass over a discovery source and an emitter
pub struct GenerationPass<D, E> {
    discovery: D,
    emitter: E,
}

impl<D: DeclarationDiscovery, E: ArtifactEmitter> GenerationPass<D, E> {
    /// Create a pass over the given collaborators
    pub fn new(discovery: D, emitter: E) -> Self {
        Self { discovery, emitter }
    }

    /// Run the pass
    pub fn run(&self) -> Result<PassSummary> {
        let declarations = self.discovery.discover()?;
        if declarations.is_empty() {
            debug!("no provider declarations in this round; nothing to generate");
            return Ok(PassSummary::default());
        }

        let result = collision::detect(&declarations);
        if !result.is_clean() {
            return Err(Error::duplicate_provider_names(result.duplicates));
        }
        collision::ensure_distinct_wrapper_names(&result.accepted)?;

        // Synthesize everything before writing anything, so a synthesis
        // problem can never leave partial output behind.
        let mut artifacts: Vec<SourceArtifact> = result
            .accepted
            .values()
            .map(wrapper::synthesize)
            .collect();
        artifacts.push(wrapper::synthesize_index(&result.accepted));
        artifacts.push(registry::synthesize(&result.accepted));
        artifacts.push(registry::synthesize_root_index());

        let mut written = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            written.push(self.emitter.write(artifact)?);
        }

        info!(
            providers = result.accepted.len(),
            artifacts = written.len(),
            "generation pass complete"
        );
        Ok(PassSummary {
            providers: result.accepted.len(),
            written,
        })
    }
}

#[cfg(test)]
mod tests {
    use adc_domain::Declaration;

    use super::*;
    use crate::emit::MemoryEmitter;

    struct FixedDiscovery(Vec<Declaration>);

    impl DeclarationDiscovery for FixedDiscovery {
        fn discover(&self) -> Result<Vec<Declaration>> {
            Ok(self.0.clone())
        }
    }

    /// Emitter that rejects every write
    struct BrokenEmitter;

    impl ArtifactEmitter for BrokenEmitter {
        fn write(&self, artifact: &SourceArtifact) -> Result<PathBuf> {
            Err(Error::artifact_write(
                artifact.relative_path(),
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ))
        }
    }

    fn decl(name: &str, sdk: bool, package: &str, simple: &str) -> Declaration {
        Declaration::new(name, sdk, package, simple).expect("valid declaration")
    }

    #[test]
    fn two_providers_yield_two_wrappers_and_one_registry() {
        let discovery = FixedDiscovery(vec![
            decl("AdMob", true, "providers::admob", "AdMob"),
            decl("Facebook", false, "providers::facebook", "Facebook"),
        ]);
        let emitter = MemoryEmitter::new();

        let summary = GenerationPass::new(discovery, &emitter)
            .run()
            .expect("pass succeeds");

        assert_eq!(summary.providers, 2);
        // Two wrappers + wrappers index + registry + root index.
        assert_eq!(summary.written.len(), 5);

        let artifacts = emitter.artifacts();
        let wrapper_count = artifacts
            .iter()
            .filter(|a| a.package == "adc_gen.wrappers" && a.file_stem != "mod")
            .count();
        assert_eq!(wrapper_count, 2);
        let registry_count = artifacts
            .iter()
            .filter(|a| a.package == "adc_gen.registry")
            .count();
        assert_eq!(registry_count, 1);
    }

    #[test]
    fn duplicate_names_abort_with_zero_artifacts() {
        let discovery = FixedDiscovery(vec![
            decl("AdMob", true, "providers::admob", "AdMob"),
            decl("AdMob", true, "legacy::admob", "LegacyAdMob"),
        ]);
        let emitter = MemoryEmitter::new();

        let err = GenerationPass::new(discovery, &emitter).run().unwrap_err();

        assert!(err.to_string().contains("AdMob"));
        assert!(emitter.artifacts().is_empty(), "no artifacts on abort");
    }

    #[test]
    fn wrapper_name_clash_aborts_with_zero_artifacts() {
        let discovery = FixedDiscovery(vec![
            decl("First", true, "providers::a", "AdMob"),
            decl("Second", true, "providers::b", "AdMob"),
        ]);
        let emitter = MemoryEmitter::new();

        let err = GenerationPass::new(discovery, &emitter).run().unwrap_err();

        assert!(matches!(err, Error::WrapperNameClash { .. }));
        assert!(emitter.artifacts().is_empty());
    }

    #[test]
    fn empty_snapshot_is_a_noop_round() {
        let emitter = MemoryEmitter::new();
        let summary = GenerationPass::new(FixedDiscovery(Vec::new()), &emitter)
            .run()
            .expect("pass succeeds");

        assert!(summary.is_noop());
        assert!(summary.written.is_empty());
        assert!(emitter.artifacts().is_empty());
    }

    #[test]
    fn write_failure_fails_the_pass() {
        let discovery = FixedDiscovery(vec![decl("AdMob", true, "providers::admob", "AdMob")]);

        let err = GenerationPass::new(discovery, BrokenEmitter).run().unwrap_err();

        assert!(matches!(err, Error::ArtifactWrite { .. }));
    }

    #[test]
    fn reruns_produce_identical_artifacts() {
        let declarations = vec![
            decl("AdMob", true, "providers::admob", "AdMob"),
            decl("Facebook", false, "providers::facebook", "Facebook"),
        ];

        let first = MemoryEmitter::new();
        GenerationPass::new(FixedDiscovery(declarations.clone()), &first)
            .run()
            .expect("first pass");
        let second = MemoryEmitter::new();
        GenerationPass::new(FixedDiscovery(declarations), &second)
            .run()
            .expect("second pass");

        assert_eq!(first.artifacts(), second.artifacts());
    }
}
