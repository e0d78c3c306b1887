//! Artifact emission
//!
//! [`ArtifactEmitter`] is the seam to the host build pipeline's file-writing
//! facility. The default [`FsEmitter`] maps dotted package names onto a
//! directory tree below the output root and writes each artifact
//! all-or-nothing: the source lands in a temporary sibling first and is
//! renamed into place, so a failed write never leaves a truncated file. A
//! failure on any artifact fails the whole pass; partially emitted output is
//! never a valid generation result.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use adc_domain::{Error, Result, SourceArtifact};

/// Capability to persist one generated source artifact
pub trait ArtifactEmitter {
    /// Write the artifact, returning the path it landed on
    fn write(&self, artifact: &SourceArtifact) -> Result<PathBuf>;
}

impl<E: ArtifactEmitter + ?Sized> ArtifactEmitter for &E {
    fn write(&self, artifact: &SourceArtifact) -> Result<PathBuf> {
        (**self).write(artifact)
    }
}

/// Filesystem emitter rooted at the host's generated-sources directory
#[derive(Debug, Clone)]
pub struct FsEmitter {
    out_dir: PathBuf,
}

impl FsEmitter {
    /// Create an emitter writing below `out_dir`
    pub fn new<P: Into<PathBuf>>(out_dir: P) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Destination path for an artifact
    pub fn target_path(&self, artifact: &SourceArtifact) -> PathBuf {
        self.out_dir.join(artifact.relative_path())
    }
}

impl ArtifactEmitter for FsEmitter {
    fn write(&self, artifact: &SourceArtifact) -> Result<PathBuf> {
        let path = self.target_path(artifact);
        let parent = path
            .parent()
            .ok_or_else(|| Error::config(format!("output path {} has no parent", path.display())))?;
        fs::create_dir_all(parent).map_err(|e| Error::artifact_write(parent, e))?;

        // Stage next to the target so the rename stays on one filesystem.
        let staged = path.with_extension("rs.tmp");
        fs::write(&staged, &artifact.source).map_err(|e| Error::artifact_write(&staged, e))?;
        fs::rename(&staged, &path).map_err(|e| Error::artifact_write(&path, e))?;

        debug!(path = %path.display(), "artifact written");
        Ok(path)
    }
}

/// Emitter that keeps artifacts in memory; the host filer seam for tests
#[derive(Debug, Default)]
pub struct MemoryEmitter {
    written: std::sync::Mutex<Vec<SourceArtifact>>,
}

impl MemoryEmitter {
    /// Create an empty in-memory emitter
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far
    pub fn artifacts(&self) -> Vec<SourceArtifact> {
        self.written
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl ArtifactEmitter for MemoryEmitter {
    fn write(&self, artifact: &SourceArtifact) -> Result<PathBuf> {
        let path = PathBuf::from(artifact.relative_path());
        self.written
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(artifact.clone());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact() -> SourceArtifact {
        SourceArtifact::new(
            "adc_gen.wrappers",
            "ad_mob_imp",
            "AdMobImp",
            "pub struct AdMobImp;\n",
        )
    }

    #[test]
    fn writes_into_package_directories() {
        let dir = tempfile::tempdir().expect("temp dir");
        let emitter = FsEmitter::new(dir.path());

        let path = emitter.write(&artifact()).expect("write succeeds");

        assert_eq!(
            path,
            dir.path().join("adc_gen/wrappers/ad_mob_imp.rs")
        );
        let contents = fs::read_to_string(&path).expect("file readable");
        assert_eq!(contents, "pub struct AdMobImp;\n");
    }

    #[test]
    fn rewrite_overwrites_wholesale() {
        let dir = tempfile::tempdir().expect("temp dir");
        let emitter = FsEmitter::new(dir.path());

        emitter.write(&artifact()).expect("first write");
        let mut changed = artifact();
        changed.source = "pub struct AdMobImp { inner: () }\n".to_string();
        let path = emitter.write(&changed).expect("second write");

        let contents = fs::read_to_string(path).expect("file readable");
        assert_eq!(contents, changed.source);
    }

    #[test]
    fn unwritable_destination_is_an_artifact_write_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        // A file where a directory is needed makes create_dir_all fail.
        let blocker = dir.path().join("adc_gen");
        fs::write(&blocker, "not a directory").expect("blocker written");

        let emitter = FsEmitter::new(dir.path());
        let err = emitter.write(&artifact()).unwrap_err();

        assert!(matches!(err, Error::ArtifactWrite { .. }));
    }

    #[test]
    fn no_staging_residue_after_write() {
        let dir = tempfile::tempdir().expect("temp dir");
        let emitter = FsEmitter::new(dir.path());

        emitter.write(&artifact()).expect("write succeeds");

        let staged = dir.path().join("adc_gen/wrappers/ad_mob_imp.rs.tmp");
        assert!(!staged.exists());
    }
}
