//! Shared session engine behind every placement strategy
//!
//! Holds the in-memory manifest state for one deployment session and
//! drives the prepare / activate / finalize / purge contract. The
//! strategy-specific part is confined to the [`Placement`] it wraps.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::domain::entities::{normalize_rel_path, DeployedFile, Manifest};
use crate::domain::ports::{
    DeployWarning, DeploymentMethod, Finalized, MethodKind, ProgressFn, PurgeOutcome,
};
use crate::error::{EngineError, EngineResult};
use crate::infrastructure::fs::{atomic_write, mtime_ms, prune_empty_parents};

use super::{Placement, TAG_FILE};

/// Ownership tag persisted in the destination root
#[derive(Debug, Serialize, Deserialize)]
struct DestinationTag {
    game: String,
    method: String,
}

fn read_tag(destination: &Path) -> Option<DestinationTag> {
    let raw = fs::read(destination.join(TAG_FILE)).ok()?;
    serde_json::from_slice(&raw).ok()
}

/// In-flight session state, created by `prepare`, consumed by `finalize`
struct Session {
    destination: PathBuf,
    previous: Manifest,
    next: Manifest,
    /// Absolute source file per rel path placed in this session, used to
    /// restore a within-session placement before overwriting it
    staged_abs: HashMap<String, PathBuf>,
    warnings: Vec<DeployWarning>,
}

/// Deployment method backed by the local filesystem and one [`Placement`]
pub struct FsDeploymentMethod<P: Placement> {
    placement: P,
    game_id: String,
    overwrite_merged: bool,
    session: Option<Session>,
}

impl<P: Placement> FsDeploymentMethod<P> {
    pub fn new(placement: P, game_id: impl Into<String>) -> Self {
        Self {
            placement,
            game_id: game_id.into(),
            overwrite_merged: false,
            session: None,
        }
    }

    /// Allow per-mod activation to replace paths claimed by the merge
    /// layer. Off by default: merge output wins.
    pub fn with_merged_override(mut self, overwrite: bool) -> Self {
        self.overwrite_merged = overwrite;
        self
    }

    /// Place one file, replacing whatever currently occupies `dest`.
    fn place_file(
        placement: &P,
        session: &mut Session,
        src_abs: &Path,
        dest_abs: &Path,
        key: &str,
    ) -> io::Result<()> {
        // symlink_metadata: a dangling symlink still occupies the path
        // and must be removed before placing.
        if dest_abs.symlink_metadata().is_ok() {
            // A move placement from earlier in this session goes back to
            // its staging location instead of being destroyed.
            match session.staged_abs.get(key) {
                Some(prev_src) if placement.carries_missing_source() => {
                    placement.remove(prev_src, dest_abs)?;
                }
                _ => fs::remove_file(dest_abs)?,
            }
        } else if let Some(parent) = dest_abs.parent() {
            fs::create_dir_all(parent)?;
        }
        placement.place(src_abs, dest_abs)
    }
}

impl<P: Placement> DeploymentMethod for FsDeploymentMethod<P> {
    fn kind(&self) -> MethodKind {
        self.placement.kind()
    }

    fn prepare(
        &mut self,
        destination: &Path,
        clean: bool,
        previous: &Manifest,
    ) -> EngineResult<()> {
        fs::create_dir_all(destination).map_err(|e| EngineError::DestinationUnwritable {
            path: destination.to_path_buf(),
            message: e.to_string(),
        })?;

        // Probe writability up front so the failure is structural, not a
        // pile of per-file warnings.
        tempfile::NamedTempFile::new_in(destination).map_err(|e| {
            EngineError::DestinationUnwritable {
                path: destination.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        if let Some(tag) = read_tag(destination) {
            if tag.game != self.game_id {
                return Err(EngineError::ForeignDestination {
                    path: destination.to_path_buf(),
                    owner: tag.game,
                    game: self.game_id.clone(),
                });
            }
        }

        self.session = Some(Session {
            destination: destination.to_path_buf(),
            previous: previous.clone(),
            next: if clean {
                Manifest::new()
            } else {
                previous.clone()
            },
            staged_abs: HashMap::new(),
            warnings: Vec::new(),
        });
        Ok(())
    }

    fn activate(
        &mut self,
        source: &Path,
        source_name: &str,
        sub_dir: &Path,
        merged: &BTreeSet<String>,
    ) -> EngineResult<()> {
        let overwrite_merged = self.overwrite_merged;
        let session = match self.session.as_mut() {
            Some(session) => session,
            None => {
                return Err(EngineError::Io(io::Error::other(
                    "activate called before prepare",
                )))
            }
        };

        if !source.exists() {
            debug!(source = %source.display(), mod_id = source_name, "source missing, skipping");
            return Ok(());
        }

        for entry in WalkDir::new(source).follow_links(false) {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    warn!(mod_id = source_name, error = %err, "failed to read source entry");
                    session.warnings.push(
                        DeployWarning::new(format!("failed to read source entry: {}", err))
                            .for_mod(source_name),
                    );
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let src_rel = match entry.path().strip_prefix(source) {
                Ok(rel) => rel,
                Err(_) => continue,
            };
            let src_rel_norm = normalize_rel_path(src_rel);
            let key = normalize_rel_path(&sub_dir.join(src_rel));

            if merged.contains(&key) && !overwrite_merged {
                debug!(path = %key, "claimed by merge output, skipping");
                continue;
            }

            let src_abs = entry.path();
            let dest_abs = session.destination.join(sub_dir).join(src_rel);

            // Minimal diff: an unchanged placement from the previous
            // session stays as it is.
            if let Some(row) = session.previous.get(&key) {
                if row.source() == source_name
                    && row.source_path() == src_rel_norm
                    && dest_abs.exists()
                {
                    let src_time = mtime_ms(src_abs).unwrap_or(u64::MAX);
                    let dest_time = mtime_ms(&dest_abs).unwrap_or(0);
                    if src_time <= row.time() && dest_time == row.time() {
                        let row = row.clone();
                        session.next.record(row);
                        session.staged_abs.insert(key, src_abs.to_path_buf());
                        continue;
                    }
                    if dest_time != row.time() && src_time <= row.time() {
                        warn!(path = %key, "destination file was modified externally, overwriting");
                        session.warnings.push(
                            DeployWarning::new("destination file was modified externally")
                                .for_mod(source_name)
                                .for_path(&dest_abs),
                        );
                    }
                }
            }

            match Self::place_file(&self.placement, session, src_abs, &dest_abs, &key) {
                Ok(()) => {
                    let time = mtime_ms(&dest_abs).unwrap_or(0);
                    session
                        .next
                        .record(DeployedFile::new(&key, source_name, &src_rel_norm, time));
                    session.staged_abs.insert(key, src_abs.to_path_buf());
                }
                Err(err) => {
                    warn!(mod_id = source_name, path = %key, error = %err, "failed to deploy file");
                    session.warnings.push(
                        DeployWarning::new(format!("failed to deploy: {}", err))
                            .for_mod(source_name)
                            .for_path(&dest_abs),
                    );
                }
            }
        }

        // A consumed move source is still a valid placement; carry the
        // previous rows forward so finalize does not treat them as stale.
        // Registering the staging path lets a later, higher-priority mod
        // restore the file instead of destroying it.
        if self.placement.carries_missing_source() {
            let carried: Vec<DeployedFile> = session
                .previous
                .files()
                .filter(|row| {
                    row.source() == source_name
                        && !session.next.contains(row.rel_path())
                        && !source.join(row.source_path()).exists()
                        && session.destination.join(row.rel_path()).exists()
                })
                .cloned()
                .collect();
            for row in carried {
                session
                    .staged_abs
                    .insert(row.rel_path().to_string(), source.join(row.source_path()));
                session.next.record(row);
            }
        }

        Ok(())
    }

    fn finalize(
        &mut self,
        game_id: &str,
        destination: &Path,
        installation_path: &Path,
        mut progress: Option<ProgressFn<'_>>,
    ) -> EngineResult<Finalized> {
        let mut session = self
            .session
            .take()
            .ok_or_else(|| EngineError::Io(io::Error::other("finalize called before prepare")))?;

        // Stale rows: previously deployed paths no longer contributed by
        // any active mod or the merge layer.
        let stale: Vec<DeployedFile> = session
            .previous
            .files()
            .filter(|row| !session.next.contains(row.rel_path()))
            .cloned()
            .collect();

        let total = stale.len();
        for (done, row) in stale.iter().enumerate() {
            let dest_abs = destination.join(row.rel_path());
            // symlink_metadata: a symlinked placement whose source is gone
            // dangles but is still ours to remove.
            if dest_abs.symlink_metadata().is_ok() {
                let src_abs = installation_path.join(row.source()).join(row.source_path());
                if let Err(err) = self.placement.remove(&src_abs, &dest_abs) {
                    warn!(path = %row.rel_path(), error = %err, "failed to remove stale file");
                    session.warnings.push(
                        DeployWarning::new(format!("failed to remove stale file: {}", err))
                            .for_mod(row.source())
                            .for_path(&dest_abs),
                    );
                } else {
                    prune_empty_parents(&dest_abs, destination);
                }
            } else {
                // Row without a backing file: healed by dropping it.
                debug!(path = %row.rel_path(), "stale row already gone from disk");
            }
            if let Some(cb) = progress.as_mut() {
                cb(done + 1, total);
            }
        }

        let tag = DestinationTag {
            game: game_id.to_string(),
            method: self.placement.kind().as_str().to_string(),
        };
        let raw = serde_json::to_vec_pretty(&tag)
            .map_err(|e| EngineError::Io(io::Error::other(e.to_string())))?;
        atomic_write(&destination.join(TAG_FILE), &raw)?;

        Ok(Finalized {
            manifest: session.next,
            warnings: session.warnings,
        })
    }

    fn purge(
        &mut self,
        installation_path: &Path,
        destination: &Path,
        manifest: &Manifest,
    ) -> EngineResult<PurgeOutcome> {
        let rows: Vec<&DeployedFile> = manifest.files().collect();

        // Recorded placements are independent files; removal parallelizes
        // cleanly.
        let warnings: Vec<DeployWarning> = rows
            .par_iter()
            .filter_map(|row| {
                let dest_abs = destination.join(row.rel_path());
                // symlink_metadata: dangling symlinks are still recorded
                // placements and must come out.
                if dest_abs.symlink_metadata().is_err() {
                    return None; // already removed externally
                }
                let src_abs = installation_path.join(row.source()).join(row.source_path());
                match self.placement.remove(&src_abs, &dest_abs) {
                    Ok(()) => None,
                    Err(err) => {
                        warn!(path = %row.rel_path(), error = %err, "failed to purge file");
                        Some(
                            DeployWarning::new(format!("failed to purge: {}", err))
                                .for_mod(row.source())
                                .for_path(dest_abs),
                        )
                    }
                }
            })
            .collect();

        for row in &rows {
            prune_empty_parents(&destination.join(row.rel_path()), destination);
        }

        let tag_path = destination.join(TAG_FILE);
        if tag_path.exists() {
            if let Err(err) = fs::remove_file(&tag_path) {
                debug!(error = %err, "failed to remove destination tag");
            }
        }

        Ok(PurgeOutcome { warnings })
    }
}
