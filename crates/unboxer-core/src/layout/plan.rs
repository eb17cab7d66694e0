//! Output layout planning.
//!
//! Decides how the extracted scratch tree maps onto the output directory so
//! that an archive never produces `name/name` nesting.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use walkdir::WalkDir;

use crate::FsOp;
use crate::Result;
use crate::UnboxError;
use crate::types::BaseName;

use super::roots::RootItemSet;

/// Which layout rule a plan follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    /// The single root directory matched the base name; its children were
    /// lifted into the output directory.
    Flattened,
    /// A single root with a different name (or not a directory) was moved
    /// whole.
    SingleRoot,
    /// Zero or several roots; every top-level scratch entry was moved.
    TopLevel,
}

impl LayoutKind {
    /// Short name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Flattened => "flattened",
            Self::SingleRoot => "single-root",
            Self::TopLevel => "top-level",
        }
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One rename from the scratch tree into the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOp {
    /// Path inside the scratch directory.
    pub source: PathBuf,
    /// Path inside the output directory.
    pub destination: PathBuf,
}

/// The moves that materialize one archive's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    /// Rule that produced the moves.
    pub kind: LayoutKind,
    /// Moves in application order (sorted by source name).
    pub moves: Vec<MoveOp>,
}

/// Plans the layout of `scratch` inside `output`.
///
/// Exactly one rule applies:
///
/// 1. one root, a directory named exactly `base_name`: its children move to
///    `output/<child>` ([`LayoutKind::Flattened`]);
/// 2. one root otherwise: it moves to `output/<root>`
///    ([`LayoutKind::SingleRoot`]);
/// 3. zero or several roots: every entry of `scratch` moves to
///    `output/<entry>` ([`LayoutKind::TopLevel`]).
///
/// A single root that is missing from `scratch` also falls back to rule 3.
///
/// # Errors
///
/// Returns a `Filesystem` error if the scratch tree cannot be read.
pub fn plan_layout(
    base_name: &BaseName,
    roots: &RootItemSet,
    scratch: &Path,
    output: &Path,
) -> Result<LayoutPlan> {
    if let (1, Some(root)) = (roots.len(), roots.first()) {
        let root_path = scratch.join(root);
        match fs::symlink_metadata(&root_path) {
            Ok(meta) if meta.is_dir() && base_name == root.as_str() => {
                debug!(root = %root, "flattening single root matching base name");
                return Ok(LayoutPlan {
                    kind: LayoutKind::Flattened,
                    moves: children_into(&root_path, output)?,
                });
            }
            Ok(_) => {
                debug!(root = %root, "moving single root whole");
                return Ok(LayoutPlan {
                    kind: LayoutKind::SingleRoot,
                    moves: vec![MoveOp {
                        source: root_path,
                        destination: output.join(root),
                    }],
                });
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(root = %root, "listed root missing from scratch, using top-level layout");
            }
            Err(err) => return Err(UnboxError::filesystem(FsOp::ReadDir, root_path, err)),
        }
    }

    debug!(roots = roots.len(), "moving top-level entries");
    Ok(LayoutPlan {
        kind: LayoutKind::TopLevel,
        moves: children_into(scratch, output)?,
    })
}

/// Predicts the layout rule from entry names alone, without extracting.
///
/// A root counts as a directory when some entry continues past it
/// (`root/...`). Used by `inspect`; [`plan_layout`] decides from the
/// extracted tree and can differ for archives whose listing is incomplete.
#[must_use]
pub fn predict_layout<S: AsRef<str>>(
    base_name: &BaseName,
    roots: &RootItemSet,
    names: &[S],
) -> LayoutKind {
    let Some(root) = roots.first().filter(|_| roots.len() == 1) else {
        return LayoutKind::TopLevel;
    };
    let is_dir = names.iter().any(|name| {
        let name = name.as_ref().trim_start_matches("./");
        name.strip_prefix(root.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    });
    if is_dir && base_name == root.as_str() {
        LayoutKind::Flattened
    } else {
        LayoutKind::SingleRoot
    }
}

/// One move per immediate child of `dir`, sorted by name.
fn children_into(dir: &Path, output: &Path) -> Result<Vec<MoveOp>> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| {
            let entry = entry
                .map_err(|err| UnboxError::filesystem(FsOp::ReadDir, dir, io::Error::from(err)))?;
            Ok(MoveOp {
                destination: output.join(entry.file_name()),
                source: entry.into_path(),
            })
        })
        .collect()
}
