//! Incremental mirroring of a source image tree into a thumbnail tree

use crate::error::ConfigurationError;
use crate::thumbnail::ThumbnailSettings;
use crate::thumbnail::is_qualifying_name;
use crate::thumbnail::render_thumbnail;
use crate::thumbnail::save_thumbnail;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::warn;
use walkdir::WalkDir;

/// Options for a single sync run
#[derive(Clone, Debug)]
pub struct SyncOptions {
    pub settings: ThumbnailSettings,
    /// Report what would happen without rendering or writing anything
    pub dry_run: bool,
}

impl SyncOptions {
    #[must_use]
    pub fn new(settings: ThumbnailSettings) -> Self {
        Self {
            settings,
            dry_run: false,
        }
    }
}

/// Outcome of a sync run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Destination directories created (or that would be, on a dry run)
    pub directories_created: usize,
    /// Destination paths of thumbnails written (or that would be, on a dry run)
    pub generated: Vec<PathBuf>,
    /// Qualifying files whose thumbnail was already current
    pub up_to_date: usize,
    /// Qualifying files that could not be decoded
    pub unreadable: usize,
    /// Other per-file failures (timestamps, directory creation, saving)
    pub failed: usize,
    /// Files skipped for not having the image extension
    pub ignored: usize,
}

impl SyncReport {
    #[must_use]
    pub fn generated_count(&self) -> usize {
        self.generated.len()
    }
}

/// Decide whether `dest_file` has to be (re)generated from `source_file`.
///
/// True when the destination is missing, or when the source was modified
/// strictly later than the destination.
///
/// # Errors
///
/// Returns an error if either modification time cannot be read.
pub fn should_regenerate(source_file: &Path, dest_file: &Path) -> io::Result<bool> {
    let dest_modified = match fs::metadata(dest_file) {
        Ok(meta) => meta.modified()?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(true),
        Err(e) => return Err(e),
    };
    let source_modified = fs::metadata(source_file)?.modified()?;

    let stale = source_modified > dest_modified;
    debug!(
        source = %source_file.display(),
        source_modified = %format_time(source_modified),
        dest_modified = %format_time(dest_modified),
        stale,
        "Compared modification times"
    );
    Ok(stale)
}

fn format_time(time: SystemTime) -> humantime::Rfc3339Timestamp {
    humantime::format_rfc3339_millis(time)
}

/// Canonical forms of the two roots of a run
#[derive(Debug)]
struct CanonicalRoots {
    source: PathBuf,
    dest: PathBuf,
}

impl CanonicalRoots {
    /// Whether writing `relative` under the destination would land inside the source tree
    fn maps_into_source(&self, relative: &Path) -> bool {
        self.dest.join(relative).starts_with(&self.source)
    }
}

/// Check that the roots can be used together, returning both canonicalized.
fn validate_roots(source_root: &Path, dest_root: &Path) -> Result<CanonicalRoots, ConfigurationError> {
    if !dest_root.is_dir() {
        return Err(ConfigurationError::MissingDestination(dest_root.to_path_buf()));
    }
    if !source_root.is_dir() {
        return Err(ConfigurationError::MissingSource(source_root.to_path_buf()));
    }

    let canonicalize = |path: &Path| {
        dunce::canonicalize(path).map_err(|source| ConfigurationError::Unresolvable {
            path: path.to_path_buf(),
            source,
        })
    };
    let source_canonical = canonicalize(source_root)?;
    let dest_canonical = canonicalize(dest_root)?;
    if source_canonical == dest_canonical {
        return Err(ConfigurationError::SameDirectory(dest_canonical));
    }
    Ok(CanonicalRoots {
        source: source_canonical,
        dest: dest_canonical,
    })
}

/// Mirror every qualifying image under `source_root` as a thumbnail under `dest_root`.
///
/// Thumbnails that are newer than their source are left alone. Destination
/// directories are only created once a thumbnail needs to be written inside
/// them. Per-file failures are logged and counted; they never stop the walk.
///
/// # Errors
///
/// Returns a [`ConfigurationError`] before doing any work if `dest_root` is
/// missing, `source_root` is missing, or both resolve to the same directory.
pub fn sync_tree(
    source_root: &Path,
    dest_root: &Path,
    options: &SyncOptions,
) -> Result<SyncReport, ConfigurationError> {
    let roots = validate_roots(source_root, dest_root)?;
    let mut report = SyncReport::default();
    let mut planned_dirs = BTreeSet::new();

    info!(
        source = %source_root.display(),
        dest = %dest_root.display(),
        target = %options.settings.target,
        filter = %options.settings.filter,
        dry_run = options.dry_run,
        "Syncing thumbnails"
    );

    let walker = WalkDir::new(source_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        // never descend into the destination when it lives inside the source
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && dunce::canonicalize(entry.path()).is_ok_and(|p| p == roots.dest))
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Failed to read entry under {}: {}", source_root.display(), e);
                continue;
            }
        };
        // symlinked files count, symlinked directories are not descended into
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }
        if !is_qualifying_name(&entry.file_name().to_string_lossy()) {
            report.ignored += 1;
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(source_root) else {
            warn!("{} is not under {}", entry.path().display(), source_root.display());
            report.failed += 1;
            continue;
        };
        // a source nested in the destination can map onto its own images
        if roots.maps_into_source(relative) {
            error!(
                "Refusing to overwrite {}: its thumbnail path lies inside the source tree",
                dest_root.join(relative).display()
            );
            report.failed += 1;
            continue;
        }
        let dest_file = dest_root.join(relative);
        sync_file(
            entry.path(),
            &dest_file,
            options,
            &mut report,
            &mut planned_dirs,
        );
    }

    info!(
        generated = report.generated_count(),
        up_to_date = report.up_to_date,
        unreadable = report.unreadable,
        failed = report.failed,
        ignored = report.ignored,
        directories_created = report.directories_created,
        "Sync finished"
    );
    Ok(report)
}

fn sync_file(
    source_file: &Path,
    dest_file: &Path,
    options: &SyncOptions,
    report: &mut SyncReport,
    planned_dirs: &mut BTreeSet<PathBuf>,
) {
    match should_regenerate(source_file, dest_file) {
        Ok(true) => {}
        Ok(false) => {
            debug!(path = %dest_file.display(), "Thumbnail is up to date");
            report.up_to_date += 1;
            return;
        }
        Err(e) => {
            error!("Failed to compare timestamps for {}: {}", source_file.display(), e);
            report.failed += 1;
            return;
        }
    }

    if options.dry_run {
        if let Some(dir) = dest_file.parent()
            && !dir.exists()
            && planned_dirs.insert(dir.to_path_buf())
        {
            println!("Would create {}", dir.display());
            report.directories_created += 1;
        }
        println!("Would generate {}", dest_file.display());
        report.generated.push(dest_file.to_path_buf());
        return;
    }

    let thumbnail = match render_thumbnail(source_file, &options.settings) {
        Ok(thumbnail) => thumbnail,
        Err(e) => {
            error!("{e}");
            report.unreadable += 1;
            return;
        }
    };

    if let Some(dir) = dest_file.parent() {
        match ensure_dir(dir) {
            Ok(true) => report.directories_created += 1,
            Ok(false) => {}
            Err(e) => {
                error!("Failed to create directory {}: {}", dir.display(), e);
                report.failed += 1;
                return;
            }
        }
    }

    match save_thumbnail(&thumbnail, dest_file, &options.settings) {
        Ok(()) => {
            debug!(path = %dest_file.display(), "Wrote thumbnail");
            report.generated.push(dest_file.to_path_buf());
        }
        Err(e) => {
            error!("Failed to save {}: {}", dest_file.display(), e);
            report.failed += 1;
        }
    }
}

/// Create `dir` (and parents) if missing, announcing it. Returns whether it was created.
fn ensure_dir(dir: &Path) -> io::Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    println!("Creating {}", dir.display());
    fs::create_dir_all(dir)?;
    Ok(true)
}
