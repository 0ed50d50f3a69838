//! Safe saving of edited fonts.
//!
//! The font is serialized into a temporary file next to its destination and
//! then renamed over it, so the destination either holds the complete new
//! font or is left untouched. A backup of the pre-edit file can be taken
//! right before the rename.

use std::{
    ffi::OsString,
    fmt,
    fs::{copy, metadata, set_permissions},
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use fontnemo_font_ops::FontHandle;
use log::{debug, info};
use tempfile::Builder;

use crate::{
    Error, Result,
    config::{TEMP_FILE_PREFIX, TIMESTAMP_SEPARATOR},
    slug::make_timestamp,
};

/// Where an edited font is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Overwrite the source file.
    #[default]
    Replace,
    /// Copy the source file to `{stem}--{timestamp}{ext}`, then overwrite it.
    ReplaceWithBackup,
    /// Write to `{stem}--{timestamp}{ext}` next to the source.
    TimestampedCopy,
    /// Write to the given path.
    ExplicitPath(PathBuf),
}

impl OutputMode {
    /// Resolve the destination for a font loaded from `source`.
    ///
    /// Generates a fresh timestamp token for [`OutputMode::TimestampedCopy`].
    pub fn final_path(&self, source: &Path) -> PathBuf {
        match self {
            OutputMode::Replace | OutputMode::ReplaceWithBackup => source.to_owned(),
            OutputMode::TimestampedCopy => timestamped_path(source, &make_timestamp()),
            OutputMode::ExplicitPath(path) => path.clone(),
        }
    }

    fn backs_up(&self) -> bool {
        matches!(self, OutputMode::ReplaceWithBackup)
    }
}

impl FromStr for OutputMode {
    type Err = Error;

    /// Parse `"0"`, `"1"`, `"2"`, or any other non-empty string as a path.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Err(Error::InvalidOutputMode(s.to_owned())),
            "0" => Ok(OutputMode::Replace),
            "1" => Ok(OutputMode::ReplaceWithBackup),
            "2" => Ok(OutputMode::TimestampedCopy),
            path => Ok(OutputMode::ExplicitPath(PathBuf::from(path))),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputMode::Replace => f.write_str("0"),
            OutputMode::ReplaceWithBackup => f.write_str("1"),
            OutputMode::TimestampedCopy => f.write_str("2"),
            OutputMode::ExplicitPath(path) => write!(f, "{}", path.display()),
        }
    }
}

/// `{stem}--{token}{ext}` in the same directory as `path`.
pub fn timestamped_path(path: &Path, token: &str) -> PathBuf {
    let mut name = path.file_stem().map(|s| s.to_os_string()).unwrap_or_default();
    name.push(TIMESTAMP_SEPARATOR);
    name.push(token);
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}

/// Save `font`, loaded from `source`, according to `mode`.
///
/// Returns the path that now holds the edited font. On error the
/// destination is unchanged and no temporary file is left behind.
pub fn persist(font: &FontHandle, source: &Path, mode: &OutputMode) -> Result<PathBuf> {
    let final_path = mode.final_path(source);
    let backup = mode.backs_up();
    debug!("Save mode: {mode}, final path: {}, backup: {backup}", final_path.display());

    let persist_error = |source: Box<dyn std::error::Error + Send + Sync>| Error::Persist {
        path: final_path.clone(),
        source,
    };

    let data = font.to_bytes().map_err(|e| persist_error(e.into()))?;

    atomic_write_with_hook(&final_path, &data, |tmp| {
        debug!("Wrote {} bytes to {}", data.len(), tmp.display());
        if backup && source.exists() {
            let backup_path = timestamped_path(source, &make_timestamp());
            info!("Creating backup: {}", backup_path.display());
            copy(source, &backup_path)?;
        }
        Ok(())
    })
    .map_err(|e| persist_error(e.into()))?;

    info!("Saved font: {}", final_path.display());
    Ok(final_path)
}

/// Write `contents` to a temporary file beside `path`, run the hook, then
/// rename the temporary file onto `path`.
///
/// The temporary file is removed if any step fails.
fn atomic_write_with_hook<F>(path: &Path, contents: &[u8], pre_rename_hook: F) -> io::Result<()>
where
    F: FnOnce(&Path) -> io::Result<()>,
{
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let suffix = path
        .extension()
        .map(|ext| {
            let mut suffix = OsString::from(".");
            suffix.push(ext);
            suffix
        })
        .unwrap_or_default();

    let mut temp = Builder::new().prefix(TEMP_FILE_PREFIX).suffix(&suffix).tempfile_in(dir)?;
    temp.write_all(contents)?;
    temp.flush()?;
    temp.as_file_mut().sync_all()?;

    // Keep the mode of the file being replaced instead of the temp file's 0600.
    if let Ok(existing) = metadata(path)
        && existing.is_file()
    {
        set_permissions(temp.path(), existing.permissions())?;
    }

    let temp_path = temp.into_temp_path();
    pre_rename_hook(temp_path.as_ref())?;
    temp_path.persist(path).map_err(|e| e.error)
}

#[cfg(test)]
mod tests {
    use std::fs::{create_dir, read, read_dir, write};

    use super::*;
    use crate::{
        naming::{read_family_name, write_family_name},
        slug::to_base36,
        test_fonts::static_font,
    };

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn no_temp_files(dir: &Path) -> bool {
        dir_entries(dir).iter().all(|n| !n.starts_with(TEMP_FILE_PREFIX))
    }

    fn edited_font(path: &Path, family: &str) -> FontHandle {
        let mut font = FontHandle::open(path).unwrap();
        write_family_name(&mut font, family).unwrap();
        font
    }

    #[test]
    fn test_parse_output_mode() {
        assert_eq!("0".parse::<OutputMode>().unwrap(), OutputMode::Replace);
        assert_eq!("1".parse::<OutputMode>().unwrap(), OutputMode::ReplaceWithBackup);
        assert_eq!("2".parse::<OutputMode>().unwrap(), OutputMode::TimestampedCopy);
        assert_eq!(
            "out/font.ttf".parse::<OutputMode>().unwrap(),
            OutputMode::ExplicitPath(PathBuf::from("out/font.ttf"))
        );
        assert_eq!("3".parse::<OutputMode>().unwrap(), OutputMode::ExplicitPath("3".into()));
        assert!(matches!("".parse::<OutputMode>(), Err(Error::InvalidOutputMode(_))));
        assert_eq!(OutputMode::default(), OutputMode::Replace);
    }

    #[test]
    fn test_output_mode_display() {
        assert_eq!(OutputMode::ReplaceWithBackup.to_string(), "1");
        assert_eq!(OutputMode::ExplicitPath("a/b.otf".into()).to_string(), "a/b.otf");
    }

    #[test]
    fn test_timestamped_path() {
        assert_eq!(
            timestamped_path(Path::new("/fonts/Test.ttf"), "abc123"),
            PathBuf::from("/fonts/Test--abc123.ttf")
        );
        assert_eq!(timestamped_path(Path::new("Test"), "x"), PathBuf::from("Test--x"));
        assert_eq!(
            timestamped_path(Path::new("a.b.otf"), "t"),
            PathBuf::from("a.b--t.otf")
        );
    }

    #[test]
    fn test_replace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.ttf");
        write(&path, static_font()).unwrap();

        let font = edited_font(&path, "Replaced");
        let final_path = persist(&font, &path, &OutputMode::Replace).unwrap();

        assert_eq!(final_path, path);
        assert_eq!(read_family_name(&FontHandle::open(&path).unwrap()).unwrap(), "Replaced");
        assert_eq!(dir_entries(dir.path()), vec!["font.ttf"]);
    }

    #[test]
    fn test_replace_with_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.ttf");
        let original = static_font();
        write(&path, &original).unwrap();

        let font = edited_font(&path, "Backed Up");
        let final_path = persist(&font, &path, &OutputMode::ReplaceWithBackup).unwrap();
        assert_eq!(final_path, path);

        let backups: Vec<String> = dir_entries(dir.path())
            .into_iter()
            .filter(|n| n.starts_with("font--") && n.ends_with(".ttf"))
            .collect();
        assert_eq!(backups.len(), 1);
        assert_eq!(read(dir.path().join(&backups[0])).unwrap(), original);
        assert_eq!(read_family_name(&FontHandle::open(&path).unwrap()).unwrap(), "Backed Up");
        assert!(no_temp_files(dir.path()));
    }

    #[test]
    fn test_timestamped_copy_leaves_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.otf");
        let original = static_font();
        write(&path, &original).unwrap();

        let font = edited_font(&path, "Copy");
        let final_path = persist(&font, &path, &OutputMode::TimestampedCopy).unwrap();

        assert_ne!(final_path, path);
        assert_eq!(final_path.parent(), Some(dir.path()));
        let name = final_path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("font--") && name.ends_with(".otf"), "{name}");
        assert_eq!(read(&path).unwrap(), original);
        assert_eq!(read_family_name(&FontHandle::open(&final_path).unwrap()).unwrap(), "Copy");
        assert!(no_temp_files(dir.path()));
    }

    #[test]
    fn test_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.ttf");
        let out_dir = dir.path().join("out");
        create_dir(&out_dir).unwrap();
        let out = out_dir.join("renamed.ttf");
        let original = static_font();
        write(&path, &original).unwrap();

        let font = edited_font(&path, "Explicit");
        let final_path = persist(&font, &path, &OutputMode::ExplicitPath(out.clone())).unwrap();

        assert_eq!(final_path, out);
        assert_eq!(read(&path).unwrap(), original);
        assert_eq!(read_family_name(&FontHandle::open(&out).unwrap()).unwrap(), "Explicit");
        assert_eq!(dir_entries(&out_dir), vec!["renamed.ttf"]);
    }

    #[test]
    fn test_explicit_path_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.ttf");
        let out = dir.path().join("existing.ttf");
        write(&path, static_font()).unwrap();
        write(&out, b"old contents").unwrap();

        let font = edited_font(&path, "Overwritten");
        persist(&font, &path, &OutputMode::ExplicitPath(out.clone())).unwrap();
        assert_eq!(read_family_name(&FontHandle::open(&out).unwrap()).unwrap(), "Overwritten");
    }

    #[test]
    fn test_failed_rename_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.ttf");
        write(&path, static_font()).unwrap();
        let blocked = dir.path().join("blocked.ttf");
        create_dir(&blocked).unwrap();
        write(blocked.join("keep"), b"keep").unwrap();

        let font = edited_font(&path, "Never Written");
        let err = persist(&font, &path, &OutputMode::ExplicitPath(blocked.clone())).unwrap_err();

        assert!(matches!(err, Error::Persist { ref path, .. } if path == &blocked));
        assert!(blocked.is_dir());
        assert_eq!(read(blocked.join("keep")).unwrap(), b"keep");
        assert!(no_temp_files(dir.path()));
    }

    #[test]
    fn test_failed_backup_cleans_up() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.ttf");
        let original = static_font();
        write(&path, &original).unwrap();

        // occupy every backup name the next few seconds can produce
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap();
        for secs in now..now + 10 {
            create_dir(timestamped_path(&path, &to_base36(secs))).unwrap();
        }

        let font = edited_font(&path, "Never Backed Up");
        let err = persist(&font, &path, &OutputMode::ReplaceWithBackup).unwrap_err();

        assert!(matches!(err, Error::Persist { path: ref failed, .. } if failed == &path));
        assert_eq!(read(&path).unwrap(), original);
        assert!(no_temp_files(dir.path()));
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("font.ttf");
        write(&path, static_font()).unwrap();
        let out = dir.path().join("missing").join("font.ttf");

        let font = edited_font(&path, "Nowhere");
        let err = persist(&font, &path, &OutputMode::ExplicitPath(out.clone())).unwrap_err();
        assert!(matches!(err, Error::Persist { .. }));
        assert!(!out.exists());
    }
}
