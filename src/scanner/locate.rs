//! Executable search path lookup.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Default scanner binary name.
pub const DEFAULT_BINARY: &str = "trivy";

/// Resolve `binary` against the current `PATH`.
pub fn locate(binary: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH");
    locate_in(binary, path_var.as_deref())
}

/// Resolve `binary` against an explicit search path.
///
/// A name with a directory component is checked as-is instead of searched.
pub fn locate_in(binary: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    let direct = Path::new(binary);
    if direct.components().count() > 1 {
        return with_suffixes(direct).find(|candidate| is_executable(candidate));
    }

    let path_var = path_var?;
    std::env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| with_suffixes(&dir.join(binary)).collect::<Vec<_>>())
        .find(|candidate| is_executable(candidate))
}

/// The path itself, plus the platform executable suffix when one exists.
fn with_suffixes(path: &Path) -> impl Iterator<Item = PathBuf> {
    let suffix = std::env::consts::EXE_SUFFIX;
    let mut candidates = vec![path.to_path_buf()];
    if !suffix.is_empty() && path.extension().is_none() {
        let mut name = path.as_os_str().to_os_string();
        name.push(suffix);
        candidates.push(PathBuf::from(name));
    }
    candidates.into_iter()
}

fn is_executable(path: &Path) -> bool {
    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        metadata.permissions().mode() & 0o111 != 0
    }
    #[cfg(not(unix))]
    {
        true
    }
}
