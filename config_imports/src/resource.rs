//! Resource identifier helpers used while resolving `imports` declarations.

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};

/// Return the directory portion of `resource`.
///
/// A resource without a directory component yields an empty path so that
/// joining a sibling onto it keeps the identifier relative, exactly as it was
/// declared.
pub(crate) fn directory_of(resource: &Utf8Path) -> &Utf8Path {
    resource.parent().unwrap_or_else(|| Utf8Path::new(""))
}

/// Resolve a declared import against the resource that declared it.
///
/// Absolute (or rooted) identifiers are used verbatim. Relative identifiers are
/// joined onto the directory of `importer`, so nested imports resolve against
/// their immediate parent rather than the root document.
///
/// # Examples
///
/// ```rust,ignore
/// use camino::Utf8Path;
///
/// let resolved = resolve_import_path(Utf8Path::new("config/app.yml"), "db.yml");
/// assert_eq!(resolved, "config/db.yml");
///
/// let resolved = resolve_import_path(Utf8Path::new("config/app.yml"), "/etc/app.yml");
/// assert_eq!(resolved, "/etc/app.yml");
/// ```
pub(crate) fn resolve_import_path(importer: &Utf8Path, declared: &str) -> Utf8PathBuf {
    let declared = Utf8Path::new(declared);
    if declared.is_absolute() || declared.has_root() {
        declared.to_path_buf()
    } else {
        directory_of(importer).join(declared)
    }
}

/// Normalise a resource identifier for cycle detection.
///
/// The transformation is purely lexical: `.` components are dropped and `..`
/// consumes the preceding normal component. Resources are never touched on
/// disk. On platforms whose filesystems ignore ASCII case the
/// key is also lower-cased so differently cased spellings do not bypass
/// detection.
pub(crate) fn normalise_resource(resource: &Utf8Path) -> Utf8PathBuf {
    let mut kept: Vec<Utf8Component<'_>> = Vec::new();
    for component in resource.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match kept.last() {
                Some(Utf8Component::Normal(_)) => {
                    kept.pop();
                }
                Some(Utf8Component::RootDir | Utf8Component::Prefix(_)) => {}
                _ => kept.push(component),
            },
            other => kept.push(other),
        }
    }
    let normalised: Utf8PathBuf = kept.iter().map(Utf8Component::as_str).collect();

    #[cfg(any(windows, target_os = "macos"))]
    {
        Utf8PathBuf::from(normalised.as_str().to_ascii_lowercase())
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    {
        normalised
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for import path resolution and normalisation.

    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::sibling("config1.yml", "config2.yml", "config2.yml")]
    #[case::nested_dir("config/config1.yml", "config2.yml", "config/config2.yml")]
    #[case::subdir("config/config2.yml", "subdir/config4.yml", "config/subdir/config4.yml")]
    #[case::absolute("config/config1.yml", "/abs/path/config3.yml", "/abs/path/config3.yml")]
    #[case::parent_relative("config/sub/app.yml", "../base.yml", "config/sub/../base.yml")]
    fn resolve_import_path_cases(
        #[case] importer: &str,
        #[case] declared: &str,
        #[case] expected: &str,
    ) {
        let resolved = resolve_import_path(Utf8Path::new(importer), declared);
        assert_eq!(resolved, Utf8PathBuf::from(expected));
    }

    #[rstest]
    #[case("app.yml", "")]
    #[case("config/app.yml", "config")]
    #[case("/etc/app/app.yml", "/etc/app")]
    fn directory_of_cases(#[case] resource: &str, #[case] expected: &str) {
        assert_eq!(directory_of(Utf8Path::new(resource)), Utf8Path::new(expected));
    }

    #[rstest]
    #[case("config/./app.yml", "config/app.yml")]
    #[case("config/sub/../app.yml", "config/app.yml")]
    #[case("../shared/app.yml", "../shared/app.yml")]
    #[case("/../app.yml", "/app.yml")]
    #[case("a/b/../../c.yml", "c.yml")]
    fn normalise_resource_collapses_dot_segments(#[case] input: &str, #[case] expected: &str) {
        let normalised = normalise_resource(Utf8Path::new(input));
        assert_eq!(
            normalised.as_str().to_ascii_lowercase(),
            expected.to_ascii_lowercase()
        );
    }
}
