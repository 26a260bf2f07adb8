use super::DomainError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A normalized path relative to the workspace root.
///
/// Invariant: never absolute, never climbs above the root, contains no `.`
/// or `..` segments. Enforced at construction. The empty path is the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(Vec<String>);

impl RelativePath {
    /// The workspace root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Fallible constructor. Accepts `/` or the platform separator.
    pub fn try_new(path: impl AsRef<Path>) -> Result<Self, DomainError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if path.has_root() || display.starts_with('/') {
            return Err(DomainError::AbsolutePathNotAllowed { path: display });
        }

        let mut segments: Vec<String> = Vec::new();
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if segments.pop().is_none() {
                        return Err(DomainError::PathEscapesRoot { path: display });
                    }
                }
                Component::Normal(part) => {
                    // Windows-style input on unix still arrives as one component.
                    for piece in part.to_string_lossy().split(['/', '\\']) {
                        if !piece.is_empty() {
                            segments.push(piece.to_string());
                        }
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(DomainError::AbsolutePathNotAllowed { path: display });
                }
            }
        }

        Ok(Self(segments))
    }

    /// Join a relative segment, maintaining the invariant.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        let segment = segment.as_ref();
        if segment.has_root() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: segment.display().to_string(),
            });
        }
        Self::try_new(self.as_path_buf().join(segment))
    }

    pub fn parent(&self) -> Option<Self> {
        if self.0.is_empty() {
            None
        } else {
            Some(Self(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    pub fn file_name(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_path_buf(&self) -> PathBuf {
        self.0.iter().collect()
    }

    /// ES module specifier that imports `target` from a file in `from_dir`.
    ///
    /// The `.ts` extension is dropped and the result always starts with
    /// `./` or `../`.
    pub fn import_specifier(from_dir: &RelativePath, target: &RelativePath) -> String {
        let common = from_dir
            .0
            .iter()
            .zip(target.0.iter())
            .take_while(|(a, b)| a == b)
            .count();

        let ups = from_dir.0.len() - common;
        let mut parts: Vec<String> = Vec::new();
        if ups == 0 {
            parts.push(".".into());
        } else {
            parts.extend(std::iter::repeat_n("..".to_string(), ups));
        }

        let rest = &target.0[common..];
        for (i, segment) in rest.iter().enumerate() {
            if i + 1 == rest.len() {
                parts.push(
                    segment
                        .strip_suffix(".ts")
                        .unwrap_or(segment.as_str())
                        .to_string(),
                );
            } else {
                parts.push(segment.clone());
            }
        }

        parts.join("/")
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl Serialize for RelativePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> RelativePath {
        RelativePath::try_new(s).unwrap()
    }

    #[test]
    fn normalizes_dots_and_trailing_slashes() {
        assert_eq!(p("./src/app/").to_string(), "src/app");
        assert_eq!(p("src/lib/../app").to_string(), "src/app");
    }

    #[test]
    fn rejects_absolute() {
        assert!(matches!(
            RelativePath::try_new("/etc/passwd"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
    }

    #[test]
    fn rejects_escaping_root() {
        assert!(matches!(
            RelativePath::try_new("../outside"),
            Err(DomainError::PathEscapesRoot { .. })
        ));
    }

    #[test]
    fn join_and_parent() {
        let dir = p("src/app");
        let file = dir.join("foo/foo.component.ts").unwrap();
        assert_eq!(file.to_string(), "src/app/foo/foo.component.ts");
        assert_eq!(file.parent().unwrap().to_string(), "src/app/foo");
        assert_eq!(file.file_name(), Some("foo.component.ts"));
        assert!(RelativePath::root().parent().is_none());
    }

    #[test]
    fn import_specifier_into_child_folder() {
        let spec = RelativePath::import_specifier(
            &p("projects/material/src/app"),
            &p("projects/material/src/app/foo/foo.component.ts"),
        );
        assert_eq!(spec, "./foo/foo.component");
    }

    #[test]
    fn import_specifier_from_sibling_folder() {
        let spec = RelativePath::import_specifier(
            &p("src/app/shared"),
            &p("src/app/grids/orders.component.ts"),
        );
        assert_eq!(spec, "../grids/orders.component");
    }

    #[test]
    fn import_specifier_same_folder() {
        let spec = RelativePath::import_specifier(&p("src/app"), &p("src/app/foo.component.ts"));
        assert_eq!(spec, "./foo.component");
    }
}
