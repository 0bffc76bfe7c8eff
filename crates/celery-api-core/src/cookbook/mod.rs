//! Chef cookbook metadata.
//!
//! Each cookbook directory under `cookbooks/` carries a `metadata.rb` and a
//! sibling `README.md`. This module loads and validates those records. It
//! does not resolve dependencies or provision anything; the declarations are
//! consumed by the configuration-management tool.

mod parser;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use parser::{Value, parse_declarations, read_sibling};

/// File name of the metadata manifest inside a cookbook directory.
pub const METADATA_FILE: &str = "metadata.rb";

/// README every cookbook must ship next to its metadata.
pub const README_FILE: &str = "README.md";

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+\.[0-9]+(\.[0-9]+)?$").expect("static regex"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+$").expect("static regex"));

/// A `supports` or `depends` entry with its optional version constraint.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Dependency {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<String>,
}

/// A loaded cookbook metadata record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CookbookMetadata {
    pub name: String,
    pub maintainer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maintainer_email: Option<String>,
    pub license: String,
    pub description: String,
    pub long_description: String,
    pub version: String,
    pub supports: BTreeSet<Dependency>,
    pub depends: BTreeSet<Dependency>,
}

/// Errors from loading or validating cookbook metadata.
#[derive(Debug, thiserror::Error)]
pub enum CookbookError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No metadata.rb found at {0}")]
    MissingMetadata(PathBuf),

    #[error("README not found: {0}")]
    MissingReadme(PathBuf),

    #[error("Line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("Line {line}: unknown declaration `{keyword}`")]
    UnknownDeclaration { line: usize, keyword: String },

    #[error("Line {line}: `{keyword}` declared more than once")]
    DuplicateDeclaration { line: usize, keyword: String },

    #[error("Missing required declaration `{0}`")]
    MissingField(&'static str),

    #[error("`{0}` cannot be empty")]
    EmptyField(&'static str),

    #[error("Invalid version {0:?}, expected MAJOR.MINOR.PATCH")]
    InvalidVersion(String),

    #[error("Invalid maintainer email {0:?}")]
    InvalidEmail(String),
}

#[derive(Default)]
struct Builder {
    name: Option<String>,
    maintainer: Option<String>,
    maintainer_email: Option<String>,
    license: Option<String>,
    description: Option<String>,
    long_description: Option<String>,
    version: Option<String>,
    supports: BTreeSet<Dependency>,
    depends: BTreeSet<Dependency>,
}

impl CookbookMetadata {
    /// Parse metadata source. Sibling-file references resolve against `base_dir`.
    ///
    /// `long_description` is left empty when not declared; [`Self::load`]
    /// fills it from the README.
    pub fn parse(source: &str, base_dir: &Path) -> Result<Self, CookbookError> {
        let mut b = Builder::default();

        for decl in parse_declarations(source)? {
            let line = decl.line;
            let keyword = decl.keyword;

            let values = match decl.value {
                Value::SiblingFile(file) if keyword == "long_description" => {
                    let text = read_sibling(base_dir, &file)?;
                    set_once(&mut b.long_description, text, line, &keyword)?;
                    continue;
                }
                Value::SiblingFile(_) => {
                    return Err(CookbookError::Syntax {
                        line,
                        message: format!("`{keyword}` expects a string literal"),
                    });
                }
                Value::Literals(values) => values,
            };

            let mut values = values.into_iter();
            let first = values.next().unwrap_or_default();
            let extra = values.next();
            if values.next().is_some() {
                return Err(CookbookError::Syntax {
                    line,
                    message: format!("`{keyword}` takes at most two arguments"),
                });
            }

            let slot = match keyword.as_str() {
                "supports" | "depends" => {
                    let set = if keyword == "supports" {
                        &mut b.supports
                    } else {
                        &mut b.depends
                    };
                    if set.iter().any(|d| d.name == first && d.constraint != extra) {
                        return Err(CookbookError::DuplicateDeclaration { line, keyword });
                    }
                    set.insert(Dependency {
                        name: first,
                        constraint: extra,
                    });
                    continue;
                }
                "name" => &mut b.name,
                "maintainer" => &mut b.maintainer,
                "maintainer_email" => &mut b.maintainer_email,
                "license" => &mut b.license,
                "description" => &mut b.description,
                "long_description" => &mut b.long_description,
                "version" => &mut b.version,
                _ => return Err(CookbookError::UnknownDeclaration { line, keyword }),
            };

            if extra.is_some() {
                return Err(CookbookError::Syntax {
                    line,
                    message: format!("`{keyword}` takes a single argument"),
                });
            }
            set_once(slot, first, line, &keyword)?;
        }

        Ok(Self {
            name: b.name.ok_or(CookbookError::MissingField("name"))?,
            maintainer: b.maintainer.ok_or(CookbookError::MissingField("maintainer"))?,
            maintainer_email: b.maintainer_email,
            license: b.license.ok_or(CookbookError::MissingField("license"))?,
            description: b
                .description
                .ok_or(CookbookError::MissingField("description"))?,
            long_description: b.long_description.unwrap_or_default(),
            version: b.version.ok_or(CookbookError::MissingField("version"))?,
            supports: b.supports,
            depends: b.depends,
        })
    }

    /// Load and validate a cookbook.
    ///
    /// `path` may be the cookbook directory or its `metadata.rb`. Loading
    /// fails when no `README.md` sits next to the metadata file.
    pub fn load(path: &Path) -> Result<Self, CookbookError> {
        let (dir, metadata_path) = if path.is_dir() {
            (path.to_path_buf(), path.join(METADATA_FILE))
        } else {
            let dir = path
                .parent()
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            (dir, path.to_path_buf())
        };

        if !metadata_path.is_file() {
            return Err(CookbookError::MissingMetadata(metadata_path));
        }
        let readme_path = dir.join(README_FILE);
        if !readme_path.is_file() {
            return Err(CookbookError::MissingReadme(readme_path));
        }

        debug!(path = %metadata_path.display(), "Loading cookbook metadata");
        let source = std::fs::read_to_string(&metadata_path).map_err(|source| CookbookError::Io {
            path: metadata_path.clone(),
            source,
        })?;

        let mut metadata = Self::parse(&source, &dir)?;
        if metadata.long_description.is_empty() {
            metadata.long_description = read_sibling(&dir, README_FILE)?;
        }
        metadata.validate()?;
        Ok(metadata)
    }

    /// Structural checks on a parsed record.
    pub fn validate(&self) -> Result<(), CookbookError> {
        for (field, value) in [
            ("name", &self.name),
            ("license", &self.license),
            ("description", &self.description),
            ("version", &self.version),
        ] {
            if value.trim().is_empty() {
                return Err(CookbookError::EmptyField(field));
            }
        }

        if !VERSION_RE.is_match(&self.version) {
            return Err(CookbookError::InvalidVersion(self.version.clone()));
        }

        if let Some(email) = &self.maintainer_email {
            if !EMAIL_RE.is_match(email) {
                return Err(CookbookError::InvalidEmail(email.clone()));
            }
        }

        Ok(())
    }

    /// Names of the platforms this cookbook supports.
    pub fn supported_platforms(&self) -> Vec<&str> {
        self.supports.iter().map(|d| d.name.as_str()).collect()
    }

    /// Names of the cookbooks this one depends on.
    pub fn dependency_names(&self) -> Vec<&str> {
        self.depends.iter().map(|d| d.name.as_str()).collect()
    }
}

/// Load every cookbook directly under `root`, ordered by directory name.
///
/// Directories without a `metadata.rb` are skipped.
pub fn discover_cookbooks(root: &Path) -> Result<Vec<CookbookMetadata>, CookbookError> {
    let entries = std::fs::read_dir(root).map_err(|source| CookbookError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.join(METADATA_FILE).is_file())
        .collect();
    dirs.sort();

    dirs.iter().map(|dir| CookbookMetadata::load(dir)).collect()
}

fn set_once(
    slot: &mut Option<String>,
    value: String,
    line: usize,
    keyword: &str,
) -> Result<(), CookbookError> {
    if slot.is_some() {
        return Err(CookbookError::DuplicateDeclaration {
            line,
            keyword: keyword.to_string(),
        });
    }
    *slot = Some(value);
    Ok(())
}
