//! Rendered compilation units and the files they are written to.

use std::path::{Path, PathBuf};

use crate::{CodeModel, FormatOptions, Formatter, ImportSet, LineEnding, Result, decl::ClassDecl};

/// One top-level class, formatted, with the imports it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilationUnit {
    /// Package of the class; empty for the root package.
    pub package: String,
    pub class_name: String,
    pub imports: ImportSet,
    /// The class declaration, without package and import lines.
    pub body: String,
    pub line_ending: LineEnding,
}

impl CompilationUnit {
    /// The complete source file.
    pub fn render(&self) -> String {
        let nl = self.line_ending.as_str();
        let mut out = String::new();
        if !self.package.is_empty() {
            out.push_str(&format!("package {};{nl}{nl}", self.package));
        }
        if !self.imports.is_empty() {
            for name in self.imports.iter() {
                out.push_str(&format!("import {name};{nl}"));
            }
            out.push_str(nl);
        }
        out.push_str(&self.body);
        out
    }

    /// Path of the source file below a source root, e.g.
    /// `com/acme/Registry.java`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        if !self.package.is_empty() {
            path.extend(self.package.split('.'));
        }
        path.push(format!("{}.java", self.class_name));
        path
    }
}

/// How to handle source files that already exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overwrite {
    /// Always overwrite (generated code)
    #[default]
    Always,
    /// Only create if the file doesn't exist (hand-edited stubs)
    IfMissing,
}

/// Every unit of a generation run.
#[derive(Debug, Clone, Default)]
pub struct SourceTree {
    units: Vec<CompilationUnit>,
    overwrite: Overwrite,
}

impl SourceTree {
    /// Format each top-level class with a fresh formatter.
    pub fn build<'a>(
        model: &CodeModel,
        classes: impl IntoIterator<Item = &'a ClassDecl>,
        options: &FormatOptions,
    ) -> Result<Self> {
        let mut units = Vec::new();
        for class in classes {
            let unit = Formatter::with_options(model, options.clone()).write(class)?;
            tracing::debug!(path = %unit.relative_path().display(), "formatted unit");
            units.push(unit);
        }
        Ok(Self {
            units,
            overwrite: Overwrite::default(),
        })
    }

    /// How [`SourceTree::write_to`] treats files that already exist.
    pub fn overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Units in the order the classes were given.
    pub fn units(&self) -> &[CompilationUnit] {
        &self.units
    }

    /// The unit of a top-level class, by fully-qualified name.
    pub fn get(&self, full_name: &str) -> Option<&CompilationUnit> {
        self.units.iter().find(|unit| {
            if unit.package.is_empty() {
                unit.class_name == full_name
            } else {
                full_name
                    .strip_prefix(unit.package.as_str())
                    .and_then(|rest| rest.strip_prefix('.'))
                    == Some(unit.class_name.as_str())
            }
        })
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Write every unit below `dir`, creating package directories.
    ///
    /// Returns the paths actually written; with [`Overwrite::IfMissing`],
    /// existing files are left alone and not reported.
    pub fn write_to(&self, dir: &Path) -> eyre::Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for unit in &self.units {
            let path = dir.join(unit.relative_path());
            if self.overwrite == Overwrite::IfMissing && path.exists() {
                tracing::debug!(path = %path.display(), "skipped existing file");
                continue;
            }
            write_file(&path, &unit.render())?;
            written.push(path);
        }
        tracing::debug!(count = written.len(), dir = %dir.display(), "wrote source tree");
        Ok(written)
    }
}

fn write_file(path: &Path, content: &str) -> eyre::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn unit(package: &str, imports: &[&str]) -> CompilationUnit {
        let mut set = ImportSet::new();
        for name in imports {
            set.add(*name);
        }
        CompilationUnit {
            package: package.to_string(),
            class_name: "Registry".to_string(),
            imports: set,
            body: "public class Registry {\n}\n".to_string(),
            line_ending: LineEnding::Lf,
        }
    }

    #[test]
    fn test_render() {
        assert_eq!(
            unit("com.acme", &["java.util.List", "java.util.Date"]).render(),
            "package com.acme;\n\nimport java.util.Date;\nimport java.util.List;\n\npublic class Registry {\n}\n"
        );
        assert_eq!(unit("", &[]).render(), "public class Registry {\n}\n");
    }

    #[test]
    fn test_render_crlf() {
        let mut unit = unit("a", &["b.C"]);
        unit.line_ending = LineEnding::CrLf;
        unit.body = "class Registry {\r\n}\r\n".to_string();
        assert_eq!(
            unit.render(),
            "package a;\r\n\r\nimport b.C;\r\n\r\nclass Registry {\r\n}\r\n"
        );
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            unit("com.acme.api", &[]).relative_path(),
            Path::new("com").join("acme").join("api").join("Registry.java")
        );
        assert_eq!(unit("", &[]).relative_path(), PathBuf::from("Registry.java"));
    }

    #[test]
    fn test_write_creates_package_dirs() {
        let temp = TempDir::new().unwrap();
        let tree = SourceTree {
            units: vec![unit("com.acme", &[])],
            overwrite: Overwrite::Always,
        };

        let written = tree.write_to(temp.path()).unwrap();
        let path = temp.path().join("com/acme/Registry.java");
        assert_eq!(written, vec![path.clone()]);
        assert!(fs::read_to_string(&path).unwrap().starts_with("package com.acme;"));
    }

    #[test]
    fn test_write_if_missing_skips_existing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Registry.java");
        fs::write(&path, "// edited").unwrap();

        let tree = SourceTree {
            units: vec![unit("", &[])],
            overwrite: Overwrite::Always,
        }
        .overwrite(Overwrite::IfMissing);

        assert!(tree.write_to(temp.path()).unwrap().is_empty());
        assert_eq!(fs::read_to_string(&path).unwrap(), "// edited");
    }

    #[test]
    fn test_get_by_full_name() {
        let tree = SourceTree {
            units: vec![unit("com.acme", &[]), unit("", &[])],
            overwrite: Overwrite::Always,
        };
        assert_eq!(tree.get("com.acme.Registry").unwrap().package, "com.acme");
        assert_eq!(tree.get("Registry").unwrap().package, "");
        assert!(tree.get("com.Registry").is_none());
        assert_eq!(tree.len(), 2);
    }
}
