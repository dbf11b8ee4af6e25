//! Import decisions.

use std::collections::BTreeSet;

use crate::{CodeModel, Result, TypeId};

/// Every class and identifier collected under one simple name.
#[derive(Debug, Clone, Default)]
pub(crate) struct ReferenceList {
    classes: Vec<TypeId>,
    /// Whether the name is also used as an identifier.
    id: bool,
}

impl ReferenceList {
    pub fn add(&mut self, class: TypeId) {
        if !self.classes.contains(&class) {
            self.classes.push(class);
        }
    }

    pub fn classes(&self) -> &[TypeId] {
        &self.classes
    }

    pub fn set_id(&mut self, id: bool) {
        self.id = id;
    }

    /// True when the name is strictly an identifier, with no class behind it.
    pub fn is_id(&self) -> bool {
        self.id && self.classes.is_empty()
    }

    /// Whether the simple name cannot safely stand for its class.
    ///
    /// `unit_names` are the simple names of the classes defined in the
    /// package of the unit being written: a class of an implicitly visible
    /// package would be shadowed by any of them.
    pub fn collides(
        &self,
        model: &CodeModel,
        implicit_packages: &[String],
        unit_names: &[String],
    ) -> Result<bool> {
        if self.classes.len() > 1 {
            return Ok(true);
        }
        if self.id && !self.classes.is_empty() {
            return Ok(true);
        }
        for &class in &self.classes {
            let package = model.package(class)?.unwrap_or_default();
            if implicit_packages.contains(&package) && unit_names.contains(&model.name(class)?) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// The `import` lines of one compilation unit, sorted by full name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSet {
    names: BTreeSet<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fully-qualified class name.
    pub fn add(&mut self, full_name: impl Into<String>) {
        self.names.insert(full_name.into());
    }

    pub fn contains(&self, full_name: &str) -> bool {
        self.names.contains(full_name)
    }

    /// Iterate over the imported names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

/// Whether `class` needs no `import` line in a unit of `unit_package`.
///
/// Types of the root package and of implicitly visible packages never do;
/// neither do top-level classes of the unit's own package. Nested classes
/// of the unit's package still need one.
pub(crate) fn is_implicit(
    model: &CodeModel,
    class: TypeId,
    unit_package: &str,
    implicit_packages: &[String],
) -> Result<bool> {
    let class = model.erasure(class)?;
    let package = model.package(class)?.unwrap_or_default();
    if package.is_empty() || implicit_packages.contains(&package) {
        return Ok(true);
    }
    Ok(package == unit_package && model.outer(class)?.is_none())
}
