//! Per-model type storage with structural interning.

use std::collections::HashMap;

use indexmap::IndexMap;
use typeloom_catalog::names;

use crate::{
    ModelId,
    types::{TypeData, TypeId, WildcardMode},
};

#[derive(Debug, Default)]
pub(crate) struct Arena {
    types: Vec<TypeData>,
    /// Resolved names (class and array binary names) to their type.
    pub referenced: HashMap<String, TypeId>,
    /// Classes defined in the model, by binary name.
    pub defined: HashMap<String, TypeId>,
    directs: HashMap<String, TypeId>,
    narrowed: HashMap<(TypeId, Vec<TypeId>), TypeId>,
    arrays: HashMap<TypeId, TypeId>,
    wildcards: HashMap<(TypeId, WildcardMode), TypeId>,
    /// Top-level defined classes per package, in definition order.
    pub packages: IndexMap<String, Vec<TypeId>>,
}

impl Arena {
    pub fn push(&mut self, owner: ModelId, data: TypeData) -> TypeId {
        let id = TypeId::new(owner, self.types.len() as u32);
        self.types.push(data);
        id
    }

    pub fn get(&self, ty: TypeId) -> &TypeData {
        &self.types[ty.index()]
    }

    pub fn get_mut(&mut self, ty: TypeId) -> &mut TypeData {
        &mut self.types[ty.index()]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether a class of this binary name already has a type in the model,
    /// whether resolved, direct or defined.
    pub fn has_class(&self, binary_name: &str) -> bool {
        self.referenced.contains_key(binary_name)
            || self.defined.contains_key(binary_name)
            || self.directs.contains_key(&names::qualified_name(binary_name))
    }

    pub fn intern_direct(&mut self, owner: ModelId, full_name: &str) -> TypeId {
        if let Some(&id) = self.directs.get(full_name) {
            return id;
        }
        let id = self.push(
            owner,
            TypeData::Direct {
                full_name: full_name.to_string(),
            },
        );
        self.directs.insert(full_name.to_string(), id);
        id
    }

    pub fn intern_narrowed(&mut self, owner: ModelId, basis: TypeId, args: Vec<TypeId>) -> TypeId {
        let key = (basis, args);
        if let Some(&id) = self.narrowed.get(&key) {
            return id;
        }
        let id = self.push(
            owner,
            TypeData::Narrowed {
                basis,
                args: key.1.clone(),
            },
        );
        self.narrowed.insert(key, id);
        id
    }

    pub fn intern_array(&mut self, owner: ModelId, component: TypeId) -> TypeId {
        if let Some(&id) = self.arrays.get(&component) {
            return id;
        }
        let id = self.push(owner, TypeData::Array { component });
        self.arrays.insert(component, id);
        id
    }

    pub fn intern_wildcard(&mut self, owner: ModelId, bound: TypeId, mode: WildcardMode) -> TypeId {
        if let Some(&id) = self.wildcards.get(&(bound, mode)) {
            return id;
        }
        let id = self.push(owner, TypeData::Wildcard { bound, mode });
        self.wildcards.insert((bound, mode), id);
        id
    }
}
