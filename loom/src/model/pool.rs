//! Resolution of binary names into referenced types.
//!
//! Each model keeps its own pool: the first lookup of a name asks the class
//! resolver, every later lookup of the same name returns the same [`TypeId`].
//! Supertypes are not followed here; the hierarchy queries resolve them on
//! demand, so resolution never recurses into the resolver.

use typeloom_catalog::{ClassResolver, Primitive, names};

use super::arena::Arena;
use crate::{
    Error, ModelId, Result,
    types::{TypeData, TypeId},
};

/// Arena index of the first primitive; the primitives occupy
/// `PRIMITIVE_BASE..PRIMITIVE_BASE + 9` in [`Primitive::ALL`] order.
const PRIMITIVE_BASE: u32 = 0;

/// Arena index of the null type, right after the primitives.
pub(crate) const NULL_INDEX: u32 = Primitive::ALL.len() as u32;

pub(crate) fn primitive_id(owner: ModelId, primitive: Primitive) -> TypeId {
    TypeId::new(owner, PRIMITIVE_BASE + primitive.index() as u32)
}

/// Seed a fresh arena with the primitives and the null type.
pub(crate) fn seed(arena: &mut Arena, owner: ModelId) {
    debug_assert_eq!(arena.len(), 0);
    for primitive in Primitive::ALL {
        arena.push(owner, TypeData::Primitive(primitive));
    }
    arena.push(owner, TypeData::Null);
}

pub(crate) struct Pool<'a> {
    arena: &'a mut Arena,
    resolver: &'a dyn ClassResolver,
    owner: ModelId,
}

impl<'a> Pool<'a> {
    pub fn new(arena: &'a mut Arena, resolver: &'a dyn ClassResolver, owner: ModelId) -> Self {
        Self {
            arena,
            resolver,
            owner,
        }
    }

    /// Resolve a class or array name; primitive keywords are accepted.
    pub fn resolve(&mut self, name: &str) -> Result<TypeId> {
        if let Some(primitive) = Primitive::from_keyword(name) {
            return Ok(primitive_id(self.owner, primitive));
        }
        if let Some(&id) = self.arena.referenced.get(name) {
            return Ok(id);
        }
        if let Some(&id) = self.arena.defined.get(name) {
            return Ok(id);
        }

        let id = match names::array_component(name) {
            Some(component) => {
                let component = self.resolve(component)?;
                if component == primitive_id(self.owner, Primitive::Void) {
                    return Err(Error::PrimitiveNotAllowed {
                        name: "void".to_string(),
                        context: "an array component".to_string(),
                    }
                    .into());
                }
                self.arena.intern_array(self.owner, component)
            }
            None => {
                let info = self
                    .resolver
                    .lookup(name)
                    .ok_or_else(|| Error::UnresolvedType {
                        name: name.to_string(),
                    })?
                    .clone();
                tracing::debug!(class = name, kind = ?info.kind, "resolved referenced class");
                self.arena.push(self.owner, TypeData::Referenced(info))
            }
        };

        self.arena.referenced.insert(name.to_string(), id);
        Ok(id)
    }
}
