//! Specialization of generic types.

use super::{TypeData, TypeId};
use crate::{CodeModel, Error, Result};

impl CodeModel {
    /// Replace each occurrence of `variables[i]` in `ty` with `bindings[i]`.
    ///
    /// Types that contain none of the variables come back unchanged, with
    /// the same id. Substitution is not capture-avoiding: a nested generic
    /// scope that reuses one of `variables` is substituted as well.
    pub fn substitute(
        &self,
        ty: TypeId,
        variables: &[TypeId],
        bindings: &[TypeId],
    ) -> Result<TypeId> {
        if variables.len() != bindings.len() {
            return Err(Error::ArityMismatch {
                expected: variables.len(),
                found: bindings.len(),
            }
            .into());
        }
        self.check(ty)?;
        for &var in variables {
            self.check(var)?;
        }
        for &binding in bindings {
            self.require_reference(binding, "a type argument")?;
        }
        if variables.is_empty() {
            return Ok(ty);
        }
        self.substitute_in(ty, variables, bindings)
    }

    fn substitute_in(
        &self,
        ty: TypeId,
        variables: &[TypeId],
        bindings: &[TypeId],
    ) -> Result<TypeId> {
        match self.data(ty)? {
            TypeData::TypeVar { .. } => Ok(variables
                .iter()
                .position(|&v| v == ty)
                .map_or(ty, |i| bindings[i])),
            TypeData::Narrowed { basis, args } => {
                let new_basis = self.substitute_in(basis, variables, bindings)?;
                let mut changed = new_basis != basis;
                let mut new_args = Vec::with_capacity(args.len());
                for arg in args {
                    let new_arg = self.substitute_in(arg, variables, bindings)?;
                    changed |= new_arg != arg;
                    new_args.push(new_arg);
                }
                if changed {
                    self.narrow_unchecked(new_basis, new_args)
                } else {
                    Ok(ty)
                }
            }
            TypeData::Array { component } => {
                let new_component = self.substitute_in(component, variables, bindings)?;
                if new_component == component {
                    Ok(ty)
                } else {
                    self.array(new_component)
                }
            }
            TypeData::Wildcard { bound, mode } => {
                let new_bound = self.substitute_in(bound, variables, bindings)?;
                if new_bound == bound {
                    Ok(ty)
                } else {
                    self.wildcard_with(new_bound, mode)
                }
            }
            _ => Ok(ty),
        }
    }
}
