//! Typed conversion of [`Value`]s into document elements.
//!
//! Each element type declares the block keyword it owns; [`classify`] selects the
//! matching values in source order and converts each one, collecting valid elements
//! and per-element errors side by side. [`Classified::into_strict`] turns that into
//! the fail-fast form where the first error discards the whole batch.

use super::values::Value;
use crate::error::{DocError, Result};
use crate::model::{ElementKind, ModuleReference, Output, Resource, Variable};

/// A document element built from one top-level block
pub trait Element: Sized {
    const KIND: ElementKind;

    fn from_value(value: &Value) -> Result<Self>;
}

fn missing(kind: ElementKind, field: &'static str) -> DocError {
    DocError::MissingField { kind, field }
}

impl Element for Variable {
    const KIND: ElementKind = ElementKind::Variable;

    fn from_value(value: &Value) -> Result<Self> {
        let name = value.identifier(0).ok_or_else(|| missing(Self::KIND, "name"))?;
        let var_type = value.attribute("type").ok_or_else(|| missing(Self::KIND, "type"))?;

        Ok(Variable::new(
            name,
            var_type,
            value.attribute("description").unwrap_or_default(),
            value.attribute("default").unwrap_or_default(),
        ))
    }
}

impl Element for Output {
    const KIND: ElementKind = ElementKind::Output;

    fn from_value(value: &Value) -> Result<Self> {
        let name = value.identifier(0).ok_or_else(|| missing(Self::KIND, "name"))?;

        Ok(Output {
            name: name.to_string(),
            description: value.attribute("description").unwrap_or_default().to_string(),
        })
    }
}

impl Element for Resource {
    const KIND: ElementKind = ElementKind::Resource;

    fn from_value(value: &Value) -> Result<Self> {
        match (value.identifier(0), value.identifier(1)) {
            (Some(resource_type), Some(name)) => Ok(Resource {
                resource_type: resource_type.to_string(),
                name: name.to_string(),
                description: value.comment.text.clone(),
            }),
            _ => Err(missing(Self::KIND, "name")),
        }
    }
}

impl Element for ModuleReference {
    const KIND: ElementKind = ElementKind::Module;

    fn from_value(value: &Value) -> Result<Self> {
        let name = value.identifier(0).ok_or_else(|| missing(Self::KIND, "name"))?;
        let source = value.attribute("source").ok_or_else(|| missing(Self::KIND, "source"))?;

        Ok(ModuleReference {
            name: name.to_string(),
            source: source.to_string(),
            description: value.comment.text.clone(),
        })
    }
}

/// Elements converted from one batch of values, with the ones that failed
#[derive(Debug)]
pub struct Classified<T> {
    pub items: Vec<T>,
    pub errors: Vec<DocError>,
}

impl<T> Default for Classified<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            errors: Vec::new(),
        }
    }
}

impl<T> Classified<T> {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fail-fast view: the first error wins and no items survive.
    pub fn into_strict(self) -> Result<Vec<T>> {
        match self.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.items),
        }
    }
}

/// Values whose keyword belongs to `kind`, in their original order.
pub fn select(values: &[Value], kind: ElementKind) -> impl Iterator<Item = &Value> {
    values.iter().filter(move |v| v.keyword == kind.keyword())
}

pub fn classify<T: Element>(values: &[Value]) -> Classified<T> {
    let mut classified = Classified::default();

    for value in select(values, T::KIND) {
        match T::from_value(value) {
            Ok(item) => classified.items.push(item),
            Err(err) => classified.errors.push(err),
        }
    }

    classified
}
