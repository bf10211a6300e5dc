//! Node registry: discriminator → converter, one table per category.
//!
//! This is the only place new construct kinds plug in. A converter is a plain function
//! that receives the translator (to recurse through the same dispatch) and the node it
//! should convert; adding a kind is one function plus one `register` call.
//!
//! The registry is filled once during startup and only read afterwards, so a shared
//! `&Registry` can be handed to any number of parallel translations.

use std::fmt;

use indexmap::IndexMap;

use crate::error::{
    DuplicateRegistrationError, RegistrationError, SchemaError, SchemaErrorKind, UnknownKindError,
};
use crate::ident::Identifier;
use crate::ir::{Condition, EntryKind, FunctionKind, NumberProvider};
use crate::translate::Translator;
use crate::value::{JsonPath, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Entry,
    Condition,
    Function,
    NumberProvider,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Entry,
        Category::Condition,
        Category::Function,
        Category::NumberProvider,
    ];

    /// Field that names the kind of a node in this category.
    pub fn discriminator(self) -> &'static str {
        match self {
            Category::Entry => "type",
            Category::Condition => "condition",
            Category::Function => "function",
            Category::NumberProvider => "type",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Entry => "entry",
            Category::Condition => "condition",
            Category::Function => "function",
            Category::NumberProvider => "number provider",
        })
    }
}

pub type ConvertFn<T> = fn(&Translator<'_>, &Node<'_>) -> Result<T, SchemaError>;

/// A converter, tagged with the category it produces IR for.
#[derive(Clone, Copy)]
pub enum Converter {
    Entry(ConvertFn<EntryKind>),
    Condition(ConvertFn<Condition>),
    Function(ConvertFn<FunctionKind>),
    NumberProvider(ConvertFn<NumberProvider>),
}

impl Converter {
    pub fn category(&self) -> Category {
        match self {
            Converter::Entry(_) => Category::Entry,
            Converter::Condition(_) => Category::Condition,
            Converter::Function(_) => Category::Function,
            Converter::NumberProvider(_) => Category::NumberProvider,
        }
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Converter::{:?}", self.category())
    }
}

#[derive(Default)]
pub struct Registry {
    entries: IndexMap<Identifier, ConvertFn<EntryKind>>,
    conditions: IndexMap<Identifier, ConvertFn<Condition>>,
    functions: IndexMap<Identifier, ConvertFn<FunctionKind>>,
    number_providers: IndexMap<Identifier, ConvertFn<NumberProvider>>,
}

impl Registry {
    /// An empty registry; every discriminator is unknown until registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// All built-in kinds.
    pub fn vanilla() -> Result<Self, RegistrationError> {
        let mut registry = Self::new();
        crate::kinds::register_all(&mut registry)?;
        tracing::debug!(
            entries = registry.entries.len(),
            conditions = registry.conditions.len(),
            functions = registry.functions.len(),
            number_providers = registry.number_providers.len(),
            "registry populated"
        );
        Ok(registry)
    }

    /// Register `converter` under `kind` in the converter's category.
    ///
    /// `kind` may omit the `minecraft:` namespace. Registering the same (kind, category)
    /// twice is a [`DuplicateRegistrationError`].
    pub fn register(
        &mut self,
        kind: &str,
        converter: Converter,
    ) -> Result<&mut Self, RegistrationError> {
        let category = converter.category();
        let id = kind
            .parse::<Identifier>()
            .map_err(|source| RegistrationError::InvalidKind { category, source })?;
        let fresh = match converter {
            Converter::Entry(f) => insert_new(&mut self.entries, id, f),
            Converter::Condition(f) => insert_new(&mut self.conditions, id, f),
            Converter::Function(f) => insert_new(&mut self.functions, id, f),
            Converter::NumberProvider(f) => insert_new(&mut self.number_providers, id, f),
        };
        if !fresh {
            return Err(DuplicateRegistrationError { category, kind: kind.to_string() }.into());
        }
        Ok(self)
    }

    pub fn register_entry(
        &mut self,
        kind: &str,
        f: ConvertFn<EntryKind>,
    ) -> Result<&mut Self, RegistrationError> {
        self.register(kind, Converter::Entry(f))
    }

    pub fn register_condition(
        &mut self,
        kind: &str,
        f: ConvertFn<Condition>,
    ) -> Result<&mut Self, RegistrationError> {
        self.register(kind, Converter::Condition(f))
    }

    pub fn register_function(
        &mut self,
        kind: &str,
        f: ConvertFn<FunctionKind>,
    ) -> Result<&mut Self, RegistrationError> {
        self.register(kind, Converter::Function(f))
    }

    pub fn register_number_provider(
        &mut self,
        kind: &str,
        f: ConvertFn<NumberProvider>,
    ) -> Result<&mut Self, RegistrationError> {
        self.register(kind, Converter::NumberProvider(f))
    }

    pub fn resolve(&self, kind: &Identifier, category: Category) -> Option<Converter> {
        match category {
            Category::Entry => self.entries.get(kind).copied().map(Converter::Entry),
            Category::Condition => self.conditions.get(kind).copied().map(Converter::Condition),
            Category::Function => self.functions.get(kind).copied().map(Converter::Function),
            Category::NumberProvider => self
                .number_providers
                .get(kind)
                .copied()
                .map(Converter::NumberProvider),
        }
    }

    pub fn contains(&self, kind: &Identifier, category: Category) -> bool {
        self.resolve(kind, category).is_some()
    }

    /// Registered discriminators of one category, in registration order.
    pub fn kinds(&self, category: Category) -> Vec<&Identifier> {
        match category {
            Category::Entry => self.entries.keys().collect(),
            Category::Condition => self.conditions.keys().collect(),
            Category::Function => self.functions.keys().collect(),
            Category::NumberProvider => self.number_providers.keys().collect(),
        }
    }

    // -------- typed lookups used by the translator --------

    pub fn entry(&self, kind: &Identifier, at: &JsonPath) -> Result<ConvertFn<EntryKind>, SchemaError> {
        self.entries.get(kind).copied().ok_or_else(|| unknown(Category::Entry, kind, at))
    }

    pub fn condition(&self, kind: &Identifier, at: &JsonPath) -> Result<ConvertFn<Condition>, SchemaError> {
        self.conditions.get(kind).copied().ok_or_else(|| unknown(Category::Condition, kind, at))
    }

    pub fn function(&self, kind: &Identifier, at: &JsonPath) -> Result<ConvertFn<FunctionKind>, SchemaError> {
        self.functions.get(kind).copied().ok_or_else(|| unknown(Category::Function, kind, at))
    }

    pub fn number_provider(
        &self,
        kind: &Identifier,
        at: &JsonPath,
    ) -> Result<ConvertFn<NumberProvider>, SchemaError> {
        self.number_providers
            .get(kind)
            .copied()
            .ok_or_else(|| unknown(Category::NumberProvider, kind, at))
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.kinds(Category::Entry))
            .field("conditions", &self.kinds(Category::Condition))
            .field("functions", &self.kinds(Category::Function))
            .field("number_providers", &self.kinds(Category::NumberProvider))
            .finish()
    }
}

fn insert_new<F>(map: &mut IndexMap<Identifier, F>, id: Identifier, f: F) -> bool {
    if map.contains_key(&id) {
        return false;
    }
    map.insert(id, f);
    true
}

fn unknown(category: Category, kind: &Identifier, at: &JsonPath) -> SchemaError {
    SchemaError::new(
        at.clone(),
        SchemaErrorKind::UnknownKind(UnknownKindError { category, kind: kind.to_string() }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Custom, Literal};

    fn glow(_: &Translator<'_>, node: &Node<'_>) -> Result<FunctionKind, SchemaError> {
        let level = node.required("level")?.as_num()?;
        Ok(FunctionKind::Custom(Custom {
            kind: node.discriminator(Category::Function)?,
            factory: "GlowLootFunction.builder".into(),
            args: vec![Literal::Num(level)],
        }))
    }

    fn never(_: &Translator<'_>, node: &Node<'_>) -> Result<Condition, SchemaError> {
        Err(node.error(SchemaErrorKind::InvalidValue("never".into())))
    }

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut registry = Registry::new();
        registry.register_function("mymod:glow", glow).unwrap();
        let err = match registry.register_function("mymod:glow", glow).unwrap_err() {
            RegistrationError::Duplicate(err) => err,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(err.category, Category::Function);
        assert_eq!(err.kind, "mymod:glow");
        assert_eq!(err.to_string(), "function kind `mymod:glow` is already registered");
    }

    #[test]
    fn namespace_is_normalized_on_registration() {
        let mut registry = Registry::new();
        registry.register_condition("never", never).unwrap();
        assert!(registry.register_condition("minecraft:never", never).is_err());
        let id: Identifier = "minecraft:never".parse().unwrap();
        assert!(registry.contains(&id, Category::Condition));
    }

    #[test]
    fn same_kind_in_another_category_is_fine() {
        let mut registry = Registry::new();
        registry.register_condition("mymod:glow", never).unwrap();
        registry.register_function("mymod:glow", glow).unwrap();
        let id: Identifier = "mymod:glow".parse().unwrap();
        assert!(matches!(registry.resolve(&id, Category::Function), Some(Converter::Function(_))));
        assert!(matches!(registry.resolve(&id, Category::Condition), Some(Converter::Condition(_))));
        assert!(registry.resolve(&id, Category::Entry).is_none());
    }

    #[test]
    fn unknown_lookup_names_kind_and_path() {
        let registry = Registry::new();
        let id: Identifier = "mymod:nonexistent".parse().unwrap();
        let at = JsonPath::root().key("pools").index(0).key("conditions").index(0);
        let err = registry.condition(&id, &at).unwrap_err();
        let unknown = err.unknown_kind().unwrap();
        assert_eq!(unknown.kind, "mymod:nonexistent");
        assert_eq!(unknown.category, Category::Condition);
        assert_eq!(
            err.to_string(),
            "pools[0].conditions[0]: unknown condition kind `mymod:nonexistent`"
        );
    }

    #[test]
    fn vanilla_registry_lists_kinds_in_registration_order() {
        let registry = Registry::vanilla().unwrap();
        let entries: Vec<String> =
            registry.kinds(Category::Entry).iter().map(|k| k.to_string()).collect();
        assert_eq!(entries.first().map(String::as_str), Some("minecraft:empty"));
        assert!(entries.contains(&"minecraft:alternatives".to_string()));
    }

    #[test]
    fn invalid_kind_names_are_rejected() {
        let mut registry = Registry::new();
        let err = registry.register_condition("MyMod:Thing", never).unwrap_err();
        assert!(matches!(err, RegistrationError::InvalidKind { category: Category::Condition, .. }));
    }
}
