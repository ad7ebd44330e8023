use crate::model::EntityModel;
use indexmap::IndexMap;

///
/// LookupEntry
///
/// Where a form attribute came from. `original_field` is `None` for
/// collection attributes, which have no single scalar field.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LookupEntry {
    pub original_field: Option<String>,
    pub model: &'static EntityModel,
}

impl LookupEntry {
    pub fn field(original_field: impl Into<String>, model: &'static EntityModel) -> Self {
        Self {
            original_field: Some(original_field.into()),
            model,
        }
    }

    #[must_use]
    pub const fn collection(model: &'static EntityModel) -> Self {
        Self {
            original_field: None,
            model,
        }
    }
}

///
/// AttributeLookup
/// Form attribute name → originating field and entity type.
///

#[derive(Clone, Debug, Default)]
pub struct AttributeLookup {
    entries: IndexMap<String, LookupEntry>,
}

impl AttributeLookup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry, returning the one it replaced.
    pub fn insert(&mut self, attribute: String, entry: LookupEntry) -> Option<LookupEntry> {
        self.entries.insert(attribute, entry)
    }

    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&LookupEntry> {
        self.entries.get(attribute)
    }

    #[must_use]
    pub fn contains(&self, attribute: &str) -> bool {
        self.entries.contains_key(attribute)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LookupEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    /// Scalar attributes originating from `model`, as
    /// `(attribute, original_field)` pairs in declaration order.
    pub fn fields_of<'a>(
        &'a self,
        model: &'a EntityModel,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.iter().filter_map(move |(name, entry)| {
            let field = entry.original_field.as_deref()?;

            (entry.model == model).then_some((name, field))
        })
    }
}
