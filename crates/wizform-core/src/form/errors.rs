use crate::validate::full_message;
use serde::Serialize;

///
/// Errors
///
/// Ordered attribute → message collection. Several messages may sit
/// under one attribute; insertion order is preserved across attributes.
///

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Errors {
    entries: Vec<(String, String)>,
}

impl Errors {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, attribute: impl Into<String>, message: impl Into<String>) {
        self.entries.push((attribute.into(), message.into()));
    }

    pub fn extend<I, M>(&mut self, attribute: &str, messages: I)
    where
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        for message in messages {
            self.add(attribute, message);
        }
    }

    /// Messages recorded under `attribute`.
    pub fn get<'a>(&'a self, attribute: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(key, _)| key == attribute)
            .map(|(_, message)| message.as_str())
    }

    #[must_use]
    pub fn contains(&self, attribute: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == attribute)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(attribute, message)| (attribute.as_str(), message.as_str()))
    }

    /// Distinct attributes carrying at least one message, first-seen order.
    #[must_use]
    pub fn attributes(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for (attribute, _) in self.iter() {
            if !seen.contains(&attribute) {
                seen.push(attribute);
            }
        }

        seen
    }

    /// Every message prefixed with its humanized attribute
    /// (`car_kind` + `Kind can't be blank` → `Car kind Kind can't be blank`).
    #[must_use]
    pub fn full_messages(&self) -> Vec<String> {
        self.iter()
            .map(|(attribute, message)| full_message(attribute, message))
            .collect()
    }
}
