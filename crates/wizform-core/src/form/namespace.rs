//! Namespace construction: turns the registration ledger into the flat
//! attribute map and the attribute lookup table.

use crate::{
    error::BuildError,
    form::{
        CollisionPolicy, DEFAULT_ATTRIBUTES,
        ledger::{EntityRef, Ledger, MultipleInstanceGroup},
        lookup::{AttributeLookup, LookupEntry},
    },
    naming,
    value::{FieldMap, Value},
};
use std::collections::HashSet;
use tracing::{debug, trace, warn};

///
/// Namespace
///

#[derive(Debug, Default)]
pub(crate) struct Namespace {
    pub(crate) values: FieldMap,
    pub(crate) lookup: AttributeLookup,
}

impl Namespace {
    /// Build from `ledger`. Declaration runs in four passes: entities
    /// (single, dynamic, then group templates), extra attributes,
    /// collections, and finally the single and dynamic values, which win
    /// any collision with earlier passes. Group templates never collide:
    /// they fill only names nothing else declares.
    pub(crate) fn build(ledger: &Ledger, policy: CollisionPolicy) -> Result<Self, BuildError> {
        let mut ns = Declarer {
            ns: Self::default(),
            policy,
            templated: HashSet::new(),
        };

        // pass 1: entity fields, then group templates
        for entity in entity_refs(ledger) {
            for field in entity.model.fields {
                let name = naming::prefixed(Some(entity.prefix.as_str()), field);
                let entry = LookupEntry::field(*field, entity.model);

                ns.declare(name, entity.value_of(field), Some(entry))?;
            }
        }
        for template in ledger
            .multiple_instance_models
            .iter()
            .filter_map(MultipleInstanceGroup::template)
        {
            for field in template.model.fields {
                let name = naming::prefixed(Some(template.prefix.as_str()), field);
                let entry = LookupEntry::field(*field, template.model);

                ns.declare_template(name, template.value_of(field), entry);
            }
        }

        // pass 2: extra attributes
        for spec in &ledger.extra_attributes {
            for field in &spec.names {
                let name = naming::prefixed(spec.prefix.as_deref(), field);
                let entry = spec.model.map(|model| LookupEntry::field(field, model));

                ns.declare(name, spec.initial_value(field), entry)?;
            }
        }

        // pass 3: collections
        for group in &ledger.multiple_instance_models {
            let entry = LookupEntry::collection(group.model);

            ns.declare(group.attribute_name.clone(), group.records(), Some(entry))?;
        }

        // pass 4: registered values override
        for entity in ledger.models.iter().chain(&ledger.dynamic_models) {
            for field in entity.model.fields {
                let name = naming::prefixed(Some(entity.prefix.as_str()), field);
                ns.ns.values.insert(name, entity.value_of(field));
            }
        }

        debug!(
            attributes = ns.ns.values.len(),
            lookups = ns.ns.lookup.len(),
            "namespace built"
        );

        Ok(ns.ns)
    }
}

struct Declarer {
    ns: Namespace,
    policy: CollisionPolicy,
    // names so far declared only by a group template
    templated: HashSet<String>,
}

impl Declarer {
    fn declare(
        &mut self,
        name: String,
        value: Value,
        entry: Option<LookupEntry>,
    ) -> Result<(), BuildError> {
        if DEFAULT_ATTRIBUTES.contains(&name.as_str()) {
            return Err(BuildError::DuplicateAttribute { name });
        }

        let from_template = self.templated.remove(&name);
        if self.ns.values.contains_key(&name) && !from_template {
            match self.policy {
                CollisionPolicy::Strict => {
                    return Err(BuildError::DuplicateAttribute { name });
                }
                CollisionPolicy::Overwrite => {
                    warn!(attribute = %name, "attribute declared twice, later registration wins");
                }
            }
        }

        if let Some(entry) = entry {
            self.ns.lookup.insert(name.clone(), entry);
        }
        self.ns.values.insert(name, value);

        Ok(())
    }

    /// Lowest-priority declaration: skipped when the name already exists,
    /// and replaced silently by any later declaration.
    fn declare_template(&mut self, name: String, value: Value, entry: LookupEntry) {
        if DEFAULT_ATTRIBUTES.contains(&name.as_str()) || self.ns.values.contains_key(&name) {
            trace!(attribute = %name, "template field already declared, skipped");
            return;
        }

        self.ns.lookup.insert(name.clone(), entry);
        self.ns.values.insert(name.clone(), value);
        self.templated.insert(name);
    }
}

/// Single and dynamic entities, exact duplicates removed.
fn entity_refs(ledger: &Ledger) -> Vec<&EntityRef> {
    let mut out: Vec<&EntityRef> = Vec::new();
    for entity in ledger.models.iter().chain(&ledger.dynamic_models) {
        if !out.contains(&entity) {
            out.push(entity);
        }
    }

    out
}
