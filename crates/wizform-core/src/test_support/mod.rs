//! Fixture entities shared by unit tests.

use crate::{
    form::FormKind,
    model::{EntityModel, FieldRule},
    validator::{Equal, Len, Matches, Presence},
};

entity! {
    /// Base vehicle: every vehicle needs a kind and a manufacturer.
    pub struct Vehicle : "fixtures::Vehicle" {
        note: Option<String>,
        kind: Option<String>,
        manufacturer_id: Option<u64>,
    }
    rules {
        kind => Presence,
        manufacturer_id => Presence,
    }
}

entity! {
    pub struct Car : "fixtures::Car" extends Vehicle {
        note: Option<String>,
        kind: Option<String>,
        manufacturer_id: Option<u64>,
        wheels: Option<i64>,
    }
    rules {
        wheels => Equal { target: 4 },
    }
}

entity! {
    pub struct Truck : "fixtures::Truck" extends Vehicle {
        note: Option<String>,
        kind: Option<String>,
        manufacturer_id: Option<u64>,
        axles: Option<i64>,
    }
    rules {}
}

entity! {
    pub struct Part : "fixtures::Part" {
        name: Option<String>,
        serial: Option<String>,
    }
    rules {
        name => Presence,
        serial => Len { min: None, max: Some(8) },
    }
}

entity! {
    pub struct Account : "fixtures::Account" {
        email: Option<String>,
        password: Option<String>,
        password_confirmation: Option<String>,
    }
    rules {
        email => Presence,
        password_confirmation => Matches { other: "password" },
    }
}

/// Abstract type: known to the lookup table, never instantiated.
pub static MACHINE: EntityModel = EntityModel {
    path: "fixtures::Machine",
    entity_name: "Machine",
    fields: &["designer", "country_of_origin"],
    rules: &[FieldRule {
        field: "designer",
        validator: &Presence,
    }],
    parent: None,
    constructor: None,
};

impl Car {
    pub fn with_kind(kind: &str) -> Self {
        Self {
            kind: Some(kind.to_string()),
            ..Self::default()
        }
    }
}

///
/// VehicleForm
///

#[derive(Debug)]
pub struct VehicleForm;

impl FormKind for VehicleForm {
    const STEPS: &'static [&'static str] = &["basic_configuration", "body", "engine", "review"];
}
