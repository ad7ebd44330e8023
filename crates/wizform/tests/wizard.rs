//! End-to-end wizard flow: declare entities downstream, build a form,
//! walk steps, carry the form through a session, and persist.

use wizform::{
    entity,
    error::{ErrorKind, ErrorOrigin},
    prelude::*,
};

entity! {
    pub struct Vehicle : "garage::Vehicle" {
        kind: Option<String>,
        manufacturer_id: Option<u64>,
    }
    rules {
        kind => Presence,
        manufacturer_id => Presence,
    }
}

entity! {
    pub struct Car : "garage::Car" extends Vehicle {
        kind: Option<String>,
        manufacturer_id: Option<u64>,
        wheels: Option<i64>,
        doors: Option<i64>,
    }
    rules {
        wheels => Equal { target: 4 },
        doors => Range { min: 2, max: 5 },
    }
}

entity! {
    pub struct Owner : "garage::Owner" {
        name: Option<String>,
        plan: Option<String>,
    }
    rules {
        name => Presence,
        plan => OneOf { values: &["basic", "premium"] },
    }
}

///
/// CarForm
/// Steps gate which attributes are checked.
///

struct CarForm;

impl FormKind for CarForm {
    const STEPS: &'static [&'static str] = &["owner", "car", "review"];

    fn validate(form: &mut Form<Self>) -> Result<(), wizform::core::Error> {
        if form.required_for_step("owner") {
            form.validate_attributes(["owner_name", "owner_plan"])?;
        }
        if form.required_for_step("car") {
            form.validate_attributes(["car_kind", "car_wheels", "car_doors"])?;
        }

        Ok(())
    }
}

fn build_form() -> Form<CarForm> {
    Form::create_form(|f| {
        f.add_model(Owner::default(), None)?;
        f.add_model(Car::MODEL, None)?;
        f.add_extra_attributes(None, &["terms_accepted"])?;
        Ok(())
    })
    .unwrap()
}

#[test]
fn steps_gate_validation() {
    let mut form = build_form();
    form.set_current_step(Some("owner"));
    assert!(form.first_step());

    form.set_attributes([("owner_name", "Ada"), ("owner_plan", "basic")]);
    assert!(form.valid().unwrap());

    form.set_current_step(Some("car"));
    assert!(!form.valid().unwrap());
    assert_eq!(
        form.errors().full_messages(),
        [
            "Car kind Kind can't be blank",
            "Car wheels Wheels is not a number",
            "Car doors Doors is not a number",
        ]
    );

    form.set_attributes([("car_kind", "hatch"), ("car_wheels", "4"), ("car_doors", "3")]);
    assert!(form.valid().unwrap());
}

#[test]
fn finishing_checks_every_step() {
    let mut form = build_form();
    form.set_current_step(Some(wizform::core::FINISH_STEP));

    assert!(!form.save().unwrap());
    assert!(form.errors().contains("owner_name"));
    assert!(form.errors().contains("car_kind"));
}

#[test]
fn form_survives_a_cookie_round_trip() {
    let mut form = build_form();
    form.set_current_step(Some("car"));
    form.set_attributes([("owner_name", "Ada"), ("car_kind", "hatch")]);
    form.set("car_wheels", 4).unwrap();

    let config = Config::default();
    let mut session = WizardSession::with_config(config, MemoryStore::new(), MemoryStore::new());
    session.set_session_params(&form).unwrap();

    let mut restored = build_form();
    restored.set_attributes(session.session_params());

    assert_eq!(restored.attributes(), form.attributes());
    assert_eq!(restored.current_step(), Some("car"));
    assert!(session.cache().is_empty());
}

#[test]
fn core_errors_map_to_public_taxonomy() {
    let mut form = build_form();

    let err: wizform::Error = form.validate_attributes(["boat_name"]).unwrap_err().into();
    assert_eq!(err.kind, ErrorKind::UnknownAttribute);
    assert_eq!(err.origin, ErrorOrigin::Form);
    assert_eq!(err.to_string(), "boat_name is not a valid attribute of this form object");

    let err: wizform::Error = Form::<CarForm>::create_form(|f| {
        f.add_dynamic_model("no spaces", Owner::default())?;
        Ok(())
    })
    .unwrap_err()
    .into();
    assert_eq!(err.kind, ErrorKind::Usage);
}

#[test]
fn strict_collisions_map_to_namespace_origin() {
    let mut builder = Form::<CarForm>::builder();
    builder.collision_policy(CollisionPolicy::Strict);
    builder.add_model(Owner::default(), Some("person")).unwrap();
    builder.add_extra_attributes(Some("person"), &["name"]).unwrap();

    let err: wizform::Error = builder.build().unwrap_err().into();

    assert_eq!(err.kind, ErrorKind::DuplicateAttribute);
    assert_eq!(err.origin, ErrorOrigin::Namespace);
}

#[test]
fn version_is_exported() {
    assert!(!wizform::VERSION.is_empty());
}
