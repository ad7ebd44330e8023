use wizform::{
    config::{Config, StoreConfig, StoreLocation},
    entity,
    prelude::*,
};

entity! {
    pub struct Pet : "shelter::Pet" {
        name: Option<String>,
        age: Option<i64>,
    }
    rules {
        name => Presence,
    }
}

#[derive(Debug)]
struct AdoptionForm;

impl FormKind for AdoptionForm {}

fn pet_form(name: &str) -> Form<AdoptionForm> {
    Form::create_form(|f| {
        f.add_model(
            Pet {
                name: Some(name.to_string()),
                age: Some(3),
            },
            None,
        )?;
        Ok(())
    })
    .unwrap()
}

fn cache_config() -> Config {
    Config {
        store: StoreConfig {
            location: StoreLocation::Cache,
        },
        ..Config::default()
    }
}

// ---- cookie location -----------------------------------------------------

#[test]
fn cookie_location_stores_payload_under_form_key() {
    let mut session =
        WizardSession::with_config(Config::default(), MemoryStore::new(), MemoryStore::new());

    session.set_session_params(&pet_form("Rex")).unwrap();

    let payload = session.cookies().get("multi_model_wizard_form").unwrap();
    let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
    assert_eq!(json["pet_name"], "Rex");
    assert_eq!(json["pet_age"], 3);
    assert!(session.cache().is_empty());
}

#[test]
fn cookie_params_read_back() {
    let mut session =
        WizardSession::with_config(Config::default(), MemoryStore::new(), MemoryStore::new());
    session.set_session_params(&pet_form("Rex")).unwrap();

    let params = session.session_params();

    assert_eq!(params["pet_name"], Value::from("Rex"));
    assert_eq!(params["pet_age"], Value::Int(3));
    assert_eq!(params["new_record"], Value::Bool(true));
}

#[test]
fn custom_form_key_is_used() {
    let config = Config {
        form_key: "adoption".to_string(),
        ..Config::default()
    };
    let mut session = WizardSession::with_config(config, MemoryStore::new(), MemoryStore::new());

    session.set_session_params(&pet_form("Rex")).unwrap();

    assert!(session.cookies().contains_key("adoption"));
    assert!(!session.cookies().contains_key("multi_model_wizard_form"));
}

#[test]
fn clearing_cookie_params_empties_the_session() {
    let mut session =
        WizardSession::with_config(Config::default(), MemoryStore::new(), MemoryStore::new());
    session.set_session_params(&pet_form("Rex")).unwrap();

    session.clear_session_params();

    assert!(session.cookies().is_empty());
    assert!(session.session_params().is_empty());
}

#[test]
fn missing_payload_reads_as_empty() {
    let mut session =
        WizardSession::with_config(Config::default(), MemoryStore::new(), MemoryStore::new());

    assert!(session.session_params().is_empty());
}

#[test]
fn unreadable_payload_reads_as_empty() {
    let mut cookies = MemoryStore::new();
    cookies.set("multi_model_wizard_form", "{not json".to_string());
    let mut session = WizardSession::with_config(Config::default(), cookies, MemoryStore::new());

    assert!(session.session_params().is_empty());
}

// ---- cache location ------------------------------------------------------

#[test]
fn cache_location_keeps_only_an_id_in_the_cookie() {
    let mut session =
        WizardSession::with_config(cache_config(), MemoryStore::new(), MemoryStore::new());

    session.set_session_params(&pet_form("Rex")).unwrap();

    let id = session.cookies().get("multi_model_wizard_form").unwrap();
    assert!(id.parse::<ulid::Ulid>().is_ok());
    assert!(session.cache().contains_key(&format!("multi_model_wizard_form:{id}")));
    assert_eq!(session.session_params()["pet_name"], Value::from("Rex"));
}

#[test]
fn form_id_is_stable_across_calls() {
    let mut session =
        WizardSession::with_config(cache_config(), MemoryStore::new(), MemoryStore::new());

    let first = session.form_id();
    let second = session.form_id();

    assert_eq!(first, second);
}

#[test]
fn later_writes_replace_the_cached_payload() {
    let mut session =
        WizardSession::with_config(cache_config(), MemoryStore::new(), MemoryStore::new());

    session.set_session_params(&pet_form("Rex")).unwrap();
    session.set_session_params(&pet_form("Fido")).unwrap();

    assert_eq!(session.cache().len(), 1);
    assert_eq!(session.session_params()["pet_name"], Value::from("Fido"));
}

#[test]
fn clearing_cache_params_drops_payload_and_id() {
    let mut session =
        WizardSession::with_config(cache_config(), MemoryStore::new(), MemoryStore::new());
    session.set_session_params(&pet_form("Rex")).unwrap();

    session.clear_session_params();

    assert!(session.cache().is_empty());
    assert!(session.cookies().is_empty());
}

#[test]
fn stored_params_restore_a_fresh_form() {
    let mut session =
        WizardSession::with_config(cache_config(), MemoryStore::new(), MemoryStore::new());
    let mut form = pet_form("Rex");
    form.set_current_step(Some("details"));
    session.set_session_params(&form).unwrap();

    let mut restored = pet_form("");
    restored.set_attributes(session.session_params());

    assert_eq!(restored.get("pet_name"), Some(Value::from("Rex")));
    assert_eq!(restored.current_step(), Some("details"));
    assert!(restored.validate_attributes(["pet_name"]).unwrap());
}
