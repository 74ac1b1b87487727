//! Interaction with the live process environment.

mod common;

use std::env;

use envstack::domain::constraints::IsString;
use envstack::domain::models::{FieldSpec, Layer, Schema, Value};
use envstack::{EnvInjection, EnvLoader};

#[test]
fn test_environment_overrides_every_file_layer() {
    temp_env::with_var("DEFINED_IN_3_PLACES", Some("from environment"), || {
        let merged = EnvLoader::new().merged(common::fixtures_dir());

        assert_eq!(merged.get("DEFINED_IN_3_PLACES"), Some("from environment"));
        assert_eq!(merged.origin("DEFINED_IN_3_PLACES"), Some(Layer::Environment));
        assert_eq!(merged.get("DEFINED_IN_2_PLACES"), Some(".env config value"));
    });
}

#[test]
fn test_environment_only_keys_are_not_merged() {
    temp_env::with_var("ENVSTACK_IT_ONLY_IN_ENV", Some("x"), || {
        let merged = EnvLoader::new().merged(common::fixtures_dir());
        assert!(!merged.contains_key("ENVSTACK_IT_ONLY_IN_ENV"));
    });
}

#[test]
fn test_environment_value_is_validated() {
    let schema = Schema::new().field(FieldSpec::new("EMPTY").constraint(IsString));

    temp_env::with_var("EMPTY", Some("set by ci"), || {
        let candidate = EnvLoader::new()
            .load_candidate(common::fixtures_dir(), &schema)
            .unwrap();
        assert_eq!(candidate.get("EMPTY"), Some(&Value::from("set by ci")));
    });
}

#[test]
fn test_loading_leaves_environment_untouched_by_default() {
    let dir = common::env_dir(&[(".env", "ENVSTACK_IT_UNTOUCHED=file\n")]);

    temp_env::with_var_unset("ENVSTACK_IT_UNTOUCHED", || {
        let merged = EnvLoader::new().merged(dir.path());

        assert_eq!(merged.get("ENVSTACK_IT_UNTOUCHED"), Some("file"));
        assert!(env::var_os("ENVSTACK_IT_UNTOUCHED").is_none());
    });
}

#[test]
fn test_fill_missing_injects_highest_file_layer() {
    let dir = common::env_dir(&[
        (".env.default", "ENVSTACK_IT_INJECT=default\nENVSTACK_IT_INJECT_KEEP=default\n"),
        (".env.local", "ENVSTACK_IT_INJECT=local\n"),
    ]);

    temp_env::with_vars(
        [
            ("ENVSTACK_IT_INJECT", None),
            ("ENVSTACK_IT_INJECT_KEEP", Some("process")),
        ],
        || {
            let merged = EnvLoader::new()
                .with_injection(EnvInjection::FillMissing)
                .merged(dir.path());

            assert_eq!(env::var("ENVSTACK_IT_INJECT").as_deref(), Ok("local"));
            assert_eq!(env::var("ENVSTACK_IT_INJECT_KEEP").as_deref(), Ok("process"));
            assert_eq!(merged.get("ENVSTACK_IT_INJECT"), Some("local"));
            assert_eq!(merged.get("ENVSTACK_IT_INJECT_KEEP"), Some("process"));
        },
    );
}

#[test]
fn test_fill_missing_is_idempotent() {
    let dir = common::env_dir(&[(".env", "ENVSTACK_IT_IDEMPOTENT=file\n")]);
    let schema = Schema::new().field(FieldSpec::new("ENVSTACK_IT_IDEMPOTENT").constraint(IsString));

    temp_env::with_var_unset("ENVSTACK_IT_IDEMPOTENT", || {
        let loader = EnvLoader::new().with_injection(EnvInjection::FillMissing);

        let first = loader.load_candidate(dir.path(), &schema).unwrap();
        let second = loader.load_candidate(dir.path(), &schema).unwrap();

        assert_eq!(first, second);
        assert_eq!(env::var("ENVSTACK_IT_IDEMPOTENT").as_deref(), Ok("file"));
    });
}

#[test]
fn test_file_references_are_not_expanded_from_live_environment() {
    let dir = common::env_dir(&[
        (".env.default", "CACHE_DIR=$ENVSTACK_IT_ROOT/cache\n"),
        (".env", "DB_PASSWORD=pa$word\nGREETING=\"x${ENVSTACK_IT_ROOT}y\"\n"),
    ]);

    temp_env::with_var("ENVSTACK_IT_ROOT", Some("/live"), || {
        let merged = common::hermetic_loader().merged(dir.path());

        assert_eq!(merged.get("CACHE_DIR"), Some("$ENVSTACK_IT_ROOT/cache"));
        assert_eq!(merged.get("DB_PASSWORD"), Some("pa$word"));
        assert_eq!(merged.get("GREETING"), Some("x${ENVSTACK_IT_ROOT}y"));
        assert_eq!(merged.origin("CACHE_DIR"), Some(Layer::Default));
    });
}
