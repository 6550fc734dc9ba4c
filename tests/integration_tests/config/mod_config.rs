use bson::{bson, doc};
use jsonquery::compiler::DEFAULT_MAX_DEPTH;
use jsonquery::config::{ANCHOR_PATTERNS_ENV, CONFIG_ENV, CONFIG_FILE_NAME, MAX_DEPTH_ENV};
use jsonquery::{CompileError, Compiler, CompilerConfig};
use std::collections::HashMap;
use tempfile::tempdir;

#[test]
fn defaults_match_compiler_defaults() {
    let cfg = CompilerConfig::default();
    assert_eq!(cfg.max_depth, DEFAULT_MAX_DEPTH);
    assert!(!cfg.anchor_patterns);
    let c = Compiler::from_config(&cfg).unwrap();
    assert_eq!(c.depth_limit(), DEFAULT_MAX_DEPTH);
    assert!(!c.anchors_patterns());
}

#[test]
fn toml_overrides_and_partial_tables() {
    let cfg = CompilerConfig::from_toml_str("max_depth = 8\nanchor_patterns = true\n").unwrap();
    assert_eq!(cfg, CompilerConfig { max_depth: 8, anchor_patterns: true });
    let partial = CompilerConfig::from_toml_str("anchor_patterns = true").unwrap();
    assert_eq!(partial.max_depth, DEFAULT_MAX_DEPTH);
    assert_eq!(CompilerConfig::from_toml_str("").unwrap(), CompilerConfig::default());
}

#[test]
fn invalid_toml_is_a_config_error() {
    assert!(matches!(
        CompilerConfig::from_toml_str("max_depth = \"deep\""),
        Err(CompileError::Config(_))
    ));
    assert!(matches!(CompilerConfig::from_toml_str("max_depth = 0"), Err(CompileError::Config(_))));
}

#[test]
fn explicit_file_is_loaded() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("jsonquery.toml");
    std::fs::write(&path, "max_depth = 3\n").unwrap();
    let cfg = CompilerConfig::from_file(&path).unwrap();
    assert_eq!(cfg.max_depth, 3);
    let loaded = CompilerConfig::load_from(Some(path.as_path()), no_env, None).unwrap();
    assert_eq!(loaded.max_depth, 3);
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn lookup_order_explicit_then_env_file_then_working_dir() {
    let cwd = tempdir().unwrap();
    let elsewhere = tempdir().unwrap();
    let local = cwd.path().join(CONFIG_FILE_NAME);
    let from_env = elsewhere.path().join("env.toml");
    let explicit = elsewhere.path().join("explicit.toml");
    std::fs::write(&local, "max_depth = 2\n").unwrap();
    std::fs::write(&from_env, "max_depth = 4\n").unwrap();
    std::fs::write(&explicit, "max_depth = 6\n").unwrap();
    let env_path = from_env.to_string_lossy().into_owned();
    let env = |k: &str| (k == CONFIG_ENV).then(|| env_path.clone());

    let found = CompilerConfig::find_config_path_from(None, no_env, Some(cwd.path()));
    assert_eq!(found.as_deref(), Some(local.as_path()));
    let found = CompilerConfig::find_config_path_from(None, env, Some(cwd.path()));
    assert_eq!(found.as_deref(), Some(from_env.as_path()));
    let found =
        CompilerConfig::find_config_path_from(Some(explicit.as_path()), env, Some(cwd.path()));
    assert_eq!(found.as_deref(), Some(explicit.as_path()));

    assert_eq!(CompilerConfig::load_from(None, no_env, Some(cwd.path())).unwrap().max_depth, 2);
    assert_eq!(CompilerConfig::load_from(None, env, Some(cwd.path())).unwrap().max_depth, 4);
    assert_eq!(
        CompilerConfig::load_from(Some(explicit.as_path()), env, Some(cwd.path())).unwrap().max_depth,
        6
    );
}

#[test]
fn env_file_that_does_not_exist_falls_through() {
    let cwd = tempdir().unwrap();
    std::fs::write(cwd.path().join(CONFIG_FILE_NAME), "anchor_patterns = true\n").unwrap();
    let env = |k: &str| (k == CONFIG_ENV).then(|| "/no/such/jsonquery.toml".to_string());
    let cfg = CompilerConfig::load_from(None, env, Some(cwd.path())).unwrap();
    assert!(cfg.anchor_patterns);
}

#[test]
fn no_file_anywhere_gives_defaults() {
    let cwd = tempdir().unwrap();
    assert!(CompilerConfig::find_config_path_from(None, no_env, Some(cwd.path())).is_none());
    assert!(CompilerConfig::find_config_path_from(None, no_env, None).is_none());
    let cfg = CompilerConfig::load_from(None, no_env, Some(cwd.path())).unwrap();
    assert_eq!(cfg, CompilerConfig::default());
}

#[test]
fn env_overrides_apply_on_top_of_file() {
    let cwd = tempdir().unwrap();
    std::fs::write(cwd.path().join(CONFIG_FILE_NAME), "max_depth = 2\n").unwrap();
    let env = |k: &str| (k == MAX_DEPTH_ENV).then(|| "9".to_string());
    let cfg = CompilerConfig::load_from(None, env, Some(cwd.path())).unwrap();
    assert_eq!(cfg.max_depth, 9);
}

#[test]
fn unreadable_file_is_a_config_error() {
    let dir = tempdir().unwrap();
    let err = CompilerConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, CompileError::Config(_)));
}

#[test]
fn env_overrides_apply_and_bad_values_are_ignored() {
    let vars: HashMap<&str, &str> = [(MAX_DEPTH_ENV, "5"), (ANCHOR_PATTERNS_ENV, "yes")].into();
    let mut cfg = CompilerConfig::default();
    cfg.apply_env_from(|k| vars.get(k).map(|v| (*v).to_string()));
    assert_eq!(cfg, CompilerConfig { max_depth: 5, anchor_patterns: true });

    let bad: HashMap<&str, &str> = [(MAX_DEPTH_ENV, "lots"), (ANCHOR_PATTERNS_ENV, "maybe")].into();
    cfg.apply_env_from(|k| bad.get(k).map(|v| (*v).to_string()));
    assert_eq!(cfg, CompilerConfig { max_depth: 5, anchor_patterns: true });
}

#[test]
fn configured_compiler_behaves_accordingly() {
    let cfg = CompilerConfig { max_depth: 1, anchor_patterns: true };
    let c = Compiler::from_config(&cfg).unwrap();
    assert_eq!(
        c.compile(&bson!({"operator": "STARTS", "field": "n", "value": "a"})).unwrap(),
        doc! {"n": {"$regex": "^a"}}
    );
    assert!(c.compile(&bson!({"operator": "AND", "expressions": [
        {"operator": "EQ", "field": "a", "value": 1}
    ]})).is_err());
}

#[test]
fn zero_depth_config_rejected_by_compiler() {
    let cfg = CompilerConfig { max_depth: 0, anchor_patterns: false };
    assert!(matches!(Compiler::from_config(&cfg), Err(CompileError::Config(_))));
}
