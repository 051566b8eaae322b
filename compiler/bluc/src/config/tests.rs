use super::*;
use pretty_assertions::assert_eq;

fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |key| {
        pairs
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| (*value).to_owned())
    }
}

#[test]
fn test_defaults() {
    let config = SessionConfig::from_vars(vars(&[]));
    assert_eq!(config.std_dir, None);
    assert_eq!(config.max_call_depth, DEFAULT_MAX_CALL_DEPTH);
    assert_eq!(
        config.std_dir_for(Path::new("/project")),
        PathBuf::from("/project/library")
    );
}

#[test]
fn test_overrides_from_variables() {
    let config = SessionConfig::from_vars(vars(&[
        ("BLU_STDLIB", "/opt/blu/std"),
        ("BLU_MAX_CALL_DEPTH", " 500 "),
    ]));
    assert_eq!(config.std_dir_for(Path::new("/project")), PathBuf::from("/opt/blu/std"));
    assert_eq!(config.max_call_depth, 500);
}

#[test]
fn test_invalid_depth_is_ignored() {
    for bad in ["", "lots", "-3", "0"] {
        let config = SessionConfig::from_vars(vars(&[("BLU_MAX_CALL_DEPTH", bad)]));
        assert_eq!(config.max_call_depth, DEFAULT_MAX_CALL_DEPTH, "value {bad:?}");
    }
}

#[test]
fn test_builder_setters() {
    let config = SessionConfig::default()
        .with_std_dir("/std")
        .with_max_call_depth(7);
    assert_eq!(config.std_dir, Some(PathBuf::from("/std")));
    assert_eq!(config.max_call_depth, 7);
}
