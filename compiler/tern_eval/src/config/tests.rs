use super::*;
use pretty_assertions::assert_eq;

fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
    move |key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_string())
    }
}

#[test]
fn defaults() {
    let config = RuntimeConfig::default();
    assert_eq!(config.max_literal_len, 1 << 24);
    assert!(config.saturate_float32);
}

#[test]
fn builder_methods() {
    let config = RuntimeConfig::default()
        .with_max_literal_len(16)
        .with_float32_saturation(false);
    assert_eq!(config.max_literal_len, 16);
    assert!(!config.saturate_float32);
}

#[test]
fn reads_variables() {
    let config = RuntimeConfig::from_vars(vars(&[
        ("TERN_MAX_LITERAL_LEN", "1024"),
        ("TERN_FLOAT32_SATURATE", "0"),
    ]));
    assert_eq!(
        config,
        RuntimeConfig {
            max_literal_len: 1024,
            saturate_float32: false,
        }
    );
}

#[test]
fn invalid_variables_keep_defaults() {
    let config = RuntimeConfig::from_vars(vars(&[
        ("TERN_MAX_LITERAL_LEN", "lots"),
        ("TERN_FLOAT32_SATURATE", "maybe"),
    ]));
    assert_eq!(config, RuntimeConfig::default());
}

#[test]
fn missing_variables_keep_defaults() {
    assert_eq!(RuntimeConfig::from_vars(|_| None), RuntimeConfig::default());
}
