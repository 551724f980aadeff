use mert_core::scorer::{RegularisationStrategy, ScorerBase, ScorerError};
use mert_core::types::{ConfigError, ScorerConfig};

#[test]
fn golden_case_flag_and_default_lookup() {
    let base = ScorerBase::new("TEST", "case:true").unwrap();

    assert_eq!(base.config_value("case", "false"), "true");
    assert_eq!(base.config_value("lang", "en"), "en");
    assert!(base.preserve_case());
}

#[test]
fn invariant_present_keys_return_values_absent_keys_return_default() {
    let config = ScorerConfig::parse("a:1,b:two,reflen:closest,empty:").unwrap();

    assert_eq!(config.len(), 4);
    assert_eq!(config.get_or("a", "x"), "1");
    assert_eq!(config.get_or("b", "x"), "two");
    assert_eq!(config.get_or("reflen", "x"), "closest");
    assert_eq!(config.get_or("empty", "x"), "");
    for absent in ["c", "A", "", "reflen "] {
        assert_eq!(config.get_or(absent, "fallback"), "fallback");
    }
}

#[test]
fn invariant_empty_config_has_no_entries() {
    let config = ScorerConfig::parse("").unwrap();
    assert!(config.is_empty());
    assert_eq!(config.get("case"), None);
}

#[test]
fn values_may_contain_colons() {
    let config: ScorerConfig = "weights:0.5:0.5,case:false".parse().unwrap();
    assert_eq!(config.get("weights"), Some("0.5:0.5"));
    assert_eq!(config.get("case"), Some("false"));
}

#[test]
fn entry_without_colon_is_rejected() {
    let err = ScorerConfig::parse("case:true,lowercase").unwrap_err();
    assert_eq!(
        err,
        ConfigError::MissingColon {
            config: "case:true,lowercase".to_string(),
            entry: "lowercase".to_string(),
        }
    );

    assert!(matches!(
        ScorerBase::new("TEST", "oops"),
        Err(ScorerError::Config(ConfigError::MissingColon { .. }))
    ));
}

#[test]
fn recognised_keys_are_typed() {
    let base = ScorerBase::new("TEST", "case:false,regtype:average,regwin:3").unwrap();
    assert!(!base.preserve_case());
    assert_eq!(base.regularisation(), (RegularisationStrategy::Average, 3));

    let defaults = ScorerBase::new("TEST", "").unwrap();
    assert!(defaults.preserve_case());
    assert_eq!(defaults.regularisation(), (RegularisationStrategy::None, 0));
    assert_eq!(defaults.factors().delimiter(), "|");

    let custom = ScorerBase::new("TEST", "factordelim:/").unwrap();
    assert_eq!(custom.factors().delimiter(), "/");
}

#[test]
fn malformed_typed_values_are_rejected() {
    for config in ["case:maybe", "regtype:median", "regwin:-1", "factordelim:"] {
        assert!(
            matches!(
                ScorerBase::new("TEST", config),
                Err(ScorerError::Config(ConfigError::InvalidValue { .. }))
            ),
            "config '{config}' should be rejected"
        );
    }
}

#[test]
fn unknown_keys_are_inert() {
    let base = ScorerBase::new("TEST", "smoothing:add-one,lang:de").unwrap();
    assert_eq!(base.config_value("lang", "en"), "de");
    assert!(base.preserve_case());
    assert_eq!(base.name(), "TEST");
}
