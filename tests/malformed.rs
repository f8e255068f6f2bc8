mod common;

// Hostile or garbage input must decode to empty data without panicking.
use sealed_session::{ConfigError, SecretKey, SessionConfig, TokenCodec};

#[test]
fn empty_token_is_no_session() {
    assert!(common::make_codec("K").decode("").is_empty());
}

#[test]
fn garbage_tokens_decode_empty() {
    let codec = common::make_codec("K");

    for token in [
        "garbage",
        "a~b",
        "a~b~c",
        "a~b~c~d~e",
        "~~~",
        "~~~~",
        "!!!~@@@~###~$$$",
        "AAAA~~AAAA~AAAA",
        "spaces in~the~token are~fine to reject",
    ] {
        assert!(codec.decode(token).is_empty(), "token {token:?} must decode empty");
    }
}

#[test]
fn non_ascii_and_control_input_decodes_empty() {
    let codec = common::make_codec("K");

    assert!(codec.decode("\u{0}~\u{0}~\u{0}~\u{0}").is_empty());
    assert!(codec.decode("héllo~wörld~ßß~ÿÿ").is_empty());
    assert!(codec.decode(&"~".repeat(1000)).is_empty());
    assert!(codec.decode(&"A".repeat(10_000)).is_empty());
}

#[test]
fn valid_structure_with_forged_fields_decodes_empty() {
    // Structurally perfect: right field count, right field widths, valid
    // base64. Only the MAC is wrong.
    let codec = common::make_codec("K");
    let token = format!("{}~{}~{}~{}", "A".repeat(22), "9999999999", "B".repeat(24), "C".repeat(43));

    assert!(codec.decode(&token).is_empty());
}

#[test]
fn empty_secret_is_a_configuration_error() {
    assert!(matches!(SecretKey::new(""), Err(ConfigError::EmptySecret)));
    assert!(matches!(SecretKey::new(b"" as &[u8]), Err(ConfigError::EmptySecret)));

    let secret = SecretKey::new("K").expect("non-empty secret builds successfully");
    assert!(TokenCodec::new(secret, SessionConfig::default()).is_ok());
}
