#![allow(dead_code)]

// Shared helpers for integration tests.
use sealed_session::{SecretKey, SessionConfig, SessionData, TokenCodec};
use serde_json::json;

pub fn make_codec(secret: &str) -> TokenCodec {
    make_codec_with_config(secret, SessionConfig::default())
}

pub fn make_codec_with_config(secret: &str, config: SessionConfig) -> TokenCodec {
    TokenCodec::new(
        SecretKey::new(secret).expect("secret key builds successfully"),
        config,
    )
    .expect("codec builds successfully")
}

pub fn sample_data() -> SessionData {
    let mut data = SessionData::new();
    data.insert("user".into(), json!("alice"));
    data.insert("visits".into(), json!(42));
    data.insert("prefs".into(), json!({"theme": "dark", "tabs": [1, 2, 3]}));
    data
}

pub fn tamper_field(token: &str, index: usize) -> String {
    // Flip the last character of the chosen field, staying inside the token
    // alphabet so the damage is invisible to structural parsing.
    let mut fields: Vec<String> = token.split('~').map(str::to_string).collect();
    let field = &mut fields[index];
    let last = field.pop().expect("field has at least one character");
    let replacement = if last == 'A' { 'B' } else { 'A' };
    field.push(replacement);
    fields.join("~")
}
