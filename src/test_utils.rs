//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate a single payload line (printable ASCII, no line break)
    pub fn payload_line() -> impl Strategy<Value = String> {
        "[ -~]{0,60}"
    }

    /// Generate a line made only of batch special characters, quotes and blanks
    pub fn special_line() -> impl Strategy<Value = String> {
        "[()<>|&^\" ]{0,20}"
    }

    /// Generate multi-line payload text, including blank lines
    pub fn payload_text() -> impl Strategy<Value = String> {
        prop::collection::vec(prop_oneof![payload_line(), special_line()], 0..20)
            .prop_map(|lines| lines.join("\n"))
    }

    /// Generate a valid node name
    pub fn node_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9-]{0,20}[a-z0-9]?".prop_filter("Name must not be empty", |s| !s.is_empty())
    }

    /// Generate a server URL
    pub fn server_url() -> impl Strategy<Value = String> {
        ("[a-z]{3,10}", "[a-z]{2,5}", "[a-z0-9-]{1,20}").prop_map(|(domain, tld, org)| {
            format!("https://{domain}.{tld}/organizations/{org}")
        })
    }

    /// Generate an `ssl_verify_mode` override, recognised or not
    pub fn ssl_override() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            Just(None),
            Just(Some("peer".to_string())),
            Just(Some("none".to_string())),
            "[a-z]{1,8}".prop_map(Some),
        ]
    }
}

/// Replay `echo.` commands the way `cmd.exe` prints them
///
/// Outside a quoted span a caret takes the next character literally and any
/// other special character would split or redirect the command, which
/// panics. Inside a quoted span everything is literal.
#[cfg(test)]
pub fn replay_echo(encoded: &str) -> String {
    use crate::core::encoder::{ECHO_PREFIX, ESCAPE_CHAR, SPECIAL_CHARS};

    encoded
        .lines()
        .map(|line| {
            let body = line
                .strip_prefix(ECHO_PREFIX)
                .unwrap_or_else(|| panic!("not an echo command: {line}"));
            let mut out = String::with_capacity(body.len());
            let mut quoted = false;
            let mut chars = body.chars();
            while let Some(c) = chars.next() {
                if c == '"' {
                    quoted = !quoted;
                    out.push(c);
                } else if quoted {
                    out.push(c);
                } else if c == ESCAPE_CHAR {
                    let escaped = chars
                        .next()
                        .unwrap_or_else(|| panic!("dangling escape in: {line}"));
                    out.push(escaped);
                } else if SPECIAL_CHARS.contains(&c) {
                    panic!("unescaped {c:?} in: {line}");
                } else {
                    out.push(c);
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use super::*;
    use crate::core::encoder::escape_and_echo;
    use proptest::prelude::*;

    #[test]
    fn test_replay_resolves_escapes() {
        assert_eq!(replay_echo("echo.a ^| b\necho."), "a | b\n");
        assert_eq!(replay_echo("echo.\"a&b\" ^& c"), "\"a&b\" & c");
    }

    #[test]
    #[should_panic(expected = "unescaped '&'")]
    fn test_replay_rejects_unescaped_separator() {
        replay_echo("echo.a=1&b=2");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_payload_line_generator(line in payload_line()) {
            prop_assert!(!line.contains('\n'));
            prop_assert!(!line.contains('\r'));
        }

        #[test]
        fn test_node_name_generator(name in node_name()) {
            prop_assert!(!name.is_empty());
            prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }

        #[test]
        fn test_client_rb_carries_server_url(url in server_url(), ssl in ssl_override()) {
            use crate::core::bootstrap::{BootstrapConfig, TargetCapabilities};
            use crate::core::client_config;
            use crate::core::profile::ServerConfig;
            use crate::core::trusted_certs::TrustCertBundle;

            let config = BootstrapConfig { node_ssl_verify_mode: ssl, ..Default::default() };
            let server = ServerConfig { chef_server_url: url.clone(), ..Default::default() };
            let text = client_config::render(
                &config,
                &server,
                &TrustCertBundle::default(),
                TargetCapabilities::default(),
            );
            let expected = format!("chef_server_url  \"{url}\"\n");
            prop_assert!(text.contains(&expected));
            prop_assert!(text.matches("ssl_verify_mode").count() <= 1);
        }

        #[test]
        fn test_encode_then_replay(text in payload_text()) {
            let expected = text.lines().collect::<Vec<_>>().join("\n");
            prop_assert_eq!(replay_echo(&escape_and_echo(&text)), expected);
        }
    }
}
