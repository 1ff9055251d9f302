use crate::env::EnvMap;

const TOKEN_OPEN: &str = "{{";

/// Replaces every `{{KEY}}` token whose key is defined in `env`.
///
/// The input is scanned once from left to right; inserted values are never
/// rescanned, and tokens naming undefined keys are copied through verbatim.
/// When several keys match at the same position the lexically first wins.
pub fn substitute(input: &str, env: &EnvMap) -> String {
    if env.is_empty() || !input.contains(TOKEN_OPEN) {
        return input.to_string();
    }

    let mut output = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(TOKEN_OPEN) {
        output.push_str(&rest[..start]);
        let candidate = &rest[start..];

        match match_token(candidate, env) {
            Some((consumed, value)) => {
                output.push_str(value);
                rest = &candidate[consumed..];
            }
            None => {
                // Step past a single brace so `{{{KEY}}}` can still match at the
                // next position.
                output.push('{');
                rest = &candidate[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

fn match_token<'a>(candidate: &str, env: &'a EnvMap) -> Option<(usize, &'a str)> {
    let inner = &candidate[TOKEN_OPEN.len()..];
    env.iter().find_map(|(key, value)| {
        inner
            .strip_prefix(key.as_str())
            .filter(|after| after.starts_with("}}"))
            .map(|_| (TOKEN_OPEN.len() + key.len() + 2, value.as_str()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> EnvMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitute_replaces_single_token() {
        let vars = env(&[("TOKEN", "abc123")]);
        assert_eq!(substitute("Bearer {{TOKEN}}", &vars), "Bearer abc123");
    }

    #[test]
    fn substitute_replaces_multiple_tokens_and_repeats() {
        let vars = env(&[("HOST", "api.example.com"), ("VERSION", "v1")]);
        assert_eq!(
            substitute("https://{{HOST}}/{{VERSION}}/data?h={{HOST}}", &vars),
            "https://api.example.com/v1/data?h=api.example.com"
        );
    }

    #[test]
    fn substitute_leaves_unknown_tokens_verbatim() {
        let vars = env(&[("KNOWN", "yes")]);
        assert_eq!(
            substitute("{{KNOWN}} {{MISSING}}", &vars),
            "yes {{MISSING}}"
        );
        assert_eq!(substitute("{{MISSING}}", &EnvMap::new()), "{{MISSING}}");
    }

    #[test]
    fn substitute_without_tokens_is_identity() {
        let vars = env(&[("A", "1")]);
        for text in ["", "plain text", "{single} braces", "}} {{", "{{", "a{b}c"] {
            assert_eq!(substitute(text, &vars), text);
        }
    }

    #[test]
    fn substitute_handles_triple_braces() {
        let vars = env(&[("VAR", "value")]);
        assert_eq!(substitute("{{{VAR}}}", &vars), "{value}");
    }

    #[test]
    fn substitute_does_not_rescan_inserted_values() {
        let vars = env(&[("A", "{{B}}"), ("B", "second")]);
        assert_eq!(substitute("{{A}}", &vars), "{{B}}");
    }

    #[test]
    fn substitute_whole_token_yields_exact_value() {
        let vars = env(&[("EMPTY", ""), ("SPACED", " x y "), ("UNICODE", "héllo ✓")]);
        for (key, value) in &vars {
            assert_eq!(&substitute(&format!("{{{{{key}}}}}"), &vars), value);
        }
    }

    #[test]
    fn substitute_keeps_multibyte_text_around_tokens() {
        let vars = env(&[("NAME", "monde")]);
        assert_eq!(substitute("ça {{NAME}} ✓ {{", &vars), "ça monde ✓ {{");
    }
}
