//! Retarget rules: regex substitutions applied to raw markdown before parsing.

use std::borrow::Cow;

use regex::Regex;

use crate::config::RetargetRule;
use crate::errors::Result;

/// A compiled, ordered list of retarget rules.
#[derive(Debug, Clone, Default)]
pub struct RetargetRules {
    rules: Vec<(Regex, String)>,
}

impl RetargetRules {
    /// Compiles the rules. Any invalid pattern fails the whole set.
    pub fn compile(rules: &[RetargetRule]) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|r| Ok((Regex::new(&r.rule)?, r.value.clone())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Applies every rule in order, each to the output of the previous one.
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut current = Cow::Borrowed(text);
        for (pattern, value) in &self.rules {
            let replaced = match pattern.replace_all(&current, value.as_str()) {
                Cow::Owned(s) => Some(s),
                Cow::Borrowed(_) => None,
            };
            if let Some(s) = replaced {
                current = Cow::Owned(s);
            }
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LiterallyError;

    #[test]
    fn test_apply_in_order() {
        let rules = RetargetRules::compile(&[
            RetargetRule::new(r"\.\./node_modules/", "https://cdn.jsdelivr.net/npm/"),
            RetargetRule::new(r"\.\./", "https://cdn.jsdelivr.net/npm/regular-table@0.1.0/"),
        ])
        .unwrap();

        let input = r#"<script src="../node_modules/d3/dist/d3.js"></script>
<script src="../dist/umd/regular-table.js"></script>"#;
        let output = rules.apply(input);

        assert_eq!(
            output,
            r#"<script src="https://cdn.jsdelivr.net/npm/d3/dist/d3.js"></script>
<script src="https://cdn.jsdelivr.net/npm/regular-table@0.1.0/dist/umd/regular-table.js"></script>"#
        );
    }

    #[test]
    fn test_group_references() {
        let rules = RetargetRules::compile(&[RetargetRule::new(r"v(\d+)", "version-$1")]).unwrap();
        assert_eq!(rules.apply("v1 and v22"), "version-1 and version-22");
    }

    #[test]
    fn test_no_match_borrows() {
        let rules = RetargetRules::compile(&[RetargetRule::new("zzz", "y")]).unwrap();
        assert!(matches!(rules.apply("abc"), Cow::Borrowed("abc")));
    }

    #[test]
    fn test_empty_rules() {
        let rules = RetargetRules::default();
        assert!(matches!(rules.apply("unchanged"), Cow::Borrowed("unchanged")));
    }

    #[test]
    fn test_invalid_rule() {
        let result = RetargetRules::compile(&[
            RetargetRule::new("ok", "fine"),
            RetargetRule::new("(unclosed", "x"),
        ]);
        assert!(matches!(result, Err(LiterallyError::Regex(_))));
    }
}
