//! Plans and positional parameter binding.

use std::collections::HashMap;

use chrono::NaiveDate;

/// One bound statement parameter.
///
/// `Null` binds as SQL NULL; the only nullable request value is the title.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanParam {
    Int(i64),
    Text(String),
    Date(NaiveDate),
    Null,
}

impl From<i64> for PlanParam {
    fn from(value: i64) -> Self {
        PlanParam::Int(value)
    }
}

impl From<i32> for PlanParam {
    fn from(value: i32) -> Self {
        PlanParam::Int(i64::from(value))
    }
}

impl From<&str> for PlanParam {
    fn from(value: &str) -> Self {
        PlanParam::Text(value.to_string())
    }
}

impl From<String> for PlanParam {
    fn from(value: String) -> Self {
        PlanParam::Text(value)
    }
}

impl From<NaiveDate> for PlanParam {
    fn from(value: NaiveDate) -> Self {
        PlanParam::Date(value)
    }
}

impl From<Option<String>> for PlanParam {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(text) => PlanParam::Text(text),
            None => PlanParam::Null,
        }
    }
}

/// A rendered statement: query text plus its parameters in bind order.
///
/// Built once per request, executed once, discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    pub text: String,
    pub params: Vec<PlanParam>,
}

/// Allocates `$N` placeholders while collecting parameters in bind order.
///
/// The parameter list grows append-only, so a token never changes once
/// issued. Tokens are memoized per logical key, which lets a builder splice
/// the same placeholder into several clauses without binding the value again.
#[derive(Debug, Default)]
pub struct ParamBinder {
    params: Vec<PlanParam>,
    placeholders: HashMap<&'static str, String>,
}

impl ParamBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds one value under `key` and returns its `$N` token.
    pub fn scalar(&mut self, key: &'static str, value: impl Into<PlanParam>) -> String {
        self.params.push(value.into());
        let token = format!("${}", self.params.len());
        self.placeholders.insert(key, token.clone());
        token
    }

    /// Binds each value in order under `key`.
    ///
    /// Returns the tokens individually passed through `transform` and joined
    /// with `sep`, for splicing into row constructors or array literals.
    pub fn vector<I, V, F>(&mut self, key: &'static str, values: I, sep: &str, transform: F) -> String
    where
        I: IntoIterator<Item = V>,
        V: Into<PlanParam>,
        F: Fn(&str) -> String,
    {
        let mut parts = Vec::new();
        for value in values {
            self.params.push(value.into());
            parts.push(transform(&format!("${}", self.params.len())));
        }
        let joined = parts.join(sep);
        self.placeholders.insert(key, joined.clone());
        joined
    }

    /// The token previously issued for `key`, or empty if never bound.
    pub fn placeholder(&self, key: &str) -> &str {
        self.placeholders.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Finishes the plan with the rendered statement text.
    pub fn into_plan(self, text: String) -> Plan {
        Plan {
            text,
            params: self.params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_tokens_are_positional() {
        let mut binder = ParamBinder::new();
        assert_eq!(binder.scalar("a", 1i64), "$1");
        assert_eq!(binder.scalar("b", "x"), "$2");
        assert_eq!(binder.scalar("c", 3i64), "$3");

        let plan = binder.into_plan("q".to_string());
        assert_eq!(
            plan.params,
            vec![
                PlanParam::Int(1),
                PlanParam::Text("x".to_string()),
                PlanParam::Int(3),
            ]
        );
    }

    #[test]
    fn test_vector_binds_in_order_and_transforms() {
        let mut binder = ParamBinder::new();
        binder.scalar("first", 10i64);
        let joined = binder.vector("ids", [7i64, 8, 9], ", ", |p| format!("({p}::bigint)"));
        assert_eq!(joined, "($2::bigint), ($3::bigint), ($4::bigint)");
        assert_eq!(binder.len(), 4);
    }

    #[test]
    fn test_placeholder_is_memoized_per_key() {
        let mut binder = ParamBinder::new();
        let token = binder.scalar("cycleLen", 2i64);
        assert_eq!(binder.placeholder("cycleLen"), token);
        assert_eq!(binder.placeholder("cycleLen"), "$1");
        // A second lookup must not grow the parameter list.
        assert_eq!(binder.len(), 1);
        assert_eq!(binder.placeholder("never bound"), "");
    }

    #[test]
    fn test_vector_placeholder_reuse() {
        let mut binder = ParamBinder::new();
        let joined = binder.vector("shifts", [2i64, 5], ",", |p| p.to_string());
        assert_eq!(joined, "$1,$2");
        assert_eq!(binder.placeholder("shifts"), "$1,$2");
    }

    #[test]
    fn test_null_param() {
        let mut binder = ParamBinder::new();
        binder.scalar("title", Option::<String>::None);
        let plan = binder.into_plan(String::new());
        assert_eq!(plan.params, vec![PlanParam::Null]);
    }
}
