//! Generic parameter bag shared by URIs and header address values.
//!
//! RFC 3261 parameter lists (`;name=value` / `;name` / `;name="quoted value"`) show up in three
//! places with three different separators: URI parameters (`;`), URI headers (`&` inside the
//! `?...` component), and header parameters (`;` again, after the address or token). Rather than
//! model each shape as its own typed enum, every one of them is an ordered [`ParamBag`] produced
//! by the shared scanner in `parser::params`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An ordered name → value mapping, preserving insertion order and on-the-wire case of names
/// for faithful round-tripping.
///
/// A bare flag parameter (`;lr`) is stored with `value = None`; an explicit empty value
/// (`;foo=`) is stored as `Some(String::new())`. Both serialize back to their original form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamBag {
    entries: Vec<(String, Option<String>)>,
}

impl ParamBag {
    /// An empty parameter bag.
    pub fn new() -> Self {
        ParamBag { entries: Vec::new() }
    }

    /// Appends a parameter, preserving duplicates (the wire form may legally repeat a name;
    /// [`ParamBag::get`] always returns the first occurrence).
    pub fn add(&mut self, name: impl Into<String>, value: Option<String>) {
        self.entries.push((name.into(), value));
    }

    /// Looks up a parameter by case-insensitive name, returning its value (`""` for a present
    /// but empty value, and also for a bare flag — use [`ParamBag::is_flag`] to distinguish).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    /// True if `name` is present with no `=value` at all (a bare flag like `;lr`).
    pub fn is_flag(&self, name: &str) -> bool {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .is_some_and(|(_, v)| v.is_none())
    }

    /// Removes every occurrence of `name`, returning whether anything was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        before != self.entries.len()
    }

    /// Whether `name` occurs at all, regardless of value.
    pub fn has(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Number of parameters, counting duplicates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Writes every parameter preceded by `separator`, quoting values that need it.
    pub fn write(&self, separator: char, out: &mut String) {
        for (name, value) in &self.entries {
            out.push(separator);
            out.push_str(name);
            if let Some(value) = value {
                out.push('=');
                if needs_quoting(value) {
                    out.push('"');
                    escape_quoted(value, out);
                    out.push('"');
                } else {
                    out.push_str(value);
                }
            }
        }
    }
}

impl fmt::Display for ParamBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();
        self.write(';', &mut s);
        write!(f, "{s}")
    }
}

/// True if `value` contains whitespace or a character outside the unreserved `token`/`host`
/// character classes, and so would be ambiguous written unquoted.
fn needs_quoting(value: &str) -> bool {
    value.is_empty()
        || value
            .bytes()
            .any(|b| !(b.is_ascii_alphanumeric() || b"-.!%*_+`'~".contains(&b)))
}

fn escape_quoted(value: &str, out: &mut String) {
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_param_round_trips_without_equals() {
        let mut bag = ParamBag::new();
        bag.add("lr", None);
        assert!(bag.is_flag("lr"));
        assert_eq!(bag.get("lr"), Some(""));
        assert_eq!(bag.to_string(), ";lr");
    }

    #[test]
    fn get_is_case_insensitive_for_names() {
        let mut bag = ParamBag::new();
        bag.add("Branch", Some("z9hG4bK.abc".to_string()));
        assert_eq!(bag.get("branch"), Some("z9hG4bK.abc"));
        assert_eq!(bag.get("BRANCH"), Some("z9hG4bK.abc"));
    }

    #[test]
    fn values_with_whitespace_are_quoted_on_write() {
        let mut bag = ParamBag::new();
        bag.add("foo", Some("a b".to_string()));
        assert_eq!(bag.to_string(), ";foo=\"a b\"");
    }

    #[test]
    fn remove_drops_every_occurrence() {
        let mut bag = ParamBag::new();
        bag.add("a", Some("1".to_string()));
        bag.add("a", Some("2".to_string()));
        bag.add("b", None);
        assert!(bag.remove("a"));
        assert_eq!(bag.len(), 1);
        assert!(!bag.has("a"));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut bag = ParamBag::new();
        bag.add("transport", Some("tcp".to_string()));
        bag.add("lr", None);
        bag.add("maddr", Some("192.0.2.1".to_string()));
        let names: Vec<&str> = bag.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["transport", "lr", "maddr"]);
    }
}
