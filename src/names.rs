//! Display names for dotted identifiers.
//!
//! `Collection.prototype.find` is shown as `*collection*.find`, the way an
//! instance method is called; `Foo.bar` stays `*Foo*.bar`.

/// Scope breakdown of a dotted identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    /// Heading text, e.g. `*collection*.find`
    pub pretty_name: String,
    /// Owning scopes with `prototype` removed
    pub class_names: Vec<String>,
    /// Member name: the final segment
    pub member: String,
    pub is_prototype_member: bool,
}

impl ResolvedName {
    /// True when the identifier has no owning class.
    pub fn is_empty(&self) -> bool {
        self.class_names.is_empty()
    }
}

/// Resolve `dotted` into its display form. Remote methods show
/// `Meteor.method:` followed by the scope part alone, without the member.
pub fn resolve_name(dotted: &str, is_remote: bool) -> ResolvedName {
    let scopes: Vec<&str> = dotted.split('.').collect();
    let (member, scopes) = match scopes.split_last() {
        Some((last, rest)) => (*last, rest),
        None => (dotted, &[][..]),
    };
    let is_prototype_member = scopes.last().is_some_and(|s| *s == "prototype");

    let mut pretty = String::new();
    let mut class_names = Vec::new();
    for (i, scope) in scopes.iter().enumerate() {
        if *scope == "prototype" {
            continue;
        }
        if !is_prototype_member {
            pretty.push_str(scope);
        } else if i == 0 {
            pretty.push_str(&scope.to_lowercase());
        } else {
            pretty.push_str(&title_tail(scope));
        }
        class_names.push(scope.to_string());
    }

    // Remote methods are named by their owning scopes only
    let pretty_name = if is_remote {
        format!("Meteor.method:{}", pretty)
    } else if pretty.is_empty() {
        dotted.to_string()
    } else {
        format!("*{}*.{}", pretty, member)
    };

    ResolvedName {
        pretty_name,
        class_names,
        member: member.to_string(),
        is_prototype_member,
    }
}

/// Keep the first character, lower-case the rest: `ObjectID` → `Objectid`.
fn title_tail(scope: &str) -> String {
    let mut chars = scope.chars();
    match chars.next() {
        Some(first) => first.to_string() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_unchanged() {
        let r = resolve_name("publish", false);
        assert_eq!(r.pretty_name, "publish");
        assert!(r.is_empty());
        assert!(!r.is_prototype_member);
        assert_eq!(r.member, "publish");
    }

    #[test]
    fn static_member() {
        let r = resolve_name("Meteor.Collection", false);
        assert_eq!(r.pretty_name, "*Meteor*.Collection");
        assert_eq!(r.class_names, vec!["Meteor"]);
    }

    #[test]
    fn prototype_member() {
        let r = resolve_name("Collection.prototype.find", false);
        assert!(r.is_prototype_member);
        assert_eq!(r.pretty_name, "*collection*.find");
        assert_eq!(r.class_names, vec!["Collection"]);
    }

    #[test]
    fn nested_prototype_member_casing() {
        let r = resolve_name("Meteor.ObjectID.prototype.toHexString", false);
        assert_eq!(r.pretty_name, "*meteorObjectid*.toHexString");
        assert_eq!(r.class_names, vec!["Meteor", "ObjectID"]);
    }

    #[test]
    fn remote_prefix() {
        let r = resolve_name("Accounts.login", true);
        assert_eq!(r.pretty_name, "Meteor.method:Accounts");
        assert_eq!(r.member, "login");
        assert_eq!(
            resolve_name("Foo.prototype.bar", true).pretty_name,
            "Meteor.method:foo"
        );
    }

    #[test]
    fn remote_bare_name_has_no_scope() {
        let r = resolve_name("login", true);
        assert_eq!(r.pretty_name, "Meteor.method:");
        assert!(r.is_empty());
    }

    #[test]
    fn empty_name_falls_back() {
        let r = resolve_name("", false);
        assert_eq!(r.pretty_name, "");
        assert!(r.is_empty());
    }

    #[test]
    fn lone_prototype_scope() {
        let r = resolve_name("prototype.foo", false);
        assert!(r.is_prototype_member);
        assert_eq!(r.pretty_name, "prototype.foo");
    }
}
