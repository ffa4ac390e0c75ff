//! Naming variants derived from a single resource name
//!
//! Every identifier in the generated files comes from one [`ResourceName`],
//! so the route, controller, service, repository and test always agree on
//! casing.

use crate::error::{Result, ScaffoldError};
use convert_case::{Case, Casing};

/// Capitalize the first character, keeping the remainder unchanged
///
/// This is not title-casing: `myResource` becomes `MyResource`.
///
/// # Examples
///
/// ```
/// # use layergen::scaffold::naming::upper_first;
/// assert_eq!(upper_first("order"), "Order");
/// assert_eq!(upper_first("myResource"), "MyResource");
/// ```
#[must_use]
pub fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Convert a camelCase word to a kebab-case URL segment
///
/// A hyphen goes before every ASCII uppercase letter, everything is
/// lower-cased, and whitespace or hyphens at either edge are trimmed.
///
/// # Examples
///
/// ```
/// # use layergen::scaffold::naming::to_kebab_case;
/// assert_eq!(to_kebab_case("order"), "order");
/// assert_eq!(to_kebab_case("myResource"), "my-resource");
/// assert_eq!(to_kebab_case("MyResource"), "my-resource");
/// ```
#[must_use]
pub fn to_kebab_case(word: &str) -> String {
    let mut kebab = String::with_capacity(word.len() + 4);
    for c in word.chars() {
        if c.is_ascii_uppercase() {
            kebab.push('-');
        }
        kebab.extend(c.to_lowercase());
    }
    kebab
        .trim_matches(|c: char| c == '-' || c.is_whitespace())
        .to_string()
}

/// Identifier field name for a resource: `id<PascalCase>`
///
/// # Examples
///
/// ```
/// # use layergen::scaffold::naming::id_field;
/// assert_eq!(id_field("order"), "idOrder");
/// ```
#[must_use]
pub fn id_field(word: &str) -> String {
    format!("id{}", upper_first(word))
}

/// A resource name and its derived projections
///
/// Built once per run; all projections are computed at construction and
/// never change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceName {
    raw: String,
    pascal: String,
    kebab: String,
    id_field: String,
    title: String,
}

impl ResourceName {
    /// Build a resource name from a raw word
    ///
    /// No normalization happens beyond rejecting empty input; the word is
    /// expected to be a valid identifier in the target language.
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidName`] if `raw` is empty.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ScaffoldError::InvalidName(raw));
        }

        Ok(Self {
            pascal: upper_first(&raw),
            kebab: to_kebab_case(&raw),
            id_field: id_field(&raw),
            title: raw.to_case(Case::Title),
            raw,
        })
    }

    /// Pick the command-line value when present and non-empty, else `default`
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidName`] if the chosen value is empty.
    pub fn resolve(flag_value: Option<&str>, default: &str) -> Result<Self> {
        let chosen = flag_value.filter(|v| !v.is_empty()).unwrap_or(default);
        Self::parse(chosen)
    }

    /// The name as given, used for variables (`order`, `myResource`)
    #[must_use]
    pub fn camel(&self) -> &str {
        &self.raw
    }

    /// Type identifier form (`Order`, `MyResource`)
    #[must_use]
    pub fn pascal(&self) -> &str {
        &self.pascal
    }

    /// URL segment form (`order`, `my-resource`)
    #[must_use]
    pub fn kebab(&self) -> &str {
        &self.kebab
    }

    /// Path parameter and identifier field (`idOrder`)
    #[must_use]
    pub fn id_field(&self) -> &str {
        &self.id_field
    }

    /// Human-readable words (`My Resource`)
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Route base path (`/my-resource`)
    #[must_use]
    pub fn base_path(&self) -> String {
        format!("/{}", self.kebab)
    }

    /// Identifier of the exported router sub-object (`orderRoutes`)
    #[must_use]
    pub fn routes_ident(&self) -> String {
        format!("{}Routes", self.raw)
    }
}

impl std::fmt::Display for ResourceName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_first() {
        assert_eq!(upper_first("order"), "Order");
        assert_eq!(upper_first("myResource"), "MyResource");
        assert_eq!(upper_first("Order"), "Order");
        assert_eq!(upper_first("a"), "A");
        assert_eq!(upper_first(""), "");
    }

    #[test]
    fn test_upper_first_is_not_title_case() {
        assert_eq!(upper_first("my_resource"), "My_resource");
        assert_eq!(upper_first("myNewResourceName"), "MyNewResourceName");
    }

    #[test]
    fn test_kebab_all_lowercase_is_unchanged() {
        assert_eq!(to_kebab_case("order"), "order");
        assert_eq!(to_kebab_case("order2"), "order2");
    }

    #[test]
    fn test_kebab_splits_on_uppercase() {
        assert_eq!(to_kebab_case("myResource"), "my-resource");
        assert_eq!(to_kebab_case("myNewResourceName"), "my-new-resource-name");
        assert_eq!(to_kebab_case("userURL"), "user-u-r-l");
    }

    #[test]
    fn test_kebab_trims_edges() {
        assert_eq!(to_kebab_case("Order"), "order");
        assert_eq!(to_kebab_case(" order "), "order");
    }

    #[test]
    fn test_id_field() {
        assert_eq!(id_field("order"), "idOrder");
        assert_eq!(id_field("myResource"), "idMyResource");
    }

    #[test]
    fn test_parse_derives_every_projection() {
        let name = ResourceName::parse("myResource").unwrap();
        assert_eq!(name.camel(), "myResource");
        assert_eq!(name.pascal(), "MyResource");
        assert_eq!(name.kebab(), "my-resource");
        assert_eq!(name.id_field(), "idMyResource");
        assert_eq!(name.title(), "My Resource");
        assert_eq!(name.base_path(), "/my-resource");
        assert_eq!(name.routes_ident(), "myResourceRoutes");
        assert_eq!(name.to_string(), "myResource");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(matches!(
            ResourceName::parse(""),
            Err(ScaffoldError::InvalidName(_))
        ));
    }

    #[test]
    fn test_resolve_prefers_flag_value() {
        let name = ResourceName::resolve(Some("order"), "myNewResourceName").unwrap();
        assert_eq!(name.camel(), "order");
    }

    #[test]
    fn test_resolve_falls_back_to_default() {
        let name = ResourceName::resolve(None, "myNewResourceName").unwrap();
        assert_eq!(name.pascal(), "MyNewResourceName");

        let name = ResourceName::resolve(Some(""), "myNewResourceName").unwrap();
        assert_eq!(name.camel(), "myNewResourceName");
    }

    #[test]
    fn test_resolve_with_empty_default_fails() {
        assert!(ResourceName::resolve(None, "").is_err());
    }
}
