use std::fmt;

use serde_json::Value;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use super::{DomainError, SubstitutionMap, naming};

/// A dotted `<domain>.<entity>` argument such as `admin.customer-order`.
///
/// The last fragment is the entity, the rest form the domain path. Accented
/// letters lose their diacritics (`josé` → `jose`), then fragments keep only
/// ASCII alphanumerics, `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainName {
    domain: Vec<String>,
    entity: String,
}

impl DomainName {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidDomain {
            input: input.to_owned(),
            reason: reason.to_owned(),
        };

        let mut fragments: Vec<String> = input.trim().split('.').map(sanitize).collect();
        if fragments.len() < 2 {
            return Err(invalid("expected at least <domain>.<entity>"));
        }
        if fragments.iter().any(String::is_empty) {
            return Err(invalid("fragments must not be empty"));
        }

        let entity = fragments.pop().ok_or_else(|| invalid("missing entity"))?;
        Ok(Self {
            domain: fragments,
            entity,
        })
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// `Admin/Sales`
    pub fn domain_path(&self) -> String {
        self.camel_fragments().join("/")
    }

    /// `CustomerOrder`
    pub fn entity_name(&self) -> String {
        naming::upper_camel(&self.entity)
    }

    fn camel_fragments(&self) -> Vec<String> {
        self.domain.iter().map(|f| naming::upper_camel(f)).collect()
    }

    /// Substitutions every job of one invocation shares.
    pub fn substitutions(&self, parameters: Value) -> SubstitutionMap {
        let camel = self.camel_fragments();
        let lower: Vec<String> = self.domain.iter().map(|f| f.to_lowercase()).collect();

        SubstitutionMap::named()
            .with("entity", self.entity_name())
            .with("entity.lower", self.entity.to_lowercase())
            .with("domain", camel.join("/"))
            .with("domain.lower", lower.join("/"))
            .with("domain.dotted", lower.join("."))
            .with("namespace", camel.join("\\"))
            .with("parameters", parameters)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.domain.join("."), self.entity)
    }
}

fn sanitize(fragment: &str) -> String {
    fragment
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect()
}
