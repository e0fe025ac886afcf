//! Identifier casing helpers used to derive substitution values.

use heck::{ToKebabCase, ToUpperCamelCase};
use inflector::string::pluralize::to_plural;

/// `customer-order` → `CustomerOrder`
pub fn upper_camel(input: &str) -> String {
    input.to_upper_camel_case()
}

/// `CustomerOrders` → `customer-orders`
pub fn kebab(input: &str) -> String {
    input.to_kebab_case()
}

/// Replace anything that is not ASCII alphanumeric with `_`.
pub fn identifier(input: &str) -> String {
    input
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// English plural, irregular nouns included (`person` → `people`).
pub fn pluralize(word: &str) -> String {
    to_plural(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_camel_handles_separators() {
        assert_eq!(upper_camel("customer-order"), "CustomerOrder");
        assert_eq!(upper_camel("customer_order"), "CustomerOrder");
        assert_eq!(upper_camel("admin"), "Admin");
    }

    #[test]
    fn kebab_splits_words() {
        assert_eq!(kebab("customer_orders"), "customer-orders");
        assert_eq!(kebab("CustomerOrders"), "customer-orders");
    }

    #[test]
    fn identifier_replaces_punctuation() {
        assert_eq!(identifier("customer-order"), "customer_order");
    }

    #[test]
    fn pluralize_regular_nouns() {
        assert_eq!(pluralize("customer"), "customers");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("branch"), "branches");
        assert_eq!(pluralize("order_item"), "order_items");
    }

    #[test]
    fn pluralize_irregular_nouns() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("child"), "children");
    }
}
