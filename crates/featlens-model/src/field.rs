//! Ordered field resolution.
//!
//! Feed exports are not uniform: the same concept may be carried by one of
//! several fields depending on the schema that produced the export. A
//! [`FieldChain`] lists the candidate fields in priority order and resolves
//! to the first one present.

use std::fmt;

/// Accessor for a single optional numeric field.
pub type FieldAccessor<T> = fn(&T) -> Option<f64>;

/// Ordered list of named accessors tried in sequence.
pub struct FieldChain<T: 'static> {
    name: &'static str,
    fields: &'static [(&'static str, FieldAccessor<T>)],
}

/// A value resolved through a [`FieldChain`], with the field that supplied it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedField {
    pub field: &'static str,
    pub value: f64,
}

impl<T: 'static> FieldChain<T> {
    #[must_use]
    pub const fn new(
        name: &'static str,
        fields: &'static [(&'static str, FieldAccessor<T>)],
    ) -> Self {
        Self { name, fields }
    }

    /// Name of the concept the chain resolves (used in messages).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Candidate field names in priority order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// Returns the first defined value.
    #[must_use]
    pub fn resolve(&self, record: &T) -> Option<f64> {
        self.resolve_named(record).map(|resolved| resolved.value)
    }

    /// Returns the first defined value together with the field it came from.
    #[must_use]
    pub fn resolve_named(&self, record: &T) -> Option<ResolvedField> {
        self.fields.iter().find_map(|&(field, get)| {
            get(record).map(|value| ResolvedField { field, value })
        })
    }
}

impl<T: 'static> fmt::Debug for FieldChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldChain")
            .field("name", &self.name)
            .field("fields", &self.field_names().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Record {
        primary: Option<f64>,
        secondary: Option<f64>,
    }

    fn primary(record: &Record) -> Option<f64> {
        record.primary
    }

    fn secondary(record: &Record) -> Option<f64> {
        record.secondary
    }

    const FIELDS: &[(&str, FieldAccessor<Record>)] =
        &[("primary", primary), ("secondary", secondary)];
    const CHAIN: FieldChain<Record> = FieldChain::new("value", FIELDS);

    #[test]
    fn test_first_defined_field_wins() {
        let record = Record {
            primary: Some(1.0),
            secondary: Some(2.0),
        };
        assert_eq!(
            CHAIN.resolve_named(&record),
            Some(ResolvedField {
                field: "primary",
                value: 1.0
            })
        );
    }

    #[test]
    fn test_falls_back_in_order() {
        let record = Record {
            primary: None,
            secondary: Some(2.0),
        };
        let resolved = CHAIN.resolve_named(&record).unwrap();
        assert_eq!(resolved.field, "secondary");
        assert_eq!(resolved.value, 2.0);
    }

    #[test]
    fn test_all_missing_is_none() {
        let record = Record {
            primary: None,
            secondary: None,
        };
        assert_eq!(CHAIN.resolve(&record), None);
        assert_eq!(
            CHAIN.field_names().collect::<Vec<_>>(),
            ["primary", "secondary"]
        );
    }
}
