//! Stock field validators.
//!
//! Messages are the bare predicate ("can't be blank"); the rule engine
//! prepends the humanized field name when it renders full messages.

use crate::{
    naming,
    traits::{FieldValues, Validator},
    value::Value,
    visitor::VisitorContext,
};

const NOT_A_NUMBER: &str = "is not a number";

// ============================================================================
// Presence
// ============================================================================

///
/// Presence
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Presence;

impl Validator for Presence {
    fn kind(&self) -> &'static str {
        "presence"
    }

    fn validate(&self, value: &Value, ctx: &mut dyn VisitorContext) {
        if value.is_blank() {
            ctx.issue("can't be blank");
        }
    }
}

///
/// Absence
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Absence;

impl Validator for Absence {
    fn kind(&self) -> &'static str {
        "absence"
    }

    fn validate(&self, value: &Value, ctx: &mut dyn VisitorContext) {
        if !value.is_blank() {
            ctx.issue("must be blank");
        }
    }
}

// ============================================================================
// Numericality
// ============================================================================

///
/// Equal
///

#[derive(Clone, Copy, Debug)]
pub struct Equal {
    pub target: i64,
}

impl Equal {
    #[must_use]
    pub const fn new(target: i64) -> Self {
        Self { target }
    }
}

impl Validator for Equal {
    fn kind(&self) -> &'static str {
        "numericality"
    }

    #[expect(clippy::cast_precision_loss)]
    fn validate(&self, value: &Value, ctx: &mut dyn VisitorContext) {
        match value.as_f64() {
            None => ctx.issue(NOT_A_NUMBER),
            Some(v) if (v - self.target as f64).abs() > f64::EPSILON => {
                ctx.issue(format!("must be equal to {}", self.target));
            }
            Some(_) => {}
        }
    }
}

///
/// Range
/// Inclusive numeric bounds.
///

#[derive(Clone, Copy, Debug)]
pub struct Range {
    pub min: i64,
    pub max: i64,
}

impl Range {
    #[must_use]
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }
}

impl Validator for Range {
    fn kind(&self) -> &'static str {
        "numericality"
    }

    #[expect(clippy::cast_precision_loss)]
    fn validate(&self, value: &Value, ctx: &mut dyn VisitorContext) {
        let Some(v) = value.as_f64() else {
            ctx.issue(NOT_A_NUMBER);
            return;
        };

        if v < self.min as f64 {
            ctx.issue(format!("must be greater than or equal to {}", self.min));
        } else if v > self.max as f64 {
            ctx.issue(format!("must be less than or equal to {}", self.max));
        }
    }
}

// ============================================================================
// Length
// ============================================================================

///
/// Len
/// Character count for text, item count for collections; null counts as 0.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Len {
    pub min: Option<usize>,
    pub max: Option<usize>,
}

impl Len {
    #[must_use]
    pub const fn max(max: usize) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    #[must_use]
    pub const fn min(min: usize) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }
}

impl Validator for Len {
    fn kind(&self) -> &'static str {
        "length"
    }

    fn validate(&self, value: &Value, ctx: &mut dyn VisitorContext) {
        let len = if value.is_null() {
            0
        } else {
            value.len().unwrap_or_else(|| value.to_string().chars().count())
        };

        if let Some(min) = self.min
            && len < min
        {
            ctx.issue(format!("is too short (minimum is {min} characters)"));
        }

        if let Some(max) = self.max
            && len > max
        {
            ctx.issue(format!("is too long (maximum is {max} characters)"));
        }
    }
}

// ============================================================================
// Inclusion
// ============================================================================

///
/// OneOf
///

#[derive(Clone, Copy, Debug)]
pub struct OneOf {
    pub values: &'static [&'static str],
}

impl Validator for OneOf {
    fn kind(&self) -> &'static str {
        "inclusion"
    }

    fn validate(&self, value: &Value, ctx: &mut dyn VisitorContext) {
        let rendered = value.to_string();

        if value.is_null() || !self.values.contains(&rendered.as_str()) {
            ctx.issue("is not included in the list");
        }
    }
}

// ============================================================================
// Confirmation
// ============================================================================

///
/// Matches
///
/// Cross-field rule: the field must equal `other` on the same record.
/// A null field is not checked.
///

#[derive(Clone, Copy, Debug)]
pub struct Matches {
    pub other: &'static str,
}

impl Validator for Matches {
    fn kind(&self) -> &'static str {
        "confirmation"
    }

    // needs the whole record; see validate_record
    fn validate(&self, _: &Value, _: &mut dyn VisitorContext) {}

    fn validate_record(
        &self,
        field: &str,
        record: &dyn FieldValues,
        ctx: &mut dyn VisitorContext,
    ) {
        let value = record.get_value(field).unwrap_or_default();
        if value.is_null() {
            return;
        }

        let other = record.get_value(self.other).unwrap_or_default();
        if value != other {
            ctx.issue(format!("doesn't match {}", naming::humanize(self.other)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::IssueList;

    fn check(validator: &dyn Validator, value: impl Into<Value>) -> Vec<String> {
        let mut issues = IssueList::new();
        validator.validate(&value.into(), &mut issues);

        issues.messages().map(str::to_string).collect()
    }

    #[test]
    fn presence_rejects_blank() {
        assert_eq!(check(&Presence, Value::Null), ["can't be blank"]);
        assert_eq!(check(&Presence, " "), ["can't be blank"]);
        assert!(check(&Presence, "car").is_empty());
        assert!(check(&Presence, 0_i64).is_empty());
    }

    #[test]
    fn absence_rejects_present() {
        assert_eq!(check(&Absence, "x"), ["must be blank"]);
        assert!(check(&Absence, Value::Null).is_empty());
    }

    #[test]
    fn equal_requires_a_number() {
        let four = Equal::new(4);

        assert!(check(&four, 4_i64).is_empty());
        assert!(check(&four, "4").is_empty());
        assert_eq!(check(&four, 3_i64), ["must be equal to 4"]);
        assert_eq!(check(&four, Value::Null), ["is not a number"]);
        assert_eq!(check(&four, "four"), ["is not a number"]);
    }

    #[test]
    fn range_is_inclusive() {
        let range = Range::new(1, 10);

        assert!(check(&range, 1_i64).is_empty());
        assert!(check(&range, 10_u64).is_empty());
        assert_eq!(check(&range, 0_i64), ["must be greater than or equal to 1"]);
        assert_eq!(check(&range, 11_i64), ["must be less than or equal to 10"]);
    }

    #[test]
    fn len_counts_characters() {
        let len = Len {
            min: Some(2),
            max: Some(4),
        };

        assert!(check(&len, "abc").is_empty());
        assert_eq!(check(&len, "a"), ["is too short (minimum is 2 characters)"]);
        assert_eq!(check(&len, "abcde"), ["is too long (maximum is 4 characters)"]);
        assert_eq!(
            check(&len, Value::Null),
            ["is too short (minimum is 2 characters)"]
        );
        assert!(check(&Len::max(3), "äöü").is_empty());
    }

    #[test]
    fn one_of_matches_rendered_value() {
        let kinds = OneOf {
            values: &["car", "truck"],
        };

        assert!(check(&kinds, "car").is_empty());
        assert_eq!(check(&kinds, "boat"), ["is not included in the list"]);
        assert_eq!(check(&kinds, Value::Null), ["is not included in the list"]);
    }
}
