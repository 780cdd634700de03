//! Field-level validation evaluated at write time.
//!
//! Rules are declarative (rule, message) pairs attached to fields by the
//! model modules. All violations for a single write are collected and joined
//! into one message instead of failing on the first.

use crate::error::ApiError;

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    NotEmpty,
    Length { min: usize, max: usize },
    OneOf(&'static [&'static str]),
    Email,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub rule: Rule,
    pub message: &'static str,
}

/// Accumulates rule violations across the fields of one write.
#[derive(Debug, Default)]
pub struct Violations {
    messages: Vec<String>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a field's rules to its submitted value. Absent fields are
    /// skipped so partial updates only validate what they carry.
    pub fn check(&mut self, value: Option<&str>, rules: &[FieldRule]) -> &mut Self {
        let Some(value) = value else {
            return self;
        };

        for field_rule in rules {
            if !passes(value, field_rule.rule) {
                self.messages.push(field_rule.message.to_string());
            }
        }

        self
    }

    pub fn into_result(self) -> Result<(), ApiError> {
        if self.messages.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(self.messages.join(", ")))
        }
    }
}

fn passes(value: &str, rule: Rule) -> bool {
    match rule {
        Rule::NotEmpty => !value.trim().is_empty(),
        Rule::Length { min, max } => {
            let len = value.chars().count();
            len >= min && len <= max
        }
        Rule::OneOf(allowed) => allowed.iter().any(|candidate| *candidate == value),
        Rule::Email => is_email(value),
    }
}

/// Syntactic email check: a single `@` with a non-empty local part and a
/// dotted domain, no whitespace.
fn is_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    match domain.split_once('.') {
        Some((host, rest)) => !host.is_empty() && !rest.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME_RULES: &[FieldRule] = &[
        FieldRule {
            rule: Rule::NotEmpty,
            message: "Name is required",
        },
        FieldRule {
            rule: Rule::Length { min: 2, max: 100 },
            message: "Name must be between 2 and 100 characters",
        },
    ];

    const STATUS_RULES: &[FieldRule] = &[FieldRule {
        rule: Rule::OneOf(&["Pending", "In Progress", "Completed"]),
        message: "Status must be: Pending, In Progress, or Completed",
    }];

    const EMAIL_RULES: &[FieldRule] = &[FieldRule {
        rule: Rule::Email,
        message: "Please provide a valid email address",
    }];

    fn violations_for(value: Option<&str>, rules: &[FieldRule]) -> Result<(), ApiError> {
        let mut violations = Violations::new();
        violations.check(value, rules);
        violations.into_result()
    }

    #[test]
    fn absent_fields_are_skipped() {
        assert!(violations_for(None, NAME_RULES).is_ok());
    }

    #[test]
    fn length_bounds_are_inclusive() {
        let exactly_max = "x".repeat(100);
        let over_max = "x".repeat(101);

        assert!(violations_for(Some("ab"), NAME_RULES).is_ok());
        assert!(violations_for(Some(exactly_max.as_str()), NAME_RULES).is_ok());
        assert!(violations_for(Some("a"), NAME_RULES).is_err());
        assert!(violations_for(Some(over_max.as_str()), NAME_RULES).is_err());
    }

    #[test]
    fn enum_membership_is_exact() {
        assert!(violations_for(Some("In Progress"), STATUS_RULES).is_ok());
        assert!(violations_for(Some("in progress"), STATUS_RULES).is_err());
        assert!(violations_for(Some("Done"), STATUS_RULES).is_err());
    }

    #[test]
    fn email_shapes() {
        assert!(violations_for(Some("alice@company.com"), EMAIL_RULES).is_ok());
        assert!(violations_for(Some("a@b.co"), EMAIL_RULES).is_ok());
        assert!(violations_for(Some("not-an-email"), EMAIL_RULES).is_err());
        assert!(violations_for(Some("@company.com"), EMAIL_RULES).is_err());
        assert!(violations_for(Some("alice@company"), EMAIL_RULES).is_err());
        assert!(violations_for(Some("al ice@company.com"), EMAIL_RULES).is_err());
        assert!(violations_for(Some("alice@@company.com"), EMAIL_RULES).is_err());
    }

    #[test]
    fn all_violations_are_collected_and_joined() {
        let mut violations = Violations::new();
        violations.check(Some(""), NAME_RULES);
        violations.check(Some("Done"), STATUS_RULES);

        let err = violations.into_result().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Name is required"));
        assert!(message.contains("Status must be: Pending, In Progress, or Completed"));
    }
}
