//! Per-step field schemas and validation rules.
//!
//! Each step owns a flat list of field rules. Validation is a pure
//! function over a field set: rules either pass or yield a [`FieldError`]
//! for the offending field, and every failing field is reported in one
//! pass. The only cross-field rule in the wizard is the contact step's
//! email confirmation match.

use crate::wizard::domain::fields::{FieldError, StepData};
use crate::wizard::domain::step::WizardStep;
use chrono::NaiveDate;

/// Format constraint applied to a field once it has a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// Any non-blank text.
    Text,
    /// A plausible email address.
    Email,
    /// An ISO `YYYY-MM-DD` calendar date.
    Date,
    /// A phone number: optional leading `+`, at least seven digits.
    Phone,
    /// A four-digit year.
    Year,
    /// A checkbox that must be ticked, serialized as `"true"`.
    Accepted,
}

/// One field's rule within a step schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Schema field name, as used in [`StepData`].
    pub name: &'static str,
    /// Whether a value must be present.
    pub required: bool,
    /// Format checked when a value is present.
    pub format: FieldFormat,
}

const fn required(name: &'static str, format: FieldFormat) -> FieldRule {
    FieldRule {
        name,
        required: true,
        format,
    }
}

const fn optional(name: &'static str, format: FieldFormat) -> FieldRule {
    FieldRule {
        name,
        required: false,
        format,
    }
}

const PERSONAL_DETAILS_RULES: &[FieldRule] = &[
    required("first_name", FieldFormat::Text),
    required("last_name", FieldFormat::Text),
    required("date_of_birth", FieldFormat::Date),
    optional("gender", FieldFormat::Text),
    required("nationality", FieldFormat::Text),
];

const ADDRESS_RULES: &[FieldRule] = &[
    required("address_line_one", FieldFormat::Text),
    optional("address_line_two", FieldFormat::Text),
    required("city", FieldFormat::Text),
    optional("state", FieldFormat::Text),
    required("postcode", FieldFormat::Text),
    required("country", FieldFormat::Text),
];

const COURSE_DETAILS_RULES: &[FieldRule] = &[
    required("institution", FieldFormat::Text),
    required("course_name", FieldFormat::Text),
    required("intake_date", FieldFormat::Date),
    optional("course_level", FieldFormat::Text),
];

const CONTACT_RULES: &[FieldRule] = &[
    required("email", FieldFormat::Email),
    required("confirm_email", FieldFormat::Email),
    required("phone", FieldFormat::Phone),
    optional("alternate_phone", FieldFormat::Phone),
];

const EDUCATION_RULES: &[FieldRule] = &[
    required("highest_qualification", FieldFormat::Text),
    required("institution_name", FieldFormat::Text),
    required("year_completed", FieldFormat::Year),
    optional("grade", FieldFormat::Text),
];

const EMPLOYMENT_RULES: &[FieldRule] = &[
    required("currently_employed", FieldFormat::Text),
    optional("employer", FieldFormat::Text),
    optional("job_title", FieldFormat::Text),
];

const COMPLIANCE_RULES: &[FieldRule] = &[
    required("visa_status", FieldFormat::Text),
    required("criminal_record_declared", FieldFormat::Text),
    optional("health_cover_provider", FieldFormat::Text),
];

const DOCUMENTS_RULES: &[FieldRule] = &[
    required("passport_document", FieldFormat::Text),
    required("transcript_document", FieldFormat::Text),
    optional("english_test_document", FieldFormat::Text),
];

const TERMS_AND_SUBMIT_RULES: &[FieldRule] = &[required("accepted_terms", FieldFormat::Accepted)];

/// Returns the field schema for a step.
#[must_use]
pub const fn schema_for(step: WizardStep) -> &'static [FieldRule] {
    match step {
        WizardStep::PersonalDetails => PERSONAL_DETAILS_RULES,
        WizardStep::Address => ADDRESS_RULES,
        WizardStep::CourseDetails => COURSE_DETAILS_RULES,
        WizardStep::Contact => CONTACT_RULES,
        WizardStep::Education => EDUCATION_RULES,
        WizardStep::Employment => EMPLOYMENT_RULES,
        WizardStep::Compliance => COMPLIANCE_RULES,
        WizardStep::Documents => DOCUMENTS_RULES,
        WizardStep::TermsAndSubmit => TERMS_AND_SUBMIT_RULES,
    }
}

/// Validates a field set against a step's schema.
///
/// # Errors
///
/// Returns every failing field's [`FieldError`], in schema order, with the
/// contact step's email confirmation mismatch appended last.
pub fn validate_step(step: WizardStep, data: &StepData) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    for rule in schema_for(step) {
        match data.value(rule.name) {
            None if rule.required => {
                errors.push(FieldError::new(rule.name, "This field is required"));
            }
            None => {}
            Some(value) => {
                if let Some(message) = format_violation(rule.format, value) {
                    errors.push(FieldError::new(rule.name, message));
                }
            }
        }
    }

    if step == WizardStep::Contact
        && let (Some(email), Some(confirmation)) = (data.value("email"), data.value("confirm_email"))
        && email != confirmation
    {
        errors.push(FieldError::new(
            "confirm_email",
            "Email confirmation does not match",
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn format_violation(format: FieldFormat, value: &str) -> Option<&'static str> {
    match format {
        FieldFormat::Text => None,
        FieldFormat::Email => (!is_plausible_email(value)).then_some("Enter a valid email address"),
        FieldFormat::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .is_err()
            .then_some("Enter a date as YYYY-MM-DD"),
        FieldFormat::Phone => (!is_plausible_phone(value)).then_some("Enter a valid phone number"),
        FieldFormat::Year => {
            (value.len() != 4 || !value.chars().all(|c| c.is_ascii_digit()))
                .then_some("Enter a four-digit year")
        }
        FieldFormat::Accepted => (value != "true").then_some("You must accept the terms"),
    }
}

fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn is_plausible_phone(value: &str) -> bool {
    let digits = value.chars().filter(char::is_ascii_digit).count();
    let allowed = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
    allowed && digits >= 7
}
