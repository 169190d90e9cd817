use leadflow_protocol::defaults::CONVERTED_STATUS;
use leadflow_protocol::{LeadField, LeadRecord, ValidationConfig, ValidationResult};

use crate::rules;

/// Validates lead records against the field and cross-field rules.
///
/// Immutable after construction: `validate` takes `&self` and returns a fresh
/// result, so one validator can be shared freely across records and threads.
#[derive(Debug, Clone)]
pub struct LeadValidator {
    allowed_industries: Vec<String>,
    valid_statuses: Vec<String>,
    industry_message: String,
    status_message: String,
}

impl Default for LeadValidator {
    fn default() -> Self {
        Self::new(&ValidationConfig::default())
    }
}

impl LeadValidator {
    pub fn new(config: &ValidationConfig) -> Self {
        Self {
            industry_message: rules::one_of_message("Industry", &config.allowed_industries),
            status_message: rules::one_of_message("Status", &config.valid_statuses),
            allowed_industries: config.allowed_industries.clone(),
            valid_statuses: config.valid_statuses.clone(),
        }
    }

    /// Run every rule against `record` and collect all violations.
    pub fn validate(&self, record: &LeadRecord) -> ValidationResult {
        let mut messages = Vec::new();

        rules::check_company_name(record.value(LeadField::CompanyName), &mut messages);
        rules::check_email(record.value(LeadField::Email), &mut messages);
        rules::check_one_of(
            record.value(LeadField::Industry),
            &self.allowed_industries,
            &self.industry_message,
            &mut messages,
        );
        rules::check_one_of(
            record.value(LeadField::Status),
            &self.valid_statuses,
            &self.status_message,
            &mut messages,
        );
        rules::check_phone(record.value(LeadField::PhoneNum), &mut messages);
        rules::check_website(record.value(LeadField::Website), &mut messages);
        rules::check_converted_contact(
            record.value(LeadField::Status),
            record.value(LeadField::ContactPerson),
            CONVERTED_STATUS,
            &mut messages,
        );

        ValidationResult::from_messages(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::*;

    fn lead(company: &str, email: &str) -> LeadRecord {
        LeadRecord::new()
            .with(LeadField::CompanyName, company)
            .with(LeadField::Email, email)
    }

    #[test]
    fn test_minimal_record_is_valid() {
        let validator = LeadValidator::default();
        let result = validator.validate(&lead("Acme", "a@acme.com"));
        assert!(result.is_valid(), "unexpected: {:?}", result.messages());
    }

    #[test]
    fn test_fully_populated_record_is_valid() {
        let validator = LeadValidator::default();
        let record = lead("Acme Corp", "sales@acme.com")
            .with(LeadField::ContactPerson, "Jane Doe")
            .with(LeadField::Industry, "Technology")
            .with(LeadField::Status, "Converted")
            .with(LeadField::PhoneNum, "(555) 123-4567")
            .with(LeadField::Website, "https://acme.com");
        assert!(validator.validate(&record).is_valid());
    }

    #[test]
    fn test_empty_record_reports_both_required_fields() {
        let validator = LeadValidator::default();
        let result = validator.validate(&LeadRecord::new());
        assert_eq!(result.messages(), [COMPANY_NAME_REQUIRED, EMAIL_REQUIRED]);
    }

    #[test]
    fn test_blank_company_name_reports_only_required() {
        let validator = LeadValidator::default();
        let result = validator.validate(&lead("", "a@acme.com"));
        assert!(result.contains(COMPANY_NAME_REQUIRED));
        assert_eq!(
            result
                .messages()
                .iter()
                .filter(|m| m.starts_with("Company name"))
                .count(),
            1
        );
    }

    #[test]
    fn test_bad_email_is_single_violation() {
        let validator = LeadValidator::default();
        let result = validator.validate(&lead("Acme", "not-an-email"));
        assert_eq!(result.messages(), [EMAIL_INVALID]);
    }

    #[test]
    fn test_bad_industry_names_allowed_values() {
        let validator = LeadValidator::default();
        let result = validator.validate(&lead("Acme", "a@acme.com").with(LeadField::Industry, "Bogus"));
        assert_eq!(result.messages().len(), 1);
        assert_eq!(
            result.messages()[0],
            "Industry must be one of: Technology, Healthcare, Finance, Manufacturing, Retail, Education, Other"
        );
    }

    #[test]
    fn test_blank_industry_is_lenient() {
        let validator = LeadValidator::default();
        let result = validator.validate(&lead("Acme", "a@acme.com").with(LeadField::Industry, ""));
        assert!(result.is_valid());
    }

    #[test]
    fn test_cross_field_fires_regardless_of_email() {
        let validator = LeadValidator::default();

        let record = lead("Acme", "a@b.com")
            .with(LeadField::Status, "Converted")
            .with(LeadField::ContactPerson, "");
        assert_eq!(validator.validate(&record).messages(), [CONVERTED_WITHOUT_CONTACT]);

        // Absent contact column counts as empty
        let record = lead("Acme", "broken").with(LeadField::Status, "Converted");
        let result = validator.validate(&record);
        assert_eq!(result.messages(), [EMAIL_INVALID, CONVERTED_WITHOUT_CONTACT]);
    }

    #[test]
    fn test_violations_follow_rule_order() {
        let validator = LeadValidator::default();
        let record = LeadRecord::new()
            .with(LeadField::CompanyName, "X")
            .with(LeadField::Email, "nope")
            .with(LeadField::Industry, "Bogus")
            .with(LeadField::Status, "Pending")
            .with(LeadField::PhoneNum, "12")
            .with(LeadField::Website, "www.acme.com");
        let result = validator.validate(&record);
        let messages = result.messages();
        assert_eq!(messages.len(), 6);
        assert_eq!(messages[0], COMPANY_NAME_TOO_SHORT);
        assert_eq!(messages[1], EMAIL_INVALID);
        assert!(messages[2].starts_with("Industry must be one of"));
        assert!(messages[3].starts_with("Status must be one of"));
        assert_eq!(messages[4], PHONE_INVALID);
        assert_eq!(messages[5], WEBSITE_SCHEME);
    }

    #[test]
    fn test_validation_is_stateless() {
        let validator = LeadValidator::default();
        let bad = LeadRecord::new();
        let good = lead("Acme", "a@acme.com");

        let first = validator.validate(&good);
        let _ = validator.validate(&bad);
        let second = validator.validate(&good);
        assert_eq!(first, second);
        assert!(second.is_valid());
    }

    #[test]
    fn test_configured_value_sets() {
        let config = ValidationConfig {
            allowed_industries: vec!["Energy".to_string()],
            valid_statuses: vec!["Open".to_string(), "Closed".to_string()],
        };
        let validator = LeadValidator::new(&config);

        let ok = lead("Acme", "a@acme.com")
            .with(LeadField::Industry, "Energy")
            .with(LeadField::Status, "Open");
        assert!(validator.validate(&ok).is_valid());

        let bad = lead("Acme", "a@acme.com").with(LeadField::Status, "New");
        assert_eq!(
            validator.validate(&bad).messages(),
            ["Status must be one of: Open, Closed"]
        );
    }
}
