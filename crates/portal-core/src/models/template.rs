use serde::{Deserialize, Serialize};

/// Identifies one of the five editable template fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateField {
    Subject,
    Greeting,
    Intro,
    Action,
    Closing,
}

/// The free-text fields of the outbound email.
///
/// Serializes with exactly these field names; the backend's
/// `process-emails` endpoint expects them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailTemplate {
    pub subject: String,
    pub greeting: String,
    pub intro: String,
    pub action: String,
    pub closing: String,
}

impl Default for EmailTemplate {
    fn default() -> Self {
        Self {
            subject: "Training Tasks Update".to_string(),
            greeting: "Dear Team Leader,".to_string(),
            intro: "This is a reminder about pending training tasks in your team:".to_string(),
            action: "Please ensure your team completes any pending or past due tasks by this Friday."
                .to_string(),
            closing: "Best regards,\nHR Team".to_string(),
        }
    }
}

impl EmailTemplate {
    /// Replace a single field, leaving the others untouched.
    pub fn set_field(&mut self, field: TemplateField, value: impl Into<String>) {
        let value = value.into();
        match field {
            TemplateField::Subject => self.subject = value,
            TemplateField::Greeting => self.greeting = value,
            TemplateField::Intro => self.intro = value,
            TemplateField::Action => self.action = value,
            TemplateField::Closing => self.closing = value,
        }
    }

    pub fn field(&self, field: TemplateField) -> &str {
        match field {
            TemplateField::Subject => &self.subject,
            TemplateField::Greeting => &self.greeting,
            TemplateField::Intro => &self.intro,
            TemplateField::Action => &self.action,
            TemplateField::Closing => &self.closing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_expected_field_names() {
        let json = serde_json::to_value(EmailTemplate::default()).expect("serialize");
        for key in ["subject", "greeting", "intro", "action", "closing"] {
            assert!(json.get(key).is_some(), "missing field {}", key);
        }
    }

    #[test]
    fn set_field_updates_only_the_target() {
        let mut template = EmailTemplate::default();
        let before = template.clone();
        template.set_field(TemplateField::Intro, "New intro");
        assert_eq!(template.intro, "New intro");
        assert_eq!(template.subject, before.subject);
        assert_eq!(template.closing, before.closing);
    }

    #[test]
    fn default_closing_keeps_embedded_newline() {
        assert!(EmailTemplate::default().closing.contains('\n'));
    }
}
