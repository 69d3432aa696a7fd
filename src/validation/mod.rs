use validator::ValidateEmail;

use crate::dto::contact_dto::{ContactRequest, FieldErrors};

/// The enumerated fields of a contact submission.
///
/// One validation rule per named field; no dynamic key lookup anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Celular,
    Message,
    Empresa,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Celular,
        Field::Message,
        Field::Empresa,
    ];

    /// Wire name of the field, as it appears in request bodies and error maps.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Celular => "celular",
            Field::Message => "message",
            Field::Empresa => "empresa",
        }
    }
}

/// Validate a single candidate field value. Pure, no I/O; safe on every
/// keystroke. Values are taken as-is: whitespace counts toward length.
pub fn validate_field(field: Field, value: &str) -> Result<(), String> {
    match field {
        Field::Name => {
            if value.chars().count() < 2 {
                return Err("El nombre debe tener al menos 2 caracteres".to_string());
            }
        }
        Field::Email => {
            if !value.validate_email() {
                return Err("Correo electrónico no válido".to_string());
            }
        }
        Field::Celular => {
            let len = value.chars().count();
            if len < 8 || len > 15 || !value.chars().all(|c| c.is_ascii_digit()) {
                return Err("El número debe tener entre 8 y 15 dígitos".to_string());
            }
        }
        Field::Message => {
            if value.chars().count() < 10 {
                return Err("El mensaje debe tener al menos 10 caracteres".to_string());
            }
        }
        Field::Empresa => {
            // Honeypot: any content marks the submission as automated. The
            // message is shaped like an ordinary field error on purpose.
            if !value.is_empty() {
                return Err("Campo no permitido".to_string());
            }
        }
    }
    Ok(())
}

/// Validate a whole submission, collecting the first error per field.
pub fn validate_all(request: &ContactRequest) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for field in Field::ALL {
        let value = match field {
            Field::Name => &request.name,
            Field::Email => &request.email,
            Field::Celular => &request.celular,
            Field::Message => &request.message,
            Field::Empresa => &request.empresa,
        };
        if let Err(message) = validate_field(field, value) {
            errors.insert(field.as_str(), message);
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> ContactRequest {
        ContactRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            celular: "5544332211".to_string(),
            message: "Quiero más información".to_string(),
            empresa: String::new(),
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        assert!(validate_all(&valid_request()).is_ok());
    }

    #[test]
    fn test_honeypot_fails_regardless_of_other_fields() {
        let mut request = valid_request();
        request.empresa = "Acme Inc".to_string();
        let errors = validate_all(&request).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("empresa"));
    }

    #[test]
    fn test_short_name_fails() {
        assert!(validate_field(Field::Name, "A").is_err());
        assert!(validate_field(Field::Name, "").is_err());
        assert!(validate_field(Field::Name, "Al").is_ok());
    }

    #[test]
    fn test_whitespace_counts_toward_length() {
        // No trimming: two spaces satisfy the two-character minimum.
        assert!(validate_field(Field::Name, "  ").is_ok());
    }

    #[test]
    fn test_invalid_email_fails() {
        assert!(validate_field(Field::Email, "no-arroba").is_err());
        assert!(validate_field(Field::Email, "a@").is_err());
        assert!(validate_field(Field::Email, "ana@example.com").is_ok());
    }

    #[test]
    fn test_celular_rejects_non_digits() {
        assert!(validate_field(Field::Celular, "12a").is_err());
        assert!(validate_field(Field::Celular, "55-44-33-22").is_err());
        assert!(validate_field(Field::Celular, "+5544332211").is_err());
    }

    #[test]
    fn test_celular_length_bounds() {
        assert!(validate_field(Field::Celular, "1234567").is_err());
        assert!(validate_field(Field::Celular, "12345678").is_ok());
        assert!(validate_field(Field::Celular, "123456789012345").is_ok());
        assert!(validate_field(Field::Celular, "1234567890123456").is_err());
    }

    #[test]
    fn test_short_message_fails() {
        assert!(validate_field(Field::Message, "Hola").is_err());
        assert!(validate_field(Field::Message, "Hola, ¿qué tal?").is_ok());
    }

    #[test]
    fn test_each_invalid_field_reported_independently() {
        let request = ContactRequest {
            name: "A".to_string(),
            email: "bad".to_string(),
            celular: "12a".to_string(),
            message: "corto".to_string(),
            empresa: String::new(),
        };
        let errors = validate_all(&request).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("celular"));
        assert!(errors.contains_key("message"));
        assert!(!errors.contains_key("empresa"));
    }
}
