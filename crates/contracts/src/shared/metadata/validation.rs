//! Validation rules for metadata fields

/// Static validation rules for a field
/// Copy trait for efficient passing
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub custom_error: Option<&'static str>,
}

impl ValidationRules {
    /// Create empty validation rules (all optional, no constraints)
    pub const fn none() -> Self {
        Self {
            required: false,
            min: None,
            max: None,
            min_length: None,
            max_length: None,
            custom_error: None,
        }
    }

    /// Create validation rules for required field
    pub const fn required() -> Self {
        Self {
            required: true,
            ..Self::none()
        }
    }

    /// Check if field is required
    pub const fn is_required(&self) -> bool {
        self.required
    }

    /// Any constraint besides `required` is declared
    pub fn has_constraints(&self) -> bool {
        self.min.is_some()
            || self.max.is_some()
            || self.min_length.is_some()
            || self.max_length.is_some()
    }

    /// Validate a string value against the length rules
    pub fn validate_string(&self, value: &str, field_label: &str) -> Result<(), String> {
        if self.required && value.trim().is_empty() {
            return Err(self.error_or(format!("{} не может быть пустым", field_label)));
        }

        let len = value.chars().count();
        if let Some(min) = self.min_length {
            if len < min {
                return Err(self.error_or(format!(
                    "{} должен содержать минимум {} символов",
                    field_label, min
                )));
            }
        }

        if let Some(max) = self.max_length {
            if len > max {
                return Err(self.error_or(format!(
                    "{} не должен превышать {} символов",
                    field_label, max
                )));
            }
        }

        Ok(())
    }

    /// Validate a numeric value against min/max rules
    pub fn validate_number(&self, value: f64, field_label: &str) -> Result<(), String> {
        if let Some(min) = self.min {
            if value < min {
                return Err(self.error_or(format!("{} должен быть не менее {}", field_label, min)));
            }
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(self.error_or(format!("{} должен быть не более {}", field_label, max)));
            }
        }

        Ok(())
    }

    fn error_or(&self, message: String) -> String {
        self.custom_error.map(str::to_string).unwrap_or(message)
    }
}
