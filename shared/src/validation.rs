//! Validation utilities for the stock tracker
//!
//! Every check returns a [`ValidationError`] that knows which field it
//! belongs to and carries both English and Spanish text.

use thiserror::Error;

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    EmptyName,

    #[error("{field} cannot be negative")]
    NegativeValue { field: &'static str },

    #[error("Minimum ({min}) cannot be greater than maximum ({max})")]
    MinAboveMax { min: i64, max: i64 },

    #[error("Price amount is too large")]
    AmountOutOfRange,

    #[error("Quantity must be greater than 0")]
    NonPositiveQuantity,

    #[error("Username and password are required")]
    MissingCredentials,
}

impl ValidationError {
    /// Input field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyName => "name",
            ValidationError::NegativeValue { field } => field,
            ValidationError::MinAboveMax { .. } => "min",
            ValidationError::AmountOutOfRange => "price",
            ValidationError::NonPositiveQuantity => "qty",
            ValidationError::MissingCredentials => "username",
        }
    }

    pub fn message_es(&self) -> String {
        match self {
            ValidationError::EmptyName => "El nombre es obligatorio.".to_string(),
            ValidationError::NegativeValue { field } => {
                format!("El campo {} no puede ser negativo.", field)
            }
            ValidationError::MinAboveMax { .. } => {
                "El mínimo no puede ser mayor que el máximo.".to_string()
            }
            ValidationError::AmountOutOfRange => "El precio es demasiado grande.".to_string(),
            ValidationError::NonPositiveQuantity => {
                "La cantidad debe ser mayor a 0.".to_string()
            }
            ValidationError::MissingCredentials => "Completa todos los campos.".to_string(),
        }
    }
}

// ============================================================================
// Item Validations
// ============================================================================

/// Validate an item name (must not be blank)
pub fn validate_item_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

/// Validate min/max thresholds. `max == 0` means no maximum.
pub fn validate_thresholds(min: i64, max: i64) -> Result<(), ValidationError> {
    if min < 0 {
        return Err(ValidationError::NegativeValue { field: "min" });
    }
    if max < 0 {
        return Err(ValidationError::NegativeValue { field: "max" });
    }
    if max > 0 && min > max {
        return Err(ValidationError::MinAboveMax { min, max });
    }
    Ok(())
}

/// Validate an absolute stock level set at create/edit time
pub fn validate_stock_level(stock: i64) -> Result<(), ValidationError> {
    if stock < 0 {
        return Err(ValidationError::NegativeValue { field: "stock" });
    }
    Ok(())
}

/// Validate a movement quantity
pub fn validate_quantity(qty: i64) -> Result<(), ValidationError> {
    if qty <= 0 {
        return Err(ValidationError::NonPositiveQuantity);
    }
    Ok(())
}

// ============================================================================
// Account Validations
// ============================================================================

/// Both fields must be present
pub fn validate_credentials(username: &str, password: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(())
}
