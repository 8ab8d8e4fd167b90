//! Validation utilities

use crate::traits::*;
use crate::types::*;

const MAX_TEXT_LEN: usize = 1000;
const MAX_CATEGORY_LEN: usize = 50;

/// Validate that quote text is usable
pub fn validate_quote_text(text: &str) -> QuoteResult<()> {
    if text.trim().is_empty() {
        return Err(QuoteError::Validation(
            "Quote text cannot be empty".to_string(),
        ));
    }

    if text.chars().count() > MAX_TEXT_LEN {
        return Err(QuoteError::Validation(format!(
            "Quote text cannot exceed {} characters",
            MAX_TEXT_LEN
        )));
    }

    Ok(())
}

/// Validate that a category label is usable
pub fn validate_category(category: &str) -> QuoteResult<()> {
    if category.trim().is_empty() {
        return Err(QuoteError::Validation(
            "Quote category cannot be empty".to_string(),
        ));
    }

    if category.chars().count() > MAX_CATEGORY_LEN {
        return Err(QuoteError::Validation(format!(
            "Quote category cannot exceed {} characters",
            MAX_CATEGORY_LEN
        )));
    }

    // "all" is reserved for the catch-all filter
    if category == CategoryFilter::ALL {
        return Err(QuoteError::Validation(format!(
            "'{}' is reserved and cannot be used as a category",
            CategoryFilter::ALL
        )));
    }

    Ok(())
}

/// Enhanced quote validator with length limits and reserved names
pub struct EnhancedQuoteValidator;

impl QuoteValidator for EnhancedQuoteValidator {
    fn validate_quote(&self, quote: &QuoteRecord) -> QuoteResult<()> {
        validate_quote_text(&quote.text)?;
        validate_category(&quote.category)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhanced_validator() {
        let validator = EnhancedQuoteValidator;
        assert!(validator
            .validate_quote(&QuoteRecord::new("local-1", "Text", "Wisdom"))
            .is_ok());
        assert!(validator
            .validate_quote(&QuoteRecord::new("local-1", "Text", "all"))
            .is_err());
        assert!(validator
            .validate_quote(&QuoteRecord::new("local-1", "x".repeat(1001), "Wisdom"))
            .is_err());
    }

    #[test]
    fn test_default_validator_rejects_blank_fields() {
        let validator = DefaultQuoteValidator;
        assert!(validator
            .validate_quote(&QuoteRecord::new("local-1", "  ", "Wisdom"))
            .is_err());
        assert!(validator
            .validate_quote(&QuoteRecord::new("local-1", "Text", ""))
            .is_err());
    }
}
