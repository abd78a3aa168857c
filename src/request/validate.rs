//! Prompt validation shared by all request builders.

use crate::error::HubError;

/// Minimum prompt length after trimming.
pub const MIN_PROMPT_LEN: usize = 3;

/// Maximum prompt length after trimming.
pub const MAX_PROMPT_LEN: usize = 2000;

/// Validates a prompt and returns its trimmed form.
///
/// Rejected prompts never reach the network layer.
pub fn validate_prompt(prompt: &str) -> Result<&str, HubError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(HubError::Validation("Prompt must not be empty".to_string()));
    }
    if trimmed.chars().count() < MIN_PROMPT_LEN {
        return Err(HubError::Validation(format!(
            "Prompt must be at least {} characters",
            MIN_PROMPT_LEN
        )));
    }
    if trimmed.chars().count() > MAX_PROMPT_LEN {
        return Err(HubError::Validation(format!(
            "Prompt must be at most {} characters",
            MAX_PROMPT_LEN
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_prompt_rejected() {
        assert!(validate_prompt("").is_err());
        assert!(validate_prompt("   ").is_err());
    }

    #[test]
    fn test_short_prompt_rejected() {
        assert!(validate_prompt("ab").is_err());
        assert!(validate_prompt("  ab  ").is_err());
    }

    #[test]
    fn test_minimum_length_accepted() {
        assert_eq!(validate_prompt("cat").unwrap(), "cat");
    }

    #[test]
    fn test_prompt_is_trimmed() {
        assert_eq!(validate_prompt("  a red bicycle  ").unwrap(), "a red bicycle");
    }

    #[test]
    fn test_overlong_prompt_rejected() {
        let long = "x".repeat(MAX_PROMPT_LEN + 1);
        assert!(validate_prompt(&long).is_err());
    }

    #[test]
    fn test_max_length_accepted() {
        let max = "x".repeat(MAX_PROMPT_LEN);
        assert!(validate_prompt(&max).is_ok());
    }
}
