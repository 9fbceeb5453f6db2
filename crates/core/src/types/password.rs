//! Password strength policy.
//!
//! Five independent requirements are evaluated; a password is accepted when
//! at least four are satisfied. The 4-of-5 threshold is deliberate leniency
//! and part of the observable contract.

use core::fmt;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Number of satisfied requirements needed for a password to be accepted.
const VALID_THRESHOLD: u8 = 4;

/// Overall strength classification of a password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    /// Fewer than three requirements satisfied.
    Weak,
    /// Exactly three requirements satisfied.
    Medium,
    /// Four or more requirements satisfied.
    Strong,
}

impl fmt::Display for PasswordStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weak => write!(f, "weak"),
            Self::Medium => write!(f, "medium"),
            Self::Strong => write!(f, "strong"),
        }
    }
}

/// Result of evaluating a password against the five requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordCheck {
    /// At least [`MIN_PASSWORD_LENGTH`] characters.
    pub min_length: bool,
    /// Contains an uppercase letter.
    pub uppercase: bool,
    /// Contains a lowercase letter.
    pub lowercase: bool,
    /// Contains a decimal digit.
    pub digit: bool,
    /// Contains a character that is neither alphanumeric nor whitespace.
    pub special: bool,
}

impl PasswordCheck {
    /// Evaluate a password against all five requirements.
    #[must_use]
    pub fn evaluate(password: &str) -> Self {
        Self {
            min_length: password.len() >= MIN_PASSWORD_LENGTH,
            uppercase: password.chars().any(char::is_uppercase),
            lowercase: password.chars().any(char::is_lowercase),
            digit: password.chars().any(|c| c.is_ascii_digit()),
            special: password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
        }
    }

    /// Number of requirements satisfied (0-5).
    #[must_use]
    pub const fn satisfied_count(&self) -> u8 {
        self.min_length as u8
            + self.uppercase as u8
            + self.lowercase as u8
            + self.digit as u8
            + self.special as u8
    }

    /// Classify the password's strength.
    #[must_use]
    pub const fn strength(&self) -> PasswordStrength {
        match self.satisfied_count() {
            0..=2 => PasswordStrength::Weak,
            3 => PasswordStrength::Medium,
            _ => PasswordStrength::Strong,
        }
    }

    /// Returns `true` if the password is accepted (at least 4 of 5
    /// requirements satisfied).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.satisfied_count() >= VALID_THRESHOLD
    }

    /// A short description of the first unmet requirement, for messages.
    #[must_use]
    pub const fn first_unmet(&self) -> Option<&'static str> {
        if !self.min_length {
            Some("at least 8 characters")
        } else if !self.uppercase {
            Some("an uppercase letter")
        } else if !self.lowercase {
            Some("a lowercase letter")
        } else if !self.digit {
            Some("a digit")
        } else if !self.special {
            Some("a special character")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Passwords satisfying exactly 0..=5 requirements.
    const FIXTURES: [(&str, u8); 6] = [
        ("", 0),
        ("a", 1),           // lowercase
        ("aA", 2),          // lowercase + uppercase
        ("aA1", 3),         // + digit
        ("aA1!", 4),        // + special
        ("aA1!aA1!", 5),    // + length
    ];

    #[test]
    fn test_satisfied_counts() {
        for (password, expected) in FIXTURES {
            let check = PasswordCheck::evaluate(password);
            assert_eq!(
                check.satisfied_count(),
                expected,
                "password {password:?} should satisfy {expected} requirements"
            );
        }
    }

    #[test]
    fn test_strength_classification() {
        let expected = [
            PasswordStrength::Weak,
            PasswordStrength::Weak,
            PasswordStrength::Weak,
            PasswordStrength::Medium,
            PasswordStrength::Strong,
            PasswordStrength::Strong,
        ];
        for ((password, _), strength) in FIXTURES.iter().zip(expected) {
            assert_eq!(
                PasswordCheck::evaluate(password).strength(),
                strength,
                "password {password:?}"
            );
        }
    }

    #[test]
    fn test_validity_threshold() {
        for (password, count) in FIXTURES {
            assert_eq!(
                PasswordCheck::evaluate(password).is_valid(),
                count >= 4,
                "password {password:?}"
            );
        }
    }

    #[test]
    fn test_four_of_five_is_enough() {
        // Long, mixed case, digit, no special character: 4 of 5.
        let check = PasswordCheck::evaluate("Passw0rdLong");
        assert!(!check.special);
        assert_eq!(check.satisfied_count(), 4);
        assert!(check.is_valid());
        assert_eq!(check.strength(), PasswordStrength::Strong);
    }

    #[test]
    fn test_first_unmet_order() {
        let check = PasswordCheck::evaluate("short");
        assert_eq!(check.first_unmet(), Some("at least 8 characters"));

        let check = PasswordCheck::evaluate("alllowercase");
        assert_eq!(check.first_unmet(), Some("an uppercase letter"));

        let check = PasswordCheck::evaluate("Aa1!aA1!");
        assert_eq!(check.first_unmet(), None);
    }

    #[test]
    fn test_strength_display() {
        assert_eq!(PasswordStrength::Weak.to_string(), "weak");
        assert_eq!(PasswordStrength::Medium.to_string(), "medium");
        assert_eq!(PasswordStrength::Strong.to_string(), "strong");
    }
}
