//! Credential validation: value objects that cannot be constructed from
//! invalid input, plus the password strength meter used by the registration
//! form.

use std::fmt;
use std::str::FromStr;

use crate::domain::auth::errors::EmailError;
use crate::domain::auth::errors::InviteCodeError;
use crate::domain::auth::errors::NicknameError;
use crate::domain::auth::errors::PasswordPolicyError;
use crate::domain::auth::models::Role;

/// Email address type
///
/// Validates with an RFC 5322 parser, then additionally requires a dotted
/// domain (`local@domain.tld`), which the portal's account identifiers always
/// have. Stored lowercased: email identity is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - not RFC 5322, or the domain has no dot
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();

        email_address::EmailAddress::from_str(&email)
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))?;

        match email.rsplit_once('@') {
            Some((_, domain)) if domain.contains('.') => Ok(Self(email)),
            _ => Err(EmailError::InvalidFormat(
                "domain must contain a dot".to_string(),
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Nickname value type
///
/// Length-bounded (3-32 characters) but otherwise free-form; display names
/// are not restricted to ASCII.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nickname(String);

impl Nickname {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid nickname.
    ///
    /// # Errors
    /// * `TooShort` - fewer than 3 characters
    /// * `TooLong` - more than 32 characters
    pub fn new(nickname: String) -> Result<Self, NicknameError> {
        let nickname = nickname.trim().to_string();
        let length = nickname.chars().count();

        if length < Self::MIN_LENGTH {
            Err(NicknameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(NicknameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(nickname))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A password that passed the acceptance policy: at least 8 characters, at
/// least one letter and one digit.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;

    /// Validate a candidate password against the acceptance policy.
    ///
    /// # Errors
    /// * `TooShort` - fewer than 8 characters
    /// * `MissingLetter` / `MissingDigit` - character class requirements
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if !password.chars().any(|c| c.is_alphabetic()) {
            return Err(PasswordPolicyError::MissingLetter);
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Keep plaintext out of logs and assertion failures.
impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Strength meter label shown next to the registration password field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLabel {
    Weak,
    Medium,
    Strong,
}

/// Password strength estimate: fixed points per satisfied trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct PasswordStrength {
    pub score: u8,
    pub label: StrengthLabel,
}

/// Score a candidate password.
///
/// Length >= 8 scores 30; uppercase and lowercase 20 each; a digit 15; a
/// symbol 15. Labels: below 40 weak, below 70 medium, otherwise strong.
pub fn password_strength(password: &str) -> PasswordStrength {
    let mut score: u8 = 0;

    if password.chars().count() >= 8 {
        score += 30;
    }
    if password.chars().any(|c| c.is_uppercase()) {
        score += 20;
    }
    if password.chars().any(|c| c.is_lowercase()) {
        score += 20;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 15;
    }
    if password.chars().any(|c| !c.is_alphanumeric()) {
        score += 15;
    }

    let label = match score {
        0..=39 => StrengthLabel::Weak,
        40..=69 => StrengthLabel::Medium,
        _ => StrengthLabel::Strong,
    };

    PasswordStrength { score, label }
}

/// A validated invite code together with the role and group it grants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteCode {
    code: String,
    role: Role,
    group: &'static str,
}

/// The static invite table. Immutable at runtime; codes match
/// case-insensitively.
const INVITE_TABLE: [(&str, Role, &str); 3] = [
    ("STUDENT2024", Role::Student, "IT-101"),
    ("LEADER2024", Role::Leader, "IT-101"),
    ("ADMIN2024", Role::Admin, "IT-101"),
];

impl InviteCode {
    /// Look a code up in the static invite table.
    ///
    /// # Errors
    /// * `Unknown` - the code is not in the table
    pub fn new(code: &str) -> Result<Self, InviteCodeError> {
        let code = code.trim();

        INVITE_TABLE
            .iter()
            .find(|(known, _, _)| known.eq_ignore_ascii_case(code))
            .map(|(known, role, group)| Self {
                code: (*known).to_string(),
                role: *role,
                group,
            })
            .ok_or(InviteCodeError::Unknown)
    }

    pub fn as_str(&self) -> &str {
        &self.code
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn group(&self) -> &str {
        self.group
    }
}
