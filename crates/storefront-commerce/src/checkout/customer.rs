//! Customer contact and delivery details.

use crate::error::{CommerceError, CommerceResult};
use serde::{Deserialize, Serialize};

/// Who the order ships to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Mobile number, e.g. "+8801712345678".
    pub phone: String,
    /// Street address.
    pub address: String,
    pub city: String,
    pub district: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

impl Customer {
    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Format the city line (e.g., "Dhaka, Dhaka 1207").
    pub fn city_line(&self) -> String {
        match &self.postal_code {
            Some(code) if !code.trim().is_empty() => {
                format!("{}, {} {}", self.city, self.district, code)
            }
            _ => format!("{}, {}", self.city, self.district),
        }
    }

    /// Format as multi-line.
    pub fn multi_line(&self) -> String {
        [
            self.full_name(),
            self.address.clone(),
            self.city_line(),
            self.phone.clone(),
            self.email.clone(),
        ]
        .join("\n")
    }

    /// Check every required field, reporting the first problem.
    pub fn validate(&self) -> CommerceResult<()> {
        let required = [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("district", &self.district),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(CommerceError::ValidationError(format!("{label} is required")));
            }
        }

        if !is_valid_email(&self.email) {
            return Err(CommerceError::ValidationError(format!(
                "invalid email address: {}",
                self.email
            )));
        }
        if !is_valid_phone(&self.phone) {
            return Err(CommerceError::ValidationError(format!(
                "invalid phone number: {}",
                self.phone
            )));
        }
        Ok(())
    }
}

/// `local@domain.tld` with no whitespace and no extra `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Bangladeshi mobile number: optional `+88`, then `01[3-9]` and 8 digits.
///
/// Spaces are ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    let compact: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    let number = compact.strip_prefix("+88").unwrap_or(&compact);
    let bytes = number.as_bytes();
    bytes.len() == 11
        && number.starts_with("01")
        && (b'3'..=b'9').contains(&bytes[2])
        && bytes.iter().all(u8::is_ascii_digit)
}
