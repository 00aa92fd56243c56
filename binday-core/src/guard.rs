//! Address and permission checks run before any schedule is fetched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::Location;

/// Permission scope a voice platform must be asked for to read the device address.
pub const ADDRESS_PERMISSION_SCOPE: &str = "read::alexa:device:all:address";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Directive asking the platform to prompt the user for a permission.
pub struct PermissionRequest {
    /// Scope being requested.
    pub scope: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Address as reported by the device settings service.
pub struct DeviceAddress {
    /// First address line, usually “12 Main Street”.
    pub address_line1: Option<String>,
    /// Postcode as entered by the user.
    pub postal_code: Option<String>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Reasons a request is turned away before resolution.
pub enum GuardRejection {
    /// The user has not granted address access.
    #[error("Address permission not granted")]
    PermissionRequired(PermissionRequest),
    /// No usable address is set for the device.
    #[error("Device address missing")]
    MissingAddress,
    /// The postcode is outside the served area.
    #[error("Unsupported postcode: {0}")]
    UnsupportedPostcode(String),
    /// No house number could be read from the first address line.
    #[error("Invalid house number in {0:?}")]
    InvalidHouseNumber(String),
    /// No provider is registered for the configured council.
    #[error("Unknown council: {0}")]
    UnknownCouncil(String),
}

impl GuardRejection {
    /// Text to speak back to the user.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::PermissionRequired(_) => {
                "Please enable address permissions in your app so I can look up your bin collections."
                    .to_owned()
            }
            Self::MissingAddress => {
                "I couldn't find an address for this device, please set one and try again."
                    .to_owned()
            }
            Self::UnsupportedPostcode(postcode) => {
                format!("Sorry, I can't look up bin collections for {postcode} yet.")
            }
            Self::InvalidHouseNumber(_) => {
                "I couldn't work out the house number from your address, please check it and try again."
                    .to_owned()
            }
            Self::UnknownCouncil(_) => {
                "Sorry, bin collections aren't set up for your council yet.".to_owned()
            }
        }
    }

    /// Permission directive to send along with the message, if any.
    #[must_use]
    pub fn permission_request(&self) -> Option<&PermissionRequest> {
        match self {
            Self::PermissionRequired(request) => Some(request),
            _ => None,
        }
    }
}

/// Upper-case a postcode and drop all whitespace (`ka3 1sf` becomes `KA31SF`).
#[must_use]
pub fn normalize_postcode(raw: &str) -> String {
    raw.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// First token of an address line that looks like a house number (`12`, `12A`).
#[must_use]
pub fn parse_house_number(line: &str) -> Option<String> {
    line.split(|ch: char| ch.is_whitespace() || ch == ',')
        .find(|token| is_house_number(token))
        .map(str::to_uppercase)
}

fn is_house_number(token: &str) -> bool {
    let digits = token.chars().take_while(char::is_ascii_digit).count();
    let suffix = token.chars().skip(digits).collect::<Vec<_>>();
    digits > 0 && (suffix.is_empty() || matches!(suffix.as_slice(), [letter] if letter.is_ascii_alphabetic()))
}

/// Validate consent and the device address against the served postcodes.
///
/// An empty `allowed_postcodes` list accepts every postcode.
///
/// # Errors
///
/// Returns a [`GuardRejection`] describing the first check that failed.
pub fn check_address(
    consent: bool,
    address: Option<&DeviceAddress>,
    allowed_postcodes: &[String],
) -> Result<Location, GuardRejection> {
    if !consent {
        debug!("Address permission missing");
        return Err(GuardRejection::PermissionRequired(PermissionRequest {
            scope: ADDRESS_PERMISSION_SCOPE,
        }));
    }

    let postcode = address
        .and_then(|address| address.postal_code.as_deref())
        .map(normalize_postcode)
        .filter(|postcode| !postcode.is_empty())
        .ok_or(GuardRejection::MissingAddress)?;

    if !allowed_postcodes.is_empty()
        && !allowed_postcodes
            .iter()
            .any(|allowed| normalize_postcode(allowed) == postcode)
    {
        debug!(%postcode, "Postcode outside served area");
        return Err(GuardRejection::UnsupportedPostcode(postcode));
    }

    let line = address
        .and_then(|address| address.address_line1.as_deref())
        .unwrap_or_default();
    let house_number = parse_house_number(line)
        .ok_or_else(|| GuardRejection::InvalidHouseNumber(line.to_owned()))?;

    Ok(Location {
        postcode,
        house_number,
    })
}
