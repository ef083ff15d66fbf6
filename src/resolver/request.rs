use serde::{Deserialize, Serialize};

use crate::error::NoteError;

/// A typed pitch identifier, one per resolution path
#[derive(Debug, Clone, PartialEq)]
pub enum Pitch {
    Name(String),
    Frequency(f64),
    KeyNumber(i32),
}

/// Loosely shaped note request as it arrives from configuration or the
/// command line; exactly one field must be set
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,

    #[serde(default, rename = "key", skip_serializing_if = "Option::is_none")]
    pub key_number: Option<i32>,
}

impl NoteRequest {
    /// Pick the single identifying field
    pub fn pitch(&self) -> Result<Pitch, NoteError> {
        match (&self.name, self.frequency, self.key_number) {
            (Some(name), None, None) => Ok(Pitch::Name(name.clone())),
            (None, Some(frequency), None) => {
                if frequency.is_nan() {
                    Err(NoteError::construction("frequency is not a number"))
                } else {
                    Ok(Pitch::Frequency(frequency))
                }
            }
            (None, None, Some(key_number)) => Ok(Pitch::KeyNumber(key_number)),
            (None, None, None) => Err(NoteError::construction(
                "one of name, frequency or key must be given",
            )),
            _ => Err(NoteError::construction(
                "only one of name, frequency or key may be given",
            )),
        }
    }

    /// Overlay another request; any field set in `other` replaces all of ours
    pub fn overridden_by(&self, other: &NoteRequest) -> NoteRequest {
        if other.is_empty() {
            self.clone()
        } else {
            other.clone()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.frequency.is_none() && self.key_number.is_none()
    }
}
