use serde::Deserialize;

use crate::error::NameError;
use crate::treatment::{Facets, Resolution};

/// A treatment-naming convention, selected explicitly at configuration
/// time. Resolution never guesses per string: an id that does not match
/// the selected scheme's shape is an error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum NameScheme {
    /// `<Site><delim><NitrogenLevel><delim><IrrigationLevel><delim><Crop>`,
    /// e.g. "LincolnRot1_N2_Irr1_Wheat".
    TokenDelimited {
        #[serde(default = "default_delimiter")]
        delimiter: char,
    },
    /// Site is the leading decimal-digit run; the remainder is an opaque
    /// suffix, e.g. "9-3Broccoli" resolves to site "9".
    PrefixNumeric,
}

fn default_delimiter() -> char {
    '_'
}

impl NameScheme {
    pub fn resolve(&self, id: &str) -> Result<Resolution, NameError> {
        match self {
            Self::TokenDelimited { delimiter } => resolve_token_delimited(id, *delimiter),
            Self::PrefixNumeric => resolve_prefix_numeric(id),
        }
    }
}

fn resolve_token_delimited(id: &str, delimiter: char) -> Result<Resolution, NameError> {
    let fields: Vec<&str> = id.split(delimiter).collect();
    if fields.len() != 4 {
        return Err(NameError::Unresolvable {
            id: id.to_string(),
            reason: format!(
                "expected 4 '{delimiter}'-delimited fields (Site, N, Irr, Crop), found {}",
                fields.len()
            ),
        });
    }

    Ok(Resolution {
        site: fields[0].to_string(),
        facets: Facets {
            nitrogen: Some(fields[1].to_string()),
            irrigation: Some(fields[2].to_string()),
            crop: Some(fields[3].to_string()),
            replicate: None,
        },
    })
}

fn resolve_prefix_numeric(id: &str) -> Result<Resolution, NameError> {
    let digits: String = id.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return Err(NameError::Unresolvable {
            id: id.to_string(),
            reason: "no leading decimal digits".into(),
        });
    }

    Ok(Resolution {
        site: digits,
        facets: Facets::default(),
    })
}
