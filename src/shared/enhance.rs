//! Rewrite Service Wire Types
//!
//! Request and response bodies exchanged with the external rewrite service,
//! plus the closed set of enhancement directives a user can pick from.
//!
//! # Wire Format
//!
//! ```json
//! {
//!   "selected_text": "love",
//!   "full_text": "I love AI",
//!   "enhance_type": "engaging"
//! }
//! ```
//!
//! A successful response carries `success: true` and `enhanced_text`.
//! Anything else is treated as a failure by the client.

use crate::shared::error::EnhanceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enhancement type as sent on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnhanceType {
    Professional,
    Engaging,
    Creative,
    Sarcastic,
    Custom,
}

impl EnhanceType {
    /// Wire name of this type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Professional => "professional",
            Self::Engaging => "engaging",
            Self::Creative => "creative",
            Self::Sarcastic => "sarcastic",
            Self::Custom => "custom",
        }
    }
}

/// What the user asked the rewrite service to do with the selection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnhanceDirective {
    /// "More professional"
    Professional,
    /// "More engaging"
    Engaging,
    /// "More creative"
    Creative,
    /// "Humorous"
    Sarcastic,
    /// Free-text instruction
    Custom(String),
}

impl EnhanceDirective {
    /// The preset directives, in menu order
    pub const PRESETS: [EnhanceDirective; 4] = [
        EnhanceDirective::Professional,
        EnhanceDirective::Engaging,
        EnhanceDirective::Creative,
        EnhanceDirective::Sarcastic,
    ];

    /// Create a custom directive, rejecting blank instructions
    pub fn custom(instruction: impl Into<String>) -> Result<Self, EnhanceError> {
        let directive = Self::Custom(instruction.into());
        directive.validate()?;
        Ok(directive)
    }

    /// Check that a custom directive carries an instruction
    pub fn validate(&self) -> Result<(), EnhanceError> {
        match self {
            Self::Custom(instruction) if instruction.trim().is_empty() => {
                Err(EnhanceError::EmptyInstruction)
            }
            _ => Ok(()),
        }
    }

    /// Wire type of this directive
    pub fn enhance_type(&self) -> EnhanceType {
        match self {
            Self::Professional => EnhanceType::Professional,
            Self::Engaging => EnhanceType::Engaging,
            Self::Creative => EnhanceType::Creative,
            Self::Sarcastic => EnhanceType::Sarcastic,
            Self::Custom(_) => EnhanceType::Custom,
        }
    }

    /// Trimmed custom instruction, if any
    pub fn custom_instruction(&self) -> Option<&str> {
        match self {
            Self::Custom(instruction) => Some(instruction.trim()),
            _ => None,
        }
    }

    /// Menu label shown to the user
    pub fn label(&self) -> &'static str {
        match self {
            Self::Professional => "More professional",
            Self::Engaging => "More engaging",
            Self::Creative => "More creative",
            Self::Sarcastic => "Humorous",
            Self::Custom(_) => "Custom",
        }
    }
}

impl fmt::Display for EnhanceDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(instruction) => write!(f, "custom: {}", instruction.trim()),
            other => f.write_str(other.enhance_type().as_str()),
        }
    }
}

/// Request body for the rewrite endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceRequest {
    /// The span the user selected
    pub selected_text: String,
    /// The whole document, for context
    pub full_text: String,
    /// Requested enhancement
    pub enhance_type: EnhanceType,
    /// Instruction for `custom` requests
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub custom_instruction: Option<String>,
}

impl EnhanceRequest {
    pub fn new(
        selected_text: impl Into<String>,
        full_text: impl Into<String>,
        directive: &EnhanceDirective,
    ) -> Self {
        Self {
            selected_text: selected_text.into(),
            full_text: full_text.into(),
            enhance_type: directive.enhance_type(),
            custom_instruction: directive.custom_instruction().map(str::to_string),
        }
    }
}

/// Response body from the rewrite endpoint
///
/// Every field is optional so that partial or error bodies still parse;
/// `enhanced_text()` decides whether the response is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhanceResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EnhanceResponse {
    /// Successful response
    pub fn success(original_text: impl Into<String>, enhanced_text: impl Into<String>) -> Self {
        Self {
            success: true,
            enhanced_text: Some(enhanced_text.into()),
            original_text: Some(original_text.into()),
            error: None,
        }
    }

    /// The enhanced text, when the response reports success and it is not blank
    pub fn enhanced_text(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.enhanced_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }
}
