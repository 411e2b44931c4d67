//! Shared domain enums

use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, Postgres};
use thiserror::Error;
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// Language
// ---------------------------------------------------------------------------

/// Languages a user may pick as their preferred language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "es")]
    Es,
    #[serde(rename = "fr")]
    Fr,
    #[serde(rename = "de")]
    De,
    #[serde(rename = "zh-hans")]
    ZhHans,
    #[serde(rename = "ja")]
    Ja,
    #[serde(rename = "pt")]
    Pt,
    #[serde(rename = "hi")]
    Hi,
}

/// Rejected language code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported language code: {0}")]
pub struct InvalidLanguage(pub String);

impl Language {
    pub const ALL: [Language; 8] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::ZhHans,
        Language::Ja,
        Language::Pt,
        Language::Hi,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::ZhHans => "zh-hans",
            Language::Ja => "ja",
            Language::Pt => "pt",
            Language::Hi => "hi",
        }
    }

    /// English display name
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
            Language::ZhHans => "Simplified Chinese",
            Language::Ja => "Japanese",
            Language::Pt => "Portuguese",
            Language::Hi => "Hindi",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl std::str::FromStr for Language {
    type Err = InvalidLanguage;

    /// Codes are matched exactly; "ES" or " es" are rejected like any other unknown code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| InvalidLanguage(s.to_string()))
    }
}

// SQLx conversion for Language (stored as its code)
impl sqlx::Type<Postgres> for Language {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for Language {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: InvalidLanguage| e.into())
    }
}

impl Encode<'_, Postgres> for Language {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.code(), buf)
    }
}
