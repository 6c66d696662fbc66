//! Known OpenAI-compatible endpoints.

use std::fmt;
use std::str::FromStr;

/// Hosted inference provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OracleProvider {
    #[default]
    Nebius,
    Nscale,
    HuggingFace,
    OpenAi,
}

impl OracleProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OracleProvider::Nebius => "nebius",
            OracleProvider::Nscale => "nscale",
            OracleProvider::HuggingFace => "huggingface",
            OracleProvider::OpenAi => "openai",
        }
    }

    pub fn default_base_url(&self) -> &'static str {
        match self {
            OracleProvider::Nebius => "https://api.studio.nebius.com/v1/",
            OracleProvider::Nscale => "https://inference.api.nscale.com/v1",
            OracleProvider::HuggingFace => "https://router.huggingface.co/v1",
            OracleProvider::OpenAi => "https://api.openai.com/v1",
        }
    }

    /// Environment variable conventionally holding this provider's key.
    pub fn default_key_env(&self) -> &'static str {
        match self {
            OracleProvider::Nebius => "NEBIUS_API_KEY",
            OracleProvider::Nscale => "NSCALE_API_KEY",
            OracleProvider::HuggingFace => "HF_TOKEN",
            OracleProvider::OpenAi => "OPENAI_API_KEY",
        }
    }
}

impl fmt::Display for OracleProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OracleProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nebius" => Ok(OracleProvider::Nebius),
            "nscale" => Ok(OracleProvider::Nscale),
            "huggingface" | "hf" => Ok(OracleProvider::HuggingFace),
            "openai" => Ok(OracleProvider::OpenAi),
            _ => Err(format!("Invalid OracleProvider: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("NEBIUS".parse::<OracleProvider>(), Ok(OracleProvider::Nebius));
        assert_eq!("hf".parse::<OracleProvider>(), Ok(OracleProvider::HuggingFace));
        assert!("bedrock".parse::<OracleProvider>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for provider in [
            OracleProvider::Nebius,
            OracleProvider::Nscale,
            OracleProvider::HuggingFace,
            OracleProvider::OpenAi,
        ] {
            assert_eq!(provider.to_string().parse::<OracleProvider>(), Ok(provider));
        }
    }
}
