use serde::{Deserialize, Serialize};

/// Payment schedule offered to the customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentTerms {
    /// 50% upfront, 50% on completion.
    #[default]
    #[serde(rename = "50-50")]
    FiftyFifty,
    #[serde(rename = "full-upfront")]
    FullUpfront,
    #[serde(rename = "full-completion")]
    FullCompletion,
    /// 1/3 upfront, 1/3 midway, 1/3 on completion.
    #[serde(rename = "thirds")]
    Thirds,
}

impl PaymentTerms {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FiftyFifty => "50-50",
            Self::FullUpfront => "full-upfront",
            Self::FullCompletion => "full-completion",
            Self::Thirds => "thirds",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "50-50" => Some(Self::FiftyFifty),
            "full-upfront" => Some(Self::FullUpfront),
            "full-completion" => Some(Self::FullCompletion),
            "thirds" => Some(Self::Thirds),
            _ => None,
        }
    }

    /// Human-readable description shown on the review page and reports.
    pub fn description(&self) -> &'static str {
        match self {
            Self::FiftyFifty => "50% upfront, 50% on completion",
            Self::FullUpfront => "100% upfront",
            Self::FullCompletion => "100% on completion",
            Self::Thirds => "1/3 upfront, 1/3 midway, 1/3 on completion",
        }
    }
}
