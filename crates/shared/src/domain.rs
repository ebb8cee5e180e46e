use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

macro_rules! section_catalog {
    ($($variant:ident => $key:literal),+ $(,)?) => {
        /// Animated regions of the page, keyed by their `data-animate` attribute.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum SectionId {
            $(
                #[serde(rename = $key)]
                $variant,
            )+
        }

        impl SectionId {
            pub const ALL: &'static [SectionId] = &[$(SectionId::$variant),+];
            pub const COUNT: usize = Self::ALL.len();

            pub fn key(self) -> &'static str {
                match self {
                    $(SectionId::$variant => $key,)+
                }
            }

            pub fn from_key(key: &str) -> Option<Self> {
                match key {
                    $($key => Some(SectionId::$variant),)+
                    _ => None,
                }
            }

            pub fn index(self) -> usize {
                self as usize
            }
        }
    };
}

section_catalog! {
    AboutTitle => "aboutTitle",
    AboutImage => "aboutImage",
    AboutText => "aboutText",
    ServicesTitle => "servicesTitle",
    Service1 => "service1",
    Service2 => "service2",
    Service3 => "service3",
    Service4 => "service4",
    Service5 => "service5",
    Service6 => "service6",
    BrandsTitle => "brandsTitle",
    Brand1 => "brand1",
    Brand2 => "brand2",
    Brand3 => "brand3",
    Brand4 => "brand4",
    Brand5 => "brand5",
    Brand6 => "brand6",
    ValuesLine => "valuesLine",
    ContactForm => "contactForm",
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityState {
    #[default]
    Hidden,
    Visible,
}

impl VisibilityState {
    pub fn is_visible(self) -> bool {
        self == VisibilityState::Visible
    }
}

/// Budget bands offered by the reservation form. The wire value is the band key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetBracket {
    #[serde(rename = "moins-5m")]
    Under5M,
    #[serde(rename = "5m-10m")]
    From5MTo10M,
    #[serde(rename = "10m-20m")]
    From10MTo20M,
    #[serde(rename = "20m-35m")]
    From20MTo35M,
    #[serde(rename = "plus-35m")]
    Over35M,
}

impl BudgetBracket {
    pub const ALL: &'static [BudgetBracket] = &[
        BudgetBracket::Under5M,
        BudgetBracket::From5MTo10M,
        BudgetBracket::From10MTo20M,
        BudgetBracket::From20MTo35M,
        BudgetBracket::Over35M,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BudgetBracket::Under5M => "moins-5m",
            BudgetBracket::From5MTo10M => "5m-10m",
            BudgetBracket::From10MTo20M => "10m-20m",
            BudgetBracket::From20MTo35M => "20m-35m",
            BudgetBracket::Over35M => "plus-35m",
        }
    }
}

impl FromStr for BudgetBracket {
    type Err = UnknownBudgetBracket;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|bracket| bracket.as_str() == value)
            .ok_or_else(|| UnknownBudgetBracket(value.to_string()))
    }
}

impl fmt::Display for BudgetBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown budget bracket '{0}'")]
pub struct UnknownBudgetBracket(pub String);

// Checkbox catalogs rendered by the reservation form.
pub const VEHICLE_TYPES: &[&str] = &["berline", "suv", "4x4", "pick-up", "citadine", "utilitaire"];
pub const FUEL_TYPES: &[&str] = &["essence", "diesel", "hybride", "electrique"];
pub const TRANSMISSIONS: &[&str] = &["manuelle", "automatique"];
