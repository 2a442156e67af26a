//! Cable SKU identifiers.
//!
//! A SKU is five categorical codes joined with [`SKU_SEPARATOR`] in a fixed
//! order: conductor, insulation, cores, cross-sectional area, special
//! marking. Every code comes from a closed set and none contains the
//! separator, so the joined string can be split back without escaping.

use crate::domain::common::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SKU_SEPARATOR: char = '_';

/// Declares a closed code enumeration with `code`, `from_code` and `all`.
macro_rules! code_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $code:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn code(&self) -> &'static str {
                match self {
                    $($name::$variant => $code),+
                }
            }

            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn all() -> &'static [$name] {
                &[$($name::$variant),+]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.code())
            }
        }
    };
}

code_enum!(
    /// Conductor material.
    Conductor {
        Copper => "CU",
        Aluminium => "AL",
    }
);

code_enum!(
    /// Insulation or construction.
    Insulation {
        Xlpe => "XLPE",
        Pvc => "PVC",
        FrXlpe => "FR-XLPE",
        HrXlpe => "HRXLPE",
        Epr => "EPR",
    }
);

code_enum!(
    Cores {
        One => "1C",
        Two => "2C",
        Three => "3C",
        ThreeAndHalf => "3.5C",
        Four => "4C",
    }
);

code_enum!(
    /// Sheath, armour or special marking.
    Special {
        Ar => "AR",
        Ua => "UA",
        Sta => "STA",
        Ata => "ATA",
        Lt => "LT",
        Ht => "HT",
        Fr => "FR",
        Frls => "FRLS",
    }
);

/// Cross-sectional areas offered, in mm².
pub const CSA_VALUES: [u16; 10] = [50, 70, 95, 120, 150, 185, 240, 300, 400, 630];

/// A cross-sectional area from [`CSA_VALUES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Csa(u16);

impl Csa {
    pub fn new(mm2: u16) -> Option<Self> {
        CSA_VALUES.contains(&mm2).then_some(Csa(mm2))
    }

    pub fn mm2(&self) -> u16 {
        self.0
    }

    pub fn from_code(code: &str) -> Option<Self> {
        code.parse::<u16>().ok().and_then(Csa::new)
    }

    pub fn all() -> impl Iterator<Item = Csa> {
        CSA_VALUES.into_iter().map(Csa)
    }
}

impl fmt::Display for Csa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The five selections of the add dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkuSelection {
    pub conductor: Conductor,
    pub insulation: Insulation,
    pub cores: Cores,
    pub csa: Csa,
    pub special: Special,
}

impl Default for SkuSelection {
    fn default() -> Self {
        Self {
            conductor: Conductor::Copper,
            insulation: Insulation::Xlpe,
            cores: Cores::Three,
            csa: Csa(240),
            special: Special::Ar,
        }
    }
}

impl SkuSelection {
    pub fn build(&self) -> SkuId {
        SkuId(format!(
            "{}{sep}{}{sep}{}{sep}{}{sep}{}",
            self.conductor,
            self.insulation,
            self.cores,
            self.csa,
            self.special,
            sep = SKU_SEPARATOR
        ))
    }
}

/// A validated SKU string, also the upsert key of the inventory collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkuId(String);

impl SkuId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Self::selection_of(raw)
            .map(|selection| selection.build())
            .ok_or_else(|| ValidationError::MalformedSku(raw.to_string()))
    }

    /// Splits a stored identifier back into its selections.
    pub fn selection_of(raw: &str) -> Option<SkuSelection> {
        let mut parts = raw.split(SKU_SEPARATOR);
        let selection = SkuSelection {
            conductor: Conductor::from_code(parts.next()?)?,
            insulation: Insulation::from_code(parts.next()?)?,
            cores: Cores::from_code(parts.next()?)?,
            csa: Csa::from_code(parts.next()?)?,
            special: Special::from_code(parts.next()?)?,
        };
        match parts.next() {
            Some(_) => None,
            None => Some(selection),
        }
    }
}

impl fmt::Display for SkuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selection_builds_reference_sku() {
        let selection = SkuSelection::default();
        assert_eq!(selection.build().as_str(), "CU_XLPE_3C_240_AR");
        assert_eq!(selection.build(), selection.build());
    }

    #[test]
    fn test_build_uses_codes_not_variant_names() {
        let selection = SkuSelection {
            conductor: Conductor::Aluminium,
            insulation: Insulation::FrXlpe,
            cores: Cores::ThreeAndHalf,
            csa: Csa::new(630).unwrap(),
            special: Special::Frls,
        };
        assert_eq!(selection.build().as_str(), "AL_FR-XLPE_3.5C_630_FRLS");
    }

    #[test]
    fn test_parse_accepts_every_built_sku() {
        let selection = SkuSelection {
            csa: Csa::new(95).unwrap(),
            special: Special::Sta,
            ..SkuSelection::default()
        };
        let sku = selection.build();
        assert_eq!(SkuId::parse(sku.as_str()).unwrap(), sku);
        assert_eq!(SkuId::selection_of(sku.as_str()), Some(selection));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in [
            "",
            "CU_XLPE_3C_240",
            "CU_XLPE_3C_240_AR_X",
            "cu_XLPE_3C_240_AR",
            "CU_XLPE_3C_241_AR",
            "CU-XLPE-3C-240-AR",
        ] {
            assert_eq!(
                SkuId::parse(raw),
                Err(ValidationError::MalformedSku(raw.to_string())),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_csa_is_closed() {
        assert!(Csa::new(240).is_some());
        assert!(Csa::new(16).is_none());
        assert_eq!(Csa::all().count(), CSA_VALUES.len());
    }

    #[test]
    fn test_codes_never_contain_separator() {
        let codes = Conductor::all()
            .iter()
            .map(|c| c.code())
            .chain(Insulation::all().iter().map(|c| c.code()))
            .chain(Cores::all().iter().map(|c| c.code()))
            .chain(Special::all().iter().map(|c| c.code()));
        for code in codes {
            assert!(!code.contains(SKU_SEPARATOR), "{code}");
        }
    }
}
