//! Placeholder tokens

use docx_core::Align;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Alignment a paragraph takes when it contains a token of this class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignClass {
    Left,
    Center,
}

impl AlignClass {
    /// Combine the classes of two tokens found in one paragraph (left wins)
    pub fn merge(self, other: AlignClass) -> AlignClass {
        if self == AlignClass::Left || other == AlignClass::Left {
            AlignClass::Left
        } else {
            AlignClass::Center
        }
    }

    pub fn align(self) -> Align {
        match self {
            AlignClass::Left => Align::Left,
            AlignClass::Center => Align::Center,
        }
    }
}

macro_rules! tokens {
    ($($variant:ident => $literal:literal,)+) => {
        /// A placeholder token embedded in a proposal template
        ///
        /// Ordering follows declaration order, which is also the order
        /// substitution visits tokens.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum Token {
            $($variant,)+
        }

        impl Token {
            /// Every token in declaration order
            pub const ALL: &'static [Token] = &[$(Token::$variant,)+];

            /// The literal text written in templates, e.g. `{{CLIENT}}`
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Token::$variant => $literal,)+
                }
            }
        }
    };
}

tokens! {
    // Client details
    Client => "{{CLIENT}}",
    Email => "{{EMAIL}}",
    Contact => "{{CONTACT}}",
    Location => "{{LOCATION}}",
    ElectricBill => "{{ELECTRIC_BILL}}",
    EnergyRate => "{{ENERGY_RATE}}",
    ExpiryDate => "{{EXPIRY_DATE}}",

    // Hybrid system
    SystemSize => "{{SYSTEM_SIZE}}",
    HybridPvSize => "{{HYBRID_PV_SIZE}}",
    HybridArea => "{{HYBRID_AREA}}",
    HybridMonthlyEnergy => "{{HYBRID_MONTHLY_ENERGY}}",
    HybridPanels => "{{HYBRID_PANELS}}",
    HybridInverter => "{{HYBRID_INVERTER}}",
    HybridPremium => "{{HYBRID_PREMIUM}}",
    HybridSavings => "{{HYBRID_SAVINGS}}",
    HybridRoi => "{{HYBRID_ROI}}",
    HPremium => "{{H_PREMIUM}}",
    H30 => "{{H_30}}",
    H20 => "{{H_20}}",
    H45 => "{{H_45}}",
    H5 => "{{H_5}}",
    HTotal => "{{H_TOTAL}}",
    HPremium5 => "{{H_PREMIUM5}}",

    // On-grid "worry free" (zero bill) option
    ZeroBillSize => "{{ZERO_BILL_SIZE}}",
    ZeroPvSize => "{{ZERO_PV_SIZE}}",
    ZeroArea => "{{ZERO_AREA}}",
    ZeroMonthlyEnergy => "{{ZERO_MONTHLY_ENERGY}}",
    ZeroPanels => "{{ZERO_PANELS}}",
    ZeroInverter => "{{ZERO_INVERTER}}",
    ZeroPremium => "{{ZERO_PREMIUM}}",
    ZeroSavings => "{{ZERO_SAVINGS}}",
    ZeroRoi => "{{ZERO_ROI}}",
    OfPremium => "{{OF_PREMIUM}}",
    Of30 => "{{OF_30}}",
    Of20 => "{{OF_20}}",
    Of45 => "{{OF_45}}",
    Of5 => "{{OF_5}}",
    OfTotal => "{{OF_TOTAL}}",
    OfPremium5 => "{{OF_PREMIUM5}}",

    // On-grid "worry less" (lower bill) option
    LowerBillSize => "{{LOWER_BILL_SIZE}}",
    LowerPvSize => "{{LOWER_PV_SIZE}}",
    LowerArea => "{{LOWER_AREA}}",
    LowerMonthlyEnergy => "{{LOWER_MONTHLY_ENERGY}}",
    LowerPanels => "{{LOWER_PANELS}}",
    LowerInverter => "{{LOWER_INVERTER}}",
    LowerPremium => "{{LOWER_PREMIUM}}",
    LowerSavings => "{{LOWER_SAVINGS}}",
    LowerRoi => "{{LOWER_ROI}}",
    OlPremium => "{{OL_PREMIUM}}",
    Ol30 => "{{OL_30}}",
    Ol20 => "{{OL_20}}",
    Ol45 => "{{OL_45}}",
    Ol5 => "{{OL_5}}",
    OlTotal => "{{OL_TOTAL}}",
    OlPremium5 => "{{OL_PREMIUM5}}",
}

impl Token {
    /// Client-name-like tokens are left aligned, everything else centered
    pub fn align_class(self) -> AlignClass {
        match self {
            Token::Client => AlignClass::Left,
            _ => AlignClass::Center,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Token {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Token::ALL
            .iter()
            .copied()
            .find(|token| token.as_str() == s)
            .ok_or_else(|| format!("unknown placeholder: {s}"))
    }
}

/// Byte ranges of every `{{...}}` placeholder literal in `text`, in order
pub fn placeholder_spans(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut pos = 0;
    while let Some(found) = text[pos..].find("{{") {
        let start = pos + found;
        let inner_start = start + 2;
        let Some(len) = text[inner_start..].find("}}") else {
            break;
        };
        let inner = &text[inner_start..inner_start + len];
        if !inner.is_empty() && !inner.contains("{{") {
            let end = inner_start + len + 2;
            spans.push(start..end);
            pos = end;
        } else {
            pos = inner_start;
        }
    }
    spans
}

/// Find every `{{...}}` placeholder literal in `text`, in order
pub fn find_placeholders(text: &str) -> Vec<&str> {
    placeholder_spans(text)
        .into_iter()
        .map(|span| &text[span])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn test_literals_are_unique_and_well_formed() {
        let mut seen = HashSet::new();
        for token in Token::ALL {
            let literal = token.as_str();
            assert!(literal.starts_with("{{") && literal.ends_with("}}"));
            assert!(seen.insert(literal), "duplicate literal {literal}");
        }
        assert_eq!(Token::ALL.len(), 55);
    }

    #[test]
    fn test_parse_roundtrip() {
        assert_eq!("{{ZERO_PREMIUM}}".parse::<Token>(), Ok(Token::ZeroPremium));
        assert!("{{NOPE}}".parse::<Token>().is_err());
    }

    #[test]
    fn test_align_classes() {
        assert_eq!(Token::Client.align_class(), AlignClass::Left);
        assert_eq!(Token::Email.align_class(), AlignClass::Center);
        assert_eq!(
            AlignClass::Center.merge(AlignClass::Left),
            AlignClass::Left
        );
        assert_eq!(
            AlignClass::Center.merge(AlignClass::Center),
            AlignClass::Center
        );
    }

    #[test]
    fn test_find_placeholders() {
        assert_eq!(
            find_placeholders("Dear {{CLIENT}}, {{ {{X}} and {{}} or {{Y}}"),
            vec!["{{CLIENT}}", "{{X}}", "{{Y}}"]
        );
        assert!(find_placeholders("no tokens {{ here").is_empty());
    }

    #[test]
    fn test_placeholder_spans() {
        let text = "a {{CLIENT}}{{EMAIL}} b";
        let spans = placeholder_spans(text);
        assert_eq!(spans, vec![2..12, 12..21]);
        assert_eq!(&text[spans[1].clone()], "{{EMAIL}}");
    }
}
