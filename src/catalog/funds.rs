//! Static fund catalog and the Core/Satellite recommendation selector.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Catalog tag partitioning funds into the long-growth group (Core) and the
/// volatility-offsetting group (Satellite).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundKind {
    Core,
    Satellite,
}

impl std::fmt::Display for FundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core => write!(f, "core"),
            Self::Satellite => write!(f, "satellite"),
        }
    }
}

/// Trailing returns in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Performance {
    pub one_year: Decimal,
    pub two_year: Option<Decimal>,
    pub three_year: Option<Decimal>,
}

/// One immutable catalog entry. Reference data, never user-generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fund {
    pub code: &'static str,
    pub name: &'static str,
    pub isin: &'static str,
    pub currency: &'static str,
    /// Risk rating on the RR1–RR5 scale.
    pub risk: u8,
    pub kind: FundKind,
    pub description: &'static str,
    pub perf: Performance,
}

const fn perf(one_year: Decimal, two_year: Decimal, three_year: Decimal) -> Performance {
    Performance {
        one_year,
        two_year: Some(two_year),
        three_year: Some(three_year),
    }
}

/// The mock fund catalog, in presentation order.
pub static FUND_CATALOG: [Fund; 12] = [
    Fund {
        code: "17605622",
        name: "UPAMC Grand Slam Fund - Class A",
        isin: "TW000T0911Y5",
        currency: "TWD",
        risk: 3,
        kind: FundKind::Core,
        description: "Top-down macro analysis paired with bottom-up stock selection, \
            pursuing long-term capital gains.",
        perf: perf(dec!(12.8), dec!(25.4), dec!(40.2)),
    },
    Fund {
        code: "98638759",
        name: "UPAMC Greater China Small & Mid Cap Fund (USD)",
        isin: "TW000T0924B6",
        currency: "USD",
        risk: 3,
        kind: FundKind::Core,
        description: "Small and mid-cap growth stocks across Greater China, targeting \
            high-growth emerging industries.",
        perf: perf(dec!(14.9), dec!(28.1), dec!(45.5)),
    },
    Fund {
        code: "C0109015",
        name: "PGIM Jennison US Growth Fund Class A",
        isin: "IE00BYWYQY37",
        currency: "USD",
        risk: 3,
        kind: FundKind::Core,
        description: "US companies with durable structural growth trends, focused on \
            large-cap growth names.",
        perf: perf(dec!(20.1), dec!(42.3), dec!(68.7)),
    },
    Fund {
        code: "C0115024",
        name: "Natixis AI & Robotics Fund R/A USD",
        isin: "LU1923623000",
        currency: "USD",
        risk: 3,
        kind: FundKind::Core,
        description: "The full AI and robotics-automation value chain, positioned for \
            the next technology cycle.",
        perf: perf(dec!(22.5), dec!(48.9), dec!(72.1)),
    },
    Fund {
        code: "C0054008",
        name: "Natixis Harris Associates Global Equity Fund R/A USD",
        isin: "LU0130103400",
        currency: "USD",
        risk: 3,
        kind: FundKind::Core,
        description: "Value investing worldwide, seeking quality businesses trading \
            below intrinsic worth.",
        perf: perf(dec!(10.5), dec!(18.2), dec!(31.4)),
    },
    Fund {
        code: "C0054011",
        name: "Natixis Harris Associates US Equity Fund R/D USD",
        isin: "LU0130517989",
        currency: "USD",
        risk: 3,
        kind: FundKind::Core,
        description: "US large-cap value with an emphasis on margin of safety and \
            long-hold compounding.",
        perf: perf(dec!(11.2), dec!(20.5), dec!(33.8)),
    },
    Fund {
        code: "98638826",
        name: "UPAMC ASEAN High Dividend Fund (USD)",
        isin: "TW000T0935B2",
        currency: "USD",
        risk: 3,
        kind: FundKind::Core,
        description: "High-growth ASEAN markets, selecting companies with a durable \
            dividend edge.",
        perf: perf(dec!(8.5), dec!(15.1), dec!(24.9)),
    },
    Fund {
        code: "C0115019",
        name: "Natixis Subscription Economy Fund R/A USD",
        isin: "LU2092197867",
        currency: "USD",
        risk: 3,
        kind: FundKind::Core,
        description: "Subscription-model businesses with sticky customers and \
            predictable cash flow.",
        perf: perf(dec!(16.3), dec!(31.7), dec!(52.1)),
    },
    Fund {
        code: "98641529",
        name: "Nomura Strategic Turnaround Multi-Asset Fund - Monthly Distribution",
        isin: "TW000T32V5B0",
        currency: "TWD",
        risk: 2,
        kind: FundKind::Satellite,
        description: "Flexible allocation across equities, bonds and other assets, \
            capturing turnarounds while paying a monthly distribution.",
        perf: perf(dec!(5.5), dec!(10.2), dec!(18.4)),
    },
    Fund {
        code: "98637081",
        name: "Nomura Emerging Markets High Yield Bond Fund of Funds",
        isin: "TW000T3252B9",
        currency: "TWD",
        risk: 2,
        kind: FundKind::Satellite,
        description: "Global emerging-market high-yield bonds, diversified to dampen \
            single-country risk.",
        perf: perf(dec!(6.1), dec!(11.5), dec!(20.2)),
    },
    Fund {
        code: "C0109017",
        name: "PGIM Global Select Real Estate Securities Fund A USD",
        isin: "IE00BMQ64708",
        currency: "USD",
        risk: 2,
        kind: FundKind::Satellite,
        description: "Global REITs and real-estate securities for inflation \
            resistance and steady income.",
        perf: perf(dec!(4.2), dec!(8.7), dec!(15.5)),
    },
    Fund {
        code: "98641534",
        name: "Nomura Strategic Turnaround Multi-Asset Fund (USD)",
        isin: "TW000T32V5F1",
        currency: "USD",
        risk: 2,
        kind: FundKind::Satellite,
        description: "USD-denominated multi-asset allocation balancing equities and \
            bonds to lower portfolio volatility.",
        perf: perf(dec!(5.8), dec!(10.9), dec!(19.1)),
    },
];

/// The recommended lineup shown on the result screen.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub core: Vec<&'static Fund>,
    pub satellite: Vec<&'static Fund>,
}

/// Select the first 3 Core and first 3 Satellite funds in catalog order.
///
/// The computed persona does not influence the selection; recommendations are
/// the same for every risk level.
pub fn recommendations() -> Recommendation {
    let pick = |kind: FundKind| {
        FUND_CATALOG
            .iter()
            .filter(|f| f.kind == kind)
            .take(3)
            .collect::<Vec<_>>()
    };
    Recommendation {
        core: pick(FundKind::Core),
        satellite: pick(FundKind::Satellite),
    }
}

/// Look up a catalog entry by code.
pub fn fund_by_code(code: &str) -> Option<&'static Fund> {
    FUND_CATALOG.iter().find(|f| f.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_codes_are_unique() {
        let mut codes: Vec<&str> = FUND_CATALOG.iter().map(|f| f.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), FUND_CATALOG.len());
    }

    #[test]
    fn recommendation_picks_three_of_each_in_order() {
        let rec = recommendations();
        assert_eq!(rec.core.len(), 3);
        assert_eq!(rec.satellite.len(), 3);
        assert_eq!(rec.core[0].code, "17605622");
        assert_eq!(rec.core[2].code, "C0109015");
        assert_eq!(rec.satellite[0].code, "98641529");
        assert_eq!(rec.satellite[2].code, "C0109017");
        assert!(rec.core.iter().all(|f| f.kind == FundKind::Core));
        assert!(rec.satellite.iter().all(|f| f.kind == FundKind::Satellite));
    }

    #[test]
    fn fund_lookup_by_code() {
        let fund = fund_by_code("C0115024").unwrap();
        assert_eq!(fund.isin, "LU1923623000");
        assert_eq!(fund.perf.one_year, rust_decimal_macros::dec!(22.5));
        assert!(fund_by_code("missing").is_none());
    }

    #[test]
    fn risk_ratings_are_plausible() {
        for fund in &FUND_CATALOG {
            assert!((1..=5).contains(&fund.risk), "{} outside RR scale", fund.code);
        }
    }
}
