//! Financial Health Report
//!
//! Rates the savings rate `(income - expense) / income * 100` over every
//! transaction on a five-tier scale.

use std::fmt;

use crate::models::Transaction;

use super::totals;

/// Rating derived from the savings rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthTier {
    /// Below 0%
    Broke,
    /// 0% up to 10%
    Struggling,
    /// 10% up to 20%
    GettingBy,
    /// 20% up to 30%
    Promising,
    /// 30% and above
    Healthy,
}

impl HealthTier {
    pub fn from_rate(savings_rate: f64) -> Self {
        if savings_rate < 0.0 {
            Self::Broke
        } else if savings_rate < 10.0 {
            Self::Struggling
        } else if savings_rate < 20.0 {
            Self::GettingBy
        } else if savings_rate < 30.0 {
            Self::Promising
        } else {
            Self::Healthy
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Broke => "broke",
            Self::Struggling => "struggling",
            Self::GettingBy => "getting by",
            Self::Promising => "promising",
            Self::Healthy => "healthy",
        }
    }
}

impl fmt::Display for HealthTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Whether a rating could be computed
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HealthOutcome {
    /// No income recorded; the rate is undefined
    NoIncome,
    Rated { savings_rate: f64, tier: HealthTier },
}

/// Financial health over the whole ledger
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialHealth {
    pub income_total: u64,
    pub expense_total: u64,
    pub outcome: HealthOutcome,
}

impl FinancialHealth {
    /// Rate every transaction in `records`
    pub fn generate(records: &[Transaction]) -> Self {
        let (income_total, expense_total) = totals(records);

        let outcome = if income_total == 0 {
            HealthOutcome::NoIncome
        } else {
            let income = income_total as f64;
            let savings_rate = (income - expense_total as f64) / income * 100.0;
            HealthOutcome::Rated {
                savings_rate,
                tier: HealthTier::from_rate(savings_rate),
            }
        };

        Self {
            income_total,
            expense_total,
            outcome,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &str) -> String {
        let (savings_rate, tier) = match self.outcome {
            HealthOutcome::NoIncome => {
                return "No income recorded, cannot calculate financial health.\n".to_string()
            }
            HealthOutcome::Rated { savings_rate, tier } => (savings_rate, tier),
        };

        let mut output = String::from("Financial Health Report\n");
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&format!(
            "{:<16} {:>20}\n",
            "Total income:",
            format!("{}{}", currency, self.income_total)
        ));
        output.push_str(&format!(
            "{:<16} {:>20}\n",
            "Total expenses:",
            format!("{}{}", currency, self.expense_total)
        ));
        output.push_str(&format!(
            "{:<16} {:>20}\n",
            "Savings rate:",
            format!("{:.2}%", savings_rate)
        ));
        output.push_str(&format!("{:<16} {:>20}\n", "Status:", tier.label()));
        output
    }
}
