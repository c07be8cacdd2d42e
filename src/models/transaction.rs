use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Flow {
    Income,
    Expense,
}

impl Flow {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl std::fmt::Display for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Weekly,
    Monthly,
    Yearly,
}

impl Cadence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" | "annual" | "annually" => Some(Self::Yearly),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Schedule {
    Recurring {
        cadence: Cadence,
        start: NaiveDate,
        /// `None` means the item never expires.
        end: Option<NaiveDate>,
    },
    OneTime {
        date: NaiveDate,
    },
}

/// A recurring or one-time income/expense record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub name: String,
    /// Positive; direction comes from `flow`.
    pub amount: Decimal,
    pub flow: Flow,
    pub schedule: Schedule,
    /// Only ever set on expenses.
    pub category_id: Option<i64>,
}

impl Transaction {
    pub fn recurring_expense(
        id: i64,
        name: impl Into<String>,
        amount: Decimal,
        cadence: Cadence,
        start: NaiveDate,
        end: Option<NaiveDate>,
        category_id: Option<i64>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
            flow: Flow::Expense,
            schedule: Schedule::Recurring {
                cadence,
                start,
                end,
            },
            category_id,
        }
    }

    pub fn one_time_expense(
        id: i64,
        name: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
        category_id: Option<i64>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
            flow: Flow::Expense,
            schedule: Schedule::OneTime { date },
            category_id,
        }
    }

    pub fn recurring_income(
        id: i64,
        name: impl Into<String>,
        amount: Decimal,
        cadence: Cadence,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
            flow: Flow::Income,
            schedule: Schedule::Recurring {
                cadence,
                start,
                end,
            },
            category_id: None,
        }
    }

    pub fn one_time_income(id: i64, name: impl Into<String>, amount: Decimal, date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            amount,
            flow: Flow::Income,
            schedule: Schedule::OneTime { date },
            category_id: None,
        }
    }

    pub fn is_income(&self) -> bool {
        self.flow == Flow::Income
    }

    pub fn is_expense(&self) -> bool {
        self.flow == Flow::Expense
    }

    pub fn is_recurring(&self) -> bool {
        matches!(self.schedule, Schedule::Recurring { .. })
    }
}
