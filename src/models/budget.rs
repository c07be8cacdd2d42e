use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBudget {
    pub id: i64,
    pub category_id: i64,
    /// Expected to be > 0; a non-positive limit yields zero progress.
    pub monthly_limit: Decimal,
    /// Fraction of the limit (0.8 = 80%) at which a warning fires.
    pub alert_threshold: Decimal,
    pub is_active: bool,
}

impl CategoryBudget {
    pub fn new(id: i64, category_id: i64, monthly_limit: Decimal, alert_threshold: Decimal) -> Self {
        Self {
            id,
            category_id,
            monthly_limit,
            alert_threshold,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    BudgetWarning,
    BudgetExceeded,
    GoalMilestone,
    PortfolioWarning,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BudgetWarning => "budget_warning",
            Self::BudgetExceeded => "budget_exceeded",
            Self::GoalMilestone => "goal_milestone",
            Self::PortfolioWarning => "portfolio_warning",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|t| t.as_str() == s.trim())
    }

    pub fn all() -> &'static [AlertType] {
        &[
            Self::BudgetWarning,
            Self::BudgetExceeded,
            Self::GoalMilestone,
            Self::PortfolioWarning,
        ]
    }
}

impl std::fmt::Display for AlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-kind on/off switch for generated alerts. Pure configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAlertSetting {
    pub alert_type: AlertType,
    pub is_enabled: bool,
}

impl BudgetAlertSetting {
    /// Alert kinds without a setting are enabled.
    pub fn is_enabled(settings: &[BudgetAlertSetting], alert_type: AlertType) -> bool {
        settings
            .iter()
            .find(|s| s.alert_type == alert_type)
            .map_or(true, |s| s.is_enabled)
    }
}
