use serde::{Deserialize, Serialize};

/// 월간 운영비 항목. 항목 구성은 고정이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Oil,
    ServiceAndParts,
    Workers,
    SalaryTaxes,
    OtherExpenses,
}

impl ExpenseCategory {
    /// 표시 순서.
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Oil,
        ExpenseCategory::ServiceAndParts,
        ExpenseCategory::Workers,
        ExpenseCategory::SalaryTaxes,
        ExpenseCategory::OtherExpenses,
    ];

    /// 보고서/차트에 쓰는 항목명.
    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Oil => "Oil",
            ExpenseCategory::ServiceAndParts => "Service and Parts",
            ExpenseCategory::Workers => "Workers",
            ExpenseCategory::SalaryTaxes => "Salary Taxes",
            ExpenseCategory::OtherExpenses => "Other Expenses",
        }
    }

    /// 입력 위젯 초기값.
    pub fn default_amount(self) -> f64 {
        match self {
            ExpenseCategory::Oil => 32_800.0,
            ExpenseCategory::ServiceAndParts => 41_000.0,
            ExpenseCategory::Workers => 49_200.0,
            ExpenseCategory::SalaryTaxes => 10_824.0,
            ExpenseCategory::OtherExpenses => 61_500.0,
        }
    }

    /// i18n 키 접미사.
    pub fn key(self) -> &'static str {
        match self {
            ExpenseCategory::Oil => "oil",
            ExpenseCategory::ServiceAndParts => "service_parts",
            ExpenseCategory::Workers => "workers",
            ExpenseCategory::SalaryTaxes => "salary_taxes",
            ExpenseCategory::OtherExpenses => "other_expenses",
        }
    }
}

/// 항목별 월간 운영비 금액.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpenseMap {
    pub oil: f64,
    pub service_and_parts: f64,
    pub workers: f64,
    pub salary_taxes: f64,
    pub other_expenses: f64,
}

impl Default for ExpenseMap {
    fn default() -> Self {
        Self {
            oil: ExpenseCategory::Oil.default_amount(),
            service_and_parts: ExpenseCategory::ServiceAndParts.default_amount(),
            workers: ExpenseCategory::Workers.default_amount(),
            salary_taxes: ExpenseCategory::SalaryTaxes.default_amount(),
            other_expenses: ExpenseCategory::OtherExpenses.default_amount(),
        }
    }
}

impl ExpenseMap {
    /// 모든 항목이 0인 맵.
    pub fn zeroed() -> Self {
        Self {
            oil: 0.0,
            service_and_parts: 0.0,
            workers: 0.0,
            salary_taxes: 0.0,
            other_expenses: 0.0,
        }
    }

    pub fn get(&self, category: ExpenseCategory) -> f64 {
        match category {
            ExpenseCategory::Oil => self.oil,
            ExpenseCategory::ServiceAndParts => self.service_and_parts,
            ExpenseCategory::Workers => self.workers,
            ExpenseCategory::SalaryTaxes => self.salary_taxes,
            ExpenseCategory::OtherExpenses => self.other_expenses,
        }
    }

    pub fn get_mut(&mut self, category: ExpenseCategory) -> &mut f64 {
        match category {
            ExpenseCategory::Oil => &mut self.oil,
            ExpenseCategory::ServiceAndParts => &mut self.service_and_parts,
            ExpenseCategory::Workers => &mut self.workers,
            ExpenseCategory::SalaryTaxes => &mut self.salary_taxes,
            ExpenseCategory::OtherExpenses => &mut self.other_expenses,
        }
    }

    pub fn set(&mut self, category: ExpenseCategory, amount: f64) {
        *self.get_mut(category) = amount;
    }

    /// 표시 순서대로 (항목, 금액)을 순회한다.
    pub fn iter(&self) -> impl Iterator<Item = (ExpenseCategory, f64)> + '_ {
        ExpenseCategory::ALL.iter().map(move |c| (*c, self.get(*c)))
    }

    /// 월간 운영비 합계.
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, v)| v).sum()
    }
}
