// 🧮 State Controller - sanitize → update → allocate → persist → view

use crate::allocation::{allocate, AllocationResult};
use crate::format::{format_input, format_share};
use crate::sanitize::sanitize;
use crate::store::{PersistedState, SavedContributions, SavedInputs, StateStore};
use serde::{Deserialize, Serialize};

/// Figures shown when no persisted state exists.
pub const DEFAULT_PARTY_A_SALARY: f64 = 36000.0;
pub const DEFAULT_PARTY_B_SALARY: f64 = 21000.0;
pub const DEFAULT_EXPENSE: f64 = 0.0;

/// Fixed tag for one of the two income earners. The pair exists for the
/// whole session; entries are only ever mutated, never added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    PartyA,
    PartyB,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::PartyA => "Party A",
            Role::PartyB => "Party B",
        }
    }
}

/// One income earner's current figure.
#[derive(Debug, Clone, Copy)]
pub struct IncomeEntry {
    pub role: Role,
    pub salary: f64,
}

/// The shared expense being split.
#[derive(Debug, Clone, Copy)]
pub struct ExpenseEntry {
    pub amount: f64,
}

/// Which field an edit targets. Serialized names match the web API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "partyA")]
    PartyA,
    #[serde(rename = "partyB")]
    PartyB,
    #[serde(rename = "expense")]
    Expense,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::PartyA => "Party A Salary",
            Field::PartyB => "Party B Salary",
            Field::Expense => "Expense",
        }
    }
}

/// Read-only display snapshot: the three inputs echoed with thousands
/// separators, and the two shares in fixed two-decimal form.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub party_a_salary: String,
    pub party_b_salary: String,
    pub expense: String,
    pub party_a_share: String,
    pub party_b_share: String,
}

/// Owns the session state and runs the full pipeline for every edit:
/// sanitized input → entries → allocation → write-through persistence →
/// formatted view.
pub struct Controller {
    party_a: IncomeEntry,
    party_b: IncomeEntry,
    expense: ExpenseEntry,
    allocation: AllocationResult,
    store: Box<dyn StateStore>,
}

impl Controller {
    /// Seed from the store when possible, otherwise from the defaults.
    ///
    /// Persisted inputs always win over a persisted allocation: whenever
    /// inputs exist, the allocation is recomputed from them and the stored
    /// contributions record is ignored as potentially stale. Only when
    /// inputs are missing entirely is a lone contributions record shown,
    /// until the first edit replaces it.
    pub fn new(store: Box<dyn StateStore>) -> Self {
        let persisted = store.load().unwrap_or_default();

        let inputs = persisted.inputs.unwrap_or(SavedInputs {
            party_a_salary: DEFAULT_PARTY_A_SALARY,
            party_b_salary: DEFAULT_PARTY_B_SALARY,
            expense: DEFAULT_EXPENSE,
        });

        let allocation = match (persisted.inputs, persisted.contributions) {
            (Some(i), _) => allocate(i.party_a_salary, i.party_b_salary, i.expense),
            (None, Some(c)) => AllocationResult {
                share_a: c.party_a_contribution,
                share_b: c.party_b_contribution,
            },
            (None, None) => allocate(inputs.party_a_salary, inputs.party_b_salary, inputs.expense),
        };

        Controller {
            party_a: IncomeEntry {
                role: Role::PartyA,
                salary: inputs.party_a_salary,
            },
            party_b: IncomeEntry {
                role: Role::PartyB,
                salary: inputs.party_b_salary,
            },
            expense: ExpenseEntry {
                amount: inputs.expense,
            },
            allocation,
            store,
        }
    }

    /// One full pipeline pass for a single edit's worth of raw text.
    ///
    /// Always recomputes from the complete current input set, never from
    /// deltas, so repeating an edit is harmless and edit order does not
    /// matter.
    pub fn on_field_edit(&mut self, field: Field, raw: &str) -> ViewModel {
        let value = sanitize(raw);
        match field {
            Field::PartyA => self.party_a.salary = value,
            Field::PartyB => self.party_b.salary = value,
            Field::Expense => self.expense.amount = value,
        }

        self.allocation = allocate(
            self.party_a.salary,
            self.party_b.salary,
            self.expense.amount,
        );

        // Write-through; a failed save degrades to a session-only calculator
        let _ = self.store.save(&self.snapshot());

        self.view()
    }

    /// Current state in its durable form.
    fn snapshot(&self) -> PersistedState {
        PersistedState {
            inputs: Some(SavedInputs {
                party_a_salary: self.party_a.salary,
                party_b_salary: self.party_b.salary,
                expense: self.expense.amount,
            }),
            contributions: Some(SavedContributions {
                party_a_contribution: self.allocation.share_a,
                party_b_contribution: self.allocation.share_b,
            }),
        }
    }

    /// Formatted snapshot for the presentation layer. Valid from the moment
    /// the controller is built, before any interaction.
    pub fn view(&self) -> ViewModel {
        ViewModel {
            party_a_salary: format_input(self.party_a.salary),
            party_b_salary: format_input(self.party_b.salary),
            expense: format_input(self.expense.amount),
            party_a_share: format_share(self.allocation.share_a),
            party_b_share: format_share(self.allocation.share_b),
        }
    }
}
