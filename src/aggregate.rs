// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::config::Targets;
use crate::models::{
    ActorProgress, AggregateResult, ObligationStatus, PeriodFilter, ReserveEntry,
    TargetProgress, Transaction,
};

/// Literal, case-sensitive substring alternatives. Empty keywords never match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn new<S: Into<String>>(keywords: impl IntoIterator<Item = S>) -> Self {
        KeywordSet(
            keywords
                .into_iter()
                .map(Into::into)
                .filter(|k: &String| !k.is_empty())
                .collect(),
        )
    }

    /// Build from a `a|b|c` pattern.
    pub fn from_pattern(pattern: &str) -> Self {
        Self::new(pattern.split('|'))
    }

    pub fn matches(&self, haystack: &str) -> bool {
        self.0.iter().any(|k| haystack.contains(k.as_str()))
    }

    pub fn keywords(&self) -> &[String] {
        &self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregationConfig {
    /// Actors whose contributions are tracked, usually the keys of the targets.
    pub actors: Vec<String>,
    pub inflow: KeywordSet,
    pub outflow: KeywordSet,
    pub manual_reserve: KeywordSet,
    pub obligations: BTreeMap<String, KeywordSet>,
    pub obligation_status: Option<String>,
}

/// Sums pin to `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
pub fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

pub fn saturating_sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MAX
    } else {
        Decimal::MIN
    })
}

pub fn aggregate(
    transactions: &[Transaction],
    period: &PeriodFilter,
    cfg: &AggregationConfig,
) -> AggregateResult {
    let mut contributions: BTreeMap<String, Decimal> = cfg
        .actors
        .iter()
        .map(|a| (a.clone(), Decimal::ZERO))
        .collect();
    let mut obligations: BTreeMap<String, ObligationStatus> = cfg
        .obligations
        .keys()
        .map(|name| (name.clone(), ObligationStatus::default()))
        .collect();
    let mut expenditure_total = Decimal::ZERO;

    for tx in transactions.iter().filter(|t| period.contains(t)) {
        if cfg.inflow.matches(&tx.category) {
            if let Some(sum) = contributions.get_mut(&tx.actor) {
                *sum = saturating_add(*sum, tx.amount);
            }
        }
        if cfg.outflow.matches(&tx.category) {
            expenditure_total = saturating_add(expenditure_total, tx.amount);
        }
        let status_ok = cfg
            .obligation_status
            .as_deref()
            .is_none_or(|want| tx.status == want);
        if status_ok {
            for (name, pattern) in &cfg.obligations {
                if pattern.matches(&tx.item) {
                    if let Some(st) = obligations.get_mut(name) {
                        st.done = true;
                        st.amount = saturating_add(st.amount, tx.amount);
                    }
                }
            }
        }
    }

    // Fetch order, not timestamp order: the sheet is not kept sorted.
    let manual_reserve = transactions
        .iter()
        .filter(|t| cfg.manual_reserve.matches(&t.category))
        .max_by_key(|t| t.row)
        .map(|t| ReserveEntry {
            amount: t.amount,
            timestamp: t.timestamp,
            row: t.row,
        });

    let contribution_total = contributions
        .values()
        .fold(Decimal::ZERO, |acc, v| saturating_add(acc, *v));
    AggregateResult {
        period: *period,
        contributions,
        contribution_total,
        expenditure_total,
        reserve_balance: saturating_sub(contribution_total, expenditure_total),
        manual_reserve,
        obligations,
    }
}

impl TargetProgress {
    pub fn compute(result: &AggregateResult, targets: &Targets) -> Self {
        let actors = targets
            .actors
            .iter()
            .map(|(name, target)| {
                let actual = result
                    .contributions
                    .get(name)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                (
                    name.clone(),
                    ActorProgress {
                        actual,
                        target: *target,
                        delta: saturating_sub(actual, *target),
                    },
                )
            })
            .collect();
        let ratio = if targets.total > Decimal::ZERO {
            // An overflowing quotient is far past the target in either direction.
            result
                .contribution_total
                .checked_div(targets.total)
                .unwrap_or(if result.contribution_total.is_sign_negative() {
                    Decimal::ZERO
                } else {
                    Decimal::ONE
                })
                .clamp(Decimal::ZERO, Decimal::ONE)
        } else {
            Decimal::ZERO
        };
        TargetProgress {
            actors,
            total_actual: result.contribution_total,
            total_target: targets.total,
            ratio,
        }
    }
}
