/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

#![warn(missing_docs)]

//! Forward-chaining production rules.
//!
//! A [`RuleEngine`] holds an ordered list of rules and a working set of facts.
//! Each decision cycle the owner clears the facts, asserts whatever it derived
//! from its sensors, then asks for a conclusion. The first rule (in insertion
//! order) whose conditions are all present wins. If no rule matches, the
//! engine's default conclusion is returned, so a decision always exists.
//!
//! Rule order is the only priority mechanism. Tables must list terminal and
//! urgent rules ahead of the general ones.

use std::fmt::Debug;
use std::hash::Hash;

/// Set of facts asserted during one decision cycle.
pub type FactSet<F> = rustc_hash::FxHashSet<F>;

/// A single production rule: when every condition holds, conclude `conclusion`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule<F, C> {
    /// Facts that must all be present.
    pub conditions: Vec<F>,

    /// What the rule concludes when it fires.
    pub conclusion: C,
}

impl<F, C> Rule<F, C>
where
    F: Eq + Hash,
{
    /// Whether every condition of this rule is present in `facts`. A rule with
    /// no conditions always matches.
    pub fn matches(&self, facts: &FactSet<F>) -> bool {
        self.conditions.iter().all(|condition| facts.contains(condition))
    }
}

/// Ordered, first-match-wins rule engine over fact type `F` and conclusion
/// type `C`.
#[derive(Debug, Clone)]
pub struct RuleEngine<F, C> {
    rules: Vec<Rule<F, C>>,
    facts: FactSet<F>,
    default_conclusion: C,
}

impl<F, C> RuleEngine<F, C>
where
    F: Copy + Eq + Hash + Debug,
    C: Copy + Debug,
{
    /// Create an engine with no rules and no facts. `default_conclusion` is
    /// returned by [`RuleEngine::decide`] whenever no rule matches.
    pub fn new(default_conclusion: C) -> Self {
        Self {
            rules: Vec::new(),
            facts: FactSet::default(),
            default_conclusion,
        }
    }

    /// Append a rule. Rules added earlier take precedence over later ones.
    pub fn add_rule<I>(&mut self, conditions: I, conclusion: C)
    where
        I: IntoIterator<Item = F>,
    {
        self.rules.push(Rule {
            conditions: conditions.into_iter().collect(),
            conclusion,
        });
    }

    /// Builder form of [`RuleEngine::add_rule`].
    pub fn with_rule<I>(mut self, conditions: I, conclusion: C) -> Self
    where
        I: IntoIterator<Item = F>,
    {
        self.add_rule(conditions, conclusion);
        self
    }

    /// Clear the working set. Call once per decision cycle, before deriving
    /// facts.
    pub fn reset_facts(&mut self) {
        self.facts.clear();
    }

    /// Assert a fact. Asserting the same fact twice has no further effect.
    pub fn assert_fact(&mut self, fact: F) {
        self.facts.insert(fact);
    }

    /// Whether `fact` is currently asserted.
    pub fn is_fact(&self, fact: &F) -> bool {
        self.facts.contains(fact)
    }

    /// Current working set.
    pub fn facts(&self) -> &FactSet<F> {
        &self.facts
    }

    /// Rules in precedence order.
    pub fn rules(&self) -> &[Rule<F, C>] {
        &self.rules
    }

    /// Conclusion returned when nothing matches.
    pub fn default_conclusion(&self) -> C {
        self.default_conclusion
    }

    /// Index of the first rule matching the current facts, or `None` if the
    /// default conclusion would be used.
    pub fn fired_rule(&self) -> Option<usize> {
        self.rules.iter().position(|rule| rule.matches(&self.facts))
    }

    /// Scan the rules in order and return the conclusion of the first one whose
    /// conditions are all asserted, else the default conclusion.
    pub fn decide(&self) -> C {
        match self.fired_rule() {
            Some(index) => self.rules[index].conclusion,
            None => self.default_conclusion,
        }
    }
}
