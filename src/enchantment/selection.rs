//! # Budgeted Selection
//!
//! Random selection of special abilities under the shared enhancement budget.
//!
//! Selection is a small state machine. While slots remain and the candidate
//! pool is not empty, it takes one of three transitions:
//!
//! 1. [`Transition::BulkTake`]: every remaining candidate fits in the slots
//!    and the budget at once, so all of them are taken
//! 2. [`Transition::ExtraSlot`]: the tables produced the bonus outcome,
//!    granting one more slot
//! 3. [`Transition::Accept`]: the tables produced a candidate, which replaces
//!    any chosen ability of the same family
//!
//! Every accept is followed by a prune of candidates that became weaker than
//! the chosen tier or that no longer fit the budget.

use super::Enchanter;
use crate::{
    collapse_catalog, CatalogAbility, Enchantable, HoardError, HoardResult, Power,
    SpecialAbility, TableSource, BONUS_SPECIAL_ABILITY,
};
use tracing::{debug, trace, warn};

/// One step of the selection state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Take every remaining candidate
    BulkTake,
    /// Grant one more slot
    ExtraSlot,
    /// Take the named candidate
    Accept(String),
}

/// State of one random selection.
#[derive(Debug, Clone)]
pub struct Selection {
    max_bonus: i32,
    table_names: Vec<String>,
    pool: Vec<CatalogAbility>,
    chosen: Vec<CatalogAbility>,
    bonus_sum: i32,
    quantity: usize,
    draws_since_accept: usize,
}

impl Selection {
    /// Starts a selection for an item with the given bonus.
    ///
    /// Candidates the item cannot afford are dropped up front.
    pub fn new(
        bonus: i32,
        quantity: usize,
        max_bonus: i32,
        table_names: Vec<String>,
        mut pool: Vec<CatalogAbility>,
    ) -> Self {
        pool.retain(|candidate| bonus + candidate.bonus_equivalent as i32 <= max_bonus);

        Self {
            max_bonus,
            table_names,
            pool,
            chosen: Vec::new(),
            bonus_sum: bonus,
            quantity,
            draws_since_accept: 0,
        }
    }

    /// Whether no further transition can happen.
    pub fn is_finished(&self) -> bool {
        self.quantity == 0 || self.pool.is_empty()
    }

    /// Item bonus plus the cost of everything chosen so far.
    pub fn bonus_sum(&self) -> i32 {
        self.bonus_sum
    }

    /// Slots still open.
    pub fn quantity(&self) -> usize {
        self.quantity
    }

    pub fn pool(&self) -> &[CatalogAbility] {
        &self.pool
    }

    pub fn chosen(&self) -> &[CatalogAbility] {
        &self.chosen
    }

    /// Whether the whole pool fits in the open slots and the budget.
    pub fn bulk_take_fits(&self) -> bool {
        let pool_cost: i32 = self
            .pool
            .iter()
            .map(|ability| ability.bonus_equivalent as i32)
            .sum();

        self.quantity >= self.pool.len() && pool_cost + self.bonus_sum <= self.max_bonus
    }

    /// Decides the next transition, drawing from the tables if needed.
    ///
    /// Draws that produce neither a candidate nor the bonus outcome are
    /// rejected and redrawn. After `max_draw_attempts` draws without an
    /// accepted candidate the selection fails with
    /// [`HoardError::DrawLimitExceeded`].
    pub fn next_transition(
        &mut self,
        tables: &mut dyn TableSource,
        max_draw_attempts: usize,
    ) -> HoardResult<Transition> {
        if self.bulk_take_fits() {
            return Ok(Transition::BulkTake);
        }

        loop {
            if self.draws_since_accept >= max_draw_attempts {
                warn!(
                    "Gave up on {:?} after {} draws with {} candidates left",
                    self.table_names,
                    self.draws_since_accept,
                    self.pool.len()
                );
                return Err(HoardError::DrawLimitExceeded {
                    tables: self.table_names.clone(),
                    attempts: self.draws_since_accept,
                });
            }
            self.draws_since_accept += 1;

            let index = tables.choose_index(self.table_names.len())?;
            let table = self.table_names.get(index).ok_or_else(|| {
                HoardError::GenerationFailed(format!("table index {} out of range", index))
            })?;
            let name = tables.draw(table)?;

            if name == BONUS_SPECIAL_ABILITY {
                return Ok(Transition::ExtraSlot);
            }
            if self.pool.iter().any(|ability| ability.name == name) {
                return Ok(Transition::Accept(name));
            }

            trace!("Rejected '{}' from {}", name, table);
        }
    }

    /// Applies a transition.
    ///
    /// Accepting a name that is not in the pool is an error and leaves the
    /// selection unchanged.
    pub fn apply(&mut self, transition: Transition) -> HoardResult<()> {
        match transition {
            Transition::BulkTake => self.bulk_take(),
            Transition::ExtraSlot => {
                self.quantity += 1;
                debug!("Bonus outcome drawn, {} slots open", self.quantity);
            }
            Transition::Accept(name) => self.accept(&name)?,
        }
        Ok(())
    }

    fn bulk_take(&mut self) {
        let taken = collapse_catalog(std::mem::take(&mut self.pool));

        let mut bonus_sum = self.bonus_sum;
        self.chosen.retain(|chosen| {
            let replaced = taken
                .iter()
                .any(|ability| ability.base_name == chosen.base_name);
            if replaced {
                bonus_sum -= chosen.bonus_equivalent as i32;
            }
            !replaced
        });
        bonus_sum += taken
            .iter()
            .map(|ability| ability.bonus_equivalent as i32)
            .sum::<i32>();

        debug!("Took all {} remaining candidates", taken.len());
        self.bonus_sum = bonus_sum;
        self.chosen.extend(taken);
    }

    fn accept(&mut self, name: &str) -> HoardResult<()> {
        let position = self
            .pool
            .iter()
            .position(|ability| ability.name == name)
            .ok_or_else(|| HoardError::NotACandidate(name.to_string()))?;
        let ability = self.pool.remove(position);
        self.pool.retain(|candidate| candidate.name != ability.name);

        if let Some(replaced) = self
            .chosen
            .iter()
            .position(|chosen| chosen.base_name == ability.base_name)
        {
            let replaced = self.chosen.remove(replaced);
            self.bonus_sum -= replaced.bonus_equivalent as i32;
            debug!("'{}' replaces '{}'", ability.name, replaced.name);
        }

        self.bonus_sum += ability.bonus_equivalent as i32;
        self.quantity = self.quantity.saturating_sub(1);
        self.draws_since_accept = 0;
        debug!(
            "Accepted '{}', budget {}/{}",
            ability.name, self.bonus_sum, self.max_bonus
        );

        self.prune(&ability);
        self.chosen.push(ability);
        Ok(())
    }

    /// Drops candidates below the accepted tier of its family and candidates
    /// the budget can no longer afford.
    fn prune(&mut self, accepted: &CatalogAbility) {
        let bonus_sum = self.bonus_sum;
        let max_bonus = self.max_bonus;

        self.pool.retain(|candidate| {
            let weaker = candidate.base_name == accepted.base_name && candidate.power < accepted.power;
            let affordable = candidate.bonus_equivalent as i32 + bonus_sum <= max_bonus;
            !weaker && affordable
        });
    }

    /// The chosen abilities.
    pub fn into_chosen(self) -> Vec<SpecialAbility> {
        self.chosen.into_iter().map(SpecialAbility::from).collect()
    }
}

impl<'c> Enchanter<'c> {
    /// Randomly selects up to `quantity` abilities for an item.
    ///
    /// Nothing is drawn for an item without a positive bonus or for a
    /// quantity of zero. Fewer abilities than asked for come back when the
    /// candidates run out, or when the tables stop producing candidates
    /// within `max_draw_attempts` draws; neither is an error.
    pub fn select_random<T: Enchantable + ?Sized>(
        &self,
        target: &T,
        power: Power,
        quantity: usize,
        tables: &mut dyn TableSource,
    ) -> HoardResult<Vec<SpecialAbility>> {
        let item = target.item();
        if item.bonus <= 0 || quantity == 0 {
            return Ok(Vec::new());
        }

        let pool = self.candidate_pool(target, power, &*tables)?;
        let mut selection = Selection::new(
            item.bonus,
            quantity,
            self.config().max_bonus,
            self.table_names(item, power),
            pool,
        );

        while !selection.is_finished() {
            match selection.next_transition(tables, self.config().max_draw_attempts) {
                Ok(transition) => selection.apply(transition)?,
                Err(HoardError::DrawLimitExceeded {
                    tables: names,
                    attempts,
                }) => {
                    warn!(
                        "Stopping selection for {} after {} fruitless draws on {:?}; keeping {} abilities",
                        item.name,
                        attempts,
                        names,
                        selection.chosen().len()
                    );
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        let chosen = selection.into_chosen();
        debug!(
            "Selected {} of {} abilities for {}",
            chosen.len(),
            quantity,
            item.name
        );
        Ok(chosen)
    }
}
