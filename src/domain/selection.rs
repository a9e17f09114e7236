use std::time::{Duration, Instant};

use super::catalog::{Complement, ComplementCategory, ComplementId};

/// How long a limit warning stays visible.
pub const WARNING_TTL: Duration = Duration::from_secs(2);

/// Complement selection state for one product page.
///
/// Selecting past a category's limit is rejected and raises a transient
/// warning instead of mutating the selection. The clock is passed in by the
/// caller so expiry is deterministic under test.
#[derive(Debug, Default)]
pub struct ComplementPicker {
    selected: Vec<ComplementId>,
    warnings: Vec<Warning>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub category: ComplementCategory,
    pub message: String,
    expires_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Selected,
    Deselected,
    LimitReached,
}

impl ComplementPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[ComplementId] {
        &self.selected
    }

    pub fn into_selected(self) -> Vec<ComplementId> {
        self.selected
    }

    /// Warnings that have not expired yet.
    pub fn warnings(&self, now: Instant) -> impl Iterator<Item = &Warning> {
        self.warnings.iter().filter(move |w| w.expires_at > now)
    }

    pub fn purge_expired(&mut self, now: Instant) {
        self.warnings.retain(|w| w.expires_at > now);
    }

    /// Toggle `target`. Deselection is always allowed; selection is rejected
    /// once the category's limit is reached.
    ///
    /// `catalog` is the complement list offered on the page, used to count
    /// how many of the current selections share `target`'s category.
    pub fn toggle(
        &mut self,
        target: &Complement,
        catalog: &[Complement],
        now: Instant,
    ) -> ToggleOutcome {
        self.purge_expired(now);

        if let Some(pos) = self.selected.iter().position(|id| id == &target.id) {
            self.selected.remove(pos);
            return ToggleOutcome::Deselected;
        }

        if let Some(limit) = target.category.limit() {
            let in_category = self
                .selected
                .iter()
                .filter(|id| {
                    catalog
                        .iter()
                        .any(|c| &c.id == *id && c.category == target.category)
                })
                .count();
            if in_category >= limit {
                self.warn(target.category, limit, now);
                return ToggleOutcome::LimitReached;
            }
        }

        self.selected.push(target.id.clone());
        ToggleOutcome::Selected
    }

    fn warn(&mut self, category: ComplementCategory, limit: usize, now: Instant) {
        // One warning per category; a repeat offense restarts the timer.
        self.warnings.retain(|w| w.category != category);
        self.warnings.push(Warning {
            category,
            message: format!(
                "Limite de {limit} item(s) alcançado para {}",
                category.label()
            ),
            expires_at: now + WARNING_TTL,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;

    fn complement(id: &str, category: ComplementCategory) -> Complement {
        Complement {
            id: id.to_string(),
            name: id.to_string(),
            category,
            price: BigDecimal::from(0),
            active: true,
        }
    }

    fn catalog() -> Vec<Complement> {
        vec![
            complement("morango", ComplementCategory::Fruit),
            complement("banana", ComplementCategory::Fruit),
            complement("leite-condensado", ComplementCategory::Topping),
            complement("granola", ComplementCategory::Extra),
            complement("pacoca", ComplementCategory::Extra),
            complement("leite-ninho", ComplementCategory::Extra),
            complement("castanha", ComplementCategory::Extra),
        ]
    }

    #[test]
    fn fruit_limit_rejects_second_selection() {
        let catalog = catalog();
        let now = Instant::now();
        let mut picker = ComplementPicker::new();

        assert_eq!(
            picker.toggle(&catalog[0], &catalog, now),
            ToggleOutcome::Selected
        );
        assert_eq!(
            picker.toggle(&catalog[1], &catalog, now),
            ToggleOutcome::LimitReached
        );
        assert_eq!(picker.selected(), ["morango".to_string()]);

        let warnings: Vec<_> = picker.warnings(now).collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].message,
            "Limite de 1 item(s) alcançado para fruta"
        );
    }

    #[test]
    fn warning_expires_after_ttl() {
        let catalog = catalog();
        let now = Instant::now();
        let mut picker = ComplementPicker::new();

        picker.toggle(&catalog[0], &catalog, now);
        picker.toggle(&catalog[1], &catalog, now);
        assert_eq!(picker.warnings(now).count(), 1);
        assert_eq!(picker.warnings(now + WARNING_TTL).count(), 0);

        picker.purge_expired(now + WARNING_TTL);
        assert_eq!(picker.warnings(now).count(), 0);
    }

    #[test]
    fn deselect_is_always_allowed() {
        let catalog = catalog();
        let now = Instant::now();
        let mut picker = ComplementPicker::new();

        picker.toggle(&catalog[0], &catalog, now);
        assert_eq!(
            picker.toggle(&catalog[0], &catalog, now),
            ToggleOutcome::Deselected
        );
        assert!(picker.selected().is_empty());

        // Deselecting freed the slot, so another fruit fits again.
        assert_eq!(
            picker.toggle(&catalog[1], &catalog, now),
            ToggleOutcome::Selected
        );
    }

    #[test]
    fn extras_allow_three_then_reject() {
        let catalog = catalog();
        let now = Instant::now();
        let mut picker = ComplementPicker::new();

        for extra in &catalog[3..6] {
            assert_eq!(picker.toggle(extra, &catalog, now), ToggleOutcome::Selected);
        }
        assert_eq!(
            picker.toggle(&catalog[6], &catalog, now),
            ToggleOutcome::LimitReached
        );
        assert_eq!(picker.selected().len(), 3);
    }

    #[test]
    fn limits_are_tracked_per_category() {
        let catalog = catalog();
        let now = Instant::now();
        let mut picker = ComplementPicker::new();

        picker.toggle(&catalog[0], &catalog, now); // fruit
        assert_eq!(
            picker.toggle(&catalog[2], &catalog, now), // topping
            ToggleOutcome::Selected
        );
        assert_eq!(
            picker.toggle(&catalog[3], &catalog, now), // extra
            ToggleOutcome::Selected
        );
    }
}
