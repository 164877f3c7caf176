use serde::Serialize;

use super::repo_types::Meal;

/// Aggregate numbers over a user's meals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealMetrics {
    pub total_meals: u64,
    pub meals_on_diet: u64,
    pub meals_off_diet: u64,
    /// Longest run of consecutive on-diet meals, in recording order.
    pub best_sequence: u64,
}

impl MealMetrics {
    /// Single pass over the on-diet flags, in the order the meals were recorded.
    pub fn from_flags<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        let mut total: u64 = 0;
        let mut on_diet: u64 = 0;
        let mut current: u64 = 0;
        let mut best: u64 = 0;

        for is_on_diet in flags {
            total += 1;
            if is_on_diet {
                on_diet += 1;
                current += 1;
                best = best.max(current);
            } else {
                current = 0;
            }
        }

        Self {
            total_meals: total,
            meals_on_diet: on_diet,
            meals_off_diet: total - on_diet,
            best_sequence: best,
        }
    }

    pub fn from_meals(meals: &[Meal]) -> Self {
        Self::from_flags(meals.iter().map(|m| m.is_on_diet))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn metrics(flags: &[bool]) -> MealMetrics {
        MealMetrics::from_flags(flags.iter().copied())
    }

    #[test]
    fn empty_history_is_all_zero() {
        assert_eq!(metrics(&[]), MealMetrics::default());
    }

    #[test]
    fn streak_resets_on_off_diet_meal() {
        let m = metrics(&[true, true, false, true]);
        assert_eq!(m.best_sequence, 2);
        assert_eq!(m.total_meals, 4);
        assert_eq!(m.meals_on_diet, 3);
        assert_eq!(m.meals_off_diet, 1);
    }

    #[test]
    fn all_off_diet_has_no_streak() {
        assert_eq!(metrics(&[false, false]).best_sequence, 0);
    }

    #[test]
    fn all_on_diet_streak_equals_total() {
        let m = metrics(&[true, true, true]);
        assert_eq!(m.best_sequence, 3);
        assert_eq!(m.best_sequence, m.total_meals);
    }

    #[test]
    fn single_meal_on_diet() {
        assert_eq!(metrics(&[true]).best_sequence, 1);
    }

    #[test]
    fn later_streak_can_beat_earlier_one() {
        assert_eq!(metrics(&[true, false, true, true, true, false, true]).best_sequence, 3);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(metrics(&[true, false])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalMeals": 2,
                "mealsOnDiet": 1,
                "mealsOffDiet": 1,
                "bestSequence": 1
            })
        );
    }

    fn flag_runs() -> impl Strategy<Value = Vec<bool>> {
        proptest::collection::vec(any::<bool>(), 0..64)
    }

    proptest! {
        #[test]
        fn on_plus_off_is_total(flags in flag_runs()) {
            let m = metrics(&flags);
            prop_assert_eq!(m.meals_on_diet + m.meals_off_diet, m.total_meals);
            prop_assert_eq!(m.total_meals, flags.len() as u64);
        }

        #[test]
        fn best_sequence_matches_longest_true_run(flags in flag_runs()) {
            let longest = flags
                .split(|f| !*f)
                .map(|run| run.len() as u64)
                .max()
                .unwrap_or(0);
            let m = metrics(&flags);
            prop_assert_eq!(m.best_sequence, longest);
            prop_assert!(m.best_sequence <= m.meals_on_diet);
        }
    }
}
