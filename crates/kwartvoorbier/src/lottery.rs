//! # Pickup Lottery
//!
//! Picks who fetches the drinks today. Every client computes the same winner on its own:
//! the seed depends only on the date and the set of participants, and the generator is
//! a fixed 32-bit algorithm.
//!
//! 1. Sort the names by UTF-16 code units and join them with `,`.
//! 2. Prefix the date as `{year}-{month0}-{day}`, month counted from 0, no separator.
//! 3. Hash with `h = h * 31 + unit` over the UTF-16 units, wrapping at `i32`.
//! 4. Seed [`Mulberry32`] with the hash and draw one float in `[0, 1)`.
//! 5. `index = floor(draw * len)` into the list **as passed in**, not the sorted one.
//!
//! Because of step 5 the winner depends on the caller's ordering even though the seed
//! does not. Clients must therefore pass participants in the same order, which
//! [`participants_for`] guarantees for a shared order list.

use crate::model::Order;
use chrono::{Datelike, NaiveDate};
use std::time::Duration;
use tracing::{debug, info};

/// Outcome of a draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draw {
    Winner {
        name: String,
        index: usize,
        seed: i32,
    },
    /// Fewer than two people ordered; nobody is drawn.
    NotEnoughParticipants { count: usize },
}

impl Draw {
    pub fn winner(&self) -> Option<&str> {
        match self {
            Draw::Winner { name, .. } => Some(name),
            Draw::NotEnoughParticipants { .. } => None,
        }
    }
}

/// Distinct customer names of the orders placed on `date`, in order of first appearance.
pub fn participants_for(orders: &[Order], date: NaiveDate) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for order in orders.iter().filter(|o| o.is_created_on(date)) {
        if !names.contains(&order.customer_name) {
            names.push(order.customer_name.clone());
        }
    }
    names
}

/// The string the seed is hashed from.
pub fn canonical_input(date: NaiveDate, participants: &[String]) -> String {
    let mut sorted: Vec<&str> = participants.iter().map(String::as_str).collect();
    sorted.sort_by(|a, b| a.encode_utf16().cmp(b.encode_utf16()));
    format!(
        "{}-{}-{}{}",
        date.year(),
        date.month0(),
        date.day(),
        sorted.join(",")
    )
}

fn rolling_hash(input: &str) -> i32 {
    input
        .encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Seed for `date` and this set of participants. Independent of their order.
pub fn daily_seed(date: NaiveDate, participants: &[String]) -> i32 {
    rolling_hash(&canonical_input(date, participants))
}

/// The mulberry32 generator: 32 bits of state, one add and a few multiply/xor-shifts per
/// draw.
#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(seed: i32) -> Self {
        Self { state: seed as u32 }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6D2B_79F5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }
}

/// Draws today's winner from `participants`.
pub fn draw(participants: &[String], date: NaiveDate) -> Draw {
    let count = participants.len();
    if count < 2 {
        debug!(count, "Not enough participants for a draw");
        return Draw::NotEnoughParticipants { count };
    }

    let seed = daily_seed(date, participants);
    let roll = Mulberry32::new(seed).next_f64();
    let index = ((roll * count as f64).floor() as usize).min(count - 1);
    debug!(seed, roll, index, "Lottery drawn");

    Draw::Winner {
        name: participants[index].clone(),
        index,
        seed,
    }
}

/// [`draw`] with a suspense pause before the result is handed back.
///
/// The winner is computed before the pause, so the delay can't influence it.
pub async fn reveal(participants: &[String], date: NaiveDate, delay: Duration) -> Draw {
    let result = draw(participants, date);
    tokio::time::sleep(delay).await;
    match &result {
        Draw::Winner { name, .. } => info!(winner = %name, "Lottery winner revealed"),
        Draw::NotEnoughParticipants { count } => info!(count, "No lottery today"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LocationId, OrderId, ProductId, ProfileId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn order(id: u32, name: &str, day: u32) -> Order {
        Order {
            id: OrderId(id),
            customer_name: name.into(),
            user_id: ProfileId(id),
            product_id: ProductId(1),
            location_id: LocationId(1),
            created_at: date(2024, 1, day).and_hms_opt(15, 50, 0).unwrap(),
            collected: false,
            delivered: false,
        }
    }

    #[test]
    fn test_canonical_input_uses_zero_based_month() {
        assert_eq!(
            canonical_input(date(2024, 1, 4), &names(&["Bo", "Ana"])),
            "2024-0-4Ana,Bo"
        );
        assert_eq!(
            canonical_input(date(2025, 12, 31), &names(&["Cas"])),
            "2025-11-31Cas"
        );
    }

    #[test]
    fn test_seed_is_pinned() {
        assert_eq!(daily_seed(date(2024, 1, 4), &names(&["Ana", "Bo"])), -918_178_961);
        assert_eq!(daily_seed(date(2024, 1, 5), &names(&["Ana", "Bo"])), -30_675_280);
        assert_eq!(daily_seed(date(2024, 1, 6), &names(&["Ana", "Bo"])), 856_828_401);
        assert_eq!(
            daily_seed(date(2025, 6, 12), &names(&["Ana", "Bo", "Cas", "Dirk"])),
            -1_200_018_185
        );
    }

    #[test]
    fn test_seed_ignores_participant_order() {
        let day = date(2024, 1, 4);
        assert_eq!(
            daily_seed(day, &names(&["Cas", "Ana", "Bo"])),
            daily_seed(day, &names(&["Bo", "Cas", "Ana"]))
        );
        assert_eq!(daily_seed(day, &names(&["Ana", "Bo", "Cas"])), 2_137_353_208);
    }

    #[test]
    fn test_sort_uses_utf16_units() {
        // 'Z' (0x5A) < 'Å' (0xC5): code-unit order, not alphabetical.
        let day = date(2024, 1, 4);
        let participants = names(&["Zoë", "Åsa", "Bo"]);
        assert_eq!(canonical_input(day, &participants), "2024-0-4Bo,Zoë,Åsa");
        assert_eq!(daily_seed(day, &participants), 1_532_168_232);
    }

    #[test]
    fn test_generator_first_draw() {
        let roll = Mulberry32::new(-918_178_961).next_f64();
        assert!((roll - 0.336_078_953_696_414_83).abs() < 1e-15);
    }

    #[test]
    fn test_pinned_winners() {
        let ana_bo = names(&["Ana", "Bo"]);
        assert_eq!(
            draw(&ana_bo, date(2024, 1, 4)),
            Draw::Winner {
                name: "Ana".into(),
                index: 0,
                seed: -918_178_961
            }
        );
        assert_eq!(draw(&ana_bo, date(2024, 1, 5)).winner(), Some("Ana"));
        assert_eq!(draw(&ana_bo, date(2024, 1, 6)).winner(), Some("Bo"));
        assert_eq!(
            draw(&names(&["Ana", "Bo", "Cas"]), date(2024, 1, 4)).winner(),
            Some("Bo")
        );
        assert_eq!(
            draw(&names(&["Ana", "Bo", "Cas", "Dirk"]), date(2025, 6, 12)).winner(),
            Some("Ana")
        );
    }

    #[test]
    fn test_index_follows_caller_order() {
        // Same seed, same index, but the list as passed in decides who that is.
        let day = date(2024, 1, 4);
        assert_eq!(draw(&names(&["Ana", "Bo"]), day).winner(), Some("Ana"));
        assert_eq!(draw(&names(&["Bo", "Ana"]), day).winner(), Some("Bo"));
    }

    #[test]
    fn test_draw_is_repeatable() {
        let participants = names(&["Ana", "Bo", "Cas"]);
        let first = draw(&participants, date(2024, 3, 14));
        for _ in 0..10 {
            assert_eq!(draw(&participants, date(2024, 3, 14)), first);
        }
    }

    #[test]
    fn test_fewer_than_two_participants() {
        let day = date(2024, 1, 4);
        assert_eq!(draw(&[], day), Draw::NotEnoughParticipants { count: 0 });
        assert_eq!(
            draw(&names(&["Ana"]), day),
            Draw::NotEnoughParticipants { count: 1 }
        );
        assert_eq!(draw(&names(&["Ana"]), day).winner(), None);
    }

    #[test]
    fn test_participants_are_distinct_names_from_that_day() {
        let orders = vec![
            order(4, "Cas", 5),
            order(3, "Bo", 4),
            order(2, "Ana", 4),
            order(1, "Bo", 4),
        ];
        assert_eq!(
            participants_for(&orders, date(2024, 1, 4)),
            names(&["Bo", "Ana"])
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_reveal_waits_without_changing_the_winner() {
        let participants = names(&["Ana", "Bo"]);
        let start = tokio::time::Instant::now();

        let revealed = reveal(&participants, date(2024, 1, 4), Duration::from_millis(1500)).await;

        assert!(start.elapsed() >= Duration::from_millis(1500));
        assert_eq!(revealed, draw(&participants, date(2024, 1, 4)));
    }
}
