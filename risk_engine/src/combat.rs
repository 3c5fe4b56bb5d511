use std::cmp::Reverse;

use tracing::debug;

use crate::random::RandomSource;

/// Rolls `count` dice, highest first.
pub fn roll_dice<R: RandomSource + ?Sized>(rng: &mut R, count: u32) -> Vec<u8> {
    let mut rolls = std::iter::repeat_with(|| rng.roll_die())
        .take(count as usize)
        .collect::<Vec<_>>();

    rolls.sort_unstable_by_key(|&x| Reverse(x));
    rolls
}

/// Pairs the highest dice of each side. Every pair the attacker wins counts +1,
/// every pair the defender wins (ties included) counts -1.
pub fn compare_rolls(attack_rolls: &[u8], defend_rolls: &[u8]) -> i32 {
    attack_rolls
        .iter()
        .zip(defend_rolls)
        .map(|(a, d)| if a > d { 1 } else { -1 })
        .sum()
}

pub fn decide_battle<R: RandomSource + ?Sized>(
    rng: &mut R,
    attack_count: u32,
    defend_count: u32,
) -> i32 {
    let attack_rolls = roll_dice(rng, attack_count);
    let defend_rolls = roll_dice(rng, defend_count);
    let net = compare_rolls(&attack_rolls, &defend_rolls);

    debug!(?attack_rolls, ?defend_rolls, net, "dice rolled");
    net
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::LoadedDice;

    #[test]
    fn attacker_sweeps() {
        assert_eq!(compare_rolls(&[6, 5, 4], &[3, 2]), 2);
    }

    #[test]
    fn single_die_loses() {
        assert_eq!(compare_rolls(&[1], &[3, 2]), -1);
    }

    #[test]
    fn ties_go_to_defender() {
        assert_eq!(compare_rolls(&[5, 4], &[5, 4]), -2);
    }

    #[test]
    fn rolls_are_sorted_before_pairing() {
        let mut dice = LoadedDice::new([2, 6, 4, 3, 6]);
        assert_eq!(decide_battle(&mut dice, 3, 2), 0);
        assert_eq!(dice.remaining(), 0);
    }
}
