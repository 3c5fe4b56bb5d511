use std::collections::VecDeque;

use rand::Rng;

/// Source of every random decision the engine makes.
pub trait RandomSource {
    /// A single die face in `1..=6`.
    fn roll_die(&mut self) -> u8;

    /// A uniformly chosen index in `0..len`. `len` is never zero.
    fn pick(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn roll_die(&mut self) -> u8 {
        self.gen_range(1..=6)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Replays a fixed list of die faces. Every pick takes the first element.
#[derive(Clone, Debug, Default)]
pub struct LoadedDice {
    faces: VecDeque<u8>,
}

impl LoadedDice {
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        let faces = faces.into_iter().collect::<VecDeque<_>>();
        assert!(
            faces.iter().all(|face| (1..=6).contains(face)),
            "Loaded dice only carry faces 1 through 6."
        );

        Self { faces }
    }

    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl RandomSource for LoadedDice {
    fn roll_die(&mut self) -> u8 {
        self.faces
            .pop_front()
            .expect("Loaded dice ran out of faces")
    }

    fn pick(&mut self, _: usize) -> usize {
        0
    }
}
