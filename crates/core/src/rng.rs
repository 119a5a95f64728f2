//! RNG module - injected source of piece kinds and colors
//!
//! The engine never reaches for randomness directly. It asks a
//! [`PieceSource`] for the next kind and color, drawn independently, so tests
//! can script the sequence and hosts can choose between a seeded generator and
//! the thread-local RNG.

use rand::{thread_rng, Rng};

use crate::types::{Color, PieceKind};

/// Supplier of the next piece's kind and color.
pub trait PieceSource {
    fn next_kind(&mut self) -> PieceKind;
    fn next_color(&mut self) -> Color;
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn next_kind(&mut self) -> PieceKind {
        (**self).next_kind()
    }

    fn next_color(&mut self) -> Color {
        (**self).next_color()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits: the low bits of a power-of-two LCG cycle with short periods.
        (self.next_u32() >> 16) % max
    }

    /// Current generator state
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for SimpleRng {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    fn next_color(&mut self) -> Color {
        Color::ALL[self.next_range(Color::ALL.len() as u32) as usize]
    }
}

/// Uniform draws from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngSource;

impl PieceSource for ThreadRngSource {
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[thread_rng().gen_range(0..PieceKind::ALL.len())]
    }

    fn next_color(&mut self) -> Color {
        Color::ALL[thread_rng().gen_range(0..Color::ALL.len())]
    }
}

/// Replays fixed kind and color sequences, wrapping around at the end.
///
/// An empty sequence yields the first catalog entry.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    kinds: Vec<PieceKind>,
    colors: Vec<Color>,
    kind_idx: usize,
    color_idx: usize,
}

impl ScriptedSource {
    pub fn new(kinds: impl Into<Vec<PieceKind>>, colors: impl Into<Vec<Color>>) -> Self {
        Self {
            kinds: kinds.into(),
            colors: colors.into(),
            kind_idx: 0,
            color_idx: 0,
        }
    }

    /// Always the same kind and color.
    pub fn repeating(kind: PieceKind, color: Color) -> Self {
        Self::new(vec![kind], vec![color])
    }
}

impl PieceSource for ScriptedSource {
    fn next_kind(&mut self) -> PieceKind {
        if self.kinds.is_empty() {
            return PieceKind::ALL[0];
        }
        let kind = self.kinds[self.kind_idx % self.kinds.len()];
        self.kind_idx += 1;
        kind
    }

    fn next_color(&mut self) -> Color {
        if self.colors.is_empty() {
            return Color::ALL[0];
        }
        let color = self.colors[self.color_idx % self.colors.len()];
        self.color_idx += 1;
        color
    }
}
