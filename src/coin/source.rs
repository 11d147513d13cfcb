use super::Outcome;
use crate::Probability;
use rand::Rng;

/// Supplies the uniform draws in `[0, 1)` that decide each flip.
///
/// Injected into the engine so that games can be seeded, replayed, or
/// scripted outcome by outcome.
pub trait Source {
    fn draw(&mut self) -> Probability;
}

impl Source for rand::rngs::SmallRng {
    fn draw(&mut self) -> Probability {
        self.random()
    }
}

impl Source for rand::rngs::StdRng {
    fn draw(&mut self) -> Probability {
        self.random()
    }
}

impl Source for rand::rngs::ThreadRng {
    fn draw(&mut self) -> Probability {
        self.random()
    }
}

impl<S: Source + ?Sized> Source for Box<S> {
    fn draw(&mut self) -> Probability {
        (**self).draw()
    }
}

/// Fixed sequence of draws, repeated once exhausted.
/// An empty script always wins.
#[derive(Debug, Clone, Default)]
pub struct Script {
    draws: Vec<Probability>,
    cursor: usize,
}

impl Script {
    pub fn new(draws: Vec<Probability>) -> Self {
        Self { draws, cursor: 0 }
    }
    /// Number of draws taken so far.
    pub fn taken(&self) -> usize {
        self.cursor
    }
}

impl Source for Script {
    fn draw(&mut self) -> Probability {
        let draw = match self.draws.len() {
            0 => 0.0,
            n => self.draws[self.cursor % n],
        };
        self.cursor += 1;
        draw
    }
}

impl From<&[Outcome]> for Script {
    fn from(outcomes: &[Outcome]) -> Self {
        Self::new(
            outcomes
                .iter()
                .map(|o| match o {
                    Outcome::Win => 0.0,
                    Outcome::Loss => 0.99,
                })
                .collect(),
        )
    }
}

/// One letter per flip, `W` or `L`. Whitespace is ignored.
impl TryFrom<&str> for Script {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Outcome::try_from(c.to_string().as_str()))
            .collect::<anyhow::Result<Vec<Outcome>>>()
            .map(|outcomes| Self::from(outcomes.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    #[test]
    fn seeded_draws_are_uniform_and_repeatable() {
        let mut a = rand::rngs::SmallRng::seed_from_u64(7);
        let mut b = rand::rngs::SmallRng::seed_from_u64(7);
        for _ in 0..1000 {
            let x = a.draw();
            assert!((0.0..1.0).contains(&x));
            assert_eq!(x, b.draw());
        }
    }
    #[test]
    fn win_rate_near_sixty_percent() {
        let ref mut rng = rand::rngs::SmallRng::seed_from_u64(42);
        let wins = (0..100_000)
            .map(|_| Outcome::from_draw(rng.draw()))
            .filter(Outcome::is_win)
            .count();
        assert!((58_000..62_000).contains(&wins), "wins = {}", wins);
    }
    #[test]
    fn script_cycles() {
        let mut script = Script::try_from("WL L").unwrap();
        let outcomes = (0..6)
            .map(|_| Outcome::from_draw(script.draw()))
            .collect::<Vec<_>>();
        use Outcome::*;
        assert_eq!(outcomes, vec![Win, Loss, Loss, Win, Loss, Loss]);
        assert_eq!(script.taken(), 6);
    }
    #[test]
    fn empty_script_wins() {
        let mut script = Script::default();
        assert_eq!(Outcome::from_draw(script.draw()), Outcome::Win);
    }
    #[test]
    fn script_rejects_unknown_letters() {
        assert!(Script::try_from("WLX").is_err());
    }
    #[test]
    fn boxed_sources_draw() {
        let mut source: Box<dyn Source> = Box::new(Script::try_from("L").unwrap());
        assert_eq!(Outcome::from_draw(source.draw()), Outcome::Loss);
    }
}
