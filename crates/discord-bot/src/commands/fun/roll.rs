//! Roll command - rolls dice in `NdM` notation.

use crate::commands::{Category, CommandContext, CommandHandler};
use crate::error::{AppError, AppResult};
use async_trait::async_trait;
use rand::Rng;

const MAX_DICE: u32 = 20;
const MAX_SIDES: u32 = 1000;

/// A parsed `NdM` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dice {
    pub count: u32,
    pub sides: u32,
}

impl Default for Dice {
    fn default() -> Self {
        Self { count: 1, sides: 6 }
    }
}

impl Dice {
    /// Parse `NdM` or `dM`.
    pub fn parse(spec: &str) -> AppResult<Self> {
        let invalid = || AppError::InvalidArgument(format!("not a dice expression: {}", spec));

        let (count, sides) = spec.to_lowercase().split_once('d').ok_or_else(invalid).and_then(
            |(count, sides)| {
                let count = if count.is_empty() {
                    1
                } else {
                    count.parse::<u32>().map_err(|_| invalid())?
                };
                let sides = sides.parse::<u32>().map_err(|_| invalid())?;
                Ok((count, sides))
            },
        )?;

        if !(1..=MAX_DICE).contains(&count) {
            return Err(AppError::InvalidArgument(format!(
                "dice count must be between 1 and {}",
                MAX_DICE
            )));
        }
        if !(2..=MAX_SIDES).contains(&sides) {
            return Err(AppError::InvalidArgument(format!(
                "dice sides must be between 2 and {}",
                MAX_SIDES
            )));
        }

        Ok(Self { count, sides })
    }

    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<u32> {
        (0..self.count)
            .map(|_| rng.gen_range(1..=self.sides))
            .collect()
    }
}

/// Render a roll result.
pub fn format_roll(dice: Dice, rolls: &[u32]) -> String {
    if let [single] = rolls {
        return format!("🎲 you rolled **{}** (d{})", single, dice.sides);
    }
    let total: u32 = rolls.iter().sum();
    let parts: Vec<String> = rolls.iter().map(|r| r.to_string()).collect();
    format!(
        "🎲 {}d{}: {} = **{}**",
        dice.count,
        dice.sides,
        parts.join(" + "),
        total
    )
}

pub struct RollHandler;

#[async_trait]
impl CommandHandler for RollHandler {
    fn name(&self) -> &str {
        "roll"
    }

    fn category(&self) -> Category {
        Category::Fun
    }

    fn description(&self) -> &str {
        "Roll dice (default 1d6)"
    }

    fn usage(&self) -> Option<&str> {
        Some("[NdM]")
    }

    async fn execute(&self, ctx: &CommandContext, args: &[String]) -> AppResult<()> {
        let dice = match args.first() {
            Some(spec) => Dice::parse(spec)?,
            None => Dice::default(),
        };
        let rolls = dice.roll(&mut rand::thread_rng());
        ctx.reply(&format_roll(dice, &rolls)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{args, context, MockChat};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_parse() {
        assert_eq!(Dice::parse("2d20").unwrap(), Dice { count: 2, sides: 20 });
        assert_eq!(Dice::parse("D8").unwrap(), Dice { count: 1, sides: 8 });
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for spec in ["", "d", "2x6", "0d6", "21d6", "1d1", "1d1001", "-1d6", "abc"] {
            assert!(
                matches!(Dice::parse(spec), Err(AppError::InvalidArgument(_))),
                "{} should be rejected",
                spec
            );
        }
    }

    #[test]
    fn test_rolls_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let dice = Dice { count: 20, sides: 6 };
        for _ in 0..50 {
            let rolls = dice.roll(&mut rng);
            assert_eq!(rolls.len(), 20);
            assert!(rolls.iter().all(|r| (1..=6).contains(r)));
        }
    }

    #[test]
    fn test_format_roll() {
        assert_eq!(
            format_roll(Dice::default(), &[4]),
            "🎲 you rolled **4** (d6)"
        );
        assert_eq!(
            format_roll(Dice { count: 3, sides: 6 }, &[1, 2, 6]),
            "🎲 3d6: 1 + 2 + 6 = **9**"
        );
    }

    #[tokio::test]
    async fn test_invalid_spec_is_an_error() {
        let mut chat = MockChat::new();
        chat.expect_send().never();

        let ctx = context(chat, "!roll lots");
        let result = RollHandler.execute(&ctx, &args(&["lots"])).await;
        assert!(matches!(result, Err(AppError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_default_roll_replies_once() {
        let mut chat = MockChat::new();
        chat.expect_send()
            .withf(|_, text| text.contains("you rolled"))
            .times(1)
            .returning(|_, _| Ok(()));

        let ctx = context(chat, "!roll");
        RollHandler.execute(&ctx, &args(&[])).await.unwrap();
    }
}
