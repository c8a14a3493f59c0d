//! Launch arguments for the headless app: which game to run and with what seed.

use std::hash::{BuildHasher, Hasher, RandomState};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use arcade_core::GameId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Flag(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Flag(seed) | Self::Generated(seed) => seed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchArgs {
    pub game: GameId,
    pub seed: SeedChoice,
}

static SEED_DRAWS: AtomicU64 = AtomicU64::new(0);

/// Fresh seed for runs launched without `--seed`: wall clock and a draw counter through a
/// randomly keyed hasher.
pub fn generate_runtime_seed() -> u64 {
    let since_epoch = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    let mut hasher = RandomState::new().build_hasher();
    hasher.write_u128(since_epoch.as_nanos());
    hasher.write_u64(SEED_DRAWS.fetch_add(1, Ordering::Relaxed));
    hasher.finish()
}

/// Accepts `--seed N` / `--seed=N` and `--game KEY` / `--game=KEY`, each at most once.
/// The game defaults to Glyph Runner; keys are the best-score keys (`glyphRunner`, `rivetClimb`).
pub fn parse_launch_args(args: &[String], generated_seed: u64) -> Result<LaunchArgs, String> {
    let mut seed = None;
    let mut game = None;
    let mut index = 1usize;

    while index < args.len() {
        let argument = args[index].as_str();
        let (flag, value) = match argument.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (argument, None),
        };
        if flag != "--seed" && flag != "--game" {
            index += 1;
            continue;
        }
        let value = match value {
            Some(value) => value,
            None => {
                index += 1;
                let Some(value) = args.get(index) else {
                    return Err(format!("missing value for {flag}"));
                };
                value.as_str()
            }
        };
        if flag == "--seed" {
            if seed.replace(parse_seed_value(value)?).is_some() {
                return Err("seed provided more than once".to_string());
            }
        } else if game.replace(parse_game_value(value)?).is_some() {
            return Err("game provided more than once".to_string());
        }
        index += 1;
    }

    Ok(LaunchArgs {
        game: game.unwrap_or(GameId::GlyphRunner),
        seed: match seed {
            Some(seed) => SeedChoice::Flag(seed),
            None => SeedChoice::Generated(generated_seed),
        },
    })
}

fn parse_seed_value(raw: &str) -> Result<u64, String> {
    raw.parse::<u64>().map_err(|_| format!("--seed expects a number, got '{raw}'"))
}

fn parse_game_value(raw: &str) -> Result<GameId, String> {
    GameId::from_key(raw).ok_or_else(|| format!("unknown game '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().copied().map(String::from).collect()
    }

    #[test]
    fn defaults_to_the_maze_with_a_generated_seed() {
        let args = argv(&["arcade"]);
        let launch = parse_launch_args(&args, 9_876_543).expect("no flags is valid");
        assert_eq!(launch.game, GameId::GlyphRunner);
        assert_eq!(launch.seed, SeedChoice::Generated(9_876_543));
    }

    #[test]
    fn parses_separate_and_inline_values() {
        let args = argv(&["arcade", "--game", "rivetClimb", "--seed=2026"]);
        let launch = parse_launch_args(&args, 1).expect("valid flags should parse");
        assert_eq!(launch.game, GameId::RivetClimb);
        assert_eq!(launch.seed, SeedChoice::Flag(2_026));
        assert_eq!(launch.seed.value(), 2_026);
    }

    #[test]
    fn errors_when_a_flag_has_no_value() {
        let args = argv(&["arcade", "--seed"]);
        let err = parse_launch_args(&args, 1).expect_err("missing seed value should error");
        assert!(err.contains("missing value for --seed"), "{err}");
    }

    #[test]
    fn errors_on_bad_values() {
        let err = parse_launch_args(&argv(&["arcade", "--seed=abc"]), 1)
            .expect_err("non-numeric seed value should error");
        assert!(err.contains("expects a number"), "{err}");
        let err = parse_launch_args(&argv(&["arcade", "--game", "pong"]), 1)
            .expect_err("unknown game should error");
        assert!(err.contains("unknown game 'pong'"), "{err}");
    }

    #[test]
    fn errors_when_a_flag_is_repeated() {
        let args = argv(&["arcade", "--seed=1", "--seed", "2"]);
        let err = parse_launch_args(&args, 1).expect_err("duplicate seed flags should be rejected");
        assert_eq!(err, "seed provided more than once");
    }

    #[test]
    fn generated_seeds_differ_between_draws() {
        let seeds: Vec<u64> = (0..4).map(|_| generate_runtime_seed()).collect();
        assert!(seeds.windows(2).all(|pair| pair[0] != pair[1]), "{seeds:?}");
    }
}
