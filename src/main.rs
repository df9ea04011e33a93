//! Threes Sim entry point
//!
//! Native builds play seeded games headlessly with an autoplay policy.
//! The browser build drives the library through `threes_sim::wasm` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::{Parser, ValueEnum};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use threes_sim::GameConfig;
    use threes_sim::consts::DEALT_TILE_COUNT;
    use threes_sim::settings::InitialLayout;
    use threes_sim::sim::{GameSession, Policy, choose_direction};

    /// Opening layouts selectable from the command line
    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    enum LayoutArg {
        /// Three 1s and two 2s
        Classic,
        /// Nine cells, each 1, 2 or 3
        Dealt,
    }

    impl From<LayoutArg> for InitialLayout {
        fn from(arg: LayoutArg) -> Self {
            match arg {
                LayoutArg::Classic => InitialLayout::Classic,
                LayoutArg::Dealt => InitialLayout::Dealt {
                    count: DEALT_TILE_COUNT,
                },
            }
        }
    }

    /// Play Threes games with an automatic policy
    #[derive(Debug, Parser)]
    #[command(version, about)]
    struct Args {
        /// Seed of the first game; later games use seed + n
        #[arg(long)]
        seed: Option<u64>,
        /// Number of games to play
        #[arg(long, default_value_t = 1)]
        games: u32,
        /// Move selection policy
        #[arg(long, value_enum, default_value_t = Policy::Greedy)]
        policy: Policy,
        /// JSON config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Override the opening layout
        #[arg(long, value_enum)]
        layout: Option<LayoutArg>,
        /// Print the final board of every game
        #[arg(long)]
        show_board: bool,
    }

    pub fn run() -> anyhow::Result<()> {
        env_logger::init();
        let args = Args::parse();

        let policy = args.policy;
        let mut config = match &args.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(layout) = args.layout {
            config.initial_layout = layout.into();
        }

        let base_seed = args.seed.unwrap_or_else(rand::random);
        log::info!(
            "Threes Sim starting: {} game(s), policy={}, seed={}",
            args.games,
            policy.as_str(),
            base_seed
        );

        let mut policy_rng = Pcg32::seed_from_u64(base_seed ^ 0x5DEE_CE66);
        let mut best: Option<(u64, u64)> = None;
        let mut total = 0u64;

        for game in 0..args.games {
            let seed = base_seed.wrapping_add(game as u64);
            let mut session = GameSession::try_new(config.clone(), Some(seed))?;
            while let Some(direction) = choose_direction(&session, policy, &mut policy_rng) {
                session.try_move(direction);
            }

            println!(
                "game {:>3}  seed {:>20}  moves {:>5}  best tile {:>5}  score {:>9}",
                game + 1,
                seed,
                session.num_moves(),
                session.board().highest_tile(),
                session.score()
            );
            if args.show_board {
                println!("{}", session.board());
            }

            total += session.score();
            if best.is_none_or(|(_, score)| session.score() > score) {
                best = Some((seed, session.score()));
            }
        }

        if let Some((seed, score)) = best {
            println!(
                "best score {} (seed {}), mean {:.1}",
                score,
                seed,
                total as f64 / args.games as f64
            );
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {}
