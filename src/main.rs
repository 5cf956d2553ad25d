//! Neon Arcade entry point
//!
//! The browser build is driven from JS through the exported classes in the
//! library (see `web`). Natively this runs both games headless with a simple
//! autopilot and logs what happens, which is handy for balance tweaks.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use neon_arcade::highscores::BestScore;
    use neon_arcade::input::InputEvent;
    use neon_arcade::platform::FileStore;
    use neon_arcade::sim::seeded_rng;
    use neon_arcade::{BrickBreaker, FrameDriver, GamePhase, Hockey, Observer, Outcome, Playfield, Settings, Side};

    /// Simulated display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up on a game after this much simulated time
    const TIME_LIMIT_SECS: f64 = 600.0;

    /// Logs the observer hooks a HUD would draw
    #[derive(Default)]
    struct LogHud {
        goals: u32,
    }

    impl Observer for LogHud {
        fn on_score_changed(&mut self, side: Side, score: u32) {
            log::debug!("{:?} score: {}", side, score);
        }

        fn on_lives_changed(&mut self, lives: u32) {
            log::info!("Lives: {}", lives);
        }

        fn on_goal(&mut self, scorer: Side) {
            self.goals += 1;
            log::info!("Goal #{} for {:?}", self.goals, scorer);
        }

        fn on_game_over(&mut self, outcome: Outcome) {
            log::info!("Game over: {}", outcome.as_str());
        }

        fn on_best_score(&mut self, best: u32) {
            log::info!("New best score: {}", best);
        }
    }

    fn store_path() -> std::path::PathBuf {
        std::env::var_os("NEON_ARCADE_STORE")
            .map(Into::into)
            .unwrap_or_else(|| std::env::temp_dir().join("neon_arcade.json"))
    }

    pub fn run() {
        let path = store_path();
        log::info!("Using store at {}", path.display());
        let store = FileStore::open(&path);
        let settings = Settings::load(&store);
        let best = BestScore::load(&store);
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        run_breakout(&settings, best, seed, store);
        run_hockey(&settings);
    }

    /// Paddle chases the ball, aiming slightly off-centre so rebounds wander
    /// across the grid
    fn run_breakout(settings: &Settings, best: BestScore, seed: u64, store: FileStore) {
        let field = Playfield::new(neon_arcade::consts::MAX_PLAYFIELD_WIDTH, settings.breakout.max_height);
        let game = BrickBreaker::new(field, settings.breakout, seeded_rng(seed)).with_best_score(best);
        let mut driver = FrameDriver::new(game, settings).with_store(Box::new(store));
        let mut hud = LogHud::default();

        log::info!("Brick breaker autopilot, seed {}", seed);
        driver.start(&mut hud);

        let mut now = 0.0;
        while driver.phase() == GamePhase::Playing && now < TIME_LIMIT_SECS * 1000.0 {
            let sway = (now / 1000.0 * 0.7).sin() as f32 * 35.0;
            let x = driver.sim().ball.pos.x + sway;
            driver.handle_input(&InputEvent::PointerMove { x, y: 0.0 }, &mut hud);
            driver.frame(now, &mut hud);
            now += FRAME_MS;
        }

        let game = driver.sim();
        log::info!(
            "Brick breaker finished after {:.1}s: score {}, {} bricks left, best {}",
            now / 1000.0,
            game.score,
            game.bricks.alive_count(),
            game.best.value
        );
    }

    /// Player mallet lunges at the puck whenever it is on the player's half
    fn run_hockey(settings: &Settings) {
        let field = Playfield::new(neon_arcade::consts::MAX_PLAYFIELD_WIDTH, settings.hockey.max_height);
        let mut driver = FrameDriver::new(Hockey::new(field, settings.hockey), settings);
        let mut hud = LogHud::default();

        log::info!("Hockey autopilot");
        driver.start(&mut hud);

        let mut now = 0.0;
        while driver.phase() == GamePhase::Playing && now < TIME_LIMIT_SECS * 1000.0 {
            let game = driver.sim();
            let home = Vec2::new(field.width * game.tuning.player_home_x, field.height / 2.0);
            let target = if game.puck.pos.x < field.mid_x() {
                // Come from behind so the hit sends it toward the far goal
                game.puck.pos - Vec2::new(game.player.radius * 0.5, 0.0)
            } else {
                home
            };
            driver.handle_input(
                &InputEvent::PointerMove {
                    x: target.x,
                    y: target.y,
                },
                &mut hud,
            );
            driver.frame(now, &mut hud);
            now += FRAME_MS;
        }

        let game = driver.sim();
        log::info!(
            "Hockey finished after {:.1}s: {} - {}",
            now / 1000.0,
            game.player_score,
            game.opponent_score
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Arcade (native, headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is `web::wasm_main`, this is just to satisfy the compiler
}
