use super::*;
use crate::input::Key;

const SEED: u32 = 0xDEAD_BEEF;

fn quiet_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.asteroid_spawn_rate = 10_000;
    config
}

fn click_start(game: &mut Game) {
    let (x, y) = game.title().title_rect().center();
    game.handle_events(&[InputEvent::MouseDown { x, y }]);
}

fn started_game(config: GameConfig) -> Game {
    let mut game = Game::new(config, SEED);
    click_start(&mut game);
    assert_eq!(game.state(), StateId::Gameplay);
    game.gameplay_mut().clear_asteroids();
    game
}

fn still_asteroid(x: f32, y: f32, size: f32) -> Asteroid {
    let mut rng = SeededRng::new(1);
    let mut asteroid = Asteroid::spawn(x, y, Some(size), &GameConfig::default(), &mut rng);
    asteroid.body.vx = 0.0;
    asteroid.body.vy = 0.0;
    asteroid.rotation_speed = 0.0;
    asteroid
}

fn fire(game: &mut Game) {
    game.handle_events(&[InputEvent::KeyDown(Key::Fire)]);
}

#[test]
fn new_game_waits_on_title_with_populated_field() {
    let config = GameConfig::default();
    let game = Game::new(config, SEED);

    assert_eq!(game.state(), StateId::Title);
    assert_eq!(game.session().score, 0);
    assert_eq!(game.session().lives, config.initial_lives);
    assert_eq!(
        game.gameplay().asteroids().len(),
        config.asteroid_count as usize
    );
}

#[test]
fn click_outside_title_region_does_nothing() {
    let mut game = Game::new(GameConfig::default(), SEED);
    game.handle_events(&[InputEvent::MouseDown { x: 5.0, y: 5.0 }]);
    assert_eq!(game.state(), StateId::Title);
}

#[test]
fn initial_asteroids_spawn_just_outside_an_edge() {
    let config = GameConfig::default();
    let margin = config.asteroid_max_size as f32;
    let game = Game::new(config, 0x0BAD_F00D);

    for asteroid in game.gameplay().asteroids() {
        let (x, y) = (asteroid.body.x, asteroid.body.y);
        let on_edge = x == -margin
            || y == -margin
            || x == config.screen_width + margin
            || y == config.screen_height + margin;
        assert!(on_edge, "asteroid at ({x}, {y}) is not on an edge");
    }
}

#[test]
fn asteroid_on_ship_costs_one_life_and_leaves_explosion() {
    let config = quiet_config();
    let mut game = started_game(config);
    let (sx, sy) = (game.gameplay().ship().body.x, game.gameplay().ship().body.y);
    game.gameplay_mut().push_asteroid(still_asteroid(sx, sy, 30.0));

    game.update(HeldKeys::default());

    let gameplay = game.gameplay();
    assert!(gameplay.asteroids().is_empty());
    assert_eq!(gameplay.explosions().len(), 1);
    assert_eq!(
        (gameplay.explosions()[0].x, gameplay.explosions()[0].y),
        (sx, sy)
    );
    assert_eq!(game.session().lives, config.initial_lives - 1);
    assert_eq!(game.state(), StateId::Gameplay);
}

#[test]
fn respawned_ship_is_fresh_at_centre() {
    let config = quiet_config();
    let mut game = started_game(config);
    {
        let ship = game.gameplay_mut().ship_mut();
        ship.body.angle = 135.0;
        ship.body.vx = 0.0;
        ship.body.vy = 0.0;
    }
    let (sx, sy) = (game.gameplay().ship().body.x, game.gameplay().ship().body.y);
    game.gameplay_mut().push_asteroid(still_asteroid(sx, sy, 30.0));

    game.update(HeldKeys::default());

    let ship = game.gameplay().ship();
    assert_eq!((ship.body.x, ship.body.y), config.center());
    assert_eq!(ship.body.angle, 0.0);
    assert_eq!((ship.body.vx, ship.body.vy), (0.0, 0.0));
}

#[test]
fn missile_hit_removes_both_and_scores() {
    let config = quiet_config();
    let mut game = started_game(config);

    fire(&mut game);
    let missile = game.gameplay().missiles()[0];
    let after_advance_y = missile.body.y + missile.body.vy;
    game.gameplay_mut()
        .push_asteroid(still_asteroid(missile.body.x, after_advance_y, 5.0));

    game.update(HeldKeys::default());

    let gameplay = game.gameplay();
    assert!(gameplay.missiles().is_empty());
    assert!(gameplay.asteroids().is_empty());
    assert_eq!(gameplay.explosions().len(), 1);
    assert_eq!(game.session().score, 1);
    assert_eq!(game.session().lives, config.initial_lives);
}

#[test]
fn score_counts_every_missile_kill() {
    let config = quiet_config();
    let mut game = started_game(config);

    for round in 1..=4u32 {
        fire(&mut game);
        let missile = *game.gameplay().missiles().last().expect("missile fired");
        game.gameplay_mut().push_asteroid(still_asteroid(
            missile.body.x,
            missile.body.y + missile.body.vy,
            5.0,
        ));
        game.update(HeldKeys::default());
        assert_eq!(game.session().score, round);
    }
    assert_eq!(game.session().lives, config.initial_lives);
}

#[test]
fn one_missile_destroys_only_first_overlapping_asteroid() {
    let config = quiet_config();
    let mut game = started_game(config);

    fire(&mut game);
    let missile = game.gameplay().missiles()[0];
    let (mx, my) = (missile.body.x, missile.body.y + missile.body.vy);
    let mut first = still_asteroid(mx, my, 5.0);
    first.size = 6.0;
    let second = still_asteroid(mx, my, 5.0);
    game.gameplay_mut().push_asteroid(first);
    game.gameplay_mut().push_asteroid(second);

    game.update(HeldKeys::default());

    let remaining = game.gameplay().asteroids();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].size, 5.0);
    assert_eq!(game.session().score, 1);
}

#[test]
fn second_missile_on_a_destroyed_asteroid_survives() {
    let config = quiet_config();
    let mut game = started_game(config);
    let (x, y) = (100.0, 100.0);
    game.gameplay_mut().push_missile(Missile::new(x, y, 0.0, 0.0, &config));
    game.gameplay_mut().push_missile(Missile::new(x, y, 0.0, 0.0, &config));
    game.gameplay_mut().push_asteroid(still_asteroid(x, y, 5.0));
    let explosions_before = game.gameplay().explosions().len();

    game.update(HeldKeys::default());

    assert!(game.gameplay().asteroids().is_empty());
    assert_eq!(game.gameplay().missiles().len(), 1);
    assert_eq!(game.gameplay().explosions().len(), explosions_before + 1);
    assert_eq!(game.session().score, 1);
}

#[test]
fn only_one_ship_hit_per_tick_and_no_grace_period() {
    let config = quiet_config();
    let mut game = started_game(config);
    let (sx, sy) = config.center();
    game.gameplay_mut().push_asteroid(still_asteroid(sx, sy, 30.0));
    game.gameplay_mut().push_asteroid(still_asteroid(sx, sy, 30.0));

    game.update(HeldKeys::default());
    assert_eq!(game.session().lives, config.initial_lives - 1);
    assert_eq!(game.gameplay().asteroids().len(), 1);

    game.update(HeldKeys::default());
    assert_eq!(game.session().lives, config.initial_lives - 2);
    assert!(game.gameplay().asteroids().is_empty());
}

#[test]
fn losing_last_life_returns_to_title_and_reset_restores_session() {
    let mut config = quiet_config();
    config.initial_lives = 1;
    config.asteroid_count = 4;
    let mut game = started_game(config);

    fire(&mut game);
    let missile = game.gameplay().missiles()[0];
    game.gameplay_mut().push_asteroid(still_asteroid(
        missile.body.x,
        missile.body.y + missile.body.vy,
        5.0,
    ));
    game.update(HeldKeys::default());
    assert_eq!(game.session().score, 1);

    let (sx, sy) = config.center();
    game.gameplay_mut().push_asteroid(still_asteroid(sx, sy, 30.0));
    game.update(HeldKeys::default());

    assert_eq!(game.session().lives, 0);
    assert_eq!(game.state(), StateId::Title);
    assert!(game.session().has_played(&config));

    click_start(&mut game);

    assert_eq!(game.state(), StateId::Gameplay);
    assert_eq!(game.session().score, 0);
    assert_eq!(game.session().lives, config.initial_lives);
    assert_eq!(game.gameplay().asteroids().len(), 4);
    assert!(game.gameplay().missiles().is_empty());
    assert!(game.gameplay().explosions().is_empty());
    assert_eq!(game.gameplay().asteroid_timer(), 0);
}

#[test]
fn spawn_timer_adds_one_asteroid_per_interval() {
    let mut config = GameConfig::default();
    config.asteroid_spawn_rate = 3;
    let mut game = started_game(config);

    game.update(HeldKeys::default());
    game.update(HeldKeys::default());
    assert!(game.gameplay().asteroids().is_empty());
    assert_eq!(game.gameplay().asteroid_timer(), 2);

    game.update(HeldKeys::default());
    assert_eq!(game.gameplay().asteroids().len(), 1);
    assert_eq!(game.gameplay().asteroid_timer(), 0);
}

#[test]
fn expired_missiles_are_dropped() {
    let config = quiet_config();
    let mut game = started_game(config);
    fire(&mut game);

    for _ in 1..config.missile_lifetime {
        game.update(HeldKeys::default());
    }
    assert_eq!(game.gameplay().missiles().len(), 1);

    game.update(HeldKeys::default());
    assert!(game.gameplay().missiles().is_empty());
}

#[test]
fn held_keys_steer_and_release_drags() {
    let config = quiet_config();
    let mut game = started_game(config);

    let held = HeldKeys {
        left: false,
        right: true,
        thrust: true,
    };
    for _ in 0..10 {
        game.update(held);
    }
    let ship = *game.gameplay().ship();
    assert!(ship.thrusting);
    assert_eq!(ship.body.angle, 10.0 * config.ship_rotation_speed);

    game.update(HeldKeys::default());
    let after = *game.gameplay().ship();
    assert!(!after.thrusting);
    assert!(after.speed() < ship.speed());
}

#[test]
fn zero_fps_config_still_draws() {
    let mut config = GameConfig::default();
    config.fps = 0;
    let mut game = Game::new(config, SEED);
    game.update(HeldKeys::default());

    let mut canvas = crate::render::DrawList::new();
    game.draw(&mut canvas);
    canvas.present();

    assert_eq!(game.ticks_ms(), 1_000);
    assert!(!canvas.last_frame().is_empty());
}

#[test]
fn state_lookup_by_name_fails_fast_on_unknown_names() {
    let mut game = Game::new(GameConfig::default(), SEED);
    assert_eq!(
        game.change_state_by_name("pause"),
        Err(UnknownState {
            name: "pause".to_string()
        })
    );
    assert_eq!(game.state(), StateId::Title);

    game.change_state_by_name("gameplay")
        .expect("gameplay is a known state");
    assert_eq!(game.state(), StateId::Gameplay);
}

#[test]
fn same_seed_and_inputs_are_deterministic() {
    let inputs = [0x10u8, 0x00, 0x01, 0x04, 0x0C, 0x00, 0x08, 0x02, 0x05, 0x00];
    let config = GameConfig::default();
    assert_eq!(
        replay(config, 0x1234_5678, &inputs),
        replay(config, 0x1234_5678, &inputs)
    );

    let mut a = Game::new(config, 77);
    let mut b = Game::new(config, 77);
    for _ in 0..3 {
        for input in inputs {
            a.step_byte(input);
            b.step_byte(input);
        }
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn checkpoints_cover_first_and_last_frame() {
    let inputs = vec![0x10u8; 1]
        .into_iter()
        .chain(core::iter::repeat(0x04).take(24))
        .collect::<Vec<u8>>();
    let checkpoints = replay_with_checkpoints(GameConfig::default(), SEED, &inputs, 10);

    assert_eq!(checkpoints.first().expect("checkpoint").frame_count, 0);
    assert_eq!(checkpoints.last().expect("checkpoint").frame_count, 25);
    assert_eq!(checkpoints.len(), 4);
    assert_eq!(
        checkpoints.last().expect("checkpoint").state,
        StateId::Gameplay
    );
}

#[test]
fn start_bit_in_step_begins_play() {
    let mut game = Game::new(GameConfig::default(), SEED);
    game.step(FrameInput {
        start: true,
        ..FrameInput::IDLE
    });
    assert_eq!(game.state(), StateId::Gameplay);
    assert_eq!(game.frame_count(), 1);
}
