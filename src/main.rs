use anyhow::Result;
use log::{info, warn};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

use tile_rpg::engine::assets::{AssetLoader, AssetType, Portrait};
use tile_rpg::engine::game_loop::GameLoop;
use tile_rpg::engine::input::{Action, InputManager};
use tile_rpg::game::combat::{load_actor_defs, Actor, ActorDef, Stat, StatGrowth};
use tile_rpg::game::world::{Character, CharacterDef, Direction, GameMap, COLLISION_LAYER};

const ASSET_DIR: &str = "assets";
const PARTY_FILE: &str = "party.json";
const TILE_SIZE: f32 = 16.0;
const XP_PER_STEP: f64 = 40.0;

const DEMO_MAP: &[&str] = &[
    "############",
    "#..........#",
    "#..##......#",
    "#..##..#...#",
    "#......#...#",
    "#..........#",
    "############",
];

fn default_hero_def() -> Result<ActorDef> {
    Ok(ActorDef::new("hero", "Hero")
        .with_growth(Stat::HpMax, StatGrowth::parse("4d50+100")?)
        .with_growth(Stat::MpMax, StatGrowth::parse("2d50+100")?)
        .with_growth(Stat::Strength, StatGrowth::fast())
        .with_growth(Stat::Speed, StatGrowth::fast())
        .with_growth(Stat::Intelligence, StatGrowth::med())
        .with_actions(&["attack", "item"]))
}

/// First actor from the party file if there is one, otherwise the built-in hero
fn hero_def(assets: &AssetLoader) -> Result<ActorDef> {
    if !assets.exists(AssetType::Data, PARTY_FILE) {
        return default_hero_def();
    }

    match load_actor_defs(assets, PARTY_FILE)?.into_iter().next() {
        Some(def) => Ok(def),
        None => default_hero_def(),
    }
}

fn create_hero(assets: &AssetLoader) -> Result<Actor> {
    let def = hero_def(assets)?;
    match Actor::create(def.clone(), assets) {
        Ok(actor) => Ok(actor),
        Err(err) => {
            warn!("Using placeholder portrait for {}: {}", def.name, err);
            Ok(Actor::with_portrait(def, Portrait::placeholder()))
        }
    }
}

/// Everything the demo updates each frame
struct Demo {
    map: GameMap,
    hero: Character,
    actor: Actor,
    input: InputManager,
    game_loop: GameLoop,
    rewarded_steps: u64,
}

impl Demo {
    fn new(assets: &AssetLoader) -> Result<Self> {
        let mut map = GameMap::from_ascii(DEMO_MAP, TILE_SIZE, TILE_SIZE, COLLISION_LAYER)?;
        map.render_layer = COLLISION_LAYER;

        let hero = Character::new(&CharacterDef::standard("hero", 4), 1, 1, &mut map);
        let actor = create_hero(assets)?;

        info!(
            "{} enters the map at level {} ({} XP to next level)",
            actor.name, actor.level, actor.next_level_xp
        );

        Ok(Self {
            map,
            hero,
            actor,
            input: InputManager::new(),
            game_loop: GameLoop::new(),
            rewarded_steps: 0,
        })
    }

    /// Run one frame; returns false once the player asked to quit
    fn frame(&mut self) -> bool {
        if self.input.just_pressed(Action::Quit) {
            return false;
        }
        if self.input.just_pressed(Action::Pause) {
            self.game_loop.toggle_pause();
        }

        let (x, y) = self.input.direction_vector();
        let direction = Direction::from_vector(x, y);
        let dt = self.game_loop.fixed_timestep();

        for _ in 0..self.game_loop.begin_frame() {
            self.hero.update(&mut self.map, direction, dt);
        }

        self.reward_steps();

        self.map.canvas.clear();
        self.hero.render(&mut self.map);
        self.input.end_frame();
        true
    }

    /// Award XP for each tile walked and apply any level-ups
    fn reward_steps(&mut self) {
        let steps = self.hero.steps_taken() - self.rewarded_steps;
        if steps == 0 {
            return;
        }
        self.rewarded_steps = self.hero.steps_taken();

        if !self.actor.add_xp(XP_PER_STEP * steps as f64) {
            return;
        }

        while self.actor.ready_to_level_up() {
            let level_up = self.actor.create_level_up();
            for (stat, gain) in &level_up.base_stats {
                info!("  {} +{}", stat, gain);
            }
            self.actor.apply_level(level_up);
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Tile RPG...");

    let assets = AssetLoader::new(ASSET_DIR);
    let mut demo = Demo::new(&assets)?;

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Tile RPG")
        .with_inner_size(winit::dpi::LogicalSize::new(
            DEMO_MAP[0].len() as f64 * TILE_SIZE as f64 * 4.0,
            DEMO_MAP.len() as f64 * TILE_SIZE as f64 * 4.0,
        ))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                demo.input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                demo.input.reset();
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                if demo.frame() {
                    window.request_redraw();
                } else {
                    info!("Quit requested, shutting down...");
                    elwt.exit();
                }
            }
            Event::AboutToWait => {
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
