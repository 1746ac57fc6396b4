// All values are per-tick at 60 Hz unless noted.

// Arena
pub const ARENA_WIDTH: f64 = 800.0;
pub const ARENA_HEIGHT: f64 = 400.0;
/// Top edge of a grounded player.
pub const GROUND_Y: f64 = 300.0;

// Physics
pub const GRAVITY: f64 = 0.5;
pub const PLAYER_SPEED: f64 = 5.0;
pub const JUMP_VELOCITY: f64 = -10.0;

// Player hitbox
pub const PLAYER_WIDTH: f64 = 50.0;
pub const PLAYER_HEIGHT: f64 = 100.0;

// Spawn
pub const PLAYER_ONE_SPAWN_X: f64 = 100.0;
pub const PLAYER_TWO_SPAWN_X: f64 = 650.0;

// Health / combat
pub const MAX_HEALTH: i32 = 100;
pub const PUNCH_DAMAGE: i32 = 10;
/// Full punch timer. A new punch may start only once it has run out.
pub const PUNCH_COOLDOWN: i32 = 20;
/// Frames at the start of the timer during which the punch can land.
pub const PUNCH_DURATION: i32 = 10;

// Presentation
pub const PUNCH_FLASH_SIZE: f64 = 20.0;
pub const HEALTH_BAR_SCALE: f64 = 2.0;
pub const HEALTH_BAR_HEIGHT: f64 = 20.0;
pub const HUD_MARGIN: f64 = 10.0;

// Tick rate
pub const TICK_RATE: u32 = 60;
/// Fastest supported simulation rate, one tick per millisecond.
pub const MAX_TICK_RATE: u32 = 1000;
/// Upper bound on catch-up ticks per host frame.
pub const MAX_TICKS_PER_FRAME: u32 = 5;

const _: () = assert!(PUNCH_DURATION < PUNCH_COOLDOWN);
