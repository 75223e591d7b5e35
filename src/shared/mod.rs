//! Shared components, resources, events, and states for Crabshore.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

/// Screen mode. Exactly one is active at any instant: gameplay systems run
/// only in `Playing`, and the death / level-transition overlays each own
/// their own state, so the two can never stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
    Dead,
    LevelTransition,
}

/// Deterministic ordering of the fixed-tick simulation: world generation
/// and enemy AI first, then player actions, then cross-cutting checks.
/// Commands flush between sets, so a freshly generated level is fully
/// queryable before anything judges it.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    World,
    Player,
    Game,
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Axe,
    Pickaxe,
    Hammer,
    Sword,
}

impl ToolKind {
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Axe => "axe",
            ToolKind::Pickaxe => "pickaxe",
            ToolKind::Hammer => "hammer",
            ToolKind::Sword => "sword",
        }
    }

    /// Frames between uses.
    pub fn cooldown_frames(self) -> u32 {
        match self {
            ToolKind::Axe => 20,
            ToolKind::Pickaxe => 20,
            ToolKind::Hammer => 15,
            ToolKind::Sword => 20,
        }
    }

    /// Flat damage when this tool is (mis)used as a weapon. The sword's
    /// real damage scales with player level, see [`sword_damage`].
    pub fn base_damage(self) -> i32 {
        match self {
            ToolKind::Axe => 2,
            ToolKind::Pickaxe => 2,
            ToolKind::Hammer => 1,
            ToolKind::Sword => 10,
        }
    }
}

/// Sword damage grows by 2 per player level.
pub fn sword_damage(level: u32) -> i32 {
    ToolKind::Sword.base_damage() + 2 * level as i32
}

/// Marker for the player entity.
#[derive(Component, Debug, Clone, Default)]
pub struct Player;

/// Per-frame movement state carried on the player entity.
#[derive(Component, Debug, Clone, Default)]
pub struct PlayerMovement {
    pub facing: Facing,
    pub vel_y: f32,
    pub jumping: bool,
    pub swimming: bool,
    pub is_moving: bool,
}

/// Health, progression, and the frame counters that gate damage and
/// notification spam. Bounds invariants: `0 <= health <= max_health`;
/// `experience < exp_to_next_level` after every level-up settles.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PlayerVitals {
    pub health: i32,
    pub max_health: i32,
    pub level: u32,
    pub experience: u32,
    pub exp_to_next_level: u32,
    pub invincibility_frames: u32,
    pub notify_cooldown_frames: u32,
}

impl Default for PlayerVitals {
    fn default() -> Self {
        Self {
            health: 100,
            max_health: 100,
            level: 1,
            experience: 0,
            exp_to_next_level: 100,
            invincibility_frames: 0,
            notify_cooldown_frames: 0,
        }
    }
}

impl PlayerVitals {
    /// Bounded heal. Never exceeds `max_health`.
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Bounded damage. Never drops below zero.
    pub fn hurt(&mut self, amount: i32) {
        self.health = (self.health - amount).max(0);
    }
}

/// Tool belt: which tool is in hand, per-tool cooldown counters, and the
/// swing animation timer shared by all tools.
#[derive(Resource, Debug, Clone)]
pub struct ToolBelt {
    pub current: ToolKind,
    pub cooldowns: [u32; 4],
    pub is_swinging: bool,
    pub swing_frames: u32,
}

impl Default for ToolBelt {
    fn default() -> Self {
        Self {
            current: ToolKind::Axe,
            cooldowns: [0; 4],
            is_swinging: false,
            swing_frames: 0,
        }
    }
}

impl ToolBelt {
    fn slot(tool: ToolKind) -> usize {
        match tool {
            ToolKind::Axe => 0,
            ToolKind::Pickaxe => 1,
            ToolKind::Hammer => 2,
            ToolKind::Sword => 3,
        }
    }

    pub fn can_use(&self, tool: ToolKind) -> bool {
        self.cooldowns[Self::slot(tool)] == 0
    }

    /// Gate on the tool's cooldown; on success restart it and start the
    /// swing animation.
    pub fn try_use(&mut self, tool: ToolKind) -> bool {
        if !self.can_use(tool) {
            return false;
        }
        self.cooldowns[Self::slot(tool)] = tool.cooldown_frames();
        self.is_swinging = true;
        self.swing_frames = 0;
        true
    }

    /// One frame of cooldown/animation bookkeeping.
    pub fn tick(&mut self) {
        for cd in self.cooldowns.iter_mut() {
            *cd = cd.saturating_sub(1);
        }
        if self.is_swinging {
            self.swing_frames += 1;
            if self.swing_frames >= SWING_DURATION_FRAMES {
                self.is_swinging = false;
                self.swing_frames = 0;
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INVENTORY
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Wood,
    Stone,
    Ore,
}

impl Material {
    pub fn name(self) -> &'static str {
        match self {
            Material::Wood => "wood",
            Material::Stone => "stone",
            Material::Ore => "ore",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodKind {
    Apple,
    Cake,
    Cookie,
}

impl FoodKind {
    pub fn name(self) -> &'static str {
        match self {
            FoodKind::Apple => "apple",
            FoodKind::Cake => "cake",
            FoodKind::Cookie => "cookie",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub kind: FoodKind,
    pub healing: i32,
}

/// Resource counters plus the FIFO food queue. Counters are unsigned so
/// they can never go negative; construction is gated by an affordability
/// check before any deduction.
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    pub wood: u32,
    pub stone: u32,
    pub ore: u32,
    pub foods: VecDeque<FoodItem>,
}

impl Inventory {
    pub fn count(&self, material: Material) -> u32 {
        match material {
            Material::Wood => self.wood,
            Material::Stone => self.stone,
            Material::Ore => self.ore,
        }
    }

    pub fn add(&mut self, material: Material, amount: u32) {
        match material {
            Material::Wood => self.wood += amount,
            Material::Stone => self.stone += amount,
            Material::Ore => self.ore += amount,
        }
    }

    /// Deducts without checking — callers must verify affordability first.
    pub fn deduct(&mut self, material: Material, amount: u32) {
        match material {
            Material::Wood => self.wood = self.wood.saturating_sub(amount),
            Material::Stone => self.stone = self.stone.saturating_sub(amount),
            Material::Ore => self.ore = self.ore.saturating_sub(amount),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WORLD — tiles, enemies, water
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Grass,
    Dirt,
    Stone,
    Tree,
}

impl TileKind {
    pub fn is_harvestable(self) -> bool {
        matches!(self, TileKind::Stone | TileKind::Tree)
    }
}

/// A static world cell. Grass/dirt persist for the level; tree/stone are
/// removed by a successful tool interaction.
#[derive(Component, Debug, Clone)]
pub struct Tile {
    pub kind: TileKind,
    pub variant: u8,
    pub size: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Crab,
    KingCrab,
    Dinosaur,
}

impl EnemyKind {
    pub fn is_boss(self) -> bool {
        matches!(self, EnemyKind::KingCrab)
    }
}

/// A live enemy. Stats are copied from [`EnemyRegistry`] at spawn time;
/// keeping the `kind` discriminant on the entity means XP, naming, and
/// boss checks never need a runtime type test.
#[derive(Component, Debug, Clone)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub health: i32,
    pub max_health: i32,
    pub damage: i32,
    pub attack_range: f32,
    pub attack_cooldown: u32,
    pub attack_cooldown_remaining: u32,
    pub vel_x: f32,
    pub vel_y: f32,
    pub size: Vec2,
    pub anim_frame: u32,
}

/// Marker for fish swimming in a water region.
#[derive(Component, Debug, Clone)]
pub struct Fish {
    pub vel: Vec2,
}

/// The carved water region (level 2+). At most one per level.
#[derive(Component, Debug, Clone)]
pub struct WaterZone {
    pub rect: Rect,
}

/// A placed structure. No removal path; persists for the level.
#[derive(Component, Debug, Clone)]
pub struct Building {
    pub blueprint: &'static str,
}

/// Marker for everything that belongs to the current level and is
/// despawned wholesale on regeneration.
#[derive(Component, Debug, Clone, Default)]
pub struct LevelEntity;

/// Level-wide bookkeeping. `enemies_spawned` is monotonic so the
/// "all enemies cleared" check can tell an untouched level from a
/// cleared one.
#[derive(Resource, Debug, Clone)]
pub struct WorldState {
    pub level: u32,
    pub initial_resource_count: u32,
    pub enemies_spawned: u32,
    pub boss_spawned: bool,
    pub boss_defeated: bool,
}

impl Default for WorldState {
    fn default() -> Self {
        Self {
            level: 1,
            initial_resource_count: 0,
            enemies_spawned: 0,
            boss_spawned: false,
            boss_defeated: false,
        }
    }
}

/// Set `pending` to tear down the current level's entities and generate
/// a fresh layout for `WorldState::level`.
#[derive(Resource, Debug, Clone, Default)]
pub struct LevelSpawnRequest {
    pub pending: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER MODES
// ═══════════════════════════════════════════════════════════════════════

/// Orthogonal player mode flag: while active, the interact action builds
/// instead of harvesting/attacking.
#[derive(Resource, Debug, Clone, Default)]
pub struct BuildMode {
    pub active: bool,
    pub current_blueprint: Option<&'static str>,
}

/// Whether the tool-select overlay is open. Movement and interaction are
/// suppressed while it is.
#[derive(Resource, Debug, Clone, Default)]
pub struct ToolOverlay {
    pub open: bool,
    pub selected_slot: usize,
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT
// ═══════════════════════════════════════════════════════════════════════

/// The single point where hardware input becomes game actions. Held state
/// is overwritten every render frame; edge flags accumulate until a
/// simulation tick consumes them.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub move_axis: f32,
    pub jump: bool,
    pub interact: bool,
    pub eat: bool,
    pub toggle_inventory: bool,
    pub toggle_build_mode: bool,
    pub toggle_help: bool,
    pub quick_slot: Option<u8>,
    pub ui_left: bool,
    pub ui_right: bool,
    pub ui_confirm: bool,
}

impl PlayerInput {
    /// Clear edge-triggered flags after a simulation tick has seen them.
    pub fn clear_edges(&mut self) {
        self.jump = false;
        self.interact = false;
        self.eat = false;
        self.toggle_inventory = false;
        self.toggle_build_mode = false;
        self.toggle_help = false;
        self.quick_slot = None;
        self.ui_left = false;
        self.ui_right = false;
        self.ui_confirm = false;
    }
}

// ═══════════════════════════════════════════════════════════════════════
// REGISTRIES — populated by the data plugin at startup
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone)]
pub struct EnemyDef {
    pub name: &'static str,
    pub max_health: i32,
    pub damage: i32,
    pub attack_range: f32,
    pub attack_cooldown: u32,
    pub xp: u32,
    pub size: Vec2,
    pub color: Color,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct EnemyRegistry {
    pub defs: Vec<(EnemyKind, EnemyDef)>,
}

impl EnemyRegistry {
    pub fn get(&self, kind: EnemyKind) -> Option<&EnemyDef> {
        self.defs.iter().find(|(k, _)| *k == kind).map(|(_, d)| d)
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct FoodRegistry {
    pub defs: Vec<(FoodKind, i32)>,
}

impl FoodRegistry {
    pub fn healing(&self, kind: FoodKind) -> i32 {
        self.defs
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, h)| *h)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct Blueprint {
    pub name: &'static str,
    pub costs: Vec<(Material, u32)>,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct BlueprintRegistry {
    pub blueprints: Vec<Blueprint>,
}

impl BlueprintRegistry {
    pub fn get(&self, name: &str) -> Option<&Blueprint> {
        self.blueprints.iter().find(|b| b.name == name)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// Notification for the on-screen queue. Core code only ever appends.
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

impl ToastEvent {
    /// The default 1.5-second notification.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration_secs: 1.5,
        }
    }
}

/// Fire-and-forget sound effect request.
#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: &'static str,
}

/// Request for a block-break particle burst at a world position.
#[derive(Event, Debug, Clone)]
pub struct BlockBreakEvent {
    pub x: f32,
    pub y: f32,
    pub color: Color,
}

/// Request for a small white spark burst (weapon impacts).
#[derive(Event, Debug, Clone)]
pub struct SparkEvent {
    pub x: f32,
    pub y: f32,
}

/// Sent by the interaction system when the player hammers in building
/// mode; the building domain validates costs and answers with toasts.
#[derive(Event, Debug, Clone)]
pub struct BuildRequestEvent {
    pub blueprint: &'static str,
    pub x: f32,
    pub y: f32,
}

/// Sent when an enemy's health reaches zero; progression awards XP.
#[derive(Event, Debug, Clone)]
pub struct EnemyDefeatedEvent {
    pub kind: EnemyKind,
}

/// Sent on every level-up so UI/audio can react.
#[derive(Event, Debug, Clone)]
pub struct LevelUpEvent {
    pub new_level: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const SCREEN_WIDTH: f32 = 800.0;
pub const SCREEN_HEIGHT: f32 = 600.0;
pub const TILE_SIZE: f32 = 32.0;
pub const WORLD_WIDTH: f32 = 2400.0;

/// Simulation rate. One logical frame per FixedUpdate tick.
pub const SIM_HZ: f64 = 60.0;

// Player physics, in pixels per frame (and per frame squared).
pub const GRAVITY: f32 = 0.8;
pub const JUMP_FORCE: f32 = 15.0;
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_SIZE: Vec2 = Vec2::new(32.0, 48.0);

// Swimming modifiers.
pub const SWIM_MOVE_FACTOR: f32 = 0.6;
pub const SWIM_JUMP_FORCE: f32 = 8.0;
pub const SWIM_GRAVITY: f32 = 0.2;
pub const SWIM_MAX_FALL: f32 = 2.0;
pub const SWIM_DAMPING: f32 = 0.9;

// Interaction and combat.
pub const INTERACTION_DISTANCE: f32 = 60.0;
pub const SWORD_RANGE: f32 = 70.0;
pub const SWING_DURATION_FRAMES: u32 = 10;
pub const INVINCIBILITY_FRAMES: u32 = 30;
pub const NOTIFY_COOLDOWN_FRAMES: u32 = 30;
pub const CRAB_SPAWN_CHANCE_AXE: f64 = 0.30;
pub const CRAB_SPAWN_CHANCE_PICKAXE: f64 = 0.40;

// Progression.
pub const EXP_THRESHOLD_GROWTH: f32 = 1.5;
pub const LEVEL_UP_HEALTH_BONUS: i32 = 10;
pub const DEATH_EXP_PENALTY: f32 = 0.30;

// State-machine timers, in frames at 60 Hz.
pub const RESPAWN_DELAY_FRAMES: u32 = 180;
pub const LEVEL_TRANSITION_FRAMES: u32 = 180;
pub const HELP_TIMEOUT_FRAMES: u32 = 300;

// World layout. The ground band is 100 px tall; its surface is where
// the player, enemies, and resource tiles stand.
pub const GROUND_SURFACE_Y: f32 = 100.0;
pub const TREES_PER_LEVEL: u32 = 15;
pub const STONES_PER_LEVEL: u32 = 10;
pub const ENEMY_WANDER_CHANCE: f64 = 0.02;

// Camera.
pub const CAMERA_EASE: f32 = 0.1;

// Palette for the procedurally-colored world.
pub const SKY_BLUE: Color = Color::srgb(0.53, 0.81, 0.92);
pub const GRASS_GREEN: Color = Color::srgb(0.13, 0.55, 0.13);
pub const DIRT_BROWN: Color = Color::srgb(0.55, 0.27, 0.07);
pub const STONE_GRAY: Color = Color::srgb(0.50, 0.50, 0.50);
pub const WATER_BLUE: Color = Color::srgba(0.16, 0.45, 0.80, 0.85);
