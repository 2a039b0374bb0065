// Shared tuning constants used by the engine and both front-ends.

// Regions
pub const REGION_COUNT: usize = 4;

// Flash overlay
pub const FLASH_DECAY: f32 = 0.9; // multiplicative decay per tick
pub const FLASH_SNAP: f32 = 0.01; // below this the flash reads exactly 0
pub const FLASH_OVERLAY_SCALE: f32 = 0.35; // overlay opacity at full flash

// Trigger batches
pub const AMBIENT_BATCH: usize = 5; // decaying particles added on every trigger

// Upper bound of any effect lifetime the dispatcher builds (ms)
pub const MAX_EFFECT_LIFETIME_MS: f64 = 5000.0;

// Fallback surface size before the host reports real dimensions
pub const DEFAULT_SURFACE_SIZE: [f32; 2] = [640.0, 360.0];

// Tone palette
pub const ROOT_MIDI: i32 = 60; // middle C
pub const C_MAJOR_PENTATONIC: &[i32] = &[0, 2, 4, 7, 9, 12];

// Loudness safety
pub const MAX_TONE_PEAK: f32 = 0.12; // per-tone envelope peak
pub const MASTER_CEILING: f32 = 0.3; // summed output never exceeds this
