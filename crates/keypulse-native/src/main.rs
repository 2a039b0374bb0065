// Native desktop front-end: one window split into the four regions, each
// drawn into its own software raster, composited and presented with wgpu.

mod audio;
mod gpu;
mod layout;

use audio::CpalSink;
use gpu::GpuState;
use instant::Instant;
use keypulse_core::{
    Engine, EngineConfig, KeyMap, PixelSurface, Region, SeededRandom, ToneSynthesizer,
    REGION_COUNT,
};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::EventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowBuilder};

struct App {
    engine: Engine,
    tones: ToneSynthesizer<CpalSink>,
    keymap: KeyMap,
    surfaces: [PixelSurface; REGION_COUNT],
    frame: Vec<[u8; 4]>,
    size: PhysicalSize<u32>,
    cursor: Option<PhysicalPosition<f64>>,
    start: Instant,
}

impl App {
    fn new(size: PhysicalSize<u32>) -> Self {
        let mut app = Self {
            engine: Engine::new(EngineConfig::default(), SeededRandom::from_entropy()),
            tones: ToneSynthesizer::new(),
            keymap: KeyMap::qwerty(),
            surfaces: Region::ALL.map(|_| PixelSurface::new(1, 1)),
            frame: Vec::new(),
            size,
            cursor: None,
            start: Instant::now(),
        };
        app.resize(size);
        app
    }

    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Live effects keep their absolute coordinates; only the idle layer and
    /// future spawns see the new extent.
    fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.size = size;
        let cells = layout::quadrants(size.width, size.height);
        for (region, cell) in Region::ALL.into_iter().zip(cells) {
            self.surfaces[region.index()].resize(cell.width, cell.height);
            self.engine
                .resize(region, cell.width as f32, cell.height as f32);
        }
        log::debug!("resized to {}x{}", size.width, size.height);
    }

    fn arm_audio(&mut self) {
        if let Err(e) = self.tones.arm(CpalSink::open) {
            log::error!("audio unavailable: {e}");
        }
    }

    fn on_key(&mut self, code: KeyCode) {
        self.arm_audio();
        let name = format!("{code:?}");
        if let Some(region) = self.keymap.route(&name) {
            log::debug!("key {name} -> {}", region.name());
            let now = self.now_ms();
            self.engine.trigger(region, now, &mut self.tones);
        }
    }

    fn on_click(&mut self) {
        let Some(pos) = self.cursor else { return };
        self.arm_audio();
        let cells = layout::quadrants(self.size.width, self.size.height);
        let hit = Region::ALL.into_iter().zip(cells).find(|(_, c)| {
            let (x, y) = (pos.x as u32, pos.y as u32);
            x >= c.x && x < c.x + c.width && y >= c.y && y < c.y + c.height
        });
        if let Some((region, _)) = hit {
            let now = self.now_ms();
            self.engine.trigger(region, now, &mut self.tones);
        }
    }

    fn frame(&mut self, gpu: &mut GpuState<'_>) -> Result<(), wgpu::SurfaceError> {
        let now = self.now_ms();
        let stats = self.engine.tick(now, &mut self.surfaces);
        let total = stats.total();
        if total.faulted > 0 {
            log::debug!("{} effects retired after render faults", total.faulted);
        }
        let (w, h) = (self.size.width, self.size.height);
        layout::compose(&mut self.frame, w, h, &self.surfaces);
        gpu.upload(bytemuck::cast_slice(&self.frame), w, h);
        gpu.render()
    }
}

fn toggle_fullscreen(window: &Window) {
    if window.fullscreen().is_some() {
        window.set_fullscreen(None);
    } else {
        window.set_fullscreen(Some(Fullscreen::Borderless(None)));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("keypulse")
        .with_inner_size(PhysicalSize::new(1280u32, 800u32))
        .build(&event_loop)?;

    let mut gpu = pollster::block_on(GpuState::new(&window))?;
    let mut app = App::new(window.inner_size());
    log::info!("press any key; Enter toggles fullscreen");

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                gpu.resize(size);
                app.resize(size);
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Enter | KeyCode::NumpadEnter => toggle_fullscreen(gpu.window),
                code => app.on_key(code),
            },
            WindowEvent::CursorMoved { position, .. } => app.cursor = Some(position),
            WindowEvent::CursorLeft { .. } => app.cursor = None,
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => app.on_click(),
            _ => {}
        },
        Event::AboutToWait => match app.frame(&mut gpu) {
            Ok(()) => gpu.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost) => gpu.resize(gpu.window.inner_size()),
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                elwt.exit()
            }
            Err(e) => log::debug!("frame skipped: {e}"),
        },
        _ => {}
    })?;
    Ok(())
}
