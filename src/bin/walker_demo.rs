//! Walker Demo
//!
//! Drives the character controller from a winit window. Nothing is drawn;
//! the window title shows the live frame snapshot.
//!
//! Usage: `walker_demo [model.glb]`. Without a model a stock clip set is used.
//! Set `WALKER_CONFIG` to a JSON file to override tuning values and
//! `RUST_LOG` to control log output.

use std::error::Error;
use std::sync::Arc;
use std::time::Instant;

use glam::{Vec2, Vec3};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use orbit_walker_engine::assets::{AssetLoader, AssetSource, AsyncLoads, GltfLoader, InMemoryLoader};
use orbit_walker_engine::input::create_gamepad_source;
use orbit_walker_engine::{
    ControllerConfig, FrameSnapshot, InputAggregator, KeyCode, RenderToggles, Simulation,
    TickInput,
};

/// Seconds between window title refreshes
const TITLE_INTERVAL: f32 = 0.25;

fn translate_key(key: WinitKey) -> KeyCode {
    match key {
        WinitKey::KeyW => KeyCode::W,
        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::KeyR => KeyCode::R,
        WinitKey::Space => KeyCode::Space,
        WinitKey::ShiftLeft => KeyCode::ShiftLeft,
        WinitKey::ShiftRight => KeyCode::ShiftRight,
        WinitKey::ArrowUp => KeyCode::ArrowUp,
        WinitKey::ArrowDown => KeyCode::ArrowDown,
        WinitKey::ArrowLeft => KeyCode::ArrowLeft,
        WinitKey::ArrowRight => KeyCode::ArrowRight,
        WinitKey::Escape => KeyCode::Escape,
        _ => KeyCode::Unknown,
    }
}

/// Digit keys pick an animation override; 0 clears it.
fn digit(key: WinitKey) -> Option<usize> {
    match key {
        WinitKey::Digit0 => Some(0),
        WinitKey::Digit1 => Some(1),
        WinitKey::Digit2 => Some(2),
        WinitKey::Digit3 => Some(3),
        WinitKey::Digit4 => Some(4),
        WinitKey::Digit5 => Some(5),
        WinitKey::Digit6 => Some(6),
        WinitKey::Digit7 => Some(7),
        WinitKey::Digit8 => Some(8),
        WinitKey::Digit9 => Some(9),
        _ => None,
    }
}

fn describe(frame: &FrameSnapshot) -> String {
    format!(
        "Walker | pos ({:.1}, {:.1}, {:.1}) | heading {:.2} | {} | {} | bloom {} ao {}",
        frame.position.x,
        frame.position.y,
        frame.position.z,
        frame.heading,
        if frame.grounded { "grounded" } else { "airborne" },
        frame.animation.as_deref().unwrap_or("-"),
        frame.toggles.bloom,
        frame.toggles.ambient_occlusion,
    )
}

struct WalkerApp {
    window: Option<Arc<Window>>,
    simulation: Simulation,
    input: InputAggregator,
    loads: AsyncLoads,
    source: AssetSource,
    toggles: RenderToggles,
    dragging: bool,
    last_cursor: Option<Vec2>,
    pending_drag: Vec2,
    last_frame: Instant,
    title_timer: f32,
}

impl WalkerApp {
    fn new(
        config: ControllerConfig,
        loader: Box<dyn AssetLoader>,
        source: AssetSource,
    ) -> Result<Self, Box<dyn Error>> {
        let input = InputAggregator::with_gamepad(create_gamepad_source(), config.gamepad);
        let mut simulation = Simulation::new(
            config,
            Box::new(|at: Vec3| tracing::info!(x = at.x, z = at.z, "dust puff")),
        );
        simulation.add_obstacle(Vec3::new(3.0, 0.0, -5.0), Vec3::new(5.0, 1.5, -3.0))?;
        simulation.add_obstacle(Vec3::new(-6.0, 0.0, -2.0), Vec3::new(-5.0, 3.0, 4.0))?;
        simulation.add_obstacle(Vec3::new(-1.0, 0.0, 6.0), Vec3::new(1.0, 0.8, 8.0))?;

        let loads = AsyncLoads::spawn(loader)?;
        let mut app = Self {
            window: None,
            simulation,
            input,
            loads,
            source,
            toggles: RenderToggles::default(),
            dragging: false,
            last_cursor: None,
            pending_drag: Vec2::ZERO,
            last_frame: Instant::now(),
            title_timer: 0.0,
        };
        app.request_character()?;
        Ok(app)
    }

    fn request_character(&mut self) -> Result<(), Box<dyn Error>> {
        let ticket = self.simulation.begin_load();
        self.loads.request(ticket, self.source.clone())?;
        Ok(())
    }

    fn handle_key(&mut self, key: WinitKey, pressed: bool) {
        if pressed {
            match key {
                WinitKey::KeyB => {
                    self.toggles.bloom = !self.toggles.bloom;
                    return;
                }
                WinitKey::KeyO => {
                    self.toggles.ambient_occlusion = !self.toggles.ambient_occlusion;
                    return;
                }
                WinitKey::KeyL => {
                    if let Err(e) = self.request_character() {
                        tracing::error!("reload failed: {e}");
                    }
                    return;
                }
                _ => {}
            }
            if let Some(n) = digit(key) {
                self.select_override(n);
                return;
            }
        }
        self.input.handle_key(translate_key(key), pressed);
    }

    fn select_override(&mut self, n: usize) {
        if n == 0 {
            self.simulation.set_animation_override(None);
            tracing::info!("animation override cleared");
            return;
        }
        let names = self.simulation.clip_names();
        match names.get(n - 1) {
            Some(name) => {
                if self.simulation.set_animation_override(Some(name.as_str())) {
                    tracing::info!(clip = %name, "animation override set");
                }
            }
            None => tracing::info!(available = ?names, "no clip in slot {n}"),
        }
    }

    fn frame(&mut self) {
        while let Some(done) = self.loads.try_recv() {
            match self.simulation.publish_character(done.ticket, done.result) {
                Ok(outcome) => tracing::debug!(?outcome, "load completed"),
                Err(e) => tracing::error!("character load failed: {e}"),
            }
        }

        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let tick = TickInput {
            delta,
            input: self.input.sample(),
            drag: std::mem::take(&mut self.pending_drag),
            toggles: self.toggles,
        };
        let frame = self.simulation.tick(&tick);
        self.input.clear_pulses();

        self.title_timer += delta;
        if self.title_timer >= TITLE_INTERVAL {
            self.title_timer = 0.0;
            if let Some(window) = &self.window {
                let title = match &frame {
                    Some(frame) => describe(frame),
                    None => "Walker | loading character...".to_string(),
                };
                window.set_title(&title);
            }
        }
    }
}

impl ApplicationHandler for WalkerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = WindowAttributes::default()
                .with_title("Walker")
                .with_inner_size(PhysicalSize::new(1280, 720));
            match event_loop.create_window(attrs) {
                Ok(window) => self.window = Some(Arc::new(window)),
                Err(e) => {
                    tracing::error!("failed to create window: {e}");
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return;
                }
                if let PhysicalKey::Code(key) = event.physical_key {
                    if key == WinitKey::Escape && event.state == ElementState::Pressed {
                        event_loop.exit();
                        return;
                    }
                    self.handle_key(key, event.state == ElementState::Pressed);
                }
            }

            WindowEvent::Focused(false) => {
                self.input.reset();
                self.dragging = false;
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                self.dragging = state == ElementState::Pressed;
            }

            WindowEvent::CursorMoved { position, .. } => {
                let cursor = Vec2::new(position.x as f32, position.y as f32);
                if self.dragging {
                    if let Some(last) = self.last_cursor {
                        self.pending_drag += cursor - last;
                    }
                }
                self.last_cursor = Some(cursor);
            }

            WindowEvent::RedrawRequested => {
                self.frame();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match std::env::var("WALKER_CONFIG") {
        Ok(path) => ControllerConfig::load(path)?,
        Err(_) => ControllerConfig::default(),
    };

    let (loader, source): (Box<dyn AssetLoader>, AssetSource) = match std::env::args().nth(1) {
        Some(model) => (Box::new(GltfLoader), AssetSource::parse(&model)),
        None => (Box::new(InMemoryLoader::stock()), AssetSource::parse("stock")),
    };

    println!("===========================================");
    println!("   Walker - Character Controller Demo");
    println!("===========================================");
    println!();
    println!("Controls:");
    println!("  WASD / Arrows: Move (camera relative)");
    println!("  Shift: Run");
    println!("  Space: Jump");
    println!("  R: Recenter camera behind character");
    println!("  Left mouse drag: Orbit camera");
    println!("  1-9: Force animation clip, 0: clear");
    println!("  B / O: Toggle bloom / ambient occlusion");
    println!("  L: Reload character");
    println!("  ESC: Exit");
    println!();

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = WalkerApp::new(config, loader, source)?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
