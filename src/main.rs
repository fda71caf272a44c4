//! Kinelab entry point
//!
//! Handles platform-specific initialization and runs the lab loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_lab {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlInputElement,
        HtmlSelectElement,
    };

    use kinelab::renderer::{CanvasSize, CanvasSurface};
    use kinelab::sim::{ScenarioId, SimParams, VisualTheme, lookup};
    use kinelab::{LabSession, LabSettings};

    const SESSION_KEY: &str = "kinelab_session";

    /// Lab instance holding all state
    struct LabApp {
        session: LabSession,
        surface: CanvasSurface,
        settings: LabSettings,
        last_time: f64,
    }

    impl LabApp {
        /// Run one animation frame
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time) / 1000.0
            } else {
                0.0
            };
            self.last_time = time;

            self.session.advance(dt);
            self.session.render(&mut self.surface, time / 1000.0);
            self.update_stats();
        }

        /// Write the stats panel
        fn update_stats(&self) {
            let Some(document) = document() else {
                return;
            };
            if let Some(el) = document.get_element_by_id("stats") {
                let html: String = self
                    .session
                    .stats()
                    .iter()
                    .map(|s| {
                        format!(
                            "<div class=\"stat\"><span class=\"stat-label\">{}</span>\
                             <span class=\"stat-value\">{}</span></div>",
                            s.label, s.value
                        )
                    })
                    .collect();
                el.set_inner_html(&html);
            }
        }

        /// Start `scenario` with its default parameters and mirror them into the controls
        fn open(&mut self, scenario: ScenarioId) {
            let params = self.settings.params_for(scenario);
            write_controls(&params);
            self.session.set_params(params);
            self.session.switch_scenario(scenario);
            self.settings.last_scenario = scenario;
            self.settings.save();
        }

        /// Save session state to LocalStorage
        fn save_session(&self) {
            match self.session.snapshot() {
                Ok(json) => {
                    if let Some(storage) = web_sys::window()
                        .and_then(|w| w.local_storage().ok())
                        .flatten()
                    {
                        let _ = storage.set_item(SESSION_KEY, &json);
                        log::info!("Session saved ({})", self.session.scenario());
                    }
                }
                Err(err) => log::warn!("Session not saved: {err}"),
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    /// Load saved session JSON from LocalStorage
    fn load_saved_session() -> Option<String> {
        let storage = web_sys::window()?.local_storage().ok()??;
        storage.get_item(SESSION_KEY).ok()?
    }

    fn input(id: &str) -> Option<HtmlInputElement> {
        document()?.get_element_by_id(id)?.dyn_into().ok()
    }

    fn select(id: &str) -> Option<HtmlSelectElement> {
        document()?.get_element_by_id(id)?.dyn_into().ok()
    }

    fn number(id: &str, fallback: f64) -> f64 {
        input(id)
            .and_then(|el| el.value().parse().ok())
            .unwrap_or(fallback)
    }

    /// Current parameter values from the DOM controls
    fn read_controls(current: &SimParams) -> SimParams {
        let theme = select("theme")
            .and_then(|el| VisualTheme::from_str(&el.value()))
            .unwrap_or(current.theme);
        SimParams {
            v1: number("v1", current.v1),
            v2: number("v2", current.v2),
            angle1: number("angle1", current.angle1),
            angle2: number("angle2", current.angle2),
            rain_speed: number("rain-speed", current.rain_speed),
            theme,
            show_grid: input("grid").map_or(current.show_grid, |el| el.checked()),
            ..current.clone()
        }
    }

    fn write_controls(params: &SimParams) {
        for (id, value) in [
            ("v1", params.v1),
            ("v2", params.v2),
            ("angle1", params.angle1),
            ("angle2", params.angle2),
            ("rain-speed", params.rain_speed),
        ] {
            if let Some(el) = input(id) {
                el.set_value(&value.to_string());
            }
        }
        if let Some(el) = select("theme") {
            el.set_value(params.theme.as_str());
        }
        if let Some(el) = input("grid") {
            el.set_checked(params.show_grid);
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Kinelab starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backing store at CSS size; world units are CSS pixels
        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        let size = CanvasSize::new(width as f64, height as f64);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = LabSettings::load();
        let scenario = settings.last_scenario;
        let mut session = LabSession::new(scenario, settings.params_for(scenario), size);
        session.set_overlays(settings.overlays());

        if let Some(json) = load_saved_session() {
            match session.restore(&json) {
                Ok(()) => log::info!("Resumed saved {} session", session.scenario()),
                Err(err) => log::warn!("Discarding saved session: {err}"),
            }
        }

        if let Some(el) = select("scenario") {
            el.set_value(session.scenario().as_str());
        }
        write_controls(session.params());

        let app = Rc::new(RefCell::new(LabApp {
            session,
            surface: CanvasSurface::new(ctx, size),
            settings,
            last_time: 0.0,
        }));

        setup_controls(app.clone());
        setup_auto_pause(app.clone());

        request_animation_frame(app);

        log::info!("Kinelab running!");
        Ok(())
    }

    fn listen(
        target: &web_sys::EventTarget,
        event: &str,
        handler: impl FnMut(web_sys::Event) + 'static,
    ) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_controls(app: Rc<RefCell<LabApp>>) {
        let Some(document) = document() else {
            return;
        };

        // Scenario picker
        if let Some(el) = document.get_element_by_id("scenario") {
            let app = app.clone();
            listen(&el, "change", move |_event| {
                let Some(id) = select("scenario").map(|s| s.value()) else {
                    return;
                };
                match lookup(&id) {
                    Ok(scenario) => app.borrow_mut().open(scenario),
                    Err(err) => log::error!("{err}"),
                }
            });
        }

        // Parameter inputs take effect on the next frame
        for id in ["v1", "v2", "angle1", "angle2", "rain-speed", "theme", "grid"] {
            if let Some(el) = document.get_element_by_id(id) {
                let app = app.clone();
                listen(&el, "input", move |_event| {
                    let mut a = app.borrow_mut();
                    let params = read_controls(a.session.params());
                    a.session.set_params(params);
                });
            }
        }

        // Reset button
        if let Some(el) = document.get_element_by_id("reset-btn") {
            listen(&el, "click", move |_event| {
                app.borrow_mut().session.reset();
                log::info!("Lab reset");
            });
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<LabApp>>) {
        let Some(document) = document() else {
            return;
        };
        let doc = document.clone();
        listen(&document, "visibilitychange", move |_event| {
            let mut a = app.borrow_mut();
            if doc.visibility_state() == web_sys::VisibilityState::Hidden {
                a.session.pause();
                a.save_session();
                log::info!("Auto-paused (tab hidden)");
            } else {
                a.session.resume();
                // Skip the gap instead of feeding it to the stepper
                a.last_time = 0.0;
            }
        });
    }

    fn request_animation_frame(app: Rc<RefCell<LabApp>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            lab_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn lab_loop(app: Rc<RefCell<LabApp>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_lab::run().await
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use kinelab::LabSession;
    use kinelab::renderer::{CanvasSize, RecordingSurface};
    use kinelab::sim::{ScenarioId, SimParams, lookup};

    env_logger::init();
    log::info!("Kinelab (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let scenarios = match std::env::args().nth(1) {
        Some(id) => match lookup(&id) {
            Ok(scenario) => vec![scenario],
            Err(err) => {
                log::error!("{err}");
                eprintln!("known labs: {}", ScenarioId::ALL.map(|s| s.as_str()).join(", "));
                std::process::exit(1);
            }
        },
        None => ScenarioId::ALL.to_vec(),
    };

    const DEMO_SECONDS: f64 = 10.0;
    const FRAME_DT: f64 = 1.0 / 60.0;

    for scenario in scenarios {
        let params = SimParams::defaults_for(scenario);
        let mut session = LabSession::new(scenario, params, CanvasSize::default());
        let mut surface = RecordingSurface::new();

        let frames = (DEMO_SECONDS / FRAME_DT).round() as usize;
        for frame in 0..frames {
            session.advance(FRAME_DT);
            session.render(&mut surface, frame as f64 * FRAME_DT);
        }

        println!("\n{} ({scenario}) after {DEMO_SECONDS} s", scenario.label());
        for stat in session.stats() {
            println!("  {:<22} {}", stat.label, stat.value);
        }
        log::debug!("{} draw calls in last frame", surface.commands.len());
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
