//! Catch the Circles entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, MouseEvent};

    use catch_circles::audio::{AudioManager, SoundEffect};
    use catch_circles::background::SpaceBackground;
    use catch_circles::consts::*;
    use catch_circles::game::{GameEvent, GamePhase, Session};
    use catch_circles::{Settings, platform};

    /// App instance holding all state
    struct App {
        session: Session,
        background: SpaceBackground,
        audio: AudioManager,
        settings: Settings,
        last_time: f64,
        background_accum: f64,
    }

    impl App {
        fn new(seed: u64) -> Self {
            Self {
                session: Session::new(seed),
                background: SpaceBackground::new(seed.wrapping_add(1)),
                audio: AudioManager::new(),
                settings: Settings::load(),
                last_time: 0.0,
                background_accum: 0.0,
            }
        }

        /// Advance game and decoration clocks by one frame
        fn update(&mut self, dt_ms: f64) {
            let events = self.session.advance(dt_ms, platform::now_ms());
            self.play_events(&events);

            if self.settings.background_enabled {
                self.background_accum += dt_ms;
                while self.background_accum >= BACKGROUND_TICK_MS {
                    self.background.step();
                    self.background_accum -= BACKGROUND_TICK_MS;
                }
            }
        }

        fn play_events(&self, events: &[GameEvent]) {
            let vol = self.settings.effective_volume();
            for event in events {
                match event {
                    GameEvent::TargetCaught { .. } => self.audio.play(SoundEffect::Catch, vol),
                    GameEvent::LevelUp { .. } => self.audio.play(SoundEffect::LevelUp, vol),
                    GameEvent::GameOver { .. } => self.audio.play(SoundEffect::GameOver, vol),
                    GameEvent::NewHighScore { .. } => self.audio.play(SoundEffect::HighScore, vol),
                    GameEvent::TargetSpawned { .. } => {}
                }
            }
        }

        /// Flip the mute preference and persist it
        fn toggle_mute(&mut self) {
            self.settings.muted = !self.settings.muted;
            self.settings.save();
        }

        fn click_target(&mut self, id: u64) {
            self.audio.resume();
            let events = self.session.click(id);
            self.play_events(&events);
        }
    }

    fn document() -> Document {
        web_sys::window()
            .expect("no window")
            .document()
            .expect("no document")
    }

    fn set_text(doc: &Document, selector: &str, text: &str) {
        if let Some(el) = doc.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(doc: &Document, id: &str, hidden: bool) {
        if let Some(el) = doc.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    /// Rebuild the target layer to match the live target set
    fn render_targets(doc: &Document, app: &App) {
        let Some(area) = doc.get_element_by_id("play-area") else {
            return;
        };
        area.set_inner_html("");
        for target in &app.session.state().targets {
            if let Ok(el) = doc.create_element("div") {
                let _ = el.set_attribute("class", "target");
                let _ = el.set_attribute("data-target-id", &target.id.to_string());
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "left:{:.1}px;top:{:.1}px;width:{:.1}px;height:{:.1}px",
                        target.pos.x, target.pos.y, target.size, target.size
                    ),
                );
                let _ = area.append_child(&el);
            }
        }
    }

    /// Rebuild the decorative background layer
    fn render_background(doc: &Document, app: &App) {
        let Some(layer) = doc.get_element_by_id("background") else {
            return;
        };
        if !app.settings.background_enabled {
            layer.set_inner_html("");
            return;
        }
        layer.set_inner_html("");

        for star in &app.background.stars {
            if let Ok(el) = doc.create_element("div") {
                let _ = el.set_attribute("class", "bg-star");
                let twinkle = if app.settings.reduced_motion {
                    String::new()
                } else {
                    format!(
                        ";animation:twinkle {:.2}s ease-in-out infinite {:.2}s",
                        star.twinkle_speed, star.twinkle_delay
                    )
                };
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "left:{:.1}%;top:{:.1}%;width:{:.1}px;height:{:.1}px;opacity:{:.2}{}",
                        star.x, star.y, star.size, star.size, star.opacity, twinkle
                    ),
                );
                let _ = layer.append_child(&el);
            }
        }

        for asteroid in &app.background.asteroids {
            if let Ok(el) = doc.create_element("div") {
                let _ = el.set_attribute("class", "bg-asteroid");
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "left:{:.1}%;top:{:.1}%;width:{:.1}px;height:{:.1}px;transform:rotate({:.1}deg)",
                        asteroid.x, asteroid.y, asteroid.size, asteroid.size, asteroid.rotation
                    ),
                );
                let _ = layer.append_child(&el);
            }
        }

        for star in &app.background.shooting_stars {
            if let Ok(el) = doc.create_element("div") {
                let _ = el.set_attribute("class", "bg-shooting-star");
                let _ = el.set_attribute(
                    "style",
                    &format!(
                        "left:{:.1}%;top:{:.1}%;width:{:.1}px;transform:rotate({:.1}deg)",
                        star.x, star.y, star.length, star.angle_deg
                    ),
                );
                let _ = layer.append_child(&el);
            }
        }
    }

    /// Update HUD, controls, and the game-over modal
    fn render_chrome(doc: &Document, app: &App) {
        let state = app.session.state();
        set_text(doc, "#hud-level .hud-value", &state.level.to_string());
        set_text(doc, "#hud-score .hud-value", &state.score.to_string());
        set_text(
            doc,
            "#hud-highscore .hud-value",
            &app.session.high_score().to_string(),
        );

        let phase = app.session.phase();
        let running = matches!(phase, GamePhase::Playing | GamePhase::Paused);
        set_hidden(doc, "start-btn", running);
        set_hidden(doc, "pause-btn", !running);
        set_hidden(doc, "restart-btn", !running);
        // Reset is always available

        if let Some(btn) = doc.get_element_by_id("pause-btn") {
            btn.set_text_content(Some(if phase == GamePhase::Paused {
                "Resume"
            } else {
                "Pause"
            }));
        }

        if let Some(btn) = doc.get_element_by_id("mute-btn") {
            btn.set_text_content(Some(if app.settings.muted { "Unmute" } else { "Mute" }));
        }

        let over = phase == GamePhase::GameOver;
        set_hidden(doc, "game-over", !over);
        if over {
            if let Some(summary) = app.session.last_game_over() {
                set_text(doc, "#final-score", &summary.score.to_string());
                set_hidden(doc, "new-best", !(summary.new_best && summary.score > 0));
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Catch the Circles starting...");

        let doc = document();

        // Hide loading indicator
        set_hidden(&doc, "loading", true);

        let seed = platform::seed_from_clock();
        let app = Rc::new(RefCell::new(App::new(seed)));
        log::info!("Initialized with seed: {}", seed);

        setup_play_area(&doc, app.clone());
        setup_controls(&doc, app.clone());
        setup_auto_pause(app.clone());

        request_animation_frame(app);

        log::info!("Catch the Circles running!");
    }

    /// Delegated click handling for targets inside the play area
    fn setup_play_area(doc: &Document, app: Rc<RefCell<App>>) {
        let Some(area) = doc.get_element_by_id("play-area") else {
            log::warn!("No #play-area element; targets will not be clickable");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("[data-target-id]").ok().flatten())
            else {
                return;
            };
            if let Some(id) = target
                .get_attribute("data-target-id")
                .and_then(|s| s.parse::<u64>().ok())
            {
                app.borrow_mut().click_target(id);
            }
        });
        let _ = area.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_button_click<F>(doc: &Document, id: &str, handler: F)
    where
        F: FnMut(MouseEvent) + 'static,
    {
        if let Some(btn) = doc.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(handler);
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_controls(doc: &Document, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            on_button_click(doc, "start-btn", move |_| {
                let mut a = app.borrow_mut();
                a.audio.resume();
                a.session.start();
            });
        }
        {
            let app = app.clone();
            on_button_click(doc, "pause-btn", move |_| {
                app.borrow_mut().session.toggle_pause();
            });
        }
        {
            let app = app.clone();
            on_button_click(doc, "restart-btn", move |_| {
                app.borrow_mut().session.start();
            });
        }
        {
            let app = app.clone();
            on_button_click(doc, "reset-btn", move |_| {
                app.borrow_mut().session.reset();
            });
        }
        {
            let app = app.clone();
            on_button_click(doc, "mute-btn", move |_| {
                app.borrow_mut().toggle_mute();
            });
        }
        // Game-over modal actions
        {
            let app = app.clone();
            on_button_click(doc, "play-again-btn", move |_| {
                app.borrow_mut().session.start();
            });
        }
        on_button_click(doc, "exit-btn", move |_| {
            app.borrow_mut().session.reset();
        });
    }

    /// Pause automatically when the tab is hidden
    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let doc = document();
        let doc_clone = doc.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if doc_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut a = app.borrow_mut();
                if a.session.phase() == GamePhase::Playing {
                    a.session.toggle_pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = doc
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            frame(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            let dt = if a.last_time > 0.0 {
                time - a.last_time
            } else {
                BACKGROUND_TICK_MS
            };
            a.last_time = time;
            a.update(dt);

            let doc = document();
            render_targets(&doc, &a);
            render_background(&doc, &a);
            render_chrome(&doc, &a);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use catch_circles::game::{GamePhase, Session};

    env_logger::init();
    log::info!("Catch the Circles (native) starting...");
    log::info!("Native mode is a headless demo - serve the wasm build for the real game");

    // Scripted run: catch 25 targets, then let one slip
    let mut session = Session::new(catch_circles::platform::seed_from_clock());
    session.start();
    for _ in 0..25 {
        let interval = session.state().spawn_interval_ms();
        session.advance(interval, catch_circles::platform::now_ms());
        if let Some(target) = session.state().targets.first() {
            let id = target.id;
            session.click(id);
        }
    }
    session.advance(10_000.0, catch_circles::platform::now_ms());
    assert_eq!(session.phase(), GamePhase::GameOver);

    let summary = session.last_game_over().expect("demo run ended in game over");
    println!(
        "demo run: score {} level {} best {}",
        summary.score,
        summary.level,
        session.high_score()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
