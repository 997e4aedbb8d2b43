//! Tile Walk entry point
//!
//! Handles platform-specific initialization: the DOM renderer and input
//! listeners on the web, a scripted text demo natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Document, Element, EventTarget, HtmlElement, KeyboardEvent, Response, Window};

    use tile_walk::config::parse_cell_size;
    use tile_walk::consts::{CSS_CELL_SIZE_VAR, SETTINGS_URL};
    use tile_walk::input::InputController;
    use tile_walk::renderer::Renderer;
    use tile_walk::sim::{Entity, GameState, Grid, VisualTags};
    use tile_walk::{ConfigError, ConfigProvider, GameConfig, Settings};

    fn host_error(what: &'static str) -> impl Fn(JsValue) -> ConfigError {
        move |e| ConfigError::HostUnavailable(format!("{what}: {e:?}"))
    }

    fn px(value: i32) -> String {
        format!("{value}px")
    }

    /// Reads the cell size from the root style and the viewport from `window`
    struct DomConfigProvider {
        window: Window,
    }

    impl DomConfigProvider {
        fn viewport(&self) -> Result<(u32, u32), ConfigError> {
            let axis = |v: Result<JsValue, JsValue>| -> Result<i64, ConfigError> {
                let v = v.map_err(host_error("viewport"))?;
                v.as_f64()
                    .map(|f| f as i64)
                    .ok_or_else(|| ConfigError::HostUnavailable("viewport is not a number".into()))
            };
            let width = axis(self.window.inner_width())?;
            let height = axis(self.window.inner_height())?;
            if width <= 0 || height <= 0 || width > u32::MAX as i64 || height > u32::MAX as i64 {
                return Err(ConfigError::InvalidViewport { width, height });
            }
            Ok((width as u32, height as u32))
        }
    }

    impl ConfigProvider for DomConfigProvider {
        fn load(&self) -> Result<GameConfig, ConfigError> {
            let document = self
                .window
                .document()
                .ok_or_else(|| ConfigError::HostUnavailable("document".into()))?;
            let root = document
                .document_element()
                .ok_or_else(|| ConfigError::HostUnavailable("document element".into()))?;
            let style = self
                .window
                .get_computed_style(&root)
                .map_err(host_error("computed style"))?
                .ok_or_else(|| ConfigError::HostUnavailable("computed style".into()))?;

            let raw = style
                .get_property_value(CSS_CELL_SIZE_VAR)
                .map_err(host_error("style property"))?;
            if raw.trim().is_empty() {
                return Err(ConfigError::MissingVariable(CSS_CELL_SIZE_VAR.to_string()));
            }
            let cell_size = parse_cell_size(&raw)?;
            let (viewport_width, viewport_height) = self.viewport()?;

            Ok(GameConfig {
                cell_size,
                viewport_width,
                viewport_height,
            })
        }
    }

    /// Fetch `config.json`. A missing file means defaults, a broken one is fatal.
    async fn fetch_settings(window: &Window) -> Result<Settings, ConfigError> {
        let response = match JsFuture::from(window.fetch_with_str(SETTINGS_URL)).await {
            Ok(value) => value
                .dyn_into::<Response>()
                .map_err(host_error("fetch response"))?,
            Err(e) => {
                log::warn!("Could not fetch {}: {:?}, using defaults", SETTINGS_URL, e);
                return Ok(Settings::default());
            }
        };
        if !response.ok() {
            log::info!("No {} ({}), using defaults", SETTINGS_URL, response.status());
            return Ok(Settings::default());
        }

        let text = JsFuture::from(response.text().map_err(host_error("response body"))?)
            .await
            .map_err(host_error("response body"))?
            .as_string()
            .ok_or_else(|| ConfigError::HostUnavailable("response body is not text".into()))?;
        Settings::from_json(&text)
    }

    /// One absolutely positioned div per cell, plus the player div
    struct DomRenderer {
        document: Document,
        levels: Element,
        player: HtmlElement,
        dev_grid: bool,
        tags: Option<VisualTags>,
    }

    impl DomRenderer {
        fn new(document: Document, levels: Element, dev_grid: bool) -> Result<Self, ConfigError> {
            let player = document
                .create_element("div")
                .map_err(host_error("player element"))?
                .dyn_into::<HtmlElement>()
                .map_err(|_| ConfigError::HostUnavailable("player is not an HTML element".into()))?;
            player
                .class_list()
                .add_1("player")
                .map_err(host_error("player class"))?;
            Ok(Self {
                document,
                levels,
                player,
                dev_grid,
                tags: None,
            })
        }

        fn try_draw_grid(&self, grid: &Grid) -> Result<(), JsValue> {
            self.levels.set_inner_html("");
            for cell in grid.cells() {
                let (x, y) = (cell.position.x(), cell.position.y());
                let div = self
                    .document
                    .create_element("div")?
                    .dyn_into::<HtmlElement>()?;
                div.set_attribute("x", &x.to_string())?;
                div.set_attribute("y", &y.to_string())?;
                div.class_list().add_1("cell")?;
                if self.dev_grid {
                    div.class_list().add_1("grid")?;
                }
                div.style().set_property("left", &px(x))?;
                div.style().set_property("top", &px(y))?;
                self.levels.append_child(&div)?;
            }
            self.levels.append_child(&self.player)?;
            Ok(())
        }

        fn try_draw_player(&mut self, player: &Entity) -> Result<(), JsValue> {
            let (x, y) = (player.position().x(), player.position().y());
            self.player.set_attribute("x", &x.to_string())?;
            self.player.set_attribute("y", &y.to_string())?;

            let next = player.visual_tags();
            let classes = self.player.class_list();
            match self.tags {
                Some(prev) => {
                    let transition = prev.transition(&next);
                    for tag in transition.remove {
                        classes.remove_1(tag)?;
                    }
                    for tag in transition.add {
                        classes.add_1(tag)?;
                    }
                }
                None => {
                    for tag in next.as_slice() {
                        classes.add_1(tag)?;
                    }
                }
            }
            self.tags = Some(next);

            self.player.style().set_property("left", &px(x))?;
            self.player.style().set_property("top", &px(y))?;
            Ok(())
        }
    }

    impl Renderer for DomRenderer {
        fn draw_grid(&mut self, grid: &Grid) {
            if let Err(e) = self.try_draw_grid(grid) {
                log::warn!("Grid draw failed: {:?}", e);
            }
        }

        fn draw_player(&mut self, player: &Entity) {
            if let Err(e) = self.try_draw_player(player) {
                log::warn!("Player draw failed: {:?}", e);
            }
        }
    }

    struct Game {
        state: GameState,
        renderer: DomRenderer,
        input: InputController,
    }

    /// A registered listener, removed from its target on drop
    struct Listener {
        target: EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut(web_sys::Event)>,
    }

    impl Listener {
        fn register(
            target: EventTarget,
            kind: &'static str,
            closure: Closure<dyn FnMut(web_sys::Event)>,
        ) -> Result<Self, ConfigError> {
            target
                .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
                .map_err(host_error("event listener"))?;
            Ok(Self {
                target,
                kind,
                closure,
            })
        }
    }

    impl Drop for Listener {
        fn drop(&mut self) {
            let _ = self
                .target
                .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
        }
    }

    /// Everything a running page holds on to
    pub struct Session {
        _game: Rc<RefCell<Game>>,
        _listeners: Vec<Listener>,
    }

    thread_local! {
        static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
    }

    fn keydown_listener(document: &Document, game: Rc<RefCell<Game>>) -> Result<Listener, ConfigError> {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let mut g = game.borrow_mut();
            let Game {
                state,
                renderer,
                input,
            } = &mut *g;

            let dispatch = input.dispatch(&event.code());
            if dispatch.prevent_default {
                event.prevent_default();
            }
            if let Some(direction) = dispatch.intent {
                state.apply_intent(direction);
                renderer.present(state);
            }
        });
        Listener::register(document.clone().into(), "keydown", closure)
    }

    fn resize_listener(window: &Window, game: Rc<RefCell<Game>>) -> Result<Listener, ConfigError> {
        let provider = DomConfigProvider {
            window: window.clone(),
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = match provider.viewport() {
                Ok(size) => size,
                Err(e) => {
                    log::warn!("Ignoring resize: {}", e);
                    return;
                }
            };
            let mut g = game.borrow_mut();
            let Game {
                state, renderer, ..
            } = &mut *g;
            if let Err(e) = state.on_viewport_resize(width, height) {
                log::warn!("Keeping previous grid: {}", e);
            }
            renderer.present(state);
        });
        Listener::register(window.clone().into(), "resize", closure)
    }

    pub async fn run() -> Result<(), ConfigError> {
        let window = web_sys::window().ok_or_else(|| ConfigError::HostUnavailable("window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| ConfigError::HostUnavailable("document".into()))?;

        let settings = fetch_settings(&window).await?;
        let config = DomConfigProvider {
            window: window.clone(),
        }
        .load()?;
        log::info!(
            "Config: {}px cells, {}x{} viewport",
            config.cell_size,
            config.viewport_width,
            config.viewport_height
        );

        let state = GameState::new(config, settings.rules())?;

        let levels = document
            .get_element_by_id("levels")
            .ok_or_else(|| ConfigError::HostUnavailable("#levels".into()))?;
        let mut renderer = DomRenderer::new(document.clone(), levels, settings.is_dev())?;
        renderer.draw_grid(state.grid());
        renderer.draw_player(state.player());

        let game = Rc::new(RefCell::new(Game {
            state,
            renderer,
            input: settings.input_controller(),
        }));

        let listeners = vec![
            keydown_listener(&document, game.clone())?,
            resize_listener(&window, game.clone())?,
        ];

        SESSION.with(|s| {
            *s.borrow_mut() = Some(Session {
                _game: game,
                _listeners: listeners,
            });
        });

        log::info!("Tile Walk running!");
        Ok(())
    }

    /// Drop the running session, deregistering its listeners
    pub fn shutdown() {
        let session = SESSION.with(|s| s.borrow_mut().take());
        if session.is_some() {
            log::info!("Session shut down");
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    log::info!("Tile Walk starting...");

    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {}", e);
    }
}

/// Tear down the page session (listeners are removed)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn shutdown() {
    wasm_game::shutdown();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Native: replay key codes (from the command line, or a built-in walk) and
/// print the resulting frame.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use tile_walk::renderer::{Renderer, TextRenderer};
    use tile_walk::{ConfigProvider, GameState, Settings, StaticConfig};

    env_logger::init();
    log::info!("Tile Walk (native) starting...");

    let settings = Settings::default();
    let state = StaticConfig::default()
        .load()
        .and_then(|config| GameState::new(config, settings.rules()));
    let mut state = match state {
        Ok(state) => state,
        Err(e) => {
            log::error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    let mut renderer = TextRenderer::new();
    renderer.draw_grid(state.grid());
    renderer.draw_player(state.player());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let script: Vec<String> = if args.is_empty() {
        ["ArrowRight"; 8]
            .into_iter()
            .chain(["ArrowDown", "ArrowDown", "KeyA", "ArrowLeft"])
            .map(String::from)
            .collect()
    } else {
        args
    };

    for code in &script {
        match state.handle_key_input(code) {
            Some(result) if result.accepted => {}
            Some(_) => log::info!("{} rejected at the edge", code),
            None => log::info!("{} ignored", code),
        }
        renderer.present(&mut state);
    }

    let position = state.player().position();
    println!("{}", renderer.frame());
    println!(
        "player at ({}, {}) facing {}",
        position.x(),
        position.y(),
        state.player().direction().as_str()
    );
}
