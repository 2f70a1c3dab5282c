//! Browser surface: screens, grid rendering and pointer / touch / keyboard input.
//!
//! The page supplies the markup (screens, `wordGrid`, `wordList`, counters);
//! this module fills it in and binds listeners. All game rules live in
//! [`crate::puzzle::session::GameSession`]; everything here is wiring.
//!
//! State is a single thread-local. Listener closures borrow it for the
//! duration of one event and never call back into a function that borrows it
//! again.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, Document, Element, EventTarget, HtmlButtonElement, HtmlElement,
    HtmlTextAreaElement, KeyboardEvent, MouseEvent, TouchEvent, window,
};

use crate::puzzle::Cell;
use crate::puzzle::session::{FoundWord, GameMode, GameSession};
use crate::stats::{self, StatsBucket};
use crate::words::{self, Category, Difficulty};

const HINT_HIGHLIGHT_MS: f64 = 3000.0;
const REVEAL_HIGHLIGHT_MS: f64 = 1500.0;
const DEFAULT_CUSTOM_GRID_SIZE: usize = 15;

#[derive(Default)]
struct UiState {
    session: Option<GameSession>,
    // Difficulty-screen picks
    category: Option<Category>,
    difficulty: Option<Difficulty>,
    // When the current hint / reveal highlight should be cleared
    highlight_until_ms: Option<f64>,
    timer_text: String,
    grid_wired: bool,
    loop_started: bool,
}

thread_local! {
    static UI_STATE: RefCell<UiState> = RefCell::new(UiState::default());
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

// --- DOM helpers -------------------------------------------------------------

fn document() -> Result<Document, JsValue> {
    window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn set_text(doc: &Document, id: &str, text: &str) {
    if let Some(el) = doc.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = doc.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn remove_class_all(doc: &Document, selector: &str, class: &str) {
    for el in query_all(doc, selector) {
        let _ = el.class_list().remove_1(class);
    }
}

fn cell_element(doc: &Document, cell: Cell) -> Option<Element> {
    let selector = format!(
        "#wordGrid [data-row=\"{}\"][data-col=\"{}\"]",
        cell.row, cell.col
    );
    doc.query_selector(&selector).ok().flatten()
}

fn word_item(doc: &Document, word: &str) -> Option<Element> {
    doc.query_selector(&format!("#wordList [data-word=\"{word}\"]"))
        .ok()
        .flatten()
}

fn mark_cells(doc: &Document, cells: &[Cell], class: &str) {
    for &cell in cells {
        if let Some(el) = cell_element(doc, cell) {
            let _ = el.class_list().add_1(class);
        }
    }
}

fn cell_from_element(el: &Element) -> Option<Cell> {
    if !el.class_list().contains("grid-cell") {
        return None;
    }
    let row = el.get_attribute("data-row")?.parse().ok()?;
    let col = el.get_attribute("data-col")?.parse().ok()?;
    Some(Cell::new(row, col))
}

fn cell_from_target(target: Option<EventTarget>) -> Option<Cell> {
    let el: Element = target?.dyn_into().ok()?;
    cell_from_element(&el)
}

fn touch_cell(evt: &TouchEvent) -> Option<Cell> {
    let touch = evt.touches().get(0)?;
    let doc = document().ok()?;
    let el = doc.element_from_point(touch.client_x() as f32, touch.client_y() as f32)?;
    cell_from_element(&el)
}

fn alert(message: &str) {
    if let Some(w) = window() {
        let _ = w.alert_with_message(message);
    }
}

fn set_button_disabled(el: Option<Element>, disabled: bool) {
    if let Some(btn) = el.and_then(|el| el.dyn_into::<HtmlButtonElement>().ok()) {
        btn.set_disabled(disabled);
    }
}

// --- Screens -----------------------------------------------------------------

fn activate_screen(doc: &Document, id: &str) {
    remove_class_all(doc, ".screen", "active");
    if let Some(el) = doc.get_element_by_id(id) {
        let _ = el.class_list().add_1("active");
    }
}

#[wasm_bindgen]
pub fn show_screen(id: &str) -> Result<(), JsValue> {
    let doc = document()?;
    activate_screen(&doc, id);
    match id {
        "difficultyScreen" => reset_difficulty_selection(&doc),
        "statsScreen" => update_stats_display(&doc),
        _ => {}
    }
    Ok(())
}

fn reset_difficulty_selection(doc: &Document) {
    remove_class_all(doc, ".category-item", "selected");
    remove_class_all(doc, ".difficulty-btn", "selected");
    set_button_disabled(doc.query_selector(".start-game-btn").ok().flatten(), true);
    UI_STATE.with(|cell| {
        let mut st = cell.borrow_mut();
        st.category = None;
        st.difficulty = None;
    });
}

fn update_stats_display(doc: &Document) {
    let stats = stats::load_stats();
    set_text(doc, "totalGames", &stats.total_games.to_string());
    set_text(doc, "totalCompleted", &stats.total_completed.to_string());
    set_text(doc, "averageTime", &stats::format_short(stats.average_time_ms()));
    let best = if stats.best_time > 0 {
        stats::format_short(stats.best_time)
    } else {
        "0:00".to_owned()
    };
    set_text(doc, "bestTime", &best);
    for (id, bucket) in [
        ("easyStats", StatsBucket::Easy),
        ("mediumStats", StatsBucket::Medium),
        ("hardStats", StatsBucket::Hard),
        ("customStats", StatsBucket::Custom),
    ] {
        set_text(doc, id, &stats.bucket_summary(bucket));
    }
}

// --- Setup -------------------------------------------------------------------

/// Bind page-level listeners and start the UI loop. Call once after the DOM
/// is ready.
#[wasm_bindgen]
pub fn mount() -> Result<(), JsValue> {
    let doc = document()?;
    wire_choice(&doc, ".category-item", "data-category", |st, key| {
        st.category = Category::parse(key);
    })?;
    wire_choice(&doc, ".difficulty-btn", "data-difficulty", |st, key| {
        st.difficulty = Difficulty::parse(key);
    })?;
    wire_choice(&doc, ".grid-size-btn", "data-size", |_, _| {})?;
    wire_keyboard(&doc)?;
    wire_default_prevention(&doc)?;
    update_stats_display(&doc);

    let first = UI_STATE.with(|cell| !std::mem::replace(&mut cell.borrow_mut().loop_started, true));
    if first {
        start_ui_loop();
    }
    Ok(())
}

/// Radio-style selection over `selector`: clicking one marks it `selected`,
/// feeds its `attr` value to `apply`, and re-evaluates the start button.
fn wire_choice(
    doc: &Document,
    selector: &'static str,
    attr: &'static str,
    apply: fn(&mut UiState, &str),
) -> Result<(), JsValue> {
    for item in query_all(doc, selector) {
        let target = item.clone();
        let onclick = Closure::<dyn FnMut()>::wrap(Box::new(move || {
            let Ok(doc) = document() else { return };
            remove_class_all(&doc, selector, "selected");
            let _ = target.class_list().add_1("selected");
            let key = target.get_attribute(attr).unwrap_or_default();
            let ready = UI_STATE.with(|cell| {
                let mut st = cell.borrow_mut();
                apply(&mut st, &key);
                st.category.is_some() && st.difficulty.is_some()
            });
            set_button_disabled(doc.query_selector(".start-game-btn").ok().flatten(), !ready);
        }));
        item.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref())?;
        onclick.forget();
    }
    Ok(())
}

fn wire_keyboard(doc: &Document) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
        let Ok(doc) = document() else { return };
        let in_game = doc
            .get_element_by_id("gameScreen")
            .is_some_and(|el| el.class_list().contains("active"));
        if !in_game {
            return;
        }
        let key = evt.key();
        if key.eq_ignore_ascii_case("h") && !evt.ctrl_key() && !evt.meta_key() {
            evt.prevent_default();
            if let Err(err) = use_hint() {
                log::warn!("hint failed: {err:?}");
            }
        } else if key == " " {
            evt.prevent_default();
            if let Err(err) = highlight_remaining() {
                log::warn!("highlight failed: {err:?}");
            }
        }
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// No context menu over the game, no text selection while dragging on the grid.
fn wire_default_prevention(doc: &Document) -> Result<(), JsValue> {
    for (event, scope) in [("contextmenu", ".game-container"), ("selectstart", ".word-grid")] {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::Event| {
            let inside = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(scope).ok().flatten())
                .is_some();
            if inside {
                evt.prevent_default();
            }
        }) as Box<dyn FnMut(_)>);
        doc.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

/// Reuse the page's `#wordGrid` or create one; pointer listeners are bound the
/// first time through.
fn grid_element(doc: &Document) -> Result<HtmlElement, JsValue> {
    let grid: HtmlElement = if let Some(el) = doc.get_element_by_id("wordGrid") {
        el.dyn_into()?
    } else {
        let el: HtmlElement = doc.create_element("div")?.dyn_into()?;
        el.set_id("wordGrid");
        el.set_class_name("word-grid");
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&el)?;
        el
    };
    let wired = UI_STATE.with(|cell| std::mem::replace(&mut cell.borrow_mut().grid_wired, true));
    if !wired {
        wire_grid_input(&grid)?;
    }
    Ok(grid)
}

fn wire_grid_input(grid: &HtmlElement) -> Result<(), JsValue> {
    // Mouse
    {
        let on_down = Closure::wrap(Box::new(move |evt: MouseEvent| {
            if let Some(cell) = cell_from_target(evt.target()) {
                pointer_down(cell);
            }
        }) as Box<dyn FnMut(_)>);
        grid.add_event_listener_with_callback("mousedown", on_down.as_ref().unchecked_ref())?;
        on_down.forget();

        let on_move = Closure::wrap(Box::new(move |evt: MouseEvent| {
            if let Some(cell) = cell_from_target(evt.target()) {
                pointer_move(cell);
            }
        }) as Box<dyn FnMut(_)>);
        grid.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();

        let on_up = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            pointer_up();
        }) as Box<dyn FnMut(_)>);
        grid.add_event_listener_with_callback("mouseup", on_up.as_ref().unchecked_ref())?;
        on_up.forget();
    }

    // Touch: non-passive so the page does not scroll under a drag
    {
        let options = AddEventListenerOptions::new();
        options.set_passive(false);

        let on_start = Closure::wrap(Box::new(move |evt: TouchEvent| {
            evt.prevent_default();
            if let Some(cell) = touch_cell(&evt) {
                pointer_down(cell);
            }
        }) as Box<dyn FnMut(_)>);
        grid.add_event_listener_with_callback_and_add_event_listener_options(
            "touchstart",
            on_start.as_ref().unchecked_ref(),
            &options,
        )?;
        on_start.forget();

        let on_move = Closure::wrap(Box::new(move |evt: TouchEvent| {
            evt.prevent_default();
            if let Some(cell) = touch_cell(&evt) {
                pointer_move(cell);
            }
        }) as Box<dyn FnMut(_)>);
        grid.add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            on_move.as_ref().unchecked_ref(),
            &options,
        )?;
        on_move.forget();

        let on_end = Closure::wrap(Box::new(move |evt: TouchEvent| {
            evt.prevent_default();
            pointer_up();
        }) as Box<dyn FnMut(_)>);
        grid.add_event_listener_with_callback_and_add_event_listener_options(
            "touchend",
            on_end.as_ref().unchecked_ref(),
            &options,
        )?;
        on_end.forget();
    }
    Ok(())
}

// --- Pointer handling ----------------------------------------------------------

fn paint_selection(doc: &Document, session: &GameSession) {
    remove_class_all(doc, ".grid-cell.selecting", "selecting");
    mark_cells(doc, &session.selecting_cells(), "selecting");
}

fn pointer_down(cell: Cell) {
    let Ok(doc) = document() else { return };
    UI_STATE.with(|state_cell| {
        if let Some(session) = state_cell.borrow_mut().session.as_mut() {
            if session.is_finished() {
                return;
            }
            session.begin_selection(cell);
            paint_selection(&doc, session);
        }
    });
}

fn pointer_move(cell: Cell) {
    let Ok(doc) = document() else { return };
    UI_STATE.with(|state_cell| {
        if let Some(session) = state_cell.borrow_mut().session.as_mut() {
            if session.is_selecting() {
                session.update_selection(cell);
                paint_selection(&doc, session);
            }
        }
    });
}

fn pointer_up() {
    let Ok(doc) = document() else { return };
    let now = now_ms();
    let completed = UI_STATE.with(|state_cell| {
        let mut st = state_cell.borrow_mut();
        let Some(session) = st.session.as_mut() else {
            return false;
        };
        if !session.is_selecting() {
            return false;
        }
        let hit = session.end_selection(now);
        remove_class_all(&doc, ".grid-cell.selecting", "selecting");
        let Some(hit) = hit else {
            return false;
        };
        mark_found(&doc, &hit);
        update_counters(&doc, session);
        session.is_finished()
    });
    if completed {
        end_game(&doc);
    }
}

fn mark_found(doc: &Document, hit: &FoundWord) {
    mark_cells(doc, &hit.cells, "found");
    if let Some(item) = word_item(doc, &hit.word) {
        let _ = item.class_list().add_1("found");
    }
}

fn update_counters(doc: &Document, session: &GameSession) {
    set_text(doc, "wordsFound", &session.found_count().to_string());
    set_text(doc, "hintsLeft", &session.hints_left().to_string());
    set_button_disabled(doc.get_element_by_id("hintBtn"), session.hints_left() == 0);
}

// --- Game lifecycle ------------------------------------------------------------

fn render_game(doc: &Document, session: &GameSession) -> Result<(), JsValue> {
    set_text(doc, "currentMode", &session.mode().label());
    set_text(doc, "totalWords", &session.total_words().to_string());
    update_counters(doc, session);

    let grid = grid_element(doc)?;
    let size = session.puzzle().grid.size();
    grid.set_inner_html("");
    grid.style()
        .set_property("grid-template-columns", &format!("repeat({size}, 1fr)"))?;
    for (r, row) in session.puzzle().grid.rows().iter().enumerate() {
        for (c, letter) in row.chars().enumerate() {
            let cell = doc.create_element("div")?;
            cell.set_class_name("grid-cell");
            cell.set_text_content(Some(&letter.to_string()));
            cell.set_attribute("data-row", &r.to_string())?;
            cell.set_attribute("data-col", &c.to_string())?;
            grid.append_child(&cell)?;
        }
    }

    if let Some(list) = doc.get_element_by_id("wordList") {
        list.set_inner_html("");
        for word in session.targets() {
            let item = doc.create_element("div")?;
            item.set_class_name("word-item");
            item.set_text_content(Some(word));
            item.set_attribute("data-word", word)?;
            list.append_child(&item)?;
        }
    }
    Ok(())
}

fn launch(mode: GameMode, words: &[String]) -> Result<(), JsValue> {
    let doc = document()?;
    let session = GameSession::new(mode, words, &mut rand::thread_rng(), now_ms());
    if session.total_words() == 0 {
        log::warn!("no words placed on a {0}x{0} grid", mode.grid_size());
        alert("None of the words fit on this grid. Try a larger grid or shorter words.");
        return Ok(());
    }
    render_game(&doc, &session)?;
    UI_STATE.with(|cell| {
        let mut st = cell.borrow_mut();
        st.session = Some(session);
        st.highlight_until_ms = None;
        st.timer_text.clear();
    });
    set_text(&doc, "gameTimer", "00:00");
    activate_screen(&doc, "gameScreen");
    Ok(())
}

fn start_standard(category: Category, difficulty: Difficulty) -> Result<(), JsValue> {
    let count = difficulty.settings().word_count;
    let picked = words::pick_words(category.words(), count, &mut rand::thread_rng());
    launch(GameMode::Standard { category, difficulty }, &picked)
}

#[wasm_bindgen]
pub fn start_game(category: &str, difficulty: &str) -> Result<(), JsValue> {
    let category =
        Category::parse(category).ok_or_else(|| JsValue::from_str("unknown category"))?;
    let difficulty =
        Difficulty::parse(difficulty).ok_or_else(|| JsValue::from_str("unknown difficulty"))?;
    start_standard(category, difficulty)
}

/// Start with whatever was picked on the difficulty screen; does nothing
/// until both a category and a difficulty are chosen.
#[wasm_bindgen]
pub fn start_selected_game() -> Result<(), JsValue> {
    let picked = UI_STATE.with(|cell| {
        let st = cell.borrow();
        st.category.zip(st.difficulty)
    });
    match picked {
        Some((category, difficulty)) => start_standard(category, difficulty),
        None => Ok(()),
    }
}

#[wasm_bindgen]
pub fn start_custom_game() -> Result<(), JsValue> {
    let doc = document()?;
    let text = doc
        .get_element_by_id("customWords")
        .and_then(|el| el.dyn_into::<HtmlTextAreaElement>().ok())
        .map(|area| area.value())
        .unwrap_or_default();
    let size = doc
        .query_selector(".grid-size-btn.selected")?
        .and_then(|el| el.get_attribute("data-size"))
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_CUSTOM_GRID_SIZE);
    let parsed = words::parse_custom_words(&text)
        .and_then(|list| words::validate_grid_size(size).map(|grid_size| (list, grid_size)));
    match parsed {
        Ok((list, grid_size)) => launch(GameMode::Custom { grid_size }, &list),
        Err(err) => {
            alert(&err.to_string());
            Ok(())
        }
    }
}

fn end_game(doc: &Document) {
    let now = now_ms();
    let summary = UI_STATE.with(|cell| {
        cell.borrow().session.as_ref().map(|s| {
            (
                s.mode(),
                s.elapsed_ms(now) as u64,
                s.found_count(),
                s.total_words(),
                s.hints_used(),
            )
        })
    });
    let Some((mode, elapsed, found, total, hints_used)) = summary else {
        return;
    };
    let mut record = stats::load_stats();
    record.record_game(mode.stats_bucket(), elapsed, found == total);
    stats::save_stats(&record);
    log::info!("game finished in {}", stats::format_clock(elapsed));

    set_text(doc, "gameTimer", &stats::format_clock(elapsed));
    set_text(doc, "finalTime", &stats::format_clock(elapsed));
    set_text(doc, "finalWordsFound", &format!("{found}/{total}"));
    set_text(doc, "finalHintsUsed", &hints_used.to_string());
    set_text(doc, "finalDifficulty", mode.difficulty_label());
    activate_screen(doc, "gameCompleteScreen");
}

#[wasm_bindgen]
pub fn play_again() -> Result<(), JsValue> {
    let custom = UI_STATE.with(|cell| {
        cell.borrow()
            .session
            .as_ref()
            .is_some_and(|s| s.mode().is_custom())
    });
    show_screen(if custom { "customScreen" } else { "difficultyScreen" })
}

// --- Hints ---------------------------------------------------------------------

#[wasm_bindgen]
pub fn use_hint() -> Result<(), JsValue> {
    let doc = document()?;
    let now = now_ms();
    UI_STATE.with(|cell| {
        let mut guard = cell.borrow_mut();
        let st = &mut *guard;
        let Some(session) = st.session.as_mut() else {
            return;
        };
        let Some(hint) = session.use_hint(&mut rand::thread_rng()).cloned() else {
            return;
        };
        mark_cells(&doc, &hint.cells, "hint-highlight");
        if let Some(item) = word_item(&doc, &hint.word) {
            let _ = item.class_list().add_1("hint-highlight");
        }
        update_counters(&doc, session);
        st.highlight_until_ms = Some(now + HINT_HIGHLIGHT_MS);
    });
    Ok(())
}

/// Flash every word still to be found. Does not spend a hint.
#[wasm_bindgen]
pub fn highlight_remaining() -> Result<(), JsValue> {
    let doc = document()?;
    let now = now_ms();
    UI_STATE.with(|cell| {
        let mut guard = cell.borrow_mut();
        let st = &mut *guard;
        let Some(session) = st.session.as_ref() else {
            return;
        };
        for placed in session.remaining_placements() {
            mark_cells(&doc, &placed.cells, "hint-highlight");
        }
        let until = now + REVEAL_HIGHLIGHT_MS;
        st.highlight_until_ms = Some(st.highlight_until_ms.map_or(until, |cur| cur.max(until)));
    });
    Ok(())
}

// --- Stats -----------------------------------------------------------------------

#[wasm_bindgen]
pub fn reset_stats() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    if win.confirm_with_message(
        "Are you sure you want to reset all statistics? This cannot be undone.",
    )? {
        stats::clear_stats();
        update_stats_display(&document()?);
        alert("Statistics have been reset!");
    }
    Ok(())
}

// --- Frame loop ------------------------------------------------------------------

fn start_ui_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        ui_tick(ts);
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

/// Per-frame: refresh the clock text and expire hint highlights.
fn ui_tick(now: f64) {
    let Ok(doc) = document() else { return };
    UI_STATE.with(|cell| {
        let mut guard = cell.borrow_mut();
        let st = &mut *guard;
        if st.highlight_until_ms.is_some_and(|until| now >= until) {
            remove_class_all(&doc, ".hint-highlight", "hint-highlight");
            st.highlight_until_ms = None;
        }
        let Some(session) = st.session.as_ref() else {
            return;
        };
        if session.is_finished() {
            return;
        }
        let text = stats::format_clock(session.elapsed_ms(now) as u64);
        if text != st.timer_text {
            set_text(&doc, "gameTimer", &text);
            st.timer_text = text;
        }
    });
}
