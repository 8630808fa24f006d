//! TUI rendering and terminal management (impure shell)

pub mod constants;
mod help;
mod input;
pub mod layout;
mod sidebar;
pub mod styles;
pub mod transcript;

pub use layout::ScreenLayout;
pub use styles::{ColorConfig, MessageStyles};

use crate::bridge::worker::{BridgeEvent, Worker};
use crate::bridge::{ChatApi, QueryRequest, Ticket};
use crate::config::{KeyBindings, ResolvedConfig};
use crate::model::KeyAction;
use crate::state::{input as input_ops, AppState, ChatSession, FocusPane};
use crate::store::KeyValueStore;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Interval between animation ticks and backend polls.
const TICK_INTERVAL: Duration = Duration::from_millis(250);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    worker: Worker,
    key_bindings: KeyBindings,
    styles: MessageStyles,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(app_state: AppState, worker: Worker, styles: MessageStyles) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self {
            terminal,
            app_state,
            worker,
            key_bindings: KeyBindings::default(),
            styles,
        })
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Run the main event loop
    ///
    /// Returns when the user quits. Backend results are drained on every
    /// iteration, so answers show up within one tick even while idle.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.worker.dispatch_courses();
        self.draw()?;

        loop {
            if event::poll(TICK_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                    }
                    _ => {}
                }
            } else if self.app_state.session().is_busy() {
                self.app_state.advance_tick();
            }

            self.drain_bridge_events();
            self.draw()?;
        }
    }

    /// Apply every finished backend call.
    fn drain_bridge_events(&mut self) {
        while let Some(event) = self.worker.try_recv() {
            self.apply_bridge_event(event);
        }
    }

    fn apply_bridge_event(&mut self, event: BridgeEvent) {
        match event {
            BridgeEvent::QueryFinished { ticket, result } => {
                self.app_state.apply_query_result(ticket, result);
            }
            BridgeEvent::CoursesLoaded(result) => self.app_state.set_course_stats(result),
        }
    }

    /// Handle keyboard input
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            info!("Quit requested");
            return true;
        }

        if self.app_state.help_visible {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::F(1)) {
                self.app_state.toggle_help();
            }
            return false;
        }

        if self.app_state.focus == FocusPane::Input && self.handle_input_key(key) {
            return false;
        }

        match self.key_bindings.get(key) {
            Some(action) => self.handle_action(action),
            None => false,
        }
    }

    /// Editing keys for the focused input box.
    ///
    /// Returns false when the key is not an editing key and should go
    /// through the bindings table instead.
    fn handle_input_key(&mut self, key: KeyEvent) -> bool {
        let control = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let input = std::mem::take(&mut self.app_state.input);

        let input = match key.code {
            KeyCode::Enter => {
                self.app_state.input = input;
                let outgoing = self.app_state.submit_input();
                self.dispatch_query(outgoing);
                return true;
            }
            KeyCode::Char(ch) if !control && !alt => input_ops::handle_char_input(input, ch),
            KeyCode::Backspace => input_ops::handle_backspace(input),
            KeyCode::Delete => input_ops::handle_delete(input),
            KeyCode::Left => input_ops::handle_cursor_left(input),
            KeyCode::Right => input_ops::handle_cursor_right(input),
            KeyCode::Home => input_ops::handle_home(input),
            KeyCode::End => input_ops::handle_end(input),
            _ => {
                self.app_state.input = input;
                return false;
            }
        };
        self.app_state.input = input;
        true
    }

    /// Perform a bound action. Returns true on quit.
    fn handle_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Quit => {
                info!("Quit requested");
                return true;
            }
            KeyAction::Help => self.app_state.toggle_help(),
            KeyAction::NewChat => self.app_state.new_chat(),
            KeyAction::CycleFocus => self.app_state.cycle_focus(),
            KeyAction::CycleFocusBack => self.app_state.cycle_focus_back(),
            KeyAction::FocusInput => self.app_state.focus_input(),
            KeyAction::Activate => self.activate(),
            KeyAction::MoveUp
            | KeyAction::MoveDown
            | KeyAction::PageUp
            | KeyAction::PageDown
            | KeyAction::JumpTop
            | KeyAction::JumpBottom => {
                let viewport_height = self.transcript_viewport_height();
                crate::state::handle_scroll_action(&mut self.app_state, action, viewport_height);
            }
        }
        false
    }

    /// Enter outside the input box.
    fn activate(&mut self) {
        match self.app_state.focus {
            FocusPane::History => self.app_state.activate_history(),
            FocusPane::Suggestions => {
                let outgoing = self.app_state.send_suggestion();
                self.dispatch_query(outgoing);
            }
            FocusPane::Input => {
                let outgoing = self.app_state.submit_input();
                self.dispatch_query(outgoing);
            }
            FocusPane::Transcript => {}
        }
    }

    fn dispatch_query(&self, outgoing: Option<(Ticket, QueryRequest)>) {
        if let Some((ticket, request)) = outgoing {
            self.worker.dispatch_query(ticket, request);
        }
    }

    fn frame_area(&self) -> Rect {
        match self.terminal.size() {
            Ok(size) => Rect::new(0, 0, size.width, size.height),
            Err(_) => Rect::new(0, 0, 80, 24),
        }
    }

    fn transcript_viewport_height(&self) -> usize {
        let (_, height) = ScreenLayout::new(self.frame_area()).transcript_inner();
        usize::from(height)
    }

    /// Render the current frame
    ///
    /// Clamps the transcript scroll against the wrapped content first, so
    /// following the bottom keeps the newest line visible.
    fn draw(&mut self) -> Result<(), TuiError> {
        let layout = ScreenLayout::new(self.frame_area());
        let lines = transcript::build_transcript_lines(&self.app_state, &self.styles);
        let (width, height) = layout.transcript_inner();
        let content_lines = transcript::wrapped_line_count(&lines, width);
        self.app_state
            .transcript_scroll
            .set_bounds(content_lines, usize::from(height));

        self.terminal.draw(|frame| {
            layout::render_layout(frame, &self.app_state, &self.styles, lines);
        })?;

        Ok(())
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without touching the real terminal.
    pub(crate) fn new_for_test(terminal: Terminal<B>, app_state: AppState, worker: Worker) -> Self {
        Self {
            terminal,
            app_state,
            worker,
            key_bindings: KeyBindings::default(),
            styles: MessageStyles::with_color_config(ColorConfig::from_env_and_args(true)),
        }
    }

    /// Block until one backend call finishes and apply it.
    pub(crate) fn wait_for_bridge(&mut self) -> bool {
        match self.worker.recv_timeout(Duration::from_secs(5)) {
            Some(event) => {
                self.apply_bridge_event(event);
                true
            }
            None => false,
        }
    }
}

/// Initialize and run the TUI application
///
/// This is the main entry point for the TUI. It restores the chat ledger,
/// sets up the terminal, runs the event loop and always restores the
/// terminal on the way out.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(
    config: &ResolvedConfig,
    store: Box<dyn KeyValueStore>,
    api: Arc<dyn ChatApi>,
    no_color: bool,
) -> Result<(), TuiError> {
    let session = ChatSession::restore(store, config.max_chats);
    let app_state = AppState::new(session, config.suggested_questions.clone());
    let styles = MessageStyles::with_color_config(ColorConfig::from_env_and_args(no_color));

    let mut app = TuiApp::new(app_state, Worker::new(api), styles)?;
    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::QueryResponse;
    use crate::model::{BridgeError, CourseStats, CourseStatsState, Role, SessionId};
    use crate::store::MemoryStore;
    use ratatui::backend::TestBackend;
    use std::sync::Mutex;

    /// Answers every question with an echo and records what it was sent.
    #[derive(Debug, Default)]
    struct EchoApi {
        sent: Mutex<Vec<QueryRequest>>,
    }

    impl ChatApi for EchoApi {
        fn query(&self, request: &QueryRequest) -> Result<QueryResponse, BridgeError> {
            if let Ok(mut sent) = self.sent.lock() {
                sent.push(request.clone());
            }
            Ok(QueryResponse {
                session_id: SessionId::new("backend-session").unwrap(),
                answer: format!("You asked: {}", request.query),
                sources: Vec::new(),
            })
        }

        fn courses(&self) -> Result<CourseStats, BridgeError> {
            Ok(CourseStats {
                total_courses: 1,
                course_titles: vec!["Intro".to_string()],
            })
        }
    }

    fn create_test_app() -> (TuiApp<TestBackend>, Arc<EchoApi>) {
        let api = Arc::new(EchoApi::default());
        let terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let session = ChatSession::restore(Box::new(MemoryStore::new()), 5);
        let state = AppState::new(session, vec!["Outline of a course".to_string()]);
        let worker = Worker::new(Arc::clone(&api) as Arc<dyn ChatApi>);
        (TuiApp::new_for_test(terminal, state, worker), api)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut TuiApp<TestBackend>, text: &str) {
        for ch in text.chars() {
            app.handle_key(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn tui_error_from_io_error() {
        let io_err = io::Error::other("test error");
        let tui_err: TuiError = io_err.into();
        assert!(matches!(tui_err, TuiError::Io(_)));
    }

    #[test]
    fn ctrl_c_quits_from_any_pane() {
        let (mut app, _) = create_test_app();
        assert!(app.handle_key(ctrl('c')));

        app.app_state.focus = FocusPane::History;
        assert!(app.handle_key(ctrl('c')));
    }

    #[test]
    fn q_is_text_in_input_but_quits_elsewhere() {
        let (mut app, _) = create_test_app();

        assert!(!app.handle_key(key(KeyCode::Char('q'))));
        assert_eq!(app.app_state.input.text(), "q");

        app.handle_key(key(KeyCode::Tab));
        assert!(app.handle_key(key(KeyCode::Char('q'))));
    }

    #[test]
    fn editing_keys_change_input() {
        let (mut app, _) = create_test_app();
        type_text(&mut app, "helo");
        app.handle_key(key(KeyCode::Left));
        app.handle_key(key(KeyCode::Char('l')));
        app.handle_key(key(KeyCode::End));
        app.handle_key(key(KeyCode::Backspace));

        assert_eq!(app.app_state.input.text(), "hell");
    }

    #[test]
    fn enter_sends_question_and_answer_arrives() {
        let (mut app, api) = create_test_app();
        type_text(&mut app, "  What is RAG?  ");

        app.handle_key(key(KeyCode::Enter));

        assert!(app.app_state.input.text().is_empty());
        assert!(app.app_state.session().is_busy());
        assert!(app.wait_for_bridge());
        assert!(!app.app_state.session().is_busy());

        let transcript = app.app_state.session().transcript();
        let last = transcript.last().unwrap();
        assert_eq!(last.role, Role::Assistant);
        assert_eq!(last.content, "You asked: What is RAG?");

        let sent = api.sent.lock().unwrap();
        assert_eq!(sent[0].query, "What is RAG?");
        assert_eq!(sent[0].session_id, None);
    }

    #[test]
    fn blank_enter_sends_nothing() {
        let (mut app, api) = create_test_app();
        type_text(&mut app, "   ");

        app.handle_key(key(KeyCode::Enter));

        assert!(!app.app_state.session().is_busy());
        assert!(api.sent.lock().unwrap().is_empty());
        assert_eq!(app.app_state.input.text(), "   ");
    }

    #[test]
    fn suggestion_is_sent_on_enter() {
        let (mut app, api) = create_test_app();
        app.app_state.focus = FocusPane::Suggestions;

        app.handle_key(key(KeyCode::Enter));
        assert!(app.wait_for_bridge());

        assert_eq!(api.sent.lock().unwrap()[0].query, "Outline of a course");
    }

    #[test]
    fn ctrl_n_starts_new_chat_from_input() {
        let (mut app, _) = create_test_app();

        app.handle_key(ctrl('n'));

        assert_eq!(app.app_state.session().ledger().len(), 1);
        assert!(!app.app_state.session().is_transient());
    }

    #[test]
    fn history_enter_switches_chat() {
        let (mut app, _) = create_test_app();
        app.handle_key(ctrl('n'));
        app.handle_key(ctrl('n'));
        app.app_state.focus = FocusPane::History;

        app.handle_key(key(KeyCode::Char('k')));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(
            app.app_state.session().ledger().edited_entry().unwrap().title,
            "Chat 1"
        );
    }

    #[test]
    fn help_swallows_keys_until_closed() {
        let (mut app, _) = create_test_app();
        app.app_state.focus = FocusPane::Transcript;

        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.app_state.help_visible);
        assert!(!app.handle_key(key(KeyCode::Char('q'))));

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.app_state.help_visible);
    }

    #[test]
    fn courses_event_updates_sidebar_state() {
        let (mut app, _) = create_test_app();

        app.worker.dispatch_courses();
        assert!(app.wait_for_bridge());

        assert!(matches!(
            app.app_state.course_stats,
            CourseStatsState::Loaded(ref stats) if stats.total_courses == 1
        ));
    }

    #[test]
    fn draw_keeps_newest_message_visible() {
        let (mut app, _) = create_test_app();
        for i in 0..10 {
            type_text(&mut app, &format!("question number {i}"));
            app.handle_key(key(KeyCode::Enter));
            assert!(app.wait_for_bridge());
        }

        app.draw().unwrap();

        assert!(app.app_state.transcript_scroll.is_following());
        assert!(app.app_state.transcript_scroll.offset() > 0);
        let buffer = app.terminal.backend().buffer();
        let screen: String = (0..buffer.area.height)
            .flat_map(|y| (0..buffer.area.width).map(move |x| (x, y)))
            .map(|(x, y)| buffer[(x, y)].symbol().to_string())
            .collect();
        assert!(screen.contains("You asked: question number 9"));
    }

    #[test]
    fn scrolling_up_releases_follow() {
        let (mut app, _) = create_test_app();
        for i in 0..10 {
            type_text(&mut app, &format!("q{i}"));
            app.handle_key(key(KeyCode::Enter));
            assert!(app.wait_for_bridge());
        }
        app.draw().unwrap();
        app.app_state.focus = FocusPane::Transcript;

        app.handle_key(key(KeyCode::Char('k')));

        assert!(!app.app_state.transcript_scroll.is_following());
    }
}
