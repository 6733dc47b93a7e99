//! Interactive dashboard TUI using ratatui + crossterm.
//!
//! Draws the shared [`Surface`] and turns key presses into controller
//! calls. While a request is in flight the screen keeps redrawing from the
//! surface channel; key presses queue up in the terminal until it settles.

use std::future::Future;
use std::io::{self, Stdout};
use std::time::Duration;

use bankapi::{AccountDraft, Bank, TransactionDraft};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::app::{App, FileStorage, Region, SharedSurface, Store, Surface, View};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::output::balance_line;

/// Target render interval (10 FPS).
const RENDER_INTERVAL: Duration = Duration::from_millis(100);

const REGISTER_LABELS: [&str; 4] = ["User", "Currency", "Description", "Balance"];
const DIALOG_LABELS: [&str; 3] = ["Date", "Object", "Amount"];

type Term = Terminal<CrosstermBackend<Stdout>>;

// ---------------------------------------------------------------------------
// Internal types
// ---------------------------------------------------------------------------

/// Something the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Login(String),
    Register(AccountDraft),
    Refresh,
    AddTransaction,
    Confirm(TransactionDraft),
    Cancel,
    Logout,
    Back,
    Forward,
    Quit,
}

/// Form input owned by the terminal, not by the controllers.
#[derive(Debug, Default)]
struct Forms {
    login_user: String,
    register: [String; 4],
    /// Login view: 0 is the login field, 1..=4 the register fields.
    login_focus: usize,
    dialog: [String; 3],
    dialog_focus: usize,
    dialog_open: bool,
    pending: bool,
}

impl Forms {
    /// Track the controller's dialog: load its reset form when it opens.
    fn sync_dialog(&mut self, surface: &Surface) {
        match (&surface.dialog, self.dialog_open) {
            (Some(form), false) => {
                self.dialog = [form.date.clone(), form.object.clone(), form.amount.clone()];
                self.dialog_focus = 1;
                self.dialog_open = true;
            }
            (None, true) => self.dialog_open = false,
            _ => {}
        }
    }

    fn focused_field(&mut self, view: Option<View>) -> Option<&mut String> {
        if self.dialog_open {
            return self.dialog.get_mut(self.dialog_focus);
        }
        match (view, self.login_focus) {
            (Some(View::Login), 0) => Some(&mut self.login_user),
            (Some(View::Login), n) => self.register.get_mut(n - 1),
            _ => None,
        }
    }

    fn register_draft(&self) -> AccountDraft {
        let [user, currency, description, balance] = self.register.clone();
        AccountDraft {
            user,
            currency,
            description,
            balance,
        }
    }

    fn transaction_draft(&self) -> TransactionDraft {
        let [date, object, amount] = self.dialog.clone();
        TransactionDraft {
            date,
            object,
            amount,
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Run the dashboard TUI until the user quits or `cancel` fires.
pub async fn run(config: &AppConfig, cancel: CancellationToken) -> Result<(), AppError> {
    let bank = Bank::new(config.bank_config())?;
    let store = Store::new(Box::new(FileStorage::new(&config.data_dir)));
    let surface = SharedSurface::new();
    let surface_rx = surface.subscribe();
    let mut app = App::new(bank, store, surface, "/");

    info!(server = %config.server_url, "starting dashboard");

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let result = event_loop(&mut app, &mut terminal, surface_rx, &cancel).await;

    restore_terminal(&mut terminal);
    result
}

async fn event_loop(
    app: &mut App<SharedSurface>,
    terminal: &mut Term,
    surface_rx: watch::Receiver<Surface>,
    cancel: &CancellationToken,
) -> Result<(), AppError> {
    let mut forms = Forms::default();

    if !run_pending(app.init(), terminal, &surface_rx, &mut forms, cancel).await? {
        return Ok(());
    }

    let mut render_interval = tokio::time::interval(RENDER_INTERVAL);
    loop {
        tokio::select! {
            _ = render_interval.tick() => {}
            _ = cancel.cancelled() => return Ok(()),
        }

        let surface = surface_rx.borrow().clone();
        forms.sync_dialog(&surface);
        draw(terminal, &surface, &forms)?;

        // Poll crossterm events (non-blocking).
        let mut actions = Vec::new();
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    actions.extend(handle_key(&mut forms, &surface, key));
                }
            }
        }

        for action in actions {
            if action == Action::Quit {
                return Ok(());
            }
            let done = run_pending(perform(app, action), terminal, &surface_rx, &mut forms, cancel);
            if !done.await? {
                return Ok(());
            }
            forms.sync_dialog(&surface_rx.borrow().clone());
        }
    }
}

/// Drive a controller future to completion, redrawing on every tick.
/// Returns `false` if cancelled first.
async fn run_pending<F: Future<Output = ()>>(
    fut: F,
    terminal: &mut Term,
    surface_rx: &watch::Receiver<Surface>,
    forms: &mut Forms,
    cancel: &CancellationToken,
) -> Result<bool, AppError> {
    tokio::pin!(fut);
    forms.pending = true;
    let mut render_interval = tokio::time::interval(RENDER_INTERVAL);

    let finished = loop {
        tokio::select! {
            _ = &mut fut => break true,
            _ = cancel.cancelled() => break false,
            _ = render_interval.tick() => {
                let surface = surface_rx.borrow().clone();
                draw(terminal, &surface, forms)?;
            }
        }
    };

    forms.pending = false;
    Ok(finished)
}

async fn perform(app: &mut App<SharedSurface>, action: Action) {
    match action {
        Action::Login(user) => app.login(&user).await,
        Action::Register(draft) => app.register(&draft).await,
        Action::Refresh => app.refresh().await,
        Action::AddTransaction => app.add_transaction(),
        Action::Confirm(draft) => app.confirm_transaction(&draft).await,
        Action::Cancel => app.cancel_transaction(),
        Action::Logout => app.logout().await,
        Action::Back => {
            app.back().await;
        }
        Action::Forward => {
            app.forward().await;
        }
        Action::Quit => {}
    }
}

// ---------------------------------------------------------------------------
// Key handling
// ---------------------------------------------------------------------------

fn handle_key(forms: &mut Forms, surface: &Surface, key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    if forms.dialog_open {
        return match key.code {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Confirm(forms.transaction_draft())),
            KeyCode::Tab | KeyCode::Down => {
                forms.dialog_focus = (forms.dialog_focus + 1) % DIALOG_LABELS.len();
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                forms.dialog_focus =
                    (forms.dialog_focus + DIALOG_LABELS.len() - 1) % DIALOG_LABELS.len();
                None
            }
            _ => edit_field(forms, surface.view, key),
        };
    }

    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Left => Some(Action::Back),
            KeyCode::Right => Some(Action::Forward),
            _ => None,
        };
    }

    match surface.view {
        Some(View::Login) => {
            let fields = REGISTER_LABELS.len() + 1;
            match key.code {
                KeyCode::Esc => Some(Action::Quit),
                KeyCode::Tab | KeyCode::Down => {
                    forms.login_focus = (forms.login_focus + 1) % fields;
                    None
                }
                KeyCode::BackTab | KeyCode::Up => {
                    forms.login_focus = (forms.login_focus + fields - 1) % fields;
                    None
                }
                KeyCode::Enter if forms.login_focus == 0 => {
                    Some(Action::Login(forms.login_user.trim().to_string()))
                }
                KeyCode::Enter => Some(Action::Register(forms.register_draft())),
                _ => edit_field(forms, surface.view, key),
            }
        }
        Some(View::Dashboard) => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            KeyCode::Char('a') => Some(Action::AddTransaction),
            KeyCode::Char('r') => Some(Action::Refresh),
            KeyCode::Char('l') => Some(Action::Logout),
            _ => None,
        },
        None => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
            _ => None,
        },
    }
}

fn edit_field(forms: &mut Forms, view: Option<View>, key: KeyEvent) -> Option<Action> {
    let field = forms.focused_field(view)?;
    match key.code {
        KeyCode::Char(c) => field.push(c),
        KeyCode::Backspace => {
            field.pop();
        }
        _ => {}
    }
    None
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn draw(terminal: &mut Term, surface: &Surface, forms: &Forms) -> Result<(), AppError> {
    terminal.draw(|frame| render_ui(frame, surface, forms))?;
    Ok(())
}

/// Restore terminal to normal mode.
fn restore_terminal(terminal: &mut Term) {
    let _ = terminal.show_cursor();
    let _ = disable_raw_mode();
    let _ = io::stdout().execute(LeaveAlternateScreen);
}

// ---------------------------------------------------------------------------
// UI rendering
// ---------------------------------------------------------------------------

fn render_ui(frame: &mut Frame, surface: &Surface, forms: &Forms) {
    let area = frame.area();

    // Layout: header (3 rows), view (rest), key hints (1 row).
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    let status = if forms.pending { " | working..." } else { "" };
    let header = Paragraph::new(format!(" {}{status}", surface.title))
        .style(Style::default().fg(Color::White).bg(Color::Blue).bold())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, main_layout[0]);

    let hints = match surface.view {
        Some(View::Login) => " Tab: next field | Enter: submit | Alt+←/→: back/forward | Esc: quit",
        Some(View::Dashboard) if forms.dialog_open => " Tab: next field | Enter: confirm | Esc: cancel",
        Some(View::Dashboard) => " a: add transaction | r: refresh | l: logout | Alt+←/→: back/forward | q: quit",
        None => " q: quit",
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        main_layout[2],
    );

    match surface.view {
        Some(View::Login) => render_login(frame, main_layout[1], surface, forms),
        Some(View::Dashboard) => render_dashboard(frame, main_layout[1], surface),
        None => {}
    }

    if forms.dialog_open {
        render_dialog(frame, area, forms);
    }
}

/// Render the login and register forms side by side.
fn render_login(frame: &mut Frame, area: Rect, surface: &Surface, forms: &Forms) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let mut login_lines = vec![
        Line::from(""),
        field_line("User", &forms.login_user, forms.login_focus == 0),
    ];
    push_error(&mut login_lines, surface, Region::LoginError);
    let login = Paragraph::new(login_lines).block(panel(" Login "));
    frame.render_widget(login, columns[0]);

    let mut register_lines = vec![Line::from("")];
    for (i, label) in REGISTER_LABELS.iter().enumerate() {
        register_lines.push(field_line(label, &forms.register[i], forms.login_focus == i + 1));
    }
    push_error(&mut register_lines, surface, Region::RegisterError);
    let register = Paragraph::new(register_lines)
        .block(panel(" Register "))
        .wrap(Wrap { trim: false });
    frame.render_widget(register, columns[1]);
}

/// Render the account summary and the transactions table.
fn render_dashboard(frame: &mut Frame, area: Rect, surface: &Surface) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    let mut summary = vec![
        Line::from(format!(
            " {}",
            surface.text(Region::Description).unwrap_or_default()
        )),
        Line::from(vec![
            Span::raw(" Balance "),
            Span::styled(
                balance_line(surface).unwrap_or_else(|| "--".to_string()),
                Style::default().fg(Color::Green).bold(),
            ),
        ]),
    ];
    push_error(&mut summary, surface, Region::TransactionError);
    frame.render_widget(Paragraph::new(summary).block(panel(" Account ")), layout[0]);

    let rows: Vec<Row> = surface
        .rows(Region::Transactions)
        .iter()
        .rev()
        .map(|tx| {
            let color = if tx.amount.starts_with('-') {
                Color::Red
            } else {
                Color::Green
            };
            Row::new(vec![
                Cell::from(tx.date.clone()),
                Cell::from(tx.object.clone()),
                Cell::from(Text::from(tx.amount.clone()).alignment(Alignment::Right))
                    .style(Style::default().fg(color)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(10),
            Constraint::Length(14),
        ],
    )
    .header(
        Row::new(vec!["Date", "Object", "Amount"])
            .style(Style::default().fg(Color::Yellow).bold()),
    )
    .block(panel(" Transactions "));
    frame.render_widget(table, layout[1]);
}

/// Render the modal transaction dialog.
fn render_dialog(frame: &mut Frame, area: Rect, forms: &Forms) {
    let rect = centered(area, 50, 7);
    let mut lines = vec![Line::from("")];
    for (i, label) in DIALOG_LABELS.iter().enumerate() {
        lines.push(field_line(label, &forms.dialog[i], forms.dialog_focus == i));
    }
    frame.render_widget(Clear, rect);
    frame.render_widget(Paragraph::new(lines).block(panel(" Add transaction ")), rect);
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title)
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let style = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().add_modifier(Modifier::UNDERLINED)
    };
    let cursor = if focused { "_" } else { " " };
    Line::from(vec![
        Span::raw(format!(" {label:<12}")),
        Span::styled(format!("{value}{cursor}"), style),
    ])
}

fn push_error(lines: &mut Vec<Line<'_>>, surface: &Surface, region: Region) {
    if let Some(error) = surface.text(region).filter(|e| !e.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {error}"),
            Style::default().fg(Color::Red),
        )));
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Content, Renderer};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn login_surface() -> Surface {
        let mut surface = Surface::new();
        surface.mount(View::Login);
        surface
    }

    fn dashboard_surface() -> Surface {
        let mut surface = Surface::new();
        surface.mount(View::Dashboard);
        surface
    }

    #[test]
    fn test_typing_then_enter_logs_in() {
        let mut forms = Forms::default();
        let surface = login_surface();
        for c in "test".chars() {
            assert_eq!(handle_key(&mut forms, &surface, key(KeyCode::Char(c))), None);
        }
        handle_key(&mut forms, &surface, key(KeyCode::Backspace));
        handle_key(&mut forms, &surface, key(KeyCode::Char('t')));
        assert_eq!(
            handle_key(&mut forms, &surface, key(KeyCode::Enter)),
            Some(Action::Login("test".into()))
        );
    }

    #[test]
    fn test_register_fields_follow_tab_order() {
        let mut forms = Forms::default();
        let surface = login_surface();
        for value in ["bob", "EUR", "Savings", "20"] {
            handle_key(&mut forms, &surface, key(KeyCode::Tab));
            for c in value.chars() {
                handle_key(&mut forms, &surface, key(KeyCode::Char(c)));
            }
        }
        let action = handle_key(&mut forms, &surface, key(KeyCode::Enter));
        assert_eq!(
            action,
            Some(Action::Register(AccountDraft {
                user: "bob".into(),
                currency: "EUR".into(),
                description: "Savings".into(),
                balance: "20".into(),
            }))
        );
    }

    #[test]
    fn test_dashboard_keys() {
        let mut forms = Forms::default();
        let surface = dashboard_surface();
        assert_eq!(
            handle_key(&mut forms, &surface, key(KeyCode::Char('a'))),
            Some(Action::AddTransaction)
        );
        assert_eq!(
            handle_key(&mut forms, &surface, key(KeyCode::Char('l'))),
            Some(Action::Logout)
        );
        assert_eq!(
            handle_key(
                &mut forms,
                &surface,
                KeyEvent::new(KeyCode::Left, KeyModifiers::ALT)
            ),
            Some(Action::Back)
        );
    }

    #[test]
    fn test_dialog_form_is_loaded_and_submitted() {
        let mut forms = Forms::default();
        let mut surface = dashboard_surface();
        surface.set_dialog(Some(TransactionDraft {
            date: "2024-01-16".into(),
            ..Default::default()
        }));
        forms.sync_dialog(&surface);
        assert!(forms.dialog_open);

        // Focus starts on the object field.
        for c in "Refund".chars() {
            handle_key(&mut forms, &surface, key(KeyCode::Char(c)));
        }
        handle_key(&mut forms, &surface, key(KeyCode::Tab));
        for c in "10.00".chars() {
            handle_key(&mut forms, &surface, key(KeyCode::Char(c)));
        }
        assert_eq!(
            handle_key(&mut forms, &surface, key(KeyCode::Enter)),
            Some(Action::Confirm(TransactionDraft {
                date: "2024-01-16".into(),
                object: "Refund".into(),
                amount: "10.00".into(),
            }))
        );

        surface.set_dialog(None);
        forms.sync_dialog(&surface);
        assert!(!forms.dialog_open);
    }

    #[test]
    fn test_render_dashboard_into_buffer() {
        let mut surface = dashboard_surface();
        surface.set_title("My Account");
        surface.update_region(Region::Balance, Content::Text("109.99".into()));
        surface.update_region(Region::Currency, Content::Text("$".into()));

        let backend = ratatui::backend::TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render_ui(frame, &surface, &Forms::default()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("My Account"));
        assert!(text.contains("109.99 $"));
    }

    #[test]
    fn test_centered_fits_small_area() {
        let rect = centered(Rect::new(0, 0, 30, 5), 50, 7);
        assert_eq!(rect, Rect::new(0, 0, 30, 5));
    }
}
