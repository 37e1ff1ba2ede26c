mod app;
mod calendar;
mod components;
mod config;
mod error;
mod event;
mod logging;
mod theme;
mod tui;

use std::time::{Duration, Instant};

use app::{App, InputMode};
use chrono::Local;
use color_eyre::Result;
use config::Config;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::info;
use ratatui::layout::{Constraint, Layout, Rect};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::load()?;
    logging::init(config.log_path().as_deref())?;
    theme::init(&config.theme);

    info!("Starting with reminder API at {}", config.api_url);
    eprintln!("Loading reminders from {}...", config.api_url);
    let mut app = App::from_config(&config)?;
    app.refresh().await;

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app).await;
    tui::restore()?;
    info!("Exiting");
    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App) -> Result<()> {
    while app.running {
        app.tick(Instant::now(), Local::now().naive_local());
        if app.take_bell() {
            tui::bell()?;
        }

        terminal.draw(|frame| draw(frame, app))?;

        let Some(key) = event::next_key_press(Duration::from_millis(100))? else {
            continue;
        };

        if is_quit(&key) && app.input_mode != InputMode::Form {
            app.running = false;
            continue;
        }

        if app.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                app.show_help = false;
            }
            continue;
        }

        match app.input_mode {
            InputMode::Normal => handle_normal_input(app, key.code).await,
            InputMode::List => handle_list_input(app, key.code).await,
            InputMode::Form => handle_form_input(app, key).await,
        }
    }

    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(
        (key.code, key.modifiers),
        (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL)
    )
}

async fn handle_normal_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Left | KeyCode::Char('h') => app.prev_day().await,
        KeyCode::Right | KeyCode::Char('l') => app.next_day().await,
        KeyCode::Up | KeyCode::Char('k') => app.prev_week().await,
        KeyCode::Down | KeyCode::Char('j') => app.next_week().await,
        KeyCode::Char('[') => app.prev_month().await,
        KeyCode::Char(']') => app.next_month().await,
        KeyCode::Char('t') => app.go_to_today().await,
        KeyCode::Char('r') => {
            app.refresh().await;
            if app.sync_error().is_none() {
                let n = app.reminders().len();
                app.notify(
                    "Refreshed",
                    format!("{} reminder{}", n, if n == 1 { "" } else { "s" }),
                    components::popup::NotificationKind::Info,
                );
            }
        }
        KeyCode::Char('n') | KeyCode::Enter => app.open_form(),
        KeyCode::Char('v') => app.toggle_list(),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.notification = None,
        _ => {}
    }
}

async fn handle_list_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::Char('k') => app.list_up(),
        KeyCode::Down | KeyCode::Char('j') => app.list_down(),
        KeyCode::Char('e') | KeyCode::Enter => app.edit_selected(),
        KeyCode::Char('d') | KeyCode::Delete => app.delete_selected().await,
        KeyCode::Char('n') => app.open_form(),
        KeyCode::Char('v') | KeyCode::Esc => app.toggle_list(),
        KeyCode::Char('[') => app.prev_month().await,
        KeyCode::Char(']') => app.next_month().await,
        KeyCode::Char('?') => app.show_help = true,
        _ => {}
    }
}

async fn handle_form_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.close_form(),
        KeyCode::Enter => app.submit_form().await,
        KeyCode::Tab => app.form_tab(),
        KeyCode::BackTab => app.form_backtab(),
        KeyCode::Backspace => app.form_backspace(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.running = false,
        KeyCode::Char(c) => app.form_input_char(c),
        _ => {}
    }
}

fn draw(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let [content, status] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);

    render_main(frame, content, app);

    if let Some(ref form) = app.form_state {
        components::ReminderForm::render(frame, area, form);
    }

    if let Some(ref note) = app.notification {
        components::Popup::render(frame, content, note);
    }

    if app.show_help {
        render_help(frame, area);
    }

    components::StatusBar::render(frame, status, app);
}

fn render_main(frame: &mut ratatui::Frame, area: Rect, app: &App) {
    let stale = app.sync_error().is_some();
    let selected_day = chrono::Datelike::day(&app.selected_date);

    if area.width < 70 && !app.show_list {
        components::MonthView::render(frame, area, &app.grid, selected_day, app.today, stale);
        return;
    }

    let side_w = if area.width >= 120 { 40 } else { 30 };
    let [month_area, side_area] =
        Layout::horizontal([Constraint::Min(35), Constraint::Length(side_w)]).areas(area);

    components::MonthView::render(frame, month_area, &app.grid, selected_day, app.today, stale);

    if app.show_list {
        components::ReminderList::render(
            frame,
            side_area,
            &app.list_entries(),
            app.list_index,
            app.input_mode == InputMode::List,
        );
    } else {
        components::DayView::render(frame, side_area, app.selected_date, &app.day_reminders());
    }
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let t = theme::current();
    let popup_area = components::centered(area, area.width.clamp(30, 52), area.height.clamp(12, 24));

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(t.alert)
        .borders(Borders::ALL)
        .border_style(t.alert.remove_modifier(Modifier::BOLD));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = t.reminder.add_modifier(Modifier::BOLD);
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let entry = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), key_style),
            Span::raw(desc),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Calendar", section_style)),
        entry("h/l", "Previous/next day"),
        entry("j/k", "Next/previous week"),
        entry("[/]", "Previous/next month"),
        entry("t", "Jump to today"),
        entry("r", "Refresh reminders"),
        Line::from(""),
        Line::from(Span::styled("Reminders", section_style)),
        entry("n", "New reminder on selected day"),
        entry("v", "Show/hide all reminders"),
        entry("e", "Edit selected (list)"),
        entry("d", "Delete selected (list)"),
        Line::from(""),
        Line::from(Span::styled("Form", section_style)),
        entry("Tab", "Next field"),
        entry("Enter", "Add Event / Update Reminder"),
        entry("Esc", "Cancel"),
        Line::from(""),
        entry("Esc", "Close popup"),
        entry("q", "Quit"),
    ];

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
