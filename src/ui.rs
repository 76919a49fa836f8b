use anyhow::Result;
use chrono::{Duration, Local, Months, NaiveDate};
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fair_split::{Controller, Field, ViewModel};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;

/// Form focus order, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    PartyA,
    PartyB,
    Expense,
    Remarks,
    Date,
}

impl Focus {
    pub fn next(&self) -> Self {
        match self {
            Focus::PartyA => Focus::PartyB,
            Focus::PartyB => Focus::Expense,
            Focus::Expense => Focus::Remarks,
            Focus::Remarks => Focus::Date,
            Focus::Date => Focus::PartyA,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            Focus::PartyA => Focus::Date,
            Focus::PartyB => Focus::PartyA,
            Focus::Expense => Focus::PartyB,
            Focus::Remarks => Focus::Expense,
            Focus::Date => Focus::Remarks,
        }
    }

    /// The controller field behind this slot, if it feeds the calculation.
    fn field(&self) -> Option<Field> {
        match self {
            Focus::PartyA => Some(Field::PartyA),
            Focus::PartyB => Some(Field::PartyB),
            Focus::Expense => Some(Field::Expense),
            Focus::Remarks | Focus::Date => None,
        }
    }
}

pub struct App {
    pub controller: Controller,
    pub view: ViewModel,
    pub focus: Focus,
    /// Free-text annotation; UI state only, never persisted.
    pub remarks: String,
    /// Date stamp for the entry; UI state only, never persisted.
    pub date: NaiveDate,
}

impl App {
    pub fn new(controller: Controller) -> Self {
        let view = controller.view();

        Self {
            controller,
            view,
            focus: Focus::PartyA,
            remarks: String::new(),
            date: Local::now().date_naive(),
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn previous_field(&mut self) {
        self.focus = self.focus.previous();
    }

    /// Text currently shown in a numeric slot (the formatted echo).
    fn buffer(&self, field: Field) -> &str {
        match field {
            Field::PartyA => &self.view.party_a_salary,
            Field::PartyB => &self.view.party_b_salary,
            Field::Expense => &self.view.expense,
        }
    }

    /// Route one typed character. Numeric slots rebuild their raw text and
    /// run the full edit pipeline; remarks just grow.
    pub fn handle_char(&mut self, c: char) {
        match self.focus.field() {
            Some(field) => {
                let mut raw = self.buffer(field).to_string();
                raw.push(c);
                self.view = self.controller.on_field_edit(field, &raw);
            }
            None => {
                if self.focus == Focus::Remarks {
                    self.remarks.push(c);
                }
            }
        }
    }

    /// Drop the last character of the focused slot and re-run the pipeline.
    pub fn handle_backspace(&mut self) {
        match self.focus.field() {
            Some(field) => {
                let mut raw = self.buffer(field).to_string();
                raw.pop();
                self.view = self.controller.on_field_edit(field, &raw);
            }
            None => {
                if self.focus == Focus::Remarks {
                    self.remarks.pop();
                }
            }
        }
    }

    pub fn clear_remarks(&mut self) {
        self.remarks.clear();
    }

    /// Shift the date stamp by whole days (Left/Right).
    pub fn shift_date_days(&mut self, days: i64) {
        if let Some(date) = self.date.checked_add_signed(Duration::days(days)) {
            self.date = date;
        }
    }

    /// Shift the date stamp by whole months (PgUp/PgDn).
    pub fn shift_date_months(&mut self, months: i32) {
        let shifted = if months >= 0 {
            self.date.checked_add_months(Months::new(months as u32))
        } else {
            self.date.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        if let Some(date) = shifted {
            self.date = date;
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.clear_remarks()
                }
                KeyCode::Tab => {
                    if key.modifiers.contains(KeyModifiers::SHIFT) {
                        app.previous_field();
                    } else {
                        app.next_field();
                    }
                }
                KeyCode::BackTab => app.previous_field(),
                KeyCode::Down => app.next_field(),
                KeyCode::Up => app.previous_field(),
                KeyCode::Backspace => app.handle_backspace(),
                KeyCode::Left if app.focus == Focus::Date => app.shift_date_days(-1),
                KeyCode::Right if app.focus == Focus::Date => app.shift_date_days(1),
                KeyCode::PageUp if app.focus == Focus::Date => app.shift_date_months(-1),
                KeyCode::PageDown if app.focus == Focus::Date => app.shift_date_months(1),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    app.handle_char(c)
                }
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Salary fields
            Constraint::Length(3), // Expense field
            Constraint::Length(4), // Contributions
            Constraint::Length(3), // Remarks + date
            Constraint::Min(0),    // Filler
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_title(f, chunks[0]);

    // Two salary fields side by side
    let salary_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_field(
        f,
        salary_chunks[0],
        " Party A Salary ",
        &app.view.party_a_salary,
        app.focus == Focus::PartyA,
    );
    render_field(
        f,
        salary_chunks[1],
        " Party B Salary ",
        &app.view.party_b_salary,
        app.focus == Focus::PartyB,
    );
    render_field(
        f,
        chunks[2],
        " Shared Expense ",
        &app.view.expense,
        app.focus == Focus::Expense,
    );

    render_contributions(f, chunks[3], app);

    // Annotations: remarks + date stamp
    let annotation_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[4]);

    render_field(
        f,
        annotation_chunks[0],
        " Remarks ",
        &app.remarks,
        app.focus == Focus::Remarks,
    );
    render_field(
        f,
        annotation_chunks[1],
        " Date ",
        &app.date.format("%d %b %Y").to_string(),
        app.focus == Focus::Date,
    );

    render_status_bar(f, chunks[6], app);
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            "Fair Split",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            "expenses split in proportion to income",
            Style::default().fg(Color::DarkGray),
        ),
    ])])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(title, area);
}

fn render_field(f: &mut Frame, area: Rect, title: &str, text: &str, active: bool) {
    let border_style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };

    let content = if active {
        Line::from(vec![
            Span::raw(text.to_string()),
            Span::styled("█", Style::default().fg(Color::Yellow)),
        ])
    } else {
        Line::from(text.to_string())
    };

    let field = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );

    f.render_widget(field, area);
}

fn render_contributions(f: &mut Frame, area: Rect, app: &App) {
    let content = vec![
        Line::from(vec![
            Span::styled(
                "  Party A pays: ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                app.view.party_a_share.clone(),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                "  Party B pays: ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                app.view.party_b_share.clone(),
                Style::default().fg(Color::Green),
            ),
        ]),
    ];

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Contributions "),
    );

    f.render_widget(panel, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::raw(" Next | "),
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Move | "),
        Span::styled("0-9", Style::default().fg(Color::Yellow)),
        Span::raw(" Type | "),
    ];

    if app.focus == Focus::Date {
        status_spans.push(Span::styled("←/→", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Day | "));
        status_spans.push(Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Month | "));
    }

    if app.focus == Focus::Remarks && !app.remarks.is_empty() {
        status_spans.push(Span::styled("Ctrl+U", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Clear | "));
    }

    status_spans.push(Span::styled("Esc", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_text = vec![Line::from(status_spans)];

    let status_bar = Paragraph::new(status_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
