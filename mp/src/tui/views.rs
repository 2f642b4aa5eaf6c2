//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module draws from
//! AppState but never modifies it.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use tracing::trace;

use super::state::{AppState, Focus};
use crate::domain::{DietChoice, PlanEntry, RecipeView, format_created_at};

mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const FOCUS: Color = Color::Rgb(255, 215, 0); // Gold
    pub const READY: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const DAY: Color = Color::Rgb(100, 149, 237); // Cornflower blue
    pub const SELECTED_BG: Color = Color::Rgb(40, 40, 40);
    pub const DIM: Color = Color::DarkGray;
}

/// Main render function
pub fn render(state: &AppState, frame: &mut Frame) {
    trace!(focus = ?state.focus, "render: called");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_form(state, frame, columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(columns[1]);

    render_plan(state, frame, right[0]);
    render_history(state, frame, right[1]);

    render_footer(state, frame, chunks[2]);

    if state.show_help {
        render_help_overlay(frame, frame.area());
    }
}

fn focused_block(title: &str, focused: bool) -> Block<'_> {
    let border = if focused {
        Style::default().fg(colors::FOCUS)
    } else {
        Style::default().fg(colors::DIM)
    };
    Block::default().borders(Borders::ALL).border_style(border).title(title)
}

fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_header: called");
    let mut spans = vec![
        Span::styled(
            " Weekly Diet Planner ",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {} ", state.links.base_url), Style::default().fg(colors::DIM)),
    ];
    if state.workflow.is_loading() {
        spans.push(Span::styled(
            " Generating plan… ",
            Style::default().fg(colors::FOCUS).add_modifier(Modifier::BOLD),
        ));
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_form(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_form: called");
    let custom_height = if state.custom_visible() { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Item draft
            Constraint::Min(4),                // Pantry list
            Constraint::Length(3),             // Weekly goal
            Constraint::Min(5),                // Diet list
            Constraint::Length(custom_height), // Custom diet
            Constraint::Length(3),             // Submit status
        ])
        .split(area);

    let workflow = &state.workflow;

    let draft = text_field(workflow.item_draft(), "e.g. tomatoes", state.focus == Focus::ItemDraft);
    frame.render_widget(
        draft.block(focused_block(" Items Available ", state.focus == Focus::ItemDraft)),
        chunks[0],
    );

    let items: Vec<ListItem> = workflow
        .pantry_items()
        .iter()
        .map(|item| ListItem::new(format!("• {item}")))
        .collect();
    let pantry = List::new(items)
        .block(focused_block(" Pantry ", state.focus == Focus::Pantry))
        .highlight_style(Style::default().bg(colors::SELECTED_BG).add_modifier(Modifier::BOLD));
    let mut pantry_state = ListState::default();
    if state.focus == Focus::Pantry && !workflow.pantry_items().is_empty() {
        pantry_state.select(Some(state.pantry_selected));
    }
    frame.render_stateful_widget(pantry, chunks[1], &mut pantry_state);

    let goal = text_field(
        workflow.weekly_goal(),
        "e.g. increase protein intake",
        state.focus == Focus::Goal,
    );
    frame.render_widget(
        goal.block(focused_block(" Weekly Goal ", state.focus == Focus::Goal)),
        chunks[2],
    );

    render_diet_list(state, frame, chunks[3]);

    if let Some(text) = workflow.custom_description() {
        let custom = text_field(
            text,
            "Summarize your personal dietary approach",
            state.focus == Focus::CustomDiet,
        );
        frame.render_widget(
            custom.block(focused_block(" Describe Your Diet ", state.focus == Focus::CustomDiet)),
            chunks[4],
        );
    }

    let status = if let Some(error) = workflow.error() {
        Line::from(Span::styled(error.to_string(), Style::default().fg(colors::ERROR)))
    } else if workflow.is_loading() {
        Line::from(Span::styled("Generating plan…", Style::default().fg(colors::FOCUS)))
    } else if workflow.can_submit() {
        Line::from(vec![
            Span::styled("Ready", Style::default().fg(colors::READY)),
            Span::raw(" · Ctrl+S to generate weekly plan"),
        ])
    } else {
        Line::from(Span::styled(
            "Add items, a goal and a diet to generate a plan",
            Style::default().fg(colors::DIM),
        ))
    };
    frame.render_widget(
        Paragraph::new(status)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL)),
        chunks[5],
    );
}

fn render_diet_list(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_diet_list: called");
    let workflow = &state.workflow;
    let items: Vec<ListItem> = workflow
        .diet_options()
        .iter()
        .map(|option| {
            let chosen = workflow.diet_choice().is_some_and(|c| c.matches(option));
            let marker = if chosen { "(•) " } else { "( ) " };
            ListItem::new(format!("{marker}{}", option.label()))
        })
        .collect();

    let title = match workflow.diet_choice() {
        Some(DietChoice::Predefined(label)) => format!(" Diet Preference: {label} "),
        Some(DietChoice::Custom(_)) => " Diet Preference: Custom ".to_string(),
        None => " Diet Preference ".to_string(),
    };

    let list = List::new(items)
        .block(focused_block(&title, state.focus == Focus::Diet))
        .highlight_style(Style::default().bg(colors::SELECTED_BG).add_modifier(Modifier::BOLD));
    let mut list_state = ListState::default();
    if state.focus == Focus::Diet && !workflow.diet_options().is_empty() {
        list_state.select(Some(state.diet_selected));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Single-line input with placeholder and cursor
fn text_field<'a>(value: &'a str, placeholder: &'a str, focused: bool) -> Paragraph<'a> {
    let line = if value.is_empty() && !focused {
        Line::from(Span::styled(placeholder, Style::default().fg(colors::DIM)))
    } else if focused {
        Line::from(vec![Span::raw(value), Span::styled("█", Style::default().fg(colors::FOCUS))])
    } else {
        Line::from(value)
    };
    Paragraph::new(line)
}

/// Lines for the plan cards, one card per day
pub fn plan_lines(plan: &[PlanEntry]) -> Vec<Line<'_>> {
    let heading = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let mut lines = Vec::new();

    for (index, entry) in plan.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(
                entry.day.as_str(),
                Style::default().fg(colors::DAY).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  Day {}", index + 1), Style::default().fg(colors::DIM)),
        ]));
        lines.push(Line::from(Span::styled(
            entry.meal.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled("Why this meal", heading)));
        lines.push(Line::from(entry.rationale.as_str()));
        lines.push(Line::from(Span::styled("Recipe", heading)));
        match entry.recipe_view() {
            RecipeView::Prose(text) => lines.push(Line::from(text)),
            RecipeView::Steps(steps) => {
                for (n, step) in steps.into_iter().enumerate() {
                    lines.push(Line::from(format!("  {}. {step}", n + 1)));
                }
            }
        }
        lines.push(Line::from(Span::styled("Nutritional Value", heading)));
        lines.push(Line::from(entry.nutritional_value.as_str()));
        lines.push(Line::from(""));
    }

    lines
}

fn render_plan(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_plan: called");
    let block = focused_block(" Weekly Plan ", state.focus == Focus::Plan);

    let Some(plan) = state.workflow.plan() else {
        render_empty_message(
            frame,
            area,
            block,
            "No plan yet. Fill in the form and press Ctrl+S, or open a saved plan.",
        );
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("CSV: ", Style::default().fg(colors::DIM)),
            Span::raw(state.links.csv_url.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Dashboard: ", Style::default().fg(colors::DIM)),
            Span::raw(state.links.dashboard_url.as_str()),
        ]),
        Line::from(""),
    ];
    lines.extend(plan_lines(plan));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.plan_scroll, 0));
    frame.render_widget(paragraph, area);
}

fn render_history(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_history: called");
    let block = focused_block(" Saved Plans ", state.focus == Focus::History);
    let workflow = &state.workflow;

    if let Some(error) = workflow.history_error() {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(colors::ERROR),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    if workflow.history().is_empty() {
        render_empty_message(frame, area, block, "No saved plans yet. Generate one to get started.");
        return;
    }

    let items: Vec<ListItem> = workflow
        .history()
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(format_created_at(&entry.created_at), Style::default().fg(colors::DAY)),
                Span::raw(format!("  Goal: {}", entry.goal_label())),
                Span::styled(format!("  Diet: {}", entry.diet_label()), Style::default().fg(colors::DIM)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(colors::SELECTED_BG).add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");
    let mut list_state = ListState::default();
    if state.focus == Focus::History {
        list_state.select(Some(state.history_selected));
    }
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_footer: called");
    let mut hints: Vec<(&str, &str)> = match state.focus {
        Focus::ItemDraft => vec![("Enter", "add item")],
        Focus::Pantry => vec![("j/k", "move"), ("x", "remove")],
        Focus::Goal | Focus::CustomDiet => vec![("type", "edit")],
        Focus::Diet => vec![("j/k", "move"), ("Enter", "select")],
        Focus::Plan => vec![("j/k", "scroll")],
        Focus::History => vec![("j/k", "move"), ("Enter", "view plan")],
    };
    hints.extend([
        ("Tab", "next field"),
        ("^S", "generate"),
        ("^R", "start over"),
        ("^L", "reload saved"),
        ("F1", "help"),
        ("^C", "quit"),
    ]);

    let mut spans = Vec::new();
    for (key, desc) in hints {
        spans.push(Span::styled(format!(" <{key}>"), Style::default().fg(colors::KEYBIND)));
        spans.push(Span::raw(format!(" {desc}")));
    }
    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    trace!("render_help_overlay: called");
    let popup = centered_rect(60, 60, area);
    let lines = vec![
        Line::from(Span::styled("Keybindings", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(""),
        key_line("Tab / Shift+Tab", "Move between fields"),
        key_line("Enter", "Add item / select diet / view saved plan"),
        key_line("x / Delete", "Remove selected pantry item"),
        key_line("j / k", "Move or scroll"),
        key_line("Ctrl+S", "Generate weekly plan"),
        key_line("Ctrl+R", "Start over"),
        key_line("Ctrl+L", "Reload saved plans"),
        key_line("q", "Quit (outside text fields)"),
        key_line("Ctrl+C", "Quit"),
        Line::from(""),
        Line::from(Span::styled("Press any key to close", Style::default().fg(colors::DIM))),
    ];
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help ")),
        popup,
    );
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{key:>16}  "), Style::default().fg(colors::KEYBIND)),
        Span::raw(desc),
    ])
}

fn render_empty_message(frame: &mut Frame, area: Rect, block: Block<'_>, message: &str) {
    let paragraph = Paragraph::new(Line::from(Span::styled(message, Style::default().fg(colors::DIM))))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
