use chrono::{DateTime, Local, NaiveDate, Utc};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
};

use kerbside_core::{
    model::{COLLECTION_FOOD_SCRAPS, COLLECTION_RECYCLING, COLLECTION_RUBBISH},
    schedule::resolve_date_label,
    sensor::{BinCollectionAttributes, BinSensor},
};

use crate::app::{App, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    // Title / header
    let header = Paragraph::new("kerbside – Auckland collection days")
        .block(Block::default().borders(Borders::ALL).title("Kerbside"));
    frame.render_widget(header, *header_area);

    // Main screen
    match app.screen {
        Screen::Setup => draw_setup(frame, app, *content_area),
        Screen::Schedule => draw_schedule(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::Setup => "Type your location id · Enter validate · Esc/Ctrl-C quit",
        Screen::Schedule => "r refresh now · Esc/←/b change location · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_setup(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // input
            Constraint::Min(0),    // guidance
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [input_area, guidance_area] = chunks else {
        return;
    };

    let input = Paragraph::new(app.location_input.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Location id (11 digits, Enter)"),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(input, *input_area);

    let guidance = Paragraph::new(vec![
        Line::from(format!(
            "Collection days are read from the {} website.",
            app.service.council_name()
        )),
        Line::from(""),
        Line::from("Find your location id by searching for your address on the"),
        Line::from("council's rubbish and recycling collection days page, then"),
        Line::from("copying the digits at the end of the address bar."),
        Line::from(""),
        Line::from(Span::styled(
            "Example: …/rubbish-recycling-collection-days/12345678901",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title("How it works"))
    .wrap(Wrap { trim: true });

    frame.render_widget(guidance, *guidance_area);
}

fn draw_schedule(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(sensors) = &app.sensors else {
        let paragraph = Paragraph::new("No active location. Go back and enter a location id.")
            .block(Block::default().borders(Borders::ALL).title("Schedule"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // sensor panels
            Constraint::Min(0),    // all listed days
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [sensor_area, table_area] = chunks else {
        return;
    };

    let sensor_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(*sensor_area);

    let sensor_chunks = sensor_chunks.as_ref();
    let [upcoming_area, next_area] = sensor_chunks else {
        return;
    };

    let now = Utc::now();
    let today = Local::now().date_naive();

    let [upcoming, next] = sensors;
    draw_sensor_panel(frame, app, upcoming, *upcoming_area, now, today);
    draw_sensor_panel(frame, app, next, *next_area, now, today);

    draw_day_table(frame, app, *table_area, now, today);
}

fn draw_sensor_panel(
    frame: &mut Frame<'_>,
    app: &App,
    sensor: &BinSensor,
    area: Rect,
    now: DateTime<Utc>,
    today: NaiveDate,
) {
    let schedule = app.schedule.as_deref();
    let mut lines = Vec::new();

    match sensor.value(schedule, now) {
        Some(date) => {
            let mut style = Style::default().add_modifier(Modifier::BOLD);
            if date == today {
                style = style.fg(Color::Yellow);
            }
            lines.push(Line::from(vec![
                Span::styled(date.format("%A, %d %B %Y").to_string(), style),
                Span::raw(format!("  ({})", relative_day_label(date, today))),
            ]));
        }
        None => lines.push(Line::from("No collection day yet.")),
    }

    if let Some(attributes) = sensor.attributes(schedule) {
        lines.push(Line::from(""));
        lines.push(bin_line(&attributes));
        lines.push(Line::from(format!("Listed as: {}", attributes.date_label)));
        lines.push(Line::from(Span::styled(
            attributes.query_url,
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(sensor.name().to_owned()),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn draw_day_table(
    frame: &mut Frame<'_>,
    app: &App,
    area: Rect,
    now: DateTime<Utc>,
    today: NaiveDate,
) {
    let title = "All listed collection days";

    let Some(days) = app.schedule.as_deref() else {
        let text = if app.is_loading {
            "Loading schedule…"
        } else {
            "No schedule fetched yet. It refreshes hourly, or press r."
        };
        let paragraph = Paragraph::new(text)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let rows = days.iter().map(|day| {
        let resolved = resolve_date_label(&day.date_label, now);
        let date = resolved.map_or_else(
            || String::from("?"),
            |date| date.format("%d/%m/%Y").to_string(),
        );
        let relative = resolved.map_or_else(
            || String::from("?"),
            |date| relative_day_label(date, today),
        );

        let mut style = Style::default();
        if resolved == Some(today) {
            style = style.add_modifier(Modifier::BOLD);
        }

        Row::new(vec![
            Cell::from(day.date_label.clone()),
            Cell::from(date),
            Cell::from(relative),
            Cell::from(day.collection_types.join(", ")),
        ])
        .style(style)
    });

    let column_widths = [
        Constraint::Min(22),
        Constraint::Length(12),
        Constraint::Length(12),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["Listed day", "Date", "In", "Bins"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);

    frame.render_widget(table, area);
}

fn bin_line(attributes: &BinCollectionAttributes) -> Line<'static> {
    let mut spans = Vec::new();
    for (collection_type, collected) in [
        (COLLECTION_RUBBISH, attributes.rubbish),
        (COLLECTION_RECYCLING, attributes.recycle),
        (COLLECTION_FOOD_SCRAPS, attributes.food_scraps),
    ] {
        if !spans.is_empty() {
            spans.push(Span::raw(" · "));
        }
        let style = if collected {
            Style::default()
                .fg(collection_color(collection_type))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(collection_type, style));
    }
    Line::from(spans)
}

fn collection_color(collection_type: &str) -> Color {
    match collection_type {
        COLLECTION_RUBBISH => Color::Red,
        COLLECTION_RECYCLING => Color::Yellow,
        COLLECTION_FOOD_SCRAPS => Color::Green,
        _ => Color::Magenta,
    }
}

fn relative_day_label(date: NaiveDate, today: NaiveDate) -> String {
    let delta = (date - today).num_days();
    match delta {
        0 => "today".to_owned(),
        1 => "tomorrow".to_owned(),
        days if days > 1 => format!("in {days} days"),
        -1 => "yesterday".to_owned(),
        days => format!("{} days ago", days.abs()),
    }
}
