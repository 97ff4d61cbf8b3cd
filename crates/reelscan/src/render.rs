//! Text rendering with MiniJinja templates and console styles.
//!
//! Style names used by the templates map to [`console::Style`]s. When the
//! renderer is plain, `style` passes text through untouched, so piped output
//! carries no escape codes.

use console::Style;
use minijinja::value::Kwargs;
use minijinja::{context, Environment, Value};
use reelscan_seeker::Record;
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::explore::ExploreView;
use crate::insights::Insights;
use crate::templates::{PARTIALS, TEMPLATES};

/// Renders views to text.
#[derive(Debug)]
pub struct Renderer {
    env: Environment<'static>,
}

/// Card layout settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLayout {
    /// Cards side by side in one row.
    pub columns: usize,
    /// Rows of cards.
    pub rows: usize,
    /// Terminal columns per card.
    pub card_width: usize,
    /// Characters of description kept before wrapping.
    pub description_width: usize,
}

impl CardLayout {
    /// Most cards shown.
    pub fn capacity(&self) -> usize {
        self.columns.saturating_mul(self.rows)
    }
}

const CARD_GAP: usize = 2;

/// One line of one card.
#[derive(Debug, Clone, Default, Serialize)]
struct Cell {
    text: String,
    style: &'static str,
}

#[derive(Debug)]
struct Card {
    title: String,
    release_year: String,
    rating: String,
    description: String,
}

impl Card {
    fn from_record(record: &Record) -> Self {
        let text = |field: &str| match record.get(field) {
            Some(value) if !value.is_null() => value.to_string(),
            _ => String::new(),
        };
        Card {
            title: text("title"),
            release_year: text("release_year"),
            rating: text("rating"),
            description: text("description"),
        }
    }

    /// Lines of the card, none wider than `layout.card_width`.
    fn lines(&self, layout: &CardLayout) -> Vec<Cell> {
        let width = layout.card_width;
        let meta = format!("{} | {}", self.release_year, self.rating);
        let mut lines = vec![
            Cell {
                text: truncate_to_width(&self.title, width),
                style: "title",
            },
            Cell {
                text: truncate_to_width(&meta, width),
                style: "kpi",
            },
        ];
        let description = clip(&self.description, layout.description_width);
        lines.extend(wrap(&description, width).into_iter().map(|text| Cell {
            text,
            style: "plain",
        }));
        lines
    }
}

/// Lays a row of cards side by side: one entry per printed line, one cell
/// per card. Shorter cards are padded with empty cells.
fn row_lines(cards: &[Card], layout: &CardLayout) -> Vec<Vec<Cell>> {
    let columns: Vec<Vec<Cell>> = cards.iter().map(|card| card.lines(layout)).collect();
    let height = columns.iter().map(Vec::len).max().unwrap_or(0);
    (0..height)
        .map(|i| {
            columns
                .iter()
                .map(|column| column.get(i).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}

impl Renderer {
    /// Creates a renderer. `styled` turns on ANSI styling.
    pub fn new(styled: bool) -> Self {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        for &(name, source) in PARTIALS.iter().chain(TEMPLATES) {
            // Templates are compile-time constants; a syntax error is a bug
            // caught by the tests below.
            if let Err(err) = env.add_template(name, source) {
                tracing::error!(template = name, error = %err, "invalid built-in template");
            }
        }

        env.add_filter("style", move |value: Value, name: &str| -> String {
            let text = plain(&value);
            if styled {
                style_for(name).force_styling(true).apply_to(text).to_string()
            } else {
                text
            }
        });

        env.add_filter(
            "col",
            |value: Value, width: usize, kwargs: Kwargs| -> Result<String, minijinja::Error> {
                let align: Option<String> = kwargs.get("align")?;
                kwargs.assert_all_used()?;
                Ok(format_col(&plain(&value), width, align.as_deref() == Some("right")))
            },
        );

        Renderer { env }
    }

    /// Renders a named template with a serializable context.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(name)?.render(ctx)
    }

    /// Renders the discovery view as a grid of cards.
    pub fn cards(&self, view: &ExploreView, layout: CardLayout) -> Result<String, minijinja::Error> {
        let cards: Vec<Card> = view
            .records
            .iter()
            .take(layout.capacity())
            .map(Card::from_record)
            .collect();
        let per_row = layout.columns.clamp(1, cards.len().max(1));
        let rows: Vec<Vec<Vec<Cell>>> = cards
            .chunks(per_row)
            .map(|row| row_lines(row, &layout))
            .collect();
        let rule_width = layout
            .card_width
            .saturating_add(CARD_GAP)
            .saturating_mul(per_row)
            .saturating_sub(CARD_GAP);

        self.render(
            "discover/cards",
            context! {
                kpis => view.kpis,
                query => &view.query,
                search_field => &view.search_field,
                matched => view.matched,
                sort => &view.sort,
                notice => view.notice(),
                rows => &rows,
                rule => "-".repeat(rule_width),
                card_width => layout.card_width,
            },
        )
    }

    /// Renders the discovery view as a table.
    pub fn table(&self, view: &ExploreView) -> Result<String, minijinja::Error> {
        self.render(
            "discover/table",
            context! {
                kpis => view.kpis,
                query => &view.query,
                search_field => &view.search_field,
                matched => view.matched,
                sort => &view.sort,
                notice => view.notice(),
                records => &view.records,
            },
        )
    }

    /// Renders the aggregate tables.
    pub fn insights(&self, insights: &Insights) -> Result<String, minijinja::Error> {
        self.render("insights", insights)
    }
}

fn style_for(name: &str) -> Style {
    match name {
        "header" => Style::new().bold().cyan(),
        "title" => Style::new().bold().red(),
        "label" => Style::new().dim(),
        "kpi" => Style::new().bold(),
        "notice" => Style::new().yellow(),
        "muted" => Style::new().dim(),
        _ => Style::new(),
    }
}

/// Template value as text; null and undefined become empty.
fn plain(value: &Value) -> String {
    if value.is_none() || value.is_undefined() {
        String::new()
    } else {
        value.to_string()
    }
}

/// Pads or truncates `text` to exactly `width` terminal columns.
fn format_col(text: &str, width: usize, right: bool) -> String {
    let text = truncate_to_width(text, width);
    let pad = " ".repeat(width.saturating_sub(text.width()));
    if right {
        format!("{pad}{text}")
    } else {
        format!("{text}{pad}")
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    // Reserve one column for the ellipsis.
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    if max_width > 0 {
        result.push('…');
    }
    result
}

/// Greedy word wrap to `width` terminal columns. Words wider than a line
/// are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for mut word in text.split_whitespace() {
        while word.width() > width {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            let (head, tail) = split_at_width(word, width);
            lines.push(head.to_string());
            word = tail;
        }
        if word.is_empty() {
            continue;
        }
        if !line.is_empty() && line.width() + 1 + word.width() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Splits `s` after at most `width` columns, always taking at least one
/// character.
fn split_at_width(s: &str, width: usize) -> (&str, &str) {
    let mut used = 0;
    for (i, c) in s.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            let cut = if i == 0 { c.len_utf8() } else { i };
            return s.split_at(cut);
        }
        used += w;
    }
    (s, "")
}

/// Keeps the first `limit` characters, marking the cut with `...`.
fn clip(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
