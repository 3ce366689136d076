// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Renders the article's pseudocode blocks next to their prose anchors (ratatui + crossterm, with
//! mouse capture). Mouse motion and the prose cursor act as the pointer: they feed delegated
//! enter/leave events into the dispatch layer, and fold markers/placeholders toggle regions.

use std::{error::Error, io, time::Duration};

use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block as Panel, Borders, Paragraph},
};

use crate::dispatch::{Dispatcher, QueryParams};
use crate::fold::{FoldController, RegionId, MARKER_FOLDED, MARKER_UNFOLDED, PLACEHOLDER_TEXT};
use crate::model::{Article, Block, BlockId, Callout, Definition, Mention, RefName, Row};
use crate::page::{mount_article, ArticleDom, ElementId, Page, ProseKind};
use crate::ui::{PaneFocus, ViewerState};

mod theme;

use theme::TuiTheme;

include!("chrome.rs");

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Column of the fold-marker cell inside the listing pane: cursor cell, 3-digit line number and
/// one space come first.
const MARKER_COLUMN: u16 = 5;

/// Runs the interactive viewer on the built-in demo article.
pub fn run_demo(query: Option<&str>) -> Result<(), Box<dyn Error>> {
    run(demo_article(), query)
}

pub fn run(article: Article, query: Option<&str>) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(article, query);

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

/// A clickable cell recorded while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HitTarget {
    FoldToggle { block: usize, region: RegionId },
    ProseHover { element: ElementId },
}

/// A hit whose line is known but whose on-screen position is not fixed until scrolling is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingHit {
    line_index: usize,
    x_offset: u16,
    width: u16,
    target: HitTarget,
}

struct ListingView {
    lines: Vec<Line<'static>>,
    pending: Vec<PendingHit>,
    cursor_line: usize,
}

struct App {
    article: Article,
    page: Page,
    dom: ArticleDom,
    controllers: Vec<FoldController>,
    dispatcher: Dispatcher,
    state: ViewerState,
    theme: TuiTheme,
    toast: Option<String>,
    should_quit: bool,
    listing_scroll: usize,
    hovered_gutter_block: Option<usize>,
    prose_items: Vec<(ElementId, String)>,
    hits: Vec<(Rect, HitTarget)>,
}

impl App {
    fn new(article: Article, query: Option<&str>) -> Self {
        let mut page = Page::new();
        let dom = mount_article(&mut page, &article);
        let controllers = article
            .blocks()
            .iter()
            .zip(&dom.blocks)
            .map(|(block, mounted)| FoldController::wire(&mut page, block, mounted))
            .collect();

        let params = QueryParams::parse(query.unwrap_or(""));
        let dispatcher = Dispatcher::from_query(&params);

        let (theme, mut toast) = match TuiTheme::from_env() {
            Ok(theme) => (theme, None),
            Err(err) => (TuiTheme::default(), Some(err.to_string())),
        };
        let no_default = dispatcher.line_session().default_target().is_none()
            && dispatcher.ref_session().default_target().is_none();
        if toast.is_none() && !params.is_empty() && no_default {
            toast = Some("query parameters name no highlight target".to_owned());
        }

        let prose_items = prose_item_labels(&article, &dom);

        Self {
            article,
            page,
            dom,
            controllers,
            dispatcher,
            state: ViewerState::default(),
            theme,
            toast,
            should_quit: false,
            listing_scroll: 0,
            hovered_gutter_block: None,
            prose_items,
            hits: Vec::new(),
        }
    }

    /// All currently visible rows across blocks, in render order. Visibility is read back from
    /// the mounted elements' display state, the same thing the fold controller drives.
    fn visible_rows(&self) -> Vec<(usize, usize)> {
        let mut rows = Vec::new();
        for (block_index, mounted_block) in self.dom.blocks.iter().enumerate() {
            for (row, mounted) in mounted_block.rows.iter().enumerate() {
                if self.page.element(mounted.gutter).is_shown() {
                    rows.push((block_index, row));
                }
            }
        }
        rows
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.toast = None;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.state.set_focus(self.state.focus().cycle()),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_cursor(),
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: i64) {
        match self.state.focus() {
            PaneFocus::Listing => {
                let row_count = self.visible_rows().len();
                if row_count == 0 {
                    return;
                }
                let cursor = step(self.state.listing_cursor(), delta, row_count);
                self.state.set_listing_cursor(cursor);
            }
            PaneFocus::Prose => {
                if self.prose_items.is_empty() {
                    return;
                }
                let cursor = step(self.state.prose_cursor(), delta, self.prose_items.len());
                self.state.set_prose_cursor(cursor);
                let element = self.prose_items[cursor].0;
                self.update_prose_hover(Some(element));
            }
        }
    }

    fn activate_cursor(&mut self) {
        if self.state.focus() != PaneFocus::Listing {
            return;
        }
        let rows = self.visible_rows();
        let Some(&(block, row)) = rows.get(self.state.listing_cursor()) else {
            return;
        };
        let Some(region) = self.controllers[block].region_at_anchor(row) else {
            return;
        };
        self.toggle_fold(block, region);
    }

    fn toggle_fold(&mut self, block: usize, region: RegionId) {
        self.controllers[block].toggle(&mut self.page, region);
        let row_count = self.visible_rows().len();
        if row_count > 0 && self.state.listing_cursor() >= row_count {
            self.state.set_listing_cursor(row_count - 1);
        }
    }

    /// Routes a hover change through the dispatch layer: leave the old element, enter the new one.
    fn update_prose_hover(&mut self, element: Option<ElementId>) {
        let previous = self.state.hovered_prose();
        if previous == element {
            return;
        }
        if let Some(old) = previous {
            self.dispatcher.pointer_leave(&self.page, old);
        }
        if let Some(new) = element {
            self.dispatcher.pointer_enter(&self.page, new);
        }
        self.state.set_hovered_prose(element);
    }

    fn update_gutter_hover(&mut self, block: Option<usize>) {
        if self.hovered_gutter_block == block {
            return;
        }
        if let Some(old) = self.hovered_gutter_block {
            self.controllers[old].set_gutter_hovered(&mut self.page, false);
        }
        if let Some(new) = block {
            self.controllers[new].set_gutter_hovered(&mut self.page, true);
        }
        self.hovered_gutter_block = block;
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved => self.pointer_moved(mouse.column, mouse.row),
            MouseEventKind::Down(MouseButton::Left) => {
                self.pointer_pressed(mouse.column, mouse.row)
            }
            _ => {}
        }
    }

    fn pointer_moved(&mut self, x: u16, y: u16) {
        let mut prose = None;
        let mut gutter = None;
        for &(rect, target) in &self.hits {
            if !rect_contains(rect, x, y) {
                continue;
            }
            match target {
                HitTarget::ProseHover { element } => prose = Some(element),
                HitTarget::FoldToggle { block, .. } => gutter = Some(block),
            }
        }
        self.update_prose_hover(prose);
        self.update_gutter_hover(gutter);
    }

    fn pointer_pressed(&mut self, x: u16, y: u16) {
        let pressed = self
            .hits
            .iter()
            .find(|(rect, _)| rect_contains(*rect, x, y))
            .map(|&(_, target)| target);
        match pressed {
            Some(HitTarget::FoldToggle { block, region }) => self.toggle_fold(block, region),
            Some(HitTarget::ProseHover { element }) => self.update_prose_hover(Some(element)),
            None => {}
        }
    }
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    app.hits.clear();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.size());
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[0]);

    draw_listing(frame, app, panes[0]);
    draw_prose(frame, app, panes[1]);
    draw_footer(frame, app, chunks[1]);
}

fn draw_listing(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let focused = app.state.focus() == PaneFocus::Listing;
    let panel = Panel::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.article.title()))
        .border_style(app.theme.panel_border_style(focused));
    let inner = panel.inner(area);
    frame.render_widget(panel, area);
    if inner.height == 0 {
        return;
    }

    let view = build_listing_view(app);
    app.listing_scroll =
        scroll_to_cursor(app.listing_scroll, view.cursor_line, inner.height as usize);

    for hit in &view.pending {
        let Some(offset) = hit.line_index.checked_sub(app.listing_scroll) else {
            continue;
        };
        if (offset as u16) >= inner.height {
            continue;
        }
        app.hits.push((
            Rect {
                x: inner.x + hit.x_offset,
                y: inner.y + offset as u16,
                width: hit.width,
                height: 1,
            },
            hit.target,
        ));
    }

    let visible = view
        .lines
        .into_iter()
        .skip(app.listing_scroll)
        .take(inner.height as usize)
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(Text::from(visible)).style(app.theme.base_style()), inner);
}

/// Builds the listing lines plus the clickable cells they carry. Pure over the app state.
fn build_listing_view(app: &App) -> ListingView {
    let cursor_target = app.visible_rows().get(app.state.listing_cursor()).copied();
    let mut view = ListingView {
        lines: Vec::new(),
        pending: Vec::new(),
        cursor_line: 0,
    };

    for (block_index, controller) in app.controllers.iter().enumerate() {
        let block = &app.article.blocks()[block_index];
        view.lines.push(Line::from(Span::styled(
            format!("── {} ──", block.block_id()),
            app.theme.base_style().add_modifier(Modifier::DIM),
        )));

        for row in 0..controller.tree().row_count() {
            if !controller.row_visible(row) {
                continue;
            }
            let line_index = view.lines.len();
            let at_cursor = app.state.focus() == PaneFocus::Listing
                && cursor_target == Some((block_index, row));
            if at_cursor {
                view.cursor_line = line_index;
            }
            let (line, hits) = listing_row_line(app, block_index, row, line_index, at_cursor);
            view.lines.push(line);
            view.pending.extend(hits);
        }
        view.lines.push(Line::default());
    }

    view
}

fn listing_row_line(
    app: &App,
    block_index: usize,
    row: usize,
    line_index: usize,
    at_cursor: bool,
) -> (Line<'static>, Vec<PendingHit>) {
    let controller = &app.controllers[block_index];
    let mounted = controller.rows()[row];
    let model_row = &app.article.blocks()[block_index].rows()[row];

    let region = controller.region_at_anchor(row);
    let folded = region.is_some_and(|id| controller.is_folded(id));
    let gutter_hovered = controller.container_hovered(&app.page);

    let stylesheet = app.dispatcher.line_session().stylesheet();
    let number_style = match stylesheet.shade_for(&app.page, mounted.gutter) {
        Some(shade) => app.theme.highlight_style(shade),
        None => app.theme.base_style().add_modifier(Modifier::DIM),
    };
    let text_style = match stylesheet.shade_for(&app.page, mounted.line) {
        Some(shade) => app.theme.highlight_style(shade),
        None => app.theme.base_style(),
    };

    let cursor_span = if at_cursor {
        Span::styled("▌", app.theme.cursor_style())
    } else {
        Span::raw(" ")
    };
    let marker_span = match region {
        Some(_) if marker_visible(gutter_hovered, folded, at_cursor) => {
            let text = if folded { MARKER_FOLDED } else { MARKER_UNFOLDED };
            Span::styled(text, app.theme.marker_style())
        }
        _ => Span::raw(" "),
    };

    let indent = indent_padding(model_row.indent());
    let body = format!("{indent}{}", model_row.text());
    let body_columns = body.chars().count() as u16;

    let mut spans = vec![
        cursor_span,
        Span::styled(format!("{:>3} ", model_row.line_no()), number_style),
        marker_span,
        Span::raw(" "),
        Span::styled(body, text_style),
    ];

    let mut hits = Vec::new();
    if let Some(region) = region {
        hits.push(PendingHit {
            line_index,
            x_offset: MARKER_COLUMN,
            width: 1,
            target: HitTarget::FoldToggle { block: block_index, region },
        });
        if folded {
            spans.push(Span::styled(format!(" {PLACEHOLDER_TEXT}"), app.theme.marker_style()));
            hits.push(PendingHit {
                line_index,
                x_offset: MARKER_COLUMN + 2 + body_columns + 1,
                width: 1,
                target: HitTarget::FoldToggle { block: block_index, region },
            });
        }
    }

    (Line::from(spans), hits)
}

fn draw_prose(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let focused = app.state.focus() == PaneFocus::Prose;
    let panel = Panel::default()
        .borders(Borders::ALL)
        .title(" references ")
        .border_style(app.theme.panel_border_style(focused));
    let inner = panel.inner(area);
    frame.render_widget(panel, area);
    if inner.height == 0 {
        return;
    }

    let mut lines = Vec::with_capacity(app.prose_items.len());
    let mut hits = Vec::new();
    for (index, (element, label)) in app.prose_items.iter().enumerate() {
        let at_cursor = focused && index == app.state.prose_cursor();
        let shade = app.dispatcher.ref_session().stylesheet().shade_for(&app.page, *element);
        let style = match shade {
            Some(shade) => app.theme.highlight_style(shade),
            None if at_cursor => app.theme.cursor_style(),
            None => app.theme.base_style(),
        };
        lines.push(Line::from(Span::styled(label.clone(), style)));

        if (index as u16) < inner.height {
            hits.push((
                Rect {
                    x: inner.x,
                    y: inner.y + index as u16,
                    width: inner.width,
                    height: 1,
                },
                HitTarget::ProseHover { element: *element },
            ));
        }
    }
    app.hits.extend(hits);
    frame.render_widget(Paragraph::new(Text::from(lines)).style(app.theme.base_style()), inner);
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let line = match &app.toast {
        Some(toast) => {
            Line::from(Span::styled(toast.clone(), app.theme.base_style().fg(Color::Red)))
        }
        None => footer_help_line(app.theme.base_style()),
    };
    frame.render_widget(Paragraph::new(line), area);
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// The built-in demo: a zip-tree insertion listing with a few prose anchors.
pub fn demo_article() -> Article {
    let block_id = BlockId::new("insert").expect("block id");
    let rows = vec![
        Row::new(1, 0, "insert(x):"),
        Row::new(2, 1, "rank(x) ← random geometric rank"),
        Row::new(3, 1, "walk down from the root:"),
        Row::new(4, 2, "until rank(cur) < rank(x)"),
        Row::new(5, 2, "or rank(cur) = rank(x) and key(cur) > key(x)"),
        Row::new(6, 1, "unzip the search path at x:"),
        Row::new(7, 2, "left spine ← nodes with smaller keys"),
        Row::new(8, 2, "right spine ← nodes with larger keys"),
        Row::new(9, 1, "return"),
    ];
    let block = Block::new(block_id.clone(), rows).expect("demo block");

    let ziptree = RefName::new("ziptree").expect("name");
    let rank = RefName::new("rank").expect("name");

    Article::new(
        "Zip trees",
        vec![block],
        vec![
            Callout::new("how the rank is drawn", block_id.clone(), "2"),
            Callout::new("the downward walk", block_id.clone(), "3-5"),
            Callout::new("unzipping the path", block_id, "6-8"),
        ],
        vec![
            Definition::new(
                ziptree.clone(),
                "zip tree",
                "a randomized search tree ordered by key and heap-ordered by rank",
            ),
            Definition::new(
                rank.clone(),
                "rank",
                "geometrically distributed per node; ties break toward smaller keys",
            ),
        ],
        vec![Mention::new(ziptree, "zip trees"), Mention::new(rank, "node ranks")],
    )
}

fn prose_item_labels(article: &Article, dom: &ArticleDom) -> Vec<(ElementId, String)> {
    let mut labels = Vec::with_capacity(dom.prose.len());
    let mut callouts = article.callouts().iter();
    let mut definitions = article.definitions().iter();
    let mut mentions = article.mentions().iter();
    for &(kind, element) in &dom.prose {
        let label = match kind {
            ProseKind::Callout => callouts.next().map(callout_label),
            ProseKind::Definition => definitions.next().map(definition_label),
            ProseKind::Mention => mentions.next().map(mention_label),
        };
        if let Some(label) = label {
            labels.push((element, label));
        }
    }
    labels
}
