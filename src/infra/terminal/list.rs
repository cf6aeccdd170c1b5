use std::io::{self, Stdout, Write};

use crate::application::detail::{DetailRenderer, PostDetailView};
use crate::application::list::{ListRenderer, PaginationView, PostCard};
use crate::application::render::RenderError;

fn output_error(err: io::Error) -> RenderError {
    RenderError::Output(err.to_string())
}

/// Prints list pages as numbered cards.
pub struct TerminalListRenderer<W = Stdout> {
    out: W,
}

impl TerminalListRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalListRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> ListRenderer for TerminalListRenderer<W> {
    fn render_posts(&mut self, cards: Vec<PostCard>) -> Result<(), RenderError> {
        if cards.is_empty() {
            writeln!(self.out, "(no posts)").map_err(output_error)?;
        }
        for (index, card) in cards.iter().enumerate() {
            writeln!(
                self.out,
                "{:>2}. {} [{}]\n    {} {}\n    {}\n    image: {}",
                index + 1,
                card.title,
                card.id,
                card.author,
                card.time_span,
                card.description,
                card.thumbnail.src(),
            )
            .map_err(output_error)?;
        }
        self.out.flush().map_err(output_error)
    }

    fn render_pagination(&mut self, view: PaginationView) -> Result<(), RenderError> {
        let prev = if view.prev_disabled { "-" } else { "p" };
        let next = if view.next_disabled { "-" } else { "n" };
        writeln!(
            self.out,
            "page {}/{}  [{prev}] prev  [{next}] next",
            view.page, view.total_pages
        )
        .map_err(output_error)?;
        self.out.flush().map_err(output_error)
    }

    fn render_search(&mut self, value: &str) -> Result<(), RenderError> {
        writeln!(self.out, "search: {value}").map_err(output_error)
    }
}

/// Prints one post in full.
pub struct TerminalDetailRenderer<W = Stdout> {
    out: W,
}

impl TerminalDetailRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalDetailRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> DetailRenderer for TerminalDetailRenderer<W> {
    fn render_detail(&mut self, view: &PostDetailView) -> Result<(), RenderError> {
        writeln!(
            self.out,
            "{}\n{}{}\n\n{}\n\nimage: {}\nedit: {}",
            view.title,
            view.author,
            view.time_span,
            view.description,
            view.hero.src(),
            view.edit_link,
        )
        .map_err(output_error)?;
        self.out.flush().map_err(output_error)
    }
}
