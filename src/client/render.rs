//! Terminal markdown rendering with syntax-highlighted code blocks.
//!
//! Prose is walked through the pulldown-cmark event stream (tables enabled);
//! fenced code blocks are highlighted with syntect. Inline code and block
//! code are told apart by the event kind: `Event::Code` is inline,
//! `Tag::CodeBlock` is a block.

use console::style;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Style as SyntectStyle, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;

/// Markdown-to-terminal renderer.
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    color: bool,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            color: true,
        }
    }

    /// Renderer without ANSI styling or highlighting, for tests and dumb
    /// terminals.
    pub fn plain() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            color: false,
        }
    }

    /// Render markdown to terminal text.
    pub fn render(&self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        let parser = Parser::new_ext(markdown, options);

        let mut out = String::new();

        // Block state
        let mut in_code_block = false;
        let mut code_lang = String::new();
        let mut code_buf = String::new();
        let mut list_stack: Vec<Option<u64>> = Vec::new();
        let mut quote_depth = 0usize;

        // Table state
        let mut in_table = false;
        let mut table_rows: Vec<Vec<String>> = Vec::new();
        let mut in_cell = false;
        let mut cell = String::new();

        // Inline state
        let mut strong = 0usize;
        let mut emphasis = 0usize;
        let mut heading = false;
        let mut link_dest: Option<String> = None;

        for event in parser {
            match event {
                Event::Start(tag) => match tag {
                    Tag::Paragraph => {
                        for _ in 0..quote_depth {
                            out.push_str("| ");
                        }
                    }
                    Tag::Heading { level, .. } => {
                        heading = true;
                        out.push_str(heading_prefix(level));
                    }
                    Tag::CodeBlock(kind) => {
                        in_code_block = true;
                        code_buf.clear();
                        code_lang = match kind {
                            CodeBlockKind::Fenced(lang) => lang.to_string(),
                            CodeBlockKind::Indented => String::new(),
                        };
                    }
                    Tag::List(start) => list_stack.push(start),
                    Tag::Item => {
                        let indent = "  ".repeat(list_stack.len().saturating_sub(1));
                        out.push_str(&indent);
                        match list_stack.last_mut() {
                            Some(Some(n)) => {
                                out.push_str(&format!("{n}. "));
                                *n += 1;
                            }
                            _ => out.push_str("- "),
                        }
                    }
                    Tag::Table(_) => {
                        in_table = true;
                        table_rows.clear();
                    }
                    Tag::TableHead | Tag::TableRow => table_rows.push(Vec::new()),
                    Tag::TableCell => {
                        in_cell = true;
                        cell.clear();
                    }
                    Tag::Emphasis => emphasis += 1,
                    Tag::Strong => strong += 1,
                    Tag::BlockQuote { .. } => quote_depth += 1,
                    Tag::Link { dest_url, .. } => link_dest = Some(dest_url.to_string()),
                    _ => {}
                },

                Event::End(tag) => match tag {
                    TagEnd::Paragraph => out.push_str("\n\n"),
                    TagEnd::Heading(_) => {
                        heading = false;
                        out.push_str("\n\n");
                    }
                    TagEnd::CodeBlock => {
                        in_code_block = false;
                        out.push_str(&self.render_code(&code_buf, &code_lang));
                        out.push('\n');
                    }
                    TagEnd::List(_) => {
                        list_stack.pop();
                        if list_stack.is_empty() {
                            out.push('\n');
                        }
                    }
                    TagEnd::Item => {
                        if !out.ends_with('\n') {
                            out.push('\n');
                        }
                    }
                    TagEnd::Table => {
                        in_table = false;
                        out.push_str(&render_table(&table_rows));
                        out.push('\n');
                    }
                    TagEnd::TableHead | TagEnd::TableRow => {}
                    TagEnd::TableCell => {
                        in_cell = false;
                        if let Some(row) = table_rows.last_mut() {
                            row.push(std::mem::take(&mut cell));
                        }
                    }
                    TagEnd::Emphasis => emphasis = emphasis.saturating_sub(1),
                    TagEnd::Strong => strong = strong.saturating_sub(1),
                    TagEnd::BlockQuote { .. } => quote_depth = quote_depth.saturating_sub(1),
                    TagEnd::Link => {
                        if let Some(dest) = link_dest.take() {
                            let suffix = format!(" ({dest})");
                            if self.color {
                                out.push_str(&style(suffix).dim().to_string());
                            } else {
                                out.push_str(&suffix);
                            }
                        }
                    }
                    _ => {}
                },

                Event::Text(text) => {
                    if in_code_block {
                        code_buf.push_str(&text);
                    } else if in_cell {
                        cell.push_str(&text);
                    } else {
                        out.push_str(&self.styled_text(
                            &text,
                            strong > 0 || heading,
                            emphasis > 0,
                        ));
                    }
                }

                Event::Code(code) => {
                    if in_cell {
                        cell.push_str(&format!("`{code}`"));
                    } else {
                        out.push_str(&self.inline_code(&code));
                    }
                }

                Event::SoftBreak | Event::HardBreak => {
                    if in_cell {
                        cell.push(' ');
                    } else if !in_table {
                        out.push('\n');
                    }
                }

                Event::Rule => out.push_str("--------\n\n"),
                Event::TaskListMarker(done) => {
                    out.push_str(if done { "[x] " } else { "[ ] " });
                }
                _ => {}
            }
        }

        let trimmed = out.trim_end();
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("{trimmed}\n")
        }
    }

    fn styled_text(&self, text: &str, bold: bool, italic: bool) -> String {
        if !self.color || (!bold && !italic) {
            return text.to_string();
        }
        let mut styled = style(text);
        if bold {
            styled = styled.bold();
        }
        if italic {
            styled = styled.italic();
        }
        styled.to_string()
    }

    fn inline_code(&self, code: &str) -> String {
        let wrapped = format!("`{code}`");
        if self.color {
            style(wrapped).yellow().to_string()
        } else {
            wrapped
        }
    }

    /// Highlight a fenced code block; indented two spaces either way so it
    /// reads as a block next to prose.
    fn render_code(&self, code: &str, lang: &str) -> String {
        if !self.color {
            return code.lines().map(|l| format!("  {l}\n")).collect();
        }

        let syntax = if lang.is_empty() {
            self.syntax_set.find_syntax_plain_text()
        } else {
            self.syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
        };

        let theme = &self.theme_set.themes["base16-ocean.dark"];
        let mut highlighter = HighlightLines::new(syntax, theme);

        let mut output = String::new();
        for line in code.lines() {
            let ranges: Vec<(SyntectStyle, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_default();
            let escaped = as_24_bit_terminal_escaped(&ranges[..], false);
            output.push_str(&format!("  {escaped}\x1b[0m\n"));
        }
        output
    }
}

fn heading_prefix(level: HeadingLevel) -> &'static str {
    match level {
        HeadingLevel::H1 => "# ",
        HeadingLevel::H2 => "## ",
        HeadingLevel::H3 => "### ",
        HeadingLevel::H4 => "#### ",
        HeadingLevel::H5 => "##### ",
        HeadingLevel::H6 => "###### ",
    }
}

/// Lay out collected table cells with padded columns and a header rule.
fn render_table(rows: &[Vec<String>]) -> String {
    let Some(first) = rows.first() else {
        return String::new();
    };

    let columns = rows.iter().map(|r| r.len()).max().unwrap_or(first.len());
    let mut widths = vec![0usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for (index, row) in rows.iter().enumerate() {
        out.push('|');
        for (i, width) in widths.iter().enumerate() {
            let empty = String::new();
            let cell = row.get(i).unwrap_or(&empty);
            out.push_str(&format!(" {cell:<width$} |"));
        }
        out.push('\n');

        if index == 0 {
            out.push('|');
            for width in &widths {
                out.push_str(&format!("{}|", "-".repeat(width + 2)));
            }
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_code_kept_inline() {
        let renderer = MarkdownRenderer::plain();
        let out = renderer.render("Use `foo()` now.");
        assert!(out.contains("Use `foo()` now."));
    }

    #[test]
    fn test_fenced_code_rendered_as_block() {
        let renderer = MarkdownRenderer::plain();
        let out = renderer.render("Before\n\n```rust\nlet x = 1;\n```\n");
        assert!(out.contains("  let x = 1;"));
        // Block content is indented, not backtick-wrapped
        assert!(!out.contains("`let x = 1;`"));
    }

    #[test]
    fn test_table_rendering() {
        let renderer = MarkdownRenderer::plain();
        let out = renderer.render("| Name | Size |\n|------|------|\n| M2 | 80B |\n");
        assert!(out.contains("| Name | Size |"));
        assert!(out.contains("|------|------|"));
        assert!(out.contains("| M2   | 80B  |"));
    }

    #[test]
    fn test_emphasis_markers_stripped_in_plain_mode() {
        let renderer = MarkdownRenderer::plain();
        let out = renderer.render("some **bold** and *italic* text");
        assert_eq!(out, "some bold and italic text\n");
    }

    #[test]
    fn test_lists() {
        let renderer = MarkdownRenderer::plain();
        let out = renderer.render("- alpha\n- beta\n");
        assert!(out.contains("- alpha"));
        assert!(out.contains("- beta"));

        let out = renderer.render("1. one\n2. two\n");
        assert!(out.contains("1. one"));
        assert!(out.contains("2. two"));
    }

    #[test]
    fn test_heading_keeps_marker() {
        let renderer = MarkdownRenderer::plain();
        let out = renderer.render("## Setup\n\ntext");
        assert!(out.starts_with("## Setup"));
    }

    #[test]
    fn test_empty_input() {
        let renderer = MarkdownRenderer::plain();
        assert_eq!(renderer.render(""), "");
    }

    #[test]
    fn test_unclosed_fence_still_renders() {
        let renderer = MarkdownRenderer::plain();
        let out = renderer.render("```python\nprint('hi')\n");
        assert!(out.contains("  print('hi')"));
    }
}
